//! Typed discovery helpers.
//!
//! Discovery keys answer with a JSON payload of the shape
//! `{"data": [{"{#MACRO}": value, ...}, ...]}`. These helpers run the
//! well-known discovery queries and map the entries onto plain structs.
//! They sit on top of [`Agent::query`] and add no protocol logic.

use std::time::Duration;

use serde::de::DeserializeOwned;
use serde::Deserialize;

use crate::client::Agent;
use crate::error::Result;

/// A mounted filesystem, as reported by `vfs.fs.discovery`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Filesystem {
    #[serde(rename = "{#FSNAME}")]
    pub name: String,
    #[serde(rename = "{#FSTYPE}")]
    pub fs_type: String,
}

/// A network interface, as reported by `net.if.discovery`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct NetworkInterface {
    #[serde(rename = "{#IFNAME}")]
    pub name: String,
}

/// A CPU, as reported by `system.cpu.discovery`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Cpu {
    #[serde(rename = "{#CPU.NUMBER}")]
    pub number: f64,
    #[serde(rename = "{#CPU.STATUS}")]
    pub status: String,
}

#[derive(Deserialize)]
struct DiscoveryPayload<T> {
    data: Vec<T>,
}

impl Agent {
    /// Run `vfs.fs.discovery` and return the discovered filesystems.
    pub async fn discover_filesystems(&self, timeout: Duration) -> Result<Vec<Filesystem>> {
        self.discover("vfs.fs.discovery", timeout).await
    }

    /// Run `net.if.discovery` and return the discovered interfaces.
    pub async fn discover_network_interfaces(
        &self,
        timeout: Duration,
    ) -> Result<Vec<NetworkInterface>> {
        self.discover("net.if.discovery", timeout).await
    }

    /// Run `system.cpu.discovery` and return the discovered CPUs.
    pub async fn discover_cpus(&self, timeout: Duration) -> Result<Vec<Cpu>> {
        self.discover("system.cpu.discovery", timeout).await
    }

    async fn discover<T: DeserializeOwned>(&self, key: &str, timeout: Duration) -> Result<Vec<T>> {
        let response = self.query(key, timeout).await?;
        let payload: DiscoveryPayload<T> = serde_json::from_slice(response.payload())?;
        Ok(payload.data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filesystem_mapping() {
        let json = r#"{"data":[
            {"{#FSNAME}":"/","{#FSTYPE}":"ext4"},
            {"{#FSNAME}":"/boot","{#FSTYPE}":"vfat"}
        ]}"#;
        let payload: DiscoveryPayload<Filesystem> = serde_json::from_str(json).unwrap();

        assert_eq!(payload.data.len(), 2);
        assert_eq!(payload.data[0].name, "/");
        assert_eq!(payload.data[0].fs_type, "ext4");
        assert_eq!(payload.data[1].name, "/boot");
    }

    #[test]
    fn test_network_interface_mapping() {
        let json = r#"{"data":[{"{#IFNAME}":"eth0"},{"{#IFNAME}":"lo"}]}"#;
        let payload: DiscoveryPayload<NetworkInterface> = serde_json::from_str(json).unwrap();

        assert_eq!(payload.data[0].name, "eth0");
        assert_eq!(payload.data[1].name, "lo");
    }

    #[test]
    fn test_cpu_mapping() {
        let json = r#"{"data":[{"{#CPU.NUMBER}":0,"{#CPU.STATUS}":"online"}]}"#;
        let payload: DiscoveryPayload<Cpu> = serde_json::from_str(json).unwrap();

        assert_eq!(payload.data[0].number, 0.0);
        assert_eq!(payload.data[0].status, "online");
    }

    #[test]
    fn test_malformed_discovery_json_fails() {
        let json = r#"{"data":[{"{#FSNAME}": 42}]}"#;
        assert!(serde_json::from_str::<DiscoveryPayload<Filesystem>>(json).is_err());
    }
}
