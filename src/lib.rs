//! # zabbix-agent-client
//!
//! Client for the Zabbix passive agent query protocol: connect to a
//! listening agent over TCP, send a single text key, and decode the
//! length-framed binary response.
//!
//! ## Architecture
//!
//! - **Frame decoder** ([`protocol`]): fixed `ZBXD\x01` header, varint
//!   declared length, payload read to end of stream.
//! - **Agent client** ([`Agent`]): one connection per query, with a
//!   deadline covering connect and the write/read exchange.
//! - **Response** ([`Response`]): typed accessors over the payload text
//!   plus best-effort type inference.
//!
//! ## Example
//!
//! ```ignore
//! use std::time::Duration;
//! use zabbix_agent_client::Agent;
//!
//! #[tokio::main]
//! async fn main() -> zabbix_agent_client::Result<()> {
//!     let agent = Agent::new("localhost");
//!
//!     if agent.ping(Duration::ZERO).await? {
//!         println!("version: {}", agent.version(Duration::ZERO).await?);
//!     }
//!
//!     for fs in agent.discover_filesystems(Duration::ZERO).await? {
//!         println!("{} ({})", fs.name, fs.fs_type);
//!     }
//!     Ok(())
//! }
//! ```

pub mod protocol;

mod client;
mod discovery;
mod error;
mod response;

pub use client::{Agent, AgentBuilder, DEFAULT_PORT, DEFAULT_TIMEOUT};
pub use discovery::{Cpu, Filesystem, NetworkInterface};
pub use error::{Result, ZabbixError};
pub use response::{Response, Value};
