//! Agent endpoint and query execution.
//!
//! An [`Agent`] holds the connection parameters for one remote passive
//! agent. Every query is self-contained: it opens a fresh TCP connection,
//! writes the raw key, decodes one response frame, and drops the socket.
//! There is no retry, pooling, or multiplexing, so concurrent callers need
//! no coordination.
//!
//! # Example
//!
//! ```ignore
//! use std::time::Duration;
//! use zabbix_agent_client::Agent;
//!
//! #[tokio::main]
//! async fn main() -> zabbix_agent_client::Result<()> {
//!     let agent = Agent::new("monitoring-host");
//!     let res = agent.query("agent.ping", Duration::ZERO).await?;
//!     assert_eq!(res.as_str(), "1");
//!     Ok(())
//! }
//! ```

use std::time::Duration;

use tokio::io::AsyncWriteExt;
use tokio::net::TcpStream;
use tokio::time;
use tracing::debug;

use crate::error::{Result, ZabbixError};
use crate::protocol::{read_frame, FrameOptions};
use crate::response::{Response, Value};

/// Port a passive agent listens on unless configured otherwise.
pub const DEFAULT_PORT: u16 = 10050;

/// Query deadline used when the caller passes a zero timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// A remote passive agent endpoint.
///
/// Immutable once built; construct with [`Agent::new`] for the defaults or
/// [`Agent::builder`] to adjust port, timeout, or decoding strictness.
#[derive(Debug, Clone)]
pub struct Agent {
    host: String,
    port: u16,
    timeout: Duration,
    frame_options: FrameOptions,
}

/// Builder for configuring an [`Agent`].
#[derive(Debug, Clone)]
pub struct AgentBuilder {
    host: String,
    port: u16,
    timeout: Duration,
    frame_options: FrameOptions,
}

impl AgentBuilder {
    fn new(host: impl Into<String>) -> Self {
        Self {
            host: host.into(),
            port: DEFAULT_PORT,
            timeout: DEFAULT_TIMEOUT,
            frame_options: FrameOptions::default(),
        }
    }

    /// Set the agent's TCP port (default 10050).
    pub fn port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    /// Set the default query timeout, substituted whenever a caller passes
    /// a zero timeout (default 30 seconds).
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Reject response frames whose header is not `ZBXD\x01`. The protocol
    /// itself never rejects on this basis; off by default.
    pub fn strict_header_check(mut self, strict: bool) -> Self {
        self.frame_options.strict_header = strict;
        self
    }

    /// Reject response frames whose payload length differs from the
    /// declared length. The protocol reads to EOF and tolerates the
    /// mismatch; off by default.
    pub fn enforce_declared_length(mut self, enforce: bool) -> Self {
        self.frame_options.enforce_declared_length = enforce;
        self
    }

    /// Build the agent endpoint.
    pub fn build(self) -> Agent {
        Agent {
            host: self.host,
            port: self.port,
            timeout: self.timeout,
            frame_options: self.frame_options,
        }
    }
}

impl Agent {
    /// Create an agent endpoint with the default port and timeout.
    pub fn new(host: impl Into<String>) -> Self {
        AgentBuilder::new(host).build()
    }

    /// Start building an agent endpoint.
    pub fn builder(host: impl Into<String>) -> AgentBuilder {
        AgentBuilder::new(host)
    }

    /// The agent's host name or address.
    pub fn host(&self) -> &str {
        &self.host
    }

    /// The agent's TCP port.
    pub fn port(&self) -> u16 {
        self.port
    }

    /// The endpoint's default query timeout.
    pub fn default_timeout(&self) -> Duration {
        self.timeout
    }

    fn host_port(&self) -> String {
        join_host_port(&self.host, self.port)
    }

    fn effective_timeout(&self, timeout: Duration) -> Duration {
        if timeout < Duration::from_millis(1) {
            self.timeout
        } else {
            timeout
        }
    }

    /// Run the check `key` against the agent with the given timeout.
    ///
    /// A timeout below one millisecond means "use the endpoint default".
    /// The deadline bounds the connect and, separately, the write + read
    /// exchange; expiry surfaces as [`ZabbixError::Timeout`].
    ///
    /// An answer carrying the `ZBX_NOTSUPPORTED` marker is returned as
    /// [`ZabbixError::NotSupported`] with the parsed [`Response`] embedded,
    /// so the payload stays inspectable.
    pub async fn query(&self, key: &str, timeout: Duration) -> Result<Response> {
        let deadline = self.effective_timeout(timeout);
        let addr = self.host_port();
        debug!(%addr, key, ?deadline, "querying agent");

        let mut conn = time::timeout(deadline, TcpStream::connect(&addr))
            .await
            .map_err(|_| ZabbixError::Timeout(deadline))??;

        let frame = time::timeout(deadline, async {
            // Raw key bytes, no delimiter. Shutting down the write half
            // gives the agent EOF to terminate its key read on.
            conn.write_all(key.as_bytes()).await?;
            conn.shutdown().await?;
            read_frame(&mut conn, &self.frame_options).await
        })
        .await
        .map_err(|_| ZabbixError::Timeout(deadline))??;
        drop(conn);

        let response = Response::new(key, frame);
        if !response.supported() {
            return Err(ZabbixError::NotSupported {
                key: key.to_string(),
                response,
            });
        }

        Ok(response)
    }

    /// Run `query` and return the payload as a string.
    pub async fn query_str(&self, key: &str, timeout: Duration) -> Result<String> {
        Ok(self.query(key, timeout).await?.as_str())
    }

    /// Run `query` and parse the payload as a bool.
    pub async fn query_bool(&self, key: &str, timeout: Duration) -> Result<bool> {
        self.query(key, timeout).await?.as_bool()
    }

    /// Run `query` and parse the payload as an `i32`.
    pub async fn query_int(&self, key: &str, timeout: Duration) -> Result<i32> {
        self.query(key, timeout).await?.as_int()
    }

    /// Run `query` and parse the payload as an `i64`.
    pub async fn query_i64(&self, key: &str, timeout: Duration) -> Result<i64> {
        self.query(key, timeout).await?.as_i64()
    }

    /// Run `query` and parse the payload as an `f64`.
    pub async fn query_f64(&self, key: &str, timeout: Duration) -> Result<f64> {
        self.query(key, timeout).await?.as_f64()
    }

    /// Run `query` and infer the most appropriate payload type. Useful when
    /// you want a concrete type but don't know it ahead of time.
    pub async fn query_value(&self, key: &str, timeout: Duration) -> Result<Value> {
        Ok(self.query(key, timeout).await?.value())
    }

    /// Call `agent.ping`. True iff the agent answers `1`.
    pub async fn ping(&self, timeout: Duration) -> Result<bool> {
        self.query_bool("agent.ping", timeout).await
    }

    /// Call `agent.version` and return the agent's version string.
    pub async fn version(&self, timeout: Duration) -> Result<String> {
        self.query_str("agent.version", timeout).await
    }

    /// Call `agent.hostname` and return the agent's configured hostname.
    pub async fn hostname(&self, timeout: Duration) -> Result<String> {
        self.query_str("agent.hostname", timeout).await
    }
}

/// Join host and port, bracketing IPv6 literals.
fn join_host_port(host: &str, port: u16) -> String {
    if host.contains(':') {
        format!("[{host}]:{port}")
    } else {
        format!("{host}:{port}")
    }
}
