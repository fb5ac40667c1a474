use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::time::Duration;

use ubyte::ByteUnit;

use super::TlsConfig;

#[derive(Debug, Clone, PartialEq, Eq, serde::Deserialize)]
#[serde(deny_unknown_fields)]
/// Configuration for the HTTP [`Server`](super::Server).
///
/// Every field has a default, so an empty configuration section is valid:
///
/// ```yaml
/// server:
///   ip: "0.0.0.0"
///   port: 8080
///   request_timeout: "30s"
///   shutdown_timeout: "10s"
///   body_limit: "1 MiB"
///   tls:
///     cert_file: "cert.pem"
///     key_file: "key.pem"
/// ```
pub struct ServerConfig {
    /// The IP address the server binds to.
    #[serde(default = "default_ip")]
    pub ip: IpAddr,
    /// The port the server listens on. Use `0` to let the OS pick a free port.
    #[serde(default = "default_port")]
    pub port: u16,
    /// How long the server waits for a request body to be fully received.
    #[serde(with = "humantime_serde", default = "default_timeout")]
    pub request_timeout: Duration,
    /// How long a graceful shutdown waits for in-flight connections.
    #[serde(with = "humantime_serde", default = "default_timeout")]
    pub shutdown_timeout: Duration,
    /// The largest request body the server accepts.
    /// Larger bodies are rejected with `413 Payload Too Large`.
    #[serde(default = "default_body_limit")]
    pub body_limit: ByteUnit,
    /// Serve HTTPS instead of plain HTTP.
    #[serde(default)]
    pub tls: Option<TlsConfig>,
}

impl ServerConfig {
    /// The socket address the server binds to.
    pub fn listen_address(&self) -> SocketAddr {
        SocketAddr::new(self.ip, self.port)
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            ip: default_ip(),
            port: default_port(),
            request_timeout: default_timeout(),
            shutdown_timeout: default_timeout(),
            body_limit: default_body_limit(),
            tls: None,
        }
    }
}

fn default_ip() -> IpAddr {
    IpAddr::V4(Ipv4Addr::LOCALHOST)
}

fn default_port() -> u16 {
    1333
}

fn default_timeout() -> Duration {
    Duration::from_secs(15)
}

fn default_body_limit() -> ByteUnit {
    ByteUnit::Mebibyte(2)
}
