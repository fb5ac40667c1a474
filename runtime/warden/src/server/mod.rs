//! An HTTP server to serve the routes registered on a [`Router`](crate::router::Router).
//!
//! [`Server`] is the key type in this module.
pub use config::ServerConfig;
pub use incoming::IncomingStream;
pub use server_::{BindError, Server};
pub use server_handle::ServerHandle;
pub use shutdown_mode::ShutdownMode;
pub use tls::{TlsConfig, TlsConfigError};

mod config;
mod incoming;
mod server_;
mod server_handle;
mod shutdown_mode;
mod tls;
