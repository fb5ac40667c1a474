use std::net::SocketAddr;
use std::sync::Arc;

use tokio_rustls::TlsAcceptor;

use super::{IncomingStream, ServerConfig, ServerHandle, TlsConfigError};
use crate::router::Router;

/// An HTTP server to handle incoming connections.
///
/// It speaks both HTTP/1.1 and HTTP/2, over TLS if [`ServerConfig::tls`] is set.
/// Request bodies are buffered in memory, up to [`ServerConfig::body_limit`],
/// before the [`Router`] is invoked.
///
/// # Example
///
/// ```rust,no_run
/// use warden::http::Method;
/// use warden::router::{RouteRegistry, Router};
/// use warden::server::{Server, ServerConfig, ShutdownMode};
/// use warden::{Request, Response};
///
/// # async fn t() -> Result<(), warden::server::BindError> {
/// let mut router = Router::new();
/// router.handler(Method::GET, "/ping", |_: &Request| Response::ok());
///
/// let handle = Server::bind(ServerConfig::default()).await?.serve(router);
/// handle.shutdown(ShutdownMode::Forced).await;
/// # Ok(())
/// # }
/// ```
#[must_use = "You must call `serve` on a `Server` to start listening for incoming connections"]
pub struct Server {
    config: ServerConfig,
    incoming: IncomingStream,
    tls: Option<TlsAcceptor>,
}

impl Server {
    /// Bind a listener to the address specified in `config`.
    ///
    /// The certificate and private key are loaded here if TLS is configured.
    pub async fn bind(config: ServerConfig) -> Result<Self, BindError> {
        let tls = load_tls(&config)?;
        let incoming = IncomingStream::bind(config.listen_address()).await?;
        Ok(Self {
            config,
            incoming,
            tls,
        })
    }

    /// Serve connections coming from an [`IncomingStream`] you bound yourself.
    ///
    /// `config.ip` and `config.port` are ignored.
    pub fn listen(config: ServerConfig, incoming: IncomingStream) -> Result<Self, TlsConfigError> {
        let tls = load_tls(&config)?;
        Ok(Self {
            config,
            incoming,
            tls,
        })
    }

    /// The address the server is listening on.
    pub fn local_addr(&self) -> std::io::Result<SocketAddr> {
        self.incoming.local_addr()
    }

    /// Start accepting connections, dispatching every request via `router`.
    ///
    /// It must be called from within a Tokio runtime: the accept loop,
    /// as well as every connection, runs on a spawned task.
    /// Use the returned [`ServerHandle`] to shut the server down.
    pub fn serve(self, router: Router) -> ServerHandle {
        ServerHandle::new(self.config, self.incoming, self.tls, Arc::new(router))
    }
}

fn load_tls(config: &ServerConfig) -> Result<Option<TlsAcceptor>, TlsConfigError> {
    config.tls.as_ref().map(|tls| tls.acceptor()).transpose()
}

#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
/// The error returned by [`Server::bind`].
pub enum BindError {
    #[error("Failed to bind the TCP listener")]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Tls(#[from] TlsConfigError),
}
