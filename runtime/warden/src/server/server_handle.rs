use std::convert::Infallible;
use std::future::{Future, IntoFuture};
use std::pin::Pin;
use std::sync::Arc;
use std::time::Duration;

use bytes::Bytes;
use http_body_util::{BodyExt, Full, LengthLimitError, Limited};
use hyper::body::Incoming;
use hyper_util::rt::{TokioExecutor, TokioIo};
use hyper_util::server::conn::auto::Builder;
use hyper_util::server::graceful::GracefulShutdown;
use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinSet;
use tokio_rustls::TlsAcceptor;
use tracing_log_error::log_error;

use super::{IncomingStream, ServerConfig, ShutdownMode};
use crate::router::Router;
use crate::{Request, Response};

/// A handle to a running [`Server`](super::Server).
///
/// `.await` the [`ServerHandle`] to wait for the server to shut down,
/// or call [`ServerHandle::shutdown`] to stop it.
#[derive(Clone)]
pub struct ServerHandle {
    command_outbox: mpsc::Sender<ServerCommand>,
}

impl ServerHandle {
    pub(super) fn new(
        config: ServerConfig,
        incoming: IncomingStream,
        tls: Option<TlsAcceptor>,
        router: Arc<Router>,
    ) -> Self {
        let (command_outbox, command_inbox) = mpsc::channel(32);
        let acceptor = Acceptor {
            config,
            incoming,
            tls,
            router,
            command_inbox,
        };
        tokio::spawn(acceptor.run());
        Self { command_outbox }
    }

    /// Instruct the [`Server`](super::Server) to stop accepting new connections.
    ///
    /// It resolves once the shutdown sequence has completed.
    #[doc(alias("stop"))]
    pub async fn shutdown(self, mode: ShutdownMode) {
        let (completion_notifier, completion) = oneshot::channel();
        if self
            .command_outbox
            .send(ServerCommand::Shutdown {
                completion_notifier,
                mode,
            })
            .await
            .is_ok()
        {
            // Sending only fails if the acceptor is already gone, i.e. the
            // server has already shut down.
            let _ = completion.await;
        }
    }
}

impl IntoFuture for ServerHandle {
    type Output = ();
    type IntoFuture = Pin<Box<dyn Future<Output = ()> + Send + Sync + 'static>>;

    fn into_future(self) -> Self::IntoFuture {
        Box::pin(async move { self.command_outbox.closed().await })
    }
}

enum ServerCommand {
    Shutdown {
        completion_notifier: oneshot::Sender<()>,
        mode: ShutdownMode,
    },
}

struct Acceptor {
    config: ServerConfig,
    incoming: IncomingStream,
    tls: Option<TlsAcceptor>,
    router: Arc<Router>,
    command_inbox: mpsc::Receiver<ServerCommand>,
}

impl Acceptor {
    /// Accept connections until a shutdown command comes in.
    ///
    /// Constraint: this method **must not panic**.
    async fn run(self) {
        let Self {
            config,
            incoming,
            tls,
            router,
            mut command_inbox,
        } = self;
        let body_limit = usize::try_from(config.body_limit.as_u64()).unwrap_or(usize::MAX);
        let request_timeout = config.request_timeout;
        let builder = Builder::new(TokioExecutor::new());
        let graceful = GracefulShutdown::new();
        let mut connections = JoinSet::new();
        let mut inbox_closed = false;

        match incoming.local_addr() {
            Ok(address) => tracing::info!(
                server.address = %address,
                server.tls = tls.is_some(),
                "Listening for incoming connections"
            ),
            Err(e) => log_error!(e, level: tracing::Level::WARN, "Failed to determine the server address"),
        }

        let (completion_notifier, mode) = loop {
            tokio::select! {
                command = command_inbox.recv(), if !inbox_closed => match command {
                    Some(ServerCommand::Shutdown { completion_notifier, mode }) => {
                        break (completion_notifier, mode);
                    }
                    // Every handle was dropped: nobody can stop us anymore.
                    None => inbox_closed = true,
                },
                accepted = incoming.accept() => {
                    let (stream, peer) = match accepted {
                        Ok(accepted) => accepted,
                        Err(e) => {
                            log_error!(e, "Failed to accept connection");
                            continue;
                        }
                    };
                    let router = router.clone();
                    let service = hyper::service::service_fn(move |request| {
                        let router = router.clone();
                        async move {
                            let response = dispatch(request, &router, body_limit, request_timeout).await;
                            Ok::<_, Infallible>(response)
                        }
                    });
                    let builder = builder.clone();
                    let watcher = graceful.watcher();
                    let tls = tls.clone();
                    connections.spawn(async move {
                        let outcome = match tls {
                            Some(tls) => {
                                let stream = match tls.accept(stream).await {
                                    Ok(stream) => stream,
                                    Err(e) => {
                                        tracing::debug!(
                                            error.message = %e,
                                            client.address = %peer,
                                            "TLS handshake failed"
                                        );
                                        return;
                                    }
                                };
                                let connection = builder
                                    .serve_connection_with_upgrades(TokioIo::new(stream), service)
                                    .into_owned();
                                watcher.watch(connection).await
                            }
                            None => {
                                let connection = builder
                                    .serve_connection_with_upgrades(TokioIo::new(stream), service)
                                    .into_owned();
                                watcher.watch(connection).await
                            }
                        };
                        if let Err(e) = outcome {
                            tracing::debug!(
                                error.message = %e,
                                client.address = %peer,
                                "Connection terminated with an error"
                            );
                        }
                    });
                }
                Some(_) = connections.join_next(), if !connections.is_empty() => {}
            }
        };

        // No new connections from here on.
        drop(incoming);
        match mode {
            ShutdownMode::Graceful { timeout } => {
                tracing::info!("Shutting down gracefully");
                tokio::select! {
                    _ = graceful.shutdown() => {
                        tracing::info!("All open connections have been closed");
                    }
                    _ = tokio::time::sleep(timeout) => {
                        tracing::warn!(
                            timeout = ?timeout,
                            "Graceful shutdown timed out, dropping the remaining connections"
                        );
                    }
                }
            }
            ShutdownMode::Forced => {
                tracing::info!("Shutting down, dropping all open connections");
            }
        }
        connections.abort_all();
        while connections.join_next().await.is_some() {}
        tracing::info!("Server shut down");
        let _ = completion_notifier.send(());
    }
}

/// Buffer the request body and hand the request over to the router.
async fn dispatch(
    request: hyper::Request<Incoming>,
    router: &Router,
    body_limit: usize,
    request_timeout: Duration,
) -> hyper::Response<Full<Bytes>> {
    let (parts, body) = request.into_parts();
    let collected =
        tokio::time::timeout(request_timeout, Limited::new(body, body_limit).collect()).await;
    let response = match collected {
        Ok(Ok(body)) => router.route(Request::new(parts.into(), body.to_bytes())),
        Ok(Err(e)) if e.downcast_ref::<LengthLimitError>().is_some() => {
            Response::payload_too_large()
        }
        Ok(Err(e)) => {
            tracing::debug!(error.message = %e, "Failed to read the request body");
            Response::bad_request()
        }
        Err(_) => Response::request_timeout(),
    };
    http::Response::<Bytes>::from(response).map(Full::new)
}
