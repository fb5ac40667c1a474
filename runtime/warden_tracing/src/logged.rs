use warden::http::Method;
use warden::router::RouteRegistry;
use warden::{Request, RequestHandler, Response};

use crate::fields::{http_response_status_code, HTTP_RESPONSE_STATUS_CODE};
use crate::RootSpan;

/// A request handler decorator that runs the wrapped handler inside the
/// request's [`RootSpan`].
///
/// Every `tracing` span entered by the wrapped handler is a child of the
/// [`RootSpan`], either directly or transitively.
/// The status code of the outgoing response is recorded on the [`RootSpan`]
/// once the wrapped handler returns.
///
/// ```rust
/// use warden::http::Method;
/// use warden::router::{RouteRegistry, Router};
/// use warden::{Request, Response};
/// use warden_tracing::Logged;
///
/// let mut router = Router::new();
/// router.handler(
///     Method::GET,
///     "/ping",
///     Logged::new(|_: &Request| Response::ok()),
/// );
/// ```
#[derive(Debug, Clone)]
pub struct Logged<H> {
    inner: H,
}

impl<H> Logged<H> {
    /// Wrap `inner` in a [`Logged`] decorator.
    pub fn new(inner: H) -> Self {
        Self { inner }
    }

    /// Retrieve the wrapped handler.
    pub fn into_inner(self) -> H {
        self.inner
    }
}

impl<H> RequestHandler for Logged<H>
where
    H: RequestHandler,
{
    fn handle(&self, request: &Request) -> Response {
        let root_span = RootSpan::for_request(request);
        let response = root_span.in_scope(|| self.inner.handle(request));
        root_span.record(
            HTTP_RESPONSE_STATUS_CODE,
            http_response_status_code(&response),
        );
        response
    }
}

/// A [`RouteRegistry`] decorator that wraps every handler in [`Logged`].
///
/// Stack other registry decorators on top of it: whatever they wrap around
/// a handler ends up inside the [`RootSpan`] too.
///
/// ```rust
/// use warden::http::Method;
/// use warden::router::{RouteRegistry, Router};
/// use warden::{Request, Response};
/// use warden_tracing::LoggedRoutes;
///
/// let mut router = Router::new();
/// let mut routes = LoggedRoutes::new(&mut router);
/// routes.handler(Method::GET, "/ping", |_: &Request| Response::ok());
/// ```
pub struct LoggedRoutes<'a, R> {
    registry: &'a mut R,
}

impl<'a, R> LoggedRoutes<'a, R>
where
    R: RouteRegistry,
{
    /// Decorate `registry`.
    pub fn new(registry: &'a mut R) -> Self {
        Self { registry }
    }
}

impl<R> RouteRegistry for LoggedRoutes<'_, R>
where
    R: RouteRegistry,
{
    fn handler<H>(&mut self, method: Method, path: &str, handler: H)
    where
        H: RequestHandler,
    {
        self.registry.handler(method, path, Logged::new(handler));
    }
}
