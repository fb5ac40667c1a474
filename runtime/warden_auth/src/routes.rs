use std::sync::Arc;

use warden::http::Method;
use warden::router::RouteRegistry;
use warden::RequestHandler;

use crate::{AuthHandler, CheckAuth};

/// Route registration with support for handlers that require authorization.
///
/// # What a denied client can still observe
///
/// A denied request gets the same `404 Not Found` as a request for a path that
/// was never registered. The guard only covers the method and path it was registered for, though:
/// the router answers before any handler runs when the method or the trailing slash
/// doesn't match. With a guarded `GET /admin`:
///
/// - `POST /admin` gets a `405 Method Not Allowed`, with `Allow: GET, OPTIONS`;
/// - `OPTIONS /admin` gets a `204 No Content`, with the same `Allow` header;
/// - `GET /admin/` is redirected to `/admin` with a `301 Moved Permanently`.
///
/// Each of these tells an unauthorized client that `/admin` exists.
/// Register guarded handlers for every method on a path if that matters.
pub trait AuthRouter: RouteRegistry {
    /// Register `handler` for `method` and `path`, guarded by `required`.
    ///
    /// Requests that don't satisfy `required` get a `404 Not Found` and never reach `handler`.
    /// See [`AuthHandler`] for details.
    ///
    /// # Panics
    ///
    /// It panics under the same conditions as [`RouteRegistry::handler`].
    fn auth_handler<H>(&mut self, method: Method, path: &str, required: &str, handler: H)
    where
        H: RequestHandler;
}

/// A [`RouteRegistry`] decorator that implements [`AuthRouter`].
///
/// Plain handlers are forwarded to the underlying registry as they are.
/// Guarded handlers are wrapped in an [`AuthHandler`] that consults the
/// [`CheckAuth`] this decorator was built with.
pub struct AuthRoutes<'a, R> {
    registry: &'a mut R,
    check: Arc<dyn CheckAuth>,
}

impl<'a, R> AuthRoutes<'a, R>
where
    R: RouteRegistry,
{
    /// Decorate `registry`, using `check` to authorize requests to guarded routes.
    pub fn new(registry: &'a mut R, check: Arc<dyn CheckAuth>) -> Self {
        Self { registry, check }
    }
}

impl<R> RouteRegistry for AuthRoutes<'_, R>
where
    R: RouteRegistry,
{
    fn handler<H>(&mut self, method: Method, path: &str, handler: H)
    where
        H: RequestHandler,
    {
        self.registry.handler(method, path, handler);
    }
}

impl<R> AuthRouter for AuthRoutes<'_, R>
where
    R: RouteRegistry,
{
    fn auth_handler<H>(&mut self, method: Method, path: &str, required: &str, handler: H)
    where
        H: RequestHandler,
    {
        let handler = AuthHandler::new(self.check.clone(), required, handler);
        self.registry.handler(method, path, handler);
    }
}
