//! Dispatch requests to the appropriate handler.
use std::collections::HashMap;
use std::sync::Arc;

use http::header::{ALLOW, LOCATION};
use http::{HeaderValue, Method};
use smallvec::SmallVec;

use crate::request::PathParams;
use crate::{Request, RequestHandler, Response};

pub use allowed_methods::AllowedMethods;
pub use fallback::default_fallback;

mod allowed_methods;
mod fallback;

/// The registration half of a router: map a (method, path) pair to a handler.
///
/// [`Router`] is the implementation shipped with this crate, but decorators
/// (e.g. a router that gates handlers behind an authorization check) are
/// written against this trait.
pub trait RouteRegistry {
    /// Register `handler` for requests matching `method` and `path`.
    ///
    /// `path` is a route template: segments wrapped in curly braces
    /// (`/users/{id}`) capture a path parameter, a trailing `{*rest}`
    /// captures everything after it.
    ///
    /// # Panics
    ///
    /// It panics if the same (method, path) pair is registered twice, or
    /// if `path` conflicts with a template that was already registered.
    /// Both are programming errors that should surface at startup.
    fn handler<H>(&mut self, method: Method, path: &str, handler: H)
    where
        H: RequestHandler;
}

/// A method+path router.
///
/// ```rust
/// use warden::http::{Method, StatusCode};
/// use warden::router::{RouteRegistry, Router};
/// use warden::{Request, Response};
///
/// let mut router = Router::new();
/// router.handler(Method::GET, "/ping", |_: &Request| Response::ok());
///
/// let request = warden::http::Request::get("/ping").body(Default::default()).unwrap();
/// assert_eq!(router.route(request.into()).status(), StatusCode::OK);
///
/// let request = warden::http::Request::get("/pong").body(Default::default()).unwrap();
/// assert_eq!(router.route(request.into()).status(), StatusCode::NOT_FOUND);
/// ```
///
/// # Routing failures
///
/// - If no template matches the request path, the response is a `404 Not Found`,
///   unless the path would match with its trailing slash added or removed:
///   the client is then redirected to the canonical path
///   (`301 Moved Permanently` for `GET` and `HEAD` requests, `308 Permanent Redirect` otherwise).
/// - If a template matches but there is no handler for the request method,
///   `OPTIONS` requests get a `204 No Content` with the `Allow` header,
///   everything else gets a `405 Method Not Allowed` with the `Allow` header.
pub struct Router {
    matcher: matchit::Router<usize>,
    routes: Vec<Route>,
    template2id: HashMap<String, usize>,
}

struct Route {
    template: String,
    handlers: SmallVec<[(Method, Arc<dyn RequestHandler>); 2]>,
}

impl Route {
    fn handler_for(&self, method: &Method) -> Option<&Arc<dyn RequestHandler>> {
        self.handlers
            .iter()
            .find(|(m, _)| m == method)
            .map(|(_, handler)| handler)
    }

    fn allowed_methods(&self) -> AllowedMethods {
        AllowedMethods::from_methods(self.handlers.iter().map(|(m, _)| m.clone()))
    }
}

#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
/// The error returned by [`Router::try_handler`].
pub enum RegistrationError {
    #[error("A handler for `{method} {path}` has already been registered")]
    /// There is already a handler for the same (method, path) pair.
    DuplicateRoute { method: Method, path: String },
    #[error("`{path}` is not a valid route template")]
    /// The template is malformed or it conflicts with another template.
    InvalidTemplate {
        path: String,
        #[source]
        source: matchit::InsertError,
    },
}

impl Default for Router {
    fn default() -> Self {
        Self::new()
    }
}

impl Router {
    /// An empty router: every request gets a `404 Not Found`.
    pub fn new() -> Self {
        Self {
            matcher: matchit::Router::new(),
            routes: Vec::new(),
            template2id: HashMap::new(),
        }
    }

    /// Register `handler` for `method` and `path`, returning an error instead of
    /// panicking if the registration is invalid.
    pub fn try_handler<H>(
        &mut self,
        method: Method,
        path: &str,
        handler: H,
    ) -> Result<(), RegistrationError>
    where
        H: RequestHandler,
    {
        let route_id = match self.template2id.get(path) {
            Some(id) => *id,
            None => {
                let id = self.routes.len();
                self.matcher
                    .insert(path, id)
                    .map_err(|source| RegistrationError::InvalidTemplate {
                        path: path.to_owned(),
                        source,
                    })?;
                self.routes.push(Route {
                    template: path.to_owned(),
                    handlers: SmallVec::new(),
                });
                self.template2id.insert(path.to_owned(), id);
                id
            }
        };
        let route = &mut self.routes[route_id];
        if route.handler_for(&method).is_some() {
            return Err(RegistrationError::DuplicateRoute {
                method,
                path: path.to_owned(),
            });
        }
        tracing::trace!(%method, path, "Registered a request handler");
        let handler: Arc<dyn RequestHandler> = Arc::new(handler);
        route.handlers.push((method, handler));
        Ok(())
    }

    /// The set of methods with a registered handler for `path`, if `path`
    /// matches one of the registered templates.
    pub fn allowed_methods(&self, path: &str) -> Option<AllowedMethods> {
        let matched = self.matcher.at(path).ok()?;
        Some(self.routes[*matched.value].allowed_methods())
    }

    /// Dispatch `request` to the handler registered for its method and path.
    ///
    /// Check out [`Router`]'s documentation for how routing failures are handled.
    pub fn route(&self, mut request: Request) -> Response {
        let path = request.head.target.path().to_owned();
        let Ok(matched) = self.matcher.at(&path) else {
            return self
                .trailing_slash_redirect(&request)
                .unwrap_or_else(Response::not_found);
        };
        let route = &self.routes[*matched.value];
        let Some(handler) = route.handler_for(&request.head.method) else {
            let allowed_methods = route.allowed_methods().with_options();
            if request.head.method == Method::OPTIONS {
                let response = Response::no_content();
                return match allowed_methods.allow_header_value() {
                    Some(value) => response.insert_header(ALLOW, value),
                    None => response,
                };
            }
            return default_fallback(&allowed_methods);
        };
        request.set_route(&route.template, PathParams::from_matchit(&matched.params));
        handler.handle(&request)
    }

    fn trailing_slash_redirect(&self, request: &Request) -> Option<Response> {
        let path = request.head.target.path();
        let candidate = match path.strip_suffix('/') {
            Some(stripped) if !stripped.is_empty() => stripped.to_owned(),
            Some(_) => return None,
            None => format!("{path}/"),
        };
        self.matcher.at(&candidate).ok()?;

        let location = match request.head.target.query() {
            Some(query) => format!("{candidate}?{query}"),
            None => candidate,
        };
        let location = HeaderValue::from_str(&location).ok()?;
        let response = if request.head.method == Method::GET || request.head.method == Method::HEAD {
            Response::moved_permanently()
        } else {
            Response::permanent_redirect()
        };
        Some(response.insert_header(LOCATION, location))
    }
}

impl RouteRegistry for Router {
    fn handler<H>(&mut self, method: Method, path: &str, handler: H)
    where
        H: RequestHandler,
    {
        if let Err(e) = self.try_handler(method, path, handler) {
            panic!("{e}");
        }
    }
}
