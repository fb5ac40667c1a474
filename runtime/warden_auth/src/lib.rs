//! Gate warden request handlers behind an authorization check.
//!
//! - [`CheckAuth`] answers "does this request satisfy this requirement?".
//! - [`LevelAuth`] is a [`CheckAuth`] implementation backed by sessions: it stores a
//!   numeric authorization level in the request's session and grants access to
//!   requirements that are lower than or equal to it.
//! - [`AuthHandler`] wraps a request handler: it only invokes it if the check passes,
//!   it returns a `404 Not Found` otherwise.
//! - [`AuthRouter`] adds [`auth_handler`](AuthRouter::auth_handler) on top of plain route
//!   registration; [`AuthRoutes`] implements it for any [`RouteRegistry`](warden::router::RouteRegistry).
//!
//! ```rust
//! use std::sync::Arc;
//! use warden::http::Method;
//! use warden::router::{RouteRegistry, Router};
//! use warden::{Request, Response};
//! use warden_auth::{AuthRouter, AuthRoutes, LevelAuth};
//! use warden_session::SessionStore;
//!
//! let gate = LevelAuth::new(SessionStore::default());
//! let mut router = Router::new();
//! let mut routes = AuthRoutes::new(&mut router, Arc::new(gate.clone()));
//! routes.handler(Method::GET, "/", |_: &Request| Response::ok());
//! routes.auth_handler(Method::GET, "/admin", "10", |_: &Request| Response::ok());
//!
//! // No session, no access: the route looks like it doesn't exist.
//! let request = warden::http::Request::get("/admin").body(Default::default()).unwrap();
//! assert_eq!(router.route(request.into()).status().as_u16(), 404);
//! ```
mod check;
mod handler;
mod level;
mod routes;

pub use check::CheckAuth;
pub use handler::AuthHandler;
pub use level::{AuthLevel, LevelAuth, MalformedRequirementError, AUTH_LEVEL_KEY};
pub use routes::{AuthRouter, AuthRoutes};
