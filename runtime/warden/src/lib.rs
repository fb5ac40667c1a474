//! # Warden
//!
//! A small toolkit to build HTTP services: it parses requests into a [`Request`],
//! dispatches them to the [`RequestHandler`] registered for their method and path
//! via a [`Router`](router::Router), and turns the returned [`Response`] into bytes
//! on the wire via the [`Server`](server::Server).
//!
//! Handlers are plain synchronous functions: they receive a shared reference to the
//! incoming request and return the outgoing response.
//!
//! ```rust
//! use warden::http::Method;
//! use warden::router::{RouteRegistry, Router};
//! use warden::{Request, Response};
//!
//! let mut router = Router::new();
//! router.handler(Method::GET, "/greet/{name}", |request: &Request| {
//!     let name = request.path_params().get("name").unwrap_or("stranger");
//!     Response::ok().set_typed_body(format!("Hello, {name}!"))
//! });
//! ```
//!
//! Sessions and authorization live in separate crates, `warden_session` and
//! `warden_auth`, built on top of the primitives exposed here.
pub use handler::RequestHandler;
pub use request::{Request, RequestHead};
pub use response::{IntoResponse, Response};

/// Re-export of the [`http`](https://docs.rs/http) crate.
pub mod http {
    pub use ::http::*;
}

#[cfg(feature = "config")]
pub mod config;
pub mod cookie;
mod handler;
pub mod request;
pub mod response;
pub mod router;
#[cfg(feature = "server")]
pub mod server;
