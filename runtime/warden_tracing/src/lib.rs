//! The integration between [`tracing`] and warden.
//!
//! - [`fields`] holds the conventional names and representations for request/response data.
//! - [`RootSpan`] is the span that encloses the processing of a request.
//! - [`Logged`] wraps a request handler to run it inside its [`RootSpan`],
//!   [`LoggedRoutes`] does it for every handler registered through it.
//! - [`init_telemetry`] installs a global subscriber, for binaries.
//!
//! [`tracing`]: https://docs.rs/tracing/0.1
pub mod fields;
mod logged;
mod root_span;
mod telemetry;

pub use logged::{Logged, LoggedRoutes};
pub use root_span::RootSpan;
pub use telemetry::init_telemetry;
