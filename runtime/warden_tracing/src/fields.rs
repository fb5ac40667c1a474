//! Field names and value representations for the request data warden logs.
//!
//! Names follow [OpenTelemetry's HTTP semantic conventions](https://opentelemetry.io/docs/specs/semconv/attributes-registry/http/).
//! [`RootSpan::for_request`](crate::RootSpan::for_request) declares all of them;
//! use the constants to record a field on a span after the fact, or to attach
//! it to a standalone event.
use tracing::Value;
use warden::http::Method;
use warden::{RequestHead, Response};

// Re-export error-related logging fields and the functions to set them.
pub use tracing_log_error::fields::*;

/// `http.response.status_code`, see [`http_response_status_code`].
pub const HTTP_RESPONSE_STATUS_CODE: &str = "http.response.status_code";

/// `url.path`, see [`url_path`].
pub const URL_PATH: &str = "url.path";

/// The request method, or `_OTHER` for extension methods.
///
/// Extension methods are arbitrary tokens chosen by the client: they're collapsed
/// to keep the field's cardinality bounded.
pub fn http_request_method(request_head: &RequestHead) -> impl Value + '_ {
    let method = &request_head.method;
    let is_standard = [
        Method::GET,
        Method::HEAD,
        Method::POST,
        Method::PUT,
        Method::DELETE,
        Method::CONNECT,
        Method::OPTIONS,
        Method::TRACE,
        Method::PATCH,
    ]
    .contains(method);
    if is_standard {
        method.as_str()
    } else {
        "_OTHER"
    }
}

/// The numeric status code of `response`.
pub fn http_response_status_code(response: &Response) -> impl Value {
    response.status().as_u16()
}

/// The route template the request was dispatched to, empty if it wasn't routed.
pub fn http_route(matched_route: Option<&str>) -> impl Value + '_ {
    matched_route.unwrap_or_default()
}

/// The path of the request target, still percent-encoded.
pub fn url_path(request_head: &RequestHead) -> impl Value + '_ {
    request_head.target.path()
}

/// The query string of the request target, empty if there is none.
pub fn url_query(request_head: &RequestHead) -> impl Value + '_ {
    request_head.target.query().unwrap_or_default()
}
