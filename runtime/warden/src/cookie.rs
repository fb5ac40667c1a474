//! Everything you need to work with HTTP cookies.
//!
//! Most types are re-exports of the [`biscotti`](https://docs.rs/biscotti/0.3) crate.
use http::header::{COOKIE, SET_COOKIE};
use http::HeaderValue;
use tracing_log_error::log_error;

use crate::request::RequestHead;
use crate::response::Response;

pub use biscotti::{
    Processor, ProcessorConfig, RemovalCookie, RequestCookie, RequestCookies, ResponseCookie,
    ResponseCookies, SameSite,
};

/// Parse cookies out of the `Cookie` header(s) of the incoming request.
///
/// Invalid cookies are skipped, with a warning: a pair without `=`, a pair with an
/// empty name or a header that isn't printable ASCII doesn't hide the valid cookies
/// sent alongside it.
pub fn extract_request_cookies<'request>(
    request_head: &'request RequestHead,
    processor: &Processor,
) -> RequestCookies<'request> {
    let mut cookies = RequestCookies::new();
    for header in request_head.headers.get_all(COOKIE).into_iter() {
        let header = match header.to_str() {
            Ok(header) => header,
            Err(e) => {
                log_error!(e, level: tracing::Level::WARN, "A `Cookie` header is not printable ASCII, ignoring it");
                continue;
            }
        };
        for pair in header.split(';') {
            if pair.trim().is_empty() {
                continue;
            }
            if let Err(e) = cookies.extend_from_header(pair, processor) {
                log_error!(e, level: tracing::Level::WARN, "A request cookie is invalid, ignoring it");
            }
        }
    }
    cookies
}

/// Attach cookies to the outgoing response, one `Set-Cookie` header per cookie.
///
/// It consumes [`ResponseCookies`] by value since no response cookies should be
/// added after they have been written to the response.
pub fn inject_response_cookies(
    response: &mut Response,
    response_cookies: ResponseCookies,
    processor: &Processor,
) -> Result<(), InjectResponseCookiesError> {
    for value in response_cookies.header_values(processor) {
        let value = HeaderValue::from_str(&value).map_err(|_| InjectResponseCookiesError {
            invalid_header_value: value,
        })?;
        response.headers_mut().append(SET_COOKIE, value);
    }
    Ok(())
}

#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
#[error("Some characters in the `Set-Cookie` header value are not printable ASCII characters.")]
/// The error type returned by [`inject_response_cookies`].
pub struct InjectResponseCookiesError {
    /// The invalid header value.
    pub invalid_header_value: String,
}

impl InjectResponseCookiesError {
    /// Convert an [`InjectResponseCookiesError`] into an HTTP response.
    ///
    /// It returns a `500 Internal Server Error` to the caller,
    /// since failure is likely due to misconfiguration or
    /// mismanagement on the server side.
    pub fn into_response(&self) -> Response {
        Response::internal_server_error()
    }
}
