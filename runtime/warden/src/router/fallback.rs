use crate::http::header::ALLOW;
use crate::response::Response;

use super::AllowedMethods;

/// The response for requests whose path matches a registered route
/// but whose method doesn't.
///
/// It returns a `405 Method Not Allowed` response, with the `Allow` header
/// listing the methods that would have been accepted.
/// It falls back to a `404 Not Found` response if no method is allowed.
pub fn default_fallback(allowed_methods: &AllowedMethods) -> Response {
    if let Some(header_value) = allowed_methods.allow_header_value() {
        Response::method_not_allowed().insert_header(ALLOW, header_value)
    } else {
        Response::not_found()
    }
}
