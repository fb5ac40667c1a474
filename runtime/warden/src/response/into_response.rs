use http::StatusCode;
use serde::Serialize;

use super::body::Json;
use super::Response;

/// Convert a type into a [`Response`].
///
/// Handlers can build their response from anything implementing
/// `IntoResponse` via `.into_response()`.
pub trait IntoResponse {
    /// Convert `self` into an HTTP response.
    fn into_response(self) -> Response;
}

impl IntoResponse for Response {
    fn into_response(self) -> Response {
        self
    }
}

impl IntoResponse for StatusCode {
    fn into_response(self) -> Response {
        Response::new(self)
    }
}

impl IntoResponse for http::Response<bytes::Bytes> {
    fn into_response(self) -> Response {
        self.into()
    }
}

impl Response {
    /// A `200 OK` response with `data` serialized as a JSON body.
    ///
    /// It falls back to a `500 Internal Server Error` if `data` can't be serialized.
    pub fn json<T: Serialize>(data: T) -> Response {
        Self::json_with_status(StatusCode::OK, data)
    }

    /// A response with the given status code and `data` serialized as a JSON body.
    ///
    /// It falls back to a `500 Internal Server Error` if `data` can't be serialized.
    pub fn json_with_status<T: Serialize>(status: StatusCode, data: T) -> Response {
        match Json::new(data) {
            Ok(body) => Response::new(status).set_typed_body(body),
            Err(e) => {
                tracing_log_error::log_error!(e, "Failed to serialize a JSON response body");
                e.into_response()
            }
        }
    }
}
