//! Typed response bodies: a payload paired with its `Content-Type`.
use std::borrow::Cow;

use bytes::Bytes;
use mime::{APPLICATION_JSON, APPLICATION_OCTET_STREAM, TEXT_HTML_UTF_8, TEXT_PLAIN_UTF_8};

use crate::http::HeaderValue;

/// A trait that ties together a [`Response`] body with
/// its expected `Content-Type` header.
///
/// Check out [`Response::set_typed_body`] for more details.
///
/// [`Response`]: super::Response
/// [`Response::set_typed_body`]: super::Response::set_typed_body
pub trait TypedBody {
    /// The value of the `Content-Type` header for this body.
    fn content_type(&self) -> HeaderValue;

    /// The buffered body.
    fn body(self) -> Bytes;
}

impl TypedBody for String {
    fn content_type(&self) -> HeaderValue {
        HeaderValue::from_static(TEXT_PLAIN_UTF_8.as_ref())
    }

    fn body(self) -> Bytes {
        self.into()
    }
}

impl TypedBody for &'static str {
    fn content_type(&self) -> HeaderValue {
        HeaderValue::from_static(TEXT_PLAIN_UTF_8.as_ref())
    }

    fn body(self) -> Bytes {
        Bytes::from_static(self.as_bytes())
    }
}

impl TypedBody for Cow<'static, str> {
    fn content_type(&self) -> HeaderValue {
        HeaderValue::from_static(TEXT_PLAIN_UTF_8.as_ref())
    }

    fn body(self) -> Bytes {
        match self {
            Cow::Borrowed(s) => s.body(),
            Cow::Owned(s) => s.body(),
        }
    }
}

impl TypedBody for Bytes {
    fn content_type(&self) -> HeaderValue {
        HeaderValue::from_static(APPLICATION_OCTET_STREAM.as_ref())
    }

    fn body(self) -> Bytes {
        self
    }
}

impl TypedBody for Vec<u8> {
    fn content_type(&self) -> HeaderValue {
        HeaderValue::from_static(APPLICATION_OCTET_STREAM.as_ref())
    }

    fn body(self) -> Bytes {
        self.into()
    }
}

/// An HTML document, served with `text/html; charset=utf-8`.
pub struct Html(Bytes);

impl From<String> for Html {
    fn from(s: String) -> Self {
        Self(s.into())
    }
}

impl From<&'static str> for Html {
    fn from(s: &'static str) -> Self {
        Self(Bytes::from_static(s.as_bytes()))
    }
}

impl TypedBody for Html {
    fn content_type(&self) -> HeaderValue {
        HeaderValue::from_static(TEXT_HTML_UTF_8.as_ref())
    }

    fn body(self) -> Bytes {
        self.0
    }
}

/// A JSON payload, served with `application/json`.
///
/// ```rust
/// use warden::response::{Response, body::Json};
///
/// #[derive(serde::Serialize)]
/// struct Level { level: u32 }
///
/// let body = Json::new(Level { level: 3 }).unwrap();
/// let response = Response::ok().set_typed_body(body);
/// assert_eq!(response.body().as_ref(), br#"{"level":3}"#);
/// ```
pub struct Json(Bytes);

impl Json {
    /// Serialize `value` as JSON.
    pub fn new<T>(value: T) -> Result<Self, JsonSerializationError>
    where
        T: serde::Serialize,
    {
        let bytes = serde_json::to_vec(&value).map_err(JsonSerializationError)?;
        Ok(Self(bytes.into()))
    }
}

#[derive(Debug, thiserror::Error)]
#[error(transparent)]
/// The error returned by [`Json::new`] when the value can't be serialized.
pub struct JsonSerializationError(serde_json::Error);

impl JsonSerializationError {
    /// Convert a [`JsonSerializationError`] into an HTTP response.
    ///
    /// It returns a `500 Internal Server Error`: failure is a server-side bug.
    pub fn into_response(&self) -> super::Response {
        super::Response::internal_server_error()
    }
}

impl TypedBody for Json {
    fn content_type(&self) -> HeaderValue {
        HeaderValue::from_static(APPLICATION_JSON.as_ref())
    }

    fn body(self) -> Bytes {
        self.0
    }
}
