use bytes::Bytes;
use http::header::CONTENT_TYPE;

use super::body::TypedBody;
use crate::http::{HeaderMap, HeaderName, HeaderValue, StatusCode, Version};

/// Represents an HTTP response.
///
/// ```rust
/// use warden::response::Response;
/// use warden::http::{HeaderValue, header::SERVER};
///
/// // Create a new response with:
/// // - status code `OK`
/// // - HTTP version `HTTP/1.1`
/// // - the `Server` header set to `Warden`
/// // - the `Content-Type` header set to `text/plain; charset=utf-8`
/// // - the body set to `Hello, world!`
/// let response = Response::ok()
///     .insert_header(SERVER, HeaderValue::from_static("Warden"))
///     .set_typed_body("Hello, world!");
/// ```
///
/// The body is always fully buffered in memory.
#[derive(Debug)]
pub struct Response {
    inner: http::Response<Bytes>,
}

#[non_exhaustive]
#[derive(Debug)]
/// All the information that is transmitted as part of an HTTP [`Response`] ahead of the body.
///
/// It includes the status code, the HTTP version, and the headers.
pub struct ResponseHead {
    pub status: StatusCode,
    pub version: Version,
    pub headers: HeaderMap,
}

impl Response {
    /// Build a new [`Response`] with the given status code.
    /// The HTTP version is set to HTTP 1.1, there are no headers and
    /// the body is empty.
    ///
    /// There is a shorthand for every well-known status code, e.g.
    /// `Response::ok()` is equivalent to `Response::new(StatusCode::OK)`.
    pub fn new(status_code: StatusCode) -> Self {
        let inner = http::Response::new(Bytes::new());
        Self { inner }.set_status(status_code)
    }

    /// Change the status code of the [`Response`].
    pub fn set_status(mut self, status: StatusCode) -> Self {
        *self.inner.status_mut() = status;
        self
    }

    /// Change the HTTP version of the [`Response`].
    pub fn set_version(mut self, version: Version) -> Self {
        *self.inner.version_mut() = version;
        self
    }

    /// Append a value to a [`Response`] header.
    ///
    /// If the header is not present, it is added with the given value.
    /// If the header is present, the value is added as an additional entry
    /// for the same header name. Use it for headers that can legitimately
    /// appear more than once, such as `Set-Cookie`.
    pub fn append_header(mut self, key: HeaderName, value: HeaderValue) -> Self {
        self.inner.headers_mut().append(key, value);
        self
    }

    /// Insert a header value into the [`Response`].
    ///
    /// If the header is already present, all its values are replaced.
    pub fn insert_header(mut self, key: HeaderName, value: HeaderValue) -> Self {
        self.inner.headers_mut().insert(key, value);
        self
    }

    /// Set the [`Response`] body and its `Content-Type` header.
    ///
    /// ```rust
    /// use warden::response::{Response, body::Html};
    /// use warden::http::header::CONTENT_TYPE;
    ///
    /// let response = Response::ok().set_typed_body(Html::from("<h1>Hi!</h1>"));
    /// assert_eq!(response.headers()[CONTENT_TYPE], "text/html; charset=utf-8");
    /// ```
    pub fn set_typed_body<Body>(mut self, body: Body) -> Self
    where
        Body: TypedBody,
    {
        self.inner
            .headers_mut()
            .insert(CONTENT_TYPE, body.content_type());
        *self.inner.body_mut() = body.body();
        self
    }

    /// Set the [`Response`] body, without touching the `Content-Type` header.
    pub fn set_raw_body(mut self, body: impl Into<Bytes>) -> Self {
        *self.inner.body_mut() = body.into();
        self
    }

    /// A mutable reference to the [`Response`] headers.
    ///
    /// It's the entrypoint for components that must decorate a response they don't own,
    /// e.g. to attach a `Set-Cookie` header.
    pub fn headers_mut(&mut self) -> &mut HeaderMap {
        self.inner.headers_mut()
    }

    /// Get the [`Response`] status code.
    pub fn status(&self) -> StatusCode {
        self.inner.status()
    }

    /// Get the [`Response`] HTTP version.
    pub fn version(&self) -> Version {
        self.inner.version()
    }

    /// Get the [`Response`] headers.
    pub fn headers(&self) -> &HeaderMap {
        self.inner.headers()
    }

    /// Get a reference to the [`Response`] body.
    pub fn body(&self) -> &Bytes {
        self.inner.body()
    }

    /// Break down the [`Response`] into its two components: the [`ResponseHead`]
    /// and the body.
    pub fn into_parts(self) -> (ResponseHead, Bytes) {
        let (head, body) = self.inner.into_parts();
        (head.into(), body)
    }
}

impl From<http::Response<Bytes>> for Response {
    fn from(inner: http::Response<Bytes>) -> Self {
        Self { inner }
    }
}

impl From<Response> for http::Response<Bytes> {
    fn from(response: Response) -> Self {
        response.inner
    }
}

impl From<http::response::Parts> for ResponseHead {
    fn from(parts: http::response::Parts) -> Self {
        let http::response::Parts {
            status,
            version,
            headers,
            ..
        } = parts;
        Self {
            status,
            version,
            headers,
        }
    }
}

macro_rules! shorthand {
    ($name:ident, $status:ident) => {
        #[doc = concat!("Start building a new [`Response`] with [`StatusCode::", stringify!($status), "`] as status code.")]
        pub fn $name() -> Response {
            Response::new(StatusCode::$status)
        }
    };
}

/// Shorthand for building a new [`Response`] using a well-known status code.
impl Response {
    // 2xx
    shorthand!(ok, OK);
    shorthand!(created, CREATED);
    shorthand!(accepted, ACCEPTED);
    shorthand!(no_content, NO_CONTENT);

    // 3xx
    shorthand!(moved_permanently, MOVED_PERMANENTLY);
    shorthand!(found, FOUND);
    shorthand!(see_other, SEE_OTHER);
    shorthand!(temporary_redirect, TEMPORARY_REDIRECT);
    shorthand!(permanent_redirect, PERMANENT_REDIRECT);

    // 4xx
    shorthand!(bad_request, BAD_REQUEST);
    shorthand!(unauthorized, UNAUTHORIZED);
    shorthand!(forbidden, FORBIDDEN);
    shorthand!(not_found, NOT_FOUND);
    shorthand!(method_not_allowed, METHOD_NOT_ALLOWED);
    shorthand!(request_timeout, REQUEST_TIMEOUT);
    shorthand!(payload_too_large, PAYLOAD_TOO_LARGE);

    // 5xx
    shorthand!(internal_server_error, INTERNAL_SERVER_ERROR);
    shorthand!(service_unavailable, SERVICE_UNAVAILABLE);
}
