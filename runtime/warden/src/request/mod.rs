//! Process and extract data from incoming HTTP requests.
use bytes::Bytes;

pub use path::PathParams;
pub use request_head::RequestHead;

pub mod path;
mod request_head;

#[derive(Debug)]
/// An incoming HTTP request, with its body fully buffered in memory.
///
/// The [`Router`](crate::router::Router) populates the [path parameters](Request::path_params)
/// and the [matched route](Request::matched_route) before invoking the handler
/// registered for the request's method and path.
pub struct Request {
    /// The request line and the headers.
    pub head: RequestHead,
    /// The request body.
    pub body: Bytes,
    path_params: PathParams,
    matched_route: Option<String>,
}

impl Request {
    /// Assemble a request from its head and its (buffered) body.
    pub fn new(head: RequestHead, body: Bytes) -> Self {
        Self {
            head,
            body,
            path_params: PathParams::default(),
            matched_route: None,
        }
    }

    /// The path parameters extracted by the router, in the order they appear
    /// in the route template.
    ///
    /// It's empty if the request hasn't been routed yet or if the matched
    /// route has no parameters.
    pub fn path_params(&self) -> &PathParams {
        &self.path_params
    }

    /// The route template that matched this request, e.g. `/users/{id}`.
    ///
    /// It's `None` if the request hasn't been routed yet.
    pub fn matched_route(&self) -> Option<&str> {
        self.matched_route.as_deref()
    }

    pub(crate) fn set_route(&mut self, template: &str, params: PathParams) {
        self.matched_route = Some(template.to_owned());
        self.path_params = params;
    }
}

impl From<http::Request<Bytes>> for Request {
    fn from(request: http::Request<Bytes>) -> Self {
        let (parts, body) = request.into_parts();
        Self::new(parts.into(), body)
    }
}

impl From<http::request::Parts> for Request {
    fn from(parts: http::request::Parts) -> Self {
        Self::new(parts.into(), Bytes::new())
    }
}
