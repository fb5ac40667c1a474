use crate::{Request, Response};

/// Something that can turn an incoming [`Request`] into a [`Response`].
///
/// It's implemented for every `Fn(&Request) -> Response` closure that can be shared
/// across threads, so that most handlers can be registered as plain functions.
///
/// Implement it by hand for types that wrap or decorate other handlers.
pub trait RequestHandler: Send + Sync + 'static {
    /// Handle an incoming request.
    fn handle(&self, request: &Request) -> Response;
}

impl<F> RequestHandler for F
where
    F: Fn(&Request) -> Response + Send + Sync + 'static,
{
    fn handle(&self, request: &Request) -> Response {
        self(request)
    }
}
