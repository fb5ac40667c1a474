use std::sync::Arc;

use warden::{Request, RequestHandler, Response};
use warden_tracing::fields::{url_path, URL_PATH};

use crate::CheckAuth;

/// A request handler that only runs if the request passes an authorization check.
///
/// If [`CheckAuth::has_auth`] returns `true`, the wrapped handler is invoked with the
/// same request and its response is returned unchanged.
/// Otherwise the wrapped handler is **not** invoked and the response is a `404 Not Found`,
/// indistinguishable from the one returned for a path that doesn't exist.
pub struct AuthHandler {
    check: Arc<dyn CheckAuth>,
    required: String,
    inner: Arc<dyn RequestHandler>,
}

impl std::fmt::Debug for AuthHandler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthHandler")
            .field("required", &self.required)
            .finish_non_exhaustive()
    }
}

impl AuthHandler {
    /// Guard `handler` behind `check`, with `required` as the requirement.
    pub fn new<H>(check: Arc<dyn CheckAuth>, required: impl Into<String>, handler: H) -> Self
    where
        H: RequestHandler,
    {
        Self {
            check,
            required: required.into(),
            inner: Arc::new(handler),
        }
    }

    /// The requirement this handler is guarded by.
    pub fn required(&self) -> &str {
        &self.required
    }
}

impl RequestHandler for AuthHandler {
    fn handle(&self, request: &Request) -> Response {
        if self.check.has_auth(request, &self.required) {
            self.inner.handle(request)
        } else {
            tracing::debug!(
                { URL_PATH } = url_path(&request.head),
                required = %self.required,
                "Authorization denied"
            );
            Response::not_found()
        }
    }
}
