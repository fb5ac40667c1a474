use warden::http::header::USER_AGENT;
use warden::Request;

use crate::fields::{http_request_method, http_route, url_path, url_query};

/// `RootSpan` is the top-level *logical* [`tracing::Span`] for an incoming request.
///
/// The root span should contain enough information, on its own, to determine
/// what happened to a request: it is created with data from the incoming request
/// and it is enriched with data from the outgoing response, as well as with
/// error details if processing failed.
/// Check out [Stripe's "Canonical log line" blog post](https://stripe.com/blog/canonical-log-lines)
/// for more details on the benefits of this pattern.
///
/// # Recording fields
///
/// Every field on a `Span` must be declared when the `Span` is created:
/// `tracing` ignores attempts to record a field that wasn't declared upfront.
/// [`RootSpan::for_request`] declares the response status code and the error fields
/// from [`fields`](crate::fields) as empty, so that they can be recorded later on.
///
/// [`tracing::Span`]: https://docs.rs/tracing/0.1/tracing/struct.Span.html
#[derive(Debug, Clone)]
pub struct RootSpan(tracing::Span);

impl std::ops::Deref for RootSpan {
    type Target = tracing::Span;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl RootSpan {
    /// Create a new [`RootSpan`] from a [`tracing::Span`].
    pub fn new(span: tracing::Span) -> Self {
        Self(span)
    }

    /// The conventional root span for `request`, following OpenTelemetry's
    /// HTTP semantic conventions for field naming.
    pub fn for_request(request: &Request) -> Self {
        let head = &request.head;
        let span = tracing::info_span!(
            "HTTP request",
            http.request.method = http_request_method(head),
            http.route = http_route(request.matched_route()),
            url.path = url_path(head),
            url.query = url_query(head),
            user_agent.original = head
                .headers
                .get(USER_AGENT)
                .and_then(|h| h.to_str().ok())
                .unwrap_or_default(),
            http.response.status_code = tracing::field::Empty,
            error.message = tracing::field::Empty,
            error.details = tracing::field::Empty,
            error.source_chain = tracing::field::Empty,
        );
        Self(span)
    }

    /// Get a reference to the underlying [`tracing::Span`].
    pub fn inner(&self) -> &tracing::Span {
        &self.0
    }

    /// Deconstruct the root span into its underlying [`tracing::Span`].
    pub fn into_inner(self) -> tracing::Span {
        self.0
    }
}
