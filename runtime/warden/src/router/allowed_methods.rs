use http::HeaderValue;
use smallvec::SmallVec;

use crate::http::Method;

#[derive(Debug, Clone)]
/// The set of HTTP methods that are allowed for a given route path.
///
/// # Use cases
///
/// [`AllowedMethods`] comes into play when a request matches a registered path
/// but none of the handlers registered for it: the `Allow` header must be set
/// on the `405 Method Not Allowed` response, as well as on the automatic
/// response to `OPTIONS` requests.
pub struct AllowedMethods {
    // We use 5 as our inlining limit because that's going to fit
    // all methods in the most common case
    // (i.e. `GET`/`POST`/`PUT`/`DELETE`/`PATCH` on a certain route path).
    methods: SmallVec<[Method; 5]>,
}

impl AllowedMethods {
    /// Create a new instance of [`AllowedMethods`] from an iterator
    /// that yields [`Method`]s.
    ///
    /// Duplicates are ignored.
    pub fn from_methods(iter: impl IntoIterator<Item = Method>) -> Self {
        let mut methods = SmallVec::new();
        for method in iter {
            if !methods.contains(&method) {
                methods.push(method);
            }
        }
        Self { methods }
    }

    /// The same set of methods, with `OPTIONS` added if it wasn't there already.
    pub fn with_options(mut self) -> Self {
        if !self.methods.contains(&Method::OPTIONS) {
            self.methods.push(Method::OPTIONS);
        }
        self
    }

    /// Iterate over the allowed methods, in registration order.
    pub fn methods(&self) -> impl Iterator<Item = &Method> {
        self.methods.iter()
    }

    /// `true` if `method` is in the set.
    pub fn contains(&self, method: &Method) -> bool {
        self.methods.contains(method)
    }

    /// The value that should be set for the `Allow` header
    /// in a `405 Method Not Allowed` response for this route path.
    ///
    /// It returns `None` if the set is empty.
    /// It returns the comma-separated list of accepted HTTP methods otherwise.
    pub fn allow_header_value(&self) -> Option<HeaderValue> {
        if self.methods.is_empty() {
            None
        } else {
            let allow_header = self
                .methods
                .iter()
                .map(|method| method.as_str())
                .collect::<Vec<_>>()
                .join(", ");
            Some(
                HeaderValue::from_str(&allow_header)
                    .expect("Failed to assemble `Allow` header value"),
            )
        }
    }
}
