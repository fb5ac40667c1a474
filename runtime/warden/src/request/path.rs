//! Path parameters extracted by the router.
use std::borrow::Cow;

use percent_encoding::percent_decode_str;
use smallvec::SmallVec;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
/// The path parameters captured when matching a request against a route template.
///
/// Given the template `/users/{id}/posts/{post_id}` and the path `/users/7/posts/42`,
/// the parameters are `[("id", "7"), ("post_id", "42")]`, in that order.
///
/// Values are percent-decoded. If a value is not valid UTF-8 once decoded,
/// the raw (encoded) value is kept instead.
pub struct PathParams {
    // Most routes have at most a handful of parameters.
    params: SmallVec<[(String, String); 4]>,
}

impl PathParams {
    pub(crate) fn from_matchit(params: &matchit::Params<'_, '_>) -> Self {
        let params = params
            .iter()
            .map(|(key, value)| (key.to_owned(), decode(value).into_owned()))
            .collect();
        Self { params }
    }

    /// Retrieve the value of the parameter called `name`, if it was captured.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.params
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    /// All captured values, in template order.
    pub fn values(&self) -> Vec<&str> {
        self.params.iter().map(|(_, value)| value.as_str()).collect()
    }

    /// Iterate over `(name, value)` pairs, in template order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.params
            .iter()
            .map(|(key, value)| (key.as_str(), value.as_str()))
    }

    /// The number of captured parameters.
    pub fn len(&self) -> usize {
        self.params.len()
    }

    /// `true` if no parameter was captured.
    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }
}

fn decode(raw: &str) -> Cow<'_, str> {
    percent_decode_str(raw)
        .decode_utf8()
        .unwrap_or(Cow::Borrowed(raw))
}
