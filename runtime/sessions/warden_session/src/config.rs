#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
#[non_exhaustive]
/// Configure how sessions are managed.
pub struct SessionConfig {
    #[serde(default)]
    /// Configure the session cookie.
    pub cookie: SessionCookieConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
#[non_exhaustive]
/// Configure the cookie used to store the session ID on the client-side.
///
/// The cookie is always scoped to `Path=/` and marked as `HttpOnly`.
pub struct SessionCookieConfig {
    /// The name of the cookie used to store the session ID.
    ///
    /// By default, the name is set to `id`.
    #[serde(default = "default_session_cookie_name")]
    pub name: String,
    /// The `Max-Age` of the session cookie, in seconds.
    ///
    /// - A positive value is set as `Max-Age` on the cookie.
    /// - `0` omits `Max-Age`: the cookie is discarded when the browser is closed.
    /// - A negative value sets `Max-Age=0`: the client drops the cookie right away.
    ///
    /// By default, it is set to 86400 seconds (one day).
    #[serde(default = "default_session_cookie_max_age")]
    pub max_age: i64,
}

impl Default for SessionCookieConfig {
    fn default() -> Self {
        Self {
            name: default_session_cookie_name(),
            max_age: default_session_cookie_max_age(),
        }
    }
}

impl SessionCookieConfig {
    /// The `Max-Age` attribute to set on a freshly issued session cookie, if any.
    pub(crate) fn max_age_attribute(&self) -> Option<time::Duration> {
        match self.max_age {
            n if n > 0 => Some(time::Duration::seconds(n)),
            0 => None,
            _ => Some(time::Duration::ZERO),
        }
    }
}

fn default_session_cookie_name() -> String {
    // See https://cheatsheetseries.owasp.org/cheatsheets/Session_Management_Cheat_Sheet.html#session-id-name-fingerprinting
    "id".to_string()
}

fn default_session_cookie_max_age() -> i64 {
    86400
}
