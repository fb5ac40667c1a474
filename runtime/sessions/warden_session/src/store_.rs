use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tracing_log_error::log_error;
use warden::cookie::{
    extract_request_cookies, inject_response_cookies, Processor, ProcessorConfig, ResponseCookie,
    ResponseCookies,
};
use warden::{Request, Response};

use crate::errors::{DuplicateIdError, NoSessionError, StartError};
use crate::{Session, SessionConfig, SessionId};

/// Where server-side session state lives.
///
/// The store maps session IDs to [`Session`]s, in process memory.
/// It issues, reads and invalidates the session cookie.
///
/// `SessionStore` is a handle: cloning it is cheap and every clone points
/// to the same underlying sessions. Share it across threads freely.
///
/// # Lifecycle
///
/// - [`start`](Self::start) creates a new session and attaches its cookie to the response.
/// - [`get`](Self::get) looks up the session for the cookie carried by a request.
/// - [`end`](Self::end) tells the client to drop the session cookie.
///
/// There is no automatic expiry: a session stays in memory until the store is dropped,
/// even after its cookie has expired on the client-side.
#[derive(Clone)]
pub struct SessionStore {
    sessions: Arc<Mutex<HashMap<SessionId, Session>>>,
    config: Arc<SessionConfig>,
    processor: Arc<Processor>,
}

impl std::fmt::Debug for SessionStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionStore")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::new(SessionConfig::default())
    }
}

impl SessionStore {
    /// Creates a new (empty) session store.
    pub fn new(config: SessionConfig) -> Self {
        Self {
            sessions: Arc::new(Mutex::new(HashMap::new())),
            config: Arc::new(config),
            processor: Arc::new(ProcessorConfig::default().into()),
        }
    }

    /// The configuration this store was built with.
    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    /// Start a new session and attach its cookie to `response`.
    ///
    /// The new session has a freshly generated ID and no attributes.
    /// The cookie is appended to the response: previous `Set-Cookie` headers
    /// are left untouched.
    pub fn start(&self, response: &mut Response) -> Result<Session, StartError> {
        let id = SessionId::random()?;
        let session = Session::new(id);
        match self.sessions().entry(id) {
            Entry::Occupied(_) => return Err(DuplicateIdError { id }.into()),
            Entry::Vacant(entry) => {
                entry.insert(session.clone());
            }
        }

        let cookie = ResponseCookie::new(self.config.cookie.name.clone(), id.to_string())
            .set_path("/")
            .set_http_only(true);
        let cookie = match self.config.cookie.max_age_attribute() {
            Some(max_age) => cookie.set_max_age(max_age),
            None => cookie,
        };
        if let Err(e) = self.set_cookie(response, cookie) {
            self.sessions().remove(&id);
            return Err(e.into());
        }
        tracing::debug!(session.id = %id, "Started a new session");
        Ok(session)
    }

    /// Retrieve the session attached to the incoming request.
    ///
    /// It fails if the request doesn't carry the session cookie, if the cookie is empty
    /// or malformed, or if there is no session with that ID in the store.
    /// Other invalid cookies in the request are ignored.
    pub fn get(&self, request: &Request) -> Result<Session, NoSessionError> {
        let cookies = extract_request_cookies(&request.head, &self.processor);
        let Some(cookie) = cookies.get(&self.config.cookie.name) else {
            return Err(NoSessionError);
        };
        let Ok(id) = cookie.value().parse::<SessionId>() else {
            tracing::debug!("The session cookie doesn't contain a valid session ID");
            return Err(NoSessionError);
        };
        self.sessions().get(&id).cloned().ok_or(NoSessionError)
    }

    /// Retrieve the session attached to the incoming request, or start a new one
    /// if there is none.
    ///
    /// It never fails for an existing session.
    /// It behaves like [`start`](Self::start) otherwise.
    pub fn get_or_start(
        &self,
        response: &mut Response,
        request: &Request,
    ) -> Result<Session, StartError> {
        match self.get(request) {
            Ok(session) => Ok(session),
            Err(_) => self.start(response),
        }
    }

    /// Tell the client to discard the session cookie.
    ///
    /// It appends a `Set-Cookie` header with an empty value and `Max-Age=0`,
    /// whether or not the request carried a session.
    /// The server-side session is left untouched.
    pub fn end(&self, response: &mut Response) {
        let cookie = ResponseCookie::new(self.config.cookie.name.clone(), "")
            .set_path("/")
            .set_http_only(true)
            .set_max_age(time::Duration::ZERO);
        match self.set_cookie(response, cookie) {
            Ok(()) => tracing::debug!("Ended the session"),
            Err(e) => log_error!(e, "Failed to attach the session removal cookie to the response"),
        }
    }

    /// The number of sessions held by the store.
    pub fn len(&self) -> usize {
        self.sessions().len()
    }

    /// `true` if the store holds no sessions.
    pub fn is_empty(&self) -> bool {
        self.sessions().is_empty()
    }

    fn set_cookie(
        &self,
        response: &mut Response,
        cookie: ResponseCookie<'static>,
    ) -> Result<(), warden::cookie::InjectResponseCookiesError> {
        let mut cookies = ResponseCookies::new();
        cookies.insert(cookie);
        inject_response_cookies(response, cookies, &self.processor)
    }

    fn sessions(&self) -> MutexGuard<'_, HashMap<SessionId, Session>> {
        // Poisoning is not propagated.
        self.sessions.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
