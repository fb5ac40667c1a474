use std::num::ParseIntError;
use std::str::FromStr;

use tracing_log_error::log_error;
use warden::{Request, Response};
use warden_session::errors::StartError;
use warden_session::SessionStore;

use crate::CheckAuth;

/// The session attribute holding the authorization level granted to a session,
/// as a 4-byte big-endian unsigned integer.
pub const AUTH_LEVEL_KEY: &str = "LevelAuth";

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
/// An authorization level. Higher levels grant access to more resources.
pub struct AuthLevel(u32);

impl AuthLevel {
    /// Wrap a raw level.
    pub const fn new(level: u32) -> Self {
        Self(level)
    }

    /// The raw level.
    pub const fn get(self) -> u32 {
        self.0
    }

    fn to_bytes(self) -> [u8; 4] {
        self.0.to_be_bytes()
    }

    /// Decode a level out of a session attribute.
    ///
    /// Values shorter than 4 bytes carry no level.
    /// Only the first 4 bytes of longer values are considered.
    fn from_bytes(bytes: &[u8]) -> Option<Self> {
        let bytes: [u8; 4] = bytes.get(..4)?.try_into().ok()?;
        Some(Self(u32::from_be_bytes(bytes)))
    }
}

impl From<u32> for AuthLevel {
    fn from(level: u32) -> Self {
        Self(level)
    }
}

impl std::fmt::Display for AuthLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        std::fmt::Display::fmt(&self.0, f)
    }
}

impl FromStr for AuthLevel {
    type Err = MalformedRequirementError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let malformed = |source| MalformedRequirementError {
            requirement: s.to_owned(),
            source,
        };
        // `u32::from_str` tolerates a leading `+`.
        if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit()) {
            return Err(malformed(None));
        }
        s.parse::<u32>().map(Self).map_err(|e| malformed(Some(e)))
    }
}

#[derive(Debug, thiserror::Error)]
#[error("`{requirement}` is not a valid authorization level requirement")]
/// A requirement passed to [`LevelAuth`] is not an unsigned 32-bit integer.
pub struct MalformedRequirementError {
    /// The offending requirement.
    pub requirement: String,
    #[source]
    source: Option<ParseIntError>,
}

/// Session-backed authorization levels.
///
/// [`LevelAuth::set_auth_level`] records the level granted to a client in its session,
/// starting one if needed.
/// As a [`CheckAuth`] implementation, it grants access if the level stored in the
/// request's session is greater than or equal to the required one.
///
/// Cloning is cheap: every clone shares the same [`SessionStore`].
#[derive(Debug, Clone)]
pub struct LevelAuth {
    store: SessionStore,
}

impl LevelAuth {
    /// Build a gate on top of `store`.
    pub fn new(store: SessionStore) -> Self {
        Self { store }
    }

    /// The session store backing this gate.
    pub fn store(&self) -> &SessionStore {
        &self.store
    }

    /// Grant `level` to the client that sent `request`.
    ///
    /// The level is stored in the request's session. If there is no session,
    /// a new one is started and its cookie is attached to `response`.
    /// Any previously granted level is overwritten, even if it was higher.
    pub fn set_auth_level(
        &self,
        response: &mut Response,
        request: &Request,
        level: u32,
    ) -> Result<(), StartError> {
        let session = self.store.get_or_start(response, request)?;
        session.insert(AUTH_LEVEL_KEY, AuthLevel::new(level).to_bytes().to_vec());
        tracing::debug!(session.id = %session.id(), auth.level = level, "Granted an authorization level");
        Ok(())
    }

    /// The level granted to the client that sent `request`, if any.
    ///
    /// It returns `None` if the request has no session, or if no level has been granted
    /// to its session.
    pub fn auth_level(&self, request: &Request) -> Option<AuthLevel> {
        let session = self.store.get(request).ok()?;
        let raw = session.get(AUTH_LEVEL_KEY)?;
        AuthLevel::from_bytes(&raw)
    }

    /// Revoke the level granted to the client that sent `request`.
    ///
    /// The session itself is left untouched.
    /// It returns `true` if a level was revoked.
    pub fn revoke_auth_level(&self, request: &Request) -> bool {
        match self.store.get(request) {
            Ok(session) => session.remove(AUTH_LEVEL_KEY).is_some(),
            Err(_) => false,
        }
    }

    /// `true` if the level granted to the client that sent `request` is greater
    /// than or equal to `required`.
    ///
    /// `required` must be the decimal representation of an unsigned 32-bit integer.
    /// A malformed requirement is logged and treated as a denial.
    pub fn has_auth(&self, request: &Request, required: &str) -> bool {
        let required = match required.parse::<AuthLevel>() {
            Ok(required) => required,
            Err(e) => {
                log_error!(e, level: tracing::Level::WARN, "Malformed authorization requirement, denying access");
                return false;
            }
        };
        match self.auth_level(request) {
            Some(granted) => granted >= required,
            None => false,
        }
    }
}

impl CheckAuth for LevelAuth {
    fn has_auth(&self, request: &Request, required: &str) -> bool {
        LevelAuth::has_auth(self, request, required)
    }
}
