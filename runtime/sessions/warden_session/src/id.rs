use std::str::FromStr;

use ring::rand::{SecureRandom, SystemRandom};

use crate::errors::{IdGenerationError, InvalidSessionIdError};

#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, PartialOrd, Ord)]
/// The identifier for a session.
///
/// # Format stability
///
/// From an API perspective, a session id is an opaque token.
/// Do **not** depend on the specifics of the underlying representation.
pub struct SessionId(uuid::Uuid);

impl SessionId {
    /// Generate a new random identifier, drawing 128 bits from the
    /// cryptographically secure random number generator provided by
    /// the operating system.
    pub fn random() -> Result<Self, IdGenerationError> {
        let mut bytes = [0u8; 16];
        SystemRandom::new()
            .fill(&mut bytes)
            .map_err(|_| IdGenerationError)?;
        Ok(Self(uuid::Builder::from_random_bytes(bytes).into_uuid()))
    }
}

impl std::fmt::Display for SessionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0.hyphenated())
    }
}

impl FromStr for SessionId {
    type Err = InvalidSessionIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        uuid::Uuid::parse_str(s)
            .map(Self)
            .map_err(|_| InvalidSessionIdError)
    }
}
