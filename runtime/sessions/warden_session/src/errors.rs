//! Errors that can occur when working with sessions.
use warden::Response;

use crate::SessionId;

#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
#[error("There is no session attached to the incoming request")]
/// The error returned by [`SessionStore::get`](crate::SessionStore::get).
///
/// The request didn't carry a session cookie, the cookie value wasn't a valid
/// session ID, or the ID doesn't match any session held by the store.
pub struct NoSessionError;

#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
/// The error returned by [`SessionStore::start`](crate::SessionStore::start).
pub enum StartError {
    #[error(transparent)]
    IdGeneration(#[from] IdGenerationError),
    #[error(transparent)]
    DuplicateId(#[from] DuplicateIdError),
    #[error("Failed to attach the session cookie to the response")]
    Cookie(#[from] warden::cookie::InjectResponseCookiesError),
}

impl StartError {
    /// Convert a [`StartError`] into an HTTP response.
    ///
    /// It returns a `500 Internal Server Error`: the client can't do anything about it.
    pub fn into_response(&self) -> Response {
        Response::internal_server_error()
    }
}

#[derive(Debug, thiserror::Error)]
#[error("The operating system failed to provide randomness for a new session ID")]
/// The secure random number generator failed.
pub struct IdGenerationError;

#[derive(Debug, thiserror::Error)]
#[error("A session with the same ID already exists: {id}")]
/// A freshly generated session ID collides with a session that's already in the store.
pub struct DuplicateIdError {
    /// The duplicated ID.
    pub id: SessionId,
}

#[derive(Debug, thiserror::Error)]
#[error("The string is not a valid session ID")]
/// The error returned when parsing a [`SessionId`] out of a string.
pub struct InvalidSessionIdError;
