use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::SessionId;

/// The server-side state attached to a session: raw bytes keyed by name.
///
/// `Session` is a handle: cloning it is cheap and every clone, as well as the
/// entry held by the [`SessionStore`](crate::SessionStore), points to the same
/// attributes.
///
/// Each method locks the attributes for the duration of the call: concurrent
/// writers to the same session are last-write-wins.
/// Use [`Session::update`] for read-modify-write sequences that must not interleave
/// with other writers.
#[derive(Clone)]
pub struct Session {
    id: SessionId,
    attributes: Arc<Mutex<HashMap<String, Vec<u8>>>>,
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("id", &self.id)
            .finish_non_exhaustive()
    }
}

impl Session {
    pub(crate) fn new(id: SessionId) -> Self {
        Self {
            id,
            attributes: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    /// The identifier of this session.
    pub fn id(&self) -> SessionId {
        self.id
    }

    /// A copy of the value stored under `key`, if any.
    pub fn get(&self, key: &str) -> Option<Vec<u8>> {
        self.attributes().get(key).cloned()
    }

    /// Store `value` under `key`, returning the value it replaced.
    pub fn insert(&self, key: impl Into<String>, value: impl Into<Vec<u8>>) -> Option<Vec<u8>> {
        self.attributes().insert(key.into(), value.into())
    }

    /// Remove the value stored under `key`, returning it.
    pub fn remove(&self, key: &str) -> Option<Vec<u8>> {
        self.attributes().remove(key)
    }

    /// `true` if there is a value stored under `key`.
    pub fn contains_key(&self, key: &str) -> bool {
        self.attributes().contains_key(key)
    }

    /// The number of attributes in this session.
    pub fn len(&self) -> usize {
        self.attributes().len()
    }

    /// `true` if this session holds no attributes.
    pub fn is_empty(&self) -> bool {
        self.attributes().is_empty()
    }

    /// Remove every attribute.
    pub fn clear(&self) {
        self.attributes().clear()
    }

    /// Run `f` with exclusive access to the attributes.
    ///
    /// No other handle can observe or modify the attributes while `f` runs.
    pub fn update<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&mut HashMap<String, Vec<u8>>) -> R,
    {
        f(&mut self.attributes())
    }

    /// `true` if both handles point to the same session.
    pub fn ptr_eq(&self, other: &Session) -> bool {
        Arc::ptr_eq(&self.attributes, &other.attributes)
    }

    fn attributes(&self) -> MutexGuard<'_, HashMap<String, Vec<u8>>> {
        // Poisoning is not propagated.
        self.attributes
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }
}
