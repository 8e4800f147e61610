//! Type-safe identifier wrapper around [`Uuid`].
//!
//! Game sessions carry a strongly-typed ID so they cannot be confused
//! with any other identifier at compile time. IDs use UUID v7
//! (time-ordered), which keeps registry iteration in creation order.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a game session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct SessionId(pub Uuid);

impl SessionId {
    /// Create a new identifier using UUID v7 (time-ordered).
    pub fn new() -> Self {
        Self(Uuid::now_v7())
    }

    /// Return the inner [`Uuid`] value.
    pub const fn into_inner(self) -> Uuid {
        self.0
    }
}

impl Default for SessionId {
    fn default() -> Self {
        Self::new()
    }
}

impl core::fmt::Display for SessionId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<Uuid> for SessionId {
    fn from(id: Uuid) -> Self {
        Self(id)
    }
}

impl From<SessionId> for Uuid {
    fn from(id: SessionId) -> Self {
        id.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_are_unique() {
        assert_ne!(SessionId::new(), SessionId::new());
    }

    #[test]
    fn ids_round_trip_through_uuid() {
        let id = SessionId::new();
        let raw: Uuid = id.into();
        assert_eq!(SessionId::from(raw), id);
        assert_eq!(id.to_string(), raw.to_string());
    }
}
