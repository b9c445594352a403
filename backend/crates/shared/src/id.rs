//! Typed entity identifiers
//!
//! A UUID tagged with a zero-sized marker so a `UserId` cannot be passed
//! where a `WithdrawalId` is expected.

use std::fmt;
use std::hash::{Hash, Hasher};
use std::marker::PhantomData;

use serde::{Serialize, Serializer};
use uuid::Uuid;

/// Generic typed ID wrapper
///
/// ```
/// use kernel::id::{Id, UserId, markers};
///
/// let a: UserId = Id::new();
/// let b: Id<markers::User> = Id::from_uuid(*a.as_uuid());
/// assert_eq!(a, b);
/// ```
pub struct Id<T> {
    value: Uuid,
    _marker: PhantomData<fn() -> T>,
}

impl<T> Id<T> {
    /// Random ID (UUID v4)
    pub fn new() -> Self {
        Self::from_uuid(Uuid::new_v4())
    }

    pub const fn from_uuid(uuid: Uuid) -> Self {
        Self {
            value: uuid,
            _marker: PhantomData,
        }
    }

    /// Parse the hyphenated textual form used on the wire.
    pub fn parse_str(input: &str) -> Result<Self, uuid::Error> {
        Uuid::parse_str(input).map(Self::from_uuid)
    }

    pub fn as_uuid(&self) -> &Uuid {
        &self.value
    }

    pub fn into_uuid(self) -> Uuid {
        self.value
    }
}

// Manual impls: derives would put bounds on the marker type.

impl<T> Clone for Id<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Id<T> {}

impl<T> PartialEq for Id<T> {
    fn eq(&self, other: &Self) -> bool {
        self.value == other.value
    }
}

impl<T> Eq for Id<T> {}

impl<T> Hash for Id<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.value.hash(state);
    }
}

impl<T> Default for Id<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> fmt::Debug for Id<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Id({})", self.value)
    }
}

impl<T> fmt::Display for Id<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.value)
    }
}

impl<T> Serialize for Id<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(&self.value)
    }
}

impl<T> From<Uuid> for Id<T> {
    fn from(uuid: Uuid) -> Self {
        Self::from_uuid(uuid)
    }
}

impl<T> From<Id<T>> for Uuid {
    fn from(id: Id<T>) -> Self {
        id.value
    }
}

/// Marker types for different entity IDs
pub mod markers {
    pub struct User;
    pub struct WalletTransaction;
    pub struct Withdrawal;
    pub struct AdWatch;
}

pub type UserId = Id<markers::User>;
pub type TransactionId = Id<markers::WalletTransaction>;
pub type WithdrawalId = Id<markers::Withdrawal>;
pub type AdWatchId = Id<markers::AdWatch>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_id_from_uuid() {
        let uuid = Uuid::new_v4();
        let id: WithdrawalId = Id::from_uuid(uuid);
        assert_eq!(id.as_uuid(), &uuid);
        assert_eq!(id.into_uuid(), uuid);
    }

    #[test]
    fn test_parse_str() {
        let id: UserId = Id::new();
        let parsed = UserId::parse_str(&id.to_string()).unwrap();
        assert_eq!(id, parsed);
        assert!(UserId::parse_str("not-a-uuid").is_err());
    }

    #[test]
    fn test_ids_are_hashable_without_marker_bounds() {
        let mut seen: HashSet<TransactionId> = HashSet::new();
        let id = TransactionId::new();
        seen.insert(id);
        seen.insert(id);
        assert_eq!(seen.len(), 1);
    }

    #[test]
    fn test_serializes_as_string() {
        let uuid = Uuid::nil();
        let id: AdWatchId = Id::from_uuid(uuid);
        assert_eq!(
            serde_json::to_string(&id).unwrap(),
            "\"00000000-0000-0000-0000-000000000000\""
        );
    }
}
