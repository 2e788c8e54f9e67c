//! Actor identity and allocation.
//!
//! An [`ActorId`] is a lightweight `u64` identifier with no inherent data.
//! IDs are allocated by the owning [`Host`](crate::host::Host) and double as
//! the weak binding identity for HTTP completions.

/// A unique actor identifier within one host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ActorId(pub u64);

impl ActorId {
    /// The null / invalid actor sentinel.
    pub const INVALID: ActorId = ActorId(0);

    /// Create an actor id from a raw `u64` identifier.
    #[must_use]
    pub const fn from_raw(id: u64) -> Self {
        Self(id)
    }

    /// Returns the raw `u64` identifier.
    #[must_use]
    pub const fn id(self) -> u64 {
        self.0
    }

    /// Returns `true` if this is a valid (non-zero) actor id.
    #[must_use]
    pub const fn is_valid(self) -> bool {
        self.0 != 0
    }
}

impl std::fmt::Display for ActorId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Actor({})", self.0)
    }
}

/// Allocates monotonically increasing actor IDs.
#[derive(Debug)]
pub struct ActorIdAllocator {
    next_id: u64,
}

impl ActorIdAllocator {
    /// Creates a new allocator. IDs start at 1 (0 is reserved for
    /// [`ActorId::INVALID`]).
    #[must_use]
    pub fn new() -> Self {
        Self { next_id: 1 }
    }

    /// Allocates a fresh actor ID.
    pub fn allocate(&mut self) -> ActorId {
        let id = self.next_id;
        self.next_id += 1;
        ActorId(id)
    }

    /// Returns the number of actors allocated so far.
    #[must_use]
    pub fn count(&self) -> u64 {
        self.next_id - 1
    }
}

impl Default for ActorIdAllocator {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_actor_id_creation() {
        let a = ActorId::from_raw(42);
        assert_eq!(a.id(), 42);
        assert!(a.is_valid());
    }

    #[test]
    fn test_actor_id_invalid() {
        assert!(!ActorId::INVALID.is_valid());
        assert_eq!(ActorId::INVALID.id(), 0);
    }

    #[test]
    fn test_allocator_is_monotonic() {
        let mut alloc = ActorIdAllocator::new();
        let a = alloc.allocate();
        let b = alloc.allocate();
        assert!(a.is_valid());
        assert!(b.id() > a.id());
        assert_eq!(alloc.count(), 2);
    }
}
