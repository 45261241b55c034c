//! The authorized-session registry.
//!
//! A session id lives in this set from the moment the handshake mints it
//! until either the client's real connection ends or the expiry timer
//! reclaims it. Membership is the single source of truth for "may this
//! session transition to connected or exchange messages".

use std::collections::HashSet;
use std::sync::{Mutex, MutexGuard};

use wiregate_protocol::SessionId;

/// Concurrent set of currently-authorized session ids.
///
/// All methods take `&self` and are safe under arbitrary concurrent calls
/// from any task — the handshake gate inserts, the disconnect reactor and
/// the expiry sweeper remove, transport code asks `contains`, all without
/// caller-side locking.
///
/// Ids are single-use by construction: the gate mints a fresh UUID per
/// handshake, so a removed id is never re-inserted.
#[derive(Debug, Default)]
pub struct SessionRegistry {
    // Plain sync mutex around a HashSet. Critical sections are single
    // set operations and the guard never crosses an await, so there is
    // no need for an async lock or a sharded map at this scale.
    ids: Mutex<HashSet<SessionId>>,
}

impl SessionRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    fn set(&self) -> MutexGuard<'_, HashSet<SessionId>> {
        self.ids.lock().expect("session registry lock poisoned")
    }

    /// Marks `id` as authorized. Returns `false` if it was already
    /// present (which the gate never does — ids are minted fresh).
    pub fn add(&self, id: SessionId) -> bool {
        let added = self.set().insert(id);
        tracing::trace!(session_id = %id, added, "registry add");
        added
    }

    /// Removes `id` from the authorized set.
    ///
    /// Removing an id that isn't present is a no-op, never an error —
    /// expiry and explicit disconnect may race, and whichever runs second
    /// simply finds nothing to do. Returns whether the id was present.
    pub fn remove(&self, id: &SessionId) -> bool {
        let removed = self.set().remove(id);
        tracing::trace!(session_id = %id, removed, "registry remove");
        removed
    }

    /// Whether `id` is currently authorized.
    pub fn contains(&self, id: &SessionId) -> bool {
        self.set().contains(id)
    }

    /// Number of currently authorized sessions.
    pub fn len(&self) -> usize {
        self.set().len()
    }

    /// Whether no sessions are authorized.
    pub fn is_empty(&self) -> bool {
        self.set().is_empty()
    }
}

// =========================================================================
// Tests
// =========================================================================

#[cfg(test)]
mod tests {
    //! Unit tests for `SessionRegistry`, following the naming convention
    //!   `test_{function}_{scenario}_{expected}`.

    use std::sync::Arc;

    use super::*;

    #[test]
    fn test_new_registry_is_empty() {
        let registry = SessionRegistry::new();
        assert!(registry.is_empty());
        assert_eq!(registry.len(), 0);
    }

    #[test]
    fn test_add_makes_id_a_member() {
        let registry = SessionRegistry::new();
        let id = SessionId::mint();

        assert!(registry.add(id));

        assert!(registry.contains(&id));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_add_duplicate_returns_false() {
        let registry = SessionRegistry::new();
        let id = SessionId::mint();
        registry.add(id);

        assert!(!registry.add(id));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_remove_present_id_returns_true() {
        let registry = SessionRegistry::new();
        let id = SessionId::mint();
        registry.add(id);

        assert!(registry.remove(&id));

        assert!(!registry.contains(&id));
        assert!(registry.is_empty());
    }

    #[test]
    fn test_remove_absent_id_is_noop() {
        let registry = SessionRegistry::new();

        // Never an error — expiry and disconnect may both try.
        assert!(!registry.remove(&SessionId::mint()));
        assert!(registry.is_empty());
    }

    #[test]
    fn test_remove_twice_second_is_noop() {
        let registry = SessionRegistry::new();
        let id = SessionId::mint();
        registry.add(id);

        assert!(registry.remove(&id));
        assert!(!registry.remove(&id));
    }

    #[test]
    fn test_contains_unknown_id_returns_false() {
        let registry = SessionRegistry::new();
        assert!(!registry.contains(&SessionId::mint()));
    }

    #[test]
    fn test_independent_ids_tracked_separately() {
        let registry = SessionRegistry::new();
        let a = SessionId::mint();
        let b = SessionId::mint();
        registry.add(a);
        registry.add(b);

        registry.remove(&a);

        assert!(!registry.contains(&a));
        assert!(registry.contains(&b));
    }

    #[test]
    fn test_concurrent_adds_and_removes_are_safe() {
        // Hammer the registry from several threads at once. The assertion
        // at the end only checks consistency; the real point is that this
        // compiles with `&self` methods and doesn't deadlock or lose
        // updates under contention.
        let registry = Arc::new(SessionRegistry::new());
        let ids: Vec<SessionId> =
            (0..64).map(|_| SessionId::mint()).collect();

        let mut handles = Vec::new();
        for chunk in ids.chunks(16) {
            let registry = Arc::clone(&registry);
            let chunk: Vec<SessionId> = chunk.to_vec();
            handles.push(std::thread::spawn(move || {
                for id in &chunk {
                    registry.add(*id);
                }
                for id in &chunk {
                    registry.remove(id);
                }
            }));
        }
        for handle in handles {
            handle.join().expect("thread should not panic");
        }

        assert!(registry.is_empty());
    }
}
