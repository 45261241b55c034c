//! Keyed cancelable one-shot timers for Wiregate.
//!
//! [`KeyedScheduler`] arms a single deferred firing per key and lets any
//! task cancel it again by that same key before it goes off. It knows
//! nothing about sessions — keys are opaque — which is what lets the
//! session layer reuse the session id as the timer key.
//!
//! # Expiry as messages
//!
//! The scheduler never executes user callbacks. When a timer fires
//! uncancelled, its key is sent on an unbounded channel; the owner runs a
//! single sweeper task that drains the channel and reacts:
//!
//! ```ignore
//! let (scheduler, mut expired) = KeyedScheduler::new();
//! tokio::spawn(async move {
//!     while let Some(key) = expired.recv().await {
//!         registry.remove(key);
//!     }
//! });
//! ```
//!
//! This keeps timing concerns out of the consumer and consumer concerns
//! out of the timer.
//!
//! # Fire/cancel race
//!
//! For a given key, "the timer fires" and "someone cancels it" may happen
//! on different tasks at the same moment. Exactly one outcome is ever
//! observable: either the key is emitted, or it is suppressed. Internally
//! every armed timer carries a generation number, and both the firing task
//! and `cancel` contend for a single check-and-remove of that generation
//! under the table lock — whichever side wins the removal decides.

use std::collections::HashMap;
use std::hash::Hash;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, Weak};
use std::time::Duration;

use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tokio::task::AbortHandle;
use tracing::trace;

// ---------------------------------------------------------------------------
// Timer table
// ---------------------------------------------------------------------------

/// One armed timer: its generation plus a handle to the sleeping task.
///
/// The generation is the source of truth for the fire/cancel race; the
/// abort handle only exists to free the sleeping task promptly once the
/// timer can no longer fire.
struct TimerEntry {
    generation: u64,
    abort: AbortHandle,
}

struct Inner<K> {
    /// Live timers, keyed by the caller's key. Guarded by a plain sync
    /// mutex — critical sections are a handful of map operations and the
    /// guard is never held across an await.
    armed: Mutex<HashMap<K, TimerEntry>>,

    /// Monotonic generation source shared by all keys.
    next_generation: AtomicU64,

    /// Where fired keys are delivered.
    expired_tx: UnboundedSender<K>,
}

impl<K> Inner<K>
where
    K: Clone + Eq + Hash + Send + 'static,
{
    fn table(&self) -> MutexGuard<'_, HashMap<K, TimerEntry>> {
        // A panic while holding this lock leaves no usable scheduler state
        // to recover, so poisoning is terminal.
        self.armed.lock().expect("timer table lock poisoned")
    }

    /// Called by a timer task after its sleep elapses. Emits the key iff
    /// this exact arming is still live.
    fn fire(&self, key: K, generation: u64) {
        {
            let mut armed = self.table();
            match armed.get(&key) {
                Some(entry) if entry.generation == generation => {
                    armed.remove(&key);
                }
                // Cancelled, or superseded by a newer arming: suppress.
                _ => {
                    trace!("stale timer firing suppressed");
                    return;
                }
            }
        }
        // The receiver may already be gone during shutdown; a fired key
        // with nobody listening is simply dropped.
        let _ = self.expired_tx.send(key);
    }
}

impl<K> Drop for Inner<K> {
    fn drop(&mut self) {
        // Last handle gone: stop every sleeping task instead of letting
        // them run out their delays against a dead channel.
        if let Ok(armed) = self.armed.get_mut() {
            for entry in armed.values() {
                entry.abort.abort();
            }
        }
    }
}

// ---------------------------------------------------------------------------
// KeyedScheduler
// ---------------------------------------------------------------------------

/// One-shot timers keyed by an identifier, cancelable by that identifier.
///
/// Cloning is cheap and every clone drives the same timer table, so the
/// scheduler can be handed to whichever tasks need to arm or cancel.
/// When the last clone drops, all outstanding timers are aborted.
pub struct KeyedScheduler<K> {
    inner: Arc<Inner<K>>,
}

impl<K> Clone for KeyedScheduler<K> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<K> KeyedScheduler<K>
where
    K: Clone + Eq + Hash + Send + 'static,
{
    /// Creates a scheduler plus the receiving end of its expiry channel.
    ///
    /// The caller owns the receiver and decides what an expired key means.
    pub fn new() -> (Self, UnboundedReceiver<K>) {
        let (expired_tx, expired_rx) = mpsc::unbounded_channel();
        let scheduler = Self {
            inner: Arc::new(Inner {
                armed: Mutex::new(HashMap::new()),
                next_generation: AtomicU64::new(0),
                expired_tx,
            }),
        };
        (scheduler, expired_rx)
    }

    /// Arms a one-shot timer: after `delay`, `key` is emitted on the
    /// expiry channel unless cancelled first.
    ///
    /// Scheduling a key that already has a live timer **supersedes** the
    /// earlier one — only the latest arming can fire. The call never
    /// blocks and never yields; from any other task's perspective the
    /// timer is armed the moment this returns. Must be called from within
    /// a Tokio runtime (the timer task is spawned on it).
    pub fn schedule(&self, key: K, delay: Duration) {
        let generation = self
            .inner
            .next_generation
            .fetch_add(1, Ordering::Relaxed);

        // Hold the table lock across the spawn so a zero-delay timer
        // cannot wake up, look for its entry, and miss it.
        let mut armed = self.inner.table();

        let weak = Arc::downgrade(&self.inner);
        let task_key = key.clone();
        let handle = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            // If the scheduler is gone, there is nothing left to fire into.
            if let Some(inner) = Weak::upgrade(&weak) {
                inner.fire(task_key, generation);
            }
        });

        if let Some(old) = armed.insert(
            key,
            TimerEntry {
                generation,
                abort: handle.abort_handle(),
            },
        ) {
            // Superseded: the old task would suppress itself on the
            // generation check anyway, but abort it now to free the timer.
            old.abort.abort();
        }
    }

    /// Cancels the pending timer for `key`, if one is live.
    ///
    /// Always safe: cancelling a key with no timer, or whose timer already
    /// fired, is a no-op. After a cancel that found a live timer returns,
    /// that timer's key will not be emitted.
    pub fn cancel(&self, key: &K) {
        if let Some(entry) = self.inner.table().remove(key) {
            entry.abort.abort();
            trace!("pending timer cancelled");
        }
    }

    /// Whether a timer is currently armed for `key`.
    pub fn is_armed(&self, key: &K) -> bool {
        self.inner.table().contains_key(key)
    }

    /// Number of currently armed timers.
    pub fn len(&self) -> usize {
        self.inner.table().len()
    }

    /// Whether no timers are armed.
    pub fn is_empty(&self) -> bool {
        self.inner.table().is_empty()
    }
}

// =========================================================================
// Tests
// =========================================================================

#[cfg(test)]
mod tests {
    //! Unit tests for the timer table bookkeeping. Timing behavior proper
    //! (firing, cancellation under paused time) lives in the integration
    //! suite in `tests/keyed_scheduler.rs`.

    use super::*;

    #[tokio::test]
    async fn test_new_scheduler_is_empty() {
        let (scheduler, _rx) = KeyedScheduler::<u32>::new();
        assert!(scheduler.is_empty());
        assert_eq!(scheduler.len(), 0);
    }

    #[tokio::test]
    async fn test_schedule_arms_key() {
        let (scheduler, _rx) = KeyedScheduler::new();
        scheduler.schedule(7u32, Duration::from_secs(60));
        assert!(scheduler.is_armed(&7));
        assert_eq!(scheduler.len(), 1);
    }

    #[tokio::test]
    async fn test_cancel_disarms_key() {
        let (scheduler, _rx) = KeyedScheduler::new();
        scheduler.schedule(7u32, Duration::from_secs(60));
        scheduler.cancel(&7);
        assert!(!scheduler.is_armed(&7));
    }

    #[tokio::test]
    async fn test_cancel_absent_key_is_noop() {
        let (scheduler, _rx) = KeyedScheduler::<u32>::new();
        scheduler.cancel(&99);
        assert!(scheduler.is_empty());
    }

    #[tokio::test]
    async fn test_cancel_twice_is_noop() {
        let (scheduler, _rx) = KeyedScheduler::new();
        scheduler.schedule(7u32, Duration::from_secs(60));
        scheduler.cancel(&7);
        scheduler.cancel(&7);
        assert!(!scheduler.is_armed(&7));
    }

    #[tokio::test]
    async fn test_reschedule_keeps_single_entry() {
        let (scheduler, _rx) = KeyedScheduler::new();
        scheduler.schedule(7u32, Duration::from_secs(60));
        scheduler.schedule(7u32, Duration::from_secs(120));
        assert_eq!(scheduler.len(), 1);
    }

    #[tokio::test]
    async fn test_independent_keys_tracked_separately() {
        let (scheduler, _rx) = KeyedScheduler::new();
        scheduler.schedule(1u32, Duration::from_secs(60));
        scheduler.schedule(2u32, Duration::from_secs(60));
        scheduler.cancel(&1);
        assert!(!scheduler.is_armed(&1));
        assert!(scheduler.is_armed(&2));
    }
}
