//! Single-entry TTL cache slot.
//!
//! Holds one shared snapshot that expires a fixed duration after it was
//! stored. Fills are guarded by a generation counter: a fill that started
//! before an invalidation is discarded, so a stale fetch can never overwrite
//! the cleared slot.

use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use tokio::sync::RwLock;

/// A thread-safe, single-value cache with time-to-live expiration.
///
/// Time is supplied by the caller so expiry can be driven by an injected clock.
pub struct TtlSlot<V> {
    state: RwLock<SlotState<V>>,
    ttl: Duration,
}

struct SlotState<V> {
    entry: Option<SlotEntry<V>>,
    generation: u64,
}

struct SlotEntry<V> {
    value: Arc<V>,
    expires_at: DateTime<Utc>,
}

/// Result of [`TtlSlot::lookup`].
pub enum Lookup<V> {
    Hit(Arc<V>),
    /// The slot is empty or expired. Present the ticket to [`TtlSlot::fill`].
    Miss(FillTicket),
}

/// Records the slot generation observed at miss time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FillTicket {
    generation: u64,
}

impl<V> TtlSlot<V>
where
    V: Send + Sync,
{
    /// Create an empty slot with the specified TTL.
    pub fn new(ttl: Duration) -> Self {
        Self {
            state: RwLock::new(SlotState {
                entry: None,
                generation: 0,
            }),
            ttl,
        }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Return the live value, or a ticket for filling the slot.
    pub async fn lookup(&self, now: DateTime<Utc>) -> Lookup<V> {
        let guard = self.state.read().await;
        match &guard.entry {
            Some(entry) if now < entry.expires_at => Lookup::Hit(Arc::clone(&entry.value)),
            _ => Lookup::Miss(FillTicket {
                generation: guard.generation,
            }),
        }
    }

    /// Get the live value without producing a fill ticket.
    pub async fn peek(&self, now: DateTime<Utc>) -> Option<Arc<V>> {
        let guard = self.state.read().await;
        guard
            .entry
            .as_ref()
            .filter(|entry| now < entry.expires_at)
            .map(|entry| Arc::clone(&entry.value))
    }

    /// Store `value` if no invalidation happened since `ticket` was issued.
    ///
    /// `now` is the time the value was produced; the entry expires `ttl` later.
    /// Returns whether the value was stored.
    pub async fn fill(&self, ticket: FillTicket, value: Arc<V>, now: DateTime<Utc>) -> bool {
        let mut guard = self.state.write().await;
        if guard.generation != ticket.generation {
            return false;
        }
        guard.entry = Some(SlotEntry {
            value,
            expires_at: now + self.ttl,
        });
        true
    }

    /// Drop the current value and reject every fill still in flight.
    pub async fn invalidate(&self) {
        let mut guard = self.state.write().await;
        guard.entry = None;
        guard.generation = guard.generation.wrapping_add(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn t0() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, 1, 12, 0, 0).unwrap()
    }

    fn ticket_of(lookup: Lookup<i32>) -> FillTicket {
        match lookup {
            Lookup::Miss(ticket) => ticket,
            Lookup::Hit(_) => panic!("expected a miss"),
        }
    }

    #[tokio::test]
    async fn empty_slot_misses() {
        let slot: TtlSlot<i32> = TtlSlot::new(Duration::minutes(15));
        assert!(matches!(slot.lookup(t0()).await, Lookup::Miss(_)));
        assert!(slot.peek(t0()).await.is_none());
    }

    #[tokio::test]
    async fn fill_then_hit_shares_the_value() {
        let slot = TtlSlot::new(Duration::minutes(15));
        let ticket = ticket_of(slot.lookup(t0()).await);
        let value = Arc::new(42);
        assert!(slot.fill(ticket, Arc::clone(&value), t0()).await);

        match slot.lookup(t0() + Duration::minutes(1)).await {
            Lookup::Hit(hit) => assert!(Arc::ptr_eq(&hit, &value)),
            Lookup::Miss(_) => panic!("expected a hit"),
        }
    }

    #[tokio::test]
    async fn entry_expires_exactly_at_ttl() {
        let slot = TtlSlot::new(Duration::minutes(15));
        let ticket = ticket_of(slot.lookup(t0()).await);
        slot.fill(ticket, Arc::new(1), t0()).await;

        let just_before = t0() + Duration::minutes(15) - Duration::milliseconds(1);
        assert!(matches!(slot.lookup(just_before).await, Lookup::Hit(_)));
        assert!(matches!(
            slot.lookup(t0() + Duration::minutes(15)).await,
            Lookup::Miss(_)
        ));
        assert!(slot.peek(t0() + Duration::minutes(15)).await.is_none());
    }

    #[tokio::test]
    async fn invalidate_clears_entry() {
        let slot = TtlSlot::new(Duration::minutes(15));
        let ticket = ticket_of(slot.lookup(t0()).await);
        slot.fill(ticket, Arc::new(1), t0()).await;

        slot.invalidate().await;

        assert!(matches!(slot.lookup(t0()).await, Lookup::Miss(_)));
    }

    #[tokio::test]
    async fn fill_started_before_invalidate_is_discarded() {
        let slot = TtlSlot::new(Duration::minutes(15));
        let stale = ticket_of(slot.lookup(t0()).await);

        slot.invalidate().await;

        assert!(!slot.fill(stale, Arc::new(1), t0()).await);
        assert!(slot.peek(t0()).await.is_none());

        let fresh = ticket_of(slot.lookup(t0()).await);
        assert!(slot.fill(fresh, Arc::new(2), t0()).await);
        assert_eq!(slot.peek(t0()).await.as_deref(), Some(&2));
    }

    #[tokio::test]
    async fn concurrent_fills_last_write_wins() {
        let slot = TtlSlot::new(Duration::minutes(15));
        let first = ticket_of(slot.lookup(t0()).await);
        let second = ticket_of(slot.lookup(t0()).await);

        assert!(slot.fill(first, Arc::new(1), t0()).await);
        assert!(slot.fill(second, Arc::new(2), t0()).await);

        assert_eq!(slot.peek(t0()).await.as_deref(), Some(&2));
    }
}
