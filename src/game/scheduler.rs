//! Cooperative virtual-time event queue
//!
//! The host owns real time; the game core only sees milliseconds pumped in
//! through `Session::advance`. Deferred work is queued here as plain data
//! and dispatched by the session, which keeps every state mutation on one
//! logical timeline. `cancel_all` bumps an epoch counter so an entry from a
//! cancelled epoch can never be observed, even if it was already drained
//! into a dispatch batch.

use std::cmp::Ordering;
use std::collections::BinaryHeap;

/// A deferred game event. Data, not a closure: the session decides what
/// each one means when it comes due.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerEvent {
    /// Spawn the next numbered spot
    SpawnSpot,
    /// One-second countdown tick (self-re-arming)
    CountdownTick,
    /// A spot's animation ran out; seq guards against display-id reuse
    SpotExpiry { id: u32, seq: u64 },
}

#[derive(Debug, Clone)]
struct Entry {
    due: u64,
    /// Tie-breaker preserving insertion order for equal due times
    order: u64,
    epoch: u64,
    event: TimerEvent,
}

impl PartialEq for Entry {
    fn eq(&self, other: &Self) -> bool {
        self.due == other.due && self.order == other.order
    }
}

impl Eq for Entry {}

impl Ord for Entry {
    fn cmp(&self, other: &Self) -> Ordering {
        // BinaryHeap is a max-heap; invert so the earliest entry surfaces first
        other
            .due
            .cmp(&self.due)
            .then_with(|| other.order.cmp(&self.order))
    }
}

impl PartialOrd for Entry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Single-timeline scheduler for spawn bursts, countdown ticks and
/// per-spot expiries.
#[derive(Debug, Default)]
pub struct Scheduler {
    queue: BinaryHeap<Entry>,
    now: u64,
    next_order: u64,
    epoch: u64,
}

impl Scheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current virtual time in milliseconds
    pub fn now(&self) -> u64 {
        self.now
    }

    /// Number of pending events
    pub fn pending(&self) -> usize {
        self.queue
            .iter()
            .filter(|e| e.epoch == self.epoch)
            .count()
    }

    /// Queue `event` to fire `delay_ms` from now
    pub fn schedule_in(&mut self, delay_ms: u64, event: TimerEvent) {
        let order = self.next_order;
        self.next_order += 1;
        self.queue.push(Entry {
            due: self.now + delay_ms,
            order,
            epoch: self.epoch,
            event,
        });
    }

    /// Queue exactly `times` copies of `event` at `interval_ms * k` from
    /// now, k = 1..=times. A fixed burst, not an infinite stream.
    pub fn schedule_burst(&mut self, interval_ms: u64, times: u32, event: TimerEvent) {
        for k in 1..=u64::from(times) {
            self.schedule_in(interval_ms * k, event);
        }
    }

    /// Drop every pending event. Safe to call repeatedly; the epoch bump
    /// also invalidates any entry a dispatch loop already pulled out.
    pub fn cancel_all(&mut self) {
        let dropped = self.queue.len();
        self.queue.clear();
        self.epoch += 1;
        if dropped > 0 {
            log::debug!("cancelled {dropped} pending events");
        }
    }

    /// Pop the earliest event due at or before `deadline`, advancing the
    /// clock to its due time. Returns `None` once nothing further is due;
    /// the caller then advances the clock to the deadline itself.
    pub fn pop_due(&mut self, deadline: u64) -> Option<TimerEvent> {
        while let Some(head) = self.queue.peek() {
            if head.due > deadline {
                return None;
            }
            let Some(entry) = self.queue.pop() else {
                return None;
            };
            if entry.epoch != self.epoch {
                continue; // cancelled before it fired
            }
            self.now = self.now.max(entry.due);
            return Some(entry.event);
        }
        None
    }

    /// Move the clock forward to `target` (never backward)
    pub fn advance_to(&mut self, target: u64) {
        self.now = self.now.max(target);
    }
}
