//! Live spot registry
//!
//! Tracks spawned, not-yet-resolved spots keyed by display id. A tap and an
//! animation expiry can be queued back-to-back against the same spot, so
//! resolution is idempotent: the first resolver wins and the second finds
//! nothing. Expiry resolution additionally matches on the spawn sequence
//! number, so a stale expiry can never remove a newer spot that recycled
//! the same display number.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// A numbered on-screen target
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Spot {
    /// Display number the player must tap (1..=30, cyclic)
    pub id: u32,
    /// Strictly-increasing spawn sequence, unique per spawn
    pub seq: u64,
    /// Scheduler timestamp at spawn (ms)
    pub spawned_at: u64,
}

/// The set of currently live spots
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct SpotRegistry {
    live: BTreeMap<u32, Spot>,
    next_seq: u64,
}

impl SpotRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a new spot under `id`. If a stale spot still holds that
    /// display number (a fresh burst overlapping old leftovers), it is
    /// superseded; its pending expiry will miss on the seq check.
    pub fn spawn(&mut self, id: u32, now: u64) -> Spot {
        let seq = self.next_seq;
        self.next_seq += 1;
        let spot = Spot {
            id,
            seq,
            spawned_at: now,
        };
        if let Some(old) = self.live.insert(id, spot) {
            log::debug!("spot {id} superseded (seq {} -> {seq})", old.seq);
        }
        spot
    }

    /// Remove and return the spot under `id`. Idempotent: a second call
    /// for the same spot is a no-op `None`.
    pub fn resolve(&mut self, id: u32) -> Option<Spot> {
        self.live.remove(&id)
    }

    /// Expiry-path resolution: removes the spot only if the live entry's
    /// spawn sequence matches the one the expiry was scheduled against.
    pub fn resolve_exact(&mut self, id: u32, seq: u64) -> Option<Spot> {
        match self.live.get(&id) {
            Some(spot) if spot.seq == seq => self.live.remove(&id),
            _ => None,
        }
    }

    pub fn contains(&self, id: u32) -> bool {
        self.live.contains_key(&id)
    }

    pub fn get(&self, id: u32) -> Option<&Spot> {
        self.live.get(&id)
    }

    /// Drop every live spot (pause/reset)
    pub fn clear(&mut self) {
        self.live.clear();
    }

    pub fn len(&self) -> usize {
        self.live.len()
    }

    pub fn is_empty(&self) -> bool {
        self.live.is_empty()
    }

    /// Copy of the live set, ordered by display id. Batch operations
    /// iterate this while mutating the registry itself.
    pub fn snapshot(&self) -> Vec<Spot> {
        self.live.values().copied().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_is_idempotent() {
        let mut reg = SpotRegistry::new();
        reg.spawn(1, 0);
        assert!(reg.contains(1));
        assert!(reg.resolve(1).is_some());
        assert!(reg.resolve(1).is_none());
        assert!(!reg.contains(1));
    }

    #[test]
    fn test_stale_expiry_misses_recycled_id() {
        let mut reg = SpotRegistry::new();
        let first = reg.spawn(5, 0);
        reg.resolve(5);
        let second = reg.spawn(5, 20_000);

        // Expiry scheduled against the first spawn must not remove the
        // second spot occupying the same display number.
        assert!(reg.resolve_exact(5, first.seq).is_none());
        assert!(reg.contains(5));
        assert_eq!(reg.resolve_exact(5, second.seq), Some(second));
    }

    #[test]
    fn test_spawn_supersedes_same_id() {
        let mut reg = SpotRegistry::new();
        let old = reg.spawn(7, 0);
        let new = reg.spawn(7, 1_000);
        assert_eq!(reg.len(), 1);
        assert_ne!(old.seq, new.seq);
        // The superseded spot's expiry is a no-op
        assert!(reg.resolve_exact(7, old.seq).is_none());
        assert!(reg.contains(7));
    }

    #[test]
    fn test_snapshot_is_detached_from_mutation() {
        let mut reg = SpotRegistry::new();
        for id in 1..=3 {
            reg.spawn(id, 0);
        }
        let snap = reg.snapshot();
        for spot in &snap {
            reg.resolve(spot.id);
        }
        assert_eq!(snap.len(), 3);
        assert!(reg.is_empty());
    }

    #[test]
    fn test_clear_empties_registry() {
        let mut reg = SpotRegistry::new();
        for id in 1..=10 {
            reg.spawn(id, 0);
        }
        reg.clear();
        assert!(reg.is_empty());
        assert!(reg.resolve(1).is_none());
    }
}
