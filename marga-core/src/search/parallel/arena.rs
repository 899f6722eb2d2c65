//! Lock-free node arena for the batch solver.
//!
//! One record per cell, indexed by dense cell ID. The best known distance and
//! the predecessor are packed into a single `AtomicU64` so a relaxation
//! replaces both in one compare-and-swap; a per-cell version counter
//! invalidates open-set entries left behind by the replaced record.

use std::sync::atomic::{AtomicU32, AtomicU64, Ordering};

use crate::core::CellId;

/// Predecessor value of the start cell (and of unseen cells).
pub const NO_PREDECESSOR: CellId = CellId::MAX;

/// Pack `(g, predecessor)` into one word: distance bits in the high half.
#[inline]
const fn pack(g: f32, pred: CellId) -> u64 {
    ((g.to_bits() as u64) << 32) | pred as u64
}

#[inline]
const fn unpack(slot: u64) -> (f32, CellId) {
    (f32::from_bits((slot >> 32) as u32), slot as u32)
}

/// Contiguous arena of per-cell `(g, predecessor, version)` records.
pub struct NodeArena {
    slots: Vec<AtomicU64>,
    versions: Vec<AtomicU32>,
}

impl NodeArena {
    /// Create an arena with every cell unseen (`g = inf`).
    pub fn new(cells: usize) -> Self {
        let mut slots = Vec::with_capacity(cells);
        let mut versions = Vec::with_capacity(cells);
        for _ in 0..cells {
            slots.push(AtomicU64::new(pack(f32::INFINITY, NO_PREDECESSOR)));
            versions.push(AtomicU32::new(0));
        }
        Self { slots, versions }
    }

    /// Install the start record (`g = 0`, no predecessor) on a fresh arena.
    pub fn seed_start(&self, id: CellId) -> u32 {
        self.slots[id as usize].store(pack(0.0, NO_PREDECESSOR), Ordering::Release);
        self.versions[id as usize].store(1, Ordering::Release);
        1
    }

    /// Best known distance and predecessor of a cell.
    #[inline]
    pub fn record(&self, id: CellId) -> (f32, CellId) {
        unpack(self.slots[id as usize].load(Ordering::Acquire))
    }

    /// Best known distance of a cell (`inf` when unseen).
    #[inline]
    pub fn g(&self, id: CellId) -> f32 {
        self.record(id).0
    }

    /// Current record version of a cell.
    #[inline]
    pub fn version(&self, id: CellId) -> u32 {
        self.versions[id as usize].load(Ordering::Acquire)
    }

    /// Relax a cell against a candidate `(g, predecessor)`.
    ///
    /// Installs the candidate when it strictly improves the stored distance
    /// and returns the new record version; returns `None` when the stored
    /// record is at least as good. Concurrent relaxations of the same cell
    /// linearise through the compare-and-swap: the smallest distance wins.
    pub fn relax(&self, id: CellId, g: f32, pred: CellId) -> Option<u32> {
        let slot = &self.slots[id as usize];
        let mut current = slot.load(Ordering::Acquire);
        loop {
            let (current_g, _) = unpack(current);
            if g >= current_g {
                return None;
            }
            match slot.compare_exchange_weak(
                current,
                pack(g, pred),
                Ordering::AcqRel,
                Ordering::Acquire,
            ) {
                Ok(_) => {
                    let version = self.versions[id as usize].fetch_add(1, Ordering::AcqRel) + 1;
                    return Some(version);
                }
                Err(observed) => current = observed,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unseen_cells_are_infinite() {
        let arena = NodeArena::new(4);
        for id in 0..4 {
            let (g, pred) = arena.record(id);
            assert_eq!(g, f32::INFINITY);
            assert_eq!(pred, NO_PREDECESSOR);
            assert_eq!(arena.version(id), 0);
        }
    }

    #[test]
    fn test_seed_start() {
        let arena = NodeArena::new(4);
        let version = arena.seed_start(2);
        assert_eq!(version, 1);
        assert_eq!(arena.record(2), (0.0, NO_PREDECESSOR));
    }

    #[test]
    fn test_relax_improves_and_bumps_version() {
        let arena = NodeArena::new(4);
        assert_eq!(arena.relax(1, 5.0, 0), Some(1));
        assert_eq!(arena.record(1), (5.0, 0));

        // Worse and equal candidates are rejected.
        assert_eq!(arena.relax(1, 6.0, 2), None);
        assert_eq!(arena.relax(1, 5.0, 2), None);
        assert_eq!(arena.record(1), (5.0, 0));

        // A strict improvement replaces the record and stales version 1.
        assert_eq!(arena.relax(1, 3.5, 3), Some(2));
        assert_eq!(arena.record(1), (3.5, 3));
        assert_eq!(arena.version(1), 2);
    }

    #[test]
    fn test_pack_round_trip() {
        let g = 3.0 + std::f32::consts::SQRT_2;
        let (unpacked_g, unpacked_pred) = unpack(pack(g, 42));
        assert_eq!(unpacked_g, g);
        assert_eq!(unpacked_pred, 42);
    }
}
