//! Two-level open set for the batch solver.
//!
//! An active frontier kept sorted by `f` ascending, plus an unsorted staging
//! buffer that collects the round's insertions. At each round boundary the
//! staging buffer is sorted in parallel and merged with the unconsumed tail
//! of the frontier, so every extraction sees entries whose `f` is no larger
//! than anything left behind. Duplicate and stale entries are permitted; the
//! solver filters them by version and closed-set checks at extraction time.

use std::cmp::Ordering;

use rayon::slice::ParallelSliceMut;

use crate::core::CellId;

/// Non-owning handle into the node arena: `(f, g, cell, version)`.
#[derive(Clone, Copy, Debug)]
pub struct OpenEntry {
    pub f: f32,
    pub g: f32,
    pub cell: CellId,
    pub version: u32,
}

/// Order by `f` ascending, cell ID as the deterministic tie-break.
#[inline]
fn by_priority(a: &OpenEntry, b: &OpenEntry) -> Ordering {
    a.f.total_cmp(&b.f).then(a.cell.cmp(&b.cell))
}

/// Sorted frontier + staging buffer.
pub struct OpenList {
    frontier: Vec<OpenEntry>,
    /// Index of the next unconsumed frontier entry.
    head: usize,
    staging: Vec<OpenEntry>,
}

impl OpenList {
    pub fn new() -> Self {
        Self {
            frontier: Vec::new(),
            head: 0,
            staging: Vec::new(),
        }
    }

    /// Stage a single entry for the next merge.
    pub fn stage(&mut self, entry: OpenEntry) {
        self.staging.push(entry);
    }

    /// Stage a batch of entries for the next merge.
    pub fn stage_all(&mut self, entries: Vec<OpenEntry>) {
        self.staging.extend(entries);
    }

    /// Sort staged entries and merge them with the unconsumed frontier tail.
    pub fn merge(&mut self) {
        if self.staging.is_empty() {
            return;
        }
        self.staging.par_sort_unstable_by(by_priority);

        let tail = &self.frontier[self.head..];
        let mut merged = Vec::with_capacity(tail.len() + self.staging.len());
        let (mut i, mut j) = (0, 0);
        while i < tail.len() && j < self.staging.len() {
            if by_priority(&tail[i], &self.staging[j]) != Ordering::Greater {
                merged.push(tail[i]);
                i += 1;
            } else {
                merged.push(self.staging[j]);
                j += 1;
            }
        }
        merged.extend_from_slice(&tail[i..]);
        merged.extend_from_slice(&self.staging[j..]);

        self.frontier = merged;
        self.head = 0;
        self.staging.clear();
    }

    /// Remove and return the minimum-`f` entry of the merged frontier.
    pub fn pop(&mut self) -> Option<OpenEntry> {
        let entry = self.frontier.get(self.head).copied()?;
        self.head += 1;
        Some(entry)
    }

    /// Entries remaining in the frontier (staged entries not included).
    pub fn frontier_len(&self) -> usize {
        self.frontier.len() - self.head
    }

    /// True when both the frontier and the staging buffer are exhausted.
    pub fn is_drained(&self) -> bool {
        self.head >= self.frontier.len() && self.staging.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(f: f32, cell: CellId) -> OpenEntry {
        OpenEntry {
            f,
            g: f,
            cell,
            version: 1,
        }
    }

    #[test]
    fn test_pop_returns_ascending_f() {
        let mut open = OpenList::new();
        open.stage(entry(3.0, 1));
        open.stage(entry(1.0, 2));
        open.stage(entry(2.0, 3));
        open.merge();

        let popped: Vec<f32> = std::iter::from_fn(|| open.pop()).map(|e| e.f).collect();
        assert_eq!(popped, vec![1.0, 2.0, 3.0]);
        assert!(open.is_drained());
    }

    #[test]
    fn test_merge_interleaves_staged_entries() {
        let mut open = OpenList::new();
        open.stage(entry(1.0, 1));
        open.stage(entry(4.0, 2));
        open.merge();
        assert_eq!(open.pop().map(|e| e.cell), Some(1));

        // New work arrives cheaper than the remaining tail.
        open.stage(entry(2.0, 3));
        open.stage(entry(5.0, 4));
        open.merge();

        let order: Vec<CellId> = std::iter::from_fn(|| open.pop()).map(|e| e.cell).collect();
        assert_eq!(order, vec![3, 2, 4]);
    }

    #[test]
    fn test_equal_f_breaks_ties_by_cell() {
        let mut open = OpenList::new();
        open.stage(entry(1.0, 9));
        open.stage(entry(1.0, 2));
        open.stage(entry(1.0, 5));
        open.merge();

        let order: Vec<CellId> = std::iter::from_fn(|| open.pop()).map(|e| e.cell).collect();
        assert_eq!(order, vec![2, 5, 9]);
    }

    #[test]
    fn test_drained_tracks_staging() {
        let mut open = OpenList::new();
        assert!(open.is_drained());
        open.stage(entry(1.0, 1));
        assert!(!open.is_drained());
        open.merge();
        open.pop();
        assert!(open.is_drained());
    }
}
