//! Time-indexed record of a segment's classification.
//!
//! Each timestep maps to a `(SegmentState, activity)` pair. Timesteps that were never
//! recorded, or that have been evicted from a bounded history, read as inactive with zero
//! activity. Entries are kept in a `BTreeMap`, so only recorded timesteps take up space
//! and any `Timestep` value can be written in any order.

use super::Timestep;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Classification of a segment at one timestep.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SegmentState {
    #[default]
    Inactive,
    Active,
    Learning,
}

/// Sparse, optionally bounded history of `(state, activity)` pairs.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StateHistory {
    entries: BTreeMap<Timestep, (SegmentState, u32)>,

    /// Width of the retained window, ending at the newest recorded timestep. `None` keeps everything.
    capacity: Option<usize>,
}

impl StateHistory {
    /// Creates an empty history retaining at most the `capacity` most recent timesteps.
    pub fn new(capacity: Option<usize>) -> Self {
        Self {
            entries: BTreeMap::new(),
            capacity,
        }
    }

    /// Stores `(state, activity)` at `t`, overwriting any earlier record for `t`.
    pub fn record(&mut self, t: Timestep, state: SegmentState, activity: u32) {
        if let Some(start) = self.window_start(t) {
            if t < start {
                tracing::trace!(t, start, "dropping record older than history window");
                return;
            }
        }

        self.entries.insert(t, (state, activity));

        if let Some(start) = self.window_start(t) {
            self.entries = self.entries.split_off(&start);
        }
    }

    /// First timestep kept by a bounded history once `t` has been recorded.
    fn window_start(&self, t: Timestep) -> Option<Timestep> {
        let cap = self.capacity?;
        let newest = self.latest().map_or(t, |latest| latest.max(t));
        let span = Timestep::try_from(cap.saturating_sub(1)).unwrap_or(Timestep::MAX);
        Some(newest.saturating_sub(span))
    }

    /// Returns the `(state, activity)` pair recorded at `t`, or `(Inactive, 0)`.
    pub fn get(&self, t: Timestep) -> (SegmentState, u32) {
        self.entries.get(&t).copied().unwrap_or_default()
    }

    pub fn state(&self, t: Timestep) -> SegmentState {
        self.get(t).0
    }

    pub fn activity(&self, t: Timestep) -> u32 {
        self.get(t).1
    }

    /// The newest timestep held, if any.
    pub fn latest(&self) -> Option<Timestep> {
        self.entries.last_key_value().map(|(&t, _)| t)
    }

    /// The oldest timestep held, if any.
    pub fn earliest(&self) -> Option<Timestep> {
        self.entries.first_key_value().map(|(&t, _)| t)
    }

    pub fn capacity(&self) -> Option<usize> {
        self.capacity
    }

    /// Number of recorded timesteps currently held.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unwritten_reads_inactive() {
        let history = StateHistory::new(None);
        assert_eq!(history.get(0), (SegmentState::Inactive, 0));
        assert_eq!(history.get(Timestep::MAX), (SegmentState::Inactive, 0));
        assert_eq!(history.latest(), None);
    }

    #[test]
    fn test_record_and_overwrite() {
        let mut history = StateHistory::new(None);
        history.record(3, SegmentState::Active, 4);
        assert_eq!(history.get(3), (SegmentState::Active, 4));

        history.record(3, SegmentState::Learning, 2);
        assert_eq!(history.state(3), SegmentState::Learning);
        assert_eq!(history.activity(3), 2);
        assert_eq!(history.len(), 1);
    }

    #[test]
    fn test_gaps_read_inactive() {
        let mut history = StateHistory::new(None);
        history.record(2, SegmentState::Active, 1);
        history.record(6, SegmentState::Active, 5);

        assert_eq!(history.earliest(), Some(2));
        assert_eq!(history.latest(), Some(6));
        assert_eq!(history.get(4), (SegmentState::Inactive, 0));
        assert_eq!(history.len(), 2);
    }

    #[test]
    fn test_out_of_order_record() {
        let mut history = StateHistory::new(None);
        history.record(5, SegmentState::Active, 3);
        history.record(1, SegmentState::Learning, 2);

        assert_eq!(history.earliest(), Some(1));
        assert_eq!(history.get(1), (SegmentState::Learning, 2));
        assert_eq!(history.get(5), (SegmentState::Active, 3));
    }

    #[test]
    fn test_unbounded_extreme_timesteps() {
        let mut history = StateHistory::new(None);
        history.record(0, SegmentState::Active, 1);
        history.record(Timestep::MAX, SegmentState::Learning, 2);
        history.record(10_000_000_000, SegmentState::Active, 3);

        assert_eq!(history.len(), 3);
        assert_eq!(history.earliest(), Some(0));
        assert_eq!(history.latest(), Some(Timestep::MAX));
        assert_eq!(history.get(Timestep::MAX), (SegmentState::Learning, 2));
        assert_eq!(history.get(10_000_000_000), (SegmentState::Active, 3));
    }

    #[test]
    fn test_unbounded_far_backward_write() {
        let mut history = StateHistory::new(None);
        history.record(Timestep::MAX, SegmentState::Active, 1);
        history.record(0, SegmentState::Learning, 2);

        assert_eq!(history.len(), 2);
        assert_eq!(history.get(0), (SegmentState::Learning, 2));
    }

    #[test]
    fn test_bounded_window_evicts_oldest() {
        let mut history = StateHistory::new(Some(3));
        for t in 0..5 {
            history.record(t, SegmentState::Active, t as u32 + 1);
        }

        assert_eq!(history.len(), 3);
        assert_eq!(history.earliest(), Some(2));
        assert_eq!(history.get(1), (SegmentState::Inactive, 0));
        assert_eq!(history.get(4), (SegmentState::Active, 5));

        history.record(0, SegmentState::Learning, 9);
        assert_eq!(history.get(0), (SegmentState::Inactive, 0));
        assert_eq!(history.earliest(), Some(2));
    }

    #[test]
    fn test_bounded_window_jump() {
        let mut history = StateHistory::new(Some(2));
        history.record(0, SegmentState::Active, 1);
        history.record(1_000_000, SegmentState::Learning, 2);

        assert_eq!(history.len(), 1);
        assert_eq!(history.earliest(), Some(1_000_000));
        assert_eq!(history.get(0), (SegmentState::Inactive, 0));
        assert_eq!(history.get(1_000_000), (SegmentState::Learning, 2));
    }

    #[test]
    fn test_bounded_extreme_timesteps() {
        let mut history = StateHistory::new(Some(4));
        history.record(Timestep::MAX, SegmentState::Active, 1);
        history.record(0, SegmentState::Learning, 2);

        assert_eq!(history.len(), 1);
        assert_eq!(history.get(0), (SegmentState::Inactive, 0));
        assert_eq!(history.get(Timestep::MAX), (SegmentState::Active, 1));

        history.record(Timestep::MAX - 3, SegmentState::Learning, 3);
        assert_eq!(history.len(), 2);
        assert_eq!(history.earliest(), Some(Timestep::MAX - 3));
    }

    #[test]
    fn test_bounded_backward_write_inside_window() {
        let mut history = StateHistory::new(Some(5));
        history.record(3, SegmentState::Active, 1);
        history.record(1, SegmentState::Learning, 2);

        assert_eq!(history.len(), 2);
        assert_eq!(history.get(1), (SegmentState::Learning, 2));
    }
}
