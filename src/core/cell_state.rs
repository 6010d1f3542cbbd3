//! The `CellState` oracle answers what a segment needs to know about the cells it
//! connects to: whether a cell was active at a given timestep, and whether it is
//! currently selected for learning.
//!
//! The owning cell/column layer implements this trait over its own bookkeeping.
//! `CellStateHistory` is a simple in-memory implementation that keeps one active
//! set per timestep, in the same way the temporal memory tracks its active cells.

use super::{CellId, Timestep};
use fxhash::{FxHashMap, FxHashSet};

/// Read-only view of cell activity consumed by dendrite segments.
pub trait CellState {
    /// Whether `cell` was active at timestep `t`.
    fn active_state(&self, cell: CellId, t: Timestep) -> bool;

    /// Whether `cell` is currently in the learning state.
    fn learn_state(&self, cell: CellId) -> bool;
}

impl<T: CellState + ?Sized> CellState for &T {
    #[inline]
    fn active_state(&self, cell: CellId, t: Timestep) -> bool {
        (**self).active_state(cell, t)
    }

    #[inline]
    fn learn_state(&self, cell: CellId) -> bool {
        (**self).learn_state(cell)
    }
}

/// Per-timestep active cells plus the current learning cells.
#[derive(Debug, Default, Clone)]
pub struct CellStateHistory {
    active: FxHashMap<Timestep, FxHashSet<CellId>>,
    learning: FxHashSet<CellId>,
}

impl CellStateHistory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the active cells recorded for timestep `t`.
    pub fn set_active<I>(&mut self, t: Timestep, cells: I)
    where
        I: IntoIterator<Item = CellId>,
    {
        self.active.insert(t, cells.into_iter().collect());
    }

    /// Replaces the set of learning cells.
    pub fn set_learning<I>(&mut self, cells: I)
    where
        I: IntoIterator<Item = CellId>,
    {
        self.learning = cells.into_iter().collect();
    }

    pub fn clear_learning(&mut self) {
        self.learning.clear();
    }

    /// Drops the active sets of every timestep before `t`.
    pub fn forget_before(&mut self, t: Timestep) {
        self.active.retain(|&step, _| step >= t);
    }

    /// Active cells recorded for `t`, in no particular order.
    pub fn active_cells(&self, t: Timestep) -> impl Iterator<Item = CellId> + '_ {
        self.active.get(&t).into_iter().flatten().copied()
    }
}

impl CellState for CellStateHistory {
    #[inline]
    fn active_state(&self, cell: CellId, t: Timestep) -> bool {
        self.active.get(&t).is_some_and(|cells| cells.contains(&cell))
    }

    #[inline]
    fn learn_state(&self, cell: CellId) -> bool {
        self.learning.contains(&cell)
    }
}
