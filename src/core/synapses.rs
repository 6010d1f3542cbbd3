//! A `Synapse` models a single potential connection from a dendrite segment to another cell.
//! Each synapse targets exactly one presynaptic cell and carries a permanence in [0, 1].
//!
//! If the permanence is at or above the connected threshold, the synapse is considered "connected".
//! During learning, the permanence is increased or decreased depending on whether the
//! targeted cell was active in the relevant temporal context.
//!
//! The `SynapseSet` stores all synapses of one segment in a single contiguous vec (array),
//! kept sorted ascending by target with no duplicate targets. Sorting lets a segment merge
//! its synapses against another sorted list of cells in one linear pass, and lets
//! new candidates be placed with a binary search.

use super::CellId;
use serde::{Deserialize, Serialize};

/// A synapse connecting a segment to a presynaptic cell with an associated permanence value.
#[derive(Debug, Default, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Synapse {
    /// The presynaptic cell this synapse connects to.
    pub target: CellId,

    /// Represents the strength of the connection between the segment and the target cell.
    pub permanence: f32,
}

impl Synapse {
    pub fn new(target: CellId, permanence: f32) -> Self {
        Self { target, permanence }
    }

    /// Whether the permanence reaches `threshold`.
    #[inline]
    pub fn is_connected(&self, threshold: f32) -> bool {
        self.permanence >= threshold
    }

    #[inline]
    fn increment(&mut self, amount: f32) {
        self.permanence = (self.permanence + amount).min(1.0);
    }

    #[inline]
    fn decrement(&mut self, amount: f32) {
        self.permanence = (self.permanence - amount).max(0.0);
    }
}

/// Number of synapses touched by one reinforcement pass.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub(crate) struct ReinforcementSummary {
    pub(crate) strengthened: usize,
    pub(crate) weakened: usize,
}

/// The potential synapses of one segment, sorted ascending by target.
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
pub struct SynapseSet {
    synapses: Vec<Synapse>,
}

impl SynapseSet {
    /// Creates an empty synapse set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a synapse to `target` with `initial_perm`, or, if one already exists,
    /// raises its permanence by `increment` (clamped to 1.0).
    /// Returns `true` if a new synapse was inserted.
    pub fn insert_or_reinforce(&mut self, target: CellId, initial_perm: f32, increment: f32) -> bool {
        match self.synapses.binary_search_by_key(&target, |syn| syn.target) {
            Ok(index) => {
                self.synapses[index].increment(increment);
                false
            }
            Err(index) => {
                self.synapses.insert(index, Synapse::new(target, initial_perm));
                true
            }
        }
    }

    /// Applies one learning update by merging the synapses against `active`, which must be
    /// strictly ascending.
    ///
    /// - A synapse whose target is the current head of `active` is incremented if `positive`,
    ///   decremented otherwise, and the head advances.
    /// - A synapse preceding the head is decremented if `positive`, left alone otherwise.
    /// - Heads with no matching synapse are skipped.
    /// - Once `active` is exhausted, the remaining synapses are decremented if `positive`,
    ///   left alone otherwise.
    pub(crate) fn reinforce(
        &mut self,
        active: &[CellId],
        positive: bool,
        increment: f32,
        decrement: f32,
    ) -> ReinforcementSummary {
        let mut summary = ReinforcementSummary::default();
        let mut heads = active.iter().copied().peekable();
        let mut index = 0;

        while index < self.synapses.len() {
            let syn = &mut self.synapses[index];

            while heads.next_if(|&head| head < syn.target).is_some() {}
            let Some(&head) = heads.peek() else {
                break;
            };

            if syn.target == head {
                if positive {
                    syn.increment(increment);
                    summary.strengthened += 1;
                } else {
                    syn.decrement(decrement);
                    summary.weakened += 1;
                }
                heads.next();
                index += 1;
                if heads.peek().is_none() {
                    break;
                }
            } else {
                if positive {
                    syn.decrement(decrement);
                    summary.weakened += 1;
                }
                index += 1;
            }
        }

        if positive {
            for syn in &mut self.synapses[index..] {
                syn.decrement(decrement);
                summary.weakened += 1;
            }
        }

        summary
    }

    /// Returns the synapse targeting `target`, if any.
    pub fn get(&self, target: CellId) -> Option<&Synapse> {
        self.synapses
            .binary_search_by_key(&target, |syn| syn.target)
            .ok()
            .map(|index| &self.synapses[index])
    }

    /// Ascending scan over all synapses.
    pub fn iter(&self) -> std::slice::Iter<'_, Synapse> {
        self.synapses.iter()
    }

    /// Ascending scan over all target cells.
    pub fn targets(&self) -> impl Iterator<Item = CellId> + '_ {
        self.synapses.iter().map(|syn| syn.target)
    }

    pub fn len(&self) -> usize {
        self.synapses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.synapses.is_empty()
    }
}

impl<'a> IntoIterator for &'a SynapseSet {
    type Item = &'a Synapse;
    type IntoIter = std::slice::Iter<'a, Synapse>;

    fn into_iter(self) -> Self::IntoIter {
        self.synapses.iter()
    }
}
