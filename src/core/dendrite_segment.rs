//! A `DendriteSegment` models one distal dendrite segment of a cell.
//!
//! The segment owns a sorted set of potential synapses to other cells. Each timestep the
//! owning cell asks it to classify itself from the activity of those cells:
//! - **Learning:** more connected synapses than the activation threshold target learning cells.
//! - **Active:** otherwise, more connected synapses than the threshold target cells active at t.
//! - **Inactive:** neither.
//!
//! Learning is driven from outside as well. The learning loop queries matching and active
//! synapses to pick segments, grows new synapses with `add_synapses`, and adapts
//! permanences with `synapse_reinforcement`:
//! - Positive reinforcement strengthens synapses whose targets were active and weakens all others.
//! - Negative reinforcement only weakens synapses whose targets were active.
//!
//! Synapses are never removed, even once their permanence reaches zero.

use super::{
    cell_state::CellState,
    config::SegmentConfig,
    history::{SegmentState, StateHistory},
    synapses::{Synapse, SynapseSet},
    CellId, Timestep,
};
use crate::error::Result;
use serde::{Deserialize, Serialize};

/// A distal dendrite segment with its potential synapses and per-timestep state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DendriteSegment {
    /// Potential synapses, sorted ascending by target cell.
    potential_synapses: SynapseSet,

    /// Set once the segment has been positively reinforced as a sequence segment. Never cleared.
    sequence: bool,

    /// Classification and activity for every computed timestep.
    history: StateHistory,

    config: SegmentConfig,
}

impl DendriteSegment {
    /// Creates an empty segment governed by `config`.
    pub fn new(config: SegmentConfig) -> Self {
        Self {
            potential_synapses: SynapseSet::new(),
            sequence: false,
            history: StateHistory::new(config.history_capacity),
            config,
        }
    }

    /// Creates an empty segment after validating `config`.
    ///
    /// # Errors
    ///
    /// Returns `DendriteError::InvalidParameter` if the config fails validation.
    pub fn try_new(config: SegmentConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self::new(config))
    }

    /// Classifies the segment at timestep `t` and records the result in its history.
    ///
    /// Only connected synapses are counted. For each, the target is checked for activity
    /// at `t` and for the current learning state. Learning wins over activity when both
    /// counts exceed the activation threshold. Recomputing a timestep overwrites it.
    pub fn compute_state<C: CellState>(&mut self, t: Timestep, cells: &C) -> SegmentState {
        let mut active = 0u32;
        let mut learn = 0u32;

        for syn in self
            .potential_synapses
            .iter()
            .filter(|syn| syn.is_connected(self.config.connected_perm))
        {
            if cells.active_state(syn.target, t) {
                active += 1;
            }
            if cells.learn_state(syn.target) {
                learn += 1;
            }
        }

        let threshold = self.config.activation_threshold;
        let (state, activity) = if learn > threshold {
            (SegmentState::Learning, learn)
        } else if active > threshold {
            (SegmentState::Active, active)
        } else {
            (SegmentState::Inactive, 0)
        };

        tracing::trace!(t, active, learn, ?state, "segment state computed");
        self.history.record(t, state, activity);
        state
    }

    /// Counts synapses at least as strong as a freshly grown one whose targets were active at `t`.
    /// Returns 0 unless that count exceeds the min threshold, so "no active synapses" and
    /// "too few" cannot be told apart.
    pub fn get_matching_synapses<C: CellState>(&self, t: Timestep, cells: &C) -> u32 {
        self.matching_count(t, cells).unwrap_or(0)
    }

    fn matching_count<C: CellState>(&self, t: Timestep, cells: &C) -> Option<u32> {
        let count = self
            .potential_synapses
            .iter()
            .filter(|syn| syn.permanence >= self.config.initial_perm && cells.active_state(syn.target, t))
            .count() as u32;

        (count > self.config.min_threshold).then_some(count)
    }

    /// Appends to `out`, in ascending order, the targets of all non-zero synapses
    /// whose target cells were active at `t`.
    pub fn get_active_synapses<C: CellState>(&self, t: Timestep, cells: &C, out: &mut Vec<CellId>) {
        out.extend(
            self.potential_synapses
                .iter()
                .filter(|syn| syn.permanence > 0.0 && cells.active_state(syn.target, t))
                .map(|syn| syn.target),
        );
    }

    /// Same as `get_active_synapses`, collected into a new vector.
    pub fn active_synapses<C: CellState>(&self, t: Timestep, cells: &C) -> Vec<CellId> {
        let mut out = Vec::new();
        self.get_active_synapses(t, cells, &mut out);
        out
    }

    /// Grows a synapse with the initial permanence for every candidate not yet connected.
    /// Candidates that already have a synapse are reinforced instead, once per occurrence.
    pub fn add_synapses<I>(&mut self, candidates: I)
    where
        I: IntoIterator<Item = CellId>,
    {
        let mut grown = 0usize;
        let mut reinforced = 0usize;

        for target in candidates {
            if self.potential_synapses.insert_or_reinforce(
                target,
                self.config.initial_perm,
                self.config.permanence_inc,
            ) {
                grown += 1;
            } else {
                reinforced += 1;
            }
        }

        tracing::debug!(
            grown,
            reinforced,
            total = self.potential_synapses.len(),
            "synapses added to segment"
        );
    }

    /// Adapts every synapse permanence given `active_targets`, the strictly ascending
    /// targets observed active in the relevant context (as returned by `get_active_synapses`).
    ///
    /// With `positive`, matched synapses are incremented and all others decremented.
    /// Without it, only matched synapses are decremented. Targets without a synapse are
    /// ignored. A positive update with `sequence` marks the segment as a sequence segment.
    ///
    /// `active_targets` must not be empty. Debug builds panic on an empty slice; release
    /// builds treat it as "no synapse was active".
    pub fn synapse_reinforcement(&mut self, active_targets: &[CellId], sequence: bool, positive: bool) {
        debug_assert!(!active_targets.is_empty(), "reinforcement without active synapses");
        debug_assert!(
            active_targets.windows(2).all(|w| w[0] < w[1]),
            "active synapses must be strictly ascending"
        );

        if active_targets.is_empty() {
            tracing::warn!(positive, "segment reinforced with an empty active set");
        }

        if positive && sequence {
            self.sequence = true;
        }

        let summary = self.potential_synapses.reinforce(
            active_targets,
            positive,
            self.config.permanence_inc,
            self.config.permanence_dec,
        );

        tracing::debug!(
            positive,
            sequence,
            strengthened = summary.strengthened,
            weakened = summary.weakened,
            "segment reinforced"
        );
    }

    /// Whether the segment has been reinforced as a sequence segment.
    pub fn is_sequence(&self) -> bool {
        self.sequence
    }

    /// State recorded at `t`. Timesteps never computed read as inactive.
    pub fn state(&self, t: Timestep) -> SegmentState {
        self.history.state(t)
    }

    /// Activity recorded at `t`. Timesteps never computed read as 0.
    pub fn activity(&self, t: Timestep) -> u32 {
        self.history.activity(t)
    }

    pub fn history(&self) -> &StateHistory {
        &self.history
    }

    pub fn synapses(&self) -> &SynapseSet {
        &self.potential_synapses
    }

    pub fn num_synapses(&self) -> usize {
        self.potential_synapses.len()
    }

    /// Number of synapses at or above the connected permanence.
    pub fn num_connected_synapses(&self) -> usize {
        self.potential_synapses
            .iter()
            .filter(|syn| syn.is_connected(self.config.connected_perm))
            .count()
    }

    /// Permanence of the synapse targeting `target`, if one exists.
    pub fn permanence(&self, target: CellId) -> Option<f32> {
        self.potential_synapses.get(target).map(|syn: &Synapse| syn.permanence)
    }

    pub fn config(&self) -> &SegmentConfig {
        &self.config
    }
}
