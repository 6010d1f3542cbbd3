//! Distal dendrite segments for Hierarchical Temporal Memory (HTM).
//!
//! A `DendriteSegment` aggregates potential synapses to other cells, classifies itself
//! as inactive, active or learning at every timestep, and adapts synapse permanences
//! through an ordered-merge Hebbian rule. Cells, columns and the scheduler that drives
//! segments live outside this crate and talk to it through the `CellState` oracle.

pub mod core;
pub mod error;

pub use crate::core::{
    cell_state::{CellState, CellStateHistory},
    config::SegmentConfig,
    dendrite_segment::DendriteSegment,
    history::{SegmentState, StateHistory},
    synapses::{Synapse, SynapseSet},
    CellId, Timestep,
};
pub use error::{DendriteError, Result};
