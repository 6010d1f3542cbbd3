//! `SegmentConfig` gathers the constants that govern how a dendrite segment classifies
//! itself and how its synapse permanences are adjusted.
//!
//! A cell usually shares a single config across all of its segments. The values are
//! read-only for the lifetime of a segment; every segment keeps its own copy.

use crate::error::{DendriteError, Result};
use serde::{Deserialize, Serialize};

/// Options governing segment activation and synapse permanence adjustment.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SegmentConfig {
    /// Minimum permanence for a synapse to count as functionally connected.
    pub connected_perm: f32,

    /// Permanence assigned to newly grown synapses. Also the matching threshold.
    pub initial_perm: f32,

    /// Amount added to a permanence when a synapse is reinforced.
    pub permanence_inc: f32,

    /// Amount subtracted from a permanence when a synapse is weakened.
    pub permanence_dec: f32,

    /// A segment is active (or learning) once strictly more connected synapses than this fire.
    pub activation_threshold: u32,

    /// A segment matches once strictly more synapses than this fire.
    pub min_threshold: u32,

    /// Number of most recent timesteps a segment remembers. `None` keeps everything.
    pub history_capacity: Option<usize>,
}

impl Default for SegmentConfig {
    fn default() -> Self {
        Self {
            connected_perm: 0.2,
            initial_perm: 0.3,
            permanence_inc: 0.05,
            permanence_dec: 0.05,
            activation_threshold: 2,
            min_threshold: 1,
            history_capacity: None,
        }
    }
}

impl SegmentConfig {
    pub fn with_connected_perm(mut self, value: f32) -> Self {
        self.connected_perm = value;
        self
    }

    pub fn with_initial_perm(mut self, value: f32) -> Self {
        self.initial_perm = value;
        self
    }

    pub fn with_permanence_inc(mut self, value: f32) -> Self {
        self.permanence_inc = value;
        self
    }

    pub fn with_permanence_dec(mut self, value: f32) -> Self {
        self.permanence_dec = value;
        self
    }

    pub fn with_activation_threshold(mut self, value: u32) -> Self {
        self.activation_threshold = value;
        self
    }

    pub fn with_min_threshold(mut self, value: u32) -> Self {
        self.min_threshold = value;
        self
    }

    pub fn with_history_capacity(mut self, capacity: Option<usize>) -> Self {
        self.history_capacity = capacity;
        self
    }

    /// Checks that every permanence lies in [0, 1], step sizes are non-negative
    /// and a bounded history keeps at least one timestep.
    ///
    /// # Errors
    ///
    /// Returns `DendriteError::InvalidParameter` naming the first offending field.
    pub fn validate(&self) -> Result<()> {
        check_unit("connected_perm", self.connected_perm)?;
        check_unit("initial_perm", self.initial_perm)?;
        check_step("permanence_inc", self.permanence_inc)?;
        check_step("permanence_dec", self.permanence_dec)?;

        if self.history_capacity == Some(0) {
            return Err(DendriteError::InvalidParameter {
                name: "history_capacity",
                message: "must keep at least one timestep".to_string(),
            });
        }

        Ok(())
    }
}

fn check_unit(name: &'static str, value: f32) -> Result<()> {
    if !(0.0..=1.0).contains(&value) {
        return Err(DendriteError::InvalidParameter {
            name,
            message: format!("{value} is outside [0, 1]"),
        });
    }
    Ok(())
}

fn check_step(name: &'static str, value: f32) -> Result<()> {
    if !value.is_finite() || value < 0.0 {
        return Err(DendriteError::InvalidParameter {
            name,
            message: format!("{value} must be a finite, non-negative step"),
        });
    }
    Ok(())
}
