pub mod cell_state;
pub mod config;
pub mod dendrite_segment;
pub mod history;
pub mod synapses;

/// Identifies the presynaptic cell a synapse targets.
pub type CellId = u32;

/// A discrete simulation step.
pub type Timestep = u64;
