//! This demo drives a handful of dendrite segments through a repeating sequence of cell
//! activity patterns (A -> B -> C -> D -> A ...). Each pattern owns one segment that learns
//! to recognise the pattern preceding it.
//!
//! Every time step:
//! - Marks the cells of the current pattern as active (and learning).
//! - Lets the segment of the current pattern reinforce the synapses that were active one step ago.
//! - Grows new synapses to a random sample of the previously active cells.
//! - Computes every segment's state so that the segment of the next pattern predicts it.
//!
//! Run with `RUST_LOG=htm_dendrite=debug` to see the learning trace.

use anyhow::Result;
use htm_dendrite::{CellId, CellStateHistory, DendriteSegment, SegmentConfig, SegmentState};
use rand::prelude::*;
use tracing_subscriber::EnvFilter;

const CELLS_PER_PATTERN: u32 = 16;
const PATTERNS: usize = 4;
const SAMPLE_SIZE: usize = 8;
const STEPS: u64 = 40;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let config = SegmentConfig::default()
        .with_connected_perm(0.5)
        .with_initial_perm(0.4)
        .with_permanence_inc(0.05)
        .with_permanence_dec(0.02)
        .with_activation_threshold(4)
        .with_min_threshold(2)
        .with_history_capacity(Some(8));

    let patterns: Vec<Vec<CellId>> = (0..PATTERNS as u32)
        .map(|p| (p * CELLS_PER_PATTERN..(p + 1) * CELLS_PER_PATTERN).collect())
        .collect();

    let mut segments = (0..PATTERNS)
        .map(|_| DendriteSegment::try_new(config))
        .collect::<htm_dendrite::Result<Vec<_>>>()?;

    let mut cells = CellStateHistory::new();
    let mut rng = StdRng::seed_from_u64(42);
    let mut correct_predictions = 0;

    println!("Feeding {STEPS} steps of a {PATTERNS}-pattern sequence...");

    for t in 0..STEPS {
        let current = t as usize % PATTERNS;
        cells.set_active(t, patterns[current].iter().copied());
        cells.set_learning(patterns[current].iter().copied());

        if t > 0 {
            let predicted = segments[current].state(t - 1) != SegmentState::Inactive;
            if predicted {
                correct_predictions += 1;
            }

            let segment = &mut segments[current];
            let active = segment.active_synapses(t - 1, &cells);
            if !active.is_empty() {
                segment.synapse_reinforcement(&active, true, true);
            }

            let mut candidates: Vec<CellId> = cells.active_cells(t - 1).collect();
            candidates.shuffle(&mut rng);
            candidates.truncate(SAMPLE_SIZE);
            segment.add_synapses(candidates);
        }

        for segment in segments.iter_mut() {
            segment.compute_state(t, &cells);
        }

        cells.forget_before(t.saturating_sub(1));
    }

    println!("Correct predictions: {correct_predictions}/{}", STEPS - 1);

    for (index, segment) in segments.iter().enumerate() {
        println!(
            "Segment {index}: {} synapses ({} connected), sequence = {}",
            segment.num_synapses(),
            segment.num_connected_synapses(),
            segment.is_sequence()
        );
    }

    Ok(())
}
