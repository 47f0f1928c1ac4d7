use std::sync::Arc;

use crate::engine::Phase;
use crate::fitness::FitnessStats;

// messages from UI to engine thread
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EngineCommand {
    Start,
    Pause,
    Stop,
}

/// immutable snapshot sent to the UI after each generation.
/// the UI never sees the population itself.
#[derive(Clone, Debug)]
pub struct EngineUpdate {
    pub best_rgba: Arc<[u8]>,  // premultiplied phenotype of the best individual, arc to avoid copies
    pub width: u32,
    pub height: u32,
    pub generation: u64,
    pub stats: FitnessStats,
    pub phase: Phase,  // engine phase right after this generation
}
