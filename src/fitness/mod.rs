// Fitness module organization
// Each submodule handles a specific aspect of fitness computation

pub mod metrics;
pub mod sad;

// Re-export commonly used types and functions
pub use metrics::FitnessStats;
pub use sad::normalized_sad_rgb;

use rayon::prelude::*;
use std::sync::Arc;

use crate::dna::Genome;
use crate::render::{CpuRenderer, Raster};

/// normalized color distance between two same-sized rasters, in [0, 1].
/// mismatched dimensions are a programming error and panic.
pub fn fitness(target: &Raster, candidate: &Raster) -> f64 {
    profiling::scope!("fitness");
    assert_eq!(
        (target.width(), target.height()),
        (candidate.width(), candidate.height()),
        "phenotype raster does not match the target size",
    );
    normalized_sad_rgb(target.data(), candidate.data())
}

/// renders individuals and scores them against the fixed target.
/// holds the target read-only, so one evaluator can be shared by every worker.
#[derive(Clone, Debug)]
pub struct Evaluator {
    target: Arc<Raster>,
    anti_alias: bool,
    parallel: bool,
}

impl Evaluator {
    pub fn new(target: Arc<Raster>, anti_alias: bool, parallel: bool) -> Self {
        Self { target, anti_alias, parallel }
    }

    #[inline]
    pub fn target(&self) -> &Raster {
        &self.target
    }

    /// full phenotype, for display
    pub fn render(&self, genome: &Genome) -> Raster {
        CpuRenderer::render(genome, self.target.width(), self.target.height(), self.anti_alias)
    }

    /// render into the thread's scratch buffer and score it, no per-call allocation
    pub fn score(&self, genome: &Genome) -> f64 {
        profiling::scope!("Evaluator::score");
        let target = &*self.target;
        CpuRenderer::with_rendered(genome, target.width(), target.height(), self.anti_alias, |rgba| {
            normalized_sad_rgb(target.data(), rgba)
        })
    }

    /// one score per individual, positionally aligned with `population`.
    /// individuals are independent, so the parallel and sequential paths give identical results.
    pub fn evaluate(&self, population: &[Genome]) -> Vec<f64> {
        profiling::scope!("Evaluator::evaluate");
        if self.parallel {
            population.par_iter().map(|g| self.score(g)).collect()
        } else {
            population.iter().map(|g| self.score(g)).collect()
        }
    }
}
