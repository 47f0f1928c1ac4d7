// Engine module organization
// Each submodule handles one stage of a generation

pub mod reproduction;
pub mod selection;

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use std::sync::Arc;

use crate::dna::{DiskBounds, Genome};
use crate::error::ConfigError;
use crate::evolve_config::EvolveConfig;
use crate::fitness::{Evaluator, FitnessStats};
use crate::render::Raster;

/// where the driver is between generations.
/// evaluation and reproduction happen inside one `step`; the type states
/// `EvolutionState` (awaiting evaluation) and `EvaluatedState` (awaiting reproduction) carry them.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    /// initial population built, nothing evaluated yet
    Initialized,
    /// a fresh generation is waiting to be evaluated
    Ready,
    /// best match reached the convergence threshold; the final population is kept
    Converged,
    /// halted by a stop request or the generation cap
    Stopped,
}

impl Phase {
    /// nothing left to run once converged or stopped
    #[inline]
    pub fn is_finished(self) -> bool {
        matches!(self, Phase::Converged | Phase::Stopped)
    }
}

/// borrowed, read-only inputs of one generation step
pub struct EvolutionContext<'a> {
    pub cfg: &'a EvolveConfig,
    pub evaluator: &'a Evaluator,
    pub bounds: DiskBounds,
}

/// what the host gets back after each generation
#[derive(Clone, Debug)]
pub struct GenerationReport {
    pub generation: u64,
    pub stats: FitnessStats,
    pub best: Genome,
    pub converged: bool,
}

/// a population whose fitness has not been computed yet
#[derive(Clone, Debug, Default)]
pub struct EvolutionState {
    pub population: Vec<Genome>,
    pub generation: u64,
}

/// a population with fitness[i] computed for population[i] of the same generation
#[derive(Clone, Debug)]
pub struct EvaluatedState {
    pub population: Vec<Genome>,
    pub fitness: Vec<f64>,
    pub stats: FitnessStats,
    pub generation: u64,
}

/// outcome of `EvolutionState::advance`
pub enum Advance {
    Next(EvolutionState, GenerationReport),
    Converged(EvaluatedState, GenerationReport),
}

impl EvolutionState {
    /// generation 0: every individual built from independent random disks
    pub fn random<R: Rng>(rng: &mut R, cfg: &EvolveConfig, bounds: &DiskBounds) -> Self {
        profiling::scope!("EvolutionState::random");
        let population = (0..cfg.population_size)
            .map(|_| Genome::random(rng, cfg.gene_count, bounds))
            .collect();
        Self { population, generation: 0 }
    }

    /// generation 0 from a caller-supplied population, checked against the configured shape
    pub fn from_population(population: Vec<Genome>, cfg: &EvolveConfig) -> Result<Self, ConfigError> {
        if population.len() != cfg.population_size {
            return Err(ConfigError::PopulationSize {
                expected: cfg.population_size,
                actual: population.len(),
            });
        }
        if let Some((index, g)) = population.iter().enumerate().find(|(_, g)| g.len() != cfg.gene_count) {
            return Err(ConfigError::GeneCount {
                index,
                expected: cfg.gene_count,
                actual: g.len(),
            });
        }
        Ok(Self { population, generation: 0 })
    }

    pub fn evaluate(self, evaluator: &Evaluator) -> EvaluatedState {
        profiling::scope!("EvolutionState::evaluate");
        let fitness = evaluator.evaluate(&self.population);
        let stats = FitnessStats::from_fitness(&fitness).unwrap_or_default();
        EvaluatedState {
            population: self.population,
            fitness,
            stats,
            generation: self.generation,
        }
    }

    /// One full generation: evaluate, report, and either stop at convergence
    /// or build and hand back the next (unevaluated) population.
    pub fn advance<R: Rng>(self, ctx: &EvolutionContext<'_>, rng: &mut R) -> Advance {
        profiling::scope!("EvolutionState::advance");
        let evaluated = self.evaluate(ctx.evaluator);
        let converged = evaluated.has_converged(ctx.cfg.convergence_threshold);
        let report = evaluated.report(converged);

        if converged {
            Advance::Converged(evaluated, report)
        } else {
            Advance::Next(evaluated.reproduce(ctx, rng), report)
        }
    }
}

impl EvaluatedState {
    #[inline]
    pub fn best(&self) -> &Genome {
        &self.population[self.stats.best_index]
    }

    #[inline]
    pub fn has_converged(&self, threshold: f64) -> bool {
        !self.population.is_empty() && self.stats.best_match() >= threshold
    }

    pub fn report(&self, converged: bool) -> GenerationReport {
        GenerationReport {
            generation: self.generation,
            stats: self.stats,
            best: self.best().clone(),
            converged,
        }
    }

    /// the whole next population is new; this one is dropped once its fitness is consumed
    pub fn reproduce<R: Rng>(self, ctx: &EvolutionContext<'_>, rng: &mut R) -> EvolutionState {
        let population = reproduction::next_population(&self.population, &self.fitness, ctx.cfg, &ctx.bounds, rng);
        EvolutionState {
            population,
            generation: self.generation + 1,
        }
    }
}

// nothing can be drawn on (or rendered into) a zero-sized raster
fn check_target(target: &Raster) -> Result<(), ConfigError> {
    if target.width() == 0 || target.height() == 0 {
        return Err(ConfigError::EmptyTarget {
            width: target.width(),
            height: target.height(),
        });
    }
    Ok(())
}

#[derive(Default)]
enum Slot {
    #[default]
    Vacant,
    Pending(EvolutionState),
    Final(EvaluatedState),
}

/// Generation driver. Owns the config, the evaluator, the random source and the current state.
pub struct Engine {
    rng: Pcg32,
    cfg: EvolveConfig,
    evaluator: Evaluator,
    bounds: DiskBounds,
    seed: u64,
    slot: Slot,
    phase: Phase,
    last_report: Option<GenerationReport>,
}

impl Engine {
    /// random generation 0. seeds from the config, or from the OS when unset.
    pub fn new(target: Arc<Raster>, cfg: EvolveConfig) -> Result<Self, ConfigError> {
        profiling::scope!("Engine::new");
        check_target(&target)?;
        cfg.validate()?;
        let seed = cfg.seed.unwrap_or_else(rand::random);
        let mut rng = Pcg32::seed_from_u64(seed);
        let bounds = cfg.disk_bounds(target.width(), target.height());
        let state = EvolutionState::random(&mut rng, &cfg, &bounds);
        Ok(Self::assemble(target, cfg, rng, seed, state))
    }

    /// generation 0 supplied by the caller
    pub fn with_population(target: Arc<Raster>, cfg: EvolveConfig, population: Vec<Genome>) -> Result<Self, ConfigError> {
        check_target(&target)?;
        cfg.validate()?;
        let state = EvolutionState::from_population(population, &cfg)?;
        let seed = cfg.seed.unwrap_or_else(rand::random);
        let rng = Pcg32::seed_from_u64(seed);
        Ok(Self::assemble(target, cfg, rng, seed, state))
    }

    fn assemble(target: Arc<Raster>, cfg: EvolveConfig, rng: Pcg32, seed: u64, state: EvolutionState) -> Self {
        log::info!(
            "engine: {}x{} target, {} individuals x {} disks, tournament {}, elitism {:?}/{}, mutation {}, seed {}",
            target.width(),
            target.height(),
            cfg.population_size,
            cfg.gene_count,
            cfg.tournament_size,
            cfg.elitism,
            cfg.elite_size,
            cfg.mutation_rate,
            seed,
        );
        let evaluator = Evaluator::new(target.clone(), cfg.anti_alias, cfg.parallel_evaluation);
        let bounds = cfg.disk_bounds(target.width(), target.height());
        Self {
            rng,
            cfg,
            evaluator,
            bounds,
            seed,
            slot: Slot::Pending(state),
            phase: Phase::Initialized,
            last_report: None,
        }
    }

    /// Run one generation. Returns None once the engine has converged or stopped.
    pub fn step(&mut self) -> Option<&GenerationReport> {
        profiling::scope!("Engine::step");
        if self.is_finished() {
            return None;
        }
        let state = match std::mem::take(&mut self.slot) {
            Slot::Pending(state) => state,
            other => {
                self.slot = other;
                return None;
            }
        };

        let ctx = EvolutionContext {
            cfg: &self.cfg,
            evaluator: &self.evaluator,
            bounds: self.bounds,
        };
        let report = match state.advance(&ctx, &mut self.rng) {
            Advance::Next(next, report) => {
                self.slot = Slot::Pending(next);
                self.phase = match self.cfg.max_generations {
                    Some(cap) if report.generation + 1 >= cap => {
                        log::info!("stopping after {} generations", report.generation + 1);
                        Phase::Stopped
                    }
                    _ => Phase::Ready,
                };
                report
            }
            Advance::Converged(final_state, report) => {
                log::info!(
                    "converged at generation {}: best match {:.2}%",
                    report.generation,
                    report.stats.best_match_percent(),
                );
                self.slot = Slot::Final(final_state);
                self.phase = Phase::Converged;
                report
            }
        };

        log::info!("Generation {}: {}, {}", report.generation, report.stats.best, report.stats.worst);
        log::debug!("generation {} mean fitness {}", report.generation, report.stats.mean);
        Some(&*self.last_report.insert(report))
    }

    /// Step until converged, stopped, or `keep_going` returns false for a report.
    pub fn run<F>(&mut self, mut keep_going: F) -> Phase
    where
        F: FnMut(&GenerationReport) -> bool,
    {
        while let Some(report) = self.step() {
            if !keep_going(report) {
                self.request_stop();
                break;
            }
        }
        self.phase
    }

    /// cooperative stop, honored before the next generation starts
    pub fn request_stop(&mut self) {
        if self.phase != Phase::Converged {
            self.phase = Phase::Stopped;
        }
    }

    #[inline]
    pub fn is_finished(&self) -> bool {
        self.phase.is_finished()
    }

    #[inline]
    pub fn phase(&self) -> Phase {
        self.phase
    }

    #[inline]
    pub fn seed(&self) -> u64 {
        self.seed
    }

    #[inline]
    pub fn target(&self) -> &Raster {
        self.evaluator.target()
    }

    /// index of the generation the next `step` will evaluate (or the final one once converged)
    pub fn generation(&self) -> u64 {
        match &self.slot {
            Slot::Pending(s) => s.generation,
            Slot::Final(s) => s.generation,
            Slot::Vacant => 0,
        }
    }

    #[inline]
    pub fn last_report(&self) -> Option<&GenerationReport> {
        self.last_report.as_ref()
    }

    /// phenotype of the best individual of the last evaluated generation
    pub fn best_phenotype(&self) -> Option<Raster> {
        self.last_report.as_ref().map(|r| self.evaluator.render(&r.best))
    }

    #[inline]
    pub fn render(&self, genome: &Genome) -> Raster {
        self.evaluator.render(genome)
    }
}
