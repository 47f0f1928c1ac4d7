use serde::{Deserialize, Serialize};

use crate::dna::DiskBounds;
use crate::error::ConfigError;

/// how each generation biases reproduction toward good individuals
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ElitismMode {
    /// every `elite_size`-th slot reuses the parent pair drawn just before it (default)
    SlotReuse,
    /// the `elite_size` best individuals are copied unchanged into the next generation
    CarryOver,
}

#[derive(Clone, Debug)]
pub struct EvolveConfig {
    // gene shape
    pub min_radius: i32,   // inclusive
    pub max_radius: i32,   // exclusive

    // population layout
    pub gene_count: usize,       // disks per individual (GENE_SIZE)
    pub population_size: usize,  // individuals per generation

    // reproduction
    pub tournament_size: usize,  // random draws per tournament
    pub elite_size: usize,       // slot stride for SlotReuse, copy count for CarryOver
    pub elitism: ElitismMode,
    pub mutation_rate: f64,      // per new individual, replaces one gene

    // termination
    pub convergence_threshold: f64,     // stop once 1 - best >= threshold
    pub max_generations: Option<u64>,   // extra cap, None = run until converged

    // evaluation
    pub anti_alias: bool,
    pub parallel_evaluation: bool,

    // None = seed from the OS (the chosen seed is logged)
    pub seed: Option<u64>,
}

impl Default for EvolveConfig {
    fn default() -> Self {
        Self {
            min_radius: 5,
            max_radius: 10,
            gene_count: 600,
            population_size: 75,
            tournament_size: 15,
            elite_size: 10,
            elitism: ElitismMode::SlotReuse,
            mutation_rate: 0.02,
            convergence_threshold: 0.95,
            max_generations: None,
            anti_alias: false, // the classic fill is aliased
            parallel_evaluation: true,
            seed: None,
        }
    }
}

impl EvolveConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        let counts = [
            ("gene_count", self.gene_count),
            ("population_size", self.population_size),
            ("tournament_size", self.tournament_size),
            ("elite_size", self.elite_size),
        ];
        for (name, value) in counts {
            if value == 0 {
                return Err(ConfigError::Zero { name });
            }
        }

        if self.max_generations == Some(0) {
            return Err(ConfigError::Zero { name: "max_generations" });
        }

        if self.min_radius <= 0 {
            return Err(ConfigError::NonPositiveRadius(self.min_radius));
        }
        if self.min_radius >= self.max_radius {
            return Err(ConfigError::EmptyRadiusRange { min: self.min_radius, max: self.max_radius });
        }

        let ratios = [
            ("mutation_rate", self.mutation_rate),
            ("convergence_threshold", self.convergence_threshold),
        ];
        for (name, value) in ratios {
            if !(0.0..=1.0).contains(&value) {
                return Err(ConfigError::OutOfUnitRange { name, value });
            }
        }

        if self.elitism == ElitismMode::CarryOver && self.elite_size >= self.population_size {
            return Err(ConfigError::TooManyElites {
                elite: self.elite_size,
                population: self.population_size,
            });
        }

        Ok(())
    }

    /// random-disk bounds for a target of the given size
    pub fn disk_bounds(&self, width: u32, height: u32) -> DiskBounds {
        DiskBounds {
            width,
            height,
            min_radius: self.min_radius,
            max_radius: self.max_radius,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        assert!(EvolveConfig::default().validate().is_ok());
    }

    #[test]
    fn test_zero_population_rejected() {
        let cfg = EvolveConfig { population_size: 0, ..Default::default() };
        assert!(matches!(cfg.validate(), Err(ConfigError::Zero { name: "population_size" })));
    }

    #[test]
    fn test_empty_radius_range_rejected() {
        let cfg = EvolveConfig { min_radius: 10, max_radius: 10, ..Default::default() };
        assert!(matches!(cfg.validate(), Err(ConfigError::EmptyRadiusRange { .. })));
        let cfg = EvolveConfig { min_radius: 0, ..Default::default() };
        assert!(matches!(cfg.validate(), Err(ConfigError::NonPositiveRadius(0))));
    }

    #[test]
    fn test_rates_must_be_ratios() {
        let cfg = EvolveConfig { mutation_rate: 1.5, ..Default::default() };
        assert!(matches!(cfg.validate(), Err(ConfigError::OutOfUnitRange { name: "mutation_rate", .. })));
        let cfg = EvolveConfig { convergence_threshold: -0.1, ..Default::default() };
        assert!(cfg.validate().is_err());
        let cfg = EvolveConfig { mutation_rate: f64::NAN, ..Default::default() };
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn test_zero_generation_cap_rejected() {
        let cfg = EvolveConfig { max_generations: Some(0), ..Default::default() };
        assert!(matches!(cfg.validate(), Err(ConfigError::Zero { name: "max_generations" })));
        let cfg = EvolveConfig { max_generations: Some(1), ..Default::default() };
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn test_carry_over_needs_room() {
        let cfg = EvolveConfig {
            elitism: ElitismMode::CarryOver,
            elite_size: 75,
            ..Default::default()
        };
        assert!(matches!(cfg.validate(), Err(ConfigError::TooManyElites { .. })));
        // slot reuse only uses elite_size as a stride
        let cfg = EvolveConfig { elite_size: 200, ..Default::default() };
        assert!(cfg.validate().is_ok());
    }
}
