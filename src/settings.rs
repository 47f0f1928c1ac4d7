//! application settings for disk-evolve
//! loaded once at startup from settings.json; missing keys fall back to defaults
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::AppError;
use crate::evolve_config::{ElitismMode, EvolveConfig};

pub const SETTINGS_FILE: &str = "settings.json";

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppSettings {
    // disk shape
    /// smallest disk radius in pixels (inclusive)
    pub min_radius: i32,
    /// largest disk radius in pixels (exclusive)
    pub max_radius: i32,

    // population layout
    /// disks per individual
    pub gene_count: usize,
    pub population_size: usize,

    // reproduction
    pub tournament_size: usize,
    /// slot stride (SlotReuse) or number of individuals copied unchanged (CarryOver)
    pub elite_size: usize,
    pub elitism: ElitismMode,
    /// chance that a new individual gets one gene replaced
    pub mutation_rate: f64,

    // termination
    /// stop once the best individual matches the target this well (0.95 = 95%)
    pub convergence_threshold: f64,
    pub max_generations: Option<u64>,

    // evaluation / rendering
    pub anti_alias: bool,
    pub parallel_evaluation: bool,
    /// fixed seed for reproducible runs, null = random
    pub seed: Option<u64>,

    // ui
    /// start evolving as soon as the window opens
    pub autostart: bool,
}

impl Default for AppSettings {
    fn default() -> Self {
        let cfg = EvolveConfig::default();
        Self {
            min_radius: cfg.min_radius,
            max_radius: cfg.max_radius,
            gene_count: cfg.gene_count,
            population_size: cfg.population_size,
            tournament_size: cfg.tournament_size,
            elite_size: cfg.elite_size,
            elitism: cfg.elitism,
            mutation_rate: cfg.mutation_rate,
            convergence_threshold: cfg.convergence_threshold,
            max_generations: cfg.max_generations,
            anti_alias: cfg.anti_alias,
            parallel_evaluation: cfg.parallel_evaluation,
            seed: cfg.seed,
            autostart: true,
        }
    }
}

impl AppSettings {
    /// save settings to JSON file
    pub fn save(&self) -> Result<(), AppError> {
        self.save_to(Path::new(SETTINGS_FILE))
    }

    pub fn save_to(&self, path: &Path) -> Result<(), AppError> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }

    /// load settings from JSON file, or return defaults if file doesn't exist
    pub fn load() -> Self {
        Self::load_from(Path::new(SETTINGS_FILE))
    }

    pub fn load_from(path: &Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(json) => match serde_json::from_str(&json) {
                Ok(settings) => settings,
                Err(e) => {
                    log::warn!("failed to parse {}: {}. using defaults.", path.display(), e);
                    Self::default()
                }
            },
            // file doesn't exist or can't be read - use defaults
            Err(_) => Self::default(),
        }
    }

    /// convert to EvolveConfig for the evolution engine
    pub fn to_evolve_config(&self) -> EvolveConfig {
        EvolveConfig {
            min_radius: self.min_radius,
            max_radius: self.max_radius,
            gene_count: self.gene_count,
            population_size: self.population_size,
            tournament_size: self.tournament_size,
            elite_size: self.elite_size,
            elitism: self.elitism,
            mutation_rate: self.mutation_rate,
            convergence_threshold: self.convergence_threshold,
            max_generations: self.max_generations,
            anti_alias: self.anti_alias,
            parallel_evaluation: self.parallel_evaluation,
            seed: self.seed,
        }
    }
}
