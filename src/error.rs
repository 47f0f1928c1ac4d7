use std::path::PathBuf;

/// rejected parameter combinations, reported before any engine state exists
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{name} must be at least 1")]
    Zero { name: &'static str },

    #[error("target raster is {width}x{height}, both sides must be at least 1")]
    EmptyTarget { width: u32, height: u32 },

    #[error("min_radius must be positive, got {0}")]
    NonPositiveRadius(i32),

    #[error("radius range [{min}, {max}) is empty")]
    EmptyRadiusRange { min: i32, max: i32 },

    #[error("{name} must lie in [0, 1], got {value}")]
    OutOfUnitRange { name: &'static str, value: f64 },

    #[error("carrying over {elite} elites leaves no room for children in a population of {population}")]
    TooManyElites { elite: usize, population: usize },

    #[error("initial population has {actual} individuals, expected {expected}")]
    PopulationSize { expected: usize, actual: usize },

    #[error("individual {index} has {actual} genes, expected {expected}")]
    GeneCount { index: usize, expected: usize, actual: usize },
}

/// everything that can abort startup
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("failed to load target image {}: {source}", .path.display())]
    TargetLoad {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("target image {} has zero width or height", .0.display())]
    EmptyTarget(PathBuf),

    #[error("no target image selected")]
    NoTargetSelected,

    #[error("invalid configuration: {0}")]
    Config(#[from] ConfigError),

    #[error("settings io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("settings are not valid JSON: {0}")]
    SettingsParse(#[from] serde_json::Error),

    #[error("window error: {0}")]
    Gui(#[from] eframe::Error),
}
