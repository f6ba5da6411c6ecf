use config::{Config, ConfigError, Environment, File, Source};
use serde::Deserialize;
use std::path::PathBuf;

#[derive(Debug, Deserialize)]
pub struct LoggingConfig {
    pub log_level: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct SimulationConfig {
    pub epsilons: Vec<f64>,
    pub means: Vec<f64>,
    #[serde(default)]
    pub shuffle_arms: bool,
    pub num_simulations: usize,
    pub horizon: usize,
    pub seed: Option<u64>,
}

#[derive(Debug, Deserialize)]
pub struct OutputConfig {
    pub records_path: PathBuf,
    pub summary_path: PathBuf,
}

#[derive(Debug, Deserialize)]
pub struct AppConfig {
    pub logging: LoggingConfig,
    pub simulation: SimulationConfig,
    pub output: OutputConfig,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_file_and_env(File::with_name("config"))
    }

    /// Layers `APP_` environment variables over `file`, nested keys split on `__`.
    fn from_file_and_env<S>(file: S) -> Result<Self, ConfigError>
    where
        S: Source + Send + Sync + 'static,
    {
        let builder = Config::builder()
            .add_source(file)
            .add_source(
                Environment::with_prefix("APP")
                    .prefix_separator("_")
                    .separator("__"),
            )
            .build()?;

        builder.try_deserialize()
    }
}
