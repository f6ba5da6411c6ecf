use thiserror::Error;

#[derive(Debug, Error)]
pub enum PolicyError {
    #[error("No arms to select from")]
    NoArmsAvailable,
    #[error("Arm {0} not found")]
    ArmNotFound(usize),
}

#[derive(Debug, Error)]
pub enum ArmError {
    #[error("Mean reward {0} is not a probability")]
    InvalidProbability(f64),
}

#[derive(Debug, Error)]
pub enum PersistenceError {
    #[error("I/O error while writing results: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to serialize results to JSON: {0}")]
    Serialization(#[from] serde_json::Error),
}

#[derive(Debug, Error)]
pub enum SimulationError {
    #[error(transparent)]
    Policy(#[from] PolicyError),
    #[error(transparent)]
    Persistence(#[from] PersistenceError),
}

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Invalid configuration: {0}")]
    Config(#[from] config::ConfigError),
    #[error(transparent)]
    Arm(#[from] ArmError),
    #[error(transparent)]
    Simulation(#[from] SimulationError),
    #[error(transparent)]
    Persistence(#[from] PersistenceError),
}
