use bandit_sim::{
    config::AppConfig,
    errors::{AppError, PersistenceError},
    experiment::{prepare_arms, run_sweep, ExperimentSummary},
};

use std::{
    fs::File,
    io::{BufWriter, Write},
    path::Path,
};
use tracing::info;
use tracing_subscriber::EnvFilter;

fn write_summaries(path: &Path, summaries: &[ExperimentSummary]) -> Result<(), PersistenceError> {
    let mut writer = BufWriter::new(File::create(path)?);
    serde_json::to_writer_pretty(&mut writer, summaries)?;
    writer.flush()?;
    Ok(())
}

fn main() -> Result<(), AppError> {
    let config = AppConfig::from_env()?;
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&config.logging.log_level)),
        )
        .init();

    let arms = prepare_arms(&config.simulation)?;
    info!(
        means = ?arms.iter().map(|arm| arm.mean()).collect::<Vec<_>>(),
        num_simulations = config.simulation.num_simulations,
        horizon = config.simulation.horizon,
        "Prepared arms"
    );

    let file = File::create(&config.output.records_path).map_err(PersistenceError::from)?;
    let mut records = BufWriter::new(file);
    let summaries = run_sweep(&config.simulation, &arms, &mut records)?;
    records.flush().map_err(PersistenceError::from)?;
    info!(path = ?config.output.records_path, "Wrote simulation records");

    write_summaries(&config.output.summary_path, &summaries)?;
    info!(path = ?config.output.summary_path, "Wrote experiment summaries");

    for summary in &summaries {
        info!(
            epsilon = summary.epsilon,
            best_arm = summary.best_arm,
            optimal_rate = ?summary.final_optimal_rate(),
            "Mean rate of choosing the best arm at the last step"
        );
    }

    Ok(())
}
