use crate::arms::{self, BernoulliArm};
use crate::config::SimulationConfig;
use crate::errors::{ArmError, SimulationError};
use crate::policies::{derive_seed, MaybeSeededRng, Policy, PolicyType};
use crate::simulation::{OptimalArmTracker, Simulation, StepSummary, TsvWriter};

use rand::seq::SliceRandom;
use serde::Serialize;
use std::io::Write;
use tracing::info;
use uuid::Uuid;

const SHUFFLE_STREAM: u64 = 0;

#[derive(Serialize)]
pub struct ExperimentSummary {
    pub id: Uuid,
    pub epsilon: f64,
    pub means: Vec<f64>,
    pub best_arm: usize,
    pub num_simulations: usize,
    pub horizon: usize,
    pub steps: Vec<StepSummary>,
    pub final_policy: Box<dyn Policy + Send>,
}

impl ExperimentSummary {
    pub fn final_optimal_rate(&self) -> Option<f64> {
        self.steps.last().map(|step| step.optimal_rate)
    }
}

/// Builds the arms from the configured means, shuffled once if asked to.
pub fn prepare_arms(config: &SimulationConfig) -> Result<Vec<BernoulliArm>, ArmError> {
    let mut means = config.means.clone();
    if config.shuffle_arms {
        let mut rng = MaybeSeededRng::new(derive_seed(config.seed, SHUFFLE_STREAM));
        means.shuffle(rng.get_rng());
    }
    arms::from_means(&means)
}

/// Runs one experiment per configured epsilon against the same arms, writing
/// every record to `records` and returning the per-experiment summaries.
pub fn run_sweep<W: Write>(
    config: &SimulationConfig,
    arms: &[BernoulliArm],
    records: &mut W,
) -> Result<Vec<ExperimentSummary>, SimulationError> {
    let Some(best_arm) = arms::best_arm(arms) else {
        return Ok(Vec::new());
    };
    let simulation = Simulation::new(arms, config.num_simulations, config.horizon);

    config
        .epsilons
        .iter()
        .enumerate()
        .map(|(i, &epsilon)| -> Result<ExperimentSummary, SimulationError> {
            let id = Uuid::new_v4();
            let stream = 2 * i as u64 + 1;
            let mut policy = PolicyType::EpsilonGreedy {
                epsilon,
                seed: derive_seed(config.seed, stream),
            }
            .into_inner();
            info!(id = %id, policy = ?policy.policy_type(), best_arm, "Starting experiment");
            let mut rng = MaybeSeededRng::new(derive_seed(config.seed, stream + 1));
            let mut sink = (
                TsvWriter::new(&mut *records, epsilon),
                OptimalArmTracker::new(best_arm, config.horizon),
            );

            simulation.run_with_sink(policy.as_mut(), rng.get_rng(), &mut sink)?;
            let (mut writer, tracker) = sink;
            writer.flush()?;

            let summary = ExperimentSummary {
                id,
                epsilon,
                means: arms.iter().map(BernoulliArm::mean).collect(),
                best_arm: tracker.best_arm(),
                num_simulations: config.num_simulations,
                horizon: config.horizon,
                steps: tracker.summarize(),
                final_policy: policy,
            };
            info!(
                id = %id,
                epsilon,
                optimal_rate = ?summary.final_optimal_rate(),
                "Finished experiment"
            );
            Ok(summary)
        })
        .collect()
}
