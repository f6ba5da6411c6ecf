use super::policy::{ArmStats, Policy, PolicyStats, PolicyType};
use super::rng::MaybeSeededRng;

use crate::errors::PolicyError;

use rand::Rng;
use serde::{Deserialize, Serialize};

/// Folds the `count`-th observation into a running mean.
///
/// The two weighted terms are computed separately and summed so results
/// match the textbook form bit for bit.
pub fn incremental_mean(mean: f64, observation: f64, count: u64) -> f64 {
    assert!(count > 0, "incremental mean needs a positive count");
    let n = count as f64;
    ((n - 1.0) / n) * mean + (1.0 / n) * observation
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
struct EpsilonGreedyArm {
    pulls: u64,
    value: f64,
}

impl EpsilonGreedyArm {
    fn update(&mut self, reward: f64) {
        self.pulls += 1;
        self.value = incremental_mean(self.value, reward, self.pulls);
    }

    fn stats(&self) -> ArmStats {
        ArmStats {
            pulls: self.pulls,
            mean_reward: self.value,
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct EpsilonGreedy {
    epsilon: f64,
    arms: Vec<EpsilonGreedyArm>,
    rng: MaybeSeededRng,
}

impl EpsilonGreedy {
    pub fn new(epsilon: f64, seed: Option<u64>) -> Self {
        Self {
            epsilon,
            arms: Vec::new(),
            rng: MaybeSeededRng::new(seed),
        }
    }

    // first maximum wins ties
    fn best_arm(&self) -> Option<usize> {
        let (first, rest) = self.arms.split_first()?;
        let mut best_id = 0;
        let mut best_value = first.value;
        for (arm_id, arm) in rest.iter().enumerate() {
            if arm.value > best_value {
                best_id = arm_id + 1;
                best_value = arm.value;
            }
        }
        Some(best_id)
    }
}

#[typetag::serde]
impl Policy for EpsilonGreedy {
    fn initialize(&mut self, n_arms: usize) {
        self.arms = vec![EpsilonGreedyArm::default(); n_arms];
    }

    fn select_arm(&mut self) -> Result<usize, PolicyError> {
        if self.arms.is_empty() {
            return Err(PolicyError::NoArmsAvailable);
        }

        if self.rng.get_rng().random::<f64>() > self.epsilon {
            self.best_arm().ok_or(PolicyError::NoArmsAvailable)
        } else {
            // exploration may land on the incumbent as well
            Ok(self.rng.get_rng().random_range(0..self.arms.len()))
        }
    }

    fn update(&mut self, arm_id: usize, reward: f64) -> Result<(), PolicyError> {
        self.arms
            .get_mut(arm_id)
            .map(|arm| arm.update(reward))
            .ok_or(PolicyError::ArmNotFound(arm_id))
    }

    fn stats(&self) -> PolicyStats {
        PolicyStats {
            arms: self.arms.iter().map(EpsilonGreedyArm::stats).collect(),
        }
    }

    fn policy_type(&self) -> PolicyType {
        PolicyType::EpsilonGreedy {
            epsilon: self.epsilon,
            seed: self.rng.seed(),
        }
    }
}
