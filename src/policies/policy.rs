use super::epsilon_greedy::EpsilonGreedy;

use crate::errors::PolicyError;

use serde::Serialize;

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ArmStats {
    pub pulls: u64,
    pub mean_reward: f64,
}

#[derive(Clone, Debug, Serialize)]
pub struct PolicyStats {
    pub arms: Vec<ArmStats>,
}

impl PolicyStats {
    pub fn total_pulls(&self) -> u64 {
        self.arms.iter().map(|arm| arm.pulls).sum()
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum PolicyType {
    EpsilonGreedy { epsilon: f64, seed: Option<u64> },
}

impl PolicyType {
    pub fn into_inner(self) -> Box<dyn Policy + Send> {
        match self {
            PolicyType::EpsilonGreedy { epsilon, seed } => {
                Box::new(EpsilonGreedy::new(epsilon, seed))
            }
        }
    }
}

/// What the simulation driver needs from a bandit strategy.
///
/// A policy must be initialized with the number of arms before the first
/// selection, and again at the start of every independent run.
#[typetag::serde(tag = "type")]
pub trait Policy: Send {
    fn initialize(&mut self, n_arms: usize);
    fn select_arm(&mut self) -> Result<usize, PolicyError>;
    fn update(&mut self, arm_id: usize, reward: f64) -> Result<(), PolicyError>;
    fn stats(&self) -> PolicyStats;
    fn policy_type(&self) -> PolicyType;
}

