use crate::errors::ArmError;

use rand::Rng;
use rand_distr::{Bernoulli, Distribution};

/// A reward source paying 1.0 with a fixed probability and 0.0 otherwise.
#[derive(Clone, Copy, Debug)]
pub struct BernoulliArm {
    mean: f64,
    distribution: Bernoulli,
}

impl BernoulliArm {
    pub fn new(mean: f64) -> Result<Self, ArmError> {
        let distribution = Bernoulli::new(mean).map_err(|_| ArmError::InvalidProbability(mean))?;
        Ok(Self { mean, distribution })
    }

    pub fn mean(&self) -> f64 {
        self.mean
    }

    pub fn draw<R: Rng + ?Sized>(&self, rng: &mut R) -> f64 {
        if self.distribution.sample(rng) {
            1.0
        } else {
            0.0
        }
    }
}

pub fn from_means(means: &[f64]) -> Result<Vec<BernoulliArm>, ArmError> {
    means.iter().map(|&mean| BernoulliArm::new(mean)).collect()
}

/// Index of the arm with the highest mean, lowest index on ties.
pub fn best_arm(arms: &[BernoulliArm]) -> Option<usize> {
    let (first, rest) = arms.split_first()?;
    let mut best_id = 0;
    let mut best_mean = first.mean;
    for (arm_id, arm) in rest.iter().enumerate() {
        if arm.mean > best_mean {
            best_id = arm_id + 1;
            best_mean = arm.mean;
        }
    }
    Some(best_id)
}
