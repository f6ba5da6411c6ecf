use super::record::{RecordSink, SimulationRecord};

use crate::arms::BernoulliArm;
use crate::errors::{PolicyError, SimulationError};
use crate::policies::Policy;

use rand::Rng;
use tracing::trace;

/// Repeated independent runs of a policy against a fixed set of arms.
pub struct Simulation<'a> {
    arms: &'a [BernoulliArm],
    num_simulations: usize,
    horizon: usize,
}

impl<'a> Simulation<'a> {
    pub fn new(arms: &'a [BernoulliArm], num_simulations: usize, horizon: usize) -> Self {
        Self {
            arms,
            num_simulations,
            horizon,
        }
    }

    pub fn num_records(&self) -> usize {
        self.num_simulations * self.horizon
    }

    /// Runs every simulation and collects the records in run then step order.
    pub fn run<P, R>(
        &self,
        policy: &mut P,
        rng: &mut R,
    ) -> Result<Vec<SimulationRecord>, SimulationError>
    where
        P: Policy + ?Sized,
        R: Rng + ?Sized,
    {
        let mut records = Vec::with_capacity(self.num_records());
        self.run_with_sink(policy, rng, &mut records)?;
        Ok(records)
    }

    /// Same as [`Simulation::run`], streaming each record into `sink` as soon
    /// as it is produced.
    ///
    /// The policy is re-initialized at the start of every run and updated
    /// after the step's record is emitted. Rewards are drawn from `rng`.
    pub fn run_with_sink<P, R, S>(
        &self,
        policy: &mut P,
        rng: &mut R,
        sink: &mut S,
    ) -> Result<(), SimulationError>
    where
        P: Policy + ?Sized,
        R: Rng + ?Sized,
        S: RecordSink + ?Sized,
    {
        for run in 1..=self.num_simulations {
            policy.initialize(self.arms.len());
            let mut cumulative_reward = 0.0;

            for step in 1..=self.horizon {
                let arm_id = policy.select_arm()?;
                let reward = self
                    .arms
                    .get(arm_id)
                    .ok_or(PolicyError::ArmNotFound(arm_id))?
                    .draw(rng);

                cumulative_reward = if step == 1 {
                    reward
                } else {
                    cumulative_reward + reward
                };

                sink.push(SimulationRecord {
                    run,
                    step,
                    arm_id,
                    reward,
                    cumulative_reward,
                })?;

                policy.update(arm_id, reward)?;
            }

            trace!(run, cumulative_reward, "Finished simulation run");
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::arms::{best_arm, from_means};
    use crate::policies::epsilon_greedy::EpsilonGreedy;
    use rand::{rngs::SmallRng, SeedableRng};

    const SEED: u64 = 1234;
    const MEANS: [f64; 5] = [0.1, 0.1, 0.1, 0.1, 0.9];

    fn simulate(epsilon: f64, num_simulations: usize, horizon: usize) -> Vec<SimulationRecord> {
        let arms = from_means(&MEANS).unwrap();
        let mut policy = EpsilonGreedy::new(epsilon, Some(SEED));
        let mut rng = SmallRng::seed_from_u64(SEED + 1);
        Simulation::new(&arms, num_simulations, horizon)
            .run(&mut policy, &mut rng)
            .unwrap()
    }

    #[test]
    fn record_count() {
        for (num_simulations, horizon) in [(1, 1), (3, 7), (10, 25)] {
            let records = simulate(0.1, num_simulations, horizon);
            assert_eq!(records.len(), num_simulations * horizon);
        }
        assert!(simulate(0.1, 0, 10).is_empty());
        assert!(simulate(0.1, 10, 0).is_empty());
    }

    #[test]
    fn records_are_ordered() {
        let horizon = 20;
        let records = simulate(0.2, 5, horizon);
        for (i, record) in records.iter().enumerate() {
            assert_eq!(record.run, i / horizon + 1);
            assert_eq!(record.step, i % horizon + 1);
            assert!(record.arm_id < MEANS.len());
            assert!(record.reward == 0.0 || record.reward == 1.0);
        }
    }

    #[test]
    fn cumulative_reward_per_run() {
        let records = simulate(0.3, 20, 30);
        for run in records.chunks(30) {
            let mut total = 0.0;
            for record in run {
                total += record.reward;
                assert_eq!(record.cumulative_reward, total);
            }
            assert_eq!(run[0].cumulative_reward, run[0].reward);
        }
    }

    #[test]
    fn policy_sees_every_step_of_last_run() {
        let arms = from_means(&MEANS).unwrap();
        let mut policy = EpsilonGreedy::new(0.1, Some(SEED));
        let mut rng = SmallRng::seed_from_u64(SEED);
        let records = Simulation::new(&arms, 4, 50)
            .run(&mut policy, &mut rng)
            .unwrap();

        let stats = policy.stats();
        assert_eq!(stats.total_pulls(), 50);

        let last_run = &records[150..];
        for (arm_id, arm) in stats.arms.iter().enumerate() {
            let rewards: Vec<f64> = last_run
                .iter()
                .filter(|record| record.arm_id == arm_id)
                .map(|record| record.reward)
                .collect();
            assert_eq!(arm.pulls, rewards.len() as u64);
            if !rewards.is_empty() {
                let mean = rewards.iter().sum::<f64>() / rewards.len() as f64;
                assert!((arm.mean_reward - mean).abs() < 1e-9);
            }
        }
    }

    #[test]
    fn boxed_policy() {
        let arms = from_means(&MEANS).unwrap();
        let mut policy: Box<dyn Policy + Send> = Box::new(EpsilonGreedy::new(0.1, Some(SEED)));
        let mut rng = SmallRng::seed_from_u64(SEED);
        let records = Simulation::new(&arms, 2, 10)
            .run(policy.as_mut(), &mut rng)
            .unwrap();
        assert_eq!(records.len(), 20);
    }

    #[test]
    fn seeded_runs_are_reproducible() {
        assert_eq!(simulate(0.1, 5, 40), simulate(0.1, 5, 40));
    }

    #[test]
    fn learns_best_arm() {
        let (num_simulations, horizon) = (1000, 100);
        let records = simulate(0.1, num_simulations, horizon);
        let arms = from_means(&MEANS).unwrap();
        let best = best_arm(&arms).unwrap();

        let rate_at = |step: usize| {
            records
                .iter()
                .filter(|record| record.step == step && record.arm_id == best)
                .count() as f64
                / num_simulations as f64
        };

        assert!(rate_at(horizon) > rate_at(1));
        assert!(rate_at(horizon) > 0.5);
    }
}
