use super::record::{RecordSink, SimulationRecord};

use crate::errors::PersistenceError;

use serde::Serialize;

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct StepSummary {
    pub step: usize,
    pub optimal_rate: f64,
    pub mean_cumulative_reward: f64,
}

#[derive(Clone, Debug, Default)]
struct StepCounts {
    runs: u64,
    optimal: u64,
    cumulative_reward: f64,
}

/// Aggregates, per time step and across runs, how often the best arm was
/// chosen and the average cumulative reward.
#[derive(Clone, Debug)]
pub struct OptimalArmTracker {
    best_arm: usize,
    steps: Vec<StepCounts>,
}

impl OptimalArmTracker {
    pub fn new(best_arm: usize, horizon: usize) -> Self {
        Self {
            best_arm,
            steps: vec![StepCounts::default(); horizon],
        }
    }

    pub fn best_arm(&self) -> usize {
        self.best_arm
    }

    pub fn summarize(&self) -> Vec<StepSummary> {
        self.steps
            .iter()
            .enumerate()
            .filter(|(_, counts)| counts.runs > 0)
            .map(|(i, counts)| {
                let runs = counts.runs as f64;
                StepSummary {
                    step: i + 1,
                    optimal_rate: counts.optimal as f64 / runs,
                    mean_cumulative_reward: counts.cumulative_reward / runs,
                }
            })
            .collect()
    }
}

impl RecordSink for OptimalArmTracker {
    fn push(&mut self, record: SimulationRecord) -> Result<(), PersistenceError> {
        assert!(record.step > 0, "time steps are 1-based, got step 0");
        if self.steps.len() < record.step {
            self.steps.resize(record.step, StepCounts::default());
        }

        let counts = &mut self.steps[record.step - 1];
        counts.runs += 1;
        counts.optimal += u64::from(record.arm_id == self.best_arm);
        counts.cumulative_reward += record.cumulative_reward;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(run: usize, step: usize, arm_id: usize, cumulative_reward: f64) -> SimulationRecord {
        SimulationRecord {
            run,
            step,
            arm_id,
            reward: 0.0,
            cumulative_reward,
        }
    }

    #[test]
    fn rates_per_step() {
        let mut tracker = OptimalArmTracker::new(2, 2);
        for record in [
            record(1, 1, 2, 1.0),
            record(1, 2, 0, 1.0),
            record(2, 1, 0, 0.0),
            record(2, 2, 2, 1.0),
            record(3, 1, 2, 1.0),
            record(3, 2, 2, 2.0),
            record(4, 1, 1, 0.0),
            record(4, 2, 2, 0.0),
        ] {
            tracker.push(record).unwrap();
        }

        let summary = tracker.summarize();
        assert_eq!(summary.len(), 2);
        assert_eq!(summary[0].step, 1);
        assert_eq!(summary[0].optimal_rate, 0.5);
        assert_eq!(summary[0].mean_cumulative_reward, 0.5);
        assert_eq!(summary[1].optimal_rate, 0.75);
        assert_eq!(summary[1].mean_cumulative_reward, 1.0);
    }

    #[test]
    fn empty() {
        let tracker = OptimalArmTracker::new(0, 10);
        assert!(tracker.summarize().is_empty());
    }

    #[test]
    #[should_panic(expected = "time steps are 1-based")]
    fn rejects_step_zero() {
        let mut tracker = OptimalArmTracker::new(0, 5);
        let _ = tracker.push(record(1, 0, 0, 0.0));
    }

    #[test]
    fn grows_past_horizon() {
        let mut tracker = OptimalArmTracker::new(0, 0);
        tracker.push(record(1, 3, 0, 1.0)).unwrap();
        let summary = tracker.summarize();
        assert_eq!(summary.len(), 1);
        assert_eq!(summary[0].step, 3);
    }
}
