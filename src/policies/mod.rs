pub mod epsilon_greedy;
mod policy;
mod rng;

pub use policy::{ArmStats, Policy, PolicyStats, PolicyType};
pub use rng::{derive_seed, MaybeSeededRng};
