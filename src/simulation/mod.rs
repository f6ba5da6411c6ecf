pub mod analysis;
mod driver;
mod record;

pub use analysis::{OptimalArmTracker, StepSummary};
pub use driver::Simulation;
pub use record::{RecordSink, SimulationRecord, TsvWriter};
