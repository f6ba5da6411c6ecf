use crate::errors::PersistenceError;

use serde::Serialize;
use std::io::Write;

/// One simulated decision. Runs and steps are 1-based.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct SimulationRecord {
    pub run: usize,
    pub step: usize,
    pub arm_id: usize,
    pub reward: f64,
    pub cumulative_reward: f64,
}

/// Destination for the record stream produced by the driver.
pub trait RecordSink {
    fn push(&mut self, record: SimulationRecord) -> Result<(), PersistenceError>;
}

impl RecordSink for Vec<SimulationRecord> {
    fn push(&mut self, record: SimulationRecord) -> Result<(), PersistenceError> {
        Vec::push(self, record);
        Ok(())
    }
}

impl<S: RecordSink + ?Sized> RecordSink for &mut S {
    fn push(&mut self, record: SimulationRecord) -> Result<(), PersistenceError> {
        (**self).push(record)
    }
}

impl<A: RecordSink, B: RecordSink> RecordSink for (A, B) {
    fn push(&mut self, record: SimulationRecord) -> Result<(), PersistenceError> {
        self.0.push(record)?;
        self.1.push(record)
    }
}

/// Writes records as headerless tab separated rows, prefixed by the epsilon
/// of the experiment that produced them:
/// `epsilon run step arm_id reward cumulative_reward`.
pub struct TsvWriter<W: Write> {
    writer: W,
    epsilon: f64,
}

impl<W: Write> TsvWriter<W> {
    pub fn new(writer: W, epsilon: f64) -> Self {
        Self { writer, epsilon }
    }

    pub fn flush(&mut self) -> Result<(), PersistenceError> {
        self.writer.flush()?;
        Ok(())
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> RecordSink for TsvWriter<W> {
    fn push(&mut self, record: SimulationRecord) -> Result<(), PersistenceError> {
        writeln!(
            self.writer,
            "{:?}\t{}\t{}\t{}\t{:?}\t{:?}",
            self.epsilon,
            record.run,
            record.step,
            record.arm_id,
            record.reward,
            record.cumulative_reward
        )?;
        Ok(())
    }
}
