use crate::metaheuristic::aco::IterationReport;
use crate::metaheuristic::supervisor::{IterationInfo, Supervisor, SupervisorError};

use csv::Writer;
use serde::Serialize;
use std::io::{stderr, Stderr, Write};

/// Writes aggregated iteration statistics as CSV.
/// One row covers `aggregation_rate` consecutive iterations.
pub struct CsvSupervisor<W: Write> {
    aggregation_rate: usize,
    pending: Option<IterationInfo>,
    count: usize,
    writer: Writer<W>,
}

#[derive(Serialize)]
struct Row {
    iteration: usize,
    completed_ants: usize,
    dead_ends: usize,
    improvements: usize,
    cpu_time_us: u64,
    iteration_best_length: Option<f64>,
    best_length: Option<f64>,
}

impl From<IterationInfo> for Row {
    fn from(info: IterationInfo) -> Self {
        Row {
            iteration: info.iteration,
            completed_ants: info.completed_ants,
            dead_ends: info.dead_ends,
            improvements: info.improvements,
            cpu_time_us: info.cpu_time.as_micros() as u64,
            iteration_best_length: info.iteration_best_length,
            best_length: info.best_length,
        }
    }
}

impl<W: Write> CsvSupervisor<W> {
    /// An aggregation rate of 0 is treated as 1.
    pub fn new(aggregation_rate: usize, writer: Writer<W>) -> Self {
        CsvSupervisor {
            aggregation_rate: aggregation_rate.max(1),
            pending: None,
            count: 0,
            writer,
        }
    }

    pub fn from_writer(aggregation_rate: usize, writer: W) -> Self {
        CsvSupervisor::new(aggregation_rate, Writer::from_writer(writer))
    }

    fn write_pending(&mut self) -> Result<(), SupervisorError> {
        if let Some(info) = self.pending.take() {
            self.writer.serialize(Row::from(info))?;
        }
        self.count = 0;
        Ok(())
    }

    /// Flushes buffered rows and hands back the underlying writer.
    pub fn into_writer(mut self) -> Result<W, SupervisorError> {
        self.write_pending()?;
        self.writer
            .into_inner()
            .map_err(|err| SupervisorError::Io(err.into_error()))
    }
}

impl<IndexType: PartialEq + Copy, W: Write> Supervisor<IndexType> for CsvSupervisor<W> {
    fn iteration_complete(&mut self, report: &IterationReport<IndexType>) -> Result<(), SupervisorError> {
        let info = report.info();
        match self.pending.as_mut() {
            Some(pending) => *pending += info,
            None => self.pending = Some(info),
        }
        self.count += 1;

        if self.count >= self.aggregation_rate {
            self.write_pending()?;
        }
        Ok(())
    }

    fn finish(&mut self) -> Result<(), SupervisorError> {
        self.write_pending()?;
        self.writer.flush()?;
        Ok(())
    }
}

impl Default for CsvSupervisor<Stderr> {
    fn default() -> Self {
        CsvSupervisor::from_writer(1, stderr())
    }
}
