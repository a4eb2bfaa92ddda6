use crate::metaheuristic::aco::IterationReport;

use std::ops::{Add, AddAssign};
use std::time::Duration;
use thiserror::Error;

/// Observer of a running optimization. Receives every iteration report in order.
///
/// Any closure taking a report is a supervisor, which is handy for ad-hoc
/// inspection and for stopping a run from the inside via a [`StopHandle`].
///
/// [`StopHandle`]: crate::metaheuristic::aco::StopHandle
pub trait Supervisor<IndexType> {
    fn iteration_complete(&mut self, report: &IterationReport<IndexType>) -> Result<(), SupervisorError>;

    /// Called once after the last iteration of a run.
    fn finish(&mut self) -> Result<(), SupervisorError> {
        Ok(())
    }
}

impl<IndexType, F> Supervisor<IndexType> for F
where
    F: FnMut(&IterationReport<IndexType>),
{
    fn iteration_complete(&mut self, report: &IterationReport<IndexType>) -> Result<(), SupervisorError> {
        self(report);
        Ok(())
    }
}

#[derive(Error, Debug)]
pub enum SupervisorError {
    #[error("could not write statistics: {0}")]
    Csv(#[from] csv::Error),
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Statistics of one or more consecutive iterations.
#[derive(Default, Debug, Clone, Copy, PartialEq)]
pub struct IterationInfo {
    /// Last iteration covered.
    pub iteration: usize,
    pub completed_ants: usize,
    pub dead_ends: usize,
    pub improvements: usize,
    pub cpu_time: Duration,
    /// Shortest path found within the covered iterations.
    pub iteration_best_length: Option<f64>,
    /// Global best at the end of the covered iterations.
    pub best_length: Option<f64>,
}

impl IterationInfo {
    pub fn new(
        iteration: usize,
        completed_ants: usize,
        dead_ends: usize,
        improvements: usize,
        cpu_time: Duration,
        iteration_best_length: Option<f64>,
        best_length: Option<f64>,
    ) -> Self {
        Self {
            iteration,
            completed_ants,
            dead_ends,
            improvements,
            cpu_time,
            iteration_best_length,
            best_length,
        }
    }
}

fn shorter(a: Option<f64>, b: Option<f64>) -> Option<f64> {
    match (a, b) {
        (Some(a), Some(b)) => Some(a.min(b)),
        (a, None) => a,
        (None, b) => b,
    }
}

impl Add for IterationInfo {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self {
            iteration: other.iteration,
            completed_ants: self.completed_ants + other.completed_ants,
            dead_ends: self.dead_ends + other.dead_ends,
            improvements: self.improvements + other.improvements,
            cpu_time: self.cpu_time + other.cpu_time,
            iteration_best_length: shorter(self.iteration_best_length, other.iteration_best_length),
            best_length: other.best_length.or(self.best_length),
        }
    }
}

impl AddAssign for IterationInfo {
    fn add_assign(&mut self, other: Self) {
        *self = *self + other;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn adding_keeps_latest_iteration_and_shortest_length() {
        let first = IterationInfo::new(1, 3, 2, 1, Duration::from_micros(10), Some(5.0), Some(5.0));
        let second = IterationInfo::new(2, 4, 1, 1, Duration::from_micros(5), Some(4.0), Some(4.0));
        let third = IterationInfo::new(3, 0, 5, 0, Duration::from_micros(1), None, Some(4.0));

        let mut sum = first;
        sum += second;
        sum += third;

        assert_eq!(sum.iteration, 3);
        assert_eq!(sum.completed_ants, 7);
        assert_eq!(sum.dead_ends, 8);
        assert_eq!(sum.improvements, 2);
        assert_eq!(sum.cpu_time, Duration::from_micros(16));
        assert_eq!(sum.iteration_best_length, Some(4.0));
        assert_eq!(sum.best_length, Some(4.0));
    }

    #[test]
    fn default_is_neutral() {
        let info = IterationInfo::new(7, 1, 1, 0, Duration::from_micros(3), Some(2.0), Some(2.0));

        assert_eq!(IterationInfo::default() + info, info);
    }
}
