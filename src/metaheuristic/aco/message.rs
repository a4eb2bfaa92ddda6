use crate::metaheuristic::supervisor::IterationInfo;
use crate::metaheuristic::Solution;

use std::time::Duration;

/// Everything a supervisor gets to see after one iteration.
#[derive(Debug, Clone, PartialEq)]
pub struct IterationReport<IndexType> {
    /// 1-based index of the finished iteration.
    pub iteration: usize,
    /// The paths of all ants, in ant order. Dead ends included.
    pub solutions: Vec<Solution<IndexType>>,
    /// Global best after this iteration.
    pub best: Option<Solution<IndexType>>,
    /// True if this iteration replaced the global best.
    pub improved: bool,
    /// Time spent constructing paths.
    pub cpu_time: Duration,
}

impl<IndexType: PartialEq + Copy> IterationReport<IndexType> {
    pub fn best_length(&self) -> f64 {
        self.best.as_ref().map_or(f64::INFINITY, Solution::length)
    }

    pub fn completed(&self) -> usize {
        self.solutions.iter().filter(|s| s.is_complete()).count()
    }

    pub fn dead_ends(&self) -> usize {
        self.solutions.len() - self.completed()
    }

    /// Shortest completed path of this iteration. Ties go to the earlier ant.
    pub fn iteration_best(&self) -> Option<&Solution<IndexType>> {
        iteration_best(&self.solutions)
    }

    pub fn info(&self) -> IterationInfo {
        IterationInfo::new(
            self.iteration,
            self.completed(),
            self.dead_ends(),
            self.improved as usize,
            self.cpu_time,
            self.iteration_best().map(Solution::length),
            self.best.as_ref().map(Solution::length),
        )
    }
}

pub(super) fn iteration_best<IndexType: PartialEq + Copy>(
    solutions: &[Solution<IndexType>],
) -> Option<&Solution<IndexType>> {
    solutions
        .iter()
        .filter(|s| s.is_complete())
        .fold(None, |best: Option<&Solution<IndexType>>, s| match best {
            Some(b) if b.length() <= s.length() => Some(b),
            _ => Some(s),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn report() -> IterationReport<usize> {
        IterationReport {
            iteration: 2,
            solutions: vec![
                Solution::from_nodes(vec![1, 3], 5.0),
                Solution::dead_end(vec![1, 4]),
                Solution::from_nodes(vec![1, 2, 3], 4.0),
                Solution::from_nodes(vec![1, 5, 3], 4.0),
            ],
            best: Some(Solution::from_nodes(vec![1, 2, 3], 4.0)),
            improved: true,
            cpu_time: Duration::from_micros(12),
        }
    }

    #[test]
    fn counts_completed_and_dead_ends() {
        let report = report();

        assert_eq!(report.completed(), 3);
        assert_eq!(report.dead_ends(), 1);
    }

    #[test]
    fn iteration_best_prefers_earlier_ant_on_tie() {
        let report = report();

        assert_eq!(report.iteration_best().unwrap().nodes(), &[1, 2, 3]);
    }

    #[test]
    fn missing_best_has_infinite_length() {
        let mut report = report();
        report.best = None;

        assert_eq!(report.best_length(), f64::INFINITY);
        assert_eq!(report.info().best_length, None);
    }

    #[test]
    fn only_dead_ends_have_no_iteration_best() {
        let solutions = vec![Solution::dead_end(vec![1]), Solution::dead_end(vec![1, 2])];

        assert_eq!(iteration_best(&solutions), None);
    }

    #[test]
    fn info_summarizes_report() {
        let info = report().info();

        assert_eq!(info.iteration, 2);
        assert_eq!(info.completed_ants, 3);
        assert_eq!(info.dead_ends, 1);
        assert_eq!(info.improvements, 1);
        assert_eq!(info.iteration_best_length, Some(4.0));
        assert_eq!(info.best_length, Some(4.0));
    }
}
