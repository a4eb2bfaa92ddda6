use serde::{Deserialize, Serialize};

use crate::metaheuristic::ProblemInstance;

/// Start node and target nodes of an experiment.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct RouteConfig {
    pub start: usize,
    pub targets: Vec<usize>,
}

impl RouteConfig {
    pub fn problem(&self) -> ProblemInstance<usize> {
        ProblemInstance::new(self.start, self.targets.iter().copied())
    }
}
