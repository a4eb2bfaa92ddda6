pub mod aco;
mod solution;
mod supervisor;

pub use aco::{Aco, AcoError, IterationReport, Params, RunState, RunSummary, StopHandle};
pub use solution::Solution;
pub use supervisor::{IterationInfo, Supervisor, SupervisorError};

use crate::graph::NodeId;

use std::collections::BTreeSet;

/// Where to go: a start node and the set of nodes that end a walk.
#[derive(Debug, Clone, PartialEq)]
pub struct ProblemInstance<IndexType> {
    pub start: IndexType,
    pub targets: BTreeSet<IndexType>,
}

impl<IndexType: NodeId> ProblemInstance<IndexType> {
    pub fn new(start: IndexType, targets: impl IntoIterator<Item = IndexType>) -> Self {
        ProblemInstance {
            start,
            targets: targets.into_iter().collect(),
        }
    }
}
