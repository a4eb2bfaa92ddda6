use serde::{Deserialize, Serialize};

use crate::experiment_config::ExperimentConfigError;
use crate::graph::PheromoneGraph;

/// A graph given inline as `(from, to, weight)` triples.
/// Nodes without any edge can be listed separately.
#[derive(Clone, Deserialize, Serialize, Debug, PartialEq)]
pub struct EdgeList {
    #[serde(default)]
    pub nodes: Vec<usize>,
    pub edges: Vec<(usize, usize, f64)>,
}

impl EdgeList {
    pub fn build(&self) -> Result<PheromoneGraph<usize>, ExperimentConfigError> {
        let invalid = |err: crate::graph::GraphError<usize>| {
            ExperimentConfigError::InvalidGraphConfig(err.to_string())
        };

        let mut graph = PheromoneGraph::from_edge_list(&self.edges).map_err(invalid)?;
        for &id in &self.nodes {
            if !graph.has_node(id) {
                graph.add_node(id).map_err(invalid)?;
            }
        }

        Ok(graph)
    }
}
