mod error;

pub mod generate;
mod pheromone_graph;

pub use error::GraphError;
pub use pheromone_graph::{EdgeState, PheromoneGraph, INITIAL_PHEROMONE};

use std::fmt::{Debug, Display};
use std::hash::Hash;

pub type Edge<IndexType> = (IndexType, IndexType);

/// Everything a node id has to support to be used in a pheromone graph.
pub trait NodeId: Copy + Eq + Hash + Ord + Debug + Display + Send + Sync + 'static {}
impl<T> NodeId for T where T: Copy + Eq + Hash + Ord + Debug + Display + Send + Sync + 'static {}
