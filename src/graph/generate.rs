mod erdos_renyi;
mod grid;

pub use erdos_renyi::ErdosRenyi;
pub use grid::Grid;

use crate::graph::{GraphError, PheromoneGraph};

/// A Generator for weighted graphs with consecutive `usize` node ids.
pub trait Generate {
    fn generate(&mut self) -> Result<PheromoneGraph<usize>, GraphError<usize>>;
}
