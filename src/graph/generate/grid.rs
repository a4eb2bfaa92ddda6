use super::Generate;
use crate::graph::{GraphError, PheromoneGraph};

/// Triangular grid: every node is connected to its right, lower and lower right neighbor.
/// Node `(i, j)` gets the id `i * size.1 + j`.
pub struct Grid<'a> {
    size: (usize, usize),
    ew_generator: &'a mut dyn FnMut() -> f64,
}

impl<'a> Grid<'a> {
    pub fn new(size: (usize, usize), ew_generator: &'a mut dyn FnMut() -> f64) -> Grid<'a> {
        Grid { size, ew_generator }
    }

    fn id(&self, i: usize, j: usize) -> usize {
        i * self.size.1 + j
    }
}

impl<'a> Generate for Grid<'a> {
    fn generate(&mut self) -> Result<PheromoneGraph<usize>, GraphError<usize>> {
        let (rows, cols) = self.size;
        let mut graph = PheromoneGraph::with_size(rows * cols);
        for id in 0..rows * cols {
            graph.add_node(id)?;
        }

        for i in 0..rows {
            for j in 0..cols {
                let from = self.id(i, j);
                // right neighbor
                if j + 1 < cols {
                    graph.add_edge((from, self.id(i, j + 1)), (self.ew_generator)())?;
                }
                // below neighbor
                if i + 1 < rows {
                    graph.add_edge((from, self.id(i + 1, j)), (self.ew_generator)())?;
                }
                // right below neighbor
                if i + 1 < rows && j + 1 < cols {
                    graph.add_edge((from, self.id(i + 1, j + 1)), (self.ew_generator)())?;
                }
            }
        }

        Ok(graph)
    }
}
