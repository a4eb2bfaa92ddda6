use super::Generate;
use crate::graph::{GraphError, PheromoneGraph};
use crate::rng::RandomSource;

/// G(n, p) random graph: every unordered pair of nodes is connected with the given probability.
pub struct ErdosRenyi<'a> {
    size: usize,
    connection_probability: f64,
    ew_generator: &'a mut dyn FnMut() -> f64,
    rng: &'a mut dyn RandomSource,
}

impl<'a> ErdosRenyi<'a> {
    pub fn new(
        size: usize,
        connection_probability: f64,
        ew_generator: &'a mut dyn FnMut() -> f64,
        rng: &'a mut dyn RandomSource,
    ) -> ErdosRenyi<'a> {
        ErdosRenyi {
            size,
            connection_probability,
            ew_generator,
            rng,
        }
    }
}

impl<'a> Generate for ErdosRenyi<'a> {
    fn generate(&mut self) -> Result<PheromoneGraph<usize>, GraphError<usize>> {
        let mut graph = PheromoneGraph::with_size(self.size);
        for id in 0..self.size {
            graph.add_node(id)?;
        }

        for i in 0..self.size {
            for j in i + 1..self.size {
                if self.rng.next_float() < self.connection_probability {
                    graph.add_edge((i, j), (self.ew_generator)())?;
                }
            }
        }

        Ok(graph)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::rng64;

    #[test]
    fn full_probability_gives_complete_graph() {
        let mut rng = rng64(3);
        let mut edge_gen = || 1.0;
        let graph = ErdosRenyi::new(6, 1.0, &mut edge_gen, &mut rng)
            .generate()
            .unwrap();

        assert_eq!(graph.order(), 6);
        assert_eq!(graph.size(), 15, "K6 has 15 edges.");
    }

    #[test]
    fn zero_probability_gives_no_edges() {
        let mut rng = rng64(3);
        let mut edge_gen = || 1.0;
        let graph = ErdosRenyi::new(6, 0.0, &mut edge_gen, &mut rng)
            .generate()
            .unwrap();

        assert_eq!(graph.order(), 6);
        assert_eq!(graph.size(), 0);
    }

    #[test]
    fn same_seed_same_graph() {
        let build = || {
            let mut rng = rng64(99);
            let mut weight_rng = rng64(100);
            let mut edge_gen = || 1.0 + weight_rng.next_float();
            ErdosRenyi::new(20, 0.3, &mut edge_gen, &mut rng)
                .generate()
                .unwrap()
        };
        let a = build();
        let b = build();

        assert_eq!(a.edge_ids(), b.edge_ids());
        for ((edge, x), (_, y)) in a.iter_edges().zip(b.iter_edges()) {
            assert_eq!(x.weight, y.weight, "Weights of {:?} differ.", edge);
        }
    }
}
