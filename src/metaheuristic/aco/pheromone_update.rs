use crate::graph::{GraphError, NodeId, PheromoneGraph};
use crate::metaheuristic::aco::{Params, ZERO_WEIGHT_EPSILON};
use crate::metaheuristic::Solution;

/// Evaporates and deposits pheromones once per iteration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PheromoneUpdate {
    evaporation_rate: f64,
    pheromone_intensity: f64,
    elitist_weight: f64,
}

/// What a single update changed, summed over all edges.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct UpdateSummary {
    pub evaporated: f64,
    pub deposited: f64,
    pub reinforced_paths: usize,
}

impl PheromoneUpdate {
    pub fn new(evaporation_rate: f64, pheromone_intensity: f64, elitist_weight: f64) -> Self {
        PheromoneUpdate {
            evaporation_rate,
            pheromone_intensity,
            elitist_weight,
        }
    }

    pub fn from_params(params: &Params) -> Self {
        PheromoneUpdate::new(
            params.evaporation_rate,
            params.pheromone_intensity,
            params.elitist_weight,
        )
    }

    /// Applies evaporation, the deposit of every completed path and the elitist deposit,
    /// strictly in this order.
    pub fn apply<IndexType: NodeId>(
        &self,
        graph: &mut PheromoneGraph<IndexType>,
        solutions: &[Solution<IndexType>],
        best: Option<&Solution<IndexType>>,
    ) -> Result<UpdateSummary, GraphError<IndexType>> {
        let mut summary = UpdateSummary {
            evaporated: self.evaporate(graph)?,
            ..UpdateSummary::default()
        };

        for solution in solutions.iter().filter(|s| s.is_complete()) {
            summary.deposited += self.deposit(graph, solution, 1.0)?;
            summary.reinforced_paths += 1;
        }

        if let Some(best) = best.filter(|s| s.is_complete()) {
            summary.deposited += self.deposit(graph, best, self.elitist_weight)?;
        }

        Ok(summary)
    }

    /// Decays every edge by the evaporation rate. Returns the amount removed.
    pub fn evaporate<IndexType: NodeId>(
        &self,
        graph: &mut PheromoneGraph<IndexType>,
    ) -> Result<f64, GraphError<IndexType>> {
        let mut evaporated = 0.0;
        for edge in graph.edge_ids() {
            let before = graph.pheromone(edge)?;
            graph.set_pheromone(edge, before * (1.0 - self.evaporation_rate))?;
            evaporated += before - graph.pheromone(edge)?;
        }

        Ok(evaporated)
    }

    /// Adds `factor * intensity / length` to every edge of a completed path.
    /// Dead ends deposit nothing. Returns the amount added per edge.
    pub fn deposit<IndexType: NodeId>(
        &self,
        graph: &mut PheromoneGraph<IndexType>,
        solution: &Solution<IndexType>,
        factor: f64,
    ) -> Result<f64, GraphError<IndexType>> {
        if !solution.is_complete() {
            return Ok(0.0);
        }

        // only the degenerate zero length is replaced
        let length = if solution.length() == 0.0 {
            ZERO_WEIGHT_EPSILON
        } else {
            solution.length()
        };
        let amount = factor * self.pheromone_intensity / length;
        for edge in solution.iter_edges() {
            let current = graph.pheromone(edge)?;
            graph.set_pheromone(edge, current + amount)?;
        }

        Ok(amount)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use float_cmp::approx_eq;
    use proptest::prelude::*;

    fn triangle() -> PheromoneGraph<usize> {
        PheromoneGraph::from_edge_list(&[(1, 2, 2.0), (2, 3, 2.0), (1, 3, 5.0)]).unwrap()
    }

    fn short_path() -> Solution<usize> {
        Solution::from_nodes(vec![1, 2, 3], 4.0)
    }

    #[test]
    fn evaporation_then_deposit_then_elitist() {
        let mut graph = triangle();
        let update = PheromoneUpdate::new(0.5, 1.0, 2.0);
        let best = short_path();
        update
            .apply(&mut graph, &[short_path()], Some(&best))
            .unwrap();

        // 1.0 * 0.5 + 1 / 4 + 2 / 4
        assert!(approx_eq!(f64, graph.pheromone((1, 2)).unwrap(), 1.25));
        assert!(approx_eq!(f64, graph.pheromone((2, 3)).unwrap(), 1.25));
        assert!(approx_eq!(f64, graph.pheromone((1, 3)).unwrap(), 0.5));
    }

    #[test]
    fn shorter_paths_deposit_more() {
        let mut graph = triangle();
        let update = PheromoneUpdate::new(0.5, 1.0, 0.0);
        let direct = Solution::from_nodes(vec![1, 3], 5.0);
        let summary = update
            .apply(&mut graph, &[short_path(), direct], None)
            .unwrap();

        assert_eq!(summary.reinforced_paths, 2);
        assert!(approx_eq!(f64, graph.pheromone((1, 2)).unwrap(), 0.75));
        assert!(approx_eq!(f64, graph.pheromone((1, 3)).unwrap(), 0.7));
    }

    #[test]
    fn dead_ends_deposit_nothing() {
        let mut graph = triangle();
        let update = PheromoneUpdate::new(0.5, 1.0, 2.0);
        let dead_end = Solution::dead_end(vec![1, 2]);
        let summary = update
            .apply(&mut graph, &[dead_end.clone()], Some(&dead_end))
            .unwrap();

        assert_eq!(summary.reinforced_paths, 0);
        assert_eq!(summary.deposited, 0.0);
        for (_, state) in graph.iter_edges() {
            assert!(approx_eq!(f64, state.pheromone, 0.5));
        }
    }

    #[test]
    fn evaporation_reports_removed_amount() {
        let mut graph = triangle();
        let update = PheromoneUpdate::new(0.25, 1.0, 2.0);
        let evaporated = update.evaporate(&mut graph).unwrap();

        assert!(approx_eq!(f64, evaporated, 0.75));
    }

    #[test]
    fn zero_length_path_deposits_finite_amount() {
        let mut graph = PheromoneGraph::from_edge_list(&[(1, 2, 0.0)]).unwrap();
        let update = PheromoneUpdate::new(0.5, 1.0, 2.0);
        let path = Solution::from_nodes(vec![1, 2], 0.0);
        update.apply(&mut graph, &[path.clone()], Some(&path)).unwrap();

        assert!(graph.pheromone((1, 2)).unwrap().is_finite());
    }

    #[test]
    fn short_positive_length_is_kept() {
        let mut graph = PheromoneGraph::from_edge_list(&[(1, 2, 1e-9)]).unwrap();
        let update = PheromoneUpdate::new(0.5, 1.0, 2.0);
        let path = Solution::from_nodes(vec![1, 2], 1e-9);
        let amount = update.deposit(&mut graph, &path, 1.0).unwrap();

        assert!((amount / 1e9 - 1.0).abs() < 1e-12);
        assert!((graph.pheromone((1, 2)).unwrap() - (amount + 1.0)).abs() < 1e-3);
    }

    #[test]
    fn path_over_missing_edge_errors() {
        let mut graph = triangle();
        graph.add_node(4).unwrap();
        let update = PheromoneUpdate::new(0.5, 1.0, 2.0);
        let path = Solution::from_nodes(vec![1, 4], 1.0);

        assert_eq!(
            update.apply(&mut graph, &[path], None),
            Err(GraphError::NoSuchEdge(1, 4))
        );
    }

    proptest! {
        #[test]
        fn pheromone_never_drops_below_floor(
            rate in 0.01f64..=1.0,
            floor in 0.001f64..2.0,
            steps in 1usize..200,
        ) {
            let mut graph = triangle();
            graph.set_min_pheromone(floor);
            let update = PheromoneUpdate::new(rate, 1.0, 2.0);

            for _ in 0..steps {
                update.apply(&mut graph, &[], None).unwrap();
                for (_, state) in graph.iter_edges() {
                    prop_assert!(state.pheromone >= floor);
                }
            }
        }
    }
}
