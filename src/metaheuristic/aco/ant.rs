use crate::graph::{GraphError, NodeId, PheromoneGraph};
use crate::metaheuristic::Solution;
use crate::rng::RandomSource;

use std::collections::{BTreeSet, HashSet};

/// Stands in for `1 / weight` on zero weight edges.
pub const ZERO_WEIGHT_EPSILON: f64 = 1e-6;

/// Builds a single path from the start node to any of the targets.
///
/// An ant only reads the graph. All ants of an iteration can share it,
/// as long as nobody updates pheromones before every ant is done.
#[derive(Clone)]
pub struct Ant<'a, IndexType> {
    graph: &'a PheromoneGraph<IndexType>,
    start: IndexType,
    targets: &'a BTreeSet<IndexType>,
    alpha: f64,
    beta: f64,
}

impl<'a, IndexType: NodeId> Ant<'a, IndexType> {
    pub fn new(
        graph: &'a PheromoneGraph<IndexType>,
        start: IndexType,
        targets: &'a BTreeSet<IndexType>,
        alpha: f64,
        beta: f64,
    ) -> Self {
        Ant {
            graph,
            start,
            targets,
            alpha,
            beta,
        }
    }

    /// Unnormalized transition weight `pheromone^alpha * (1 / weight)^beta`.
    pub fn score(&self, pheromone: f64, weight: f64) -> f64 {
        let visibility = if weight == 0.0 {
            ZERO_WEIGHT_EPSILON
        } else {
            1.0 / weight
        };
        let score = pheromone.powf(self.alpha) * visibility.powf(self.beta);
        // 0 * inf after under- and overflow
        if score.is_nan() {
            0.0
        } else {
            score
        }
    }

    /// Walks from the start node until a target is reached or no unvisited neighbor is left.
    /// Nodes are never visited twice, so this takes at most `order` steps.
    pub fn get_solution<R: RandomSource + ?Sized>(
        &self,
        rng: &mut R,
    ) -> Result<Solution<IndexType>, GraphError<IndexType>> {
        let mut solution = Solution::new();
        solution.push_node(self.start, 0.0);
        let mut visited = HashSet::new();
        visited.insert(self.start);

        let mut current = self.start;
        while !self.targets.contains(&current) {
            let candidates: Vec<(IndexType, f64, f64)> = self
                .graph
                .iter_neighbors(current)?
                .filter(|(id, _)| !visited.contains(id))
                .map(|(id, edge)| (id, edge.weight, self.score(edge.pheromone, edge.weight)))
                .collect();

            match choose(&candidates, rng) {
                Some((next, weight)) => {
                    solution.push_node(next, weight);
                    visited.insert(next);
                    current = next;
                }
                None => {
                    solution.abandon();
                    break;
                }
            }
        }

        Ok(solution)
    }
}

/// Roulette wheel selection over `(id, weight, score)` candidates using a single uniform sample.
/// Returns `None` if there is nothing with a positive score to choose from.
fn choose<IndexType: Copy, R: RandomSource + ?Sized>(
    candidates: &[(IndexType, f64, f64)],
    rng: &mut R,
) -> Option<(IndexType, f64)> {
    // Overflowed scores dominate everything finite, pick uniformly among them.
    let overflowed: Vec<_> = candidates
        .iter()
        .filter(|(_, _, score)| score.is_infinite())
        .collect();
    if !overflowed.is_empty() {
        let index = ((rng.next_float() * overflowed.len() as f64) as usize).min(overflowed.len() - 1);
        let (id, weight, _) = overflowed[index];
        return Some((*id, *weight));
    }

    let total: f64 = candidates.iter().map(|(_, _, score)| score).sum();
    if !(total > 0.0) {
        return None;
    }

    // as soon as the running sum passes the random threshold we have hit
    // the candidate with the correct probability
    let threshold = rng.next_float() * total;
    let mut sum = 0.0;
    for &(id, weight, score) in candidates {
        sum += score;
        if sum > threshold {
            return Some((id, weight));
        }
    }

    // rounding left the threshold just above the sum
    candidates
        .iter()
        .rev()
        .find(|(_, _, score)| *score > 0.0)
        .map(|&(id, weight, _)| (id, weight))
}
