use crate::graph::Edge;

use std::fmt;
use std::fmt::{Display, Formatter};

/// A path walked by an ant, starting at the start node.
///
/// The length is the sum of all traversed edge weights, or infinity
/// when the ant got stuck before reaching a target (a dead end).
#[derive(Debug, Clone, PartialEq)]
pub struct Solution<IndexType> {
    node_list: Vec<IndexType>,
    length: f64,
}

impl<IndexType> Solution<IndexType>
where
    IndexType: PartialEq + Copy,
{
    /// Creates an empty path of length 0.
    pub fn new() -> Self {
        Solution {
            node_list: Vec::new(),
            length: 0.0,
        }
    }

    pub fn from_nodes(nodes: Vec<IndexType>, length: f64) -> Self {
        Solution {
            node_list: nodes,
            length,
        }
    }

    /// A path that ended without reaching a target.
    pub fn dead_end(nodes: Vec<IndexType>) -> Self {
        Solution::from_nodes(nodes, f64::INFINITY)
    }

    pub fn push_node(&mut self, node: IndexType, edge_weight: f64) {
        self.node_list.push(node);
        self.length += edge_weight;
    }

    /// Marks this path as dead end.
    pub fn abandon(&mut self) {
        self.length = f64::INFINITY;
    }

    pub fn length(&self) -> f64 {
        self.length
    }

    /// True if a target was reached, i.e. the length is finite.
    pub fn is_complete(&self) -> bool {
        self.length.is_finite()
    }

    pub fn len(&self) -> usize {
        self.node_list.len()
    }

    pub fn first(&self) -> Option<IndexType> {
        self.node_list.first().copied()
    }

    pub fn last(&self) -> Option<IndexType> {
        self.node_list.last().copied()
    }

    pub fn iter_edges(&self) -> Box<dyn Iterator<Item = Edge<IndexType>> + '_> {
        Box::new(
            self.node_list
                .iter()
                .copied()
                .zip(self.node_list.iter().skip(1).copied()),
        )
    }

    pub fn iter_nodes(&self) -> Box<dyn Iterator<Item = &IndexType> + '_> {
        Box::new(self.node_list.iter())
    }

    pub fn edges(&self) -> Vec<Edge<IndexType>> {
        self.iter_edges().collect()
    }

    pub fn nodes(&self) -> &[IndexType] {
        &self.node_list
    }
}

impl<IndexType: Display> Display for Solution<IndexType> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}",
            self.node_list
                .iter()
                .map(|x| format!("{}", x))
                .collect::<Vec<String>>()
                .join(" -> ")
        )
    }
}
