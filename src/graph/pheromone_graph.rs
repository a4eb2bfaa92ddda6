use std::collections::HashMap;

use crate::graph::{Edge, GraphError, NodeId};

/// Pheromone level every edge starts with.
pub const INITIAL_PHEROMONE: f64 = 1.0;

const DEFAULT_MIN_PHEROMONE: f64 = 0.1;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EdgeState {
    pub weight: f64,
    pub pheromone: f64,
}

/// Implements a weighted, undirected graph carrying a pheromone level on every edge,
/// using a symmetric adjacency matrix as datastructure.
///
/// Node ids are mapped to consecutive indices in insertion order.
/// All iteration (nodes, neighbors, edges) follows that order,
/// so two graphs built the same way are traversed the same way.
#[derive(Debug, Clone)]
pub struct PheromoneGraph<IndexType> {
    adjacency_matrix: Vec<Vec<Option<EdgeState>>>,
    size: usize,
    node_map: HashMap<IndexType, usize>,
    inv_node_map: Vec<IndexType>,
    min_pheromone: f64,
}

impl<IndexType: NodeId> Default for PheromoneGraph<IndexType> {
    fn default() -> Self {
        PheromoneGraph::with_size(0)
    }
}

impl<IndexType: NodeId> PheromoneGraph<IndexType> {
    /// Creates a new graph from the given node ids and weighted edges.
    /// Errors if an edge references a missing node or any element is a duplicate.
    pub fn new(
        nodes: Vec<IndexType>,
        edges: Vec<(Edge<IndexType>, f64)>,
    ) -> Result<Self, GraphError<IndexType>> {
        let mut graph = PheromoneGraph::with_size(nodes.len());
        for id in nodes {
            graph.add_node(id)?;
        }
        for (edge, weight) in edges {
            graph.add_edge(edge, weight)?;
        }

        Ok(graph)
    }

    /// Creates a graph from `(from, to, weight)` triples.
    /// Nodes are added in the order they first appear.
    pub fn from_edge_list(edges: &[(IndexType, IndexType, f64)]) -> Result<Self, GraphError<IndexType>> {
        let mut graph = PheromoneGraph::default();
        for &(from, to, _) in edges {
            for id in [from, to] {
                if !graph.has_node(id) {
                    graph.add_node(id)?;
                }
            }
        }
        for &(from, to, weight) in edges {
            graph.add_edge((from, to), weight)?;
        }

        Ok(graph)
    }

    /// Constructs an empty graph with capacity for at least the given amount of nodes.
    pub fn with_size(size: usize) -> Self {
        PheromoneGraph {
            adjacency_matrix: Vec::with_capacity(size),
            size: 0,
            node_map: HashMap::with_capacity(size),
            inv_node_map: Vec::with_capacity(size),
            min_pheromone: DEFAULT_MIN_PHEROMONE,
        }
    }

    /// Returns true if there are no nodes, or false otherwise.
    pub fn is_empty(&self) -> bool {
        self.inv_node_map.is_empty()
    }

    /// Returns the number of nodes in this graph.
    pub fn order(&self) -> usize {
        self.inv_node_map.len()
    }

    /// Returns the number of (undirected) edges in this graph.
    pub fn size(&self) -> usize {
        self.size
    }

    pub fn has_node(&self, id: IndexType) -> bool {
        self.node_map.contains_key(&id)
    }

    pub fn has_edge(&self, edge: Edge<IndexType>) -> bool {
        self.edge_index(edge).is_ok()
    }

    pub fn iter_node_ids(&self) -> Box<dyn Iterator<Item = IndexType> + '_> {
        Box::new(self.inv_node_map.iter().copied())
    }

    pub fn node_ids(&self) -> Vec<IndexType> {
        self.inv_node_map.clone()
    }

    /// Adds a new node without any edges.
    /// Returns an error if a node with the same id already exists.
    pub fn add_node(&mut self, id: IndexType) -> Result<(), GraphError<IndexType>> {
        if self.has_node(id) {
            return Err(GraphError::DuplicateNode(id));
        }

        let index = self.order();
        for row in self.adjacency_matrix.iter_mut() {
            row.push(None);
        }
        self.adjacency_matrix.push(vec![None; index + 1]);
        self.node_map.insert(id, index);
        self.inv_node_map.push(id);

        Ok(())
    }

    /// Adds a new undirected edge. Its pheromone starts at `INITIAL_PHEROMONE`.
    /// Weights have to be finite and non-negative.
    pub fn add_edge(&mut self, edge: Edge<IndexType>, weight: f64) -> Result<(), GraphError<IndexType>> {
        let (from, to) = edge;
        if from == to {
            return Err(GraphError::SelfLoop(from));
        }
        let i = self.index(from)?;
        let j = self.index(to)?;
        if !weight.is_finite() || weight < 0.0 {
            return Err(GraphError::InvalidWeight(from, to, weight));
        }
        if self.adjacency_matrix[i][j].is_some() {
            return Err(GraphError::DuplicateEdge(from, to));
        }

        let state = EdgeState {
            weight,
            pheromone: self.clamp(INITIAL_PHEROMONE),
        };
        self.adjacency_matrix[i][j] = Some(state);
        self.adjacency_matrix[j][i] = Some(state);
        self.size += 1;

        Ok(())
    }

    /// Returns an iterator over the neighbor ids together with the connecting edge.
    /// Returns an error if the node is not in the graph.
    #[allow(clippy::type_complexity)]
    pub fn iter_neighbors(
        &self,
        id: IndexType,
    ) -> Result<Box<dyn Iterator<Item = (IndexType, &EdgeState)> + '_>, GraphError<IndexType>> {
        let index = self.index(id)?;

        Ok(Box::new(
            self.adjacency_matrix[index]
                .iter()
                .enumerate()
                .filter_map(move |(j, edge)| edge.as_ref().map(|state| (self.inv_node_map[j], state))),
        ))
    }

    /// Returns the neighbors of the node with id.
    pub fn neighbors(&self, id: IndexType) -> Result<Vec<IndexType>, GraphError<IndexType>> {
        Ok(self.iter_neighbors(id)?.map(|(neighbor, _)| neighbor).collect())
    }

    /// Returns an iterator over all edges, each undirected edge exactly once.
    pub fn iter_edges(&self) -> Box<dyn Iterator<Item = (Edge<IndexType>, &EdgeState)> + '_> {
        Box::new(self.adjacency_matrix.iter().enumerate().flat_map(move |(i, row)| {
            row.iter().enumerate().skip(i + 1).filter_map(move |(j, edge)| {
                edge.as_ref()
                    .map(|state| ((self.inv_node_map[i], self.inv_node_map[j]), state))
            })
        }))
    }

    pub fn edge_ids(&self) -> Vec<Edge<IndexType>> {
        self.iter_edges().map(|(edge, _)| edge).collect()
    }

    pub fn edge(&self, edge: Edge<IndexType>) -> Result<&EdgeState, GraphError<IndexType>> {
        let (i, j) = self.edge_index(edge)?;
        self.adjacency_matrix[i][j]
            .as_ref()
            .ok_or(GraphError::NoSuchEdge(edge.0, edge.1))
    }

    pub fn edge_weight(&self, edge: Edge<IndexType>) -> Result<f64, GraphError<IndexType>> {
        Ok(self.edge(edge)?.weight)
    }

    pub fn pheromone(&self, edge: Edge<IndexType>) -> Result<f64, GraphError<IndexType>> {
        Ok(self.edge(edge)?.pheromone)
    }

    /// Sets the pheromone level of an edge, raising it to the floor if necessary.
    pub fn set_pheromone(&mut self, edge: Edge<IndexType>, value: f64) -> Result<(), GraphError<IndexType>> {
        let (i, j) = self.edge_index(edge)?;
        let value = self.clamp(value);
        for (a, b) in [(i, j), (j, i)] {
            if let Some(state) = self.adjacency_matrix[a][b].as_mut() {
                state.pheromone = value;
            }
        }

        Ok(())
    }

    /// Resets the pheromone level of every edge to `INITIAL_PHEROMONE`.
    pub fn initialize_pheromones(&mut self) {
        let value = self.clamp(INITIAL_PHEROMONE);
        self.for_each_edge_state(|state| state.pheromone = value);
    }

    pub fn min_pheromone(&self) -> f64 {
        self.min_pheromone
    }

    /// Changes the pheromone floor. Edges below the new floor are raised to it.
    /// The floor is expected to be positive.
    pub fn set_min_pheromone(&mut self, min_pheromone: f64) {
        self.min_pheromone = min_pheromone;
        self.for_each_edge_state(|state| state.pheromone = state.pheromone.max(min_pheromone));
    }

    /// Sums the weights along a node sequence.
    /// Errors on the first pair of consecutive nodes that is not connected.
    pub fn path_length(&self, nodes: &[IndexType]) -> Result<f64, GraphError<IndexType>> {
        nodes
            .windows(2)
            .map(|pair| self.edge_weight((pair[0], pair[1])))
            .sum()
    }

    fn clamp(&self, value: f64) -> f64 {
        value.max(self.min_pheromone)
    }

    fn index(&self, id: IndexType) -> Result<usize, GraphError<IndexType>> {
        self.node_map
            .get(&id)
            .copied()
            .ok_or(GraphError::UnknownNode(id))
    }

    fn edge_index(&self, edge: Edge<IndexType>) -> Result<(usize, usize), GraphError<IndexType>> {
        let i = self.index(edge.0)?;
        let j = self.index(edge.1)?;
        match self.adjacency_matrix[i][j] {
            Some(_) => Ok((i, j)),
            None => Err(GraphError::NoSuchEdge(edge.0, edge.1)),
        }
    }

    fn for_each_edge_state(&mut self, mut f: impl FnMut(&mut EdgeState)) {
        for row in self.adjacency_matrix.iter_mut() {
            for state in row.iter_mut().flatten() {
                f(state);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use float_cmp::approx_eq;

    fn triangle() -> PheromoneGraph<usize> {
        PheromoneGraph::from_edge_list(&[(1, 2, 2.0), (2, 3, 2.0), (1, 3, 5.0)]).unwrap()
    }

    #[test]
    fn from_edge_list_works() {
        let graph = triangle();

        assert_eq!(graph.order(), 3, "Triangle should have 3 nodes.");
        assert_eq!(graph.size(), 3, "Triangle should have 3 edges.");
        assert_eq!(graph.node_ids(), vec![1, 2, 3], "Nodes should keep first appearance order.");
    }

    #[test]
    fn new_with_missing_node_errors() {
        let err = PheromoneGraph::new(vec![1, 2], vec![((1, 3), 1.0)]).err();

        assert_eq!(err, Some(GraphError::UnknownNode(3)));
    }

    #[test]
    fn duplicate_node_errors() {
        let mut graph = triangle();

        assert_eq!(graph.add_node(2), Err(GraphError::DuplicateNode(2)));
    }

    #[test]
    fn duplicate_edge_errors_in_both_directions() {
        let mut graph = triangle();

        assert_eq!(graph.add_edge((1, 2), 1.0), Err(GraphError::DuplicateEdge(1, 2)));
        assert_eq!(graph.add_edge((2, 1), 1.0), Err(GraphError::DuplicateEdge(2, 1)));
    }

    #[test]
    fn invalid_edges_error() {
        let mut graph = triangle();
        graph.add_node(4).unwrap();

        assert_eq!(graph.add_edge((4, 4), 1.0), Err(GraphError::SelfLoop(4)));
        assert!(matches!(
            graph.add_edge((1, 4), -1.0),
            Err(GraphError::InvalidWeight(1, 4, _))
        ));
        assert!(matches!(
            graph.add_edge((1, 4), f64::NAN),
            Err(GraphError::InvalidWeight(1, 4, _))
        ));
        assert!(graph.add_edge((1, 4), 0.0).is_ok(), "Zero weight edges are allowed.");
    }

    #[test]
    fn edges_are_undirected() {
        let graph = triangle();

        assert_eq!(graph.edge_weight((1, 3)), Ok(5.0));
        assert_eq!(graph.edge_weight((3, 1)), Ok(5.0));
        assert!(graph.has_edge((3, 2)));
    }

    #[test]
    fn neighbors_works() {
        let mut graph = triangle();
        graph.add_node(4).unwrap();

        assert_eq!(graph.neighbors(2), Ok(vec![1, 3]));
        assert_eq!(graph.neighbors(4), Ok(vec![]));
        assert_eq!(graph.neighbors(9), Err(GraphError::UnknownNode(9)));
    }

    #[test]
    fn missing_edge_errors() {
        let mut graph = triangle();
        graph.add_node(4).unwrap();

        assert_eq!(graph.edge_weight((1, 4)), Err(GraphError::NoSuchEdge(1, 4)));
        assert_eq!(graph.pheromone((1, 4)), Err(GraphError::NoSuchEdge(1, 4)));
        assert_eq!(graph.set_pheromone((1, 4), 2.0), Err(GraphError::NoSuchEdge(1, 4)));
        assert_eq!(graph.edge_weight((1, 7)), Err(GraphError::UnknownNode(7)));
    }

    #[test]
    fn iter_edges_yields_each_edge_once() {
        let graph = triangle();
        let edges = graph.edge_ids();

        assert_eq!(edges, vec![(1, 2), (1, 3), (2, 3)]);
    }

    #[test]
    fn set_pheromone_is_symmetric_and_clamped() {
        let mut graph = triangle();
        graph.set_min_pheromone(0.2);

        graph.set_pheromone((2, 1), 3.5).unwrap();
        assert_eq!(graph.pheromone((1, 2)), Ok(3.5));

        graph.set_pheromone((1, 2), 0.01).unwrap();
        assert_eq!(graph.pheromone((2, 1)), Ok(0.2), "Value should be clamped to the floor.");
    }

    #[test]
    fn raising_the_floor_clamps_existing_edges() {
        let mut graph = triangle();
        graph.set_min_pheromone(1.5);

        for (_, state) in graph.iter_edges() {
            assert!(approx_eq!(f64, state.pheromone, 1.5));
        }
    }

    #[test]
    fn initialize_pheromones_resets_all_edges() {
        let mut graph = triangle();
        graph.set_pheromone((1, 2), 7.0).unwrap();
        graph.set_pheromone((1, 3), 0.3).unwrap();
        graph.initialize_pheromones();

        for (edge, state) in graph.iter_edges() {
            assert_eq!(state.pheromone, INITIAL_PHEROMONE, "Edge {:?} was not reset.", edge);
        }
    }

    #[test]
    fn path_length_works() {
        let graph = triangle();

        assert_eq!(graph.path_length(&[1, 2, 3]), Ok(4.0));
        assert_eq!(graph.path_length(&[1]), Ok(0.0));
        assert_eq!(graph.path_length(&[]), Ok(0.0));
    }

    #[test]
    fn path_length_errors_on_gap() {
        let mut graph = triangle();
        graph.add_node(4).unwrap();

        assert_eq!(graph.path_length(&[1, 4]), Err(GraphError::NoSuchEdge(1, 4)));
    }
}
