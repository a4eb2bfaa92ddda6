use std::fmt::{Debug, Display};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum GraphError<IndexType: Debug + Display> {
    #[error("node {0} is not in the graph")]
    UnknownNode(IndexType),
    #[error("there is no edge between {0} and {1}")]
    NoSuchEdge(IndexType, IndexType),
    #[error("node {0} already exists")]
    DuplicateNode(IndexType),
    #[error("edge between {0} and {1} already exists")]
    DuplicateEdge(IndexType, IndexType),
    #[error("self loop on node {0} is not allowed")]
    SelfLoop(IndexType),
    #[error("edge between {0} and {1} has invalid weight {2}")]
    InvalidWeight(IndexType, IndexType, f64),
}
