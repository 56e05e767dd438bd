use thiserror::Error;

use crate::graph::NodeId;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum GraphError {
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    #[error("node not found: {0}")]
    InvalidNode(NodeId),

    #[error("self-loop on node {0} is not allowed")]
    SelfLoop(NodeId),

    #[error("attachment needs at least one edge, graph has none")]
    DegenerateGraph,

    #[error("metrics need at least one node, graph is empty")]
    EmptyGraph,
}

pub type Result<T> = std::result::Result<T, GraphError>;
