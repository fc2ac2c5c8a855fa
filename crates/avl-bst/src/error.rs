use thiserror::Error;

use crate::types::NodeId;

/// Errors surfaced by keyed access.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TreeError {
    #[error("Invalid key")]
    KeyNotFound,
}

/// A broken structural invariant reported by `assert_valid`.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum InvariantError {
    #[error("Root has parent")]
    RootHasParent,
    #[error("Broken parent link on child {child} of node {node}")]
    BrokenParentLink { node: NodeId, child: NodeId },
    #[error("Node order violated at node {node}")]
    OrderViolated { node: NodeId },
    #[error("Balance factor mismatch at node {node}: expected {expected}, got {actual}")]
    BalanceMismatch {
        node: NodeId,
        expected: i64,
        actual: i8,
    },
    #[error("AVL balance violated at node {node}: {actual}")]
    BalanceOutOfRange { node: NodeId, actual: i8 },
    #[error("Length mismatch: counted {counted}, recorded {recorded}")]
    LengthMismatch { counted: usize, recorded: usize },
}
