//! Domain-level errors (no external dependencies)

use thiserror::Error;

use crate::domain::arena::NodeId;

/// Domain errors represent violations of the tree and decoration invariants.
/// Every operation returning one of these leaves its state unchanged.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("cycle detected: {child} cannot be added below {parent}")]
    Cycle { parent: NodeId, child: NodeId },

    #[error("unknown decorator kind: {0}")]
    UnknownDecoratorKind(String),

    #[error("invalid node: {0}")]
    InvalidNode(NodeId),

    #[error("node is a leaf and cannot hold children: {0}")]
    NotComposite(NodeId),

    #[error("node already has a parent: {0}")]
    AlreadyAttached(NodeId),
}

/// Result type for tree and decoration operations.
pub type TreeResult<T> = Result<T, DomainError>;
