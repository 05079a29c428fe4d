//! Error types

use crate::NodeId;

/// Errors from tree mutations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DomError {
    /// The handle does not belong to this document.
    #[error("Unknown node {0}")]
    UnknownNode(NodeId),

    /// The mutation would make a node its own ancestor, or move the root.
    #[error("Cannot insert {child} into {parent}: hierarchy request error")]
    HierarchyRequest { parent: NodeId, child: NodeId },
}

/// Errors from parsing a selector.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SelectorError {
    #[error("Empty selector")]
    Empty,

    /// Only `#id` and `.class` selectors are understood.
    #[error("Unsupported selector '{0}'")]
    Unsupported(String),
}
