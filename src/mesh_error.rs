//! MeshTraceError: Unified error type for mesh-trace public APIs
//!
//! The decomposition algorithms themselves never fail: cycles, unmatched
//! groups and unresolvable points degrade gracefully. Errors are reserved for
//! malformed input handed to the fallible entry points and for invariant
//! validation.

use thiserror::Error;

use crate::topology::point::{ElementId, NodeId};

/// Unified error type for mesh-trace operations.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum MeshTraceError {
    /// Two input elements share the same identifier.
    #[error("Duplicate element id {0}")]
    DuplicateElementId(ElementId),
    /// An element id was looked up that the connectivity index does not know.
    #[error("Unknown element id {0}")]
    UnknownElement(ElementId),
    /// A branch path string could not be parsed.
    #[error("Invalid branch path `{0}`: expected dot-separated indices")]
    InvalidBranchPath(String),
    /// A node was emitted by two forest members.
    #[error("Partition error: node {node} appears in forest members {first} and {second}")]
    NodeInMultipleMembers {
        node: NodeId,
        first: usize,
        second: usize,
    },
    /// A node referenced by an element was not emitted by any forest member.
    #[error("Partition error: node {0} is not covered by any forest member")]
    NodeNotInForest(NodeId),
}
