//! Top-level module for line-mesh topology.
//!
//! This module provides the core types for describing a 1-D mesh and its
//! connectivity:
//! - Node and element identifiers
//! - Directed line elements and the connectivity index built from them
//! - Nested identifier structures and branch paths
//! - Labelled node groups

pub mod connectivity;
pub mod element;
pub mod labels;
pub mod nested;
pub mod point;

pub use connectivity::ConnectivityIndex;
pub use element::Element;
pub use nested::{BranchPath, Nested};
pub use point::{ElementId, NodeId};
