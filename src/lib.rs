#![cfg_attr(docsrs, feature(doc_cfg))]
//! # mesh-trace
//!
//! mesh-trace decomposes a 1-D line mesh (directed two-node elements) into
//! independent traces and classifies each one as an open or closed
//! *contour* or as a branching *tree*, ready for export to a downstream
//! geometry consumer.
//!
//! ## Pipeline
//! 1. [`ConnectivityIndex`](topology::connectivity::ConnectivityIndex): node
//!    and element adjacency built once from the element list.
//! 2. [`find_root`](algs::root::find_root): walk backward connectivity to the
//!    root of a component, with a cycle guard.
//! 3. [`determine_forest`](forest::determine_forest): grow nested identifier
//!    structures forward from each root, partitioning the mesh nodes between
//!    members.
//! 4. [`renest`](algs::renest::renest): re-impose curated group boundaries on
//!    tree structures.
//! 5. [`classify_forest`](algs::classify::classify_forest): contour/tree
//!    classification, point resolution and label assignment.
//!
//! [`decompose_and_classify`](pipeline::decompose_and_classify) runs all of
//! the above.
//!
//! ## Determinism
//!
//! Results depend only on element order, node ids and group order. Branches
//! open in ascending node-id order and predecessor ties break on the lowest
//! element id unless [`PredecessorTieBreak::FirstListed`](algs::root::PredecessorTieBreak)
//! is requested.
//!
//! ## Usage
//!
//! ```rust
//! use mesh_trace::prelude::*;
//!
//! let elements = elements_from_pairs(&[(1, 2), (2, 3), (3, 4), (4, 1)]);
//! let resolver = FnResolver(|n: NodeId| Some(Point::new(n.get() as f64, 0.0, 0.0, 1.0)));
//! let groups = [Group::from_raw("ring", [1, 2, 3, 4])];
//!
//! let out = decompose_and_classify(&elements, &resolver, groups, &TraceOptions::default())?;
//! let ring = &out.classification.contours[0];
//! assert!(ring.is_closed());
//! assert_eq!(ring.metadata.global.labels, vec!["ring"]);
//! # Ok::<(), MeshTraceError>(())
//! ```

pub mod algs;
pub mod data;
pub mod debug_invariants;
pub mod forest;
pub mod mesh_error;
pub mod pipeline;
pub mod topology;

pub use debug_invariants::DebugInvariants;

/// A convenient prelude to import the most-used traits & types:
pub mod prelude {
    pub use crate::algs::classify::{
        Category, Classification, ClassificationRecord, ClassifyOptions, classify_forest,
    };
    pub use crate::algs::renest::renest;
    pub use crate::algs::root::{PredecessorTieBreak, find_root};
    pub use crate::data::point::Point;
    pub use crate::data::source::{FnResolver, InMemoryNodeData, NodeResolver};
    pub use crate::forest::{Forest, ForestMember, ForestOptions, determine_forest};
    pub use crate::mesh_error::MeshTraceError;
    pub use crate::pipeline::{TraceOptions, TraceOutput, decompose_and_classify};
    pub use crate::topology::connectivity::ConnectivityIndex;
    pub use crate::topology::element::{Element, elements_from_pairs};
    pub use crate::topology::labels::{Group, GroupPool};
    pub use crate::topology::nested::{BranchPath, Nested};
    pub use crate::topology::point::{ElementId, NodeId};
}
