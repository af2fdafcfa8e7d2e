//! Element: a directed line segment between two mesh nodes.
//!
//! Elements are the only structural input of the decomposition engine. They
//! are immutable once built; the ordered element list handed to
//! [`determine_forest`](crate::forest::determine_forest) fixes the processing
//! order and therefore the output order.

use crate::topology::point::{ElementId, NodeId};

/// A directed connection `start → end` identified by `id`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct Element {
    pub id: ElementId,
    pub start: NodeId,
    pub end: NodeId,
}

impl Element {
    /// Construct an element from raw identifiers.
    ///
    /// ```rust
    /// use mesh_trace::topology::element::Element;
    /// let e = Element::new(1, 10, 11);
    /// assert_eq!(e.endpoints(), (10.into(), 11.into()));
    /// ```
    #[inline]
    pub fn new(id: u64, start: u64, end: u64) -> Self {
        Element {
            id: ElementId::new(id),
            start: NodeId::new(start),
            end: NodeId::new(end),
        }
    }

    /// Returns the `(start, end)` node pair.
    #[inline]
    pub fn endpoints(&self) -> (NodeId, NodeId) {
        (self.start, self.end)
    }

    /// True for an element whose two ends are the same node.
    #[inline]
    pub fn is_self_loop(&self) -> bool {
        self.start == self.end
    }
}

/// Build elements from `(start, end)` pairs, numbering them from 1 in order.
pub fn elements_from_pairs(pairs: &[(u64, u64)]) -> Vec<Element> {
    pairs
        .iter()
        .zip(1u64..)
        .map(|(&(start, end), id)| Element::new(id, start, end))
        .collect()
}
