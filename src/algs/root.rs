//! Component root discovery by walking backward connectivity.
//!
//! From any element, step to an element that ends where the current one
//! starts until no such predecessor exists. On a cyclic component the walk
//! comes back to an element it already passed; it stops there and the last
//! *new* element becomes the effective root. The walk visits each element at
//! most once, so it always terminates.

use hashbrown::HashSet;
use serde::{Deserialize, Serialize};

use crate::mesh_error::MeshTraceError;
use crate::topology::connectivity::ConnectivityIndex;
use crate::topology::point::ElementId;

/// How to choose among several elements arriving at the same node.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PredecessorTieBreak {
    /// The predecessor with the smallest element id.
    #[default]
    LowestElementId,
    /// The predecessor listed first in the input element order.
    FirstListed,
}

impl PredecessorTieBreak {
    fn pick(self, candidates: &[ElementId]) -> Option<ElementId> {
        match self {
            PredecessorTieBreak::LowestElementId => candidates.iter().copied().min(),
            PredecessorTieBreak::FirstListed => candidates.first().copied(),
        }
    }
}

/// Returns the root element of the component containing `element`.
pub fn find_root(
    element: ElementId,
    index: &ConnectivityIndex,
    tie_break: PredecessorTieBreak,
) -> Result<ElementId, MeshTraceError> {
    Ok(*backward_path(element, index, tie_break)?
        .last()
        .unwrap_or(&element))
}

/// The full backward walk from `element`, starting with `element` itself and
/// ending at the root.
pub fn backward_path(
    element: ElementId,
    index: &ConnectivityIndex,
    tie_break: PredecessorTieBreak,
) -> Result<Vec<ElementId>, MeshTraceError> {
    if index.element(element).is_none() {
        return Err(MeshTraceError::UnknownElement(element));
    }

    let mut path = vec![element];
    let mut seen: HashSet<ElementId> = HashSet::new();
    seen.insert(element);

    let mut current = element;
    while let Some(prev) = tie_break.pick(index.backward(current)) {
        if !seen.insert(prev) {
            log::trace!("backward walk from {element} closed a cycle at {prev}");
            break;
        }
        path.push(prev);
        current = prev;
    }
    Ok(path)
}
