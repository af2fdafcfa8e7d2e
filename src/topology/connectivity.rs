//! Connectivity index over a flat list of line elements.
//!
//! For each node the index records the elements leaving it (`outgoing`) and
//! arriving at it (`incoming`), plus the successor node of every outgoing
//! element. Element→element adjacency follows from those lists:
//!
//! * `forward(e)`  = elements leaving `e.end`
//! * `backward(e)` = elements arriving at `e.start`
//!
//! Parallel elements between the same node pair are kept, so a successor may
//! be listed more than once. All lists preserve input order; maps are ordered
//! by identifier so iteration is reproducible.
//!
//! The index is derived data: it is rebuilt fresh for every decomposition run
//! and never mutated afterwards.

use std::collections::{BTreeMap, BTreeSet};

use hashbrown::HashMap;

use crate::mesh_error::MeshTraceError;
use crate::topology::element::Element;
use crate::topology::point::{ElementId, NodeId};

/// Element lists incident to one node, in input order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct NodeAdjacency {
    pub outgoing: Vec<ElementId>,
    pub incoming: Vec<ElementId>,
}

/// Element→element neighbours of one element, in input order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ElementAdjacency {
    pub forward: Vec<ElementId>,
    pub backward: Vec<ElementId>,
}

/// Node and element adjacency for a static element list.
#[derive(Clone, Debug, Default)]
pub struct ConnectivityIndex {
    elements: Vec<Element>,
    position: HashMap<ElementId, usize>,
    nodes: BTreeMap<NodeId, NodeAdjacency>,
    successors: BTreeMap<NodeId, Vec<NodeId>>,
    element_adjacency: BTreeMap<ElementId, ElementAdjacency>,
}

impl ConnectivityIndex {
    /// Build the index. Never fails; an empty input yields empty maps.
    ///
    /// Element ids are assumed unique. If one repeats, lookups by id resolve
    /// to its first occurrence; use [`ConnectivityIndex::try_build`] to reject
    /// such input instead.
    pub fn build(elements: &[Element]) -> Self {
        let mut nodes: BTreeMap<NodeId, NodeAdjacency> = BTreeMap::new();
        let mut successors: BTreeMap<NodeId, Vec<NodeId>> = BTreeMap::new();
        let mut position = HashMap::with_capacity(elements.len());

        for (idx, el) in elements.iter().enumerate() {
            position.entry(el.id).or_insert(idx);
            nodes.entry(el.start).or_default().outgoing.push(el.id);
            nodes.entry(el.end).or_default().incoming.push(el.id);
            successors.entry(el.start).or_default().push(el.end);
        }

        let element_adjacency = elements
            .iter()
            .rev()
            .map(|el| {
                let forward = nodes
                    .get(&el.end)
                    .map(|adj| adj.outgoing.clone())
                    .unwrap_or_default();
                let backward = nodes
                    .get(&el.start)
                    .map(|adj| adj.incoming.clone())
                    .unwrap_or_default();
                (el.id, ElementAdjacency { forward, backward })
            })
            .collect();

        ConnectivityIndex {
            elements: elements.to_vec(),
            position,
            nodes,
            successors,
            element_adjacency,
        }
    }

    /// Like [`ConnectivityIndex::build`] but rejects repeated element ids.
    pub fn try_build(elements: &[Element]) -> Result<Self, MeshTraceError> {
        let mut seen = BTreeSet::new();
        for el in elements {
            if !seen.insert(el.id) {
                return Err(MeshTraceError::DuplicateElementId(el.id));
            }
        }
        Ok(Self::build(elements))
    }

    /// Elements in input order.
    pub fn elements(&self) -> &[Element] {
        &self.elements
    }

    pub fn element(&self, id: ElementId) -> Option<&Element> {
        self.position.get(&id).map(|&idx| &self.elements[idx])
    }

    pub fn node(&self, id: NodeId) -> Option<&NodeAdjacency> {
        self.nodes.get(&id)
    }

    /// Every node referenced by at least one element, ascending.
    pub fn nodes(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.nodes.keys().copied()
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn element_count(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// End nodes of the elements leaving `node`, one entry per element.
    pub fn successors(&self, node: NodeId) -> &[NodeId] {
        self.successors.get(&node).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Elements arriving at `node`.
    pub fn incoming(&self, node: NodeId) -> &[ElementId] {
        self.nodes
            .get(&node)
            .map(|adj| adj.incoming.as_slice())
            .unwrap_or(&[])
    }

    /// Elements leaving `node`.
    pub fn outgoing(&self, node: NodeId) -> &[ElementId] {
        self.nodes
            .get(&node)
            .map(|adj| adj.outgoing.as_slice())
            .unwrap_or(&[])
    }

    /// Elements that continue from the end of `element`.
    pub fn forward(&self, element: ElementId) -> &[ElementId] {
        self.element_adjacency
            .get(&element)
            .map(|adj| adj.forward.as_slice())
            .unwrap_or(&[])
    }

    /// Elements that lead into the start of `element`.
    pub fn backward(&self, element: ElementId) -> &[ElementId] {
        self.element_adjacency
            .get(&element)
            .map(|adj| adj.backward.as_slice())
            .unwrap_or(&[])
    }
}
