//! Forest decomposition of a line-element mesh into independent members.
//!
//! Elements are scanned in input order. The first element whose start node
//! no member has claimed yet seeds a new member: its component root is found
//! by walking backward connectivity, then the member's nested structure is
//! built by forward traversal from the root's start node. Nodes entered by
//! that traversal are recorded in a run-global visited set, so later members
//! never claim them again. The loop ends when every element's start node is
//! claimed, which yields a partition of the mesh nodes.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use crate::algs::root::{PredecessorTieBreak, find_root};
use crate::algs::traversal::{MemberTraversal, VisitedNodes, traverse_member};
use crate::debug_invariants::DebugInvariants;
use crate::mesh_error::MeshTraceError;
use crate::topology::connectivity::ConnectivityIndex;
use crate::topology::element::Element;
use crate::topology::nested::Nested;
use crate::topology::point::{ElementId, NodeId};

/// Options for [`determine_forest`].
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ForestOptions {
    /// Predecessor choice when several elements end at the same node.
    pub tie_break: PredecessorTieBreak,
}

/// One connected component rendered as a nested identifier structure.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ForestMember {
    /// Element the backward walk settled on.
    pub root_element: ElementId,
    /// Start node of `root_element`; the first identifier of `structure`.
    pub root_node: NodeId,
    pub structure: Nested<NodeId>,
    /// Nodes claimed by this member, in traversal order.
    pub nodes: Vec<NodeId>,
    /// Elements leaving the claimed nodes.
    pub elements: Vec<ElementId>,
}

impl ForestMember {
    pub fn node_set(&self) -> BTreeSet<NodeId> {
        self.nodes.iter().copied().collect()
    }
}

/// The ordered members of one decomposition run.
#[derive(Clone, Debug, Default)]
pub struct Forest {
    members: Vec<ForestMember>,
    nodes: BTreeSet<NodeId>,
}

impl Forest {
    /// Members in discovery order.
    pub fn members(&self) -> &[ForestMember] {
        &self.members
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ForestMember> {
        self.members.iter()
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Every node referenced by the input elements.
    pub fn nodes(&self) -> &BTreeSet<NodeId> {
        &self.nodes
    }

    /// Index of the member that claimed `node`.
    pub fn member_of(&self, node: NodeId) -> Option<usize> {
        self.members.iter().position(|m| m.nodes.contains(&node))
    }

    /// The members' nested structures, in discovery order.
    pub fn structures(&self) -> impl Iterator<Item = &Nested<NodeId>> + '_ {
        self.members.iter().map(|m| &m.structure)
    }

    pub fn into_members(self) -> Vec<ForestMember> {
        self.members
    }
}

impl<'a> IntoIterator for &'a Forest {
    type Item = &'a ForestMember;
    type IntoIter = std::slice::Iter<'a, ForestMember>;

    fn into_iter(self) -> Self::IntoIter {
        self.members.iter()
    }
}

impl DebugInvariants for Forest {
    /// Every input node belongs to exactly one member's structure.
    fn validate_invariants(&self) -> Result<(), MeshTraceError> {
        let mut owner: BTreeMap<NodeId, usize> = BTreeMap::new();
        for (idx, member) in self.members.iter().enumerate() {
            for node in member.structure.leaf_set() {
                if let Some(&first) = owner.get(&node) {
                    return Err(MeshTraceError::NodeInMultipleMembers {
                        node,
                        first,
                        second: idx,
                    });
                }
                owner.insert(node, idx);
            }
        }
        match self.nodes.iter().find(|n| !owner.contains_key(n)) {
            Some(&missing) => Err(MeshTraceError::NodeNotInForest(missing)),
            None => Ok(()),
        }
    }
}

/// Decompose `elements` into forest members.
pub fn determine_forest(elements: &[Element], opts: &ForestOptions) -> Forest {
    decompose(&ConnectivityIndex::build(elements), opts)
}

/// Decompose an already built index.
pub fn decompose(index: &ConnectivityIndex, opts: &ForestOptions) -> Forest {
    let mut visited = VisitedNodes::with_capacity(index.node_count());
    let mut members = Vec::new();

    for el in index.elements() {
        if visited.contains(&el.start) {
            continue;
        }

        let root_element = find_root(el.id, index, opts.tie_break).unwrap_or(el.id);
        let root_node = index.element(root_element).map_or(el.start, |root| root.start);
        let MemberTraversal { structure, entered } = traverse_member(root_node, index, &mut visited);

        if !visited.contains(&el.start) {
            log::warn!(
                "element {} left start node {} unclaimed after traversal from {root_node}",
                el.id,
                el.start
            );
        }
        log::debug!(
            "forest member {}: root element {root_element}, root node {root_node}, {} nodes",
            members.len(),
            entered.len()
        );

        let elements = entered
            .iter()
            .flat_map(|&node| index.outgoing(node).iter().copied())
            .collect();
        members.push(ForestMember {
            root_element,
            root_node,
            structure,
            nodes: entered,
            elements,
        });
    }

    let forest = Forest {
        members,
        nodes: index.nodes().collect(),
    };
    forest.debug_assert_invariants();
    forest
}
