//! Maximal non-branching paths and a branching summary of an element graph.
//!
//! A quick structural overview independent of forest decomposition: every
//! run of nodes that can be walked without meeting a choice, the nodes where
//! choices (or merges) happen, and whether the graph is a tree at all (no
//! node with more than one incoming element).

use std::collections::{BTreeMap, BTreeSet};

use hashbrown::HashSet;
use itertools::Itertools;

use crate::topology::connectivity::ConnectivityIndex;
use crate::topology::element::Element;
use crate::topology::point::NodeId;

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PathSummary {
    /// Maximal runs, in discovery order.
    pub paths: Vec<Vec<NodeId>>,
    /// Nodes with out-degree > 1 mapped to their successors, and nodes with
    /// in-degree > 1 additionally mapped to their predecessors.
    pub branching_nodes: BTreeMap<NodeId, Vec<NodeId>>,
    /// False as soon as some node has more than one incoming element.
    pub is_tree: bool,
}

/// Summarise the non-branching structure of `elements`.
///
/// Walks start from each start node in order of first appearance and extend
/// while the current node has exactly one successor that no walk has visited
/// yet. Nodes no walk reaches (successors of branching nodes that never start
/// an element) are reported as single-node paths, ascending.
pub fn non_branching_paths(elements: &[Element]) -> PathSummary {
    let index = ConnectivityIndex::build(elements);
    let mut visited: HashSet<NodeId> = HashSet::new();
    let mut paths = Vec::new();

    let starts = elements.iter().map(|el| el.start).unique();
    for start in starts {
        if visited.contains(&start) {
            continue;
        }
        let mut path = vec![start];
        visited.insert(start);
        let mut node = start;
        while let [next] = index.successors(node) {
            if !visited.insert(*next) {
                break;
            }
            path.push(*next);
            node = *next;
        }
        paths.push(path);
    }

    let terminals: BTreeSet<NodeId> = index.nodes().filter(|n| !visited.contains(n)).collect();
    paths.extend(terminals.into_iter().map(|n| vec![n]));

    let mut branching_nodes = BTreeMap::new();
    let mut is_tree = true;
    for node in index.nodes() {
        let successors = index.successors(node);
        if successors.len() > 1 {
            branching_nodes.insert(node, successors.to_vec());
        }
        let incoming = index.incoming(node);
        if incoming.len() > 1 {
            is_tree = false;
            let predecessors = incoming
                .iter()
                .filter_map(|&e| index.element(e).map(|el| el.start));
            let merged: BTreeSet<NodeId> = branching_nodes
                .remove(&node)
                .unwrap_or_default()
                .into_iter()
                .chain(predecessors)
                .collect();
            branching_nodes.insert(node, merged.into_iter().collect());
        }
    }

    PathSummary {
        paths,
        branching_nodes,
        is_tree,
    }
}
