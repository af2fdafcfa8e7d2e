//! Subtree membership and group trimming.
//!
//! Curated groups often include the junction node a branch hangs from
//! (`{8, 13, 14}` for a branch `[13, 14, ...]` leaving node 8). The helpers
//! here find, for every group, the most specific subtree that contains it and
//! trim the group to the part lying strictly below that subtree's head.

use std::collections::{BTreeMap, BTreeSet};

use crate::topology::labels::{Group, GroupPool};
use crate::topology::nested::Nested;
use crate::topology::point::NodeId;

/// Head identifier → identifiers of the subtree it heads.
pub type SubtreeMap<T = NodeId> = BTreeMap<T, BTreeSet<T>>;

/// Map every leaf to itself and the head (first leaf item) of every sequence
/// to the union of all identifiers in that sequence.
pub fn build_subtree_map<T: Ord + Clone>(tree: &Nested<T>) -> SubtreeMap<T> {
    let mut map = SubtreeMap::new();
    let items = match tree {
        Nested::Leaf(v) => {
            map.insert(v.clone(), BTreeSet::from([v.clone()]));
            return map;
        }
        Nested::Branch(items) => items,
    };

    // open sequences: remaining items, head, identifiers collected so far
    let mut open = vec![(items.iter(), items.first(), BTreeSet::new())];
    while let Some((rest, head, all)) = open.last_mut() {
        match rest.next() {
            Some(Nested::Leaf(v)) => {
                map.entry(v.clone()).or_default().insert(v.clone());
                all.insert(v.clone());
            }
            Some(Nested::Branch(sub)) => open.push((sub.iter(), sub.first(), BTreeSet::new())),
            None => {
                let all = std::mem::take(all);
                if let Some(Nested::Leaf(head)) = head {
                    map.entry(head.clone()).or_default().extend(all.iter().cloned());
                }
                open.pop();
                if let Some((_, _, parent)) = open.last_mut() {
                    parent.extend(all);
                }
            }
        }
    }
    map
}

/// Trim every group to its most specific containing subtree.
///
/// The smallest subtree holding all of a group's identifiers wins (ties go to
/// the lowest head id); the group keeps only identifiers of that subtree
/// other than its head. Groups no subtree contains are kept unchanged.
pub fn trim_groups(groups: &GroupPool, subtrees: &SubtreeMap) -> GroupPool {
    groups
        .iter()
        .map(|group| {
            let best = subtrees
                .iter()
                .filter(|(_, members)| group.node_ids.is_subset(members))
                .min_by_key(|(_, members)| members.len());
            match best {
                Some((head, members)) => Group {
                    label: group.label.clone(),
                    node_ids: group
                        .node_ids
                        .iter()
                        .filter(|id| *id != head && members.contains(*id))
                        .copied()
                        .collect(),
                },
                None => group.clone(),
            }
        })
        .collect()
}
