//! Group label storage for curated node annotations.
//!
//! A [`Group`] names a set of nodes (an anatomical term URI, a free-text set
//! name, ...). The [`GroupPool`] holds every group supplied for one
//! classification pass and hands labels out to classified structures by
//! *exact* identifier-set equality. A matched label is removed from the pool,
//! so each label is attached to at most one structure; the order in which
//! structures query the pool therefore decides who gets a label.

use std::collections::BTreeSet;

use itertools::Itertools;
use serde::{Deserialize, Serialize};

use crate::topology::point::NodeId;

/// A labeled set of node identifiers.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Group {
    pub label: String,
    pub node_ids: BTreeSet<NodeId>,
}

impl Group {
    pub fn new<I>(label: impl Into<String>, node_ids: I) -> Self
    where
        I: IntoIterator<Item = NodeId>,
    {
        Group {
            label: label.into(),
            node_ids: node_ids.into_iter().collect(),
        }
    }

    /// Convenience constructor from raw node identifiers.
    pub fn from_raw<I>(label: impl Into<String>, raw: I) -> Self
    where
        I: IntoIterator<Item = u64>,
    {
        Self::new(label, raw.into_iter().map(NodeId::new))
    }
}

/// Mutable label → identifier-set table, in supply order.
///
/// Labels are unique keys: inserting an existing label replaces its set and
/// keeps its original position.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GroupPool {
    groups: Vec<Group>,
}

impl GroupPool {
    /// Creates an empty pool.
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a group, returning the set previously stored under its label.
    pub fn insert(&mut self, group: Group) -> Option<BTreeSet<NodeId>> {
        match self.groups.iter().position(|g| g.label == group.label) {
            Some(idx) => Some(std::mem::replace(
                &mut self.groups[idx].node_ids,
                group.node_ids,
            )),
            None => {
                self.groups.push(group);
                None
            }
        }
    }

    /// Returns the identifier set stored under `label`.
    pub fn get(&self, label: &str) -> Option<&BTreeSet<NodeId>> {
        self.groups
            .iter()
            .find(|g| g.label == label)
            .map(|g| &g.node_ids)
    }

    pub fn contains_label(&self, label: &str) -> bool {
        self.get(label).is_some()
    }

    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Labels in supply order.
    pub fn labels(&self) -> impl Iterator<Item = &str> + '_ {
        self.groups.iter().map(|g| g.label.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = &Group> + '_ {
        self.groups.iter()
    }

    /// Distinct identifier sets in first-supplied order.
    ///
    /// Empty sets are skipped when `skip_empty` is set.
    pub fn distinct_sets(&self, skip_empty: bool) -> Vec<BTreeSet<NodeId>> {
        self.groups
            .iter()
            .map(|g| &g.node_ids)
            .filter(|ids| !(skip_empty && ids.is_empty()))
            .unique()
            .cloned()
            .collect()
    }

    /// Size of the largest identifier set still in the pool.
    pub fn largest_set(&self) -> Option<usize> {
        self.groups.iter().map(|g| g.node_ids.len()).max()
    }

    /// Removes and returns, in pool order, every label whose identifier set
    /// equals `target` exactly. Leaves the pool untouched when nothing
    /// matches.
    pub fn match_and_consume(&mut self, target: &BTreeSet<NodeId>) -> Vec<String> {
        let mut matched = Vec::new();
        self.groups.retain(|g| {
            if &g.node_ids == target {
                matched.push(g.label.clone());
                false
            } else {
                true
            }
        });
        matched
    }
}

impl FromIterator<Group> for GroupPool {
    fn from_iter<I: IntoIterator<Item = Group>>(iter: I) -> Self {
        let mut pool = GroupPool::new();
        for group in iter {
            pool.insert(group);
        }
        pool
    }
}

impl Extend<Group> for GroupPool {
    fn extend<I: IntoIterator<Item = Group>>(&mut self, iter: I) {
        for group in iter {
            self.insert(group);
        }
    }
}

impl IntoIterator for GroupPool {
    type Item = Group;
    type IntoIter = std::vec::IntoIter<Group>;

    fn into_iter(self) -> Self::IntoIter {
        self.groups.into_iter()
    }
}
