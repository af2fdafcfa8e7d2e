//! Nested: the integer-or-list shape of a decomposed mesh component.
//!
//! A forest member is either a single node (`Leaf`) or an ordered sequence
//! (`Branch`) whose items are themselves nested structures. Non-branching
//! chains stay flat inside one sequence; a node with several successors is
//! followed by one sublist per outgoing branch:
//!
//! ```text
//! 1 → 2 → 3          [1, 2, 3]
//! 1 → 2, 1 → 3       [1, [2], [3]]
//! ```
//!
//! The same type carries resolved point values, so mapping an identifier
//! structure with [`Nested::map`] yields a point structure of exactly the same
//! shape. Positions of sublists are addressed by [`BranchPath`].

use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use itertools::Itertools;
use serde::{Deserialize, Serialize};

use crate::mesh_error::MeshTraceError;

/// Tagged union of a leaf value or an ordered list of nested values.
///
/// Serializes untagged, so `Branch([Leaf(1), Branch([Leaf(2)])])` prints as
/// `[1,[2]]`.
///
/// A mesh with many successive branch points nests just as deeply, so the
/// structural operations here (clone, equality, drop, [`Nested::map`],
/// [`Nested::visit_sublists`]) run on explicit stacks. Serialization follows
/// the serializer's own recursion.
#[derive(Debug, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Nested<T> {
    Leaf(T),
    Branch(Vec<Nested<T>>),
}

impl<T> Nested<T> {
    /// A sequence of bare leaves.
    pub fn flat<I>(values: I) -> Self
    where
        I: IntoIterator<Item = T>,
    {
        Nested::Branch(values.into_iter().map(Nested::Leaf).collect())
    }

    /// Returns the leaf value, or `None` for a sequence.
    #[inline]
    pub fn as_leaf(&self) -> Option<&T> {
        match self {
            Nested::Leaf(v) => Some(v),
            Nested::Branch(_) => None,
        }
    }

    #[inline]
    pub fn is_leaf(&self) -> bool {
        matches!(self, Nested::Leaf(_))
    }

    /// Items of a sequence; a leaf has none.
    #[inline]
    pub fn items(&self) -> &[Nested<T>] {
        match self {
            Nested::Leaf(_) => &[],
            Nested::Branch(items) => items,
        }
    }

    /// True for a leaf or for a sequence holding only leaves.
    pub fn is_flat(&self) -> bool {
        self.items().iter().all(Nested::is_leaf)
    }

    /// Leaf values in reading order (depth-first, left to right).
    pub fn leaves(&self) -> Leaves<'_, T> {
        Leaves {
            pending: Some(self),
            stack: Vec::new(),
        }
    }

    pub fn leaf_count(&self) -> usize {
        self.leaves().count()
    }

    /// True when the structure holds no leaf at all.
    pub fn is_empty(&self) -> bool {
        self.leaves().next().is_none()
    }

    pub fn first_leaf(&self) -> Option<&T> {
        self.leaves().next()
    }

    pub fn last_leaf(&self) -> Option<&T> {
        self.leaves().last()
    }

    /// Maps every leaf through `f`, preserving the shape exactly.
    pub fn map<U, F>(&self, f: &mut F) -> Nested<U>
    where
        F: FnMut(&T) -> U,
    {
        let items = match self {
            Nested::Leaf(v) => return Nested::Leaf(f(v)),
            Nested::Branch(items) => items,
        };

        // one frame per open sequence: remaining source items, mapped so far
        let mut frames = vec![(items.iter(), Vec::with_capacity(items.len()))];
        let mut finished = Nested::Branch(Vec::new());
        while let Some((source, built)) = frames.last_mut() {
            match source.next() {
                Some(Nested::Leaf(v)) => built.push(Nested::Leaf(f(v))),
                Some(Nested::Branch(sub)) => {
                    frames.push((sub.iter(), Vec::with_capacity(sub.len())));
                }
                None => {
                    let done = Nested::Branch(std::mem::take(built));
                    frames.pop();
                    match frames.last_mut() {
                        Some((_, parent)) => parent.push(done),
                        None => finished = done,
                    }
                }
            }
        }
        finished
    }

    /// Follows `path` from this node, one item index per level.
    pub fn get(&self, path: &[usize]) -> Option<&Nested<T>> {
        path.iter()
            .try_fold(self, |node, &idx| node.items().get(idx))
    }

    /// Calls `visit` with every sequence below this node, in pre-order,
    /// together with its item-index path. The node itself is not visited.
    pub fn visit_sublists<'a, F>(&'a self, mut visit: F)
    where
        F: FnMut(&[usize], &'a Nested<T>),
    {
        fn push_branches<'a, T>(
            pending: &mut Vec<(usize, usize, &'a Nested<T>)>,
            depth: usize,
            node: &'a Nested<T>,
        ) {
            for (idx, item) in node.items().iter().enumerate().rev() {
                if !item.is_leaf() {
                    pending.push((depth, idx, item));
                }
            }
        }

        let mut path = Vec::new();
        let mut pending = Vec::new();
        push_branches(&mut pending, 0, self);
        while let Some((depth, idx, node)) = pending.pop() {
            path.truncate(depth);
            path.push(idx);
            visit(&path, node);
            push_branches(&mut pending, depth + 1, node);
        }
    }

    /// Every sequence below this node, in pre-order, with its path.
    ///
    /// The node itself is not reported.
    pub fn sublists(&self) -> Vec<(BranchPath, &Nested<T>)> {
        let mut out = Vec::new();
        self.visit_sublists(|path, node| out.push((BranchPath(path.to_vec()), node)));
        out
    }
}

impl<T: Clone> Nested<T> {
    /// Leaf values in reading order.
    pub fn flatten(&self) -> Vec<T> {
        self.leaves().cloned().collect()
    }
}

impl<T: Ord + Clone> Nested<T> {
    /// The set of distinct leaf values.
    pub fn leaf_set(&self) -> BTreeSet<T> {
        self.leaves().cloned().collect()
    }
}

impl<T: Clone> Clone for Nested<T> {
    fn clone(&self) -> Self {
        self.map(&mut T::clone)
    }
}

impl<T: PartialEq> PartialEq for Nested<T> {
    fn eq(&self, other: &Self) -> bool {
        let mut pending = vec![(self, other)];
        while let Some((a, b)) = pending.pop() {
            match (a, b) {
                (Nested::Leaf(x), Nested::Leaf(y)) => {
                    if x != y {
                        return false;
                    }
                }
                (Nested::Branch(xs), Nested::Branch(ys)) => {
                    if xs.len() != ys.len() {
                        return false;
                    }
                    pending.extend(xs.iter().zip(ys));
                }
                _ => return false,
            }
        }
        true
    }
}

impl<T: Eq> Eq for Nested<T> {}

impl<T> Drop for Nested<T> {
    fn drop(&mut self) {
        let Nested::Branch(items) = self else {
            return;
        };
        if items.iter().all(Nested::is_leaf) {
            return;
        }
        // detach nested sequences so each one drops with no children left
        let mut pending = std::mem::take(items);
        while let Some(mut item) = pending.pop() {
            if let Nested::Branch(sub) = &mut item {
                pending.append(sub);
            }
        }
    }
}

impl<T> From<T> for Nested<T> {
    fn from(value: T) -> Self {
        Nested::Leaf(value)
    }
}

/// Depth-first iterator over the leaves of a [`Nested`].
pub struct Leaves<'a, T> {
    pending: Option<&'a Nested<T>>,
    stack: Vec<std::slice::Iter<'a, Nested<T>>>,
}

impl<'a, T> Iterator for Leaves<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let node = match self.pending.take() {
                Some(node) => node,
                None => {
                    let top = self.stack.last_mut()?;
                    match top.next() {
                        Some(node) => node,
                        None => {
                            self.stack.pop();
                            continue;
                        }
                    }
                }
            };
            match node {
                Nested::Leaf(v) => return Some(v),
                Nested::Branch(items) => self.stack.push(items.iter()),
            }
        }
    }
}

/// Position of a sublist inside a nested structure: one item index per
/// nesting level, starting at the member root.
///
/// Displays and serializes as dot-separated indices (`"2.1"`); the root is
/// the empty path.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub struct BranchPath(Vec<usize>);

impl BranchPath {
    pub fn root() -> Self {
        BranchPath(Vec::new())
    }

    pub fn indices(&self) -> &[usize] {
        &self.0
    }

    pub fn depth(&self) -> usize {
        self.0.len()
    }

    /// The path one level further down at item `idx`.
    pub fn child(&self, idx: usize) -> Self {
        let mut inner = self.0.clone();
        inner.push(idx);
        BranchPath(inner)
    }
}

impl From<Vec<usize>> for BranchPath {
    fn from(indices: Vec<usize>) -> Self {
        BranchPath(indices)
    }
}

impl fmt::Display for BranchPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.iter().join("."))
    }
}

impl FromStr for BranchPath {
    type Err = MeshTraceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.is_empty() {
            return Ok(BranchPath::root());
        }
        s.split('.')
            .map(|part| part.parse::<usize>())
            .collect::<Result<Vec<_>, _>>()
            .map(BranchPath)
            .map_err(|_| MeshTraceError::InvalidBranchPath(s.to_string()))
    }
}

impl From<BranchPath> for String {
    fn from(path: BranchPath) -> Self {
        path.to_string()
    }
}

impl TryFrom<String> for BranchPath {
    type Error = MeshTraceError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}
