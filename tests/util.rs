#![allow(dead_code)]
use std::collections::BTreeSet;

use mesh_trace::{
    data::point::Point,
    data::source::InMemoryNodeData,
    topology::element::{Element, elements_from_pairs},
    topology::labels::Group,
    topology::nested::Nested,
    topology::point::NodeId,
};

pub fn nid(u: u64) -> NodeId {
    NodeId::new(u)
}

pub fn nids(raw: &[u64]) -> BTreeSet<NodeId> {
    raw.iter().copied().map(nid).collect()
}

pub fn flat(raw: &[u64]) -> Nested<NodeId> {
    Nested::flat(raw.iter().copied().map(nid))
}

pub fn leaf(u: u64) -> Nested<NodeId> {
    Nested::Leaf(nid(u))
}

/// Elements from (start -> end) pairs, ids numbered from 1.
pub fn elements(pairs: &[(u64, u64)]) -> Vec<Element> {
    elements_from_pairs(pairs)
}

pub fn group(label: &str, raw: &[u64]) -> Group {
    Group::from_raw(label, raw.iter().copied())
}

/// Every node of `pairs` placed on the x axis at its own id, diameter 1.
pub fn line_data(pairs: &[(u64, u64)]) -> InMemoryNodeData {
    let mut data = InMemoryNodeData::new();
    for &(a, b) in pairs {
        for raw in [a, b] {
            data.set_point(nid(raw), Point::new(raw as f64, 0.0, 0.0, 1.0));
        }
    }
    data
}

/// Complete binary tree with `levels` levels, node 1 at the top.
pub fn binary_tree(levels: u32) -> Vec<(u64, u64)> {
    let mut pairs = Vec::new();
    let mut start = 1u64;
    let mut end = 1u64;
    for _ in 1..levels {
        for parent in start..=end {
            pairs.push((parent, parent * 2));
            pairs.push((parent, parent * 2 + 1));
        }
        start = end + 1;
        end = end * 2 + 1;
    }
    pairs
}

/// Closed loop 1 -> 2 -> ... -> n -> 1.
pub fn ring(n: u64) -> Vec<(u64, u64)> {
    (1..=n).map(|i| (i, if i == n { 1 } else { i + 1 })).collect()
}

/// Spine 1 -> 2 -> ... -> len with a side node len + i hanging off every
/// spine node i, so every spine node past the first opens one more level.
pub fn comb(len: u64) -> Vec<(u64, u64)> {
    let spine = (1..len).map(|i| (i, i + 1));
    let sides = (1..=len).map(|i| (i, len + i));
    spine.chain(sides).collect()
}

/// Assert vec is a permutation of another vec (order-agnostic).
pub fn assert_permutation<T: Ord + Copy + std::fmt::Debug>(got: &[T], want: &[T]) {
    let mut a = got.to_vec();
    a.sort_unstable();
    let mut b = want.to_vec();
    b.sort_unstable();
    assert_eq!(a, b, "not a permutation\n got={:?}\nwant={:?}", got, want);
}
