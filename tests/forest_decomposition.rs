mod util;
use util::*;

use mesh_trace::DebugInvariants;
use mesh_trace::algs::root::{PredecessorTieBreak, backward_path, find_root};
use mesh_trace::forest::{ForestOptions, decompose, determine_forest};
use mesh_trace::topology::connectivity::ConnectivityIndex;
use mesh_trace::topology::element::Element;
use mesh_trace::topology::nested::Nested;
use mesh_trace::topology::point::ElementId;

fn eid(u: u64) -> ElementId {
    ElementId::new(u)
}

#[test]
fn disjoint_chains_do_not_share_visited_nodes() {
    let forest = determine_forest(
        &elements(&[(1, 2), (2, 3), (5, 6), (6, 7)]),
        &ForestOptions::default(),
    );
    let structures: Vec<_> = forest.structures().cloned().collect();
    assert_eq!(structures, vec![flat(&[1, 2, 3]), flat(&[5, 6, 7])]);
    assert_eq!(forest.members()[1].elements, vec![eid(3), eid(4)]);
    forest.validate_invariants().unwrap();
}

#[test]
fn fork_becomes_one_tree_member() {
    let forest = determine_forest(&elements(&[(1, 2), (1, 3)]), &ForestOptions::default());
    assert_eq!(forest.len(), 1);
    assert_eq!(
        forest.members()[0].structure,
        Nested::Branch(vec![leaf(1), flat(&[2]), flat(&[3])])
    );
}

#[test]
fn binary_tree_is_nested_by_level() {
    let forest = determine_forest(&elements(&binary_tree(3)), &ForestOptions::default());
    assert_eq!(forest.len(), 1);
    assert_eq!(
        forest.members()[0].structure,
        Nested::Branch(vec![
            leaf(1),
            Nested::Branch(vec![leaf(2), flat(&[4]), flat(&[5])]),
            Nested::Branch(vec![leaf(3), flat(&[6]), flat(&[7])]),
        ])
    );
    assert_eq!(forest.nodes().len(), 7);
    forest.validate_invariants().unwrap();
}

#[test]
fn ring_root_does_not_depend_on_listing_order() {
    let forward = determine_forest(&elements(&ring(5)), &ForestOptions::default());
    let mut reversed_pairs = ring(5);
    reversed_pairs.reverse();
    let reversed = determine_forest(&elements(&reversed_pairs), &ForestOptions::default());

    assert_eq!(forward.len(), 1);
    assert_eq!(reversed.len(), 1);
    assert_eq!(forward.members()[0].structure.leaf_count(), 6);
    assert_eq!(
        forward.members()[0].structure.first_leaf(),
        forward.members()[0].structure.last_leaf()
    );
    assert_eq!(
        reversed.members()[0].structure.first_leaf(),
        reversed.members()[0].structure.last_leaf()
    );
}

#[test]
fn merge_node_goes_to_the_first_member() {
    // 2 -> 3 <- 1, 3 -> 4; the lowest incoming element at 3 is 2 -> 3
    let forest = determine_forest(&elements(&[(3, 4), (2, 3), (1, 3)]), &ForestOptions::default());
    assert_eq!(forest.members()[0].root_element, eid(2));
    assert_eq!(forest.members()[0].structure, flat(&[2, 3, 4]));
    assert_eq!(forest.members()[1].structure, leaf(1));
    forest.validate_invariants().unwrap();
}

#[test]
fn tie_break_changes_the_root() {
    // 3 -> 4 is reached from 1 -> 3 (listed first, id 5) and 2 -> 3 (id 2)
    let els = vec![
        Element::new(1, 3, 4),
        Element::new(5, 1, 3),
        Element::new(2, 2, 3),
    ];
    let index = ConnectivityIndex::build(&els);
    assert_eq!(
        find_root(eid(1), &index, PredecessorTieBreak::LowestElementId),
        Ok(eid(2))
    );
    assert_eq!(
        backward_path(eid(1), &index, PredecessorTieBreak::FirstListed),
        Ok(vec![eid(1), eid(5)])
    );

    let lowest = decompose(&index, &ForestOptions::default());
    assert_eq!(lowest.members()[0].root_node, nid(2));

    let opts = ForestOptions {
        tie_break: PredecessorTieBreak::FirstListed,
    };
    let listed = decompose(&index, &opts);
    assert_eq!(listed.members()[0].root_node, nid(1));
    assert_eq!(listed.members()[0].structure, flat(&[1, 3, 4]));
}

#[test]
fn every_node_lands_in_exactly_one_member() {
    let pairs = [
        (1, 2),
        (2, 3),
        (3, 1),
        (3, 4),
        (10, 11),
        (12, 11),
        (11, 13),
        (13, 13),
        (20, 21),
    ];
    let forest = determine_forest(&elements(&pairs), &ForestOptions::default());
    forest.validate_invariants().unwrap();

    let claimed: Vec<_> = forest.iter().flat_map(|m| m.nodes.iter().copied()).collect();
    let all: Vec<_> = forest.nodes().iter().copied().collect();
    assert_permutation(&claimed, &all);
}
