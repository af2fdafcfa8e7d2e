//! Re-nesting of identifier sequences along curated group boundaries.
//!
//! Forward traversal only knows physical adjacency: a chain that a curator
//! split into named segments comes out as one flat run. Given the identifier
//! sets of the supplied groups, [`renest`] re-imposes those boundaries
//! syntactically. For each group set, in supply order:
//!
//! 1. if the current level already *starts* with a window of leaves equal to
//!    the set, the structure is correctly nested there and left alone;
//! 2. otherwise existing sublists are searched first, left to right;
//! 3. otherwise the first contiguous window of leaves at this level equal to
//!    the set (as an unordered set) is closed into a sublist together with
//!    everything after it.
//!
//! Each group is applied at most once. Reading the leaves in order before and
//! after re-nesting gives the same sequence.
//!
//! ```text
//! [1, 2, 3, 4, 5, [6, 7]]   {3,4} then {5}   →   [1, 2, [3, 4, [5, [6, 7]]]]
//! ```

use std::collections::BTreeSet;

use crate::topology::nested::Nested;

/// Position of the first contiguous window of leaves in `items` whose values
/// form exactly `target`. Empty inputs never match.
pub fn find_matching_subsequence<T: Ord>(
    items: &[Nested<T>],
    target: &BTreeSet<T>,
) -> Option<usize> {
    let width = target.len();
    if width == 0 || items.len() < width {
        return None;
    }
    items.windows(width).position(|window| {
        let mut values = BTreeSet::new();
        window.iter().all(|item| match item.as_leaf() {
            Some(v) => target.contains(v) && values.insert(v),
            None => false,
        })
    })
}

/// Apply one group set to `structure`.
pub fn nest_sequence<T: Ord>(mut structure: Nested<T>, target: &BTreeSet<T>) -> Nested<T> {
    if let Nested::Branch(items) = &mut structure {
        if let Placement::Split { path, start } = locate(items, target) {
            if let Some(level) = level_mut(items, &path) {
                let tail = level.split_off(start);
                level.push(Nested::Branch(tail));
            }
        }
    }
    structure
}

/// Apply every group set in order.
pub fn renest<T: Ord>(structure: Nested<T>, group_sets: &[BTreeSet<T>]) -> Nested<T> {
    group_sets
        .iter()
        .fold(structure, |acc, target| nest_sequence(acc, target))
}

#[derive(Debug, PartialEq, Eq)]
enum Placement {
    AlreadyNested,
    /// Close the level at `path` into a sublist from item `start` on.
    Split { path: Vec<usize>, start: usize },
    NotFound,
}

struct Level<'a, T> {
    items: &'a [Nested<T>],
    found: Option<usize>,
    next: usize,
}

/// Where `target` goes. A level that starts with the target window is
/// already nested. Otherwise sublists are searched left to right before the
/// level's own window is used.
fn locate<T: Ord>(items: &[Nested<T>], target: &BTreeSet<T>) -> Placement {
    let found = find_matching_subsequence(items, target);
    if found == Some(0) {
        return Placement::AlreadyNested;
    }

    let mut path: Vec<usize> = Vec::new();
    let mut levels = vec![Level {
        items,
        found,
        next: 0,
    }];
    while let Some(level) = levels.last_mut() {
        let items = level.items;
        let branch = items[level.next..]
            .iter()
            .position(|item| !item.is_leaf())
            .map(|offset| level.next + offset);
        match branch {
            Some(idx) => {
                level.next = idx + 1;
                let sub = items[idx].items();
                let found = find_matching_subsequence(sub, target);
                if found == Some(0) {
                    return Placement::AlreadyNested;
                }
                path.push(idx);
                levels.push(Level {
                    items: sub,
                    found,
                    next: 0,
                });
            }
            None => {
                if let Some(start) = level.found {
                    return Placement::Split { path, start };
                }
                levels.pop();
                path.pop();
            }
        }
    }
    Placement::NotFound
}

fn level_mut<'a, T>(
    mut items: &'a mut Vec<Nested<T>>,
    path: &[usize],
) -> Option<&'a mut Vec<Nested<T>>> {
    for &idx in path {
        match items.get_mut(idx) {
            Some(Nested::Branch(sub)) => items = sub,
            _ => return None,
        }
    }
    Some(items)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn l(v: u32) -> Nested<u32> {
        Nested::Leaf(v)
    }

    fn b(items: Vec<Nested<u32>>) -> Nested<u32> {
        Nested::Branch(items)
    }

    fn set(values: &[u32]) -> BTreeSet<u32> {
        values.iter().copied().collect()
    }

    #[test]
    fn already_nested_is_untouched() {
        let data = b(vec![l(1), l(2), b(vec![l(3), l(4), b(vec![l(5), b(vec![l(6), l(7)])])])]);
        let out = renest(data.clone(), &[set(&[3, 4]), set(&[5])]);
        assert_eq!(out, data);
    }

    #[test]
    fn flat_input_is_nested_group_by_group() {
        let data = b(vec![l(1), l(2), l(3), l(4), l(5), b(vec![l(6), l(7)])]);
        let expected = b(vec![l(1), l(2), b(vec![l(3), l(4), b(vec![l(5), b(vec![l(6), l(7)])])])]);
        assert_eq!(renest(data, &[set(&[3, 4]), set(&[5])]), expected);
    }

    #[test]
    fn deep_input_is_nested_in_place() {
        let data = b(vec![l(1), l(2), b(vec![l(3), l(4), l(5), b(vec![l(6), l(7)])])]);
        let expected = b(vec![l(1), l(2), b(vec![l(3), b(vec![l(4), l(5), b(vec![l(6), l(7)])])])]);
        assert_eq!(renest(data, &[set(&[4, 5])]), expected);
    }

    #[test]
    fn missing_group_changes_nothing() {
        let data = b(vec![l(1), l(2), l(3), l(4), l(5), b(vec![l(6), l(7)])]);
        assert_eq!(renest(data.clone(), &[set(&[8, 9])]), data);
        assert_eq!(renest(data.clone(), &[]), data);
    }

    #[test]
    fn empty_structure_stays_empty() {
        let out = renest(b(vec![]), &[set(&[3, 4]), set(&[5])]);
        assert_eq!(out, b(vec![]));
        assert_eq!(nest_sequence(l(3), &set(&[3])), l(3));
    }

    #[test]
    fn window_order_does_not_matter() {
        let data = b(vec![l(1), l(4), l(3), l(5)]);
        assert_eq!(
            nest_sequence(data, &set(&[3, 4])),
            b(vec![l(1), b(vec![l(4), l(3), l(5)])])
        );
    }

    #[test]
    fn find_subsequence() {
        let data = vec![l(1), l(2), l(3), l(4), b(vec![l(5), b(vec![l(6), l(7)])])];
        assert_eq!(find_matching_subsequence(&data, &set(&[3, 4])), Some(2));
        assert_eq!(find_matching_subsequence(&data, &set(&[3, 5])), None);
        assert_eq!(find_matching_subsequence(&[], &set(&[1, 2])), None);
        assert_eq!(find_matching_subsequence(&data, &set(&[])), None);
    }

    #[test]
    fn repeated_value_never_fills_a_window() {
        let data = vec![l(2), l(2), l(3)];
        assert_eq!(find_matching_subsequence(&data, &set(&[2, 3])), Some(1));
    }

    #[test]
    fn placement_prefers_the_deepest_earliest_sublist() {
        let data = vec![l(1), l(2), l(3), b(vec![l(4), l(2), l(3)])];
        assert_eq!(
            locate(&data, &set(&[2, 3])),
            Placement::Split {
                path: vec![3],
                start: 1
            }
        );
        assert_eq!(locate(&data, &set(&[1, 2])), Placement::AlreadyNested);
        assert_eq!(locate(&data, &set(&[9])), Placement::NotFound);
    }

    #[test]
    fn deep_structures_are_renested_in_place() {
        // [0, [1, [2, ... [depth - 1, depth, depth + 1]]]]
        let depth = 100_000u32;
        let mut deep = b(vec![l(depth - 1), l(depth), l(depth + 1)]);
        for v in (0..depth - 1).rev() {
            deep = b(vec![l(v), deep]);
        }
        let out = nest_sequence(deep, &set(&[depth, depth + 1]));

        let mut path = vec![1; depth as usize - 1];
        assert_eq!(out.get(&path).map(Nested::leaf_count), Some(3));
        path.push(1);
        assert_eq!(out.get(&path).map(Nested::flatten), Some(vec![depth, depth + 1]));
    }
}
