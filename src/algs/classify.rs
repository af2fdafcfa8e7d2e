//! Contour/tree classification of forest members.
//!
//! Each member goes through `Unclassified → {Contour, Tree} → Finalized`:
//!
//! * **Contour** when its structure is a flat run of identifiers *and* no
//!   supplied group is a proper subset of its identifiers (a strict sub-group
//!   implies internal branching the traversal could not see). A contour whose
//!   first and last identifiers coincide is a closed loop: both boundary
//!   occurrences are dropped and `closed` is recorded.
//! * **Tree** otherwise. The structure is re-nested along the supplied group
//!   boundaries and every sublist may receive its own labels, keyed by its
//!   [`BranchPath`].
//!
//! Leaves are then resolved into points through a [`NodeResolver`], keeping
//! the structure's shape, and labels are taken from the shared [`GroupPool`]
//! by exact identifier-set match. Members are processed in forest order, so
//! an earlier member wins a label that several members could claim.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use crate::algs::renest::renest;
use crate::data::colour::DEFAULT_COLOUR;
use crate::data::point::Point;
use crate::data::source::NodeResolver;
use crate::forest::{Forest, ForestMember};
use crate::topology::labels::GroupPool;
use crate::topology::nested::{BranchPath, Nested};
use crate::topology::point::NodeId;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Contour,
    Tree,
}

/// Member-wide metadata.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GlobalMetadata {
    /// Labels whose identifier set equals the member's identifier set.
    pub labels: Vec<String>,
    pub colour: String,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub closed: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resolution: Option<f64>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Metadata {
    pub global: GlobalMetadata,
    /// Labels attached to individual tree branches.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub indexed: BTreeMap<BranchPath, Vec<String>>,
}

/// One classified forest member.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ClassificationRecord {
    pub category: Category,
    /// Final identifier structure (after closing or re-nesting).
    pub identifiers: Nested<NodeId>,
    /// `identifiers` with every leaf resolved; `None` where resolution failed.
    pub points: Nested<Option<Point>>,
    pub metadata: Metadata,
}

impl ClassificationRecord {
    /// True when there is nothing to write for this record.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn is_closed(&self) -> bool {
        self.metadata.global.closed
    }

    /// Every label attached to this record, global ones first.
    pub fn all_labels(&self) -> impl Iterator<Item = &str> + '_ {
        self.metadata
            .global
            .labels
            .iter()
            .chain(self.metadata.indexed.values().flatten())
            .map(String::as_str)
    }
}

/// Classified members split by category, each in forest order.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Classification {
    pub contours: Vec<ClassificationRecord>,
    pub trees: Vec<ClassificationRecord>,
}

impl Classification {
    pub fn len(&self) -> usize {
        self.contours.len() + self.trees.len()
    }

    pub fn is_empty(&self) -> bool {
        self.contours.is_empty() && self.trees.is_empty()
    }

    /// Contours, then trees.
    pub fn records(&self) -> impl Iterator<Item = &ClassificationRecord> + '_ {
        self.contours.iter().chain(self.trees.iter())
    }
}

/// Options for [`classify_forest`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClassifyOptions {
    /// Colour recorded when the resolver has none for the start node.
    pub default_colour: String,
    /// Re-nest tree structures along group boundaries.
    pub renest_trees: bool,
    /// Attach labels to individual tree branches.
    pub index_branch_labels: bool,
    /// Leave groups with no identifiers out of sub-group detection and
    /// re-nesting. Off by default, so an empty group turns every non-empty
    /// member into a tree.
    pub ignore_empty_groups: bool,
}

impl Default for ClassifyOptions {
    fn default() -> Self {
        Self {
            default_colour: DEFAULT_COLOUR.to_string(),
            renest_trees: true,
            index_branch_labels: true,
            ignore_empty_groups: false,
        }
    }
}

/// Classify every member of `forest`, consuming matched labels from `pool`.
pub fn classify_forest<R>(
    forest: &Forest,
    resolver: &R,
    pool: &mut GroupPool,
    opts: &ClassifyOptions,
) -> Classification
where
    R: NodeResolver + ?Sized,
{
    let group_sets = pool.distinct_sets(opts.ignore_empty_groups);
    let mut out = Classification::default();

    for (idx, member) in forest.iter().enumerate() {
        let record = classify_member(member, resolver, pool, &group_sets, opts);
        log::debug!(
            "forest member {idx}: {:?}, {} points, closed={}, {} labels",
            record.category,
            record.points.leaf_count(),
            record.is_closed(),
            record.all_labels().count()
        );
        match record.category {
            Category::Contour => out.contours.push(record),
            Category::Tree => out.trees.push(record),
        }
    }
    out
}

/// Classify a single member against the supplied group sets.
pub fn classify_member<R>(
    member: &ForestMember,
    resolver: &R,
    pool: &mut GroupPool,
    group_sets: &[BTreeSet<NodeId>],
    opts: &ClassifyOptions,
) -> ClassificationRecord
where
    R: NodeResolver + ?Sized,
{
    let ids = member.structure.leaf_set();
    let is_contour = member.structure.is_flat() && !has_strict_subgroup(group_sets, &ids);

    let mut closed = false;
    let identifiers = if is_contour {
        let mut run = member.structure.flatten();
        if run.len() > 1 && run.first() == run.last() {
            closed = true;
            run.remove(0);
            run.pop();
        }
        Nested::flat(run)
    } else if opts.renest_trees {
        renest(member.structure.clone(), group_sets)
    } else {
        member.structure.clone()
    };
    let category = if is_contour {
        Category::Contour
    } else {
        Category::Tree
    };

    let points = identifiers.map(&mut |&node| {
        let point = resolver.point(node);
        if point.is_none() {
            log::debug!("no point resolved for node {node}");
        }
        point
    });

    let start = identifiers
        .first_leaf()
        .copied()
        .unwrap_or(member.root_node);
    let colour = resolver
        .colour(start)
        .unwrap_or_else(|| opts.default_colour.clone());
    let resolution = resolver.resolution(start);

    let mut labels = Vec::new();
    let mut indexed = BTreeMap::new();
    if !identifiers.is_empty() {
        labels = pool.match_and_consume(&ids);
        if category == Category::Tree && opts.index_branch_labels {
            // branches larger than every remaining group cannot match
            let mut limit = pool.largest_set();
            identifiers.visit_sublists(|path, branch| {
                let Some(set) = limit.and_then(|max| leaf_set_within(branch, max)) else {
                    return;
                };
                let branch_labels = pool.match_and_consume(&set);
                if !branch_labels.is_empty() {
                    indexed.insert(BranchPath::from(path.to_vec()), branch_labels);
                    limit = pool.largest_set();
                }
            });
        }
    }

    ClassificationRecord {
        category,
        identifiers,
        points,
        metadata: Metadata {
            global: GlobalMetadata {
                labels,
                colour,
                closed,
                resolution,
            },
            indexed,
        },
    }
}

/// Leaf identifiers of `branch`, or `None` once more than `max` are seen.
fn leaf_set_within(branch: &Nested<NodeId>, max: usize) -> Option<BTreeSet<NodeId>> {
    let mut set = BTreeSet::new();
    for &leaf in branch.leaves() {
        set.insert(leaf);
        if set.len() > max {
            return None;
        }
    }
    Some(set)
}

/// True when some set is a proper subset of `outer`.
fn has_strict_subgroup(group_sets: &[BTreeSet<NodeId>], outer: &BTreeSet<NodeId>) -> bool {
    group_sets
        .iter()
        .any(|set| set.len() < outer.len() && set.is_subset(outer))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::source::{FnResolver, InMemoryNodeData};
    use crate::forest::{ForestOptions, determine_forest};
    use crate::topology::element::elements_from_pairs;
    use crate::topology::labels::Group;

    fn n(raw: u64) -> NodeId {
        NodeId::new(raw)
    }

    fn unit_points() -> FnResolver<impl Fn(NodeId) -> Option<Point>> {
        FnResolver(|node: NodeId| Some(Point::new(node.get() as f64, 0.0, 0.0, 1.0)))
    }

    fn classify(pairs: &[(u64, u64)], pool: &mut GroupPool) -> Classification {
        let forest = determine_forest(&elements_from_pairs(pairs), &ForestOptions::default());
        classify_forest(&forest, &unit_points(), pool, &ClassifyOptions::default())
    }

    #[test]
    fn open_chain_is_an_open_contour() {
        let out = classify(&[(1, 2), (2, 3)], &mut GroupPool::new());
        assert_eq!(out.contours.len(), 1);
        let record = &out.contours[0];
        assert!(!record.is_closed());
        assert_eq!(record.points.leaf_count(), 3);
        assert_eq!(record.metadata.global.colour, DEFAULT_COLOUR);
        assert_eq!(record.metadata.global.resolution, None);
    }

    #[test]
    fn strict_subgroup_forces_tree() {
        let mut pool: GroupPool = [Group::from_raw("middle", [2, 3])].into_iter().collect();
        let out = classify(&[(1, 2), (2, 3), (3, 4)], &mut pool);
        assert!(out.contours.is_empty());
        let tree = &out.trees[0];
        // [1, [2, 3, 4]] after re-nesting on {2, 3}
        assert_eq!(
            tree.identifiers,
            Nested::Branch(vec![
                Nested::Leaf(n(1)),
                Nested::flat([n(2), n(3), n(4)]),
            ])
        );
        assert!(pool.contains_label("middle"));
    }

    #[test]
    fn branch_labels_are_indexed_by_path() {
        // 1 → 2, 1 → 3 → 4
        let mut pool: GroupPool = [
            Group::from_raw("whole", [1, 2, 3, 4]),
            Group::from_raw("upper", [3, 4]),
            Group::from_raw("ignored", [1, 3]),
        ]
        .into_iter()
        .collect();
        let out = classify(&[(1, 2), (1, 3), (3, 4)], &mut pool);
        let tree = &out.trees[0];
        assert_eq!(tree.metadata.global.labels, vec!["whole"]);
        assert_eq!(
            tree.metadata.indexed,
            BTreeMap::from([(BranchPath::from(vec![2]), vec!["upper".to_string()])])
        );
        assert_eq!(pool.labels().collect::<Vec<_>>(), vec!["ignored"]);
    }

    #[test]
    fn start_node_attributes_are_recorded() {
        let mut data = InMemoryNodeData::new();
        for raw in 1..=3 {
            data.set_point(n(raw), Point::new(raw as f64, 0.0, 0.0, 2.0));
        }
        data.set_colour(n(1), "#00FF00");
        data.set_resolution(n(1), 0.25);

        let forest =
            determine_forest(&elements_from_pairs(&[(1, 2), (2, 3)]), &ForestOptions::default());
        let out = classify_forest(&forest, &data, &mut GroupPool::new(), &ClassifyOptions::default());
        let global = &out.contours[0].metadata.global;
        assert_eq!(global.colour, "#00FF00");
        assert_eq!(global.resolution, Some(0.25));
    }

    #[test]
    fn missing_points_stay_in_place() {
        let resolver = FnResolver(|node: NodeId| {
            (node.get() != 2).then(|| Point::new(0.0, 0.0, 0.0, 1.0))
        });
        let forest =
            determine_forest(&elements_from_pairs(&[(1, 2), (2, 3)]), &ForestOptions::default());
        let out = classify_forest(&forest, &resolver, &mut GroupPool::new(), &ClassifyOptions::default());
        let points = out.contours[0].points.flatten();
        assert_eq!(points.len(), 3);
        assert!(points[1].is_none());
    }

    #[test]
    fn self_loop_finalizes_empty_without_consuming_labels() {
        let mut pool: GroupPool = [Group::from_raw("loop", [5])].into_iter().collect();
        let out = classify(&[(5, 5)], &mut pool);
        let record = &out.contours[0];
        assert!(record.is_empty());
        assert!(record.is_closed());
        assert!(record.metadata.global.labels.is_empty());
        assert!(pool.contains_label("loop"));
    }

    #[test]
    fn renesting_can_be_disabled() {
        let mut pool: GroupPool = [Group::from_raw("middle", [2, 3])].into_iter().collect();
        let forest = determine_forest(
            &elements_from_pairs(&[(1, 2), (2, 3), (3, 4)]),
            &ForestOptions::default(),
        );
        let opts = ClassifyOptions {
            renest_trees: false,
            ..Default::default()
        };
        let out = classify_forest(&forest, &unit_points(), &mut pool, &opts);
        assert_eq!(out.trees[0].identifiers, Nested::flat([1, 2, 3, 4].map(n)));
    }

    #[test]
    fn empty_group_is_a_strict_subgroup_of_any_chain() {
        let groups: GroupPool = [Group::from_raw("empty", Vec::<u64>::new())]
            .into_iter()
            .collect();
        let forest = determine_forest(
            &elements_from_pairs(&[(1, 2), (2, 3)]),
            &ForestOptions::default(),
        );

        let out = classify_forest(
            &forest,
            &unit_points(),
            &mut groups.clone(),
            &ClassifyOptions::default(),
        );
        assert!(out.contours.is_empty());
        assert_eq!(out.trees[0].identifiers, Nested::flat([1, 2, 3].map(n)));

        let opts = ClassifyOptions {
            ignore_empty_groups: true,
            ..Default::default()
        };
        let out = classify_forest(&forest, &unit_points(), &mut groups.clone(), &opts);
        assert!(out.trees.is_empty());
        assert_eq!(out.contours.len(), 1);
    }
}
