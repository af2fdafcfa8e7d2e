//! Forward traversal that turns one mesh component into a [`Nested`] structure.
//!
//! Starting at a root node the traversal follows successor links:
//!
//! * **linear** – a node with one successor is appended to the current
//!   sequence and the walk continues, so non-branching chains stay flat;
//! * **branch** – a node with several successors closes the current sequence
//!   with one sublist per successor, ordered by ascending node id;
//! * **leaf** – a node without successors ends the sequence; a branch that
//!   consists of that single node is still wrapped as `[node]`;
//! * **cut** – a node already entered during this traversal is emitted as a
//!   bare terminal leaf and not expanded again. A loop `1 → 2 → 3 → 1`
//!   therefore reads `[1, 2, 3, 1]`.
//!
//! Two notions of "seen" are kept apart. The member-local *trail* drives the
//! cut rule above. The run-global `visited` set partitions nodes between
//! members: successors visited by an earlier member are dropped entirely, and
//! every node entered here is added to `visited` exactly once.
//!
//! Chains are walked in a loop and branch points push a frame onto an
//! explicit stack, so neither long chains nor deep branching grow the call
//! stack.

use hashbrown::HashSet;

use crate::topology::connectivity::ConnectivityIndex;
use crate::topology::nested::Nested;
use crate::topology::point::NodeId;

/// Run-global set of nodes already assigned to a forest member.
pub type VisitedNodes = HashSet<NodeId>;

/// Result of traversing one member.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MemberTraversal {
    pub structure: Nested<NodeId>,
    /// Nodes added to `visited` by this traversal, in entry order.
    pub entered: Vec<NodeId>,
}

/// Build the nested identifier structure reachable from `root`.
///
/// A `root` that an earlier member already visited yields an empty sequence.
pub fn build_nested(
    root: NodeId,
    index: &ConnectivityIndex,
    visited: &mut VisitedNodes,
) -> Nested<NodeId> {
    traverse_member(root, index, visited).structure
}

/// Like [`build_nested`], also reporting which nodes were newly visited.
pub fn traverse_member(
    root: NodeId,
    index: &ConnectivityIndex,
    visited: &mut VisitedNodes,
) -> MemberTraversal {
    if visited.contains(&root) {
        return MemberTraversal {
            structure: Nested::Branch(Vec::new()),
            entered: Vec::new(),
        };
    }

    let mut walker = Walker {
        index,
        visited,
        trail: HashSet::new(),
        entered: Vec::new(),
    };
    let structure = walker.descend(root);
    MemberTraversal {
        structure,
        entered: walker.entered,
    }
}

struct Walker<'a> {
    index: &'a ConnectivityIndex,
    visited: &'a mut VisitedNodes,
    trail: HashSet<NodeId>,
    entered: Vec<NodeId>,
}

impl Walker<'_> {
    fn enter(&mut self, node: NodeId) {
        self.trail.insert(node);
        if self.visited.insert(node) {
            self.entered.push(node);
        }
    }

    /// Successors still open to this member: unvisited ones, plus ones on the
    /// trail (which will be cut).
    fn open_successors(&self, node: NodeId) -> Vec<NodeId> {
        let index = self.index;
        index
            .successors(node)
            .iter()
            .copied()
            .filter(|s| self.trail.contains(s) || !self.visited.contains(s))
            .collect()
    }

    /// Follow the chain from `start` until it ends or forks.
    fn chain(&mut self, start: NodeId, in_branch: bool) -> Step {
        let mut run: Vec<Nested<NodeId>> = Vec::new();
        let mut node = start;

        loop {
            if self.trail.contains(&node) {
                if run.is_empty() {
                    return Step::Done(Nested::Leaf(node));
                }
                run.push(Nested::Leaf(node));
                return Step::Done(Nested::Branch(run));
            }

            self.enter(node);
            run.push(Nested::Leaf(node));

            let mut next = self.open_successors(node);
            match next.len() {
                0 => {
                    if run.len() == 1 && !in_branch {
                        return Step::Done(Nested::Leaf(node));
                    }
                    return Step::Done(Nested::Branch(run));
                }
                1 => node = next[0],
                _ => {
                    next.sort_unstable();
                    return Step::Fork(Fork {
                        run,
                        pending: next.into_iter(),
                    });
                }
            }
        }
    }

    fn descend(&mut self, root: NodeId) -> Nested<NodeId> {
        let mut forks: Vec<Fork> = Vec::new();
        let mut step = self.chain(root, false);

        loop {
            let mut finished = match step {
                Step::Fork(fork) => {
                    forks.push(fork);
                    None
                }
                Step::Done(nested) => Some(nested),
            };

            // attach finished sequences upward until some fork has a child left
            loop {
                let Some(fork) = forks.last_mut() else {
                    return finished.unwrap_or_else(|| Nested::Branch(Vec::new()));
                };
                if let Some(nested) = finished.take() {
                    fork.run.push(nested);
                }
                match fork.pending.next() {
                    Some(child) => {
                        step = self.chain(child, true);
                        break;
                    }
                    None => {
                        if let Some(closed) = forks.pop() {
                            finished = Some(Nested::Branch(closed.run));
                        }
                    }
                }
            }
        }
    }
}

/// A sequence that ended at a branch point, with the successors still to
/// descend into.
struct Fork {
    run: Vec<Nested<NodeId>>,
    pending: std::vec::IntoIter<NodeId>,
}

enum Step {
    Done(Nested<NodeId>),
    Fork(Fork),
}
