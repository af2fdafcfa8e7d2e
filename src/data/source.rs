//! Node resolvers: where geometry and display attributes come from.
//!
//! The decomposition engine never evaluates mesh fields itself. Whatever
//! loaded the mesh implements [`NodeResolver`] and answers per-node lookups
//! on demand; a failed lookup is simply `None`.

use std::collections::BTreeMap;

use crate::data::point::Point;
use crate::topology::point::NodeId;

/// Per-node lookups used while classifying forest members.
pub trait NodeResolver {
    /// Position and diameter of `node`, if its coordinates can be evaluated.
    fn point(&self, node: NodeId) -> Option<Point>;

    /// Display colour (`#RRGGBB`) of `node`, if it has one.
    fn colour(&self, _node: NodeId) -> Option<String> {
        None
    }

    /// Sampling resolution recorded at `node`, if any.
    fn resolution(&self, _node: NodeId) -> Option<f64> {
        None
    }
}

impl<R: NodeResolver + ?Sized> NodeResolver for &R {
    fn point(&self, node: NodeId) -> Option<Point> {
        (**self).point(node)
    }

    fn colour(&self, node: NodeId) -> Option<String> {
        (**self).colour(node)
    }

    fn resolution(&self, node: NodeId) -> Option<f64> {
        (**self).resolution(node)
    }
}

/// A resolver backed by a point-lookup closure; no colours or resolutions.
pub struct FnResolver<F>(pub F);

impl<F> NodeResolver for FnResolver<F>
where
    F: Fn(NodeId) -> Option<Point>,
{
    fn point(&self, node: NodeId) -> Option<Point> {
        (self.0)(node)
    }
}

/// Node attributes held in memory.
#[derive(Clone, Debug, Default)]
pub struct InMemoryNodeData {
    points: BTreeMap<NodeId, Point>,
    colours: BTreeMap<NodeId, String>,
    resolutions: BTreeMap<NodeId, f64>,
}

impl InMemoryNodeData {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_point(&mut self, node: NodeId, point: Point) -> Option<Point> {
        self.points.insert(node, point)
    }

    pub fn set_colour(&mut self, node: NodeId, colour: impl Into<String>) -> Option<String> {
        self.colours.insert(node, colour.into())
    }

    pub fn set_resolution(&mut self, node: NodeId, resolution: f64) -> Option<f64> {
        self.resolutions.insert(node, resolution)
    }

    pub fn with_point(mut self, node: NodeId, point: Point) -> Self {
        self.set_point(node, point);
        self
    }

    pub fn with_colour(mut self, node: NodeId, colour: impl Into<String>) -> Self {
        self.set_colour(node, colour);
        self
    }

    pub fn with_resolution(mut self, node: NodeId, resolution: f64) -> Self {
        self.set_resolution(node, resolution);
        self
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

impl NodeResolver for InMemoryNodeData {
    fn point(&self, node: NodeId) -> Option<Point> {
        self.points.get(&node).copied()
    }

    fn colour(&self, node: NodeId) -> Option<String> {
        self.colours.get(&node).cloned()
    }

    fn resolution(&self, node: NodeId) -> Option<f64> {
        self.resolutions.get(&node).copied()
    }
}
