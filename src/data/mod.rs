//! Data module: resolved points, colours and node resolvers

pub mod colour;
pub mod point;
pub mod source;

pub use colour::{DEFAULT_COLOUR, rgb_to_hex};
pub use point::Point;
pub use source::{FnResolver, InMemoryNodeData, NodeResolver};
