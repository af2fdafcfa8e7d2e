//! `NodeId` and `ElementId`: strong, zero-cost handles for mesh entities
//!
//! A 1-D mesh is made of *nodes* joined by *elements* (directed line
//! segments). Both are addressed by opaque integer identifiers supplied by the
//! mesh source. Wrapping them in distinct newtypes keeps a node key from ever
//! being passed where an element key is expected.
//!
//! This module provides:
//! - `repr(transparent)` newtypes around `u64` with the same ABI as the raw key.
//! - Constructors and accessors.
//! - `Debug`/`Display`, ordering and hashing so the ids work as map keys and
//!   print cleanly.
//! - Transparent serde so an id serializes as its bare integer.

use std::fmt;

macro_rules! mesh_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(
            Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, serde::Serialize, serde::Deserialize,
        )]
        #[serde(transparent)]
        #[repr(transparent)]
        pub struct $name(u64);

        impl $name {
            /// Wraps a raw identifier.
            #[inline]
            pub const fn new(raw: u64) -> Self {
                $name(raw)
            }

            /// Returns the raw identifier.
            #[inline]
            pub const fn get(self) -> u64 {
                self.0
            }
        }

        impl From<u64> for $name {
            #[inline]
            fn from(raw: u64) -> Self {
                $name(raw)
            }
        }

        impl fmt::Debug for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.debug_tuple(stringify!($name)).field(&self.0).finish()
            }
        }

        /// Prints only the raw integer.
        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

mesh_id! {
    /// Identifier of a mesh node (a trace point once geometry is resolved).
    ///
    /// Nodes carry no engine-owned data beyond identity; coordinates, radius
    /// and colour are looked up on demand through a
    /// [`NodeResolver`](crate::data::source::NodeResolver).
    NodeId
}

mesh_id! {
    /// Identifier of a line element. Unique within one decomposition run.
    ElementId
}
