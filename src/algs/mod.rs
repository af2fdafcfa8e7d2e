//! Re-export public algorithms.

pub mod classify;
pub mod paths;
pub mod renest;
pub mod root;
pub mod subtree;
pub mod traversal;

pub use classify::classify_forest;
pub use renest::{nest_sequence, renest};
pub use root::find_root;
pub use traversal::build_nested;
