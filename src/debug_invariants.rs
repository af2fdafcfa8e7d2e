//! Invariant validation hooks for decomposition results.

use crate::mesh_error::MeshTraceError;

/// Structures whose construction guarantees can be re-checked after the fact.
pub trait DebugInvariants {
    /// Validate invariants and return the first violation found.
    fn validate_invariants(&self) -> Result<(), MeshTraceError>;

    /// Panic on the first violation when invariant checking is compiled in
    /// (debug builds, `check-invariants` or `strict-invariants`).
    fn debug_assert_invariants(&self) {
        crate::debug_invariants!(self.validate_invariants(), "invariant violation");
    }
}

/// Run a fallible check and panic with `ctx` on error, only when invariant
/// checking is compiled in.
#[macro_export]
macro_rules! debug_invariants {
    ($expr:expr, $($ctx:tt)*) => {
        #[cfg(any(debug_assertions, feature = "strict-invariants", feature = "check-invariants"))]
        if let Err(e) = $expr {
            panic!(concat!("[invariants] ", $($ctx)*, ": {}"), e);
        }
    };
}
