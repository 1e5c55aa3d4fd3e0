use crate::partition_error::PartitionError;

/// Trait for validating data structure invariants.
pub trait DebugInvariants {
    /// Assert invariants when invariant checking is enabled.
    fn debug_assert_invariants(&self);
    /// Validate invariants and return the first error encountered.
    fn validate_invariants(&self) -> Result<(), PartitionError>;
}

/// Helper macro to run a fallible check and panic on error when invariant
/// checking is enabled.
///
/// Checks are O(n + m), so they are tied to the `strict-invariants` /
/// `check-invariants` features rather than to `debug_assertions`.
#[macro_export]
macro_rules! debug_invariants {
    ($expr:expr, $($ctx:tt)*) => {
        #[cfg(any(feature = "strict-invariants", feature = "check-invariants"))]
        if let Err(e) = $expr {
            panic!(concat!("[invariants] ", $($ctx)*, ": {}"), e);
        }
    };
}
