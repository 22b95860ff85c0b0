//!
//! Utility functions.
//!

pub mod float;

///
/// Check if a flag is unset.
/// This is a helper function for serialization.
///
pub fn is_false(value: &bool) -> bool {
    !*value
}
