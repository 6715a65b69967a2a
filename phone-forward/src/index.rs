//! This module provides the two tries a [PhoneForward][crate::PhoneForward] keeps its rules in.
//! The [ForwardIndex] maps source prefixes to target prefixes,
//! while the [ReverseIndex] lists, for every target prefix, the source prefixes forwarded to it.

use crate::error::Error;

/// Module to define the [ForwardIndex]
pub mod forward_index;
pub use forward_index::{ForwardIndex, Target};
/// Module to define the [ReverseIndex]
pub mod reverse_index;
pub use reverse_index::{BackwardLink, BackwardTrie, PreparedLink, ReverseEntry, ReverseIndex};

/// Copy a number into a freshly allocated [String].
///
/// Fails instead of aborting if the memory cannot be allocated.
pub(crate) fn try_copy(number: &str) -> Result<String, Error> {
    try_concat(number, "")
}

/// Concatenate a prefix and a suffix into a freshly allocated [String].
///
/// Fails instead of aborting if the memory cannot be allocated.
pub(crate) fn try_concat(prefix: &str, suffix: &str) -> Result<String, Error> {
    let mut result = String::new();
    result.try_reserve_exact(prefix.len() + suffix.len())?;
    result.push_str(prefix);
    result.push_str(suffix);

    Ok(result)
}
