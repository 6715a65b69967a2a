//! Error-handling module for the crate

use std::collections::TryReserveError;

use thiserror::Error;

/// Error-Collection for all the possible Errors occurring in this crate
#[allow(variant_size_differences)]
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// Number is empty or contains a symbol outside of the alphabet
    #[error("\"{0}\" is not a valid phone number")]
    InvalidNumber(String),
    /// A rule may not forward a prefix onto itself
    #[error("cannot forward \"{0}\" onto itself")]
    IdenticalNumbers(String),
    /// The extended symbols of an alphabet must be distinct ASCII non-digits
    #[error("'{0}' and '{1}' cannot be used as the extended symbols of an alphabet")]
    InvalidAlphabet(char, char),
    /// Allocation failed while preparing an operation
    #[error(transparent)]
    OutOfMemory(#[from] TryReserveError),
}
