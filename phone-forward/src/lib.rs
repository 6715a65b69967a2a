//! This crate maintains phone-number forwarding rules keyed by prefix.
//! A rule replaces a leading prefix of a number by another prefix, and
//! lookups always apply the rule with the longest matching source prefix.
//!
//! Besides forward lookups ([PhoneForward::get]), the engine answers the
//! inverse questions: which numbers could be forwarded to a given number
//! ([PhoneForward::reverse]) and which numbers actually are
//! ([PhoneForward::get_reverse]).
//!
//! # Example
//!
//! ```
//! use phone_forward::PhoneForward;
//!
//! let mut forward = PhoneForward::new();
//! forward.add("600", "123").unwrap();
//!
//! let numbers = forward.get("600777").unwrap();
//! assert_eq!(numbers.get(0), Some("123777"));
//!
//! let numbers = forward.reverse("123").unwrap();
//! assert_eq!(numbers.iter().collect::<Vec<_>>(), vec!["123", "600"]);
//! ```

#![deny(
    missing_debug_implementations,
    missing_copy_implementations,
    trivial_casts,
    trivial_numeric_casts
)]
#![warn(
    missing_docs,
    unused_import_braces,
    unused_qualifications,
    unused_extern_crates,
    variant_size_differences,
    clippy::cast_possible_truncation,
    clippy::cast_possible_wrap
)]

pub mod alphabet;
pub mod error;
pub mod index;
pub mod phone_forward;
pub mod phone_numbers;
pub mod trie;

pub use alphabet::{Alphabet, Symbol, ALPHABET_SIZE};
pub use error::Error;
pub use phone_forward::PhoneForward;
pub use phone_numbers::PhoneNumbers;
