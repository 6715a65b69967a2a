//! This module defines [PhoneNumbers], the result of queries to a [PhoneForward][crate::PhoneForward].

use std::{cmp::Ordering, fmt::Display};

use crate::error::Error;

/// Sequence of distinct phone numbers
///
/// Numbers keep the order in which they were added,
/// unless the producer of the sequence sorted them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PhoneNumbers {
    numbers: Vec<String>,
}

impl PhoneNumbers {
    /// Create an empty [PhoneNumbers].
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `number` unless it is already contained.
    ///
    /// Returns whether the number was new.
    /// Storage starts out with room for a single number and doubles whenever it runs full;
    /// if that allocation fails, the sequence is left unchanged.
    pub fn add(&mut self, number: String) -> Result<bool, Error> {
        if self.contains(&number) {
            return Ok(false);
        }

        if self.numbers.len() == self.numbers.capacity() {
            let additional = self.numbers.capacity().max(1);
            self.numbers.try_reserve_exact(additional)?;
        }
        self.numbers.push(number);

        Ok(true)
    }

    /// Return the number at position `index`, or `None` if `index` is out of range.
    pub fn get(&self, index: usize) -> Option<&str> {
        self.numbers.get(index).map(String::as_str)
    }

    /// Return whether `number` is contained.
    pub fn contains(&self, number: &str) -> bool {
        self.numbers.iter().any(|contained| contained == number)
    }

    /// Return the number of contained numbers.
    pub fn len(&self) -> usize {
        self.numbers.len()
    }

    /// Return whether no number is contained.
    pub fn is_empty(&self) -> bool {
        self.numbers.is_empty()
    }

    /// Iterate over the contained numbers.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.numbers.iter().map(String::as_str)
    }

    /// Reorder the numbers according to `compare`.
    pub(crate) fn sort_by<F>(&mut self, mut compare: F)
    where
        F: FnMut(&str, &str) -> Ordering,
    {
        self.numbers
            .sort_unstable_by(|left, right| compare(left, right));
    }
}

impl IntoIterator for PhoneNumbers {
    type Item = String;
    type IntoIter = std::vec::IntoIter<String>;

    fn into_iter(self) -> Self::IntoIter {
        self.numbers.into_iter()
    }
}

impl<'a> IntoIterator for &'a PhoneNumbers {
    type Item = &'a String;
    type IntoIter = std::slice::Iter<'a, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.numbers.iter()
    }
}

impl Display for PhoneNumbers {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for number in &self.numbers {
            writeln!(f, "{number}")?;
        }

        Ok(())
    }
}
