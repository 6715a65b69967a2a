//! This module defines [PhoneForward], the store of forwarding rules.

use std::fmt::Debug;

use ascii_tree::write_tree;

use crate::{
    alphabet::{Alphabet, Symbol},
    error::Error,
    index::{try_concat, try_copy, ForwardIndex, ReverseIndex, Target},
    phone_numbers::PhoneNumbers,
};

/// Store of phone-number forwarding rules
///
/// A rule forwards every number starting with its source prefix
/// to the number obtained by replacing that prefix with the target prefix.
/// If several rules apply to a number, the one with the longest source prefix wins.
///
/// Rules are kept in two tries, one keyed by source and one keyed by target,
/// which are always updated together.
#[derive(Default)]
pub struct PhoneForward {
    /// Symbols numbers are written in
    alphabet: Alphabet,
    /// Rules keyed by source prefix
    forward: ForwardIndex,
    /// Rules keyed by target prefix
    reverse: ReverseIndex,
}

impl PhoneForward {
    /// Create a [PhoneForward] without any rules, using the default [Alphabet].
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a [PhoneForward] without any rules for numbers written in `alphabet`.
    pub fn with_alphabet(alphabet: Alphabet) -> Self {
        Self {
            alphabet,
            ..Default::default()
        }
    }

    /// Return the [Alphabet] numbers are written in.
    pub fn alphabet(&self) -> &Alphabet {
        &self.alphabet
    }

    /// Translate `number` into symbols.
    ///
    /// Invalid numbers yield `None`, only a failed allocation is an error.
    fn parse(&self, number: &str) -> Result<Option<Vec<Symbol>>, Error> {
        match self.alphabet.symbols(number) {
            Ok(symbols) => Ok(Some(symbols)),
            Err(Error::InvalidNumber(_)) => Ok(None),
            Err(error) => Err(error),
        }
    }

    /// Forward all numbers starting with `source` to `target`,
    /// replacing any rule that previously existed for `source`.
    ///
    /// Fails if either number is invalid, if both are equal,
    /// or if memory runs out. In any of these cases no rule is changed.
    pub fn add(&mut self, source: &str, target: &str) -> Result<(), Error> {
        let source_symbols = self.alphabet.symbols(source)?;
        let target_symbols = self.alphabet.symbols(target)?;
        if source == target {
            return Err(Error::IdenticalNumbers(source.to_owned()));
        }

        let forward_target = try_copy(target)?;
        let prepared = self
            .reverse
            .prepare(&target_symbols, &source_symbols, target, source)?;
        self.forward.reserve(source_symbols.len())?;

        // Nothing below allocates, so the rule is stored either completely or not at all.
        self.reverse
            .link(&target_symbols, &source_symbols, prepared)?;
        let previous = self.forward.insert(
            &source_symbols,
            Target {
                number: forward_target,
                symbols: target_symbols,
            },
        )?;

        match previous {
            Some(previous) if previous.number != target => {
                log::debug!("forwarding {source} to {target} instead of {}", previous.number);
                self.reverse.clear_link(&previous.symbols, &source_symbols);
            }
            Some(_) => log::trace!("forwarding {source} to {target} again"),
            None => log::debug!("forwarding {source} to {target}"),
        }

        Ok(())
    }

    /// Delete all rules whose source starts with `prefix`.
    ///
    /// Invalid prefixes, or prefixes no rule starts with, are ignored.
    pub fn remove(&mut self, prefix: &str) {
        let Ok(prefix_symbols) = self.alphabet.symbols(prefix) else {
            log::trace!("ignoring removal of invalid prefix {prefix:?}");
            return;
        };
        let Some(rules) = self.forward.remove_prefix(&prefix_symbols) else {
            return;
        };

        log::debug!("removing {} rules starting with {prefix}", rules.len());

        for (suffix, target) in rules {
            let mut source_symbols = Vec::with_capacity(prefix_symbols.len() + suffix.len());
            source_symbols.extend_from_slice(&prefix_symbols);
            source_symbols.extend_from_slice(&suffix);

            self.reverse.unlink(&target.symbols, &source_symbols);
        }
    }

    /// Return the number `number` is forwarded to.
    ///
    /// The result contains exactly one number,
    /// which is `number` itself if no rule applies.
    /// For an invalid `number` the result is empty.
    pub fn get(&self, number: &str) -> Result<PhoneNumbers, Error> {
        let mut result = PhoneNumbers::new();

        if let Some(symbols) = self.parse(number)? {
            result.add(self.forward.translate(&symbols, number)?)?;
        }

        Ok(result)
    }

    /// Return all numbers that might be forwarded to `number`, including `number` itself.
    ///
    /// A number is considered if applying some rule to it yields `number`,
    /// regardless of whether a more specific rule takes precedence for it.
    /// The result is sorted; for an invalid `number` it is empty.
    pub fn reverse(&self, number: &str) -> Result<PhoneNumbers, Error> {
        let mut result = PhoneNumbers::new();

        if let Some(symbols) = self.parse(number)? {
            result.add(try_copy(number)?)?;
            self.find_numbers(number, &symbols, false, &mut result)?;
            result.sort_by(|left, right| self.alphabet.compare(left, right));
        }

        Ok(result)
    }

    /// Return all numbers that are forwarded to `number`.
    ///
    /// Every returned number `x` satisfies `get(x) == number`.
    /// `number` itself is included iff no rule applies to it.
    /// The result is sorted; for an invalid `number` it is empty.
    pub fn get_reverse(&self, number: &str) -> Result<PhoneNumbers, Error> {
        let mut result = PhoneNumbers::new();

        if let Some(symbols) = self.parse(number)? {
            self.find_numbers(number, &symbols, true, &mut result)?;
            if self.forward.translate(&symbols, number)? == number {
                result.add(try_copy(number)?)?;
            }
            result.sort_by(|left, right| self.alphabet.compare(left, right));
        }

        Ok(result)
    }

    /// Add every number to `result` that some rule maps onto `number`.
    ///
    /// For every rule whose target is a prefix of `number`,
    /// the candidate is the rule's source followed by the rest of `number`.
    /// If `exact` is set, a candidate is only accepted if it is actually forwarded to `number`,
    /// as a longer rule might apply to it instead.
    fn find_numbers(
        &self,
        number: &str,
        symbols: &[Symbol],
        exact: bool,
        result: &mut PhoneNumbers,
    ) -> Result<(), Error> {
        for (length, link) in self.reverse.matches(symbols) {
            let candidate = try_concat(&link.source, &number[length..])?;

            if exact {
                let candidate_symbols = self.alphabet.symbols(&candidate)?;
                if self.forward.translate(&candidate_symbols, &candidate)? != number {
                    continue;
                }
            }

            result.add(candidate)?;
        }

        Ok(())
    }

    /// Return the number of rules.
    pub fn rule_count(&self) -> usize {
        self.forward.len()
    }

    /// Return all rules as pairs of source and target, sorted by source.
    pub fn rules(&self) -> Vec<(String, String)> {
        self.forward
            .trie()
            .entries()
            .map(|(source, target)| (self.alphabet.spell(&source), target.number.clone()))
            .collect()
    }

    /// Return the target of the rule for exactly `source`, if there is one.
    pub fn target(&self, source: &str) -> Option<&str> {
        let symbols = self.alphabet.symbols(source).ok()?;
        self.forward.target(&symbols)
    }
}

impl Debug for PhoneForward {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Forward")?;
        write_tree(f, &self.forward.trie().ascii_tree(&self.alphabet))?;
        writeln!(f, "Reverse")?;
        write_tree(f, &self.reverse.trie().ascii_tree(&self.alphabet))
    }
}
