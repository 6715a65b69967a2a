//! This module defines [ForwardIndex].

use crate::{alphabet::Symbol, error::Error, trie::Trie};

use super::{try_concat, try_copy};

/// Target prefix of a rule
///
/// The symbols are kept next to the number so that the rule
/// can be found in the [ReverseIndex][super::ReverseIndex] without translating it again.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Target {
    /// Target prefix as written
    pub number: String,
    /// Translation of `number`
    pub symbols: Vec<Symbol>,
}

/// Forwarding rules keyed by their source prefix.
///
/// The value of a node is the target prefix replacing the path leading to it.
#[derive(Debug, Default)]
pub struct ForwardIndex {
    trie: Trie<Target>,
}

impl ForwardIndex {
    /// Create an empty [ForwardIndex].
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the underlying [Trie].
    pub fn trie(&self) -> &Trie<Target> {
        &self.trie
    }

    /// Make sure a rule with a source of length `length` can be inserted without allocating.
    pub fn reserve(&mut self, length: usize) -> Result<(), Error> {
        self.trie.reserve(length)
    }

    /// Forward `source` to `target`, returning the target it was forwarded to before.
    pub fn insert(&mut self, source: &[Symbol], target: Target) -> Result<Option<Target>, Error> {
        let node = self.trie.insert_path(source)?;
        Ok(self.trie.replace_value(node, target))
    }

    /// Return the target of the rule with exactly the given source.
    pub fn target(&self, source: &[Symbol]) -> Option<&str> {
        self.trie
            .find(source)
            .and_then(|node| self.trie.value(node))
            .map(|target| target.number.as_str())
    }

    /// Apply the rule with the longest source prefix of `number` to it.
    ///
    /// `symbols` must be the translation of `number`.
    /// Numbers without a matching rule are returned unchanged.
    pub fn translate(&self, symbols: &[Symbol], number: &str) -> Result<String, Error> {
        let (owner, consumed) = self.trie.find_longest_value_owner(symbols);

        match self.trie.value(owner) {
            Some(target) => try_concat(&target.number, &number[consumed..]),
            None => try_copy(number),
        }
    }

    /// Delete every rule whose source starts with `prefix`.
    ///
    /// Returns the deleted rules as pairs of source suffix (relative to `prefix`)
    /// and target, or `None` if no node exists for `prefix`.
    pub fn remove_prefix(&mut self, prefix: &[Symbol]) -> Option<Vec<(Vec<Symbol>, Target)>> {
        let detached = self.trie.detach(prefix)?;
        let rules = self.trie.delete_subtree(detached.root);
        self.trie.prune_upward(detached.parent);

        Some(rules)
    }

    /// Return the number of rules.
    pub fn len(&self) -> usize {
        self.trie.values(self.trie.root()).count()
    }

    /// Return whether there are no rules.
    pub fn is_empty(&self) -> bool {
        self.trie.is_empty()
    }
}

#[cfg(test)]
mod test {
    use test_log::test;

    use super::{ForwardIndex, Target};
    use crate::alphabet::{Alphabet, Symbol};

    fn path(number: &str) -> Vec<Symbol> {
        Alphabet::default().symbols(number).unwrap()
    }

    fn target(number: &str) -> Target {
        Target {
            number: number.to_owned(),
            symbols: path(number),
        }
    }

    fn translate(index: &ForwardIndex, number: &str) -> String {
        index.translate(&path(number), number).unwrap()
    }

    #[test]
    fn longest_prefix_wins() {
        let mut index = ForwardIndex::new();
        index.insert(&path("1"), target("9")).unwrap();
        index.insert(&path("123"), target("45")).unwrap();

        assert_eq!(translate(&index, "1"), "9");
        assert_eq!(translate(&index, "12"), "92");
        assert_eq!(translate(&index, "1234"), "454");
        assert_eq!(translate(&index, "2"), "2");
        assert_eq!(index.target(&path("123")), Some("45"));
        assert_eq!(index.target(&path("12")), None);
        assert_eq!(index.len(), 2);
    }

    #[test]
    fn insert_replaces_target() {
        let mut index = ForwardIndex::new();

        assert_eq!(index.insert(&path("7"), target("8")).unwrap(), None);
        assert_eq!(
            index.insert(&path("7"), target("9")).unwrap(),
            Some(target("8"))
        );
        assert_eq!(translate(&index, "77"), "97");
    }

    #[test]
    fn remove_prefix_collects_rules() {
        let mut index = ForwardIndex::new();
        index.insert(&path("1"), target("0")).unwrap();
        index.insert(&path("12"), target("3")).unwrap();
        index.insert(&path("125"), target("4")).unwrap();
        index.insert(&path("13"), target("5")).unwrap();

        assert_eq!(index.remove_prefix(&path("14")), None);

        let removed = index.remove_prefix(&path("12")).unwrap();
        assert_eq!(
            removed,
            vec![(vec![], target("3")), (path("5"), target("4"))]
        );
        assert_eq!(removed[1].1.symbols, path("4"));
        assert_eq!(translate(&index, "125"), "025");
        assert_eq!(translate(&index, "13"), "5");

        index.remove_prefix(&path("1")).unwrap();
        assert!(index.is_empty());
        assert_eq!(index.trie().len(), 1);
    }
}
