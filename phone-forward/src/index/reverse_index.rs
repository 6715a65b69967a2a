//! This module defines [ReverseIndex].

use crate::{
    alphabet::Symbol,
    error::Error,
    trie::{NodeId, Trie},
};

use super::try_copy;

/// Cross-link from a target prefix back to a rule forwarding onto it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BackwardLink {
    /// Target prefix of the rule
    pub target: String,
    /// Source prefix of the rule, which is also the path to this link
    pub source: String,
}

/// Links of all rules forwarding onto one target, keyed by source prefix
pub type BackwardTrie = Trie<BackwardLink>;

/// Value of a node in the [ReverseIndex]
#[derive(Debug)]
pub struct ReverseEntry {
    /// The path to this entry, i.e. the common target of all its links
    pub target: String,
    /// Rules forwarding onto `target`, never empty
    pub backward: BackwardTrie,
}

/// Everything [ReverseIndex::link] needs to allocate, obtained by [ReverseIndex::prepare]
#[derive(Debug)]
pub struct PreparedLink {
    target: String,
    link: BackwardLink,
    backward: Option<BackwardTrie>,
}

/// Rules keyed by their target prefix.
///
/// A node holds a [ReverseEntry] iff at least one rule forwards onto its path.
#[derive(Debug, Default)]
pub struct ReverseIndex {
    trie: Trie<ReverseEntry>,
}

impl ReverseIndex {
    /// Create an empty [ReverseIndex].
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the underlying [Trie].
    pub fn trie(&self) -> &Trie<ReverseEntry> {
        &self.trie
    }

    /// Allocate everything needed to link the rule forwarding `source` onto `target`.
    ///
    /// Afterwards, [ReverseIndex::link] cannot fail as long as the index is not modified in between.
    pub fn prepare(
        &mut self,
        target: &[Symbol],
        source: &[Symbol],
        target_number: &str,
        source_number: &str,
    ) -> Result<PreparedLink, Error> {
        let link = BackwardLink {
            target: try_copy(target_number)?,
            source: try_copy(source_number)?,
        };
        let target_copy = try_copy(target_number)?;

        self.trie.reserve(target.len())?;

        let existing = match self.trie.find(target) {
            Some(node) => self.trie.value_mut(node),
            None => None,
        };
        let backward = match existing {
            Some(entry) => {
                entry.backward.reserve(source.len())?;
                None
            }
            None => Some(BackwardTrie::try_with_capacity(source.len())?),
        };

        Ok(PreparedLink {
            target: target_copy,
            link,
            backward,
        })
    }

    /// Record that `source` is forwarded onto `target`.
    pub fn link(
        &mut self,
        target: &[Symbol],
        source: &[Symbol],
        prepared: PreparedLink,
    ) -> Result<(), Error> {
        let PreparedLink {
            target: target_copy,
            link,
            backward,
        } = prepared;

        let node = self.trie.insert_path(target)?;
        let mut entry = match self.trie.take_value(node) {
            Some(mut entry) => {
                entry.target = target_copy;
                entry
            }
            None => ReverseEntry {
                target: target_copy,
                backward: backward.unwrap_or_default(),
            },
        };

        let result = match entry.backward.insert_path(source) {
            Ok(slot) => {
                entry.backward.replace_value(slot, link);
                Ok(())
            }
            Err(error) => Err(error),
        };

        if entry.backward.is_empty() {
            self.trie.prune_upward(node);
        } else {
            self.trie.replace_value(node, entry);
        }

        result
    }

    /// Forget the link of the rule forwarding exactly `source` onto `target`.
    ///
    /// Links of longer sources stay intact.
    pub fn clear_link(&mut self, target: &[Symbol], source: &[Symbol]) {
        let Some(node) = self.trie.find(target) else {
            return;
        };

        if let Some(entry) = self.trie.value_mut(node) {
            if let Some(slot) = entry.backward.find(source) {
                entry.backward.take_value(slot);
                entry.backward.prune_upward(slot);
            }
        }

        self.release_if_unused(node);
    }

    /// Forget the links of all rules forwarding onto `target`
    /// whose source starts with `source`.
    pub fn unlink(&mut self, target: &[Symbol], source: &[Symbol]) {
        let Some(node) = self.trie.find(target) else {
            return;
        };

        if let Some(entry) = self.trie.value_mut(node) {
            if let Some(detached) = entry.backward.detach(source) {
                entry.backward.delete_subtree(detached.root);
                entry.backward.prune_upward(detached.parent);
            }
        }

        self.release_if_unused(node);
    }

    /// Drop the entry at `node` if no rule forwards onto it anymore,
    /// together with the path leading to it.
    fn release_if_unused(&mut self, node: NodeId) {
        let unused = self
            .trie
            .value(node)
            .map_or(true, |entry| entry.backward.is_empty());

        if unused {
            self.trie.take_value(node);
            self.trie.prune_upward(node);
        }
    }

    /// Iterate over the links of all rules whose target is a prefix of `symbols`.
    ///
    /// Every link comes with the length of its target.
    /// Links are ordered by the length of their target first,
    /// and by their source in symbol order second.
    pub fn matches<'a>(
        &'a self,
        symbols: &'a [Symbol],
    ) -> impl Iterator<Item = (usize, &'a BackwardLink)> + 'a {
        let mut current = self.trie.root();

        symbols
            .iter()
            .enumerate()
            .map_while(move |(depth, &symbol)| {
                current = self.trie.child(current, symbol)?;
                Some((depth + 1, current))
            })
            .filter_map(move |(length, node)| self.trie.value(node).map(|entry| (length, entry)))
            .flat_map(|(length, entry)| {
                entry
                    .backward
                    .values(entry.backward.root())
                    .map(move |link| (length, link))
            })
    }

    /// Return whether no rule is linked.
    pub fn is_empty(&self) -> bool {
        self.trie.is_empty()
    }
}
