//! This module defines the nodes stored in a [Trie][super::Trie].

use crate::alphabet::{Symbol, ALPHABET_SIZE};

/// Stable address of a node inside the arena of a [Trie][super::Trie]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(pub(super) usize);

/// Element of a [Trie][super::Trie]
///
/// Children are owned through their [NodeId]s.
/// The parent link is only used to walk upwards when pruning.
#[derive(Debug, Clone)]
pub(super) struct Node<V> {
    /// Node this one hangs below together with the slot it occupies there,
    /// `None` for roots and detached subtrees
    pub(super) parent: Option<(NodeId, Symbol)>,
    /// One slot for every symbol of the alphabet
    pub(super) children: [Option<NodeId>; ALPHABET_SIZE],
    /// Payload, present iff the path to this node ends a rule
    pub(super) value: Option<V>,
}

impl<V> Node<V> {
    pub(super) fn new(parent: Option<(NodeId, Symbol)>) -> Self {
        Self {
            parent,
            children: [None; ALPHABET_SIZE],
            value: None,
        }
    }

    /// Return whether the node has at least one child.
    pub(super) fn has_children(&self) -> bool {
        self.children.iter().any(Option::is_some)
    }

    /// Return whether the node neither holds a value nor has children.
    pub(super) fn is_dead(&self) -> bool {
        self.value.is_none() && !self.has_children()
    }

    /// Iterate over the children in symbol order.
    pub(super) fn children(&self) -> impl DoubleEndedIterator<Item = (Symbol, NodeId)> + '_ {
        self.children
            .iter()
            .enumerate()
            .filter_map(|(slot, child)| Some((Symbol::from_slot(slot)?, (*child)?)))
    }
}
