//! This module implements [Trie], a 12-ary prefix tree over the symbols of an
//! [Alphabet][crate::alphabet::Alphabet].
//!
//! Nodes live in an arena and are addressed by [NodeId]s.
//! Every node owns its children, and remembers its parent only to
//! allow pruning dead paths from the bottom up.
//! Deleting a node invalidates its [NodeId]; the slot is recycled later.
//!
//! There is no path compression: every symbol of an inserted path
//! corresponds to exactly one node.

use std::fmt::Debug;

use ascii_tree::{write_tree, Tree};

use crate::{
    alphabet::{Alphabet, Symbol},
    error::Error,
};

/// Module to define the [Node]s of a [Trie]
pub mod node;
use node::Node;
pub use node::NodeId;

/// Result of cutting a subtree out of a [Trie]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Detached {
    /// Root of the detached subtree
    pub root: NodeId,
    /// Node the subtree used to hang below
    pub parent: NodeId,
}

/// Prefix tree storing a value of type `V` at some of its nodes
pub struct Trie<V> {
    /// Arena of nodes; deleted nodes leave a `None` behind
    nodes: Vec<Option<Node<V>>>,
    /// Slots of deleted nodes, ready for reuse
    vacant: Vec<NodeId>,
}

impl<V> Default for Trie<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V> Trie<V> {
    /// Create a [Trie] that only consists of its root.
    pub fn new() -> Self {
        Self {
            nodes: vec![Some(Node::new(None))],
            vacant: Vec::new(),
        }
    }

    /// Create an empty [Trie] with room for `capacity` nodes besides the root.
    ///
    /// Fails if the memory cannot be allocated.
    pub fn try_with_capacity(capacity: usize) -> Result<Self, Error> {
        let mut trie = Self {
            nodes: Vec::new(),
            vacant: Vec::new(),
        };
        trie.nodes.try_reserve_exact(1)?;
        trie.nodes.push(Some(Node::new(None)));
        trie.reserve(capacity)?;

        Ok(trie)
    }

    /// Return the root of this trie.
    pub fn root(&self) -> NodeId {
        NodeId(0)
    }

    /// Return the number of live nodes, including the root.
    pub fn len(&self) -> usize {
        self.nodes.len() - self.vacant.len()
    }

    /// Return whether the trie contains nothing but its root.
    pub fn is_empty(&self) -> bool {
        self.node(self.root()).map_or(true, Node::is_dead)
    }

    fn node(&self, id: NodeId) -> Option<&Node<V>> {
        self.nodes.get(id.0).and_then(Option::as_ref)
    }

    fn node_mut(&mut self, id: NodeId) -> Option<&mut Node<V>> {
        self.nodes.get_mut(id.0).and_then(Option::as_mut)
    }

    /// Return the child of `id` reached by `symbol`.
    pub fn child(&self, id: NodeId, symbol: Symbol) -> Option<NodeId> {
        self.node(id)?.children[symbol.slot()]
    }

    /// Return the value stored at `id`.
    pub fn value(&self, id: NodeId) -> Option<&V> {
        self.node(id)?.value.as_ref()
    }

    /// Return a mutable reference to the value stored at `id`.
    pub fn value_mut(&mut self, id: NodeId) -> Option<&mut V> {
        self.node_mut(id)?.value.as_mut()
    }

    /// Store `value` at `id`, returning the value it replaces.
    pub fn replace_value(&mut self, id: NodeId, value: V) -> Option<V> {
        self.node_mut(id)?.value.replace(value)
    }

    /// Remove the value stored at `id`.
    pub fn take_value(&mut self, id: NodeId) -> Option<V> {
        self.node_mut(id)?.value.take()
    }

    /// Make sure that the next `additional` node insertions do not allocate.
    ///
    /// Fails if the memory cannot be allocated, leaving the trie unchanged.
    pub fn reserve(&mut self, additional: usize) -> Result<(), Error> {
        let fresh = additional.saturating_sub(self.vacant.len());
        self.nodes.try_reserve(fresh)?;

        // Every slot may be vacated at some point,
        // so releasing nodes must never need to allocate.
        let slots = self.nodes.len() + fresh;
        self.vacant
            .try_reserve(slots.saturating_sub(self.vacant.len()))?;

        Ok(())
    }

    /// Allocate a node below `parent`; capacity must have been reserved.
    fn allocate(&mut self, parent: NodeId, symbol: Symbol) -> NodeId {
        let node = Node::new(Some((parent, symbol)));

        let id = match self.vacant.pop() {
            Some(id) => {
                self.nodes[id.0] = Some(node);
                id
            }
            None => {
                self.nodes.push(Some(node));
                NodeId(self.nodes.len() - 1)
            }
        };

        if let Some(parent) = self.node_mut(parent) {
            parent.children[symbol.slot()] = Some(id);
        }

        id
    }

    /// Remove a single node from the arena, returning its contents.
    fn release(&mut self, id: NodeId) -> Option<Node<V>> {
        let node = self.nodes.get_mut(id.0)?.take()?;
        self.vacant.push(id);

        Some(node)
    }

    /// Return the node at the end of `path`, creating every missing node along the way.
    ///
    /// Fails if the nodes cannot be allocated, in which case nothing is created.
    pub fn insert_path(&mut self, path: &[Symbol]) -> Result<NodeId, Error> {
        self.reserve(path.len())?;

        let mut current = self.root();
        for &symbol in path {
            current = match self.child(current, symbol) {
                Some(child) => child,
                None => self.allocate(current, symbol),
            };
        }

        Ok(current)
    }

    /// Return the node at the end of `path`, if it exists.
    pub fn find(&self, path: &[Symbol]) -> Option<NodeId> {
        path.iter()
            .try_fold(self.root(), |current, &symbol| self.child(current, symbol))
    }

    /// Follow `path` as far as possible and return the deepest node on the way
    /// that holds a value, together with the number of symbols leading to it.
    ///
    /// If no node on the path has a value, the root and `0` are returned.
    pub fn find_longest_value_owner(&self, path: &[Symbol]) -> (NodeId, usize) {
        let mut longest = (self.root(), 0);
        let mut current = self.root();

        for (depth, &symbol) in path.iter().enumerate() {
            match self.child(current, symbol) {
                Some(child) => current = child,
                None => break,
            }

            if self.value(current).is_some() {
                longest = (current, depth + 1);
            }
        }

        longest
    }

    /// Cut the link to the node at the end of `path`.
    ///
    /// The detached nodes stay in the arena until they are passed to [Trie::delete_subtree].
    /// Returns `None` if `path` is empty or leads nowhere.
    pub fn detach(&mut self, path: &[Symbol]) -> Option<Detached> {
        let (&last, init) = path.split_last()?;
        let parent = self.find(init)?;
        let root = self.child(parent, last)?;

        if let Some(node) = self.node_mut(parent) {
            node.children[last.slot()] = None;
        }
        if let Some(node) = self.node_mut(root) {
            node.parent = None;
        }

        log::trace!("detached subtree at depth {}", path.len());

        Some(Detached { root, parent })
    }

    /// Delete the node `root` and everything below it.
    ///
    /// Returns the values that were stored in the subtree,
    /// each with its path relative to `root`, in depth-first order.
    /// The root of the trie itself is only emptied, never deleted.
    pub fn delete_subtree(&mut self, root: NodeId) -> Vec<(Vec<Symbol>, V)> {
        if let Some((parent, symbol)) = self.node(root).and_then(|node| node.parent) {
            if let Some(parent) = self.node_mut(parent) {
                parent.children[symbol.slot()] = None;
            }
        }

        let mut values = Vec::new();
        let mut stack = vec![(root, Vec::new())];

        while let Some((id, path)) = stack.pop() {
            let node = if id == self.root() {
                self.node_mut(id).map(|node| {
                    let children = std::mem::take(&mut node.children);
                    let value = node.value.take();
                    Node {
                        parent: None,
                        children,
                        value,
                    }
                })
            } else {
                self.release(id)
            };
            let Some(node) = node else {
                continue;
            };

            for (symbol, child) in node.children().rev() {
                let mut child_path = Vec::with_capacity(path.len() + 1);
                child_path.extend_from_slice(&path);
                child_path.push(symbol);
                stack.push((child, child_path));
            }

            if let Some(value) = node.value {
                values.push((path, value));
            }
        }

        values
    }

    /// Starting at `id`, delete nodes that have neither a value nor children,
    /// moving towards the root until a node that still holds state is reached.
    pub fn prune_upward(&mut self, id: NodeId) {
        let mut current = id;
        let mut pruned = 0usize;

        while let Some(node) = self.node(current) {
            let Some((parent, symbol)) = node.parent else {
                break;
            };
            if !node.is_dead() {
                break;
            }

            if let Some(parent) = self.node_mut(parent) {
                parent.children[symbol.slot()] = None;
            }
            self.release(current);
            pruned += 1;

            current = parent;
        }

        if pruned > 0 {
            log::trace!("pruned {pruned} dead nodes");
        }
    }

    /// Iterate over all values stored in the subtree below `id`, including `id` itself.
    ///
    /// Nodes are visited depth-first in symbol order, parents before their children.
    pub fn values(&self, id: NodeId) -> Values<'_, V> {
        Values {
            trie: self,
            stack: vec![id],
        }
    }

    /// Iterate over all values of the trie together with their paths.
    ///
    /// The order is the same as for [Trie::values].
    pub fn entries(&self) -> Entries<'_, V> {
        Entries {
            trie: self,
            stack: vec![(self.root(), Vec::new())],
        }
    }

    fn ascii_tree_recursive(&self, alphabet: &Alphabet, label: String, id: NodeId) -> Tree
    where
        V: Debug,
    {
        let Some(node) = self.node(id) else {
            return Tree::Leaf(vec![label]);
        };

        let label = match &node.value {
            Some(value) => format!("{label} {value:?}"),
            None => label,
        };

        if !node.has_children() {
            return Tree::Leaf(vec![label]);
        }

        let subtrees = node
            .children()
            .map(|(symbol, child)| {
                self.ascii_tree_recursive(alphabet, alphabet.char_of(symbol).to_string(), child)
            })
            .collect();

        Tree::Node(label, subtrees)
    }

    /// Return an [ascii_tree] representation of the trie,
    /// labelling edges with the characters of `alphabet`.
    pub fn ascii_tree(&self, alphabet: &Alphabet) -> Tree
    where
        V: Debug,
    {
        self.ascii_tree_recursive(alphabet, "root".to_owned(), self.root())
    }
}

impl<V: Debug> Debug for Trie<V> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write_tree(f, &self.ascii_tree(&Alphabet::default()))
    }
}

/// Depth-first iterator over the values of a subtree of a [Trie]
#[derive(Debug)]
pub struct Values<'a, V> {
    trie: &'a Trie<V>,
    stack: Vec<NodeId>,
}

impl<'a, V> Iterator for Values<'a, V> {
    type Item = &'a V;

    fn next(&mut self) -> Option<Self::Item> {
        let trie = self.trie;

        loop {
            let node = trie.node(self.stack.pop()?)?;
            self.stack
                .extend(node.children().rev().map(|(_, child)| child));

            if let Some(value) = &node.value {
                break Some(value);
            }
        }
    }
}

/// Depth-first iterator over the values of a [Trie] and their paths
#[derive(Debug)]
pub struct Entries<'a, V> {
    trie: &'a Trie<V>,
    stack: Vec<(NodeId, Vec<Symbol>)>,
}

impl<'a, V> Iterator for Entries<'a, V> {
    type Item = (Vec<Symbol>, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        let trie = self.trie;

        loop {
            let (id, path) = self.stack.pop()?;
            let Some(node) = trie.node(id) else {
                continue;
            };

            for (symbol, child) in node.children().rev() {
                let mut child_path = path.clone();
                child_path.push(symbol);
                self.stack.push((child, child_path));
            }

            if let Some(value) = &node.value {
                break Some((path, value));
            }
        }
    }
}
