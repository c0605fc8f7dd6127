//! Path-compressed word trie.
//!
//! Every edge carries a label of one or more lowercase ASCII letters. Siblings
//! never share a first letter, and no node other than the root is left as a
//! non-terminal with a single child: such chains are folded into one edge.
//!
//! Terminal nodes hold a [`Payload`]; inserting a word that is already
//! present merges the new payload into the stored one.

mod debug;
mod node;
mod views;

use std::fmt;

use log::{debug, trace};
use smallvec::SmallVec;

use crate::arena::{NodeArena, NodeId};
use crate::payload::Payload;
use crate::Config;

pub use node::NodeRef;
use node::{Label, Node};

/// Normalized key bytes.
type Key = SmallVec<[u8; 24]>;

/// What [`ReducedTrie::insert`] did with a word.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InsertOutcome {
    /// The word was not present and is now indexed.
    Created,
    /// The word was already present; the payloads were merged.
    Merged,
    /// The word contains something other than ASCII letters and was skipped.
    Rejected,
}

/// Lowercase `word`, or `None` if it holds anything but ASCII letters.
pub(crate) fn normalize(word: &str) -> Option<Key> {
    if !word.bytes().all(|b| b.is_ascii_alphabetic()) {
        return None;
    }
    Some(word.bytes().map(|b| b.to_ascii_lowercase()).collect())
}

#[inline]
fn common_prefix_len(a: &[u8], b: &[u8]) -> usize {
    a.iter().zip(b).take_while(|(x, y)| x == y).count()
}

/// A path-compressed trie mapping words to occurrence payloads.
#[derive(Clone)]
pub struct ReducedTrie<P> {
    nodes: NodeArena<Node<P>>,
    root: NodeId,
    /// Number of terminal nodes.
    len: usize,
    config: Config,
}

impl<P: Payload> ReducedTrie<P> {
    /// Create an empty trie with the default configuration.
    pub fn new() -> Self {
        Self::with_config(Config::default())
    }

    /// Create an empty trie with the given configuration.
    pub fn with_config(config: Config) -> Self {
        let mut nodes = NodeArena::with_capacity(config.initial_capacity);
        let root = nodes.alloc(Node::root());
        Self {
            nodes,
            root,
            len: 0,
            config,
        }
    }

    /// Number of indexed words.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Number of live nodes, root included.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Read-only handle on the root, for walking the structure.
    pub fn root(&self) -> NodeRef<'_, P> {
        NodeRef {
            arena: &self.nodes,
            id: self.root,
        }
    }

    /// Index `word` with `payload`.
    ///
    /// The word is matched case-insensitively. Words containing anything other
    /// than ASCII letters are skipped and reported as
    /// [`InsertOutcome::Rejected`].
    ///
    /// # Panics
    /// Panics if `word` or `payload` is empty.
    pub fn insert(&mut self, word: &str, payload: P) -> InsertOutcome {
        assert!(!word.is_empty(), "word is empty");
        assert!(!payload.is_empty(), "payload is empty");

        let Some(key) = normalize(word) else {
            debug!("skipping {word:?}: not made of ASCII letters");
            return InsertOutcome::Rejected;
        };

        let outcome = self.insert_key(&key, payload);
        if outcome == InsertOutcome::Created {
            self.len += 1;
        }

        debug_assert!(self.search(word).is_some(), "{word:?} has not been added");
        self.check_invariants("insert");
        outcome
    }

    fn insert_key(&mut self, key: &[u8], payload: P) -> InsertOutcome {
        let mut node = self.root;
        let mut rest = key;

        loop {
            let Some(child) = self.nodes[node].find_child(&self.nodes, rest[0]) else {
                let leaf = self.nodes.alloc(Node::leaf(rest, payload, node));
                self.nodes[node].children.push(leaf);
                trace!("new leaf {leaf:?} under {node:?}");
                return InsertOutcome::Created;
            };

            let label_len = self.nodes[child].label.len();
            let common = common_prefix_len(&self.nodes[child].label, rest);
            debug_assert!(common >= 1);
            if common < label_len {
                // The parent keeps one child until this call hands it a second
                // child or a payload below.
                self.split(child, common);
            }

            if common == rest.len() {
                let target = &mut self.nodes[child];
                return match target.payload.as_mut() {
                    Some(existing) => {
                        existing.merge(payload);
                        InsertOutcome::Merged
                    }
                    None => {
                        target.payload = Some(payload);
                        InsertOutcome::Created
                    }
                };
            }

            node = child;
            rest = &rest[common..];
        }
    }

    /// Cut the label of `id` after `at` bytes. The tail moves into a new
    /// only child that takes over the payload and the children.
    fn split(&mut self, id: NodeId, at: usize) {
        let node = &mut self.nodes[id];
        debug_assert!(at > 0 && at < node.label.len());
        let tail = Label::from_slice(&node.label[at..]);
        node.label.truncate(at);
        let pushed = Node {
            label: tail,
            payload: node.payload.take(),
            children: std::mem::take(&mut node.children),
            parent: Some(id),
        };

        let pushed = self.nodes.alloc(pushed);
        self.adopt_children(pushed);
        self.nodes[id].children.push(pushed);
        trace!("split {id:?} at {at}, tail moved to {pushed:?}");
    }

    /// Point the parent link of every child of `id` back at `id`.
    fn adopt_children(&mut self, id: NodeId) {
        for i in 0..self.nodes[id].children.len() {
            let child = self.nodes[id].children[i];
            self.nodes[child].parent = Some(id);
        }
    }

    /// Payload stored for `word`, matched case-insensitively.
    ///
    /// # Panics
    /// Panics if `word` is empty.
    pub fn search(&self, word: &str) -> Option<&P> {
        assert!(!word.is_empty(), "word is empty");
        let key = normalize(word)?;
        let id = self.locate(&key)?;
        self.nodes[id].payload.as_ref()
    }

    /// Check if `word` is indexed.
    pub fn contains(&self, word: &str) -> bool {
        self.search(word).is_some()
    }

    /// Node whose path spells `key` exactly. Labels must be consumed whole.
    fn locate(&self, key: &[u8]) -> Option<NodeId> {
        let mut node = self.root;
        let mut rest = key;
        while !rest.is_empty() {
            let child = self.nodes[node].find_child(&self.nodes, rest[0])?;
            let label = &self.nodes[child].label;
            if !rest.starts_with(label) {
                return None;
            }
            rest = &rest[label.len()..];
            node = child;
        }
        Some(node)
    }

    /// Remove `word` and return its payload.
    ///
    /// A word that still has longer words below it only loses its payload;
    /// a leaf is released. Either way, a non-terminal node left with a single
    /// child absorbs that child.
    ///
    /// # Panics
    /// Panics if `word` is empty.
    pub fn delete(&mut self, word: &str) -> Option<P> {
        assert!(!word.is_empty(), "word is empty");
        let key = normalize(word)?;
        let target = self.locate(&key)?;
        let payload = self.nodes[target].payload.take()?;
        self.len -= 1;

        let is_leaf = self.nodes[target].children.is_empty();
        match self.nodes[target].parent {
            Some(parent) if is_leaf => {
                self.remove_leaf(parent, target);
                self.recompact_from(parent);
            }
            _ => {
                debug!("{word:?} still prefixes other words, demoting {target:?}");
                self.recompact_from(target);
            }
        }

        self.check_invariants("delete");
        Some(payload)
    }

    fn remove_leaf(&mut self, parent: NodeId, id: NodeId) {
        let siblings = &mut self.nodes[parent].children;
        if let Some(slot) = siblings.iter().position(|&c| c == id) {
            siblings.remove(slot);
        }
        self.nodes.release(id);
        trace!("released {id:?} from {parent:?}");
    }

    /// Walk up from `start`, folding single-child chains, until reaching the
    /// root, a terminal node or a branching node.
    fn recompact_from(&mut self, start: NodeId) {
        let mut cursor = Some(start);
        while let Some(id) = cursor {
            if !self.absorb_only_child(id) {
                break;
            }
            cursor = self.nodes[id].parent;
        }
    }

    /// Merge the only child of a non-root, non-terminal node into it.
    fn absorb_only_child(&mut self, id: NodeId) -> bool {
        let node = &self.nodes[id];
        if node.parent.is_none() || node.is_terminal() || node.children.len() != 1 {
            return false;
        }

        let child_id = node.children[0];
        let child = self.nodes.release(child_id);
        let node = &mut self.nodes[id];
        node.label.extend_from_slice(&child.label);
        node.payload = child.payload;
        node.children = child.children;
        self.adopt_children(id);
        debug!("merged {child_id:?} into {id:?}");
        true
    }

    /// Every indexed word that starts with `prefix`, in construction order.
    ///
    /// The last edge on the prefix path may be consumed partially, so
    /// `"dor"` finds `"dorm"`. An empty prefix lists every word.
    pub fn autocomplete(&self, prefix: &str) -> Vec<String> {
        let mut words = Vec::new();
        let Some(key) = normalize(prefix) else {
            return words;
        };
        if let Some((boundary, base)) = self.boundary(&key) {
            self.walk_terminals(boundary, &base, |word, _, _| words.push(word.to_owned()));
        }
        words
    }

    /// First node whose path covers `key`, and the path leading to it
    /// (without its own label).
    fn boundary(&self, key: &[u8]) -> Option<(NodeId, Key)> {
        let mut node = self.root;
        let mut rest = key;
        let mut path = Key::new();
        while !rest.is_empty() {
            let child = self.nodes[node].find_child(&self.nodes, rest[0])?;
            let label = &self.nodes[child].label;
            if label.starts_with(rest) {
                return Some((child, path));
            }
            if !rest.starts_with(label) {
                return None;
            }
            path.extend_from_slice(label);
            rest = &rest[label.len()..];
            node = child;
        }
        Some((node, path))
    }

    fn check_invariants(&self, op: &str) {
        if self.config.check_invariants {
            let issues = self.verify_integrity();
            assert!(issues.is_empty(), "trie corrupted by {op}: {issues:?}");
        }
    }
}

impl<P: Payload> Default for ReducedTrie<P> {
    fn default() -> Self {
        Self::new()
    }
}

impl<P: Payload + fmt::Debug> fmt::Debug for ReducedTrie<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut map = f.debug_map();
        self.walk_terminals(self.root, &[], |word, _, payload| {
            map.entry(&word, payload);
        });
        map.finish()
    }
}
