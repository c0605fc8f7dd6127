//! Whole-tree enumeration views.

use std::collections::BTreeMap;

use crate::arena::NodeId;
use crate::payload::Payload;

use super::ReducedTrie;

impl<P: Payload> ReducedTrie<P> {
    /// Every word mapped to its depth, counted in edges from the root.
    pub fn alphabetical_order(&self) -> BTreeMap<String, usize> {
        let mut map = BTreeMap::new();
        self.walk_terminals(self.root, &[], |word, depth, _| {
            map.insert(word.to_owned(), depth);
        });
        map
    }

    /// Every word with its occurrence count, most frequent first.
    ///
    /// Words with the same count stay in alphabetical order.
    pub fn frequency_order(&self) -> Vec<(String, usize)> {
        let mut counts = Vec::with_capacity(self.len);
        self.walk_terminals(self.root, &[], |word, _, payload| {
            counts.push((word.to_owned(), payload.occurrences()));
        });
        counts.sort_by(|a, b| a.0.cmp(&b.0));
        counts.sort_by(|a, b| b.1.cmp(&a.1));
        counts
    }

    /// Every word, in construction order.
    pub fn words(&self) -> Vec<String> {
        let mut words = Vec::with_capacity(self.len);
        self.walk_terminals(self.root, &[], |word, _, _| words.push(word.to_owned()));
        words
    }

    /// Pre-order walk of the subtree at `start`, calling `f` with the word,
    /// depth and payload of each terminal node.
    ///
    /// `base` is the path leading to `start`, excluding its own label. Depth
    /// is counted from `start`, so it is the true depth only when walking from
    /// the root.
    pub(crate) fn walk_terminals(
        &self,
        start: NodeId,
        base: &[u8],
        mut f: impl FnMut(&str, usize, &P),
    ) {
        let mut buf = base.to_vec();
        // (node, length of `buf` before this node's label, depth)
        let mut stack = vec![(start, base.len(), 0usize)];

        while let Some((id, path_len, depth)) = stack.pop() {
            let node = &self.nodes[id];
            buf.truncate(path_len);
            buf.extend_from_slice(&node.label);

            if let Some(payload) = &node.payload {
                // Labels only ever hold ASCII letters.
                if let Ok(word) = std::str::from_utf8(&buf) {
                    f(word, depth, payload);
                }
            }

            let len = buf.len();
            stack.extend(node.children.iter().rev().map(|&c| (c, len, depth + 1)));
        }
    }
}
