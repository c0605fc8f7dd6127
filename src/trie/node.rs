//! Trie nodes and the read-only handle used to walk them.

use smallvec::SmallVec;

use crate::arena::{NodeArena, NodeId};

/// Edge label bytes. Most compressed edges in natural-language vocabularies
/// are short, so they stay inline.
pub(crate) type Label = SmallVec<[u8; 8]>;

/// A node of the trie.
///
/// A node is terminal exactly when it holds a payload.
#[derive(Clone, Debug)]
pub(crate) struct Node<P> {
    pub(crate) label: Label,
    pub(crate) payload: Option<P>,
    /// Child ids in construction order.
    pub(crate) children: SmallVec<[NodeId; 4]>,
    pub(crate) parent: Option<NodeId>,
}

impl<P> Node<P> {
    pub(crate) fn root() -> Self {
        Self {
            label: Label::new(),
            payload: None,
            children: SmallVec::new(),
            parent: None,
        }
    }

    pub(crate) fn leaf(label: &[u8], payload: P, parent: NodeId) -> Self {
        Self {
            label: Label::from_slice(label),
            payload: Some(payload),
            children: SmallVec::new(),
            parent: Some(parent),
        }
    }

    #[inline]
    pub(crate) fn is_terminal(&self) -> bool {
        self.payload.is_some()
    }

    #[inline]
    pub(crate) fn first_byte(&self) -> Option<u8> {
        self.label.first().copied()
    }

    /// Position of the child reached by `byte` among this node's children.
    pub(crate) fn child_slot(&self, arena: &NodeArena<Node<P>>, byte: u8) -> Option<usize> {
        self.children
            .iter()
            .position(|&child| arena[child].first_byte() == Some(byte))
    }

    pub(crate) fn find_child(&self, arena: &NodeArena<Node<P>>, byte: u8) -> Option<NodeId> {
        self.child_slot(arena, byte).map(|slot| self.children[slot])
    }
}

/// Read-only view of one node, borrowed from its trie.
pub struct NodeRef<'a, P> {
    pub(crate) arena: &'a NodeArena<Node<P>>,
    pub(crate) id: NodeId,
}

impl<P> Clone for NodeRef<'_, P> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<P> Copy for NodeRef<'_, P> {}

impl<'a, P> NodeRef<'a, P> {
    fn node(&self) -> &'a Node<P> {
        &self.arena[self.id]
    }

    /// Arena id of this node. Stable until the node is released.
    pub fn id(&self) -> NodeId {
        self.id
    }

    /// Compressed edge label leading into this node. Empty for the root.
    pub fn label(&self) -> &'a str {
        // Labels only ever hold ASCII letters.
        std::str::from_utf8(&self.node().label).unwrap_or_default()
    }

    pub fn is_terminal(&self) -> bool {
        self.node().is_terminal()
    }

    pub fn is_root(&self) -> bool {
        self.node().parent.is_none()
    }

    pub fn payload(&self) -> Option<&'a P> {
        self.node().payload.as_ref()
    }

    pub fn child_count(&self) -> usize {
        self.node().children.len()
    }

    /// Children in construction order.
    pub fn children(&self) -> impl Iterator<Item = NodeRef<'a, P>> + 'a {
        let arena = self.arena;
        self.node()
            .children
            .iter()
            .map(move |&id| NodeRef { arena, id })
    }

    pub fn parent(&self) -> Option<NodeRef<'a, P>> {
        self.node().parent.map(|id| NodeRef {
            arena: self.arena,
            id,
        })
    }

    /// Concatenation of the labels from the root down to this node.
    pub fn word(&self) -> String {
        let mut parts = Vec::new();
        let mut cursor = Some(*self);
        while let Some(node) = cursor {
            parts.push(node.label());
            cursor = node.parent();
        }
        parts.iter().rev().copied().collect()
    }
}

impl<P> std::fmt::Debug for NodeRef<'_, P> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NodeRef")
            .field("id", &self.id)
            .field("label", &self.label())
            .field("terminal", &self.is_terminal())
            .field("children", &self.child_count())
            .finish()
    }
}
