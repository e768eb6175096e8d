//! Parse arena for serialized type identifiers.
//!
//! Nodes live in a flat `Vec` and refer to each other by [`NodeIndex`]. The
//! parent link is an index rather than a pointer, so the tree has a single
//! owner and no reference cycles.

use smallvec::SmallVec;
use typeheal_common::limits::{ARGUMENT_LIST_INLINE, MAX_NODE_PREALLOC};

/// Index of a node inside a [`ParseArena`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeIndex(pub u32);

impl NodeIndex {
    /// Sentinel for "no node" (the root's parent).
    pub const NONE: NodeIndex = NodeIndex(u32::MAX);

    #[inline]
    pub fn is_none(self) -> bool {
        self == Self::NONE
    }

    #[inline]
    pub fn is_some(self) -> bool {
        self != Self::NONE
    }

    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// One identifier level: the root identifier or a single generic argument.
#[derive(Debug, Clone)]
pub struct ParseNode {
    /// Raw text of this level's own segments (name, array suffix, module).
    /// Generic argument text is never appended here; it lives in `children`.
    pub buffer: String,
    pub parent: NodeIndex,
    /// Generic arguments in declaration order.
    pub children: SmallVec<[NodeIndex; ARGUMENT_LIST_INLINE]>,
    /// Arity declared after the backtick, if this level is generic.
    pub declared_arity: Option<u32>,
    /// Length of `buffer` when the arity section opened; the type name must
    /// end at or before this offset.
    pub name_end: Option<usize>,
    /// Byte offset in the source where this node's text starts.
    pub start: u32,
    /// Byte offset in the source just past the closing `]]`.
    pub arguments_end: Option<u32>,
}

impl ParseNode {
    fn new(parent: NodeIndex, start: u32) -> Self {
        ParseNode {
            buffer: String::new(),
            parent,
            children: SmallVec::new(),
            declared_arity: None,
            name_end: None,
            start,
            arguments_end: None,
        }
    }

    #[inline]
    pub fn is_generic(&self) -> bool {
        self.declared_arity.is_some()
    }
}

/// Arena holding every node produced by one parse pass.
///
/// Children are always allocated after their parent, so walking the nodes in
/// reverse allocation order visits every child before its parent.
#[derive(Debug, Clone, Default)]
pub struct ParseArena {
    nodes: Vec<ParseNode>,
}

impl ParseArena {
    pub fn new() -> ParseArena {
        ParseArena::default()
    }

    /// Create an arena sized for `capacity` nodes, capped at
    /// [`MAX_NODE_PREALLOC`].
    pub fn with_capacity(capacity: usize) -> ParseArena {
        ParseArena {
            nodes: Vec::with_capacity(capacity.min(MAX_NODE_PREALLOC)),
        }
    }

    /// Allocate the root node. Must be the first allocation.
    pub fn add_root(&mut self) -> NodeIndex {
        debug_assert!(self.nodes.is_empty(), "root must be allocated first");
        self.push(ParseNode::new(NodeIndex::NONE, 0))
    }

    /// Allocate a new node as the last generic argument of `parent`.
    pub fn add_child(&mut self, parent: NodeIndex, start: u32) -> NodeIndex {
        let child = self.push(ParseNode::new(parent, start));
        if let Some(parent_node) = self.get_mut(parent) {
            parent_node.children.push(child);
        }
        child
    }

    fn push(&mut self, node: ParseNode) -> NodeIndex {
        let idx = NodeIndex(self.nodes.len() as u32);
        self.nodes.push(node);
        idx
    }

    #[inline]
    pub fn root(&self) -> NodeIndex {
        NodeIndex(0)
    }

    #[inline]
    pub fn get(&self, idx: NodeIndex) -> Option<&ParseNode> {
        self.nodes.get(idx.index())
    }

    #[inline]
    pub fn get_mut(&mut self, idx: NodeIndex) -> Option<&mut ParseNode> {
        self.nodes.get_mut(idx.index())
    }

    /// Nesting depth of `idx` (the root is at depth 0).
    pub fn depth(&self, idx: NodeIndex) -> usize {
        let mut depth = 0;
        let mut current = self.get(idx).map_or(NodeIndex::NONE, |n| n.parent);
        while current.is_some() {
            depth += 1;
            current = self.get(current).map_or(NodeIndex::NONE, |n| n.parent);
        }
        depth
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Iterate nodes with their indices in allocation order.
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = (NodeIndex, &ParseNode)> {
        self.nodes
            .iter()
            .enumerate()
            .map(|(i, node)| (NodeIndex(i as u32), node))
    }
}
