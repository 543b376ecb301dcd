//! Owned syntax trees.
//!
//! A [`Tree`] is the sole owner of one engine tree. It is move-only: there is
//! no `Clone`, so the engine resource is released exactly once, when the tree
//! is dropped. Every [`Node`] and [`Cursor`] borrows the tree it came from,
//! which lets the compiler reject any use after the tree is gone.
//!
//! ```compile_fail
//! use sylva::{Grammar, Parser};
//!
//! let mut parser = Parser::new(Grammar::new(tree_sitter_json::LANGUAGE.into())).unwrap();
//! let root = {
//!     let tree = parser.parse("[1]").unwrap();
//!     tree.root()
//! };
//! // `tree` was dropped above; the node cannot escape it.
//! println!("{}", root.kind());
//! ```
//!
//! ```compile_fail
//! use sylva::{Grammar, Parser};
//!
//! let mut parser = Parser::new(Grammar::new(tree_sitter_json::LANGUAGE.into())).unwrap();
//! let tree = parser.parse("[1]").unwrap();
//! let mut cursor = tree.walk();
//! drop(tree);
//! cursor.goto_first_child();
//! ```
//!
//! ## Thread safety
//!
//! The engine never mutates a tree after parsing, so `Tree` is `Send + Sync`
//! and read-only node queries on a shared tree are sound. There is no internal
//! locking; cursors are mutable and must stay with one thread at a time.

use crate::cursor::{Cursor, Preorder};
use crate::grammar::Grammar;
use crate::node::Node;

/// A parsed syntax tree, exclusively owned.
pub struct Tree {
    inner: tree_sitter::Tree,
    grammar: Grammar,
    source_len: usize,
}

impl Tree {
    pub(crate) fn new(inner: tree_sitter::Tree, grammar: Grammar, source_len: usize) -> Self {
        Self {
            inner,
            grammar,
            source_len,
        }
    }

    /// The root node, the entry point into the tree.
    ///
    /// For an empty source the root is a node with no children.
    #[must_use]
    pub fn root(&self) -> Node<'_> {
        Node::from_raw(self.inner.root_node())
    }

    /// The grammar this tree was parsed with.
    #[must_use]
    pub fn grammar(&self) -> &Grammar {
        &self.grammar
    }

    /// Returns `true` if any node in the tree is an error or missing node.
    ///
    /// A coarse success signal; walk the tree with [`Node::is_error`] and
    /// [`Node::is_missing`] to locate problems.
    #[must_use]
    pub fn has_error(&self) -> bool {
        self.root().has_error()
    }

    /// Length in bytes of the source this tree was parsed from.
    ///
    /// Buffers passed to [`Node::source_slice`] must be at least this long.
    #[must_use]
    pub fn source_len(&self) -> usize {
        self.source_len
    }

    /// A cursor positioned at the root.
    #[must_use]
    pub fn walk(&self) -> Cursor<'_> {
        self.root().cursor()
    }

    /// Every node of the tree in depth-first pre-order.
    #[must_use]
    pub fn preorder(&self) -> Preorder<'_> {
        self.root().descendants()
    }
}

impl std::fmt::Debug for Tree {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Tree")
            .field("grammar", &self.grammar)
            .field("source_len", &self.source_len)
            .field("root", &self.root())
            .finish()
    }
}
