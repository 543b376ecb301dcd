//! Non-owning node handles.
//!
//! A [`Node`] is a small `Copy` view of one position in a [`Tree`](crate::Tree).
//! It owns nothing and is never freed. Its `'tree` lifetime ties it to the
//! tree that produced it.
//!
//! ## Null propagation
//!
//! Every node may be null: the root of a missing subtree, a parent that does
//! not exist, an index past the last child. Nothing here fails on a null node.
//! Navigation returns another null node, flags return `false`, counts return
//! zero and text returns empty. Traversal code can chain lookups such as
//! `node.child(0).child_by_field_name("key").next_sibling()` and check
//! [`Node::is_null`] once at the end.

use std::fmt;
use std::hash::{Hash, Hasher};
use std::iter::FusedIterator;

use crate::cursor::{Cursor, Preorder};
use crate::grammar::Grammar;
use crate::types::{Extent, NodeId, Point, Symbol};

/// A copyable, read-only view of a node in a tree, or the null node.
#[derive(Clone, Copy)]
pub struct Node<'tree> {
    inner: Option<tree_sitter::Node<'tree>>,
}

impl<'tree> Node<'tree> {
    /// The null node.
    pub const NULL: Self = Self { inner: None };

    pub(crate) fn from_raw(node: tree_sitter::Node<'tree>) -> Self {
        Self { inner: Some(node) }
    }

    fn from_option(node: Option<tree_sitter::Node<'tree>>) -> Self {
        Self { inner: node }
    }

    /// The engine node, for interop with other tree-sitter tooling.
    ///
    /// Returns `None` for the null node.
    #[must_use]
    pub fn as_raw(&self) -> Option<tree_sitter::Node<'tree>> {
        self.inner
    }

    // ------------------------------------------------------------------------
    // Flags
    // ------------------------------------------------------------------------

    /// Returns `true` for the null node.
    ///
    /// Check this before trusting any other accessor to describe real data.
    #[must_use]
    pub fn is_null(&self) -> bool {
        self.inner.is_none()
    }

    /// Returns `true` for nodes of named grammar rules, `false` for anonymous
    /// tokens such as punctuation.
    #[must_use]
    pub fn is_named(&self) -> bool {
        self.inner.is_some_and(|n| n.is_named())
    }

    /// Returns `true` for zero-width tokens the parser inserted to recover
    /// from an error.
    #[must_use]
    pub fn is_missing(&self) -> bool {
        self.inner.is_some_and(|n| n.is_missing())
    }

    /// Returns `true` for nodes that may appear anywhere, such as comments.
    #[must_use]
    pub fn is_extra(&self) -> bool {
        self.inner.is_some_and(|n| n.is_extra())
    }

    /// Returns `true` for syntax error nodes.
    #[must_use]
    pub fn is_error(&self) -> bool {
        self.inner.is_some_and(|n| n.is_error())
    }

    /// Returns `true` if this node or any descendant is an error or missing node.
    #[must_use]
    pub fn has_error(&self) -> bool {
        self.inner.is_some_and(|n| n.has_error())
    }

    // ------------------------------------------------------------------------
    // Navigation
    // ------------------------------------------------------------------------

    /// The parent node, or null at the root.
    #[must_use]
    pub fn parent(&self) -> Self {
        Self::from_option(self.inner.and_then(|n| n.parent()))
    }

    /// The previous sibling, or null for the first child.
    #[must_use]
    pub fn previous_sibling(&self) -> Self {
        Self::from_option(self.inner.and_then(|n| n.prev_sibling()))
    }

    /// The next sibling, or null for the last child.
    #[must_use]
    pub fn next_sibling(&self) -> Self {
        Self::from_option(self.inner.and_then(|n| n.next_sibling()))
    }

    /// Number of children, named and anonymous.
    #[must_use]
    pub fn child_count(&self) -> usize {
        self.inner.map_or(0, |n| n.child_count())
    }

    /// The child at `index`, or null if `index` is out of range.
    #[must_use]
    pub fn child(&self, index: usize) -> Self {
        // The engine narrows indices to u32; wider ones would wrap onto real children.
        let Ok(index) = u32::try_from(index) else {
            return Self::NULL;
        };
        Self::from_option(self.inner.and_then(|n| n.child(index as usize)))
    }

    /// Number of named children.
    ///
    /// Named children have their own index space: `named_child(i)` is the
    /// `i`-th named node among all children, not `child(i)`.
    #[must_use]
    pub fn named_child_count(&self) -> usize {
        self.inner.map_or(0, |n| n.named_child_count())
    }

    /// The named child at `index`, or null if `index` is out of range.
    #[must_use]
    pub fn named_child(&self, index: usize) -> Self {
        let Ok(index) = u32::try_from(index) else {
            return Self::NULL;
        };
        Self::from_option(self.inner.and_then(|n| n.named_child(index as usize)))
    }

    // ------------------------------------------------------------------------
    // Fields
    // ------------------------------------------------------------------------

    /// Field name of the child at `index` (in the raw child index space), if
    /// that child fills a field.
    #[must_use]
    pub fn field_name_for_child(&self, index: usize) -> Option<&'static str> {
        let index = u32::try_from(index).ok()?;
        self.inner.and_then(|n| n.field_name_for_child(index))
    }

    /// The first child filling the field called `name`, or null.
    #[must_use]
    pub fn child_by_field_name(&self, name: &str) -> Self {
        Self::from_option(self.inner.and_then(|n| n.child_by_field_name(name)))
    }

    // ------------------------------------------------------------------------
    // Iteration
    // ------------------------------------------------------------------------

    /// A fresh cursor positioned at this node.
    ///
    /// The cursor cannot move above this node.
    #[must_use]
    pub fn cursor(&self) -> Cursor<'tree> {
        Cursor::new(*self)
    }

    /// Iterate over all children in order.
    #[must_use]
    pub fn children(&self) -> Children<'tree> {
        Children::new(*self, false)
    }

    /// Iterate over named children in order.
    #[must_use]
    pub fn named_children(&self) -> Children<'tree> {
        Children::new(*self, true)
    }

    /// This node and all its descendants, depth-first in pre-order.
    #[must_use]
    pub fn descendants(&self) -> Preorder<'tree> {
        Preorder::new(self.cursor())
    }

    // ------------------------------------------------------------------------
    // Attributes
    // ------------------------------------------------------------------------

    /// Identity of this node, unique within its tree.
    #[must_use]
    pub fn id(&self) -> NodeId {
        self.inner.map_or(NodeId::NULL, |n| NodeId::new(n.id()))
    }

    /// Parenthesized structural dump of this subtree, such as
    /// `(document (array (number) (null)))`.
    ///
    /// Anonymous tokens are omitted and field names are shown as `name:`
    /// prefixes. Empty for the null node.
    #[must_use]
    pub fn string_expression(&self) -> String {
        self.inner.map(|n| n.to_sexp()).unwrap_or_default()
    }

    /// The grammar that produced this node, or `None` for the null node.
    #[must_use]
    pub fn grammar(&self) -> Option<Grammar> {
        self.inner
            .map(|n| Grammar::new(tree_sitter::Language::clone(&n.language())))
    }

    /// The grammar symbol of this node. [`Symbol::ERROR`] for error nodes and
    /// symbol 0 for the null node.
    #[must_use]
    pub fn symbol(&self) -> Symbol {
        Symbol::from(self.inner.map_or(0, |n| n.kind_id()))
    }

    /// The node type, such as `"array"` or `"["`. Empty for the null node.
    #[doc(alias = "type")]
    #[must_use]
    pub fn kind(&self) -> &'static str {
        self.inner.map_or("", |n| n.kind())
    }

    /// Byte offsets covered by this node, end exclusive.
    #[must_use]
    pub fn byte_range(&self) -> Extent<usize> {
        self.inner
            .map(|n| Extent::new(n.start_byte(), n.end_byte()))
            .unwrap_or_default()
    }

    /// Row/column positions covered by this node, end exclusive.
    #[must_use]
    pub fn point_range(&self) -> Extent<Point> {
        self.inner
            .map(|n| Extent::new(n.start_position().into(), n.end_position().into()))
            .unwrap_or_default()
    }

    /// The text of this node, sliced from `source` at [`Node::byte_range`].
    ///
    /// `source` must be the buffer the tree was parsed from. Returns `None` if
    /// it is shorter than the node's end or the range splits a UTF-8
    /// character.
    #[must_use]
    pub fn source_slice<'s>(&self, source: &'s str) -> Option<&'s str> {
        source.get(self.byte_range().as_range())
    }

    /// The bytes of this node, sliced from `source` at [`Node::byte_range`].
    ///
    /// Returns `None` if `source` is shorter than the node's end.
    #[must_use]
    pub fn source_bytes<'s>(&self, source: &'s [u8]) -> Option<&'s [u8]> {
        source.get(self.byte_range().as_range())
    }
}

impl Default for Node<'_> {
    fn default() -> Self {
        Self::NULL
    }
}

impl PartialEq for Node<'_> {
    fn eq(&self, other: &Self) -> bool {
        self.id() == other.id()
    }
}

impl Eq for Node<'_> {}

impl Hash for Node<'_> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id().hash(state);
    }
}

impl fmt::Debug for Node<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_null() {
            return f.write_str("Node(null)");
        }
        let range = self.byte_range();
        write!(f, "Node({} {}..{})", self.kind(), range.start, range.end)
    }
}

/// Iterator over the children of a node, optionally named children only.
#[derive(Debug, Clone)]
pub struct Children<'tree> {
    parent: Node<'tree>,
    named_only: bool,
    index: usize,
    count: usize,
}

impl<'tree> Children<'tree> {
    fn new(parent: Node<'tree>, named_only: bool) -> Self {
        let count = if named_only {
            parent.named_child_count()
        } else {
            parent.child_count()
        };
        Self {
            parent,
            named_only,
            index: 0,
            count,
        }
    }
}

impl<'tree> Iterator for Children<'tree> {
    type Item = Node<'tree>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.index >= self.count {
            return None;
        }
        let node = if self.named_only {
            self.parent.named_child(self.index)
        } else {
            self.parent.child(self.index)
        };
        self.index += 1;
        Some(node)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.count - self.index;
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for Children<'_> {}

impl FusedIterator for Children<'_> {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Parser, Tree};
    use rstest::rstest;

    fn parse_json(source: &str) -> Tree {
        Parser::new(Grammar::new(tree_sitter_json::LANGUAGE.into()))
            .expect("json grammar should bind")
            .parse(source)
            .expect("parse should succeed")
    }

    #[test]
    fn null_node_degrades_quietly() {
        let null = Node::NULL;

        assert!(null.is_null());
        assert!(!null.is_named());
        assert!(!null.is_missing());
        assert!(!null.is_extra());
        assert!(!null.is_error());
        assert!(!null.has_error());
        assert!(null.parent().is_null());
        assert!(null.next_sibling().is_null());
        assert!(null.previous_sibling().is_null());
        assert!(null.child(0).is_null());
        assert!(null.named_child(0).is_null());
        assert!(null.child_by_field_name("key").is_null());
        assert_eq!(null.field_name_for_child(0), None);
        assert_eq!(null.child_count(), 0);
        assert_eq!(null.named_child_count(), 0);
        assert_eq!(null.id(), NodeId::NULL);
        assert_eq!(null.kind(), "");
        assert_eq!(null.string_expression(), "");
        assert_eq!(null.byte_range(), Extent::new(0, 0));
        assert_eq!(null.source_slice("anything"), Some(""));
        assert_eq!(null.children().count(), 0);
        assert_eq!(null.descendants().count(), 0);
    }

    #[test]
    fn chained_lookups_through_absent_nodes_stay_null() {
        let tree = parse_json("[1]");

        let deep = tree.root().child(7).child(0).parent().next_sibling();

        assert!(deep.is_null());
    }

    #[rstest]
    #[case::past_end(5)]
    #[case::far_past_end(usize::MAX)]
    fn out_of_range_indices_return_null(#[case] index: usize) {
        let tree = parse_json("[1, 2]");
        let array = tree.root().named_child(0);

        assert!(array.child(index).is_null());
        assert!(array.named_child(index).is_null());
        assert_eq!(array.field_name_for_child(index), None);
    }

    #[cfg(target_pointer_width = "64")]
    #[test]
    fn indices_beyond_u32_do_not_wrap_onto_children() {
        let tree = parse_json("[1, 2]");
        let array = tree.root().named_child(0);
        let wrapped = (1usize << 32) + 1;

        assert!(!array.child(1).is_null(), "index 1 is a real child");
        assert!(array.child(wrapped).is_null());
        assert!(array.named_child(wrapped).is_null());
        assert_eq!(array.field_name_for_child(wrapped), None);
    }

    #[test]
    fn siblings_link_both_ways() {
        let tree = parse_json("[1, 2]");
        let array = tree.root().named_child(0);
        let first = array.named_child(0);
        let comma = first.next_sibling();

        assert_eq!(comma.kind(), ",");
        assert!(!comma.is_named());
        assert_eq!(comma.previous_sibling(), first);
        assert_eq!(comma.next_sibling(), array.named_child(1));
        assert!(array.child(0).previous_sibling().is_null());
    }

    #[test]
    fn fields_are_addressed_by_name_and_position() {
        let tree = parse_json(r#"{"key": 42}"#);
        let pair = tree.root().named_child(0).named_child(0);

        assert_eq!(pair.kind(), "pair");
        assert_eq!(pair.field_name_for_child(0), Some("key"));
        assert_eq!(pair.field_name_for_child(1), None, "the colon fills no field");
        assert_eq!(pair.field_name_for_child(2), Some("value"));
        assert_eq!(pair.child_by_field_name("value").kind(), "number");
        assert_eq!(pair.child_by_field_name("key").kind(), "string");
        assert!(pair.child_by_field_name("no_such_field").is_null());
    }

    #[test]
    fn ranges_and_text_follow_the_source() {
        let source = "[\n  10,\n  true\n]";
        let tree = parse_json(source);
        let array = tree.root().named_child(0);
        let boolean = array.named_child(1);

        assert_eq!(boolean.kind(), "true");
        assert_eq!(boolean.byte_range(), Extent::new(10, 14));
        assert_eq!(
            boolean.point_range(),
            Extent::new(Point::new(2, 2), Point::new(2, 6))
        );
        assert_eq!(boolean.source_slice(source), Some("true"));
        assert_eq!(boolean.source_bytes(source.as_bytes()), Some(&b"true"[..]));
        assert_eq!(array.source_slice(source), Some(source));
    }

    #[test]
    fn short_buffer_yields_no_slice() {
        let source = "[1, 22222]";
        let tree = parse_json(source);
        let number = tree.root().named_child(0).named_child(1);

        assert_eq!(number.source_slice("[1, 2"), None);
        assert_eq!(number.source_bytes(b"[1"), None);
    }

    #[test]
    fn symbol_matches_grammar_lookup() {
        let tree = parse_json("[1]");
        let array = tree.root().named_child(0);
        let grammar = tree.grammar();

        assert_eq!(grammar.symbol_for_name("array", true), Some(array.symbol()));
        assert_eq!(grammar.symbol_name(array.symbol()), Ok("array"));
    }

    #[test]
    fn nodes_report_the_grammar_of_their_tree() {
        let tree = parse_json("[1, null]");
        let number = tree.root().named_child(0).named_child(0);

        assert_eq!(number.grammar().as_ref(), Some(tree.grammar()));
        assert_eq!(tree.root().grammar().as_ref(), Some(tree.grammar()));
        assert_eq!(Node::NULL.grammar(), None);
    }

    #[test]
    fn ids_are_distinct_and_stable() {
        let tree = parse_json("[1, 2]");
        let array = tree.root().named_child(0);

        assert_eq!(array.id(), tree.root().named_child(0).id());
        assert_ne!(array.id(), tree.root().id());
        assert_ne!(array.named_child(0).id(), array.named_child(1).id());
        assert!(!array.id().is_null());
    }

    #[test]
    fn named_children_skip_punctuation() {
        let tree = parse_json("[1, 2, 3]");
        let array = tree.root().named_child(0);

        let named: Vec<_> = array.named_children().map(|n| n.kind()).collect();
        let all = array.children();

        assert_eq!(named, ["number", "number", "number"]);
        assert_eq!(all.len(), 7);
    }

    #[test]
    fn debug_shows_kind_and_range() {
        let tree = parse_json("[1]");

        assert_eq!(format!("{:?}", tree.root().named_child(0)), "Node(array 0..3)");
        assert_eq!(format!("{:?}", Node::NULL), "Node(null)");
    }
}
