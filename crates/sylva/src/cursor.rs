//! Stateful tree walking.
//!
//! A [`Cursor`] remembers the path from its traversal root to the current
//! node, so parent, sibling and child moves are cheap. Walking a large subtree
//! with a cursor avoids the repeated root-relative lookups that pure
//! [`Node`] navigation performs.
//!
//! Cursors are move-only. Duplicating traversal state is always explicit,
//! through [`Cursor::copy`], and the copy is fully independent:
//!
//! ```compile_fail
//! fn needs_clone<T: Clone>() {}
//! needs_clone::<sylva::Cursor<'static>>();
//! ```

use std::fmt;
use std::iter::FusedIterator;

use crate::node::Node;

/// A mutable depth-first walker over one tree.
///
/// The node a cursor is created from (or last reset to) is its traversal
/// root: [`goto_parent`](Cursor::goto_parent) never climbs above it and
/// sibling moves never leave it.
///
/// # Examples
///
/// ```
/// use sylva::{Grammar, Parser};
///
/// let mut parser = Parser::new(Grammar::new(tree_sitter_json::LANGUAGE.into()))?;
/// let tree = parser.parse("[1, null]")?;
/// let mut cursor = tree.walk();
///
/// assert!(cursor.goto_first_child());
/// assert_eq!(cursor.current_node().kind(), "array");
/// assert!(cursor.goto_first_child());
/// assert!(cursor.goto_next_sibling());
/// assert_eq!(cursor.current_node().kind(), "number");
/// # Ok::<(), sylva::Error>(())
/// ```
pub struct Cursor<'tree> {
    // None while positioned on the null node.
    inner: Option<tree_sitter::TreeCursor<'tree>>,
}

impl<'tree> Cursor<'tree> {
    /// Create a cursor positioned at `node`.
    #[must_use]
    pub fn new(node: Node<'tree>) -> Self {
        Self {
            inner: node.as_raw().map(|n| n.walk()),
        }
    }

    /// Reposition at `node`, which becomes the new traversal root.
    pub fn reset(&mut self, node: Node<'tree>) {
        match (&mut self.inner, node.as_raw()) {
            (Some(cursor), Some(raw)) => cursor.reset(raw),
            (inner, raw) => *inner = raw.map(|n| n.walk()),
        }
    }

    /// Take over the position, path and traversal root of `other`.
    pub fn reset_to(&mut self, other: &Self) {
        match (&mut self.inner, &other.inner) {
            (Some(cursor), Some(source)) => cursor.reset_to(source),
            (inner, source) => *inner = source.clone(),
        }
    }

    /// An independent deep copy of this cursor.
    ///
    /// Moving either cursor afterwards does not affect the other.
    #[must_use]
    pub fn copy(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }

    /// The node the cursor is positioned at.
    #[must_use]
    pub fn current_node(&self) -> Node<'tree> {
        self.inner
            .as_ref()
            .map_or(Node::NULL, |cursor| Node::from_raw(cursor.node()))
    }

    /// Field name of the current node within its parent, if any.
    #[must_use]
    pub fn field_name(&self) -> Option<&'static str> {
        self.inner.as_ref().and_then(|cursor| cursor.field_name())
    }

    /// Depth of the current node below the traversal root.
    #[must_use]
    pub fn depth(&self) -> u32 {
        self.inner.as_ref().map_or(0, |cursor| cursor.depth())
    }

    /// Move to the parent. Returns `false` and stays put at the traversal root.
    pub fn goto_parent(&mut self) -> bool {
        self.inner.as_mut().is_some_and(|cursor| cursor.goto_parent())
    }

    /// Move to the next sibling. Returns `false` and stays put on the last
    /// sibling.
    pub fn goto_next_sibling(&mut self) -> bool {
        self.inner
            .as_mut()
            .is_some_and(|cursor| cursor.goto_next_sibling())
    }

    /// Move to the previous sibling. Returns `false` and stays put on the
    /// first sibling.
    pub fn goto_previous_sibling(&mut self) -> bool {
        self.inner
            .as_mut()
            .is_some_and(|cursor| cursor.goto_previous_sibling())
    }

    /// Move to the first child. Returns `false` and stays put on a leaf.
    pub fn goto_first_child(&mut self) -> bool {
        self.inner
            .as_mut()
            .is_some_and(|cursor| cursor.goto_first_child())
    }

    /// Move to the last child. Returns `false` and stays put on a leaf.
    pub fn goto_last_child(&mut self) -> bool {
        self.inner
            .as_mut()
            .is_some_and(|cursor| cursor.goto_last_child())
    }
}

impl fmt::Debug for Cursor<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Cursor")
            .field("node", &self.current_node())
            .field("depth", &self.depth())
            .finish()
    }
}

/// Depth-first pre-order iterator over a subtree, driven by a [`Cursor`].
///
/// Yields the cursor's starting node first, then every descendant, each
/// before its children and in source order among siblings.
#[derive(Debug)]
pub struct Preorder<'tree> {
    cursor: Cursor<'tree>,
    done: bool,
}

impl<'tree> Preorder<'tree> {
    /// Walk the subtree below the cursor's current node.
    ///
    /// The cursor is re-rooted there, so the walk never leaves that subtree.
    #[must_use]
    pub fn new(mut cursor: Cursor<'tree>) -> Self {
        let start = cursor.current_node();
        cursor.reset(start);
        Self {
            cursor,
            done: start.is_null(),
        }
    }
}

impl<'tree> Iterator for Preorder<'tree> {
    type Item = Node<'tree>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        let node = self.cursor.current_node();

        if self.cursor.goto_first_child() {
            return Some(node);
        }
        // Leaf: climb until a sibling is available or the root is reached.
        loop {
            if self.cursor.goto_next_sibling() {
                break;
            }
            if !self.cursor.goto_parent() {
                self.done = true;
                break;
            }
        }
        Some(node)
    }
}

impl FusedIterator for Preorder<'_> {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Grammar, Parser, Tree};

    fn parse_json(source: &str) -> Tree {
        Parser::new(Grammar::new(tree_sitter_json::LANGUAGE.into()))
            .expect("json grammar should bind")
            .parse(source)
            .expect("parse should succeed")
    }

    #[test]
    fn failed_moves_leave_position_unchanged() {
        let tree = parse_json("[1]");
        let mut cursor = tree.walk();

        assert!(!cursor.goto_parent(), "root has no parent within the cursor");
        assert!(!cursor.goto_next_sibling());
        assert!(!cursor.goto_previous_sibling());
        assert_eq!(cursor.current_node(), tree.root());

        let number = tree.root().named_child(0).named_child(0);
        cursor.reset(number);
        assert!(!cursor.goto_first_child(), "numbers are leaves");
        assert!(!cursor.goto_last_child());
        assert_eq!(cursor.current_node(), number);
    }

    #[test]
    fn cursor_stays_within_its_traversal_root() {
        let tree = parse_json("[[1], 2]");
        let inner = tree.root().named_child(0).named_child(0);
        let mut cursor = inner.cursor();

        assert!(cursor.goto_first_child());
        assert_eq!(cursor.depth(), 1);
        assert!(cursor.goto_parent());
        assert_eq!(cursor.current_node(), inner);
        assert!(!cursor.goto_parent(), "cannot climb above the node it was built from");
        assert!(!cursor.goto_next_sibling(), "cannot leave the subtree sideways");
        assert_eq!(cursor.depth(), 0);
    }

    #[test]
    fn last_child_and_previous_sibling_walk_backwards() {
        let tree = parse_json("[1, 2]");
        let mut cursor = tree.root().named_child(0).cursor();

        assert!(cursor.goto_last_child());
        assert_eq!(cursor.current_node().kind(), "]");
        assert!(cursor.goto_previous_sibling());
        assert_eq!(cursor.current_node().source_slice("[1, 2]"), Some("2"));
    }

    #[test]
    fn copy_is_independent() {
        let tree = parse_json("[1, 2]");
        let mut original = tree.walk();
        assert!(original.goto_first_child());

        let mut copy = original.copy();
        assert!(copy.goto_first_child());
        assert!(copy.goto_next_sibling());

        assert_eq!(original.current_node().kind(), "array");
        assert_eq!(copy.current_node().kind(), "number");
        assert_eq!(copy.depth(), 2);
        assert_eq!(original.depth(), 1);
    }

    #[test]
    fn reset_discards_previous_path() {
        let tree = parse_json("[1, [2]]");
        let mut cursor = tree.walk();
        assert!(cursor.goto_first_child());
        assert!(cursor.goto_first_child());

        let nested = tree.root().named_child(0).named_child(1);
        cursor.reset(nested);

        assert_eq!(cursor.current_node(), nested);
        assert_eq!(cursor.depth(), 0);
        assert!(!cursor.goto_parent());
    }

    #[test]
    fn reset_to_adopts_other_cursor_state() {
        let tree = parse_json("[1, 2]");
        let mut leader = tree.walk();
        assert!(leader.goto_first_child());
        assert!(leader.goto_last_child());

        let mut follower = tree.root().named_child(0).named_child(0).cursor();
        follower.reset_to(&leader);

        assert_eq!(follower.current_node(), leader.current_node());
        assert_eq!(follower.depth(), 2);
        assert!(follower.goto_parent());
        assert_eq!(follower.current_node().kind(), "array");
    }

    #[test]
    fn null_cursor_can_be_revived() {
        let tree = parse_json("[1]");
        let mut cursor = Cursor::new(Node::NULL);

        assert!(cursor.current_node().is_null());
        assert!(!cursor.goto_first_child());
        assert!(!cursor.goto_parent());
        assert_eq!(cursor.depth(), 0);

        cursor.reset(tree.root());
        assert!(cursor.goto_first_child());

        cursor.reset(Node::NULL);
        assert!(cursor.current_node().is_null());

        let mut revived = Cursor::new(Node::NULL);
        revived.reset_to(&tree.walk());
        assert_eq!(revived.current_node(), tree.root());
    }

    #[test]
    fn field_name_reports_role_in_parent() {
        let tree = parse_json(r#"{"a": 1}"#);
        let pair = tree.root().named_child(0).named_child(0);
        let mut cursor = tree.walk();
        cursor.reset(pair);
        assert_eq!(cursor.field_name(), None, "traversal root has no parent in view");

        // Walk to the pair from the root so the parent path is known.
        let mut cursor = tree.walk();
        assert!(cursor.goto_first_child());
        assert!(cursor.goto_first_child());
        assert!(cursor.goto_next_sibling());
        assert_eq!(cursor.current_node(), pair);
        assert!(cursor.goto_first_child());
        assert_eq!(cursor.field_name(), Some("key"));
        assert!(cursor.goto_next_sibling());
        assert_eq!(cursor.field_name(), None);
        assert!(cursor.goto_next_sibling());
        assert_eq!(cursor.field_name(), Some("value"));
    }

    #[test]
    fn preorder_of_subtree_excludes_siblings() {
        let tree = parse_json("[[1], 2]");
        let inner = tree.root().named_child(0).named_child(0);

        let kinds: Vec<_> = inner.descendants().map(|n| n.kind()).collect();

        assert_eq!(kinds, ["array", "[", "number", "]"]);
    }

    #[test]
    fn preorder_of_leaf_yields_only_the_leaf() {
        let tree = parse_json("[1]");
        let number = tree.root().named_child(0).named_child(0);

        let nodes: Vec<_> = number.descendants().collect();

        assert_eq!(nodes, [number]);
    }
}
