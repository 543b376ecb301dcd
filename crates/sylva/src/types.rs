//! Value types shared by the tree model.
//!
//! These are plain data with no ownership implications:
//! - **Identifiers**: `Symbol` (grammar category), `NodeId` (node identity)
//! - **Spans**: `Point` (row/column), `Extent<T>` (start/end pair)

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::Range;

// ============================================================================
// Strongly-typed ID wrappers
// ============================================================================

/// A grammar symbol: the integer id of a syntactic category such as
/// `number` or `array`.
///
/// Symbols are only meaningful relative to the [`Grammar`](crate::Grammar)
/// that defines them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Symbol(u16);

impl Symbol {
    /// Symbol the engine assigns to error nodes.
    pub const ERROR: Self = Self(u16::MAX);

    /// Extract the raw u16 value.
    #[must_use]
    pub fn as_u16(self) -> u16 {
        self.0
    }
}

impl From<u16> for Symbol {
    fn from(id: u16) -> Self {
        Self(id)
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Opaque identity of a node within one tree.
///
/// Stable for as long as the owning [`Tree`](crate::Tree) lives, so it can key
/// per-node memo tables during a traversal. Ids from different trees must not
/// be compared.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeId(usize);

impl NodeId {
    /// Identity of the null node.
    pub const NULL: Self = Self(0);

    pub(crate) fn new(raw: usize) -> Self {
        Self(raw)
    }

    /// Returns `true` for the null node's identity.
    #[must_use]
    pub fn is_null(self) -> bool {
        self == Self::NULL
    }
}

// ============================================================================
// Spans
// ============================================================================

/// A zero-based row/column position. Columns count bytes, not characters.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct Point {
    /// Zero-based line number.
    pub row: usize,
    /// Zero-based byte offset within the line.
    pub column: usize,
}

impl Point {
    /// Create a new point.
    #[must_use]
    pub fn new(row: usize, column: usize) -> Self {
        Self { row, column }
    }
}

impl From<tree_sitter::Point> for Point {
    fn from(point: tree_sitter::Point) -> Self {
        Self::new(point.row, point.column)
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.row, self.column)
    }
}

/// A start/end pair describing a node's span.
///
/// `start` is inclusive and `end` is exclusive, for byte offsets and for
/// [`Point`]s alike. `start <= end` holds for every extent the tree produces.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct Extent<T> {
    /// Inclusive start.
    pub start: T,
    /// Exclusive end.
    pub end: T,
}

impl<T> Extent<T> {
    /// Create a new extent.
    #[must_use]
    pub fn new(start: T, end: T) -> Self {
        Self { start, end }
    }
}

impl Extent<usize> {
    /// Number of bytes covered.
    #[must_use]
    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    /// Returns `true` if the extent covers no bytes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns `true` if `offset` lies in `[start, end)`.
    #[must_use]
    pub fn contains(&self, offset: usize) -> bool {
        (self.start..self.end).contains(&offset)
    }

    /// The extent as a slicing range.
    #[must_use]
    pub fn as_range(&self) -> Range<usize> {
        self.start..self.end
    }
}

impl From<Range<usize>> for Extent<usize> {
    fn from(range: Range<usize>) -> Self {
        Self::new(range.start, range.end)
    }
}
