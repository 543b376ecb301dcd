//! # Sylva: typed syntax trees over tree-sitter
//!
//! Sylva attaches ownership rules to the tree-sitter engine's parser, tree and
//! cursor handles, and exposes a small object model:
//!
//! - [`Grammar`]: immutable language description with symbol introspection
//! - [`Parser`]: one engine parser bound to one grammar for its lifetime
//! - [`Tree`]: exclusively owned parse result
//! - [`Node`]: copyable, non-owning view into a tree, possibly null
//! - [`Cursor`]: move-only depth-first walker with an explicit deep `copy()`
//!
//! ## Design Philosophy
//!
//! - **Ownership, not checks** - nodes and cursors borrow their tree, so using
//!   one after the tree is dropped does not compile
//! - **Null propagation** - absent parents, siblings, children and fields come
//!   back as the null node rather than as errors
//! - **Errors live in the tree** - malformed input still parses; see
//!   [`Tree::has_error`]
//!
//! ## Quick Start
//!
//! ```
//! use sylva::{Grammar, Parser};
//!
//! let grammar = Grammar::new(tree_sitter_json::LANGUAGE.into());
//! let mut parser = Parser::new(grammar)?;
//!
//! let source = "[1, null]";
//! let tree = parser.parse(source)?;
//! let array = tree.root().named_child(0);
//!
//! assert_eq!(array.kind(), "array");
//! assert_eq!(array.named_child_count(), 2);
//! assert_eq!(array.named_child(0).source_slice(source), Some("1"));
//! assert_eq!(
//!     tree.root().string_expression(),
//!     "(document (array (number) (null)))"
//! );
//!
//! // Depth-first walk with a cursor.
//! let kinds: Vec<_> = tree.preorder().map(|node| node.kind()).collect();
//! assert_eq!(kinds[..2], ["document", "array"]);
//! # Ok::<(), sylva::Error>(())
//! ```

mod config;
mod cursor;
mod error;
mod grammar;
mod node;
mod parser;
mod tree;
mod types;

pub use config::{ENGINE_MAX_SOURCE_BYTES, EngineLog, ParserConfig};
pub use cursor::{Cursor, Preorder};
pub use error::{Error, Result};
pub use grammar::Grammar;
pub use node::{Children, Node};
pub use parser::Parser;
pub use tree::Tree;
pub use types::{Extent, NodeId, Point, Symbol};
