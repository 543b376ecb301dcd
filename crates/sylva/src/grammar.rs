//! Grammar handles and symbol introspection.
//!
//! A [`Grammar`] is an immutable, engine-owned description of one language:
//! its symbol table, its field names and the ABI version it was generated
//! against. Grammar crates (`tree-sitter-json`, `tree-sitter-rust`, ...) hand
//! out these values; this layer never creates or destroys the underlying
//! language tables.

use std::fmt;

use tracing::trace;

use crate::error::{Error, Result};
use crate::types::Symbol;

/// An immutable language description used to configure a
/// [`Parser`](crate::Parser).
///
/// Cloning is cheap and clones compare equal. Many parsers and trees may
/// reference the same grammar.
///
/// # Examples
///
/// ```
/// use sylva::Grammar;
///
/// let grammar = Grammar::new(tree_sitter_json::LANGUAGE.into());
/// let array = grammar.symbol_for_name("array", true).expect("json has arrays");
/// assert_eq!(grammar.symbol_name(array)?, "array");
/// assert!(grammar.is_compatible());
/// # Ok::<(), sylva::Error>(())
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct Grammar {
    language: tree_sitter::Language,
}

impl Grammar {
    /// Wrap an engine language handle.
    #[must_use]
    pub fn new(language: tree_sitter::Language) -> Self {
        Self { language }
    }

    /// Number of symbols, including anonymous tokens and aliases.
    #[must_use]
    pub fn symbol_count(&self) -> usize {
        self.language.node_kind_count()
    }

    /// Human-readable name of `symbol`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidSymbol`] if the grammar does not define `symbol`.
    pub fn symbol_name(&self, symbol: Symbol) -> Result<&'static str> {
        self.language
            .node_kind_for_id(symbol.as_u16())
            .ok_or_else(|| {
                trace!(symbol = symbol.as_u16(), "symbol lookup missed");
                Error::InvalidSymbol {
                    symbol: symbol.as_u16(),
                    count: self.symbol_count(),
                }
            })
    }

    /// Look up the symbol called `name`.
    ///
    /// `is_named` selects between a named rule and an anonymous token with the
    /// same text (for example a `null` rule versus the `"null"` keyword).
    /// Returns `None` when nothing matches.
    #[must_use]
    pub fn symbol_for_name(&self, name: &str, is_named: bool) -> Option<Symbol> {
        // The engine reserves id 0 as its not-found answer.
        match self.language.id_for_node_kind(name, is_named) {
            0 => {
                trace!(name, is_named, "symbol name lookup missed");
                None
            }
            id => Some(Symbol::from(id)),
        }
    }

    /// Returns `true` if `symbol` is a named rule rather than an anonymous token.
    #[must_use]
    pub fn is_named_symbol(&self, symbol: Symbol) -> bool {
        self.language.node_kind_is_named(symbol.as_u16())
    }

    /// Returns `true` if nodes of `symbol` appear in trees (hidden rules do not).
    #[must_use]
    pub fn is_visible_symbol(&self, symbol: Symbol) -> bool {
        self.language.node_kind_is_visible(symbol.as_u16())
    }

    /// Number of distinct field names.
    #[must_use]
    pub fn field_count(&self) -> usize {
        self.language.field_count()
    }

    /// Name of the field with id `field`. Field ids start at 1.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidField`] if the grammar does not define `field`.
    pub fn field_name(&self, field: u16) -> Result<&'static str> {
        self.language.field_name_for_id(field).ok_or_else(|| {
            trace!(field, "field lookup missed");
            Error::InvalidField {
                field,
                count: self.field_count(),
            }
        })
    }

    /// Look up the id of the field called `name`.
    #[must_use]
    pub fn field_for_name(&self, name: &str) -> Option<u16> {
        self.language.field_id_for_name(name).map(u16::from)
    }

    /// ABI version the grammar was generated against.
    #[must_use]
    pub fn version(&self) -> usize {
        self.language.version()
    }

    /// Returns `true` if the linked engine can load this grammar.
    ///
    /// Callers should reject incompatible grammars up front;
    /// [`Parser::new`](crate::Parser::new) does so.
    #[must_use]
    pub fn is_compatible(&self) -> bool {
        (tree_sitter::MIN_COMPATIBLE_LANGUAGE_VERSION..=tree_sitter::LANGUAGE_VERSION)
            .contains(&self.version())
    }

    /// The engine language handle, for interop with other tree-sitter tooling.
    #[must_use]
    pub fn as_raw(&self) -> &tree_sitter::Language {
        &self.language
    }
}

impl From<tree_sitter::Language> for Grammar {
    fn from(language: tree_sitter::Language) -> Self {
        Self::new(language)
    }
}

impl fmt::Debug for Grammar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Grammar")
            .field("version", &self.version())
            .field("symbols", &self.symbol_count())
            .field("fields", &self.field_count())
            .finish()
    }
}
