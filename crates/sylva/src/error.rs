//! Error types for sylva operations.
//!
//! Only grammar lookups and construction-time failures are reportable.
//! Structural queries on [`Node`](crate::Node) and [`Cursor`](crate::Cursor)
//! never fail: absent parents, siblings, children and fields come back as the
//! null node instead.
//!
//! ## Error Categorization
//!
//! - Lookup problems: [`Error::InvalidSymbol`], [`Error::InvalidField`]
//! - Binding problems: [`Error::IncompatibleVersion`], [`Error::Language`]
//! - Parse construction problems: [`Error::SourceTooLarge`], [`Error::ParseFailed`]
//! - Setup problems: [`Error::Config`]

use thiserror::Error;

/// Result type for sylva operations.
pub type Result<T> = std::result::Result<T, Error>;

/// The error type for sylva operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// A symbol id that the grammar does not define.
    #[error("invalid symbol {symbol}: grammar defines {count} symbols")]
    InvalidSymbol {
        /// The rejected symbol id.
        symbol: u16,
        /// Number of symbols the grammar defines.
        count: usize,
    },

    /// A field id that the grammar does not define.
    #[error("invalid field {field}: grammar defines {count} fields")]
    InvalidField {
        /// The rejected field id.
        field: u16,
        /// Number of fields the grammar defines.
        count: usize,
    },

    /// The grammar was generated for an ABI the linked engine cannot load.
    #[error("incompatible grammar version {version}: engine supports {min}..={max}")]
    IncompatibleVersion {
        /// ABI version reported by the grammar.
        version: usize,
        /// Oldest ABI version the engine accepts.
        min: usize,
        /// Newest ABI version the engine accepts.
        max: usize,
    },

    /// The engine refused to bind the grammar.
    #[error("language error: {0}")]
    Language(String),

    /// The source buffer is larger than the parser accepts.
    #[error("source is {len} bytes, parser accepts at most {limit}")]
    SourceTooLarge {
        /// Length of the rejected buffer in bytes.
        len: usize,
        /// Configured byte limit.
        limit: usize,
    },

    /// The engine did not produce a tree.
    #[error("engine produced no tree for {len} bytes of source")]
    ParseFailed {
        /// Length of the source buffer in bytes.
        len: usize,
    },

    /// Invalid parser configuration.
    #[error("configuration error: {0}")]
    Config(String),
}

impl Error {
    /// Returns `true` for failed grammar lookups.
    ///
    /// Lookup errors are local and recoverable; the grammar stays usable.
    #[must_use]
    pub fn is_lookup_error(&self) -> bool {
        matches!(self, Self::InvalidSymbol { .. } | Self::InvalidField { .. })
    }
}
