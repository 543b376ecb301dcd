//! Parsing source text into trees.
//!
//! A [`Parser`] owns one engine parser, permanently bound to one
//! [`Grammar`]. Binding to a different grammar means building a new parser.
//!
//! ## Design
//!
//! Parsing is synchronous and always starts from scratch; there is no edit or
//! incremental reparse entry point. Malformed input still produces a tree:
//! syntax errors are recorded as error and missing nodes inside it and
//! surfaced through [`Tree::has_error`]. Only construction problems are
//! reported as errors.

use tracing::{debug, trace};

use crate::config::{EngineLog, ParserConfig};
use crate::error::{Error, Result};
use crate::grammar::Grammar;
use crate::tree::Tree;

/// Parses source buffers with a single grammar.
///
/// # Examples
///
/// ```
/// use sylva::{Grammar, Parser};
///
/// let mut parser = Parser::new(Grammar::new(tree_sitter_json::LANGUAGE.into()))?;
/// let tree = parser.parse("[1, null]")?;
///
/// assert_eq!(tree.root().kind(), "document");
/// assert!(!tree.has_error());
/// # Ok::<(), sylva::Error>(())
/// ```
pub struct Parser {
    inner: tree_sitter::Parser,
    grammar: Grammar,
    config: ParserConfig,
}

impl Parser {
    /// Create a parser for `grammar` with the default configuration.
    ///
    /// # Errors
    ///
    /// Returns [`Error::IncompatibleVersion`] if the grammar's ABI version is
    /// outside what the linked engine supports, or [`Error::Language`] if the
    /// engine refuses the grammar for another reason.
    pub fn new(grammar: Grammar) -> Result<Self> {
        Self::with_config(grammar, ParserConfig::default())
    }

    /// Create a parser for `grammar` with an explicit configuration.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] for an invalid configuration, plus the
    /// binding errors documented on [`Parser::new`].
    pub fn with_config(grammar: Grammar, config: ParserConfig) -> Result<Self> {
        config.validate()?;

        if !grammar.is_compatible() {
            return Err(Error::IncompatibleVersion {
                version: grammar.version(),
                min: tree_sitter::MIN_COMPATIBLE_LANGUAGE_VERSION,
                max: tree_sitter::LANGUAGE_VERSION,
            });
        }

        let mut inner = tree_sitter::Parser::new();
        inner
            .set_language(grammar.as_raw())
            .map_err(|e| Error::Language(e.to_string()))?;

        if config.engine_log != EngineLog::Off {
            inner.set_logger(Some(engine_logger(config.engine_log)));
        }

        debug!(
            version = grammar.version(),
            symbols = grammar.symbol_count(),
            max_source_bytes = config.max_source_bytes,
            engine_log = ?config.engine_log,
            "Bound parser to grammar"
        );

        Ok(Self {
            inner,
            grammar,
            config,
        })
    }

    /// Parse `source` from scratch.
    ///
    /// The buffer is taken with its explicit length; it does not need a
    /// terminator and may contain NUL bytes. The returned tree does not borrow
    /// the parser or the buffer.
    ///
    /// # Errors
    ///
    /// Returns [`Error::SourceTooLarge`] if the buffer exceeds the configured
    /// limit, or [`Error::ParseFailed`] if the engine produced no tree.
    pub fn parse(&mut self, source: impl AsRef<[u8]>) -> Result<Tree> {
        let source = source.as_ref();
        let len = source.len();

        if len > self.config.max_source_bytes {
            return Err(Error::SourceTooLarge {
                len,
                limit: self.config.max_source_bytes,
            });
        }

        let raw = self
            .inner
            .parse(source, None)
            .ok_or(Error::ParseFailed { len })?;
        let tree = Tree::new(raw, self.grammar.clone(), len);

        debug!(bytes = len, has_error = tree.has_error(), "Parsed source");
        Ok(tree)
    }

    /// The grammar this parser is bound to.
    #[must_use]
    pub fn grammar(&self) -> &Grammar {
        &self.grammar
    }

    /// The configuration this parser was built with.
    #[must_use]
    pub fn config(&self) -> &ParserConfig {
        &self.config
    }
}

impl std::fmt::Debug for Parser {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Parser")
            .field("grammar", &self.grammar)
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

/// Build the engine log callback for the selected streams.
fn engine_logger(streams: EngineLog) -> Box<dyn FnMut(tree_sitter::LogType, &str)> {
    Box::new(move |log_type: tree_sitter::LogType, message: &str| match log_type {
        tree_sitter::LogType::Parse if streams.includes_parse() => {
            trace!(target: "sylva::engine", stream = "parse", "{message}");
        }
        tree_sitter::LogType::Lex if streams.includes_lex() => {
            trace!(target: "sylva::engine", stream = "lex", "{message}");
        }
        _ => {}
    })
}
