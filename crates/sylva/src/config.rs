//! Parser configuration.
//!
//! [`ParserConfig`] is plain serde data so a host application can embed it in
//! its own configuration file. Every field has a default, so an empty table
//! deserializes to [`ParserConfig::default`].

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Largest buffer the engine can address: its byte offsets are `u32`.
pub const ENGINE_MAX_SOURCE_BYTES: usize = u32::MAX as usize;

/// Which of the engine's internal log streams to forward into `tracing`.
///
/// Forwarded lines are emitted at `trace` level under the `sylva::engine`
/// target.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EngineLog {
    /// Forward nothing.
    #[default]
    Off,
    /// Parser actions (shift, reduce, recover).
    Parse,
    /// Lexer actions.
    Lex,
    /// Both streams.
    All,
}

impl EngineLog {
    /// Returns `true` if parser actions are forwarded.
    #[must_use]
    pub fn includes_parse(self) -> bool {
        matches!(self, Self::Parse | Self::All)
    }

    /// Returns `true` if lexer actions are forwarded.
    #[must_use]
    pub fn includes_lex(self) -> bool {
        matches!(self, Self::Lex | Self::All)
    }
}

/// Settings applied to a [`Parser`](crate::Parser) for its whole lifetime.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParserConfig {
    /// Largest source buffer accepted by `parse`, in bytes.
    pub max_source_bytes: usize,
    /// Engine log streams forwarded into `tracing`.
    pub engine_log: EngineLog,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            max_source_bytes: ENGINE_MAX_SOURCE_BYTES,
            engine_log: EngineLog::Off,
        }
    }
}

impl ParserConfig {
    /// Set the source size limit.
    #[must_use]
    pub fn with_max_source_bytes(mut self, max_source_bytes: usize) -> Self {
        self.max_source_bytes = max_source_bytes;
        self
    }

    /// Set which engine log streams are forwarded.
    #[must_use]
    pub fn with_engine_log(mut self, engine_log: EngineLog) -> Self {
        self.engine_log = engine_log;
        self
    }

    /// Check the configuration against the engine's limits.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] if `max_source_bytes` is zero or exceeds
    /// [`ENGINE_MAX_SOURCE_BYTES`].
    pub fn validate(&self) -> Result<()> {
        if self.max_source_bytes == 0 {
            return Err(Error::Config(
                "max_source_bytes must be greater than zero".to_string(),
            ));
        }
        if self.max_source_bytes > ENGINE_MAX_SOURCE_BYTES {
            return Err(Error::Config(format!(
                "max_source_bytes {} exceeds engine limit {ENGINE_MAX_SOURCE_BYTES}",
                self.max_source_bytes
            )));
        }
        Ok(())
    }
}
