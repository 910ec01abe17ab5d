//! Engine configuration

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Largest input the engine can accept: its parser takes a signed 32-bit length.
pub const MAX_INPUT_LEN: usize = i32::MAX as usize;

/// Process-wide engine settings, applied once at initialization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Inputs longer than this fail with [`Error::Size`] before parsing.
    /// Never allowed to exceed [`MAX_INPUT_LEN`].
    pub max_input_len: usize,

    /// Register the EXSLT extension functions (str:, set:, date:, ...)
    pub register_exslt: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            max_input_len: MAX_INPUT_LEN,
            register_exslt: true,
        }
    }
}

impl EngineConfig {
    /// Load a configuration from JSON; missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: EngineConfig = serde_json::from_str(json)?;
        Ok(config.clamped())
    }

    /// Set the input length limit, clamped to [`MAX_INPUT_LEN`]
    pub fn with_max_input_len(mut self, limit: usize) -> Self {
        self.max_input_len = limit;
        self.clamped()
    }

    pub fn with_exslt(mut self, register: bool) -> Self {
        self.register_exslt = register;
        self
    }

    /// The effective input limit
    pub fn input_limit(&self) -> usize {
        self.max_input_len.min(MAX_INPUT_LEN)
    }

    /// Check an input length against the limit and narrow it to the
    /// engine's 32-bit length type.
    pub fn check_input_len(&self, len: usize) -> Result<i32> {
        check_input_len(len, self.input_limit())
    }

    fn clamped(mut self) -> Self {
        self.max_input_len = self.input_limit();
        self
    }
}

/// Reject `len` if it exceeds `limit` (or can't be represented as `i32`).
pub fn check_input_len(len: usize, limit: usize) -> Result<i32> {
    let limit = limit.min(MAX_INPUT_LEN);
    if len > limit {
        return Err(Error::Size { len, limit });
    }
    i32::try_from(len).map_err(|_| Error::Size { len, limit })
}
