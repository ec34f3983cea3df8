//! Codec configuration.

use std::env;
use std::str::FromStr;

use crate::error::{HuffmanError, Result};

/// Environment variable overriding [`CodecConfig::progress_step`].
pub const ENV_PROGRESS_STEP: &str = "HUFFMAN_PROGRESS_STEP";
/// Environment variable overriding [`CodecConfig::strict_padding`].
pub const ENV_STRICT_PADDING: &str = "HUFFMAN_STRICT_PADDING";

/// Knobs shared by the encoder and decoder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodecConfig {
    /// Bytes processed between two progress callbacks.
    pub progress_step: usize,
    /// Reject packed streams whose padding bits are not all zero.
    pub strict_padding: bool,
}

impl Default for CodecConfig {
    fn default() -> Self {
        Self {
            progress_step: 64 * 1024,
            strict_padding: false,
        }
    }
}

impl CodecConfig {
    pub fn with_progress_step(mut self, step: usize) -> Self {
        self.progress_step = step;
        self
    }

    pub fn with_strict_padding(mut self, strict: bool) -> Self {
        self.strict_padding = strict;
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.progress_step == 0 {
            return Err(HuffmanError::config("progress_step must be at least 1"));
        }
        Ok(())
    }

    /// Defaults overridden by `HUFFMAN_PROGRESS_STEP` and
    /// `HUFFMAN_STRICT_PADDING` where set.
    pub fn from_env() -> Result<Self> {
        let defaults = Self::default();
        let config = Self {
            progress_step: parse_env_var(ENV_PROGRESS_STEP, defaults.progress_step)?,
            strict_padding: parse_env_bool(ENV_STRICT_PADDING, defaults.strict_padding)?,
        };
        config.validate()?;
        Ok(config)
    }
}

fn parse_env_var<T: FromStr>(name: &str, default: T) -> Result<T> {
    match env::var(name) {
        Ok(raw) => raw
            .trim()
            .parse()
            .map_err(|_| HuffmanError::config(format!("{name}={raw:?} is not a valid value"))),
        Err(_) => Ok(default),
    }
}

fn parse_env_bool(name: &str, default: bool) -> Result<bool> {
    match env::var(name) {
        Ok(raw) => match raw.trim().to_ascii_lowercase().as_str() {
            "1" | "true" | "yes" | "on" => Ok(true),
            "0" | "false" | "no" | "off" => Ok(false),
            _ => Err(HuffmanError::config(format!(
                "{name}={raw:?} is not a boolean"
            ))),
        },
        Err(_) => Ok(default),
    }
}
