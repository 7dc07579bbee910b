//! Render options.
//!
//! Options can be built in code or loaded from a TOML file:
//!
//! ```toml
//! gfm = true
//! paragraphs = "escaped"
//!
//! [references]
//! header = "## Sources"
//! limit = 3
//! ```

use std::fs;
use std::path::Path;

use serde::Deserialize;
use thiserror::Error;

use crate::markdown::Extensions;
use crate::references::ReferencesOptions;

/// Errors that can occur when loading options.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read file: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Invalid TOML: {0}")]
    TomlError(#[from] toml::de::Error),
}

/// How paragraph text reaches the output.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParagraphMode {
    /// Citation markup is injected verbatim along with the rest of the
    /// paragraph text. Only for content from a trusted source.
    #[default]
    Trusted,
    /// Text around citation markers is HTML-escaped.
    Escaped,
}

/// Options controlling how Markdown is rendered.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RenderOptions {
    /// Enable tables, strikethrough and task lists.
    pub gfm: bool,
    pub paragraphs: ParagraphMode,
    pub references: ReferencesOptions,
}

impl RenderOptions {
    /// Parses options from a TOML document. Missing keys keep their defaults.
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    pub fn extensions(&self) -> Extensions {
        Extensions { gfm: self.gfm }
    }
}

/// Loads render options from a TOML file.
///
/// # Errors
///
/// Returns an error if the file cannot be read or is not valid options TOML.
pub fn load_options(path: &Path) -> Result<RenderOptions, ConfigError> {
    let content = fs::read_to_string(path)?;
    RenderOptions::from_toml_str(&content)
}
