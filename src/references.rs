//! Grounding sources and the references appendix.
//!
//! Sources are loaded from JSON files, supporting both standard JSON arrays and
//! JSONL (one JSON object per line). Each record is either a flat
//! `{"title", "uri"}` object or a grounding chunk `{"web": {"title", "uri"}}`.
//! Grounding chunks of other kinds (such as `retrieved_context`) are skipped;
//! any other record is an error.

use std::fs;
use std::path::Path;

use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;

/// Errors that can occur when loading sources.
#[derive(Error, Debug)]
pub enum SourcesError {
    #[error("Failed to read file: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Invalid JSON: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("Invalid JSONL at line {line}: {message}")]
    JsonlError { line: usize, message: String },

    #[error("Sources must be a JSON array")]
    NotAnArray,

    #[error("Invalid source at index {index}: {message}")]
    InvalidSource { index: usize, message: String },
}

/// A web page the article content was grounded on.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Source {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(alias = "url")]
    pub uri: String,
}

impl Source {
    pub fn new(title: &str, uri: &str) -> Self {
        Source {
            title: Some(title.to_string()),
            uri: uri.to_string(),
        }
    }
}

/// Grounding chunk kinds that carry no web page and are skipped.
const NON_WEB_CHUNK_KEYS: &[&str] = &["retrieved_context", "retrievedContext"];

/// Classifies one record: a flat source, a web chunk, or a skipped non-web chunk.
fn source_from_record(value: Value) -> Result<Option<Source>, String> {
    let Value::Object(mut record) = value else {
        return Err("expected a JSON object".to_string());
    };

    if record.contains_key("uri") || record.contains_key("url") {
        return serde_json::from_value(Value::Object(record))
            .map(Some)
            .map_err(|e| e.to_string());
    }

    if let Some(web) = record.remove("web") {
        if web.is_null() {
            return Ok(None);
        }
        return serde_json::from_value(web)
            .map(Some)
            .map_err(|e| format!("web: {}", e));
    }

    if NON_WEB_CHUNK_KEYS.iter().any(|key| record.contains_key(*key)) {
        return Ok(None);
    }

    Err("expected a \"uri\" (or \"url\") field or a \"web\" grounding chunk".to_string())
}

/// Settings for the appended references section.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ReferencesOptions {
    /// Markdown heading line placed above the list.
    pub header: String,
    /// Maximum number of sources listed.
    pub limit: usize,
}

impl Default for ReferencesOptions {
    fn default() -> Self {
        ReferencesOptions {
            header: "## References".to_string(),
            limit: 5,
        }
    }
}

/// Loads sources from a JSON array or JSONL file.
///
/// # Errors
///
/// Returns an error if the file cannot be read or contains invalid records.
pub fn load_sources(path: &Path) -> Result<Vec<Source>, SourcesError> {
    let content = fs::read_to_string(path)?;
    parse_sources(&content)
}

/// Parses sources from JSON array or JSONL text. Empty text yields no sources.
pub fn parse_sources(content: &str) -> Result<Vec<Source>, SourcesError> {
    let records = normalize_records(content)?;

    let mut sources = Vec::with_capacity(records.len());
    for (index, value) in records.into_iter().enumerate() {
        let source = source_from_record(value)
            .map_err(|message| SourcesError::InvalidSource { index, message })?;
        if let Some(source) = source {
            sources.push(source);
        }
    }

    Ok(sources)
}

fn normalize_records(content: &str) -> Result<Vec<Value>, SourcesError> {
    let trimmed = content.trim();

    if trimmed.is_empty() {
        return Ok(Vec::new());
    }

    if trimmed.starts_with('[') {
        return match serde_json::from_str::<Value>(trimmed)? {
            Value::Array(items) => Ok(items),
            _ => Err(SourcesError::NotAnArray),
        };
    }

    let mut records = Vec::new();
    for (line_num, line) in content.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        match serde_json::from_str::<Value>(line) {
            Ok(value) => records.push(value),
            Err(e) => {
                return Err(SourcesError::JsonlError {
                    line: line_num + 1,
                    message: e.to_string(),
                });
            }
        }
    }

    Ok(records)
}

/// Appends a references section listing `sources` as Markdown links.
///
/// At most `options.limit` sources are listed. With no sources the content is
/// returned unchanged.
///
/// # Examples
///
/// ```
/// use subtopic_render::{append_references, ReferencesOptions, Source};
///
/// let sources = [Source::new("Rust", "https://www.rust-lang.org")];
/// let result = append_references("Body.", &sources, &ReferencesOptions::default());
/// assert_eq!(result, "Body.\n\n## References\n- [Rust](https://www.rust-lang.org)\n");
/// ```
pub fn append_references(
    content: &str,
    sources: &[Source],
    options: &ReferencesOptions,
) -> String {
    let mut output = content.to_string();

    if sources.is_empty() || options.limit == 0 {
        return output;
    }

    output.push_str("\n\n");
    output.push_str(&options.header);
    output.push('\n');

    for source in sources.iter().take(options.limit) {
        let title = source.title.as_deref().unwrap_or(&source.uri);
        output.push_str(&format!(
            "- [{}]({})\n",
            escape_link_text(title),
            link_destination(&source.uri)
        ));
    }

    output
}

fn escape_link_text(text: &str) -> String {
    text.replace('\\', "\\\\")
        .replace('[', "\\[")
        .replace(']', "\\]")
}

/// Destinations with spaces or parentheses need the angle-bracket form.
fn link_destination(uri: &str) -> String {
    if uri.contains(|c: char| c.is_whitespace() || c == '(' || c == ')') {
        format!("<{}>", uri)
    } else {
        uri.to_string()
    }
}
