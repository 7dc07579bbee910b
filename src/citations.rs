//! Inline citation markers.
//!
//! Finds numeric citations in the format `[1]`, `[23]` in plain text and wraps
//! each one in a `<cite class="citation">` element.

use std::borrow::Cow;

use once_cell::sync::Lazy;
use regex::{Captures, Regex};

use crate::classes;
use crate::html::escape_html;

/// `[`, one or more ASCII digits, `]`. `\d` would also accept non-ASCII digits.
static CITATION_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\[([0-9]+)\]").expect("citation pattern is valid"));

/// Represents a numeric citation found in plain text.
#[derive(Debug, Clone, PartialEq)]
pub struct Citation {
    /// The digits between the brackets, verbatim (e.g., "1" or "007")
    pub number: String,
    /// Start and end byte positions of the bracketed marker in the original text
    pub span: (usize, usize),
}

/// Extracts all numeric citations from the given text, in order of appearance.
///
/// # Examples
///
/// ```
/// use subtopic_render::extract_citations;
///
/// let citations = extract_citations("Shown in [1] and [12].");
/// assert_eq!(citations.len(), 2);
/// assert_eq!(citations[1].number, "12");
/// ```
pub fn extract_citations(text: &str) -> Vec<Citation> {
    CITATION_RE
        .captures_iter(text)
        .filter_map(|cap| {
            let full_match = cap.get(0)?;
            let number = cap.get(1)?.as_str().to_string();
            Some(Citation {
                number,
                span: (full_match.start(), full_match.end()),
            })
        })
        .collect()
}

/// Wraps every numeric citation marker in a citation-styled `<cite>` element.
///
/// All other characters pass through unchanged. The text is treated as a raw
/// string with no knowledge of markup, so it must be the flattened plain text of
/// a paragraph and never an already marked-up fragment.
///
/// Returns the input borrowed when it contains no citations.
///
/// # Examples
///
/// ```
/// use subtopic_render::format_citations;
///
/// assert_eq!(
///     format_citations("Proven [1]."),
///     r#"Proven <cite class="citation">[1]</cite>."#
/// );
/// assert_eq!(format_citations("No markers here"), "No markers here");
/// ```
pub fn format_citations(text: &str) -> Cow<'_, str> {
    CITATION_RE.replace_all(text, |cap: &Captures<'_>| cite_marker(&cap[0]))
}

/// Formats optional text, mapping absent input to an empty result.
pub fn format_optional_citations(text: Option<&str>) -> String {
    text.map(|t| format_citations(t).into_owned())
        .unwrap_or_default()
}

/// Like [`format_citations`], but HTML-escapes the text around each marker.
///
/// The result is safe to embed as markup even when the text came from an
/// untrusted source.
pub fn format_citations_escaped(text: &str) -> String {
    let mut result = String::with_capacity(text.len());
    let mut last_end = 0;

    for citation in extract_citations(text) {
        let (start, end) = citation.span;
        result.push_str(&escape_html(&text[last_end..start]));
        result.push_str(&cite_marker(&text[start..end]));
        last_end = end;
    }
    result.push_str(&escape_html(&text[last_end..]));

    result
}

fn cite_marker(bracketed: &str) -> String {
    format!(r#"<cite class="{}">{}</cite>"#, classes::CITATION, bracketed)
}
