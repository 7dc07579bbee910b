//! subtopic-render: render subtopic articles from Markdown to styled HTML.
//!
//! This library provides functionality to:
//! - Wrap inline numeric citations like `[1]` in styled markers
//! - Select the display mode (empty, loading skeleton, rendered) for an article
//! - Render Markdown to HTML with per-element style classes
//! - Append a references section built from grounding sources

pub mod citations;
pub mod classes;
pub mod config;
pub mod html;
pub mod markdown;
pub mod mode;
pub mod references;
pub mod render;

pub use citations::{
    extract_citations, format_citations, format_citations_escaped, format_optional_citations,
    Citation,
};
pub use config::{load_options, ParagraphMode, RenderOptions};
pub use mode::{has_sources_section, ContentInput, DisplayMode};
pub use references::{append_references, load_sources, parse_sources, ReferencesOptions, Source};
pub use render::{render, render_body, render_markdown, DisplayOutput};
