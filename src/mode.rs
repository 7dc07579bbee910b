//! Display mode selection.
//!
//! The renderer shows exactly one of three views, chosen from the current
//! content and loading flag on every call. Nothing is remembered between calls.

/// Headings that mark a trailing bibliography block. Matched case-sensitively.
const SOURCES_MARKERS: &[&str] = &["## Sources", "### Sources", "## References", "### References"];

/// The inputs for one render: the Markdown body and whether more may arrive.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContentInput {
    pub content: Option<String>,
    pub is_loading: bool,
}

impl ContentInput {
    pub fn new(content: Option<&str>, is_loading: bool) -> Self {
        ContentInput {
            content: content.map(str::to_string),
            is_loading,
        }
    }

    /// Returns the content if it is present and non-empty.
    pub fn present_content(&self) -> Option<&str> {
        self.content.as_deref().filter(|c| !c.is_empty())
    }

    pub fn display_mode(&self) -> DisplayMode {
        DisplayMode::select(self.content.as_deref(), self.is_loading)
    }
}

/// The three mutually exclusive views.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DisplayMode {
    /// No content and nothing pending: a fixed placeholder.
    Empty,
    /// Content is pending but none has arrived: placeholder blocks.
    LoadingSkeleton,
    /// Content is present, whether or not more is still arriving.
    Rendered,
}

impl DisplayMode {
    /// Selects the view for `content` and `is_loading`.
    ///
    /// An empty string counts as absent content. Whitespace-only content is
    /// present.
    ///
    /// # Examples
    ///
    /// ```
    /// use subtopic_render::DisplayMode;
    ///
    /// assert_eq!(DisplayMode::select(None, false), DisplayMode::Empty);
    /// assert_eq!(DisplayMode::select(Some(""), true), DisplayMode::LoadingSkeleton);
    /// assert_eq!(DisplayMode::select(Some("x"), true), DisplayMode::Rendered);
    /// ```
    pub fn select(content: Option<&str>, is_loading: bool) -> Self {
        let has_content = content.is_some_and(|c| !c.is_empty());
        match (has_content, is_loading) {
            (true, _) => DisplayMode::Rendered,
            (false, true) => DisplayMode::LoadingSkeleton,
            (false, false) => DisplayMode::Empty,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            DisplayMode::Empty => "empty",
            DisplayMode::LoadingSkeleton => "loading-skeleton",
            DisplayMode::Rendered => "rendered",
        }
    }
}

/// Checks whether the raw Markdown contains a Sources or References heading.
pub fn has_sources_section(content: &str) -> bool {
    SOURCES_MARKERS.iter().any(|marker| content.contains(marker))
}
