//! Style class names shared with the article stylesheet.

pub const WEB_CONTENT_EMPTY: &str = "web-content-empty";
pub const EMPTY_ICON: &str = "empty-icon";
pub const WEB_CONTENT: &str = "web-content";
pub const WEB_ARTICLE: &str = "web-article";
pub const HAS_SOURCES: &str = "has-sources";

pub const LOADING_SKELETON: &str = "loading-skeleton";
pub const SKELETON_LINE: &str = "skeleton-line";
pub const SKELETON_TITLE: &str = "title";
pub const SKELETON_SHORT: &str = "short";

pub const MD_H1: &str = "md-h1";
pub const MD_H2: &str = "md-h2";
pub const MD_H3: &str = "md-h3";
pub const MD_H4: &str = "md-h4";
pub const SOURCES_HEADER: &str = "sources-header";
pub const MD_PARAGRAPH: &str = "md-paragraph";
pub const MD_LIST: &str = "md-list";
pub const ORDERED: &str = "ordered";
pub const MD_LIST_ITEM: &str = "md-list-item";
pub const MD_BOLD: &str = "md-bold";
pub const MD_ITALIC: &str = "md-italic";
pub const MD_QUOTE: &str = "md-quote";
pub const MD_INLINE_CODE: &str = "md-inline-code";
pub const MD_CODE_BLOCK: &str = "md-code-block";
pub const MD_LINK: &str = "md-link";

pub const STREAMING_INDICATOR: &str = "streaming-indicator";
pub const DOT: &str = "dot";

/// Applied to the `<cite>` element wrapping an inline citation marker.
pub const CITATION: &str = "citation";

/// Every class name emitted by the renderer, in stylesheet order.
pub const ALL: &[&str] = &[
    WEB_CONTENT_EMPTY,
    EMPTY_ICON,
    WEB_CONTENT,
    WEB_ARTICLE,
    HAS_SOURCES,
    LOADING_SKELETON,
    SKELETON_LINE,
    SKELETON_TITLE,
    SKELETON_SHORT,
    MD_H1,
    MD_H2,
    MD_H3,
    MD_H4,
    SOURCES_HEADER,
    MD_PARAGRAPH,
    MD_LIST,
    ORDERED,
    MD_LIST_ITEM,
    MD_BOLD,
    MD_ITALIC,
    MD_QUOTE,
    MD_INLINE_CODE,
    MD_CODE_BLOCK,
    MD_LINK,
    STREAMING_INDICATOR,
    DOT,
    CITATION,
];

/// Returns the heading class for levels 1 to 4, the levels the stylesheet covers.
pub fn heading(level: u8) -> Option<&'static str> {
    match level {
        1 => Some(MD_H1),
        2 => Some(MD_H2),
        3 => Some(MD_H3),
        4 => Some(MD_H4),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_all_names_unique() {
        let unique: HashSet<_> = ALL.iter().collect();
        assert_eq!(unique.len(), ALL.len());
    }

    #[test]
    fn test_heading_levels() {
        assert_eq!(heading(1), Some("md-h1"));
        assert_eq!(heading(4), Some("md-h4"));
        assert_eq!(heading(5), None);
        assert_eq!(heading(0), None);
    }
}
