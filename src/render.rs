//! Article rendering.
//!
//! [`render`] picks a [`DisplayMode`] for the input and produces the matching
//! view. Rendered content goes through the Markdown parser, and each element is
//! written by the function registered for its tag in [`OVERRIDES`], falling back
//! to plain HTML for tags without one.

use tracing::debug;

use crate::citations::{format_citations, format_citations_escaped};
use crate::classes;
use crate::config::{ParagraphMode, RenderOptions};
use crate::html::{escape_html, safe_url, ClassList, TrustedHtml};
use crate::markdown::{self, Element, Node, NodeKind, NodeTag};
use crate::mode::{has_sources_section, ContentInput, DisplayMode};

const EMPTY_ICON: &str = "📚";
const EMPTY_HEADING: &str = "No Web Content Available";
const EMPTY_MESSAGE: &str = "Content is being generated or not available for this subtopic.";

/// Modifier classes of the skeleton placeholder lines, top to bottom.
const SKELETON_LINES: &[Option<&str>] = &[
    Some(classes::SKELETON_TITLE),
    None,
    None,
    Some(classes::SKELETON_SHORT),
    None,
    None,
];

const STREAMING_DOTS: usize = 3;

/// The result of rendering one [`ContentInput`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayOutput {
    pub mode: DisplayMode,
    /// Whether the content contains a Sources or References heading.
    pub has_sources: bool,
    pub html: String,
}

/// Renders the view for `input`.
///
/// The output depends only on the arguments, so calling this again with the
/// same input (for example on every streamed chunk) gives the same markup.
pub fn render(input: &ContentInput, options: &RenderOptions) -> DisplayOutput {
    let mode = input.display_mode();
    let content = input.present_content().unwrap_or_default();
    let has_sources = mode == DisplayMode::Rendered && has_sources_section(content);

    debug!(
        mode = mode.as_str(),
        has_sources,
        is_loading = input.is_loading,
        "selected display mode"
    );

    let html = match mode {
        DisplayMode::Empty => empty_view(),
        DisplayMode::LoadingSkeleton => skeleton_view(),
        DisplayMode::Rendered => article_view(content, has_sources, input.is_loading, options),
    };

    DisplayOutput {
        mode,
        has_sources,
        html,
    }
}

/// Renders `content` with the default options.
///
/// # Examples
///
/// ```
/// use subtopic_render::{render_markdown, DisplayMode};
///
/// let output = render_markdown("Water boils at 100 °C [1].", false);
/// assert_eq!(output.mode, DisplayMode::Rendered);
/// assert!(output.html.contains(r#"<cite class="citation">[1]</cite>"#));
/// ```
pub fn render_markdown(content: &str, is_loading: bool) -> DisplayOutput {
    render(
        &ContentInput::new(Some(content), is_loading),
        &RenderOptions::default(),
    )
}

/// Renders Markdown to styled markup without the article container.
pub fn render_body(content: &str, options: &RenderOptions) -> String {
    let nodes = markdown::parse(content, options.extensions());
    let mut out = String::with_capacity(content.len() * 2);
    Renderer { options }.render_nodes(&nodes, &mut out);
    out
}

fn empty_view() -> String {
    format!(
        r#"<div class="{}"><div class="{}">{}</div><h3>{}</h3><p>{}</p></div>"#,
        classes::WEB_CONTENT_EMPTY,
        classes::EMPTY_ICON,
        EMPTY_ICON,
        EMPTY_HEADING,
        EMPTY_MESSAGE
    )
}

fn skeleton_view() -> String {
    let lines: String = SKELETON_LINES
        .iter()
        .copied()
        .map(|modifier| {
            let class = match modifier {
                Some(modifier) => ClassList::new(classes::SKELETON_LINE).with(modifier),
                None => ClassList::new(classes::SKELETON_LINE),
            };
            format!(r#"<div class="{}"></div>"#, class)
        })
        .collect();

    format!(
        r#"<div class="{}"><article class="{}"><div class="{}">{}</div></article></div>"#,
        classes::WEB_CONTENT,
        classes::WEB_ARTICLE,
        classes::LOADING_SKELETON,
        lines
    )
}

fn article_view(
    content: &str,
    has_sources: bool,
    is_loading: bool,
    options: &RenderOptions,
) -> String {
    let article_class =
        ClassList::new(classes::WEB_ARTICLE).with_if(classes::HAS_SOURCES, has_sources);

    let mut out = format!(
        r#"<div class="{}"><article class="{}">"#,
        classes::WEB_CONTENT,
        article_class
    );
    out.push_str(&render_body(content, options));
    if is_loading {
        out.push_str(&streaming_indicator());
    }
    out.push_str("</article></div>");
    out
}

fn streaming_indicator() -> String {
    let dot = format!(r#"<span class="{}"></span>"#, classes::DOT);
    format!(
        r#"<div class="{}">{}</div>"#,
        classes::STREAMING_INDICATOR,
        dot.repeat(STREAMING_DOTS)
    )
}

struct Renderer<'a> {
    options: &'a RenderOptions,
}

type RenderFn = fn(&Renderer<'_>, &Element, &mut String);

/// Styled renderers keyed by element tag.
const OVERRIDES: &[(NodeTag, RenderFn)] = &[
    (NodeTag::H1, render_heading),
    (NodeTag::H2, render_heading),
    (NodeTag::H3, render_heading),
    (NodeTag::H4, render_heading),
    (NodeTag::Paragraph, render_paragraph),
    (NodeTag::UnorderedList, render_list),
    (NodeTag::OrderedList, render_list),
    (NodeTag::ListItem, render_list_item),
    (NodeTag::Strong, render_bold),
    (NodeTag::Emphasis, render_italic),
    (NodeTag::BlockQuote, render_quote),
    (NodeTag::Code, render_code),
    (NodeTag::Link, render_link),
];

fn override_for(tag: NodeTag) -> Option<RenderFn> {
    OVERRIDES
        .iter()
        .find(|(t, _)| *t == tag)
        .map(|(_, render)| *render)
}

impl Renderer<'_> {
    fn render_nodes(&self, nodes: &[Node], out: &mut String) {
        for node in nodes {
            match node {
                Node::Text(text) => out.push_str(&escape_html(text)),
                Node::Element(element) => self.render_element(element, out),
            }
        }
    }

    fn render_element(&self, element: &Element, out: &mut String) {
        match override_for(element.kind.tag()) {
            Some(render) => render(self, element, out),
            None => render_plain(self, element, out),
        }
    }

    fn render_children(&self, element: &Element, out: &mut String) {
        self.render_nodes(&element.children, out);
    }

    fn wrap(&self, tag: &str, class: &ClassList, element: &Element, out: &mut String) {
        out.push_str(&format!(r#"<{} class="{}">"#, tag, class));
        self.render_children(element, out);
        out.push_str(&format!("</{}>", tag));
    }
}

fn render_heading(r: &Renderer<'_>, element: &Element, out: &mut String) {
    let NodeKind::Heading(level) = element.kind else {
        return render_plain(r, element, out);
    };
    let Some(base) = classes::heading(level) else {
        return render_plain(r, element, out);
    };

    let class = ClassList::new(base).with_if(
        classes::SOURCES_HEADER,
        matches!(level, 2 | 3) && is_sources_heading(&element.plain_text()),
    );
    r.wrap(&format!("h{}", level), &class, element, out);
}

fn is_sources_heading(text: &str) -> bool {
    let text = text.to_lowercase();
    text.contains("sources") || text.contains("references")
}

/// Only direct text children reach the output. The citation markup produced
/// from them is injected verbatim in [`ParagraphMode::Trusted`].
fn render_paragraph(r: &Renderer<'_>, element: &Element, out: &mut String) {
    let text = element.string_children();
    let markup = match r.options.paragraphs {
        ParagraphMode::Trusted => TrustedHtml::assume_trusted(format_citations(&text).into_owned()),
        ParagraphMode::Escaped => TrustedHtml::assume_trusted(format_citations_escaped(&text)),
    };
    out.push_str(&format!(
        r#"<p class="{}">{}</p>"#,
        classes::MD_PARAGRAPH,
        markup
    ));
}

fn render_list(r: &Renderer<'_>, element: &Element, out: &mut String) {
    let ordered = matches!(element.kind, NodeKind::List { ordered: true });
    let class = ClassList::new(classes::MD_LIST).with_if(classes::ORDERED, ordered);
    r.wrap(if ordered { "ol" } else { "ul" }, &class, element, out);
}

fn render_list_item(r: &Renderer<'_>, element: &Element, out: &mut String) {
    r.wrap("li", &ClassList::new(classes::MD_LIST_ITEM), element, out);
}

fn render_bold(r: &Renderer<'_>, element: &Element, out: &mut String) {
    r.wrap("strong", &ClassList::new(classes::MD_BOLD), element, out);
}

fn render_italic(r: &Renderer<'_>, element: &Element, out: &mut String) {
    r.wrap("em", &ClassList::new(classes::MD_ITALIC), element, out);
}

fn render_quote(r: &Renderer<'_>, element: &Element, out: &mut String) {
    r.wrap("blockquote", &ClassList::new(classes::MD_QUOTE), element, out);
}

fn render_code(_r: &Renderer<'_>, element: &Element, out: &mut String) {
    let code = escape_html(&element.plain_text());
    if matches!(element.kind, NodeKind::Code { inline: true }) {
        out.push_str(&format!(
            r#"<code class="{}">{}</code>"#,
            classes::MD_INLINE_CODE,
            code
        ));
    } else {
        out.push_str(&format!(
            r#"<pre class="{}"><code>{}</code></pre>"#,
            classes::MD_CODE_BLOCK,
            code
        ));
    }
}

fn render_link(r: &Renderer<'_>, element: &Element, out: &mut String) {
    let NodeKind::Link { href } = &element.kind else {
        return render_plain(r, element, out);
    };
    out.push_str(&format!(
        r#"<a href="{}" target="_blank" rel="noopener noreferrer" class="{}">"#,
        escape_html(safe_url(href)),
        classes::MD_LINK
    ));
    r.render_children(element, out);
    out.push_str("</a>");
}

/// Unstyled HTML for tags without an override.
fn render_plain(r: &Renderer<'_>, element: &Element, out: &mut String) {
    let simple = |tag: &str, out: &mut String| {
        out.push_str(&format!("<{}>", tag));
        r.render_children(element, out);
        out.push_str(&format!("</{}>", tag));
    };

    match &element.kind {
        NodeKind::Heading(level) => simple(&format!("h{}", level), out),
        NodeKind::Strikethrough => simple("del", out),
        NodeKind::Table => render_table(r, element, out),
        NodeKind::TableHead => {
            out.push_str("<thead><tr>");
            r.render_children(element, out);
            out.push_str("</tr></thead>");
        }
        NodeKind::TableRow => simple("tr", out),
        NodeKind::TableCell { header: true } => simple("th", out),
        NodeKind::TableCell { header: false } => simple("td", out),
        NodeKind::Image { src, title } => {
            out.push_str(&format!(
                r#"<img src="{}" alt="{}""#,
                escape_html(safe_url(src)),
                escape_html(&element.plain_text())
            ));
            if !title.is_empty() {
                out.push_str(&format!(r#" title="{}""#, escape_html(title)));
            }
            out.push('>');
        }
        NodeKind::TaskMarker { checked } => {
            let checked = if *checked { " checked" } else { "" };
            out.push_str(&format!(r#"<input type="checkbox" disabled{}>"#, checked));
        }
        NodeKind::HardBreak => out.push_str("<br>"),
        NodeKind::Rule => out.push_str("<hr>"),
        _ => r.render_children(element, out),
    }
}

fn render_table(r: &Renderer<'_>, element: &Element, out: &mut String) {
    let (head, body): (Vec<&Node>, Vec<&Node>) = element.children.iter().partition(|node| {
        matches!(node, Node::Element(Element { kind: NodeKind::TableHead, .. }))
    });

    out.push_str("<table>");
    for node in head {
        r.render_nodes(std::slice::from_ref(node), out);
    }
    if !body.is_empty() {
        out.push_str("<tbody>");
        for node in body {
            r.render_nodes(std::slice::from_ref(node), out);
        }
        out.push_str("</tbody>");
    }
    out.push_str("</table>");
}

#[cfg(test)]
mod tests {
    use super::*;

    fn body(content: &str) -> String {
        render_body(content, &RenderOptions::default())
    }

    #[test]
    fn test_empty_view() {
        let output = render(&ContentInput::new(None, false), &RenderOptions::default());
        assert_eq!(output.mode, DisplayMode::Empty);
        assert!(!output.has_sources);
        assert_eq!(
            output.html,
            "<div class=\"web-content-empty\"><div class=\"empty-icon\">📚</div>\
             <h3>No Web Content Available</h3>\
             <p>Content is being generated or not available for this subtopic.</p></div>"
        );
    }

    #[test]
    fn test_skeleton_view() {
        let output = render(&ContentInput::new(Some(""), true), &RenderOptions::default());
        assert_eq!(output.mode, DisplayMode::LoadingSkeleton);
        assert_eq!(
            output.html,
            "<div class=\"web-content\"><article class=\"web-article\">\
             <div class=\"loading-skeleton\">\
             <div class=\"skeleton-line title\"></div>\
             <div class=\"skeleton-line\"></div>\
             <div class=\"skeleton-line\"></div>\
             <div class=\"skeleton-line short\"></div>\
             <div class=\"skeleton-line\"></div>\
             <div class=\"skeleton-line\"></div>\
             </div></article></div>"
        );
    }

    #[test]
    fn test_article_container_and_indicator() {
        let output = render_markdown("Hello", true);
        assert_eq!(
            output.html,
            "<div class=\"web-content\"><article class=\"web-article\">\
             <p class=\"md-paragraph\">Hello</p>\
             <div class=\"streaming-indicator\"><span class=\"dot\"></span>\
             <span class=\"dot\"></span><span class=\"dot\"></span></div></article></div>"
        );
    }

    #[test]
    fn test_headings() {
        assert_eq!(body("# One"), r#"<h1 class="md-h1">One</h1>"#);
        assert_eq!(body("## Two"), r#"<h2 class="md-h2">Two</h2>"#);
        assert_eq!(body("### Three"), r#"<h3 class="md-h3">Three</h3>"#);
        assert_eq!(body("#### Four"), r#"<h4 class="md-h4">Four</h4>"#);
        assert_eq!(body("##### Five"), "<h5>Five</h5>");
        assert_eq!(body("###### Six"), "<h6>Six</h6>");
    }

    #[test]
    fn test_sources_header_levels() {
        assert_eq!(
            body("## References"),
            r#"<h2 class="md-h2 sources-header">References</h2>"#
        );
        assert_eq!(
            body("### Further SOURCES"),
            r#"<h3 class="md-h3 sources-header">Further SOURCES</h3>"#
        );
        assert_eq!(body("# References"), r#"<h1 class="md-h1">References</h1>"#);
        assert_eq!(body("#### References"), r#"<h4 class="md-h4">References</h4>"#);
    }

    #[test]
    fn test_sources_header_uses_nested_text() {
        assert_eq!(
            body("## *Sources*"),
            r#"<h2 class="md-h2 sources-header"><em class="md-italic">Sources</em></h2>"#
        );
    }

    #[test]
    fn test_paragraph_citations() {
        assert_eq!(
            body("Fact [1], another [23]."),
            "<p class=\"md-paragraph\">Fact <cite class=\"citation\">[1]</cite>, \
             another <cite class=\"citation\">[23]</cite>.</p>"
        );
    }

    #[test]
    fn test_paragraph_drops_nested_elements() {
        assert_eq!(
            body("See **bold** [2] for details"),
            r#"<p class="md-paragraph">See  <cite class="citation">[2]</cite> for details</p>"#
        );
    }

    #[test]
    fn test_paragraph_with_only_nested_elements_is_empty() {
        assert_eq!(body("**all bold**"), r#"<p class="md-paragraph"></p>"#);
    }

    #[test]
    fn test_trusted_paragraph_is_verbatim() {
        // An entity decodes to text that is then emitted as-is
        assert_eq!(body("a &lt;i&gt; b"), r#"<p class="md-paragraph">a <i> b</p>"#);
    }

    #[test]
    fn test_escaped_paragraph_mode() {
        let options = RenderOptions {
            paragraphs: ParagraphMode::Escaped,
            ..RenderOptions::default()
        };
        assert_eq!(
            render_body("a &lt;i&gt; [4]", &options),
            r#"<p class="md-paragraph">a &lt;i&gt; <cite class="citation">[4]</cite></p>"#
        );
    }

    #[test]
    fn test_inline_html_in_trusted_paragraph_is_injected() {
        assert_eq!(
            body("Text <b>bold</b> end [1]"),
            r#"<p class="md-paragraph">Text <b>bold</b> end <cite class="citation">[1]</cite></p>"#
        );
    }

    #[test]
    fn test_inline_html_in_escaped_paragraph_is_text() {
        let options = RenderOptions {
            paragraphs: ParagraphMode::Escaped,
            ..RenderOptions::default()
        };
        assert_eq!(
            render_body("Text <b>bold</b> [1]", &options),
            "<p class=\"md-paragraph\">Text &lt;b&gt;bold&lt;/b&gt; \
             <cite class=\"citation\">[1]</cite></p>"
        );
    }

    #[test]
    fn test_raw_html_outside_paragraphs_is_escaped() {
        // Given: inline HTML in a heading
        assert_eq!(
            body("# A <em>x</em>"),
            r#"<h1 class="md-h1">A &lt;em&gt;x&lt;/em&gt;</h1>"#
        );

        // And: an HTML block
        let html = body("<div>block</div>\n\nAfter");
        assert!(html.starts_with("&lt;div&gt;block&lt;/div&gt;"), "{html}");
        assert!(html.ends_with(r#"<p class="md-paragraph">After</p>"#), "{html}");
    }

    #[test]
    fn test_lists() {
        assert_eq!(
            body("- a\n- b"),
            "<ul class=\"md-list\"><li class=\"md-list-item\">a</li>\
             <li class=\"md-list-item\">b</li></ul>"
        );
        assert_eq!(
            body("3. x"),
            r#"<ol class="md-list ordered"><li class="md-list-item">x</li></ol>"#
        );
    }

    #[test]
    fn test_inline_styles_outside_paragraphs() {
        assert_eq!(
            body("# **Bold** and *it* and `code`"),
            "<h1 class=\"md-h1\"><strong class=\"md-bold\">Bold</strong> and \
             <em class=\"md-italic\">it</em> and <code class=\"md-inline-code\">code</code></h1>"
        );
    }

    #[test]
    fn test_blockquote() {
        assert_eq!(
            body("> quoted [1]"),
            "<blockquote class=\"md-quote\"><p class=\"md-paragraph\">quoted \
             <cite class=\"citation\">[1]</cite></p></blockquote>"
        );
    }

    #[test]
    fn test_code_block() {
        assert_eq!(
            body("```\nlet x = a < b;\n```"),
            "<pre class=\"md-code-block\"><code>let x = a &lt; b;\n</code></pre>"
        );
    }

    #[test]
    fn test_link_in_list_item() {
        assert_eq!(
            body("- [Rust](https://www.rust-lang.org/?a=1&b=2)"),
            "<ul class=\"md-list\"><li class=\"md-list-item\">\
             <a href=\"https://www.rust-lang.org/?a=1&amp;b=2\" target=\"_blank\" \
             rel=\"noopener noreferrer\" class=\"md-link\">Rust</a></li></ul>"
        );
    }

    #[test]
    fn test_text_outside_paragraphs_is_escaped() {
        assert_eq!(body("# a &lt; b"), r#"<h1 class="md-h1">a &lt; b</h1>"#);
    }

    #[test]
    fn test_rule_and_image() {
        assert_eq!(body("---"), "<hr>");
        assert_eq!(
            body("# ![alt text](pic.png \"A title\")"),
            r#"<h1 class="md-h1"><img src="pic.png" alt="alt text" title="A title"></h1>"#
        );
    }

    #[test]
    fn test_unsafe_urls_are_blanked() {
        // Given: a script link in a list item and a script image in a heading
        let link = body("- [click](javascript:alert(1))");
        let image = body("# ![x](javascript:alert(1))");

        // Then: the destinations are emptied while the text survives
        assert_eq!(
            link,
            "<ul class=\"md-list\"><li class=\"md-list-item\">\
             <a href=\"\" target=\"_blank\" rel=\"noopener noreferrer\" class=\"md-link\">click</a>\
             </li></ul>"
        );
        assert_eq!(image, r#"<h1 class="md-h1"><img src="" alt="x"></h1>"#);
    }

    #[test]
    fn test_relative_and_mailto_links_are_kept() {
        let html = body("- [a](/docs/a) [b](#top) [c](mailto:x@a.example)");
        assert!(html.contains(r#"<a href="/docs/a" "#), "{html}");
        assert!(html.contains(r##"<a href="#top" "##), "{html}");
        assert!(html.contains(r#"<a href="mailto:x@a.example" "#), "{html}");
    }

    #[test]
    fn test_gfm_table() {
        let options = RenderOptions {
            gfm: true,
            ..RenderOptions::default()
        };
        assert_eq!(
            render_body("| a | b |\n|---|---|\n| 1 | 2 |", &options),
            "<table><thead><tr><th>a</th><th>b</th></tr></thead>\
             <tbody><tr><td>1</td><td>2</td></tr></tbody></table>"
        );
    }

    #[test]
    fn test_gfm_task_list() {
        let options = RenderOptions {
            gfm: true,
            ..RenderOptions::default()
        };
        assert_eq!(
            render_body("- [x] done\n- [ ] todo", &options),
            "<ul class=\"md-list\">\
             <li class=\"md-list-item\"><input type=\"checkbox\" disabled checked>done</li>\
             <li class=\"md-list-item\"><input type=\"checkbox\" disabled>todo</li></ul>"
        );
    }

    #[test]
    fn test_override_table_covers_styled_tags() {
        let styled = [NodeTag::H1, NodeTag::H4, NodeTag::Paragraph, NodeTag::Link, NodeTag::Code];
        for tag in styled {
            assert!(override_for(tag).is_some(), "{tag:?}");
        }
        for tag in [NodeTag::H5, NodeTag::Image, NodeTag::Table, NodeTag::Fragment] {
            assert!(override_for(tag).is_none(), "{tag:?}");
        }
    }
}
