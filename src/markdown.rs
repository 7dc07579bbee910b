//! Markdown parsing into an owned node tree.
//!
//! pulldown-cmark produces a flat event stream. The renderer needs each element
//! together with its children (paragraphs flatten their direct text children),
//! so the events are folded into [`Node`]s here.

use pulldown_cmark::{Event, HeadingLevel, Options, Parser, Tag};

/// Optional Markdown syntax beyond CommonMark.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Extensions {
    /// Tables, strikethrough and task lists.
    pub gfm: bool,
}

impl Extensions {
    fn parser_options(self) -> Options {
        let mut options = Options::empty();
        if self.gfm {
            options.insert(Options::ENABLE_TABLES);
            options.insert(Options::ENABLE_STRIKETHROUGH);
            options.insert(Options::ENABLE_TASKLISTS);
        }
        options
    }
}

/// A node in the parsed document.
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    Text(String),
    Element(Element),
}

/// A structural element and its children.
#[derive(Debug, Clone, PartialEq)]
pub struct Element {
    pub kind: NodeKind,
    pub children: Vec<Node>,
}

/// The element types the parser can produce.
#[derive(Debug, Clone, PartialEq)]
pub enum NodeKind {
    /// Level 1 to 6.
    Heading(u8),
    Paragraph,
    List { ordered: bool },
    ListItem,
    Strong,
    Emphasis,
    BlockQuote,
    Code { inline: bool },
    Link { href: String },
    Image { src: String, title: String },
    Strikethrough,
    Table,
    TableHead,
    TableRow,
    TableCell { header: bool },
    TaskMarker { checked: bool },
    HardBreak,
    Rule,
    /// Renders its children with no wrapper.
    Fragment,
}

/// Discriminant of [`NodeKind`], used to key the render dispatch table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeTag {
    H1,
    H2,
    H3,
    H4,
    H5,
    H6,
    Paragraph,
    UnorderedList,
    OrderedList,
    ListItem,
    Strong,
    Emphasis,
    BlockQuote,
    Code,
    Link,
    Image,
    Strikethrough,
    Table,
    TableHead,
    TableRow,
    TableCell,
    TaskMarker,
    HardBreak,
    Rule,
    Fragment,
}

impl NodeKind {
    pub fn tag(&self) -> NodeTag {
        match self {
            NodeKind::Heading(1) => NodeTag::H1,
            NodeKind::Heading(2) => NodeTag::H2,
            NodeKind::Heading(3) => NodeTag::H3,
            NodeKind::Heading(4) => NodeTag::H4,
            NodeKind::Heading(5) => NodeTag::H5,
            NodeKind::Heading(_) => NodeTag::H6,
            NodeKind::Paragraph => NodeTag::Paragraph,
            NodeKind::List { ordered: false } => NodeTag::UnorderedList,
            NodeKind::List { ordered: true } => NodeTag::OrderedList,
            NodeKind::ListItem => NodeTag::ListItem,
            NodeKind::Strong => NodeTag::Strong,
            NodeKind::Emphasis => NodeTag::Emphasis,
            NodeKind::BlockQuote => NodeTag::BlockQuote,
            NodeKind::Code { .. } => NodeTag::Code,
            NodeKind::Link { .. } => NodeTag::Link,
            NodeKind::Image { .. } => NodeTag::Image,
            NodeKind::Strikethrough => NodeTag::Strikethrough,
            NodeKind::Table => NodeTag::Table,
            NodeKind::TableHead => NodeTag::TableHead,
            NodeKind::TableRow => NodeTag::TableRow,
            NodeKind::TableCell { .. } => NodeTag::TableCell,
            NodeKind::TaskMarker { .. } => NodeTag::TaskMarker,
            NodeKind::HardBreak => NodeTag::HardBreak,
            NodeKind::Rule => NodeTag::Rule,
            NodeKind::Fragment => NodeTag::Fragment,
        }
    }
}

impl Node {
    /// Concatenates the text of this node and all its descendants.
    pub fn plain_text(&self) -> String {
        match self {
            Node::Text(text) => text.clone(),
            Node::Element(element) => element.plain_text(),
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Node::Text(text) => Some(text),
            Node::Element(_) => None,
        }
    }
}

impl Element {
    pub fn new(kind: NodeKind, children: Vec<Node>) -> Self {
        Element { kind, children }
    }

    /// Concatenates the text of all descendants.
    pub fn plain_text(&self) -> String {
        self.children.iter().map(Node::plain_text).collect()
    }

    /// Concatenates only the direct text children.
    ///
    /// Nested elements contribute nothing, so `See *this* [1]` yields `See  [1]`.
    pub fn string_children(&self) -> String {
        self.children.iter().filter_map(Node::as_text).collect()
    }
}

struct Frame {
    kind: NodeKind,
    children: Vec<Node>,
}

/// Parses `content` into a list of top-level nodes.
///
/// Raw HTML (blocks and inline tags) is kept as literal text.
///
/// # Examples
///
/// ```
/// use subtopic_render::markdown::{parse, Extensions, Node, NodeKind};
///
/// let nodes = parse("# Title", Extensions::default());
/// let Node::Element(heading) = &nodes[0] else { panic!("expected an element") };
/// assert_eq!(heading.kind, NodeKind::Heading(1));
/// assert_eq!(heading.plain_text(), "Title");
/// ```
pub fn parse(content: &str, extensions: Extensions) -> Vec<Node> {
    let mut stack = vec![Frame {
        kind: NodeKind::Fragment,
        children: Vec::new(),
    }];

    for event in Parser::new_ext(content, extensions.parser_options()) {
        match event {
            Event::Start(tag) => {
                let kind = kind_for(tag, &stack);
                stack.push(Frame {
                    kind,
                    children: Vec::new(),
                });
            }
            Event::End(_) => {
                if stack.len() > 1 {
                    close_frame(&mut stack);
                }
            }
            Event::Text(text) => push_text(&mut stack, &text),
            Event::Code(code) => push_element(
                &mut stack,
                Element::new(NodeKind::Code { inline: true }, vec![Node::Text(code.to_string())]),
            ),
            Event::SoftBreak => push_text(&mut stack, "\n"),
            Event::HardBreak => {
                push_element(&mut stack, Element::new(NodeKind::HardBreak, Vec::new()))
            }
            Event::Rule => push_element(&mut stack, Element::new(NodeKind::Rule, Vec::new())),
            Event::TaskListMarker(checked) => push_element(
                &mut stack,
                Element::new(NodeKind::TaskMarker { checked }, Vec::new()),
            ),
            Event::Html(html) | Event::InlineHtml(html) => push_text(&mut stack, &html),
            _ => {}
        }
    }

    while stack.len() > 1 {
        close_frame(&mut stack);
    }

    stack.pop().map(|root| root.children).unwrap_or_default()
}

fn kind_for(tag: Tag<'_>, stack: &[Frame]) -> NodeKind {
    match tag {
        Tag::Paragraph => NodeKind::Paragraph,
        Tag::Heading { level, .. } => NodeKind::Heading(heading_level(level)),
        Tag::BlockQuote(_) => NodeKind::BlockQuote,
        Tag::CodeBlock(_) => NodeKind::Code { inline: false },
        Tag::List(start) => NodeKind::List {
            ordered: start.is_some(),
        },
        Tag::Item => NodeKind::ListItem,
        Tag::Emphasis => NodeKind::Emphasis,
        Tag::Strong => NodeKind::Strong,
        Tag::Strikethrough => NodeKind::Strikethrough,
        Tag::Link { dest_url, .. } => NodeKind::Link {
            href: dest_url.to_string(),
        },
        Tag::Image { dest_url, title, .. } => NodeKind::Image {
            src: dest_url.to_string(),
            title: title.to_string(),
        },
        Tag::Table(_) => NodeKind::Table,
        Tag::TableHead => NodeKind::TableHead,
        Tag::TableRow => NodeKind::TableRow,
        Tag::TableCell => NodeKind::TableCell {
            header: stack
                .iter()
                .any(|frame| frame.kind == NodeKind::TableHead),
        },
        _ => NodeKind::Fragment,
    }
}

fn heading_level(level: HeadingLevel) -> u8 {
    match level {
        HeadingLevel::H1 => 1,
        HeadingLevel::H2 => 2,
        HeadingLevel::H3 => 3,
        HeadingLevel::H4 => 4,
        HeadingLevel::H5 => 5,
        HeadingLevel::H6 => 6,
    }
}

fn close_frame(stack: &mut Vec<Frame>) {
    let Some(frame) = stack.pop() else {
        return;
    };
    push_element(stack, Element::new(frame.kind, frame.children));
}

fn push_element(stack: &mut [Frame], element: Element) {
    if let Some(top) = stack.last_mut() {
        top.children.push(Node::Element(element));
    }
}

/// Appends text, merging with a preceding text node.
fn push_text(stack: &mut [Frame], text: &str) {
    let Some(top) = stack.last_mut() else {
        return;
    };
    match top.children.last_mut() {
        Some(Node::Text(existing)) => existing.push_str(text),
        _ => top.children.push(Node::Text(text.to_string())),
    }
}
