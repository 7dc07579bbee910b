//! Markup helpers: escaping, URL filtering, class lists and trusted fragments.

use std::fmt;

/// URL schemes allowed in `href` and `src` attributes.
const SAFE_PROTOCOLS: &[&str] = &["http", "https", "irc", "ircs", "mailto", "xmpp"];

/// Escape HTML special characters
pub fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Returns `url` when it is relative or uses a safe scheme, otherwise `""`.
///
/// A colon only starts a scheme when no `/`, `?` or `#` comes before it, so
/// `docs/a:b` and `#x:y` stay relative.
pub fn safe_url(url: &str) -> &str {
    let Some(colon) = url.find(':') else {
        return url;
    };
    let scheme = &url[..colon];
    if scheme.contains(&['/', '?', '#'][..]) {
        return url;
    }
    if SAFE_PROTOCOLS
        .iter()
        .any(|protocol| protocol.eq_ignore_ascii_case(scheme))
    {
        url
    } else {
        ""
    }
}

/// A markup fragment that is written out verbatim, without escaping.
///
/// This is the only way the renderer injects generated markup. Whatever went into
/// the fragment becomes structure in the output, so the Markdown it came from
/// must not be attacker-controlled. Use [`crate::ParagraphMode::Escaped`] when
/// rendering untrusted content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrustedHtml(String);

impl TrustedHtml {
    /// Marks `markup` as safe to emit verbatim.
    pub fn assume_trusted(markup: String) -> Self {
        TrustedHtml(markup)
    }

}

impl fmt::Display for TrustedHtml {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Space-separated `class` attribute value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClassList(Vec<&'static str>);

impl ClassList {
    pub fn new(base: &'static str) -> Self {
        ClassList(vec![base])
    }

    /// Adds `class` when `condition` holds.
    pub fn with_if(mut self, class: &'static str, condition: bool) -> Self {
        if condition {
            self.0.push(class);
        }
        self
    }

    pub fn with(self, class: &'static str) -> Self {
        self.with_if(class, true)
    }
}

impl fmt::Display for ClassList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0.join(" "))
    }
}
