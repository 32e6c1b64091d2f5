//! # HTML Rendering
//!
//! Wraps the text rendering in `<pre>` blocks so it can be served as a page.

use crate::floor::FloorResult;
use crate::rendering::{FloorRenderer, TextRenderer};

/// Renders floors as an HTML fragment, one `<pre>` block per text line.
#[derive(Debug, Clone, Default)]
pub struct HtmlRenderer {
    pub text: TextRenderer,
}

impl HtmlRenderer {
    pub fn new() -> Self {
        Self::default()
    }
}

impl FloorRenderer for HtmlRenderer {
    fn render(&self, floor: &FloorResult) -> String {
        let mut html = String::from("<style>pre {margin: 0.0}</style>");
        for line in self.text.render_lines(floor) {
            html.push_str("<pre>");
            html.push_str(&escape(&line));
            html.push_str("<br /></pre>");
        }
        html
    }
}

/// Escapes the characters that are significant in HTML text.
pub fn escape(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
