//! Best-effort Markdown to HTML for displaying summaries.
//!
//! Handles only what the summary model produces in practice: bold spans,
//! `- ` list items and line breaks. Everything else passes through as
//! escaped text.

use std::sync::OnceLock;

use regex::Regex;

struct Patterns {
    bold: Regex,
    list_item: Regex,
    list_run: Regex,
}

fn patterns() -> &'static Patterns {
    static PATTERNS: OnceLock<Patterns> = OnceLock::new();
    PATTERNS.get_or_init(|| Patterns {
        bold: Regex::new(r"\*\*(.*?)\*\*").expect("static pattern compiles"),
        list_item: Regex::new(r"(?m)^\s*-\s(.*)").expect("static pattern compiles"),
        list_run: Regex::new(r"(?s)(<li>.*</li>)").expect("static pattern compiles"),
    })
}

fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

/// Converts summary text into display HTML.
pub fn format_summary(text: &str) -> String {
    let p = patterns();
    let escaped = escape_html(text);
    let html = p.bold.replace_all(&escaped, "<strong>$1</strong>");
    let html = p.list_item.replace_all(&html, "<li>$1</li>");
    let html = p.list_run.replace_all(&html, "<ul>$1</ul>");
    html.replace('\n', "<br />")
        .replace("<br /><ul>", "<ul>")
        .replace("</ul><br />", "</ul>")
}
