//! Readable-text extraction from fetched HTML.

use scraper::{ElementRef, Html, Node, Selector};

/// Elements whose text never counts as readable content.
const SKIPPED_ELEMENTS: &[&str] = &[
    "script", "style", "noscript", "svg", "footer", "header", "nav", "template",
];

/// Elements that end a line of text when rendered. Inline elements such as
/// `em` or `a` add no separator.
const BLOCK_ELEMENTS: &[&str] = &[
    "address", "article", "aside", "blockquote", "br", "dd", "details", "dialog", "div", "dl",
    "dt", "fieldset", "figcaption", "figure", "form", "h1", "h2", "h3", "h4", "h5", "h6", "hr",
    "li", "main", "ol", "p", "pre", "section", "summary", "table", "td", "th", "tr", "ul",
];

/// Visible body text with boilerplate removed and whitespace runs collapsed.
pub fn extract_readable_text(html: &str) -> String {
    let document = Html::parse_document(html);

    let root = Selector::parse("body")
        .ok()
        .and_then(|selector| document.select(&selector).next())
        .unwrap_or_else(|| document.root_element());

    let mut raw = String::new();
    collect_text(root, &mut raw);
    collapse_whitespace(&raw)
}

fn collect_text(element: ElementRef<'_>, out: &mut String) {
    for child in element.children() {
        match child.value() {
            Node::Text(text) => out.push_str(text),
            Node::Element(el) => {
                if SKIPPED_ELEMENTS.contains(&el.name()) {
                    continue;
                }
                if let Some(child_element) = ElementRef::wrap(child) {
                    collect_text(child_element, out);
                    if BLOCK_ELEMENTS.contains(&el.name()) {
                        out.push(' ');
                    }
                }
            }
            _ => {}
        }
    }
}

/// Replace each run of two or more whitespace characters with a single
/// space, then trim the ends.
fn collapse_whitespace(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut run: Option<char> = None;
    let mut run_len = 0usize;

    fn flush(out: &mut String, run: Option<char>, run_len: usize) {
        if let Some(c) = run {
            out.push(if run_len > 1 { ' ' } else { c });
        }
    }

    for c in raw.chars() {
        if c.is_whitespace() {
            if run.is_none() {
                run = Some(c);
            }
            run_len += 1;
        } else {
            flush(&mut out, run.take(), run_len);
            run_len = 0;
            out.push(c);
        }
    }
    flush(&mut out, run, run_len);

    out.trim().to_string()
}
