//! Utility functions and constants for HTML processing.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::node::Node;

/// Block-level HTML elements
pub const BLOCK_ELEMENTS: &[&str] = &[
    "address", "article", "aside", "blockquote", "body", "center", "dd", "dir", "div", "dl",
    "dt", "fieldset", "figcaption", "figure", "footer", "form", "h1", "h2", "h3", "h4", "h5",
    "h6", "header", "hgroup", "hr", "html", "li", "main", "menu", "nav", "ol", "p", "pre",
    "section", "table", "tbody", "td", "tfoot", "th", "thead", "tr", "ul",
];

static WHITESPACE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").unwrap());

/// Check if a tag is a block-level element
pub fn is_block(tag: &str) -> bool {
    BLOCK_ELEMENTS.contains(&tag.to_ascii_lowercase().as_str())
}

/// Collapse every whitespace sequence into a single space
pub fn collapse_whitespace(s: &str) -> String {
    WHITESPACE.replace_all(s, " ").into_owned()
}

/// Flattened text of a block: all descendant text, whitespace collapsed
/// (when requested) and trimmed. Empty input gives the empty string.
pub fn flattened_text(node: &Node, collapse: bool) -> String {
    let text = node.text_content();
    if collapse {
        collapse_whitespace(&text).trim().to_string()
    } else {
        text
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_block() {
        assert!(is_block("div"));
        assert!(is_block("p"));
        assert!(is_block("DIV"));
        assert!(!is_block("span"));
        assert!(!is_block("strong"));
    }

    #[test]
    fn test_collapse_whitespace() {
        assert_eq!(collapse_whitespace("a \n\t b"), "a b");
        assert_eq!(collapse_whitespace("Hello "), "Hello ");
        assert_eq!(collapse_whitespace(""), "");
    }

    #[test]
    fn test_flattened_text() {
        let li = Node::element("li")
            .with_child(Node::text("\n  Buy "))
            .with_child(Node::element("strong").with_child(Node::text("milk")))
            .with_child(Node::text("\n"));

        assert_eq!(flattened_text(&li, true), "Buy milk");
        assert_eq!(flattened_text(&li, false), "\n  Buy milk\n");
        assert_eq!(flattened_text(&Node::element("li"), true), "");
    }
}
