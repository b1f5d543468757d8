//! HTML parsing support.
//!
//! Parses an HTML string into the [`Node`] structure walked by the
//! converters.

use scraper::{ElementRef, Html, Node as ScraperNode};

use crate::node::Node;

/// Parse an HTML fragment into a Node tree.
///
/// The returned root is the `<html>` element scraper wraps every fragment
/// in; it is a plain container for the converters.
///
/// # Example
///
/// ```rust
/// use pressroom::parse_html;
///
/// let node = parse_html("<h1>Hello <em>World</em></h1>");
/// assert_eq!(node.text_content(), "Hello World");
/// ```
pub fn parse_html(html: &str) -> Node {
    let document = Html::parse_fragment(html);
    scraper_to_node(document.root_element())
}

/// Convert a scraper ElementRef to our Node structure
fn scraper_to_node(element: ElementRef) -> Node {
    let mut node = Node::element(element.value().name());

    for child in element.children() {
        match child.value() {
            ScraperNode::Text(text) => {
                node.add_child(Node::text(&text.text));
            }
            ScraperNode::Comment(comment) => {
                node.add_child(Node::comment(&comment.comment));
            }
            ScraperNode::Element(_) => {
                if let Some(child_element) = ElementRef::wrap(child) {
                    node.add_child(scraper_to_node(child_element));
                }
            }
            _ => {}
        }
    }

    node
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_simple_html() {
        let node = parse_html("<p>Hello World</p>");
        assert!(node.is_element());
        assert_eq!(node.tag_name(), "html");

        let p = node.element_children().next().unwrap();
        assert_eq!(p.tag_name(), "p");
        assert_eq!(p.text_content(), "Hello World");
    }

    #[test]
    fn test_parse_nested_marks() {
        let node = parse_html("<p>a<strong><em>b</em></strong></p>");
        let p = node.element_children().next().unwrap();
        let strong = p.element_children().next().unwrap();
        assert_eq!(strong.tag_name(), "strong");
        assert_eq!(strong.element_children().next().unwrap().tag_name(), "em");
    }

    #[test]
    fn test_parse_uppercase_tags() {
        let node = parse_html("<UL><LI>One</LI></UL>");
        let ul = node.element_children().next().unwrap();
        assert_eq!(ul.tag_name(), "ul");
        assert_eq!(ul.children_named("li").count(), 1);
    }
}
