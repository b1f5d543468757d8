//! DOM node structure walked by the converters.
//!
//! Any HTML parser can convert its output to this structure; the `html`
//! feature provides one backed by scraper.

/// Node types matching DOM nodeType values
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeType {
    /// Element node (nodeType = 1)
    Element = 1,
    /// Text node (nodeType = 3)
    Text = 3,
    /// Comment node (nodeType = 8)
    Comment = 8,
}

/// A DOM node: an element with children, or a text leaf.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node {
    pub node_type: NodeType,

    /// Lowercase tag name for elements, `#text` / `#comment` otherwise
    pub node_name: String,

    /// Text content for text and comment nodes
    pub node_value: Option<String>,

    pub children: Vec<Node>,
}

impl Node {
    /// Create a new element node
    pub fn element(tag_name: &str) -> Self {
        Self {
            node_type: NodeType::Element,
            node_name: tag_name.to_ascii_lowercase(),
            node_value: None,
            children: Vec::new(),
        }
    }

    /// Create a new text node
    pub fn text(content: &str) -> Self {
        Self {
            node_type: NodeType::Text,
            node_name: "#text".to_string(),
            node_value: Some(content.to_string()),
            children: Vec::new(),
        }
    }

    pub fn comment(content: &str) -> Self {
        Self {
            node_type: NodeType::Comment,
            node_name: "#comment".to_string(),
            node_value: Some(content.to_string()),
            children: Vec::new(),
        }
    }

    /// Builder form of [`Node::add_child`]
    pub fn with_child(mut self, child: Node) -> Self {
        self.children.push(child);
        self
    }

    pub fn is_element(&self) -> bool {
        self.node_type == NodeType::Element
    }

    pub fn is_text(&self) -> bool {
        self.node_type == NodeType::Text
    }

    /// Tag name, empty for non-element nodes
    pub fn tag_name(&self) -> &str {
        if self.is_element() {
            &self.node_name
        } else {
            ""
        }
    }

    /// Get all child nodes
    pub fn children(&self) -> impl Iterator<Item = &Node> {
        self.children.iter()
    }

    /// Get only element children
    pub fn element_children(&self) -> impl Iterator<Item = &Node> {
        self.children().filter(|n| n.is_element())
    }

    /// Element children with the given tag
    pub fn children_named<'a>(&'a self, tag: &'a str) -> impl Iterator<Item = &'a Node> {
        self.element_children().filter(move |n| n.node_name == tag)
    }

    pub fn add_child(&mut self, child: Node) {
        self.children.push(child);
    }

    /// Get all text content from this node and descendants; never fails,
    /// missing text is the empty string
    pub fn text_content(&self) -> String {
        match self.node_type {
            NodeType::Text => self.node_value.clone().unwrap_or_default(),
            NodeType::Comment => String::new(),
            _ => self.children().map(|child| child.text_content()).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_element() {
        let node = Node::element("DIV");
        assert!(node.is_element());
        assert_eq!(node.tag_name(), "div");
    }

    #[test]
    fn test_create_text() {
        let node = Node::text("Hello World");
        assert!(node.is_text());
        assert_eq!(node.tag_name(), "");
        assert_eq!(node.text_content(), "Hello World");
    }

    #[test]
    fn test_children() {
        let mut parent = Node::element("ul");
        parent.add_child(Node::text("\n"));
        parent.add_child(Node::element("li"));
        parent.add_child(Node::element("p"));
        parent.add_child(Node::element("li"));

        assert_eq!(parent.children().count(), 4);
        assert_eq!(parent.element_children().count(), 3);
        assert_eq!(parent.children_named("li").count(), 2);
    }

    #[test]
    fn test_text_content() {
        let div = Node::element("div")
            .with_child(Node::text("Hello "))
            .with_child(Node::comment("ignored"))
            .with_child(Node::element("span").with_child(Node::text("World")));

        assert_eq!(div.text_content(), "Hello World");
        assert_eq!(Node::element("p").text_content(), "");
    }
}
