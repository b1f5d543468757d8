//! Block structure walker shared by both converters.
//!
//! The walker classifies each element into a closed set of block kinds and
//! hands recognized blocks to a [`BlockEmitter`]. Anything else is a
//! transparent container whose children are walked in document order.

use crate::node::{Node, NodeType};

/// Output heading level. h4, h5 and h6 share the lowest level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HeadingLevel {
    H1,
    H2,
    H3,
    H4,
}

impl HeadingLevel {
    /// Map an HTML heading rank (1-6) to an output level
    pub fn from_rank(rank: u8) -> Self {
        match rank {
            0 | 1 => HeadingLevel::H1,
            2 => HeadingLevel::H2,
            3 => HeadingLevel::H3,
            _ => HeadingLevel::H4,
        }
    }

    pub fn level(self) -> u8 {
        match self {
            HeadingLevel::H1 => 1,
            HeadingLevel::H2 => 2,
            HeadingLevel::H3 => 3,
            HeadingLevel::H4 => 4,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ListKind {
    Ordered,
    Unordered,
}

impl ListKind {
    /// Leading marker of the item at `index` (0-based): `"1. "` for ordered
    /// lists, the bullet glyph followed by a space otherwise
    pub fn marker(self, index: usize, bullet: char) -> String {
        match self {
            ListKind::Ordered => format!("{}. ", index + 1),
            ListKind::Unordered => format!("{} ", bullet),
        }
    }
}

/// Structural meaning of an element
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BlockKind {
    Heading(HeadingLevel),
    Paragraph,
    List(ListKind),
    Blockquote,
    /// `<pre>`
    CodeBlock,
    /// Any other element: walked through
    Container,
}

impl BlockKind {
    pub fn of(node: &Node) -> Self {
        match node.tag_name() {
            "h1" => BlockKind::Heading(HeadingLevel::from_rank(1)),
            "h2" => BlockKind::Heading(HeadingLevel::from_rank(2)),
            "h3" => BlockKind::Heading(HeadingLevel::from_rank(3)),
            "h4" => BlockKind::Heading(HeadingLevel::from_rank(4)),
            "h5" => BlockKind::Heading(HeadingLevel::from_rank(5)),
            "h6" => BlockKind::Heading(HeadingLevel::from_rank(6)),
            "p" => BlockKind::Paragraph,
            "ul" => BlockKind::List(ListKind::Unordered),
            "ol" => BlockKind::List(ListKind::Ordered),
            "blockquote" => BlockKind::Blockquote,
            "pre" => BlockKind::CodeBlock,
            _ => BlockKind::Container,
        }
    }
}

/// Produces output units for recognized blocks.
///
/// Each handler owns the traversal of its element's children; the walker
/// never descends into a recognized block by itself.
pub trait BlockEmitter {
    type Unit;

    fn heading(&self, level: HeadingLevel, node: &Node) -> Vec<Self::Unit>;

    fn paragraph(&self, node: &Node) -> Vec<Self::Unit>;

    fn list(&self, kind: ListKind, node: &Node) -> Vec<Self::Unit>;

    fn blockquote(&self, node: &Node) -> Vec<Self::Unit>;

    fn code_block(&self, node: &Node) -> Vec<Self::Unit>;
}

/// Walk `node` and collect the emitted units in document order.
///
/// Text and comment nodes produce nothing at block level.
pub fn walk<E>(emitter: &E, node: &Node) -> Vec<E::Unit>
where
    E: BlockEmitter + ?Sized,
{
    match node.node_type {
        NodeType::Text | NodeType::Comment => Vec::new(),
        NodeType::Element => match BlockKind::of(node) {
            BlockKind::Heading(level) => emitter.heading(level, node),
            BlockKind::Paragraph => emitter.paragraph(node),
            BlockKind::List(kind) => emitter.list(kind, node),
            BlockKind::Blockquote => emitter.blockquote(node),
            BlockKind::CodeBlock => emitter.code_block(node),
            BlockKind::Container => walk_children(emitter, node),
        },
    }
}

fn walk_children<E>(emitter: &E, node: &Node) -> Vec<E::Unit>
where
    E: BlockEmitter + ?Sized,
{
    node.children()
        .flat_map(|child| walk(emitter, child))
        .collect()
}

/// `<li>` children of a list, in order
pub fn list_items(list: &Node) -> impl Iterator<Item = &Node> {
    list.children_named("li")
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Records which handler saw which tag
    struct Recorder;

    impl BlockEmitter for Recorder {
        type Unit = String;

        fn heading(&self, level: HeadingLevel, node: &Node) -> Vec<String> {
            vec![format!("h{}:{}", level.level(), node.text_content())]
        }

        fn paragraph(&self, node: &Node) -> Vec<String> {
            vec![format!("p:{}", node.text_content())]
        }

        fn list(&self, kind: ListKind, node: &Node) -> Vec<String> {
            list_items(node)
                .enumerate()
                .map(|(i, li)| format!("{}{}", kind.marker(i, '•'), li.text_content()))
                .collect()
        }

        fn blockquote(&self, node: &Node) -> Vec<String> {
            vec![format!("quote:{}", node.text_content())]
        }

        fn code_block(&self, node: &Node) -> Vec<String> {
            vec![format!("pre:{}", node.text_content())]
        }
    }

    fn el(tag: &str, text: &str) -> Node {
        Node::element(tag).with_child(Node::text(text))
    }

    #[test]
    fn test_heading_collapse() {
        assert_eq!(BlockKind::of(&Node::element("h5")), BlockKind::of(&Node::element("h6")));
        assert_eq!(
            BlockKind::of(&Node::element("h4")),
            BlockKind::Heading(HeadingLevel::H4)
        );
        for tag in ["h1", "h2", "h3"] {
            assert_ne!(BlockKind::of(&Node::element(tag)), BlockKind::of(&Node::element("h5")));
        }
    }

    #[test]
    fn test_container_preserves_order() {
        let root = Node::element("div")
            .with_child(el("h1", "A"))
            .with_child(Node::element("section").with_child(el("p", "B")))
            .with_child(Node::text("dropped"))
            .with_child(el("h6", "C"));

        assert_eq!(walk(&Recorder, &root), vec!["h1:A", "p:B", "h4:C"]);
    }

    #[test]
    fn test_recognized_block_not_descended() {
        let quote = Node::element("blockquote").with_child(el("p", "inner"));
        assert_eq!(walk(&Recorder, &quote), vec!["quote:inner"]);
    }

    #[test]
    fn test_list_markers() {
        let ol = Node::element("ol")
            .with_child(el("li", "a"))
            .with_child(el("li", "b"))
            .with_child(el("li", "c"));
        assert_eq!(walk(&Recorder, &ol), vec!["1. a", "2. b", "3. c"]);

        let ul = Node::element("ul")
            .with_child(el("li", "a"))
            .with_child(el("li", "b"))
            .with_child(el("li", "c"));
        assert_eq!(walk(&Recorder, &ul), vec!["• a", "• b", "• c"]);
    }

    #[test]
    fn test_text_root_is_empty() {
        assert!(walk(&Recorder, &Node::text("loose")).is_empty());
        let wrapper = Node::element("section").with_child(el("pre", "x = 1"));
        assert_eq!(walk(&Recorder, &wrapper), vec!["pre:x = 1"]);
    }
}
