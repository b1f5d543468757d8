//! PDF view tree and its static style table
//!
//! The PDF converter produces a tree of views and texts in the spirit of a
//! flexbox document renderer. Every node references named styles from a
//! [`StyleSheet`]; nothing is styled inline.

use indexmap::IndexMap;

/// Named entries of the style table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StyleName {
    Page,
    Title,
    H1,
    H2,
    H3,
    H4,
    Paragraph,
    List,
    ListItem,
    ListMarker,
    ListContent,
    Blockquote,
    Code,
    CodeBlock,
    Bold,
    Italic,
    Underline,
}

/// RGB colour
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Color(pub u8, pub u8, pub u8);

impl Color {
    pub const fn gray(level: u8) -> Self {
        Color(level, level, level)
    }

    /// Components scaled to 0.0..=1.0
    pub fn to_unit(self) -> (f32, f32, f32) {
        (
            self.0 as f32 / 255.0,
            self.1 as f32 / 255.0,
            self.2 as f32 / 255.0,
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FontFamily {
    /// Proportional sans serif
    Sans,
    /// Fixed width
    Mono,
}

/// A style rule. Unset options inherit from the enclosing node; the box
/// lengths (margins, padding) apply to the node itself only.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Style {
    pub font_size: Option<f32>,
    pub font_family: Option<FontFamily>,
    pub bold: Option<bool>,
    pub italic: Option<bool>,
    pub underline: Option<bool>,
    pub color: Option<Color>,
    /// Multiple of the font size
    pub line_height: Option<f32>,
    pub background: Option<Color>,
    pub margin_top: f32,
    pub margin_bottom: f32,
    pub margin_left: f32,
    pub padding_left: f32,
    /// Left border width and colour
    pub border_left: Option<(f32, Color)>,
    /// Lay children out side by side instead of top to bottom
    pub row: bool,
    /// Fixed width of a row cell
    pub width: Option<f32>,
}

/// Ordered table of named styles
#[derive(Debug, Clone, PartialEq)]
pub struct StyleSheet {
    styles: IndexMap<StyleName, Style>,
}

impl StyleSheet {
    pub fn new() -> Self {
        Self {
            styles: IndexMap::new(),
        }
    }

    /// Add or replace a style
    pub fn insert(&mut self, name: StyleName, style: Style) -> &mut Self {
        self.styles.insert(name, style);
        self
    }

    pub fn get(&self, name: StyleName) -> Option<&Style> {
        self.styles.get(&name)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&StyleName, &Style)> {
        self.styles.iter()
    }

    pub fn len(&self) -> usize {
        self.styles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.styles.is_empty()
    }
}

impl Default for StyleSheet {
    /// The document style table used by every PDF export
    fn default() -> Self {
        let ink = Color::gray(0x33);
        let heading = |size: f32, top: f32, bottom: f32| Style {
            font_size: Some(size),
            bold: Some(true),
            color: Some(Color::gray(0x11)),
            margin_top: top,
            margin_bottom: bottom,
            ..Default::default()
        };

        let mut sheet = StyleSheet::new();
        sheet
            .insert(
                StyleName::Page,
                Style {
                    font_size: Some(12.0),
                    font_family: Some(FontFamily::Sans),
                    color: Some(ink),
                    line_height: Some(1.5),
                    ..Default::default()
                },
            )
            .insert(
                StyleName::Title,
                Style {
                    font_size: Some(24.0),
                    bold: Some(true),
                    color: Some(Color::gray(0x11)),
                    margin_bottom: 20.0,
                    line_height: Some(1.2),
                    ..Default::default()
                },
            )
            .insert(StyleName::H1, heading(20.0, 16.0, 8.0))
            .insert(StyleName::H2, heading(18.0, 14.0, 6.0))
            .insert(StyleName::H3, heading(16.0, 12.0, 6.0))
            .insert(StyleName::H4, heading(14.0, 10.0, 4.0))
            .insert(
                StyleName::Paragraph,
                Style {
                    margin_bottom: 8.0,
                    ..Default::default()
                },
            )
            .insert(
                StyleName::List,
                Style {
                    margin_left: 10.0,
                    margin_bottom: 8.0,
                    ..Default::default()
                },
            )
            .insert(
                StyleName::ListItem,
                Style {
                    row: true,
                    margin_bottom: 4.0,
                    ..Default::default()
                },
            )
            .insert(
                StyleName::ListMarker,
                Style {
                    width: Some(18.0),
                    ..Default::default()
                },
            )
            .insert(StyleName::ListContent, Style::default())
            .insert(
                StyleName::Blockquote,
                Style {
                    italic: Some(true),
                    color: Some(Color::gray(0x55)),
                    margin_top: 8.0,
                    margin_bottom: 8.0,
                    padding_left: 12.0,
                    border_left: Some((3.0, Color::gray(0xCC))),
                    ..Default::default()
                },
            )
            .insert(
                StyleName::Code,
                Style {
                    font_family: Some(FontFamily::Mono),
                    font_size: Some(11.0),
                    ..Default::default()
                },
            )
            .insert(
                StyleName::CodeBlock,
                Style {
                    font_family: Some(FontFamily::Mono),
                    font_size: Some(10.0),
                    background: Some(Color::gray(0xF5)),
                    padding_left: 8.0,
                    margin_bottom: 8.0,
                    line_height: Some(1.4),
                    ..Default::default()
                },
            )
            .insert(
                StyleName::Bold,
                Style {
                    bold: Some(true),
                    ..Default::default()
                },
            )
            .insert(
                StyleName::Italic,
                Style {
                    italic: Some(true),
                    ..Default::default()
                },
            )
            .insert(
                StyleName::Underline,
                Style {
                    underline: Some(true),
                    ..Default::default()
                },
            );
        sheet
    }
}

/// A node of the PDF view tree
#[derive(Debug, Clone, PartialEq)]
pub enum PdfNode {
    /// Block container
    View {
        styles: Vec<StyleName>,
        children: Vec<PdfNode>,
    },
    /// Text block; children are nested texts or literals
    Text {
        styles: Vec<StyleName>,
        children: Vec<PdfNode>,
    },
    /// Literal string content
    Literal(String),
}

impl PdfNode {
    pub fn view(styles: Vec<StyleName>, children: Vec<PdfNode>) -> Self {
        PdfNode::View { styles, children }
    }

    pub fn text(styles: Vec<StyleName>, children: Vec<PdfNode>) -> Self {
        PdfNode::Text { styles, children }
    }

    pub fn literal(text: impl Into<String>) -> Self {
        PdfNode::Literal(text.into())
    }

    /// Styles referenced by this node
    pub fn styles(&self) -> &[StyleName] {
        match self {
            PdfNode::View { styles, .. } | PdfNode::Text { styles, .. } => styles,
            PdfNode::Literal(_) => &[],
        }
    }

    pub fn children(&self) -> &[PdfNode] {
        match self {
            PdfNode::View { children, .. } | PdfNode::Text { children, .. } => children,
            PdfNode::Literal(_) => &[],
        }
    }

    /// Concatenated literal text of this subtree
    pub fn text_content(&self) -> String {
        match self {
            PdfNode::Literal(text) => text.clone(),
            _ => self.children().iter().map(|c| c.text_content()).collect(),
        }
    }
}

/// A PDF document: a single page-flow view holding the title and body
#[derive(Debug, Clone, PartialEq)]
pub struct PdfDocument {
    pub title: String,
    pub styles: StyleSheet,
    root: PdfNode,
}

impl PdfDocument {
    /// Build the document tree with the default style table
    pub fn new(title: &str, body: Vec<PdfNode>) -> Self {
        let mut children = Vec::with_capacity(body.len() + 1);
        children.push(PdfNode::text(
            vec![StyleName::Title],
            vec![PdfNode::literal(title)],
        ));
        children.extend(body);

        Self {
            title: title.to_string(),
            styles: StyleSheet::default(),
            root: PdfNode::view(vec![StyleName::Page], children),
        }
    }

    /// The page view
    pub fn root(&self) -> &PdfNode {
        &self.root
    }

    /// Body nodes, without the title
    pub fn body(&self) -> &[PdfNode] {
        &self.root.children()[1..]
    }
}
