//! DOCX document model
//!
//! A DOCX export is a flat list of paragraphs plus page geometry. All lengths
//! stored here are in twentieths of a point ("twips"), the native unit of
//! WordprocessingML. Caller-facing margins are in points and are converted in
//! exactly one place: [`DocxDocument::assemble`].

use crate::run::{runs_text, Marks, Run};

/// Twips per typographic point
pub const TWIPS_PER_POINT: f64 = 20.0;

/// Kind of a DOCX paragraph, mapped to a paragraph style on packaging
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParagraphKind {
    /// Document title, always the first paragraph
    Title,
    /// Heading with level 1-4 (h4-h6 share level 4)
    Heading(u8),
    Body,
    ListItem,
    Blockquote,
    CodeBlock,
}

impl ParagraphKind {
    /// Paragraph style id used in `word/styles.xml`, `None` for Normal
    pub fn style_id(&self) -> Option<&'static str> {
        match self {
            ParagraphKind::Title => Some("Title"),
            ParagraphKind::Heading(1) => Some("Heading1"),
            ParagraphKind::Heading(2) => Some("Heading2"),
            ParagraphKind::Heading(3) => Some("Heading3"),
            ParagraphKind::Heading(_) => Some("Heading4"),
            ParagraphKind::Body => None,
            ParagraphKind::ListItem => Some("ListParagraph"),
            ParagraphKind::Blockquote => Some("Quote"),
            ParagraphKind::CodeBlock => Some("Code"),
        }
    }
}

/// Space before and after a paragraph, in twips
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Spacing {
    pub before: u32,
    pub after: u32,
}

impl Spacing {
    pub const fn new(before: u32, after: u32) -> Self {
        Self { before, after }
    }
}

/// Left indentation, in twips
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Indent {
    pub left: u32,
}

/// Left paragraph border
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Border {
    /// Line width in eighths of a point
    pub size: u32,
    /// Distance from the text in points
    pub space: u32,
    /// Hex RGB colour without `#`
    pub color: String,
}

/// A DOCX paragraph: kind, runs and layout metadata
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Paragraph {
    pub kind: ParagraphKind,
    pub runs: Vec<Run>,
    pub spacing: Spacing,
    pub indent: Option<Indent>,
    pub border: Option<Border>,
}

impl Paragraph {
    pub fn title(text: impl Into<String>) -> Self {
        Self {
            kind: ParagraphKind::Title,
            runs: vec![Run::plain(text)],
            spacing: Spacing::new(0, 240),
            indent: None,
            border: None,
        }
    }

    /// Heading paragraph; levels above 4 are clamped to 4
    pub fn heading(level: u8, text: impl Into<String>) -> Self {
        Self {
            kind: ParagraphKind::Heading(level.clamp(1, 4)),
            runs: vec![Run::plain(text)],
            spacing: Spacing::new(240, 120),
            indent: None,
            border: None,
        }
    }

    pub fn body(runs: Vec<Run>) -> Self {
        Self {
            kind: ParagraphKind::Body,
            runs,
            spacing: Spacing::new(0, 120),
            indent: None,
            border: None,
        }
    }

    /// List item: marker followed by the item's flattened text
    pub fn list_item(marker: &str, text: &str) -> Self {
        Self {
            kind: ParagraphKind::ListItem,
            runs: vec![Run::plain(format!("{}{}", marker, text))],
            spacing: Spacing::new(0, 60),
            indent: Some(Indent { left: 720 }),
            border: None,
        }
    }

    /// Indented italic quote with a grey left border
    pub fn blockquote(text: impl Into<String>) -> Self {
        Self {
            kind: ParagraphKind::Blockquote,
            runs: vec![Run::new(text, Marks::NONE.with_italic())],
            spacing: Spacing::new(120, 120),
            indent: Some(Indent { left: 720 }),
            border: Some(Border {
                size: 12,
                space: 8,
                color: "CCCCCC".to_string(),
            }),
        }
    }

    /// Preformatted block; lines are kept as hard breaks
    pub fn code_block(code: &str) -> Self {
        let marks = Marks::NONE.with_code();
        let mut runs = Vec::new();
        for (i, line) in code.split('\n').enumerate() {
            if i > 0 {
                runs.push(Run::line_break(marks));
            }
            if !line.is_empty() {
                runs.push(Run::new(line, marks));
            }
        }
        if runs.is_empty() {
            runs.push(Run::empty(marks));
        }

        Self {
            kind: ParagraphKind::CodeBlock,
            runs,
            spacing: Spacing::new(0, 120),
            indent: Some(Indent { left: 360 }),
            border: None,
        }
    }

    /// Concatenated text of all runs
    pub fn text(&self) -> String {
        runs_text(&self.runs)
    }
}

/// Page margins in points, as supplied by the caller
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Margins {
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
    pub left: f64,
}

impl Margins {
    pub const fn new(top: f64, right: f64, bottom: f64, left: f64) -> Self {
        Self {
            top,
            right,
            bottom,
            left,
        }
    }

    pub const fn uniform(points: f64) -> Self {
        Self::new(points, points, points, points)
    }
}

impl Default for Margins {
    /// One inch on every side
    fn default() -> Self {
        Self::uniform(72.0)
    }
}

/// Page margins in twips
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageMarginsTwips {
    pub top: u32,
    pub right: u32,
    pub bottom: u32,
    pub left: u32,
}

/// Page size and margins in twips
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageGeometry {
    pub width: u32,
    pub height: u32,
    pub margins: PageMarginsTwips,
}

/// A4 portrait in twips
const A4_TWIPS: (u32, u32) = (11906, 16838);

fn points_to_twips(points: f64) -> u32 {
    (points * TWIPS_PER_POINT).round().max(0.0) as u32
}

/// A complete DOCX document ready for packaging
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocxDocument {
    pub title: String,
    pub paragraphs: Vec<Paragraph>,
    pub geometry: PageGeometry,
}

impl DocxDocument {
    /// Assemble a document: title paragraph first, then the body, with
    /// margins converted from points to twips.
    pub fn assemble(title: &str, body: Vec<Paragraph>, margins: Margins) -> Self {
        let mut paragraphs = Vec::with_capacity(body.len() + 1);
        paragraphs.push(Paragraph::title(title));
        paragraphs.extend(body);

        Self {
            title: title.to_string(),
            paragraphs,
            geometry: PageGeometry {
                width: A4_TWIPS.0,
                height: A4_TWIPS.1,
                margins: PageMarginsTwips {
                    top: points_to_twips(margins.top),
                    right: points_to_twips(margins.right),
                    bottom: points_to_twips(margins.bottom),
                    left: points_to_twips(margins.left),
                },
            },
        }
    }

    /// Override the page size (in twips)
    pub fn with_page_size(mut self, width: u32, height: u32) -> Self {
        self.geometry.width = width;
        self.geometry.height = height;
        self
    }
}
