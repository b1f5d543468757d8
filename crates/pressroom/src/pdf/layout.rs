//! Page flow layout for the PDF view tree.
//!
//! Texts are broken into lines with the standard font metrics and stacked
//! top to bottom; a new page starts whenever the next line does not
//! fit above the bottom margin.

use std::mem;
use std::slice;

use pressroom_core::{Color, FontFamily, Margins, PdfDocument, PdfNode, Style, StyleName, StyleSheet};

use super::metrics::char_width;

/// Page size and margins used for rendering, in points
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PdfLayout {
    pub page_width: f32,
    pub page_height: f32,
    pub margins: Margins,
}

impl PdfLayout {
    pub fn new(page_width: f32, page_height: f32, margins: Margins) -> Self {
        Self {
            page_width,
            page_height,
            margins,
        }
    }
}

impl Default for PdfLayout {
    /// A4 portrait with 40pt margins
    fn default() -> Self {
        Self::new(595.28, 841.89, Margins::uniform(40.0))
    }
}

/// The standard Type1 fonts used for text
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Font {
    Helvetica,
    HelveticaBold,
    HelveticaOblique,
    HelveticaBoldOblique,
    Courier,
    CourierBold,
    CourierOblique,
    CourierBoldOblique,
}

impl Font {
    pub(crate) const ALL: [Font; 8] = [
        Font::Helvetica,
        Font::HelveticaBold,
        Font::HelveticaOblique,
        Font::HelveticaBoldOblique,
        Font::Courier,
        Font::CourierBold,
        Font::CourierOblique,
        Font::CourierBoldOblique,
    ];

    fn select(family: FontFamily, bold: bool, italic: bool) -> Self {
        match (family, bold, italic) {
            (FontFamily::Sans, false, false) => Font::Helvetica,
            (FontFamily::Sans, true, false) => Font::HelveticaBold,
            (FontFamily::Sans, false, true) => Font::HelveticaOblique,
            (FontFamily::Sans, true, true) => Font::HelveticaBoldOblique,
            (FontFamily::Mono, false, false) => Font::Courier,
            (FontFamily::Mono, true, false) => Font::CourierBold,
            (FontFamily::Mono, false, true) => Font::CourierOblique,
            (FontFamily::Mono, true, true) => Font::CourierBoldOblique,
        }
    }

    pub(crate) fn base_font(self) -> &'static str {
        match self {
            Font::Helvetica => "Helvetica",
            Font::HelveticaBold => "Helvetica-Bold",
            Font::HelveticaOblique => "Helvetica-Oblique",
            Font::HelveticaBoldOblique => "Helvetica-BoldOblique",
            Font::Courier => "Courier",
            Font::CourierBold => "Courier-Bold",
            Font::CourierOblique => "Courier-Oblique",
            Font::CourierBoldOblique => "Courier-BoldOblique",
        }
    }

    pub(crate) fn resource_name(self) -> &'static str {
        match self {
            Font::Helvetica => "F1",
            Font::HelveticaBold => "F2",
            Font::HelveticaOblique => "F3",
            Font::HelveticaBoldOblique => "F4",
            Font::Courier => "F5",
            Font::CourierBold => "F6",
            Font::CourierOblique => "F7",
            Font::CourierBoldOblique => "F8",
        }
    }

    fn is_mono(self) -> bool {
        matches!(
            self,
            Font::Courier | Font::CourierBold | Font::CourierOblique | Font::CourierBoldOblique
        )
    }

    fn is_bold(self) -> bool {
        matches!(
            self,
            Font::HelveticaBold | Font::HelveticaBoldOblique | Font::CourierBold | Font::CourierBoldOblique
        )
    }

    /// Advance width of `ch` at `size` points
    fn advance(self, ch: char, size: f32) -> f32 {
        f32::from(char_width(ch, self.is_mono(), self.is_bold())) * size / 1000.0
    }

    fn measure(self, text: &str, size: f32) -> f32 {
        text.chars().map(|c| self.advance(c, size)).sum()
    }
}

/// Inherited text properties
#[derive(Debug, Clone, Copy, PartialEq)]
struct TextStyle {
    font_size: f32,
    family: FontFamily,
    bold: bool,
    italic: bool,
    underline: bool,
    color: Color,
    line_height: f32,
}

impl TextStyle {
    fn base() -> Self {
        Self {
            font_size: 12.0,
            family: FontFamily::Sans,
            bold: false,
            italic: false,
            underline: false,
            color: Color::gray(0),
            line_height: 1.2,
        }
    }

    fn apply(mut self, style: &Style) -> Self {
        if let Some(size) = style.font_size {
            self.font_size = size;
        }
        if let Some(family) = style.font_family {
            self.family = family;
        }
        if let Some(bold) = style.bold {
            self.bold = bold;
        }
        if let Some(italic) = style.italic {
            self.italic = italic;
        }
        if let Some(underline) = style.underline {
            self.underline = underline;
        }
        if let Some(color) = style.color {
            self.color = color;
        }
        if let Some(line_height) = style.line_height {
            self.line_height = line_height;
        }
        self
    }

    fn font(&self) -> Font {
        Font::select(self.family, self.bold, self.italic)
    }

    fn line_height(&self) -> f32 {
        self.font_size * self.line_height
    }
}

/// Box properties of a node, summed over its styles
#[derive(Debug, Default)]
struct BoxStyle {
    margin_top: f32,
    margin_bottom: f32,
    margin_left: f32,
    padding_left: f32,
    border_left: Option<(f32, Color)>,
    background: Option<Color>,
    row: bool,
    width: Option<f32>,
}

/// A drawing operation in PDF user space (origin bottom left)
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum DrawOp {
    Text {
        x: f32,
        y: f32,
        font: Font,
        size: f32,
        color: Color,
        text: String,
    },
    Line {
        from: (f32, f32),
        to: (f32, f32),
        width: f32,
        color: Color,
    },
    Rect {
        x: f32,
        y: f32,
        width: f32,
        height: f32,
        color: Color,
    },
}

#[derive(Debug, Clone, Default, PartialEq)]
pub(crate) struct Page {
    pub ops: Vec<DrawOp>,
}

/// Lay the document out into pages
pub(crate) fn layout_document(doc: &PdfDocument, layout: &PdfLayout) -> Vec<Page> {
    let mut layouter = Layouter::new(&doc.styles, layout);
    layouter.node(doc.root(), TextStyle::base(), 0.0);
    layouter.pages
}

#[derive(Debug, Clone, Copy)]
struct Cursor {
    page: usize,
    /// Distance from the top edge of the page
    top: f32,
}

impl Cursor {
    fn is_after(&self, other: &Cursor) -> bool {
        self.page > other.page || (self.page == other.page && self.top > other.top)
    }
}

/// Paint applied next to every line laid out inside a box
struct Decoration {
    x: f32,
    border: Option<(f32, Color)>,
    background: Option<Color>,
}

struct Span<'t> {
    text: &'t str,
    style: TextStyle,
}

#[derive(Debug, Default)]
struct LineItem {
    text: String,
    style: Option<TextStyle>,
    width: f32,
}

#[derive(Debug, Default)]
struct Line {
    items: Vec<LineItem>,
    width: f32,
}

impl Line {
    fn is_empty(&self) -> bool {
        self.items.iter().all(|i| i.text.is_empty())
    }

    fn push(&mut self, text: &str, style: TextStyle) {
        let width = style.font().measure(text, style.font_size);
        self.width += width;
        match self.items.last_mut() {
            Some(last) if last.style == Some(style) => {
                last.text.push_str(text);
                last.width += width;
            }
            _ => self.items.push(LineItem {
                text: text.to_string(),
                style: Some(style),
                width,
            }),
        }
    }

    fn trimmed(mut self) -> Self {
        if let Some(last) = self.items.last_mut() {
            if let Some(style) = last.style {
                let kept = last.text.trim_end().len();
                last.text.truncate(kept);
                let width = style.font().measure(&last.text, style.font_size);
                self.width -= last.width - width;
                last.width = width;
            }
        }
        self
    }
}

struct Layouter<'a> {
    sheet: &'a StyleSheet,
    layout: &'a PdfLayout,
    pages: Vec<Page>,
    cursor: Cursor,
    decorations: Vec<Decoration>,
    /// Column widths of the rows inside each open view
    columns: Vec<Vec<f32>>,
}

impl<'a> Layouter<'a> {
    fn new(sheet: &'a StyleSheet, layout: &'a PdfLayout) -> Self {
        Self {
            sheet,
            layout,
            pages: vec![Page::default()],
            cursor: Cursor {
                page: 0,
                top: layout.margins.top as f32,
            },
            decorations: Vec::new(),
            columns: Vec::new(),
        }
    }

    fn content_top(&self) -> f32 {
        self.layout.margins.top as f32
    }

    fn content_bottom(&self) -> f32 {
        self.layout.page_height - self.layout.margins.bottom as f32
    }

    fn content_left(&self) -> f32 {
        self.layout.margins.left as f32
    }

    fn content_right(&self) -> f32 {
        self.layout.page_width - self.layout.margins.right as f32
    }

    fn text_style(&self, inherited: TextStyle, styles: &[StyleName]) -> TextStyle {
        styles
            .iter()
            .filter_map(|name| self.sheet.get(*name))
            .fold(inherited, |acc, style| acc.apply(style))
    }

    fn box_style(&self, styles: &[StyleName]) -> BoxStyle {
        let mut bx = BoxStyle::default();
        for style in styles.iter().filter_map(|name| self.sheet.get(*name)) {
            bx.margin_top += style.margin_top;
            bx.margin_bottom += style.margin_bottom;
            bx.margin_left += style.margin_left;
            bx.padding_left += style.padding_left;
            bx.border_left = style.border_left.or(bx.border_left);
            bx.background = style.background.or(bx.background);
            bx.row |= style.row;
            bx.width = style.width.or(bx.width);
        }
        bx
    }

    fn node(&mut self, node: &PdfNode, inherited: TextStyle, indent: f32) {
        let (styles, children, is_view) = match node {
            PdfNode::Literal(text) => {
                let spans = [Span {
                    text: text.as_str(),
                    style: inherited,
                }];
                self.paragraph(&spans, inherited, indent);
                return;
            }
            PdfNode::View { styles, children } => (styles, children, true),
            PdfNode::Text { styles, children } => (styles, children, false),
        };

        let style = self.text_style(inherited, styles);
        let bx = self.box_style(styles);

        self.cursor.top += bx.margin_top;
        let outer = indent + bx.margin_left;
        let decorated = bx.border_left.is_some() || bx.background.is_some();
        if decorated {
            self.decorations.push(Decoration {
                x: self.content_left() + outer,
                border: bx.border_left,
                background: bx.background,
            });
        }

        let inner = outer + bx.padding_left;
        if !is_view {
            let mut spans = Vec::new();
            collect_spans(self.sheet, children, style, &mut spans);
            self.paragraph(&spans, style, inner);
        } else {
            let row_columns = if bx.row {
                self.columns.last().cloned().unwrap_or_default()
            } else {
                Vec::new()
            };

            let child_columns = self.column_widths(children, style);
            self.columns.push(child_columns);
            if bx.row {
                self.row(children, style, inner, &row_columns);
            } else {
                for child in children {
                    self.node(child, style, inner);
                }
            }
            self.columns.pop();
        }

        if decorated {
            self.decorations.pop();
        }
        self.cursor.top += bx.margin_bottom;
    }

    /// Cells side by side; each cell pushes the following ones right by its
    /// column width
    fn row(&mut self, cells: &[PdfNode], style: TextStyle, indent: f32, columns: &[f32]) {
        let start = self.cursor;
        let mut end = start;
        let mut x = indent;

        for (i, cell) in cells.iter().enumerate() {
            self.cursor = start;
            self.node(cell, style, x);
            if self.cursor.is_after(&end) {
                end = self.cursor;
            }
            x += match columns.get(i) {
                Some(width) => *width,
                None => self.cell_width(cell, style),
            };
        }

        self.cursor = end;
    }

    /// Widest cell per column over the rows among `children`, so sibling
    /// rows (the items of one list) line up
    fn column_widths(&self, children: &[PdfNode], style: TextStyle) -> Vec<f32> {
        let mut widths: Vec<f32> = Vec::new();

        for row in children {
            if !matches!(row, PdfNode::View { .. }) || !self.box_style(row.styles()).row {
                continue;
            }
            let row_style = self.text_style(style, row.styles());
            for (i, cell) in row.children().iter().enumerate() {
                let width = self.cell_width(cell, row_style);
                match widths.get_mut(i) {
                    Some(w) => *w = w.max(width),
                    None => widths.push(width),
                }
            }
        }
        widths
    }

    /// Styled width of a cell; text cells grow to fit their content
    fn cell_width(&self, cell: &PdfNode, style: TextStyle) -> f32 {
        let fixed = self.box_style(cell.styles()).width.unwrap_or(0.0);
        match cell {
            PdfNode::Text { .. } => fixed.max(self.natural_width(cell, style)),
            _ => fixed,
        }
    }

    /// Unwrapped width of a text node
    fn natural_width(&self, node: &PdfNode, style: TextStyle) -> f32 {
        let mut spans = Vec::new();
        collect_spans(self.sheet, slice::from_ref(node), style, &mut spans);
        spans
            .iter()
            .map(|span| span.style.font().measure(span.text, span.style.font_size))
            .sum()
    }

    fn paragraph(&mut self, spans: &[Span], style: TextStyle, indent: f32) {
        let left = self.content_left() + indent;
        let available = (self.content_right() - left).max(1.0);

        for line in wrap(spans, available) {
            self.place_line(&line, style, left);
        }
    }

    fn next_page(&mut self) {
        self.cursor.page += 1;
        if self.cursor.page == self.pages.len() {
            self.pages.push(Page::default());
        }
        self.cursor.top = self.content_top();
    }

    fn place_line(&mut self, line: &Line, style: TextStyle, left: f32) {
        let item_styles = line.items.iter().filter_map(|i| i.style);
        let size = item_styles
            .clone()
            .map(|s| s.font_size)
            .fold(style.font_size, f32::max);
        let height = item_styles
            .map(|s| s.line_height())
            .fold(style.line_height(), f32::max);

        if self.cursor.top + height > self.content_bottom()
            && self.cursor.top > self.content_top() + f32::EPSILON
        {
            self.next_page();
        }

        let page_height = self.layout.page_height;
        let right = self.content_right();
        let top = self.cursor.top;
        let mut ops = Vec::new();

        for deco in &self.decorations {
            if let Some(color) = deco.background {
                ops.push(DrawOp::Rect {
                    x: deco.x,
                    y: page_height - (top + height),
                    width: right - deco.x,
                    height,
                    color,
                });
            }
            if let Some((width, color)) = deco.border {
                let x = deco.x + width / 2.0;
                ops.push(DrawOp::Line {
                    from: (x, page_height - top),
                    to: (x, page_height - (top + height)),
                    width,
                    color,
                });
            }
        }

        let baseline = page_height - (top + (height - size) / 2.0 + size * 0.8);
        let mut x = left;
        for item in &line.items {
            let Some(item_style) = item.style else {
                continue;
            };
            if !item.text.is_empty() {
                ops.push(DrawOp::Text {
                    x,
                    y: baseline,
                    font: item_style.font(),
                    size: item_style.font_size,
                    color: item_style.color,
                    text: item.text.clone(),
                });
                if item_style.underline {
                    let y = baseline - item_style.font_size * 0.12;
                    ops.push(DrawOp::Line {
                        from: (x, y),
                        to: (x + item.width, y),
                        width: (item_style.font_size * 0.06).max(0.5),
                        color: item_style.color,
                    });
                }
            }
            x += item.width;
        }

        self.pages[self.cursor.page].ops.extend(ops);
        self.cursor.top += height;
    }
}

/// Flatten nested texts into styled spans
fn collect_spans<'t>(
    sheet: &StyleSheet,
    children: &'t [PdfNode],
    style: TextStyle,
    out: &mut Vec<Span<'t>>,
) {
    for child in children {
        match child {
            PdfNode::Literal(text) => out.push(Span {
                text: text.as_str(),
                style,
            }),
            PdfNode::Text { styles, children } | PdfNode::View { styles, children } => {
                let nested = styles
                    .iter()
                    .filter_map(|name| sheet.get(*name))
                    .fold(style, |acc, s| acc.apply(s));
                collect_spans(sheet, children, nested, out);
            }
        }
    }
}

/// Split text into newline, whitespace and word tokens
fn tokens(text: &str) -> Vec<&str> {
    let mut out = Vec::new();
    let mut start = 0;
    let mut kind: Option<u8> = None;

    for (i, c) in text.char_indices() {
        let k = if c == '\n' {
            0
        } else if c.is_whitespace() {
            1
        } else {
            2
        };
        // Newlines are always tokens of their own
        if kind != Some(k) || k == 0 {
            if i > start {
                out.push(&text[start..i]);
            }
            start = i;
            kind = Some(k);
        }
    }
    if start < text.len() {
        out.push(&text[start..]);
    }
    out
}

/// Greedy line breaking. Always yields at least one line.
fn wrap(spans: &[Span], available: f32) -> Vec<Line> {
    let mut lines = Vec::new();
    let mut current = Line::default();

    for span in spans {
        let font = span.style.font();
        let mono = span.style.family == FontFamily::Mono;

        for token in tokens(span.text) {
            if token == "\n" {
                lines.push(mem::take(&mut current).trimmed());
                continue;
            }

            if token.chars().all(char::is_whitespace) {
                if current.is_empty() && !mono {
                    continue;
                }
                let token = if mono { token } else { " " };
                current.push(token, span.style);
                continue;
            }

            let width = font.measure(token, span.style.font_size);
            if current.width + width > available && !current.is_empty() {
                lines.push(mem::take(&mut current).trimmed());
            }

            if width <= available {
                current.push(token, span.style);
                continue;
            }

            // Overlong word: hard split
            let mut buf = [0u8; 4];
            for ch in token.chars() {
                let advance = font.advance(ch, span.style.font_size);
                if current.width + advance > available && !current.is_empty() {
                    lines.push(mem::take(&mut current).trimmed());
                }
                current.push(ch.encode_utf8(&mut buf), span.style);
            }
        }
    }

    lines.push(current.trimmed());
    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    fn texts(pages: &[Page]) -> Vec<String> {
        pages
            .iter()
            .flat_map(|p| p.ops.iter())
            .filter_map(|op| match op {
                DrawOp::Text { text, .. } => Some(text.clone()),
                _ => None,
            })
            .collect()
    }

    fn paragraph(text: &str) -> PdfNode {
        PdfNode::text(vec![StyleName::Paragraph], vec![PdfNode::literal(text)])
    }

    #[test]
    fn test_tokens() {
        assert_eq!(tokens("a  b\n\nc"), vec!["a", "  ", "b", "\n", "\n", "c"]);
        assert!(tokens("").is_empty());
    }

    #[test]
    fn test_wrap_breaks_lines() {
        let style = TextStyle::base();
        let spans = [Span {
            text: "aaaa bbbb cccc",
            style,
        }];
        let width = Font::Helvetica.measure("aaaa bbbb", 12.0) + 1.0;
        let lines = wrap(&spans, width);
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0].items[0].text, "aaaa bbbb");
        assert_eq!(lines[1].items[0].text, "cccc");
    }

    #[test]
    fn test_wrap_hard_split_and_empty() {
        let style = TextStyle::base();
        let spans = [Span {
            text: "abcdefghij",
            style,
        }];
        let lines = wrap(&spans, Font::Helvetica.measure("abc", 12.0) + 0.1);
        assert!(lines.len() >= 3);

        assert_eq!(wrap(&[], 100.0).len(), 1);
    }

    #[test]
    fn test_title_comes_first() {
        let doc = PdfDocument::new("Report", vec![paragraph("Body")]);
        let pages = layout_document(&doc, &PdfLayout::default());
        assert_eq!(pages.len(), 1);
        assert_eq!(texts(&pages), vec!["Report", "Body"]);
    }

    #[test]
    fn test_pagination() {
        let body = (0..200).map(|i| paragraph(&format!("Line {}", i))).collect();
        let doc = PdfDocument::new("Long", body);
        let pages = layout_document(&doc, &PdfLayout::default());
        assert!(pages.len() > 1);
        assert_eq!(texts(&pages).len(), 201);

        // Every text stays inside the vertical margins
        for op in pages.iter().flat_map(|p| p.ops.iter()) {
            if let DrawOp::Text { y, .. } = op {
                assert!(*y > 40.0 && *y < 841.89 - 40.0);
            }
        }
    }

    #[test]
    fn test_blockquote_border_and_underline() {
        let quote = PdfNode::view(
            vec![StyleName::Blockquote],
            vec![PdfNode::text(
                vec![],
                vec![PdfNode::text(
                    vec![StyleName::Underline],
                    vec![PdfNode::literal("quoted")],
                )],
            )],
        );
        let doc = PdfDocument::new("T", vec![quote]);
        let pages = layout_document(&doc, &PdfLayout::default());
        let lines = pages[0]
            .ops
            .iter()
            .filter(|op| matches!(op, DrawOp::Line { .. }))
            .count();
        // left border plus underline
        assert_eq!(lines, 2);
    }

    #[test]
    fn test_wide_markers_push_content_right() {
        let items = (1..=120)
            .map(|i| {
                PdfNode::view(
                    vec![StyleName::ListItem],
                    vec![
                        PdfNode::text(
                            vec![StyleName::ListMarker],
                            vec![PdfNode::literal(format!("{}. ", i))],
                        ),
                        PdfNode::view(
                            vec![StyleName::ListContent],
                            vec![paragraph(&format!("item {}", i))],
                        ),
                    ],
                )
            })
            .collect();
        let doc = PdfDocument::new("T", vec![PdfNode::view(vec![StyleName::List], items)]);
        let pages = layout_document(&doc, &PdfLayout::default());
        let ops: Vec<&DrawOp> = pages.iter().flat_map(|p| p.ops.iter()).collect();

        let (marker_x, marker_width) = ops
            .iter()
            .find_map(|op| match op {
                DrawOp::Text {
                    x, font, size, text, ..
                } if text == "100." => Some((*x, font.measure(text, *size))),
                _ => None,
            })
            .unwrap();
        let content_x: Vec<f32> = ops
            .iter()
            .filter_map(|op| match op {
                DrawOp::Text { x, text, .. } if text.starts_with("item") => Some(*x),
                _ => None,
            })
            .collect();

        assert_eq!(content_x.len(), 120);
        assert!(content_x.iter().all(|x| *x == content_x[0]));
        assert!(content_x[0] > marker_x + marker_width);
    }

    #[test]
    fn test_measure_uses_font_metrics() {
        // "Wi" = 944 + 222 units
        assert!((Font::Helvetica.measure("Wi", 10.0) - 11.66).abs() < 1e-3);
        assert!((Font::HelveticaBoldOblique.measure("Wi", 10.0) - 12.22).abs() < 1e-3);
        assert_eq!(Font::Courier.measure("Wi", 10.0), 12.0);
    }

    #[test]
    fn test_list_row_shares_baseline() {
        let item = PdfNode::view(
            vec![StyleName::ListItem],
            vec![
                PdfNode::text(vec![StyleName::ListMarker], vec![PdfNode::literal("1. ")]),
                PdfNode::view(vec![StyleName::ListContent], vec![paragraph("first")]),
            ],
        );
        let doc = PdfDocument::new("T", vec![PdfNode::view(vec![StyleName::List], vec![item])]);
        let pages = layout_document(&doc, &PdfLayout::default());

        let positions: Vec<(f32, f32)> = pages[0]
            .ops
            .iter()
            .filter_map(|op| match op {
                DrawOp::Text { x, y, text, .. } if text != "T" => Some((*x, *y)),
                _ => None,
            })
            .collect();
        assert_eq!(positions.len(), 2);
        assert_eq!(positions[0].1, positions[1].1);
        assert!(positions[1].0 > positions[0].0);
    }
}
