//! PDF serialization of laid out pages with lopdf.

use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Dictionary, Document, Object, Stream, StringFormat};
use pressroom_core::{Color, PdfDocument};

use super::layout::{layout_document, DrawOp, Font, Page, PdfLayout};
use crate::{ExportError, Result};

/// Lay out and serialize a PDF document.
///
/// The output contains no timestamps or random identifiers, so rendering the
/// same document twice gives identical bytes.
pub fn render_pdf(doc: &PdfDocument, layout: &PdfLayout) -> Result<Vec<u8>> {
    let pages = layout_document(doc, layout);
    tracing::debug!(title = %doc.title, pages = pages.len(), "rendering pdf");
    write_pdf(&doc.title, &pages, layout)
}

fn write_pdf(title: &str, pages: &[Page], layout: &PdfLayout) -> Result<Vec<u8>> {
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();

    let mut fonts = Dictionary::new();
    for font in Font::ALL {
        let font_id = doc.add_object(dictionary! {
            "Type" => "Font",
            "Subtype" => "Type1",
            "BaseFont" => font.base_font(),
            "Encoding" => "WinAnsiEncoding",
        });
        fonts.set(font.resource_name(), font_id);
    }
    let resources_id = doc.add_object(dictionary! {
        "Font" => fonts,
    });

    let mut replaced = 0usize;
    let mut kids: Vec<Object> = Vec::with_capacity(pages.len());
    for page in pages {
        let content = Content {
            operations: page_operations(page, &mut replaced),
        };
        let encoded = content.encode().map_err(|e| ExportError::Pdf(e.to_string()))?;
        let content_id = doc.add_object(Stream::new(dictionary! {}, encoded));
        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "Contents" => content_id,
        });
        kids.push(page_id.into());
    }
    if replaced > 0 {
        tracing::warn!(replaced, "characters outside WinAnsiEncoding replaced with '?'");
    }

    let pages_dict = dictionary! {
        "Type" => "Pages",
        "Count" => kids.len() as i64,
        "Kids" => kids,
        "Resources" => resources_id,
        "MediaBox" => vec![0.into(), 0.into(), layout.page_width.into(), layout.page_height.into()],
    };
    doc.objects.insert(pages_id, Object::Dictionary(pages_dict));

    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    let (encoded_title, _) = encode_win_ansi(title);
    let info_id = doc.add_object(dictionary! {
        "Title" => Object::String(encoded_title, StringFormat::Literal),
        "Producer" => Object::string_literal("pressroom"),
    });
    doc.trailer.set("Root", catalog_id);
    doc.trailer.set("Info", info_id);
    doc.compress();

    let mut bytes = Vec::new();
    doc.save_to(&mut bytes)?;
    Ok(bytes)
}

fn page_operations(page: &Page, replaced: &mut usize) -> Vec<Operation> {
    let mut ops = Vec::new();

    for op in &page.ops {
        match op {
            DrawOp::Rect {
                x,
                y,
                width,
                height,
                color,
            } => {
                ops.push(Operation::new("q", vec![]));
                ops.push(fill_color(*color));
                ops.push(Operation::new(
                    "re",
                    vec![(*x).into(), (*y).into(), (*width).into(), (*height).into()],
                ));
                ops.push(Operation::new("f", vec![]));
                ops.push(Operation::new("Q", vec![]));
            }
            DrawOp::Line {
                from,
                to,
                width,
                color,
            } => {
                let (r, g, b) = color.to_unit();
                ops.push(Operation::new("q", vec![]));
                ops.push(Operation::new("RG", vec![r.into(), g.into(), b.into()]));
                ops.push(Operation::new("w", vec![(*width).into()]));
                ops.push(Operation::new("m", vec![from.0.into(), from.1.into()]));
                ops.push(Operation::new("l", vec![to.0.into(), to.1.into()]));
                ops.push(Operation::new("S", vec![]));
                ops.push(Operation::new("Q", vec![]));
            }
            DrawOp::Text {
                x,
                y,
                font,
                size,
                color,
                text,
            } => {
                let (bytes, missing) = encode_win_ansi(text);
                *replaced += missing;
                ops.push(Operation::new("BT", vec![]));
                ops.push(fill_color(*color));
                ops.push(Operation::new(
                    "Tf",
                    vec![font.resource_name().into(), (*size).into()],
                ));
                ops.push(Operation::new("Td", vec![(*x).into(), (*y).into()]));
                ops.push(Operation::new(
                    "Tj",
                    vec![Object::String(bytes, StringFormat::Literal)],
                ));
                ops.push(Operation::new("ET", vec![]));
            }
        }
    }

    ops
}

fn fill_color(color: Color) -> Operation {
    let (r, g, b) = color.to_unit();
    Operation::new("rg", vec![r.into(), g.into(), b.into()])
}

/// Encode text for the standard fonts' WinAnsiEncoding.
///
/// Returns the bytes and the number of characters that had no mapping and
/// were replaced with `?`.
fn encode_win_ansi(text: &str) -> (Vec<u8>, usize) {
    let mut bytes = Vec::with_capacity(text.len());
    let mut missing = 0;

    for ch in text.chars() {
        let byte = match ch {
            '\u{20}'..='\u{7E}' | '\u{A0}'..='\u{FF}' => Some(ch as u8),
            '€' => Some(0x80),
            '‚' => Some(0x82),
            '„' => Some(0x84),
            '…' => Some(0x85),
            '‘' => Some(0x91),
            '’' => Some(0x92),
            '“' => Some(0x93),
            '”' => Some(0x94),
            '•' => Some(0x95),
            '–' => Some(0x96),
            '—' => Some(0x97),
            '™' => Some(0x99),
            '\t' => Some(b' '),
            _ => None,
        };
        match byte {
            Some(b) => bytes.push(b),
            None => {
                missing += 1;
                bytes.push(b'?');
            }
        }
    }

    (bytes, missing)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pressroom_core::{PdfNode, StyleName};

    fn sample() -> PdfDocument {
        PdfDocument::new(
            "Report",
            vec![PdfNode::text(
                vec![StyleName::Paragraph],
                vec![
                    PdfNode::literal("Hello "),
                    PdfNode::text(vec![StyleName::Bold], vec![PdfNode::literal("world")]),
                ],
            )],
        )
    }

    #[test]
    fn test_render_produces_pdf() {
        let bytes = render_pdf(&sample(), &PdfLayout::default()).unwrap();
        assert!(bytes.starts_with(b"%PDF-1.5"));

        let parsed = Document::load_mem(&bytes).unwrap();
        assert_eq!(parsed.get_pages().len(), 1);
    }

    #[test]
    fn test_render_is_reproducible() {
        let layout = PdfLayout::default();
        let a = render_pdf(&sample(), &layout).unwrap();
        let b = render_pdf(&sample(), &layout).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_encode_win_ansi() {
        assert_eq!(encode_win_ansi("Aé• "), (vec![b'A', 0xE9, 0x95, b' '], 0));
        assert_eq!(encode_win_ansi("日本"), (b"??".to_vec(), 2));
    }
}
