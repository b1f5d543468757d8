//! WordprocessingML packaging.
//!
//! Hands a [`DocxDocument`] to docx-rs, which writes the OPC parts and zips
//! them.

use std::io::Cursor;

use docx_rs::{
    BorderType, BreakType, Docx, LineSpacing, PageMargin, ParagraphBorder,
    ParagraphBorderPosition, ParagraphBorders, RunFonts, Style, StyleType,
};
use pressroom_core::{DocxDocument, Paragraph, Run};

use crate::{ExportError, Result};

const MONO_FONT: &str = "Courier New";

/// Package a document as DOCX bytes
pub fn package_docx(doc: &DocxDocument) -> Result<Vec<u8>> {
    tracing::debug!(
        title = %doc.title,
        paragraphs = doc.paragraphs.len(),
        "packaging docx"
    );

    let geometry = &doc.geometry;
    let margins = &geometry.margins;

    let mut docx = initialize_styles(Docx::new())
        .page_size(geometry.width, geometry.height)
        .page_margin(
            PageMargin::new()
                .top(signed(margins.top))
                .right(signed(margins.right))
                .bottom(signed(margins.bottom))
                .left(signed(margins.left)),
        );

    for paragraph in &doc.paragraphs {
        docx = docx.add_paragraph(build_paragraph(paragraph));
    }

    let mut buffer = Vec::new();
    docx.build()
        .pack(&mut Cursor::new(&mut buffer))
        .map_err(|e| ExportError::Docx(format!("failed to pack DOCX: {e}")))?;

    Ok(buffer)
}

/// Drop characters XML 1.0 cannot carry; tab, newline and carriage return
/// survive
fn strip_invalid_xml_chars(text: &str) -> String {
    text.chars()
        .filter(|&c| {
            matches!(c, '\t' | '\n' | '\r')
                || (c >= '\u{20}' && !matches!(c, '\u{FFFE}' | '\u{FFFF}'))
        })
        .collect()
}

// Twips in the model never come close to i32::MAX
fn signed(twips: u32) -> i32 {
    i32::try_from(twips).unwrap_or(i32::MAX)
}

fn build_paragraph(paragraph: &Paragraph) -> docx_rs::Paragraph {
    let mut out = docx_rs::Paragraph::new().line_spacing(
        LineSpacing::new()
            .before(paragraph.spacing.before)
            .after(paragraph.spacing.after),
    );

    if let Some(style) = paragraph.kind.style_id() {
        out = out.style(style);
    }
    if let Some(indent) = paragraph.indent {
        out = out.indent(Some(signed(indent.left)), None, None, None);
    }
    if let Some(border) = &paragraph.border {
        out = out.set_borders(
            ParagraphBorders::with_empty().set(
                ParagraphBorder::new(ParagraphBorderPosition::Left)
                    .val(BorderType::Single)
                    .size(border.size as usize)
                    .space(border.space as usize)
                    .color(border.color.as_str()),
            ),
        );
    }

    for run in &paragraph.runs {
        out = out.add_run(build_run(run));
    }
    out
}

fn build_run(run: &Run) -> docx_rs::Run {
    let mut out = docx_rs::Run::new();

    let marks = run.marks;
    if marks.bold {
        out = out.bold();
    }
    if marks.italic {
        out = out.italic();
    }
    if marks.underline {
        out = out.underline("single");
    }
    if marks.code {
        out = out.fonts(mono_fonts());
    }

    let text = strip_invalid_xml_chars(&run.text);
    for (i, line) in text.split('\n').enumerate() {
        if i > 0 {
            out = out.add_break(BreakType::TextWrapping);
        }
        if i == 0 || !line.is_empty() {
            out = out.add_text(line);
        }
    }
    out
}

fn mono_fonts() -> RunFonts {
    RunFonts::new()
        .ascii(MONO_FONT)
        .hi_ansi(MONO_FONT)
        .east_asia(MONO_FONT)
        .cs(MONO_FONT)
}

fn heading_style(id: &str, name: &str, size: usize) -> Style {
    Style::new(id, StyleType::Paragraph)
        .name(name)
        .size(size)
        .bold()
}

/// Paragraph styles referenced by [`ParagraphKind::style_id`]; sizes are in
/// half-points
///
/// [`ParagraphKind::style_id`]: pressroom_core::ParagraphKind::style_id
fn initialize_styles(docx: Docx) -> Docx {
    let title = heading_style("Title", "Title", 48);
    let heading1 = heading_style("Heading1", "heading 1", 40);
    let heading2 = heading_style("Heading2", "heading 2", 36);
    let heading3 = heading_style("Heading3", "heading 3", 32);
    let heading4 = heading_style("Heading4", "heading 4", 28);

    let list = Style::new("ListParagraph", StyleType::Paragraph).name("List Paragraph");

    let quote = Style::new("Quote", StyleType::Paragraph)
        .name("Quote")
        .italic()
        .color("555555");

    let code = Style::new("Code", StyleType::Paragraph)
        .name("Code")
        .fonts(mono_fonts())
        .size(20);

    docx.add_style(title)
        .add_style(heading1)
        .add_style(heading2)
        .add_style(heading3)
        .add_style(heading4)
        .add_style(list)
        .add_style(quote)
        .add_style(code)
}
