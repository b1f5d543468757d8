//! pressroom-core - output document model
//!
//! This crate holds the intermediate structures produced by the `pressroom`
//! converters before they are handed to a renderer or packager:
//!
//! ```text
//!                 ┌──────────────────────────┐
//!            ┌──▶ │ PdfNode tree + StyleSheet │ ──▶ PDF bytes
//! Node tree ─┤    └──────────────────────────┘
//!            └──▶ ┌──────────────────────────┐
//!                 │ Paragraph list + geometry │ ──▶ DOCX bytes
//!                 └──────────────────────────┘
//! ```
//!
//! # Example
//!
//! ```rust
//! use pressroom_core::{DocxDocument, Margins, Paragraph, Run};
//!
//! let doc = DocxDocument::assemble(
//!     "Report",
//!     vec![Paragraph::body(vec![Run::plain("Hello")])],
//!     Margins::uniform(72.0),
//! );
//!
//! assert_eq!(doc.paragraphs.len(), 2);
//! assert_eq!(doc.geometry.margins.top, 1440);
//! ```

mod docx;
mod pdf;
mod run;

pub use docx::{
    Border, DocxDocument, Indent, Margins, PageGeometry, PageMarginsTwips, Paragraph,
    ParagraphKind, Spacing, TWIPS_PER_POINT,
};
pub use pdf::{Color, FontFamily, PdfDocument, PdfNode, Style, StyleName, StyleSheet};
pub use run::{runs_text, Marks, Run};
