//! # pressroom
//!
//! Export rich-text HTML to PDF and DOCX.
//!
//! Both converters walk the same DOM tree. Recognized blocks (headings,
//! paragraphs, lists, blockquotes, preformatted code) are mapped to the
//! output format's native units; every other element is a transparent
//! container.
//!
//! ```text
//!                          ┌─▶ PdfEmitter  ─▶ PdfNode tree  ─▶ render_pdf   ─▶ PDF bytes
//! HTML ─▶ Node tree ─▶ walk┤
//!                          └─▶ DocxEmitter ─▶ Paragraph list ─▶ package_docx ─▶ DOCX bytes
//! ```
//!
//! ## Example (Node-based)
//!
//! ```rust
//! use pressroom::{ExportService, Node};
//! use pressroom_core::{Margins, ParagraphKind};
//!
//! let service = ExportService::new();
//!
//! let root = Node::element("div")
//!     .with_child(Node::element("h1").with_child(Node::text("Intro")));
//!
//! let doc = service.docx_document("Report", &root, Margins::default());
//! assert_eq!(doc.paragraphs[0].kind, ParagraphKind::Title);
//! assert_eq!(doc.paragraphs[1].kind, ParagraphKind::Heading(1));
//! ```
//!
//! ## Example (HTML string)
//!
//! ```rust
//! use pressroom::ExportService;
//!
//! let service = ExportService::new();
//! let doc = service
//!     .pdf_document_from_html("Report", "<p>Hello <strong>world</strong></p>")
//!     .unwrap();
//! let bytes = service.render_pdf(&doc).unwrap();
//! assert!(bytes.starts_with(b"%PDF-"));
//! ```

pub mod docx;
#[cfg(feature = "html")]
pub mod html;
pub mod inline;
pub mod node;
pub mod pdf;
mod service;
mod utilities;
pub mod walker;

#[cfg(feature = "html")]
pub use html::parse_html;
pub use node::{Node, NodeType};
pub use pdf::PdfLayout;
pub use service::{
    DocxExportRequest, ExportOptions, ExportService, PageSize, PdfExportRequest,
};
pub use utilities::*;

/// Error type for export operations
#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("PDF rendering error: {0}")]
    Pdf(String),

    #[error("DOCX packaging error: {0}")]
    Docx(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Export task failed: {0}")]
    Task(String),
}

pub type Result<T> = std::result::Result<T, ExportError>;
