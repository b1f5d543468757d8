//! ExportService - the main entry point for HTML to PDF/DOCX export.

use pressroom_core::{DocxDocument, Margins, PdfDocument};

use crate::docx::{docx_document, package_docx};
use crate::node::Node;
use crate::pdf::{pdf_document, render_pdf, PdfLayout};
use crate::{ExportError, Result};

/// Page size options
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PageSize {
    /// ISO A4 portrait
    #[default]
    A4,
    /// US Letter portrait
    Letter,
}

impl PageSize {
    /// Width and height in points
    pub fn points(self) -> (f32, f32) {
        match self {
            PageSize::A4 => (595.28, 841.89),
            PageSize::Letter => (612.0, 792.0),
        }
    }

    /// Width and height in twips
    pub fn twips(self) -> (u32, u32) {
        match self {
            PageSize::A4 => (11906, 16838),
            PageSize::Letter => (12240, 15840),
        }
    }
}

/// Options for ExportService
#[derive(Debug, Clone)]
pub struct ExportOptions {
    /// Bullet glyph for unordered list items
    pub bullet_marker: char,

    /// Page size of both output formats
    pub page_size: PageSize,

    /// Page margins of the PDF output, in points
    pub pdf_margins: Margins,

    /// Collapse whitespace runs in text like a browser does
    pub collapse_whitespace: bool,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            bullet_marker: '•',
            page_size: PageSize::A4,
            pdf_margins: Margins::uniform(40.0),
            collapse_whitespace: true,
        }
    }
}

/// Input of a PDF export
#[derive(Debug, Clone, PartialEq)]
pub struct PdfExportRequest {
    pub title: String,
    pub html_content: String,
}

/// Input of a DOCX export; margins are in points
#[derive(Debug, Clone, PartialEq)]
pub struct DocxExportRequest {
    pub title: String,
    pub html_content: String,
    pub margins: Margins,
}

/// The main service for exporting HTML documents
#[derive(Debug, Clone, Default)]
pub struct ExportService {
    options: ExportOptions,
}

impl ExportService {
    /// Create a new ExportService with default options
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an ExportService with custom options
    pub fn with_options(options: ExportOptions) -> Self {
        Self { options }
    }

    /// Get the current options
    pub fn options(&self) -> &ExportOptions {
        &self.options
    }

    /// Get mutable access to options
    pub fn options_mut(&mut self) -> &mut ExportOptions {
        &mut self.options
    }

    /// Page layout used for PDF rendering
    pub fn pdf_layout(&self) -> PdfLayout {
        let (width, height) = self.options.page_size.points();
        PdfLayout::new(width, height, self.options.pdf_margins)
    }

    /// Build the PDF view tree from a node tree
    pub fn pdf_document(&self, title: &str, root: &Node) -> PdfDocument {
        pdf_document(title, root, &self.options)
    }

    /// Build the DOCX paragraph list from a node tree
    pub fn docx_document(&self, title: &str, root: &Node, margins: Margins) -> DocxDocument {
        docx_document(title, root, margins, &self.options)
    }

    /// Build the PDF view tree from HTML; `None` if HTML parsing is
    /// unavailable
    pub fn pdf_document_from_html(&self, title: &str, html: &str) -> Option<PdfDocument> {
        let root = parse_document(html)?;
        Some(self.pdf_document(title, &root))
    }

    /// Build the DOCX paragraph list from HTML; `None` if HTML parsing is
    /// unavailable
    pub fn docx_document_from_html(
        &self,
        title: &str,
        html: &str,
        margins: Margins,
    ) -> Option<DocxDocument> {
        let root = parse_document(html)?;
        Some(self.docx_document(title, &root, margins))
    }

    /// Render a PDF document to bytes
    pub fn render_pdf(&self, doc: &PdfDocument) -> Result<Vec<u8>> {
        render_pdf(doc, &self.pdf_layout())
    }

    /// Package a DOCX document to bytes
    pub fn package_docx(&self, doc: &DocxDocument) -> Result<Vec<u8>> {
        package_docx(doc)
    }

    /// Export HTML to PDF bytes.
    ///
    /// Rendering runs on tokio's blocking pool; a runtime must be active.
    /// Resolves to `None` when HTML parsing is unavailable.
    pub async fn export_pdf(&self, request: PdfExportRequest) -> Result<Option<Vec<u8>>> {
        let Some(doc) = self.pdf_document_from_html(&request.title, &request.html_content) else {
            return Ok(None);
        };
        tracing::debug!(title = %request.title, blocks = doc.body().len(), "exporting pdf");

        let layout = self.pdf_layout();
        let bytes = tokio::task::spawn_blocking(move || render_pdf(&doc, &layout))
            .await
            .map_err(|e| ExportError::Task(e.to_string()))??;
        Ok(Some(bytes))
    }

    /// Export HTML to DOCX bytes.
    ///
    /// Packaging runs on tokio's blocking pool; a runtime must be active.
    /// Resolves to `None` when HTML parsing is unavailable.
    pub async fn export_docx(&self, request: DocxExportRequest) -> Result<Option<Vec<u8>>> {
        let Some(doc) =
            self.docx_document_from_html(&request.title, &request.html_content, request.margins)
        else {
            return Ok(None);
        };
        tracing::debug!(
            title = %request.title,
            paragraphs = doc.paragraphs.len(),
            "exporting docx"
        );

        let bytes = tokio::task::spawn_blocking(move || package_docx(&doc))
            .await
            .map_err(|e| ExportError::Task(e.to_string()))??;
        Ok(Some(bytes))
    }
}

#[cfg(feature = "html")]
fn parse_document(html: &str) -> Option<Node> {
    Some(crate::html::parse_html(html))
}

#[cfg(not(feature = "html"))]
fn parse_document(_html: &str) -> Option<Node> {
    tracing::warn!("HTML parsing unavailable: pressroom built without the `html` feature");
    None
}


#[cfg(all(test, not(feature = "html")))]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_exports_without_parser_resolve_to_none() {
        let service = ExportService::new();

        let pdf = service
            .export_pdf(PdfExportRequest {
                title: "T".to_string(),
                html_content: "<p>x</p>".to_string(),
            })
            .await
            .unwrap();
        assert!(pdf.is_none());

        let docx = service
            .export_docx(DocxExportRequest {
                title: "T".to_string(),
                html_content: "<p>x</p>".to_string(),
                margins: Margins::default(),
            })
            .await
            .unwrap();
        assert!(docx.is_none());
    }

    #[test]
    fn test_node_stages_work_without_parser() {
        let service = ExportService::new();
        let root = Node::element("p").with_child(Node::text("x"));

        let docx = service.docx_document("T", &root, Margins::default());
        assert_eq!(docx.paragraphs.len(), 2);

        let pdf = service.pdf_document("T", &root);
        assert!(service.render_pdf(&pdf).unwrap().starts_with(b"%PDF-"));
    }
}
