#![deny(clippy::all)]

use napi::bindgen_prelude::Buffer;
use napi_derive::napi;

use pressroom::{ExportOptions, ExportService as RustExportService, PageSize};
use pressroom_core::Margins;

/// Page margins in points
#[napi(object)]
pub struct PageMargins {
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
    pub left: f64,
}

impl From<PageMargins> for Margins {
    fn from(m: PageMargins) -> Self {
        Margins::new(m.top, m.right, m.bottom, m.left)
    }
}

#[napi(object)]
pub struct Options {
    pub bullet_marker: Option<String>,
    pub page_size: Option<String>,
    pub pdf_margins: Option<PageMargins>,
    pub collapse_whitespace: Option<bool>,
}

impl From<Options> for ExportOptions {
    fn from(opts: Options) -> Self {
        let mut result = ExportOptions::default();

        if let Some(marker) = opts.bullet_marker {
            if let Some(c) = marker.chars().next() {
                result.bullet_marker = c;
            }
        }

        if let Some(size) = opts.page_size {
            result.page_size = match size.to_lowercase().as_str() {
                "letter" => PageSize::Letter,
                _ => PageSize::A4,
            };
        }

        if let Some(margins) = opts.pdf_margins {
            result.pdf_margins = margins.into();
        }

        if let Some(collapse) = opts.collapse_whitespace {
            result.collapse_whitespace = collapse;
        }

        result
    }
}

#[napi]
pub struct ExportService {
    inner: RustExportService,
}

#[napi]
impl ExportService {
    #[napi(constructor)]
    pub fn new(options: Option<Options>) -> Self {
        let inner = match options {
            Some(opts) => RustExportService::with_options(opts.into()),
            None => RustExportService::new(),
        };
        Self { inner }
    }

    /// Export HTML to PDF bytes; `null` if HTML parsing is unavailable
    #[napi]
    pub fn export_pdf(&self, title: String, html_content: String) -> napi::Result<Option<Buffer>> {
        let Some(doc) = self.inner.pdf_document_from_html(&title, &html_content) else {
            return Ok(None);
        };

        self.inner
            .render_pdf(&doc)
            .map(|bytes| Some(bytes.into()))
            .map_err(|e| napi::Error::from_reason(e.to_string()))
    }

    /// Export HTML to DOCX bytes; margins are in points
    #[napi]
    pub fn export_docx(
        &self,
        title: String,
        html_content: String,
        margins: PageMargins,
    ) -> napi::Result<Option<Buffer>> {
        let Some(doc) = self
            .inner
            .docx_document_from_html(&title, &html_content, margins.into())
        else {
            return Ok(None);
        };

        self.inner
            .package_docx(&doc)
            .map(|bytes| Some(bytes.into()))
            .map_err(|e| napi::Error::from_reason(e.to_string()))
    }
}
