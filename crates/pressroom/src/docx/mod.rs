//! HTML to DOCX paragraph conversion.

mod package;

pub use package::package_docx;

use pressroom_core::{DocxDocument, Margins, Marks, Paragraph};

use crate::inline::resolve_inlines;
use crate::node::Node;
use crate::service::ExportOptions;
use crate::utilities::flattened_text;
use crate::walker::{list_items, walk, BlockEmitter, HeadingLevel, ListKind};

/// Build the DOCX paragraph sequence for a document
pub fn docx_document(
    title: &str,
    root: &Node,
    margins: Margins,
    options: &ExportOptions,
) -> DocxDocument {
    let body = walk(&DocxEmitter::new(options), root);
    let (width, height) = options.page_size.twips();
    DocxDocument::assemble(title, body, margins).with_page_size(width, height)
}

/// Maps blocks to a flat paragraph list.
///
/// Headings, list items and blockquotes carry their flattened text; only
/// body paragraphs keep inline formatting.
pub struct DocxEmitter<'a> {
    options: &'a ExportOptions,
}

impl<'a> DocxEmitter<'a> {
    pub fn new(options: &'a ExportOptions) -> Self {
        Self { options }
    }

    fn text_of(&self, node: &Node) -> String {
        flattened_text(node, self.options.collapse_whitespace)
    }
}

impl BlockEmitter for DocxEmitter<'_> {
    type Unit = Paragraph;

    fn heading(&self, level: HeadingLevel, node: &Node) -> Vec<Paragraph> {
        vec![Paragraph::heading(level.level(), self.text_of(node))]
    }

    fn paragraph(&self, node: &Node) -> Vec<Paragraph> {
        let runs = resolve_inlines(node, Marks::NONE, self.options.collapse_whitespace);
        vec![Paragraph::body(runs)]
    }

    fn list(&self, kind: ListKind, node: &Node) -> Vec<Paragraph> {
        let items: Vec<Paragraph> = list_items(node)
            .enumerate()
            .map(|(index, item)| {
                let marker = kind.marker(index, self.options.bullet_marker);
                Paragraph::list_item(&marker, &self.text_of(item))
            })
            .collect();

        // A list without items still occupies one (empty) paragraph.
        if items.is_empty() {
            return vec![Paragraph::list_item("", "")];
        }
        items
    }

    fn blockquote(&self, node: &Node) -> Vec<Paragraph> {
        vec![Paragraph::blockquote(self.text_of(node))]
    }

    fn code_block(&self, node: &Node) -> Vec<Paragraph> {
        vec![Paragraph::code_block(&node.text_content())]
    }
}
