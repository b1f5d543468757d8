//! HTML to PDF view tree conversion.

mod layout;
mod metrics;
mod render;

pub use layout::PdfLayout;
pub use render::render_pdf;

use pressroom_core::{Marks, PdfDocument, PdfNode, Run, StyleName};

use crate::inline::{ensure_run, resolve_inlines, resolve_nodes, trim_block_edges};
use crate::node::Node;
use crate::service::ExportOptions;
use crate::utilities::is_block;
use crate::walker::{list_items, walk, BlockEmitter, BlockKind, HeadingLevel, ListKind};

/// Build the PDF view tree for a document
pub fn pdf_document(title: &str, root: &Node, options: &ExportOptions) -> PdfDocument {
    let body = walk(&PdfEmitter::new(options), root);
    PdfDocument::new(title, body)
}

/// Maps blocks to styled views and texts.
///
/// Lists and blockquotes render their children recursively, so nested
/// blocks inside them survive.
pub struct PdfEmitter<'a> {
    options: &'a ExportOptions,
}

impl<'a> PdfEmitter<'a> {
    pub fn new(options: &'a ExportOptions) -> Self {
        Self { options }
    }

    /// Render mixed content: consecutive inline nodes become one text,
    /// recognized blocks are walked and other block wrappers are flowed
    fn flow(&self, node: &Node) -> Vec<PdfNode> {
        let mut out = Vec::new();
        let mut pending: Vec<&Node> = Vec::new();

        for child in node.children() {
            if !child.is_element() || !is_block(child.tag_name()) {
                pending.push(child);
                continue;
            }

            self.flush_inline(&mut pending, &mut out);
            match BlockKind::of(child) {
                BlockKind::Container => out.extend(self.flow(child)),
                _ => out.extend(walk(self, child)),
            }
        }
        self.flush_inline(&mut pending, &mut out);

        out
    }

    fn flush_inline(&self, pending: &mut Vec<&Node>, out: &mut Vec<PdfNode>) {
        if pending.is_empty() {
            return;
        }

        let mut runs = resolve_nodes(
            pending.drain(..),
            Marks::NONE,
            self.options.collapse_whitespace,
        );
        if self.options.collapse_whitespace {
            trim_block_edges(&mut runs);
        }
        if runs.iter().any(|r| !r.text.trim().is_empty()) {
            out.push(PdfNode::text(Vec::new(), runs_to_nodes(runs)));
        }
    }

    fn inline_text(&self, style: StyleName, node: &Node) -> PdfNode {
        let runs = resolve_inlines(node, Marks::NONE, self.options.collapse_whitespace);
        PdfNode::text(vec![style], runs_to_nodes(runs))
    }
}

impl BlockEmitter for PdfEmitter<'_> {
    type Unit = PdfNode;

    fn heading(&self, level: HeadingLevel, node: &Node) -> Vec<PdfNode> {
        let style = match level {
            HeadingLevel::H1 => StyleName::H1,
            HeadingLevel::H2 => StyleName::H2,
            HeadingLevel::H3 => StyleName::H3,
            HeadingLevel::H4 => StyleName::H4,
        };
        vec![self.inline_text(style, node)]
    }

    fn paragraph(&self, node: &Node) -> Vec<PdfNode> {
        vec![self.inline_text(StyleName::Paragraph, node)]
    }

    fn list(&self, kind: ListKind, node: &Node) -> Vec<PdfNode> {
        let items = list_items(node)
            .enumerate()
            .map(|(index, item)| {
                let marker = kind.marker(index, self.options.bullet_marker);
                PdfNode::view(
                    vec![StyleName::ListItem],
                    vec![
                        PdfNode::text(vec![StyleName::ListMarker], vec![PdfNode::literal(marker)]),
                        PdfNode::view(vec![StyleName::ListContent], self.flow(item)),
                    ],
                )
            })
            .collect();

        vec![PdfNode::view(vec![StyleName::List], items)]
    }

    fn blockquote(&self, node: &Node) -> Vec<PdfNode> {
        vec![PdfNode::view(vec![StyleName::Blockquote], self.flow(node))]
    }

    fn code_block(&self, node: &Node) -> Vec<PdfNode> {
        vec![PdfNode::text(
            vec![StyleName::CodeBlock],
            vec![PdfNode::literal(node.text_content())],
        )]
    }
}

/// Map runs to text children; marked runs get a nested styled text
fn runs_to_nodes(runs: Vec<Run>) -> Vec<PdfNode> {
    ensure_run(runs, Marks::NONE)
        .into_iter()
        .map(|run| {
            if run.marks.is_plain() {
                PdfNode::Literal(run.text)
            } else {
                PdfNode::text(mark_styles(run.marks), vec![PdfNode::Literal(run.text)])
            }
        })
        .collect()
}

fn mark_styles(marks: Marks) -> Vec<StyleName> {
    let mut styles = Vec::with_capacity(4);
    if marks.bold {
        styles.push(StyleName::Bold);
    }
    if marks.italic {
        styles.push(StyleName::Italic);
    }
    if marks.underline {
        styles.push(StyleName::Underline);
    }
    if marks.code {
        styles.push(StyleName::Code);
    }
    styles
}

#[cfg(all(test, feature = "html"))]
mod tests {
    use super::*;
    use crate::parse_html;

    fn body(html: &str) -> Vec<PdfNode> {
        let options = ExportOptions::default();
        pdf_document("Doc", &parse_html(html), &options)
            .body()
            .to_vec()
    }

    #[test]
    fn test_single_paragraph() {
        let doc = pdf_document("Doc", &parse_html("<p>Hello</p>"), &ExportOptions::default());
        assert_eq!(doc.root().children().len(), 2);
        assert_eq!(
            doc.body(),
            &[PdfNode::text(vec![StyleName::Paragraph], vec![PdfNode::literal("Hello")])]
        );
    }

    #[test]
    fn test_inline_marks() {
        let nodes = body("<p>Hello <strong><u>world</u></strong></p>");
        assert_eq!(
            nodes[0],
            PdfNode::text(
                vec![StyleName::Paragraph],
                vec![
                    PdfNode::literal("Hello "),
                    PdfNode::text(
                        vec![StyleName::Bold, StyleName::Underline],
                        vec![PdfNode::literal("world")]
                    ),
                ]
            )
        );
    }

    #[test]
    fn test_empty_paragraph() {
        let nodes = body("<p></p>");
        assert_eq!(nodes.len(), 1);
        assert_eq!(nodes[0].children(), &[PdfNode::literal("")]);
    }

    #[test]
    fn test_headings() {
        let nodes = body("<h1>a</h1><h3>b</h3><h5>c</h5><h6>d</h6>");
        let styles: Vec<_> = nodes.iter().map(|n| n.styles()[0]).collect();
        assert_eq!(
            styles,
            vec![StyleName::H1, StyleName::H3, StyleName::H4, StyleName::H4]
        );
    }

    #[test]
    fn test_nested_list_preserved() {
        let nodes = body("<ul><li>One<ul><li>Inner</li></ul></li><li>Two</li></ul>");
        assert_eq!(nodes.len(), 1);

        let list = &nodes[0];
        assert_eq!(list.styles(), &[StyleName::List]);
        assert_eq!(list.children().len(), 2);

        let first = &list.children()[0];
        assert_eq!(first.styles(), &[StyleName::ListItem]);
        assert_eq!(first.children()[0].text_content(), "• ");

        let content = &first.children()[1];
        assert_eq!(content.children().len(), 2);
        assert_eq!(content.children()[0].text_content(), "One");
        assert_eq!(content.children()[1].styles(), &[StyleName::List]);
        assert_eq!(content.children()[1].text_content(), "• Inner");
    }

    #[test]
    fn test_ordered_markers() {
        let nodes = body("<ol><li>a</li><li>b</li><li>c</li></ol>");
        let markers: Vec<_> = nodes[0]
            .children()
            .iter()
            .map(|item| item.children()[0].text_content())
            .collect();
        assert_eq!(markers, vec!["1. ", "2. ", "3. "]);
    }

    #[test]
    fn test_empty_list_and_quote_present() {
        let nodes = body("<ul></ul><blockquote></blockquote>");
        assert_eq!(nodes.len(), 2);
        assert_eq!(nodes[0], PdfNode::view(vec![StyleName::List], vec![]));
        assert_eq!(nodes[1], PdfNode::view(vec![StyleName::Blockquote], vec![]));
    }

    #[test]
    fn test_blockquote_keeps_children() {
        let nodes = body("<blockquote><p>One <em>two</em></p><p>Three</p></blockquote>");
        let quote = &nodes[0];
        assert_eq!(quote.children().len(), 2);
        assert_eq!(quote.children()[0].styles(), &[StyleName::Paragraph]);
        assert_eq!(quote.text_content(), "One twoThree");
    }

    #[test]
    fn test_wrapper_divs_keep_their_text() {
        let nodes = body(
            "<ul><li><div>Buy milk</div></li></ul><blockquote><div>Wise <b>words</b></div></blockquote>",
        );
        assert_eq!(nodes.len(), 2);

        let content = &nodes[0].children()[0].children()[1];
        assert_eq!(content.styles(), &[StyleName::ListContent]);
        assert_eq!(content.text_content(), "Buy milk");

        assert_eq!(nodes[1].styles(), &[StyleName::Blockquote]);
        assert_eq!(nodes[1].text_content(), "Wise words");
    }

    #[test]
    fn test_nested_wrappers_keep_inner_blocks() {
        let nodes = body("<blockquote><div><section><p>Deep</p></section>tail</div></blockquote>");
        let quote = &nodes[0];
        assert_eq!(quote.children().len(), 2);
        assert_eq!(quote.children()[0].styles(), &[StyleName::Paragraph]);
        assert_eq!(quote.children()[1].text_content(), "tail");
    }

    #[test]
    fn test_code_block_raw_text() {
        let nodes = body("<pre><code>fn main() {\n    run();\n}</code></pre>");
        assert_eq!(nodes[0].styles(), &[StyleName::CodeBlock]);
        assert_eq!(nodes[0].text_content(), "fn main() {\n    run();\n}");
    }

    #[test]
    fn test_deterministic() {
        let html = "<h2>A</h2><ol><li>x<blockquote>q</blockquote></li></ol><p><i>b</i></p>";
        assert_eq!(body(html), body(html));
    }
}
