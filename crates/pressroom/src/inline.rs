//! Inline style resolution.
//!
//! Flattens a subtree of inline markup into style-tagged runs. Marks are
//! passed down by value and only ever extended.

use pressroom_core::{Marks, Run};
use smallvec::SmallVec;

use crate::node::{Node, NodeType};
use crate::utilities::collapse_whitespace;

// Most inline subtrees yield only a handful of runs
type RunVec = SmallVec<[Run; 4]>;

/// Inline meaning of an element
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InlineTag {
    Bold,
    Italic,
    Underline,
    Code,
    LineBreak,
    /// Any other element: transparent
    Other,
}

impl InlineTag {
    pub fn of(tag: &str) -> Self {
        match tag {
            "strong" | "b" => InlineTag::Bold,
            "em" | "i" => InlineTag::Italic,
            "u" => InlineTag::Underline,
            "code" => InlineTag::Code,
            "br" => InlineTag::LineBreak,
            _ => InlineTag::Other,
        }
    }

    /// Marks in effect inside an element with this tag
    pub fn apply(self, marks: Marks) -> Marks {
        match self {
            InlineTag::Bold => marks.with_bold(),
            InlineTag::Italic => marks.with_italic(),
            InlineTag::Underline => marks.with_underline(),
            InlineTag::Code => marks.with_code(),
            InlineTag::LineBreak | InlineTag::Other => marks,
        }
    }
}

/// Resolve the children of `node` into runs.
///
/// Always yields at least one run: if nothing is emittable, the result is a
/// single empty run carrying `marks`. When collapsing, whitespace at the
/// block edges is trimmed away.
pub fn resolve_inlines(node: &Node, marks: Marks, collapse: bool) -> Vec<Run> {
    let mut runs = resolve_nodes(node.children(), marks, collapse);
    if collapse {
        trim_block_edges(&mut runs);
    }
    ensure_run(runs, marks)
}

/// Resolve a sequence of sibling nodes into runs, possibly none
pub fn resolve_nodes<'a, I>(nodes: I, marks: Marks, collapse: bool) -> Vec<Run>
where
    I: IntoIterator<Item = &'a Node>,
{
    let mut runs = Vec::new();
    for node in nodes {
        runs.extend(node_runs(node, marks, collapse));
    }
    runs
}

/// Strip leading whitespace of the first run and trailing whitespace of the
/// last one, dropping runs that become empty. Code runs and line breaks are
/// left alone.
pub fn trim_block_edges(runs: &mut Vec<Run>) {
    while runs
        .first()
        .is_some_and(|r| is_trimmable(r) && r.text.trim_start().is_empty())
    {
        runs.remove(0);
    }
    if let Some(first) = runs.first_mut().filter(|r| is_trimmable(r)) {
        first.text = first.text.trim_start().to_string();
    }

    while runs
        .last()
        .is_some_and(|r| is_trimmable(r) && r.text.trim_end().is_empty())
    {
        runs.pop();
    }
    if let Some(last) = runs.last_mut().filter(|r| is_trimmable(r)) {
        last.text = last.text.trim_end().to_string();
    }
}

fn is_trimmable(run: &Run) -> bool {
    !run.marks.code && !run.is_line_break()
}

/// Append an empty run when `runs` is empty
pub fn ensure_run(mut runs: Vec<Run>, marks: Marks) -> Vec<Run> {
    if runs.is_empty() {
        runs.push(Run::empty(marks));
    }
    runs
}

fn node_runs(node: &Node, marks: Marks, collapse: bool) -> RunVec {
    match node.node_type {
        NodeType::Text => {
            let raw = node.node_value.as_deref().unwrap_or("");
            let text = if collapse && !marks.code {
                collapse_whitespace(raw)
            } else {
                raw.to_string()
            };

            let mut runs = RunVec::new();
            if !text.is_empty() {
                runs.push(Run::new(text, marks));
            }
            runs
        }
        NodeType::Comment => RunVec::new(),
        NodeType::Element => {
            let tag = InlineTag::of(node.tag_name());
            if tag == InlineTag::LineBreak {
                let mut runs = RunVec::new();
                runs.push(Run::line_break(marks));
                return runs;
            }

            let inner = tag.apply(marks);
            node.children()
                .flat_map(|child| node_runs(child, inner, collapse))
                .collect()
        }
    }
}
