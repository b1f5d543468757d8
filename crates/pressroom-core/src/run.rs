//! Styled text runs
//!
//! A run is the smallest unit both output formats share: a span of text with
//! one fixed set of inline marks.

/// Inline marks in effect for a span of text.
///
/// Marks only ever accumulate while descending into inline markup; there is
/// no way to switch a flag back off.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub struct Marks {
    pub bold: bool,
    pub italic: bool,
    pub underline: bool,
    /// Inline code (monospace)
    pub code: bool,
}

impl Marks {
    /// No marks at all
    pub const NONE: Marks = Marks {
        bold: false,
        italic: false,
        underline: false,
        code: false,
    };

    pub fn with_bold(self) -> Self {
        Self { bold: true, ..self }
    }

    pub fn with_italic(self) -> Self {
        Self {
            italic: true,
            ..self
        }
    }

    pub fn with_underline(self) -> Self {
        Self {
            underline: true,
            ..self
        }
    }

    pub fn with_code(self) -> Self {
        Self { code: true, ..self }
    }

    /// Check if no flag is set
    pub fn is_plain(&self) -> bool {
        *self == Marks::NONE
    }
}

/// A contiguous span of text sharing one set of marks
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Run {
    pub text: String,
    pub marks: Marks,
}

impl Run {
    pub fn new(text: impl Into<String>, marks: Marks) -> Self {
        Self {
            text: text.into(),
            marks,
        }
    }

    /// A run without marks
    pub fn plain(text: impl Into<String>) -> Self {
        Self::new(text, Marks::NONE)
    }

    /// An empty run, used so that a paragraph is never run-less
    pub fn empty(marks: Marks) -> Self {
        Self::new(String::new(), marks)
    }

    /// A hard line break, emitted for `<br>`
    pub fn line_break(marks: Marks) -> Self {
        Self::new("\n", marks)
    }

    pub fn is_line_break(&self) -> bool {
        self.text == "\n"
    }
}

/// Concatenated text of a run sequence
pub fn runs_text(runs: &[Run]) -> String {
    runs.iter().map(|r| r.text.as_str()).collect()
}
