mod render;
pub mod source;
pub mod span;

pub use termcolor;
use termcolor::{Color, ColorSpec};

use self::span::{AsSpan, Span};

/// A fatal error in one source unit, rendered with labelled source snippets.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub message: Option<String>,
    pub snippets: Vec<Snippet>,
}

impl Diagnostic {
    pub fn error() -> Self {
        Self {
            message: None,
            snippets: vec![],
        }
    }

    #[must_use]
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    #[must_use]
    pub fn with_snippet(mut self, snippet: Snippet) -> Self {
        self.snippets.push(snippet);
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snippet {
    pub label: String,
    pub kind: SnippetKind,
    pub span: Span,
}

impl Snippet {
    pub fn new(kind: SnippetKind, label: impl Into<String>, span: impl AsSpan) -> Self {
        Self {
            label: label.into(),
            kind,
            span: span.as_span(),
        }
    }

    pub fn primary(label: impl Into<String>, span: impl AsSpan) -> Self {
        Self::new(SnippetKind::Primary, label, span)
    }

    pub fn secondary(label: impl Into<String>, span: impl AsSpan) -> Self {
        Self::new(SnippetKind::Secondary, label, span)
    }
}

/// Primary snippets mark where the error is; secondary ones point at related
/// source such as the opening of an unclosed block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum SnippetKind {
    Primary,
    Secondary,
}

/// Conversion of a pipeline error into a renderable diagnostic.
pub trait IntoDiagnostic {
    fn into_diagnostic(self) -> Diagnostic;
}

impl IntoDiagnostic for Diagnostic {
    fn into_diagnostic(self) -> Diagnostic {
        self
    }
}

#[derive(Debug)]
pub struct Config {
    /// Lines of source shown around each snippet.
    pub context_size: usize,

    pub error_color: ColorSpec,

    pub emphasis: ColorSpec,
    pub subtle: ColorSpec,

    pub gutter: &'static str,

    pub underline: &'static str,
    pub underline_after: &'static str,
}

impl Default for Config {
    fn default() -> Self {
        let mut error_color = ColorSpec::new();
        error_color.set_fg(Some(Color::Red));
        error_color.set_bold(true);

        let mut subtle = ColorSpec::new();
        subtle.set_italic(true);
        subtle.set_dimmed(true);

        let mut emphasis = ColorSpec::new();
        emphasis.set_bold(true);

        Self {
            context_size: 1,

            error_color,
            emphasis,
            subtle,

            gutter: "│",

            underline: "^",
            underline_after: " ",
        }
    }
}
