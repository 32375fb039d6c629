use miette::{Diagnostic, NamedSource, SourceSpan};
use thiserror::Error;

use crate::scanner::token::Span;

/// The three kinds of malformed input the scanner recognizes. All of them are
/// recovered from locally; none stops a scan.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanErrorKind {
    #[error("Unterminated string.")]
    UnterminatedString,

    #[error("Unterminated block comment.")]
    UnterminatedComment,

    #[error("Unexpected character: {0}")]
    UnexpectedCharacter(char),
}

impl ScanErrorKind {
    fn help(self) -> Option<String> {
        match self {
            Self::UnterminatedString => Some("add a closing '\"' to end the string".to_string()),
            Self::UnterminatedComment => Some("close the comment with '*/'".to_string()),
            Self::UnexpectedCharacter(_) => None,
        }
    }
}

#[derive(Error, Debug, Diagnostic)]
#[error("{kind}")]
#[diagnostic(code(lox::scan))]
pub struct ScanError {
    kind: ScanErrorKind,
    line: usize,
    #[label("here")]
    span: SourceSpan,
    #[help]
    help: Option<String>,
    #[source_code]
    src: NamedSource<String>,
}

impl ScanError {
    pub fn new(kind: ScanErrorKind, line: usize, span: Span) -> Self {
        Self {
            kind,
            line,
            span: span.into(),
            help: kind.help(),
            src: NamedSource::new("input", String::new()),
        }
    }

    pub fn kind(&self) -> ScanErrorKind {
        self.kind
    }

    /// 1-based line the error was detected on.
    pub fn line(&self) -> usize {
        self.line
    }

    pub fn span(&self) -> Span {
        Span::new(self.span.offset(), self.span.len())
    }

    /// Attach source code for fancy miette diagnostics
    pub fn with_source_code(self, name: impl Into<String>, source: impl Into<String>) -> Self {
        Self {
            src: NamedSource::new(name.into(), source.into()),
            ..self
        }
    }

    /// Plain one-line rendering: `[line 3] Error: Unterminated string.`
    pub fn display_with_line(&self) -> String {
        format!("[line {}] Error: {}", self.line, self.kind)
    }
}

/// Receiver for errors found during a scan.
///
/// Any `FnMut(usize, &str)` closure is a sink; it is called with the line and
/// the message of each error.
pub trait ErrorSink {
    fn report(&mut self, error: ScanError);
}

impl<F> ErrorSink for F
where
    F: FnMut(usize, &str),
{
    fn report(&mut self, error: ScanError) {
        self(error.line(), &error.to_string());
    }
}

/// Sink that keeps every reported error. `had_error` plays the role of the
/// driver's error flag.
#[derive(Debug, Default)]
pub struct ScanErrors {
    errors: Vec<ScanError>,
}

impl ScanErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn had_error(&self) -> bool {
        !self.errors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ScanError> {
        self.errors.iter()
    }

    pub fn into_vec(self) -> Vec<ScanError> {
        self.errors
    }
}

impl ErrorSink for ScanErrors {
    fn report(&mut self, error: ScanError) {
        self.errors.push(error);
    }
}

impl IntoIterator for ScanErrors {
    type Item = ScanError;
    type IntoIter = std::vec::IntoIter<ScanError>;

    fn into_iter(self) -> Self::IntoIter {
        self.errors.into_iter()
    }
}

// ============= Tests =============
