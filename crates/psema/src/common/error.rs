//! Error types and diagnostic reporting

use codespan_reporting::diagnostic::{Diagnostic, Label};
use codespan_reporting::files::SimpleFiles;
use codespan_reporting::term;
use codespan_reporting::term::termcolor::{ColorChoice, NoColor, StandardStream};
use thiserror::Error;
use super::Span;
use crate::sema::ConditionKind;

/// Analysis error with the offending lexeme and location
#[derive(Error, Debug)]
pub enum AnalysisError {
    #[error("malformed token record {record}: {message}")]
    MalformedTokenRecord { record: usize, message: String, span: Span },

    #[error("token stream has no body-begin marker")]
    MissingBodyMarker,

    #[error("identifier '{lexeme}' on line {line} has already been declared")]
    DuplicateDeclaration { lexeme: String, line: usize, span: Span },

    #[error("identifier '{lexeme}' on line {line} is declared {expected} but annotated '{found}'")]
    TypeAnnotationMismatch {
        lexeme: String,
        line: usize,
        expected: &'static str,
        found: String,
        span: Span,
    },

    #[error("identifier '{lexeme}' on line {line} has not been declared")]
    UndeclaredIdentifier { lexeme: String, line: usize, span: Span },

    #[error("invalid assignment to {target} identifier '{lexeme}' on line {line}: {reason}")]
    InvalidAssignment {
        lexeme: String,
        line: usize,
        target: &'static str,
        reason: String,
        span: Span,
    },

    #[error("invalid {construct} condition at '{lexeme}' on line {line}: no relational or logical operator")]
    InvalidCondition {
        lexeme: String,
        line: usize,
        construct: ConditionKind,
        span: Span,
    },

    #[error("scan for {terminator} from '{lexeme}' on line {line} ran past the end of the token stream")]
    UnterminatedScan {
        terminator: &'static str,
        lexeme: String,
        line: usize,
        span: Span,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl AnalysisError {
    pub fn malformed(record: usize, message: impl Into<String>, span: Span) -> Self {
        Self::MalformedTokenRecord {
            record,
            message: message.into(),
            span,
        }
    }

    /// True for faults in the token stream itself rather than in the program
    pub fn is_structural(&self) -> bool {
        matches!(
            self,
            Self::MalformedTokenRecord { .. }
                | Self::MissingBodyMarker
                | Self::UnterminatedScan { .. }
                | Self::Io(_)
        )
    }

    /// Short name of the violated rule
    pub fn rule(&self) -> &'static str {
        match self {
            Self::MalformedTokenRecord { .. } => "malformed-token-record",
            Self::MissingBodyMarker => "missing-body-marker",
            Self::DuplicateDeclaration { .. } => "duplicate-declaration",
            Self::TypeAnnotationMismatch { .. } => "type-annotation-mismatch",
            Self::UndeclaredIdentifier { .. } => "undeclared-identifier",
            Self::InvalidAssignment { .. } => "invalid-assignment",
            Self::InvalidCondition { .. } => "invalid-condition",
            Self::UnterminatedScan { .. } => "unterminated-scan",
            Self::Io(_) => "io",
        }
    }

    /// Source program line, when the error is tied to a token
    pub fn line(&self) -> Option<usize> {
        match self {
            Self::DuplicateDeclaration { line, .. }
            | Self::TypeAnnotationMismatch { line, .. }
            | Self::UndeclaredIdentifier { line, .. }
            | Self::InvalidAssignment { line, .. }
            | Self::InvalidCondition { line, .. }
            | Self::UnterminatedScan { line, .. } => Some(*line),
            _ => None,
        }
    }

    /// Offending lexeme, when the error is tied to a token
    pub fn lexeme(&self) -> Option<&str> {
        match self {
            Self::DuplicateDeclaration { lexeme, .. }
            | Self::TypeAnnotationMismatch { lexeme, .. }
            | Self::UndeclaredIdentifier { lexeme, .. }
            | Self::InvalidAssignment { lexeme, .. }
            | Self::InvalidCondition { lexeme, .. }
            | Self::UnterminatedScan { lexeme, .. } => Some(lexeme),
            _ => None,
        }
    }

    /// Byte range of the offending token record
    pub fn span(&self) -> Option<Span> {
        match self {
            Self::MalformedTokenRecord { span, .. }
            | Self::DuplicateDeclaration { span, .. }
            | Self::TypeAnnotationMismatch { span, .. }
            | Self::UndeclaredIdentifier { span, .. }
            | Self::InvalidAssignment { span, .. }
            | Self::InvalidCondition { span, .. }
            | Self::UnterminatedScan { span, .. } => Some(*span),
            Self::MissingBodyMarker | Self::Io(_) => None,
        }
    }
}

pub type AnalysisResult<T> = Result<T, AnalysisError>;

/// Diagnostic reporter for pretty error output
pub struct DiagnosticReporter {
    files: SimpleFiles<String, String>,
    writer: StandardStream,
    config: term::Config,
}

impl DiagnosticReporter {
    pub fn new() -> Self {
        Self {
            files: SimpleFiles::new(),
            writer: StandardStream::stderr(ColorChoice::Auto),
            config: term::Config::default(),
        }
    }

    pub fn add_file(&mut self, name: impl Into<String>, source: impl Into<String>) -> usize {
        self.files.add(name.into(), source.into())
    }

    pub fn diagnostic(&self, file_id: usize, error: &AnalysisError) -> Diagnostic<usize> {
        let title = if error.is_structural() {
            "Malformed token stream"
        } else {
            "Semantic error"
        };

        let mut diagnostic = Diagnostic::error()
            .with_message(title)
            .with_code(error.rule());

        match error.span() {
            Some(span) if !span.is_empty() => {
                diagnostic = diagnostic.with_labels(vec![
                    Label::primary(file_id, span.range()).with_message(error.to_string())
                ]);
            }
            _ => {
                diagnostic = diagnostic.with_notes(vec![error.to_string()]);
            }
        }

        if let Some(line) = error.line() {
            diagnostic.notes.push(format!("program line {}", line));
        }

        diagnostic
    }

    pub fn report_error(&self, file_id: usize, error: &AnalysisError) {
        let diagnostic = self.diagnostic(file_id, error);
        let _ = term::emit(&mut self.writer.lock(), &self.config, &self.files, &diagnostic);
    }

    /// Render a diagnostic without color, for logs and tests
    pub fn render_to_string(&self, file_id: usize, error: &AnalysisError) -> String {
        let diagnostic = self.diagnostic(file_id, error);
        let mut buffer = NoColor::new(Vec::new());
        if term::emit(&mut buffer, &self.config, &self.files, &diagnostic).is_err() {
            return error.to_string();
        }
        String::from_utf8_lossy(&buffer.into_inner()).into_owned()
    }
}

impl Default for DiagnosticReporter {
    fn default() -> Self {
        Self::new()
    }
}
