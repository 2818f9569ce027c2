//! Common infrastructure shared across the analyzer stages

mod error;
mod span;

pub use error::{AnalysisError, AnalysisResult, DiagnosticReporter};
pub use span::Span;
