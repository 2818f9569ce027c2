//! PSema - semantic analyzer for a Pascal-like pseudocode language
//!
//! This library consumes the classified token stream produced by the
//! upstream lexer/parser and checks declarations, identifier resolution,
//! assignment compatibility and control-structure conditions. On success it
//! produces the symbol table, address table and annotated token table read by
//! the code generator.
//!
//! ## Architecture
//!
//! The analyzer is organized into:
//! - **Token model** (`token/`): Token kinds, families and the token-record reader
//! - **Semantic analysis** (`sema/`): Section splitting, declarations, body validation
//! - **Tables** (`tables/`): Rendering and writing the three output artifacts
//! - **Driver** (`driver/`): Pipeline orchestration and diagnostics
//! - **Common** (`common/`): Shared infrastructure (errors, spans)

pub mod common;
pub mod token;
pub mod sema;
pub mod tables;
pub mod driver;

// Re-exports for convenience
pub use common::{AnalysisError, AnalysisResult, DiagnosticReporter, Span};
pub use token::{Token, TokenFamily, TokenKind, ValueType};
pub use sema::{Analysis, AnalyzerConfig, AssignmentScan, SemanticAnalyzer, TypeDialect};
pub use tables::{OutputFormat, Tables};
pub use driver::{AnalysisContext, Pipeline};
