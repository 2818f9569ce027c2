//! Semantic analysis module
//!
//! This module splits the token stream into its declaration and body
//! sections, checks declarations, resolves identifier references and
//! validates assignments and conditions.

mod analyzer;
mod body;
mod declarations;
mod rules;
mod sections;
mod symbols;

pub use analyzer::{Analysis, AnalysisStats, SemanticAnalyzer};
pub use rules::{AssignmentRule, ConditionKind};
pub use sections::Sections;
pub use symbols::{AddressEntry, AddressTable, ScopeStack, SymbolEntry, SymbolTable};

use crate::common::AnalysisResult;
use crate::token::{Token, ValueType};

/// Language of the type names written at the end of a declaration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TypeDialect {
    /// `int`, `real`, `string`, `boolean`
    #[default]
    English,
    /// `entero`, `real`, `cadena`, `logico`
    Spanish,
}

impl TypeDialect {
    pub fn type_name(self, ty: ValueType) -> &'static str {
        match (self, ty) {
            (TypeDialect::English, ValueType::Int) => "int",
            (TypeDialect::English, ValueType::Real) => "real",
            (TypeDialect::English, ValueType::String) => "string",
            (TypeDialect::English, ValueType::Boolean) => "boolean",
            (TypeDialect::Spanish, ValueType::Int) => "entero",
            (TypeDialect::Spanish, ValueType::Real) => "real",
            (TypeDialect::Spanish, ValueType::String) => "cadena",
            (TypeDialect::Spanish, ValueType::Boolean) => "logico",
        }
    }
}

/// Which tokens an assignment check inspects
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AssignmentScan {
    /// The assignment's own right-hand side, up to its semicolon
    #[default]
    Statement,
    /// The stream's first statement, typed by the stream's first token
    Leading,
}

/// Configuration options for the analyzer
#[derive(Debug, Clone)]
pub struct AnalyzerConfig {
    pub dialect: TypeDialect,
    pub assignment_scan: AssignmentScan,
    /// Scope label for variables declared before any program identifier
    pub default_scope: String,
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            dialect: TypeDialect::default(),
            assignment_scan: AssignmentScan::default(),
            default_scope: "Main".to_string(),
        }
    }
}

/// Analyze a token stream with fresh analyzer state
pub fn analyze(tokens: Vec<Token>, config: &AnalyzerConfig) -> AnalysisResult<Analysis> {
    SemanticAnalyzer::new(config.clone()).analyze(tokens)
}
