//! Semantic analyzer - per-run state and orchestration

use crate::common::AnalysisResult;
use crate::token::Token;
use super::sections::Sections;
use super::symbols::{AddressTable, ScopeStack, SymbolTable};
use super::AnalyzerConfig;

/// Counters reported when an analysis completes
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AnalysisStats {
    pub tokens: usize,
    pub declarations: usize,
    pub references: usize,
    pub assignments_checked: usize,
    pub conditions_checked: usize,
}

/// Result of a successful analysis
#[derive(Debug)]
pub struct Analysis {
    /// Token stream with identifiers annotated by their symbol address
    pub tokens: Vec<Token>,
    pub symbols: SymbolTable,
    pub addresses: AddressTable,
    pub stats: AnalysisStats,
}

/// Semantic analyzer for one token stream
///
/// The analyzer is consumed by [`SemanticAnalyzer::analyze`], so its
/// append-only tables are never shared between runs.
pub struct SemanticAnalyzer {
    pub(super) config: AnalyzerConfig,
    pub(super) symbols: SymbolTable,
    pub(super) addresses: AddressTable,
    pub(super) scopes: ScopeStack,
    pub(super) stats: AnalysisStats,
}

impl SemanticAnalyzer {
    pub fn new(config: AnalyzerConfig) -> Self {
        Self {
            config,
            symbols: SymbolTable::new(),
            addresses: AddressTable::new(),
            scopes: ScopeStack::new(),
            stats: AnalysisStats::default(),
        }
    }

    /// Analyze a token stream, stopping at the first fault
    pub fn analyze(mut self, mut tokens: Vec<Token>) -> AnalysisResult<Analysis> {
        self.stats.tokens = tokens.len();

        let sections = Sections::split(&tokens)?;
        log::debug!(
            "{} declaration tokens, {} body tokens",
            sections.declarations.len(),
            sections.body.len()
        );

        self.check_declarations(&mut tokens, sections.declarations)?;
        self.validate_body(&mut tokens, sections.body)?;

        log::info!(
            "semantic analysis complete: {} symbols, {} references resolved",
            self.symbols.len(),
            self.stats.references
        );

        Ok(Analysis {
            tokens,
            symbols: self.symbols,
            addresses: self.addresses,
            stats: self.stats,
        })
    }
}
