//! Body section validation

use crate::common::{AnalysisError, AnalysisResult};
use crate::token::Token;
use super::analyzer::SemanticAnalyzer;
use super::rules;
use std::ops::Range;

impl SemanticAnalyzer {
    /// Resolve every identifier in the body and check assignments and conditions
    pub(super) fn validate_body(
        &mut self,
        tokens: &mut [Token],
        section: Range<usize>,
    ) -> AnalysisResult<()> {
        for index in section {
            if !tokens[index].is_identifier() {
                continue;
            }

            let address = self.resolve(&tokens[index])?;
            tokens[index].resolve(address);
            self.stats.references += 1;

            if rules::is_assignment_target(tokens, index) {
                let target = self.symbols.type_of(&tokens[index].lexeme);
                rules::validate_assignment(tokens, index, target, self.config.assignment_scan)?;
                self.stats.assignments_checked += 1;
            }

            if let Some(construct) = rules::condition_keyword(tokens, index) {
                rules::validate_condition(tokens, index, construct)?;
                self.stats.conditions_checked += 1;
            }
        }
        Ok(())
    }

    fn resolve(&self, token: &Token) -> AnalysisResult<usize> {
        let address = self.symbols.address_of(&token.lexeme).ok_or_else(|| {
            AnalysisError::UndeclaredIdentifier {
                lexeme: token.lexeme.clone(),
                line: token.line,
                span: token.span,
            }
        })?;
        log::trace!("'{}' on line {} -> {}", token.lexeme, token.line, address);
        Ok(address)
    }
}

#[cfg(test)]
mod tests {
    use crate::common::{AnalysisError, AnalysisResult};
    use crate::sema::testing::{program, stream};
    use crate::sema::{Analysis, AnalyzerConfig, AssignmentScan, ConditionKind, SemanticAnalyzer};
    use crate::token::Token;
    use crate::token::TokenKind::*;
    use pretty_assertions::assert_eq;

    fn analyze(tokens: Vec<Token>) -> AnalysisResult<Analysis> {
        SemanticAnalyzer::new(AnalyzerConfig::default()).analyze(tokens)
    }

    #[test]
    fn test_references_resolve_to_addresses() {
        let tokens = program(
            &[(IntId, "a", "int"), (RealId, "r", "real")],
            &[
                (Begin, "begin", 5),
                (Read, "read", 6), (LParen, "(", 6), (RealId, "r", 6), (RParen, ")", 6),
                (Semicolon, ";", 6),
                (RealId, "r", 7), (Assign, "=", 7), (RealId, "r", 7), (Mul, "*", 7),
                (IntId, "a", 7), (Add, "+", 7), (RealConst, "1.5", 7), (Semicolon, ";", 7),
                (End, "end", 8),
            ],
        );
        let analysis = analyze(tokens).unwrap();
        let indices: Vec<_> = analysis
            .tokens
            .iter()
            .filter(|token| token.line >= 6 && token.is_identifier())
            .map(|token| token.table_index())
            .collect();
        assert_eq!(indices, vec![2, 2, 2, 1]);
        assert_eq!(analysis.stats.assignments_checked, 1);
    }

    #[test]
    fn test_undeclared_reference() {
        let tokens = program(
            &[(IntId, "a", "int")],
            &[
                (Begin, "begin", 4),
                (Write, "write", 5), (LParen, "(", 5), (IntId, "b", 5), (RParen, ")", 5),
                (Semicolon, ";", 5),
                (End, "end", 6),
            ],
        );
        assert!(matches!(
            analyze(tokens),
            Err(AnalysisError::UndeclaredIdentifier { ref lexeme, .. }) if lexeme == "b"
        ));
    }

    #[test]
    fn test_int_assigned_string() {
        let tokens = program(
            &[(IntId, "n", "int")],
            &[
                (Begin, "begin", 4),
                (IntId, "n", 5), (Assign, "=", 5), (StringConst, "\"diez\"", 5),
                (Semicolon, ";", 5),
                (End, "end", 6),
            ],
        );
        let err = analyze(tokens).unwrap_err();
        assert!(matches!(err, AnalysisError::InvalidAssignment { target: "int", line: 5, .. }));
        assert!(!err.is_structural());
    }

    #[test]
    fn test_int_arithmetic_assignment() {
        let tokens = program(
            &[(IntId, "n", "int"), (IntId, "m", "int")],
            &[
                (Begin, "begin", 5),
                (IntId, "n", 6), (Assign, "=", 6), (IntConst, "2", 6), (Mul, "*", 6),
                (IntId, "m", 6), (Sub, "-", 6), (IntConst, "1", 6), (Semicolon, ";", 6),
                (End, "end", 7),
            ],
        );
        assert!(analyze(tokens).is_ok());
    }

    #[test]
    fn test_boolean_assignment_needs_literal() {
        let body = |value| {
            vec![
                (Begin, "begin", 4),
                (BooleanId, "ok", 5), (Assign, "=", 5), value, (Semicolon, ";", 5),
                (End, "end", 6),
            ]
        };

        let tokens = program(&[(BooleanId, "ok", "boolean")], &body((False, "false", 5)));
        assert!(analyze(tokens).is_ok());

        let tokens = program(&[(BooleanId, "ok", "boolean")], &body((IntConst, "1", 5)));
        assert!(matches!(
            analyze(tokens),
            Err(AnalysisError::InvalidAssignment { target: "boolean", .. })
        ));
    }

    #[test]
    fn test_if_without_operator() {
        let tokens = program(
            &[(BooleanId, "x", "boolean")],
            &[
                (Begin, "begin", 4),
                (If, "if", 5), (LParen, "(", 5), (BooleanId, "x", 5), (RParen, ")", 5),
                (Then, "then", 5), (Begin, "begin", 5),
                (End, "end", 6),
                (End, "end", 7),
            ],
        );
        assert!(matches!(
            analyze(tokens),
            Err(AnalysisError::InvalidCondition { construct: ConditionKind::If, .. })
        ));
    }

    #[test]
    fn test_while_with_relational_operator() {
        let tokens = program(
            &[(IntId, "a", "int"), (IntId, "b", "int")],
            &[
                (Begin, "begin", 5),
                (While, "while", 6), (LParen, "(", 6), (IntId, "a", 6), (Lt, "<", 6),
                (IntId, "b", 6), (RParen, ")", 6), (Do, "do", 6), (Begin, "begin", 6),
                (IntId, "a", 7), (Assign, "=", 7), (IntId, "a", 7), (Add, "+", 7),
                (IntConst, "1", 7), (Semicolon, ";", 7),
                (End, "end", 8),
                (End, "end", 9),
            ],
        );
        let analysis = analyze(tokens).unwrap();
        assert_eq!(analysis.stats.conditions_checked, 1);
        assert_eq!(analysis.stats.assignments_checked, 1);
    }

    #[test]
    fn test_repeat_until() {
        let tokens = program(
            &[(IntId, "i", "int")],
            &[
                (Begin, "begin", 4),
                (Repeat, "repeat", 5),
                (IntId, "i", 6), (Assign, "=", 6), (IntId, "i", 6), (Add, "+", 6),
                (IntConst, "1", 6), (Semicolon, ";", 6),
                (Until, "until", 7), (LParen, "(", 7), (IntId, "i", 7), (Eq, "==", 7),
                (IntConst, "10", 7), (RParen, ")", 7), (Semicolon, ";", 7),
                (End, "end", 8),
            ],
        );
        let analysis = analyze(tokens).unwrap();
        assert_eq!(analysis.stats.conditions_checked, 1);
    }

    #[test]
    fn test_until_without_operator() {
        let tokens = program(
            &[(BooleanId, "done", "boolean")],
            &[
                (Begin, "begin", 4),
                (Repeat, "repeat", 5),
                (Until, "until", 6), (LParen, "(", 6), (BooleanId, "done", 6), (RParen, ")", 6),
                (Semicolon, ";", 6),
                (End, "end", 7),
            ],
        );
        assert!(matches!(
            analyze(tokens),
            Err(AnalysisError::InvalidCondition { construct: ConditionKind::Until, .. })
        ));
    }

    #[test]
    fn test_until_runs_off_stream() {
        let tokens = program(
            &[(IntId, "i", "int")],
            &[
                (Begin, "begin", 4),
                (Repeat, "repeat", 5),
                (Until, "until", 6), (LParen, "(", 6), (IntId, "i", 6),
            ],
        );
        let err = analyze(tokens).unwrap_err();
        assert!(matches!(
            err,
            AnalysisError::UnterminatedScan { terminator: "';' closing the condition", line: 6, .. }
        ));
        assert!(err.is_structural());
    }

    #[test]
    fn test_assignment_runs_off_stream() {
        let tokens = program(
            &[(IntId, "i", "int")],
            &[(Begin, "begin", 4), (IntId, "i", 5), (Assign, "=", 5)],
        );
        assert!(matches!(
            analyze(tokens),
            Err(AnalysisError::UnterminatedScan { terminator: "';' ending the assignment", line: 5, .. })
        ));
    }

    #[test]
    fn test_leading_scan_without_semicolon() {
        let tokens = stream(&[
            (Program, "program", 1), (GeneralId, "demo", 1),
            (Begin, "begin", 2), (GeneralId, "demo", 3), (Assign, "=", 3), (IntConst, "1", 3),
        ]);
        let config = AnalyzerConfig {
            assignment_scan: AssignmentScan::Leading,
            ..AnalyzerConfig::default()
        };
        assert!(matches!(
            SemanticAnalyzer::new(config).analyze(tokens),
            Err(AnalysisError::UnterminatedScan { terminator: "the first ';' of the stream", line: 3, .. })
        ));
    }
}
