//! Declaration section checks

use crate::common::{AnalysisError, AnalysisResult};
use crate::token::{Token, TokenKind, ValueType};
use super::analyzer::SemanticAnalyzer;
use std::ops::Range;

impl SemanticAnalyzer {
    /// Walk the declaration section, recording the program name and every variable
    pub(super) fn check_declarations(
        &mut self,
        tokens: &mut [Token],
        section: Range<usize>,
    ) -> AnalysisResult<()> {
        for index in section.clone() {
            let token = &tokens[index];
            if !token.is_identifier() {
                continue;
            }

            match token.kind.value_type() {
                None => self.declare_program(&mut tokens[index]),
                Some(ty) => {
                    let address = self.declare_variable(tokens, index, ty, section.end)?;
                    tokens[index].resolve(address);
                }
            }
        }
        Ok(())
    }

    fn declare_program(&mut self, token: &mut Token) {
        self.scopes.push(&token.lexeme);

        if self.symbols.declare_program(&token.lexeme) {
            self.addresses.record(&token.lexeme, token.line);
            log::debug!("program '{}' on line {}", token.lexeme, token.line);
        }
        if let Some(address) = self.symbols.address_of(&token.lexeme) {
            token.resolve(address);
        }
    }

    fn declare_variable(
        &mut self,
        tokens: &[Token],
        index: usize,
        ty: ValueType,
        section_end: usize,
    ) -> AnalysisResult<usize> {
        let token = &tokens[index];

        let duplicate = || AnalysisError::DuplicateDeclaration {
            lexeme: token.lexeme.clone(),
            line: token.line,
            span: token.span,
        };

        // Reported ahead of the annotation check
        if self.symbols.is_known(&token.lexeme) {
            return Err(duplicate());
        }

        let announced = announced_type(tokens, index, section_end).ok_or_else(|| {
            AnalysisError::UnterminatedScan {
                terminator: "';' ending the declaration",
                lexeme: token.lexeme.clone(),
                line: token.line,
                span: token.span,
            }
        })?;

        let expected = self.config.dialect.type_name(ty);
        if announced != expected {
            return Err(AnalysisError::TypeAnnotationMismatch {
                lexeme: token.lexeme.clone(),
                line: token.line,
                expected,
                found: announced.to_string(),
                span: token.span,
            });
        }

        let scope = self
            .scopes
            .current()
            .unwrap_or(self.config.default_scope.as_str())
            .to_string();
        let address = self
            .symbols
            .declare(&token.lexeme, ty, &scope)
            .ok_or_else(duplicate)?;

        self.stats.declarations += 1;
        log::debug!(
            "declared {} '{}' at address {} in scope '{}'",
            ty,
            token.lexeme,
            address,
            scope
        );
        Ok(address)
    }
}

/// Lexeme just before the semicolon that ends the declaration at `index`
fn announced_type(tokens: &[Token], index: usize, section_end: usize) -> Option<&str> {
    let semicolon = (index..section_end).find(|&i| tokens[i].kind == TokenKind::Semicolon)?;
    // `index` is an identifier, so the semicolon is strictly after it
    Some(tokens[semicolon - 1].lexeme.as_str())
}

#[cfg(test)]
mod tests {
    use crate::common::{AnalysisError, AnalysisResult};
    use crate::sema::testing::{program, stream};
    use crate::sema::{Analysis, AnalyzerConfig, SemanticAnalyzer};
    use crate::token::Token;
    use crate::token::TokenKind::*;
    use pretty_assertions::assert_eq;

    fn analyze(tokens: Vec<Token>) -> AnalysisResult<Analysis> {
        SemanticAnalyzer::new(AnalyzerConfig::default()).analyze(tokens)
    }

    #[test]
    fn test_shared_type_annotation() {
        // var a , b int ;
        let mut tokens = stream(&[
            (Program, "program", 1), (GeneralId, "demo", 1), (Semicolon, ";", 1),
            (Var, "var", 2), (IntId, "a", 2), (Comma, ",", 2), (IntId, "b", 2),
            (IntKw, "int", 2), (Semicolon, ";", 2),
        ]);
        tokens.extend(stream(&[(Begin, "begin", 3), (End, "end", 4)]));

        let analysis = analyze(tokens).unwrap();
        let addresses: Vec<_> = analysis.symbols.entries().iter().map(|e| e.address).collect();
        assert_eq!(addresses, vec![1, 2]);
    }

    #[test]
    fn test_duplicate_declaration() {
        let tokens = program(
            &[(IntId, "x", "int"), (RealId, "x", "real")],
            &[(Begin, "begin", 6), (End, "end", 7)],
        );
        let err = analyze(tokens).unwrap_err();
        assert!(matches!(err, AnalysisError::DuplicateDeclaration { line: 4, .. }));
    }

    #[test]
    fn test_variable_named_like_program() {
        let tokens = program(&[(IntId, "demo", "int")], &[(Begin, "begin", 6)]);
        assert!(matches!(
            analyze(tokens),
            Err(AnalysisError::DuplicateDeclaration { .. })
        ));
    }

    #[test]
    fn test_annotation_mismatch() {
        let tokens = program(&[(IntId, "x", "real")], &[(Begin, "begin", 6)]);
        let err = analyze(tokens).unwrap_err();
        match err {
            AnalysisError::TypeAnnotationMismatch { lexeme, expected, found, .. } => {
                assert_eq!(lexeme, "x");
                assert_eq!(expected, "int");
                assert_eq!(found, "real");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_declaration_without_terminator() {
        let tokens = stream(&[
            (Program, "program", 1), (GeneralId, "demo", 1), (Semicolon, ";", 1),
            (Var, "var", 2), (BooleanId, "flag", 2), (BooleanKw, "boolean", 2),
            (Begin, "begin", 3), (End, "end", 4),
        ]);
        assert!(matches!(
            analyze(tokens),
            Err(AnalysisError::UnterminatedScan { line: 2, .. })
        ));
    }

    #[test]
    fn test_default_scope_without_program() {
        let tokens = stream(&[
            (Var, "var", 1), (RealId, "r", 1), (RealKw, "real", 1), (Semicolon, ";", 1),
            (Begin, "begin", 2), (End, "end", 3),
        ]);
        let analysis = analyze(tokens).unwrap();
        assert!(analysis.addresses.is_empty());
        let entry = analysis.symbols.lookup("r").unwrap();
        assert_eq!(entry.scope, "Main");
        assert_eq!(entry.value, "0.0");
        assert_eq!(entry.address, 0);
    }

    #[test]
    fn test_repeated_program_name() {
        let tokens = stream(&[
            (Program, "program", 1), (GeneralId, "demo", 1), (Semicolon, ";", 1),
            (GeneralId, "demo", 2), (Begin, "begin", 3), (End, "end", 4),
        ]);
        let analysis = analyze(tokens).unwrap();
        assert_eq!(analysis.addresses.len(), 1);
        assert_eq!(analysis.tokens[3].resolved, Some(0));
    }

    #[test]
    fn test_duplicate_reported_before_annotation() {
        let tokens = program(
            &[(IntId, "x", "int"), (IntId, "x", "real")],
            &[(Begin, "begin", 6)],
        );
        assert!(matches!(
            analyze(tokens),
            Err(AnalysisError::DuplicateDeclaration { ref lexeme, line: 4, .. }) if lexeme == "x"
        ));
    }
}
