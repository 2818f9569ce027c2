//! Assignment and condition rules
//!
//! The fixed lookahead/lookbehind offsets below encode grammar facts:
//! a condition operand sits two tokens after its `if`/`while`/`until`,
//! `if (...) then begin` and `while (...) do begin` end three tokens before
//! `begin`, and `until (...) ;` ends two tokens before the semicolon.

use crate::common::{AnalysisError, AnalysisResult};
use crate::token::{KindSet, Token, TokenKind, ValueType};
use super::AssignmentScan;
use std::fmt;

/// Distance from a condition keyword to the condition's first operand
const CONDITION_KEYWORD_OFFSET: usize = 2;
/// Distance from the last condition token to `begin` in `if`/`while`
const CONDITION_TERMINATOR_OFFSET: usize = 3;
/// Distance from the last condition token to `;` in `until`
const UNTIL_TERMINATOR_OFFSET: usize = 2;

/// Control structure owning a condition
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConditionKind {
    If,
    While,
    Until,
}

impl ConditionKind {
    pub fn from_keyword(kind: TokenKind) -> Option<Self> {
        match kind {
            TokenKind::If => Some(ConditionKind::If),
            TokenKind::While => Some(ConditionKind::While),
            TokenKind::Until => Some(ConditionKind::Until),
            _ => None,
        }
    }

    fn terminator(self) -> &'static str {
        match self {
            ConditionKind::If | ConditionKind::While => "'begin' closing the condition",
            ConditionKind::Until => "';' closing the condition",
        }
    }
}

impl fmt::Display for ConditionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConditionKind::If => write!(f, "if"),
            ConditionKind::While => write!(f, "while"),
            ConditionKind::Until => write!(f, "until"),
        }
    }
}

/// `None` when the lookahead falls off the end of the stream
fn is_condition_terminator(tokens: &[Token], index: usize) -> Option<bool> {
    tokens
        .get(index + CONDITION_TERMINATOR_OFFSET)
        .map(|token| token.kind == TokenKind::Begin)
}

/// `None` when the lookahead falls off the end of the stream
fn is_until_terminator(tokens: &[Token], index: usize) -> Option<bool> {
    tokens
        .get(index + UNTIL_TERMINATOR_OFFSET)
        .map(|token| token.kind == TokenKind::Semicolon)
}

/// Control structure whose condition starts at `index`, if any
pub fn condition_keyword(tokens: &[Token], index: usize) -> Option<ConditionKind> {
    index
        .checked_sub(CONDITION_KEYWORD_OFFSET)
        .and_then(|keyword| tokens.get(keyword))
        .and_then(|token| ConditionKind::from_keyword(token.kind))
}

/// Whether the identifier at `index` is followed by the assignment operator
pub fn is_assignment_target(tokens: &[Token], index: usize) -> bool {
    tokens
        .get(index + 1)
        .is_some_and(|token| token.kind == TokenKind::Assign)
}

fn unterminated(token: &Token, terminator: &'static str) -> AnalysisError {
    AnalysisError::UnterminatedScan {
        terminator,
        lexeme: token.lexeme.clone(),
        line: token.line,
        span: token.span,
    }
}

/// Collect the token kinds of the condition starting at `start`
pub fn scan_condition(
    tokens: &[Token],
    start: usize,
    construct: ConditionKind,
) -> AnalysisResult<KindSet> {
    let mut found = KindSet::empty();

    for (index, token) in tokens.iter().enumerate().skip(start) {
        found.insert(token.kind);

        let terminated = match construct {
            ConditionKind::If | ConditionKind::While => is_condition_terminator(tokens, index),
            ConditionKind::Until => is_until_terminator(tokens, index),
        };
        match terminated {
            Some(true) => {
                log::trace!("{} condition spans tokens {}..={}", construct, start, index);
                return Ok(found);
            }
            Some(false) => {}
            None => break,
        }
    }

    Err(unterminated(&tokens[start], construct.terminator()))
}

/// A condition must contain at least one relational or logical operator
pub fn validate_condition(
    tokens: &[Token],
    start: usize,
    construct: ConditionKind,
) -> AnalysisResult<()> {
    let found = scan_condition(tokens, start, construct)?;
    if found.intersects(KindSet::matching(TokenKind::is_condition_operator)) {
        return Ok(());
    }

    let token = &tokens[start];
    Err(AnalysisError::InvalidCondition {
        lexeme: token.lexeme.clone(),
        line: token.line,
        construct,
        span: token.span,
    })
}

/// What an assignment's expression must or must not contain
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssignmentRule {
    Forbid(KindSet),
    Require(KindSet),
}

impl AssignmentRule {
    pub fn for_type(ty: ValueType) -> Self {
        use crate::token::TokenKind::*;

        let base = KindSet::matching(TokenKind::is_condition_operator)
            .union(KindSet::of(&[GeneralId]));

        match ty {
            ValueType::Int => AssignmentRule::Forbid(base.union(KindSet::of(&[
                RealId, StringId, BooleanId, RealConst, StringConst, True, False,
            ]))),
            ValueType::Real => AssignmentRule::Forbid(base.union(KindSet::of(&[
                StringId, BooleanId, StringConst, True, False,
            ]))),
            ValueType::String => AssignmentRule::Forbid(base.union(KindSet::of(&[
                IntId, RealId, BooleanId, IntConst, RealConst, True, False,
            ]))),
            ValueType::Boolean => AssignmentRule::Require(KindSet::of(&[True, False])),
        }
    }

    /// Check the kinds found in an expression, describing the first violation
    pub fn check(&self, found: KindSet) -> Result<(), String> {
        match self {
            AssignmentRule::Forbid(forbidden) => match found.intersection(*forbidden).iter().next() {
                Some(kind) => Err(format!("{} is not allowed in the expression", kind)),
                None => Ok(()),
            },
            AssignmentRule::Require(required) => {
                if found.intersects(*required) {
                    Ok(())
                } else {
                    Err("expression contains neither 'true' nor 'false'".to_string())
                }
            }
        }
    }
}

/// Collect kinds from `start` up to and including the first semicolon
fn scan_to_semicolon(tokens: &[Token], start: usize) -> Option<KindSet> {
    let mut found = KindSet::empty();
    for token in tokens.iter().skip(start) {
        found.insert(token.kind);
        if token.kind == TokenKind::Semicolon {
            return Some(found);
        }
    }
    None
}

/// Validate the assignment whose target identifier sits at `index`
///
/// `target` is the declared type of that identifier. With
/// [`AssignmentScan::Leading`] the target type instead comes from the first
/// token of the stream and the scan covers the stream's first statement.
pub fn validate_assignment(
    tokens: &[Token],
    index: usize,
    target: Option<ValueType>,
    scan: AssignmentScan,
) -> AnalysisResult<()> {
    let token = &tokens[index];

    let (ty, found) = match scan {
        AssignmentScan::Statement => {
            let found = scan_to_semicolon(tokens, index + 2)
                .ok_or_else(|| unterminated(token, "';' ending the assignment"))?;
            (target, found)
        }
        AssignmentScan::Leading => {
            let found = scan_to_semicolon(tokens, 0)
                .ok_or_else(|| unterminated(token, "the first ';' of the stream"))?;
            let Some(ty) = tokens.first().and_then(|first| first.kind.value_type()) else {
                log::trace!("leading statement has no typed target; '{}' accepted", token.lexeme);
                return Ok(());
            };
            (Some(ty), found)
        }
    };

    let Some(ty) = ty else {
        return Err(AnalysisError::InvalidAssignment {
            lexeme: token.lexeme.clone(),
            line: token.line,
            target: "program",
            reason: "the program name cannot be assigned".to_string(),
            span: token.span,
        });
    };

    AssignmentRule::for_type(ty)
        .check(found)
        .map_err(|reason| AnalysisError::InvalidAssignment {
            lexeme: token.lexeme.clone(),
            line: token.line,
            target: ty.name(),
            reason,
            span: token.span,
        })
}
