//! Declaration/body section splitting

use crate::common::{AnalysisError, AnalysisResult};
use crate::token::{Token, TokenKind};
use std::ops::Range;

/// Index ranges of the two sections within the full token stream
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sections {
    pub declarations: Range<usize>,
    pub body: Range<usize>,
}

impl Sections {
    /// Split at the first body-begin keyword, which opens the body section
    pub fn split(tokens: &[Token]) -> AnalysisResult<Self> {
        let marker = tokens
            .iter()
            .position(|token| token.kind == TokenKind::Begin)
            .ok_or(AnalysisError::MissingBodyMarker)?;

        Ok(Self {
            declarations: 0..marker,
            body: marker..tokens.len(),
        })
    }

    pub fn declarations<'a>(&self, tokens: &'a [Token]) -> &'a [Token] {
        &tokens[self.declarations.clone()]
    }

    pub fn body<'a>(&self, tokens: &'a [Token]) -> &'a [Token] {
        &tokens[self.body.clone()]
    }
}
