//! Per-occurrence token record

use crate::common::Span;
use super::kind::TokenKind;
use serde::ser::{Serialize, SerializeStruct, Serializer};

/// Table position the lexer assigns to ordinary tokens
pub const POSITION_NONE: i64 = -1;
/// Table position the lexer assigns to identifiers awaiting resolution
pub const POSITION_UNRESOLVED: i64 = -2;

/// One token occurrence in the stream
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub lexeme: String,
    pub line: usize,
    /// Table position as written by the lexer
    pub position: i64,
    /// Symbol address, set once the identifier is resolved
    pub resolved: Option<usize>,
    pub span: Span,
}

impl Token {
    pub fn new(kind: TokenKind, lexeme: impl Into<String>, line: usize) -> Self {
        let position = if kind.is_identifier() {
            POSITION_UNRESOLVED
        } else {
            POSITION_NONE
        };
        Self {
            kind,
            lexeme: lexeme.into(),
            line,
            position,
            resolved: None,
            span: Span::default(),
        }
    }

    pub fn with_position(mut self, position: i64) -> Self {
        self.position = position;
        self
    }

    pub fn with_span(mut self, span: Span) -> Self {
        self.span = span;
        self
    }

    pub fn resolve(&mut self, address: usize) {
        self.resolved = Some(address);
    }

    pub fn is_identifier(&self) -> bool {
        self.kind.is_identifier()
    }

    /// Index written to the annotated token table
    pub fn table_index(&self) -> i64 {
        match self.resolved {
            Some(address) => address as i64,
            None => self.position,
        }
    }
}

/// Same columns as the annotated token table
impl Serialize for Token {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut row = serializer.serialize_struct("Token", 4)?;
        row.serialize_field("kind", &self.kind)?;
        row.serialize_field("lexeme", &self.lexeme)?;
        row.serialize_field("index", &self.table_index())?;
        row.serialize_field("line", &self.line)?;
        row.end()
    }
}
