//! Token-record reader
//!
//! Each line of the record file is `code, lexeme, position, line`. The comma
//! is both the field delimiter and a lexeme, so a record for a literal comma
//! arrives as five fields with an empty second field and is reassembled here.

use crate::common::{AnalysisError, AnalysisResult, Span};
use super::kind::TokenKind;
use super::occurrence::Token;
use logos::Logos;

/// Pieces of a raw record line
#[derive(Logos, Debug, Clone, Copy, PartialEq)]
enum RecordPiece {
    #[token(",")]
    Delimiter,
    #[regex(r"[^,]+")]
    Text,
}

/// Split a record line on commas, trimming each field
///
/// Trailing empty fields are dropped, as a plain string split would.
pub fn split_fields(line: &str) -> Vec<&str> {
    let mut fields = Vec::new();
    let mut current = "";
    let mut lexer = RecordPiece::lexer(line);

    while let Some(piece) = lexer.next() {
        match piece {
            Ok(RecordPiece::Text) => current = lexer.slice(),
            Ok(RecordPiece::Delimiter) => fields.push(std::mem::take(&mut current)),
            // The two patterns cover every input character
            Err(()) => {}
        }
    }
    fields.push(current);

    while fields.last().is_some_and(|field| field.is_empty()) {
        fields.pop();
    }
    fields.into_iter().map(str::trim).collect()
}

/// Parse one record line into a token
pub fn parse_record(line: &str, record: usize, span: Span) -> AnalysisResult<Token> {
    let mut fields = split_fields(line);

    if fields.len() >= 2 && fields[1].is_empty() {
        if fields.len() < 5 {
            return Err(AnalysisError::malformed(
                record,
                format!("empty lexeme in a {}-field record", fields.len()),
                span,
            ));
        }
        fields = vec![fields[0], ",", fields[3], fields[4]];
    }

    if fields.len() < 4 {
        return Err(AnalysisError::malformed(
            record,
            format!("expected 4 fields, found {}", fields.len()),
            span,
        ));
    }

    let code: i32 = fields[0].parse().map_err(|_| {
        AnalysisError::malformed(record, format!("invalid token code '{}'", fields[0]), span)
    })?;
    let kind = TokenKind::from_code(code).ok_or_else(|| {
        AnalysisError::malformed(record, format!("unknown token code {}", code), span)
    })?;
    let position: i64 = fields[2].parse().map_err(|_| {
        AnalysisError::malformed(record, format!("invalid table position '{}'", fields[2]), span)
    })?;
    let line_number: usize = fields[3].parse().map_err(|_| {
        AnalysisError::malformed(record, format!("invalid line number '{}'", fields[3]), span)
    })?;

    Ok(Token::new(kind, fields[1], line_number)
        .with_position(position)
        .with_span(span))
}

/// Read every record of a token file, skipping blank lines
pub fn read_tokens(source: &str) -> AnalysisResult<Vec<Token>> {
    let mut tokens = Vec::new();
    let mut offset = 0;

    for (index, raw) in source.split_inclusive('\n').enumerate() {
        let start = offset;
        offset += raw.len();

        let line = raw.trim_end_matches(['\r', '\n']);
        if line.trim().is_empty() {
            continue;
        }

        let span = Span::new(start, start + line.len());
        tokens.push(parse_record(line, index + 1, span)?);
    }

    log::debug!("read {} token records", tokens.len());
    Ok(tokens)
}
