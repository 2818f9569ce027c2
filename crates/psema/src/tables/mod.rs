//! Output tables
//!
//! Renders the symbol table, address table and annotated token table of a
//! finished analysis. Rows are comma-space separated and the kind column
//! carries the numeric token code read by the code generator.

use crate::sema::{AddressEntry, Analysis, SymbolEntry};
use crate::token::Token;
use serde::Serialize;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

pub const SYMBOL_TABLE_FILE: &str = "symbolTable.txt";
pub const ADDRESS_TABLE_FILE: &str = "addressesTable.txt";
pub const TOKEN_TABLE_FILE: &str = "tokensTable.txt";
pub const JSON_TABLES_FILE: &str = "tables.json";

/// Output format for the tables
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// One text file per table
    #[default]
    Text,
    /// A single JSON document holding all three tables
    Json,
}

pub fn symbol_row(entry: &SymbolEntry) -> String {
    format!("{}, {}, {}, {}", entry.kind.code(), entry.lexeme, entry.value, entry.scope)
}

pub fn address_row(entry: &AddressEntry) -> String {
    format!("{}, {}, {}, {}", entry.kind.code(), entry.lexeme, entry.line, entry.vci)
}

pub fn token_row(token: &Token) -> String {
    format!("{}, {}, {}, {}", token.kind.code(), token.lexeme, token.table_index(), token.line)
}

/// The three rendered artifacts
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tables {
    pub symbols: Vec<String>,
    pub addresses: Vec<String>,
    pub tokens: Vec<String>,
}

#[derive(Serialize)]
struct JsonTables<'a> {
    symbols: &'a [SymbolEntry],
    addresses: &'a [AddressEntry],
    tokens: &'a [Token],
}

impl Tables {
    pub fn build(analysis: &Analysis) -> Self {
        Self {
            symbols: analysis.symbols.entries().iter().map(symbol_row).collect(),
            addresses: analysis.addresses.entries().iter().map(address_row).collect(),
            tokens: analysis.tokens.iter().map(token_row).collect(),
        }
    }

    pub fn to_json(analysis: &Analysis) -> serde_json::Result<String> {
        serde_json::to_string_pretty(&JsonTables {
            symbols: analysis.symbols.entries(),
            addresses: analysis.addresses.entries(),
            tokens: &analysis.tokens,
        })
    }

    /// Table text with one row per line
    pub fn render(rows: &[String]) -> String {
        let mut output = String::new();
        for row in rows {
            output.push_str(row);
            output.push('\n');
        }
        output
    }

    /// Write the three table files into `dir`, replacing earlier ones
    pub fn write_to(&self, dir: &Path) -> io::Result<Vec<PathBuf>> {
        fs::create_dir_all(dir)?;

        let files = [
            (SYMBOL_TABLE_FILE, &self.symbols),
            (ADDRESS_TABLE_FILE, &self.addresses),
            (TOKEN_TABLE_FILE, &self.tokens),
        ];

        let mut written = Vec::with_capacity(files.len());
        for (name, rows) in files {
            let path = dir.join(name);
            fs::write(&path, Self::render(rows))?;
            written.push(path);
        }
        Ok(written)
    }

    /// Remove table files left by a previous run
    pub fn remove_stale(dir: &Path) -> io::Result<()> {
        for name in [SYMBOL_TABLE_FILE, ADDRESS_TABLE_FILE, TOKEN_TABLE_FILE, JSON_TABLES_FILE] {
            match fs::remove_file(dir.join(name)) {
                Ok(()) => {}
                Err(e) if e.kind() == io::ErrorKind::NotFound => {}
                Err(e) => return Err(e),
            }
        }
        Ok(())
    }
}
