//! Symbol table, address table and scope stack

use crate::token::{TokenKind, ValueType};
use serde::Serialize;
use std::collections::HashMap;

/// A declared variable
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SymbolEntry {
    pub kind: TokenKind,
    pub lexeme: String,
    pub value: &'static str,
    pub scope: String,
    pub address: usize,
}

/// The program-level identifier
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AddressEntry {
    pub kind: TokenKind,
    pub lexeme: String,
    pub line: usize,
    /// Instruction-control value; always 0 in this language
    pub vci: u32,
}

/// Declared variables plus the address of every known name
///
/// Names are unique across the whole program. The program identifier is
/// known at address 0 but has no symbol entry.
#[derive(Debug, Default)]
pub struct SymbolTable {
    entries: Vec<SymbolEntry>,
    addresses: HashMap<String, usize>,
}

impl SymbolTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_known(&self, lexeme: &str) -> bool {
        self.addresses.contains_key(lexeme)
    }

    pub fn address_of(&self, lexeme: &str) -> Option<usize> {
        self.addresses.get(lexeme).copied()
    }

    /// Number of known names, program identifiers included
    pub fn known_count(&self) -> usize {
        self.addresses.len()
    }

    /// Register a program name; returns false if the name was already known
    pub fn declare_program(&mut self, lexeme: &str) -> bool {
        if self.is_known(lexeme) {
            return false;
        }
        self.addresses.insert(lexeme.to_string(), 0);
        true
    }

    /// Declare a variable, returning its address; `None` if the name is taken
    pub fn declare(&mut self, lexeme: &str, ty: ValueType, scope: &str) -> Option<usize> {
        if self.is_known(lexeme) {
            return None;
        }

        let address = self.known_count();
        self.entries.push(SymbolEntry {
            kind: ty.identifier_kind(),
            lexeme: lexeme.to_string(),
            value: ty.default_value(),
            scope: scope.to_string(),
            address,
        });
        self.addresses.insert(lexeme.to_string(), address);
        Some(address)
    }

    pub fn lookup(&self, lexeme: &str) -> Option<&SymbolEntry> {
        self.entries.iter().find(|entry| entry.lexeme == lexeme)
    }

    /// Declared type of a variable
    pub fn type_of(&self, lexeme: &str) -> Option<ValueType> {
        self.lookup(lexeme).and_then(|entry| entry.kind.value_type())
    }

    pub fn entries(&self) -> &[SymbolEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Program-level identifiers in declaration order
#[derive(Debug, Default)]
pub struct AddressTable {
    entries: Vec<AddressEntry>,
}

impl AddressTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, lexeme: &str, line: usize) {
        self.entries.push(AddressEntry {
            kind: TokenKind::GeneralId,
            lexeme: lexeme.to_string(),
            line,
            vci: 0,
        });
    }

    pub fn entries(&self) -> &[AddressEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Stack of scope names; pushed per program identifier and never popped
#[derive(Debug, Default)]
pub struct ScopeStack {
    names: Vec<String>,
}

impl ScopeStack {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, name: &str) {
        self.names.push(name.to_string());
    }

    pub fn current(&self) -> Option<&str> {
        self.names.last().map(String::as_str)
    }

    pub fn depth(&self) -> usize {
        self.names.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_addresses_follow_known_names() {
        let mut table = SymbolTable::new();
        assert!(table.declare_program("demo"));
        assert_eq!(table.declare("a", ValueType::Int, "demo"), Some(1));
        assert_eq!(table.declare("b", ValueType::Real, "demo"), Some(2));

        assert_eq!(table.address_of("demo"), Some(0));
        assert_eq!(table.address_of("b"), Some(2));
        assert_eq!(table.len(), 2);
        assert_eq!(table.type_of("b"), Some(ValueType::Real));
        assert_eq!(table.type_of("demo"), None);
    }

    #[test]
    fn test_names_are_unique() {
        let mut table = SymbolTable::new();
        table.declare_program("demo");
        assert!(!table.declare_program("demo"));
        assert_eq!(table.declare("demo", ValueType::Int, "demo"), None);
        table.declare("x", ValueType::Boolean, "demo").unwrap();
        assert_eq!(table.declare("x", ValueType::String, "demo"), None);
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn test_entry_defaults() {
        let mut table = SymbolTable::new();
        table.declare("s", ValueType::String, "Main").unwrap();
        let entry = table.lookup("s").unwrap();
        assert_eq!(entry.kind, TokenKind::StringId);
        assert_eq!(entry.value, "null");
        assert_eq!(entry.scope, "Main");
        assert_eq!(entry.address, 0);
    }

    #[test]
    fn test_scope_stack() {
        let mut scopes = ScopeStack::new();
        assert_eq!(scopes.current(), None);
        scopes.push("demo");
        assert_eq!(scopes.current(), Some("demo"));
        assert_eq!(scopes.depth(), 1);
    }
}
