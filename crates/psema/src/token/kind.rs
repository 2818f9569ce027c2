//! Token kinds of the pseudocode language and their families

use serde::{Serialize, Serializer};
use std::fmt;

/// All token kinds produced by the upstream lexer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    // === Keywords ===
    Program,
    Begin,
    End,
    Read,
    Write,
    If,
    Else,
    While,
    Repeat,
    Until,
    IntKw,
    RealKw,
    StringKw,
    BooleanKw,
    Var,
    Then,
    Do,

    // === Arithmetic operators ===
    Mul,
    Div,
    Mod,
    Add,
    Sub,

    // === Assignment ===
    Assign,

    // === Relational operators ===
    Lt,
    Le,
    Gt,
    Ge,
    Eq,
    Ne,

    // === Logical operators ===
    And,
    Or,
    Not,

    // === Identifiers ===
    IntId,
    RealId,
    StringId,
    BooleanId,
    /// Untyped identifier; the lexer emits it for the program name
    GeneralId,

    // === Constants ===
    IntConst,
    RealConst,
    StringConst,
    True,
    False,

    // === Punctuation ===
    LParen,
    RParen,
    Semicolon,
    Comma,
}

/// Operator classes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OperatorClass {
    Arithmetic,
    Assignment,
    Relational,
    Logical,
}

/// Lexical family of a token kind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenFamily {
    Keyword,
    Operator(OperatorClass),
    Identifier,
    Constant,
    Punctuation,
}

/// The four declarable value types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ValueType {
    Int,
    Real,
    String,
    Boolean,
}

impl ValueType {
    /// Initial value recorded in the symbol table
    pub fn default_value(self) -> &'static str {
        match self {
            ValueType::Int => "0",
            ValueType::Real => "0.0",
            ValueType::String => "null",
            ValueType::Boolean => "true",
        }
    }

    /// Identifier kind that carries this type
    pub fn identifier_kind(self) -> TokenKind {
        match self {
            ValueType::Int => TokenKind::IntId,
            ValueType::Real => TokenKind::RealId,
            ValueType::String => TokenKind::StringId,
            ValueType::Boolean => TokenKind::BooleanId,
        }
    }

    /// Canonical (English) type name
    pub fn name(self) -> &'static str {
        match self {
            ValueType::Int => "int",
            ValueType::Real => "real",
            ValueType::String => "string",
            ValueType::Boolean => "boolean",
        }
    }
}

impl fmt::Display for ValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl TokenKind {
    pub const ALL: [TokenKind; 46] = [
        TokenKind::Program,
        TokenKind::Begin,
        TokenKind::End,
        TokenKind::Read,
        TokenKind::Write,
        TokenKind::If,
        TokenKind::Else,
        TokenKind::While,
        TokenKind::Repeat,
        TokenKind::Until,
        TokenKind::IntKw,
        TokenKind::RealKw,
        TokenKind::StringKw,
        TokenKind::BooleanKw,
        TokenKind::Var,
        TokenKind::Then,
        TokenKind::Do,
        TokenKind::Mul,
        TokenKind::Div,
        TokenKind::Mod,
        TokenKind::Add,
        TokenKind::Sub,
        TokenKind::Assign,
        TokenKind::Lt,
        TokenKind::Le,
        TokenKind::Gt,
        TokenKind::Ge,
        TokenKind::Eq,
        TokenKind::Ne,
        TokenKind::And,
        TokenKind::Or,
        TokenKind::Not,
        TokenKind::IntId,
        TokenKind::RealId,
        TokenKind::StringId,
        TokenKind::BooleanId,
        TokenKind::GeneralId,
        TokenKind::IntConst,
        TokenKind::RealConst,
        TokenKind::StringConst,
        TokenKind::True,
        TokenKind::False,
        TokenKind::LParen,
        TokenKind::RParen,
        TokenKind::Semicolon,
        TokenKind::Comma,
    ];

    /// Numeric code used by the token-record and table files
    pub fn code(self) -> i32 {
        match self {
            TokenKind::Program => -1,
            TokenKind::Begin => -2,
            TokenKind::End => -3,
            TokenKind::Read => -4,
            TokenKind::Write => -5,
            TokenKind::If => -6,
            TokenKind::Else => -7,
            TokenKind::While => -8,
            TokenKind::Repeat => -9,
            TokenKind::Until => -10,
            TokenKind::IntKw => -11,
            TokenKind::RealKw => -12,
            TokenKind::StringKw => -13,
            TokenKind::BooleanKw => -14,
            TokenKind::Var => -15,
            TokenKind::Then => -16,
            TokenKind::Do => -17,
            TokenKind::Mul => -21,
            TokenKind::Div => -22,
            TokenKind::Mod => -23,
            TokenKind::Add => -24,
            TokenKind::Sub => -25,
            TokenKind::Assign => -26,
            TokenKind::Lt => -31,
            TokenKind::Le => -32,
            TokenKind::Gt => -33,
            TokenKind::Ge => -34,
            TokenKind::Eq => -35,
            TokenKind::Ne => -36,
            TokenKind::And => -41,
            TokenKind::Or => -42,
            TokenKind::Not => -43,
            TokenKind::IntId => -51,
            TokenKind::RealId => -52,
            TokenKind::StringId => -53,
            TokenKind::BooleanId => -54,
            TokenKind::GeneralId => -55,
            TokenKind::IntConst => -61,
            TokenKind::RealConst => -62,
            TokenKind::StringConst => -63,
            TokenKind::True => -64,
            TokenKind::False => -65,
            TokenKind::LParen => -73,
            TokenKind::RParen => -74,
            TokenKind::Semicolon => -75,
            TokenKind::Comma => -76,
        }
    }

    pub fn from_code(code: i32) -> Option<TokenKind> {
        TokenKind::ALL.iter().copied().find(|kind| kind.code() == code)
    }

    pub fn family(self) -> TokenFamily {
        use TokenKind::*;
        match self {
            Program | Begin | End | Read | Write | If | Else | While | Repeat | Until
            | IntKw | RealKw | StringKw | BooleanKw | Var | Then | Do => TokenFamily::Keyword,
            Mul | Div | Mod | Add | Sub => TokenFamily::Operator(OperatorClass::Arithmetic),
            Assign => TokenFamily::Operator(OperatorClass::Assignment),
            Lt | Le | Gt | Ge | Eq | Ne => TokenFamily::Operator(OperatorClass::Relational),
            And | Or | Not => TokenFamily::Operator(OperatorClass::Logical),
            IntId | RealId | StringId | BooleanId | GeneralId => TokenFamily::Identifier,
            IntConst | RealConst | StringConst | True | False => TokenFamily::Constant,
            LParen | RParen | Semicolon | Comma => TokenFamily::Punctuation,
        }
    }

    pub fn is_identifier(self) -> bool {
        self.family() == TokenFamily::Identifier
    }

    pub fn is_relational(self) -> bool {
        self.family() == TokenFamily::Operator(OperatorClass::Relational)
    }

    pub fn is_logical(self) -> bool {
        self.family() == TokenFamily::Operator(OperatorClass::Logical)
    }

    pub fn is_arithmetic(self) -> bool {
        self.family() == TokenFamily::Operator(OperatorClass::Arithmetic)
    }

    /// Relational or logical operator, the operators that make a condition
    pub fn is_condition_operator(self) -> bool {
        self.is_relational() || self.is_logical()
    }

    /// Declared type of a typed identifier; `None` for every other kind
    pub fn value_type(self) -> Option<ValueType> {
        match self {
            TokenKind::IntId => Some(ValueType::Int),
            TokenKind::RealId => Some(ValueType::Real),
            TokenKind::StringId => Some(ValueType::String),
            TokenKind::BooleanId => Some(ValueType::Boolean),
            _ => None,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            TokenKind::Program => "'program'",
            TokenKind::Begin => "'begin'",
            TokenKind::End => "'end'",
            TokenKind::Read => "'read'",
            TokenKind::Write => "'write'",
            TokenKind::If => "'if'",
            TokenKind::Else => "'else'",
            TokenKind::While => "'while'",
            TokenKind::Repeat => "'repeat'",
            TokenKind::Until => "'until'",
            TokenKind::IntKw => "'int'",
            TokenKind::RealKw => "'real'",
            TokenKind::StringKw => "'string'",
            TokenKind::BooleanKw => "'boolean'",
            TokenKind::Var => "'var'",
            TokenKind::Then => "'then'",
            TokenKind::Do => "'do'",
            TokenKind::Mul => "'*'",
            TokenKind::Div => "'/'",
            TokenKind::Mod => "'%'",
            TokenKind::Add => "'+'",
            TokenKind::Sub => "'-'",
            TokenKind::Assign => "assignment",
            TokenKind::Lt => "'<'",
            TokenKind::Le => "'<='",
            TokenKind::Gt => "'>'",
            TokenKind::Ge => "'>='",
            TokenKind::Eq => "'=='",
            TokenKind::Ne => "'!='",
            TokenKind::And => "'and'",
            TokenKind::Or => "'or'",
            TokenKind::Not => "'not'",
            TokenKind::IntId => "int identifier",
            TokenKind::RealId => "real identifier",
            TokenKind::StringId => "string identifier",
            TokenKind::BooleanId => "boolean identifier",
            TokenKind::GeneralId => "untyped identifier",
            TokenKind::IntConst => "int constant",
            TokenKind::RealConst => "real constant",
            TokenKind::StringConst => "string constant",
            TokenKind::True => "'true'",
            TokenKind::False => "'false'",
            TokenKind::LParen => "'('",
            TokenKind::RParen => "')'",
            TokenKind::Semicolon => "';'",
            TokenKind::Comma => "','",
        }
    }

    fn bit(self) -> u64 {
        1 << (self as u64)
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl Serialize for TokenKind {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_i32(self.code())
    }
}

/// Set of token kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct KindSet(u64);

impl KindSet {
    pub const fn empty() -> Self {
        Self(0)
    }

    pub fn of(kinds: &[TokenKind]) -> Self {
        kinds.iter().copied().collect()
    }

    /// All kinds satisfying `predicate`
    pub fn matching(predicate: impl Fn(TokenKind) -> bool) -> Self {
        TokenKind::ALL.iter().copied().filter(|&kind| predicate(kind)).collect()
    }

    pub fn insert(&mut self, kind: TokenKind) {
        self.0 |= kind.bit();
    }

    pub fn contains(&self, kind: TokenKind) -> bool {
        self.0 & kind.bit() != 0
    }

    pub fn union(self, other: KindSet) -> KindSet {
        KindSet(self.0 | other.0)
    }

    pub fn intersection(self, other: KindSet) -> KindSet {
        KindSet(self.0 & other.0)
    }

    pub fn intersects(&self, other: KindSet) -> bool {
        self.0 & other.0 != 0
    }

    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }

    pub fn iter(&self) -> impl Iterator<Item = TokenKind> + '_ {
        TokenKind::ALL.iter().copied().filter(|&kind| self.contains(kind))
    }
}

impl FromIterator<TokenKind> for KindSet {
    fn from_iter<I: IntoIterator<Item = TokenKind>>(iter: I) -> Self {
        let mut set = KindSet::empty();
        for kind in iter {
            set.insert(kind);
        }
        set
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_codes_round_trip() {
        for kind in TokenKind::ALL {
            assert_eq!(TokenKind::from_code(kind.code()), Some(kind));
        }
        assert_eq!(TokenKind::from_code(-18), None);
        assert_eq!(TokenKind::from_code(0), None);
    }

    #[test]
    fn test_families() {
        assert_eq!(TokenKind::Begin.family(), TokenFamily::Keyword);
        assert_eq!(TokenKind::Assign.family(), TokenFamily::Operator(OperatorClass::Assignment));
        assert_eq!(TokenKind::True.family(), TokenFamily::Constant);
        assert_eq!(TokenKind::Comma.family(), TokenFamily::Punctuation);
        assert!(TokenKind::GeneralId.is_identifier());
        assert!(!TokenKind::IntConst.is_identifier());
    }

    #[test]
    fn test_condition_operators() {
        let ops = KindSet::matching(TokenKind::is_condition_operator);
        assert_eq!(ops.iter().count(), 9);
        assert!(ops.contains(TokenKind::Ne));
        assert!(ops.contains(TokenKind::Not));
        assert!(!ops.contains(TokenKind::Assign));
        assert!(!ops.contains(TokenKind::Add));
    }

    #[test]
    fn test_value_types() {
        assert_eq!(TokenKind::RealId.value_type(), Some(ValueType::Real));
        assert_eq!(TokenKind::GeneralId.value_type(), None);
        for ty in [ValueType::Int, ValueType::Real, ValueType::String, ValueType::Boolean] {
            assert_eq!(ty.identifier_kind().value_type(), Some(ty));
        }
        assert_eq!(ValueType::Boolean.default_value(), "true");
        assert_eq!(ValueType::String.name(), "string");
        assert_eq!(ValueType::Real.to_string(), "real");
    }

    #[test]
    fn test_kind_set() {
        let mut set = KindSet::of(&[TokenKind::IntId, TokenKind::Add]);
        set.insert(TokenKind::IntConst);
        assert!(set.contains(TokenKind::IntConst));
        assert!(!set.contains(TokenKind::RealConst));
        assert!(set.intersects(KindSet::of(&[TokenKind::Add, TokenKind::Sub])));
        assert!(set.intersection(KindSet::of(&[TokenKind::Comma])).is_empty());
    }
}
