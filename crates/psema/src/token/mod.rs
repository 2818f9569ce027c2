//! Token model for the classified token stream

mod kind;
mod occurrence;
mod record;

pub use kind::{KindSet, OperatorClass, TokenFamily, TokenKind, ValueType};
pub use occurrence::{Token, POSITION_NONE, POSITION_UNRESOLVED};
pub use record::{parse_record, read_tokens, split_fields};
