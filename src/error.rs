use thiserror::Error;

use crate::sql::types::Type;

/// Custom Result type for query engine operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for the query engine
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    /// Lexing or parsing error; position is a character offset into the query text
    #[error("syntax error at position {position}: {message}")]
    Syntax { position: usize, message: String },

    // Planning errors
    #[error("table not found: {0}")]
    TableNotFound(String),
    #[error("table already exists: {0}")]
    TableExists(String),
    #[error("column not found: {0}")]
    ColumnNotFound(String),
    #[error("ambiguous column reference: {0}")]
    AmbiguousColumn(String),
    #[error("incompatible types: {left}, {right}")]
    IncompatibleTypes { left: Type, right: Type },
    #[error("invalid condition: expected boolean, got {0}")]
    InvalidCondition(Type),
    #[error("duplicate column: {0}")]
    DuplicateColumn(String),
    #[error("empty select list")]
    EmptySelectList,
    #[error("not supported: {0}")]
    Unsupported(String),

    // Row shape errors
    #[error("wrong number of values: expected {expected}, got {got}")]
    WrongValueCount { expected: usize, got: usize },
    #[error("wrong type for column {column}: expected {expected}, got {found}")]
    TypeMismatch {
        column: String,
        expected: Type,
        found: Type,
    },
    #[error("column {0} cannot be null")]
    NullConstraint(String),

    // Literal errors
    #[error("not a valid decimal number: {0}")]
    InvalidDecimal(String),
    #[error("not a valid date: {0}")]
    InvalidDate(String),
}

impl Error {
    pub fn syntax(position: usize, message: impl Into<String>) -> Self {
        Error::Syntax {
            position,
            message: message.into(),
        }
    }

    /// Character offset of a syntax error
    pub fn position(&self) -> Option<usize> {
        match self {
            Error::Syntax { position, .. } => Some(*position),
            _ => None,
        }
    }

    pub fn is_syntax(&self) -> bool {
        matches!(self, Error::Syntax { .. })
    }

    /// Whether this error was raised while binding a statement against the catalog
    pub fn is_plan(&self) -> bool {
        matches!(
            self,
            Error::TableNotFound(_)
                | Error::ColumnNotFound(_)
                | Error::AmbiguousColumn(_)
                | Error::IncompatibleTypes { .. }
                | Error::InvalidCondition(_)
                | Error::DuplicateColumn(_)
                | Error::EmptySelectList
                | Error::Unsupported(_)
        )
    }
}
