//! Filter parse errors.

use thiserror::Error;

/// Errors raised while tokenizing or parsing filter text.
///
/// Positions are character offsets into the filter text.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ParseError {
    #[error("Unexpected character '{ch}' at position {position}")]
    UnexpectedCharacter { ch: char, position: usize },

    #[error("Unterminated string literal starting at position {position}")]
    UnterminatedString { position: usize },

    #[error("Unterminated quoted identifier starting at position {position}")]
    UnterminatedIdentifier { position: usize },

    #[error("Expected {expected} at position {position}, found {found}")]
    UnexpectedToken {
        expected: String,
        found: String,
        position: usize,
    },

    #[error("Invalid number '{text}' at position {position}")]
    InvalidNumber { text: String, position: usize },

    #[error("Invalid geometry literal at position {position}: {reason}")]
    InvalidGeometry { reason: String, position: usize },

    #[error("Empty filter")]
    Empty,
}

impl ParseError {
    /// Character offset at which the error was detected
    pub fn position(&self) -> Option<usize> {
        match self {
            ParseError::UnexpectedCharacter { position, .. }
            | ParseError::UnterminatedString { position }
            | ParseError::UnterminatedIdentifier { position }
            | ParseError::UnexpectedToken { position, .. }
            | ParseError::InvalidNumber { position, .. }
            | ParseError::InvalidGeometry { position, .. } => Some(*position),
            ParseError::Empty => None,
        }
    }
}

/// Result type for filter parsing.
pub type ParseResult<T> = Result<T, ParseError>;
