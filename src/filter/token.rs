// Filter tokens for lexical analysis

use std::fmt;

#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    // Literals
    Identifier(String),
    QuotedIdentifier(String),
    Number(String),
    String(String),

    // Keywords
    And,
    Or,
    Not,
    In,
    Intersects,

    // Operators
    Plus,
    Minus,
    Equal,
    NotEqual,
    Less,
    Greater,
    LessEqual,
    GreaterEqual,

    // Delimiters
    LeftParen,
    RightParen,
    Comma,

    // Special
    Eof,
}

impl Token {
    /// Check if the token is a keyword
    pub fn is_keyword(&self) -> bool {
        matches!(
            self,
            Token::And | Token::Or | Token::Not | Token::In | Token::Intersects
        )
    }

    /// Convert a string to a keyword token if it matches
    pub fn keyword_from_str(s: &str) -> Option<Token> {
        match s.to_uppercase().as_str() {
            "AND" => Some(Token::And),
            "OR" => Some(Token::Or),
            "NOT" => Some(Token::Not),
            "IN" => Some(Token::In),
            "INTERSECTS" => Some(Token::Intersects),
            _ => None,
        }
    }

    /// Comparison operator tokens
    pub fn is_comparison(&self) -> bool {
        matches!(
            self,
            Token::Equal
                | Token::NotEqual
                | Token::Less
                | Token::Greater
                | Token::LessEqual
                | Token::GreaterEqual
        )
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::Identifier(name) => write!(f, "identifier {}", name),
            Token::QuotedIdentifier(name) => write!(f, "identifier \"{}\"", name),
            Token::Number(n) => write!(f, "number {}", n),
            Token::String(s) => write!(f, "string '{}'", s),
            Token::And => write!(f, "AND"),
            Token::Or => write!(f, "OR"),
            Token::Not => write!(f, "NOT"),
            Token::In => write!(f, "IN"),
            Token::Intersects => write!(f, "INTERSECTS"),
            Token::Plus => write!(f, "'+'"),
            Token::Minus => write!(f, "'-'"),
            Token::Equal => write!(f, "'='"),
            Token::NotEqual => write!(f, "'<>'"),
            Token::Less => write!(f, "'<'"),
            Token::Greater => write!(f, "'>'"),
            Token::LessEqual => write!(f, "'<='"),
            Token::GreaterEqual => write!(f, "'>='"),
            Token::LeftParen => write!(f, "'('"),
            Token::RightParen => write!(f, "')'"),
            Token::Comma => write!(f, "','"),
            Token::Eof => write!(f, "end of input"),
        }
    }
}

/// A token with its character span in the filter text
#[derive(Debug, Clone, PartialEq)]
pub struct SpannedToken {
    pub token: Token,
    pub start: usize,
    pub end: usize,
}

impl SpannedToken {
    pub fn new(token: Token, start: usize, end: usize) -> Self {
        Self { token, start, end }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keyword_detection() {
        assert!(Token::And.is_keyword());
        assert!(Token::Intersects.is_keyword());
        assert!(!Token::Identifier("test".to_string()).is_keyword());
        assert!(!Token::Equal.is_keyword());
    }

    #[test]
    fn test_keyword_from_str() {
        assert_eq!(Token::keyword_from_str("AND"), Some(Token::And));
        assert_eq!(Token::keyword_from_str("and"), Some(Token::And));
        assert_eq!(Token::keyword_from_str("Intersects"), Some(Token::Intersects));
        assert_eq!(Token::keyword_from_str("POLYGON"), None);
    }

    #[test]
    fn test_display() {
        assert_eq!(Token::Eof.to_string(), "end of input");
        assert_eq!(Token::NotEqual.to_string(), "'<>'");
        assert_eq!(Token::String("x".to_string()).to_string(), "string 'x'");
    }
}
