// Filter module - filter text parsing and AST representation

pub mod ast;
pub mod error;
pub mod lexer;
pub mod parser;
pub mod token;

pub use ast::*;
pub use error::{ParseError, ParseResult};
pub use lexer::Lexer;
pub use parser::Parser;
pub use token::*;

/// Parse filter text into an expression tree
pub fn parse(text: &str) -> ParseResult<Expression> {
    Parser::new(text)?.parse()
}
