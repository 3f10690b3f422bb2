// Filter lexer - tokenizes filter text

use super::error::{ParseError, ParseResult};
use super::token::{SpannedToken, Token};

pub struct Lexer {
    input: Vec<char>,
    position: usize,
}

impl Lexer {
    pub fn new(input: &str) -> Self {
        Lexer {
            input: input.chars().collect(),
            position: 0,
        }
    }

    /// Get the next token from the input
    pub fn next_token(&mut self) -> ParseResult<SpannedToken> {
        self.skip_whitespace();

        let start = self.position;
        let ch = match self.current_char() {
            Some(ch) => ch,
            None => return Ok(SpannedToken::new(Token::Eof, start, start)),
        };

        let token = match ch {
            '+' => {
                self.advance();
                Token::Plus
            }
            '-' => {
                self.advance();
                // Check for comments
                if self.current_char() == Some('-') {
                    self.skip_comment();
                    return self.next_token();
                }
                Token::Minus
            }
            '=' => {
                self.advance();
                Token::Equal
            }
            '<' => {
                self.advance();
                if self.current_char() == Some('=') {
                    self.advance();
                    Token::LessEqual
                } else if self.current_char() == Some('>') {
                    self.advance();
                    Token::NotEqual
                } else {
                    Token::Less
                }
            }
            '>' => {
                self.advance();
                if self.current_char() == Some('=') {
                    self.advance();
                    Token::GreaterEqual
                } else {
                    Token::Greater
                }
            }
            '!' => {
                self.advance();
                if self.current_char() == Some('=') {
                    self.advance();
                    Token::NotEqual
                } else {
                    return Err(ParseError::UnexpectedCharacter {
                        ch: '!',
                        position: start,
                    });
                }
            }
            '(' => {
                self.advance();
                Token::LeftParen
            }
            ')' => {
                self.advance();
                Token::RightParen
            }
            ',' => {
                self.advance();
                Token::Comma
            }
            '\'' => self.read_string()?,
            '"' => self.read_quoted_identifier()?,
            c if c.is_alphabetic() || c == '_' => self.read_identifier(),
            c if c.is_ascii_digit() => self.read_number(),
            '.' if self.peek().map_or(false, |c| c.is_ascii_digit()) => self.read_number(),
            c => {
                return Err(ParseError::UnexpectedCharacter {
                    ch: c,
                    position: start,
                })
            }
        };

        Ok(SpannedToken::new(token, start, self.position))
    }

    /// Slice of the original text between two character offsets
    pub fn slice(&self, start: usize, end: usize) -> String {
        let end = end.min(self.input.len());
        let start = start.min(end);
        self.input[start..end].iter().collect()
    }

    fn current_char(&self) -> Option<char> {
        self.input.get(self.position).copied()
    }

    /// Advance to the next character
    fn advance(&mut self) {
        if self.position < self.input.len() {
            self.position += 1;
        }
    }

    /// Peek at the next character without advancing
    fn peek(&self) -> Option<char> {
        self.input.get(self.position + 1).copied()
    }

    /// Skip whitespace characters
    fn skip_whitespace(&mut self) {
        while let Some(ch) = self.current_char() {
            if ch.is_whitespace() {
                self.advance();
            } else {
                break;
            }
        }
    }

    /// Skip single-line comments starting with --
    fn skip_comment(&mut self) {
        while let Some(ch) = self.current_char() {
            self.advance();
            if ch == '\n' {
                break;
            }
        }
    }

    /// Read an identifier or keyword
    fn read_identifier(&mut self) -> Token {
        let mut identifier = String::new();

        while let Some(ch) = self.current_char() {
            if ch.is_alphanumeric() || ch == '_' {
                identifier.push(ch);
                self.advance();
            } else {
                break;
            }
        }

        // Check if it's a keyword
        Token::keyword_from_str(&identifier).unwrap_or(Token::Identifier(identifier))
    }

    /// Read a quoted identifier (e.g., "attribute name")
    fn read_quoted_identifier(&mut self) -> ParseResult<Token> {
        let start = self.position;
        self.advance(); // Skip opening quote
        let mut identifier = String::new();

        loop {
            match self.current_char() {
                Some('"') => {
                    self.advance(); // Skip closing quote
                    return Ok(Token::QuotedIdentifier(identifier));
                }
                Some('\\') if matches!(self.peek(), Some('"' | '\\')) => {
                    // Handle escaped quotes and backslashes
                    self.advance();
                    if let Some(escaped) = self.current_char() {
                        identifier.push(escaped);
                    }
                    self.advance();
                }
                Some(ch) => {
                    identifier.push(ch);
                    self.advance();
                }
                None => return Err(ParseError::UnterminatedIdentifier { position: start }),
            }
        }
    }

    /// Read a string literal
    fn read_string(&mut self) -> ParseResult<Token> {
        let start = self.position;
        self.advance(); // Skip opening quote
        let mut string = String::new();

        loop {
            match self.current_char() {
                Some('\'') => {
                    if self.peek() == Some('\'') {
                        // Handle escaped single quotes
                        string.push('\'');
                        self.advance();
                        self.advance();
                    } else {
                        self.advance(); // Skip closing quote
                        return Ok(Token::String(string));
                    }
                }
                Some(ch) => {
                    string.push(ch);
                    self.advance();
                }
                None => return Err(ParseError::UnterminatedString { position: start }),
            }
        }
    }

    /// Read a number (integer, decimal, optional exponent)
    fn read_number(&mut self) -> Token {
        let mut number = String::new();
        let mut has_dot = false;

        while let Some(ch) = self.current_char() {
            if ch.is_ascii_digit() {
                number.push(ch);
                self.advance();
            } else if ch == '.' && !has_dot {
                has_dot = true;
                number.push(ch);
                self.advance();
            } else {
                break;
            }
        }

        // Exponent: e5, E-3, e+10
        if let Some(e @ ('e' | 'E')) = self.current_char() {
            let next = self.peek();
            let signed = matches!(next, Some('+' | '-'))
                && self
                    .input
                    .get(self.position + 2)
                    .map_or(false, |c| c.is_ascii_digit());
            if signed || next.map_or(false, |c| c.is_ascii_digit()) {
                number.push(e);
                self.advance();
                if signed {
                    if let Some(sign) = self.current_char() {
                        number.push(sign);
                    }
                    self.advance();
                }
                while let Some(ch) = self.current_char() {
                    if !ch.is_ascii_digit() {
                        break;
                    }
                    number.push(ch);
                    self.advance();
                }
            }
        }

        Token::Number(number)
    }

    /// Tokenize the entire input
    pub fn tokenize(&mut self) -> ParseResult<Vec<SpannedToken>> {
        let mut tokens = Vec::new();

        loop {
            let token = self.next_token()?;
            let done = token.token == Token::Eof;
            tokens.push(token);
            if done {
                break;
            }
        }

        Ok(tokens)
    }
}
