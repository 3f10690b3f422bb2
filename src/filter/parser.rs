// Filter parser - converts tokens to an expression tree
//
// Precedence, lowest first: OR, AND, NOT (prefix), comparison, primary.

use super::ast::*;
use super::error::{ParseError, ParseResult};
use super::lexer::Lexer;
use super::token::{SpannedToken, Token};
use crate::feature::geometry::parse_wkt;

/// Geometry tags accepted as bare WKT literals
const WKT_TAGS: &[&str] = &[
    "POINT",
    "LINESTRING",
    "POLYGON",
    "MULTIPOINT",
    "MULTILINESTRING",
    "MULTIPOLYGON",
    "GEOMETRYCOLLECTION",
];

pub struct Parser {
    lexer: Lexer,
    tokens: Vec<SpannedToken>,
    position: usize,
}

impl Parser {
    pub fn new(text: &str) -> ParseResult<Self> {
        let mut lexer = Lexer::new(text);
        let tokens = lexer.tokenize()?;
        Ok(Parser {
            lexer,
            tokens,
            position: 0,
        })
    }

    /// Parse a complete filter
    pub fn parse(&mut self) -> ParseResult<Expression> {
        if self.match_token(&Token::Eof) {
            return Err(ParseError::Empty);
        }
        let expr = self.parse_expression()?;
        self.expect_token(Token::Eof, "end of filter")?;
        Ok(expr)
    }

    /// Parse expression
    fn parse_expression(&mut self) -> ParseResult<Expression> {
        self.parse_or()
    }

    /// Parse OR expression
    fn parse_or(&mut self) -> ParseResult<Expression> {
        let mut operands = vec![self.parse_and()?];

        while self.match_token(&Token::Or) {
            self.advance();
            operands.push(self.parse_and()?);
        }

        Ok(Expression::or(operands))
    }

    /// Parse AND expression
    fn parse_and(&mut self) -> ParseResult<Expression> {
        let mut operands = vec![self.parse_not()?];

        while self.match_token(&Token::And) {
            self.advance();
            operands.push(self.parse_not()?);
        }

        Ok(Expression::and(operands))
    }

    /// Parse NOT expression
    fn parse_not(&mut self) -> ParseResult<Expression> {
        if self.match_token(&Token::Not) {
            self.advance();
            let operand = self.parse_not()?;
            Ok(Expression::not(operand))
        } else {
            self.parse_comparison()
        }
    }

    /// Parse comparison or predicate
    fn parse_comparison(&mut self) -> ParseResult<Expression> {
        match self.current_token() {
            Token::LeftParen => {
                self.advance();
                let expr = self.parse_expression()?;
                self.expect_token(Token::RightParen, "')'")?;
                Ok(expr)
            }
            Token::Intersects => self.parse_spatial(),
            Token::In => self.parse_identifier_set(),
            _ => {
                let left = self.parse_operand()?;

                let op = match self.current_token() {
                    Token::Equal => ComparisonOperator::Equal,
                    Token::NotEqual => ComparisonOperator::NotEqual,
                    Token::Less => ComparisonOperator::Less,
                    Token::LessEqual => ComparisonOperator::LessEqual,
                    Token::Greater => ComparisonOperator::Greater,
                    Token::GreaterEqual => ComparisonOperator::GreaterEqual,
                    _ => return Err(self.unexpected("comparison operator")),
                };
                self.advance();

                let right = self.parse_operand()?;
                Ok(Expression::comparison(left, op, right))
            }
        }
    }

    /// Parse an attribute reference or a literal
    fn parse_operand(&mut self) -> ParseResult<Operand> {
        match self.current_token() {
            Token::Identifier(name) | Token::QuotedIdentifier(name) => {
                self.advance();
                Ok(Operand::Attribute(name))
            }
            Token::String(s) => {
                self.advance();
                Ok(Operand::Literal(Literal::Text(s)))
            }
            Token::Number(_) => self.parse_number(false).map(Operand::Literal),
            Token::Minus => {
                self.advance();
                self.parse_number(true).map(Operand::Literal)
            }
            Token::Plus => {
                self.advance();
                self.parse_number(false).map(Operand::Literal)
            }
            _ => Err(self.unexpected("attribute or literal")),
        }
    }

    /// Parse a numeric literal
    fn parse_number(&mut self, negative: bool) -> ParseResult<Literal> {
        let position = self.current_position();
        let text = match self.current_token() {
            Token::Number(n) => n,
            _ => return Err(self.unexpected("number")),
        };
        self.advance();

        let signed = if negative {
            format!("-{}", text)
        } else {
            text.clone()
        };

        let integral = !text.contains(['.', 'e', 'E']);
        if integral {
            if let Ok(i) = signed.parse::<i64>() {
                return Ok(Literal::Integer(i));
            }
        }

        // Integers that overflow i64 fall back to floating point
        match signed.parse::<f64>() {
            Ok(f) if f.is_finite() => Ok(Literal::Float(f)),
            _ => Err(ParseError::InvalidNumber { text, position }),
        }
    }

    /// Parse INTERSECTS(attribute, geometry)
    fn parse_spatial(&mut self) -> ParseResult<Expression> {
        self.expect_token(Token::Intersects, "INTERSECTS")?;
        self.expect_token(Token::LeftParen, "'('")?;

        let attribute = self.expect_identifier()?;
        self.expect_token(Token::Comma, "','")?;
        let geometry = self.parse_geometry_literal()?;

        self.expect_token(Token::RightParen, "')'")?;

        Ok(Expression::intersects(attribute, geometry))
    }

    /// Parse a WKT geometry, bare or quoted
    fn parse_geometry_literal(&mut self) -> ParseResult<geo_types::Geometry<f64>> {
        let position = self.current_position();

        let text = match self.current_token() {
            Token::String(s) => {
                self.advance();
                s
            }
            Token::Identifier(tag) if WKT_TAGS.contains(&tag.to_uppercase().as_str()) => {
                self.capture_wkt()?
            }
            _ => return Err(self.unexpected("geometry literal")),
        };

        parse_wkt(&text).map_err(|e| ParseError::InvalidGeometry {
            reason: e.to_string(),
            position,
        })
    }

    /// Capture the source text of a bare WKT literal: tag, optional
    /// dimension, then either EMPTY or a balanced parenthesized body.
    fn capture_wkt(&mut self) -> ParseResult<String> {
        let start = self.tokens[self.position].start;
        self.advance();

        if let Token::Identifier(dim) = self.current_token() {
            let dim = dim.to_uppercase();
            if dim == "EMPTY" {
                let end = self.tokens[self.position].end;
                self.advance();
                return Ok(self.lexer.slice(start, end));
            }
            if matches!(dim.as_str(), "Z" | "M" | "ZM") {
                self.advance();
            }
        }

        self.expect_token(Token::LeftParen, "'('")?;
        let mut depth = 1usize;
        let end = loop {
            match self.current_token() {
                Token::LeftParen => depth += 1,
                Token::RightParen => {
                    depth -= 1;
                    if depth == 0 {
                        let end = self.tokens[self.position].end;
                        self.advance();
                        break end;
                    }
                }
                Token::Eof => return Err(self.unexpected("')'")),
                _ => {}
            }
            self.advance();
        };

        Ok(self.lexer.slice(start, end))
    }

    /// Parse IN ('id', ...)
    fn parse_identifier_set(&mut self) -> ParseResult<Expression> {
        self.expect_token(Token::In, "IN")?;
        self.expect_token(Token::LeftParen, "'('")?;

        let mut ids = vec![];
        loop {
            match self.current_token() {
                Token::String(s) => ids.push(s),
                Token::Number(n) => ids.push(n),
                _ => return Err(self.unexpected("identifier literal")),
            }
            self.advance();

            if !self.match_token(&Token::Comma) {
                break;
            }
            self.advance();
        }

        self.expect_token(Token::RightParen, "')'")?;

        Ok(Expression::identifiers(ids))
    }

    // Helper methods

    /// Get current token
    fn current_token(&self) -> Token {
        self.tokens
            .get(self.position)
            .map(|t| t.token.clone())
            .unwrap_or(Token::Eof)
    }

    fn current_position(&self) -> usize {
        self.tokens
            .get(self.position)
            .or_else(|| self.tokens.last())
            .map_or(0, |t| t.start)
    }

    /// Advance to next token
    fn advance(&mut self) {
        if self.position + 1 < self.tokens.len() {
            self.position += 1;
        }
    }

    /// Check if current token matches
    fn match_token(&self, token: &Token) -> bool {
        self.current_token() == *token
    }

    /// Expect a specific token
    fn expect_token(&mut self, token: Token, expected: &str) -> ParseResult<()> {
        if self.current_token() == token {
            self.advance();
            Ok(())
        } else {
            Err(self.unexpected(expected))
        }
    }

    /// Expect an attribute name
    fn expect_identifier(&mut self) -> ParseResult<String> {
        match self.current_token() {
            Token::Identifier(name) | Token::QuotedIdentifier(name) => {
                self.advance();
                Ok(name)
            }
            _ => Err(self.unexpected("attribute name")),
        }
    }

    fn unexpected(&self, expected: &str) -> ParseError {
        ParseError::UnexpectedToken {
            expected: expected.to_string(),
            found: self.current_token().to_string(),
            position: self.current_position(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use geo_types::Geometry;

    fn parse(text: &str) -> ParseResult<Expression> {
        Parser::new(text)?.parse()
    }

    #[test]
    fn test_parse_comparison() {
        let expr = parse("STATE_NAME = 'Texas'").unwrap();
        assert_eq!(
            expr,
            Expression::comparison(
                Operand::attribute("STATE_NAME"),
                ComparisonOperator::Equal,
                Operand::text("Texas"),
            )
        );

        let expr = parse("P_MALE >= P_FEMALE").unwrap();
        assert_eq!(
            expr,
            Expression::comparison(
                Operand::attribute("P_MALE"),
                ComparisonOperator::GreaterEqual,
                Operand::attribute("P_FEMALE"),
            )
        );
    }

    #[test]
    fn test_parse_numbers() {
        let expr = parse("SAMP_POP > 200000").unwrap();
        match expr {
            Expression::Comparison { right, .. } => assert_eq!(right, Operand::integer(200000)),
            _ => panic!("Expected comparison"),
        }

        let expr = parse("x < -2.5").unwrap();
        match expr {
            Expression::Comparison { right, .. } => assert_eq!(right, Operand::float(-2.5)),
            _ => panic!("Expected comparison"),
        }

        let expr = parse("x <> 1e3").unwrap();
        match expr {
            Expression::Comparison { right, .. } => assert_eq!(right, Operand::float(1000.0)),
            _ => panic!("Expected comparison"),
        }

        assert!(matches!(
            parse("x = 1e999"),
            Err(ParseError::InvalidNumber { .. })
        ));
    }

    #[test]
    fn test_precedence() {
        // AND binds tighter than OR
        let expr = parse("a = 1 OR b = 2 AND c = 3").unwrap();
        match expr {
            Expression::Logical {
                op: LogicalOperator::Or,
                operands,
            } => {
                assert_eq!(operands.len(), 2);
                assert!(matches!(
                    operands[1],
                    Expression::Logical {
                        op: LogicalOperator::And,
                        ..
                    }
                ));
            }
            _ => panic!("Expected OR at the root"),
        }

        // NOT binds tighter than AND
        let expr = parse("P_MALE > P_FEMALE AND NOT SAMP_POP > 200000").unwrap();
        match expr {
            Expression::Logical {
                op: LogicalOperator::And,
                operands,
            } => {
                assert!(matches!(
                    operands[1],
                    Expression::Logical {
                        op: LogicalOperator::Not,
                        ..
                    }
                ));
            }
            _ => panic!("Expected AND at the root"),
        }
    }

    #[test]
    fn test_chains_flatten() {
        let expr = parse("a = 1 AND b = 2 AND c = 3").unwrap();
        match expr {
            Expression::Logical { operands, .. } => assert_eq!(operands.len(), 3),
            _ => panic!("Expected AND"),
        }
    }

    #[test]
    fn test_parentheses() {
        let expr = parse("(a = 1 OR b = 2) AND c = 3").unwrap();
        match expr {
            Expression::Logical {
                op: LogicalOperator::And,
                operands,
            } => assert!(matches!(
                operands[0],
                Expression::Logical {
                    op: LogicalOperator::Or,
                    ..
                }
            )),
            _ => panic!("Expected AND at the root"),
        }

        assert!(parse("NOT NOT (a = 1)").is_ok());
    }

    #[test]
    fn test_parse_intersects() {
        let expr = parse(
            "INTERSECTS(the_geom, POLYGON ((-106.649513 25.845198, -106.649513 36.493877, \
             -93.507217 36.493877, -93.507217 25.845198, -106.649513 25.845198)))",
        )
        .unwrap();
        match expr {
            Expression::Spatial {
                attribute,
                geometry,
                ..
            } => {
                assert_eq!(attribute, "the_geom");
                assert!(matches!(geometry, Geometry::Polygon(_)));
            }
            _ => panic!("Expected spatial predicate"),
        }

        let expr = parse("intersects(geom, 'POINT(1 2)')").unwrap();
        assert!(matches!(expr, Expression::Spatial { .. }));

        let expr = parse("INTERSECTS(geom, LINESTRING (0 0, 1 1)) OR a = 1").unwrap();
        assert!(matches!(
            expr,
            Expression::Logical {
                op: LogicalOperator::Or,
                ..
            }
        ));
    }

    #[test]
    fn test_parse_identifier_set() {
        let expr = parse("IN ('states.1', 'states.7')").unwrap();
        assert_eq!(expr, Expression::identifiers(["states.1", "states.7"]));

        let expr = parse("NOT IN (3)").unwrap();
        assert_eq!(expr, Expression::not(Expression::identifiers(["3"])));
    }

    #[test]
    fn test_malformed_filters() {
        assert_eq!(parse(""), Err(ParseError::Empty));
        assert_eq!(parse("   "), Err(ParseError::Empty));

        // Unbalanced parentheses
        assert!(matches!(
            parse("(a = 1"),
            Err(ParseError::UnexpectedToken { .. })
        ));
        assert!(matches!(
            parse("a = 1)"),
            Err(ParseError::UnexpectedToken { .. })
        ));

        // Unknown operators
        assert!(parse("a == 1").is_err());
        assert!(parse("a ~ 1").is_err());
        assert!(matches!(
            parse("P_MALE"),
            Err(ParseError::UnexpectedToken { .. })
        ));

        // Unterminated string and function
        assert!(matches!(
            parse("STATE_NAME = 'Texas"),
            Err(ParseError::UnterminatedString { .. })
        ));
        assert!(parse("INTERSECTS(the_geom, POINT (1 2)").is_err());
        assert!(parse("INTERSECTS(the_geom, POLYGON ((0 0, 1 1)").is_err());

        // Dangling connectives and empty lists
        assert!(parse("a = 1 AND").is_err());
        assert!(parse("IN ()").is_err());
    }

    #[test]
    fn test_invalid_geometry() {
        let err = parse("INTERSECTS(g, 'CIRCLE(0 0, 1)')").unwrap_err();
        assert!(matches!(
            err,
            ParseError::InvalidGeometry { position: 14, .. }
        ));
    }

    #[test]
    fn test_error_position() {
        let err = parse("a = 1 AND b ? 2").unwrap_err();
        assert_eq!(err.position(), Some(12));

        let err = parse("a = 1 b = 2").unwrap_err();
        assert_eq!(
            err,
            ParseError::UnexpectedToken {
                expected: "end of filter".to_string(),
                found: "identifier b".to_string(),
                position: 6,
            }
        );
    }
}
