// Condition parser - converts tokens to a predicate tree
//
// condition  := or
// or         := and (OR and)*
// and        := primary (AND primary)*
// primary    := '(' or ')' | true | false | operand cmp operand

use super::ast::{ComparisonOperator, Operand, Predicate};
use super::error::{PredicateError, PredicateResult};
use super::lexer::Lexer;
use super::token::Token;
use crate::config::DEFAULT_MAX_DEPTH;
use crate::relation::Value;

pub struct Parser {
    tokens: Vec<Token>,
    position: usize,
    /// Deepest parenthesis nesting accepted
    max_depth: usize,
}

impl Parser {
    pub fn new(condition: &str) -> PredicateResult<Self> {
        let tokens = Lexer::new(condition).tokenize()?;
        Ok(Parser {
            tokens,
            position: 0,
            max_depth: DEFAULT_MAX_DEPTH,
        })
    }

    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Parse the whole condition; trailing tokens are an error
    pub fn parse(&mut self) -> PredicateResult<Predicate> {
        if self.match_token(&Token::Eof) {
            return Err(PredicateError::Empty);
        }

        let predicate = self.parse_or(1)?;
        self.expect_token(Token::Eof)?;
        Ok(predicate)
    }

    /// Parse OR expression. Chains become one flat node.
    fn parse_or(&mut self, depth: usize) -> PredicateResult<Predicate> {
        if depth > self.max_depth {
            return Err(PredicateError::NestingTooDeep {
                limit: self.max_depth,
            });
        }

        let mut terms = vec![self.parse_and(depth)?];
        while self.match_token(&Token::Or) {
            self.advance();
            terms.push(self.parse_and(depth)?);
        }

        Ok(Predicate::or(terms))
    }

    /// Parse AND expression
    fn parse_and(&mut self, depth: usize) -> PredicateResult<Predicate> {
        let mut terms = vec![self.parse_primary(depth)?];
        while self.match_token(&Token::And) {
            self.advance();
            terms.push(self.parse_primary(depth)?);
        }

        Ok(Predicate::and(terms))
    }

    /// Parse a grouped condition, a boolean literal or a comparison
    fn parse_primary(&mut self, depth: usize) -> PredicateResult<Predicate> {
        match self.current_token() {
            Token::LeftParen => {
                self.advance();
                let inner = self.parse_or(depth + 1)?;
                self.expect_token(Token::RightParen)?;
                Ok(inner)
            }
            Token::True => {
                self.advance();
                Ok(Predicate::Constant(true))
            }
            Token::False => {
                self.advance();
                Ok(Predicate::Constant(false))
            }
            _ => self.parse_comparison(),
        }
    }

    /// Parse comparison expression
    fn parse_comparison(&mut self) -> PredicateResult<Predicate> {
        let left = self.parse_operand()?;

        let op = match self.current_token() {
            Token::Equal => ComparisonOperator::Equal,
            Token::NotEqual => ComparisonOperator::NotEqual,
            Token::Less => ComparisonOperator::Less,
            Token::LessEqual => ComparisonOperator::LessEqual,
            Token::Greater => ComparisonOperator::Greater,
            Token::GreaterEqual => ComparisonOperator::GreaterEqual,
            other => return Err(unexpected("comparison operator", &other)),
        };
        self.advance();

        let right = self.parse_operand()?;
        Ok(Predicate::compare(op, left, right))
    }

    /// Parse an attribute reference or a literal
    fn parse_operand(&mut self) -> PredicateResult<Operand> {
        let operand = match self.current_token() {
            Token::Identifier(name) => Operand::Attribute(name),
            Token::String(s) => Operand::Literal(Value::Text(s)),
            Token::Number(n) => {
                let number = n
                    .parse::<f64>()
                    .map_err(|_| PredicateError::InvalidNumber { literal: n.clone() })?;
                Operand::Literal(Value::Number(number))
            }
            other => return Err(unexpected("attribute or literal", &other)),
        };
        self.advance();
        Ok(operand)
    }

    // Helper methods

    /// Get current token
    fn current_token(&self) -> Token {
        self.tokens
            .get(self.position)
            .cloned()
            .unwrap_or(Token::Eof)
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
    fn expect_token(&mut self, token: Token) -> PredicateResult<()> {
        if self.current_token() == token {
            self.advance();
            Ok(())
        } else {
            Err(unexpected(&token.to_string(), &self.current_token()))
        }
    }
}

fn unexpected(expected: &str, found: &Token) -> PredicateError {
    PredicateError::UnexpectedToken {
        expected: expected.to_string(),
        found: found.to_string(),
    }
}
