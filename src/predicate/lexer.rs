// Condition lexer - tokenizes selection conditions

use super::error::{PredicateError, PredicateResult};
use super::token::Token;

pub struct Lexer {
    input: Vec<char>,
    position: usize,
    current_char: Option<char>,
}

impl Lexer {
    pub fn new(input: &str) -> Self {
        let input: Vec<char> = input.chars().collect();
        let current_char = input.first().copied();
        Lexer {
            input,
            position: 0,
            current_char,
        }
    }

    /// Get the next token from the input
    pub fn next_token(&mut self) -> PredicateResult<Token> {
        self.skip_whitespace();

        let ch = match self.current_char {
            Some(ch) => ch,
            None => return Ok(Token::Eof),
        };

        let token = match ch {
            '=' => {
                self.advance();
                // `==` is accepted as a synonym
                if self.current_char == Some('=') {
                    self.advance();
                }
                Token::Equal
            }
            '<' => {
                self.advance();
                if self.current_char == Some('=') {
                    self.advance();
                    Token::LessEqual
                } else if self.current_char == Some('>') {
                    self.advance();
                    Token::NotEqual
                } else {
                    Token::Less
                }
            }
            '>' => {
                self.advance();
                if self.current_char == Some('=') {
                    self.advance();
                    Token::GreaterEqual
                } else {
                    Token::Greater
                }
            }
            '!' if self.peek() == Some('=') => {
                self.advance();
                self.advance();
                Token::NotEqual
            }
            '&' if self.peek() == Some('&') => {
                self.advance();
                self.advance();
                Token::And
            }
            '|' if self.peek() == Some('|') => {
                self.advance();
                self.advance();
                Token::Or
            }
            '≠' => {
                self.advance();
                Token::NotEqual
            }
            '≤' => {
                self.advance();
                Token::LessEqual
            }
            '≥' => {
                self.advance();
                Token::GreaterEqual
            }
            '(' => {
                self.advance();
                Token::LeftParen
            }
            ')' => {
                self.advance();
                Token::RightParen
            }
            '\'' | '"' => self.read_string(ch)?,
            '-' if self.peek().is_some_and(|c| c.is_ascii_digit()) => self.read_number(),
            c if c.is_alphabetic() || c == '_' => self.read_identifier(),
            c if c.is_ascii_digit() => self.read_number(),
            c => {
                return Err(PredicateError::UnexpectedCharacter {
                    ch: c,
                    position: self.position,
                })
            }
        };

        Ok(token)
    }

    /// Advance to the next character
    fn advance(&mut self) {
        self.position += 1;
        self.current_char = self.input.get(self.position).copied();
    }

    /// Peek at the next character without advancing
    fn peek(&self) -> Option<char> {
        self.input.get(self.position + 1).copied()
    }

    /// Skip whitespace characters
    fn skip_whitespace(&mut self) {
        while let Some(ch) = self.current_char {
            if ch.is_whitespace() {
                self.advance();
            } else {
                break;
            }
        }
    }

    /// Read an identifier or keyword
    fn read_identifier(&mut self) -> Token {
        let mut identifier = String::new();

        while let Some(ch) = self.current_char {
            if ch.is_alphanumeric() || ch == '_' {
                identifier.push(ch);
                self.advance();
            } else {
                break;
            }
        }

        Token::keyword_from_str(&identifier).unwrap_or(Token::Identifier(identifier))
    }

    /// Read a string literal delimited by `quote`. A doubled quote inside
    /// the literal stands for one quote character.
    fn read_string(&mut self, quote: char) -> PredicateResult<Token> {
        let start = self.position;
        self.advance(); // Skip opening quote
        let mut string = String::new();

        while let Some(ch) = self.current_char {
            if ch == quote {
                if self.peek() == Some(quote) {
                    string.push(quote);
                    self.advance();
                    self.advance();
                } else {
                    self.advance(); // Skip closing quote
                    return Ok(Token::String(string));
                }
            } else {
                string.push(ch);
                self.advance();
            }
        }

        Err(PredicateError::UnterminatedString { position: start })
    }

    /// Read a number (integer or decimal, optionally negative)
    fn read_number(&mut self) -> Token {
        let mut number = String::new();
        let mut has_dot = false;

        if self.current_char == Some('-') {
            number.push('-');
            self.advance();
        }

        while let Some(ch) = self.current_char {
            if ch.is_ascii_digit() {
                number.push(ch);
                self.advance();
            } else if ch == '.' && !has_dot && self.peek().is_some_and(|c| c.is_ascii_digit()) {
                has_dot = true;
                number.push(ch);
                self.advance();
            } else {
                break;
            }
        }

        Token::Number(number)
    }

    /// Tokenize the entire input, ending with `Token::Eof`
    pub fn tokenize(&mut self) -> PredicateResult<Vec<Token>> {
        let mut tokens = Vec::new();

        loop {
            let token = self.next_token()?;
            if token == Token::Eof {
                tokens.push(token);
                break;
            }
            tokens.push(token);
        }

        Ok(tokens)
    }
}
