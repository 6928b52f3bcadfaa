// Condition tokens for lexical analysis

use std::fmt;

#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    // Literals
    Identifier(String),
    Number(String),
    String(String),

    // Keywords
    And,
    Or,
    True,
    False,

    // Comparison operators
    Equal,
    NotEqual,
    Less,
    Greater,
    LessEqual,
    GreaterEqual,

    // Delimiters
    LeftParen,
    RightParen,

    // Special
    Eof,
}

impl Token {
    /// Convert a word to its keyword token.
    ///
    /// `AND`/`OR` are case-sensitive so that attributes such as `Order` or
    /// `Andrea` never collide with them; boolean literals accept either case.
    pub fn keyword_from_str(s: &str) -> Option<Token> {
        match s {
            "AND" => Some(Token::And),
            "OR" => Some(Token::Or),
            "true" | "TRUE" => Some(Token::True),
            "false" | "FALSE" => Some(Token::False),
            _ => None,
        }
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::Identifier(name) => write!(f, "{}", name),
            Token::Number(n) => write!(f, "{}", n),
            Token::String(s) => write!(f, "'{}'", s),
            Token::And => write!(f, "AND"),
            Token::Or => write!(f, "OR"),
            Token::True => write!(f, "true"),
            Token::False => write!(f, "false"),
            Token::Equal => write!(f, "="),
            Token::NotEqual => write!(f, "!="),
            Token::Less => write!(f, "<"),
            Token::Greater => write!(f, ">"),
            Token::LessEqual => write!(f, "<="),
            Token::GreaterEqual => write!(f, ">="),
            Token::LeftParen => write!(f, "("),
            Token::RightParen => write!(f, ")"),
            Token::Eof => write!(f, "end of condition"),
        }
    }
}
