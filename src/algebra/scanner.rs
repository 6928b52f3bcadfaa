//! Structural scan over raw expression text.
//!
//! The scanner walks an expression one character at a time and reports, for
//! each character, how deeply it is nested in parentheses and brackets at
//! that point. Quoted text is only recognized inside brackets, where
//! selection conditions live; quote characters elsewhere are plain text.

use crate::schema::BinaryKind;
use std::str::CharIndices;

/// Binary operator spellings. Every token carries its surrounding spaces.
pub const BINARY_TOKENS: &[(&str, BinaryKind)] = &[
    (" ∪ ", BinaryKind::Union),
    (" UNION ", BinaryKind::Union),
    (" - ", BinaryKind::Difference),
    (" − ", BinaryKind::Difference),
    (" MINUS ", BinaryKind::Difference),
    (" ⨝ ", BinaryKind::Join),
    (" ⋈ ", BinaryKind::Join),
    (" JOIN ", BinaryKind::Join),
];

/// One character of the scanned text with the nesting in effect before it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Position {
    /// Byte offset of the character
    pub index: usize,
    pub ch: char,
    /// Open parentheses enclosing this character
    pub parens: isize,
    /// Open brackets enclosing this character
    pub brackets: isize,
    /// Whether the character is part of a quoted literal
    pub quoted: bool,
}

impl Position {
    /// Outside every parenthesis, bracket and literal
    pub fn is_top_level(&self) -> bool {
        self.parens == 0 && self.brackets == 0 && !self.quoted
    }
}

/// Iterator over the characters of an expression with their nesting
pub struct Scanner<'a> {
    chars: CharIndices<'a>,
    parens: isize,
    brackets: isize,
    quote: Option<char>,
}

impl<'a> Scanner<'a> {
    pub fn new(text: &'a str) -> Self {
        Self {
            chars: text.char_indices(),
            parens: 0,
            brackets: 0,
            quote: None,
        }
    }
}

impl Iterator for Scanner<'_> {
    type Item = Position;

    fn next(&mut self) -> Option<Position> {
        let (index, ch) = self.chars.next()?;

        if let Some(quote) = self.quote {
            // a literal never spans the `]` closing its condition
            if ch == ']' && self.brackets > 0 {
                self.quote = None;
                self.brackets -= 1;
                return Some(Position {
                    index,
                    ch,
                    parens: self.parens,
                    brackets: self.brackets + 1,
                    quoted: false,
                });
            }
            if ch == quote {
                self.quote = None;
            }
            return Some(Position {
                index,
                ch,
                parens: self.parens,
                brackets: self.brackets,
                quoted: true,
            });
        }

        let position = Position {
            index,
            ch,
            parens: self.parens,
            brackets: self.brackets,
            quoted: false,
        };

        match ch {
            '(' => self.parens += 1,
            ')' => self.parens -= 1,
            '[' => self.brackets += 1,
            ']' => self.brackets -= 1,
            '\'' | '"' if self.brackets > 0 => {
                self.quote = Some(ch);
                return Some(Position {
                    quoted: true,
                    ..position
                });
            }
            _ => {}
        }

        Some(position)
    }
}

/// A binary operator occurrence found at the top level of an expression
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BinarySplit {
    pub kind: BinaryKind,
    /// Byte offset where the token starts
    pub start: usize,
    /// Byte offset just past the token
    pub end: usize,
}

/// Find the leftmost top-level binary operator token.
///
/// Operators chain without precedence: in `A ∪ B - C` the split happens at
/// `∪`, so the right operand is `B - C`.
pub fn find_binary_operator(text: &str) -> Option<BinarySplit> {
    Scanner::new(text)
        .filter(Position::is_top_level)
        .find_map(|position| {
            let rest = &text[position.index..];
            BINARY_TOKENS
                .iter()
                .find(|(token, _)| rest.starts_with(token))
                .map(|(token, kind)| BinarySplit {
                    kind: *kind,
                    start: position.index,
                    end: position.index + token.len(),
                })
        })
}

/// Byte offset of the `)` matching the `(` at byte offset `open`.
///
/// Parentheses inside quoted condition literals are ignored.
pub fn matching_paren(text: &str, open: usize) -> Option<usize> {
    let mut scanner = Scanner::new(text).skip_while(|position| position.index < open);
    let first = scanner.next()?;
    if first.ch != '(' {
        return None;
    }

    scanner
        .find(|position| position.ch == ')' && !position.quoted && position.parens == first.parens + 1)
        .map(|position| position.index)
}

/// Whether the text contains any grouping character outside quoted literals
pub fn has_structure(text: &str) -> bool {
    Scanner::new(text)
        .any(|position| !position.quoted && matches!(position.ch, '(' | ')' | '[' | ']'))
}
