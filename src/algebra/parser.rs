//! Expression parser - converts raw query text into an `Expression` tree
//!
//! Parsing works top-down on text slices rather than on a token stream:
//! 1. the leftmost top-level binary operator splits the text in two
//! 2. otherwise a unary prefix `op[argument](operand)` is peeled off
//! 3. otherwise one pair of enclosing parentheses is stripped
//! 4. otherwise plain text names a relation

use super::ast::{Expression, UnaryOperator};
use super::scanner::{find_binary_operator, has_structure, matching_paren};
use crate::config::EngineConfig;
use crate::error::{AlgebraError, AlgebraResult};
use crate::predicate::Condition;

pub struct Parser {
    max_depth: usize,
}

impl Parser {
    pub fn new(config: &EngineConfig) -> Self {
        Self::with_max_depth(config.max_depth)
    }

    pub fn with_max_depth(max_depth: usize) -> Self {
        Parser { max_depth }
    }

    /// Parse a whole query
    pub fn parse(&self, text: &str) -> AlgebraResult<Expression> {
        self.parse_expression(text, 1)
    }

    fn parse_expression(&self, text: &str, depth: usize) -> AlgebraResult<Expression> {
        if depth > self.max_depth {
            return Err(AlgebraError::NestingTooDeep {
                limit: self.max_depth,
            });
        }

        let text = text.trim();
        if text.is_empty() {
            return Err(AlgebraError::parse("empty expression", text));
        }

        if let Some(expr) = self.parse_binary(text, depth)? {
            return Ok(expr);
        }

        if let Some(expr) = self.parse_unary(text, depth)? {
            return Ok(expr);
        }

        if let Some(expr) = self.parse_group(text, depth)? {
            return Ok(expr);
        }

        if !has_structure(text) {
            return Ok(Expression::relation(text));
        }

        Err(AlgebraError::parse("unrecognized expression", text))
    }

    /// Parse `left OP right` at the leftmost top-level operator
    fn parse_binary(&self, text: &str, depth: usize) -> AlgebraResult<Option<Expression>> {
        let Some(split) = find_binary_operator(text) else {
            return Ok(None);
        };

        let left = &text[..split.start];
        let right = &text[split.end..];
        if left.trim().is_empty() || right.trim().is_empty() {
            return Err(AlgebraError::parse(
                format!("missing operand for {}", split.kind),
                text,
            ));
        }

        let left = self.parse_expression(left, depth + 1)?;
        let right = self.parse_expression(right, depth + 1)?;
        Ok(Some(Expression::binary(split.kind, left, right)))
    }

    /// Parse `op[argument](operand)`
    fn parse_unary(&self, text: &str, depth: usize) -> AlgebraResult<Option<Expression>> {
        let Some((prefix, operator)) = match_unary_prefix(text) else {
            return Ok(None);
        };

        let Some(args_start) = text.find('[') else {
            return Err(AlgebraError::parse(
                format!("missing '[' after {}", prefix),
                text,
            ));
        };
        if !text[prefix.len()..args_start].trim().is_empty() {
            return Err(AlgebraError::parse(
                format!("unexpected text between {} and '['", prefix),
                text,
            ));
        }

        let Some(args_len) = text[args_start..].find(']') else {
            return Err(AlgebraError::parse(
                format!("missing ']' after {}", prefix),
                text,
            ));
        };
        let args_end = args_start + args_len;
        let argument = text[args_start + 1..args_end].trim();

        let operand_start = args_end + 1;
        if !text[operand_start..].starts_with('(') {
            return Err(AlgebraError::parse(
                format!("missing '(' after ']' of {}", prefix),
                text,
            ));
        }

        let Some(operand_end) = matching_paren(text, operand_start) else {
            return Err(AlgebraError::parse("unmatched parentheses", text));
        };

        let trailing = text[operand_end + 1..].trim();
        if !trailing.is_empty() {
            return Err(AlgebraError::parse(
                format!("unexpected text after the operand of {}", prefix),
                trailing,
            ));
        }

        let input = Box::new(self.parse_expression(&text[operand_start + 1..operand_end], depth + 1)?);

        let expr = match operator {
            UnaryOperator::Select => Expression::Selection {
                condition: Condition::parse_with_depth(argument, self.max_depth)
                    .map_err(|e| AlgebraError::predicate(argument, e))?,
                input,
            },
            UnaryOperator::Project => Expression::Projection {
                attributes: parse_attribute_list(argument, text)?,
                input,
            },
            UnaryOperator::Rename => {
                if argument.is_empty() {
                    return Err(AlgebraError::parse("missing name for ρ", text));
                }
                Expression::Rename {
                    new_name: argument.to_string(),
                    input,
                }
            }
        };

        Ok(Some(expr))
    }

    /// Parse `( expression )` when the parentheses enclose the whole text
    fn parse_group(&self, text: &str, depth: usize) -> AlgebraResult<Option<Expression>> {
        if !text.starts_with('(') {
            return Ok(None);
        }

        match matching_paren(text, 0) {
            Some(close) if close == text.len() - 1 => {
                self.parse_expression(&text[1..close], depth + 1).map(Some)
            }
            Some(_) => Ok(None),
            None => Err(AlgebraError::parse("unmatched parentheses", text)),
        }
    }
}

/// Match a unary operator spelling followed by `[` or a space
fn match_unary_prefix(text: &str) -> Option<(&'static str, UnaryOperator)> {
    UnaryOperator::PREFIXES
        .iter()
        .copied()
        .find(|(prefix, _)| {
            text.strip_prefix(prefix)
                .is_some_and(|rest| rest.starts_with('[') || rest.starts_with(' '))
        })
}

/// Split a projection argument on commas
fn parse_attribute_list(argument: &str, text: &str) -> AlgebraResult<Vec<String>> {
    if argument.is_empty() {
        return Err(AlgebraError::parse("empty attribute list for π", text));
    }

    argument
        .split(',')
        .map(|name| {
            let name = name.trim();
            if name.is_empty() {
                Err(AlgebraError::parse("empty attribute name in π", text))
            } else {
                Ok(name.to_string())
            }
        })
        .collect()
}
