//! Condition AST definitions.

use crate::relation::Value;
use std::cmp::Ordering;
use std::fmt;

/// Comparison operators usable in a condition
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ComparisonOperator {
    Equal,
    NotEqual,
    Less,
    LessEqual,
    Greater,
    GreaterEqual,
}

impl ComparisonOperator {
    /// Get the string representation of the operator
    pub fn as_str(&self) -> &'static str {
        match self {
            ComparisonOperator::Equal => "=",
            ComparisonOperator::NotEqual => "!=",
            ComparisonOperator::Less => "<",
            ComparisonOperator::LessEqual => "<=",
            ComparisonOperator::Greater => ">",
            ComparisonOperator::GreaterEqual => ">=",
        }
    }

    /// Decide the comparison from the ordering of its two operands
    pub fn holds(&self, ordering: Ordering) -> bool {
        match self {
            ComparisonOperator::Equal => ordering == Ordering::Equal,
            ComparisonOperator::NotEqual => ordering != Ordering::Equal,
            ComparisonOperator::Less => ordering == Ordering::Less,
            ComparisonOperator::LessEqual => ordering != Ordering::Greater,
            ComparisonOperator::Greater => ordering == Ordering::Greater,
            ComparisonOperator::GreaterEqual => ordering != Ordering::Less,
        }
    }
}

/// One side of a comparison
#[derive(Debug, Clone, PartialEq)]
pub enum Operand {
    /// Attribute reference, resolved against the tuple
    Attribute(String),
    /// Literal constant value
    Literal(Value),
}

impl Operand {
    pub fn attribute(name: impl Into<String>) -> Self {
        Operand::Attribute(name.into())
    }

    pub fn literal(value: impl Into<Value>) -> Self {
        Operand::Literal(value.into())
    }
}

/// Condition tree node
#[derive(Debug, Clone, PartialEq)]
pub enum Predicate {
    /// `true` / `false`
    Constant(bool),

    /// Comparison between two operands
    Comparison {
        op: ComparisonOperator,
        left: Operand,
        right: Operand,
    },

    /// Logical AND over two or more terms
    And(Vec<Predicate>),

    /// Logical OR over two or more terms
    Or(Vec<Predicate>),
}

impl Predicate {
    /// Create a comparison node
    pub fn compare(op: ComparisonOperator, left: Operand, right: Operand) -> Self {
        Predicate::Comparison { op, left, right }
    }

    /// Conjunction of the terms; a single term is returned as is
    pub fn and(mut terms: Vec<Predicate>) -> Self {
        if terms.len() == 1 {
            terms.remove(0)
        } else {
            Predicate::And(terms)
        }
    }

    /// Disjunction of the terms; a single term is returned as is
    pub fn or(mut terms: Vec<Predicate>) -> Self {
        if terms.len() == 1 {
            terms.remove(0)
        } else {
            Predicate::Or(terms)
        }
    }
}

impl fmt::Display for Operand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Operand::Attribute(name) => write!(f, "{}", name),
            Operand::Literal(Value::Number(n)) => write!(f, "{}", n),
            Operand::Literal(Value::Text(s)) => write!(f, "'{}'", s.replace('\'', "''")),
        }
    }
}

impl fmt::Display for Predicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Predicate::Constant(b) => write!(f, "{}", b),
            Predicate::Comparison { op, left, right } => {
                write!(f, "{} {} {}", left, op.as_str(), right)
            }
            Predicate::And(terms) => write_terms(f, "AND", terms),
            Predicate::Or(terms) => write_terms(f, "OR", terms),
        }
    }
}

fn write_terms(f: &mut fmt::Formatter<'_>, keyword: &str, terms: &[Predicate]) -> fmt::Result {
    write!(f, "(")?;
    for (i, term) in terms.iter().enumerate() {
        if i > 0 {
            write!(f, " {} ", keyword)?;
        }
        write!(f, "{}", term)?;
    }
    write!(f, ")")
}
