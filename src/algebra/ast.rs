//! Expression tree for relational algebra queries.

use crate::predicate::Condition;
use crate::schema::BinaryKind;
use std::fmt;

/// Unary operators, each written as `op[argument](operand)`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnaryOperator {
    Select,
    Project,
    Rename,
}

impl UnaryOperator {
    /// Accepted spellings, symbol first
    pub const PREFIXES: &'static [(&'static str, UnaryOperator)] = &[
        ("σ", UnaryOperator::Select),
        ("Select", UnaryOperator::Select),
        ("π", UnaryOperator::Project),
        ("Project", UnaryOperator::Project),
        ("ρ", UnaryOperator::Rename),
        ("Rename", UnaryOperator::Rename),
    ];

    pub fn symbol(&self) -> &'static str {
        match self {
            UnaryOperator::Select => "σ",
            UnaryOperator::Project => "π",
            UnaryOperator::Rename => "ρ",
        }
    }
}

/// A parsed relational algebra expression
#[derive(Debug, Clone, PartialEq)]
pub enum Expression {
    /// Reference to a stored relation
    Relation(String),
    Selection {
        condition: Condition,
        input: Box<Expression>,
    },
    Projection {
        attributes: Vec<String>,
        input: Box<Expression>,
    },
    Rename {
        new_name: String,
        input: Box<Expression>,
    },
    Union(Box<Expression>, Box<Expression>),
    Difference(Box<Expression>, Box<Expression>),
    Join(Box<Expression>, Box<Expression>),
}

impl Expression {
    pub fn relation(name: impl Into<String>) -> Self {
        Expression::Relation(name.into())
    }

    pub fn binary(kind: BinaryKind, left: Expression, right: Expression) -> Self {
        let (left, right) = (Box::new(left), Box::new(right));
        match kind {
            BinaryKind::Union => Expression::Union(left, right),
            BinaryKind::Difference => Expression::Difference(left, right),
            BinaryKind::Join => Expression::Join(left, right),
        }
    }

    /// The operator kind and operands of a binary node
    pub fn as_binary(&self) -> Option<(BinaryKind, &Expression, &Expression)> {
        match self {
            Expression::Union(l, r) => Some((BinaryKind::Union, l, r)),
            Expression::Difference(l, r) => Some((BinaryKind::Difference, l, r)),
            Expression::Join(l, r) => Some((BinaryKind::Join, l, r)),
            _ => None,
        }
    }
}

impl fmt::Display for Expression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expression::Relation(name) => write!(f, "{}", name),
            Expression::Selection { condition, input } => {
                write!(f, "σ[{}]({})", condition.text, input)
            }
            Expression::Projection { attributes, input } => {
                write!(f, "π[{}]({})", attributes.join(", "), input)
            }
            Expression::Rename { new_name, input } => write!(f, "ρ[{}]({})", new_name, input),
            Expression::Union(l, r) => write_binary(f, "∪", l, r),
            Expression::Difference(l, r) => write_binary(f, "-", l, r),
            Expression::Join(l, r) => write_binary(f, "⨝", l, r),
        }
    }
}

// Binary operands are parenthesized so the text parses back to the same tree.
fn write_binary(
    f: &mut fmt::Formatter<'_>,
    symbol: &str,
    left: &Expression,
    right: &Expression,
) -> fmt::Result {
    write_operand(f, left)?;
    write!(f, " {} ", symbol)?;
    write_operand(f, right)
}

fn write_operand(f: &mut fmt::Formatter<'_>, operand: &Expression) -> fmt::Result {
    if operand.as_binary().is_some() {
        write!(f, "({})", operand)
    } else {
        write!(f, "{}", operand)
    }
}
