//! Expression parser.
//!
//! Accepts `operand operator operand` with any amount of whitespace.
//! Operands are runs of ASCII alphanumerics; they are *not* checked
//! against a base here, so `9` in base 8 passes and is rejected later
//! by the codec with a base-specific error.

use crate::error::ArithError;
use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;

lazy_static! {
    /// Whole-string `operand operator operand` pattern
    static ref EXPRESSION: Regex =
        Regex::new(r"^([0-9A-Za-z]+)([+\-*x/])([0-9A-Za-z]+)$").unwrap();

    static ref WHITESPACE: Regex = Regex::new(r"\s+").unwrap();
}

/// The four supported schoolbook operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Operator {
    #[serde(rename = "+")]
    Add,
    #[serde(rename = "-")]
    Subtract,
    #[serde(rename = "×")]
    Multiply,
    #[serde(rename = "÷")]
    Divide,
}

impl Operator {
    /// Map an input token. Both `*` and `x` mean multiplication.
    pub fn from_token(token: char) -> Option<Self> {
        match token {
            '+' => Some(Self::Add),
            '-' => Some(Self::Subtract),
            '*' | 'x' => Some(Self::Multiply),
            '/' => Some(Self::Divide),
            _ => None,
        }
    }

    /// Display symbol used in traces.
    pub fn symbol(self) -> char {
        match self {
            Self::Add => '+',
            Self::Subtract => '-',
            Self::Multiply => '×',
            Self::Divide => '÷',
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Add => "addition",
            Self::Subtract => "subtraction",
            Self::Multiply => "multiplication",
            Self::Divide => "division",
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

/// A parsed expression. Operands are uppercased.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Expression {
    pub op1: String,
    pub operator: Operator,
    pub op2: String,
}

/// Split a raw expression into its operands and operator.
pub fn parse(expression: &str) -> Result<Expression, ArithError> {
    let compact = WHITESPACE.replace_all(expression.trim(), "");
    let format_error = || ArithError::Format(expression.to_string());

    let caps = EXPRESSION.captures(&compact).ok_or_else(format_error)?;
    let operator = caps[2]
        .chars()
        .next()
        .and_then(Operator::from_token)
        .ok_or_else(format_error)?;

    Ok(Expression {
        op1: caps[1].to_ascii_uppercase(),
        operator,
        op2: caps[3].to_ascii_uppercase(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_each_operator() {
        assert_eq!(parse("48+37").unwrap().operator, Operator::Add);
        assert_eq!(parse("50-27").unwrap().operator, Operator::Subtract);
        assert_eq!(parse("12*3").unwrap().operator, Operator::Multiply);
        assert_eq!(parse("12x3").unwrap().operator, Operator::Multiply);
        assert_eq!(parse("17/5").unwrap().operator, Operator::Divide);
    }

    #[test]
    fn test_whitespace_is_removed() {
        let expr = parse("  1 0 0 -   1 ").unwrap();
        assert_eq!(expr.op1, "100");
        assert_eq!(expr.op2, "1");
        assert_eq!(expr.operator, Operator::Subtract);
    }

    #[test]
    fn test_operands_are_uppercased() {
        let expr = parse("ff + a0").unwrap();
        assert_eq!(expr.op1, "FF");
        assert_eq!(expr.op2, "A0");
    }

    #[test]
    fn test_format_errors() {
        for bad in ["", "12", "+3", "12+", "1+-2", "1%2", "1.5+2", "(1+2)"] {
            assert!(
                matches!(parse(bad), Err(ArithError::Format(_))),
                "expected format error for {:?}",
                bad
            );
        }
    }

    #[test]
    fn test_digits_not_checked_against_base() {
        // base validation happens later, in the codec
        assert!(parse("9+9").is_ok());
        assert!(parse("ZZ+1").is_ok());
    }

    #[test]
    fn test_operator_symbols() {
        assert_eq!(Operator::Multiply.symbol(), '×');
        assert_eq!(Operator::Divide.to_string(), "÷");
        assert_eq!(Operator::from_token('x'), Some(Operator::Multiply));
        assert_eq!(Operator::from_token('X'), None);
    }
}
