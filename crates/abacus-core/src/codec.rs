//! Digit/Base codec.
//!
//! Maps digit characters to values and back for bases 2 through 36.
//! `0-9` cover values 0-9 and `A-Z` (either case on input) cover 10-35.
//! Everything this module renders is uppercase.

use crate::error::ArithError;
use serde::{Deserialize, Serialize};
use std::fmt;

pub const MIN_BASE: u32 = 2;
pub const MAX_BASE: u32 = 36;

/// A validated numeric base in `MIN_BASE..=MAX_BASE`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub struct Base(u32);

impl Base {
    pub const BINARY: Base = Base(2);
    pub const DECIMAL: Base = Base(10);
    pub const HEX: Base = Base(16);

    pub fn new(radix: u32) -> Result<Self, ArithError> {
        if (MIN_BASE..=MAX_BASE).contains(&radix) {
            Ok(Self(radix))
        } else {
            Err(ArithError::InvalidBase(radix))
        }
    }

    pub fn get(self) -> u32 {
        self.0
    }

    /// Largest digit value in this base.
    pub fn max_digit(self) -> u32 {
        self.0 - 1
    }
}

impl Default for Base {
    fn default() -> Self {
        Self::DECIMAL
    }
}

impl TryFrom<u32> for Base {
    type Error = ArithError;

    fn try_from(radix: u32) -> Result<Self, Self::Error> {
        Self::new(radix)
    }
}

impl From<Base> for u32 {
    fn from(base: Base) -> Self {
        base.0
    }
}

impl fmt::Display for Base {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Value of a single digit character in `base`.
pub fn digit_value(c: char, base: Base) -> Result<u32, ArithError> {
    c.to_digit(MAX_BASE)
        .filter(|v| *v < base.get())
        .ok_or(ArithError::InvalidDigit { digit: c, base: base.get() })
}

/// Uppercase digit character for `value`, defined for `0 <= value < 36`.
pub fn value_to_digit(value: u32) -> Option<char> {
    char::from_digit(value, MAX_BASE).map(|c| c.to_ascii_uppercase())
}

/// Digit values of `operand`, most significant first.
pub fn digits_of(operand: &str, base: Base) -> Result<Vec<u32>, ArithError> {
    let invalid = || ArithError::InvalidNumber {
        operand: operand.to_string(),
        base: base.get(),
    };
    if operand.is_empty() {
        return Err(invalid());
    }
    operand
        .chars()
        .map(|c| digit_value(c, base).map_err(|_| invalid()))
        .collect()
}

/// Parse a digit string in `base` into a host integer.
pub fn parse_integer(digits: &str, base: Base) -> Result<u128, ArithError> {
    digits_of(digits, base)?
        .into_iter()
        .try_fold(0u128, |acc, d| {
            acc.checked_mul(u128::from(base.get()))
                .and_then(|v| v.checked_add(u128::from(d)))
        })
        .ok_or_else(|| ArithError::Overflow(digits.to_string()))
}

/// Render `value` in `base`, most significant digit first, uppercase.
pub fn to_digits(value: u128, base: Base) -> String {
    let radix = u128::from(base.get());
    let mut rest = value;
    let mut out = Vec::new();
    loop {
        let d = (rest % radix) as u32;
        // d < radix <= 36, so the lookup cannot miss
        out.push(value_to_digit(d).unwrap_or('?'));
        rest /= radix;
        if rest == 0 {
            break;
        }
    }
    out.iter().rev().collect()
}

/// Drop leading zeros, keeping at least one digit.
pub fn trim_leading_zeros(digits: &str) -> String {
    let trimmed = digits.trim_start_matches('0');
    if trimmed.is_empty() {
        "0".to_string()
    } else {
        trimmed.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_bounds() {
        assert!(Base::new(1).is_err());
        assert!(Base::new(37).is_err());
        assert_eq!(Base::new(36).unwrap().get(), 36);
        assert_eq!(Base::new(2).unwrap().max_digit(), 1);
    }

    #[test]
    fn test_digit_value_accepts_either_case() {
        assert_eq!(digit_value('a', Base::HEX).unwrap(), 10);
        assert_eq!(digit_value('F', Base::HEX).unwrap(), 15);
        assert_eq!(digit_value('z', Base::new(36).unwrap()).unwrap(), 35);
    }

    #[test]
    fn test_digit_value_rejects_out_of_base() {
        assert_eq!(
            digit_value('9', Base::new(8).unwrap()),
            Err(ArithError::InvalidDigit { digit: '9', base: 8 })
        );
        assert!(digit_value('-', Base::DECIMAL).is_err());
        assert!(digit_value('é', Base::new(36).unwrap()).is_err());
    }

    #[test]
    fn test_value_to_digit_is_uppercase() {
        assert_eq!(value_to_digit(7), Some('7'));
        assert_eq!(value_to_digit(11), Some('B'));
        assert_eq!(value_to_digit(35), Some('Z'));
        assert_eq!(value_to_digit(36), None);
    }

    #[test]
    fn test_parse_integer() {
        assert_eq!(parse_integer("ff", Base::HEX).unwrap(), 255);
        assert_eq!(parse_integer("1011", Base::BINARY).unwrap(), 11);
        assert_eq!(parse_integer("007", Base::DECIMAL).unwrap(), 7);
    }

    #[test]
    fn test_parse_integer_errors() {
        assert!(matches!(
            parse_integer("", Base::DECIMAL),
            Err(ArithError::InvalidNumber { .. })
        ));
        assert!(matches!(
            parse_integer("12", Base::BINARY),
            Err(ArithError::InvalidNumber { .. })
        ));
        let huge = "Z".repeat(40);
        assert!(matches!(
            parse_integer(&huge, Base::new(36).unwrap()),
            Err(ArithError::Overflow(_))
        ));
    }

    #[test]
    fn test_to_digits() {
        assert_eq!(to_digits(0, Base::DECIMAL), "0");
        assert_eq!(to_digits(255, Base::HEX), "FF");
        assert_eq!(to_digits(2, Base::BINARY), "10");
        assert_eq!(to_digits(35, Base::new(36).unwrap()), "Z");
    }

    #[test]
    fn test_trim_leading_zeros() {
        assert_eq!(trim_leading_zeros("099"), "99");
        assert_eq!(trim_leading_zeros("000"), "0");
        assert_eq!(trim_leading_zeros("A0"), "A0");
    }
}
