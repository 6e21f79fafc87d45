//! Unified Error Model
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ArithError {
    #[error("FORMAT/expected `operand operator operand`, got {0:?}")]
    Format(String),

    #[error("BASE/base {0} is outside 2..=36")]
    InvalidBase(u32),

    #[error("DIGIT/{digit:?} is not a digit in base {base}")]
    InvalidDigit { digit: char, base: u32 },

    #[error("NUMBER/{operand:?} is not a number in base {base}")]
    InvalidNumber { operand: String, base: u32 },

    #[error("NEGATIVE/{minuend} - {subtrahend} would be negative")]
    NegativeResult { minuend: String, subtrahend: String },

    #[error("DIV/division by zero")]
    DivideByZero,

    #[error("BORROW/no nonzero lender left of column {column}")]
    BorrowInvariant { column: usize },

    #[error("OVERFLOW/{0} exceeds the native integer range")]
    Overflow(String),
}

impl ArithError {
    /// Stable kind name, shared with API responses and metrics labels.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Format(_) => "FormatError",
            Self::InvalidBase(_) => "InvalidBaseError",
            Self::InvalidDigit { .. } => "InvalidDigitError",
            Self::InvalidNumber { .. } => "InvalidNumberError",
            Self::NegativeResult { .. } => "NegativeResultError",
            Self::DivideByZero => "DivideByZeroError",
            Self::BorrowInvariant { .. } => "BorrowInvariantError",
            Self::Overflow(_) => "OverflowError",
        }
    }

    /// True for failures caused by the caller's input rather than the engine.
    pub fn is_user_error(&self) -> bool {
        !matches!(self, Self::BorrowInvariant { .. })
    }
}
