//! Abacus Core: schoolbook arithmetic step generation
//!
//! Simulates the manual column algorithms for `+`, `-`, `×` and `÷` in
//! any base from 2 to 36 and records every intermediate move as a
//! [`Step`]. The resulting [`StepSequence`] is the whole contract with
//! renderers and exporters.
//!
//! # Pipeline Flow
//!
//! ```text
//! "100-1", base 10 → parser → codec → Subtraction → StepSequence
//!                       ↓        ↓          ↓
//!                  Expression  digits   borrow trace
//! ```
//!
//! # Example
//!
//! ```
//! use abacus_core::{generate_steps, Step};
//!
//! let steps = generate_steps("48+37", 10).unwrap();
//! assert!(steps.setup().is_some());
//! assert_eq!(steps.result(), Some("85"));
//! assert!(steps.iter().any(|s| matches!(s, Step::Carry { .. })));
//! ```

pub mod addition;
pub mod codec;
pub mod division;
pub mod error;
pub mod generator;
pub mod multiplication;
pub mod parser;
pub mod step;
pub mod subtraction;

pub use codec::{
    digit_value, digits_of, parse_integer, to_digits, trim_leading_zeros, value_to_digit, Base,
};
pub use error::ArithError;
pub use generator::StepGenerator;
pub use parser::{parse, Expression, Operator};
pub use step::{Column, Step, StepSequence, FINAL_CARRY_COLUMN};

use tracing::{debug, warn};

/// Engine version reported by outer surfaces
pub const ABACUS_VERSION: &str = "1.0.0";

/// Parse `expression` and generate its step trace in `base`.
pub fn generate_steps(expression: &str, base: u32) -> Result<StepSequence, ArithError> {
    let expr = parser::parse(expression)?;
    let base = Base::new(base)?;
    generate(&expr.op1, expr.operator, &expr.op2, base)
}

/// Generate the step trace for already split operands.
pub fn generate(
    op1: &str,
    operator: Operator,
    op2: &str,
    base: Base,
) -> Result<StepSequence, ArithError> {
    let top = op1.to_ascii_uppercase();
    let bottom = op2.to_ascii_uppercase();
    let generator = operator.generator();
    debug!(generator = generator.id(), %base, top = %top, bottom = %bottom, "generating steps");

    let steps = generator.generate(&top, &bottom, base).map_err(|e| {
        if !e.is_user_error() {
            warn!(generator = generator.id(), error = %e, "internal consistency failure");
        }
        e
    })?;

    debug!(generator = generator.id(), steps = steps.len(), "generation complete");
    Ok(StepSequence::new(steps, operator, base))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_steps_dispatches() {
        assert_eq!(generate_steps("48+37", 10).unwrap().operator(), Operator::Add);
        assert_eq!(generate_steps("50-27", 10).unwrap().operator(), Operator::Subtract);
        assert_eq!(generate_steps("12*3", 10).unwrap().operator(), Operator::Multiply);
        assert_eq!(generate_steps("17/5", 10).unwrap().operator(), Operator::Divide);
    }

    #[test]
    fn test_lowercase_operands_normalized() {
        let seq = generate("ff", Operator::Add, "1", Base::HEX).unwrap();
        assert_eq!(seq.result(), Some("100"));
        match seq.setup() {
            Some(Step::Setup { raw_top, .. }) => assert_eq!(raw_top, "FF"),
            other => panic!("unexpected setup {:?}", other),
        }
    }

    #[test]
    fn test_invalid_base() {
        assert_eq!(generate_steps("1+1", 37).unwrap_err(), ArithError::InvalidBase(37));
        assert_eq!(generate_steps("1+1", 1).unwrap_err(), ArithError::InvalidBase(1));
    }

    #[test]
    fn test_format_checked_before_digits() {
        assert!(matches!(generate_steps("9++9", 2), Err(ArithError::Format(_))));
        assert!(matches!(
            generate_steps("9+9", 2),
            Err(ArithError::InvalidNumber { .. })
        ));
    }
}
