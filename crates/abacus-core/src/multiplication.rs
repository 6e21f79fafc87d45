//! Schoolbook multiplication by partial products.
//!
//! Each multiplier digit contributes one row: the whole multiplicand
//! times that digit, shifted left by the digit's position. The rows sum
//! to the product, so the final result is computed directly.

use crate::codec::{digits_of, parse_integer, to_digits, Base};
use crate::error::ArithError;
use crate::generator::StepGenerator;
use crate::parser::Operator;
use crate::step::Step;

#[derive(Debug, Default, Clone, Copy)]
pub struct Multiplication;

impl StepGenerator for Multiplication {
    fn id(&self) -> &'static str {
        "multiplication.partials.v1"
    }

    fn operator(&self) -> Operator {
        Operator::Multiply
    }

    fn generate(&self, top: &str, bottom: &str, base: Base) -> Result<Vec<Step>, ArithError> {
        let multiplicand = parse_integer(top, base)?;
        let multiplier = parse_integer(bottom, base)?;
        let overflow = || ArithError::Overflow(format!("{} × {}", top, bottom));
        let product = multiplicand.checked_mul(multiplier).ok_or_else(overflow)?;

        let mut steps = vec![Step::SetupMultiplication {
            top: top.to_string(),
            bottom: bottom.to_string(),
            base: base.get(),
        }];

        let term1 = to_digits(multiplicand, base);
        for (shift, (bottom_index, digit)) in digits_of(bottom, base)?
            .into_iter()
            .enumerate()
            .rev()
            .enumerate()
        {
            steps.push(Step::HighlightMultiplier { bottom_index, value: digit });

            let partial = multiplicand
                .checked_mul(u128::from(digit))
                .ok_or_else(overflow)?;
            let partial = to_digits(partial, base);
            steps.push(Step::CalculatePartial {
                term1: term1.clone(),
                term2: to_digits(u128::from(digit), base),
                result: partial.clone(),
                shift,
            });
            steps.push(Step::WritePartial {
                value: partial,
                shift,
                row_line: shift,
            });
        }

        let result = to_digits(product, base);
        steps.push(Step::DrawSumLine);
        steps.push(Step::WriteMultResult { value: result.clone() });
        steps.push(Step::Finish { result });
        Ok(steps)
    }
}
