//! Long division: bring down, estimate, multiply, subtract.
//!
//! One quotient digit is written for every dividend digit, leading zeros
//! included, so the quotient stays aligned with the dividend columns.
//! The `Finish` result drops those leading zeros.

use crate::codec::{digits_of, parse_integer, to_digits, trim_leading_zeros, Base};
use crate::error::ArithError;
use crate::generator::StepGenerator;
use crate::parser::Operator;
use crate::step::Step;

#[derive(Debug, Default, Clone, Copy)]
pub struct Division;

impl StepGenerator for Division {
    fn id(&self) -> &'static str {
        "division.long.v1"
    }

    fn operator(&self) -> Operator {
        Operator::Divide
    }

    fn generate(&self, top: &str, bottom: &str, base: Base) -> Result<Vec<Step>, ArithError> {
        digits_of(top, base)?;
        let divisor = parse_integer(bottom, base)?;
        if divisor == 0 {
            return Err(ArithError::DivideByZero);
        }
        let divisor_str = to_digits(divisor, base);

        let mut steps = vec![Step::SetupDivision {
            dividend: top.to_string(),
            divisor: bottom.to_string(),
            base: base.get(),
        }];
        let mut remainder_str = String::new();
        let mut quotient = String::new();

        for (index, digit) in top.chars().enumerate() {
            remainder_str.push(digit);
            steps.push(Step::DivBringDown {
                digit,
                current_str: remainder_str.clone(),
                index,
            });

            let current = parse_integer(&remainder_str, base)?;
            let quotient_digit = current / divisor;
            let product = quotient_digit * divisor;
            let remainder = current - product;

            let current_val = to_digits(current, base);
            let q = to_digits(quotient_digit, base);
            let product = to_digits(product, base);

            steps.push(Step::DivEstimate {
                current_val: current_val.clone(),
                divisor: divisor_str.clone(),
                quotient: q.clone(),
            });
            steps.push(Step::DivWriteQuotient { digit: q.clone(), index });
            quotient.push_str(&q);
            steps.push(Step::DivMultiply {
                digit: q,
                divisor: divisor_str.clone(),
                product: product.clone(),
                row_index: index,
            });
            steps.push(Step::DivSubtract {
                minuend: current_val,
                subtrahend: product,
                remainder: to_digits(remainder, base),
                row_index: index,
            });

            // an empty accumulator keeps the next bring-down free of a leading 0
            remainder_str = if remainder == 0 {
                String::new()
            } else {
                to_digits(remainder, base)
            };
        }

        steps.push(Step::Finish {
            result: trim_leading_zeros(&quotient),
        });
        Ok(steps)
    }
}
