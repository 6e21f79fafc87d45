//! Trace verification.
//!
//! Replays a trace from the outside: checks its framing (one setup step
//! first, one finish step last), that every written digit is uppercase,
//! and that the finish result equals the operator applied to the setup
//! operands.

use crate::TraceError;
use abacus_core::{
    digits_of, parse_integer, to_digits, trim_leading_zeros, ArithError, Base, Operator, Step,
};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Outcome of verifying one trace
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Verification {
    pub ok: bool,
    pub operator: Operator,
    pub base: u32,
    /// Correct result, computed independently of the trace
    pub expected: String,
    /// Result claimed by the trace's finish step
    pub actual: String,
    pub issues: Vec<String>,
}

/// Operands and operator carried by a setup-class step.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Header<'a> {
    pub operator: Operator,
    pub top: &'a str,
    pub bottom: &'a str,
    pub base: u32,
}

impl<'a> Header<'a> {
    pub(crate) fn read(step: &'a Step) -> Option<Self> {
        match step {
            Step::Setup { operator, raw_top, raw_bottom, base, .. } => Some(Self {
                operator: *operator,
                top: raw_top,
                bottom: raw_bottom,
                base: *base,
            }),
            Step::SetupMultiplication { top, bottom, base } => Some(Self {
                operator: Operator::Multiply,
                top,
                bottom,
                base: *base,
            }),
            Step::SetupDivision { dividend, divisor, base } => Some(Self {
                operator: Operator::Divide,
                top: dividend,
                bottom: divisor,
                base: *base,
            }),
            _ => None,
        }
    }
}

pub(crate) fn framing(steps: &[Step]) -> Result<(Header<'_>, &str), TraceError> {
    let first = steps.first().ok_or(TraceError::Empty)?;
    let header = Header::read(first).ok_or(TraceError::MissingSetup)?;
    match steps.last() {
        Some(Step::Finish { result }) => Ok((header, result.as_str())),
        _ => Err(TraceError::MissingFinish),
    }
}

pub fn verify(steps: &[Step]) -> Result<Verification, TraceError> {
    let (header, actual) = framing(steps)?;
    let mut issues = Vec::new();

    let inner = &steps[1..steps.len() - 1];
    for (i, step) in inner.iter().enumerate() {
        if step.is_setup() || step.is_finish() {
            issues.push(format!("step {} is a misplaced {}", i + 1, step.kind()));
        }
    }

    for (i, step) in steps.iter().enumerate() {
        for digits in step.written_digits() {
            if digits.chars().any(|c| c.is_ascii_lowercase()) {
                issues.push(format!("step {} ({}) writes lowercase digits {:?}", i, step.kind(), digits));
            }
        }
    }

    let base = Base::new(header.base)?;
    let expected = expected_result(&header, base)?;
    match digits_of(actual, base) {
        Ok(_) if trim_leading_zeros(&actual.to_ascii_uppercase()) == expected => {}
        Ok(_) => issues.push(format!("result {} does not equal {}", actual, expected)),
        Err(e) => issues.push(format!("result {:?} is unreadable: {}", actual, e)),
    }

    debug!(operator = %header.operator, issues = issues.len(), "trace verified");
    Ok(Verification {
        ok: issues.is_empty(),
        operator: header.operator,
        base: base.get(),
        expected,
        actual: actual.to_string(),
        issues,
    })
}

/// Addition and subtraction are recomputed column by column, like the
/// generators, so operand length is unbounded. Multiplication and division
/// go through host integers.
fn expected_result(header: &Header<'_>, base: Base) -> Result<String, ArithError> {
    let value = match header.operator {
        Operator::Add | Operator::Subtract => return column_result(header, base),
        Operator::Multiply | Operator::Divide => {
            let a = parse_integer(header.top, base)?;
            let b = parse_integer(header.bottom, base)?;
            if header.operator == Operator::Multiply {
                a.checked_mul(b).ok_or_else(|| {
                    ArithError::Overflow(format!("{} {} {}", header.top, header.operator, header.bottom))
                })?
            } else {
                a.checked_div(b).ok_or(ArithError::DivideByZero)?
            }
        }
    };
    Ok(to_digits(value, base))
}

fn column_result(header: &Header<'_>, base: Base) -> Result<String, ArithError> {
    let radix = base.get();
    let top = digits_of(header.top, base)?;
    let bottom = digits_of(header.bottom, base)?;
    let width = top.len().max(bottom.len());
    let at = |digits: &[u32], i: usize| {
        if i < digits.len() {
            digits[digits.len() - 1 - i]
        } else {
            0
        }
    };

    // least significant first
    let mut out = Vec::with_capacity(width + 1);
    let mut carry = 0;
    for i in 0..width {
        let (a, b) = (at(&top, i), at(&bottom, i));
        let value = match header.operator {
            Operator::Subtract if a < b + carry => {
                let v = a + radix - b - carry;
                carry = 1;
                v
            }
            Operator::Subtract => {
                let v = a - b - carry;
                carry = 0;
                v
            }
            _ => {
                let sum = a + b + carry;
                carry = sum / radix;
                sum % radix
            }
        };
        out.push(value);
    }

    if carry > 0 {
        if header.operator == Operator::Subtract {
            return Err(ArithError::NegativeResult {
                minuend: header.top.to_string(),
                subtrahend: header.bottom.to_string(),
            });
        }
        out.push(carry);
    }

    let digits: String = out
        .iter()
        .rev()
        .map(|d| to_digits(u128::from(*d), base))
        .collect();
    Ok(trim_leading_zeros(&digits))
}
