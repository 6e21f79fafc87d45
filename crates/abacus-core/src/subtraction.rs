//! Column subtraction with cascading borrow.
//!
//! The top operand is copied into a "visual" digit buffer that records
//! every borrow: lenders are decremented, zeros passed over become
//! `base - 1`, and the borrowing column gains `base`. The buffer is owned
//! by a single `generate` call and handed to [`borrow`] by `&mut`, so a
//! later column always sees the state left behind by earlier borrows.

use crate::codec::{digits_of, trim_leading_zeros, Base};
use crate::error::ArithError;
use crate::generator::{align, column, column_width, pad_left, render, StepGenerator};
use crate::parser::Operator;
use crate::step::Step;
use tracing::warn;

#[derive(Debug, Default, Clone, Copy)]
pub struct Subtraction;

impl StepGenerator for Subtraction {
    fn id(&self) -> &'static str {
        "subtraction.borrow.v1"
    }

    fn operator(&self) -> Operator {
        Operator::Subtract
    }

    fn generate(&self, top: &str, bottom: &str, base: Base) -> Result<Vec<Step>, ArithError> {
        let top_values = digits_of(top, base)?;
        let bottom_values = digits_of(bottom, base)?;
        let width = column_width(top, bottom)?;

        let mut visual = zero_extend(&top_values, width);
        let subtrahend = zero_extend(&bottom_values, width);
        // equal-width digit vectors compare like the numbers they encode
        if visual < subtrahend {
            return Err(ArithError::NegativeResult {
                minuend: top.to_string(),
                subtrahend: bottom.to_string(),
            });
        }

        let top_cells = align(top, &top_values, width);
        let bottom_cells = align(bottom, &bottom_values, width);

        let mut steps = vec![Step::Setup {
            operator: Operator::Subtract,
            top: pad_left(top, width, ' '),
            bottom: pad_left(bottom, width, ' '),
            raw_top: top.to_string(),
            raw_bottom: bottom.to_string(),
            base: base.get(),
            max_length: width,
        }];
        let mut written: Vec<String> = Vec::with_capacity(width);

        for i in (0..width).rev() {
            let d2 = subtrahend[i];
            steps.push(Step::Highlight {
                column_index: column(i),
                digit_top: top_cells[i].map(|(c, _)| c),
                digit_bottom: bottom_cells[i].map(|(c, _)| c),
                val_top: visual[i],
                val_bottom: d2,
                carry_in: 0,
            });

            let mut d1 = visual[i];
            if d1 < d2 {
                d1 = borrow(&mut visual, i, base, &mut steps)?;
            }

            let diff = render(d1 - d2, base);
            steps.push(Step::CalculateDiff {
                column_index: column(i),
                d_top: d1,
                d_bottom: d2,
                diff: diff.clone(),
            });
            steps.push(Step::WriteResult {
                column_index: column(i),
                value: diff.clone(),
            });
            written.push(diff);
        }

        written.reverse();
        steps.push(Step::Finish {
            result: trim_leading_zeros(&written.concat()),
        });
        Ok(steps)
    }
}

fn zero_extend(values: &[u32], width: usize) -> Vec<u32> {
    let mut out = vec![0; width.saturating_sub(values.len())];
    out.extend_from_slice(values);
    out
}

/// Borrow into column `at` from the nearest nonzero digit to its left.
///
/// Returns the column's value after receiving `base`.
fn borrow(
    visual: &mut [u32],
    at: usize,
    base: Base,
    steps: &mut Vec<Step>,
) -> Result<u32, ArithError> {
    let lender = match (0..at).rev().find(|&k| visual[k] != 0) {
        Some(k) => k,
        None => {
            warn!(column = at, "borrow scan found no lender");
            return Err(ArithError::BorrowInvariant { column: at });
        }
    };

    let old = visual[lender];
    visual[lender] -= 1;
    steps.push(Step::BorrowAction {
        column_index: column(lender),
        old_value: render(old, base),
        new_value: render(visual[lender], base),
        is_source: true,
        is_ripple: false,
    });

    for j in lender + 1..at {
        let old = visual[j];
        visual[j] = base.max_digit();
        steps.push(Step::BorrowAction {
            column_index: column(j),
            old_value: render(old, base),
            new_value: render(visual[j], base),
            is_source: false,
            is_ripple: true,
        });
    }

    let old = visual[at];
    visual[at] += base.get();
    // rendered in the base, so base 2 shows "10" for the value 2
    steps.push(Step::BorrowReceive {
        column_index: column(at),
        old_value: render(old, base),
        new_value: render(visual[at], base),
        added_value: base.get(),
    });

    Ok(visual[at])
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(top: &str, bottom: &str, base: u32) -> Vec<Step> {
        Subtraction.generate(top, bottom, Base::new(base).unwrap()).unwrap()
    }

    fn borrow_steps(steps: &[Step]) -> Vec<&Step> {
        steps
            .iter()
            .filter(|s| matches!(s, Step::BorrowAction { .. } | Step::BorrowReceive { .. }))
            .collect()
    }

    #[test]
    fn test_simple_borrow() {
        let steps = run("50", "27", 10);
        assert_eq!(
            borrow_steps(&steps),
            vec![
                &Step::BorrowAction {
                    column_index: 0,
                    old_value: "5".into(),
                    new_value: "4".into(),
                    is_source: true,
                    is_ripple: false,
                },
                &Step::BorrowReceive {
                    column_index: 1,
                    old_value: "0".into(),
                    new_value: "10".into(),
                    added_value: 10,
                },
            ]
        );
        assert!(steps.contains(&Step::CalculateDiff {
            column_index: 1,
            d_top: 10,
            d_bottom: 7,
            diff: "3".into(),
        }));
        assert_eq!(steps.last(), Some(&Step::Finish { result: "23".into() }));
    }

    #[test]
    fn test_borrow_ripples_through_zeros() {
        let steps = run("100", "1", 10);
        assert_eq!(
            borrow_steps(&steps),
            vec![
                &Step::BorrowAction {
                    column_index: 0,
                    old_value: "1".into(),
                    new_value: "0".into(),
                    is_source: true,
                    is_ripple: false,
                },
                &Step::BorrowAction {
                    column_index: 1,
                    old_value: "0".into(),
                    new_value: "9".into(),
                    is_source: false,
                    is_ripple: true,
                },
                &Step::BorrowReceive {
                    column_index: 2,
                    old_value: "0".into(),
                    new_value: "10".into(),
                    added_value: 10,
                },
            ]
        );
        let written: Vec<_> = steps
            .iter()
            .filter_map(|s| match s {
                Step::WriteResult { value, .. } => Some(value.as_str()),
                _ => None,
            })
            .collect();
        assert_eq!(written, vec!["9", "9", "0"]);
        assert_eq!(steps.last(), Some(&Step::Finish { result: "99".into() }));
    }

    #[test]
    fn test_one_lender_for_a_long_ripple() {
        // units borrow from column 0, ripples columns 1 and 2
        let steps = run("1000", "111", 10);
        let sources = steps
            .iter()
            .filter(|s| matches!(s, Step::BorrowAction { is_source: true, .. }))
            .count();
        let ripples = steps
            .iter()
            .filter(|s| matches!(s, Step::BorrowAction { is_ripple: true, .. }))
            .count();
        assert_eq!(sources, 1);
        assert_eq!(ripples, 2);
        assert_eq!(steps.last(), Some(&Step::Finish { result: "889".into() }));
    }

    #[test]
    fn test_lender_shows_decremented_value_on_second_borrow() {
        // units borrow skips the zero in column 1 and takes from column 0
        let steps = run("201", "12", 10);
        assert_eq!(steps.last(), Some(&Step::Finish { result: "189".into() }));

        // 311 - 22: units borrows from column 1 (1 -> 0); tens then borrows
        // from column 0 (3 -> 2), seeing the already decremented tens digit.
        let steps = run("311", "22", 10);
        let receives: Vec<_> = steps
            .iter()
            .filter_map(|s| match s {
                Step::BorrowReceive { column_index, old_value, new_value, .. } => {
                    Some((*column_index, old_value.as_str(), new_value.as_str()))
                }
                _ => None,
            })
            .collect();
        assert_eq!(receives, vec![(2, "1", "11"), (1, "0", "10")]);
        assert_eq!(steps.last(), Some(&Step::Finish { result: "289".into() }));
    }

    #[test]
    fn test_binary_receive_renders_ten() {
        let steps = run("10", "1", 2);
        assert!(steps.contains(&Step::BorrowReceive {
            column_index: 1,
            old_value: "0".into(),
            new_value: "10".into(),
            added_value: 2,
        }));
        assert_eq!(steps.last(), Some(&Step::Finish { result: "1".into() }));
    }

    #[test]
    fn test_hex_ripple_uses_max_digit() {
        let steps = run("100", "1", 16);
        assert!(steps.contains(&Step::BorrowAction {
            column_index: 1,
            old_value: "0".into(),
            new_value: "F".into(),
            is_source: false,
            is_ripple: true,
        }));
        assert_eq!(steps.last(), Some(&Step::Finish { result: "FF".into() }));
    }

    #[test]
    fn test_negative_result_rejected() {
        let err = Subtraction.generate("27", "50", Base::DECIMAL).unwrap_err();
        assert!(matches!(err, ArithError::NegativeResult { .. }));
        // compared numerically, not by string length
        assert!(Subtraction.generate("0050", "49", Base::DECIMAL).is_ok());
        assert!(Subtraction.generate("009", "10", Base::DECIMAL).is_err());
    }

    #[test]
    fn test_equal_operands_give_zero() {
        let steps = run("42", "42", 10);
        assert!(borrow_steps(&steps).is_empty());
        assert_eq!(steps.last(), Some(&Step::Finish { result: "0".into() }));
    }

    #[test]
    fn test_borrow_without_lender_is_invariant_error() {
        let mut visual = vec![0, 0, 3];
        let mut steps = Vec::new();
        let err = borrow(&mut visual, 2, Base::DECIMAL, &mut steps).unwrap_err();
        assert_eq!(err, ArithError::BorrowInvariant { column: 2 });
        assert!(steps.is_empty());
    }
}
