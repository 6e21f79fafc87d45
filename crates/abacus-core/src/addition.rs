//! Column addition with carry propagation.
use crate::codec::{digits_of, trim_leading_zeros, Base};
use crate::error::ArithError;
use crate::generator::{align, column, column_width, pad_left, render, StepGenerator};
use crate::parser::Operator;
use crate::step::{Step, FINAL_CARRY_COLUMN};

#[derive(Debug, Default, Clone, Copy)]
pub struct Addition;

impl StepGenerator for Addition {
    fn id(&self) -> &'static str {
        "addition.columns.v1"
    }

    fn operator(&self) -> Operator {
        Operator::Add
    }

    fn generate(&self, top: &str, bottom: &str, base: Base) -> Result<Vec<Step>, ArithError> {
        let top_values = digits_of(top, base)?;
        let bottom_values = digits_of(bottom, base)?;
        let width = column_width(top, bottom)?;
        let top_cells = align(top, &top_values, width);
        let bottom_cells = align(bottom, &bottom_values, width);

        let mut steps = vec![Step::Setup {
            operator: Operator::Add,
            top: pad_left(top, width, ' '),
            bottom: pad_left(bottom, width, ' '),
            raw_top: top.to_string(),
            raw_bottom: bottom.to_string(),
            base: base.get(),
            max_length: width,
        }];

        let radix = base.get();
        let mut carry = 0;
        // least significant first; reversed at the end
        let mut written: Vec<String> = Vec::with_capacity(width + 1);

        for i in (0..width).rev() {
            let (digit_top, val_top) = split(top_cells[i]);
            let (digit_bottom, val_bottom) = split(bottom_cells[i]);

            steps.push(Step::Highlight {
                column_index: column(i),
                digit_top,
                digit_bottom,
                val_top,
                val_bottom,
                carry_in: carry,
            });

            let sum = val_top + val_bottom + carry;
            let digit_result = render(sum % radix, base);
            let new_carry = sum / radix;

            steps.push(Step::Calculate {
                column_index: column(i),
                d_top: val_top,
                d_bottom: val_bottom,
                carry,
                sum,
                digit_result: digit_result.clone(),
                new_carry,
            });
            steps.push(Step::WriteResult {
                column_index: column(i),
                value: digit_result.clone(),
            });
            written.push(digit_result);

            if new_carry > 0 {
                steps.push(Step::Carry {
                    from_column: column(i),
                    to_column: column(i) - 1,
                    value: new_carry,
                });
            }
            carry = new_carry;
        }

        if carry > 0 {
            let value = render(carry, base);
            steps.push(Step::WriteFinalCarry {
                column_index: FINAL_CARRY_COLUMN,
                value: value.clone(),
            });
            written.push(value);
        }

        written.reverse();
        steps.push(Step::Finish {
            result: trim_leading_zeros(&written.concat()),
        });
        Ok(steps)
    }
}

fn split(cell: Option<(char, u32)>) -> (Option<char>, u32) {
    match cell {
        Some((c, v)) => (Some(c), v),
        None => (None, 0),
    }
}
