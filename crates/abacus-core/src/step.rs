//! Step model: the trace contract handed to renderers and exporters.
//!
//! A [`StepSequence`] always opens with one setup-class step and closes
//! with one [`Step::Finish`]. Column indices are positions in the padded
//! operand strings: `0` is the leftmost column, `width - 1` the units
//! column, and `-1` the virtual column that receives a final carry.
//!
//! Display values (`String` fields) are rendered in the active base with
//! uppercase digits. Integer fields are plain host values.

use crate::codec::Base;
use crate::parser::Operator;
use serde::{Deserialize, Serialize};

/// Column position in the padded operands; `-1` is the virtual carry column.
pub type Column = i32;

/// Virtual column one position left of the leftmost real column.
pub const FINAL_CARRY_COLUMN: Column = -1;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case", rename_all_fields = "camelCase")]
pub enum Step {
    /// Column layout for addition and subtraction.
    Setup {
        operator: Operator,
        /// Top operand, left-padded with spaces to `max_length`
        top: String,
        bottom: String,
        raw_top: String,
        raw_bottom: String,
        base: u32,
        max_length: usize,
    },
    Highlight {
        column_index: Column,
        /// `None` for a padding position
        digit_top: Option<char>,
        digit_bottom: Option<char>,
        val_top: u32,
        val_bottom: u32,
        carry_in: u32,
    },
    Calculate {
        column_index: Column,
        d_top: u32,
        d_bottom: u32,
        carry: u32,
        sum: u32,
        digit_result: String,
        new_carry: u32,
    },
    WriteResult {
        column_index: Column,
        value: String,
    },
    Carry {
        from_column: Column,
        to_column: Column,
        value: u32,
    },
    WriteFinalCarry {
        column_index: Column,
        value: String,
    },
    /// A lender (`is_source`) or a rippled zero (`is_ripple`) in a borrow cascade.
    BorrowAction {
        column_index: Column,
        old_value: String,
        new_value: String,
        is_source: bool,
        is_ripple: bool,
    },
    BorrowReceive {
        column_index: Column,
        old_value: String,
        new_value: String,
        added_value: u32,
    },
    CalculateDiff {
        column_index: Column,
        d_top: u32,
        d_bottom: u32,
        diff: String,
    },
    SetupMultiplication {
        top: String,
        bottom: String,
        base: u32,
    },
    HighlightMultiplier {
        /// Position of the digit in the multiplier string, leftmost = 0
        bottom_index: usize,
        value: u32,
    },
    CalculatePartial {
        term1: String,
        term2: String,
        result: String,
        shift: usize,
    },
    WritePartial {
        value: String,
        shift: usize,
        row_line: usize,
    },
    DrawSumLine,
    WriteMultResult {
        value: String,
    },
    SetupDivision {
        dividend: String,
        divisor: String,
        base: u32,
    },
    DivBringDown {
        digit: char,
        current_str: String,
        index: usize,
    },
    DivEstimate {
        current_val: String,
        divisor: String,
        quotient: String,
    },
    DivWriteQuotient {
        digit: String,
        index: usize,
    },
    DivMultiply {
        digit: String,
        divisor: String,
        product: String,
        row_index: usize,
    },
    DivSubtract {
        minuend: String,
        subtrahend: String,
        remainder: String,
        row_index: usize,
    },
    Finish {
        result: String,
    },
}

impl Step {
    /// Wire name of the step kind, as found in the `type` field.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Setup { .. } => "setup",
            Self::Highlight { .. } => "highlight",
            Self::Calculate { .. } => "calculate",
            Self::WriteResult { .. } => "write_result",
            Self::Carry { .. } => "carry",
            Self::WriteFinalCarry { .. } => "write_final_carry",
            Self::BorrowAction { .. } => "borrow_action",
            Self::BorrowReceive { .. } => "borrow_receive",
            Self::CalculateDiff { .. } => "calculate_diff",
            Self::SetupMultiplication { .. } => "setup_multiplication",
            Self::HighlightMultiplier { .. } => "highlight_multiplier",
            Self::CalculatePartial { .. } => "calculate_partial",
            Self::WritePartial { .. } => "write_partial",
            Self::DrawSumLine => "draw_sum_line",
            Self::WriteMultResult { .. } => "write_mult_result",
            Self::SetupDivision { .. } => "setup_division",
            Self::DivBringDown { .. } => "div_bring_down",
            Self::DivEstimate { .. } => "div_estimate",
            Self::DivWriteQuotient { .. } => "div_write_quotient",
            Self::DivMultiply { .. } => "div_multiply",
            Self::DivSubtract { .. } => "div_subtract",
            Self::Finish { .. } => "finish",
        }
    }

    pub fn is_setup(&self) -> bool {
        matches!(
            self,
            Self::Setup { .. } | Self::SetupMultiplication { .. } | Self::SetupDivision { .. }
        )
    }

    pub fn is_finish(&self) -> bool {
        matches!(self, Self::Finish { .. })
    }

    /// The column this step acts on, for column-oriented steps.
    pub fn column(&self) -> Option<Column> {
        match self {
            Self::Highlight { column_index, .. }
            | Self::Calculate { column_index, .. }
            | Self::WriteResult { column_index, .. }
            | Self::WriteFinalCarry { column_index, .. }
            | Self::BorrowAction { column_index, .. }
            | Self::BorrowReceive { column_index, .. }
            | Self::CalculateDiff { column_index, .. } => Some(*column_index),
            Self::Carry { from_column, .. } => Some(*from_column),
            _ => None,
        }
    }

    /// Digit strings this step writes onto the page.
    pub fn written_digits(&self) -> Vec<&str> {
        match self {
            Self::Calculate { digit_result, .. } => vec![digit_result.as_str()],
            Self::WriteResult { value, .. }
            | Self::WriteFinalCarry { value, .. }
            | Self::WritePartial { value, .. }
            | Self::WriteMultResult { value } => vec![value.as_str()],
            Self::BorrowAction { old_value, new_value, .. }
            | Self::BorrowReceive { old_value, new_value, .. } => {
                vec![old_value.as_str(), new_value.as_str()]
            }
            Self::CalculateDiff { diff, .. } => vec![diff.as_str()],
            Self::CalculatePartial { term1, term2, result, .. } => {
                vec![term1.as_str(), term2.as_str(), result.as_str()]
            }
            Self::DivBringDown { current_str, .. } => vec![current_str.as_str()],
            Self::DivEstimate { current_val, divisor, quotient } => {
                vec![current_val.as_str(), divisor.as_str(), quotient.as_str()]
            }
            Self::DivWriteQuotient { digit, .. } => vec![digit.as_str()],
            Self::DivMultiply { digit, divisor, product, .. } => {
                vec![digit.as_str(), divisor.as_str(), product.as_str()]
            }
            Self::DivSubtract { minuend, subtrahend, remainder, .. } => {
                vec![minuend.as_str(), subtrahend.as_str(), remainder.as_str()]
            }
            Self::Finish { result } => vec![result.as_str()],
            _ => Vec::new(),
        }
    }
}

/// Ordered, immutable output of one generation run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct StepSequence {
    steps: Vec<Step>,
    #[serde(skip)]
    operator: Operator,
    #[serde(skip)]
    base: Base,
}

impl StepSequence {
    pub(crate) fn new(steps: Vec<Step>, operator: Operator, base: Base) -> Self {
        Self { steps, operator, base }
    }

    pub fn steps(&self) -> &[Step] {
        &self.steps
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Step> {
        self.steps.iter()
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    pub fn operator(&self) -> Operator {
        self.operator
    }

    pub fn base(&self) -> Base {
        self.base
    }

    /// The leading setup-class step.
    pub fn setup(&self) -> Option<&Step> {
        self.steps.first().filter(|s| s.is_setup())
    }

    /// The trailing `Finish` step.
    pub fn finish(&self) -> Option<&Step> {
        self.steps.last().filter(|s| s.is_finish())
    }

    /// Final result digits, most significant first.
    pub fn result(&self) -> Option<&str> {
        match self.finish() {
            Some(Step::Finish { result }) => Some(result),
            _ => None,
        }
    }

    pub fn into_steps(self) -> Vec<Step> {
        self.steps
    }
}

impl<'a> IntoIterator for &'a StepSequence {
    type Item = &'a Step;
    type IntoIter = std::slice::Iter<'a, Step>;

    fn into_iter(self) -> Self::IntoIter {
        self.steps.iter()
    }
}

impl IntoIterator for StepSequence {
    type Item = Step;
    type IntoIter = std::vec::IntoIter<Step>;

    fn into_iter(self) -> Self::IntoIter {
        self.steps.into_iter()
    }
}
