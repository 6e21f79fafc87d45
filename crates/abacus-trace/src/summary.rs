//! Trace summaries and frame naming for exporters.
use crate::verify::framing;
use crate::TraceError;
use abacus_core::{Column, Operator, Step};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TraceSummary {
    pub operator: Operator,
    pub base: u32,
    pub result: String,
    pub step_count: usize,
    /// Carry value landing on each destination column
    pub carries: BTreeMap<Column, u32>,
    pub borrow_count: usize,
    pub partial_count: usize,
    pub quotient_digits: usize,
}

pub fn summarize(steps: &[Step]) -> Result<TraceSummary, TraceError> {
    let (header, result) = framing(steps)?;

    let mut summary = TraceSummary {
        operator: header.operator,
        base: header.base,
        result: result.to_string(),
        step_count: steps.len(),
        carries: BTreeMap::new(),
        borrow_count: 0,
        partial_count: 0,
        quotient_digits: 0,
    };

    for step in steps {
        match step {
            Step::Carry { to_column, value, .. } => {
                summary.carries.insert(*to_column, *value);
            }
            Step::BorrowReceive { .. } => summary.borrow_count += 1,
            Step::WritePartial { .. } => summary.partial_count += 1,
            Step::DivWriteQuotient { .. } => summary.quotient_digits += 1,
            _ => {}
        }
    }

    Ok(summary)
}

/// File-friendly frame name: `<index>_<kind>_col<column>`, or
/// `<index>_<kind>` for steps without a column.
pub fn frame_label(step: &Step, index: usize) -> String {
    match step.column() {
        Some(col) => format!("{}_{}_col{}", index, step.kind(), col),
        None => format!("{}_{}", index, step.kind()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use abacus_core::generate_steps;

    #[test]
    fn test_summary_counts() {
        let seq = generate_steps("99+1", 10).unwrap();
        let summary = summarize(seq.steps()).unwrap();
        assert_eq!(summary.result, "100");
        assert_eq!(summary.carries.get(&0), Some(&1));
        assert_eq!(summary.carries.get(&-1), Some(&1));
        assert_eq!(summary.borrow_count, 0);
        assert_eq!(summary.step_count, seq.len());
    }

    #[test]
    fn test_frame_labels() {
        assert_eq!(
            frame_label(&Step::WriteResult { column_index: 2, value: "9".into() }, 7),
            "7_write_result_col2"
        );
        assert_eq!(
            frame_label(&Step::WriteFinalCarry { column_index: -1, value: "1".into() }, 9),
            "9_write_final_carry_col-1"
        );
        assert_eq!(frame_label(&Step::DrawSumLine, 4), "4_draw_sum_line");
    }
}
