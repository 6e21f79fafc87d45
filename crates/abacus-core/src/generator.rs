//! StepGenerator trait: one contract for the four schoolbook methods.
use crate::addition::Addition;
use crate::codec::{to_digits, Base};
use crate::division::Division;
use crate::error::ArithError;
use crate::multiplication::Multiplication;
use crate::parser::Operator;
use crate::step::{Column, Step};
use crate::subtraction::Subtraction;

/// A schoolbook method that turns two operands into a step trace.
///
/// Operands are expected to be uppercase digit strings; [`crate::generate`]
/// normalizes them before dispatching here. Each call is self-contained:
/// all scratch state lives in locals of `generate`.
pub trait StepGenerator: Send + Sync {
    /// Stable generator ID (ex: "addition.columns.v1")
    fn id(&self) -> &'static str;

    fn operator(&self) -> Operator;

    /// Produce the full step list, setup first and `Finish` last.
    fn generate(&self, top: &str, bottom: &str, base: Base) -> Result<Vec<Step>, ArithError>;
}

static ADDITION: Addition = Addition;
static SUBTRACTION: Subtraction = Subtraction;
static MULTIPLICATION: Multiplication = Multiplication;
static DIVISION: Division = Division;

impl Operator {
    /// The generator implementing this operator.
    pub fn generator(self) -> &'static dyn StepGenerator {
        match self {
            Operator::Add => &ADDITION,
            Operator::Subtract => &SUBTRACTION,
            Operator::Multiply => &MULTIPLICATION,
            Operator::Divide => &DIVISION,
        }
    }
}

/// One aligned column cell: the original digit character and its value,
/// or `None` where the operand was padded.
pub(crate) type Cell = Option<(char, u32)>;

/// Right-align `operand` into `width` cells.
pub(crate) fn align(operand: &str, values: &[u32], width: usize) -> Vec<Cell> {
    let offset = width.saturating_sub(values.len());
    let mut cells = vec![None; offset];
    cells.extend(operand.chars().zip(values.iter().copied()).map(Some));
    cells
}

pub(crate) fn pad_left(operand: &str, width: usize, fill: char) -> String {
    let mut padded: String = std::iter::repeat(fill)
        .take(width.saturating_sub(operand.len()))
        .collect();
    padded.push_str(operand);
    padded
}

/// Width of the column grid for two operands. Fails when a column index
/// would not fit in [`Column`].
pub(crate) fn column_width(top: &str, bottom: &str) -> Result<usize, ArithError> {
    checked_width(top.len().max(bottom.len()))
}

fn checked_width(width: usize) -> Result<usize, ArithError> {
    Column::try_from(width)
        .map(|_| width)
        .map_err(|_| ArithError::Overflow(format!("{} columns", width)))
}

/// `index` is below a width accepted by [`column_width`].
pub(crate) fn column(index: usize) -> Column {
    index as Column
}

/// Render a single digit value (or a small value such as a received borrow).
pub(crate) fn render(value: u32, base: Base) -> String {
    to_digits(u128::from(value), base)
}
