//! Cell → typed [`Value`] conversion

use crate::error::CellError;
use crate::excel::{Cell, NativeKind};
use crate::types::{FieldType, Value};

/// How a target treats cells whose trimmed text is empty
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmptyPolicy {
    /// Empty cells never produce a value
    Strict,
    /// Empty strings are valid string values; numeric fields still need a number
    Lenient,
}

/// Why a field produced no value
#[derive(Debug, Clone, PartialEq)]
pub enum Skip {
    /// Empty cell rejected by the policy; not worth a diagnostic
    Empty,
    /// Cell could not be read as the field's type
    Invalid(CellError),
}

/// Convert one cell. `field_type` must already be resolved for the target.
pub fn coerce(
    cell: &Cell,
    field_type: FieldType,
    policy: EmptyPolicy,
    row: usize,
    col: usize,
) -> Result<Value, Skip> {
    let text = cell.trimmed();
    if policy == EmptyPolicy::Strict && text.is_empty() {
        return Err(Skip::Empty);
    }

    let invalid = |reason: String| Skip::Invalid(CellError::new(row, col, reason));

    match field_type {
        FieldType::String => Ok(Value::Text(text)),
        FieldType::Float | FieldType::Double => cell.float().map(Value::Float).map_err(invalid),
        FieldType::Integer(_) | FieldType::Unspecified => {
            cell.int().map(Value::Integer).map_err(invalid)
        }
        FieldType::Auto => match cell.kind() {
            NativeKind::Formula | NativeKind::Number => {
                cell.float().map(Value::Float).map_err(invalid)
            }
            NativeKind::Text | NativeKind::Date => Ok(Value::Text(text)),
        },
    }
}
