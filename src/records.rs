//! Data rows → complete [`Record`]s
//!
//! A row yields a record only when every field of the list produced a value.
//! Comment rows and rows with any skipped field are dropped without a trace in
//! the output; parse failures are logged.

use crate::coerce::{coerce, EmptyPolicy, Skip};
use crate::excel::Worksheet;
use crate::types::{FieldList, FieldSpec, Record, Schema, Target};
use tracing::{trace, warn};

pub struct RecordBuilder<'a> {
    sheet: &'a Worksheet,
    schema: &'a Schema,
}

impl<'a> RecordBuilder<'a> {
    pub fn new(sheet: &'a Worksheet, schema: &'a Schema) -> Self {
        Self { sheet, schema }
    }

    /// Records for one of the schema's field lists
    pub fn build(&self, list: FieldList, target: Target, policy: EmptyPolicy) -> Vec<Record> {
        self.build_fields(self.schema.fields(list), target, policy)
    }

    /// Records over an arbitrary field subset, in row order
    pub fn build_fields(
        &self,
        fields: &[FieldSpec],
        target: Target,
        policy: EmptyPolicy,
    ) -> Vec<Record> {
        if fields.is_empty() {
            return Vec::new();
        }
        self.data_rows()
            .filter_map(|row| self.build_row(row, fields, target, policy))
            .collect()
    }

    /// Row indices after the header block that are not comments
    pub fn data_rows(&self) -> impl Iterator<Item = usize> + '_ {
        (self.schema.data_start..self.sheet.height())
            .filter(|&row| !self.sheet.cell(row, 0).is_comment())
    }

    fn build_row(
        &self,
        row: usize,
        fields: &[FieldSpec],
        target: Target,
        policy: EmptyPolicy,
    ) -> Option<Record> {
        let mut record = Record::new(row);

        for field in fields {
            let cell = self.sheet.cell(row, field.column);
            match coerce(cell, field.field_type.resolve(target), policy, row, field.column) {
                Ok(value) => record.push(field.name.clone(), value),
                Err(Skip::Empty) => {
                    trace!(
                        "Sheet '{}' row {}: '{}' is empty",
                        self.sheet.name,
                        row,
                        field.name
                    );
                }
                Err(Skip::Invalid(err)) => {
                    warn!("Sheet '{}' [{}]: {}", self.sheet.name, target.name(), err);
                }
            }
        }

        (record.len() == fields.len()).then_some(record)
    }
}
