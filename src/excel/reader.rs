//! Workbook reader - Excel (.xlsx) → in-memory worksheets

use super::cell::{Cell, CellValue, Workbook, Worksheet};
use crate::error::ExportResult;
use calamine::{open_workbook, Data, Range, Reader, Xlsx};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Reads every worksheet of an .xlsx file into a [`Workbook`]
pub struct WorkbookReader {
    path: PathBuf,
}

impl WorkbookReader {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    /// Open the workbook and materialize all sheets in declared order
    pub fn read(&self) -> ExportResult<Workbook> {
        let mut workbook: Xlsx<_> = open_workbook(&self.path)?;

        let stem = self
            .path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();
        let source = self
            .path
            .file_name()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();

        let mut sheets = Vec::new();
        for sheet_name in workbook.sheet_names() {
            let range = workbook.worksheet_range(&sheet_name)?;
            // Formula lookup is best effort: sheets without formulas simply report none.
            let formulas = workbook.worksheet_formula(&sheet_name).ok();
            sheets.push(Self::build_sheet(&sheet_name, &range, formulas.as_ref()));
        }

        debug!(
            "Read {} sheet(s) from {}",
            sheets.len(),
            self.path.display()
        );

        Ok(Workbook {
            name: stem,
            source,
            sheets,
        })
    }

    fn build_sheet(
        sheet_name: &str,
        range: &Range<Data>,
        formulas: Option<&Range<String>>,
    ) -> Worksheet {
        let mut sheet = Worksheet::new(sheet_name);

        // Range::end is absolute, so leading empty rows/cols are kept in place.
        let Some((last_row, last_col)) = range.end() else {
            return sheet;
        };

        for row in 0..=last_row {
            let mut cells = Vec::with_capacity(last_col as usize + 1);
            for col in 0..=last_col {
                let value = range
                    .get_value((row, col))
                    .map(data_to_cell_value)
                    .unwrap_or(CellValue::Empty);
                let formula = formulas
                    .and_then(|f| f.get_value((row, col)))
                    .is_some_and(|f| !f.is_empty());
                cells.push(Cell { value, formula });
            }
            sheet.rows.push(cells);
        }

        sheet
    }
}

/// Convert calamine Data to CellValue
fn data_to_cell_value(data: &Data) -> CellValue {
    match data {
        Data::Empty => CellValue::Empty,
        Data::String(s) if s.is_empty() => CellValue::Empty,
        Data::String(s) => CellValue::Text(s.clone()),
        Data::Int(i) => CellValue::Int(*i),
        Data::Float(f) => CellValue::Float(*f),
        Data::Bool(b) => CellValue::Bool(*b),
        Data::DateTime(dt) => CellValue::DateTime(dt.as_f64()),
        Data::DateTimeIso(s) | Data::DurationIso(s) => CellValue::Text(s.clone()),
        Data::Error(e) => CellValue::Error(e.to_string()),
    }
}
