//! Cell access for worksheets
//!
//! - [`WorkbookReader`]: loads an .xlsx file through calamine
//! - [`Worksheet`] / [`Cell`]: the read-only view the export engine works on

mod cell;
mod reader;

pub use cell::{trim_markers, Cell, CellValue, NativeKind, Workbook, Worksheet, COMMENT_MARKER};
pub use reader::WorkbookReader;
