use thiserror::Error;

pub type ExportResult<T> = Result<T, ExportError>;

#[derive(Error, Debug)]
pub enum ExportError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Workbook error: {0}")]
    Workbook(#[from] calamine::XlsxError),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Target not found: {0}")]
    TargetNotFound(String),
}

/// A single cell that could not be read as the requested type.
///
/// Never fatal: the record builder turns it into a diagnostic and drops the row.
#[derive(Error, Debug, Clone, PartialEq)]
#[error("row: {row}, col: {col}, {reason}")]
pub struct CellError {
    pub row: usize,
    pub col: usize,
    pub reason: String,
}

impl CellError {
    pub fn new(row: usize, col: usize, reason: impl Into<String>) -> Self {
        Self {
            row,
            col,
            reason: reason.into(),
        }
    }
}
