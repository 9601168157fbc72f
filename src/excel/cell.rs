//! In-memory worksheet model used by the export engine
//!
//! Cells are materialized once per workbook by [`super::WorkbookReader`]; tests
//! build the same structures by hand.

use std::fmt;

/// Marker that starts comment cells and comment rows.
pub const COMMENT_MARKER: char = '#';

/// Raw cell content as read from the workbook
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    Empty,
    Text(String),
    Int(i64),
    Float(f64),
    Bool(bool),
    /// Excel serial date (days since 1899-12-30)
    DateTime(f64),
    /// Error literal such as `#DIV/0!`
    Error(String),
}

/// What the cell natively holds, independent of any declared field type
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NativeKind {
    Text,
    Number,
    Formula,
    Date,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Cell {
    pub value: CellValue,
    /// True when the cell carries a formula; `value` is its cached result.
    pub formula: bool,
}

static EMPTY_CELL: Cell = Cell {
    value: CellValue::Empty,
    formula: false,
};

impl Cell {
    pub fn new(value: CellValue) -> Self {
        Self {
            value,
            formula: false,
        }
    }

    pub fn empty() -> Self {
        Self::new(CellValue::Empty)
    }

    pub fn text(s: impl Into<String>) -> Self {
        Self::new(CellValue::Text(s.into()))
    }

    /// A formula cell with its cached result
    pub fn formula(result: CellValue) -> Self {
        Self {
            value: result,
            formula: true,
        }
    }

    pub fn kind(&self) -> NativeKind {
        if self.formula {
            return NativeKind::Formula;
        }
        match self.value {
            CellValue::Int(_) | CellValue::Float(_) => NativeKind::Number,
            CellValue::DateTime(_) => NativeKind::Date,
            _ => NativeKind::Text,
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self.value, CellValue::Empty)
    }

    /// Cell rendered as text, without any trimming
    pub fn as_text(&self) -> String {
        self.value.to_string()
    }

    /// Text with comment markers and surrounding whitespace stripped
    pub fn trimmed(&self) -> String {
        trim_markers(&self.as_text()).to_string()
    }

    pub fn is_comment(&self) -> bool {
        self.as_text().trim_start().starts_with(COMMENT_MARKER)
    }

    pub fn float(&self) -> Result<f64, String> {
        match &self.value {
            CellValue::Float(f) | CellValue::DateTime(f) => Ok(*f),
            CellValue::Int(i) => Ok(*i as f64),
            CellValue::Text(s) => s
                .trim()
                .parse::<f64>()
                .map_err(|e| format!("cannot parse {:?} as float: {}", s, e)),
            CellValue::Empty => Err("cell is empty".to_string()),
            other => Err(format!("cannot read {} as float", other)),
        }
    }

    /// Integer value, truncated toward zero when the cell holds a fraction
    pub fn int(&self) -> Result<i64, String> {
        match &self.value {
            CellValue::Int(i) => Ok(*i),
            CellValue::Float(f) => truncate(*f),
            CellValue::Text(s) => {
                let s = s.trim();
                if let Ok(i) = s.parse::<i64>() {
                    return Ok(i);
                }
                s.parse::<f64>()
                    .map_err(|e| format!("cannot parse {:?} as integer: {}", s, e))
                    .and_then(truncate)
            }
            CellValue::Empty => Err("cell is empty".to_string()),
            other => Err(format!("cannot read {} as integer", other)),
        }
    }
}

fn truncate(f: f64) -> Result<i64, String> {
    let t = f.trunc();
    // i64::MAX as f64 rounds up to 2^63, which is itself out of range
    if t.is_finite() && t >= i64::MIN as f64 && t < i64::MAX as f64 {
        Ok(t as i64)
    } else {
        Err(format!("{} is out of integer range", f))
    }
}

impl Default for Cell {
    fn default() -> Self {
        Self::empty()
    }
}

impl From<&str> for Cell {
    fn from(s: &str) -> Self {
        if s.is_empty() {
            Cell::empty()
        } else {
            Cell::text(s)
        }
    }
}

impl From<i64> for Cell {
    fn from(i: i64) -> Self {
        Cell::new(CellValue::Int(i))
    }
}

impl From<f64> for Cell {
    fn from(f: f64) -> Self {
        Cell::new(CellValue::Float(f))
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Empty => Ok(()),
            CellValue::Text(s) => f.write_str(s),
            CellValue::Int(i) => write!(f, "{}", i),
            CellValue::Float(v) | CellValue::DateTime(v) => write!(f, "{}", v),
            CellValue::Bool(true) => f.write_str("TRUE"),
            CellValue::Bool(false) => f.write_str("FALSE"),
            CellValue::Error(e) => f.write_str(e),
        }
    }
}

/// Strip comment markers and whitespace from both ends
pub fn trim_markers(s: &str) -> &str {
    s.trim_matches(|c: char| c == COMMENT_MARKER || c.is_whitespace())
}

/// One worksheet, addressed by absolute (row, col) coordinates
#[derive(Debug, Clone, Default)]
pub struct Worksheet {
    pub name: String,
    pub rows: Vec<Vec<Cell>>,
}

impl Worksheet {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            rows: Vec::new(),
        }
    }

    pub fn from_rows(name: impl Into<String>, rows: Vec<Vec<Cell>>) -> Self {
        Self {
            name: name.into(),
            rows,
        }
    }

    pub fn height(&self) -> usize {
        self.rows.len()
    }

    pub fn width(&self) -> usize {
        self.rows.iter().map(Vec::len).max().unwrap_or(0)
    }

    /// Cell at (row, col); out-of-range coordinates read as an empty cell.
    pub fn cell(&self, row: usize, col: usize) -> &Cell {
        self.rows
            .get(row)
            .and_then(|r| r.get(col))
            .unwrap_or(&EMPTY_CELL)
    }
}

/// A workbook's worksheets in declared order
#[derive(Debug, Clone, Default)]
pub struct Workbook {
    /// File name without extension; names the SQL artifact.
    pub name: String,
    /// File name as given, used in generated headers.
    pub source: String,
    pub sheets: Vec<Worksheet>,
}

impl Workbook {
    pub fn new(name: impl Into<String>, sheets: Vec<Worksheet>) -> Self {
        let name = name.into();
        Self {
            source: format!("{}.xlsx", name),
            name,
            sheets,
        }
    }
}
