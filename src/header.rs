//! Header block parsing: worksheet → [`Schema`]
//!
//! The leading rows of a worksheet describe what to export:
//!
//! ```text
//! row 0   #JSON,SQL        ItemInfo          <- directive, output name
//! row 1   #id              label     price   <- primary field names
//! row 2   #id              label             <- delimited-text field names
//! row 3   #int             string    float   <- type tags
//! row 4.. data
//! ```
//!
//! The compact layout drops row 2 and uses one name row for both lists.

use crate::excel::Worksheet;
use crate::types::{Directive, FieldSpec, FieldType, Schema};
use tracing::debug;

/// Known header layouts
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Layout {
    /// Four comment-marked rows with two name rows
    Marked,
    /// Three comment-marked rows with a single name row
    Compact,
    /// Four rows, markers not checked
    Unmarked,
}

impl Layout {
    pub fn header_rows(self) -> usize {
        match self {
            Layout::Marked | Layout::Unmarked => 4,
            Layout::Compact => 3,
        }
    }

    fn primary_row(self) -> usize {
        1
    }

    fn secondary_row(self) -> usize {
        match self {
            Layout::Marked | Layout::Unmarked => 2,
            Layout::Compact => 1,
        }
    }

    fn type_row(self) -> usize {
        self.header_rows() - 1
    }

    /// Pick the layout from the sheet's shape, or None if it has no usable header.
    pub fn detect(sheet: &Worksheet, require_markers: bool) -> Option<Layout> {
        if sheet.width() < HeaderParser::MIN_COLUMNS {
            return None;
        }

        let marked = |rows: usize| {
            sheet.height() >= rows && (0..rows).all(|r| sheet.cell(r, 0).is_comment())
        };

        // A compact header followed by a comment row also has four marked rows;
        // the type row is where the recognized tags are.
        if marked(4) && !(is_type_row(sheet, 2) && !is_type_row(sheet, 3)) {
            Some(Layout::Marked)
        } else if marked(3) {
            Some(Layout::Compact)
        } else if !require_markers && sheet.height() >= 4 {
            Some(Layout::Unmarked)
        } else {
            None
        }
    }
}

/// Every cell of the row is empty or a recognized type tag
fn is_type_row(sheet: &Worksheet, row: usize) -> bool {
    (0..sheet.width())
        .all(|col| FieldType::known_tag(&sheet.cell(row, col).trimmed()).is_some())
}

/// Reads the header block of a worksheet
#[derive(Debug, Clone, Copy)]
pub struct HeaderParser {
    require_markers: bool,
}

impl Default for HeaderParser {
    fn default() -> Self {
        Self {
            require_markers: true,
        }
    }
}

impl HeaderParser {
    pub const MIN_COLUMNS: usize = 2;

    pub fn new(require_markers: bool) -> Self {
        Self { require_markers }
    }

    /// Parse the header; an empty Schema means the sheet is not exportable.
    pub fn parse(&self, sheet: &Worksheet) -> Schema {
        let Some(layout) = Layout::detect(sheet, self.require_markers) else {
            debug!(
                "Sheet '{}' has no export header ({} rows, {} cols)",
                sheet.name,
                sheet.height(),
                sheet.width()
            );
            return Schema::default();
        };

        let directive = Directive::parse(&sheet.cell(0, 0).trimmed());
        let output_name = sheet.cell(0, 1).trimmed();

        let primary = Self::field_list(sheet, layout.primary_row(), layout.type_row());
        let secondary = Self::field_list(sheet, layout.secondary_row(), layout.type_row());

        debug!(
            "Sheet '{}': {:?} layout, directive '{}', {} primary / {} secondary fields",
            sheet.name,
            layout,
            directive.text,
            primary.len(),
            secondary.len()
        );

        Schema {
            directive,
            output_name,
            primary,
            secondary,
            data_start: layout.header_rows(),
        }
    }

    /// Columns with a non-empty name in `name_row`, left to right
    fn field_list(sheet: &Worksheet, name_row: usize, type_row: usize) -> Vec<FieldSpec> {
        (0..sheet.width())
            .filter_map(|col| {
                let name = sheet.cell(name_row, col).trimmed();
                if name.is_empty() {
                    return None;
                }
                let tag = sheet.cell(type_row, col).trimmed();
                Some(FieldSpec::new(col, name, FieldType::from_tag(&tag)))
            })
            .collect()
    }
}
