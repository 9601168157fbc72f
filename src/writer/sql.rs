use super::Artifact;
use crate::types::{FieldSpec, Record, Target, Value};
use std::fmt::Write as _;

/// DELETE + INSERT statements for one worksheet
#[derive(Debug, Clone, PartialEq)]
pub struct SqlSection {
    pub sheet_name: String,
    pub table: String,
    pub columns: Vec<String>,
    pub tuples: Vec<String>,
}

impl SqlSection {
    /// Render value tuples for `records`.
    ///
    /// With `escape_quotes` off, string values are wrapped in single quotes
    /// verbatim, so an embedded `'` breaks the statement.
    pub fn new(
        sheet_name: &str,
        table: &str,
        fields: &[FieldSpec],
        records: &[Record],
        escape_quotes: bool,
    ) -> Self {
        let columns = fields.iter().map(|f| format!("`{}`", f.name)).collect();
        let tuples = records
            .iter()
            .map(|r| {
                let values: Vec<String> = r
                    .values
                    .iter()
                    .map(|(_, v)| sql_literal(v, escape_quotes))
                    .collect();
                format!("({})", values.join(","))
            })
            .collect();

        Self {
            sheet_name: sheet_name.to_string(),
            table: table.to_string(),
            columns,
            tuples,
        }
    }

    fn write_to(&self, out: &mut String) {
        let _ = writeln!(out);
        let _ = writeln!(out, "-- Sheet: {} {} row(s)", self.sheet_name, self.tuples.len());
        let _ = writeln!(out, "DELETE FROM `{}`;", self.table);
        if self.tuples.is_empty() {
            return;
        }
        let _ = writeln!(
            out,
            "INSERT INTO `{}` ({}) VALUES",
            self.table,
            self.columns.join(",")
        );
        let _ = writeln!(out, "{};", self.tuples.join(",\n"));
    }
}

fn sql_literal(value: &Value, escape_quotes: bool) -> String {
    match value {
        Value::Text(s) if escape_quotes => format!("'{}'", s.replace('\'', "''")),
        Value::Text(s) => format!("'{}'", s),
        other => other.render(),
    }
}

/// All SQL sections of one workbook, rendered into a single file
#[derive(Debug, Clone, Default)]
pub struct SqlBatch {
    source: String,
    sections: Vec<SqlSection>,
}

impl SqlBatch {
    pub fn new(source: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            sections: Vec::new(),
        }
    }

    pub fn push(&mut self, section: SqlSection) {
        self.sections.push(section);
    }

    pub fn records(&self) -> usize {
        self.sections.iter().map(|s| s.tuples.len()).sum()
    }

    /// `<workbook_name>.sql`, or None when no section has a row.
    pub fn render(&self, workbook_name: &str) -> Option<Artifact> {
        let records = self.records();
        if records == 0 {
            return None;
        }

        let mut out = String::new();
        out.push_str("-- Auto generated by xlsx-export\n");
        let _ = writeln!(out, "-- Source: {}", self.source);
        for section in &self.sections {
            section.write_to(&mut out);
        }

        Some(Artifact {
            target: Target::Sql,
            file_name: format!("{}.sql", workbook_name),
            contents: out.into_bytes(),
            records,
        })
    }
}
