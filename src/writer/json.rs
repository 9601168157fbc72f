use super::{camel_to_snake, Artifact};
use crate::error::ExportResult;
use crate::types::{Record, Target};

/// JSON array of objects keyed by field name. Returns None when there are no
/// records, so no empty file is written.
pub fn render_json(output_name: &str, records: &[Record]) -> ExportResult<Option<Artifact>> {
    if records.is_empty() {
        return Ok(None);
    }

    let rows: Vec<serde_json::Value> = records
        .iter()
        .map(|r| serde_json::Value::Object(r.to_json()))
        .collect();
    let contents = serde_json::to_vec(&rows)?;

    Ok(Some(Artifact {
        target: Target::Json,
        file_name: format!("{}.json", camel_to_snake(output_name)),
        contents,
        records: records.len(),
    }))
}
