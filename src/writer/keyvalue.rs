use super::{camel_to_snake, Artifact};
use crate::error::ExportResult;
use crate::types::{Record, Target};

pub const KEY_FIELD: &str = "key";
pub const VALUE_FIELD: &str = "value";

/// Single JSON object mapping each record's `key` to its `value`.
///
/// Records with an empty key are dropped; a repeated key keeps the value of
/// its last row.
pub fn render_key_value(output_name: &str, records: &[Record]) -> ExportResult<Option<Artifact>> {
    let mut map = serde_json::Map::new();

    for record in records {
        let (Some(key), Some(value)) = (record.get(KEY_FIELD), record.get(VALUE_FIELD)) else {
            continue;
        };
        let key = key.render();
        if key.is_empty() {
            continue;
        }
        map.insert(key, serde_json::to_value(value)?);
    }

    if map.is_empty() {
        return Ok(None);
    }

    let entries = map.len();
    let contents = serde_json::to_vec(&serde_json::Value::Object(map))?;

    Ok(Some(Artifact {
        target: Target::KeyValue,
        file_name: format!("{}.json", camel_to_snake(output_name)),
        contents,
        records: entries,
    }))
}
