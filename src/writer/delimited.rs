use super::Artifact;
use crate::error::ExportResult;
use crate::types::{FieldSpec, Record, Target};

/// Tab-separated text: a header line of field names, then one line per record.
/// Lines end in CRLF and nothing is quoted.
pub fn render_delimited(
    sheet_name: &str,
    fields: &[FieldSpec],
    records: &[Record],
) -> ExportResult<Artifact> {
    let mut writer = csv::WriterBuilder::new()
        .delimiter(b'\t')
        .terminator(csv::Terminator::CRLF)
        .quote_style(csv::QuoteStyle::Never)
        .flexible(true)
        .from_writer(Vec::new());

    writer.write_record(fields.iter().map(|f| f.name.as_str()))?;
    for record in records {
        writer.write_record(record.values.iter().map(|(_, v)| v.render()))?;
    }

    let contents = writer
        .into_inner()
        .map_err(|e| std::io::Error::other(e.to_string()))?;

    Ok(Artifact {
        target: Target::Csv,
        file_name: format!("{}.csv", sheet_name),
        contents,
        records: records.len(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{FieldType, Value};

    #[test]
    fn test_header_and_rows_use_tabs_and_crlf() {
        let fields = vec![
            FieldSpec::new(0, "id", FieldType::Unspecified),
            FieldSpec::new(2, "price", FieldType::Float),
        ];
        let mut r = Record::new(4);
        r.push("id", Value::Integer(1));
        r.push("price", Value::Float(2.5));

        let artifact = render_delimited("Items", &fields, &[r]).unwrap();
        assert_eq!(artifact.file_name, "Items.csv");
        assert_eq!(artifact.records, 1);
        assert_eq!(artifact.contents_str(), "id\tprice\r\n1\t2.5\r\n");
    }

    #[test]
    fn test_zero_records_still_writes_header() {
        let fields = vec![FieldSpec::new(0, "name", FieldType::String)];
        let artifact = render_delimited("Empty", &fields, &[]).unwrap();
        assert_eq!(artifact.contents_str(), "name\r\n");
        assert_eq!(artifact.records, 0);
    }

    #[test]
    fn test_values_with_commas_and_quotes_are_not_quoted() {
        let fields = vec![FieldSpec::new(0, "text", FieldType::String)];
        let mut r = Record::new(4);
        r.push("text", Value::Text("a, \"b\"".into()));
        let artifact = render_delimited("Quotes", &fields, &[r]).unwrap();
        assert_eq!(artifact.contents_str(), "text\r\na, \"b\"\r\n");
    }
}
