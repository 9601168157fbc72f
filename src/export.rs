//! Export orchestration: workbook → header → records → serializers → files
//!
//! Worksheets are handled in declared order and workbooks in file-name order.
//! Every failure is contained: a workbook that cannot be opened, or an artifact
//! that cannot be rendered or written, is logged and counted, and the run
//! moves on.

use crate::coerce::EmptyPolicy;
use crate::config::ExportOptions;
use crate::error::{ExportError, ExportResult};
use crate::excel::{Workbook, WorkbookReader, Worksheet};
use crate::header::HeaderParser;
use crate::records::RecordBuilder;
use crate::types::{FieldList, FieldSpec, FieldType, Schema, Target};
use crate::writer::{
    render_delimited, render_json, render_key_value, render_proto, Artifact, SqlBatch,
    SqlSection, KEY_FIELD, VALUE_FIELD,
};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{error, info, warn};

/// Prefix marking temporary/backup workbooks that are never exported
pub const TEMP_FILE_PREFIX: char = '~';
pub const WORKBOOK_EXTENSION: &str = "xlsx";

/// An artifact that was written (or would have been, in a dry run)
#[derive(Debug, Clone, PartialEq)]
pub struct WrittenArtifact {
    pub path: PathBuf,
    pub target: Target,
    pub records: usize,
}

/// Outcome of a run
#[derive(Debug, Clone, Default)]
pub struct ExportSummary {
    pub workbooks: usize,
    pub written: Vec<WrittenArtifact>,
    pub failures: Vec<String>,
}

impl ExportSummary {
    pub fn is_success(&self) -> bool {
        self.failures.is_empty()
    }

    pub fn total_records(&self) -> usize {
        self.written.iter().map(|a| a.records).sum()
    }
}

pub struct Exporter {
    options: ExportOptions,
    parser: HeaderParser,
}

impl Exporter {
    pub fn new(options: ExportOptions) -> Self {
        let parser = HeaderParser::new(options.require_markers);
        Self { options, parser }
    }

    pub fn options(&self) -> &ExportOptions {
        &self.options
    }

    /// Export a single workbook file or every workbook in a directory
    pub fn export_target(&self, target: &Path) -> ExportResult<ExportSummary> {
        if !target.exists() {
            return Err(ExportError::TargetNotFound(target.display().to_string()));
        }

        let files = if target.is_dir() {
            collect_workbooks(target)?
        } else {
            vec![target.to_path_buf()]
        };

        if !self.options.dry_run {
            fs::create_dir_all(&self.options.output_dir)?;
        }

        let mut summary = ExportSummary::default();
        for file in &files {
            self.export_file(file, &mut summary);
        }
        Ok(summary)
    }

    /// Open one workbook and export it; an open failure only skips this file
    pub fn export_file(&self, path: &Path, summary: &mut ExportSummary) {
        match WorkbookReader::new(path).read() {
            Ok(workbook) => self.export_workbook(&workbook, summary),
            Err(e) => {
                error!("Failed to open {}: {}", path.display(), e);
                summary
                    .failures
                    .push(format!("{}: {}", path.display(), e));
            }
        }
    }

    pub fn export_workbook(&self, workbook: &Workbook, summary: &mut ExportSummary) {
        summary.workbooks += 1;

        for rendered in self.render_workbook(workbook) {
            let artifact = match rendered {
                Ok(artifact) => artifact,
                Err(e) => {
                    error!("{}: {}", workbook.source, e);
                    summary.failures.push(format!("{}: {}", workbook.source, e));
                    continue;
                }
            };

            let path = self.options.output_dir.join(&artifact.file_name);
            if !self.options.dry_run {
                if let Err(e) = fs::write(&path, &artifact.contents) {
                    error!("Failed to write {}: {}", path.display(), e);
                    summary.failures.push(format!("{}: {}", path.display(), e));
                    continue;
                }
            }

            info!("Exported {} {}", artifact.file_name, artifact.records);
            summary.written.push(WrittenArtifact {
                path,
                target: artifact.target,
                records: artifact.records,
            });
        }
    }

    /// Render every artifact the workbook produces, without touching the file system
    pub fn render_workbook(&self, workbook: &Workbook) -> Vec<ExportResult<Artifact>> {
        let mut artifacts = Vec::new();
        let mut sql = SqlBatch::new(&workbook.source);

        for sheet in &workbook.sheets {
            let schema = self.parser.parse(sheet);
            if schema.is_empty() {
                continue;
            }
            self.render_sheet(workbook, sheet, &schema, &mut sql, &mut artifacts);
        }

        if self.options.sql {
            artifacts.extend(sql.render(&workbook.name).map(Ok));
        }
        artifacts
    }

    fn render_sheet(
        &self,
        workbook: &Workbook,
        sheet: &Worksheet,
        schema: &Schema,
        sql: &mut SqlBatch,
        out: &mut Vec<ExportResult<Artifact>>,
    ) {
        let opts = &self.options;
        let directive = &schema.directive;
        let builder = RecordBuilder::new(sheet, schema);

        if opts.csv && directive.enables(Target::Csv) && !schema.secondary.is_empty() {
            let records = builder.build(FieldList::Secondary, Target::Csv, EmptyPolicy::Strict);
            out.push(render_delimited(&sheet.name, &schema.secondary, &records));
        }

        let wants_structured = (opts.json && (directive.json || directive.key_value))
            || (opts.sql && directive.sql)
            || (opts.proto && directive.proto);
        if !wants_structured {
            return;
        }
        if schema.output_name.is_empty() || schema.primary.is_empty() {
            warn!(
                "Sheet '{}': directive '{}' needs an output name and fields",
                sheet.name, directive.text
            );
            return;
        }

        if opts.json && directive.json {
            let records = builder.build(FieldList::Primary, Target::Json, EmptyPolicy::Strict);
            if let Some(rendered) = render_json(&schema.output_name, &records).transpose() {
                out.push(rendered);
            }
        }

        if opts.json && directive.key_value {
            if let Some(rendered) = self.render_key_value(sheet, schema, &builder) {
                out.push(rendered);
            }
        }

        if opts.proto && directive.proto {
            out.push(Ok(render_proto(
                &workbook.source,
                &schema.output_name,
                &schema.primary,
            )));
        }

        if opts.sql && directive.sql {
            let records = builder.build(FieldList::Primary, Target::Sql, EmptyPolicy::Lenient);
            sql.push(SqlSection::new(
                &sheet.name,
                &schema.output_name,
                &schema.primary,
                &records,
                opts.escape_sql_quotes,
            ));
        }
    }

    /// The key column is always read as text; the value column keeps its type.
    fn render_key_value(
        &self,
        sheet: &Worksheet,
        schema: &Schema,
        builder: &RecordBuilder<'_>,
    ) -> Option<ExportResult<Artifact>> {
        let (Some(key), Some(value)) = (schema.field(KEY_FIELD), schema.field(VALUE_FIELD)) else {
            warn!(
                "Sheet '{}': key/value export needs '{}' and '{}' fields",
                sheet.name, KEY_FIELD, VALUE_FIELD
            );
            return None;
        };

        let fields = [
            FieldSpec::new(key.column, KEY_FIELD, FieldType::String),
            value.clone(),
        ];
        let records = builder.build_fields(&fields, Target::KeyValue, EmptyPolicy::Lenient);
        render_key_value(&schema.output_name, &records).transpose()
    }
}

/// `*.xlsx` files in `dir` not starting with `~`, sorted by file name
pub fn collect_workbooks(dir: &Path) -> ExportResult<Vec<PathBuf>> {
    let mut files = Vec::new();
    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        if !path.is_file() {
            continue;
        }
        let is_workbook = path
            .extension()
            .is_some_and(|ext| ext == WORKBOOK_EXTENSION);
        let is_temp = path
            .file_name()
            .and_then(|n| n.to_str())
            .is_some_and(|n| n.starts_with(TEMP_FILE_PREFIX));
        if is_workbook && !is_temp {
            files.push(path);
        }
    }
    files.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
    Ok(files)
}
