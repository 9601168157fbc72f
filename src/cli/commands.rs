use crate::config::ExportOptions;
use crate::error::ExportResult;
use crate::export::{ExportSummary, Exporter};
use colored::Colorize;
use std::path::PathBuf;

/// Execute the export command
pub fn export(target: PathBuf, options: ExportOptions, verbose: bool) -> ExportResult<ExportSummary> {
    if verbose {
        println!("{}", "📊 xlsx-export".bold().green());
        println!("   Target: {}", target.display());
        println!("   Output: {}", options.output_dir.display());
        println!("   Formats: {}\n", enabled_formats(&options).cyan());
    }

    let exporter = Exporter::new(options);
    let summary = exporter.export_target(&target)?;

    for artifact in &summary.written {
        let name = artifact
            .path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        println!("Exported {} {}", name.bright_blue(), artifact.records);
    }

    if exporter.options().dry_run {
        println!("{}", "📋 Dry run complete - no files written".yellow());
    }

    if verbose || !summary.is_success() {
        println!();
        println!(
            "   {} workbook(s), {} file(s), {} record(s)",
            summary.workbooks,
            summary.written.len(),
            summary.total_records()
        );
    }
    for failure in &summary.failures {
        println!("   {} {}", "❌".red(), failure);
    }

    Ok(summary)
}

fn enabled_formats(options: &ExportOptions) -> String {
    let formats: Vec<&str> = [
        (options.csv, "csv"),
        (options.json, "json"),
        (options.sql, "sql"),
        (options.proto, "proto"),
    ]
    .into_iter()
    .filter_map(|(on, name)| on.then_some(name))
    .collect();

    if formats.is_empty() {
        "none".to_string()
    } else {
        formats.join(", ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_enabled_formats() {
        assert_eq!(enabled_formats(&ExportOptions::default()), "csv");
        assert_eq!(enabled_formats(&ExportOptions::all()), "csv, json, sql, proto");
        assert_eq!(
            enabled_formats(&ExportOptions::default().with_csv(false)),
            "none"
        );
    }

    #[test]
    fn test_export_missing_target_fails() {
        let result = export(
            PathBuf::from("/no/such/workbook.xlsx"),
            ExportOptions::default(),
            false,
        );
        assert!(result.is_err());
    }
}
