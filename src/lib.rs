//! xlsx-export - schema-driven worksheet export
//!
//! Worksheets carry their own export metadata in a short header block: a
//! directive naming the output formats, an output name, field names and type
//! tags. This crate parses that header, coerces the data rows into typed
//! records and renders them as tab-separated text, JSON arrays, JSON key/value
//! maps, SQL bulk-load statements and proto3 schema stubs.
//!
//! # Example
//!
//! ```no_run
//! use xlsx_export::config::ExportOptions;
//! use xlsx_export::export::Exporter;
//! use std::path::Path;
//!
//! let exporter = Exporter::new(ExportOptions::all().with_output_dir("out"));
//! let summary = exporter.export_target(Path::new("data/items.xlsx"))?;
//!
//! println!("Files: {}", summary.written.len());
//! # Ok::<(), xlsx_export::error::ExportError>(())
//! ```

pub mod cli;
pub mod coerce;
pub mod config;
pub mod error;
pub mod excel;
pub mod export;
pub mod header;
pub mod records;
pub mod types;
pub mod writer;

// Re-export commonly used types
pub use config::ExportOptions;
pub use error::{ExportError, ExportResult};
pub use export::{ExportSummary, Exporter};
pub use types::{Directive, FieldSpec, FieldType, Record, Schema, Value};
