//! Export configuration
//!
//! Everything the orchestrator needs to know about a run is carried in
//! [`ExportOptions`]; nothing is read from process-wide state.

use std::path::PathBuf;

/// Which targets run and where their files go
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportOptions {
    /// Delimited text (`<sheet>.csv`)
    pub csv: bool,
    /// JSON array and JSON key/value map
    pub json: bool,
    /// SQL bulk load (`<workbook>.sql`)
    pub sql: bool,
    /// proto3 schema stub
    pub proto: bool,
    pub output_dir: PathBuf,
    /// Skip sheets whose header rows are not comment-marked
    pub require_markers: bool,
    /// Double embedded single quotes in SQL string literals
    pub escape_sql_quotes: bool,
    /// Render everything but write nothing
    pub dry_run: bool,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            csv: true,
            json: false,
            sql: false,
            proto: false,
            output_dir: PathBuf::from("."),
            require_markers: true,
            escape_sql_quotes: false,
            dry_run: false,
        }
    }
}

impl ExportOptions {
    /// Every target enabled
    #[must_use]
    pub fn all() -> Self {
        Self {
            json: true,
            sql: true,
            proto: true,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.output_dir = dir.into();
        self
    }

    #[must_use]
    pub fn with_csv(mut self, enabled: bool) -> Self {
        self.csv = enabled;
        self
    }

    #[must_use]
    pub fn with_json(mut self, enabled: bool) -> Self {
        self.json = enabled;
        self
    }

    #[must_use]
    pub fn with_sql(mut self, enabled: bool) -> Self {
        self.sql = enabled;
        self
    }

    #[must_use]
    pub fn with_proto(mut self, enabled: bool) -> Self {
        self.proto = enabled;
        self
    }
}
