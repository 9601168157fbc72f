use clap::Parser;
use std::path::PathBuf;
use xlsx_export::cli;
use xlsx_export::config::ExportOptions;

#[derive(Parser)]
#[command(name = "xlsx-export")]
#[command(about = "Export spreadsheet worksheets to CSV, JSON, SQL and proto files")]
#[command(long_about = "xlsx-export - schema-driven worksheet export

Each worksheet describes its own export in its first rows:

  row 0   #<directive>   <OutputName>
  row 1   #<field names for JSON / SQL / proto>
  row 2   #<field names for CSV>
  row 3   #<type tags: string, float, int, auto, ...>

A three-row header (one name row shared by all formats) is also accepted.
Rows whose first cell starts with '#' are comments and never exported.

DIRECTIVE TOKENS:
  JSON      - <output_name>.json, array of objects
  KEYVALUE  - <output_name>.json, object built from 'key'/'value' fields
  SQL       - DELETE + INSERT into <OutputName>, collected in <workbook>.sql
  PROTO     - <output_name>.proto message definitions
  !         - leading '!' disables <sheet>.csv for that worksheet

EXAMPLES:
  xlsx-export                        # CSV for every .xlsx in the current dir
  xlsx-export data/ --all -o out/    # All formats into out/
  xlsx-export items.xlsx --json --no-csv")]
#[command(version)]
struct Cli {
    /// Workbook file or directory of .xlsx files
    #[arg(default_value = ".")]
    target: PathBuf,

    /// Do not write CSV files
    #[arg(long)]
    no_csv: bool,

    /// Write JSON array and key/value files
    #[arg(long)]
    json: bool,

    /// Write the SQL bulk-load file
    #[arg(long)]
    sql: bool,

    /// Write proto3 schema stubs
    #[arg(long)]
    proto: bool,

    /// Enable json, sql and proto
    #[arg(long)]
    all: bool,

    /// Directory for generated files
    #[arg(short, long, default_value = ".", env = "XLSX_EXPORT_OUT_DIR")]
    output_dir: PathBuf,

    /// Accept four-row headers without '#' markers
    #[arg(long)]
    no_markers: bool,

    /// Double single quotes inside SQL string values
    #[arg(long)]
    escape_sql_quotes: bool,

    /// Show what would be exported without writing files
    #[arg(short = 'n', long)]
    dry_run: bool,

    /// Show verbose output
    #[arg(short, long)]
    verbose: bool,
}

impl Cli {
    fn options(&self) -> ExportOptions {
        ExportOptions {
            csv: !self.no_csv,
            json: self.json || self.all,
            sql: self.sql || self.all,
            proto: self.proto || self.all,
            output_dir: self.output_dir.clone(),
            require_markers: !self.no_markers,
            escape_sql_quotes: self.escape_sql_quotes,
            dry_run: self.dry_run,
        }
    }
}

fn init_tracing(verbose: bool) {
    let default_filter = if verbose { "xlsx_export=debug" } else { "xlsx_export=warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> anyhow::Result<()> {
    let args = Cli::parse();
    init_tracing(args.verbose);

    let summary = cli::export(args.target.clone(), args.options(), args.verbose)?;
    if !summary.is_success() {
        anyhow::bail!("{} export failure(s)", summary.failures.len());
    }
    Ok(())
}
