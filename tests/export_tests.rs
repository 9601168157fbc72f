//! End-to-end export tests over real .xlsx files
//!
//! Fixtures are authored with rust_xlsxwriter, read back through calamine and
//! exported into a temporary directory.

use pretty_assertions::assert_eq;
use rust_xlsxwriter::{Formula, Workbook as XlsxWorkbook, Worksheet as XlsxWorksheet};
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;
use xlsx_export::excel::{NativeKind, WorkbookReader};
use xlsx_export::{ExportOptions, Exporter};

// ═══════════════════════════════════════════════════════════════════════════
// FIXTURES
// ═══════════════════════════════════════════════════════════════════════════

fn strings(ws: &mut XlsxWorksheet, row: u32, cells: &[&str]) {
    for (col, text) in cells.iter().enumerate() {
        if !text.is_empty() {
            ws.write_string(row, col as u16, *text).unwrap();
        }
    }
}

/// Items (4-row header, all targets), Settings (3-row key/value), Notes (no header)
fn write_shop_workbook(path: &Path) {
    let mut workbook = XlsxWorkbook::new();

    let items = workbook.add_worksheet();
    items.set_name("Items").unwrap();
    strings(items, 0, &["#JSON,SQL,PROTO", "ItemInfo"]);
    strings(items, 1, &["#id", "label", "price", "total"]);
    strings(items, 2, &["#id", "label", "", "total"]);
    strings(items, 3, &["#int16", "string", "float", "auto"]);

    items.write_number(4, 0, 1).unwrap();
    items.write_string(4, 1, "  # hello ").unwrap();
    items.write_number(4, 2, 2.5).unwrap();
    items
        .write_formula(4, 3, Formula::new("=C5*2").set_result("5"))
        .unwrap();

    strings(items, 5, &["# comment", "hidden"]);
    items.write_number(5, 2, 1).unwrap();
    items.write_number(5, 3, 1).unwrap();

    items.write_number(6, 0, 2).unwrap();
    strings(items, 6, &["", "pear", "oops"]);
    items.write_number(6, 3, 3).unwrap();

    items.write_number(7, 0, 3).unwrap();
    strings(items, 7, &["", "fig"]);
    items.write_number(7, 2, 0.1).unwrap();
    items.write_string(7, 3, "n/a").unwrap();

    let settings = workbook.add_worksheet();
    settings.set_name("Settings").unwrap();
    strings(settings, 0, &["#!KEYVALUE", "GameSettings"]);
    strings(settings, 1, &["#key", "value"]);
    strings(settings, 2, &["#string", "float"]);
    settings.write_string(3, 0, "speed").unwrap();
    settings.write_number(3, 1, 1.5).unwrap();
    settings.write_string(4, 0, "speed").unwrap();
    settings.write_number(4, 1, 2).unwrap();
    settings.write_string(5, 0, "gravity").unwrap();
    settings.write_number(5, 1, 9.8).unwrap();

    let notes = workbook.add_worksheet();
    notes.set_name("Notes").unwrap();
    strings(notes, 0, &["just", "some", "text"]);

    workbook.save(path).unwrap();
}

fn shop_fixture() -> (TempDir, PathBuf) {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("shop.xlsx");
    write_shop_workbook(&path);
    (dir, path)
}

fn read(dir: &Path, name: &str) -> String {
    fs::read_to_string(dir.join(name)).unwrap_or_else(|e| panic!("{}: {}", name, e))
}

// ═══════════════════════════════════════════════════════════════════════════
// READER TESTS
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn test_reader_loads_sheets_in_order() {
    let (_dir, path) = shop_fixture();
    let workbook = WorkbookReader::new(&path).read().unwrap();

    assert_eq!(workbook.name, "shop");
    assert_eq!(workbook.source, "shop.xlsx");
    let names: Vec<&str> = workbook.sheets.iter().map(|s| s.name.as_str()).collect();
    assert_eq!(names, vec!["Items", "Settings", "Notes"]);
}

#[test]
fn test_reader_marks_formula_cells() {
    let (_dir, path) = shop_fixture();
    let workbook = WorkbookReader::new(&path).read().unwrap();
    let items = &workbook.sheets[0];

    assert_eq!(items.cell(4, 3).kind(), NativeKind::Formula);
    assert_eq!(items.cell(4, 3).float(), Ok(5.0));
    assert_eq!(items.cell(4, 2).kind(), NativeKind::Number);
    assert_eq!(items.cell(7, 3).kind(), NativeKind::Text);
}

// ═══════════════════════════════════════════════════════════════════════════
// EXPORT TESTS
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn test_export_all_targets() {
    let (dir, path) = shop_fixture();
    let out = dir.path().join("out");
    let exporter = Exporter::new(ExportOptions::all().with_output_dir(&out));

    let summary = exporter.export_target(&path).unwrap();
    assert!(summary.is_success(), "{:?}", summary.failures);
    assert_eq!(summary.workbooks, 1);

    let mut files: Vec<String> = fs::read_dir(&out)
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    files.sort();
    assert_eq!(
        files,
        vec![
            "Items.csv",
            "game_settings.json",
            "item_info.json",
            "item_info.proto",
            "shop.sql",
        ]
    );
}

#[test]
fn test_csv_uses_secondary_fields() {
    let (dir, path) = shop_fixture();
    Exporter::new(ExportOptions::default().with_output_dir(dir.path()))
        .export_target(&path)
        .unwrap();

    assert_eq!(
        read(dir.path(), "Items.csv"),
        "id\tlabel\ttotal\r\n1\thello\t5\r\n2\tpear\t3\r\n3\tfig\tn/a\r\n"
    );
    assert!(!dir.path().join("Settings.csv").exists());
    assert!(!dir.path().join("Notes.csv").exists());
}

#[test]
fn test_json_drops_incomplete_rows() {
    let (dir, path) = shop_fixture();
    Exporter::new(
        ExportOptions::default()
            .with_csv(false)
            .with_json(true)
            .with_output_dir(dir.path()),
    )
    .export_target(&path)
    .unwrap();

    let items: serde_json::Value =
        serde_json::from_str(&read(dir.path(), "item_info.json")).unwrap();
    assert_eq!(
        items,
        serde_json::json!([
            {"id": 1, "label": "hello", "price": 2.5, "total": 5.0},
            {"id": 3, "label": "fig", "price": 0.1, "total": "n/a"}
        ])
    );

    let settings: serde_json::Value =
        serde_json::from_str(&read(dir.path(), "game_settings.json")).unwrap();
    assert_eq!(settings, serde_json::json!({"speed": 2.0, "gravity": 9.8}));
}

#[test]
fn test_sql_file_contents() {
    let (dir, path) = shop_fixture();
    Exporter::new(
        ExportOptions::default()
            .with_csv(false)
            .with_sql(true)
            .with_output_dir(dir.path()),
    )
    .export_target(&path)
    .unwrap();

    assert_eq!(
        read(dir.path(), "shop.sql"),
        "-- Auto generated by xlsx-export\n\
         -- Source: shop.xlsx\n\
         \n\
         -- Sheet: Items 2 row(s)\n\
         DELETE FROM `ItemInfo`;\n\
         INSERT INTO `ItemInfo` (`id`,`label`,`price`,`total`) VALUES\n\
         (1,'hello',2.5,5),\n\
         (3,'fig',0.1,'n/a');\n"
    );
}

#[test]
fn test_proto_widens_small_integers() {
    let (dir, path) = shop_fixture();
    let summary = Exporter::new(
        ExportOptions::default()
            .with_csv(false)
            .with_proto(true)
            .with_output_dir(dir.path()),
    )
    .export_target(&path)
    .unwrap();
    assert_eq!(summary.written.len(), 1);
    assert_eq!(summary.total_records(), 0);

    let proto = read(dir.path(), "item_info.proto");
    assert!(proto.contains("syntax = \"proto3\";"));
    assert!(proto.contains("message ItemInfoTable {"));
    assert!(proto.contains("    int32 id = 1;"));
    assert!(proto.contains("    string label = 2;"));
    assert!(proto.contains("    float price = 3;"));
    assert!(proto.contains("    string total = 4;"));
    assert!(proto.contains("  repeated ItemInfo rows = 1;"));
}

#[test]
fn test_single_record_sql_statement() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("catalog.xlsx");

    let mut workbook = XlsxWorkbook::new();
    let ws = workbook.add_worksheet();
    ws.set_name("Items").unwrap();
    strings(ws, 0, &["#sql", "Items"]);
    strings(ws, 1, &["#id", "label"]);
    strings(ws, 2, &["#int", "string"]);
    ws.write_number(3, 0, 1).unwrap();
    ws.write_string(3, 1, "x").unwrap();
    workbook.save(&path).unwrap();

    Exporter::new(
        ExportOptions::default()
            .with_csv(false)
            .with_sql(true)
            .with_output_dir(dir.path()),
    )
    .export_target(&path)
    .unwrap();

    let sql = read(dir.path(), "catalog.sql");
    assert_eq!(sql.matches("DELETE FROM `Items`;").count(), 1);
    assert_eq!(sql.matches("INSERT INTO").count(), 1);
    assert!(sql.contains("INSERT INTO `Items` (`id`,`label`) VALUES\n(1,'x');\n"));
}

#[test]
fn test_directory_skips_temp_copies() {
    let (dir, path) = shop_fixture();
    fs::copy(&path, dir.path().join("~$shop.xlsx")).unwrap();
    let out = dir.path().join("out");

    let summary = Exporter::new(ExportOptions::default().with_output_dir(&out))
        .export_target(dir.path())
        .unwrap();

    assert_eq!(summary.workbooks, 1);
    assert_eq!(summary.written.len(), 1);
    assert_eq!(summary.total_records(), 3);
}

#[test]
fn test_compact_header_with_commented_row_and_fractional_ints() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("stock.xlsx");

    let mut workbook = XlsxWorkbook::new();
    let ws = workbook.add_worksheet();
    ws.set_name("Items").unwrap();
    strings(ws, 0, &["#json", "Stock"]);
    strings(ws, 1, &["#id", "qty"]);
    strings(ws, 2, &["#int", "int"]);
    strings(ws, 3, &["# disabled row", "old"]);
    ws.write_number(4, 0, 1).unwrap();
    ws.write_number(4, 1, 2.5).unwrap();
    ws.write_number(5, 0, 2).unwrap();
    ws.write_string(5, 1, "1e3").unwrap();
    workbook.save(&path).unwrap();

    Exporter::new(ExportOptions::default().with_json(true).with_output_dir(dir.path()))
        .export_target(&path)
        .unwrap();

    assert_eq!(read(dir.path(), "Items.csv"), "id\tqty\r\n1\t2\r\n2\t1000\r\n");
    let stock: serde_json::Value = serde_json::from_str(&read(dir.path(), "stock.json")).unwrap();
    assert_eq!(
        stock,
        serde_json::json!([{"id": 1, "qty": 2}, {"id": 2, "qty": 1000}])
    );
}
