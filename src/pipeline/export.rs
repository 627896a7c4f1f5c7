// src/pipeline/export.rs

//! CSV export of lookup results.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use serde_json::{Map, Value};

use crate::error::{AppError, Result};
use crate::models::RESULTS_KEY;
use crate::utils::sanitize_file_component;

/// Rows ready to be written, columns in first-seen order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportTable {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

/// Summary of a written export file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportSummary {
    pub path: PathBuf,
    pub rows: usize,
}

/// Turn envelope data into a table.
///
/// `data.results` as a list gives one row per element; any other object is a
/// single row. Everything else cannot be tabulated.
pub fn rows_for_export(data: &Value) -> Result<ExportTable> {
    let Some(object) = data.as_object() else {
        return Err(AppError::export(format!(
            "expected a JSON object, got {}",
            kind(data)
        )));
    };

    let records: Vec<&Map<String, Value>> = match object.get(RESULTS_KEY) {
        Some(Value::Array(items)) => items
            .iter()
            .enumerate()
            .map(|(i, item)| {
                item.as_object().ok_or_else(|| {
                    AppError::export(format!("results[{}] is {}, not an object", i, kind(item)))
                })
            })
            .collect::<Result<_>>()?,
        _ => vec![object],
    };

    if records.is_empty() {
        return Err(AppError::export("no rows to export"));
    }

    let mut columns: Vec<String> = Vec::new();
    for record in &records {
        for key in record.keys() {
            if !columns.contains(key) {
                columns.push(key.clone());
            }
        }
    }

    let rows = records
        .iter()
        .map(|record| {
            columns
                .iter()
                .map(|col| record.get(col).map(cell).unwrap_or_default())
                .collect()
        })
        .collect();

    Ok(ExportTable { columns, rows })
}

/// Write a table as CSV with a header row and no index column.
pub fn write_csv<W: Write>(table: &ExportTable, writer: W) -> Result<()> {
    let mut writer = csv::Writer::from_writer(writer);
    writer.write_record(&table.columns)?;
    for row in &table.rows {
        writer.write_record(row)?;
    }
    writer.flush()?;
    Ok(())
}

/// Render envelope data as CSV bytes.
pub fn to_csv_bytes(data: &Value) -> Result<Vec<u8>> {
    let table = rows_for_export(data)?;
    let mut out = Vec::new();
    write_csv(&table, &mut out)?;
    Ok(out)
}

/// Export file name for a term: `numinfo_<term>.csv`.
pub fn export_file_name(term: &str) -> String {
    format!("numinfo_{}.csv", sanitize_file_component(term))
}

/// Write `data` to `<dir>/numinfo_<term>.csv`.
pub fn export_csv(dir: &Path, term: &str, data: &Value) -> Result<ExportSummary> {
    let table = rows_for_export(data)?;
    fs::create_dir_all(dir)?;

    let path = dir.join(export_file_name(term));
    let file = fs::File::create(&path)?;
    write_csv(&table, file)?;

    log::info!("Exported {} row(s) to {}", table.rows.len(), path.display());
    Ok(ExportSummary {
        path,
        rows: table.rows.len(),
    })
}

/// Stringify one cell. Strings are written as-is, null as empty.
fn cell(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use tempfile::tempdir;

    use super::*;

    #[test]
    fn results_list_gives_one_row_per_element() {
        let data = json!({"results": [{"a": 1}, {"a": 2}]});
        let csv = String::from_utf8(to_csv_bytes(&data).unwrap()).unwrap();
        assert_eq!(csv, "a\n1\n2\n");
    }

    #[test]
    fn single_object_gives_one_row() {
        let data = json!({"name": "Rahul", "mobile": "123", "tags": ["x", "y"], "age": null});
        let table = rows_for_export(&data).unwrap();

        assert_eq!(table.columns, vec!["name", "mobile", "tags", "age"]);
        assert_eq!(table.rows, vec![vec!["Rahul", "123", r#"["x","y"]"#, ""]]);
    }

    #[test]
    fn columns_are_union_in_first_seen_order() {
        let data = json!({"results": [{"a": 1, "b": true}, {"c": "x", "a": 3}]});
        let table = rows_for_export(&data).unwrap();

        assert_eq!(table.columns, vec!["a", "b", "c"]);
        assert_eq!(
            table.rows,
            vec![vec!["1", "true", ""], vec!["3", "", "x"]]
        );
    }

    #[test]
    fn non_list_results_key_is_a_plain_column() {
        let data = json!({"results": "none", "note": "n"});
        let table = rows_for_export(&data).unwrap();
        assert_eq!(table.rows.len(), 1);
        assert_eq!(table.columns, vec!["results", "note"]);
    }

    #[test]
    fn rejects_untabular_shapes() {
        assert!(matches!(rows_for_export(&json!(5)), Err(AppError::Export(_))));
        assert!(matches!(
            rows_for_export(&json!({"results": [1, 2]})),
            Err(AppError::Export(_))
        ));
        assert!(matches!(
            rows_for_export(&json!({"results": []})),
            Err(AppError::Export(_))
        ));
    }

    #[test]
    fn quotes_cells_with_commas() {
        let data = json!({"address": "Delhi, India"});
        let csv = String::from_utf8(to_csv_bytes(&data).unwrap()).unwrap();
        assert_eq!(csv, "address\n\"Delhi, India\"\n");
    }

    #[test]
    fn file_name_is_sanitized() {
        assert_eq!(export_file_name("+919876543210"), "numinfo_+919876543210.csv");
        assert_eq!(export_file_name("../etc/passwd"), "numinfo_.._etc_passwd.csv");
    }

    #[test]
    fn writes_file_into_directory() {
        let dir = tempdir().unwrap();
        let out = dir.path().join("exports");
        let data = json!({"results": [{"a": 1}, {"a": 2}]});

        let summary = export_csv(&out, "777", &data).unwrap();

        assert_eq!(summary.rows, 2);
        assert_eq!(summary.path, out.join("numinfo_777.csv"));
        assert_eq!(fs::read_to_string(&summary.path).unwrap(), "a\n1\n2\n");
    }
}
