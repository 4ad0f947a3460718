use std::path::Path;

use crate::data::parser;
use crate::error::AnalyzeError;

/// One input source parsed into named columns of raw strings.
#[derive(Debug)]
pub struct LoadedTable {
    pub columns: Vec<String>,
    /// Column-major: column_data[col_idx][row_idx]
    pub column_data: Vec<Vec<String>>,
    pub row_count: usize,
}

impl LoadedTable {
    /// Column by exact name match.
    pub fn column(&self, name: &str) -> Option<&[String]> {
        self.columns
            .iter()
            .position(|c| c == name)
            .map(|i| self.column_data[i].as_slice())
    }

    /// First column whose name matches case-insensitively.
    pub fn column_ci(&self, name: &str) -> Option<&[String]> {
        self.columns
            .iter()
            .position(|c| c.eq_ignore_ascii_case(name))
            .map(|i| self.column_data[i].as_slice())
    }
}

/// Load a CSV or Excel file into a [`LoadedTable`].
pub fn load_table(path: &Path) -> Result<LoadedTable, AnalyzeError> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_lowercase())
        .unwrap_or_default();

    let rows = match ext.as_str() {
        "xls" | "xlsx" => read_excel_rows(path)?,
        // Default to CSV; load-test tools export .csv or extensionless tables
        _ => read_csv_rows(path)?,
    };
    table_from_rows(rows, path)
}

fn load_err(path: &Path, reason: impl ToString) -> AnalyzeError {
    AnalyzeError::Load {
        path: path.to_path_buf(),
        reason: reason.to_string(),
    }
}

fn read_csv_rows(path: &Path) -> Result<Vec<Vec<String>>, AnalyzeError> {
    let content = std::fs::read(path).map_err(|e| load_err(path, e))?;
    // UTF-8 first, then latin1 (each byte maps to the same code point)
    let text = String::from_utf8(content.clone())
        .unwrap_or_else(|_| content.iter().map(|&b| b as char).collect());

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(text.as_bytes());

    let mut rows: Vec<Vec<String>> = Vec::new();
    for result in reader.records() {
        match result {
            Ok(record) => rows.push(record.iter().map(|s| s.to_string()).collect()),
            Err(_) => continue,
        }
    }
    Ok(rows)
}

fn read_excel_rows(path: &Path) -> Result<Vec<Vec<String>>, AnalyzeError> {
    use calamine::{open_workbook_auto, Data, Reader};

    let mut workbook = open_workbook_auto(path).map_err(|e| load_err(path, e))?;
    let sheet_name = workbook
        .sheet_names()
        .first()
        .ok_or_else(|| load_err(path, "no sheets found"))?
        .clone();
    let range = workbook
        .worksheet_range(&sheet_name)
        .map_err(|e| load_err(path, e))?;

    let rows = range
        .rows()
        .map(|row| {
            row.iter()
                .map(|cell| match cell {
                    Data::Empty => String::new(),
                    Data::String(s) => s.clone(),
                    Data::Float(f) => f.to_string(),
                    Data::Int(i) => i.to_string(),
                    Data::Bool(b) => b.to_string(),
                    Data::DateTime(dt) => dt.to_string(),
                    Data::DateTimeIso(s) => s.clone(),
                    Data::DurationIso(s) => s.clone(),
                    Data::Error(e) => format!("{e:?}"),
                })
                .collect()
        })
        .collect();
    Ok(rows)
}

fn table_from_rows(rows: Vec<Vec<String>>, path: &Path) -> Result<LoadedTable, AnalyzeError> {
    let header_row = parser::find_header_row(&rows, 50);
    if header_row >= rows.len() {
        return Err(load_err(path, "no data found after header detection"));
    }

    let columns: Vec<String> = rows[header_row].iter().map(|s| s.trim().to_string()).collect();
    let data_rows = &rows[header_row + 1..];
    let num_cols = columns.len();

    let mut column_data: Vec<Vec<String>> = vec![Vec::with_capacity(data_rows.len()); num_cols];
    for row in data_rows {
        for (col_idx, col) in column_data.iter_mut().enumerate() {
            col.push(row.get(col_idx).cloned().unwrap_or_default());
        }
    }

    tracing::debug!(
        "loaded {} rows x {} columns from {:?}",
        data_rows.len(),
        num_cols,
        path
    );
    Ok(LoadedTable {
        columns,
        column_data,
        row_count: data_rows.len(),
    })
}
