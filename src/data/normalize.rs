use std::path::Path;

use crate::data::concurrency::infer_concurrency_factor;
use crate::data::loader::LoadedTable;
use crate::error::AnalyzeError;

/// One normalized request measurement.
#[derive(Debug, Clone, PartialEq)]
pub struct Observation {
    /// Elapsed time in milliseconds. Always finite.
    pub elapsed: f64,
    /// True when the row's response code was >= 400.
    pub error: bool,
    /// Dataset label supplied by the caller, used for grouping.
    pub label: String,
    /// Inferred virtual-user count of the source table. Always >= 1.
    pub concurrency_factor: u32,
}

/// Coerce a cell to a number; empty or malformed cells become None.
fn parse_numeric(s: &str) -> Option<f64> {
    let t = s.trim();
    if t.is_empty() {
        return None;
    }
    t.parse::<f64>().ok()
}

/// Normalize one table into observations tagged with `dataset_label`.
///
/// Requires a column named exactly `elapsed`. Rows whose elapsed value does
/// not coerce to a finite number are dropped. The error flag comes from a
/// case-insensitive `responsecode` column, evaluated over the full original
/// row set and then subset by the same retention mask as elapsed, so flags
/// never shift relative to their originating row.
pub fn normalize_table(
    table: &LoadedTable,
    path: &Path,
    dataset_label: &str,
) -> Result<Vec<Observation>, AnalyzeError> {
    let elapsed_col = table.column("elapsed").ok_or_else(|| AnalyzeError::Schema {
        path: path.to_path_buf(),
        columns: table.columns.clone(),
    })?;

    let elapsed: Vec<Option<f64>> = elapsed_col
        .iter()
        .map(|s| parse_numeric(s).filter(|v| v.is_finite()))
        .collect();

    // Error flags over the original index space; missing or unparsable
    // response codes count as no-error.
    let error_flags: Vec<bool> = match table.column_ci("responsecode") {
        Some(rc) => rc
            .iter()
            .map(|s| parse_numeric(s).is_some_and(|v| v >= 400.0))
            .collect(),
        None => vec![false; table.row_count],
    };

    // Concurrency comes from the first row's free-text label cell, if any.
    let factor = infer_concurrency_factor(
        table
            .column_ci("label")
            .and_then(|c| c.first())
            .map(|s| s.as_str()),
    );

    let mut out = Vec::with_capacity(elapsed.len());
    for (i, value) in elapsed.iter().enumerate() {
        if let Some(ms) = value {
            out.push(Observation {
                elapsed: *ms,
                error: error_flags[i],
                label: dataset_label.to_string(),
                concurrency_factor: factor,
            });
        }
    }

    let dropped = elapsed.len() - out.len();
    if dropped > 0 {
        tracing::debug!("{:?}: dropped {} rows with invalid elapsed", path, dropped);
    }
    Ok(out)
}
