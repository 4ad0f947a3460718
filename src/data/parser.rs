use std::collections::HashMap;

/// Find the header row index in a parsed table.
///
/// Load-test exports sometimes carry preamble lines before the real header.
/// The header is the top-most row of the dominant column count whose cells
/// are all non-numeric, non-date text. The scan never walks past the first
/// dominant-width row containing data-like cells, so a malformed data row
/// deep in the table can never be mistaken for the header. Falls back to
/// row 0.
pub fn find_header_row(rows: &[Vec<String>], max_scan: usize) -> usize {
    let scan = &rows[..rows.len().min(max_scan)];
    if scan.is_empty() {
        return 0;
    }

    // Most common column count among the scanned rows
    let mut counts: HashMap<usize, usize> = HashMap::new();
    for row in scan {
        *counts.entry(row.len()).or_insert(0) += 1;
    }
    let dominant = counts
        .into_iter()
        .max_by_key(|&(_, c)| c)
        .map(|(len, _)| len)
        .unwrap_or(0);

    for (i, row) in scan.iter().enumerate() {
        if row.len() != dominant {
            continue;
        }
        let header_like = row.iter().all(|cell| {
            let t = cell.trim();
            !t.is_empty() && t.parse::<f64>().is_err() && !is_date_like(t)
        });
        if header_like {
            return i;
        }
        // Data has begun, nothing below can be the header
        break;
    }
    0
}

/// Heuristic check for date/time-formatted cells, so a data row of timestamp
/// strings is not mistaken for a header.
fn is_date_like(s: &str) -> bool {
    if !s.contains('/') && !s.contains(':') && !s.contains('-') {
        return false;
    }

    let formats = [
        "%Y-%m-%d %H:%M:%S",
        "%Y/%m/%d %H:%M:%S",
        "%m/%d/%Y %H:%M:%S",
        "%d/%m/%Y %H:%M:%S",
        "%Y-%m-%d",
        "%m/%d/%Y",
    ];
    for fmt in &formats {
        if chrono::NaiveDateTime::parse_from_str(s, fmt).is_ok()
            || chrono::NaiveDate::parse_from_str(s, fmt).is_ok()
        {
            return true;
        }
    }
    false
}
