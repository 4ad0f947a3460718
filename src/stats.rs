use serde::Serialize;

use crate::dataset::Dataset;

/// Percentile with linear interpolation between closest ranks, over a
/// pre-sorted slice. Empty input yields NaN.
pub fn percentile(sorted: &[f64], p: f64) -> f64 {
    let n = sorted.len();
    if n == 0 {
        return f64::NAN;
    }
    if n == 1 {
        return sorted[0];
    }

    let p = p.clamp(0.0, 100.0) / 100.0;
    let idx = p * ((n - 1) as f64);
    let lo = idx.floor() as usize;
    let hi = idx.ceil() as usize;

    if lo == hi {
        sorted[lo]
    } else {
        let w = idx - (lo as f64);
        sorted[lo] * (1.0 - w) + sorted[hi] * w
    }
}

/// Per-label aggregate statistics, all milliseconds. `count` is the raw
/// observation count divided by the label's concurrency factor. Statistics
/// that need at least one value are NaN for empty labels; `std_ms` is NaN
/// below two values.
#[derive(Debug, Clone, Serialize)]
pub struct SummaryRow {
    pub label: String,
    pub count: f64,
    pub mean_ms: f64,
    pub std_ms: f64,
    pub median_ms: f64,
    pub p90_ms: f64,
    pub p95_ms: f64,
    pub p99_ms: f64,
    pub min_ms: f64,
    pub max_ms: f64,
}

impl SummaryRow {
    fn empty(label: &str) -> Self {
        SummaryRow {
            label: label.to_string(),
            count: 0.0,
            mean_ms: f64::NAN,
            std_ms: f64::NAN,
            median_ms: f64::NAN,
            p90_ms: f64::NAN,
            p95_ms: f64::NAN,
            p99_ms: f64::NAN,
            min_ms: f64::NAN,
            max_ms: f64::NAN,
        }
    }
}

/// Compute one [`SummaryRow`] per label, in label-axis order, from the full
/// (untrimmed) dataset. Pure function: identical inputs give identical rows.
pub fn summarize(dataset: &Dataset) -> Vec<SummaryRow> {
    dataset
        .label_order
        .iter()
        .map(|label| {
            let mut vals = dataset.elapsed_of(label);
            if vals.is_empty() {
                return SummaryRow::empty(label);
            }
            vals.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));

            let n = vals.len();
            let mean = vals.iter().sum::<f64>() / n as f64;
            // Sample standard deviation; undefined below two observations
            let std = if n < 2 {
                f64::NAN
            } else {
                let ss = vals.iter().map(|v| (v - mean).powi(2)).sum::<f64>();
                (ss / (n - 1) as f64).sqrt()
            };
            let factor = dataset.factor_of(label);

            SummaryRow {
                label: label.clone(),
                count: n as f64 / factor as f64,
                mean_ms: mean,
                std_ms: std,
                median_ms: percentile(&vals, 50.0),
                p90_ms: percentile(&vals, 90.0),
                p95_ms: percentile(&vals, 95.0),
                p99_ms: percentile(&vals, 99.0),
                min_ms: vals[0],
                max_ms: vals[n - 1],
            }
        })
        .collect()
}

/// Format a value for the console table and CSV export: three decimals,
/// blank for NaN.
pub fn fmt_stat(v: f64) -> String {
    if v.is_nan() {
        String::new()
    } else {
        format!("{v:.3}")
    }
}

/// Column names shared by the console table, the table image, and the CSV
/// export, in display order.
pub const SUMMARY_COLUMNS: [&str; 10] = [
    "label", "count", "mean_ms", "std_ms", "median_ms", "p90_ms", "p95_ms", "p99_ms", "min_ms",
    "max_ms",
];

/// Fixed-width console rendering of the summary rows.
pub fn format_summary(rows: &[SummaryRow]) -> String {
    let label_width = rows
        .iter()
        .map(|r| r.label.len())
        .chain(std::iter::once(SUMMARY_COLUMNS[0].len()))
        .max()
        .unwrap_or(5);

    let mut out = String::new();
    out.push_str(&format!("{:<label_width$}", SUMMARY_COLUMNS[0]));
    for h in &SUMMARY_COLUMNS[1..] {
        out.push_str(&format!("  {h:>10}"));
    }
    out.push('\n');
    for r in rows {
        out.push_str(&format!("{:<label_width$}", r.label));
        for v in [
            r.count, r.mean_ms, r.std_ms, r.median_ms, r.p90_ms, r.p95_ms, r.p99_ms, r.min_ms,
            r.max_ms,
        ] {
            out.push_str(&format!("  {:>10}", fmt_stat(v)));
        }
        out.push('\n');
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::normalize::Observation;

    fn obs(elapsed: f64, label: &str, factor: u32) -> Observation {
        Observation {
            elapsed,
            error: false,
            label: label.to_string(),
            concurrency_factor: factor,
        }
    }

    fn dataset(sources: Vec<Vec<Observation>>, labels: &[&str]) -> Dataset {
        Dataset::aggregate(sources, labels.iter().map(|s| s.to_string()).collect())
    }

    #[test]
    fn percentile_linear_interpolation() {
        let vals: Vec<f64> = (1..=100).map(|i| i as f64).collect();
        assert!((percentile(&vals, 90.0) - 90.1).abs() < 1e-9);
        assert!((percentile(&vals, 50.0) - 50.5).abs() < 1e-9);
        assert_eq!(percentile(&vals, 0.0), 1.0);
        assert_eq!(percentile(&vals, 100.0), 100.0);
    }

    #[test]
    fn percentile_edge_sizes() {
        assert!(percentile(&[], 50.0).is_nan());
        assert_eq!(percentile(&[42.0], 99.0), 42.0);
    }

    #[test]
    fn count_is_normalized_by_factor() {
        let src: Vec<Observation> = (0..100).map(|i| obs(i as f64, "a", 5)).collect();
        let rows = summarize(&dataset(vec![src], &["a"]));
        assert_eq!(rows[0].count, 20.0);
    }

    #[test]
    fn single_observation_std_is_nan() {
        let rows = summarize(&dataset(vec![vec![obs(5.0, "a", 1)]], &["a"]));
        assert_eq!(rows[0].count, 1.0);
        assert_eq!(rows[0].mean_ms, 5.0);
        assert!(rows[0].std_ms.is_nan());
        assert_eq!(rows[0].min_ms, 5.0);
    }

    #[test]
    fn sample_std_uses_n_minus_one() {
        let src = vec![obs(2.0, "a", 1), obs(4.0, "a", 1)];
        let rows = summarize(&dataset(vec![src], &["a"]));
        assert!((rows[0].std_ms - std::f64::consts::SQRT_2).abs() < 1e-12);
    }

    #[test]
    fn empty_label_reports_zero_count_and_nan() {
        let rows = summarize(&dataset(vec![vec![obs(1.0, "a", 1)]], &["a", "ghost"]));
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[1].count, 0.0);
        assert!(rows[1].mean_ms.is_nan());
        assert!(rows[1].max_ms.is_nan());
    }

    #[test]
    fn rows_follow_label_axis_order() {
        let a = vec![obs(1.0, "a", 1)];
        let b = vec![obs(2.0, "b", 1)];
        // Sources concatenated b-first; axis order must still win
        let rows = summarize(&dataset(vec![b, a], &["a", "b"]));
        assert_eq!(rows[0].label, "a");
        assert_eq!(rows[1].label, "b");
    }

    #[test]
    fn summarize_is_idempotent() {
        let src: Vec<Observation> = (0..50).map(|i| obs((i * 7 % 13) as f64, "a", 2)).collect();
        let ds = dataset(vec![src], &["a"]);
        let first = summarize(&ds);
        let second = summarize(&ds);
        assert_eq!(first.len(), second.len());
        for (x, y) in first.iter().zip(&second) {
            assert_eq!(x.count, y.count);
            assert_eq!(x.mean_ms, y.mean_ms);
            assert_eq!(x.p99_ms, y.p99_ms);
        }
    }

    #[test]
    fn console_format_blanks_nan() {
        let rows = summarize(&dataset(vec![vec![obs(5.0, "a", 1)]], &["a"]));
        let text = format_summary(&rows);
        assert!(text.contains("label"));
        assert!(text.contains("5.000"));
        // std of a single observation renders blank, not "NaN"
        assert!(!text.contains("NaN"));
    }
}
