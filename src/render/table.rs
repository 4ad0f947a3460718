use anyhow::{Context, Result};
use plotters::prelude::*;
use std::io::Write;
use std::path::Path;

use crate::render::title_block;
use crate::stats::{fmt_stat, SummaryRow, SUMMARY_COLUMNS};

const ROW_H: i32 = 28;
const STAT_COL_W: i32 = 84;
const CELL_FONT_PX: i32 = 13;

fn cells_of(row: &SummaryRow) -> [String; 10] {
    [
        row.label.clone(),
        fmt_stat(row.count),
        fmt_stat(row.mean_ms),
        fmt_stat(row.std_ms),
        fmt_stat(row.median_ms),
        fmt_stat(row.p90_ms),
        fmt_stat(row.p95_ms),
        fmt_stat(row.p99_ms),
        fmt_stat(row.min_ms),
        fmt_stat(row.max_ms),
    ]
}

/// Render the summary rows as a table image, one grid row per label.
pub fn render_summary_table(
    rows: &[SummaryRow],
    outpath: &Path,
    title_lines: &[String],
) -> Result<()> {
    let label_w = rows
        .iter()
        .map(|r| r.label.chars().count())
        .max()
        .unwrap_or(0)
        .max(SUMMARY_COLUMNS[0].len()) as i32
        * 8
        + 16;
    let table_w = label_w + 9 * STAT_COL_W;
    let title_h = title_lines.len() as i32 * 24 + 8;
    let width = (table_w + 40) as u32;
    let height = (title_h + (rows.len() as i32 + 1) * ROW_H + 40) as u32;

    let root = SVGBackend::new(outpath, (width, height)).into_drawing_area();
    root.fill(&WHITE)?;
    let area = title_block(&root, title_lines)?;

    let x0 = 20;
    let y0 = 10;
    let col_x = |c: i32| {
        if c == 0 {
            x0
        } else {
            x0 + label_w + (c - 1) * STAT_COL_W
        }
    };
    let col_w = |c: i32| if c == 0 { label_w } else { STAT_COL_W };

    let header_bg = RGBColor(235, 235, 235);
    let draw_cell = |text: &str, r: i32, c: i32, header: bool| -> Result<()> {
        let (x, y) = (col_x(c), y0 + r * ROW_H);
        let w = col_w(c);
        if header {
            area.draw(&Rectangle::new(
                [(x, y), (x + w, y + ROW_H)],
                header_bg.filled(),
            ))?;
        }
        area.draw(&Rectangle::new(
            [(x, y), (x + w, y + ROW_H)],
            BLACK.stroke_width(1),
        ))?;
        let est_w = text.chars().count() as i32 * CELL_FONT_PX / 2;
        area.draw(&Text::new(
            text.to_string(),
            (x + ((w - est_w) / 2).max(2), y + (ROW_H - CELL_FONT_PX) / 2),
            ("sans-serif", CELL_FONT_PX as f64),
        ))?;
        Ok(())
    };

    for (c, name) in SUMMARY_COLUMNS.iter().enumerate() {
        draw_cell(name, 0, c as i32, true)?;
    }
    for (r, row) in rows.iter().enumerate() {
        for (c, cell) in cells_of(row).iter().enumerate() {
            draw_cell(cell, r as i32 + 1, c as i32, false)?;
        }
    }

    root.present()?;
    Ok(())
}

/// Delimited-text export of the summary, values rounded to three decimals
/// and NaN written as an empty field.
pub fn write_summary_csv(rows: &[SummaryRow], outpath: &Path) -> Result<()> {
    let mut wtr = csv::Writer::from_path(outpath)
        .with_context(|| format!("cannot write {}", outpath.display()))?;
    wtr.write_record(SUMMARY_COLUMNS)?;
    for row in rows {
        wtr.write_record(&cells_of(row))?;
    }
    wtr.flush()?;
    Ok(())
}

/// JSON export of the summary rows; non-finite statistics serialize as null.
pub fn write_summary_json(rows: &[SummaryRow], outpath: &Path) -> Result<()> {
    let file = std::fs::File::create(outpath)
        .with_context(|| format!("cannot write {}", outpath.display()))?;
    let mut out = std::io::BufWriter::new(file);
    serde_json::to_writer_pretty(&mut out, rows)?;
    out.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(label: &str) -> SummaryRow {
        SummaryRow {
            label: label.to_string(),
            count: 20.0,
            mean_ms: 15.5,
            std_ms: f64::NAN,
            median_ms: 14.0,
            p90_ms: 30.0,
            p95_ms: 35.0,
            p99_ms: 44.123456,
            min_ms: 1.0,
            max_ms: 50.0,
        }
    }

    #[test]
    fn csv_export_blanks_nan_and_rounds() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("summary.csv");
        write_summary_csv(&[row("a")], &path).unwrap();
        let text = std::fs::read_to_string(&path).unwrap();
        let mut lines = text.lines();
        assert_eq!(
            lines.next().unwrap(),
            "label,count,mean_ms,std_ms,median_ms,p90_ms,p95_ms,p99_ms,min_ms,max_ms"
        );
        assert_eq!(
            lines.next().unwrap(),
            "a,20.000,15.500,,14.000,30.000,35.000,44.123,1.000,50.000"
        );
    }

    #[test]
    fn json_export_nulls_nan() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("summary.json");
        write_summary_json(&[row("a")], &path).unwrap();
        let text = std::fs::read_to_string(&path).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(parsed[0]["label"], "a");
        assert!(parsed[0]["std_ms"].is_null());
        assert_eq!(parsed[0]["count"], 20.0);
    }

    #[test]
    fn table_image_is_written() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("summary.svg");
        render_summary_table(&[row("a"), row("b")], &path, &["Summary".to_string()]).unwrap();
        let text = std::fs::read_to_string(&path).unwrap();
        assert!(text.contains("<svg"));
        assert!(text.contains("p99_ms"));
    }
}
