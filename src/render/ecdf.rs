use anyhow::Result;
use plotters::prelude::*;
use std::path::Path;

use crate::dataset::Dataset;
use crate::render::{color_for_index, title_block, RenderOptions};

/// One empirical CDF curve per label, cumulative fraction of observations
/// at or below each elapsed value. Empty labels are skipped.
pub fn plot_ecdf(dataset: &Dataset, outpath: &Path, opts: &RenderOptions) -> Result<()> {
    let size = opts.size_px((900, 600));
    let root = SVGBackend::new(outpath, size).into_drawing_area();
    root.fill(&WHITE)?;
    let area = title_block(&root, &opts.title_lines("ECDF of Elapsed (ms)"))?;

    let mut xmin = f64::INFINITY;
    let mut xmax = f64::NEG_INFINITY;
    for o in &dataset.observations {
        xmin = xmin.min(o.elapsed);
        xmax = xmax.max(o.elapsed);
    }
    if dataset.observations.is_empty() {
        xmin = 0.0;
        xmax = 1.0;
    }
    if xmin == xmax {
        xmin -= 0.5;
        xmax += 0.5;
    }

    let mut chart = ChartBuilder::on(&area)
        .margin(10)
        .x_label_area_size(40)
        .y_label_area_size(60)
        .build_cartesian_2d(xmin..xmax, 0f64..1.02)?;
    chart
        .configure_mesh()
        .x_desc("Elapsed (ms)")
        .y_desc("Cumulative fraction")
        .draw()?;

    for (i, label) in dataset.label_order.iter().enumerate() {
        let mut vals = dataset.elapsed_of(label);
        if vals.is_empty() {
            continue;
        }
        vals.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
        let n = vals.len();
        let points: Vec<(f64, f64)> = vals
            .iter()
            .enumerate()
            .map(|(k, &x)| (x, (k + 1) as f64 / n as f64))
            .collect();

        let color = color_for_index(i);
        chart
            .draw_series(LineSeries::new(points, color.stroke_width(2)))?
            .label(label.clone())
            .legend(move |(x, y)| {
                PathElement::new(vec![(x, y), (x + 18, y)], color.stroke_width(2))
            });
    }

    chart
        .configure_series_labels()
        .position(SeriesLabelPosition::LowerRight)
        .background_style(WHITE.mix(0.8))
        .border_style(BLACK)
        .draw()?;

    root.present()?;
    Ok(())
}
