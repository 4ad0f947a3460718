use anyhow::Result;
use plotters::prelude::*;
use std::path::Path;

use crate::dataset::Dataset;
use crate::render::{color_for_index, title_block, RenderOptions};

const BIN_COUNT: usize = 30;

/// Shared bin edges over the union of all labels' elapsed values, so bar
/// widths are identical across labels. All-equal input degenerates to a
/// single bin around the value.
fn bin_edges(values: &[f64]) -> Vec<f64> {
    let lo = values.iter().copied().fold(f64::INFINITY, f64::min);
    let hi = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    if lo == hi {
        return vec![lo - 0.5, lo + 0.5];
    }
    let step = (hi - lo) / BIN_COUNT as f64;
    (0..=BIN_COUNT).map(|i| lo + step * i as f64).collect()
}

/// Histogram of elapsed per label, each observation weighted by one over its
/// concurrency factor so bar heights read as per-virtual-user counts.
/// Produces no artifact when the dataset is empty.
pub fn plot_histogram(dataset: &Dataset, outpath: &Path, opts: &RenderOptions) -> Result<()> {
    let all: Vec<f64> = dataset.observations.iter().map(|o| o.elapsed).collect();
    if all.is_empty() {
        tracing::warn!("no observations to plot; skipping {:?}", outpath);
        return Ok(());
    }

    let edges = bin_edges(&all);
    let nbins = edges.len() - 1;
    let lo = edges[0];
    let hi = edges[nbins];
    let width = (hi - lo) / nbins as f64;

    // Weighted counts per bin, one row per non-empty label. The last bin is
    // closed on the right, matching conventional histogram binning.
    let mut series: Vec<(usize, &String, Vec<f64>)> = Vec::new();
    for (i, label) in dataset.label_order.iter().enumerate() {
        let vals = dataset.elapsed_of(label);
        if vals.is_empty() {
            continue;
        }
        let weight = 1.0 / dataset.factor_of(label) as f64;
        let mut counts = vec![0.0f64; nbins];
        for v in vals {
            let idx = (((v - lo) / width) as usize).min(nbins - 1);
            counts[idx] += weight;
        }
        series.push((i, label, counts));
    }

    let ymax = series
        .iter()
        .flat_map(|(_, _, c)| c.iter().copied())
        .fold(0.0f64, f64::max)
        .max(1e-9);

    let size = opts.size_px((900, 600));
    let root = SVGBackend::new(outpath, size).into_drawing_area();
    root.fill(&WHITE)?;
    let area = title_block(
        &root,
        &opts.title_lines("Histogram of Elapsed (ms) - per-user"),
    )?;

    let mut chart = ChartBuilder::on(&area)
        .margin(10)
        .x_label_area_size(40)
        .y_label_area_size(60)
        .build_cartesian_2d(lo..hi, 0f64..ymax * 1.05)?;
    chart
        .configure_mesh()
        .x_desc("Elapsed (ms)")
        .y_desc("Count (per user)")
        .draw()?;

    // Translucent overlapping bars at 98% bin width, matching a multi-series
    // overlay rather than side-by-side grouping
    let pad = width * 0.01;
    for (i, label, counts) in &series {
        let color = color_for_index(*i);
        let style = color.mix(0.6).filled();
        let legend_style = style;
        chart
            .draw_series(counts.iter().enumerate().filter(|(_, c)| **c > 0.0).map(
                |(b, &c)| {
                    let x0 = edges[b] + pad;
                    let x1 = edges[b + 1] - pad;
                    Rectangle::new([(x0, 0.0), (x1, c)], style)
                },
            ))?
            .label((*label).clone())
            .legend(move |(x, y)| Rectangle::new([(x, y - 5), (x + 14, y + 5)], legend_style));
    }

    chart
        .configure_series_labels()
        .position(SeriesLabelPosition::UpperRight)
        .background_style(WHITE.mix(0.8))
        .border_style(BLACK)
        .draw()?;

    root.present()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn edges_span_value_range() {
        let edges = bin_edges(&[0.0, 30.0]);
        assert_eq!(edges.len(), BIN_COUNT + 1);
        assert_eq!(edges[0], 0.0);
        assert!((edges[BIN_COUNT] - 30.0).abs() < 1e-9);
    }

    #[test]
    fn identical_values_get_one_bin() {
        assert_eq!(bin_edges(&[7.0, 7.0, 7.0]), vec![6.5, 7.5]);
    }
}
