use anyhow::Result;
use plotters::prelude::*;
use std::path::Path;

use crate::dataset::Dataset;
use crate::render::{color_for_index, title_block, RenderOptions};

/// Grouped boxplot of elapsed by label. Labels with a positive error rate
/// are annotated above their box; the y-range gains extra headroom only when
/// at least one annotation is drawn.
///
/// The x axis is segmented over group positions and formatted back to label
/// text, which keeps the chart coordinates `Copy` and the y values in the
/// `f32` space the box elements are drawn in.
pub fn plot_box(dataset: &Dataset, outpath: &Path, opts: &RenderOptions) -> Result<()> {
    let size = opts.size_px((900, 600));
    let root = SVGBackend::new(outpath, size).into_drawing_area();
    root.fill(&WHITE)?;
    let area = title_block(&root, &opts.title_lines("Elapsed Time (ms) by dataset"))?;

    // One entry per non-empty label: axis index (for color), label text,
    // values, error rate.
    let groups: Vec<(usize, String, Vec<f64>, f64)> = dataset
        .label_order
        .iter()
        .enumerate()
        .map(|(i, l)| {
            (
                i,
                l.clone(),
                dataset.elapsed_of(l),
                dataset.error_rate_of(l),
            )
        })
        .filter(|(_, _, v, _)| !v.is_empty())
        .collect();

    let mut ymin = f32::INFINITY;
    let mut ymax = f32::NEG_INFINITY;
    for (_, _, vals, _) in &groups {
        for v in vals {
            ymin = ymin.min(*v as f32);
            ymax = ymax.max(*v as f32);
        }
    }
    if groups.is_empty() {
        ymin = 0.0;
        ymax = 1.0;
    }
    if ymin == ymax {
        ymin -= 0.5;
        ymax += 0.5;
    }
    let span = ymax - ymin;

    let annotate = groups.iter().any(|(_, _, _, r)| *r > 0.0);
    let top = if annotate {
        ymax + 0.10 * span
    } else {
        ymax + 0.05 * span
    };

    let labels: Vec<String> = groups.iter().map(|(_, l, _, _)| l.clone()).collect();
    let n = labels.len().max(1);

    let mut chart = ChartBuilder::on(&area)
        .margin(10)
        .x_label_area_size(40)
        .y_label_area_size(60)
        .build_cartesian_2d((0..n).into_segmented(), (ymin - 0.05 * span)..top)?;
    chart
        .configure_mesh()
        .disable_x_mesh()
        .x_labels(n)
        .x_label_formatter(&|seg| match seg {
            SegmentValue::CenterOf(i) => labels.get(*i).cloned().unwrap_or_default(),
            _ => String::new(),
        })
        .y_desc("Elapsed Time (ms)")
        .draw()?;

    for (pos, (axis_idx, _, vals, rate)) in groups.iter().enumerate() {
        let quartiles = Quartiles::new(vals);
        chart.draw_series(std::iter::once(
            Boxplot::new_vertical(SegmentValue::CenterOf(pos), &quartiles)
                .width(24)
                .whisker_width(0.5)
                .style(color_for_index(*axis_idx)),
        ))?;

        if *rate > 0.0 {
            chart.draw_series(std::iter::once(Text::new(
                format!("{:.1}% err", rate * 100.0),
                (SegmentValue::CenterOf(pos), ymax + 0.02 * span),
                ("sans-serif", 13.0),
            )))?;
        }
    }

    root.present()?;
    Ok(())
}
