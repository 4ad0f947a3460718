use anyhow::{Context, Result};
use std::path::PathBuf;

use crate::cli::Cli;
use crate::data::{loader, normalize};
use crate::dataset::Dataset;
use crate::render::{boxplot, ecdf, histogram, table, RenderOptions};
use crate::stats;

/// Format a percentile bound for filenames: integral values lose the
/// trailing ".0" (0.0 -> "0", 99.5 -> "99.5").
fn fmt_pct(v: f64) -> String {
    if v.fract() == 0.0 {
        format!("{}", v as i64)
    } else {
        format!("{v}")
    }
}

/// Run the whole pipeline: load, normalize, aggregate, summarize, optionally
/// trim, render. Returns the paths of the written artifacts.
pub fn run(args: &Cli) -> Result<Vec<PathBuf>> {
    std::fs::create_dir_all(&args.out)
        .with_context(|| format!("cannot create output directory '{}'", args.out.display()))?;

    let mut sources = Vec::with_capacity(args.files.len());
    for (path, label) in args.files.iter().zip(&args.labels) {
        let table = loader::load_table(path).context("error reading input files")?;
        let observations =
            normalize::normalize_table(&table, path, label).context("error reading input files")?;
        tracing::info!(
            "{}: {} observations (label '{}')",
            path.display(),
            observations.len(),
            label
        );
        sources.push(observations);
    }

    let dataset = Dataset::aggregate(sources, args.labels.clone());
    let summary = stats::summarize(&dataset);

    println!("\n=== Summary (per label) - RAW (normalized count) ===");
    print!("{}", stats::format_summary(&summary));

    let summary_img = args.out.join("summary_table_raw.svg");
    let summary_csv = args.out.join("summary_table_raw.csv");
    let summary_json = args.out.join("summary_table_raw.json");
    let summary_title = match &args.title {
        Some(t) => format!("{t} - Summary for Elapsed Time (ms)"),
        None => "Summary Statistics for Elapsed (ms) - RAW (per-user normalized counts)".to_string(),
    };
    table::render_summary_table(
        &summary,
        &summary_img,
        &crate::render::wrap_text(&summary_title, args.title_width),
    )?;
    table::write_summary_csv(&summary, &summary_csv)?;
    table::write_summary_json(&summary, &summary_json)?;

    let (plot_data, suffix, title_suffix) = if args.trim_plots {
        let trimmed = dataset.trim_percentile_per_label(args.pct_low, args.pct_high);
        eprintln!(
            "\nPlots will be trimmed per label to [{}, {}] percentiles.",
            args.pct_low, args.pct_high
        );
        (
            trimmed,
            format!("_trim_p{}-{}", fmt_pct(args.pct_low), fmt_pct(args.pct_high)),
            format!(
                " (trimmed to {}-{} percentile per label)",
                args.pct_low, args.pct_high
            ),
        )
    } else {
        (dataset, "_raw".to_string(), String::new())
    };

    let opts = RenderOptions {
        title: args.title.clone(),
        title_suffix,
        title_width: args.title_width,
        fig_size: args.fig_size_pair(),
    };

    let boxplot_path = args.out.join(format!("boxplot_elapsed{suffix}.svg"));
    let ecdf_path = args.out.join(format!("ecdf_elapsed{suffix}.svg"));
    let hist_path = args.out.join(format!("hist_elapsed{suffix}.svg"));

    boxplot::plot_box(&plot_data, &boxplot_path, &opts)?;
    ecdf::plot_ecdf(&plot_data, &ecdf_path, &opts)?;
    histogram::plot_histogram(&plot_data, &hist_path, &opts)?;

    let written: Vec<PathBuf> = [summary_img, summary_csv, summary_json, boxplot_path, ecdf_path, hist_path]
        .into_iter()
        .filter(|p| p.exists())
        .collect();

    println!("\nFiles written:");
    for p in &written {
        println!("- {}", p.display());
    }
    Ok(written)
}
