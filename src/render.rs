pub mod boxplot;
pub mod ecdf;
pub mod histogram;
pub mod table;

use plotters::coord::Shift;
use plotters::drawing::DrawingAreaErrorKind;
use plotters::prelude::*;

/// Per-series color palette, cycled by label index.
pub const SERIES_COLORS: [RGBColor; 12] = [
    RGBColor(31, 119, 180),  // blue
    RGBColor(255, 127, 14),  // orange
    RGBColor(44, 160, 44),   // green
    RGBColor(214, 39, 40),   // red
    RGBColor(148, 103, 189), // purple
    RGBColor(140, 86, 75),   // brown
    RGBColor(227, 119, 194), // pink
    RGBColor(127, 127, 127), // gray
    RGBColor(188, 189, 34),  // olive
    RGBColor(23, 190, 207),  // cyan
    RGBColor(0, 0, 128),     // navy
    RGBColor(128, 0, 128),   // violet
];

pub fn color_for_index(index: usize) -> RGBColor {
    SERIES_COLORS[index % SERIES_COLORS.len()]
}

/// Chart title, sizing, and trim-suffix settings shared by every artifact.
#[derive(Debug, Clone, Default)]
pub struct RenderOptions {
    /// Caller-supplied title override; None uses each chart's default.
    pub title: Option<String>,
    /// Appended to the title when plot trimming is active.
    pub title_suffix: String,
    /// Wrap the title at this many characters (0 = no wrapping).
    pub title_width: usize,
    /// Figure size override in inches (mapped at 100 px per inch).
    pub fig_size: Option<(f64, f64)>,
}

impl RenderOptions {
    pub fn size_px(&self, default: (u32, u32)) -> (u32, u32) {
        match self.fig_size {
            Some((w, h)) if w > 0.0 && h > 0.0 => ((w * 100.0) as u32, (h * 100.0) as u32),
            _ => default,
        }
    }

    /// Final title lines for a chart: override-or-default, suffix, wrapping.
    pub fn title_lines(&self, default: &str) -> Vec<String> {
        let full = format!(
            "{}{}",
            self.title.as_deref().unwrap_or(default),
            self.title_suffix
        );
        wrap_text(&full, self.title_width)
    }
}

/// Greedy word wrap at `width` characters; 0 disables wrapping. Words longer
/// than the width get a line of their own.
pub fn wrap_text(s: &str, width: usize) -> Vec<String> {
    if width == 0 || s.len() <= width {
        return vec![s.to_string()];
    }
    let mut lines = Vec::new();
    let mut current = String::new();
    for word in s.split_whitespace() {
        if current.is_empty() {
            current = word.to_string();
        } else if current.len() + 1 + word.len() <= width {
            current.push(' ');
            current.push_str(word);
        } else {
            lines.push(std::mem::take(&mut current));
            current = word.to_string();
        }
    }
    if !current.is_empty() {
        lines.push(current);
    }
    if lines.is_empty() {
        lines.push(String::new());
    }
    lines
}

const TITLE_LINE_HEIGHT: i32 = 24;
const TITLE_FONT_PX: i32 = 18;

/// Draw the title lines across the top of `root` and return the remaining
/// chart area below them. Each chart acquires its own root, renders, and
/// presents; no drawing state is shared between charts.
pub(crate) fn title_block<DB: DrawingBackend>(
    root: &DrawingArea<DB, Shift>,
    lines: &[String],
) -> Result<DrawingArea<DB, Shift>, DrawingAreaErrorKind<DB::ErrorType>> {
    let (w, _) = root.dim_in_pixel();
    let header_h = lines.len() as i32 * TITLE_LINE_HEIGHT + 8;
    let (title_area, chart_area) = root.split_vertically(header_h);
    for (i, line) in lines.iter().enumerate() {
        // Approximate centering; SVG text metrics are not available here
        let est_w = line.chars().count() as i32 * TITLE_FONT_PX / 2;
        let x = ((w as i32 - est_w) / 2).max(0);
        title_area.draw(&Text::new(
            line.clone(),
            (x, 6 + i as i32 * TITLE_LINE_HEIGHT),
            ("sans-serif", TITLE_FONT_PX as f64),
        ))?;
    }
    Ok(chart_area)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wrap_disabled_at_zero() {
        assert_eq!(wrap_text("a long title here", 0), vec!["a long title here"]);
    }

    #[test]
    fn wraps_on_word_boundaries() {
        assert_eq!(
            wrap_text("alpha beta gamma", 11),
            vec!["alpha beta", "gamma"]
        );
    }

    #[test]
    fn long_word_gets_own_line() {
        assert_eq!(
            wrap_text("hi incomprehensibilities yo", 10),
            vec!["hi", "incomprehensibilities", "yo"]
        );
    }

    #[test]
    fn options_apply_suffix_and_default() {
        let opts = RenderOptions {
            title: None,
            title_suffix: " (trimmed)".to_string(),
            title_width: 0,
            fig_size: None,
        };
        assert_eq!(opts.title_lines("ECDF"), vec!["ECDF (trimmed)"]);

        let opts = RenderOptions {
            title: Some("Custom".to_string()),
            ..Default::default()
        };
        assert_eq!(opts.title_lines("ECDF"), vec!["Custom"]);
    }

    #[test]
    fn fig_size_maps_inches_to_pixels() {
        let opts = RenderOptions {
            fig_size: Some((12.0, 6.0)),
            ..Default::default()
        };
        assert_eq!(opts.size_px((900, 600)), (1200, 600));
        assert_eq!(RenderOptions::default().size_px((900, 600)), (900, 600));
    }
}
