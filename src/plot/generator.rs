//! SVG box plot of latency per hop.
//!
//! One box per hop, hops left to right in ascending order:
//! - box spans Q1..Q3 (linear-interpolated quartiles)
//! - line at the median, diamond at the mean
//! - whiskers reach the most extreme samples within 1.5 IQR
//! - samples beyond the whiskers drawn as hollow circles

use crate::aggregator::hops::HopSeries;
use crate::aggregator::metrics::{quantile_of_sorted, sorted_samples};
use crate::parser::schema::{HopNumber, HopRecord};
use crate::utils::error::PlotError;
use log::info;

const MARGIN_LEFT: f64 = 70.0;
const MARGIN_RIGHT: f64 = 20.0;
const MARGIN_TOP: f64 = 50.0;
const MARGIN_BOTTOM: f64 = 90.0;
const Y_TICKS: usize = 5;
const WHISKER_IQR: f64 = 1.5;

const BOX_FILL: &str = "rgb(173, 216, 230)";
const BOX_STROKE: &str = "rgb(31, 119, 180)";
const MEDIAN_COLOR: &str = "rgb(255, 127, 14)";
const MEAN_COLOR: &str = "rgb(44, 160, 44)";
const GRID_COLOR: &str = "rgb(220, 220, 220)";

/// Plot configuration
#[derive(Debug, Clone)]
pub struct BoxPlotConfig {
    pub title: String,
    pub width: usize,
    pub height: usize,
}

impl Default for BoxPlotConfig {
    fn default() -> Self {
        Self {
            title: "Latency Distribution per Hop".to_string(),
            width: 1000,
            height: 600,
        }
    }
}

impl BoxPlotConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn with_size(mut self, width: usize, height: usize) -> Self {
        self.width = width;
        self.height = height;
        self
    }
}

/// Five-number summary plus mean and outliers for one hop
#[derive(Debug, Clone, PartialEq)]
pub struct BoxSummary {
    pub q1: f64,
    pub median: f64,
    pub q3: f64,
    pub mean: f64,
    pub whisker_low: f64,
    pub whisker_high: f64,
    pub outliers: Vec<f64>,
}

impl BoxSummary {
    /// `None` for an empty sample list
    pub fn from_samples(samples: &[f64]) -> Option<Self> {
        if samples.is_empty() {
            return None;
        }

        let sorted = sorted_samples(samples);
        let q1 = quantile_of_sorted(&sorted, 0.25);
        let median = quantile_of_sorted(&sorted, 0.5);
        let q3 = quantile_of_sorted(&sorted, 0.75);
        let mean = sorted.iter().sum::<f64>() / sorted.len() as f64;

        let iqr = q3 - q1;
        let low_fence = q1 - WHISKER_IQR * iqr;
        let high_fence = q3 + WHISKER_IQR * iqr;

        let inside = |v: &&f64| **v >= low_fence && **v <= high_fence;
        let whisker_low = sorted.iter().find(inside).copied().unwrap_or(q1);
        let whisker_high = sorted.iter().rev().find(inside).copied().unwrap_or(q3);
        let outliers = sorted
            .iter()
            .filter(|v| !inside(v))
            .copied()
            .collect();

        Some(Self {
            q1,
            median,
            q3,
            mean,
            whisker_low,
            whisker_high,
            outliers,
        })
    }
}

/// Maps latency values to SVG y coordinates
struct YScale {
    max: f64,
    top: f64,
    bottom: f64,
}

impl YScale {
    fn y(&self, value: f64) -> f64 {
        self.bottom - (value / self.max) * (self.bottom - self.top)
    }
}

/// Render a box plot from per-hop sample series
///
/// **Public** - main entry point for plot generation
///
/// # Arguments
/// * `series` - Samples per hop, ascending by hop number
/// * `config` - Title and size (None = defaults)
///
/// # Returns
/// Complete SVG document as a string
///
/// # Errors
/// * `PlotError::EmptySeries` - nothing to plot (no hops, or no samples)
///
/// # Example
/// ```ignore
/// let config = BoxPlotConfig::new().with_title("example.com");
/// let svg = generate_boxplot(&aggregation.series, Some(&config))?;
/// write_svg(&svg, "output.svg")?;
/// ```
pub fn generate_boxplot(
    series: &[HopSeries],
    config: Option<&BoxPlotConfig>,
) -> Result<String, PlotError> {
    let boxes: Vec<(HopNumber, BoxSummary)> = series
        .iter()
        .filter_map(|s| BoxSummary::from_samples(&s.samples).map(|b| (s.hop, b)))
        .collect();

    if boxes.is_empty() {
        return Err(PlotError::EmptySeries);
    }

    let config = config.cloned().unwrap_or_default();
    info!("Generating box plot for {} hops", boxes.len());

    let width = config.width as f64;
    let height = config.height as f64;
    let plot_left = MARGIN_LEFT;
    let plot_right = width - MARGIN_RIGHT;
    let scale = YScale {
        max: nice_ceiling(
            series
                .iter()
                .flat_map(|s| s.samples.iter().copied())
                .fold(0.0, f64::max),
        ),
        top: MARGIN_TOP,
        bottom: height - MARGIN_BOTTOM,
    };

    let mut svg = String::new();
    svg.push_str(&format!(
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}">"#,
        w = config.width,
        h = config.height
    ));
    svg.push_str(r#"<style>text { font-family: sans-serif; } .box:hover { stroke-width: 2; }</style>"#);
    svg.push_str(&format!(
        r#"<rect x="0" y="0" width="{}" height="{}" fill="white"/>"#,
        config.width, config.height
    ));

    // Title
    svg.push_str(&format!(
        r#"<text x="{:.1}" y="28" font-size="16" font-weight="bold" text-anchor="middle">{}</text>"#,
        width / 2.0,
        escape_xml(&config.title)
    ));

    render_y_axis(&mut svg, &scale, plot_left, plot_right);

    let slot = (plot_right - plot_left) / boxes.len() as f64;
    for (index, (hop, summary)) in boxes.iter().enumerate() {
        let center = plot_left + slot * (index as f64 + 0.5);
        render_box(&mut svg, summary, *hop, center, slot * 0.5, &scale);
        render_x_label(&mut svg, *hop, center, scale.bottom);
    }

    // Axes and axis titles
    svg.push_str(&format!(
        r#"<line x1="{l:.1}" y1="{b:.1}" x2="{r:.1}" y2="{b:.1}" stroke="black"/><line x1="{l:.1}" y1="{t:.1}" x2="{l:.1}" y2="{b:.1}" stroke="black"/>"#,
        l = plot_left,
        r = plot_right,
        t = scale.top,
        b = scale.bottom
    ));
    svg.push_str(&format!(
        r#"<text x="{:.1}" y="{:.1}" font-size="13" text-anchor="middle">Hop Number</text>"#,
        (plot_left + plot_right) / 2.0,
        height - 12.0
    ));
    svg.push_str(&format!(
        r#"<text x="18" y="{y:.1}" font-size="13" text-anchor="middle" transform="rotate(-90 18 {y:.1})">Latency (ms)</text>"#,
        y = (scale.top + scale.bottom) / 2.0
    ));

    svg.push_str("</svg>");

    info!("Box plot generated successfully ({} bytes)", svg.len());
    Ok(svg)
}

fn render_y_axis(out: &mut String, scale: &YScale, left: f64, right: f64) {
    for i in 0..=Y_TICKS {
        let value = scale.max * i as f64 / Y_TICKS as f64;
        let y = scale.y(value);
        out.push_str(&format!(
            r#"<line x1="{left:.1}" y1="{y:.1}" x2="{right:.1}" y2="{y:.1}" stroke="{GRID_COLOR}"/><text x="{:.1}" y="{:.1}" font-size="11" text-anchor="end">{}</text>"#,
            left - 6.0,
            y + 4.0,
            format_tick(value)
        ));
    }
}

fn render_box(out: &mut String, b: &BoxSummary, hop: HopNumber, center: f64, box_width: f64, scale: &YScale) {
    let half = box_width / 2.0;
    let cap = box_width / 4.0;

    // Whiskers with caps
    for (from, to) in [(b.q1, b.whisker_low), (b.q3, b.whisker_high)] {
        out.push_str(&format!(
            r#"<line x1="{center:.1}" y1="{:.1}" x2="{center:.1}" y2="{:.1}" stroke="black"/><line x1="{:.1}" y1="{y:.1}" x2="{:.1}" y2="{y:.1}" stroke="black"/>"#,
            scale.y(from),
            scale.y(to),
            center - cap,
            center + cap,
            y = scale.y(to)
        ));
    }

    // Box
    let top = scale.y(b.q3);
    out.push_str(&format!(
        r#"<rect class="box" x="{:.1}" y="{top:.1}" width="{box_width:.1}" height="{:.1}" fill="{BOX_FILL}" stroke="{BOX_STROKE}"><title>Hop {hop}: Q1 {:.3} | median {:.3} | Q3 {:.3} | mean {:.3} ms</title></rect>"#,
        center - half,
        (scale.y(b.q1) - top).max(1.0),
        b.q1,
        b.median,
        b.q3,
        b.mean
    ));

    // Median line
    out.push_str(&format!(
        r#"<line x1="{:.1}" y1="{y:.1}" x2="{:.1}" y2="{y:.1}" stroke="{MEDIAN_COLOR}" stroke-width="2"/>"#,
        center - half,
        center + half,
        y = scale.y(b.median)
    ));

    // Mean marker
    let my = scale.y(b.mean);
    out.push_str(&format!(
        r#"<polygon points="{:.1},{my:.1} {center:.1},{:.1} {:.1},{my:.1} {center:.1},{:.1}" fill="{MEAN_COLOR}"/>"#,
        center - 4.0,
        my - 4.0,
        center + 4.0,
        my + 4.0
    ));

    for outlier in &b.outliers {
        out.push_str(&format!(
            r#"<circle cx="{center:.1}" cy="{:.1}" r="3" fill="none" stroke="black"/>"#,
            scale.y(*outlier)
        ));
    }
}

fn render_x_label(out: &mut String, hop: HopNumber, center: f64, axis_y: f64) {
    let y = axis_y + 16.0;
    out.push_str(&format!(
        r#"<text x="{center:.1}" y="{y:.1}" font-size="11" text-anchor="end" transform="rotate(-45 {center:.1} {y:.1})">Hop {hop}</text>"#
    ));
}

/// Round the axis maximum up to 1, 2 or 5 times a power of ten
fn nice_ceiling(value: f64) -> f64 {
    if value <= 0.0 || !value.is_finite() {
        return 1.0;
    }
    let magnitude = 10f64.powf(value.log10().floor());
    let scaled = value / magnitude;
    let step = if scaled <= 1.0 {
        1.0
    } else if scaled <= 2.0 {
        2.0
    } else if scaled <= 5.0 {
        5.0
    } else {
        10.0
    };
    step * magnitude
}

fn format_tick(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{:.0}", value)
    } else {
        format!("{:.2}", value)
    }
}

fn escape_xml(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

/// Fixed-width table of hop statistics for the terminal
pub fn generate_text_summary(records: &[HopRecord], max_lines: usize) -> String {
    let mut lines = Vec::new();

    lines.push("  LATENCY PER HOP (ms)".to_string());
    lines.push(format!("  {}", "-".repeat(86)));
    lines.push(format!(
        "  {:>4} {:>6} {:>10} {:>10} {:>10} {:>10}  {:<30}",
        "HOP", "COUNT", "MIN", "AVG", "MED", "MAX", "HOST"
    ));
    lines.push(format!("  {}", "-".repeat(86)));

    for record in records.iter().take(max_lines) {
        let host = match record.host.as_slice() {
            [] => "?".to_string(),
            [only] => format!("{} ({})", only.name, only.address),
            [first, rest @ ..] => format!("{} ({}) +{}", first.name, first.address, rest.len()),
        };

        lines.push(format!(
            "  {:>4} {:>6} {:>10.3} {:>10.3} {:>10.3} {:>10.3}  {:<30}",
            record.hop, record.count, record.min, record.avg, record.med, record.max, host
        ));
    }

    lines.push(format!("  {}", "-".repeat(86)));

    if records.len() > max_lines {
        lines.push(format!("   (Showing {} of {} hops)", max_lines, records.len()));
    }

    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::schema::HostCandidate;

    fn series(hop: HopNumber, samples: &[f64]) -> HopSeries {
        HopSeries {
            hop,
            samples: samples.to_vec(),
        }
    }

    #[test]
    fn test_empty_series_is_error() {
        assert!(matches!(generate_boxplot(&[], None), Err(PlotError::EmptySeries)));
        assert!(matches!(
            generate_boxplot(&[series(1, &[])], None),
            Err(PlotError::EmptySeries)
        ));
    }

    #[test]
    fn test_one_label_per_hop() {
        let input = vec![series(1, &[1.0, 2.0]), series(4, &[10.0]), series(12, &[30.0, 31.0])];
        let svg = generate_boxplot(&input, None).unwrap();

        assert!(svg.starts_with("<svg"));
        assert!(svg.ends_with("</svg>"));
        for label in ["Hop 1<", "Hop 4<", "Hop 12<"] {
            assert_eq!(svg.matches(label).count(), 1, "{}", label);
        }
        assert!(svg.contains("Latency Distribution per Hop"));
        assert!(svg.contains("Latency (ms)"));
    }

    #[test]
    fn test_box_summary_with_outlier() {
        let b = BoxSummary::from_samples(&[1.0, 2.0, 3.0, 4.0, 100.0]).unwrap();

        assert_eq!(b.q1, 2.0);
        assert_eq!(b.median, 3.0);
        assert_eq!(b.q3, 4.0);
        assert_eq!(b.whisker_low, 1.0);
        assert_eq!(b.whisker_high, 4.0);
        assert_eq!(b.outliers, vec![100.0]);
    }

    #[test]
    fn test_title_is_escaped() {
        let config = BoxPlotConfig::new().with_title("a <b> & c");
        let svg = generate_boxplot(&[series(1, &[1.0])], Some(&config)).unwrap();
        assert!(svg.contains("a &lt;b&gt; &amp; c"));
    }

    #[test]
    fn test_nice_ceiling() {
        assert_eq!(nice_ceiling(0.0), 1.0);
        assert_eq!(nice_ceiling(7.3), 10.0);
        assert_eq!(nice_ceiling(13.2), 20.0);
        assert_eq!(nice_ceiling(42.0), 50.0);
    }

    #[test]
    fn test_text_summary() {
        let records = vec![HopRecord {
            hop: 3,
            host: vec![
                HostCandidate::new("a", "1.1.1.1"),
                HostCandidate::new("b", "2.2.2.2"),
            ],
            count: 2,
            min: 1.0,
            max: 2.0,
            avg: 1.5,
            med: 1.5,
        }];

        let summary = generate_text_summary(&records, 10);
        assert!(summary.contains("a (1.1.1.1) +1"));
        assert!(summary.contains("1.500"));
    }
}
