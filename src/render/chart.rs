//! Standalone SVG charts.
//!
//! Both charts share one canvas size and margin layout so they line up when
//! the dashboard shows them side by side.

use chrono::{DateTime, Utc};

use super::format::{escape_html, grouped};

/// Canvas width in pixels.
pub const WIDTH: f64 = 800.0;
/// Canvas height in pixels.
pub const HEIGHT: f64 = 400.0;

const MARGIN_LEFT: f64 = 90.0;
const MARGIN_RIGHT: f64 = 24.0;
const MARGIN_TOP: f64 = 44.0;
const MARGIN_BOTTOM: f64 = 64.0;
const Y_TICKS: u32 = 5;

/// Colour of the cumulative rewards line.
pub const LINE_COLOR: &str = "#2ecc71";

/// One bar of a [`bar_chart`].
#[derive(Debug, Clone, PartialEq)]
pub struct Bar {
    /// Category label under the bar.
    pub label: String,
    /// Bar height in data units.
    pub value: f64,
    /// Fill colour.
    pub color: &'static str,
}

/// Renders a time series as a line with a marker per point.
///
/// An empty series renders the frame with a "No data" notice.
#[must_use]
pub fn line_chart(title: &str, y_label: &str, points: &[(DateTime<Utc>, f64)]) -> String {
    let mut svg = open_svg(title);
    let plot = Plot::default();

    let (Some((first_ts, _)), Some((last_ts, _))) = (points.first(), points.last()) else {
        svg.push_str(&no_data(&plot));
        svg.push_str("</svg>\n");
        return svg;
    };

    let (min_v, max_v) = value_range(points.iter().map(|(_, v)| *v));
    svg.push_str(&y_axis(&plot, min_v, max_v, y_label));

    let t0 = first_ts.timestamp() as f64;
    let t_span = (last_ts.timestamp() - first_ts.timestamp()) as f64;
    let x_of = |ts: &DateTime<Utc>| {
        if t_span > 0.0 {
            plot.left + (ts.timestamp() as f64 - t0) / t_span * plot.width()
        } else {
            plot.left + plot.width() / 2.0
        }
    };
    let y_of = |v: f64| plot.bottom - (v - min_v) / (max_v - min_v) * plot.height();

    let coords: Vec<(f64, f64)> = points.iter().map(|(ts, v)| (x_of(ts), y_of(*v))).collect();
    let polyline: Vec<String> = coords.iter().map(|(x, y)| format!("{x:.1},{y:.1}")).collect();
    svg.push_str(&format!(
        "<polyline fill=\"none\" stroke=\"{LINE_COLOR}\" stroke-width=\"2\" points=\"{}\"/>\n",
        polyline.join(" ")
    ));
    for ((ts, v), (x, y)) in points.iter().zip(&coords) {
        svg.push_str(&format!(
            "<circle cx=\"{x:.1}\" cy=\"{y:.1}\" r=\"3\" fill=\"{LINE_COLOR}\"><title>{}: {} ALGO</title></circle>\n",
            ts.format("%Y-%m-%d %H:%M:%S"),
            grouped(*v, 2)
        ));
    }

    let mut x_labels = vec![first_ts];
    if points.len() > 2
        && let Some((mid_ts, _)) = points.get(points.len() / 2)
    {
        x_labels.push(mid_ts);
    }
    if points.len() > 1 {
        x_labels.push(last_ts);
    }
    for ts in x_labels {
        svg.push_str(&format!(
            "<text x=\"{:.1}\" y=\"{:.1}\" font-size=\"11\" text-anchor=\"middle\">{}</text>\n",
            x_of(ts),
            plot.bottom + 18.0,
            ts.format("%Y-%m-%d")
        ));
    }
    svg.push_str(&x_title(&plot, "Date"));
    svg.push_str("</svg>\n");
    svg
}

/// Renders one vertical bar per entry with its value printed above it.
#[must_use]
pub fn bar_chart(title: &str, y_label: &str, bars: &[Bar]) -> String {
    let mut svg = open_svg(title);
    let plot = Plot::default();
    if bars.is_empty() {
        svg.push_str(&no_data(&plot));
        svg.push_str("</svg>\n");
        return svg;
    }

    let (min_v, max_v) = value_range(bars.iter().map(|b| b.value));
    svg.push_str(&y_axis(&plot, min_v, max_v, y_label));
    let y_of = |v: f64| plot.bottom - (v - min_v) / (max_v - min_v) * plot.height();

    let slot = plot.width() / bars.len() as f64;
    let bar_width = slot * 0.6;
    for (i, bar) in bars.iter().enumerate() {
        let x = plot.left + slot * i as f64 + (slot - bar_width) / 2.0;
        let top = y_of(bar.value.max(min_v));
        let base = y_of(0.0_f64.max(min_v));
        let (y, h) = if top <= base { (top, base - top) } else { (base, top - base) };
        svg.push_str(&format!(
            "<rect x=\"{x:.1}\" y=\"{y:.1}\" width=\"{bar_width:.1}\" height=\"{h:.1}\" fill=\"{}\"/>\n",
            bar.color
        ));
        let center = x + bar_width / 2.0;
        svg.push_str(&format!(
            "<text x=\"{center:.1}\" y=\"{:.1}\" font-size=\"12\" text-anchor=\"middle\">{}</text>\n",
            y - 6.0,
            grouped(bar.value, 6)
        ));
        svg.push_str(&format!(
            "<text x=\"{center:.1}\" y=\"{:.1}\" font-size=\"12\" text-anchor=\"middle\">{}</text>\n",
            plot.bottom + 18.0,
            escape_html(&bar.label)
        ));
    }
    svg.push_str("</svg>\n");
    svg
}

#[derive(Debug, Clone, Copy)]
struct Plot {
    left: f64,
    right: f64,
    top: f64,
    bottom: f64,
}

impl Default for Plot {
    fn default() -> Self {
        Self {
            left: MARGIN_LEFT,
            right: WIDTH - MARGIN_RIGHT,
            top: MARGIN_TOP,
            bottom: HEIGHT - MARGIN_BOTTOM,
        }
    }
}

impl Plot {
    fn width(&self) -> f64 {
        self.right - self.left
    }

    fn height(&self) -> f64 {
        self.bottom - self.top
    }
}

/// Data range padded to include zero and never empty.
fn value_range(values: impl Iterator<Item = f64>) -> (f64, f64) {
    let (min_v, max_v) = values
        .filter(|v| v.is_finite())
        .fold((0.0_f64, 0.0_f64), |(lo, hi), v| (lo.min(v), hi.max(v)));
    if max_v - min_v < f64::EPSILON {
        (min_v, min_v + 1.0)
    } else {
        (min_v, max_v * 1.05)
    }
}

fn open_svg(title: &str) -> String {
    format!(
        "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{WIDTH}\" height=\"{HEIGHT}\" \
         viewBox=\"0 0 {WIDTH} {HEIGHT}\" font-family=\"sans-serif\">\n\
         <rect width=\"100%\" height=\"100%\" fill=\"#ffffff\"/>\n\
         <text x=\"{:.1}\" y=\"24\" font-size=\"16\" text-anchor=\"middle\">{}</text>\n",
        WIDTH / 2.0,
        escape_html(title)
    )
}

fn no_data(plot: &Plot) -> String {
    format!(
        "<text x=\"{:.1}\" y=\"{:.1}\" font-size=\"14\" fill=\"#888888\" text-anchor=\"middle\">No data</text>\n",
        plot.left + plot.width() / 2.0,
        plot.top + plot.height() / 2.0
    )
}

fn y_axis(plot: &Plot, min_v: f64, max_v: f64, label: &str) -> String {
    let mut out = format!(
        "<line x1=\"{l:.1}\" y1=\"{t:.1}\" x2=\"{l:.1}\" y2=\"{b:.1}\" stroke=\"#333333\"/>\n\
         <line x1=\"{l:.1}\" y1=\"{b:.1}\" x2=\"{r:.1}\" y2=\"{b:.1}\" stroke=\"#333333\"/>\n",
        l = plot.left,
        t = plot.top,
        b = plot.bottom,
        r = plot.right
    );
    for i in 0..=Y_TICKS {
        let fraction = f64::from(i) / f64::from(Y_TICKS);
        let value = min_v + (max_v - min_v) * fraction;
        let y = plot.bottom - plot.height() * fraction;
        out.push_str(&format!(
            "<line x1=\"{:.1}\" y1=\"{y:.1}\" x2=\"{:.1}\" y2=\"{y:.1}\" stroke=\"#e5e5e5\"/>\n\
             <text x=\"{:.1}\" y=\"{:.1}\" font-size=\"11\" text-anchor=\"end\">{}</text>\n",
            plot.left,
            plot.right,
            plot.left - 6.0,
            y + 4.0,
            grouped(value, 2)
        ));
    }
    out.push_str(&format!(
        "<text x=\"16\" y=\"{:.1}\" font-size=\"12\" text-anchor=\"middle\" transform=\"rotate(-90 16 {:.1})\">{}</text>\n",
        plot.top + plot.height() / 2.0,
        plot.top + plot.height() / 2.0,
        escape_html(label)
    ));
    out
}

fn x_title(plot: &Plot, label: &str) -> String {
    format!(
        "<text x=\"{:.1}\" y=\"{:.1}\" font-size=\"12\" text-anchor=\"middle\">{}</text>\n",
        plot.left + plot.width() / 2.0,
        HEIGHT - 16.0,
        escape_html(label)
    )
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    fn at(day: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 3, day, 0, 0, 0)
            .single()
            .unwrap_or_default()
    }

    #[test]
    fn line_chart_draws_marker_per_point() {
        let points = vec![(at(1), 1.0), (at(2), 2.5), (at(5), 4.0)];
        let svg = line_chart("Cumulative Rewards Growth", "Total Rewards (ALGO)", &points);
        assert!(svg.starts_with("<svg"));
        assert!(svg.trim_end().ends_with("</svg>"));
        assert_eq!(svg.matches("<circle").count(), 3);
        assert_eq!(svg.matches("<polyline").count(), 1);
        assert!(svg.contains("2025-03-01"));
        assert!(svg.contains("2025-03-05"));
    }

    #[test]
    fn line_chart_handles_single_point() {
        let svg = line_chart("t", "y", &[(at(1), 3.0)]);
        assert_eq!(svg.matches("<circle").count(), 1);
        assert!(!svg.contains("NaN"));
    }

    #[test]
    fn empty_series_shows_notice() {
        let svg = line_chart("t", "y", &[]);
        assert!(svg.contains("No data"));
        assert!(!svg.contains("<polyline"));
        assert!(bar_chart("t", "y", &[]).contains("No data"));
    }

    #[test]
    fn bar_chart_labels_values() {
        let bars = vec![
            Bar {
                label: "Current Balance".to_string(),
                value: 145_726.37,
                color: "#3498db",
            },
            Bar {
                label: "Total Rewards".to_string(),
                value: 12.5,
                color: LINE_COLOR,
            },
        ];
        let svg = bar_chart("Balance vs Rewards", "ALGO", &bars);
        assert_eq!(svg.matches("<rect x=").count(), 2);
        assert!(svg.contains("145,726.370000"));
        assert!(svg.contains("Total Rewards"));
    }

    #[test]
    fn titles_are_escaped() {
        let svg = line_chart("a<b", "y", &[]);
        assert!(svg.contains("a&lt;b"));
    }

    #[test]
    fn value_range_includes_zero() {
        let (lo, hi) = value_range([5.0, 5.0].into_iter());
        assert!(lo.abs() < f64::EPSILON);
        assert!((hi - 5.25).abs() < 1e-9);
        let (lo, hi) = value_range(std::iter::empty());
        assert!(lo.abs() < f64::EPSILON && (hi - 1.0).abs() < f64::EPSILON);
    }
}
