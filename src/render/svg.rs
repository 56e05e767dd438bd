//! SVG chart renderer.
//!
//! Panels are laid out left to right, each with its own data bounds.
//! Network panels are drawn bare; metric panels get a frame, end-point tick
//! labels and axis titles.

use sha2::{Digest, Sha256};

use crate::render::Renderer;
use crate::viz::{AxisScale, Figure, Panel, Point};

/// Colors used by the renderer.
mod palette {
    pub const BG: &str = "#ffffff";
    pub const EDGE: &str = "#888888";
    pub const AXIS: &str = "#444444";
    pub const TEXT: &str = "#222222";
    pub const NODE_STROKE: &str = "#1f3f5f";
    pub const SERIES: &str = "#1f77b4";

    /// Node hues span teal to blue.
    pub const HUE_LOW: f64 = 170.0;
    pub const HUE_HIGH: f64 = 225.0;

    /// `#rrggbb` for a hue in degrees and saturation/lightness in [0, 1].
    pub fn hsl_to_hex(hue: f64, saturation: f64, lightness: f64) -> String {
        let a = saturation * lightness.min(1.0 - lightness);
        let channel = |n: f64| {
            let k = (n + hue.rem_euclid(360.0) / 30.0) % 12.0;
            let v = lightness - a * (k - 3.0).min(9.0 - k).clamp(-1.0, 1.0);
            (v.clamp(0.0, 1.0) * 255.0).round() as u8
        };
        format!("#{:02x}{:02x}{:02x}", channel(0.0), channel(8.0), channel(4.0))
    }

    /// Node fill for a position in [0, 1).
    pub fn node_fill(t: f64) -> String {
        hsl_to_hex(HUE_LOW + (HUE_HIGH - HUE_LOW) * t, 0.6, 0.72)
    }
}

const TITLE_BAND: f64 = 36.0;

pub struct SvgRenderer {
    pub panel_width: u32,
    pub panel_height: u32,
}

impl Default for SvgRenderer {
    fn default() -> Self {
        Self {
            panel_width: 480,
            panel_height: 480,
        }
    }
}

/// Maps data coordinates of one panel into pixels.
struct Frame {
    left: f64,
    top: f64,
    width: f64,
    height: f64,
    x_range: (f64, f64),
    y_range: (f64, f64),
    scale: AxisScale,
}

impl Frame {
    /// Apply the axis transform. `None` for values a log axis cannot show.
    fn transform(scale: AxisScale, p: Point) -> Option<Point> {
        match scale {
            AxisScale::Linear => Some(p),
            AxisScale::LogLog if p.x > 0.0 && p.y > 0.0 => {
                Some(Point::new(p.x.log10(), p.y.log10()))
            }
            AxisScale::LogLog => None,
        }
    }

    fn project(&self, p: Point) -> Option<(f64, f64)> {
        let p = Self::transform(self.scale, p)?;
        let (x0, x1) = self.x_range;
        let (y0, y1) = self.y_range;
        let x = self.left + (p.x - x0) / (x1 - x0) * self.width;
        let y = self.top + self.height - (p.y - y0) / (y1 - y0) * self.height;
        Some((x, y))
    }

    /// Undo the axis transform for tick labels.
    fn data_value(&self, v: f64) -> f64 {
        match self.scale {
            AxisScale::Linear => v,
            AxisScale::LogLog => 10f64.powf(v),
        }
    }
}

/// Min/max of `values` widened by 5%; a flat range is opened to width 1.
fn padded_range(values: impl Iterator<Item = f64>) -> (f64, f64) {
    let (lo, hi) = values.fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
        (lo.min(v), hi.max(v))
    });
    if !lo.is_finite() || !hi.is_finite() {
        return (0.0, 1.0);
    }
    if hi - lo < f64::EPSILON {
        return (lo - 0.5, hi + 0.5);
    }
    let pad = (hi - lo) * 0.05;
    (lo - pad, hi + pad)
}

/// Hash a string to a deterministic float in [0, 1).
fn hash_to_float(s: &str) -> f64 {
    let mut hasher = Sha256::new();
    hasher.update(s.as_bytes());
    let hash = hasher.finalize();
    let val = u32::from_le_bytes([hash[0], hash[1], hash[2], hash[3]]);
    val as f64 / (u32::MAX as f64 + 1.0)
}

fn escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

fn format_tick(v: f64) -> String {
    if v.abs() >= 100.0 || v.fract().abs() < 1e-9 {
        format!("{:.0}", v)
    } else {
        format!("{:.2}", v)
    }
}

impl SvgRenderer {
    pub fn new(panel_width: u32, panel_height: u32) -> Self {
        Self {
            panel_width,
            panel_height,
        }
    }

    fn frame(&self, panel: &Panel, index: usize, top: f64) -> Frame {
        let (ml, mr, mt, mb) = if panel.axes {
            (64.0, 20.0, TITLE_BAND, 52.0)
        } else {
            (24.0, 24.0, TITLE_BAND, 24.0)
        };
        let transformed: Vec<Point> = panel
            .coordinates()
            .filter_map(|p| Frame::transform(panel.scale, p))
            .collect();

        Frame {
            left: index as f64 * self.panel_width as f64 + ml,
            top: top + mt,
            width: self.panel_width as f64 - ml - mr,
            height: self.panel_height as f64 - mt - mb,
            x_range: padded_range(transformed.iter().map(|p| p.x)),
            y_range: padded_range(transformed.iter().map(|p| p.y)),
            scale: panel.scale,
        }
    }

    fn draw_axes(&self, frame: &Frame, panel: &Panel) -> Vec<String> {
        let mut elements = vec![format!(
            r#"<rect x="{:.1}" y="{:.1}" width="{:.1}" height="{:.1}" fill="none" stroke="{}" stroke-width="1"/>"#,
            frame.left,
            frame.top,
            frame.width,
            frame.height,
            palette::AXIS
        )];

        let bottom = frame.top + frame.height;
        let right = frame.left + frame.width;
        let ticks = [
            (frame.left, bottom + 16.0, "middle", frame.data_value(frame.x_range.0)),
            (right, bottom + 16.0, "middle", frame.data_value(frame.x_range.1)),
            (frame.left - 6.0, bottom, "end", frame.data_value(frame.y_range.0)),
            (frame.left - 6.0, frame.top + 4.0, "end", frame.data_value(frame.y_range.1)),
        ];
        for (x, y, anchor, value) in ticks {
            elements.push(format!(
                r#"<text x="{:.1}" y="{:.1}" font-size="11" text-anchor="{}" fill="{}">{}</text>"#,
                x,
                y,
                anchor,
                palette::TEXT,
                format_tick(value)
            ));
        }

        if let Some(label) = &panel.x_label {
            elements.push(format!(
                r#"<text x="{:.1}" y="{:.1}" font-size="13" text-anchor="middle" fill="{}">{}</text>"#,
                frame.left + frame.width / 2.0,
                bottom + 36.0,
                palette::TEXT,
                escape(label)
            ));
        }
        if let Some(label) = &panel.y_label {
            let x = frame.left - 44.0;
            let y = frame.top + frame.height / 2.0;
            elements.push(format!(
                r#"<text x="{:.1}" y="{:.1}" font-size="13" text-anchor="middle" fill="{}" transform="rotate(-90 {:.1} {:.1})">{}</text>"#,
                x,
                y,
                palette::TEXT,
                x,
                y,
                escape(label)
            ));
        }
        elements
    }

    fn draw_panel(&self, panel: &Panel, index: usize, top: f64) -> Vec<String> {
        let frame = self.frame(panel, index, top);
        let mut elements = Vec::new();

        if let Some(title) = &panel.title {
            elements.push(format!(
                r#"<text x="{:.1}" y="{:.1}" font-size="16" text-anchor="middle" fill="{}">{}</text>"#,
                (index as f64 + 0.5) * self.panel_width as f64,
                top + 24.0,
                palette::TEXT,
                escape(title)
            ));
        }
        if panel.axes {
            elements.extend(self.draw_axes(&frame, panel));
        }

        for segment in &panel.segments {
            if let (Some((x1, y1)), Some((x2, y2))) =
                (frame.project(segment.from), frame.project(segment.to))
            {
                elements.push(format!(
                    r#"<line x1="{:.1}" y1="{:.1}" x2="{:.1}" y2="{:.1}" stroke="{}" stroke-width="1.5"/>"#,
                    x1,
                    y1,
                    x2,
                    y2,
                    palette::EDGE
                ));
            }
        }

        for series in &panel.series {
            let points: Vec<String> = series
                .points
                .iter()
                .filter_map(|&p| frame.project(p))
                .map(|(x, y)| format!("{:.1},{:.1}", x, y))
                .collect();
            if !points.is_empty() {
                elements.push(format!(
                    r#"<polyline points="{}" fill="none" stroke="{}" stroke-width="2"/>"#,
                    points.join(" "),
                    palette::SERIES
                ));
            }
        }

        // Labeled points are drawn as large discs carrying their text.
        for (i, point) in panel.points.iter().enumerate() {
            let Some((x, y)) = frame.project(point.at) else {
                continue;
            };
            match &point.label {
                Some(label) => {
                    elements.push(format!(
                        r#"<circle cx="{:.1}" cy="{:.1}" r="15" fill="{}" stroke="{}" stroke-width="2"/>"#,
                        x,
                        y,
                        palette::node_fill(hash_to_float(label)),
                        palette::NODE_STROKE
                    ));
                    elements.push(format!(
                        r#"<text x="{:.1}" y="{:.1}" font-size="12" text-anchor="middle" dominant-baseline="central" fill="{}">{}</text>"#,
                        x,
                        y,
                        palette::TEXT,
                        escape(label)
                    ));
                }
                None => {
                    let fill = if panel.axes {
                        palette::SERIES.to_string()
                    } else {
                        palette::node_fill(hash_to_float(&i.to_string()))
                    };
                    elements.push(format!(
                        r#"<circle cx="{:.1}" cy="{:.1}" r="5" fill="{}" stroke="{}" stroke-width="0.5"/>"#,
                        x,
                        y,
                        fill,
                        palette::NODE_STROKE
                    ));
                }
            }
        }

        elements
    }

    fn wrap_svg(&self, width: u32, height: u32, content: &str) -> String {
        format!(
            r#"<?xml version="1.0" encoding="UTF-8"?>
<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 {} {}" width="{}" height="{}" font-family="sans-serif">
  <rect width="100%" height="100%" fill="{}"/>
  {}
</svg>"#,
            width,
            height,
            width,
            height,
            palette::BG,
            content
        )
    }
}

impl Renderer for SvgRenderer {
    fn name(&self) -> &'static str {
        "svg"
    }

    fn render(&self, figure: &Figure) -> String {
        let top = if figure.title.is_some() { TITLE_BAND } else { 0.0 };
        let width = self.panel_width * figure.panels.len().max(1) as u32;
        let height = self.panel_height + top as u32;

        let mut elements = Vec::new();
        if let Some(title) = &figure.title {
            elements.push(format!(
                r#"<text x="{:.1}" y="24" font-size="18" text-anchor="middle" fill="{}">{}</text>"#,
                width as f64 / 2.0,
                palette::TEXT,
                escape(title)
            ));
        }
        for (index, panel) in figure.panels.iter().enumerate() {
            elements.extend(self.draw_panel(panel, index, top));
        }

        self.wrap_svg(width, height, &elements.join("\n  "))
    }

    fn extension(&self) -> &'static str {
        "svg"
    }
}
