//! Renderer-independent chart description.

/// A point in data coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const ORIGIN: Point = Point { x: 0.0, y: 0.0 };

    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct LineSegment {
    pub from: Point,
    pub to: Point,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LabeledPoint {
    pub at: Point,
    pub label: Option<String>,
}

/// A connected line through `points`, drawn in order.
#[derive(Debug, Clone, PartialEq)]
pub struct Series {
    pub name: String,
    pub points: Vec<Point>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AxisScale {
    #[default]
    Linear,
    /// Base-10 logarithm on both axes. Non-positive values cannot be drawn.
    LogLog,
}

/// One plot area.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Panel {
    pub title: Option<String>,
    pub x_label: Option<String>,
    pub y_label: Option<String>,
    pub scale: AxisScale,
    /// Draw a frame around the plot area. Off for network drawings.
    pub axes: bool,
    pub segments: Vec<LineSegment>,
    pub points: Vec<LabeledPoint>,
    pub series: Vec<Series>,
}

impl Panel {
    pub fn titled(title: impl Into<String>) -> Self {
        Self {
            title: Some(title.into()),
            ..Self::default()
        }
    }

    /// Every coordinate the panel draws.
    pub fn coordinates(&self) -> impl Iterator<Item = Point> + '_ {
        self.segments
            .iter()
            .flat_map(|s| [s.from, s.to])
            .chain(self.points.iter().map(|p| p.at))
            .chain(self.series.iter().flat_map(|s| s.points.iter().copied()))
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty() && self.points.is_empty() && self.series.is_empty()
    }
}

/// A set of panels laid out side by side.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Figure {
    pub title: Option<String>,
    pub panels: Vec<Panel>,
}

impl Figure {
    pub fn single(panel: Panel) -> Self {
        Self {
            title: None,
            panels: vec![panel],
        }
    }
}
