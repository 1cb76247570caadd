//! Line, doughnut and radar charts.
//!
//! Each chart is split into a pure layout function, which validates the
//! dataset and computes every coordinate, and a `draw_*` function that clears
//! the surface and paints the layout. Validation happens before the clear, so a
//! rejected dataset leaves the surface untouched.
//!
//! # Example
//!
//! ```
//! use vitrine_core::chart::{doughnut_layout, ChartOptions, Dataset};
//! use vitrine_core::Size;
//!
//! let skills = Dataset::from_values(&[35.0, 28.0, 22.0, 18.0, 15.0, 12.0]);
//! let layout = doughnut_layout(&skills, &ChartOptions::new(Size::new(300.0, 300.0))).unwrap();
//! assert_eq!(layout.slices[0].percent, 27);
//! ```

use crate::canvas::Canvas;
use crate::draw::{FontWeight, StrokeStyle, TextAlign, TextStyle};
use crate::error::ChartError;
use crate::{Color, Point, Size};
use serde::{Deserialize, Serialize};
use std::f64::consts::{FRAC_PI_2, TAU};

// =============================================================================
// Dataset
// =============================================================================

/// One labelled value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DataPoint {
    /// Category label
    pub label: String,
    /// Value
    pub value: f64,
}

/// Ordered `(label, value)` pairs handed to a single draw call.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Dataset {
    points: Vec<DataPoint>,
}

impl Dataset {
    /// Build from label/value pairs.
    #[must_use]
    pub fn from_pairs<L: Into<String>>(pairs: impl IntoIterator<Item = (L, f64)>) -> Self {
        Self {
            points: pairs
                .into_iter()
                .map(|(label, value)| DataPoint {
                    label: label.into(),
                    value,
                })
                .collect(),
        }
    }

    /// Build from bare values with empty labels.
    #[must_use]
    pub fn from_values(values: &[f64]) -> Self {
        Self::from_pairs(values.iter().map(|&v| (String::new(), v)))
    }

    /// Points in order.
    #[must_use]
    pub fn points(&self) -> &[DataPoint] {
        &self.points
    }

    /// Number of points.
    #[must_use]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Whether the dataset has no points.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Largest value, `None` when empty.
    #[must_use]
    pub fn max(&self) -> Option<f64> {
        self.points.iter().map(|p| p.value).reduce(f64::max)
    }

    /// Sum of all values.
    #[must_use]
    pub fn total(&self) -> f64 {
        self.points.iter().map(|p| p.value).sum()
    }
}

// =============================================================================
// Options and style
// =============================================================================

/// Colors used by the chart painters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartStyle {
    /// Data line / radar outline
    pub series: Color,
    /// Translucent fill under the series
    pub series_fill: Color,
    /// Axes and grid lines
    pub grid: Color,
    /// Axis labels
    pub label: Color,
    /// Slice labels and captions
    pub text: Color,
    /// Doughnut slice colors, cycled when shorter than the dataset
    pub slices: Vec<Color>,
}

impl Default for ChartStyle {
    fn default() -> Self {
        Self {
            series: Color::from_rgba8(0x34, 0x98, 0xdb, 1.0),
            series_fill: Color::from_rgba8(0x34, 0x98, 0xdb, 0.3),
            grid: Color::from_rgba8(0xec, 0xf0, 0xf1, 1.0),
            label: Color::from_rgba8(0x7f, 0x8c, 0x8d, 1.0),
            text: Color::from_rgba8(0x2c, 0x3e, 0x50, 1.0),
            slices: vec![
                Color::from_rgba8(0x34, 0x98, 0xdb, 1.0),
                Color::from_rgba8(0xe7, 0x4c, 0x3c, 1.0),
                Color::from_rgba8(0x2e, 0xcc, 0x71, 1.0),
                Color::from_rgba8(0xf3, 0x9c, 0x12, 1.0),
                Color::from_rgba8(0x9b, 0x59, 0xb6, 1.0),
                Color::from_rgba8(0x1a, 0xbc, 0x9c, 1.0),
            ],
        }
    }
}

impl ChartStyle {
    fn slice_color(&self, index: usize) -> Color {
        if self.slices.is_empty() {
            self.series
        } else {
            self.slices[index % self.slices.len()]
        }
    }
}

/// Geometry and visibility options shared by all charts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartOptions {
    /// Surface size
    pub size: Size,
    /// Inset from each edge (line chart)
    pub padding: f32,
    /// Scale the data by `progress` for an entrance animation
    pub animate: bool,
    /// Entrance progress in [0, 1]; ignored unless `animate`
    pub progress: f64,
    /// Draw point markers on the line chart
    pub show_points: bool,
    /// Draw category / percentage labels
    pub show_labels: bool,
    /// Fill the area under the line chart
    pub fill_area: bool,
    /// Number of concentric grid rings on the radar chart
    pub radar_levels: usize,
    /// Bold caption at the center of the doughnut
    pub caption: Option<String>,
    /// Smaller line below the caption
    pub subcaption: Option<String>,
    /// Colors
    pub style: ChartStyle,
}

impl ChartOptions {
    /// Options for a surface of `size` with the standard defaults.
    #[must_use]
    pub fn new(size: Size) -> Self {
        Self {
            size,
            padding: 40.0,
            animate: false,
            progress: 1.0,
            show_points: true,
            show_labels: true,
            fill_area: false,
            radar_levels: 5,
            caption: None,
            subcaption: None,
            style: ChartStyle::default(),
        }
    }

    /// Enable the entrance animation at the given progress.
    #[must_use]
    pub fn animated(mut self, progress: f64) -> Self {
        self.animate = true;
        self.progress = progress;
        self
    }

    /// Set colors.
    #[must_use]
    pub fn with_style(mut self, style: ChartStyle) -> Self {
        self.style = style;
        self
    }

    /// Set the doughnut center caption.
    #[must_use]
    pub fn with_caption(mut self, caption: impl Into<String>, subcaption: impl Into<String>) -> Self {
        self.caption = Some(caption.into());
        self.subcaption = Some(subcaption.into());
        self
    }

    fn reveal(&self) -> f64 {
        if self.animate {
            self.progress.clamp(0.0, 1.0)
        } else {
            1.0
        }
    }
}

// =============================================================================
// Line chart
// =============================================================================

/// Computed coordinates for a line chart.
#[derive(Debug, Clone, PartialEq)]
pub struct LineLayout {
    /// Data points in screen space
    pub points: Vec<Point>,
    /// Category labels and their anchors
    pub labels: Vec<(String, Point)>,
    /// Y axis (top to bottom)
    pub y_axis: (Point, Point),
    /// X axis (left to right)
    pub x_axis: (Point, Point),
}

/// Lay out a line chart normalized against the dataset's own maximum.
pub fn line_layout(dataset: &Dataset, options: &ChartOptions) -> Result<LineLayout, ChartError> {
    let max = dataset.max().ok_or(ChartError::EmptyDataset)?;
    if max <= 0.0 || !max.is_finite() {
        return Err(ChartError::NonPositiveMaximum(max));
    }

    let width = f64::from(options.size.width);
    let height = f64::from(options.size.height);
    let padding = f64::from(options.padding);
    let chart_width = 2.0f64.mul_add(-padding, width);
    let chart_height = 2.0f64.mul_add(-padding, height);
    let step_x = if dataset.len() > 1 {
        chart_width / (dataset.len() - 1) as f64
    } else {
        0.0
    };
    let reveal = options.reveal();

    let x_at = |i: usize| (i as f64).mul_add(step_x, padding);
    let points = dataset
        .points()
        .iter()
        .enumerate()
        .map(|(i, p)| {
            let normalized = (p.value / max) * reveal;
            Point::new(x_at(i) as f32, (height - padding - normalized * chart_height) as f32)
        })
        .collect();
    let labels = dataset
        .points()
        .iter()
        .enumerate()
        .map(|(i, p)| (p.label.clone(), Point::new(x_at(i) as f32, (height - 10.0) as f32)))
        .collect();

    let (p, w, h) = (options.padding, options.size.width, options.size.height);
    Ok(LineLayout {
        points,
        labels,
        y_axis: (Point::new(p, p), Point::new(p, h - p)),
        x_axis: (Point::new(p, h - p), Point::new(w - p, h - p)),
    })
}

/// Clear the surface and draw a line chart.
pub fn draw_line_chart<C: Canvas + ?Sized>(
    canvas: &mut C,
    dataset: &Dataset,
    options: &ChartOptions,
) -> Result<(), ChartError> {
    let layout = line_layout(dataset, options)?;
    let style = &options.style;
    canvas.clear();

    let grid = StrokeStyle::new(style.grid, 1.0);
    canvas.draw_line(layout.y_axis.0, layout.y_axis.1, grid);
    canvas.draw_line(layout.x_axis.0, layout.x_axis.1, grid);

    if options.fill_area {
        if let (Some(first), Some(last)) = (layout.points.first(), layout.points.last()) {
            let baseline = layout.x_axis.0.y;
            let mut area = Vec::with_capacity(layout.points.len() + 2);
            area.push(Point::new(first.x, baseline));
            area.extend_from_slice(&layout.points);
            area.push(Point::new(last.x, baseline));
            canvas.fill_polygon(&area, style.series_fill);
        }
    }

    canvas.draw_path(&layout.points, false, StrokeStyle::new(style.series, 3.0));

    if options.show_points {
        for point in &layout.points {
            canvas.fill_circle(*point, 4.0, style.series);
        }
    }

    if options.show_labels {
        let text = TextStyle::new(12.0, style.label).align(TextAlign::Center);
        for (label, anchor) in &layout.labels {
            canvas.draw_text(label, *anchor, &text);
        }
    }
    Ok(())
}

// =============================================================================
// Doughnut chart
// =============================================================================

/// One doughnut slice.
#[derive(Debug, Clone, PartialEq)]
pub struct Slice {
    /// Category label
    pub label: String,
    /// Raw value
    pub value: f64,
    /// Start angle in radians (canvas convention)
    pub start_angle: f64,
    /// Angular extent in radians
    pub sweep: f64,
    /// Share of the total, rounded to a whole percent
    pub percent: u32,
    /// Anchor of the percentage label
    pub label_position: Point,
    /// Fill color
    pub color: Color,
}

impl Slice {
    /// End angle in radians.
    #[must_use]
    pub fn end_angle(&self) -> f64 {
        self.start_angle + self.sweep
    }
}

/// Computed geometry for a doughnut chart.
#[derive(Debug, Clone, PartialEq)]
pub struct DoughnutLayout {
    /// Center of the ring
    pub center: Point,
    /// Outer radius
    pub outer_radius: f64,
    /// Inner radius (60% of outer)
    pub inner_radius: f64,
    /// Slices clockwise from 12 o'clock
    pub slices: Vec<Slice>,
}

/// Partition the full turn proportionally to each value's share.
pub fn doughnut_layout(dataset: &Dataset, options: &ChartOptions) -> Result<DoughnutLayout, ChartError> {
    if dataset.is_empty() {
        return Err(ChartError::EmptyDataset);
    }
    if let Some((index, p)) = dataset.points().iter().enumerate().find(|(_, p)| p.value < 0.0) {
        return Err(ChartError::NegativeValue {
            index,
            value: p.value,
        });
    }
    let total = dataset.total();
    if total <= 0.0 || !total.is_finite() {
        return Err(ChartError::ZeroTotal);
    }

    let center = options.size.center();
    let outer_radius = (f64::from(options.size.min_side()) / 2.0 - 20.0).max(0.0);
    let inner_radius = outer_radius * 0.6;
    let label_radius = (outer_radius + inner_radius) / 2.0;
    let turn = TAU * options.reveal();

    let mut angle = -FRAC_PI_2;
    let slices = dataset
        .points()
        .iter()
        .enumerate()
        .map(|(i, p)| {
            let share = p.value / total;
            let sweep = share * turn;
            let slice = Slice {
                label: p.label.clone(),
                value: p.value,
                start_angle: angle,
                sweep,
                percent: (share * 100.0).round() as u32,
                label_position: center.polar(sweep.mul_add(0.5, angle), label_radius),
                color: options.style.slice_color(i),
            };
            angle += sweep;
            slice
        })
        .collect();

    Ok(DoughnutLayout {
        center,
        outer_radius,
        inner_radius,
        slices,
    })
}

/// Clear the surface and draw a doughnut chart.
pub fn draw_doughnut_chart<C: Canvas + ?Sized>(
    canvas: &mut C,
    dataset: &Dataset,
    options: &ChartOptions,
) -> Result<(), ChartError> {
    let layout = doughnut_layout(dataset, options)?;
    canvas.clear();

    let label_style = TextStyle::new(12.0, options.style.text).align(TextAlign::Center);
    for slice in &layout.slices {
        canvas.fill_ring_segment(
            layout.center,
            layout.outer_radius as f32,
            layout.inner_radius as f32,
            slice.start_angle as f32,
            slice.end_angle() as f32,
            slice.color,
        );
        if options.show_labels {
            canvas.draw_text(&format!("{}%", slice.percent), slice.label_position, &label_style);
        }
    }

    if let Some(caption) = &options.caption {
        let bold = TextStyle::new(16.0, options.style.text)
            .weight(FontWeight::Bold)
            .align(TextAlign::Center);
        canvas.draw_text(caption, Point::new(layout.center.x, layout.center.y - 5.0), &bold);
    }
    if let Some(sub) = &options.subcaption {
        canvas.draw_text(sub, Point::new(layout.center.x, layout.center.y + 10.0), &label_style);
    }
    Ok(())
}

// =============================================================================
// Radar chart
// =============================================================================

/// One radar spoke.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RadarAxis {
    /// Skill name
    pub label: String,
    /// Normalized level in [0, 1]
    pub value: f64,
}

impl RadarAxis {
    /// Create an axis.
    #[must_use]
    pub fn new(label: impl Into<String>, value: f64) -> Self {
        Self {
            label: label.into(),
            value,
        }
    }

    /// Same axis with the value clamped into [0, 1].
    #[must_use]
    pub fn clamped(&self) -> Self {
        Self {
            label: self.label.clone(),
            value: if self.value.is_nan() {
                0.0
            } else {
                self.value.clamp(0.0, 1.0)
            },
        }
    }
}

/// Computed geometry for a radar chart.
#[derive(Debug, Clone, PartialEq)]
pub struct RadarLayout {
    /// Center
    pub center: Point,
    /// Outer radius
    pub radius: f64,
    /// Concentric grid polygons, innermost first
    pub grid: Vec<Vec<Point>>,
    /// Outer end of each spoke
    pub spokes: Vec<Point>,
    /// Data polygon
    pub polygon: Vec<Point>,
    /// Axis labels, anchors and alignment
    pub labels: Vec<(String, Point, TextAlign)>,
}

fn spoke_angle(i: usize, n: usize) -> f64 {
    (i as f64 / n as f64).mul_add(TAU, -FRAC_PI_2)
}

/// Lay out a radar chart. Values must already lie in [0, 1].
pub fn radar_layout(axes: &[RadarAxis], options: &ChartOptions) -> Result<RadarLayout, ChartError> {
    let n = axes.len();
    if n == 0 {
        return Err(ChartError::EmptyDataset);
    }
    if n < 3 {
        return Err(ChartError::TooFewAxes(n));
    }
    if let Some(bad) = axes.iter().find(|a| !(0.0..=1.0).contains(&a.value)) {
        return Err(ChartError::ValueOutOfRange {
            axis: bad.label.clone(),
            value: bad.value,
        });
    }

    let center = options.size.center();
    let radius = (f64::from(options.size.min_side()) / 2.0 - 30.0).max(0.0);
    let levels = options.radar_levels.max(1);
    let reveal = options.reveal();

    let grid = (1..=levels)
        .map(|level| {
            let r = radius / levels as f64 * level as f64;
            (0..n).map(|i| center.polar(spoke_angle(i, n), r)).collect()
        })
        .collect();
    let spokes = (0..n).map(|i| center.polar(spoke_angle(i, n), radius)).collect();
    let polygon = axes
        .iter()
        .enumerate()
        .map(|(i, a)| center.polar(spoke_angle(i, n), radius * a.value * reveal))
        .collect();
    let labels = axes
        .iter()
        .enumerate()
        .map(|(i, a)| {
            let anchor = center.polar(spoke_angle(i, n), radius + 15.0);
            let align = if (anchor.x - center.x).abs() < 0.5 {
                TextAlign::Center
            } else if anchor.x > center.x {
                TextAlign::Left
            } else {
                TextAlign::Right
            };
            (a.label.clone(), anchor, align)
        })
        .collect();

    Ok(RadarLayout {
        center,
        radius,
        grid,
        spokes,
        polygon,
        labels,
    })
}

/// Clear the surface and draw a radar chart.
pub fn draw_radar_chart<C: Canvas + ?Sized>(
    canvas: &mut C,
    axes: &[RadarAxis],
    options: &ChartOptions,
) -> Result<(), ChartError> {
    let layout = radar_layout(axes, options)?;
    let style = &options.style;
    canvas.clear();

    let grid = StrokeStyle::new(style.grid, 1.0);
    for ring in &layout.grid {
        canvas.draw_path(ring, true, grid);
    }
    for spoke in &layout.spokes {
        canvas.draw_line(layout.center, *spoke, grid);
    }

    canvas.fill_polygon(&layout.polygon, style.series_fill);
    canvas.draw_path(&layout.polygon, true, StrokeStyle::new(style.series, 2.0));

    if options.show_labels {
        for (label, anchor, align) in &layout.labels {
            let text = TextStyle::new(12.0, style.text).align(*align);
            canvas.draw_text(label, *anchor, &text);
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::canvas::RecordingCanvas;
    use crate::draw::DrawCommand;
    use proptest::prelude::*;

    fn options() -> ChartOptions {
        ChartOptions::new(Size::new(400.0, 300.0))
    }

    fn skills() -> Dataset {
        Dataset::from_pairs([
            ("Python", 35.0),
            ("JavaScript", 28.0),
            ("Data Science", 22.0),
            ("Web Dev", 18.0),
            ("AI/ML", 15.0),
            ("Cloud", 12.0),
        ])
    }

    fn radar_axes() -> Vec<RadarAxis> {
        vec![
            RadarAxis::new("Programming", 0.8),
            RadarAxis::new("Problem Solving", 0.7),
            RadarAxis::new("Collaboration", 0.9),
            RadarAxis::new("Communication", 0.6),
            RadarAxis::new("Leadership", 0.5),
        ]
    }

    // -------------------------------------------------------------------------
    // Dataset
    // -------------------------------------------------------------------------

    #[test]
    fn test_dataset_max_and_total() {
        let d = skills();
        assert_eq!(d.len(), 6);
        assert_eq!(d.max(), Some(35.0));
        assert_eq!(d.total(), 130.0);
        assert_eq!(Dataset::default().max(), None);
    }

    // -------------------------------------------------------------------------
    // Line chart
    // -------------------------------------------------------------------------

    #[test]
    fn test_line_layout_maps_points() {
        let d = Dataset::from_pairs([("Jan", 100.0), ("Feb", 50.0), ("Mar", 0.0)]);
        let layout = line_layout(&d, &options()).unwrap();
        // chart width 320, step 160; chart height 220
        assert_eq!(layout.points[0], Point::new(40.0, 40.0));
        assert_eq!(layout.points[1], Point::new(200.0, 150.0));
        assert_eq!(layout.points[2], Point::new(360.0, 260.0));
        assert_eq!(layout.labels[1].1, Point::new(200.0, 290.0));
    }

    #[test]
    fn test_line_layout_single_point() {
        let d = Dataset::from_pairs([("Only", 7.0)]);
        let layout = line_layout(&d, &options()).unwrap();
        assert_eq!(layout.points, vec![Point::new(40.0, 40.0)]);
    }

    #[test]
    fn test_line_layout_rejects_empty_and_zero_max() {
        assert_eq!(line_layout(&Dataset::default(), &options()), Err(ChartError::EmptyDataset));
        let zeros = Dataset::from_values(&[0.0, 0.0]);
        assert_eq!(
            line_layout(&zeros, &options()),
            Err(ChartError::NonPositiveMaximum(0.0))
        );
    }

    #[test]
    fn test_draw_line_chart_rejected_draws_nothing() {
        let mut canvas = RecordingCanvas::new(Size::new(400.0, 300.0));
        assert!(draw_line_chart(&mut canvas, &Dataset::default(), &options()).is_err());
        assert!(canvas.is_empty());
    }

    #[test]
    fn test_draw_line_chart_commands() {
        let mut canvas = RecordingCanvas::new(Size::new(400.0, 300.0));
        let d = Dataset::from_pairs([("Jan", 120.0), ("Feb", 150.0), ("Mar", 180.0)]);
        draw_line_chart(&mut canvas, &d, &options()).unwrap();

        assert!(matches!(canvas.commands()[0], DrawCommand::Clear));
        let circles = canvas
            .commands()
            .iter()
            .filter(|c| matches!(c, DrawCommand::Circle { .. }))
            .count();
        assert_eq!(circles, 3);
        assert_eq!(canvas.texts(), vec!["Jan", "Feb", "Mar"]);
        assert!(canvas.all_finite());
    }

    #[test]
    fn test_line_chart_hides_points_and_labels() {
        let mut canvas = RecordingCanvas::new(Size::new(400.0, 300.0));
        let mut opts = options();
        opts.show_points = false;
        opts.show_labels = false;
        opts.fill_area = true;
        draw_line_chart(&mut canvas, &Dataset::from_values(&[1.0, 2.0]), &opts).unwrap();
        assert!(canvas.texts().is_empty());
        assert!(canvas
            .commands()
            .iter()
            .any(|c| matches!(c, DrawCommand::Polygon { .. })));
        assert!(!canvas
            .commands()
            .iter()
            .any(|c| matches!(c, DrawCommand::Circle { .. })));
    }

    #[test]
    fn test_line_layout_animated_starts_on_baseline() {
        let d = Dataset::from_values(&[10.0, 20.0]);
        let layout = line_layout(&d, &options().animated(0.0)).unwrap();
        assert!(layout.points.iter().all(|p| (p.y - 260.0).abs() < 0.001));
    }

    // -------------------------------------------------------------------------
    // Doughnut chart
    // -------------------------------------------------------------------------

    #[test]
    fn test_doughnut_first_slice_angle_and_label() {
        let layout = doughnut_layout(&skills(), &options()).unwrap();
        let first = &layout.slices[0];
        assert!((first.start_angle + FRAC_PI_2).abs() < 1e-12);
        assert!((first.sweep - 35.0 / 130.0 * TAU).abs() < 1e-12);
        assert!((first.sweep - 1.692).abs() < 0.001);
        assert_eq!(first.percent, 27);
    }

    #[test]
    fn test_doughnut_radii() {
        let layout = doughnut_layout(&skills(), &options()).unwrap();
        assert_eq!(layout.outer_radius, 130.0);
        assert!((layout.inner_radius - 78.0).abs() < 1e-9);
        assert_eq!(layout.center, Point::new(200.0, 150.0));
    }

    #[test]
    fn test_doughnut_label_at_slice_midpoint() {
        let d = Dataset::from_values(&[1.0, 1.0]);
        let layout = doughnut_layout(&d, &options()).unwrap();
        // First half spans 12 o'clock to 6 o'clock clockwise; midpoint is 3 o'clock.
        let label = layout.slices[0].label_position;
        let mid_radius = ((layout.outer_radius + layout.inner_radius) / 2.0) as f32;
        assert!((label.x - (200.0 + mid_radius)).abs() < 0.01);
        assert!((label.y - 150.0).abs() < 0.01);
    }

    #[test]
    fn test_doughnut_rejects_invalid() {
        assert_eq!(
            doughnut_layout(&Dataset::default(), &options()),
            Err(ChartError::EmptyDataset)
        );
        assert_eq!(
            doughnut_layout(&Dataset::from_values(&[0.0, 0.0]), &options()),
            Err(ChartError::ZeroTotal)
        );
        assert_eq!(
            doughnut_layout(&Dataset::from_values(&[3.0, -1.0]), &options()),
            Err(ChartError::NegativeValue {
                index: 1,
                value: -1.0
            })
        );
    }

    #[test]
    fn test_draw_doughnut_chart_labels() {
        let mut canvas = RecordingCanvas::new(Size::new(400.0, 300.0));
        let opts = options().with_caption("Skills", "Distribution");
        draw_doughnut_chart(&mut canvas, &skills(), &opts).unwrap();
        let texts = canvas.texts();
        assert_eq!(texts[0], "27%");
        assert!(texts.contains(&"Skills"));
        assert!(texts.contains(&"Distribution"));
        let rings = canvas
            .commands()
            .iter()
            .filter(|c| matches!(c, DrawCommand::Ring { .. }))
            .count();
        assert_eq!(rings, 6);
    }

    #[test]
    fn test_draw_doughnut_zero_total_draws_nothing() {
        let mut canvas = RecordingCanvas::new(Size::new(400.0, 300.0));
        let result = draw_doughnut_chart(&mut canvas, &Dataset::from_values(&[0.0]), &options());
        assert_eq!(result, Err(ChartError::ZeroTotal));
        assert!(canvas.is_empty());
    }

    // -------------------------------------------------------------------------
    // Radar chart
    // -------------------------------------------------------------------------

    #[test]
    fn test_radar_layout_shape() {
        let layout = radar_layout(&radar_axes(), &options()).unwrap();
        assert_eq!(layout.grid.len(), 5);
        assert!(layout.grid.iter().all(|ring| ring.len() == 5));
        assert_eq!(layout.spokes.len(), 5);
        assert_eq!(layout.radius, 120.0);

        // First spoke points straight up.
        let top = layout.spokes[0];
        assert!((top.x - 200.0).abs() < 0.001);
        assert!((top.y - 30.0).abs() < 0.001);

        // First data vertex sits at 0.8 of the radius.
        let v = layout.polygon[0];
        assert!((150.0 - v.y - 96.0).abs() < 0.001);
        assert_eq!(layout.labels[0].2, TextAlign::Center);
        assert_eq!(layout.labels[1].2, TextAlign::Left);
        assert_eq!(layout.labels[4].2, TextAlign::Right);
    }

    #[test]
    fn test_radar_rejects_out_of_range() {
        let mut axes = radar_axes();
        axes[2].value = 1.2;
        let err = radar_layout(&axes, &options()).unwrap_err();
        assert_eq!(
            err,
            ChartError::ValueOutOfRange {
                axis: "Collaboration".to_string(),
                value: 1.2
            }
        );

        let clamped: Vec<_> = axes.iter().map(RadarAxis::clamped).collect();
        assert!(radar_layout(&clamped, &options()).is_ok());
    }

    #[test]
    fn test_radar_needs_three_axes() {
        let axes = vec![RadarAxis::new("A", 0.5), RadarAxis::new("B", 0.5)];
        assert_eq!(radar_layout(&axes, &options()), Err(ChartError::TooFewAxes(2)));
        assert_eq!(radar_layout(&[], &options()), Err(ChartError::EmptyDataset));
    }

    #[test]
    fn test_draw_radar_chart() {
        let mut canvas = RecordingCanvas::new(Size::new(200.0, 200.0));
        draw_radar_chart(&mut canvas, &radar_axes(), &ChartOptions::new(Size::new(200.0, 200.0))).unwrap();
        assert!(matches!(canvas.commands()[0], DrawCommand::Clear));
        assert_eq!(canvas.texts().len(), 5);
        assert!(canvas.all_finite());
    }

    proptest! {
        #[test]
        fn prop_line_chart_coordinates_finite(values in prop::collection::vec(0.0f64..1e6, 1..40)) {
            prop_assume!(values.iter().any(|v| *v > 0.0));
            let mut canvas = RecordingCanvas::new(Size::new(400.0, 300.0));
            draw_line_chart(&mut canvas, &Dataset::from_values(&values), &options()).unwrap();
            prop_assert!(canvas.all_finite());
        }

        #[test]
        fn prop_doughnut_angles_sum_to_full_turn(values in prop::collection::vec(0.0f64..1e4, 1..30)) {
            let total: f64 = values.iter().sum();
            prop_assume!(total > 0.0);
            let layout = doughnut_layout(&Dataset::from_values(&values), &options()).unwrap();
            let sweep: f64 = layout.slices.iter().map(|s| s.sweep).sum();
            prop_assert!((sweep - TAU).abs() < 1e-9);

            let percent: i64 = layout.slices.iter().map(|s| i64::from(s.percent)).sum();
            let tolerance = (values.len() as i64 + 1) / 2;
            prop_assert!((percent - 100).abs() <= tolerance);
        }
    }
}
