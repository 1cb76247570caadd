//! Draw commands.
//!
//! Every chart and scene paint reduces to these primitives. They are recorded by
//! [`crate::RecordingCanvas`] and replayed by the browser renderer.

use crate::{Color, Point, Rect};
use serde::{Deserialize, Serialize};

/// Stroke style for lines and outlines.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StrokeStyle {
    /// Stroke color
    pub color: Color,
    /// Stroke width in pixels
    pub width: f32,
}

impl StrokeStyle {
    /// Create a stroke style.
    #[must_use]
    pub const fn new(color: Color, width: f32) -> Self {
        Self { color, width }
    }
}

impl Default for StrokeStyle {
    fn default() -> Self {
        Self {
            color: Color::BLACK,
            width: 1.0,
        }
    }
}

/// Font weight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum FontWeight {
    /// Normal (400)
    #[default]
    Normal,
    /// Bold (700)
    Bold,
}

/// Horizontal anchor of a text run relative to its position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum TextAlign {
    /// Position is the left edge
    #[default]
    Left,
    /// Position is the horizontal center
    Center,
    /// Position is the right edge
    Right,
}

/// Text style for rendering.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TextStyle {
    /// Font size in pixels
    pub size: f32,
    /// Text color
    pub color: Color,
    /// Font weight
    pub weight: FontWeight,
    /// Horizontal alignment
    pub align: TextAlign,
}

impl TextStyle {
    /// Regular text of the given size and color.
    #[must_use]
    pub const fn new(size: f32, color: Color) -> Self {
        Self {
            size,
            color,
            weight: FontWeight::Normal,
            align: TextAlign::Left,
        }
    }

    /// Set weight.
    #[must_use]
    pub const fn weight(mut self, weight: FontWeight) -> Self {
        self.weight = weight;
        self
    }

    /// Set alignment.
    #[must_use]
    pub const fn align(mut self, align: TextAlign) -> Self {
        self.align = align;
        self
    }
}

impl Default for TextStyle {
    fn default() -> Self {
        Self::new(12.0, Color::BLACK)
    }
}

/// Drawing primitive.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum DrawCommand {
    /// Clear the whole surface
    Clear,
    /// Stroke a polyline, optionally closed
    Path {
        /// Points defining the path
        points: Vec<Point>,
        /// Whether the path is closed
        closed: bool,
        /// Stroke style
        style: StrokeStyle,
    },
    /// Fill a polygon
    Polygon {
        /// Vertices in order
        points: Vec<Point>,
        /// Fill color
        color: Color,
    },
    /// Fill a rectangle
    Rect {
        /// Rectangle bounds
        bounds: Rect,
        /// Fill color
        color: Color,
    },
    /// Fill a circle
    Circle {
        /// Center point
        center: Point,
        /// Radius
        radius: f32,
        /// Fill color
        color: Color,
    },
    /// Fill a pie slice
    Arc {
        /// Center point
        center: Point,
        /// Radius
        radius: f32,
        /// Start angle (radians)
        start_angle: f32,
        /// End angle (radians)
        end_angle: f32,
        /// Fill color
        color: Color,
    },
    /// Fill an annular sector (doughnut slice)
    Ring {
        /// Center point
        center: Point,
        /// Outer radius
        outer_radius: f32,
        /// Inner radius
        inner_radius: f32,
        /// Start angle (radians)
        start_angle: f32,
        /// End angle (radians)
        end_angle: f32,
        /// Fill color
        color: Color,
    },
    /// Draw text
    Text {
        /// Text content
        content: String,
        /// Anchor position (baseline)
        position: Point,
        /// Text style
        style: TextStyle,
    },
}

impl DrawCommand {
    /// Create a line between two points.
    #[must_use]
    pub fn line(from: Point, to: Point, style: StrokeStyle) -> Self {
        Self::Path {
            points: vec![from, to],
            closed: false,
            style,
        }
    }

    /// Every coordinate carried by the command is finite.
    #[must_use]
    pub fn is_finite(&self) -> bool {
        match self {
            Self::Clear => true,
            Self::Path { points, .. } | Self::Polygon { points, .. } => {
                points.iter().all(Point::is_finite)
            }
            Self::Rect { bounds, .. } => {
                bounds.x.is_finite()
                    && bounds.y.is_finite()
                    && bounds.width.is_finite()
                    && bounds.height.is_finite()
            }
            Self::Circle { center, radius, .. } => center.is_finite() && radius.is_finite(),
            Self::Arc {
                center,
                radius,
                start_angle,
                end_angle,
                ..
            } => {
                center.is_finite()
                    && radius.is_finite()
                    && start_angle.is_finite()
                    && end_angle.is_finite()
            }
            Self::Ring {
                center,
                outer_radius,
                inner_radius,
                start_angle,
                end_angle,
                ..
            } => {
                center.is_finite()
                    && outer_radius.is_finite()
                    && inner_radius.is_finite()
                    && start_angle.is_finite()
                    && end_angle.is_finite()
            }
            Self::Text { position, .. } => position.is_finite(),
        }
    }
}
