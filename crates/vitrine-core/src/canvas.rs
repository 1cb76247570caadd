//! The drawing-surface seam and its recording implementation.

use crate::draw::{DrawCommand, StrokeStyle, TextStyle};
use crate::{Color, Point, Rect, Size};

/// Canvas-2D-equivalent drawing surface.
///
/// Chart and scene painters depend only on this trait, so they run against a
/// [`RecordingCanvas`] in tests and against the browser context in production.
pub trait Canvas {
    /// Surface dimensions in pixels.
    fn size(&self) -> Size;

    /// Clear the entire surface.
    fn clear(&mut self);

    /// Fill a rectangle.
    fn fill_rect(&mut self, rect: Rect, color: Color);

    /// Draw a line between two points.
    fn draw_line(&mut self, from: Point, to: Point, style: StrokeStyle);

    /// Stroke a polyline, closing it back to the first point if `closed`.
    fn draw_path(&mut self, points: &[Point], closed: bool, style: StrokeStyle);

    /// Fill a polygon.
    fn fill_polygon(&mut self, points: &[Point], color: Color);

    /// Fill a circle.
    fn fill_circle(&mut self, center: Point, radius: f32, color: Color);

    /// Fill a pie slice.
    fn fill_arc(&mut self, center: Point, radius: f32, start_angle: f32, end_angle: f32, color: Color);

    /// Fill an annular sector between `inner_radius` and `outer_radius`.
    fn fill_ring_segment(
        &mut self,
        center: Point,
        outer_radius: f32,
        inner_radius: f32,
        start_angle: f32,
        end_angle: f32,
        color: Color,
    );

    /// Draw text anchored at `position` according to `style.align`.
    fn draw_text(&mut self, text: &str, position: Point, style: &TextStyle);

    /// Width of `text` in pixels when drawn with `style`.
    fn measure_text(&self, text: &str, style: &TextStyle) -> f32;
}

/// A Canvas implementation that records draw operations as `DrawCommand`s.
///
/// Used for testing (verify what was painted) and by the browser renderer,
/// which replays the recorded commands on a 2D context.
#[derive(Debug, Default)]
pub struct RecordingCanvas {
    size: Size,
    commands: Vec<DrawCommand>,
}

impl RecordingCanvas {
    /// Average glyph advance as a fraction of the font size.
    pub const GLYPH_ADVANCE: f32 = 0.6;

    /// Create a new empty recording canvas of the given size.
    #[must_use]
    pub fn new(size: Size) -> Self {
        Self {
            size,
            commands: Vec::new(),
        }
    }

    /// Get the recorded draw commands.
    #[must_use]
    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    /// Take ownership of the recorded commands, clearing the canvas.
    pub fn take_commands(&mut self) -> Vec<DrawCommand> {
        std::mem::take(&mut self.commands)
    }

    /// Get the number of recorded commands.
    #[must_use]
    pub fn command_count(&self) -> usize {
        self.commands.len()
    }

    /// Check if no commands have been recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Every recorded command has finite coordinates.
    #[must_use]
    pub fn all_finite(&self) -> bool {
        self.commands.iter().all(DrawCommand::is_finite)
    }

    /// Text content of every recorded `Text` command, in order.
    #[must_use]
    pub fn texts(&self) -> Vec<&str> {
        self.commands
            .iter()
            .filter_map(|cmd| match cmd {
                DrawCommand::Text { content, .. } => Some(content.as_str()),
                _ => None,
            })
            .collect()
    }

    /// Add a raw draw command.
    pub fn add_command(&mut self, command: DrawCommand) {
        self.commands.push(command);
    }
}

impl Canvas for RecordingCanvas {
    fn size(&self) -> Size {
        self.size
    }

    fn clear(&mut self) {
        self.commands.push(DrawCommand::Clear);
    }

    fn fill_rect(&mut self, rect: Rect, color: Color) {
        self.commands.push(DrawCommand::Rect {
            bounds: rect,
            color,
        });
    }

    fn draw_line(&mut self, from: Point, to: Point, style: StrokeStyle) {
        self.commands.push(DrawCommand::line(from, to, style));
    }

    fn draw_path(&mut self, points: &[Point], closed: bool, style: StrokeStyle) {
        self.commands.push(DrawCommand::Path {
            points: points.to_vec(),
            closed,
            style,
        });
    }

    fn fill_polygon(&mut self, points: &[Point], color: Color) {
        self.commands.push(DrawCommand::Polygon {
            points: points.to_vec(),
            color,
        });
    }

    fn fill_circle(&mut self, center: Point, radius: f32, color: Color) {
        self.commands.push(DrawCommand::Circle {
            center,
            radius,
            color,
        });
    }

    fn fill_arc(&mut self, center: Point, radius: f32, start_angle: f32, end_angle: f32, color: Color) {
        self.commands.push(DrawCommand::Arc {
            center,
            radius,
            start_angle,
            end_angle,
            color,
        });
    }

    fn fill_ring_segment(
        &mut self,
        center: Point,
        outer_radius: f32,
        inner_radius: f32,
        start_angle: f32,
        end_angle: f32,
        color: Color,
    ) {
        self.commands.push(DrawCommand::Ring {
            center,
            outer_radius,
            inner_radius,
            start_angle,
            end_angle,
            color,
        });
    }

    fn draw_text(&mut self, text: &str, position: Point, style: &TextStyle) {
        self.commands.push(DrawCommand::Text {
            content: text.to_string(),
            position,
            style: *style,
        });
    }

    fn measure_text(&self, text: &str, style: &TextStyle) -> f32 {
        text.chars().count() as f32 * style.size * Self::GLYPH_ADVANCE
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::draw::TextAlign;

    fn canvas() -> RecordingCanvas {
        RecordingCanvas::new(Size::new(200.0, 100.0))
    }

    #[test]
    fn test_recording_canvas_new() {
        let canvas = canvas();
        assert!(canvas.is_empty());
        assert_eq!(canvas.command_count(), 0);
        assert_eq!(canvas.size(), Size::new(200.0, 100.0));
    }

    #[test]
    fn test_clear_records_command() {
        let mut canvas = canvas();
        canvas.clear();
        assert_eq!(canvas.commands(), &[DrawCommand::Clear]);
    }

    #[test]
    fn test_fill_ring_segment() {
        let mut canvas = canvas();
        canvas.fill_ring_segment(Point::new(50.0, 50.0), 40.0, 24.0, 0.0, 1.0, Color::WHITE);
        match &canvas.commands()[0] {
            DrawCommand::Ring {
                outer_radius,
                inner_radius,
                ..
            } => {
                assert_eq!(*outer_radius, 40.0);
                assert_eq!(*inner_radius, 24.0);
            }
            _ => panic!("Expected Ring command"),
        }
    }

    #[test]
    fn test_draw_text_and_texts() {
        let mut canvas = canvas();
        let style = TextStyle::new(14.0, Color::BLACK).align(TextAlign::Center);
        canvas.draw_text("Hello", Point::new(10.0, 20.0), &style);
        canvas.fill_circle(Point::ORIGIN, 2.0, Color::BLACK);
        canvas.draw_text("World", Point::new(10.0, 40.0), &style);
        assert_eq!(canvas.texts(), vec!["Hello", "World"]);
    }

    #[test]
    fn test_measure_text_scales_with_size() {
        let canvas = canvas();
        let small = canvas.measure_text("abcd", &TextStyle::new(10.0, Color::BLACK));
        let large = canvas.measure_text("abcd", &TextStyle::new(20.0, Color::BLACK));
        assert!((small - 24.0).abs() < 0.001);
        assert!((large - 2.0 * small).abs() < 0.001);
    }

    #[test]
    fn test_take_commands() {
        let mut canvas = canvas();
        canvas.fill_rect(Rect::new(0.0, 0.0, 1.0, 1.0), Color::BLACK);
        let taken = canvas.take_commands();
        assert_eq!(taken.len(), 1);
        assert!(canvas.is_empty());
    }

    #[test]
    fn test_multiple_commands_order() {
        let mut canvas = canvas();
        canvas.clear();
        canvas.draw_path(&[Point::ORIGIN, Point::new(5.0, 5.0)], false, StrokeStyle::default());
        canvas.fill_polygon(&[Point::ORIGIN, Point::new(5.0, 0.0), Point::new(0.0, 5.0)], Color::WHITE);
        assert!(matches!(canvas.commands()[0], DrawCommand::Clear));
        assert!(matches!(canvas.commands()[1], DrawCommand::Path { .. }));
        assert!(matches!(canvas.commands()[2], DrawCommand::Polygon { .. }));
        assert!(canvas.all_finite());
    }
}
