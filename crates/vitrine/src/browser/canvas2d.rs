//! Canvas2D renderer - replays `DrawCommand`s on an HTML5 canvas.

use std::f64::consts::TAU;
use vitrine_core::{Color, DrawCommand, FontWeight, Point, Rect, Size, StrokeStyle, TextAlign, TextStyle};
use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

/// Renderer that draws to an HTML5 Canvas 2D context.
pub struct Canvas2DRenderer {
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
}

impl Canvas2DRenderer {
    /// Create a new renderer for the given canvas element.
    pub fn new(canvas: HtmlCanvasElement) -> Result<Self, String> {
        let ctx = canvas
            .get_context("2d")
            .map_err(|e| format!("Failed to get 2d context: {e:?}"))?
            .ok_or("No 2d context available")?
            .dyn_into::<CanvasRenderingContext2d>()
            .map_err(|_| "Failed to cast to CanvasRenderingContext2d")?;

        Ok(Self { canvas, ctx })
    }

    /// The canvas element.
    pub fn canvas(&self) -> &HtmlCanvasElement {
        &self.canvas
    }

    /// Backing-store size in pixels.
    pub fn size(&self) -> Size {
        Size::new(self.canvas.width() as f32, self.canvas.height() as f32)
    }

    /// Match the backing store to the element's laid-out size.
    ///
    /// Returns `true` when the size changed.
    pub fn fit_to_element(&self) -> bool {
        let width = self.canvas.client_width().max(0) as u32;
        let height = self.canvas.client_height().max(0) as u32;
        if width == self.canvas.width() && height == self.canvas.height() {
            return false;
        }
        self.canvas.set_width(width);
        self.canvas.set_height(height);
        true
    }

    /// Render a list of draw commands.
    pub fn render(&self, commands: &[DrawCommand]) {
        for cmd in commands {
            self.render_command(cmd);
        }
    }

    fn render_command(&self, cmd: &DrawCommand) {
        match cmd {
            DrawCommand::Clear => self.clear(),
            DrawCommand::Path { points, closed, style } => self.draw_path(points, *closed, style),
            DrawCommand::Polygon { points, color } => self.fill_polygon(points, color),
            DrawCommand::Rect { bounds, color } => self.fill_rect(bounds, color),
            DrawCommand::Circle { center, radius, color } => self.fill_circle(center, *radius, color),
            DrawCommand::Arc {
                center,
                radius,
                start_angle,
                end_angle,
                color,
            } => self.fill_arc(center, *radius, *start_angle, *end_angle, color),
            DrawCommand::Ring {
                center,
                outer_radius,
                inner_radius,
                start_angle,
                end_angle,
                color,
            } => self.fill_ring(
                center,
                *outer_radius,
                *inner_radius,
                (*start_angle, *end_angle),
                color,
            ),
            DrawCommand::Text {
                content,
                position,
                style,
            } => self.draw_text(content, position, style),
        }
    }

    fn clear(&self) {
        self.ctx.clear_rect(
            0.0,
            0.0,
            f64::from(self.canvas.width()),
            f64::from(self.canvas.height()),
        );
    }

    fn trace(&self, points: &[Point]) -> bool {
        let Some((first, rest)) = points.split_first() else {
            return false;
        };
        self.ctx.begin_path();
        self.ctx.move_to(f64::from(first.x), f64::from(first.y));
        for p in rest {
            self.ctx.line_to(f64::from(p.x), f64::from(p.y));
        }
        true
    }

    fn draw_path(&self, points: &[Point], closed: bool, style: &StrokeStyle) {
        if !self.trace(points) {
            return;
        }
        if closed {
            self.ctx.close_path();
        }
        self.ctx.set_stroke_style_str(&style.color.to_css());
        self.ctx.set_line_width(f64::from(style.width));
        self.ctx.stroke();
    }

    fn fill_polygon(&self, points: &[Point], color: &Color) {
        if !self.trace(points) {
            return;
        }
        self.ctx.close_path();
        self.ctx.set_fill_style_str(&color.to_css());
        self.ctx.fill();
    }

    fn fill_rect(&self, bounds: &Rect, color: &Color) {
        self.ctx.set_fill_style_str(&color.to_css());
        self.ctx.fill_rect(
            f64::from(bounds.x),
            f64::from(bounds.y),
            f64::from(bounds.width),
            f64::from(bounds.height),
        );
    }

    fn fill_circle(&self, center: &Point, radius: f32, color: &Color) {
        self.ctx.begin_path();
        self.ctx
            .arc(f64::from(center.x), f64::from(center.y), f64::from(radius), 0.0, TAU)
            .ok();
        self.ctx.set_fill_style_str(&color.to_css());
        self.ctx.fill();
    }

    fn fill_arc(&self, center: &Point, radius: f32, start_angle: f32, end_angle: f32, color: &Color) {
        self.ctx.begin_path();
        self.ctx.move_to(f64::from(center.x), f64::from(center.y));
        self.ctx
            .arc(
                f64::from(center.x),
                f64::from(center.y),
                f64::from(radius),
                f64::from(start_angle),
                f64::from(end_angle),
            )
            .ok();
        self.ctx.close_path();
        self.ctx.set_fill_style_str(&color.to_css());
        self.ctx.fill();
    }

    fn fill_ring(&self, center: &Point, outer: f32, inner: f32, (start, end): (f32, f32), color: &Color) {
        let (x, y) = (f64::from(center.x), f64::from(center.y));
        self.ctx.begin_path();
        self.ctx
            .arc(x, y, f64::from(outer), f64::from(start), f64::from(end))
            .ok();
        self.ctx
            .arc_with_anticlockwise(x, y, f64::from(inner), f64::from(end), f64::from(start), true)
            .ok();
        self.ctx.close_path();
        self.ctx.set_fill_style_str(&color.to_css());
        self.ctx.fill();
    }

    fn draw_text(&self, content: &str, position: &Point, style: &TextStyle) {
        let weight = match style.weight {
            FontWeight::Bold => "bold",
            FontWeight::Normal => "normal",
        };
        let align = match style.align {
            TextAlign::Left => "left",
            TextAlign::Center => "center",
            TextAlign::Right => "right",
        };
        self.ctx.set_font(&format!("{weight} {}px sans-serif", style.size));
        self.ctx.set_text_align(align);
        self.ctx.set_fill_style_str(&style.color.to_css());
        self.ctx
            .fill_text(content, f64::from(position.x), f64::from(position.y))
            .ok();
    }
}
