//! Animated scene objects and the 2-D knowledge-graph painter.
//!
//! Scene objects carry per-frame animation state (sway, pulse, path flow)
//! keyed by elapsed seconds. The painter draws the skill-node graph with
//! pulsing nodes, all-pairs connections and a field of ambient dots.

use crate::canvas::Canvas;
use crate::draw::{FontWeight, StrokeStyle, TextAlign, TextStyle};
use crate::{Color, Point, Rect};
use glam::Vec3;
use serde::{Deserialize, Serialize};

/// Number of ambient floating dots.
pub const AMBIENT_DOT_COUNT: usize = 50;

/// Base radius of a skill node before pulsing.
pub const NODE_RADIUS: f32 = 30.0;

// =============================================================================
// Scene objects
// =============================================================================

/// Per-object animation kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ObjectAnimation {
    /// Rock gently about the z axis
    GentleSway,
    /// Breathe in and out
    Pulse,
    /// Scroll along a path
    Flow,
    /// No animation
    Static,
}

/// An object in the showcase scene.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SceneObject {
    /// Identifier
    pub name: String,
    /// World position
    pub position: Vec3,
    /// Base color
    pub color: Color,
    /// Animation kind
    pub animation: ObjectAnimation,
    /// Rotation about z in radians
    pub rotation_z: f32,
    /// Uniform scale
    pub scale: f32,
    /// Accumulated path offset
    pub flow_offset: f32,
}

impl SceneObject {
    /// Create an object at rest.
    #[must_use]
    pub fn new(name: impl Into<String>, position: Vec3, color: Color, animation: ObjectAnimation) -> Self {
        Self {
            name: name.into(),
            position,
            color,
            animation,
            rotation_z: 0.0,
            scale: 1.0,
            flow_offset: 0.0,
        }
    }

    /// Update animation state for `time` seconds since start.
    pub fn animate(&mut self, time: f64) {
        match self.animation {
            ObjectAnimation::GentleSway => self.rotation_z = ((time * 0.5).sin() * 0.1) as f32,
            ObjectAnimation::Pulse => self.scale = (1.0 + (time * 2.0).sin() * 0.1) as f32,
            ObjectAnimation::Flow => self.flow_offset += 0.02,
            ObjectAnimation::Static => {}
        }
    }
}

/// The default scene: a swaying knowledge tree, five pulsing skill spheres and
/// a flowing learning path.
#[must_use]
pub fn standard_objects() -> Vec<SceneObject> {
    let mut objects = vec![SceneObject::new(
        "knowledge-tree",
        Vec3::ZERO,
        Color::rgb(0.4, 0.7, 0.4),
        ObjectAnimation::GentleSway,
    )];
    let skills = [
        ("skill-python", Vec3::new(-2.0, 1.0, 0.0), Color::rgb(0.2, 0.6, 1.0)),
        ("skill-javascript", Vec3::new(2.0, 1.0, 0.0), Color::rgb(1.0, 0.8, 0.2)),
        ("skill-data-science", Vec3::new(0.0, 2.0, -1.0), Color::rgb(0.6, 1.0, 0.4)),
        ("skill-machine-learning", Vec3::new(-1.0, 0.5, 1.0), Color::rgb(1.0, 0.4, 0.8)),
        ("skill-web-development", Vec3::new(1.0, 0.5, 1.0), Color::rgb(0.8, 0.2, 1.0)),
    ];
    objects.extend(
        skills
            .into_iter()
            .map(|(name, position, color)| SceneObject::new(name, position, color, ObjectAnimation::Pulse)),
    );
    objects.push(SceneObject::new(
        "learning-path",
        Vec3::ZERO,
        Color::rgb(0.4, 0.8, 1.0),
        ObjectAnimation::Flow,
    ));
    objects
}

// =============================================================================
// Knowledge graph (2-D)
// =============================================================================

/// A node of the 2-D skill graph, positioned relative to the surface center.
#[derive(Debug, Clone, PartialEq)]
pub struct SkillNode {
    /// Label
    pub name: &'static str,
    /// Offset from the surface center
    pub offset: Point,
    /// Fill color
    pub color: Color,
}

impl SkillNode {
    /// Pulsing radius of the `index`th node at `time` seconds.
    #[must_use]
    pub fn radius(time: f64, index: usize) -> f32 {
        NODE_RADIUS * (1.0 + 0.2 * (time * 2.0 + index as f64).sin()) as f32
    }
}

/// The five showcase skills.
#[must_use]
pub fn skill_nodes() -> Vec<SkillNode> {
    vec![
        SkillNode {
            name: "Python",
            offset: Point::new(-150.0, -50.0),
            color: Color::from_rgba8(0x34, 0x98, 0xdb, 1.0),
        },
        SkillNode {
            name: "JavaScript",
            offset: Point::new(150.0, -50.0),
            color: Color::from_rgba8(0xf1, 0xc4, 0x0f, 1.0),
        },
        SkillNode {
            name: "Data Science",
            offset: Point::new(0.0, -120.0),
            color: Color::from_rgba8(0x2e, 0xcc, 0x71, 1.0),
        },
        SkillNode {
            name: "ML",
            offset: Point::new(-75.0, 80.0),
            color: Color::from_rgba8(0xe9, 0x1e, 0x63, 1.0),
        },
        SkillNode {
            name: "Web Dev",
            offset: Point::new(75.0, 80.0),
            color: Color::from_rgba8(0x9c, 0x27, 0xb0, 1.0),
        },
    ]
}

/// Index pairs `(i, j)` with `i < j` for `n` nodes.
pub fn connections(n: usize) -> impl Iterator<Item = (usize, usize)> {
    (0..n).flat_map(move |i| ((i + 1)..n).map(move |j| (i, j)))
}

/// One ambient dot.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AmbientDot {
    /// Center
    pub center: Point,
    /// Radius in pixels
    pub radius: f32,
    /// Fill
    pub color: Color,
}

/// The ambient dot field at `time` seconds around `center`.
#[must_use]
pub fn ambient_dots(time: f64, center: Point) -> Vec<AmbientDot> {
    (0..AMBIENT_DOT_COUNT)
        .map(|i| {
            let k = i as f64;
            let x = (time * 0.5 + k).sin() * 200.0;
            let y = (k.mul_add(0.5, time * 0.3)).cos() * 150.0;
            let radius = (time * 2.0 + k).sin() * 2.0 + 3.0;
            let alpha = (time + k).sin() * 0.5 + 0.5;
            let hue = k.mul_add(10.0, time * 30.0);
            AmbientDot {
                center: Point::new(center.x + x as f32, center.y + y as f32),
                radius: radius as f32,
                color: Color::from_hsla(hue as f32, 0.7, 0.6, alpha as f32),
            }
        })
        .collect()
}

/// Paint the dark background with a slowly shifting center glow.
pub fn paint_background<C: Canvas + ?Sized>(canvas: &mut C, time: f64) {
    let size = canvas.size();
    canvas.fill_rect(Rect::from_size(size), Color::from_hsla(240.0, 0.8, 0.05, 1.0));
    let hue = (time.sin() * 30.0 + 210.0) as f32;
    canvas.fill_circle(
        size.center(),
        size.width.max(size.height) / 2.0,
        Color::from_hsla(hue, 0.7, 0.2, 0.8),
    );
}

/// Paint the skill graph and ambient dots.
pub fn paint_knowledge_graph<C: Canvas + ?Sized>(canvas: &mut C, time: f64) {
    let center = canvas.size().center();
    let nodes = skill_nodes();
    let at = |node: &SkillNode| center + node.offset;

    let link = StrokeStyle::new(Color::WHITE.with_alpha(0.3), 2.0);
    for (i, j) in connections(nodes.len()) {
        canvas.draw_line(at(&nodes[i]), at(&nodes[j]), link);
    }

    let label = TextStyle::new(14.0, Color::WHITE)
        .weight(FontWeight::Bold)
        .align(TextAlign::Center);
    for (i, node) in nodes.iter().enumerate() {
        let pos = at(node);
        let radius = SkillNode::radius(time, i);
        canvas.fill_circle(pos, radius * 2.0, node.color.with_alpha(0.2));
        canvas.fill_circle(pos, radius, node.color);
        canvas.draw_text(node.name, Point::new(pos.x, pos.y + 5.0), &label);
    }

    for dot in ambient_dots(time, center) {
        canvas.fill_circle(dot.center, dot.radius, dot.color);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::canvas::RecordingCanvas;
    use crate::draw::DrawCommand;
    use crate::Size;

    #[test]
    fn test_sway_and_pulse() {
        let mut tree = SceneObject::new("t", Vec3::ZERO, Color::WHITE, ObjectAnimation::GentleSway);
        tree.animate(std::f64::consts::PI);
        assert!((tree.rotation_z - 0.1).abs() < 1e-6);

        let mut node = SceneObject::new("n", Vec3::ZERO, Color::WHITE, ObjectAnimation::Pulse);
        node.animate(std::f64::consts::FRAC_PI_4);
        assert!((node.scale - 1.1).abs() < 1e-6);
    }

    #[test]
    fn test_flow_accumulates_per_frame() {
        let mut path = SceneObject::new("p", Vec3::ZERO, Color::WHITE, ObjectAnimation::Flow);
        for _ in 0..50 {
            path.animate(0.0);
        }
        assert!((path.flow_offset - 1.0).abs() < 1e-4);
    }

    #[test]
    fn test_static_is_untouched() {
        let mut obj = SceneObject::new("s", Vec3::ZERO, Color::WHITE, ObjectAnimation::Static);
        obj.animate(12.3);
        assert_eq!(obj.scale, 1.0);
        assert_eq!(obj.rotation_z, 0.0);
    }

    #[test]
    fn test_standard_objects() {
        let objects = standard_objects();
        assert_eq!(objects.len(), 7);
        assert_eq!(objects[0].animation, ObjectAnimation::GentleSway);
        assert_eq!(
            objects.iter().filter(|o| o.animation == ObjectAnimation::Pulse).count(),
            5
        );
    }

    #[test]
    fn test_node_radius_bounds() {
        for i in 0..5 {
            for step in 0..100 {
                let r = SkillNode::radius(f64::from(step) * 0.1, i);
                assert!((24.0 - 1e-4..=36.0 + 1e-4).contains(&r));
            }
        }
        assert!((SkillNode::radius(0.0, 0) - 30.0).abs() < 1e-6);
    }

    #[test]
    fn test_connections_all_pairs() {
        let pairs: Vec<_> = connections(5).collect();
        assert_eq!(pairs.len(), 10);
        assert!(pairs.iter().all(|(i, j)| i < j));
        assert_eq!(connections(1).count(), 0);
    }

    #[test]
    fn test_ambient_dots() {
        let dots = ambient_dots(1.5, Point::new(400.0, 300.0));
        assert_eq!(dots.len(), AMBIENT_DOT_COUNT);
        for dot in dots {
            assert!((1.0..=5.0).contains(&dot.radius));
            assert!((dot.center.x - 400.0).abs() <= 200.0 + 1e-3);
            assert!((dot.center.y - 300.0).abs() <= 150.0 + 1e-3);
        }
    }

    #[test]
    fn test_paint_knowledge_graph() {
        let mut canvas = RecordingCanvas::new(Size::new(800.0, 600.0));
        paint_background(&mut canvas, 0.0);
        paint_knowledge_graph(&mut canvas, 0.0);
        let lines = canvas
            .commands()
            .iter()
            .filter(|c| matches!(c, DrawCommand::Path { .. }))
            .count();
        assert_eq!(lines, 10);
        assert_eq!(canvas.texts(), vec!["Python", "JavaScript", "Data Science", "ML", "Web Dev"]);
        assert!(canvas.all_finite());
    }
}
