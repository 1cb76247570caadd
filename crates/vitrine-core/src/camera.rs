//! Orbit camera state and the input handler that drives it.

use crate::config::CameraConfig;
use crate::event::{Event, InputHandler};
use crate::{Point, Size};
use glam::{Mat3, Vec3};
use serde::{Deserialize, Serialize};
use std::f32::consts::FRAC_PI_4;

/// Vertical field of view in radians.
pub const FIELD_OF_VIEW: f32 = FRAC_PI_4;

const NEAR_PLANE: f32 = 0.1;

/// Camera looking at the origin from `position.z` units away.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Camera {
    /// Camera position; `z` is the viewing distance
    pub position: Vec3,
    /// Pitch in radians
    pub rot_x: f32,
    /// Yaw in radians
    pub rot_y: f32,
}

/// A world point mapped onto the viewport.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Projection {
    /// Screen position in pixels
    pub point: Point,
    /// Distance in front of the camera
    pub depth: f32,
    /// Pixels per world unit at this depth
    pub scale: f32,
}

impl Camera {
    /// Camera at `distance` with no rotation.
    #[must_use]
    pub fn new(distance: f32) -> Self {
        Self {
            position: Vec3::new(0.0, 0.0, distance),
            rot_x: 0.0,
            rot_y: 0.0,
        }
    }

    /// Viewing distance.
    #[must_use]
    pub fn distance(&self) -> f32 {
        self.position.z
    }

    /// Perspective-project `world` onto a viewport of `viewport` pixels.
    ///
    /// Returns `None` for points at or behind the near plane.
    #[must_use]
    pub fn project(&self, world: Vec3, viewport: Size) -> Option<Projection> {
        let rotation = Mat3::from_rotation_x(self.rot_x) * Mat3::from_rotation_y(self.rot_y);
        let view = rotation * world - self.position;
        let depth = -view.z;
        if depth <= NEAR_PLANE || viewport.height <= 0.0 {
            return None;
        }

        let focal = 1.0 / (FIELD_OF_VIEW / 2.0).tan();
        let aspect = viewport.width / viewport.height;
        let ndc_x = view.x * focal / (aspect * depth);
        let ndc_y = view.y * focal / depth;
        Some(Projection {
            point: Point::new(
                (ndc_x + 1.0) * 0.5 * viewport.width,
                (1.0 - ndc_y) * 0.5 * viewport.height,
            ),
            depth,
            scale: focal / depth * viewport.height * 0.5,
        })
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self::new(CameraConfig::default().initial_distance)
    }
}

/// Drag-to-orbit and wheel-to-zoom controller.
#[derive(Debug, Clone)]
pub struct CameraController {
    camera: Camera,
    config: CameraConfig,
    drag_anchor: Option<Point>,
}

impl CameraController {
    /// Create with the given sensitivities and zoom bounds.
    #[must_use]
    pub fn new(config: CameraConfig) -> Self {
        Self {
            camera: Camera::new(config.initial_distance),
            config,
            drag_anchor: None,
        }
    }

    /// Current camera.
    #[must_use]
    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    /// Whether a drag is in progress.
    #[must_use]
    pub fn is_dragging(&self) -> bool {
        self.drag_anchor.is_some()
    }

    /// Restore the initial distance and clear rotation.
    pub fn reset(&mut self) {
        self.camera = Camera::new(self.config.initial_distance);
        self.drag_anchor = None;
    }

    /// Change distance by `delta` and clamp into the zoom bounds.
    pub fn zoom_by(&mut self, delta: f32) {
        let z = self.camera.position.z + delta;
        self.camera.position.z = z.clamp(self.config.min_distance, self.config.max_distance);
    }
}

impl Default for CameraController {
    fn default() -> Self {
        Self::new(CameraConfig::default())
    }
}

impl InputHandler for CameraController {
    fn handle_event(&mut self, event: &Event) -> bool {
        match event {
            Event::MouseDown { position, .. } => {
                self.drag_anchor = Some(*position);
                false
            }
            Event::MouseMove { position } => {
                let Some(anchor) = self.drag_anchor else {
                    return false;
                };
                let delta = *position - anchor;
                self.camera.rot_y += delta.x * self.config.drag_sensitivity;
                self.camera.rot_x += delta.y * self.config.drag_sensitivity;
                self.drag_anchor = Some(*position);
                delta.x != 0.0 || delta.y != 0.0
            }
            Event::MouseUp { .. } | Event::MouseLeave => {
                self.drag_anchor = None;
                false
            }
            Event::Scroll { delta_y, .. } => {
                let before = self.camera.position.z;
                self.zoom_by(delta_y * self.config.zoom_sensitivity);
                (self.camera.position.z - before).abs() > f32::EPSILON
            }
            _ => false,
        }
    }
}
