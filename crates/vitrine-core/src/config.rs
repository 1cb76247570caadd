//! Runtime configuration.
//!
//! Every field has a default, so an empty document is a valid config:
//!
//! ```
//! use vitrine_core::VitrineConfig;
//!
//! let config = VitrineConfig::from_toml_str("[particles]\nmax_particles = 250\n").unwrap();
//! assert_eq!(config.particles.max_particles, 250);
//! assert_eq!(config.camera.max_distance, 10.0);
//! ```

use crate::error::ConfigError;
use serde::{Deserialize, Serialize};

/// Particle pool settings.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParticleConfig {
    /// Hard cap on live particles
    pub max_particles: usize,
    /// Simulation step in seconds
    pub step: f64,
    /// RNG seed for spawn randomization
    pub seed: u64,
}

impl Default for ParticleConfig {
    fn default() -> Self {
        Self {
            max_particles: 1000,
            step: 1.0 / 60.0,
            seed: 0x5eed,
        }
    }
}

/// Orbit camera settings.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    /// Radians per pixel of drag
    pub drag_sensitivity: f32,
    /// Distance units per wheel delta unit
    pub zoom_sensitivity: f32,
    /// Closest zoom
    pub min_distance: f32,
    /// Farthest zoom
    pub max_distance: f32,
    /// Distance after construction and reset
    pub initial_distance: f32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            drag_sensitivity: 0.01,
            zoom_sensitivity: 0.01,
            min_distance: 1.0,
            max_distance: 10.0,
            initial_distance: 5.0,
        }
    }
}

/// Render loop settings.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    /// Frames between FPS samples
    pub fps_sample_frames: u64,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            fps_sample_frames: 60,
        }
    }
}

/// Analytics dashboard settings.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    /// Milliseconds between simulated live updates
    pub realtime_interval_ms: f64,
    /// Maximum entries kept in the activity feed
    pub feed_capacity: usize,
    /// RNG seed for simulated drift
    pub seed: u64,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            realtime_interval_ms: 5000.0,
            feed_capacity: 10,
            seed: 0xda5b,
        }
    }
}

/// Top-level configuration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VitrineConfig {
    /// Particle pool
    pub particles: ParticleConfig,
    /// Camera
    pub camera: CameraConfig,
    /// Render loop
    pub render: RenderConfig,
    /// Dashboard
    pub dashboard: DashboardConfig,
}

impl VitrineConfig {
    /// Parse and validate a TOML document.
    pub fn from_toml_str(source: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    /// Parse and validate a JSON document.
    pub fn from_json_str(source: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    /// Check cross-field consistency.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let invalid = |msg: &str| Err(ConfigError::Invalid(msg.to_string()));

        if !(self.particles.step > 0.0 && self.particles.step.is_finite()) {
            return invalid("particles.step must be positive");
        }
        let cam = &self.camera;
        if !(cam.min_distance > 0.0 && cam.min_distance <= cam.max_distance) {
            return invalid("camera distances must satisfy 0 < min_distance <= max_distance");
        }
        if !(cam.min_distance..=cam.max_distance).contains(&cam.initial_distance) {
            return invalid("camera.initial_distance must lie within the zoom bounds");
        }
        if self.render.fps_sample_frames == 0 {
            return invalid("render.fps_sample_frames must be at least 1");
        }
        if self.dashboard.feed_capacity == 0 {
            return invalid("dashboard.feed_capacity must be at least 1");
        }
        if self.dashboard.realtime_interval_ms <= 0.0 {
            return invalid("dashboard.realtime_interval_ms must be positive");
        }
        Ok(())
    }
}
