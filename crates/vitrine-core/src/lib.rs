//! Core rendering and simulation types for Vitrine.
//!
//! This crate provides everything that runs the same in the browser and in
//! native tests:
//! - Geometric primitives: [`Point`], [`Size`], [`Rect`] and [`Color`]
//! - The drawing seam: [`Canvas`] and the command-recording [`RecordingCanvas`]
//! - Charts: line, doughnut and radar layouts in [`chart`]
//! - Animation: easing curves and the [`MetricAnimator`] counter
//! - Simulation: the bounded [`ParticleSimulator`], [`RenderLoop`] timing and
//!   the orbit [`CameraController`]
//! - Page state: [`ThemeManager`] and [`Progression`] over a [`KeyValueStore`]

pub mod animation;
pub mod camera;
pub mod canvas;
pub mod chart;
mod color;
pub mod config;
pub mod draw;
mod error;
mod event;
pub mod frame;
mod geometry;
pub mod particles;
pub mod progression;
pub mod scene;
pub mod storage;
pub mod theme;

pub use animation::{EasedValue, Easing, MetricAnimator};
pub use camera::{Camera, CameraController, Projection};
pub use canvas::{Canvas, RecordingCanvas};
pub use chart::{ChartOptions, ChartStyle, Dataset, RadarAxis};
pub use color::Color;
pub use config::VitrineConfig;
pub use draw::{DrawCommand, FontWeight, StrokeStyle, TextAlign, TextStyle};
pub use error::{ChartError, ColorError, ConfigError, StorageError};
pub use event::{Event, InputHandler, Key, MouseButton};
pub use frame::{FrameInfo, LoopState, RenderLoop};
pub use geometry::{Point, Rect, Size};
pub use particles::{EffectTable, Particle, ParticleSimulator};
pub use progression::{DayIndex, ProgressEvent, Progression, QuestAction};
pub use storage::{KeyValueStore, MemoryStore};
pub use theme::{Palette, ThemeManager, ThemeMode};
