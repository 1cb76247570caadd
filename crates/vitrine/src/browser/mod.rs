//! Browser runtime for the Vitrine page.
//!
//! Bridges the core canvas, input and storage seams to `web-sys`: draw
//! commands replay on a 2D context, DOM events become core [`vitrine_core::Event`]s
//! and page state persists to `localStorage`.

pub mod app;
pub mod canvas2d;
pub mod events;
pub mod logger;
pub mod storage;

pub use app::App;
pub use canvas2d::Canvas2DRenderer;
pub use logger::ConsoleLogger;
pub use storage::LocalStore;
