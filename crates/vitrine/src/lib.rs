//! Vitrine: the interactive showcase and analytics dashboard of the workshop site.
//!
//! Core types come from [`vitrine_core`] and are re-exported here. This crate
//! adds the two page-level compositions:
//! - [`Showcase`]: particle effects, orbit camera and knowledge graph
//! - [`Dashboard`]: animated counters, charts and a simulated live feed
//!
//! # Browser Usage (WASM)
//!
//! ```javascript
//! import init, { App } from './vitrine.js';
//!
//! async function main() {
//!     await init();
//!     const app = new App();
//!     app.start();
//!     document.querySelector('#burst').onclick = () => app.trigger_effect('skill-burst');
//! }
//! ```

pub use vitrine_core::*;

pub mod dashboard;
pub mod showcase;

#[cfg(target_arch = "wasm32")]
pub mod browser;

pub use dashboard::{Dashboard, TimeRange};
pub use showcase::Showcase;

#[cfg(target_arch = "wasm32")]
pub use browser::{App, Canvas2DRenderer};
