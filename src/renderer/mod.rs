//! 2D rendering
//!
//! `scene` turns a session into draw commands; `canvas` paints them in the
//! browser.

pub mod scene;
pub mod viewport;

#[cfg(target_arch = "wasm32")]
pub mod canvas;

pub use scene::{DrawCmd, Rect};
pub use viewport::Viewport;

#[cfg(target_arch = "wasm32")]
pub use canvas::CanvasPainter;
