//! Software rasterizer for Wren display lists.
//!
//! The rasterizer is the final stage in the pipeline:
//!
//! ```text
//! Layout → Paint → Raster
//!            ↓        ↓
//!      DisplayList → Pixels
//! ```
//!
//! It knows nothing about CSS or layout. [`Renderer`] implements
//! [`GraphicsContext`](wren_paint::GraphicsContext), so painters can draw
//! into it directly, and it can replay a recorded
//! [`DisplayList`](wren_paint::DisplayList).
//!
//! Drawing goes through [tiny-skia](https://docs.rs/tiny-skia). Clips are
//! coverage masks and transparency layers are offscreen pixmaps composited
//! with their opacity.

/// Raster errors.
pub mod error;
/// The pixel renderer.
pub mod renderer;

mod convert;

pub use error::RasterError;
pub use renderer::Renderer;
