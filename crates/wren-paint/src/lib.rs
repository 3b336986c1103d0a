//! CSS box decoration and border painting for the Wren renderer.
//!
//! # Scope
//!
//! This crate implements:
//! - **Borders** ([§ 4](https://www.w3.org/TR/css-backgrounds-3/#borders))
//!   - Every `border-style`, per-side colors and widths
//!   - Rounded corners ([§ 5](https://www.w3.org/TR/css-backgrounds-3/#corners))
//!   - Corner miters and translucent sides composited in opacity groups
//!
//! - **Outlines** ([CSS UI § 3](https://www.w3.org/TR/css-ui-4/#outline-props))
//!
//! - **Backgrounds** (`background-color` clipped to the border box)
//!
//! Painting goes through the [`GraphicsContext`] trait. A [`DisplayList`]
//! records the calls for inspection, serialization or later replay.
//!
//! # Not Yet Implemented
//!
//! - Background images and gradients
//! - `border-image`
//! - Box shadows

/// Border painting per [§ 4](https://www.w3.org/TR/css-backgrounds-3/#borders).
pub mod border;
/// sRGB colors.
pub mod color;
/// Background, border and outline of a box.
pub mod decoration;
/// Recorded drawing commands.
pub mod display_list;
/// Float geometry and rounded rectangles.
pub mod geometry;
/// The drawing capability.
pub mod graphics_context;
/// Vector paths.
pub mod path;
/// Stroke styles and dash patterns.
pub mod stroke;

// Re-exports for convenience
pub use border::{BorderEdge, BorderPaintOptions, BorderStyle, BoxBorderPainter, BoxSide};
pub use color::{Color, InvalidColor};
pub use decoration::{BorderSideStyle, BoxDecoration, Outline, Painter};
pub use display_list::{DisplayCommand, DisplayList};
pub use geometry::{BoxStrut, CornerRadii, PointF, RectF, RoundedRect, SizeF};
pub use graphics_context::{GraphicsContext, StateSaver};
pub use path::{FillRule, Path, PathVerb};
pub use stroke::{DashPattern, LineCap, StrokeData, StrokeStyle};
