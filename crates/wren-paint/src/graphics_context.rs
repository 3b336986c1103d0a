//! The drawing capability painters draw through.
//!
//! Painters never touch pixels. They describe fills, strokes, clips and
//! transparency layers, and a backend decides how to execute them. The
//! [`DisplayList`](crate::DisplayList) records the calls. A raster backend
//! replays them into a pixel buffer.

use std::ops::{Deref, DerefMut};

use crate::color::Color;
use crate::geometry::{RectF, RoundedRect};
use crate::path::Path;
use crate::stroke::StrokeData;

/// Primitive drawing operations.
///
/// Clips and layers nest. `save` and `restore` bracket clip changes, and
/// every `begin_layer` is closed by an `end_layer`.
pub trait GraphicsContext {
    /// Push the current clip state.
    fn save(&mut self);

    /// Pop to the most recently saved clip state.
    fn restore(&mut self);

    /// Fill an axis-aligned rectangle.
    fn fill_rect(&mut self, rect: RectF, color: Color, antialias: bool);

    /// Fill a rounded rectangle.
    fn fill_rounded_rect(&mut self, rect: &RoundedRect, color: Color);

    /// Fill the area between two rounded rectangles (a "donut").
    fn fill_drrect(&mut self, outer: &RoundedRect, inner: &RoundedRect, color: Color);

    /// Fill a path using its fill rule.
    fn fill_path(&mut self, path: &Path, color: Color, antialias: bool);

    /// Stroke a rectangle outline centred on its edges.
    fn stroke_rect(&mut self, rect: RectF, thickness: f32, color: Color, antialias: bool);

    /// Stroke a path.
    fn stroke_path(&mut self, path: &Path, stroke: &StrokeData, color: Color, antialias: bool);

    /// Intersect the clip with a rectangle.
    fn clip_rect(&mut self, rect: RectF, antialias: bool);

    /// Intersect the clip with a rounded rectangle (always anti-aliased).
    fn clip_rounded_rect(&mut self, rect: &RoundedRect);

    /// Remove a rounded rectangle from the clip.
    fn clip_out_rounded_rect(&mut self, rect: &RoundedRect);

    /// Intersect the clip with a path.
    fn clip_path(&mut self, path: &Path, antialias: bool);

    /// Start a group composited with `opacity` when it ends.
    fn begin_layer(&mut self, opacity: f32);

    /// Composite the innermost open layer.
    fn end_layer(&mut self);
}

/// Saves the context on creation and restores it when dropped.
///
/// Dereferences to the context so drawing continues through the saver.
pub struct StateSaver<'a, C: GraphicsContext + ?Sized> {
    context: &'a mut C,
    save_and_restore: bool,
}

impl<'a, C: GraphicsContext + ?Sized> StateSaver<'a, C> {
    /// Save now (when `save_and_restore` is set) and restore on drop.
    pub fn new(context: &'a mut C, save_and_restore: bool) -> Self {
        if save_and_restore {
            context.save();
        }
        Self {
            context,
            save_and_restore,
        }
    }
}

impl<C: GraphicsContext + ?Sized> Deref for StateSaver<'_, C> {
    type Target = C;

    fn deref(&self) -> &C {
        self.context
    }
}

impl<C: GraphicsContext + ?Sized> DerefMut for StateSaver<'_, C> {
    fn deref_mut(&mut self) -> &mut C {
        self.context
    }
}

impl<C: GraphicsContext + ?Sized> Drop for StateSaver<'_, C> {
    fn drop(&mut self) {
        if self.save_and_restore {
            self.context.restore();
        }
    }
}
