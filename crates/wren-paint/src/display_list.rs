//! Display List - a sequence of drawing commands
//!
//! [CSS 2.1 Appendix E](https://www.w3.org/TR/CSS2/zindex.html)
//!
//! The display list is the output of the painting phase. It records every
//! [`GraphicsContext`] call in order so a backend can replay it later, and
//! so tests can inspect exactly what a painter asked for.

use serde::{Deserialize, Serialize};

use crate::color::Color;
use crate::geometry::{RectF, RoundedRect};
use crate::graphics_context::GraphicsContext;
use crate::path::Path;
use crate::stroke::StrokeData;

/// A single drawing command.
///
/// Commands are added to the display list in painting order (back to front).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", tag = "op")]
pub enum DisplayCommand {
    /// Push the clip state.
    Save,
    /// Pop the clip state.
    Restore,
    /// Fill a rectangle with a solid color.
    FillRect {
        /// Area to fill.
        rect: RectF,
        /// Fill color.
        color: Color,
        /// Smooth partially covered pixels.
        antialias: bool,
    },
    /// Fill a rounded rectangle.
    FillRoundedRect {
        /// Area to fill.
        rect: RoundedRect,
        /// Fill color.
        color: Color,
    },
    /// Fill between an outer and an inner rounded rectangle.
    #[serde(rename = "fill-drrect")]
    FillDRRect {
        /// Outer boundary.
        outer: RoundedRect,
        /// Hole.
        inner: RoundedRect,
        /// Fill color.
        color: Color,
    },
    /// Fill a path.
    FillPath {
        /// Shape to fill.
        path: Path,
        /// Fill color.
        color: Color,
        /// Smooth partially covered pixels.
        antialias: bool,
    },
    /// Stroke a rectangle outline.
    StrokeRect {
        /// Rectangle whose edges the stroke is centred on.
        rect: RectF,
        /// Line width.
        thickness: f32,
        /// Stroke color.
        color: Color,
        /// Smooth partially covered pixels.
        antialias: bool,
    },
    /// Stroke a path.
    StrokePath {
        /// Centreline.
        path: Path,
        /// Width, caps and dashes.
        stroke: StrokeData,
        /// Stroke color.
        color: Color,
        /// Smooth partially covered pixels.
        antialias: bool,
    },
    /// Intersect the clip with a rectangle.
    ClipRect {
        /// Clip rectangle.
        rect: RectF,
        /// Soft clip edges.
        antialias: bool,
    },
    /// Intersect the clip with a rounded rectangle.
    ClipRoundedRect {
        /// Clip shape.
        rect: RoundedRect,
    },
    /// Remove a rounded rectangle from the clip.
    ClipOutRoundedRect {
        /// Excluded shape.
        rect: RoundedRect,
    },
    /// Intersect the clip with a path.
    ClipPath {
        /// Clip shape.
        path: Path,
        /// Soft clip edges.
        antialias: bool,
    },
    /// Open a transparency layer.
    BeginLayer {
        /// Opacity applied when the layer is composited.
        opacity: f32,
    },
    /// Composite the innermost layer.
    EndLayer,
}

impl DisplayCommand {
    /// The command draws pixels (as opposed to changing state).
    #[must_use]
    pub const fn is_drawing(&self) -> bool {
        matches!(
            self,
            Self::FillRect { .. }
                | Self::FillRoundedRect { .. }
                | Self::FillDRRect { .. }
                | Self::FillPath { .. }
                | Self::StrokeRect { .. }
                | Self::StrokePath { .. }
        )
    }

    /// The command narrows the clip.
    #[must_use]
    pub const fn is_clip(&self) -> bool {
        matches!(
            self,
            Self::ClipRect { .. }
                | Self::ClipRoundedRect { .. }
                | Self::ClipOutRoundedRect { .. }
                | Self::ClipPath { .. }
        )
    }
}

/// A list of drawing commands in painting order.
///
/// The display list contains all commands needed to render a scene. Commands
/// are stored in back-to-front order, so the renderer can simply iterate
/// and execute each command.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DisplayList {
    commands: Vec<DisplayCommand>,
}

impl DisplayList {
    /// Create an empty display list.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            commands: Vec::new(),
        }
    }

    /// Add a command to the display list.
    pub fn push(&mut self, command: DisplayCommand) {
        self.commands.push(command);
    }

    /// Get the commands in painting order.
    #[must_use]
    pub fn commands(&self) -> &[DisplayCommand] {
        &self.commands
    }

    /// Get the number of commands.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.commands.len()
    }

    /// Check if the display list is empty.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Number of transparency layers opened.
    #[must_use]
    pub fn layer_count(&self) -> usize {
        self.commands
            .iter()
            .filter(|command| matches!(command, DisplayCommand::BeginLayer { .. }))
            .count()
    }

    /// Number of commands that narrow the clip.
    #[must_use]
    pub fn clip_count(&self) -> usize {
        self.commands.iter().filter(|command| command.is_clip()).count()
    }

    /// Number of commands that draw pixels.
    #[must_use]
    pub fn drawing_count(&self) -> usize {
        self.commands
            .iter()
            .filter(|command| command.is_drawing())
            .count()
    }
}

impl GraphicsContext for DisplayList {
    fn save(&mut self) {
        self.push(DisplayCommand::Save);
    }

    fn restore(&mut self) {
        self.push(DisplayCommand::Restore);
    }

    fn fill_rect(&mut self, rect: RectF, color: Color, antialias: bool) {
        self.push(DisplayCommand::FillRect {
            rect,
            color,
            antialias,
        });
    }

    fn fill_rounded_rect(&mut self, rect: &RoundedRect, color: Color) {
        self.push(DisplayCommand::FillRoundedRect { rect: *rect, color });
    }

    fn fill_drrect(&mut self, outer: &RoundedRect, inner: &RoundedRect, color: Color) {
        self.push(DisplayCommand::FillDRRect {
            outer: *outer,
            inner: *inner,
            color,
        });
    }

    fn fill_path(&mut self, path: &Path, color: Color, antialias: bool) {
        self.push(DisplayCommand::FillPath {
            path: path.clone(),
            color,
            antialias,
        });
    }

    fn stroke_rect(&mut self, rect: RectF, thickness: f32, color: Color, antialias: bool) {
        self.push(DisplayCommand::StrokeRect {
            rect,
            thickness,
            color,
            antialias,
        });
    }

    fn stroke_path(&mut self, path: &Path, stroke: &StrokeData, color: Color, antialias: bool) {
        self.push(DisplayCommand::StrokePath {
            path: path.clone(),
            stroke: stroke.clone(),
            color,
            antialias,
        });
    }

    fn clip_rect(&mut self, rect: RectF, antialias: bool) {
        self.push(DisplayCommand::ClipRect { rect, antialias });
    }

    fn clip_rounded_rect(&mut self, rect: &RoundedRect) {
        self.push(DisplayCommand::ClipRoundedRect { rect: *rect });
    }

    fn clip_out_rounded_rect(&mut self, rect: &RoundedRect) {
        self.push(DisplayCommand::ClipOutRoundedRect { rect: *rect });
    }

    fn clip_path(&mut self, path: &Path, antialias: bool) {
        self.push(DisplayCommand::ClipPath {
            path: path.clone(),
            antialias,
        });
    }

    fn begin_layer(&mut self, opacity: f32) {
        self.push(DisplayCommand::BeginLayer { opacity });
    }

    fn end_layer(&mut self) {
        self.push(DisplayCommand::EndLayer);
    }
}
