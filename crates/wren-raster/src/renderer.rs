//! Software renderer for headless screenshot generation.
//!
//! Replays drawing commands into an RGBA pixel buffer. Every
//! [`GraphicsContext`] call maps onto a tiny-skia operation on the
//! innermost open layer, masked by the current clip.

use std::path::Path as FsPath;

use image::{ImageBuffer, Rgba, RgbaImage};
use tiny_skia::{Mask, Pixmap, PixmapPaint, Transform};
use wren_paint::{
    Color, DisplayCommand, DisplayList, FillRule, GraphicsContext, Path, RectF, RoundedRect,
    StrokeData,
};

use crate::convert;
use crate::error::RasterError;

/// An offscreen group composited into its parent when it ends.
struct Layer {
    pixmap: Pixmap,
    opacity: f32,
}

/// Software renderer that executes drawing commands onto a pixel buffer.
pub struct Renderer {
    width: u32,
    height: u32,
    canvas: Pixmap,
    layers: Vec<Layer>,
    /// Coverage of the current clip; `None` means unclipped.
    clip: Option<Mask>,
    saved_clips: Vec<Option<Mask>>,
}

impl Renderer {
    /// Create a renderer with a white background.
    ///
    /// # Errors
    ///
    /// Returns [`RasterError::InvalidSize`] when either dimension is zero
    /// and [`RasterError::Allocation`] when the buffer is too large.
    pub fn new(width: u32, height: u32) -> Result<Self, RasterError> {
        Self::with_background(width, height, Color::WHITE)
    }

    /// Create a renderer filled with `background`.
    ///
    /// # Errors
    ///
    /// Same as [`Renderer::new`].
    pub fn with_background(width: u32, height: u32, background: Color) -> Result<Self, RasterError> {
        if width == 0 || height == 0 {
            return Err(RasterError::InvalidSize { width, height });
        }
        let mut canvas = Pixmap::new(width, height).ok_or(RasterError::Allocation { width, height })?;
        canvas.fill(tiny_skia::Color::from_rgba8(
            background.r,
            background.g,
            background.b,
            background.a,
        ));
        Ok(Self {
            width,
            height,
            canvas,
            layers: Vec::new(),
            clip: None,
            saved_clips: Vec::new(),
        })
    }

    /// Canvas width in pixels.
    #[must_use]
    pub const fn width(&self) -> u32 {
        self.width
    }

    /// Canvas height in pixels.
    #[must_use]
    pub const fn height(&self) -> u32 {
        self.height
    }

    /// Render a display list to the pixel buffer.
    ///
    /// Layers and saved clips the list leaves open are closed afterwards so
    /// one list cannot affect the next.
    pub fn render(&mut self, display_list: &DisplayList) {
        for command in display_list.commands() {
            self.execute_command(command);
        }
        if !self.layers.is_empty() || !self.saved_clips.is_empty() {
            log::warn!(
                target: "raster",
                "display list left {} layer(s) and {} saved clip(s) open",
                self.layers.len(),
                self.saved_clips.len()
            );
        }
        while !self.layers.is_empty() {
            self.end_layer();
        }
        self.saved_clips.clear();
        self.clip = None;
    }

    /// Execute a single display command.
    pub fn execute_command(&mut self, command: &DisplayCommand) {
        match command {
            DisplayCommand::Save => self.save(),
            DisplayCommand::Restore => self.restore(),
            DisplayCommand::FillRect {
                rect,
                color,
                antialias,
            } => self.fill_rect(*rect, *color, *antialias),
            DisplayCommand::FillRoundedRect { rect, color } => self.fill_rounded_rect(rect, *color),
            DisplayCommand::FillDRRect {
                outer,
                inner,
                color,
            } => self.fill_drrect(outer, inner, *color),
            DisplayCommand::FillPath {
                path,
                color,
                antialias,
            } => self.fill_path(path, *color, *antialias),
            DisplayCommand::StrokeRect {
                rect,
                thickness,
                color,
                antialias,
            } => self.stroke_rect(*rect, *thickness, *color, *antialias),
            DisplayCommand::StrokePath {
                path,
                stroke,
                color,
                antialias,
            } => self.stroke_path(path, stroke, *color, *antialias),
            DisplayCommand::ClipRect { rect, antialias } => self.clip_rect(*rect, *antialias),
            DisplayCommand::ClipRoundedRect { rect } => self.clip_rounded_rect(rect),
            DisplayCommand::ClipOutRoundedRect { rect } => self.clip_out_rounded_rect(rect),
            DisplayCommand::ClipPath { path, antialias } => self.clip_path(path, *antialias),
            DisplayCommand::BeginLayer { opacity } => self.begin_layer(*opacity),
            DisplayCommand::EndLayer => self.end_layer(),
        }
    }

    /// The color at (`x`, `y`), un-premultiplied.
    #[must_use]
    pub fn pixel(&self, x: u32, y: u32) -> Option<Color> {
        self.canvas.pixel(x, y).map(|pixel| {
            let pixel = pixel.demultiply();
            Color::rgba(pixel.red(), pixel.green(), pixel.blue(), pixel.alpha())
        })
    }

    /// Copy the canvas into an [`RgbaImage`].
    #[must_use]
    pub fn to_image(&self) -> RgbaImage {
        ImageBuffer::from_fn(self.width, self.height, |x, y| {
            let color = self.pixel(x, y).unwrap_or(Color::TRANSPARENT);
            Rgba([color.r, color.g, color.b, color.a])
        })
    }

    /// Save the rendered image as a PNG.
    ///
    /// # Errors
    ///
    /// Returns [`RasterError::Encode`] if the file cannot be written.
    pub fn save_png(&self, path: &FsPath) -> Result<(), RasterError> {
        self.to_image()
            .save_with_format(path, image::ImageFormat::Png)
            .map_err(|source| RasterError::Encode {
                path: path.to_path_buf(),
                source,
            })
    }

    /// The pixmap drawing lands in and the clip that masks it.
    fn target(&mut self) -> (&mut Pixmap, Option<&Mask>) {
        let pixmap = match self.layers.last_mut() {
            Some(layer) => &mut layer.pixmap,
            None => &mut self.canvas,
        };
        (pixmap, self.clip.as_ref())
    }

    fn fill_skia_path(&mut self, path: &tiny_skia::Path, rule: tiny_skia::FillRule, color: Color, antialias: bool) {
        let paint = convert::paint(color, antialias);
        let (pixmap, mask) = self.target();
        pixmap.fill_path(path, &paint, rule, Transform::identity(), mask);
    }

    /// Coverage of `path` over the whole canvas.
    fn coverage(&self, path: &tiny_skia::Path, rule: tiny_skia::FillRule, antialias: bool) -> Option<Mask> {
        let mut mask = Mask::new(self.width, self.height)?;
        mask.fill_path(path, rule, antialias, Transform::identity());
        Some(mask)
    }

    fn intersect_clip(&mut self, path: Option<tiny_skia::Path>, rule: tiny_skia::FillRule, antialias: bool) {
        let Some(path) = path else {
            // An empty shape clips everything away.
            self.clip = Mask::new(self.width, self.height);
            return;
        };
        let Some(shape) = self.coverage(&path, rule, antialias) else {
            return;
        };
        self.combine_clip(shape);
    }

    fn combine_clip(&mut self, shape: Mask) {
        match self.clip.as_mut() {
            Some(mask) => multiply_masks(mask, &shape),
            None => self.clip = Some(shape),
        }
    }
}

/// Multiply `mask` by `other`, pixel by pixel.
#[allow(clippy::cast_possible_truncation)]
fn multiply_masks(mask: &mut Mask, other: &Mask) {
    for (coverage, factor) in mask.data_mut().iter_mut().zip(other.data()) {
        *coverage = (u16::from(*coverage) * u16::from(*factor) / 255) as u8;
    }
}

impl GraphicsContext for Renderer {
    fn save(&mut self) {
        self.saved_clips.push(self.clip.clone());
    }

    fn restore(&mut self) {
        match self.saved_clips.pop() {
            Some(clip) => self.clip = clip,
            None => log::warn!(target: "raster", "restore without a matching save"),
        }
    }

    fn fill_rect(&mut self, rect: RectF, color: Color, antialias: bool) {
        let Some(skia_rect) = tiny_skia::Rect::from_xywh(rect.x, rect.y, rect.width, rect.height) else {
            return;
        };
        let paint = convert::paint(color, antialias);
        let (pixmap, mask) = self.target();
        pixmap.fill_rect(skia_rect, &paint, Transform::identity(), mask);
    }

    fn fill_rounded_rect(&mut self, rect: &RoundedRect, color: Color) {
        if let Some(path) = convert::path(&Path::from_rounded_rect(rect)) {
            self.fill_skia_path(&path, tiny_skia::FillRule::Winding, color, true);
        }
    }

    fn fill_drrect(&mut self, outer: &RoundedRect, inner: &RoundedRect, color: Color) {
        let mut donut = Path::new();
        donut.add_rounded_rect(outer);
        donut.add_rounded_rect(inner);
        donut.set_fill_rule(FillRule::EvenOdd);
        if let Some(path) = convert::path(&donut) {
            self.fill_skia_path(&path, tiny_skia::FillRule::EvenOdd, color, true);
        }
    }

    fn fill_path(&mut self, path: &Path, color: Color, antialias: bool) {
        if let Some(skia_path) = convert::path(path) {
            self.fill_skia_path(&skia_path, convert::fill_rule(path.fill_rule()), color, antialias);
        }
    }

    fn stroke_rect(&mut self, rect: RectF, thickness: f32, color: Color, antialias: bool) {
        let Some(path) = convert::rect_path(rect) else {
            return;
        };
        let paint = convert::paint(color, antialias);
        let stroke = convert::stroke(&StrokeData::solid(thickness));
        let (pixmap, mask) = self.target();
        pixmap.stroke_path(&path, &paint, &stroke, Transform::identity(), mask);
    }

    fn stroke_path(&mut self, path: &Path, stroke: &StrokeData, color: Color, antialias: bool) {
        let Some(skia_path) = convert::path(path) else {
            return;
        };
        let paint = convert::paint(color, antialias);
        let stroke = convert::stroke(stroke);
        let (pixmap, mask) = self.target();
        pixmap.stroke_path(&skia_path, &paint, &stroke, Transform::identity(), mask);
    }

    fn clip_rect(&mut self, rect: RectF, antialias: bool) {
        self.intersect_clip(convert::rect_path(rect), tiny_skia::FillRule::Winding, antialias);
    }

    fn clip_rounded_rect(&mut self, rect: &RoundedRect) {
        let path = convert::path(&Path::from_rounded_rect(rect));
        self.intersect_clip(path, tiny_skia::FillRule::Winding, true);
    }

    fn clip_out_rounded_rect(&mut self, rect: &RoundedRect) {
        let Some(path) = convert::path(&Path::from_rounded_rect(rect)) else {
            return;
        };
        let Some(mut outside) = self.coverage(&path, tiny_skia::FillRule::Winding, true) else {
            return;
        };
        for coverage in outside.data_mut() {
            *coverage = 255 - *coverage;
        }
        self.combine_clip(outside);
    }

    fn clip_path(&mut self, path: &Path, antialias: bool) {
        self.intersect_clip(convert::path(path), convert::fill_rule(path.fill_rule()), antialias);
    }

    fn begin_layer(&mut self, opacity: f32) {
        match Pixmap::new(self.width, self.height) {
            Some(pixmap) => self.layers.push(Layer {
                pixmap,
                opacity: opacity.clamp(0.0, 1.0),
            }),
            None => log::warn!(target: "raster", "failed to allocate a layer; drawing in place"),
        }
    }

    fn end_layer(&mut self) {
        let Some(layer) = self.layers.pop() else {
            log::warn!(target: "raster", "end_layer without a matching begin_layer");
            return;
        };
        let paint = PixmapPaint {
            opacity: layer.opacity,
            ..PixmapPaint::default()
        };
        let (pixmap, _) = self.target();
        pixmap.draw_pixmap(0, 0, layer.pixmap.as_ref(), &paint, Transform::identity(), None);
    }
}
