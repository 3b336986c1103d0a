//! Box Decorations
//!
//! [CSS 2.1 Appendix E.2 Painting order](https://www.w3.org/TR/CSS2/zindex.html#painting-order)
//!
//! Paints what a box draws around its content: the background color, the
//! border and the outline. Layout supplies the border box and the used
//! border widths; colors, styles and radii come from the box's decoration
//! style.

use serde::{Deserialize, Serialize};

use crate::border::{BorderEdge, BorderPaintOptions, BorderStyle, BoxBorderPainter};
use crate::color::Color;
use crate::geometry::{BoxStrut, CornerRadii, RectF, RoundedRect};
use crate::graphics_context::GraphicsContext;

/// Color and style of one border side.
///
/// [§ 4.1 'border-color'](https://www.w3.org/TR/css-backgrounds-3/#border-color)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BorderSideStyle {
    /// "The initial value is currentcolor", taken here as black.
    pub color: Color,
    /// Initial value `none`.
    pub style: BorderStyle,
}

impl Default for BorderSideStyle {
    fn default() -> Self {
        Self {
            color: Color::BLACK,
            style: BorderStyle::None,
        }
    }
}

/// [§ 3 Outline Properties](https://www.w3.org/TR/css-ui-4/#outline-props)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Outline {
    /// 'outline-width' in pixels.
    pub width: f32,
    /// 'outline-style'. `hidden` is not a valid outline style.
    pub style: BorderStyle,
    /// 'outline-color'.
    pub color: Color,
    /// 'outline-offset': gap between the border box and the outline.
    pub offset: f32,
}

impl Default for Outline {
    fn default() -> Self {
        Self {
            width: 3.0,
            style: BorderStyle::None,
            color: Color::BLACK,
            offset: 0.0,
        }
    }
}

/// Everything a box paints besides its content.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct BoxDecoration {
    /// 'background-color'; `None` paints nothing.
    pub background_color: Option<Color>,
    /// 'border-top-color' and 'border-top-style'.
    pub border_top: BorderSideStyle,
    /// 'border-right-color' and 'border-right-style'.
    pub border_right: BorderSideStyle,
    /// 'border-bottom-color' and 'border-bottom-style'.
    pub border_bottom: BorderSideStyle,
    /// 'border-left-color' and 'border-left-style'.
    pub border_left: BorderSideStyle,
    /// 'border-radius'.
    pub border_radius: CornerRadii,
    /// The outline, if any.
    pub outline: Option<Outline>,
}

impl BoxDecoration {
    /// The same color and style on all four sides.
    #[must_use]
    pub fn with_uniform_border(mut self, color: Color, style: BorderStyle) -> Self {
        let side = BorderSideStyle { color, style };
        self.border_top = side;
        self.border_right = side;
        self.border_bottom = side;
        self.border_left = side;
        self
    }

    /// Border edges for the used `widths`, in top, right, bottom, left
    /// order.
    #[must_use]
    pub fn border_edges(&self, widths: BoxStrut) -> [BorderEdge; 4] {
        let edge = |width: f32, side: BorderSideStyle| BorderEdge::new(width, side.color, side.style);
        [
            edge(widths.top, self.border_top),
            edge(widths.right, self.border_right),
            edge(widths.bottom, self.border_bottom),
            edge(widths.left, self.border_left),
        ]
    }
}

/// Paints box decorations.
#[derive(Debug, Clone, Copy, Default)]
pub struct Painter {
    options: BorderPaintOptions,
}

impl Painter {
    /// Create a painter.
    #[must_use]
    pub const fn new(options: BorderPaintOptions) -> Self {
        Self { options }
    }

    /// Paint the background, border and outline of one box, in that order.
    ///
    /// [CSS 2.1 Appendix E.2](https://www.w3.org/TR/CSS2/zindex.html#painting-order)
    pub fn paint_box_decoration(
        &self,
        context: &mut dyn GraphicsContext,
        border_box: RectF,
        border_widths: BoxStrut,
        decoration: &BoxDecoration,
    ) {
        if let Some(color) = decoration.background_color {
            Self::paint_background(context, border_box, decoration.border_radius, color);
        }

        BoxBorderPainter::new(
            border_box,
            decoration.border_edges(border_widths),
            decoration.border_radius,
        )
        .with_options(self.options)
        .paint(context);

        if let Some(outline) = &decoration.outline {
            self.paint_outline(context, border_box, decoration.border_radius, outline);
        }
    }

    /// [CSS Backgrounds § 3.7](https://www.w3.org/TR/css-backgrounds-3/#background-painting-area)
    ///
    /// "The initial value of 'background-clip' is 'border-box', meaning the
    /// background is painted within the border box."
    fn paint_background(
        context: &mut dyn GraphicsContext,
        border_box: RectF,
        radii: CornerRadii,
        color: Color,
    ) {
        if color.is_fully_transparent() {
            return;
        }
        let shape = RoundedRect::new(border_box.snapped(), radii).with_constrained_radii();
        if shape.is_empty() {
            return;
        }
        if shape.is_rounded() {
            context.fill_rounded_rect(&shape, color);
        } else {
            context.fill_rect(shape.rect, color, true);
        }
    }

    /// [§ 3.4 'outline-style'](https://www.w3.org/TR/css-ui-4/#outline-style)
    fn paint_outline(
        &self,
        context: &mut dyn GraphicsContext,
        border_box: RectF,
        radii: CornerRadii,
        outline: &Outline,
    ) {
        if outline.style == BorderStyle::Hidden {
            wren_common::warning::warn_once(
                "paint",
                "outline-style: hidden is not a valid outline style; treating as none",
            );
            return;
        }
        let edge = BorderEdge::new(outline.width, outline.color, outline.style);
        if !edge.should_render() {
            return;
        }
        BoxBorderPainter::for_outline(border_box, radii, edge, BoxStrut::uniform(outline.offset))
            .with_options(self.options)
            .paint(context);
    }
}
