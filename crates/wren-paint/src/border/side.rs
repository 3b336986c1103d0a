//! Painting one border side as axis-aligned pixels.
//!
//! [§ 4.2 'border-style'](https://www.w3.org/TR/css-backgrounds-3/#border-style)
//!
//! A side is a rectangle `(x1, y1)-(x2, y2)` in whole device pixels. When a
//! neighbouring side needs a miter, the adjacent widths taper the ends of
//! the side into a trapezoid. A positive adjacent width tapers the inner
//! edge, a negative one tapers the outer edge.

use crate::border::edge::{BorderStyle, BoxSide};
use crate::color::Color;
use crate::geometry::{PointF, RectF};
use crate::graphics_context::GraphicsContext;
use crate::path::Path;
use crate::stroke::{StrokeData, StrokeStyle};

/// Below this contrast between a color and its dark shade, the lighter
/// bevel is lightened too.
const MINIMUM_BORDER_EDGE_CONTRAST_RATIO: f32 = 1.75;

/// One border side to draw with rectangle primitives.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoxSideLine {
    /// Left edge.
    pub x1: i32,
    /// Top edge.
    pub y1: i32,
    /// Right edge.
    pub x2: i32,
    /// Bottom edge.
    pub y2: i32,
    /// Which side this is.
    pub side: BoxSide,
    /// Base color before any bevel shading.
    pub color: Color,
    /// Requested style.
    pub style: BorderStyle,
    /// Width of the side sharing the start corner, or 0 for a square end.
    pub adjacent_width1: i32,
    /// Width of the side sharing the end corner, or 0 for a square end.
    pub adjacent_width2: i32,
    /// Smooth partially covered pixels.
    pub antialias: bool,
}

impl BoxSideLine {
    /// A side filling `rect` without tapered ends.
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub fn from_rect(rect: RectF, side: BoxSide, color: Color, style: BorderStyle) -> Self {
        Self {
            x1: rect.x.round() as i32,
            y1: rect.y.round() as i32,
            x2: rect.right().round() as i32,
            y2: rect.bottom().round() as i32,
            side,
            color,
            style,
            adjacent_width1: 0,
            adjacent_width2: 0,
            antialias: true,
        }
    }

    const fn thickness_and_length(&self) -> (i32, i32) {
        if self.side.is_horizontal() {
            (self.y2 - self.y1, self.x2 - self.x1)
        } else {
            (self.x2 - self.x1, self.y2 - self.y1)
        }
    }
}

#[allow(clippy::cast_precision_loss)]
const fn px(value: i32) -> f32 {
    value as f32
}

/// Draw one side in its style.
///
/// Sides with no thickness or length draw nothing.
pub fn draw_line_for_box_side(context: &mut dyn GraphicsContext, line: &BoxSideLine) {
    let (thickness, length) = line.thickness_and_length();
    if length <= 0 || thickness <= 0 {
        return;
    }

    match line.style.effective(thickness) {
        BorderStyle::None | BorderStyle::Hidden => {}
        style @ (BorderStyle::Dotted | BorderStyle::Dashed) => {
            draw_dashed_or_dotted_box_side(context, line, thickness, length, style);
        }
        BorderStyle::Double => draw_double_box_side(context, line, thickness, length),
        style @ (BorderStyle::Ridge | BorderStyle::Groove) => {
            draw_ridge_or_groove_box_side(context, line, style);
        }
        style @ (BorderStyle::Inset | BorderStyle::Outset) => {
            let color = calculate_border_style_color(style, line.side, line.color);
            draw_solid_box_side(context, &BoxSideLine { color, ..*line });
        }
        BorderStyle::Solid => draw_solid_box_side(context, line),
    }
}

/// The shade of `color` drawn on `side` for a beveled style.
///
/// [§ 4.2](https://www.w3.org/TR/css-backgrounds-3/#border-style)
///
/// `inset` darkens the top and left sides and `outset` darkens the bottom
/// and right sides. The other sides keep `color`, lightened when the dark
/// shade would barely differ from it.
#[must_use]
pub fn calculate_border_style_color(style: BorderStyle, side: BoxSide, color: Color) -> Color {
    let is_darken = matches!(side, BoxSide::Top | BoxSide::Left) == (style == BorderStyle::Inset);
    let dark_color = color.dark();
    if is_darken {
        return dark_color;
    }
    // Bright enough reds and greens always contrast with their dark shade.
    if color.r >= 150 || color.g >= 92 {
        return color;
    }
    if color.contrast_ratio(dark_color) < MINIMUM_BORDER_EDGE_CONTRAST_RATIO {
        color.light()
    } else {
        color
    }
}

fn draw_dashed_or_dotted_box_side(
    context: &mut dyn GraphicsContext,
    line: &BoxSideLine,
    thickness: i32,
    length: i32,
    style: BorderStyle,
) {
    let stroke_style = if style == BorderStyle::Dashed {
        StrokeStyle::Dashed
    } else {
        StrokeStyle::Dotted
    };
    let stroke = StrokeData::patterned(px(thickness), stroke_style, px(length), 0.0, false);
    let half = px(thickness) / 2.0;
    let (start, end) = if line.side.is_horizontal() {
        let mid_y = px(line.y1) + half;
        (PointF::new(px(line.x1), mid_y), PointF::new(px(line.x2), mid_y))
    } else {
        let mid_x = px(line.x1) + half;
        (PointF::new(mid_x, px(line.y1)), PointF::new(mid_x, px(line.y2)))
    };
    let mut centerline = Path::new();
    centerline.move_to(start);
    centerline.line_to(end);

    context.stroke_path(&centerline, &stroke, line.color, line.antialias);
}

/// Two stripes a third of the thickness each, with a gap between.
fn draw_double_box_side(
    context: &mut dyn GraphicsContext,
    line: &BoxSideLine,
    thickness: i32,
    length: i32,
) {
    let third_of_thickness = (thickness + 1) / 3;
    let BoxSideLine {
        x1,
        y1,
        x2,
        y2,
        adjacent_width1,
        adjacent_width2,
        ..
    } = *line;

    if adjacent_width1 == 0 && adjacent_width2 == 0 {
        let (first, second) = if line.side.is_horizontal() {
            (
                RectF::new(px(x1), px(y1), px(length), px(third_of_thickness)),
                RectF::new(
                    px(x1),
                    px(y2 - third_of_thickness),
                    px(length),
                    px(third_of_thickness),
                ),
            )
        } else {
            (
                RectF::new(px(x1), px(y1), px(third_of_thickness), px(length)),
                RectF::new(
                    px(x2 - third_of_thickness),
                    px(y1),
                    px(third_of_thickness),
                    px(length),
                ),
            )
        };
        context.fill_rect(first, line.color, line.antialias);
        context.fill_rect(second, line.color, line.antialias);
        return;
    }

    let big_third = |width: i32| (if width > 0 { width + 1 } else { width - 1 }) / 3;
    let adjacent1_big_third = big_third(adjacent_width1);
    let adjacent2_big_third = big_third(adjacent_width2);
    // How far the outer stripe's ends pull in.
    let outer1 = ((-adjacent_width1 * 2 + 1) / 3).max(0);
    let outer2 = ((-adjacent_width2 * 2 + 1) / 3).max(0);
    // How far the inner stripe's ends pull in.
    let inner1 = ((adjacent_width1 * 2 + 1) / 3).max(0);
    let inner2 = ((adjacent_width2 * 2 + 1) / 3).max(0);

    let stripe = |x1: i32, y1: i32, x2: i32, y2: i32| BoxSideLine {
        x1,
        y1,
        x2,
        y2,
        style: BorderStyle::Solid,
        adjacent_width1: adjacent1_big_third,
        adjacent_width2: adjacent2_big_third,
        ..*line
    };

    let (first, second) = match line.side {
        BoxSide::Top => (
            stripe(x1 + outer1, y1, x2 - outer2, y1 + third_of_thickness),
            stripe(x1 + inner1, y2 - third_of_thickness, x2 - inner2, y2),
        ),
        BoxSide::Left => (
            stripe(x1, y1 + outer1, x1 + third_of_thickness, y2 - outer2),
            stripe(x2 - third_of_thickness, y1 + inner1, x2, y2 - inner2),
        ),
        BoxSide::Bottom => (
            stripe(x1 + inner1, y1, x2 - inner2, y1 + third_of_thickness),
            stripe(x1 + outer1, y2 - third_of_thickness, x2 - outer2, y2),
        ),
        BoxSide::Right => (
            stripe(x1, y1 + inner1, x1 + third_of_thickness, y2 - inner2),
            stripe(x2 - third_of_thickness, y1 + outer1, x2, y2 - outer2),
        ),
    };
    draw_line_for_box_side(context, &first);
    draw_line_for_box_side(context, &second);
}

/// Two half-thickness bands, one `inset` and one `outset`.
fn draw_ridge_or_groove_box_side(
    context: &mut dyn GraphicsContext,
    line: &BoxSideLine,
    style: BorderStyle,
) {
    let (s1, s2) = if style == BorderStyle::Groove {
        (BorderStyle::Inset, BorderStyle::Outset)
    } else {
        (BorderStyle::Outset, BorderStyle::Inset)
    };
    let BoxSideLine {
        x1,
        y1,
        x2,
        y2,
        adjacent_width1: a1,
        adjacent_width2: a2,
        ..
    } = *line;

    let big_half = |width: i32| (if width > 0 { width + 1 } else { width - 1 }) / 2;
    let outer_band = |x1: i32, y1: i32, x2: i32, y2: i32, style: BorderStyle| BoxSideLine {
        x1,
        y1,
        x2,
        y2,
        style,
        adjacent_width1: big_half(a1),
        adjacent_width2: big_half(a2),
        ..*line
    };
    let inner_band = |x1: i32, y1: i32, x2: i32, y2: i32, style: BorderStyle| BoxSideLine {
        x1,
        y1,
        x2,
        y2,
        style,
        adjacent_width1: a1 / 2,
        adjacent_width2: a2 / 2,
        ..*line
    };
    let mid_y = (y1 + y2 + 1) / 2;
    let mid_x = (x1 + x2 + 1) / 2;

    let (first, second) = match line.side {
        BoxSide::Top => (
            outer_band(x1 + (-a1).max(0) / 2, y1, x2 - (-a2).max(0) / 2, mid_y, s1),
            inner_band(
                x1 + (a1 + 1).max(0) / 2,
                mid_y,
                x2 - (a2 + 1).max(0) / 2,
                y2,
                s2,
            ),
        ),
        BoxSide::Left => (
            outer_band(x1, y1 + (-a1).max(0) / 2, mid_x, y2 - (-a2).max(0) / 2, s1),
            inner_band(
                mid_x,
                y1 + (a1 + 1).max(0) / 2,
                x2,
                y2 - (a2 + 1).max(0) / 2,
                s2,
            ),
        ),
        BoxSide::Bottom => (
            outer_band(x1 + a1.max(0) / 2, y1, x2 - a2.max(0) / 2, mid_y, s2),
            inner_band(
                x1 + (-a1 + 1).max(0) / 2,
                mid_y,
                x2 - (-a2 + 1).max(0) / 2,
                y2,
                s1,
            ),
        ),
        BoxSide::Right => (
            outer_band(x1, y1 + a1.max(0) / 2, mid_x, y2 - a2.max(0) / 2, s2),
            inner_band(
                mid_x,
                y1 + (-a1 + 1).max(0) / 2,
                x2,
                y2 - (-a2 + 1).max(0) / 2,
                s1,
            ),
        ),
    };
    draw_line_for_box_side(context, &first);
    draw_line_for_box_side(context, &second);
}

/// A rectangle, or a trapezoid when either end is mitered.
fn draw_solid_box_side(context: &mut dyn GraphicsContext, line: &BoxSideLine) {
    let BoxSideLine {
        x1,
        y1,
        x2,
        y2,
        adjacent_width1: a1,
        adjacent_width2: a2,
        ..
    } = *line;
    debug_assert!(x2 >= x1 && y2 >= y1);

    if a1 == 0 && a2 == 0 {
        context.fill_rect(
            RectF::new(px(x1), px(y1), px(x2 - x1), px(y2 - y1)),
            line.color,
            line.antialias,
        );
        return;
    }

    let point = |x: i32, y: i32| PointF::new(px(x), px(y));
    let quad = match line.side {
        BoxSide::Top => [
            point(x1 + (-a1).max(0), y1),
            point(x1 + a1.max(0), y2),
            point(x2 - a2.max(0), y2),
            point(x2 - (-a2).max(0), y1),
        ],
        BoxSide::Bottom => [
            point(x1 + a1.max(0), y1),
            point(x1 + (-a1).max(0), y2),
            point(x2 - (-a2).max(0), y2),
            point(x2 - a2.max(0), y1),
        ],
        BoxSide::Left => [
            point(x1, y1 + (-a1).max(0)),
            point(x1, y2 - (-a2).max(0)),
            point(x2, y2 - a2.max(0)),
            point(x2, y1 + a1.max(0)),
        ],
        BoxSide::Right => [
            point(x1, y1 + a1.max(0)),
            point(x1, y2 - a2.max(0)),
            point(x2, y2 - (-a2).max(0)),
            point(x2, y1 + (-a1).max(0)),
        ],
    };
    context.fill_path(&Path::polygon(&quad), line.color, line.antialias);
}
