//! Border Painting
//!
//! [§ 4 Borders](https://www.w3.org/TR/css-backgrounds-3/#borders)
//!
//! [`BoxBorderPainter`] turns four [`BorderEdge`]s and a border box into
//! [`GraphicsContext`] calls.
//!
//! Simple borders (one color, one style, solid or double) take a fast path
//! of one or two fills. Everything else is painted side by side:
//!
//! 1. Visible sides are sorted by alpha, style and side, then grouped by
//!    alpha ([`ComplexBorderInfo`]).
//! 2. Groups nest from most to least opaque, each translucent group in its
//!    own transparency layer, so corners shared inside a group blend once.
//! 3. Sides paint from least to most opaque. Where an adjacent side has not
//!    painted yet and fills its area, it will overdraw the shared corner, so
//!    no miter is needed. Otherwise the corner is clipped diagonally.
//!
//! Rounded sides with inner structure are painted by filling the whole
//! border shape under a per-side clip.

pub mod clip;
pub mod complex;
pub mod edge;
pub mod side;

use serde::{Deserialize, Serialize};

use crate::color::Color;
use crate::geometry::{BoxStrut, CornerRadii, RectF, RoundedRect, SizeF};
use crate::graphics_context::{GraphicsContext, StateSaver};
use crate::path::{FillRule, Path};
use crate::stroke::{StrokeData, StrokeStyle, stroke_is_dashed};

pub use clip::MiterType;
pub use complex::{ComplexBorderInfo, OpacityGroup};
pub use edge::{BorderEdge, BorderStyle, BoxSide, DoubleBorderStripe, EdgeFlags};
pub use side::{BoxSideLine, calculate_border_style_color, draw_line_for_box_side};

use clip::border_side_clip_polygons;

/// Knobs for border painting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BorderPaintOptions {
    /// Use single-fill shortcuts for uniform solid and double borders.
    ///
    /// Turning this off forces every border through the per-side painter,
    /// which must produce the same pixels.
    pub allow_fast_path: bool,
}

impl Default for BorderPaintOptions {
    fn default() -> Self {
        Self {
            allow_fast_path: true,
        }
    }
}

/// Which properties every visible edge shares.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Uniformity {
    style: bool,
    width: bool,
    color: bool,
}

/// Arguments for painting one side through the rounded border shape.
#[derive(Debug, Clone, Copy)]
struct PathSide {
    border_thickness: i32,
    stroke_thickness: i32,
    side: BoxSide,
    color: Color,
    style: BorderStyle,
}

/// Paints the border (or outline) of one box.
#[derive(Debug, Clone)]
pub struct BoxBorderPainter {
    border_rect: RectF,
    radii: CornerRadii,
    outer_outsets: BoxStrut,
    edges: [BorderEdge; 4],
    outer: RoundedRect,
    inner: RoundedRect,
    visible_edge_count: usize,
    first_visible_edge: usize,
    visible_edge_set: EdgeFlags,
    uniformity: Uniformity,
    is_rounded: bool,
    has_transparency: bool,
    options: BorderPaintOptions,
}

#[allow(clippy::cast_precision_loss)]
const fn px(value: i32) -> f32 {
    value as f32
}

/// The sides sharing a corner with `side`, in clip-polygon order.
const fn adjacent_sides(side: BoxSide) -> (BoxSide, BoxSide) {
    match side {
        BoxSide::Top | BoxSide::Bottom => (BoxSide::Left, BoxSide::Right),
        BoxSide::Left | BoxSide::Right => (BoxSide::Top, BoxSide::Bottom),
    }
}

/// Inset, groove, ridge and outset shade top/left and bottom/right
/// differently, so their top-right and bottom-left corners change color.
fn has_unmatched_colors_at_corner(style: BorderStyle, side: BoxSide, adjacent: BoxSide) -> bool {
    if !matches!(
        style,
        BorderStyle::Inset | BorderStyle::Groove | BorderStyle::Ridge | BorderStyle::Outset
    ) {
        return false;
    }
    let flags = EdgeFlags::of(side) | EdgeFlags::of(adjacent);
    flags == (EdgeFlags::of(BoxSide::Top) | EdgeFlags::of(BoxSide::Right))
        || flags == (EdgeFlags::of(BoxSide::Bottom) | EdgeFlags::of(BoxSide::Left))
}

fn border_styles_require_miter(
    side: BoxSide,
    adjacent_side: BoxSide,
    style: BorderStyle,
    adjacent_style: BorderStyle,
) -> bool {
    if style == BorderStyle::Double
        || matches!(
            adjacent_style,
            BorderStyle::Double | BorderStyle::Groove | BorderStyle::Ridge
        )
    {
        return true;
    }
    if style.requires_clip_polygon() != adjacent_style.requires_clip_polygon() {
        return true;
    }
    if style != adjacent_style {
        return true;
    }
    has_unmatched_colors_at_corner(style, side, adjacent_side)
}

/// The adjacent side still has to paint and covers its whole area, so it
/// will paint over the shared corner.
fn will_overdraw(side: BoxSide, style: BorderStyle, completed_edges: EdgeFlags) -> bool {
    !completed_edges.includes(side) && style.fills_border_area()
}

/// Any miter that is hard, or any miter at all on a stroked style, has to
/// be applied as a clip.
fn miters_require_clipping(miter1: MiterType, miter2: MiterType, style: BorderStyle) -> bool {
    miter1 == MiterType::HardMiter
        || miter2 == MiterType::HardMiter
        || ((miter1 != MiterType::NoMiter || miter2 != MiterType::NoMiter)
            && style.requires_clip_polygon())
}

fn border_will_arc_inner_edge(first_radius: SizeF, second_radius: SizeF) -> bool {
    !first_radius.is_zero() || !second_radius.is_zero()
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn alpha_to_byte(alpha: f32) -> u8 {
    (alpha * 255.0).round().clamp(0.0, 255.0) as u8
}

/// Grow an unrenderable inner border into a renderable one for `side`.
///
/// Radii only overflow an inner edge when the radius on its other end is
/// zero, so the arc is shifted towards that corner. The corners not
/// touching `side` are squared off.
#[must_use]
pub fn calculate_adjusted_inner_border(inner: &RoundedRect, side: BoxSide) -> RoundedRect {
    const OVERSHOOT_TOLERANCE: f32 = 0.1;
    let mut radii = inner.radii;
    let mut rect = inner.rect;

    match side {
        BoxSide::Top => {
            let overshoot = radii.top_left.width + radii.top_right.width - rect.width;
            if overshoot > OVERSHOOT_TOLERANCE {
                rect.width += overshoot;
                if radii.top_left.width <= 0.0 {
                    rect.x -= overshoot;
                }
            }
            radii.bottom_left = SizeF::default();
            radii.bottom_right = SizeF::default();
            let max_radii = radii.top_left.height.max(radii.top_right.height);
            if max_radii > rect.height {
                rect.height = max_radii;
            }
        }
        BoxSide::Bottom => {
            let overshoot = radii.bottom_left.width + radii.bottom_right.width - rect.width;
            if overshoot > OVERSHOOT_TOLERANCE {
                rect.width += overshoot;
                if radii.bottom_left.width <= 0.0 {
                    rect.x -= overshoot;
                }
            }
            radii.top_left = SizeF::default();
            radii.top_right = SizeF::default();
            let max_radii = radii.bottom_left.height.max(radii.bottom_right.height);
            if max_radii > rect.height {
                rect.y += rect.height - max_radii;
                rect.height = max_radii;
            }
        }
        BoxSide::Left => {
            let overshoot = radii.top_left.height + radii.bottom_left.height - rect.height;
            if overshoot > OVERSHOOT_TOLERANCE {
                rect.height += overshoot;
                if radii.top_left.height <= 0.0 {
                    rect.y -= overshoot;
                }
            }
            radii.top_right = SizeF::default();
            radii.bottom_right = SizeF::default();
            let max_radii = radii.top_left.width.max(radii.bottom_left.width);
            if max_radii > rect.width {
                rect.width = max_radii;
            }
        }
        BoxSide::Right => {
            let overshoot = radii.top_right.height + radii.bottom_right.height - rect.height;
            if overshoot > OVERSHOOT_TOLERANCE {
                rect.height += overshoot;
                if radii.top_right.height <= 0.0 {
                    rect.y -= overshoot;
                }
            }
            radii.top_left = SizeF::default();
            radii.bottom_left = SizeF::default();
            let max_radii = radii.top_right.width.max(radii.bottom_right.width);
            if max_radii > rect.width {
                rect.x += rect.width - max_radii;
                rect.width = max_radii;
            }
        }
    }

    RoundedRect { rect, radii }
}

impl BoxBorderPainter {
    /// A painter for the border of `border_rect`.
    ///
    /// `edges` are in top, right, bottom, left order. `radii` are the
    /// specified `border-radius` values; they are scaled down if they
    /// overlap.
    #[must_use]
    pub fn new(border_rect: RectF, edges: [BorderEdge; 4], radii: CornerRadii) -> Self {
        let mut painter = Self::with_edges(border_rect, edges, radii, BoxStrut::default());
        painter.outer = painter.rounded_border_with_outsets(BoxStrut::default());
        let widths = BoxStrut::new(
            px(painter.edges[0].width()),
            px(painter.edges[1].width()),
            px(painter.edges[2].width()),
            px(painter.edges[3].width()),
        );
        painter.inner = painter.outer.inset(widths);

        // The snapped border box may be smaller than the borders.
        let max_width = painter.outer.rect.width;
        let max_height = painter.outer.rect.height;
        painter.edges[BoxSide::Top.index()].clamp_width(max_height);
        painter.edges[BoxSide::Right.index()].clamp_width(max_width);
        painter.edges[BoxSide::Bottom.index()].clamp_width(max_height);
        painter.edges[BoxSide::Left.index()].clamp_width(max_width);

        painter.is_rounded = painter.outer.is_rounded();
        painter
    }

    /// A painter for an outline around `border_rect`.
    ///
    /// [§ 3 Outline Properties](https://www.w3.org/TR/css-ui-4/#outline-props)
    ///
    /// The outline is `width` thick on every side and starts
    /// `inner_outsets` outside the border box.
    #[must_use]
    pub fn for_outline(
        border_rect: RectF,
        radii: CornerRadii,
        edge: BorderEdge,
        inner_outsets: BoxStrut,
    ) -> Self {
        let outer_outsets = inner_outsets + BoxStrut::uniform(px(edge.width()));
        let mut painter = Self::with_edges(border_rect, [edge; 4], radii, outer_outsets);
        painter.outer = painter.rounded_border_with_outsets(outer_outsets);
        painter.inner = painter.rounded_border_with_outsets(inner_outsets);
        painter.is_rounded = painter.outer.is_rounded();
        painter
    }

    /// Replace the paint options.
    #[must_use]
    pub const fn with_options(mut self, options: BorderPaintOptions) -> Self {
        self.options = options;
        self
    }

    fn with_edges(
        border_rect: RectF,
        edges: [BorderEdge; 4],
        radii: CornerRadii,
        outer_outsets: BoxStrut,
    ) -> Self {
        let mut painter = Self {
            border_rect,
            radii,
            outer_outsets,
            edges,
            outer: RoundedRect::default(),
            inner: RoundedRect::default(),
            visible_edge_count: 0,
            first_visible_edge: 0,
            visible_edge_set: EdgeFlags::NONE,
            uniformity: Uniformity {
                style: true,
                width: true,
                color: true,
            },
            is_rounded: false,
            has_transparency: false,
            options: BorderPaintOptions::default(),
        };
        painter.compute_border_properties();
        painter
    }

    fn compute_border_properties(&mut self) {
        for side in BoxSide::ALL {
            let edge = self.edges[side.index()];
            if !edge.should_render() {
                if edge.present_but_invisible() {
                    self.uniformity.width = false;
                    self.uniformity.color = false;
                }
                continue;
            }

            self.visible_edge_count += 1;
            self.visible_edge_set |= EdgeFlags::of(side);
            if !edge.color().is_opaque() {
                self.has_transparency = true;
            }

            if self.visible_edge_count == 1 {
                self.first_visible_edge = side.index();
                continue;
            }

            let first = self.edges[self.first_visible_edge];
            self.uniformity.style &= edge.style() == first.style();
            self.uniformity.width &= edge.width() == first.width();
            self.uniformity.color &= edge.shares_color_with(&first);
        }
    }

    /// The edge on `side` after width clamping.
    #[must_use]
    pub const fn edge(&self, side: BoxSide) -> &BorderEdge {
        &self.edges[side.index()]
    }

    /// The snapped outer border shape.
    #[must_use]
    pub const fn outer(&self) -> &RoundedRect {
        &self.outer
    }

    /// The snapped inner border (padding edge) shape.
    #[must_use]
    pub const fn inner(&self) -> &RoundedRect {
        &self.inner
    }

    /// Sides that paint something.
    #[must_use]
    pub const fn visible_edge_set(&self) -> EdgeFlags {
        self.visible_edge_set
    }

    const fn first_edge(&self) -> &BorderEdge {
        &self.edges[self.first_visible_edge]
    }

    /// The border box grown by `outsets`, snapped, with radii grown to
    /// match and scaled to fit.
    fn rounded_border_with_outsets(&self, outsets: BoxStrut) -> RoundedRect {
        RoundedRect::new(
            self.border_rect.outset(outsets).snapped(),
            self.radii.outset(outsets),
        )
        .with_constrained_radii()
    }

    fn double_stripe_outsets(&self, stripe: DoubleBorderStripe) -> BoxStrut {
        let [top, right, bottom, left] = self.edges.map(|edge| edge.double_stripe_width(stripe));
        self.outer_outsets - BoxStrut::new(top, right, bottom, left)
    }

    fn center_outsets(&self) -> BoxStrut {
        let [top, right, bottom, left] = self.edges.map(|edge| px(edge.used_width()) * 0.5);
        self.outer_outsets - BoxStrut::new(top, right, bottom, left)
    }

    /// The part of the snapped outer rect covered by the side's width.
    fn side_rect(&self, side: BoxSide) -> RectF {
        let mut rect = self.outer.rect.snapped();
        let width = px(self.edge(side).width());
        match side {
            BoxSide::Top => rect.height = width,
            BoxSide::Bottom => {
                rect.y = rect.bottom() - width;
                rect.height = width;
            }
            BoxSide::Left => rect.width = width,
            BoxSide::Right => {
                rect.x = rect.right() - width;
                rect.width = width;
            }
        }
        rect
    }

    /// Paint the border.
    ///
    /// Nothing is drawn when no edge is visible or the border box is empty.
    pub fn paint(&self, context: &mut dyn GraphicsContext) {
        if self.visible_edge_count == 0 || self.outer.rect.is_empty() {
            return;
        }

        if self.options.allow_fast_path && self.paint_border_fast_path(context) {
            log::trace!(target: "paint", "border fast path for {:?}", self.outer.rect);
            return;
        }

        let clip_to_outer_border = self.outer.is_rounded();
        let mut context = StateSaver::new(context, clip_to_outer_border);
        if clip_to_outer_border {
            context.clip_rounded_rect(&self.outer);
            if self.inner.is_renderable() && !self.inner.is_empty() {
                context.clip_out_rounded_rect(&self.inner);
            }
        }

        let border_info = ComplexBorderInfo::new(&self.edges, self.visible_edge_set);
        log::trace!(
            target: "paint",
            "border with {} opacity groups for {:?}",
            border_info.opacity_groups.len(),
            self.outer.rect
        );
        let _ = self.paint_opacity_group(&mut *context, &border_info, 0, 1.0);
    }

    /// One or two fills for uniform solid and double borders, or a single
    /// path for a translucent solid border with missing sides.
    fn paint_border_fast_path(&self, context: &mut dyn GraphicsContext) -> bool {
        if !self.uniformity.color || !self.uniformity.style || !self.inner.is_renderable() {
            return false;
        }
        let first = self.first_edge();
        if !matches!(first.style(), BorderStyle::Solid | BorderStyle::Double) {
            return false;
        }

        if self.visible_edge_set == EdgeFlags::ALL {
            if first.style() == BorderStyle::Solid {
                if self.uniformity.width && !self.outer.is_rounded() {
                    // Four equal sides, square corners: one stroked rect.
                    let width = px(first.width());
                    let stroke_rect = self
                        .outer
                        .rect
                        .snapped()
                        .inset(BoxStrut::uniform(width / 2.0));
                    context.stroke_rect(stroke_rect, width, first.color(), true);
                } else {
                    context.fill_drrect(&self.outer, &self.inner, first.color());
                }
            } else {
                self.draw_double_border(context);
            }
            return true;
        }

        // Only faster than the per-side painter when it saves a layer.
        if first.style() == BorderStyle::Solid && !self.outer.is_rounded() && self.has_transparency {
            let mut path = Path::new();
            path.set_fill_rule(FillRule::NonZero);
            for side in BoxSide::ALL {
                if self.edge(side).should_render() {
                    path.add_rect(self.side_rect(side));
                }
            }
            context.fill_path(&path, first.color(), true);
            return true;
        }

        false
    }

    fn draw_double_border(&self, context: &mut dyn GraphicsContext) {
        let color = self.first_edge().color();
        let force_rectangular = !self.outer.is_rounded() && !self.inner.is_rounded();

        let mut outer_third_rect =
            self.rounded_border_with_outsets(self.double_stripe_outsets(DoubleBorderStripe::Outer));
        if force_rectangular {
            outer_third_rect.radii = CornerRadii::default();
        }
        context.fill_drrect(&self.outer, &outer_third_rect, color);

        let mut inner_third_rect =
            self.rounded_border_with_outsets(self.double_stripe_outsets(DoubleBorderStripe::Inner));
        if force_rectangular {
            inner_third_rect.radii = CornerRadii::default();
        }
        context.fill_drrect(&inner_third_rect, &self.inner, color);
    }

    /// Paint group `index` counted from the most opaque, with every less
    /// opaque group nested inside it.
    ///
    /// Returns the sides painted so far. Invisible sides count as painted so
    /// they never overdraw anything.
    fn paint_opacity_group(
        &self,
        context: &mut dyn GraphicsContext,
        border_info: &ComplexBorderInfo,
        index: usize,
        mut effective_opacity: f32,
    ) -> EdgeFlags {
        debug_assert!(effective_opacity > 0.0 && effective_opacity <= 1.0);
        let group_count = border_info.opacity_groups.len();
        if index >= group_count {
            return !self.visible_edge_set;
        }

        let group = &border_info.opacity_groups[group_count - index - 1];
        let mut paint_alpha = group.opacity() / effective_opacity;

        // The least opaque group can skip its layer when none of its sides
        // share a corner.
        let needs_layer = group.alpha != u8::MAX
            && (group.edge_flags.includes_adjacent_edges() || index + 1 < group_count);

        if needs_layer {
            context.begin_layer(group.opacity() / effective_opacity);
            effective_opacity = group.opacity();
            paint_alpha = 1.0;
        }

        let mut completed_edges =
            self.paint_opacity_group(context, border_info, index + 1, effective_opacity);

        for &side in &group.sides {
            self.paint_side(context, border_info, side, paint_alpha, completed_edges);
            completed_edges |= EdgeFlags::of(side);
        }

        if needs_layer {
            context.end_layer();
        }
        completed_edges
    }

    fn paint_side(
        &self,
        context: &mut dyn GraphicsContext,
        border_info: &ComplexBorderInfo,
        side: BoxSide,
        alpha: f32,
        completed_edges: EdgeFlags,
    ) {
        let edge = self.edge(side);
        debug_assert!(edge.should_render());
        let color = edge.color().with_alpha(alpha_to_byte(alpha));

        let radii = &self.inner.radii;
        let (corner1, corner2) = match side {
            BoxSide::Top => (radii.top_left, radii.top_right),
            BoxSide::Bottom => (radii.bottom_left, radii.bottom_right),
            BoxSide::Left => (radii.bottom_left, radii.top_left),
            BoxSide::Right => (radii.bottom_right, radii.top_right),
        };
        let use_path = self.is_rounded
            && (edge.style().has_inner_detail() || border_will_arc_inner_edge(corner1, corner2));

        if use_path {
            self.paint_side_from_path(context, side, color);
        } else {
            self.paint_side_with_rects(context, self.side_rect(side), side, color, completed_edges);
        }
    }

    fn paint_side_from_path(
        &self,
        context: &mut dyn GraphicsContext,
        side: BoxSide,
        color: Color,
    ) {
        let edge = self.edge(side);
        debug_assert!(edge.width() > 0);
        let (adjacent_side1, adjacent_side2) = adjacent_sides(side);
        let corner_miter = |adjacent_side| {
            if self.colors_match_at_corner(side, adjacent_side) {
                MiterType::HardMiter
            } else {
                MiterType::SoftMiter
            }
        };
        let miter1 = corner_miter(adjacent_side1);
        let miter2 = corner_miter(adjacent_side2);

        let mut context = StateSaver::new(context, true);
        self.clip_border_side_polygon(&mut *context, side, miter1, miter2);
        if !self.inner.is_renderable() {
            let adjusted_inner_rect = calculate_adjusted_inner_border(&self.inner, side);
            if !adjusted_inner_rect.is_empty() {
                context.clip_out_rounded_rect(&adjusted_inner_rect);
            }
        }

        let stroke_thickness = edge
            .width()
            .max(self.edge(adjacent_side1).width())
            .max(self.edge(adjacent_side2).width());
        self.draw_box_side_from_path(
            &mut *context,
            PathSide {
                border_thickness: edge.width(),
                stroke_thickness,
                side,
                color,
                style: edge.style(),
            },
        );
    }

    fn paint_side_with_rects(
        &self,
        context: &mut dyn GraphicsContext,
        side_rect: RectF,
        side: BoxSide,
        color: Color,
        completed_edges: EdgeFlags,
    ) {
        let edge = self.edge(side);
        debug_assert!(edge.width() > 0);
        let (adjacent_side1, adjacent_side2) = adjacent_sides(side);

        let mut miter1 = self.compute_miter(side, adjacent_side1, completed_edges);
        let mut miter2 = self.compute_miter(side, adjacent_side2, completed_edges);
        let should_clip = miters_require_clipping(miter1, miter2, edge.style());

        let mut context = StateSaver::new(context, should_clip);
        if should_clip {
            self.clip_border_side_polygon(&mut *context, side, miter1, miter2);
            // The clip applies the miters.
            miter1 = MiterType::NoMiter;
            miter2 = MiterType::NoMiter;
        }

        let adjacent_width = |miter, adjacent_side| {
            if miter == MiterType::NoMiter {
                0
            } else {
                self.edge(adjacent_side).width()
            }
        };
        let line = BoxSideLine {
            adjacent_width1: adjacent_width(miter1, adjacent_side1),
            adjacent_width2: adjacent_width(miter2, adjacent_side2),
            ..BoxSideLine::from_rect(side_rect, side, color, edge.style())
        };
        draw_line_for_box_side(&mut *context, &line);
    }

    fn compute_miter(
        &self,
        side: BoxSide,
        adjacent_side: BoxSide,
        completed_edges: EdgeFlags,
    ) -> MiterType {
        let adjacent_edge = self.edge(adjacent_side);
        if adjacent_edge.used_width() == 0 {
            return MiterType::NoMiter;
        }
        if will_overdraw(adjacent_side, adjacent_edge.style(), completed_edges) {
            return MiterType::NoMiter;
        }
        if !self.colors_match_at_corner(side, adjacent_side) {
            return MiterType::SoftMiter;
        }
        if border_styles_require_miter(
            side,
            adjacent_side,
            self.edge(side).style(),
            adjacent_edge.style(),
        ) {
            return MiterType::HardMiter;
        }
        MiterType::NoMiter
    }

    fn colors_match_at_corner(&self, side: BoxSide, adjacent_side: BoxSide) -> bool {
        let edge = self.edge(side);
        let adjacent_edge = self.edge(adjacent_side);
        adjacent_edge.should_render()
            && edge.shares_color_with(adjacent_edge)
            && !has_unmatched_colors_at_corner(edge.style(), side, adjacent_side)
    }

    fn clip_border_side_polygon(
        &self,
        context: &mut dyn GraphicsContext,
        side: BoxSide,
        first_miter: MiterType,
        second_miter: MiterType,
    ) {
        for polygon in
            border_side_clip_polygons(&self.outer, &self.inner, side, first_miter, second_miter)
        {
            context.clip_path(&Path::polygon(&polygon.points), polygon.antialias);
        }
    }

    /// Fill the border shape in one style. The caller has clipped to the
    /// side, inside the rounded outer clip.
    fn draw_box_side_from_path(&self, context: &mut dyn GraphicsContext, side_paint: PathSide) {
        if side_paint.border_thickness <= 0 {
            return;
        }

        let color = match side_paint.style.effective(side_paint.border_thickness) {
            BorderStyle::None | BorderStyle::Hidden => return,
            style @ (BorderStyle::Dotted | BorderStyle::Dashed) => {
                self.draw_dashed_dotted_box_side_from_path(context, side_paint, style);
                return;
            }
            BorderStyle::Double => {
                self.draw_double_box_side_from_path(context, side_paint);
                return;
            }
            style @ (BorderStyle::Ridge | BorderStyle::Groove) => {
                self.draw_ridge_groove_box_side_from_path(context, side_paint, style);
                return;
            }
            style @ (BorderStyle::Inset | BorderStyle::Outset) => {
                calculate_border_style_color(style, side_paint.side, side_paint.color)
            }
            BorderStyle::Solid => side_paint.color,
        };
        // The clips carry the rounded shape and its anti-aliasing.
        context.fill_rect(self.outer.rect, color, false);
    }

    /// Stroke the line through the middle of the border.
    fn draw_dashed_dotted_box_side_from_path(
        &self,
        context: &mut dyn GraphicsContext,
        side_paint: PathSide,
        style: BorderStyle,
    ) {
        let centerline =
            Path::from_rounded_rect(&self.rounded_border_with_outsets(self.center_outsets()));
        let stroke_style = if style == BorderStyle::Dashed {
            StrokeStyle::Dashed
        } else {
            StrokeStyle::Dotted
        };
        let border_thickness = px(side_paint.border_thickness);
        let length = centerline.length();

        let stroke = if stroke_is_dashed(border_thickness, stroke_style) {
            // Half the stroke falls outside the side and is clipped off. The
            // extra tenth leaves room for the clip to anti-alias.
            const THICKNESS_MULTIPLIER: f32 = 2.0 * 1.1;
            StrokeData::patterned(
                px(side_paint.stroke_thickness) * THICKNESS_MULTIPLIER,
                stroke_style,
                length,
                border_thickness,
                true,
            )
        } else {
            // Round dots as wide as the border.
            StrokeData::patterned(border_thickness, StrokeStyle::Dotted, length, border_thickness, true)
        };
        context.stroke_path(&centerline, &stroke, side_paint.color, true);
    }

    fn draw_double_box_side_from_path(&self, context: &mut dyn GraphicsContext, side_paint: PathSide) {
        let solid = PathSide {
            style: BorderStyle::Solid,
            ..side_paint
        };

        // Inner stripe: everything inside its outer edge.
        {
            let mut context = StateSaver::new(&mut *context, true);
            let inner_clip = self
                .rounded_border_with_outsets(self.double_stripe_outsets(DoubleBorderStripe::Inner));
            context.clip_rounded_rect(&inner_clip);
            self.draw_box_side_from_path(&mut *context, solid);
        }

        // Outer stripe: everything outside its inner edge.
        let mut context = StateSaver::new(context, true);
        let outer_clip =
            self.rounded_border_with_outsets(self.double_stripe_outsets(DoubleBorderStripe::Outer));
        context.clip_out_rounded_rect(&outer_clip);
        self.draw_box_side_from_path(&mut *context, solid);
    }

    fn draw_ridge_groove_box_side_from_path(
        &self,
        context: &mut dyn GraphicsContext,
        side_paint: PathSide,
        style: BorderStyle,
    ) {
        let (s1, s2) = if style == BorderStyle::Groove {
            (BorderStyle::Inset, BorderStyle::Outset)
        } else {
            (BorderStyle::Outset, BorderStyle::Inset)
        };

        // Whole side in the outer shade, then the inner half over it.
        self.draw_box_side_from_path(
            context,
            PathSide {
                style: s1,
                ..side_paint
            },
        );

        let mut context = StateSaver::new(context, true);
        let clip_rect = self.rounded_border_with_outsets(self.center_outsets());
        context.clip_rounded_rect(&clip_rect);
        self.draw_box_side_from_path(
            &mut *context,
            PathSide {
                style: s2,
                ..side_paint
            },
        );
    }
}
