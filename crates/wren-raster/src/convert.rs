//! Conversions from paint types to tiny-skia types.

use tiny_skia::{Paint, PathBuilder, Stroke, StrokeDash};
use wren_paint::{Color, FillRule, LineCap, Path, PathVerb, RectF, StrokeData};

/// Build a tiny-skia path. Returns `None` for paths with no area to
/// cover, such as an empty path or a lone `move_to`.
pub fn path(path: &Path) -> Option<tiny_skia::Path> {
    let mut builder = PathBuilder::new();
    for verb in path.verbs() {
        match *verb {
            PathVerb::MoveTo { to } => builder.move_to(to.x, to.y),
            PathVerb::LineTo { to } => builder.line_to(to.x, to.y),
            PathVerb::CubicTo { c1, c2, to } => builder.cubic_to(c1.x, c1.y, c2.x, c2.y, to.x, to.y),
            PathVerb::Close => builder.close(),
        }
    }
    builder.finish()
}

/// A rectangle path, `None` when the rectangle is empty.
pub fn rect_path(rect: RectF) -> Option<tiny_skia::Path> {
    tiny_skia::Rect::from_xywh(rect.x, rect.y, rect.width, rect.height).map(PathBuilder::from_rect)
}

pub const fn fill_rule(rule: FillRule) -> tiny_skia::FillRule {
    match rule {
        FillRule::NonZero => tiny_skia::FillRule::Winding,
        FillRule::EvenOdd => tiny_skia::FillRule::EvenOdd,
    }
}

pub fn paint(color: Color, antialias: bool) -> Paint<'static> {
    let mut paint = Paint::default();
    paint.set_color_rgba8(color.r, color.g, color.b, color.a);
    paint.anti_alias = antialias;
    paint
}

const fn line_cap(cap: LineCap) -> tiny_skia::LineCap {
    match cap {
        LineCap::Butt => tiny_skia::LineCap::Butt,
        LineCap::Round => tiny_skia::LineCap::Round,
        LineCap::Square => tiny_skia::LineCap::Square,
    }
}

/// A stroke for `data`. A dash pattern tiny-skia rejects (odd length or
/// zero total) falls back to a continuous line.
pub fn stroke(data: &StrokeData) -> Stroke {
    let dash = data.dash.as_ref().and_then(|pattern| {
        let dash = StrokeDash::new(pattern.intervals.clone(), pattern.phase);
        if dash.is_none() {
            log::debug!(target: "raster", "ignoring unusable dash pattern {:?}", pattern.intervals);
        }
        dash
    });
    Stroke {
        width: data.thickness,
        line_cap: line_cap(data.line_cap),
        dash,
        ..Stroke::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wren_paint::{DashPattern, PointF, StrokeStyle};

    #[test]
    fn test_lone_move_to_has_no_path() {
        let mut lone = Path::new();
        lone.move_to(PointF::new(1.0, 1.0));
        assert!(path(&lone).is_none());
        assert!(rect_path(RectF::new(0.0, 0.0, 0.0, 5.0)).is_none());
    }

    #[test]
    fn test_invalid_dash_falls_back_to_solid() {
        let data = StrokeData {
            thickness: 2.0,
            style: StrokeStyle::Dashed,
            line_cap: LineCap::Butt,
            dash: Some(DashPattern {
                intervals: vec![3.0],
                phase: 0.0,
            }),
        };
        let stroke = stroke(&data);
        assert!(stroke.dash.is_none());
        assert!((stroke.width - 2.0).abs() < f32::EPSILON);
    }
}
