//! Vector paths handed to the drawing context.

use serde::{Deserialize, Serialize};

use crate::geometry::{PointF, RectF, RoundedRect};

/// Control point distance for a quarter-circle cubic.
const KAPPA: f32 = 0.552_284_8;

/// Segments used to measure a cubic.
const CUBIC_MEASURE_STEPS: u16 = 16;

/// How overlapping sub-paths combine when filled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FillRule {
    /// Non-zero winding.
    #[default]
    NonZero,
    /// Even-odd parity.
    EvenOdd,
}

/// One path segment.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", tag = "verb")]
pub enum PathVerb {
    /// Start a new contour.
    MoveTo {
        /// Contour start.
        to: PointF,
    },
    /// Straight segment.
    LineTo {
        /// End point.
        to: PointF,
    },
    /// Cubic Bézier segment.
    CubicTo {
        /// First control point.
        c1: PointF,
        /// Second control point.
        c2: PointF,
        /// End point.
        to: PointF,
    },
    /// Close the current contour.
    Close,
}

/// A sequence of contours.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Path {
    verbs: Vec<PathVerb>,
    fill_rule: FillRule,
}

impl Path {
    /// An empty path.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            verbs: Vec::new(),
            fill_rule: FillRule::NonZero,
        }
    }

    /// A closed polygon through `points`.
    #[must_use]
    pub fn polygon(points: &[PointF]) -> Self {
        let mut path = Self::new();
        if let Some((first, rest)) = points.split_first() {
            path.move_to(*first);
            for point in rest {
                path.line_to(*point);
            }
            path.close();
        }
        path
    }

    /// A path containing one rounded rectangle.
    #[must_use]
    pub fn from_rounded_rect(rect: &RoundedRect) -> Self {
        let mut path = Self::new();
        path.add_rounded_rect(rect);
        path
    }

    /// The segments in order.
    #[must_use]
    pub fn verbs(&self) -> &[PathVerb] {
        &self.verbs
    }

    /// The fill rule.
    #[must_use]
    pub const fn fill_rule(&self) -> FillRule {
        self.fill_rule
    }

    /// Change the fill rule.
    pub const fn set_fill_rule(&mut self, fill_rule: FillRule) {
        self.fill_rule = fill_rule;
    }

    /// No segments.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.verbs.is_empty()
    }

    /// Begin a contour.
    pub fn move_to(&mut self, to: PointF) {
        self.verbs.push(PathVerb::MoveTo { to });
    }

    /// Add a straight segment.
    pub fn line_to(&mut self, to: PointF) {
        self.verbs.push(PathVerb::LineTo { to });
    }

    /// Add a cubic segment.
    pub fn cubic_to(&mut self, c1: PointF, c2: PointF, to: PointF) {
        self.verbs.push(PathVerb::CubicTo { c1, c2, to });
    }

    /// Close the current contour.
    pub fn close(&mut self) {
        self.verbs.push(PathVerb::Close);
    }

    /// Add a clockwise rectangle contour.
    pub fn add_rect(&mut self, rect: RectF) {
        self.move_to(rect.origin());
        self.line_to(rect.top_right());
        self.line_to(rect.bottom_right());
        self.line_to(rect.bottom_left());
        self.close();
    }

    /// Add a clockwise rounded rectangle contour starting at the end of the
    /// top-left corner.
    pub fn add_rounded_rect(&mut self, rounded: &RoundedRect) {
        if !rounded.is_rounded() {
            self.add_rect(rounded.rect);
            return;
        }
        let RectF {
            x,
            y,
            width,
            height,
        } = rounded.rect;
        let right = x + width;
        let bottom = y + height;
        let r = rounded.radii;

        self.move_to(PointF::new(x + r.top_left.width, y));
        self.line_to(PointF::new(right - r.top_right.width, y));
        self.corner(
            PointF::new(right - r.top_right.width, y),
            PointF::new(right, y),
            PointF::new(right, y + r.top_right.height),
        );
        self.line_to(PointF::new(right, bottom - r.bottom_right.height));
        self.corner(
            PointF::new(right, bottom - r.bottom_right.height),
            PointF::new(right, bottom),
            PointF::new(right - r.bottom_right.width, bottom),
        );
        self.line_to(PointF::new(x + r.bottom_left.width, bottom));
        self.corner(
            PointF::new(x + r.bottom_left.width, bottom),
            PointF::new(x, bottom),
            PointF::new(x, bottom - r.bottom_left.height),
        );
        self.line_to(PointF::new(x, y + r.top_left.height));
        self.corner(
            PointF::new(x, y + r.top_left.height),
            PointF::new(x, y),
            PointF::new(x + r.top_left.width, y),
        );
        self.close();
    }

    /// Quarter ellipse from `start` to `end` bulging towards `corner`.
    fn corner(&mut self, start: PointF, corner: PointF, end: PointF) {
        if start == end {
            return;
        }
        let c1 = PointF::new(
            (corner.x - start.x).mul_add(KAPPA, start.x),
            (corner.y - start.y).mul_add(KAPPA, start.y),
        );
        let c2 = PointF::new(
            (corner.x - end.x).mul_add(KAPPA, end.x),
            (corner.y - end.y).mul_add(KAPPA, end.y),
        );
        self.cubic_to(c1, c2, end);
    }

    /// Approximate arc length of every contour, including closing segments.
    #[must_use]
    pub fn length(&self) -> f32 {
        let distance = |a: PointF, b: PointF| (b.x - a.x).hypot(b.y - a.y);
        let mut total = 0.0;
        let mut start = PointF::default();
        let mut current = PointF::default();
        for verb in &self.verbs {
            match *verb {
                PathVerb::MoveTo { to } => {
                    start = to;
                    current = to;
                }
                PathVerb::LineTo { to } => {
                    total += distance(current, to);
                    current = to;
                }
                PathVerb::CubicTo { c1, c2, to } => {
                    let mut previous = current;
                    for step in 1..=CUBIC_MEASURE_STEPS {
                        let t = f32::from(step) / f32::from(CUBIC_MEASURE_STEPS);
                        let point = cubic_point(current, c1, c2, to, t);
                        total += distance(previous, point);
                        previous = point;
                    }
                    current = to;
                }
                PathVerb::Close => {
                    total += distance(current, start);
                    current = start;
                }
            }
        }
        total
    }
}

fn cubic_point(p0: PointF, p1: PointF, p2: PointF, p3: PointF, t: f32) -> PointF {
    let u = 1.0 - t;
    let a = u * u * u;
    let b = 3.0 * u * u * t;
    let c = 3.0 * u * t * t;
    let d = t * t * t;
    PointF::new(
        a * p0.x + b * p1.x + c * p2.x + d * p3.x,
        a * p0.y + b * p1.y + c * p2.y + d * p3.y,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::CornerRadii;

    #[test]
    fn test_rect_length_is_perimeter() {
        let mut path = Path::new();
        path.add_rect(RectF::new(0.0, 0.0, 10.0, 20.0));
        assert!((path.length() - 60.0).abs() < 1e-4);
    }

    #[test]
    fn test_circle_length_close_to_circumference() {
        let rounded = RoundedRect::new(RectF::new(0.0, 0.0, 20.0, 20.0), CornerRadii::uniform(10.0));
        let length = Path::from_rounded_rect(&rounded).length();
        let expected = 2.0 * std::f32::consts::PI * 10.0;
        assert!((length - expected).abs() < 0.1, "length {length}, expected {expected}");
    }

    #[test]
    fn test_square_rounded_rect_is_plain_rect() {
        let rounded = RoundedRect::from_rect(RectF::new(1.0, 2.0, 3.0, 4.0));
        assert_eq!(Path::from_rounded_rect(&rounded).verbs().len(), 5);
    }
}
