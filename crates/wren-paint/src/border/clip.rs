//! Clip polygons that miter a border side at its corners.
//!
//! Each side owns the quadrilateral between its outer corners and the
//! matching inner corners:
//!
//! ```text
//!         0----------------3
//!       3  \              /  0
//!       |\  1----------- 2  /|
//!       | 2                1 |
//!       | |                | |
//!       | 1                2 |
//!       |/  2------------1  \|
//!       0  /              \  3
//!         3----------------0
//! ```
//!
//! Rounded inner corners pull points 1 and 2 inwards so the quad still
//! covers half of the corner. When an unrenderable inner rect would cut the
//! corner off, a fifth point turns the quad into a pentagon.

use crate::border::edge::BoxSide;
use crate::geometry::{PointF, RoundedRect};

/// Overlap added between the two halves of a split clip.
const EXTENSION_LENGTH: f32 = 0.1;

/// How a side treats one of its corners.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MiterType {
    /// The adjacent side overdraws the corner, or there is none.
    NoMiter,
    /// Anti-aliased diagonal clip where colors change.
    SoftMiter,
    /// Aliased diagonal clip for crisp same-color seams.
    HardMiter,
}

/// One polygon to intersect the clip with.
#[derive(Debug, Clone, PartialEq)]
pub struct ClipPolygon {
    /// Vertices in order.
    pub points: Vec<PointF>,
    /// Soft edges.
    pub antialias: bool,
}

/// The point where line `p1-p2` crosses line `d1-d2`. Parallel lines leave
/// `target` unchanged.
fn intersect_into(target: &mut PointF, p1: PointF, p2: PointF, d1: PointF, d2: PointF) {
    let px_length = p2.x - p1.x;
    let py_length = p2.y - p1.y;
    let dx_length = d2.x - d1.x;
    let dy_length = d2.y - d1.y;

    let denom = px_length.mul_add(dy_length, -(py_length * dx_length));
    if denom == 0.0 {
        return;
    }
    let param = (d1.x - p1.x).mul_add(dy_length, -((d1.y - p1.y) * dx_length)) / denom;
    target.x = param.mul_add(px_length, p1.x);
    target.y = param.mul_add(py_length, p1.y);
}

fn intersection(p1: PointF, p2: PointF, d1: PointF, d2: PointF) -> PointF {
    let mut point = PointF::default();
    intersect_into(&mut point, p1, p2, d1, d2);
    point
}

/// Clip polygons for painting `side` with the given corner miters.
///
/// `first_miter` is the corner shared with the first adjacent side: left
/// for the top and bottom sides, top for the left and right. Two equal
/// miters give a
/// single polygon. Different miters give one polygon per mitered corner,
/// each covering the whole side but cut diagonally at its own corner.
#[must_use]
#[allow(clippy::similar_names)]
pub fn border_side_clip_polygons(
    outer: &RoundedRect,
    inner: &RoundedRect,
    side: BoxSide,
    first_miter: MiterType,
    second_miter: MiterType,
) -> Vec<ClipPolygon> {
    debug_assert!(first_miter != MiterType::NoMiter || second_miter != MiterType::NoMiter);
    let (mut first_miter, mut second_miter) = (first_miter, second_miter);

    let ip = [
        inner.rect.origin(),
        inner.rect.top_right(),
        inner.rect.bottom_right(),
        inner.rect.bottom_left(),
    ];
    let op = [
        outer.rect.origin(),
        outer.rect.top_right(),
        outer.rect.bottom_right(),
        outer.rect.bottom_left(),
    ];
    let radii = inner.radii;

    let mut edge_quad: [PointF; 4];
    let mut edge_pentagon: Option<[PointF; 5]> = None;
    let mut bound_quad1: PointF;
    let mut bound_quad2: PointF;
    let extension_offset: PointF;

    match side {
        BoxSide::Top => {
            edge_quad = [op[0], ip[0], ip[1], op[1]];
            bound_quad1 = PointF::new(edge_quad[0].x, edge_quad[1].y);
            bound_quad2 = PointF::new(edge_quad[3].x, edge_quad[2].y);
            extension_offset = PointF::new(-EXTENSION_LENGTH, 0.0);

            if !radii.top_left.is_zero() {
                let [q0, q1, ..] = edge_quad;
                intersect_into(
                    &mut edge_quad[1],
                    q0,
                    q1,
                    PointF::new(q1.x + radii.top_left.width, q1.y),
                    PointF::new(q1.x, q1.y + radii.top_left.height),
                );
                bound_quad1.y = edge_quad[1].y;
                bound_quad2.y = edge_quad[1].y;

                if edge_quad[1].y > ip[2].y {
                    intersect_into(&mut edge_quad[1], q0, q1, ip[3], ip[2]);
                }
                if edge_quad[1].x > ip[2].x {
                    intersect_into(&mut edge_quad[1], q0, q1, ip[1], ip[2]);
                }
                let [q0, q1, q2, q3] = edge_quad;
                if q2.y < q1.y && q2.x > q1.x {
                    edge_pentagon = Some([q0, q1, PointF::new(q2.x, q1.y), q2, q3]);
                }
            }

            if !radii.top_right.is_zero() {
                let [_, _, q2, q3] = edge_quad;
                intersect_into(
                    &mut edge_quad[2],
                    q3,
                    q2,
                    PointF::new(q2.x - radii.top_right.width, q2.y),
                    PointF::new(q2.x, q2.y + radii.top_right.height),
                );
                if bound_quad1.y < edge_quad[2].y {
                    bound_quad1.y = edge_quad[2].y;
                    bound_quad2.y = edge_quad[2].y;
                }
                if edge_quad[2].y > ip[3].y {
                    intersect_into(&mut edge_quad[2], q3, q2, ip[3], ip[2]);
                }
                if edge_quad[2].x < ip[3].x {
                    intersect_into(&mut edge_quad[2], q3, q2, ip[0], ip[3]);
                }
                let [q0, q1, q2, q3] = edge_quad;
                if q2.y > q1.y && q2.x > q1.x {
                    edge_pentagon = Some([q0, q1, PointF::new(q1.x, q2.y), q2, q3]);
                }
            }
        }

        BoxSide::Left => {
            // Swap the order of adjacent edges to allow common code.
            std::mem::swap(&mut first_miter, &mut second_miter);
            edge_quad = [op[3], ip[3], ip[0], op[0]];
            bound_quad1 = PointF::new(edge_quad[1].x, edge_quad[0].y);
            bound_quad2 = PointF::new(edge_quad[2].x, edge_quad[3].y);
            extension_offset = PointF::new(0.0, EXTENSION_LENGTH);

            if !radii.top_left.is_zero() {
                let [_, _, q2, q3] = edge_quad;
                intersect_into(
                    &mut edge_quad[2],
                    q3,
                    q2,
                    PointF::new(q2.x + radii.top_left.width, q2.y),
                    PointF::new(q2.x, q2.y + radii.top_left.height),
                );
                bound_quad1.x = edge_quad[2].x;
                bound_quad2.x = edge_quad[2].x;

                if edge_quad[2].y > ip[2].y {
                    intersect_into(&mut edge_quad[2], q3, q2, ip[3], ip[2]);
                }
                if edge_quad[2].x > ip[2].x {
                    intersect_into(&mut edge_quad[2], q3, q2, ip[1], ip[2]);
                }
                let [q0, q1, q2, q3] = edge_quad;
                if q2.y < q1.y && q2.x > q1.x {
                    edge_pentagon = Some([q0, q1, PointF::new(q2.x, q1.y), q2, q3]);
                }
            }

            if !radii.bottom_left.is_zero() {
                let [q0, q1, ..] = edge_quad;
                intersect_into(
                    &mut edge_quad[1],
                    q0,
                    q1,
                    PointF::new(q1.x + radii.bottom_left.width, q1.y),
                    PointF::new(q1.x, q1.y - radii.bottom_left.height),
                );
                if bound_quad1.x < edge_quad[1].x {
                    bound_quad1.x = edge_quad[1].x;
                    bound_quad2.x = edge_quad[1].x;
                }
                if edge_quad[1].y < ip[1].y {
                    intersect_into(&mut edge_quad[1], q0, q1, ip[0], ip[1]);
                }
                if edge_quad[1].x > ip[1].x {
                    intersect_into(&mut edge_quad[1], q0, q1, ip[1], ip[2]);
                }
                let [q0, q1, q2, q3] = edge_quad;
                if q2.y < q1.y && q2.x < q1.x {
                    edge_pentagon = Some([q0, q1, PointF::new(q1.x, q2.y), q2, q3]);
                }
            }
        }

        BoxSide::Bottom => {
            // Swap the order of adjacent edges to allow common code.
            std::mem::swap(&mut first_miter, &mut second_miter);
            edge_quad = [op[2], ip[2], ip[3], op[3]];
            bound_quad1 = PointF::new(edge_quad[0].x, edge_quad[1].y);
            bound_quad2 = PointF::new(edge_quad[3].x, edge_quad[2].y);
            extension_offset = PointF::new(EXTENSION_LENGTH, 0.0);

            if !radii.bottom_left.is_zero() {
                let [_, _, q2, q3] = edge_quad;
                intersect_into(
                    &mut edge_quad[2],
                    q3,
                    q2,
                    PointF::new(q2.x + radii.bottom_left.width, q2.y),
                    PointF::new(q2.x, q2.y - radii.bottom_left.height),
                );
                bound_quad1.y = edge_quad[2].y;
                bound_quad2.y = edge_quad[2].y;

                if edge_quad[2].y < ip[1].y {
                    intersect_into(&mut edge_quad[2], q3, q2, ip[0], ip[1]);
                }
                if edge_quad[2].x > ip[1].x {
                    intersect_into(&mut edge_quad[2], q3, q2, ip[1], ip[2]);
                }
                let [q0, q1, q2, q3] = edge_quad;
                if q2.y < q1.y && q2.x < q1.x {
                    edge_pentagon = Some([q0, q1, PointF::new(q1.x, q2.y), q2, q3]);
                }
            }

            if !radii.bottom_right.is_zero() {
                let [q0, q1, ..] = edge_quad;
                intersect_into(
                    &mut edge_quad[1],
                    q0,
                    q1,
                    PointF::new(q1.x - radii.bottom_right.width, q1.y),
                    PointF::new(q1.x, q1.y - radii.bottom_right.height),
                );
                if bound_quad1.y > edge_quad[1].y {
                    bound_quad1.y = edge_quad[1].y;
                    bound_quad2.y = edge_quad[1].y;
                }
                if edge_quad[1].y < ip[0].y {
                    intersect_into(&mut edge_quad[1], q0, q1, ip[0], ip[1]);
                }
                if edge_quad[1].x < ip[0].x {
                    intersect_into(&mut edge_quad[1], q0, q1, ip[0], ip[3]);
                }
                let [q0, q1, q2, q3] = edge_quad;
                if q2.x < q1.x && q2.y > q1.y {
                    edge_pentagon = Some([q0, q1, PointF::new(q2.x, q1.y), q2, q3]);
                }
            }
        }

        BoxSide::Right => {
            edge_quad = [op[1], ip[1], ip[2], op[2]];
            bound_quad1 = PointF::new(edge_quad[1].x, edge_quad[0].y);
            bound_quad2 = PointF::new(edge_quad[2].x, edge_quad[3].y);
            extension_offset = PointF::new(0.0, -EXTENSION_LENGTH);

            if !radii.top_right.is_zero() {
                let [q0, q1, ..] = edge_quad;
                intersect_into(
                    &mut edge_quad[1],
                    q0,
                    q1,
                    PointF::new(q1.x - radii.top_right.width, q1.y),
                    PointF::new(q1.x, q1.y + radii.top_right.height),
                );
                bound_quad1.x = edge_quad[1].x;
                bound_quad2.x = edge_quad[1].x;

                if edge_quad[1].y > ip[3].y {
                    intersect_into(&mut edge_quad[1], q0, q1, ip[3], ip[2]);
                }
                if edge_quad[1].x < ip[3].x {
                    intersect_into(&mut edge_quad[1], q0, q1, ip[0], ip[3]);
                }
                let [q0, q1, q2, q3] = edge_quad;
                if q2.y > q1.y && q2.x > q1.x {
                    edge_pentagon = Some([q0, q1, PointF::new(q1.x, q2.y), q2, q3]);
                }
            }

            if !radii.bottom_right.is_zero() {
                let [_, _, q2, q3] = edge_quad;
                intersect_into(
                    &mut edge_quad[2],
                    q3,
                    q2,
                    PointF::new(q2.x - radii.bottom_right.width, q2.y),
                    PointF::new(q2.x, q2.y - radii.bottom_right.height),
                );
                if bound_quad1.x > edge_quad[2].x {
                    bound_quad1.x = edge_quad[2].x;
                    bound_quad2.x = edge_quad[2].x;
                }
                if edge_quad[2].y < ip[0].y {
                    intersect_into(&mut edge_quad[2], q3, q2, ip[0], ip[1]);
                }
                if edge_quad[2].x < ip[0].x {
                    intersect_into(&mut edge_quad[2], q3, q2, ip[0], ip[3]);
                }
                let [q0, q1, q2, q3] = edge_quad;
                if q2.x < q1.x && q2.y > q1.y {
                    edge_pentagon = Some([q0, q1, PointF::new(q2.x, q1.y), q2, q3]);
                }
            }
        }
    }

    if first_miter == second_miter {
        let antialias = first_miter == MiterType::SoftMiter;
        let points = match edge_pentagon {
            Some(pentagon) if !inner.is_renderable() => pentagon.to_vec(),
            _ => edge_quad.to_vec(),
        };
        return vec![ClipPolygon { points, antialias }];
    }

    // Each corner gets its own clip with its own anti-aliasing. A clip uses
    // three sides of the quad's rectilinear bounding box and the miter line,
    // extended past the corner so the two clips overlap.
    let mut polygons = Vec::with_capacity(2);
    if first_miter != MiterType::NoMiter {
        let mut miter_point =
            intersection(edge_quad[0], edge_quad[1], bound_quad1, bound_quad2);
        miter_point += extension_offset;
        polygons.push(ClipPolygon {
            points: vec![
                edge_quad[0] + extension_offset,
                miter_point,
                bound_quad2,
                edge_quad[3],
            ],
            antialias: first_miter == MiterType::SoftMiter,
        });
    }
    if second_miter != MiterType::NoMiter {
        let mut miter_point =
            intersection(edge_quad[2], edge_quad[3], bound_quad1, bound_quad2);
        miter_point -= extension_offset;
        polygons.push(ClipPolygon {
            points: vec![
                edge_quad[0],
                bound_quad1,
                miter_point,
                edge_quad[3] - extension_offset,
            ],
            antialias: second_miter == MiterType::SoftMiter,
        });
    }
    polygons
}
