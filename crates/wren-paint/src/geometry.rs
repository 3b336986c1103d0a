//! Float geometry for painting.
//!
//! [§ 5 Rounded Corners](https://www.w3.org/TR/css-backgrounds-3/#corners)
//!
//! Painting works in device pixels with `f32` coordinates. Border geometry is
//! pixel snapped before it reaches the painter, so most values are whole
//! numbers.

use std::ops::{Add, AddAssign, Neg, Sub, SubAssign};

use serde::{Deserialize, Serialize};

/// A point in device space.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct PointF {
    /// Horizontal coordinate.
    pub x: f32,
    /// Vertical coordinate.
    pub y: f32,
}

impl PointF {
    /// Create a point.
    #[must_use]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

impl Add for PointF {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self::new(self.x + other.x, self.y + other.y)
    }
}

impl AddAssign for PointF {
    fn add_assign(&mut self, other: Self) {
        *self = *self + other;
    }
}

impl Sub for PointF {
    type Output = Self;

    fn sub(self, other: Self) -> Self {
        Self::new(self.x - other.x, self.y - other.y)
    }
}

impl SubAssign for PointF {
    fn sub_assign(&mut self, other: Self) {
        *self = *self - other;
    }
}

/// A width and height pair, also used for elliptical corner radii.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct SizeF {
    /// Horizontal extent.
    pub width: f32,
    /// Vertical extent.
    pub height: f32,
}

impl SizeF {
    /// Create a size.
    #[must_use]
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// A circular radius.
    #[must_use]
    pub const fn square(value: f32) -> Self {
        Self::new(value, value)
    }

    /// A corner with either radius at zero draws square.
    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.width <= 0.0 || self.height <= 0.0
    }

    /// Multiply both dimensions.
    #[must_use]
    pub fn scale(self, factor: f32) -> Self {
        Self::new(self.width * factor, self.height * factor)
    }
}

/// Per-side lengths used to grow or shrink a rectangle.
///
/// Positive values move a side outwards.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct BoxStrut {
    /// Top side.
    pub top: f32,
    /// Right side.
    pub right: f32,
    /// Bottom side.
    pub bottom: f32,
    /// Left side.
    pub left: f32,
}

impl BoxStrut {
    /// Create a strut from its four sides.
    #[must_use]
    pub const fn new(top: f32, right: f32, bottom: f32, left: f32) -> Self {
        Self {
            top,
            right,
            bottom,
            left,
        }
    }

    /// The same length on every side.
    #[must_use]
    pub const fn uniform(value: f32) -> Self {
        Self::new(value, value, value, value)
    }
}

impl Add for BoxStrut {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self::new(
            self.top + other.top,
            self.right + other.right,
            self.bottom + other.bottom,
            self.left + other.left,
        )
    }
}

impl Sub for BoxStrut {
    type Output = Self;

    fn sub(self, other: Self) -> Self {
        self + -other
    }
}

impl Neg for BoxStrut {
    type Output = Self;

    fn neg(self) -> Self {
        Self::new(-self.top, -self.right, -self.bottom, -self.left)
    }
}

/// An axis-aligned rectangle.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct RectF {
    /// Left edge.
    pub x: f32,
    /// Top edge.
    pub y: f32,
    /// Horizontal extent.
    pub width: f32,
    /// Vertical extent.
    pub height: f32,
}

impl RectF {
    /// Create a rectangle.
    #[must_use]
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Right edge.
    #[must_use]
    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    /// Bottom edge.
    #[must_use]
    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    /// Top-left corner.
    #[must_use]
    pub const fn origin(&self) -> PointF {
        PointF::new(self.x, self.y)
    }

    /// Top-right corner.
    #[must_use]
    pub fn top_right(&self) -> PointF {
        PointF::new(self.right(), self.y)
    }

    /// Bottom-right corner.
    #[must_use]
    pub fn bottom_right(&self) -> PointF {
        PointF::new(self.right(), self.bottom())
    }

    /// Bottom-left corner.
    #[must_use]
    pub fn bottom_left(&self) -> PointF {
        PointF::new(self.x, self.bottom())
    }

    /// A rectangle with no area.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.width <= 0.0 || self.height <= 0.0
    }

    /// Move each side outwards by the strut. Negative struts shrink.
    #[must_use]
    pub fn outset(&self, strut: BoxStrut) -> Self {
        Self::new(
            self.x - strut.left,
            self.y - strut.top,
            (self.width + strut.left + strut.right).max(0.0),
            (self.height + strut.top + strut.bottom).max(0.0),
        )
    }

    /// Move each side inwards by the strut.
    #[must_use]
    pub fn inset(&self, strut: BoxStrut) -> Self {
        self.outset(-strut)
    }

    /// Snap every edge to the nearest device pixel.
    #[must_use]
    pub fn snapped(&self) -> Self {
        let x = self.x.round();
        let y = self.y.round();
        Self::new(x, y, self.right().round() - x, self.bottom().round() - y)
    }
}

/// Radii of the four corners of a rounded rectangle.
///
/// [§ 5.1 'border-radius'](https://www.w3.org/TR/css-backgrounds-3/#border-radius)
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CornerRadii {
    /// Top-left corner.
    pub top_left: SizeF,
    /// Top-right corner.
    pub top_right: SizeF,
    /// Bottom-right corner.
    pub bottom_right: SizeF,
    /// Bottom-left corner.
    pub bottom_left: SizeF,
}

impl CornerRadii {
    /// The same circular radius on every corner.
    #[must_use]
    pub const fn uniform(radius: f32) -> Self {
        let corner = SizeF::square(radius);
        Self {
            top_left: corner,
            top_right: corner,
            bottom_right: corner,
            bottom_left: corner,
        }
    }

    /// Every corner is square.
    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.corners().iter().all(SizeF::is_zero)
    }

    /// Corners in top-left, top-right, bottom-right, bottom-left order.
    #[must_use]
    pub const fn corners(&self) -> [SizeF; 4] {
        [
            self.top_left,
            self.top_right,
            self.bottom_right,
            self.bottom_left,
        ]
    }

    fn map(self, f: impl Fn(SizeF) -> SizeF) -> Self {
        Self {
            top_left: f(self.top_left),
            top_right: f(self.top_right),
            bottom_right: f(self.bottom_right),
            bottom_left: f(self.bottom_left),
        }
    }

    /// Square off corners where either radius is zero.
    #[must_use]
    pub fn normalized(self) -> Self {
        self.map(|corner| {
            if corner.is_zero() {
                SizeF::default()
            } else {
                corner
            }
        })
    }

    /// Grow or shrink rounded corners along with their rectangle.
    ///
    /// [§ 5.2 Corner Shaping](https://www.w3.org/TR/css-backgrounds-3/#corner-shaping)
    ///
    /// "the inner radius of the padding edge is the outer radius minus the
    /// corresponding border thickness", clamped at zero. Square corners
    /// stay square.
    #[must_use]
    pub fn outset(self, strut: BoxStrut) -> Self {
        let adjust = |corner: SizeF, horizontal: f32, vertical: f32| {
            if corner.is_zero() {
                return SizeF::default();
            }
            SizeF::new(
                (corner.width + horizontal).max(0.0),
                (corner.height + vertical).max(0.0),
            )
        };
        Self {
            top_left: adjust(self.top_left, strut.left, strut.top),
            top_right: adjust(self.top_right, strut.right, strut.top),
            bottom_right: adjust(self.bottom_right, strut.right, strut.bottom),
            bottom_left: adjust(self.bottom_left, strut.left, strut.bottom),
        }
        .normalized()
    }
}

/// A rectangle with independently rounded corners.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct RoundedRect {
    /// Bounding rectangle.
    pub rect: RectF,
    /// Corner radii.
    pub radii: CornerRadii,
}

impl RoundedRect {
    /// Create a rounded rectangle.
    #[must_use]
    pub fn new(rect: RectF, radii: CornerRadii) -> Self {
        Self {
            rect,
            radii: radii.normalized(),
        }
    }

    /// A rectangle without rounding.
    #[must_use]
    pub fn from_rect(rect: RectF) -> Self {
        Self::new(rect, CornerRadii::default())
    }

    /// Any corner is rounded.
    #[must_use]
    pub fn is_rounded(&self) -> bool {
        !self.radii.is_zero()
    }

    /// The bounding rectangle has no area.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rect.is_empty()
    }

    /// Adjacent radii fit within each side.
    ///
    /// Inner border rects computed by subtracting border widths can violate
    /// this. Painting code treats them specially.
    #[must_use]
    pub fn is_renderable(&self) -> bool {
        const TOLERANCE: f32 = 1e-4;
        let r = &self.radii;
        r.top_left.width + r.top_right.width <= self.rect.width + TOLERANCE
            && r.bottom_left.width + r.bottom_right.width <= self.rect.width + TOLERANCE
            && r.top_left.height + r.bottom_left.height <= self.rect.height + TOLERANCE
            && r.top_right.height + r.bottom_right.height <= self.rect.height + TOLERANCE
    }

    /// Scale all radii down uniformly until no two adjacent radii overlap.
    ///
    /// [§ 5.5 Overlapping Curves](https://www.w3.org/TR/css-backgrounds-3/#corner-overlap)
    ///
    /// "Let f = min(Li/Si), where i ∈ {top, right, bottom, left}, Si is the
    /// sum of the two corresponding radii of the corners on side i, and
    /// Ltop = Lbottom = the width of the box, and Lleft = Lright = the height
    /// of the box. If f < 1, then all corner radii are reduced by multiplying
    /// them by f."
    #[must_use]
    pub fn with_constrained_radii(mut self) -> Self {
        let r = self.radii;
        let ratio = |length: f32, sum: f32| if sum > 0.0 { length / sum } else { 1.0 };
        let factor = ratio(self.rect.width, r.top_left.width + r.top_right.width)
            .min(ratio(self.rect.width, r.bottom_left.width + r.bottom_right.width))
            .min(ratio(self.rect.height, r.top_left.height + r.bottom_left.height))
            .min(ratio(self.rect.height, r.top_right.height + r.bottom_right.height));
        if factor < 1.0 {
            self.radii = r.map(|corner| corner.scale(factor)).normalized();
        }
        self
    }

    /// Grow the rectangle and its rounded corners by the strut.
    #[must_use]
    pub fn outset(&self, strut: BoxStrut) -> Self {
        Self::new(self.rect.outset(strut), self.radii.outset(strut))
    }

    /// Shrink the rectangle and its rounded corners by the strut.
    #[must_use]
    pub fn inset(&self, strut: BoxStrut) -> Self {
        self.outset(-strut)
    }
}
