//! One side of a border.
//!
//! [§ 4 Borders](https://www.w3.org/TR/css-backgrounds-3/#borders)

use std::ops::{BitAnd, BitOr, BitOrAssign, Not};

use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumIter, EnumString};

use crate::color::Color;

/// [§ 4.2 'border-style'](https://www.w3.org/TR/css-backgrounds-3/#border-style)
///
/// Variants are declared in the order the paint-order priority table
/// assumes.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Default,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    EnumIter,
)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum BorderStyle {
    /// "No border. Color and width are ignored."
    #[default]
    None,
    /// "Same as none, but has different behavior in the border conflict
    /// resolution for table elements."
    Hidden,
    /// "Looks as if the content on the inside of the border is sunken into
    /// the canvas."
    Inset,
    /// "Looks as if it were carved in the canvas."
    Groove,
    /// "Looks as if the content on the inside of the border is coming out
    /// of the canvas."
    Outset,
    /// "Looks as if it were coming out of the canvas."
    Ridge,
    /// "A series of round dots."
    Dotted,
    /// "A series of square-ended dashes."
    Dashed,
    /// "A single line segment."
    Solid,
    /// "Two parallel solid lines with some space between them."
    Double,
}

impl BorderStyle {
    /// Styles after `hidden` draw something.
    #[must_use]
    pub fn is_visible(self) -> bool {
        self > Self::Hidden
    }

    /// The style actually drawn at `width` pixels.
    ///
    /// A `double` border needs three pixels to show two lines and a gap,
    /// and `groove`/`ridge` need two pixels for their two bands. Thinner
    /// borders draw solid.
    #[must_use]
    pub const fn effective(self, width: i32) -> Self {
        match self {
            Self::Double if width < 3 => Self::Solid,
            Self::Ridge | Self::Groove if width <= 1 => Self::Solid,
            other => other,
        }
    }

    /// Dotted and dashed sides are stroked, so any miter must be a clip.
    #[must_use]
    pub const fn requires_clip_polygon(self) -> bool {
        matches!(self, Self::Dotted | Self::Dashed)
    }

    /// Every pixel of the side's rectangle is painted.
    #[must_use]
    pub const fn fills_border_area(self) -> bool {
        !matches!(self, Self::Dotted | Self::Dashed | Self::Double)
    }

    /// The side has internal structure that must line up across corners.
    #[must_use]
    pub const fn has_inner_detail(self) -> bool {
        matches!(self, Self::Groove | Self::Ridge | Self::Double)
    }
}

/// A physical side of a box.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumIter)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum BoxSide {
    /// Top side.
    Top,
    /// Right side.
    Right,
    /// Bottom side.
    Bottom,
    /// Left side.
    Left,
}

impl BoxSide {
    /// All sides in top, right, bottom, left order.
    pub const ALL: [Self; 4] = [Self::Top, Self::Right, Self::Bottom, Self::Left];

    /// Position in [`BoxSide::ALL`].
    #[must_use]
    pub const fn index(self) -> usize {
        match self {
            Self::Top => 0,
            Self::Right => 1,
            Self::Bottom => 2,
            Self::Left => 3,
        }
    }

    /// Top and bottom run horizontally.
    #[must_use]
    pub const fn is_horizontal(self) -> bool {
        matches!(self, Self::Top | Self::Bottom)
    }
}

/// A set of box sides.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct EdgeFlags(u8);

impl EdgeFlags {
    /// No sides.
    pub const NONE: Self = Self(0);
    /// All four sides.
    pub const ALL: Self = Self(0b1111);

    /// The set holding only `side`.
    #[must_use]
    pub const fn of(side: BoxSide) -> Self {
        Self(1 << side.index())
    }

    /// `side` is in the set.
    #[must_use]
    pub const fn includes(self, side: BoxSide) -> bool {
        self.0 & Self::of(side).0 != 0
    }

    /// The set is empty.
    #[must_use]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Two sides that share a corner are both in the set.
    #[must_use]
    pub const fn includes_adjacent_edges(self) -> bool {
        const PAIRS: [u8; 4] = [0b0011, 0b0110, 0b1100, 0b1001];
        let mut index = 0;
        while index < PAIRS.len() {
            if self.0 & PAIRS[index] == PAIRS[index] {
                return true;
            }
            index += 1;
        }
        false
    }
}

impl BitOr for EdgeFlags {
    type Output = Self;

    fn bitor(self, other: Self) -> Self {
        Self(self.0 | other.0)
    }
}

impl BitOrAssign for EdgeFlags {
    fn bitor_assign(&mut self, other: Self) {
        self.0 |= other.0;
    }
}

impl BitAnd for EdgeFlags {
    type Output = Self;

    fn bitand(self, other: Self) -> Self {
        Self(self.0 & other.0)
    }
}

impl Not for EdgeFlags {
    type Output = Self;

    fn not(self) -> Self {
        Self(!self.0 & Self::ALL.0)
    }
}

/// Which stripe of a `double` border.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DoubleBorderStripe {
    /// The stripe along the outer border edge.
    Outer,
    /// The stripe along the padding edge.
    Inner,
}

/// Width, color and style of one border side, snapped to whole pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct BorderEdge {
    width: i32,
    color: Color,
    style: BorderStyle,
}

impl BorderEdge {
    /// Build an edge from computed values.
    ///
    /// A `double` border thinner than three pixels becomes `solid`.
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub fn new(width: f32, color: Color, style: BorderStyle) -> Self {
        let width = if width.is_finite() {
            width.round().max(0.0) as i32
        } else {
            0
        };
        let style = if style == BorderStyle::Double && width < 3 {
            BorderStyle::Solid
        } else {
            style
        };
        Self {
            width,
            color,
            style,
        }
    }

    /// Width in whole pixels.
    #[must_use]
    pub const fn width(&self) -> i32 {
        self.width
    }

    /// Width that takes up space: zero for `none` and `hidden`.
    #[must_use]
    pub fn used_width(&self) -> i32 {
        if self.style.is_visible() { self.width } else { 0 }
    }

    /// Edge color.
    #[must_use]
    pub const fn color(&self) -> Color {
        self.color
    }

    /// Edge style.
    #[must_use]
    pub const fn style(&self) -> BorderStyle {
        self.style
    }

    /// A visible style and a color that is not fully transparent.
    #[must_use]
    pub fn has_visible_color_and_style(&self) -> bool {
        self.style.is_visible() && !self.color.is_fully_transparent()
    }

    /// The edge paints something.
    #[must_use]
    pub fn should_render(&self) -> bool {
        self.width > 0 && self.has_visible_color_and_style()
    }

    /// The edge takes up space but paints nothing.
    #[must_use]
    pub fn present_but_invisible(&self) -> bool {
        self.width > 0 && !self.has_visible_color_and_style()
    }

    /// Same color as `other`.
    #[must_use]
    pub fn shares_color_with(&self, other: &Self) -> bool {
        self.color == other.color
    }

    /// Limit the width to what the snapped border box can hold.
    #[allow(clippy::cast_possible_truncation)]
    pub fn clamp_width(&mut self, max_width: f32) {
        let max_width = max_width.floor().max(0.0) as i32;
        if self.width > max_width {
            self.width = max_width;
        }
    }

    /// Width of one stripe of a `double` border: the outer stripe is a
    /// third of the width, the inner edge of the gap sits at two thirds.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn double_stripe_width(&self, stripe: DoubleBorderStripe) -> f32 {
        let width = self.width as f32;
        match stripe {
            DoubleBorderStripe::Outer => (width / 3.0).round(),
            DoubleBorderStripe::Inner => (width * 2.0 / 3.0).round(),
        }
    }
}
