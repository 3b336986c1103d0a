//! Physical and flow-relative geometry in app units.
//!
//! [§ 2 Abstract Box Terminology](https://www.w3.org/TR/css-writing-modes-4/#abstract-box)
//!
//! Boxes are positioned relative to their parent's border box. Every
//! length is an [`Au`] so that repeated layout passes are exact.

use app_units::Au;

/// A position within the parent's border box.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PhysicalOffset {
    /// Distance from the parent's left border edge.
    pub left: Au,
    /// Distance from the parent's top border edge.
    pub top: Au,
}

impl PhysicalOffset {
    /// Create an offset from its components.
    #[must_use]
    pub const fn new(left: Au, top: Au) -> Self {
        Self { left, top }
    }
}

/// A border-box size.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PhysicalSize {
    /// Horizontal extent.
    pub width: Au,
    /// Vertical extent.
    pub height: Au,
}

impl PhysicalSize {
    /// Create a size from its components.
    #[must_use]
    pub const fn new(width: Au, height: Au) -> Self {
        Self { width, height }
    }
}

/// A positioned rectangle.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PhysicalRect {
    /// Top-left corner.
    pub offset: PhysicalOffset,
    /// Extent of the rectangle.
    pub size: PhysicalSize,
}

impl PhysicalRect {
    /// Create a rectangle from an offset and a size.
    #[must_use]
    pub const fn new(offset: PhysicalOffset, size: PhysicalSize) -> Self {
        Self { offset, size }
    }

    /// The bottom edge.
    #[must_use]
    pub fn bottom(&self) -> Au {
        self.offset.top + self.size.height
    }

    /// The right edge.
    #[must_use]
    pub fn right(&self) -> Au {
        self.offset.left + self.size.width
    }
}

/// Per-side lengths such as margins, borders and padding.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PhysicalBoxStrut {
    /// Top side.
    pub top: Au,
    /// Right side.
    pub right: Au,
    /// Bottom side.
    pub bottom: Au,
    /// Left side.
    pub left: Au,
}

impl PhysicalBoxStrut {
    /// Create a strut from its four sides.
    #[must_use]
    pub const fn new(top: Au, right: Au, bottom: Au, left: Au) -> Self {
        Self {
            top,
            right,
            bottom,
            left,
        }
    }

    /// `left + right`.
    #[must_use]
    pub fn horizontal_sum(&self) -> Au {
        self.left + self.right
    }

    /// `top + bottom`.
    #[must_use]
    pub fn vertical_sum(&self) -> Au {
        self.top + self.bottom
    }
}

impl std::ops::Add for PhysicalBoxStrut {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self {
            top: self.top + other.top,
            right: self.right + other.right,
            bottom: self.bottom + other.bottom,
            left: self.left + other.left,
        }
    }
}

/// A position along the flex container's main and cross axes.
///
/// [§ 2 Flex Layout Box Model](https://www.w3.org/TR/css-flexbox-1/#box-model)
///
/// Converted to a [`PhysicalOffset`] once the flow direction is known.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FlexOffset {
    /// Offset along the main axis.
    pub main_axis_offset: Au,
    /// Offset along the cross axis.
    pub cross_axis_offset: Au,
}

impl FlexOffset {
    /// Create an offset from its components.
    #[must_use]
    pub const fn new(main_axis_offset: Au, cross_axis_offset: Au) -> Self {
        Self {
            main_axis_offset,
            cross_axis_offset,
        }
    }

    /// Map onto physical coordinates. Row flows put the main axis along x.
    #[must_use]
    pub const fn to_physical(self, is_horizontal_flow: bool) -> PhysicalOffset {
        if is_horizontal_flow {
            PhysicalOffset::new(self.main_axis_offset, self.cross_axis_offset)
        } else {
            PhysicalOffset::new(self.cross_axis_offset, self.main_axis_offset)
        }
    }
}

/// A flow-relative size pair.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LogicalSize<T> {
    /// Size in the inline direction.
    pub inline_size: T,
    /// Size in the block direction.
    pub block_size: T,
}

impl<T> LogicalSize<T> {
    /// Create a size from its components.
    #[must_use]
    pub const fn new(inline_size: T, block_size: T) -> Self {
        Self {
            inline_size,
            block_size,
        }
    }
}
