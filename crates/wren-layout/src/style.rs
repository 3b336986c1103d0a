//! Computed style snapshot consumed by layout.
//!
//! [§ 4.4 Computed Values](https://www.w3.org/TR/css-cascade-4/#computed)
//! "The computed value is the result of resolving the specified value..."
//!
//! Lengths are kept in CSS pixels exactly as the cascade produced them and
//! converted to app units when resolved against a containing block. Only
//! the `horizontal-tb` writing mode is represented.

use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumIter, EnumString};

/// [§ 5.1 'flex-direction'](https://www.w3.org/TR/css-flexbox-1/#flex-direction-property)
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, Display, EnumString, EnumIter,
)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum FlexDirection {
    /// Main axis follows the inline axis.
    #[default]
    Row,
    /// Like `row`, with main-start and main-end swapped.
    RowReverse,
    /// Main axis follows the block axis.
    Column,
    /// Like `column`, with main-start and main-end swapped.
    ColumnReverse,
}

/// [§ 5.2 'flex-wrap'](https://www.w3.org/TR/css-flexbox-1/#flex-wrap-property)
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, Display, EnumString, EnumIter,
)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum FlexWrap {
    /// Single-line container.
    #[default]
    Nowrap,
    /// Multi-line container.
    Wrap,
    /// Multi-line container with cross-start and cross-end swapped.
    WrapReverse,
}

/// [§ 2.1 'direction'](https://www.w3.org/TR/css-writing-modes-4/#direction)
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, Display, EnumString, EnumIter,
)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum Direction {
    /// Left to right.
    #[default]
    Ltr,
    /// Right to left.
    Rtl,
}

/// `justify-content` and `align-content` keywords.
///
/// [§ 5.3 Distributed Alignment](https://www.w3.org/TR/css-align-3/#distribution-values)
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, Display, EnumString, EnumIter,
)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum ContentAlignment {
    /// Behaves as `stretch` for `align-content` and `flex-start` for `justify-content`.
    #[default]
    Normal,
    /// Pack toward the start of the flex container.
    Start,
    /// Pack toward the end of the flex container.
    End,
    /// Pack toward main-start or cross-start.
    FlexStart,
    /// Pack toward main-end or cross-end.
    FlexEnd,
    /// Pack toward the center.
    Center,
    /// Pack toward the left edge.
    Left,
    /// Pack toward the right edge.
    Right,
    /// Free space goes between subjects.
    SpaceBetween,
    /// Free space goes around subjects.
    SpaceAround,
    /// Free space is spread evenly, including the edges.
    SpaceEvenly,
    /// Free space grows the subjects.
    Stretch,
}

/// The position half of a content alignment value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentPosition {
    /// No explicit position.
    Normal,
    /// `start`.
    Start,
    /// `end`.
    End,
    /// `flex-start`.
    FlexStart,
    /// `flex-end`.
    FlexEnd,
    /// `center`.
    Center,
    /// `left`.
    Left,
    /// `right`.
    Right,
}

/// The distribution half of a content alignment value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentDistribution {
    /// No distribution.
    Default,
    /// `space-between`.
    SpaceBetween,
    /// `space-around`.
    SpaceAround,
    /// `space-evenly`.
    SpaceEvenly,
    /// `stretch`.
    Stretch,
}

/// A content alignment split into position and distribution.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ContentAlignmentData {
    /// Positional alignment.
    pub position: ContentPosition,
    /// Distributed alignment.
    pub distribution: ContentDistribution,
}

impl ContentAlignmentData {
    /// Create a pair.
    #[must_use]
    pub const fn new(position: ContentPosition, distribution: ContentDistribution) -> Self {
        Self {
            position,
            distribution,
        }
    }
}

impl ContentAlignment {
    /// Split the keyword into its position and distribution parts.
    #[must_use]
    pub const fn data(self) -> ContentAlignmentData {
        use ContentDistribution as D;
        use ContentPosition as P;
        match self {
            Self::Normal => ContentAlignmentData::new(P::Normal, D::Default),
            Self::Start => ContentAlignmentData::new(P::Start, D::Default),
            Self::End => ContentAlignmentData::new(P::End, D::Default),
            Self::FlexStart => ContentAlignmentData::new(P::FlexStart, D::Default),
            Self::FlexEnd => ContentAlignmentData::new(P::FlexEnd, D::Default),
            Self::Center => ContentAlignmentData::new(P::Center, D::Default),
            Self::Left => ContentAlignmentData::new(P::Left, D::Default),
            Self::Right => ContentAlignmentData::new(P::Right, D::Default),
            Self::SpaceBetween => ContentAlignmentData::new(P::Normal, D::SpaceBetween),
            Self::SpaceAround => ContentAlignmentData::new(P::Normal, D::SpaceAround),
            Self::SpaceEvenly => ContentAlignmentData::new(P::Normal, D::SpaceEvenly),
            Self::Stretch => ContentAlignmentData::new(P::Normal, D::Stretch),
        }
    }
}

/// `align-items` and `align-self` keywords.
///
/// [§ 8.3 Cross-axis Alignment](https://www.w3.org/TR/css-flexbox-1/#align-items-property)
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, Display, EnumString, EnumIter,
)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum ItemPosition {
    /// Defer to the container's `align-items`. Only meaningful on `align-self`.
    #[default]
    Auto,
    /// Behaves as `stretch` in flex layout.
    Normal,
    /// Fill the line's cross size.
    Stretch,
    /// Align to cross-start.
    FlexStart,
    /// Align to cross-end.
    FlexEnd,
    /// Align to the start of the container's block or inline axis.
    Start,
    /// Align to the end of the container's block or inline axis.
    End,
    /// Align to the item's own start side.
    SelfStart,
    /// Align to the item's own end side.
    SelfEnd,
    /// Center within the line.
    Center,
    /// Align first baselines.
    Baseline,
    /// Align last baselines.
    LastBaseline,
}

/// [§ 3 'overflow'](https://www.w3.org/TR/css-overflow-3/#overflow-properties)
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, Display, EnumString, EnumIter,
)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum Overflow {
    /// Content is not clipped.
    #[default]
    Visible,
    /// Clipped, scrollable programmatically.
    Hidden,
    /// Clipped, not scrollable.
    Clip,
    /// Always shows a scrollbar.
    Scroll,
    /// Shows a scrollbar when content overflows.
    Auto,
}

impl Overflow {
    /// Whether this value makes the box a scroll container.
    #[must_use]
    pub const fn is_scrollable(self) -> bool {
        matches!(self, Self::Hidden | Self::Scroll | Self::Auto)
    }
}

/// [§ 2 'position'](https://www.w3.org/TR/css-position-3/#position-property)
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, Display, EnumString, EnumIter,
)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum Position {
    /// In flow.
    #[default]
    Static,
    /// In flow, visually shifted.
    Relative,
    /// Out of flow, positioned against the containing block.
    Absolute,
    /// Out of flow, positioned against the viewport.
    Fixed,
}

/// A computed length, percentage or sizing keyword.
///
/// [§ 3.2 Sizing Values](https://www.w3.org/TR/css-sizing-3/#sizing-values)
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Length {
    /// `auto`.
    #[default]
    Auto,
    /// An absolute length in CSS pixels.
    Fixed(f32),
    /// A percentage of the containing block.
    Percent(f32),
    /// `min-content`.
    MinContent,
    /// `max-content`.
    MaxContent,
    /// `fit-content`.
    FitContent,
    /// `none`, valid only for max sizes.
    None,
}

impl Length {
    /// `auto`.
    #[must_use]
    pub const fn is_auto(self) -> bool {
        matches!(self, Self::Auto)
    }

    /// `none`.
    #[must_use]
    pub const fn is_none(self) -> bool {
        matches!(self, Self::None)
    }

    /// `min-content`, `max-content` or `fit-content`.
    #[must_use]
    pub const fn is_intrinsic(self) -> bool {
        matches!(self, Self::MinContent | Self::MaxContent | Self::FitContent)
    }

    /// A percentage.
    #[must_use]
    pub const fn is_percent(self) -> bool {
        matches!(self, Self::Percent(_))
    }
}

/// Values for the four physical sides of a box.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Sides<T> {
    /// Top side.
    pub top: T,
    /// Right side.
    pub right: T,
    /// Bottom side.
    pub bottom: T,
    /// Left side.
    pub left: T,
}

impl<T: Copy> Sides<T> {
    /// The same value on every side.
    #[must_use]
    pub const fn all(value: T) -> Self {
        Self {
            top: value,
            right: value,
            bottom: value,
            left: value,
        }
    }
}

/// Computed styles for a box.
///
/// [§ 4.4 Computed Values](https://www.w3.org/TR/css-cascade-4/#computed)
///
/// Sizes are `box-sizing: content-box`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ComputedStyle {
    /// [§ 2 'position'](https://www.w3.org/TR/css-position-3/#position-property)
    pub position: Position,
    /// [§ 2.1 'direction'](https://www.w3.org/TR/css-writing-modes-4/#direction)
    pub direction: Direction,

    /// [§ 5.1 'flex-direction'](https://www.w3.org/TR/css-flexbox-1/#flex-direction-property)
    pub flex_direction: FlexDirection,
    /// [§ 5.2 'flex-wrap'](https://www.w3.org/TR/css-flexbox-1/#flex-wrap-property)
    pub flex_wrap: FlexWrap,
    /// [§ 7.1 'flex-grow'](https://www.w3.org/TR/css-flexbox-1/#flex-grow-property)
    pub flex_grow: f32,
    /// [§ 7.2 'flex-shrink'](https://www.w3.org/TR/css-flexbox-1/#flex-shrink-property)
    pub flex_shrink: f32,
    /// [§ 7.3 'flex-basis'](https://www.w3.org/TR/css-flexbox-1/#flex-basis-property)
    ///
    /// `auto` defers to `width` or `height`.
    pub flex_basis: Length,
    /// [§ 5.4 'order'](https://www.w3.org/TR/css-flexbox-1/#order-property)
    pub order: i32,

    /// [§ 8.2 'justify-content'](https://www.w3.org/TR/css-flexbox-1/#justify-content-property)
    pub justify_content: ContentAlignment,
    /// [§ 8.4 'align-content'](https://www.w3.org/TR/css-flexbox-1/#align-content-property)
    pub align_content: ContentAlignment,
    /// [§ 8.3 'align-items'](https://www.w3.org/TR/css-flexbox-1/#align-items-property)
    pub align_items: ItemPosition,
    /// [§ 8.3 'align-self'](https://www.w3.org/TR/css-flexbox-1/#propdef-align-self)
    pub align_self: ItemPosition,

    /// [§ 8.1 'row-gap'](https://www.w3.org/TR/css-align-3/#column-row-gap)
    ///
    /// `None` is `normal`, which is zero in flex layout.
    pub row_gap: Option<Length>,
    /// [§ 8.1 'column-gap'](https://www.w3.org/TR/css-align-3/#column-row-gap)
    pub column_gap: Option<Length>,

    /// [§ 4.1 'width'](https://www.w3.org/TR/css-sizing-3/#preferred-size-properties)
    pub width: Length,
    /// [§ 4.1 'height'](https://www.w3.org/TR/css-sizing-3/#preferred-size-properties)
    pub height: Length,
    /// [§ 4.2 'min-width'](https://www.w3.org/TR/css-sizing-3/#min-size-properties)
    pub min_width: Length,
    /// [§ 4.2 'min-height'](https://www.w3.org/TR/css-sizing-3/#min-size-properties)
    pub min_height: Length,
    /// [§ 4.3 'max-width'](https://www.w3.org/TR/css-sizing-3/#max-size-properties)
    pub max_width: Length,
    /// [§ 4.3 'max-height'](https://www.w3.org/TR/css-sizing-3/#max-size-properties)
    pub max_height: Length,
    /// [§ 5.1 'aspect-ratio'](https://www.w3.org/TR/css-sizing-4/#aspect-ratio)
    ///
    /// Width divided by height.
    pub aspect_ratio: Option<f32>,

    /// [§ 6.1 Margins](https://www.w3.org/TR/css-box-4/#margin-physical)
    pub margin: Sides<Length>,
    /// [§ 6.2 Padding](https://www.w3.org/TR/css-box-4/#padding-physical)
    pub padding: Sides<Length>,
    /// [§ 3.3 'border-width'](https://www.w3.org/TR/css-backgrounds-3/#border-width)
    ///
    /// Already zeroed for `none` and `hidden` border styles.
    pub border_width: Sides<f32>,

    /// [§ 3 'overflow-x'](https://www.w3.org/TR/css-overflow-3/#overflow-properties)
    pub overflow_x: Overflow,
    /// [§ 3 'overflow-y'](https://www.w3.org/TR/css-overflow-3/#overflow-properties)
    pub overflow_y: Overflow,

    /// Keep one line's worth of height when the box has no children.
    pub has_line_if_empty: bool,
    /// [§ 4.2 'line-height'](https://www.w3.org/TR/css-inline-3/#line-height-property)
    pub line_height: f32,
}

impl Default for ComputedStyle {
    fn default() -> Self {
        Self {
            position: Position::Static,
            direction: Direction::Ltr,
            flex_direction: FlexDirection::Row,
            flex_wrap: FlexWrap::Nowrap,
            flex_grow: 0.0,
            flex_shrink: 1.0,
            flex_basis: Length::Auto,
            order: 0,
            justify_content: ContentAlignment::Normal,
            align_content: ContentAlignment::Normal,
            align_items: ItemPosition::Normal,
            align_self: ItemPosition::Auto,
            row_gap: None,
            column_gap: None,
            width: Length::Auto,
            height: Length::Auto,
            min_width: Length::Auto,
            min_height: Length::Auto,
            max_width: Length::None,
            max_height: Length::None,
            aspect_ratio: None,
            margin: Sides::all(Length::Fixed(0.0)),
            padding: Sides::all(Length::Fixed(0.0)),
            border_width: Sides::all(0.0),
            overflow_x: Overflow::Visible,
            overflow_y: Overflow::Visible,
            has_line_if_empty: false,
            line_height: 20.0,
        }
    }
}

impl ComputedStyle {
    /// Whether the box is taken out of flow.
    #[must_use]
    pub const fn is_out_of_flow_positioned(&self) -> bool {
        matches!(self.position, Position::Absolute | Position::Fixed)
    }

    /// `flex-direction` is `column` or `column-reverse`.
    #[must_use]
    pub const fn is_column_flex_direction(&self) -> bool {
        matches!(
            self.flex_direction,
            FlexDirection::Column | FlexDirection::ColumnReverse
        )
    }

    /// `flex-direction` is `row-reverse` or `column-reverse`.
    #[must_use]
    pub const fn is_reverse_flex_direction(&self) -> bool {
        matches!(
            self.flex_direction,
            FlexDirection::RowReverse | FlexDirection::ColumnReverse
        )
    }

    /// `direction: ltr`.
    #[must_use]
    pub fn is_left_to_right_direction(&self) -> bool {
        self.direction == Direction::Ltr
    }

    /// `flex-wrap` is not `nowrap`.
    #[must_use]
    pub fn flex_wraps(&self) -> bool {
        self.flex_wrap != FlexWrap::Nowrap
    }
}
