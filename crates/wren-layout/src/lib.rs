//! Flexible box layout for the Wren renderer.
//!
//! # Scope
//!
//! This crate implements:
//! - **Flex Layout Algorithm** ([§ 9](https://www.w3.org/TR/css-flexbox-1/#layout-algorithm))
//!   - Line breaking, flexible length resolution and main-axis alignment
//!   - Cross-axis alignment, `align-content` and `wrap-reverse`
//!   - Automatic minimum sizes and `aspect-ratio` transfer
//!
//! - **Flex Container** ([§ 3](https://www.w3.org/TR/css-flexbox-1/#flex-containers))
//!   - Intrinsic widths of the container
//!   - `order`, `gap`, column and reversed flows, `direction: rtl`
//!   - Static positions of absolutely positioned children
//!   - A second pass when children change their scrollbars
//!
//! - **Box Sizing** ([CSS Box Sizing Level 3](https://www.w3.org/TR/css-sizing-3/))
//!   - Used widths and heights with min and max constraints
//!
//! # Not Yet Implemented
//!
//! - Vertical writing modes
//! - Fragmentation
//! - `align-self: last baseline` (treated as `flex-start`)

/// The flex layout algorithm per [§ 9](https://www.w3.org/TR/css-flexbox-1/#layout-algorithm).
pub mod algorithm;
/// Per-pass layout state.
pub mod context;
/// Flex items per [§ 4](https://www.w3.org/TR/css-flexbox-1/#flex-items).
pub mod flex_item;
/// Flex lines per [§ 6](https://www.w3.org/TR/css-flexbox-1/#flex-lines).
pub mod flex_line;
/// The flex container box.
pub mod flexible_box;
/// Physical and flow-relative geometry.
pub mod geometry;
/// Boxes without children.
pub mod leaf;
/// The interface between a flex container and its children.
pub mod participant;
/// Used sizes per [CSS Box Sizing Level 3](https://www.w3.org/TR/css-sizing-3/).
pub mod sizing;
/// Computed style values consumed by layout.
pub mod style;
/// Definite and indefinite lengths.
pub mod unit;

// Re-exports for convenience
pub use algorithm::{FlexContainerConfig, FlexLayoutAlgorithm};
pub use context::{LayoutContext, LayoutStats};
pub use flex_item::FlexItem;
pub use flex_line::FlexLine;
pub use flexible_box::{FlexLayoutPhase, FlexibleBox};
pub use geometry::{FlexOffset, LogicalSize, PhysicalBoxStrut, PhysicalOffset, PhysicalRect, PhysicalSize};
pub use leaf::{LeafBox, LeafContent};
pub use participant::{BoxState, ContainingBlock, FlexParticipant, NodeId, layout_root};
pub use sizing::InlineSizing;
pub use style::{
    ComputedStyle, ContentAlignment, Direction, FlexDirection, FlexWrap, ItemPosition, Length,
    Overflow, Position, Sides,
};
pub use unit::{Extent, MinMaxSizes};
