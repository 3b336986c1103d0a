//! Per-item state of the flex layout algorithm.
//!
//! [§ 9.2 Line Length Determination](https://www.w3.org/TR/css-flexbox-1/#algo-main-item)
//!
//! An item refers to its box by index and carries the sizes the container
//! measured for it. Physical margins are kept because auto margins are
//! resolved in place.

use app_units::Au;

use crate::algorithm::FlexContainerConfig;
use crate::geometry::{FlexOffset, PhysicalBoxStrut};
use crate::style::{ComputedStyle, ItemPosition};
use crate::unit::MinMaxSizes;

/// One in-flow child participating in flex layout.
#[derive(Debug, Clone)]
pub struct FlexItem {
    /// Index of the box in its container's child list.
    pub child: usize,
    /// The box's style.
    pub style: ComputedStyle,
    /// [§ 9.2 step 3](https://www.w3.org/TR/css-flexbox-1/#algo-main-item)
    /// Flex base size of the content box.
    pub flex_base_content_size: Au,
    /// Used min and max main sizes of the content box.
    pub min_max_main_sizes: MinMaxSizes,
    /// Min and max cross sizes of the border box, used when stretching.
    pub min_max_cross_sizes: MinMaxSizes,
    /// The flex base size clamped by the min and max main sizes.
    pub hypothetical_main_content_size: Au,
    /// Border and padding along the main axis.
    pub main_axis_border_padding: Au,
    /// Border and padding along the cross axis.
    pub cross_axis_border_padding: Au,
    /// Used physical margins. Auto margins start out as zero.
    pub margins: PhysicalBoxStrut,
    /// Resolved main size of the content box.
    pub flexed_content_size: Au,
    /// Border-box size along the cross axis.
    pub cross_axis_size: Au,
    /// Position within the container.
    pub offset: FlexOffset,
    /// First-line baseline from the border-box top, if the box has one.
    pub baseline: Option<Au>,
    /// Resolved cross-axis alignment.
    pub alignment: ItemPosition,
    /// Whether the main size is final.
    pub frozen: bool,
    /// Set when stretching changed the cross size and the box must be laid
    /// out again.
    pub needs_relayout_for_stretch: bool,
    /// Index of the line holding the item.
    pub line_number: usize,
}

impl FlexItem {
    /// Create an item. The hypothetical main size is derived from the base
    /// size and the main-axis bounds.
    #[must_use]
    pub fn new(
        child: usize,
        style: ComputedStyle,
        flex_base_content_size: Au,
        min_max_main_sizes: MinMaxSizes,
        alignment: ItemPosition,
    ) -> Self {
        Self {
            child,
            style,
            flex_base_content_size,
            min_max_main_sizes,
            min_max_cross_sizes: MinMaxSizes::default(),
            hypothetical_main_content_size: min_max_main_sizes
                .clamp_size(flex_base_content_size),
            main_axis_border_padding: Au(0),
            cross_axis_border_padding: Au(0),
            margins: PhysicalBoxStrut::default(),
            flexed_content_size: Au(0),
            cross_axis_size: Au(0),
            offset: FlexOffset::default(),
            baseline: None,
            alignment,
            frozen: false,
            needs_relayout_for_stretch: false,
            line_number: 0,
        }
    }

    /// Clamp a content size by the main-axis bounds.
    #[must_use]
    pub fn clamp_size_to_min_and_max(&self, size: Au) -> Au {
        self.min_max_main_sizes.clamp_size(size)
    }

    /// `flex-grow`, never negative.
    #[must_use]
    pub fn flex_grow(&self) -> f64 {
        f64::from(self.style.flex_grow.max(0.0))
    }

    /// `flex-shrink`, never negative.
    #[must_use]
    pub fn flex_shrink(&self) -> f64 {
        f64::from(self.style.flex_shrink.max(0.0))
    }

    /// Main-axis margin start, following the flow direction.
    #[must_use]
    pub fn flow_aware_margin_start(&self, config: &FlexContainerConfig) -> Au {
        if config.is_horizontal_flow() {
            if config.is_left_to_right_flow() {
                self.margins.left
            } else {
                self.margins.right
            }
        } else if config.is_left_to_right_flow() {
            self.margins.top
        } else {
            self.margins.bottom
        }
    }

    /// Main-axis margin end, following the flow direction.
    #[must_use]
    pub fn flow_aware_margin_end(&self, config: &FlexContainerConfig) -> Au {
        if config.is_horizontal_flow() {
            if config.is_left_to_right_flow() {
                self.margins.right
            } else {
                self.margins.left
            }
        } else if config.is_left_to_right_flow() {
            self.margins.bottom
        } else {
            self.margins.top
        }
    }

    /// Cross-axis margin on the cross-start side.
    #[must_use]
    pub fn flow_aware_margin_before(&self, config: &FlexContainerConfig) -> Au {
        if !config.is_column_flow() {
            self.margins.top
        } else if config.is_left_to_right_direction() {
            self.margins.left
        } else {
            self.margins.right
        }
    }

    /// Sum of the main-axis margins.
    #[must_use]
    pub fn main_axis_margin_extent(&self, config: &FlexContainerConfig) -> Au {
        if config.is_horizontal_flow() {
            self.margins.horizontal_sum()
        } else {
            self.margins.vertical_sum()
        }
    }

    /// Sum of the cross-axis margins.
    #[must_use]
    pub fn cross_axis_margin_extent(&self, config: &FlexContainerConfig) -> Au {
        if config.is_horizontal_flow() {
            self.margins.vertical_sum()
        } else {
            self.margins.horizontal_sum()
        }
    }

    /// Outer hypothetical main size.
    #[must_use]
    pub fn hypothetical_main_axis_margin_box_size(&self, config: &FlexContainerConfig) -> Au {
        self.hypothetical_main_content_size
            + self.main_axis_border_padding
            + self.main_axis_margin_extent(config)
    }

    /// Outer flex base size.
    #[must_use]
    pub fn flex_base_margin_box_size(&self, config: &FlexContainerConfig) -> Au {
        self.flex_base_content_size
            + self.main_axis_border_padding
            + self.main_axis_margin_extent(config)
    }

    /// Resolved main size of the border box.
    #[must_use]
    pub fn flexed_border_box_size(&self) -> Au {
        self.flexed_content_size + self.main_axis_border_padding
    }

    /// Resolved main size of the margin box.
    #[must_use]
    pub fn flexed_margin_box_size(&self, config: &FlexContainerConfig) -> Au {
        self.flexed_content_size
            + self.main_axis_border_padding
            + self.main_axis_margin_extent(config)
    }

    /// Distance from the cross-start margin edge to the baseline. Boxes
    /// without a baseline synthesize one from their cross size.
    #[must_use]
    pub fn margin_box_ascent(&self, config: &FlexContainerConfig) -> Au {
        self.baseline.unwrap_or(self.cross_axis_size) + self.flow_aware_margin_before(config)
    }

    /// Cross space left in a line of the given extent.
    #[must_use]
    pub fn available_alignment_space(
        &self,
        config: &FlexContainerConfig,
        line_cross_axis_extent: Au,
    ) -> Au {
        line_cross_axis_extent - (self.cross_axis_margin_extent(config) + self.cross_axis_size)
    }

    /// Whether either cross-axis margin is `auto`.
    #[must_use]
    pub fn has_auto_margins_in_cross_axis(&self, config: &FlexContainerConfig) -> bool {
        if config.is_horizontal_flow() {
            self.style.margin.top.is_auto() || self.style.margin.bottom.is_auto()
        } else {
            self.style.margin.left.is_auto() || self.style.margin.right.is_auto()
        }
    }

    /// Give each main-axis `auto` margin the computed share of free space.
    pub fn update_auto_margins_in_main_axis(
        &mut self,
        config: &FlexContainerConfig,
        auto_margin_offset: Au,
    ) {
        debug_assert!(auto_margin_offset >= Au(0));
        if config.is_horizontal_flow() {
            if self.style.margin.left.is_auto() {
                self.margins.left = auto_margin_offset;
            }
            if self.style.margin.right.is_auto() {
                self.margins.right = auto_margin_offset;
            }
        } else {
            if self.style.margin.top.is_auto() {
                self.margins.top = auto_margin_offset;
            }
            if self.style.margin.bottom.is_auto() {
                self.margins.bottom = auto_margin_offset;
            }
        }
    }

    /// [§ 8.1 Aligning with auto margins](https://www.w3.org/TR/css-flexbox-1/#auto-margins)
    ///
    /// "If both cross-axis margins are auto, they absorb positive free space
    /// equally." Returns whether any cross-axis margin was `auto`.
    pub fn update_auto_margins_in_cross_axis(
        &mut self,
        config: &FlexContainerConfig,
        available_alignment_space: Au,
    ) -> bool {
        debug_assert!(available_alignment_space >= Au(0));
        let is_horizontal = config.is_horizontal_flow();
        let (top_or_left, bottom_or_right) = if is_horizontal {
            (self.style.margin.top, self.style.margin.bottom)
        } else {
            (self.style.margin.left, self.style.margin.right)
        };

        if top_or_left.is_auto() && bottom_or_right.is_auto() {
            let half = available_alignment_space / 2;
            self.offset.cross_axis_offset += half;
            if is_horizontal {
                self.margins.top = half;
                self.margins.bottom = half;
            } else {
                self.margins.left = half;
                self.margins.right = half;
            }
            return true;
        }

        // Column flows only move the item when top-or-left is the before
        // margin; the right-to-left column flip handles the rest.
        let should_adjust_top_or_left =
            !(config.is_column_flow() && !self.style.is_left_to_right_direction());

        if top_or_left.is_auto() {
            if should_adjust_top_or_left {
                self.offset.cross_axis_offset += available_alignment_space;
            }
            if is_horizontal {
                self.margins.top = available_alignment_space;
            } else {
                self.margins.left = available_alignment_space;
            }
            return true;
        }
        if bottom_or_right.is_auto() {
            if !should_adjust_top_or_left {
                self.offset.cross_axis_offset += available_alignment_space;
            }
            if is_horizontal {
                self.margins.bottom = available_alignment_space;
            } else {
                self.margins.right = available_alignment_space;
            }
            return true;
        }
        false
    }

    /// [§ 9.4 step 11](https://www.w3.org/TR/css-flexbox-1/#algo-stretch)
    ///
    /// "If a flex item has align-self: stretch, its computed cross size
    /// property is auto, and neither of its cross-axis margins are auto, the
    /// used outer cross size is the used cross size of its flex line, clamped
    /// according to the item's used min and max cross sizes."
    pub fn compute_stretched_size(&mut self, config: &FlexContainerConfig, line_cross_axis_extent: Au) {
        debug_assert_eq!(self.alignment, ItemPosition::Stretch);
        let stretched_size = self
            .cross_axis_border_padding
            .max(line_cross_axis_extent - self.cross_axis_margin_extent(config));
        let cross_size_is_auto = if config.is_horizontal_flow() {
            self.style.height.is_auto()
        } else {
            self.style.width.is_auto()
        };
        if cross_size_is_auto {
            self.cross_axis_size = self.min_max_cross_sizes.clamp_size(stretched_size);
        }
    }

    /// Cross-axis offset of an item within its line.
    ///
    /// `position` must already be translated to a flex-relative value.
    #[must_use]
    pub fn alignment_offset(
        available_free_space: Au,
        position: ItemPosition,
        ascent: Au,
        max_ascent: Au,
        is_wrap_reverse: bool,
    ) -> Au {
        match position {
            // Stretched items line up with cross-end under wrap-reverse,
            // which matters when stretching was limited by a max size.
            ItemPosition::Stretch => {
                if is_wrap_reverse {
                    available_free_space
                } else {
                    Au(0)
                }
            }
            ItemPosition::FlexEnd => available_free_space,
            ItemPosition::Center => available_free_space / 2,
            ItemPosition::Baseline => max_ascent - ascent,
            ItemPosition::LastBaseline => {
                wren_common::warning::warn_once(
                    "layout",
                    "align-self: last baseline is treated as flex-start",
                );
                Au(0)
            }
            _ => Au(0),
        }
    }
}
