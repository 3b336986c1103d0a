//! A single flex line and the flexible length resolution over it.
//!
//! [§ 9.7 Resolving Flexible Lengths](https://www.w3.org/TR/css-flexbox-1/#resolve-flexible-lengths)

use app_units::Au;

use crate::algorithm::{FlexContainerConfig, FlexLayoutAlgorithm};
use crate::flex_item::FlexItem;
use crate::geometry::FlexOffset;
use crate::style::ItemPosition;

/// Whether a line grows or shrinks its items.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlexSign {
    /// Items grow into free space.
    Positive,
    /// Items shrink to remove overflow.
    Negative,
}

/// Items sharing one main-axis run, with the totals used to flex them.
#[derive(Debug, Clone, Default)]
pub struct FlexLine {
    /// Items of this line in order-modified document order.
    pub items: Vec<FlexItem>,
    /// Border-box width of the container, used to mirror right-to-left rows.
    pub container_logical_width: Au,
    /// Main size available to the items.
    pub container_main_inner_size: Au,
    /// Sum of the outer flex base sizes plus gaps.
    pub sum_flex_base_size: Au,
    /// Sum of the outer hypothetical main sizes plus gaps.
    pub sum_hypothetical_main_size: Au,
    /// Sum of `flex-grow` over unfrozen items.
    pub total_flex_grow: f64,
    /// Sum of `flex-shrink` over unfrozen items.
    pub total_flex_shrink: f64,
    /// Sum of `flex-shrink` times flex base size over unfrozen items.
    pub total_weighted_flex_shrink: f64,
    /// Free space not yet distributed.
    pub remaining_free_space: Au,
    /// Free space right after inflexible items were frozen.
    pub initial_free_space: Au,
    /// Main-axis end of the last item after positioning.
    pub main_axis_extent: Au,
    /// Cross-axis start of the line.
    pub cross_axis_offset: Au,
    /// Cross size of the line.
    pub cross_axis_extent: Au,
    /// Largest baseline ascent among baseline-aligned items.
    pub max_ascent: Au,
}

impl FlexLine {
    /// Create a line from items collected by [`FlexLayoutAlgorithm`].
    #[allow(clippy::too_many_arguments)]
    #[must_use]
    pub fn new(
        items: Vec<FlexItem>,
        container_logical_width: Au,
        sum_flex_base_size: Au,
        total_flex_grow: f64,
        total_flex_shrink: f64,
        total_weighted_flex_shrink: f64,
        sum_hypothetical_main_size: Au,
    ) -> Self {
        Self {
            items,
            container_logical_width,
            sum_flex_base_size,
            sum_hypothetical_main_size,
            total_flex_grow,
            total_flex_shrink,
            total_weighted_flex_shrink,
            ..Self::default()
        }
    }

    /// Set the main size available to the items.
    pub const fn set_container_main_inner_size(&mut self, size: Au) {
        self.container_main_inner_size = size;
    }

    /// [§ 9.7 step 1](https://www.w3.org/TR/css-flexbox-1/#resolve-flexible-lengths)
    ///
    /// "Sum the outer hypothetical main sizes of all items on the line. If the
    /// sum is less than the flex container's inner main size, use the flex
    /// grow factor for the rest of this algorithm; otherwise, use the flex
    /// shrink factor."
    #[must_use]
    pub fn sign(&self) -> FlexSign {
        if self.sum_hypothetical_main_size < self.container_main_inner_size {
            FlexSign::Positive
        } else {
            FlexSign::Negative
        }
    }

    /// Freeze `violations` at their current flexed size and take them out of
    /// the running totals.
    fn freeze_violations(&mut self, violations: &[usize]) {
        for &index in violations {
            let item = &mut self.items[index];
            debug_assert!(!item.frozen);
            self.remaining_free_space -= item.flexed_content_size - item.flex_base_content_size;
            self.total_flex_grow -= item.flex_grow();
            let flex_shrink = item.flex_shrink();
            self.total_flex_shrink -= flex_shrink;
            self.total_weighted_flex_shrink -=
                flex_shrink * f64::from(item.flex_base_content_size.0);
            // Subtracting with full precision can dip below zero once the
            // initial sum lost precision.
            self.total_weighted_flex_shrink = self.total_weighted_flex_shrink.max(0.0);
            item.frozen = true;
        }
    }

    /// [§ 9.7 step 2](https://www.w3.org/TR/css-flexbox-1/#resolve-flexible-lengths)
    ///
    /// "Size inflexible items. Freeze, setting its target main size to its
    /// hypothetical main size, any item that has a flex factor of zero, if
    /// using the flex grow factor: any item that has a flex base size greater
    /// than its hypothetical main size, if using the flex shrink factor: any
    /// item that has a flex base size smaller than its hypothetical main
    /// size."
    #[allow(clippy::float_cmp)]
    pub fn freeze_inflexible_items(&mut self) {
        let flex_sign = self.sign();
        self.remaining_free_space = self.container_main_inner_size - self.sum_flex_base_size;

        let mut inflexible = Vec::new();
        for (index, item) in self.items.iter_mut().enumerate() {
            debug_assert!(!item.frozen);
            let flex_factor = match flex_sign {
                FlexSign::Positive => item.flex_grow(),
                FlexSign::Negative => item.flex_shrink(),
            };
            let violates = match flex_sign {
                FlexSign::Positive => {
                    item.flex_base_content_size > item.hypothetical_main_content_size
                }
                FlexSign::Negative => {
                    item.flex_base_content_size < item.hypothetical_main_content_size
                }
            };
            if flex_factor == 0.0 || violates {
                item.flexed_content_size = item.hypothetical_main_content_size;
                inflexible.push(index);
            }
        }
        self.freeze_violations(&inflexible);
        self.initial_free_space = self.remaining_free_space;
    }

    /// [§ 9.7 step 4](https://www.w3.org/TR/css-flexbox-1/#resolve-flexible-lengths)
    ///
    /// One pass of the resolution loop. Returns `true` once no item violates
    /// its min or max size; otherwise the violators are frozen and the caller
    /// runs another pass. Every unsuccessful pass freezes at least one item.
    #[allow(clippy::cast_possible_truncation, clippy::float_cmp)]
    pub fn resolve_flexible_lengths(&mut self) -> bool {
        let mut total_violation = Au(0);
        let mut used_free_space = Au(0);
        let mut min_violations = Vec::new();
        let mut max_violations = Vec::new();

        let flex_sign = self.sign();
        let sum_flex_factors = match flex_sign {
            FlexSign::Positive => self.total_flex_grow,
            FlexSign::Negative => self.total_flex_shrink,
        };

        // STEP 4b: "If the sum of the unfrozen flex items' flex factors is
        // less than one, multiply the initial free space by this sum. If the
        // magnitude of this value is less than the magnitude of the remaining
        // free space, use this as the remaining free space."
        if sum_flex_factors > 0.0 && sum_flex_factors < 1.0 {
            let fractional = Au((f64::from(self.initial_free_space.0) * sum_flex_factors) as i32);
            if fractional.abs() < self.remaining_free_space.abs() {
                self.remaining_free_space = fractional;
            }
        }

        let remaining = f64::from(self.remaining_free_space.0);
        for (index, item) in self.items.iter_mut().enumerate() {
            if item.frozen {
                continue;
            }

            // STEP 4c: distribute free space in proportion to the flex factors.
            let mut child_size = item.flex_base_content_size;
            let mut extra_space = 0.0;
            if remaining > 0.0
                && self.total_flex_grow > 0.0
                && flex_sign == FlexSign::Positive
                && self.total_flex_grow.is_finite()
            {
                extra_space = remaining * item.flex_grow() / self.total_flex_grow;
            } else if remaining < 0.0
                && self.total_weighted_flex_shrink > 0.0
                && flex_sign == FlexSign::Negative
                && self.total_weighted_flex_shrink.is_finite()
                && item.flex_shrink() != 0.0
            {
                extra_space = remaining
                    * item.flex_shrink()
                    * f64::from(item.flex_base_content_size.0)
                    / self.total_weighted_flex_shrink;
            }
            if extra_space.is_finite() {
                child_size += Au(extra_space.round() as i32);
            }

            // STEP 4d: fix min/max violations.
            let adjusted_child_size = item.clamp_size_to_min_and_max(child_size);
            item.flexed_content_size = adjusted_child_size;
            used_free_space += adjusted_child_size - item.flex_base_content_size;

            let violation = adjusted_child_size - child_size;
            if violation > Au(0) {
                min_violations.push(index);
            } else if violation < Au(0) {
                max_violations.push(index);
            }
            total_violation += violation;
        }

        // STEP 4e: freeze over-flexed items.
        if total_violation == Au(0) {
            self.remaining_free_space -= used_free_space;
            true
        } else {
            let violations = if total_violation < Au(0) {
                max_violations
            } else {
                min_violations
            };
            self.freeze_violations(&violations);
            false
        }
    }

    /// Run [`Self::resolve_flexible_lengths`] until it succeeds and return the
    /// number of passes.
    pub fn resolve_flexible_lengths_to_completion(&mut self) -> usize {
        let mut passes = 1;
        while !self.resolve_flexible_lengths() {
            passes += 1;
        }
        passes
    }

    /// [§ 9.5 step 12](https://www.w3.org/TR/css-flexbox-1/#algo-main-align)
    ///
    /// "If the remaining free space is positive and at least one main-axis
    /// margin on this line is auto, distribute the free space equally among
    /// these margins." Returns the size of one auto margin.
    pub fn apply_main_axis_auto_margin_adjustment(&mut self, config: &FlexContainerConfig) -> Au {
        if self.remaining_free_space <= Au(0) {
            return Au(0);
        }

        let is_horizontal = config.is_horizontal_flow();
        let number_of_auto_margins: i32 = self
            .items
            .iter()
            .map(|item| {
                let (start, end) = if is_horizontal {
                    (item.style.margin.left, item.style.margin.right)
                } else {
                    (item.style.margin.top, item.style.margin.bottom)
                };
                i32::from(start.is_auto()) + i32::from(end.is_auto())
            })
            .sum();
        if number_of_auto_margins == 0 {
            return Au(0);
        }

        let size_of_auto_margin = self.remaining_free_space / number_of_auto_margins;
        self.remaining_free_space = Au(0);
        size_of_auto_margin
    }

    /// [§ 9.5 Main-Axis Alignment](https://www.w3.org/TR/css-flexbox-1/#main-alignment)
    ///
    /// Place every item along the main axis and compute the line's cross
    /// extent. `cross_axis_offset` is where this line starts and is advanced
    /// past it.
    #[allow(clippy::cast_possible_truncation, clippy::cast_possible_wrap)]
    pub fn compute_line_items_position(
        &mut self,
        config: &FlexContainerConfig,
        main_axis_start_offset: Au,
        cross_axis_offset: &mut Au,
    ) {
        let item_count = self.items.len();

        // Recalculate the remaining free space. Fractional flex factors mean
        // the stored value cannot be reused.
        let total_item_size = self
            .items
            .iter()
            .map(|item| item.flexed_margin_box_size(config))
            .fold(Au(0), |sum, size| sum + size);
        let gap_count = item_count.saturating_sub(1) as i32;
        self.remaining_free_space = self.container_main_inner_size
            - total_item_size
            - config.gap_between_items * gap_count;

        let auto_margin_offset = self.apply_main_axis_auto_margin_adjustment(config);
        let available_free_space = self.remaining_free_space;
        let initial_position = FlexLayoutAlgorithm::initial_content_position_offset(
            available_free_space,
            config.justify_content,
            item_count,
            config.is_reversed(),
        );
        let mut main_axis_offset = initial_position + main_axis_start_offset;
        let should_flip_main_axis = !config.is_column_flow() && !config.is_left_to_right_flow();

        let mut max_descent = Au(0);
        let mut max_child_cross_axis_extent = Au(0);
        for (index, item) in self.items.iter_mut().enumerate() {
            item.update_auto_margins_in_main_axis(config, auto_margin_offset);

            let child_cross_axis_margin_box_extent = if item.alignment == ItemPosition::Baseline
                && !item.has_auto_margins_in_cross_axis(config)
            {
                let ascent = item.margin_box_ascent(config);
                let descent =
                    (item.cross_axis_margin_extent(config) + item.cross_axis_size) - ascent;
                self.max_ascent = self.max_ascent.max(ascent);
                max_descent = max_descent.max(descent);
                self.max_ascent + max_descent
            } else {
                item.cross_axis_size + item.cross_axis_margin_extent(config)
            };
            max_child_cross_axis_extent =
                max_child_cross_axis_extent.max(child_cross_axis_margin_box_extent);

            main_axis_offset += item.flow_aware_margin_start(config);

            let child_main_extent = item.flexed_border_box_size();
            // Right-to-left columns put the end margin on the left here; the
            // column flip corrects it later.
            let main = if should_flip_main_axis {
                self.container_logical_width - main_axis_offset - child_main_extent
            } else {
                main_axis_offset
            };
            item.offset = FlexOffset::new(
                main,
                *cross_axis_offset + item.flow_aware_margin_before(config),
            );
            main_axis_offset += child_main_extent + item.flow_aware_margin_end(config);

            if index + 1 != item_count {
                // The last item does not get extra space added.
                main_axis_offset += FlexLayoutAlgorithm::content_distribution_space_between_children(
                    available_free_space,
                    config.justify_content,
                    item_count,
                ) + config.gap_between_items;
            }
        }

        self.main_axis_extent = main_axis_offset;
        self.cross_axis_offset = *cross_axis_offset;
        self.cross_axis_extent = max_child_cross_axis_extent;
        *cross_axis_offset += max_child_cross_axis_extent;
    }
}
