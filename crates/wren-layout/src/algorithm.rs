//! Box-independent parts of the flex layout algorithm.
//!
//! [§ 9 Flex Layout Algorithm](https://www.w3.org/TR/css-flexbox-1/#layout-algorithm)
//!
//! [`FlexLayoutAlgorithm`] owns the items of one container, breaks them
//! into [`FlexLine`]s and performs cross-axis alignment. It never touches
//! a box: the container measures children, feeds items in and applies the
//! resulting offsets.

use app_units::Au;

use crate::flex_item::FlexItem;
use crate::flex_line::FlexLine;
use crate::geometry::LogicalSize;
use crate::sizing::resolve_length;
use crate::style::{
    ComputedStyle, ContentAlignment, ContentAlignmentData, ContentDistribution, ContentPosition,
    FlexDirection, FlexWrap, ItemPosition, Length, Overflow,
};
use crate::unit::{Extent, MinMaxSizes};

/// Container properties every line and item consults.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FlexContainerConfig {
    /// `flex-direction`.
    pub flex_direction: FlexDirection,
    /// `flex-wrap`.
    pub flex_wrap: FlexWrap,
    /// `direction: ltr`.
    pub left_to_right_direction: bool,
    /// Resolved `justify-content`.
    pub justify_content: ContentAlignmentData,
    /// Resolved `align-content`.
    pub align_content: ContentAlignmentData,
    /// Main-axis gap between adjacent items.
    pub gap_between_items: Au,
    /// Cross-axis gap between adjacent lines.
    pub gap_between_lines: Au,
}

impl FlexContainerConfig {
    /// Whether the main axis is the block axis.
    #[must_use]
    pub const fn is_column_flow(&self) -> bool {
        matches!(
            self.flex_direction,
            FlexDirection::Column | FlexDirection::ColumnReverse
        )
    }

    /// Whether the main axis is horizontal.
    #[must_use]
    pub const fn is_horizontal_flow(&self) -> bool {
        !self.is_column_flow()
    }

    /// Whether main-start is on the left (rows) or top (columns).
    #[must_use]
    pub const fn is_left_to_right_flow(&self) -> bool {
        if self.is_column_flow() {
            return true;
        }
        self.left_to_right_direction
            ^ matches!(self.flex_direction, FlexDirection::RowReverse)
    }

    /// `direction: ltr` on the container.
    #[must_use]
    pub const fn is_left_to_right_direction(&self) -> bool {
        self.left_to_right_direction
    }

    /// Whether items may wrap onto several lines.
    #[must_use]
    pub const fn is_multiline(&self) -> bool {
        !matches!(self.flex_wrap, FlexWrap::Nowrap)
    }

    /// `flex-wrap: wrap-reverse`.
    #[must_use]
    pub const fn is_wrap_reverse(&self) -> bool {
        matches!(self.flex_wrap, FlexWrap::WrapReverse)
    }

    /// `row-reverse` or `column-reverse`.
    #[must_use]
    pub const fn is_reversed(&self) -> bool {
        matches!(
            self.flex_direction,
            FlexDirection::RowReverse | FlexDirection::ColumnReverse
        )
    }
}

/// Line breaking and alignment for one flex container.
#[derive(Debug)]
pub struct FlexLayoutAlgorithm {
    style: ComputedStyle,
    config: FlexContainerConfig,
    line_break_length: Au,
    pending_items: Vec<FlexItem>,
    next_item_index: usize,
    flex_lines: Vec<FlexLine>,
}

impl FlexLayoutAlgorithm {
    /// Start laying out a container with the given style.
    ///
    /// `line_break_length` is the main size at which multi-line containers
    /// wrap. Gaps resolve against `percent_resolution_sizes`.
    #[must_use]
    pub fn new(
        style: &ComputedStyle,
        line_break_length: Au,
        percent_resolution_sizes: LogicalSize<Extent>,
    ) -> Self {
        let config = FlexContainerConfig {
            flex_direction: style.flex_direction,
            flex_wrap: style.flex_wrap,
            left_to_right_direction: style.is_left_to_right_direction(),
            justify_content: Self::resolved_justify_content(style),
            align_content: Self::resolved_align_content(style),
            gap_between_items: Self::gap_between_items(style, percent_resolution_sizes),
            gap_between_lines: Self::gap_between_lines(style, percent_resolution_sizes),
        };
        debug_assert!(config.gap_between_items >= Au(0));
        debug_assert!(config.gap_between_lines >= Au(0));
        Self {
            style: style.clone(),
            config,
            line_break_length,
            pending_items: Vec::new(),
            next_item_index: 0,
            flex_lines: Vec::new(),
        }
    }

    /// Container properties shared with lines and items.
    #[must_use]
    pub const fn config(&self) -> &FlexContainerConfig {
        &self.config
    }

    /// The container's style.
    #[must_use]
    pub const fn style(&self) -> &ComputedStyle {
        &self.style
    }

    /// Add an item for the box at `child` and return it so the caller can
    /// fill in border, padding and margins.
    pub fn append_item(
        &mut self,
        child: usize,
        child_style: ComputedStyle,
        flex_base_content_size: Au,
        min_max_main_sizes: MinMaxSizes,
    ) -> &mut FlexItem {
        let alignment = Self::alignment_for_child(&self.style, &child_style);
        self.pending_items.push(FlexItem::new(
            child,
            child_style,
            flex_base_content_size,
            min_max_main_sizes,
            alignment,
        ));
        let last = self.pending_items.len() - 1;
        &mut self.pending_items[last]
    }

    /// Lines collected so far.
    #[must_use]
    pub fn flex_lines(&self) -> &[FlexLine] {
        &self.flex_lines
    }

    /// Lines collected so far, mutably.
    pub fn flex_lines_mut(&mut self) -> &mut [FlexLine] {
        &mut self.flex_lines
    }

    /// [§ 9.3 step 5](https://www.w3.org/TR/css-flexbox-1/#algo-line-break)
    ///
    /// "Otherwise, starting from the first uncollected item, collect
    /// consecutive items one by one until the first time that the next
    /// collected item would not fit into the flex container's inner main
    /// size." Returns the index of the new line, or `None` once every item
    /// has been collected.
    pub fn compute_next_flex_line(&mut self, container_logical_width: Au) -> Option<usize> {
        let mut sum_flex_base_size = Au(0);
        let mut total_flex_grow = 0.0;
        let mut total_flex_shrink = 0.0;
        let mut total_weighted_flex_shrink = 0.0;
        let mut sum_hypothetical_main_size = Au(0);
        let mut line_has_in_flow_item = false;

        let start_index = self.next_item_index;
        let line_number = self.flex_lines.len();
        let config = self.config;
        while self.next_item_index < self.pending_items.len() {
            let item = &mut self.pending_items[self.next_item_index];
            let hypothetical = item.hypothetical_main_axis_margin_box_size(&config);
            if config.is_multiline()
                && sum_hypothetical_main_size + hypothetical > self.line_break_length
                && line_has_in_flow_item
            {
                break;
            }
            line_has_in_flow_item = true;
            sum_flex_base_size += item.flex_base_margin_box_size(&config) + config.gap_between_items;
            total_flex_grow += item.flex_grow();
            let flex_shrink = item.flex_shrink();
            total_flex_shrink += flex_shrink;
            total_weighted_flex_shrink += flex_shrink * f64::from(item.flex_base_content_size.0);
            sum_hypothetical_main_size += hypothetical + config.gap_between_items;
            item.line_number = line_number;
            self.next_item_index += 1;
        }
        if !line_has_in_flow_item {
            return None;
        }

        // A gap was added after every item, including the last. The sums may
        // be negative because of negative margins.
        sum_hypothetical_main_size -= config.gap_between_items;
        sum_flex_base_size -= config.gap_between_items;

        let items = self.pending_items[start_index..self.next_item_index].to_vec();
        self.flex_lines.push(FlexLine::new(
            items,
            container_logical_width,
            sum_flex_base_size,
            total_flex_grow,
            total_flex_shrink,
            total_weighted_flex_shrink,
            sum_hypothetical_main_size,
        ));
        Some(line_number)
    }

    /// [§ 8.1 'gap'](https://www.w3.org/TR/css-align-3/#column-row-gap)
    ///
    /// Gap between items of one line. Percentages of an indefinite size
    /// resolve to zero.
    #[must_use]
    pub fn gap_between_items(
        style: &ComputedStyle,
        percent_resolution_sizes: LogicalSize<Extent>,
    ) -> Au {
        if style.is_column_flex_direction() {
            resolve_gap(style.row_gap, percent_resolution_sizes.block_size)
        } else {
            resolve_gap(style.column_gap, percent_resolution_sizes.inline_size)
        }
    }

    /// Gap between adjacent lines.
    #[must_use]
    pub fn gap_between_lines(
        style: &ComputedStyle,
        percent_resolution_sizes: LogicalSize<Extent>,
    ) -> Au {
        if style.is_column_flex_direction() {
            resolve_gap(style.column_gap, percent_resolution_sizes.inline_size)
        } else {
            resolve_gap(style.row_gap, percent_resolution_sizes.block_size)
        }
    }

    /// Resolve `justify-content`. `normal` and `stretch` behave as
    /// `flex-start`; `left` and `right` become `start` or `end`.
    ///
    /// [§ 5.3 Distributed Alignment](https://www.w3.org/TR/css-align-3/#distribution-flex)
    /// "The justify-content property applies along the main axis, but since
    /// flexing in the main axis is controlled by flex, stretch behaves as
    /// flex-start."
    #[must_use]
    pub fn resolved_justify_content(style: &ComputedStyle) -> ContentAlignmentData {
        let data = resolve_normal_content_alignment(style.justify_content);
        let mut position = data.position;
        if matches!(position, ContentPosition::Left | ContentPosition::Right) {
            position = if style.is_column_flex_direction() {
                // The main axis is perpendicular to left and right.
                ContentPosition::Start
            } else if (position == ContentPosition::Left && !style.is_left_to_right_direction())
                || (position == ContentPosition::Right && style.is_left_to_right_direction())
            {
                ContentPosition::End
            } else {
                ContentPosition::Start
            };
        }
        if data.distribution == ContentDistribution::Stretch {
            return ContentAlignmentData::new(ContentPosition::FlexStart, ContentDistribution::Default);
        }
        ContentAlignmentData::new(position, data.distribution)
    }

    /// Resolve `align-content`. `normal` behaves as `stretch`.
    #[must_use]
    pub fn resolved_align_content(style: &ComputedStyle) -> ContentAlignmentData {
        resolve_normal_content_alignment(style.align_content)
    }

    /// [§ 8.3 'align-self'](https://www.w3.org/TR/css-flexbox-1/#propdef-align-self)
    ///
    /// "auto: Defers cross-axis alignment control to the value of
    /// align-items on the parent box." The result is flex-relative.
    #[must_use]
    pub fn alignment_for_child(container: &ComputedStyle, child: &ComputedStyle) -> ItemPosition {
        let mut align = child.align_self;
        if align == ItemPosition::Auto {
            align = container.align_items;
        }
        if matches!(align, ItemPosition::Auto | ItemPosition::Normal) {
            align = ItemPosition::Stretch;
        }
        Self::translate_item_position(container, child, align)
    }

    /// Map `start`, `end`, `self-start`, `self-end` and `baseline` onto
    /// flex-relative positions, then swap for `wrap-reverse`.
    #[must_use]
    pub fn translate_item_position(
        container: &ComputedStyle,
        child: &ComputedStyle,
        align: ItemPosition,
    ) -> ItemPosition {
        debug_assert!(!matches!(align, ItemPosition::Auto | ItemPosition::Normal));
        match align {
            ItemPosition::Start => return ItemPosition::FlexStart,
            ItemPosition::End => return ItemPosition::FlexEnd,
            ItemPosition::SelfStart | ItemPosition::SelfEnd => {
                // Rows align along the block axis, where every box starts at
                // the top. Columns align along the inline axis, which flips
                // when the item's direction differs from the container's.
                let starts_at_flex_start = !container.is_column_flex_direction()
                    || container.direction == child.direction;
                let is_start = (align == ItemPosition::SelfStart) == starts_at_flex_start;
                return if is_start {
                    ItemPosition::FlexStart
                } else {
                    ItemPosition::FlexEnd
                };
            }
            _ => {}
        }

        // Column flows run perpendicular to the item's text, so there is no
        // baseline to share.
        let mut align = align;
        if align == ItemPosition::Baseline && container.is_column_flex_direction() {
            align = ItemPosition::FlexStart;
        }

        if container.flex_wrap == FlexWrap::WrapReverse {
            align = match align {
                ItemPosition::FlexStart => ItemPosition::FlexEnd,
                ItemPosition::FlexEnd => ItemPosition::FlexStart,
                other => other,
            };
        }
        align
    }

    /// Offset of the first subject given the free space and alignment.
    ///
    /// [§ 5.3 Distributed Alignment](https://www.w3.org/TR/css-align-3/#distribution-values)
    #[allow(clippy::cast_possible_truncation, clippy::cast_possible_wrap)]
    #[must_use]
    pub fn initial_content_position_offset(
        available_free_space: Au,
        data: ContentAlignmentData,
        number_of_items: usize,
        is_reversed: bool,
    ) -> Au {
        let position = data.position;
        debug_assert!(!matches!(
            position,
            ContentPosition::Left | ContentPosition::Right
        ));
        if position == ContentPosition::FlexEnd
            || (position == ContentPosition::End && !is_reversed)
            || (position == ContentPosition::Start && is_reversed)
        {
            return available_free_space;
        }
        if position == ContentPosition::Center {
            return available_free_space / 2;
        }
        let count = number_of_items as i32;
        match data.distribution {
            ContentDistribution::SpaceAround => {
                if available_free_space > Au(0) && count > 0 {
                    available_free_space / (2 * count)
                } else {
                    available_free_space / 2
                }
            }
            ContentDistribution::SpaceEvenly => {
                // Falls back to center.
                if available_free_space > Au(0) && count > 0 {
                    available_free_space / (count + 1)
                } else {
                    available_free_space / 2
                }
            }
            _ => Au(0),
        }
    }

    /// Extra space inserted between adjacent subjects.
    #[allow(clippy::cast_possible_truncation, clippy::cast_possible_wrap)]
    #[must_use]
    pub fn content_distribution_space_between_children(
        available_free_space: Au,
        data: ContentAlignmentData,
        number_of_items: usize,
    ) -> Au {
        if available_free_space <= Au(0) || number_of_items <= 1 {
            return Au(0);
        }
        let count = number_of_items as i32;
        match data.distribution {
            ContentDistribution::SpaceBetween => available_free_space / (count - 1),
            ContentDistribution::SpaceAround | ContentDistribution::Stretch => {
                available_free_space / count
            }
            ContentDistribution::SpaceEvenly => available_free_space / (count + 1),
            ContentDistribution::Default => Au(0),
        }
    }

    /// [§ 4.5 Automatic Minimum Size](https://www.w3.org/TR/css-flexbox-1/#min-size-auto)
    ///
    /// "To provide a more reasonable default minimum size for flex items, the
    /// used value of a main axis automatic minimum size on a flex item that is
    /// not a scroll container is a content-based minimum size."
    #[must_use]
    pub fn should_apply_min_size_auto_for_child(
        container: &ComputedStyle,
        child: &ComputedStyle,
    ) -> bool {
        let is_column = container.is_column_flex_direction();
        let min = if is_column {
            child.min_height
        } else {
            child.min_width
        };
        // Columns run along the item's block axis, where intrinsic keywords
        // also mean content-based.
        let intrinsic_in_block_axis = is_column && min.is_intrinsic();
        if !min.is_auto() && !intrinsic_in_block_axis {
            return false;
        }
        let overflow = if is_column {
            child.overflow_y
        } else {
            child.overflow_x
        };
        overflow == Overflow::Visible
    }

    /// [§ 9.4 step 15](https://www.w3.org/TR/css-flexbox-1/#algo-cross-container)
    ///
    /// Distribute free cross space between lines per `align-content`.
    pub fn align_flex_lines(&mut self, cross_axis_content_extent: Au) {
        let align_content = self.config.align_content;
        let gap_between_lines = self.config.gap_between_lines;
        if align_content.position == ContentPosition::FlexStart && gap_between_lines == Au(0) {
            return;
        }
        if self.flex_lines.is_empty() || !self.config.is_multiline() {
            return;
        }

        let line_count = self.flex_lines.len();
        let gap_count = i32::try_from(line_count - 1).unwrap_or(i32::MAX);
        let mut available_cross_axis_space =
            cross_axis_content_extent - gap_between_lines * gap_count;
        for line in &self.flex_lines {
            available_cross_axis_space -= line.cross_axis_extent;
        }

        let mut line_offset = Self::initial_content_position_offset(
            available_cross_axis_space,
            align_content,
            line_count,
            self.config.is_wrap_reverse(),
        );
        let space_between = Self::content_distribution_space_between_children(
            available_cross_axis_space,
            align_content,
            line_count,
        );
        let stretch_share = available_cross_axis_space / i32::try_from(line_count).unwrap_or(1);
        for line in &mut self.flex_lines {
            line.cross_axis_offset += line_offset;
            for item in &mut line.items {
                item.offset.cross_axis_offset += line_offset;
            }
            if align_content.distribution == ContentDistribution::Stretch
                && available_cross_axis_space > Au(0)
            {
                line.cross_axis_extent += stretch_share;
            }
            line_offset += space_between + gap_between_lines;
        }
    }

    /// [§ 9.6 Cross-Axis Alignment](https://www.w3.org/TR/css-flexbox-1/#cross-alignment)
    ///
    /// Resolve cross-axis auto margins, stretch items and apply `align-self`.
    /// Stretched items are flagged for relayout.
    pub fn align_children(&mut self) {
        let config = self.config;
        let is_wrap_reverse = config.is_wrap_reverse();

        // Space between the baseline edge and the after edge of each line's
        // baseline-aligned items.
        let mut min_margin_after_baselines = Vec::with_capacity(self.flex_lines.len());
        for line in &mut self.flex_lines {
            let mut min_margin_after_baseline: Option<Au> = None;
            let line_extent = line.cross_axis_extent;
            let max_ascent = line.max_ascent;

            for item in &mut line.items {
                let space = item
                    .available_alignment_space(&config, line_extent)
                    .max(Au(0));
                if item.update_auto_margins_in_cross_axis(&config, space) {
                    continue;
                }

                let position = item.alignment;
                if position == ItemPosition::Stretch {
                    item.compute_stretched_size(&config, line_extent);
                    item.needs_relayout_for_stretch = true;
                }
                let available_space = item.available_alignment_space(&config, line_extent);
                let offset = FlexItem::alignment_offset(
                    available_space,
                    position,
                    item.margin_box_ascent(&config),
                    max_ascent,
                    is_wrap_reverse,
                );
                item.offset.cross_axis_offset += offset;
                if position == ItemPosition::Baseline && is_wrap_reverse {
                    let after = available_space - offset;
                    min_margin_after_baseline =
                        Some(min_margin_after_baseline.map_or(after, |min| min.min(after)));
                }
            }
            min_margin_after_baselines.push(min_margin_after_baseline);
        }

        if !is_wrap_reverse {
            return;
        }

        // wrap-reverse flips cross-start and cross-end, so baseline items
        // line up their after edge with the after edge of the line.
        for (line, min_margin_after_baseline) in
            self.flex_lines.iter_mut().zip(min_margin_after_baselines)
        {
            let Some(adjustment) = min_margin_after_baseline.filter(|m| *m != Au(0)) else {
                continue;
            };
            for item in &mut line.items {
                if item.alignment == ItemPosition::Baseline
                    && !item.has_auto_margins_in_cross_axis(&config)
                {
                    item.offset.cross_axis_offset += adjustment;
                }
            }
        }
    }

    /// [§ 5.2 'flex-wrap'](https://www.w3.org/TR/css-flexbox-1/#valdef-flex-wrap-wrap-reverse)
    ///
    /// "Same as wrap, except the cross-start and cross-end directions are
    /// swapped."
    pub fn flip_for_wrap_reverse(&mut self, cross_axis_start_edge: Au, cross_axis_content_size: Au) {
        debug_assert!(self.config.is_wrap_reverse());
        for line in &mut self.flex_lines {
            let original_offset = line.cross_axis_offset - cross_axis_start_edge;
            let new_offset = cross_axis_content_size - original_offset - line.cross_axis_extent;
            let wrap_reverse_difference = new_offset - original_offset;
            for item in &mut line.items {
                item.offset.cross_axis_offset += wrap_reverse_difference;
            }
        }
    }

    /// Content block size implied by the lines, used for `auto` heights.
    #[allow(clippy::cast_possible_truncation, clippy::cast_possible_wrap)]
    #[must_use]
    pub fn intrinsic_content_block_size(&self) -> Au {
        let (Some(first), Some(last)) = (self.flex_lines.first(), self.flex_lines.last()) else {
            return Au(0);
        };

        if self.config.is_column_flow() {
            return self
                .flex_lines
                .iter()
                .map(|line| line.sum_hypothetical_main_size)
                .fold(Au(0), Au::max);
        }

        // Subtracting the first offset removes the container's border and
        // padding.
        let gap_count = (self.flex_lines.len() - 1) as i32;
        last.cross_axis_offset + last.cross_axis_extent - first.cross_axis_offset
            + self.config.gap_between_lines * gap_count
    }
}

/// Resolve `normal` to the flex behavior of `stretch`.
const fn resolve_normal_content_alignment(value: ContentAlignment) -> ContentAlignmentData {
    match value {
        ContentAlignment::Normal => {
            ContentAlignmentData::new(ContentPosition::Normal, ContentDistribution::Stretch)
        }
        other => other.data(),
    }
}

fn resolve_gap(gap: Option<Length>, percent_base: Extent) -> Au {
    gap.and_then(|length| resolve_length(length, percent_base.unwrap_or(Au(0))))
        .unwrap_or(Au(0))
        .max(Au(0))
}
