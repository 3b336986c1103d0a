//! The flex container box.
//!
//! [§ 9 Flex Layout Algorithm](https://www.w3.org/TR/css-flexbox-1/#layout-algorithm)
//!
//! [`FlexibleBox`] measures its children, feeds them to a
//! [`FlexLayoutAlgorithm`] and applies the resulting sizes and offsets. The
//! algorithm itself never touches a box.
//!
//! A pass runs through these phases in order:
//!
//! ```text
//! Uninitialized -> ItemsConstructed -> LinesBuilt -> LengthsResolved
//!     -> ItemsPositioned -> LinesPositioned -> Done
//! ```
//!
//! Children that change their scrollbars while the container lays them out
//! request one more pass through the [`LayoutContext`]. Only the outermost
//! container runs it, with scrollbars frozen.

use std::collections::{HashMap, HashSet};

use app_units::{Au, MAX_AU};

use crate::algorithm::{FlexContainerConfig, FlexLayoutAlgorithm};
use crate::context::LayoutContext;
use crate::flex_item::FlexItem;
use crate::flex_line::FlexLine;
use crate::geometry::{FlexOffset, LogicalSize, PhysicalBoxStrut, PhysicalOffset, PhysicalSize};
use crate::participant::{BoxState, ContainingBlock, FlexParticipant, NodeId};
use crate::sizing::{
    InlineSizing, border_padding, compute_logical_height, compute_logical_width,
    constrain_preferred_widths, margin_intrinsic_logical_width, percent_of,
    percentage_resolution_height, resolve_length, resolve_margins,
};
use crate::style::{ComputedStyle, FlexDirection, ItemPosition, Length};
use crate::unit::{Extent, MinMaxSizes, px};

/// Progress of a container through one layout pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub enum FlexLayoutPhase {
    /// No pass has started.
    #[default]
    Uninitialized,
    /// Every in-flow child has a flex item.
    ItemsConstructed,
    /// Items are collected into lines.
    LinesBuilt,
    /// Main sizes are resolved.
    LengthsResolved,
    /// Items are laid out and placed along the main axis.
    ItemsPositioned,
    /// Lines and items are aligned along the cross axis.
    LinesPositioned,
    /// Children are at their final positions.
    Done,
}

/// Container measurements that stay fixed while its children are laid out.
#[derive(Debug, Clone, Copy)]
struct ContainerMetrics {
    is_column: bool,
    left_to_right_direction: bool,
    border_padding: PhysicalBoxStrut,
    content_width: Au,
    /// Content height percentages of the children resolve against.
    child_percentage_height: Extent,
}

impl ContainerMetrics {
    fn flow_aware_content_inset_start(&self, config: &FlexContainerConfig) -> Au {
        if !config.is_horizontal_flow() {
            self.border_padding.top
        } else if config.is_left_to_right_flow() {
            self.border_padding.left
        } else {
            self.border_padding.right
        }
    }

    fn flow_aware_content_inset_end(&self, config: &FlexContainerConfig) -> Au {
        if !config.is_horizontal_flow() {
            self.border_padding.bottom
        } else if config.is_left_to_right_flow() {
            self.border_padding.right
        } else {
            self.border_padding.left
        }
    }

    fn flow_aware_content_inset_before(&self) -> Au {
        if !self.is_column {
            self.border_padding.top
        } else if self.left_to_right_direction {
            self.border_padding.left
        } else {
            self.border_padding.right
        }
    }

    fn flow_aware_content_inset_after(&self) -> Au {
        if !self.is_column {
            self.border_padding.bottom
        } else if self.left_to_right_direction {
            self.border_padding.right
        } else {
            self.border_padding.left
        }
    }

    /// `flex-basis`, falling back to the main size property when `auto`.
    fn flex_basis_for_child(&self, child: &ComputedStyle) -> Length {
        if !child.flex_basis.is_auto() {
            return child.flex_basis;
        }
        if self.is_column {
            child.height
        } else {
            child.width
        }
    }

    /// [§ 9.8 Definite and Indefinite Sizes](https://www.w3.org/TR/css-flexbox-1/#definite-sizes)
    fn main_axis_length_is_definite(&self, length: Length) -> bool {
        match length {
            Length::Auto | Length::None => false,
            Length::MinContent | Length::MaxContent | Length::FitContent => !self.is_column,
            Length::Percent(_) => !self.is_column || self.child_percentage_height.is_definite(),
            Length::Fixed(_) => true,
        }
    }

    fn cross_axis_length_is_definite(&self, length: Length) -> bool {
        match length {
            Length::Percent(_) => self.is_column || self.child_percentage_height.is_definite(),
            Length::Fixed(_) => true,
            _ => false,
        }
    }

    /// Resolve a main-axis length of `child` to a content-box size.
    /// `Indefinite` when the length has nothing to resolve against.
    fn main_axis_extent_for_child(
        &self,
        child: &dyn FlexParticipant,
        context: &LayoutContext,
        length: Length,
        border_padding: Au,
    ) -> Extent {
        if self.is_column {
            return match length {
                Length::Fixed(value) => Extent::Definite(px(value)),
                Length::Percent(pct) => self
                    .child_percentage_height
                    .map(|height| percent_of(height, pct)),
                Length::MinContent | Length::MaxContent | Length::FitContent => {
                    Extent::Definite(child.intrinsic_content_logical_height())
                }
                Length::Auto | Length::None => Extent::Indefinite,
            };
        }
        let preferred = || child.preferred_logical_widths(context);
        match length {
            Length::Fixed(_) | Length::Percent(_) => resolve_length(length, self.content_width)
                .map_or(Extent::Indefinite, Extent::Definite),
            Length::MinContent => Extent::Definite(preferred().min_size - border_padding),
            Length::MaxContent => Extent::Definite(preferred().max_size - border_padding),
            Length::FitContent => {
                let sizes = preferred();
                let available = self.content_width
                    - resolve_margins(child.style(), self.content_width).horizontal_sum();
                Extent::Definite(
                    available.min(sizes.max_size).max(sizes.min_size) - border_padding,
                )
            }
            Length::Auto | Length::None => Extent::Indefinite,
        }
    }

    /// Main content size implied by a cross-axis length and the child's
    /// `aspect-ratio`.
    fn main_size_from_aspect_ratio(&self, child: &ComputedStyle, cross_length: Length) -> Au {
        let ratio = child.aspect_ratio.unwrap_or(1.0);
        let cross_size = match cross_length {
            Length::Fixed(value) => px(value),
            Length::Percent(pct) if self.is_column => percent_of(self.content_width, pct),
            Length::Percent(pct) => self
                .child_percentage_height
                .definite()
                .map_or(Au(0), |height| percent_of(height, pct)),
            _ => Au(0),
        };
        if self.is_column {
            cross_size.scale_by(1.0 / ratio)
        } else {
            cross_size.scale_by(ratio)
        }
    }

    /// Transfer the cross-axis min and max sizes through the aspect ratio.
    fn adjust_for_aspect_ratio_cross_min_max(&self, child: &ComputedStyle, size: Au) -> Au {
        let (cross_min, cross_max) = if self.is_column {
            (child.min_width, child.max_width)
        } else {
            (child.min_height, child.max_height)
        };
        let mut size = size;
        if self.cross_axis_length_is_definite(cross_max) {
            size = size.min(self.main_size_from_aspect_ratio(child, cross_max));
        }
        if self.cross_axis_length_is_definite(cross_min) {
            size = size.max(self.main_size_from_aspect_ratio(child, cross_min));
        }
        size
    }

    fn use_child_aspect_ratio(&self, child: &ComputedStyle) -> bool {
        if !child.aspect_ratio.is_some_and(|ratio| ratio > 0.0 && ratio.is_finite()) {
            return false;
        }
        let cross_size = if self.is_column {
            child.width
        } else {
            child.height
        };
        self.cross_axis_length_is_definite(cross_size)
    }

    /// Whether the child's main size is only known after laying it out.
    /// Only heights depend on layout.
    fn child_has_intrinsic_main_axis_size(
        &self,
        container: &ComputedStyle,
        child: &ComputedStyle,
    ) -> bool {
        if !self.is_column {
            return false;
        }
        !self.main_axis_length_is_definite(self.flex_basis_for_child(child))
            || child.min_height.is_intrinsic()
            || child.max_height.is_intrinsic()
            || FlexLayoutAlgorithm::should_apply_min_size_auto_for_child(container, child)
    }

    /// Main size recorded for a child after its intrinsic layout.
    fn child_intrinsic_main_size(&self, child: &dyn FlexParticipant, border_padding: Au) -> Au {
        let basis = self.flex_basis_for_child(child.style());
        if basis.is_percent() && !self.main_axis_length_is_definite(basis) {
            child.intrinsic_content_logical_height() + border_padding
        } else {
            child.size().height
        }
    }

    /// [§ 9.2 step 3](https://www.w3.org/TR/css-flexbox-1/#algo-main-item)
    ///
    /// The flex base size of the child's content box.
    fn compute_inner_flex_base_size_for_child(
        &self,
        child: &dyn FlexParticipant,
        context: &LayoutContext,
        main_axis_border_padding: Au,
        cached_main_size: Option<Au>,
    ) -> Au {
        let style = child.style();
        let flex_basis = self.flex_basis_for_child(style);

        // STEP 3A-B: a definite flex basis is used as is.
        if self.main_axis_length_is_definite(flex_basis) {
            return self
                .main_axis_extent_for_child(child, context, flex_basis, main_axis_border_padding)
                .unwrap_or(Au(0))
                .max(Au(0));
        }

        // "If the flex item has a preferred aspect ratio and a definite cross
        // size, then the flex base size is calculated from its inner cross
        // size and the flex item's preferred aspect ratio."
        if self.use_child_aspect_ratio(style) {
            let cross_length = if self.is_column {
                style.width
            } else {
                style.height
            };
            let size = self.main_size_from_aspect_ratio(style, cross_length);
            return self.adjust_for_aspect_ratio_cross_min_max(style, size);
        }

        // STEP 3E: otherwise size the item into the available space using
        // its max-content main size.
        let main_axis_extent = if self.is_column {
            cached_main_size.unwrap_or_else(|| child.size().height)
        } else {
            child.preferred_logical_widths(context).max_size
        };
        (main_axis_extent - main_axis_border_padding).max(Au(0))
    }

    /// [§ 4.5 Automatic Minimum Size](https://www.w3.org/TR/css-flexbox-1/#min-size-auto)
    ///
    /// Used min and max main sizes of the child's content box.
    fn compute_min_and_max_sizes_for_child(
        &self,
        container: &ComputedStyle,
        child: &dyn FlexParticipant,
        context: &LayoutContext,
        border_padding: Au,
    ) -> MinMaxSizes {
        let style = child.style();
        let mut sizes = MinMaxSizes::default();
        let (min, max, main_size) = if self.is_column {
            (style.min_height, style.max_height, style.height)
        } else {
            (style.min_width, style.max_width, style.width)
        };

        if !max.is_none() {
            sizes.max_size = self
                .main_axis_extent_for_child(child, context, max, border_padding)
                .unwrap_or(MAX_AU)
                .max(Au(0));
        }

        if !min.is_auto() {
            // A percentage of an indefinite size behaves as zero.
            sizes.min_size = self
                .main_axis_extent_for_child(child, context, min, border_padding)
                .unwrap_or(Au(0))
                .max(Au(0));
        } else if FlexLayoutAlgorithm::should_apply_min_size_auto_for_child(container, style) {
            // "The content size suggestion is the min-content size in the
            // main axis, clamped, if it has a preferred aspect ratio, by any
            // definite min and max cross size properties converted through
            // the aspect ratio, and then further clamped by the max main size
            // property if that is definite."
            let mut content_size = self
                .main_axis_extent_for_child(child, context, Length::MinContent, border_padding)
                .unwrap_or(Au(0))
                .max(Au(0));
            if style.aspect_ratio.is_some() {
                content_size = self.adjust_for_aspect_ratio_cross_min_max(style, content_size);
            }
            content_size = content_size.min(sizes.max_size);

            sizes.min_size = if self.main_axis_length_is_definite(main_size) {
                // "If the item's preferred main size is definite and not
                // automatic, then the specified size suggestion is that size."
                let specified_size = self
                    .main_axis_extent_for_child(child, context, main_size, border_padding)
                    .unwrap_or(Au(0))
                    .max(Au(0))
                    .min(sizes.max_size);
                specified_size.min(content_size)
            } else if self.use_child_aspect_ratio(style) {
                let cross_length = if self.is_column {
                    style.width
                } else {
                    style.height
                };
                let transferred_size = self.adjust_for_aspect_ratio_cross_min_max(
                    style,
                    self.main_size_from_aspect_ratio(style, cross_length),
                );
                transferred_size.min(content_size)
            } else {
                content_size
            };
        }
        debug_assert!(sizes.min_size >= Au(0));
        sizes
    }

    /// Border-box min and max sizes along the cross axis, used to limit
    /// stretching.
    fn cross_min_max_sizes_for_child(&self, child: &ComputedStyle, border_padding: Au) -> MinMaxSizes {
        let (min, max, base) = if self.is_column {
            (child.min_width, child.max_width, Extent::Definite(self.content_width))
        } else {
            (child.min_height, child.max_height, self.child_percentage_height)
        };
        let resolve = |length: Length| match length {
            Length::Fixed(value) => Some(px(value)),
            Length::Percent(pct) => base.definite().map(|size| percent_of(size, pct)),
            _ => None,
        };
        MinMaxSizes::new(
            resolve(min).map_or(border_padding, |size| size + border_padding),
            resolve(max).map_or(MAX_AU, |size| size + border_padding),
        )
    }

    /// The child's cross size before any stretching.
    fn cross_axis_unstretched_extent_for_child(
        &self,
        child: &dyn FlexParticipant,
        context: &LayoutContext,
        item: &FlexItem,
    ) -> Au {
        let style = child.style();
        let containing_block = child.state().containing_block;
        if !self.is_column {
            if item.alignment == ItemPosition::Stretch && style.height.is_auto() {
                return compute_logical_height(
                    style,
                    item.cross_axis_border_padding,
                    child.intrinsic_content_logical_height(),
                    containing_block.block_size,
                );
            }
            return child.size().height;
        }
        if !self.cross_axis_length_is_definite(style.width) {
            return compute_logical_width(
                style,
                child.preferred_logical_widths(context),
                containing_block.inline_size,
                item.margins.horizontal_sum(),
                containing_block.inline_sizing,
            );
        }
        child.size().width
    }

    fn main_axis_extent(&self, size: PhysicalSize) -> Au {
        if self.is_column {
            size.height
        } else {
            size.width
        }
    }

    fn cross_axis_extent(&self, size: PhysicalSize) -> Au {
        if self.is_column {
            size.width
        } else {
            size.height
        }
    }
}

/// A box with `display: flex`.
#[derive(Debug)]
pub struct FlexibleBox {
    id: NodeId,
    style: ComputedStyle,
    children: Vec<Box<dyn FlexParticipant>>,
    state: BoxState,
    /// Used margins of each child, indexed like `children`.
    child_margins: Vec<PhysicalBoxStrut>,
    /// Child indices in `order`-modified document order.
    order: Vec<usize>,
    /// Main sizes of children measured by an intrinsic layout.
    intrinsic_size_along_main_axis: HashMap<NodeId, Au>,
    /// Children laid out during the current pass.
    relaid_out_children: HashSet<NodeId>,
    first_line_item_count: Option<usize>,
    line_count: usize,
    intrinsic_content_height: Au,
    layout_overflow_bottom: Au,
    phase: FlexLayoutPhase,
}

impl FlexibleBox {
    /// Create an empty container.
    #[must_use]
    pub fn new(id: NodeId, style: ComputedStyle) -> Self {
        Self {
            id,
            style,
            children: Vec::new(),
            state: BoxState::new(),
            child_margins: Vec::new(),
            order: Vec::new(),
            intrinsic_size_along_main_axis: HashMap::new(),
            relaid_out_children: HashSet::new(),
            first_line_item_count: None,
            line_count: 0,
            intrinsic_content_height: Au(0),
            layout_overflow_bottom: Au(0),
            phase: FlexLayoutPhase::Uninitialized,
        }
    }

    /// Create a container holding `children`.
    #[must_use]
    pub fn with_children(
        id: NodeId,
        style: ComputedStyle,
        children: Vec<Box<dyn FlexParticipant>>,
    ) -> Self {
        let mut container = Self::new(id, style);
        for child in children {
            container.append_child(child);
        }
        container
    }

    /// Add a child after the existing ones.
    pub fn append_child(&mut self, child: Box<dyn FlexParticipant>) {
        self.children.push(child);
        self.child_margins.push(PhysicalBoxStrut::default());
        self.state.needs_layout = true;
    }

    /// Remove and return the child at `index`, forgetting its cached size.
    pub fn remove_child(&mut self, index: usize) -> Option<Box<dyn FlexParticipant>> {
        if index >= self.children.len() {
            return None;
        }
        let child = self.children.remove(index);
        let _ = self.child_margins.remove(index);
        let _ = self.intrinsic_size_along_main_axis.remove(&child.id());
        self.state.needs_layout = true;
        Some(child)
    }

    /// The child at `index`.
    #[must_use]
    pub fn child(&self, index: usize) -> Option<&dyn FlexParticipant> {
        self.children.get(index).map(Box::as_ref)
    }

    /// Replace the style and invalidate layout.
    pub fn set_style(&mut self, style: ComputedStyle) {
        self.style = style;
        self.state.needs_layout = true;
    }

    /// Used margins of the child at `index` from the last layout.
    #[must_use]
    pub fn child_margins(&self, index: usize) -> Option<PhysicalBoxStrut> {
        self.child_margins.get(index).copied()
    }

    /// Number of flex lines from the last layout.
    #[must_use]
    pub const fn line_count(&self) -> usize {
        self.line_count
    }

    /// Number of items on the first line from the last layout.
    #[must_use]
    pub const fn first_line_item_count(&self) -> Option<usize> {
        self.first_line_item_count
    }

    /// Phase reached by the last layout pass.
    #[must_use]
    pub const fn phase(&self) -> FlexLayoutPhase {
        self.phase
    }

    /// Bottom of the scrollable overflow, including the bottom padding.
    #[must_use]
    pub const fn layout_overflow_bottom(&self) -> Au {
        self.layout_overflow_bottom
    }

    fn advance_phase(&mut self, phase: FlexLayoutPhase) {
        // Lines are built one at a time, so every line after the first
        // starts over at `LinesBuilt`.
        let next_line = phase == FlexLayoutPhase::LinesBuilt
            && self.phase == FlexLayoutPhase::ItemsPositioned;
        debug_assert!(
            phase >= self.phase || next_line,
            "{:?} after {:?}",
            phase,
            self.phase
        );
        log::trace!(target: "layout", "{} {:?}", self.id, phase);
        self.phase = phase;
    }

    fn metrics(&self) -> ContainerMetrics {
        let containing_block = self.state.containing_block;
        let strut = border_padding(&self.style, containing_block.inline_size);
        ContainerMetrics {
            is_column: self.style.is_column_flex_direction(),
            left_to_right_direction: self.style.is_left_to_right_direction(),
            border_padding: strut,
            content_width: (self.state.size.width - strut.horizontal_sum()).max(Au(0)),
            child_percentage_height: percentage_resolution_height(
                &self.style,
                self.state.override_height,
                strut.vertical_sum(),
                containing_block.block_size,
            ),
        }
    }

    /// Compute the border-box width. Returns whether it changed.
    fn update_logical_width(&mut self, context: &LayoutContext) -> bool {
        let containing_block = self.state.containing_block;
        let width = match self.state.override_width {
            Some(width) => width,
            None => compute_logical_width(
                &self.style,
                self.preferred_logical_widths(context),
                containing_block.inline_size,
                resolve_margins(&self.style, containing_block.inline_size).horizontal_sum(),
                containing_block.inline_sizing,
            ),
        };
        let changed = width != self.state.size.width;
        self.state.size.width = width;
        changed
    }

    /// Resolve the border-box height from the height of the content laid
    /// out so far.
    fn update_logical_height(&mut self) {
        let strut = border_padding(&self.style, self.state.containing_block.inline_size);
        let content_height = (self.state.size.height - strut.vertical_sum()).max(Au(0));
        self.intrinsic_content_height = content_height;
        self.state.size.height = self.state.override_height.unwrap_or_else(|| {
            compute_logical_height(
                &self.style,
                strut.vertical_sum(),
                content_height,
                self.state.containing_block.block_size,
            )
        });
    }

    /// Main content size of a column container whose content is
    /// `content_height` tall.
    fn main_axis_content_extent(&self, metrics: &ContainerMetrics, content_height: Au) -> Au {
        if !metrics.is_column {
            return metrics.content_width;
        }
        let vertical = metrics.border_padding.vertical_sum();
        let height = self.state.override_height.unwrap_or_else(|| {
            compute_logical_height(
                &self.style,
                vertical,
                content_height,
                self.state.containing_block.block_size,
            )
        });
        if height >= MAX_AU {
            return MAX_AU;
        }
        (height - vertical).max(Au(0))
    }

    fn cross_axis_content_extent(&self, metrics: &ContainerMetrics) -> Au {
        if metrics.is_column {
            metrics.content_width
        } else {
            (self.state.size.height - metrics.border_padding.vertical_sum()).max(Au(0))
        }
    }

    /// Sort children by `order` and resolve their margins. `auto` margins
    /// are zero until the algorithm distributes free space.
    fn prepare_order_iterator_and_margins(&mut self, metrics: &ContainerMetrics) {
        self.order = (0..self.children.len()).collect();
        let children = &self.children;
        self.order.sort_by_key(|&index| children[index].style().order);

        for (child, margins) in self.children.iter().zip(self.child_margins.iter_mut()) {
            if child.style().is_out_of_flow_positioned() {
                continue;
            }
            *margins = resolve_margins(child.style(), metrics.content_width);
        }
    }

    fn containing_block_for_children(&self, metrics: &ContainerMetrics, child: &ComputedStyle) -> ContainingBlock {
        let stretches_inline = metrics.is_column
            && FlexLayoutAlgorithm::alignment_for_child(&self.style, child) == ItemPosition::Stretch
            && child.width.is_auto();
        ContainingBlock {
            inline_size: metrics.content_width,
            block_size: metrics.child_percentage_height,
            inline_sizing: if stretches_inline {
                InlineSizing::FillAvailable
            } else {
                InlineSizing::FitContent
            },
        }
    }

    fn construct_and_append_flex_item(
        &mut self,
        algorithm: &mut FlexLayoutAlgorithm,
        metrics: &ContainerMetrics,
        context: &LayoutContext,
        index: usize,
        force_layout: bool,
    ) {
        let child_style = self.children[index].style().clone();
        let child_id = self.children[index].id();
        let strut = border_padding(&child_style, metrics.content_width);
        let (main_axis_border_padding, cross_axis_border_padding) = if metrics.is_column {
            (strut.vertical_sum(), strut.horizontal_sum())
        } else {
            (strut.horizontal_sum(), strut.vertical_sum())
        };

        if metrics.child_has_intrinsic_main_axis_size(&self.style, &child_style) {
            let child = &mut self.children[index];
            if child.needs_layout()
                || force_layout
                || !self.intrinsic_size_along_main_axis.contains_key(&child_id)
            {
                // Percentages inside the child must not resolve against a
                // height that depends on this measurement.
                let containing_block = child.state().containing_block;
                child.set_containing_block(ContainingBlock {
                    block_size: Extent::Indefinite,
                    ..containing_block
                });
                child.set_override_logical_width(None);
                child.set_override_logical_height(None);
                child.layout(context);
                let main_size =
                    metrics.child_intrinsic_main_size(child.as_ref(), main_axis_border_padding);
                let _ = self.intrinsic_size_along_main_axis.insert(child_id, main_size);
                let _ = self.relaid_out_children.insert(child_id);
                child.set_containing_block(containing_block);
            }
        }

        let child = self.children[index].as_ref();
        let flex_base_content_size = metrics.compute_inner_flex_base_size_for_child(
            child,
            context,
            main_axis_border_padding,
            self.intrinsic_size_along_main_axis.get(&child_id).copied(),
        );
        let min_max_main_sizes = metrics.compute_min_and_max_sizes_for_child(
            &self.style,
            child,
            context,
            main_axis_border_padding,
        );
        let min_max_cross_sizes =
            metrics.cross_min_max_sizes_for_child(&child_style, cross_axis_border_padding);

        #[cfg(feature = "layout-trace")]
        eprintln!(
            "[FLEX ITEM] {} {} base={:?} min={:?} max={:?}",
            child_id,
            child.kind(),
            flex_base_content_size,
            min_max_main_sizes.min_size,
            min_max_main_sizes.max_size
        );

        let item = algorithm.append_item(
            index,
            child_style,
            flex_base_content_size,
            min_max_main_sizes,
        );
        item.main_axis_border_padding = main_axis_border_padding;
        item.cross_axis_border_padding = cross_axis_border_padding;
        item.margins = self.child_margins[index];
        item.min_max_cross_sizes = min_max_cross_sizes;
    }

    /// Lay out every item of a line at its flexed main size and record the
    /// resulting cross size and baseline.
    fn layout_line_items(
        &mut self,
        line: &mut FlexLine,
        metrics: &ContainerMetrics,
        context: &LayoutContext,
        relayout_children: bool,
    ) {
        for item in &mut line.items {
            let child = &mut self.children[item.child];
            let child_id = child.id();
            debug_assert!(!child.style().is_out_of_flow_positioned());

            let flexed_border_box_size = item.flexed_border_box_size();
            if metrics.is_column {
                child.set_override_logical_height(Some(flexed_border_box_size));
            } else {
                child.set_override_logical_width(Some(flexed_border_box_size));
            }
            if flexed_border_box_size != metrics.main_axis_extent(child.size()) {
                child.mark_needs_layout();
            }
            if relayout_children && !self.relaid_out_children.contains(&child_id) {
                child.mark_needs_layout();
            }
            if child.needs_layout() {
                let _ = self.relaid_out_children.insert(child_id);
                // The cross size is only cleared when layout runs, so that it
                // stays in sync with the laid out size.
                if metrics.is_column {
                    child.set_override_logical_width(None);
                } else {
                    child.set_override_logical_height(None);
                }
            }
            let _ = child.layout_if_needed(context);

            item.flexed_content_size =
                metrics.main_axis_extent(child.size()) - item.main_axis_border_padding;
            item.cross_axis_size =
                metrics.cross_axis_unstretched_extent_for_child(child.as_ref(), context, item);
            item.baseline = child.first_line_baseline();
        }
    }

    /// Grow the container to hold `line` and, for `column-reverse`, place
    /// its items from the bottom up.
    fn apply_line_items_position(
        &mut self,
        line: &mut FlexLine,
        metrics: &ContainerMetrics,
        config: &FlexContainerConfig,
    ) {
        let height = if metrics.is_column {
            line.main_axis_extent + metrics.flow_aware_content_inset_end(config)
        } else {
            line.cross_axis_offset + metrics.flow_aware_content_inset_after() + line.cross_axis_extent
        };
        self.state.size.height = self.state.size.height.max(height);

        if config.flex_direction == FlexDirection::ColumnReverse {
            // The start of a reversed column depends on the container's
            // height, which is only known once every item is placed.
            self.update_logical_height();
            self.layout_column_reverse(line, metrics, config);
        }
    }

    fn layout_column_reverse(
        &self,
        line: &mut FlexLine,
        metrics: &ContainerMetrics,
        config: &FlexContainerConfig,
    ) {
        let available_free_space = line.remaining_free_space;
        let item_count = line.items.len();
        let mut main_axis_offset = self.state.size.height
            - metrics.flow_aware_content_inset_end(config)
            - FlexLayoutAlgorithm::initial_content_position_offset(
                available_free_space,
                config.justify_content,
                item_count,
                false,
            );
        let space_between = FlexLayoutAlgorithm::content_distribution_space_between_children(
            available_free_space,
            config.justify_content,
            item_count,
        );

        let cross_axis_offset = line.cross_axis_offset;
        for (index, item) in line.items.iter_mut().enumerate() {
            main_axis_offset -= item.flexed_border_box_size() + item.flow_aware_margin_end(config);
            item.offset = FlexOffset::new(
                main_axis_offset,
                cross_axis_offset + item.flow_aware_margin_before(config),
            );
            main_axis_offset -= item.flow_aware_margin_start(config);
            if index + 1 != item_count {
                main_axis_offset -= space_between + config.gap_between_items;
            }
        }
    }

    /// [§ 9.4 step 11](https://www.w3.org/TR/css-flexbox-1/#algo-stretch)
    ///
    /// Impose the stretched cross size and lay the child out again when it
    /// changed.
    fn apply_stretch_alignment_to_child(
        &mut self,
        item: &FlexItem,
        metrics: &ContainerMetrics,
        context: &LayoutContext,
    ) {
        let child = &mut self.children[item.child];
        let style_size = if metrics.is_column {
            child.style().width
        } else {
            child.style().height
        };
        if !style_size.is_auto() {
            return;
        }
        let needs_relayout = item.cross_axis_size != metrics.cross_axis_extent(child.size());
        if metrics.is_column {
            child.set_override_logical_width(Some(item.cross_axis_size));
        } else {
            child.set_override_logical_height(Some(item.cross_axis_size));
        }
        if needs_relayout {
            child.mark_needs_layout();
            let _ = child.layout_if_needed(context);
        }
    }

    /// `direction: rtl` columns run their cross axis from the right.
    fn flip_for_right_to_left_column(&self, algorithm: &mut FlexLayoutAlgorithm, metrics: &ContainerMetrics) {
        if metrics.left_to_right_direction || !metrics.is_column {
            return;
        }
        let cross_extent = self.state.size.width;
        for line in algorithm.flex_lines_mut() {
            for item in &mut line.items {
                item.offset.cross_axis_offset =
                    cross_extent - item.cross_axis_size - item.offset.cross_axis_offset;
            }
        }
    }

    /// Cross-axis work that needs the container's final height.
    fn reposition_logical_height_dependent_flex_items(
        &mut self,
        algorithm: &mut FlexLayoutAlgorithm,
        metrics: &ContainerMetrics,
        context: &LayoutContext,
    ) {
        let config = *algorithm.config();
        let cross_axis_content_extent = self.cross_axis_content_extent(metrics);
        let cross_axis_start_edge = algorithm
            .flex_lines()
            .first()
            .map_or(Au(0), |line| line.cross_axis_offset);

        // A single line takes up all the cross space.
        if !config.is_multiline() {
            if let Some(line) = algorithm.flex_lines_mut().first_mut() {
                line.cross_axis_extent = cross_axis_content_extent;
            }
        }

        algorithm.align_flex_lines(cross_axis_content_extent);
        algorithm.align_children();
        for line in algorithm.flex_lines_mut() {
            for item in &mut line.items {
                if item.needs_relayout_for_stretch {
                    debug_assert_eq!(item.alignment, ItemPosition::Stretch);
                    self.apply_stretch_alignment_to_child(item, metrics, context);
                    item.needs_relayout_for_stretch = false;
                }
            }
        }

        if config.is_wrap_reverse() {
            algorithm.flip_for_wrap_reverse(cross_axis_start_edge, cross_axis_content_extent);
        }
        self.flip_for_right_to_left_column(algorithm, metrics);

        let is_horizontal = config.is_horizontal_flow();
        for line in algorithm.flex_lines() {
            for item in &line.items {
                self.children[item.child].set_location(item.offset.to_physical(is_horizontal));
                self.child_margins[item.child] = item.margins;
            }
        }
    }

    /// [§ 9 Flex Layout Algorithm](https://www.w3.org/TR/css-flexbox-1/#layout-algorithm)
    fn layout_flex_items(&mut self, context: &LayoutContext, relayout_children: bool) {
        let _prevent_relayout = context.prevent_relayout();
        let metrics = self.metrics();

        let line_break_length = self.main_axis_content_extent(&metrics, MAX_AU);
        let mut algorithm = FlexLayoutAlgorithm::new(
            &self.style,
            line_break_length,
            LogicalSize::new(
                Extent::Definite(metrics.content_width),
                metrics.child_percentage_height,
            ),
        );
        let config = *algorithm.config();

        let order = self.order.clone();
        for &index in &order {
            let child_style = self.children[index].style().clone();
            let containing_block = self.containing_block_for_children(&metrics, &child_style);
            self.children[index].set_containing_block(containing_block);
            if child_style.is_out_of_flow_positioned() {
                // Not a flex item. Placed at its static position later.
                continue;
            }
            self.construct_and_append_flex_item(
                &mut algorithm,
                &metrics,
                context,
                index,
                relayout_children,
            );
        }
        self.advance_phase(FlexLayoutPhase::ItemsConstructed);

        let mut cross_axis_offset = metrics.flow_aware_content_inset_before();
        let container_logical_width = self.state.size.width;
        let main_axis_start_offset = metrics.flow_aware_content_inset_start(&config);
        while let Some(line_index) = algorithm.compute_next_flex_line(container_logical_width) {
            self.advance_phase(FlexLayoutPhase::LinesBuilt);
            let mut line = std::mem::take(&mut algorithm.flex_lines_mut()[line_index]);

            let inner_size = self.main_axis_content_extent(&metrics, line.sum_hypothetical_main_size);
            line.set_container_main_inner_size(inner_size);
            line.freeze_inflexible_items();
            let passes = line.resolve_flexible_lengths_to_completion();
            debug_assert!(passes <= line.items.len() + 1);
            self.advance_phase(FlexLayoutPhase::LengthsResolved);

            log::trace!(
                target: "layout",
                "{} line {} items={} inner={:?} passes={}",
                self.id,
                line_index,
                line.items.len(),
                inner_size,
                passes
            );
            #[cfg(feature = "layout-trace")]
            eprintln!(
                "[FLEX LINE] {} line={} items={} inner_size={:?} free={:?} passes={}",
                self.id,
                line_index,
                line.items.len(),
                inner_size,
                line.remaining_free_space,
                passes
            );

            self.layout_line_items(&mut line, &metrics, context, relayout_children);
            line.compute_line_items_position(&config, main_axis_start_offset, &mut cross_axis_offset);
            self.apply_line_items_position(&mut line, &metrics, &config);
            self.advance_phase(FlexLayoutPhase::ItemsPositioned);

            if self.first_line_item_count.is_none() {
                self.first_line_item_count = Some(line.items.len());
            }
            algorithm.flex_lines_mut()[line_index] = line;
        }
        self.line_count = algorithm.flex_lines().len();

        if self.style.has_line_if_empty {
            // The container may have no lines when every child is out of
            // flow, so check the height rather than the line count.
            let min_height = metrics.border_padding.vertical_sum() + px(self.style.line_height);
            self.state.size.height = self.state.size.height.max(min_height);
        }
        if !metrics.is_column && self.line_count > 1 {
            let gap_count = i32::try_from(self.line_count - 1).unwrap_or(i32::MAX);
            self.state.size.height += config.gap_between_lines * gap_count;
        }
        self.update_logical_height();
        if self.state.override_height.is_none() && metrics.is_column {
            self.intrinsic_content_height = algorithm.intrinsic_content_block_size();
        }

        self.reposition_logical_height_dependent_flex_items(&mut algorithm, &metrics, context);
        self.advance_phase(FlexLayoutPhase::LinesPositioned);
    }

    /// [§ 4.1 Absolutely-Positioned Flex Children](https://www.w3.org/TR/css-flexbox-1/#abspos-items)
    ///
    /// "The static position of an absolutely-positioned child of a flex
    /// container is determined such that the child is positioned as if it
    /// were the sole flex item in the flex container."
    fn static_position_for_positioned_child(
        &self,
        metrics: &ContainerMetrics,
        config: &FlexContainerConfig,
        child: &dyn FlexParticipant,
    ) -> PhysicalOffset {
        let size = child.size();
        let content_height =
            (self.state.size.height - metrics.border_padding.vertical_sum()).max(Au(0));
        let content_size = PhysicalSize::new(metrics.content_width, content_height);

        let main_available =
            metrics.main_axis_extent(content_size) - metrics.main_axis_extent(size);
        let mut main_offset = FlexLayoutAlgorithm::initial_content_position_offset(
            main_available,
            config.justify_content,
            1,
            false,
        );
        if config.is_reversed() {
            main_offset = main_available - main_offset;
        }

        let cross_available =
            metrics.cross_axis_extent(content_size) - metrics.cross_axis_extent(size);
        let cross_offset = FlexItem::alignment_offset(
            cross_available,
            FlexLayoutAlgorithm::alignment_for_child(&self.style, child.style()),
            Au(0),
            Au(0),
            config.is_wrap_reverse(),
        );

        let (inline_offset, block_offset) = if metrics.is_column {
            (cross_offset, main_offset)
        } else {
            (main_offset, cross_offset)
        };
        let strut = metrics.border_padding;
        let left = if metrics.left_to_right_direction {
            strut.left + inline_offset
        } else {
            self.state.size.width - strut.right - size.width - inline_offset
        };
        PhysicalOffset::new(left, strut.top + block_offset)
    }

    fn layout_positioned_children(&mut self, context: &LayoutContext, relayout_children: bool) {
        let metrics = self.metrics();
        let config = *FlexLayoutAlgorithm::new(
            &self.style,
            MAX_AU,
            LogicalSize::new(Extent::Definite(metrics.content_width), metrics.child_percentage_height),
        )
        .config();
        for index in 0..self.children.len() {
            if !self.children[index].style().is_out_of_flow_positioned() {
                continue;
            }
            let containing_block = ContainingBlock {
                inline_size: metrics.content_width,
                block_size: metrics.child_percentage_height,
                inline_sizing: InlineSizing::FitContent,
            };
            let child = &mut self.children[index];
            child.set_containing_block(containing_block);
            if relayout_children {
                child.mark_needs_layout();
            }
            let _ = child.layout_if_needed(context);
            let location =
                self.static_position_for_positioned_child(&metrics, &config, self.children[index].as_ref());
            self.children[index].set_location(location);
        }
    }

    /// Bottom of the in-flow content, used as the scrollable overflow.
    fn client_logical_bottom_after_repositioning(&self) -> Au {
        let containing_width = self.state.containing_block.inline_size;
        let padding_bottom =
            resolve_length(self.style.padding.bottom, containing_width).unwrap_or(Au(0));
        let max_child_bottom = self
            .children
            .iter()
            .zip(&self.child_margins)
            .filter(|(child, _)| !child.style().is_out_of_flow_positioned())
            .map(|(child, margins)| child.frame_rect().bottom() + margins.bottom)
            .fold(Au(0), Au::max);
        let client_bottom = self.state.size.height - px(self.style.border_width.bottom);
        client_bottom.max(max_child_bottom + padding_bottom)
    }

    /// [§ 9.5 Flex Container Intrinsic Main Sizes](https://www.w3.org/TR/css-flexbox-1/#intrinsic-main-sizes)
    ///
    /// Count the containers whose result would change if intrinsic sizes
    /// used max-content flex fractions: that happens when the fraction
    /// differs between flexible items.
    #[allow(clippy::float_cmp)]
    fn count_intrinsic_size_for_algorithm_change(
        &self,
        context: &LayoutContext,
        max_preferred_width: Au,
        child: &ComputedStyle,
        previous_fraction: Option<f32>,
    ) -> Option<f32> {
        if self.style.is_column_flex_direction() {
            return previous_fraction;
        }
        // An auto basis gives a fraction of zero, the same as an inflexible
        // item.
        if child.flex_basis.is_auto() || child.flex_grow == 0.0 {
            return previous_fraction;
        }
        let fraction = max_preferred_width.to_f32_px() / child.flex_grow.max(1.0);
        if previous_fraction.is_some_and(|previous| previous != fraction) {
            context.record_intrinsic_size_algorithm_change();
        }
        Some(fraction)
    }
}

impl FlexParticipant for FlexibleBox {
    fn id(&self) -> NodeId {
        self.id
    }

    fn style(&self) -> &ComputedStyle {
        &self.style
    }

    fn state(&self) -> &BoxState {
        &self.state
    }

    fn state_mut(&mut self) -> &mut BoxState {
        &mut self.state
    }

    fn children(&self) -> &[Box<dyn FlexParticipant>] {
        &self.children
    }

    fn kind(&self) -> &'static str {
        "flex"
    }

    /// Min-content and max-content widths of the container.
    ///
    /// Rows sum their items' contributions and columns take the largest.
    /// `flex-basis` is ignored here.
    fn preferred_logical_widths(&self, context: &LayoutContext) -> MinMaxSizes {
        let is_column = self.style.is_column_flex_direction();
        let is_multiline = self.style.flex_wraps();
        let mut child_sizes = MinMaxSizes::new(Au(0), Au(0));
        let mut previous_fraction = None;
        let mut number_of_items = 0;

        for child in &self.children {
            if child.style().is_out_of_flow_positioned() {
                continue;
            }
            number_of_items += 1;
            let margin = margin_intrinsic_logical_width(child.style());
            let preferred = child.preferred_logical_widths(context);
            let min_preferred = preferred.min_size + margin;
            let max_preferred = preferred.max_size + margin;
            if is_column {
                child_sizes.min_size = child_sizes.min_size.max(min_preferred);
                child_sizes.max_size = child_sizes.max_size.max(max_preferred);
            } else {
                child_sizes.max_size += max_preferred;
                if is_multiline {
                    // Every item could go on its own line.
                    child_sizes.min_size = child_sizes.min_size.max(min_preferred);
                } else {
                    child_sizes.min_size += min_preferred;
                }
            }
            previous_fraction = self.count_intrinsic_size_for_algorithm_change(
                context,
                max_preferred,
                child.style(),
                previous_fraction,
            );
        }

        if !is_column && number_of_items > 0 {
            // Percentage gaps have nothing to resolve against yet.
            let gap = FlexLayoutAlgorithm::gap_between_items(
                &self.style,
                LogicalSize::new(Extent::Indefinite, Extent::Indefinite),
            );
            let gap_inline_size = gap * (number_of_items - 1);
            child_sizes.max_size += gap_inline_size;
            if !is_multiline {
                child_sizes.min_size += gap_inline_size;
            }
        }

        // Negative margins can make the sums negative.
        child_sizes.max_size = child_sizes.max_size.max(child_sizes.min_size);
        child_sizes.min_size = child_sizes.min_size.max(Au(0));
        child_sizes.max_size = child_sizes.max_size.max(Au(0));
        constrain_preferred_widths(&self.style, child_sizes)
    }

    fn layout(&mut self, context: &LayoutContext) {
        context.record_box_layout();
        self.phase = FlexLayoutPhase::Uninitialized;
        self.relaid_out_children.clear();

        let mut relayout_children = self.update_logical_width(context);
        let previous_height = self.state.size.height;
        let metrics = self.metrics();
        self.state.size.height = metrics.border_padding.vertical_sum();
        self.first_line_item_count = None;

        log::debug!(
            target: "layout",
            "{} flex layout width={:?} relayout_children={}",
            self.id,
            self.state.size.width,
            relayout_children
        );
        #[cfg(feature = "layout-trace")]
        eprintln!(
            "[FLEX] {} layout children={} width={:?} relayout_children={}",
            self.id,
            self.children.len(),
            self.state.size.width,
            relayout_children
        );

        self.prepare_order_iterator_and_margins(&metrics);
        self.layout_flex_items(context, relayout_children);
        if context.relayout_needed() {
            // Children added or removed scrollbars, which may change our
            // width. Run once more without letting scrollbars change again.
            log::debug!(target: "layout", "{} scrollbar change, laying out again", self.id);
            context.record_scrollbar_relayout();
            let _ = self.update_logical_width(context);
            let _freeze_scrollbars = context.freeze_scrollbars();
            let metrics = self.metrics();
            self.state.size.height = metrics.border_padding.vertical_sum();
            self.first_line_item_count = None;
            self.phase = FlexLayoutPhase::Uninitialized;
            self.prepare_order_iterator_and_margins(&metrics);
            self.layout_flex_items(context, true);
            context.reset_relayout_needed();
        }

        if self.state.size.height != previous_height {
            relayout_children = true;
        }
        self.layout_positioned_children(context, relayout_children);
        self.layout_overflow_bottom = self.client_logical_bottom_after_repositioning();
        self.advance_phase(FlexLayoutPhase::Done);
        self.state.needs_layout = false;
    }

    fn intrinsic_content_logical_height(&self) -> Au {
        self.intrinsic_content_height
    }

    /// Baseline of the first baseline-aligned item on the first line, or
    /// of the first item when none is baseline-aligned.
    fn first_line_baseline(&self) -> Option<Au> {
        let first_line_item_count = self.first_line_item_count.filter(|count| *count > 0)?;
        let is_horizontal = !self.style.is_column_flex_direction();
        let mut baseline_child: Option<&dyn FlexParticipant> = None;
        let mut child_number = 0;
        for &index in &self.order {
            let child = self.children[index].as_ref();
            if child.style().is_out_of_flow_positioned() {
                continue;
            }
            let has_cross_auto_margins = if is_horizontal {
                child.style().margin.top.is_auto() || child.style().margin.bottom.is_auto()
            } else {
                child.style().margin.left.is_auto() || child.style().margin.right.is_auto()
            };
            if FlexLayoutAlgorithm::alignment_for_child(&self.style, child.style())
                == ItemPosition::Baseline
                && !has_cross_auto_margins
            {
                baseline_child = Some(child);
                break;
            }
            if baseline_child.is_none() {
                baseline_child = Some(child);
            }
            child_number += 1;
            if child_number == first_line_item_count {
                break;
            }
        }

        let child = baseline_child?;
        // Children without a baseline synthesize one from their border box.
        let baseline = child.first_line_baseline().unwrap_or(child.size().height);
        Some(baseline + child.location().top)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::leaf::{LeafBox, LeafContent};
    use crate::style::FlexWrap;

    fn fixed_leaf(id: u32, width: f32, height: f32) -> Box<dyn FlexParticipant> {
        Box::new(LeafBox::new(
            NodeId(id),
            ComputedStyle::default(),
            LeafContent::Fixed { width, height },
        ))
    }

    fn lay_out(container: &mut FlexibleBox, width: i32) -> LayoutContext {
        let context = LayoutContext::new();
        container.set_containing_block(ContainingBlock {
            inline_size: Au::from_px(width),
            block_size: Extent::Indefinite,
            inline_sizing: InlineSizing::FillAvailable,
        });
        let _ = container.layout_if_needed(&context);
        context
    }

    #[test]
    fn test_row_places_items_side_by_side() {
        let mut container = FlexibleBox::with_children(
            NodeId(0),
            ComputedStyle::default(),
            vec![fixed_leaf(1, 50.0, 10.0), fixed_leaf(2, 30.0, 20.0)],
        );
        let _ = lay_out(&mut container, 200);

        let first = container.children()[0].frame_rect();
        let second = container.children()[1].frame_rect();
        assert_eq!(first.offset.left, Au(0));
        assert_eq!(second.offset.left, Au::from_px(50));
        // Both items stretch to the tallest.
        assert_eq!(first.size.height, Au::from_px(20));
        assert_eq!(container.size().height, Au::from_px(20));
        assert_eq!(container.phase(), FlexLayoutPhase::Done);
    }

    #[test]
    fn test_three_line_wrap_reaches_done() {
        let style = ComputedStyle {
            flex_wrap: FlexWrap::Wrap,
            ..ComputedStyle::default()
        };
        let mut container = FlexibleBox::with_children(
            NodeId(0),
            style,
            vec![
                fixed_leaf(1, 60.0, 10.0),
                fixed_leaf(2, 60.0, 10.0),
                fixed_leaf(3, 60.0, 10.0),
            ],
        );
        let _ = lay_out(&mut container, 100);

        assert_eq!(container.line_count(), 3);
        assert_eq!(container.first_line_item_count(), Some(1));
        assert_eq!(container.phase(), FlexLayoutPhase::Done);
        let tops: Vec<Au> = container
            .children()
            .iter()
            .map(|child| child.location().top)
            .collect();
        assert_eq!(tops, vec![Au(0), Au::from_px(10), Au::from_px(20)]);
        assert_eq!(container.size().height, Au::from_px(30));
    }

    #[test]
    fn test_order_reorders_items() {
        let late = Box::new(LeafBox::new(
            NodeId(1),
            ComputedStyle {
                order: 1,
                ..ComputedStyle::default()
            },
            LeafContent::Fixed {
                width: 40.0,
                height: 10.0,
            },
        ));
        let mut container = FlexibleBox::with_children(
            NodeId(0),
            ComputedStyle::default(),
            vec![late, fixed_leaf(2, 25.0, 10.0)],
        );
        let _ = lay_out(&mut container, 200);
        assert_eq!(container.children()[1].location().left, Au(0));
        assert_eq!(container.children()[0].location().left, Au::from_px(25));
    }

    #[test]
    fn test_remove_child_forgets_cached_main_size() {
        let style = ComputedStyle {
            flex_direction: FlexDirection::Column,
            ..ComputedStyle::default()
        };
        let mut container =
            FlexibleBox::with_children(NodeId(0), style, vec![fixed_leaf(7, 10.0, 10.0)]);
        let _ = lay_out(&mut container, 100);
        assert!(container.intrinsic_size_along_main_axis.contains_key(&NodeId(7)));

        let removed = container.remove_child(0);
        assert!(removed.is_some());
        assert!(container.intrinsic_size_along_main_axis.is_empty());
        assert!(container.needs_layout());
    }
}
