//! Boxes without children: replaced-like content and wrapped text runs.

use app_units::Au;
use serde::{Deserialize, Serialize};

use crate::context::LayoutContext;
use crate::participant::{BoxState, FlexParticipant, NodeId};
use crate::sizing::{
    border_padding, compute_logical_height, compute_logical_width, constrain_preferred_widths,
    resolve_margins,
};
use crate::style::{ComputedStyle, Overflow};
use crate::unit::{MinMaxSizes, px};

/// Width reserved for a vertical scrollbar, in CSS pixels.
pub const SCROLLBAR_THICKNESS_PX: f32 = 15.0;

/// What a leaf box contains.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LeafContent {
    /// Content with a fixed size, like an image.
    Fixed {
        /// Content width in CSS pixels.
        width: f32,
        /// Content height in CSS pixels.
        height: f32,
    },
    /// Text that wraps into equally tall lines.
    Flow {
        /// Width of the widest unbreakable run.
        min_width: f32,
        /// Width of the whole text on a single line.
        max_width: f32,
        /// Height of each line.
        line_height: f32,
    },
}

impl LeafContent {
    fn intrinsic_widths(self) -> MinMaxSizes {
        match self {
            Self::Fixed { width, .. } => MinMaxSizes::new(px(width), px(width)),
            Self::Flow {
                min_width,
                max_width,
                ..
            } => MinMaxSizes::new(px(min_width), px(max_width.max(min_width))),
        }
    }

    /// Height of the content when laid out at `width`.
    fn height_at(self, width: Au) -> Au {
        match self {
            Self::Fixed { height, .. } => px(height),
            Self::Flow {
                min_width,
                max_width,
                line_height,
            } => {
                let total = px(max_width);
                if total <= Au(0) {
                    return Au(0);
                }
                let usable = width.max(px(min_width)).max(Au(1));
                let lines = (total.0 + usable.0 - 1) / usable.0;
                px(line_height) * lines
            }
        }
    }

    /// Alphabetic baseline of the first line, from the content top.
    fn ascent(self) -> Option<Au> {
        match self {
            Self::Fixed { .. } => None,
            Self::Flow { line_height, .. } => Some(px(line_height * 0.8)),
        }
    }
}

/// A box whose content is measured rather than laid out.
#[derive(Debug, Clone)]
pub struct LeafBox {
    id: NodeId,
    style: ComputedStyle,
    content: LeafContent,
    state: BoxState,
    has_vertical_scrollbar: bool,
    intrinsic_content_height: Au,
    baseline: Option<Au>,
}

impl LeafBox {
    /// Create a leaf that has not been laid out.
    #[must_use]
    pub fn new(id: NodeId, style: ComputedStyle, content: LeafContent) -> Self {
        Self {
            id,
            has_vertical_scrollbar: style.overflow_y == Overflow::Scroll,
            style,
            content,
            state: BoxState::new(),
            intrinsic_content_height: Au(0),
            baseline: None,
        }
    }

    /// The box's content.
    #[must_use]
    pub const fn content(&self) -> LeafContent {
        self.content
    }

    /// Whether a vertical scrollbar takes up inline space.
    #[must_use]
    pub const fn has_vertical_scrollbar(&self) -> bool {
        self.has_vertical_scrollbar
    }

    fn scrollbar_width(&self) -> Au {
        if self.has_vertical_scrollbar {
            px(SCROLLBAR_THICKNESS_PX)
        } else {
            Au(0)
        }
    }
}

impl FlexParticipant for LeafBox {
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

    fn preferred_logical_widths(&self, _context: &LayoutContext) -> MinMaxSizes {
        let content = self.content.intrinsic_widths().expand(self.scrollbar_width());
        constrain_preferred_widths(&self.style, content)
    }

    fn layout(&mut self, context: &LayoutContext) {
        context.record_box_layout();
        let containing = self.state.containing_block;
        let strut = border_padding(&self.style, containing.inline_size);

        loop {
            let width = match self.state.override_width {
                Some(width) => width,
                None => compute_logical_width(
                    &self.style,
                    self.preferred_logical_widths(context),
                    containing.inline_size,
                    resolve_margins(&self.style, containing.inline_size).horizontal_sum(),
                    containing.inline_sizing,
                ),
            };
            let content_width = (width - strut.horizontal_sum() - self.scrollbar_width()).max(Au(0));
            let content_height = self.content.height_at(content_width);
            let height = self.state.override_height.unwrap_or_else(|| {
                compute_logical_height(
                    &self.style,
                    strut.vertical_sum(),
                    content_height,
                    containing.block_size,
                )
            });

            self.state.size.width = width;
            self.state.size.height = height;
            self.intrinsic_content_height = content_height;

            // [§ 3 'overflow'](https://www.w3.org/TR/css-overflow-3/#valdef-overflow-auto)
            // "Scrollbars appear only when content overflows."
            if self.style.overflow_y != Overflow::Auto || context.scrollbars_frozen() {
                break;
            }
            let overflows = content_height > height - strut.vertical_sum();
            if overflows == self.has_vertical_scrollbar {
                break;
            }
            log::debug!(
                target: "layout",
                "{} vertical scrollbar {}",
                self.id,
                if overflows { "added" } else { "removed" }
            );
            self.has_vertical_scrollbar = overflows;
            context.notify_scrollbar_change();
        }

        self.baseline = self.content.ascent().map(|ascent| strut.top + ascent);
        self.state.needs_layout = false;
    }

    fn intrinsic_content_logical_height(&self) -> Au {
        self.intrinsic_content_height
    }

    fn first_line_baseline(&self) -> Option<Au> {
        self.baseline
    }

    fn kind(&self) -> &'static str {
        "leaf"
    }
}
