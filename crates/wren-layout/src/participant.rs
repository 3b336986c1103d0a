//! The interface every box exposes to its flex container.
//!
//! A container never inspects a child's content. It reads the child's
//! style and intrinsic sizes, sets override sizes, asks the child to lay
//! itself out and then places it.

use std::fmt;

use app_units::Au;
use serde::{Deserialize, Serialize};

use crate::context::LayoutContext;
use crate::geometry::{PhysicalOffset, PhysicalRect, PhysicalSize};
use crate::sizing::InlineSizing;
use crate::style::ComputedStyle;
use crate::unit::{Extent, MinMaxSizes};

/// Stable identity of a box. Used as the key of per-child caches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct NodeId(pub u32);

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// The space a box is laid out in.
///
/// [§ 10.1 Definition of containing block](https://www.w3.org/TR/CSS2/visudet.html#containing-block-details)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ContainingBlock {
    /// Width that percentages and `auto` widths resolve against.
    pub inline_size: Au,
    /// Height that percentage heights resolve against.
    pub block_size: Extent,
    /// How an `auto` width is resolved.
    pub inline_sizing: InlineSizing,
}

/// Layout inputs and outputs common to every box.
///
/// Override sizes are border-box sizes imposed by a flex container. They
/// take precedence over anything the box's own style asks for.
#[derive(Debug, Clone, Default)]
pub struct BoxState {
    /// Width imposed by the parent.
    pub override_width: Option<Au>,
    /// Height imposed by the parent.
    pub override_height: Option<Au>,
    /// Where the box is laid out.
    pub containing_block: ContainingBlock,
    /// Set when the box must run layout before its geometry can be read.
    pub needs_layout: bool,
    /// Border-box size from the last layout.
    pub size: PhysicalSize,
    /// Border-box position within the parent.
    pub location: PhysicalOffset,
}

impl BoxState {
    /// A state that still needs its first layout.
    #[must_use]
    pub fn new() -> Self {
        Self {
            needs_layout: true,
            ..Self::default()
        }
    }
}

/// A box that can be placed by a flex container.
pub trait FlexParticipant: fmt::Debug {
    /// Identity used by per-child caches.
    fn id(&self) -> NodeId;

    /// The box's computed style.
    fn style(&self) -> &ComputedStyle;

    /// Shared layout state.
    fn state(&self) -> &BoxState;

    /// Shared layout state, mutably.
    fn state_mut(&mut self) -> &mut BoxState;

    /// Border-box min-content and max-content widths.
    fn preferred_logical_widths(&self, context: &LayoutContext) -> MinMaxSizes;

    /// Run layout unconditionally.
    fn layout(&mut self, context: &LayoutContext);

    /// The content height the box would have with an `auto` height,
    /// excluding border and padding.
    fn intrinsic_content_logical_height(&self) -> Au;

    /// Distance from the border-box top to the first line's baseline.
    /// `None` when the box has no baseline.
    fn first_line_baseline(&self) -> Option<Au>;

    /// Child boxes, for tree walks.
    fn children(&self) -> &[Box<dyn FlexParticipant>] {
        &[]
    }

    /// Short name used in layout dumps.
    fn kind(&self) -> &'static str;

    /// Run layout when something invalidated the previous result.
    /// Returns whether layout ran.
    fn layout_if_needed(&mut self, context: &LayoutContext) -> bool {
        if self.state().needs_layout {
            self.layout(context);
            true
        } else {
            false
        }
    }

    /// Invalidate the previous layout.
    fn mark_needs_layout(&mut self) {
        self.state_mut().needs_layout = true;
    }

    /// Whether layout must run before geometry can be read.
    fn needs_layout(&self) -> bool {
        self.state().needs_layout
    }

    /// Border-box size.
    fn size(&self) -> PhysicalSize {
        self.state().size
    }

    /// Border-box position within the parent.
    fn location(&self) -> PhysicalOffset {
        self.state().location
    }

    /// Border-box rectangle within the parent.
    fn frame_rect(&self) -> PhysicalRect {
        PhysicalRect::new(self.location(), self.size())
    }

    /// Move the box.
    fn set_location(&mut self, location: PhysicalOffset) {
        self.state_mut().location = location;
    }

    /// Set or clear the imposed width.
    fn set_override_logical_width(&mut self, width: Option<Au>) {
        self.state_mut().override_width = width;
    }

    /// Set or clear the imposed height.
    fn set_override_logical_height(&mut self, height: Option<Au>) {
        self.state_mut().override_height = height;
    }

    /// Update the containing block, invalidating layout when it changed.
    fn set_containing_block(&mut self, containing_block: ContainingBlock) {
        let state = self.state_mut();
        if state.containing_block != containing_block {
            state.containing_block = containing_block;
            state.needs_layout = true;
        }
    }
}

/// Lay out `root` as the child of a viewport of the given size.
///
/// The viewport is the initial containing block: the root fills its width
/// and percentages of height resolve against its height.
pub fn layout_root(root: &mut dyn FlexParticipant, viewport: PhysicalSize, context: &LayoutContext) {
    root.set_containing_block(ContainingBlock {
        inline_size: viewport.width,
        block_size: Extent::Definite(viewport.height),
        inline_sizing: InlineSizing::FillAvailable,
    });
    if root.layout_if_needed(context) {
        log::debug!(
            target: "layout",
            "{} laid out at {:?}x{:?}",
            root.id(),
            root.size().width,
            root.size().height
        );
    }
}
