//! Per-pass layout state threaded through the box tree.
//!
//! Scrollbar changes discovered while a flex container lays out its items
//! must not trigger immediate relayout of ancestors. Instead they are
//! recorded here and the outermost container runs one more pass with
//! scrollbars frozen.

use std::cell::Cell;

/// Counters collected while laying out.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LayoutStats {
    /// Number of times any box ran its layout.
    pub box_layouts: usize,
    /// Number of second flex passes triggered by scrollbar changes.
    pub scrollbar_relayouts: usize,
    /// Number of containers whose intrinsic width would differ under a
    /// flex-fraction based intrinsic sizing algorithm.
    pub intrinsic_size_algorithm_changes: usize,
}

/// State shared by one layout of a box tree.
///
/// Interior mutability lets every box borrow the context immutably while
/// the tree itself is borrowed mutably.
#[derive(Debug, Default)]
pub struct LayoutContext {
    prevent_relayout_depth: Cell<u32>,
    relayout_needed: Cell<bool>,
    freeze_scrollbars_depth: Cell<u32>,
    stats: Cell<LayoutStats>,
}

impl LayoutContext {
    /// A fresh context.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Enter a region in which scrollbar changes are deferred.
    #[must_use = "relayout is only prevented while the scope is alive"]
    pub fn prevent_relayout(&self) -> PreventRelayoutScope<'_> {
        self.prevent_relayout_depth
            .set(self.prevent_relayout_depth.get() + 1);
        PreventRelayoutScope { context: self }
    }

    /// Enter a region in which scrollbars may not appear or disappear.
    #[must_use = "scrollbars are only frozen while the scope is alive"]
    pub fn freeze_scrollbars(&self) -> FreezeScrollbarsScope<'_> {
        self.freeze_scrollbars_depth
            .set(self.freeze_scrollbars_depth.get() + 1);
        FreezeScrollbarsScope { context: self }
    }

    /// Whether a [`PreventRelayoutScope`] is active.
    #[must_use]
    pub fn is_preventing_relayout(&self) -> bool {
        self.prevent_relayout_depth.get() > 0
    }

    /// Whether a [`FreezeScrollbarsScope`] is active.
    #[must_use]
    pub fn scrollbars_frozen(&self) -> bool {
        self.freeze_scrollbars_depth.get() > 0
    }

    /// Record that a box changed its scrollbars. Only has an effect inside
    /// a [`PreventRelayoutScope`].
    pub fn notify_scrollbar_change(&self) {
        if self.is_preventing_relayout() {
            self.relayout_needed.set(true);
        }
    }

    /// Whether the outermost prevent scope ended with pending scrollbar
    /// changes. Always false while a scope is still active so that only the
    /// outermost container reacts.
    #[must_use]
    pub fn relayout_needed(&self) -> bool {
        !self.is_preventing_relayout() && self.relayout_needed.get()
    }

    /// Clear the pending relayout request.
    pub fn reset_relayout_needed(&self) {
        self.relayout_needed.set(false);
    }

    /// Snapshot of the counters.
    #[must_use]
    pub fn stats(&self) -> LayoutStats {
        self.stats.get()
    }

    pub(crate) fn record_box_layout(&self) {
        self.update_stats(|stats| stats.box_layouts += 1);
    }

    pub(crate) fn record_scrollbar_relayout(&self) {
        self.update_stats(|stats| stats.scrollbar_relayouts += 1);
    }

    pub(crate) fn record_intrinsic_size_algorithm_change(&self) {
        self.update_stats(|stats| stats.intrinsic_size_algorithm_changes += 1);
    }

    fn update_stats(&self, f: impl FnOnce(&mut LayoutStats)) {
        let mut stats = self.stats.get();
        f(&mut stats);
        self.stats.set(stats);
    }
}

/// Guard returned by [`LayoutContext::prevent_relayout`].
#[derive(Debug)]
pub struct PreventRelayoutScope<'a> {
    context: &'a LayoutContext,
}

impl Drop for PreventRelayoutScope<'_> {
    fn drop(&mut self) {
        let depth = self.context.prevent_relayout_depth.get();
        self.context
            .prevent_relayout_depth
            .set(depth.saturating_sub(1));
    }
}

/// Guard returned by [`LayoutContext::freeze_scrollbars`].
#[derive(Debug)]
pub struct FreezeScrollbarsScope<'a> {
    context: &'a LayoutContext,
}

impl Drop for FreezeScrollbarsScope<'_> {
    fn drop(&mut self) {
        let depth = self.context.freeze_scrollbars_depth.get();
        self.context
            .freeze_scrollbars_depth
            .set(depth.saturating_sub(1));
    }
}
