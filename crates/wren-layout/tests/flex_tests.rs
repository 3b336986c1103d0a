//! Integration tests for flex container layout.

use app_units::Au;
use wren_layout::{
    ComputedStyle, ContentAlignment, Direction, FlexDirection, FlexParticipant, FlexWrap,
    FlexibleBox, ItemPosition, LayoutContext, LeafBox, LeafContent, Length, NodeId, Overflow,
    PhysicalRect, PhysicalSize, Position, Sides, layout_root,
};

/// Helper: a leaf with fixed content and the given style.
fn styled_leaf(id: u32, style: ComputedStyle, width: f32, height: f32) -> Box<dyn FlexParticipant> {
    Box::new(LeafBox::new(
        NodeId(id),
        style,
        LeafContent::Fixed { width, height },
    ))
}

/// Helper: a leaf with fixed content and default style.
fn leaf(id: u32, width: f32, height: f32) -> Box<dyn FlexParticipant> {
    styled_leaf(id, ComputedStyle::default(), width, height)
}

/// Helper: a leaf holding one line of text.
fn text_leaf(id: u32, width: f32, line_height: f32) -> Box<dyn FlexParticipant> {
    Box::new(LeafBox::new(
        NodeId(id),
        ComputedStyle::default(),
        LeafContent::Flow {
            min_width: width,
            max_width: width,
            line_height,
        },
    ))
}

/// Helper: build a container and lay it out in a viewport.
fn layout_flex(
    style: ComputedStyle,
    children: Vec<Box<dyn FlexParticipant>>,
    viewport_width: i32,
) -> (FlexibleBox, LayoutContext) {
    let mut container = FlexibleBox::with_children(NodeId(0), style, children);
    let context = LayoutContext::new();
    layout_root(
        &mut container,
        PhysicalSize::new(Au::from_px(viewport_width), Au::from_px(600)),
        &context,
    );
    (container, context)
}

/// Helper: border-box rectangle of a child in pixels as `(x, y, w, h)`.
fn child_rect(container: &FlexibleBox, index: usize) -> (f32, f32, f32, f32) {
    let rect = container.children()[index].frame_rect();
    (
        rect.offset.left.to_f32_px(),
        rect.offset.top.to_f32_px(),
        rect.size.width.to_f32_px(),
        rect.size.height.to_f32_px(),
    )
}

fn child_frames(container: &FlexibleBox) -> Vec<PhysicalRect> {
    container
        .children()
        .iter()
        .map(|child| child.frame_rect())
        .collect()
}

fn grow(flex_grow: f32) -> ComputedStyle {
    ComputedStyle {
        flex_grow,
        ..ComputedStyle::default()
    }
}

fn wrapping_row() -> ComputedStyle {
    ComputedStyle {
        flex_wrap: FlexWrap::Wrap,
        ..ComputedStyle::default()
    }
}

// ---------------------------------------------------------------------------
// Flexible lengths
//
// [§ 9.7 Resolving Flexible Lengths](https://www.w3.org/TR/css-flexbox-1/#resolve-flexible-lengths)
// ---------------------------------------------------------------------------

#[test]
fn test_flex_grow_distributes_free_space() {
    let (container, _) = layout_flex(
        ComputedStyle::default(),
        vec![
            styled_leaf(1, grow(1.0), 50.0, 10.0),
            styled_leaf(2, grow(3.0), 50.0, 10.0),
        ],
        300,
    );
    assert_eq!(child_rect(&container, 0), (0.0, 0.0, 100.0, 10.0));
    assert_eq!(child_rect(&container, 1), (100.0, 0.0, 200.0, 10.0));
}

#[test]
fn test_flex_shrink_is_weighted_by_base_size() {
    let shrinkable = ComputedStyle {
        min_width: Length::Fixed(0.0),
        ..ComputedStyle::default()
    };
    let (container, _) = layout_flex(
        ComputedStyle::default(),
        vec![
            styled_leaf(1, shrinkable.clone(), 200.0, 10.0),
            styled_leaf(2, shrinkable, 100.0, 10.0),
        ],
        200,
    );
    // 100px of overflow split 2:1.
    let first = container.children()[0].size().width;
    let second = container.children()[1].size().width;
    assert_eq!(first, Au(8000));
    assert_eq!(second, Au(4000));
    assert_eq!(first + second, Au::from_px(200));
}

#[test]
fn test_min_size_auto_prevents_shrinking_below_content() {
    let (container, _) = layout_flex(
        ComputedStyle::default(),
        vec![leaf(1, 200.0, 10.0), leaf(2, 100.0, 10.0)],
        200,
    );
    assert_eq!(child_rect(&container, 0).2, 200.0);
    assert_eq!(
        child_rect(&container, 1),
        (200.0, 0.0, 100.0, 10.0),
        "items overflow instead of shrinking below min-content"
    );
}

#[test]
fn test_max_width_freezes_item_and_redistributes() {
    let capped = ComputedStyle {
        flex_grow: 1.0,
        max_width: Length::Fixed(80.0),
        ..ComputedStyle::default()
    };
    let (container, _) = layout_flex(
        ComputedStyle::default(),
        vec![
            styled_leaf(1, capped, 50.0, 10.0),
            styled_leaf(2, grow(1.0), 50.0, 10.0),
        ],
        300,
    );
    assert_eq!(child_rect(&container, 0).2, 80.0);
    assert_eq!(child_rect(&container, 1), (80.0, 0.0, 220.0, 10.0));
}

#[test]
fn test_definite_flex_basis_overrides_content_size() {
    let basis = ComputedStyle {
        flex_basis: Length::Percent(50.0),
        min_width: Length::Fixed(0.0),
        ..ComputedStyle::default()
    };
    let (container, _) = layout_flex(
        ComputedStyle::default(),
        vec![styled_leaf(1, basis, 10.0, 10.0)],
        400,
    );
    assert_eq!(child_rect(&container, 0).2, 200.0);
}

// ---------------------------------------------------------------------------
// Main-axis alignment
// ---------------------------------------------------------------------------

#[test]
fn test_justify_content_space_between() {
    let style = ComputedStyle {
        justify_content: ContentAlignment::SpaceBetween,
        ..ComputedStyle::default()
    };
    let (container, _) = layout_flex(
        style,
        vec![leaf(1, 50.0, 10.0), leaf(2, 50.0, 10.0), leaf(3, 50.0, 10.0)],
        300,
    );
    assert_eq!(child_rect(&container, 0).0, 0.0);
    assert_eq!(child_rect(&container, 1).0, 125.0);
    assert_eq!(child_rect(&container, 2).0, 250.0);
}

#[test]
fn test_justify_content_center_and_flex_end() {
    let center = ComputedStyle {
        justify_content: ContentAlignment::Center,
        ..ComputedStyle::default()
    };
    let (container, _) = layout_flex(center, vec![leaf(1, 50.0, 10.0), leaf(2, 50.0, 10.0)], 300);
    assert_eq!(child_rect(&container, 0).0, 100.0);
    assert_eq!(child_rect(&container, 1).0, 150.0);

    let end = ComputedStyle {
        justify_content: ContentAlignment::FlexEnd,
        ..ComputedStyle::default()
    };
    let (container, _) = layout_flex(end, vec![leaf(1, 50.0, 10.0), leaf(2, 50.0, 10.0)], 300);
    assert_eq!(child_rect(&container, 0).0, 200.0);
    assert_eq!(child_rect(&container, 1).0, 250.0);
}

#[test]
fn test_row_reverse_places_items_from_the_right() {
    let style = ComputedStyle {
        flex_direction: FlexDirection::RowReverse,
        ..ComputedStyle::default()
    };
    let (container, _) = layout_flex(style, vec![leaf(1, 50.0, 10.0), leaf(2, 30.0, 10.0)], 300);
    assert_eq!(child_rect(&container, 0).0, 250.0);
    assert_eq!(child_rect(&container, 1).0, 220.0);
}

#[test]
fn test_rtl_row_places_items_from_the_right() {
    let style = ComputedStyle {
        direction: Direction::Rtl,
        ..ComputedStyle::default()
    };
    let (container, _) = layout_flex(style, vec![leaf(1, 50.0, 10.0), leaf(2, 30.0, 10.0)], 300);
    assert_eq!(child_rect(&container, 0).0, 250.0);
    assert_eq!(child_rect(&container, 1).0, 220.0);
}

#[test]
fn test_main_axis_auto_margin_absorbs_free_space() {
    let pushed = ComputedStyle {
        margin: Sides {
            left: Length::Auto,
            ..Sides::all(Length::Fixed(0.0))
        },
        ..ComputedStyle::default()
    };
    let (container, _) = layout_flex(
        ComputedStyle::default(),
        vec![leaf(1, 40.0, 10.0), styled_leaf(2, pushed, 50.0, 10.0)],
        300,
    );
    assert_eq!(child_rect(&container, 0).0, 0.0);
    assert_eq!(child_rect(&container, 1).0, 250.0);
    let margins = container.child_margins(1).unwrap_or_default();
    assert_eq!(margins.left, Au::from_px(210));
}

#[test]
fn test_gap_between_items() {
    let style = ComputedStyle {
        column_gap: Some(Length::Fixed(10.0)),
        ..ComputedStyle::default()
    };
    let (container, _) = layout_flex(
        style,
        vec![leaf(1, 50.0, 10.0), leaf(2, 50.0, 10.0), leaf(3, 50.0, 10.0)],
        300,
    );
    assert_eq!(child_rect(&container, 1).0, 60.0);
    assert_eq!(child_rect(&container, 2).0, 120.0);
}

#[test]
fn test_percentage_gap_resolves_against_content_width() {
    let style = ComputedStyle {
        column_gap: Some(Length::Percent(10.0)),
        ..ComputedStyle::default()
    };
    let (container, _) = layout_flex(style, vec![leaf(1, 50.0, 10.0), leaf(2, 50.0, 10.0)], 300);
    assert_eq!(child_rect(&container, 1).0, 80.0);
}

// ---------------------------------------------------------------------------
// Cross-axis alignment
// ---------------------------------------------------------------------------

#[test]
fn test_items_stretch_to_line_height() {
    let (container, _) = layout_flex(
        ComputedStyle::default(),
        vec![leaf(1, 50.0, 10.0), leaf(2, 30.0, 25.0)],
        300,
    );
    assert_eq!(child_rect(&container, 0).3, 25.0);
    assert_eq!(child_rect(&container, 1).3, 25.0);
    assert_eq!(container.size().height, Au::from_px(25));
}

#[test]
fn test_align_items_center_and_flex_end() {
    let center = ComputedStyle {
        height: Length::Fixed(100.0),
        align_items: ItemPosition::Center,
        ..ComputedStyle::default()
    };
    let (container, _) = layout_flex(center, vec![leaf(1, 50.0, 10.0)], 300);
    assert_eq!(child_rect(&container, 0), (0.0, 45.0, 50.0, 10.0));

    let end = ComputedStyle {
        height: Length::Fixed(100.0),
        align_items: ItemPosition::FlexEnd,
        ..ComputedStyle::default()
    };
    let (container, _) = layout_flex(end, vec![leaf(1, 50.0, 10.0)], 300);
    assert_eq!(child_rect(&container, 0).1, 90.0);
}

#[test]
fn test_cross_axis_auto_margins_center_item() {
    let style = ComputedStyle {
        height: Length::Fixed(100.0),
        ..ComputedStyle::default()
    };
    let centered = ComputedStyle {
        margin: Sides {
            top: Length::Auto,
            bottom: Length::Auto,
            ..Sides::all(Length::Fixed(0.0))
        },
        ..ComputedStyle::default()
    };
    let (container, _) = layout_flex(style, vec![styled_leaf(1, centered, 50.0, 10.0)], 300);
    assert_eq!(
        child_rect(&container, 0),
        (0.0, 45.0, 50.0, 10.0),
        "auto margins win over stretch"
    );
}

#[test]
fn test_baseline_alignment_and_container_baseline() {
    let style = ComputedStyle {
        align_items: ItemPosition::Baseline,
        ..ComputedStyle::default()
    };
    let (container, _) = layout_flex(style, vec![text_leaf(1, 10.0, 20.0), text_leaf(2, 10.0, 40.0)], 300);
    // Ascents are 16px and 32px.
    assert_eq!(child_rect(&container, 0).1, 16.0);
    assert_eq!(child_rect(&container, 1).1, 0.0);
    assert_eq!(container.size().height, Au::from_px(40));
    assert_eq!(container.first_line_baseline(), Some(Au::from_px(32)));
}

#[test]
fn test_empty_container_has_no_baseline() {
    let (container, _) = layout_flex(ComputedStyle::default(), Vec::new(), 300);
    assert_eq!(container.first_line_baseline(), None);
    assert_eq!(container.line_count(), 0);
}

// ---------------------------------------------------------------------------
// Multi-line containers
// ---------------------------------------------------------------------------

#[test]
fn test_wrap_breaks_lines() {
    let (container, _) = layout_flex(
        wrapping_row(),
        vec![leaf(1, 60.0, 10.0), leaf(2, 60.0, 20.0), leaf(3, 30.0, 10.0)],
        100,
    );
    assert_eq!(container.line_count(), 2);
    assert_eq!(container.first_line_item_count(), Some(1));
    assert_eq!(child_rect(&container, 0), (0.0, 0.0, 60.0, 10.0));
    assert_eq!(child_rect(&container, 1), (0.0, 10.0, 60.0, 20.0));
    assert_eq!(child_rect(&container, 2), (60.0, 10.0, 30.0, 20.0));
    assert_eq!(container.size().height, Au::from_px(30));
}

#[test]
fn test_row_gap_separates_lines() {
    let style = ComputedStyle {
        row_gap: Some(Length::Fixed(5.0)),
        ..wrapping_row()
    };
    let (container, _) = layout_flex(
        style,
        vec![leaf(1, 60.0, 10.0), leaf(2, 60.0, 20.0), leaf(3, 30.0, 10.0)],
        100,
    );
    assert_eq!(container.size().height, Au::from_px(35));
    assert_eq!(child_rect(&container, 1).1, 15.0);
}

#[test]
fn test_align_content_space_between() {
    let style = ComputedStyle {
        height: Length::Fixed(100.0),
        align_content: ContentAlignment::SpaceBetween,
        ..wrapping_row()
    };
    let (container, _) = layout_flex(
        style,
        vec![leaf(1, 60.0, 10.0), leaf(2, 60.0, 20.0), leaf(3, 30.0, 10.0)],
        100,
    );
    assert_eq!(child_rect(&container, 0).1, 0.0);
    assert_eq!(child_rect(&container, 1).1, 80.0);
    assert_eq!(child_rect(&container, 2).1, 80.0);
}

#[test]
fn test_align_content_normal_stretches_lines() {
    let style = ComputedStyle {
        height: Length::Fixed(100.0),
        ..wrapping_row()
    };
    let (container, _) = layout_flex(
        style,
        vec![leaf(1, 60.0, 10.0), leaf(2, 60.0, 20.0), leaf(3, 30.0, 10.0)],
        100,
    );
    // 70px of free space shared by two lines.
    assert_eq!(child_rect(&container, 0), (0.0, 0.0, 60.0, 45.0));
    assert_eq!(child_rect(&container, 1), (0.0, 45.0, 60.0, 55.0));
    assert_eq!(child_rect(&container, 2), (60.0, 45.0, 30.0, 55.0));
}

#[test]
fn test_wrap_reverse_stacks_lines_from_the_bottom() {
    let style = ComputedStyle {
        flex_wrap: FlexWrap::WrapReverse,
        ..ComputedStyle::default()
    };
    let (container, _) = layout_flex(
        style,
        vec![leaf(1, 60.0, 10.0), leaf(2, 60.0, 20.0)],
        100,
    );
    assert_eq!(container.size().height, Au::from_px(30));
    assert_eq!(child_rect(&container, 0).1, 20.0);
    assert_eq!(child_rect(&container, 1).1, 0.0);
}

// ---------------------------------------------------------------------------
// Column flows
// ---------------------------------------------------------------------------

#[test]
fn test_column_stacks_items_and_stretches_width() {
    let style = ComputedStyle {
        flex_direction: FlexDirection::Column,
        ..ComputedStyle::default()
    };
    let (container, _) = layout_flex(style, vec![leaf(1, 50.0, 10.0), leaf(2, 30.0, 20.0)], 200);
    assert_eq!(child_rect(&container, 0), (0.0, 0.0, 200.0, 10.0));
    assert_eq!(child_rect(&container, 1), (0.0, 10.0, 200.0, 20.0));
    assert_eq!(container.size().height, Au::from_px(30));
}

#[test]
fn test_column_flex_start_items_fit_content() {
    let style = ComputedStyle {
        flex_direction: FlexDirection::Column,
        align_items: ItemPosition::FlexStart,
        ..ComputedStyle::default()
    };
    let (container, _) = layout_flex(style, vec![leaf(1, 50.0, 10.0)], 200);
    assert_eq!(child_rect(&container, 0), (0.0, 0.0, 50.0, 10.0));
}

#[test]
fn test_column_grows_into_definite_height() {
    let style = ComputedStyle {
        flex_direction: FlexDirection::Column,
        height: Length::Fixed(100.0),
        ..ComputedStyle::default()
    };
    let (container, _) = layout_flex(
        style,
        vec![leaf(1, 50.0, 10.0), styled_leaf(2, grow(1.0), 50.0, 10.0)],
        200,
    );
    assert_eq!(child_rect(&container, 1), (0.0, 10.0, 200.0, 90.0));
}

#[test]
fn test_column_reverse_places_items_from_the_bottom() {
    let style = ComputedStyle {
        flex_direction: FlexDirection::ColumnReverse,
        height: Length::Fixed(100.0),
        ..ComputedStyle::default()
    };
    let (container, _) = layout_flex(style, vec![leaf(1, 10.0, 10.0), leaf(2, 10.0, 20.0)], 100);
    assert_eq!(child_rect(&container, 0).1, 90.0);
    assert_eq!(child_rect(&container, 1).1, 70.0);
}

#[test]
fn test_rtl_column_aligns_from_the_right() {
    let style = ComputedStyle {
        flex_direction: FlexDirection::Column,
        direction: Direction::Rtl,
        align_items: ItemPosition::FlexStart,
        ..ComputedStyle::default()
    };
    let (container, _) = layout_flex(style, vec![leaf(1, 30.0, 10.0)], 100);
    assert_eq!(child_rect(&container, 0), (70.0, 0.0, 30.0, 10.0));
}

// ---------------------------------------------------------------------------
// Aspect ratio
// ---------------------------------------------------------------------------

#[test]
fn test_aspect_ratio_transfers_height_to_row_main_size() {
    let style = ComputedStyle {
        height: Length::Fixed(50.0),
        aspect_ratio: Some(2.0),
        ..ComputedStyle::default()
    };
    let (container, _) = layout_flex(ComputedStyle::default(), vec![styled_leaf(1, style, 0.0, 0.0)], 300);
    assert_eq!(child_rect(&container, 0), (0.0, 0.0, 100.0, 50.0));
}

#[test]
fn test_aspect_ratio_transfers_width_to_column_main_size() {
    let container_style = ComputedStyle {
        flex_direction: FlexDirection::Column,
        ..ComputedStyle::default()
    };
    let style = ComputedStyle {
        width: Length::Fixed(40.0),
        aspect_ratio: Some(2.0),
        ..ComputedStyle::default()
    };
    let (container, _) = layout_flex(container_style, vec![styled_leaf(1, style, 0.0, 0.0)], 200);
    assert_eq!(child_rect(&container, 0), (0.0, 0.0, 40.0, 20.0));
}

// ---------------------------------------------------------------------------
// Children that are not flex items
// ---------------------------------------------------------------------------

#[test]
fn test_absolute_child_uses_static_position() {
    let style = ComputedStyle {
        height: Length::Fixed(100.0),
        justify_content: ContentAlignment::Center,
        align_items: ItemPosition::Center,
        ..ComputedStyle::default()
    };
    let absolute = ComputedStyle {
        position: Position::Absolute,
        ..ComputedStyle::default()
    };
    let (container, _) = layout_flex(
        style,
        vec![leaf(1, 10.0, 10.0), styled_leaf(2, absolute, 50.0, 20.0)],
        300,
    );
    assert_eq!(child_rect(&container, 1), (125.0, 40.0, 50.0, 20.0));
    assert_eq!(
        child_rect(&container, 0).0,
        145.0,
        "absolute children take no space in the line"
    );
    assert_eq!(container.first_line_item_count(), Some(1));
}

#[test]
fn test_has_line_if_empty_keeps_one_line_of_height() {
    let style = ComputedStyle {
        has_line_if_empty: true,
        line_height: 20.0,
        padding: Sides::all(Length::Fixed(5.0)),
        ..ComputedStyle::default()
    };
    let (container, _) = layout_flex(style, Vec::new(), 300);
    assert_eq!(container.size().height, Au::from_px(30));
}

#[test]
fn test_order_and_padding_offset_items() {
    let style = ComputedStyle {
        padding: Sides::all(Length::Fixed(10.0)),
        border_width: Sides::all(2.0),
        ..ComputedStyle::default()
    };
    let first = ComputedStyle {
        order: 2,
        ..ComputedStyle::default()
    };
    let (container, _) = layout_flex(
        style,
        vec![styled_leaf(1, first, 50.0, 10.0), leaf(2, 20.0, 10.0)],
        300,
    );
    assert_eq!(child_rect(&container, 1), (12.0, 12.0, 20.0, 10.0));
    assert_eq!(child_rect(&container, 0), (32.0, 12.0, 50.0, 10.0));
    assert_eq!(container.size().height, Au::from_px(34));
    assert_eq!(container.layout_overflow_bottom(), Au::from_px(32));
}

#[test]
fn test_negative_margins_keep_border_and_padding() {
    let style = ComputedStyle {
        padding: Sides::all(Length::Fixed(5.0)),
        border_width: Sides::all(2.0),
        ..ComputedStyle::default()
    };
    let pulled = ComputedStyle {
        margin: Sides {
            top: Length::Fixed(-30.0),
            bottom: Length::Fixed(-30.0),
            ..Sides::all(Length::Fixed(0.0))
        },
        ..ComputedStyle::default()
    };
    let (container, _) = layout_flex(style, vec![styled_leaf(1, pulled, 50.0, 10.0)], 300);
    // The line's cross size bottoms out at zero, leaving border and padding.
    assert_eq!(container.size().height, Au::from_px(14));
}

#[test]
fn test_nested_flex_container_shrinks_to_content() {
    let inner: Box<dyn FlexParticipant> = Box::new(FlexibleBox::with_children(
        NodeId(10),
        ComputedStyle::default(),
        vec![leaf(11, 50.0, 10.0), leaf(12, 50.0, 10.0)],
    ));
    let (container, _) = layout_flex(
        ComputedStyle::default(),
        vec![inner, leaf(2, 20.0, 10.0)],
        300,
    );
    assert_eq!(child_rect(&container, 0), (0.0, 0.0, 100.0, 10.0));
    assert_eq!(child_rect(&container, 1).0, 100.0);
    let inner = &container.children()[0];
    assert_eq!(inner.children()[1].location().left, Au::from_px(50));
}

// ---------------------------------------------------------------------------
// Intrinsic widths
//
// [§ 9.9.1 Flex Container Intrinsic Main Sizes](https://www.w3.org/TR/css-flexbox-1/#intrinsic-main-sizes)
// ---------------------------------------------------------------------------

#[test]
fn test_row_intrinsic_widths_sum_items() {
    let margined = ComputedStyle {
        margin: Sides {
            left: Length::Fixed(5.0),
            right: Length::Fixed(5.0),
            ..Sides::all(Length::Fixed(0.0))
        },
        ..ComputedStyle::default()
    };
    let container = FlexibleBox::with_children(
        NodeId(0),
        ComputedStyle::default(),
        vec![styled_leaf(1, margined, 50.0, 10.0), leaf(2, 30.0, 10.0)],
    );
    let sizes = container.preferred_logical_widths(&LayoutContext::new());
    assert_eq!(sizes.min_size, Au::from_px(90));
    assert_eq!(sizes.max_size, Au::from_px(90));
}

#[test]
fn test_wrapping_row_min_width_is_widest_item() {
    let style = ComputedStyle {
        column_gap: Some(Length::Fixed(10.0)),
        ..wrapping_row()
    };
    let container = FlexibleBox::with_children(
        NodeId(0),
        style,
        vec![leaf(1, 60.0, 10.0), leaf(2, 30.0, 10.0)],
    );
    let sizes = container.preferred_logical_widths(&LayoutContext::new());
    assert_eq!(sizes.min_size, Au::from_px(60));
    assert_eq!(sizes.max_size, Au::from_px(100));
}

#[test]
fn test_column_intrinsic_widths_take_widest_item() {
    let style = ComputedStyle {
        flex_direction: FlexDirection::Column,
        padding: Sides::all(Length::Fixed(4.0)),
        ..ComputedStyle::default()
    };
    let container = FlexibleBox::with_children(
        NodeId(0),
        style,
        vec![leaf(1, 60.0, 10.0), leaf(2, 30.0, 10.0)],
    );
    let sizes = container.preferred_logical_widths(&LayoutContext::new());
    assert_eq!(sizes.min_size, Au::from_px(68));
    assert_eq!(sizes.max_size, Au::from_px(68));
}

#[test]
fn test_intrinsic_size_algorithm_change_is_counted() {
    let fraction = |flex_grow| ComputedStyle {
        flex_grow,
        flex_basis: Length::Fixed(0.0),
        ..ComputedStyle::default()
    };
    let container = FlexibleBox::with_children(
        NodeId(0),
        ComputedStyle::default(),
        vec![
            styled_leaf(1, fraction(1.0), 50.0, 10.0),
            styled_leaf(2, fraction(2.0), 50.0, 10.0),
        ],
    );
    let context = LayoutContext::new();
    let _ = container.preferred_logical_widths(&context);
    assert_eq!(context.stats().intrinsic_size_algorithm_changes, 1);

    let same = FlexibleBox::with_children(
        NodeId(0),
        ComputedStyle::default(),
        vec![leaf(1, 50.0, 10.0), leaf(2, 30.0, 10.0)],
    );
    let context = LayoutContext::new();
    let _ = same.preferred_logical_widths(&context);
    assert_eq!(
        context.stats().intrinsic_size_algorithm_changes,
        0,
        "auto flex-basis items have no flex fraction"
    );
}

// ---------------------------------------------------------------------------
// Relayout
// ---------------------------------------------------------------------------

#[test]
fn test_relayout_without_changes_is_stable() {
    for style in [
        ComputedStyle::default(),
        wrapping_row(),
        ComputedStyle {
            flex_direction: FlexDirection::Column,
            ..ComputedStyle::default()
        },
    ] {
        let (mut container, context) = layout_flex(
            style,
            vec![
                leaf(1, 60.0, 10.0),
                styled_leaf(2, grow(1.0), 60.0, 20.0),
                leaf(3, 30.0, 15.0),
            ],
            100,
        );
        let frames = child_frames(&container);
        let size = container.size();
        let layouts = context.stats().box_layouts;

        container.mark_needs_layout();
        assert!(container.layout_if_needed(&context));

        assert_eq!(child_frames(&container), frames);
        assert_eq!(container.size(), size);
        assert_eq!(
            context.stats().box_layouts,
            layouts + 1,
            "only the container itself runs layout again"
        );
    }
}

#[test]
fn test_scrollbar_change_triggers_one_more_pass() {
    let scrolling = ComputedStyle {
        overflow_y: Overflow::Auto,
        height: Length::Fixed(20.0),
        min_width: Length::Fixed(0.0),
        ..ComputedStyle::default()
    };
    let text = Box::new(LeafBox::new(
        NodeId(1),
        scrolling,
        LeafContent::Flow {
            min_width: 10.0,
            max_width: 100.0,
            line_height: 20.0,
        },
    ));
    let (container, context) = layout_flex(ComputedStyle::default(), vec![text], 50);
    assert_eq!(context.stats().scrollbar_relayouts, 1);
    assert!(!context.relayout_needed());
    assert_eq!(child_rect(&container, 0).2, 50.0);
}

#[test]
fn test_set_style_invalidates_layout() {
    let (mut container, context) = layout_flex(
        ComputedStyle::default(),
        vec![leaf(1, 50.0, 10.0), leaf(2, 50.0, 10.0)],
        300,
    );
    container.set_style(ComputedStyle {
        justify_content: ContentAlignment::FlexEnd,
        ..ComputedStyle::default()
    });
    assert!(container.needs_layout());
    assert!(container.layout_if_needed(&context));
    assert_eq!(child_rect(&container, 0).0, 200.0);
}
