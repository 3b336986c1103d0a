//! Property tests for flex layout over generated item sizes.

use app_units::Au;
use quickcheck::TestResult;
use quickcheck_macros::quickcheck;
use wren_layout::{
    ComputedStyle, FlexItem, FlexLine, FlexParticipant, FlexWrap, FlexibleBox, ItemPosition,
    LayoutContext, LeafBox, LeafContent, Length, MinMaxSizes, NodeId, PhysicalSize, layout_root,
};

const CONTAINER_WIDTH: i32 = 600;

fn build(items: &[(u8, u8)]) -> Vec<Box<dyn FlexParticipant>> {
    items
        .iter()
        .enumerate()
        .map(|(index, &(width, grow))| {
            let item_style = ComputedStyle {
                flex_grow: f32::from(grow % 4),
                min_width: Length::Fixed(0.0),
                ..ComputedStyle::default()
            };
            Box::new(LeafBox::new(
                NodeId(u32::try_from(index).unwrap_or(u32::MAX) + 1),
                item_style,
                LeafContent::Fixed {
                    width: f32::from(width % 100) + 1.0,
                    height: 10.0,
                },
            )) as Box<dyn FlexParticipant>
        })
        .collect()
}

fn layout(style: ComputedStyle, items: &[(u8, u8)]) -> (FlexibleBox, LayoutContext) {
    let children = build(items);
    let mut container = FlexibleBox::with_children(NodeId(0), style, children);
    let context = LayoutContext::new();
    layout_root(
        &mut container,
        PhysicalSize::new(Au::from_px(CONTAINER_WIDTH), Au::from_px(400)),
        &context,
    );
    (container, context)
}

#[quickcheck]
fn prop_flexible_items_fill_the_line(items: Vec<(u8, u8)>) -> TestResult {
    if items.is_empty() || items.len() > 6 || items.iter().all(|&(_, grow)| grow % 4 == 0) {
        return TestResult::discard();
    }
    let (container, _) = layout(ComputedStyle::default(), &items);
    let total = container
        .children()
        .iter()
        .fold(Au(0), |sum, child| sum + child.size().width);
    // Each item rounds its share of free space independently.
    let slack = Au(i32::try_from(items.len()).unwrap_or(i32::MAX));
    TestResult::from_bool((total - Au::from_px(CONTAINER_WIDTH)).abs() <= slack)
}

#[quickcheck]
fn prop_shrinking_items_fit_the_container(items: Vec<(u8, u8)>) -> TestResult {
    if items.len() < 7 || items.len() > 20 {
        return TestResult::discard();
    }
    let narrow: Vec<(u8, u8)> = items.iter().map(|&(width, _)| (width | 0x40, 0)).collect();
    let sum: i32 = narrow.iter().map(|&(width, _)| i32::from(width % 100) + 1).sum();
    if sum <= CONTAINER_WIDTH {
        return TestResult::discard();
    }
    let (container, _) = layout(ComputedStyle::default(), &narrow);
    let last = container.children().last().map(|child| child.frame_rect().right());
    let slack = Au(i32::try_from(narrow.len()).unwrap_or(i32::MAX));
    TestResult::from_bool(last.is_some_and(|right| (right - Au::from_px(CONTAINER_WIDTH)).abs() <= slack))
}

#[quickcheck]
fn prop_wrapped_items_never_overlap(items: Vec<(u8, u8)>) -> bool {
    let style = ComputedStyle {
        flex_wrap: FlexWrap::Wrap,
        ..ComputedStyle::default()
    };
    let (container, _) = layout(style, &items);
    let frames: Vec<_> = container
        .children()
        .iter()
        .map(|child| child.frame_rect())
        .collect();
    // Growing items may round past the edge by one unit each.
    let limit = Au::from_px(CONTAINER_WIDTH) + Au(i32::try_from(items.len()).unwrap_or(i32::MAX));
    frames.iter().enumerate().all(|(index, a)| {
        a.right() <= limit
            && frames[index + 1..].iter().all(|b| {
                a.right() <= b.offset.left
                    || b.right() <= a.offset.left
                    || a.bottom() <= b.offset.top
                    || b.bottom() <= a.offset.top
            })
    })
}

#[quickcheck]
fn prop_relayout_reproduces_geometry(items: Vec<(u8, u8)>, wrap: bool) -> bool {
    let style = ComputedStyle {
        flex_wrap: if wrap { FlexWrap::Wrap } else { FlexWrap::Nowrap },
        ..ComputedStyle::default()
    };
    let (mut container, context) = layout(style, &items);
    let before: Vec<_> = container
        .children()
        .iter()
        .map(|child| child.frame_rect())
        .collect();
    container.mark_needs_layout();
    let _ = container.layout_if_needed(&context);
    let after: Vec<_> = container
        .children()
        .iter()
        .map(|child| child.frame_rect())
        .collect();
    before == after
}

#[quickcheck]
fn prop_resolved_widths_respect_min_and_max(items: Vec<(u8, u8, u8, u8)>) -> TestResult {
    if items.is_empty() || items.len() > 10 {
        return TestResult::discard();
    }
    let children: Vec<Box<dyn FlexParticipant>> = items
        .iter()
        .enumerate()
        .map(|(index, &(width, grow, min, max))| {
            let item_style = ComputedStyle {
                flex_grow: f32::from(grow % 3),
                min_width: Length::Fixed(f32::from(min % 80)),
                max_width: Length::Fixed(f32::from(max % 160)),
                ..ComputedStyle::default()
            };
            Box::new(LeafBox::new(
                NodeId(u32::try_from(index).unwrap_or(u32::MAX) + 1),
                item_style,
                LeafContent::Fixed {
                    width: f32::from(width),
                    height: 10.0,
                },
            )) as Box<dyn FlexParticipant>
        })
        .collect();
    let mut container = FlexibleBox::with_children(NodeId(0), ComputedStyle::default(), children);
    layout_root(
        &mut container,
        PhysicalSize::new(Au::from_px(CONTAINER_WIDTH), Au::from_px(400)),
        &LayoutContext::new(),
    );
    // The minimum wins when it exceeds the maximum.
    TestResult::from_bool(container.children().iter().zip(&items).all(
        |(child, &(_, _, min, max))| {
            let min = Au::from_px(i32::from(min % 80));
            let max = Au::from_px(i32::from(max % 160)).max(min);
            let width = child.size().width;
            min <= width && width <= max
        },
    ))
}

/// Helper: a line of items with the given base size, flex factors and
/// bounds, all in pixels.
fn flex_line(items: &[(u8, u8, u8, u8, u8)], container_size: Au) -> FlexLine {
    let items: Vec<FlexItem> = items
        .iter()
        .enumerate()
        .map(|(index, &(base, grow, shrink, min, max))| {
            let style = ComputedStyle {
                flex_grow: f32::from(grow % 4),
                flex_shrink: f32::from(shrink % 4),
                ..ComputedStyle::default()
            };
            let bounds = MinMaxSizes::new(
                Au::from_px(i32::from(min % 60)),
                Au::from_px(i32::from(max)),
            );
            FlexItem::new(
                index,
                style,
                Au::from_px(i32::from(base)),
                bounds,
                ItemPosition::Stretch,
            )
        })
        .collect();
    let sum_flex_base_size = items
        .iter()
        .fold(Au(0), |sum, item| sum + item.flex_base_content_size);
    let sum_hypothetical_main_size = items
        .iter()
        .fold(Au(0), |sum, item| sum + item.hypothetical_main_content_size);
    let total_flex_grow = items.iter().map(FlexItem::flex_grow).sum();
    let total_flex_shrink = items.iter().map(FlexItem::flex_shrink).sum();
    let total_weighted_flex_shrink = items
        .iter()
        .map(|item| item.flex_shrink() * f64::from(item.flex_base_content_size.0))
        .sum();
    let mut line = FlexLine::new(
        items,
        container_size,
        sum_flex_base_size,
        total_flex_grow,
        total_flex_shrink,
        total_weighted_flex_shrink,
        sum_hypothetical_main_size,
    );
    line.set_container_main_inner_size(container_size);
    line
}

#[quickcheck]
fn prop_flexible_length_resolution_terminates(
    items: Vec<(u8, u8, u8, u8, u8)>,
    container: u16,
) -> TestResult {
    if items.is_empty() || items.len() > 12 {
        return TestResult::discard();
    }
    let mut line = flex_line(&items, Au::from_px(i32::from(container % 1200)));
    line.freeze_inflexible_items();
    // Every failed pass freezes at least one item.
    let passes = line.resolve_flexible_lengths_to_completion();
    let clamped = line.items.iter().all(|item| {
        item.clamp_size_to_min_and_max(item.flexed_content_size) == item.flexed_content_size
    });
    TestResult::from_bool(passes <= line.items.len() + 1 && clamped)
}
