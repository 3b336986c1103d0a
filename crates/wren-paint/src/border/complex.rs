//! Visible sides sorted into paint order and grouped by opacity.

use crate::border::edge::{BorderEdge, BorderStyle, BoxSide, EdgeFlags};

/// Non-solid styles paint first so solid sides can overdraw their corners.
const fn style_priority(style: BorderStyle) -> u8 {
    match style {
        BorderStyle::None | BorderStyle::Hidden => 0,
        BorderStyle::Dotted | BorderStyle::Dashed | BorderStyle::Double => 1,
        BorderStyle::Inset | BorderStyle::Groove | BorderStyle::Outset | BorderStyle::Ridge => 2,
        BorderStyle::Solid => 3,
    }
}

/// Among equal styles, sides that share no corner paint back to back.
const fn side_priority(side: BoxSide) -> u8 {
    match side {
        BoxSide::Top => 0,
        BoxSide::Bottom => 1,
        BoxSide::Right => 2,
        BoxSide::Left => 3,
    }
}

/// Sides sharing one alpha value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OpacityGroup {
    /// Members in paint order.
    pub sides: Vec<BoxSide>,
    /// The same members as a set.
    pub edge_flags: EdgeFlags,
    /// Shared color alpha.
    pub alpha: u8,
}

impl OpacityGroup {
    /// Alpha as a fraction.
    #[must_use]
    pub fn opacity(&self) -> f32 {
        f32::from(self.alpha) / 255.0
    }
}

/// Paint plan for a border that missed the fast path.
#[derive(Debug, Clone)]
pub struct ComplexBorderInfo {
    /// Groups in ascending alpha order.
    pub opacity_groups: Vec<OpacityGroup>,
}

impl ComplexBorderInfo {
    /// Sort the sides in `visible` by alpha, then style, then side, and
    /// split them into runs of equal alpha.
    #[must_use]
    pub fn new(edges: &[BorderEdge; 4], visible: EdgeFlags) -> Self {
        let mut sorted_sides: Vec<BoxSide> = BoxSide::ALL
            .into_iter()
            .filter(|side| visible.includes(*side))
            .collect();
        debug_assert!(!sorted_sides.is_empty());

        sorted_sides.sort_by_key(|side| {
            let edge = &edges[side.index()];
            (
                edge.color().a,
                style_priority(edge.style()),
                side_priority(*side),
            )
        });

        let mut opacity_groups: Vec<OpacityGroup> = Vec::new();
        for side in sorted_sides {
            let alpha = edges[side.index()].color().a;
            match opacity_groups.last_mut() {
                Some(group) if group.alpha == alpha => {
                    group.sides.push(side);
                    group.edge_flags |= EdgeFlags::of(side);
                }
                _ => opacity_groups.push(OpacityGroup {
                    sides: vec![side],
                    edge_flags: EdgeFlags::of(side),
                    alpha,
                }),
            }
        }

        Self { opacity_groups }
    }
}
