//! Box sizing shared by every layout participant.
//!
//! [§ 10.3 Calculating widths and margins](https://www.w3.org/TR/CSS2/visudet.html#Computing_widths_and_margins)
//! [§ 10.6 Calculating heights and margins](https://www.w3.org/TR/CSS2/visudet.html#Computing_heights_and_margins)
//!
//! All results are border-box sizes unless a name says otherwise.

use app_units::Au;

use crate::geometry::PhysicalBoxStrut;
use crate::style::{ComputedStyle, Length};
use crate::unit::{Extent, MinMaxSizes, add_saturating, px};

/// How an `auto` width is resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InlineSizing {
    /// Fill the containing block, like a block-level box.
    #[default]
    FillAvailable,
    /// Shrink to fit the content, within the available space.
    FitContent,
}

/// `pct` percent of `base`.
#[must_use]
pub fn percent_of(base: Au, pct: f32) -> Au {
    base.scale_by(pct / 100.0)
}

/// Resolve a length against a definite base. `auto`, `none` and the
/// intrinsic keywords have no value here.
#[must_use]
pub fn resolve_length(length: Length, base: Au) -> Option<Au> {
    match length {
        Length::Fixed(value) => Some(px(value)),
        Length::Percent(pct) => Some(percent_of(base, pct)),
        _ => None,
    }
}

/// Border widths plus padding, with percentages resolved against
/// `containing_width`.
///
/// [§ 8.4 Padding properties](https://www.w3.org/TR/CSS2/box.html#padding-properties)
/// "The percentage is calculated with respect to the width of the generated
/// box's containing block, even for 'padding-top' and 'padding-bottom'."
#[must_use]
pub fn border_padding(style: &ComputedStyle, containing_width: Au) -> PhysicalBoxStrut {
    let padding = |length| resolve_length(length, containing_width).unwrap_or(Au(0));
    PhysicalBoxStrut::new(
        px(style.border_width.top) + padding(style.padding.top),
        px(style.border_width.right) + padding(style.padding.right),
        px(style.border_width.bottom) + padding(style.padding.bottom),
        px(style.border_width.left) + padding(style.padding.left),
    )
}

/// Used margins with `auto` treated as zero.
#[must_use]
pub fn resolve_margins(style: &ComputedStyle, containing_width: Au) -> PhysicalBoxStrut {
    let margin = |length| resolve_length(length, containing_width).unwrap_or(Au(0));
    PhysicalBoxStrut::new(
        margin(style.margin.top),
        margin(style.margin.right),
        margin(style.margin.bottom),
        margin(style.margin.left),
    )
}

/// Horizontal margins that contribute to intrinsic widths. Only fixed
/// margins count since percentages have nothing to resolve against yet.
#[must_use]
pub fn margin_intrinsic_logical_width(style: &ComputedStyle) -> Au {
    let fixed = |length| match length {
        Length::Fixed(value) => px(value),
        _ => Au(0),
    };
    fixed(style.margin.left) + fixed(style.margin.right)
}

/// Apply `width`, `min-width` and `max-width` to content-derived intrinsic
/// widths and add border and padding.
///
/// `content` covers the content box plus any scrollbar gutter.
#[must_use]
pub fn constrain_preferred_widths(style: &ComputedStyle, content: MinMaxSizes) -> MinMaxSizes {
    let mut sizes = content;
    if let Length::Fixed(width) = style.width {
        sizes = MinMaxSizes::new(px(width), px(width));
    }
    if let Length::Fixed(max_width) = style.max_width {
        sizes.min_size = sizes.min_size.min(px(max_width));
        sizes.max_size = sizes.max_size.min(px(max_width));
    }
    if let Length::Fixed(min_width) = style.min_width {
        sizes.min_size = sizes.min_size.max(px(min_width));
        sizes.max_size = sizes.max_size.max(px(min_width));
    }
    sizes.expand(border_padding(style, Au(0)).horizontal_sum())
}

/// Resolve a width-like length to a border-box width.
fn resolve_width_length(
    length: Length,
    preferred: MinMaxSizes,
    containing_width: Au,
    available: Au,
    border_padding: Au,
) -> Option<Au> {
    match length {
        Length::Fixed(_) | Length::Percent(_) => {
            resolve_length(length, containing_width).map(|w| w + border_padding)
        }
        Length::MinContent => Some(preferred.min_size),
        Length::MaxContent => Some(preferred.max_size),
        Length::FitContent => Some(available.min(preferred.max_size).max(preferred.min_size)),
        Length::Auto | Length::None => None,
    }
}

/// Compute the border-box width of a box from its style.
///
/// `preferred` are the box's border-box intrinsic widths. `margins` is the
/// horizontal margin sum, subtracted from the space an `auto` width fills.
#[must_use]
pub fn compute_logical_width(
    style: &ComputedStyle,
    preferred: MinMaxSizes,
    containing_width: Au,
    margins: Au,
    sizing: InlineSizing,
) -> Au {
    let border_padding = border_padding(style, containing_width).horizontal_sum();
    let available = (containing_width - margins).max(Au(0));
    let width = resolve_width_length(
        style.width,
        preferred,
        containing_width,
        available,
        border_padding,
    )
    .unwrap_or_else(|| match sizing {
        InlineSizing::FillAvailable => available,
        InlineSizing::FitContent => available.min(preferred.max_size).max(preferred.min_size),
    });
    constrain_logical_width_by_min_max(style, width, preferred, containing_width, available)
}

/// Clamp a border-box width by `min-width` and `max-width`.
#[must_use]
pub fn constrain_logical_width_by_min_max(
    style: &ComputedStyle,
    width: Au,
    preferred: MinMaxSizes,
    containing_width: Au,
    available: Au,
) -> Au {
    let border_padding = border_padding(style, containing_width).horizontal_sum();
    let mut width = width;
    if let Some(max) = resolve_width_length(
        style.max_width,
        preferred,
        containing_width,
        available,
        border_padding,
    ) {
        width = width.min(max);
    }
    if let Some(min) = resolve_width_length(
        style.min_width,
        preferred,
        containing_width,
        available,
        border_padding,
    ) {
        width = width.max(min);
    }
    width.max(border_padding)
}

/// Resolve a height-like length to a border-box height.
fn resolve_height_length(
    length: Length,
    intrinsic_content_height: Au,
    border_padding: Au,
    containing_height: Extent,
) -> Option<Au> {
    match length {
        Length::Fixed(value) => Some(px(value) + border_padding),
        Length::Percent(pct) => containing_height
            .definite()
            .map(|height| percent_of(height, pct) + border_padding),
        Length::MinContent | Length::MaxContent | Length::FitContent => {
            Some(add_saturating(intrinsic_content_height, border_padding))
        }
        Length::Auto | Length::None => None,
    }
}

/// Compute the border-box height of a box from its style and the height
/// its content needs.
///
/// [§ 10.5 Content height](https://www.w3.org/TR/CSS2/visudet.html#the-height-property)
/// "If the height of the containing block is not specified explicitly [...]
/// the value computes to 'auto'."
#[must_use]
pub fn compute_logical_height(
    style: &ComputedStyle,
    border_padding: Au,
    intrinsic_content_height: Au,
    containing_height: Extent,
) -> Au {
    let height = resolve_height_length(
        style.height,
        intrinsic_content_height,
        border_padding,
        containing_height,
    )
    .unwrap_or_else(|| add_saturating(intrinsic_content_height, border_padding));
    constrain_logical_height_by_min_max(
        style,
        height,
        intrinsic_content_height,
        border_padding,
        containing_height,
    )
}

/// Clamp a border-box height by `min-height` and `max-height`.
#[must_use]
pub fn constrain_logical_height_by_min_max(
    style: &ComputedStyle,
    height: Au,
    intrinsic_content_height: Au,
    border_padding: Au,
    containing_height: Extent,
) -> Au {
    let mut height = height;
    if let Some(max) = resolve_height_length(
        style.max_height,
        intrinsic_content_height,
        border_padding,
        containing_height,
    ) {
        height = height.min(max);
    }
    if let Some(min) = resolve_height_length(
        style.min_height,
        intrinsic_content_height,
        border_padding,
        containing_height,
    ) {
        height = height.max(min);
    }
    height.max(border_padding)
}

/// The content height that percentage heights of children resolve against.
///
/// [§ 10.5](https://www.w3.org/TR/CSS2/visudet.html#the-height-property)
/// "The percentage is calculated with respect to the height of the generated
/// box's containing block."
#[must_use]
pub fn percentage_resolution_height(
    style: &ComputedStyle,
    override_height: Option<Au>,
    border_padding: Au,
    containing_height: Extent,
) -> Extent {
    if let Some(height) = override_height {
        return Extent::Definite((height - border_padding).max(Au(0)));
    }
    match style.height {
        Length::Fixed(value) => Extent::Definite(px(value)),
        Length::Percent(pct) => containing_height.map(|height| percent_of(height, pct)),
        _ => Extent::Indefinite,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fit_content_width_clamps_to_preferred() {
        let style = ComputedStyle::default();
        let preferred = MinMaxSizes::new(Au::from_px(30), Au::from_px(80));
        let narrow = compute_logical_width(
            &style,
            preferred,
            Au::from_px(10),
            Au(0),
            InlineSizing::FitContent,
        );
        let wide = compute_logical_width(
            &style,
            preferred,
            Au::from_px(500),
            Au(0),
            InlineSizing::FitContent,
        );
        assert_eq!(narrow, Au::from_px(30));
        assert_eq!(wide, Au::from_px(80));
    }

    #[test]
    fn test_fixed_height_adds_border_padding() {
        let style = ComputedStyle {
            height: Length::Fixed(40.0),
            ..ComputedStyle::default()
        };
        let height = compute_logical_height(&style, Au::from_px(10), Au(0), Extent::Indefinite);
        assert_eq!(height, Au::from_px(50));
    }

    #[test]
    fn test_percent_height_needs_definite_container() {
        let style = ComputedStyle {
            height: Length::Percent(50.0),
            ..ComputedStyle::default()
        };
        let indefinite =
            compute_logical_height(&style, Au(0), Au::from_px(7), Extent::Indefinite);
        let definite = compute_logical_height(
            &style,
            Au(0),
            Au::from_px(7),
            Extent::Definite(Au::from_px(100)),
        );
        assert_eq!(indefinite, Au::from_px(7));
        assert_eq!(definite, Au::from_px(50));
    }

    #[test]
    fn test_min_height_beats_max_height() {
        let style = ComputedStyle {
            min_height: Length::Fixed(60.0),
            max_height: Length::Fixed(20.0),
            ..ComputedStyle::default()
        };
        let height = compute_logical_height(&style, Au(0), Au::from_px(40), Extent::Indefinite);
        assert_eq!(height, Au::from_px(60));
    }
}
