//! Stroke styles and dash patterns.
//!
//! [§ 4.2 'border-style'](https://www.w3.org/TR/css-backgrounds-3/#border-style)
//!
//! "dotted: A series of round dots." / "dashed: A series of square-ended
//! dashes." The exact lengths are left to the user agent; dashes here are
//! spaced so a side begins and ends on a dash where possible.

use serde::{Deserialize, Serialize};

/// The pattern a stroke is drawn with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum StrokeStyle {
    /// Continuous line.
    #[default]
    Solid,
    /// Square-ended dashes.
    Dashed,
    /// Dots, square for thin lines and round for wide ones.
    Dotted,
}

/// Shape at the ends of each dash.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LineCap {
    /// Flush with the end point.
    #[default]
    Butt,
    /// Semicircle past the end point.
    Round,
    /// Half a square past the end point.
    Square,
}

/// On/off lengths for a dashed stroke.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashPattern {
    /// Alternating dash and gap lengths.
    pub intervals: Vec<f32>,
    /// Offset into the pattern at the start of the path.
    pub phase: f32,
}

/// Everything needed to stroke a path besides its color.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct StrokeData {
    /// Line width.
    pub thickness: f32,
    /// Pattern.
    pub style: StrokeStyle,
    /// End caps.
    pub line_cap: LineCap,
    /// Dash lengths, absent for continuous strokes.
    pub dash: Option<DashPattern>,
}

impl StrokeData {
    /// A continuous stroke.
    #[must_use]
    pub const fn solid(thickness: f32) -> Self {
        Self {
            thickness,
            style: StrokeStyle::Solid,
            line_cap: LineCap::Butt,
            dash: None,
        }
    }

    /// A patterned stroke whose dashes are laid out for a path of `length`.
    ///
    /// `dash_thickness` sizes the dashes when it differs from the line width
    /// (a centreline stroke is widened so its outer half can be clipped).
    #[must_use]
    pub fn patterned(
        thickness: f32,
        style: StrokeStyle,
        length: f32,
        dash_thickness: f32,
        closed_path: bool,
    ) -> Self {
        let dash_width = if dash_thickness > 0.0 {
            dash_thickness
        } else {
            thickness
        };
        let line_cap = if style == StrokeStyle::Dotted && !stroke_is_dashed(dash_width, style) {
            LineCap::Round
        } else {
            LineCap::Butt
        };
        Self {
            thickness,
            style,
            line_cap,
            dash: dash_pattern(style, length, dash_width, closed_path),
        }
    }
}

/// Dashes are drawn as butt-capped intervals.
///
/// Dotted strokes wider than three pixels use round caps instead.
#[must_use]
pub fn stroke_is_dashed(width: f32, style: StrokeStyle) -> bool {
    style == StrokeStyle::Dashed || (style == StrokeStyle::Dotted && width <= 3.0)
}

/// Dash length as a multiple of the line width.
#[must_use]
pub fn dash_length_ratio(thickness: f32) -> f32 {
    if thickness >= 3.0 { 2.0 } else { 3.0 }
}

/// Gap length as a multiple of the line width.
#[must_use]
pub fn dash_gap_ratio(thickness: f32) -> f32 {
    if thickness >= 3.0 { 1.0 } else { 2.0 }
}

/// Pick the gap closest to `gap_length` that fits a whole number of dashes
/// into `stroke_length`.
///
/// Open paths end on a dash, closed paths end on a gap.
#[must_use]
pub fn select_best_dash_gap(
    stroke_length: f32,
    dash_length: f32,
    gap_length: f32,
    closed_path: bool,
) -> f32 {
    let available_length = if closed_path {
        stroke_length
    } else {
        stroke_length + gap_length
    };
    let min_num_dashes = (available_length / (dash_length + gap_length)).floor();
    let max_num_dashes = min_num_dashes + 1.0;
    let min_num_gaps = if closed_path {
        min_num_dashes
    } else {
        min_num_dashes - 1.0
    };
    let max_num_gaps = if closed_path {
        max_num_dashes
    } else {
        max_num_dashes - 1.0
    };
    let min_gap = min_num_dashes.mul_add(-dash_length, stroke_length) / min_num_gaps;
    let max_gap = max_num_dashes.mul_add(-dash_length, stroke_length) / max_num_gaps;
    if max_gap <= 0.0 || (min_gap - gap_length).abs() < (max_gap - gap_length).abs() {
        min_gap
    } else {
        max_gap
    }
}

fn dash_pattern(
    style: StrokeStyle,
    length: f32,
    dash_width: f32,
    closed_path: bool,
) -> Option<DashPattern> {
    if style == StrokeStyle::Solid || dash_width <= 0.0 {
        return None;
    }
    if !stroke_is_dashed(dash_width, style) {
        // Zero-length dashes with round caps become dots.
        let gap = select_best_dash_gap(length, dash_width, dash_width, closed_path);
        return Some(DashPattern {
            intervals: vec![0.0, gap + dash_width],
            phase: 0.0,
        });
    }

    let mut dash_length = dash_width;
    let mut gap_length = dash_length;
    if style == StrokeStyle::Dashed {
        dash_length *= dash_length_ratio(dash_width);
        gap_length *= dash_gap_ratio(dash_width);
    }
    if length <= dash_length * 2.0 {
        // No space for dashes.
        return None;
    }
    let two_dashes_with_gap_length = dash_length.mul_add(2.0, gap_length);
    let intervals = if length <= two_dashes_with_gap_length {
        let multiplier = length / two_dashes_with_gap_length;
        vec![dash_length * multiplier, gap_length * multiplier]
    } else if style == StrokeStyle::Dashed {
        vec![
            dash_length,
            select_best_dash_gap(length, dash_length, gap_length, closed_path),
        ]
    } else {
        vec![dash_length, gap_length]
    };
    Some(DashPattern {
        intervals,
        phase: 0.0,
    })
}
