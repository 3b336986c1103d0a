//! Sizes that may be unknown and min/max pairs.

use app_units::{Au, MAX_AU};

/// A size that may not be known yet.
///
/// [§ 9.8 Definite and Indefinite Sizes](https://www.w3.org/TR/css-flexbox-1/#definite-sizes)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Extent {
    /// The size is known.
    Definite(Au),
    /// The size depends on content that has not been laid out.
    #[default]
    Indefinite,
}

impl Extent {
    /// Whether the size is known.
    #[must_use]
    pub const fn is_definite(self) -> bool {
        matches!(self, Self::Definite(_))
    }

    /// The size, or `fallback` when indefinite.
    #[must_use]
    pub const fn unwrap_or(self, fallback: Au) -> Au {
        match self {
            Self::Definite(value) => value,
            Self::Indefinite => fallback,
        }
    }

    /// The size as an option.
    #[must_use]
    pub const fn definite(self) -> Option<Au> {
        match self {
            Self::Definite(value) => Some(value),
            Self::Indefinite => None,
        }
    }

    /// Apply `f` to a definite size.
    #[must_use]
    pub fn map(self, f: impl FnOnce(Au) -> Au) -> Self {
        match self {
            Self::Definite(value) => Self::Definite(f(value)),
            Self::Indefinite => Self::Indefinite,
        }
    }
}

/// A `[min, max]` pair used for intrinsic widths and for clamping.
///
/// `max_size` of [`MAX_AU`] means unconstrained.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MinMaxSizes {
    /// Lower bound.
    pub min_size: Au,
    /// Upper bound.
    pub max_size: Au,
}

impl Default for MinMaxSizes {
    fn default() -> Self {
        Self {
            min_size: Au(0),
            max_size: MAX_AU,
        }
    }
}

impl MinMaxSizes {
    /// Create a pair.
    #[must_use]
    pub const fn new(min_size: Au, max_size: Au) -> Self {
        Self { min_size, max_size }
    }

    /// Clamp `value` into the range. The minimum wins when the two conflict.
    #[must_use]
    pub fn clamp_size(&self, value: Au) -> Au {
        value.min(self.max_size).max(self.min_size)
    }

    /// Grow both bounds by `amount`, saturating at [`MAX_AU`].
    #[must_use]
    pub fn expand(self, amount: Au) -> Self {
        Self {
            min_size: add_saturating(self.min_size, amount),
            max_size: add_saturating(self.max_size, amount),
        }
    }
}

/// Add two lengths without leaving the representable app unit range.
#[must_use]
pub fn add_saturating(a: Au, b: Au) -> Au {
    if a >= MAX_AU || b >= MAX_AU {
        return MAX_AU;
    }
    Au(a.0.saturating_add(b.0)).min(MAX_AU)
}

/// Scale `value` by a fraction, truncating toward zero.
#[allow(clippy::cast_possible_truncation)]
#[must_use]
pub fn scale_truncated(value: Au, factor: f64) -> Au {
    Au((f64::from(value.0) * factor) as i32)
}

/// Convert a CSS pixel value from a style snapshot.
#[must_use]
pub fn px(value: f32) -> Au {
    Au::from_f32_px(value)
}
