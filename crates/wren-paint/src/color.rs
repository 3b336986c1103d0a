//! sRGB colors.
//!
//! [CSS Color Level 4](https://www.w3.org/TR/css-color-4/)

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// [§ 4 Color syntax](https://www.w3.org/TR/css-color-4/#color-syntax)
/// sRGB color represented as RGBA components.
///
/// Serialized as a hex string (`"#rrggbb"` or `"#rrggbbaa"`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Color {
    /// "the red color channel" (0-255)
    pub r: u8,
    /// "the green color channel" (0-255)
    pub g: u8,
    /// "the blue color channel" (0-255)
    pub b: u8,
    /// "the alpha channel" (0-255, 255 = fully opaque)
    pub a: u8,
}

/// A string that is neither a hex color nor a known color keyword.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid color '{0}'")]
pub struct InvalidColor(pub String);

impl Color {
    /// Black (#000000)
    pub const BLACK: Self = Self::rgb(0, 0, 0);

    /// White (#ffffff)
    pub const WHITE: Self = Self::rgb(255, 255, 255);

    /// Fully transparent black.
    pub const TRANSPARENT: Self = Self::rgba(0, 0, 0, 0);

    /// An opaque color.
    #[must_use]
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self::rgba(r, g, b, 255)
    }

    /// A color with alpha.
    #[must_use]
    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// The same color with a different alpha.
    #[must_use]
    pub const fn with_alpha(self, a: u8) -> Self {
        Self { a, ..self }
    }

    /// Alpha as a fraction in `[0, 1]`.
    #[must_use]
    pub fn alpha_f32(self) -> f32 {
        f32::from(self.a) / 255.0
    }

    /// Alpha is 255.
    #[must_use]
    pub const fn is_opaque(self) -> bool {
        self.a == 255
    }

    /// Alpha is 0.
    #[must_use]
    pub const fn is_fully_transparent(self) -> bool {
        self.a == 0
    }

    /// [§ 4.2 The RGB hexadecimal notations](https://www.w3.org/TR/css-color-4/#hex-notation)
    /// "The syntax of a <hex-color> is a <hash-token> token whose value consists of
    /// 3, 4, 6, or 8 hexadecimal digits."
    #[must_use]
    pub fn from_hex(hex: &str) -> Option<Self> {
        let hex = hex.strip_prefix('#').unwrap_or(hex);
        if !hex.is_ascii() {
            return None;
        }
        let digit = |index: usize| u8::from_str_radix(&hex[index..=index].repeat(2), 16).ok();
        let pair = |index: usize| u8::from_str_radix(&hex[index..index + 2], 16).ok();
        match hex.len() {
            // [§ 4.2.1]
            // "The three-digit RGB notation (#RGB) is converted into six-digit form (#RRGGBB)
            // by replicating digits, not by adding zeros."
            3 => Some(Self::rgb(digit(0)?, digit(1)?, digit(2)?)),
            4 => Some(Self::rgba(digit(0)?, digit(1)?, digit(2)?, digit(3)?)),
            6 => Some(Self::rgb(pair(0)?, pair(2)?, pair(4)?)),
            8 => Some(Self::rgba(pair(0)?, pair(2)?, pair(4)?, pair(6)?)),
            _ => None,
        }
    }

    /// [§ 6.1 Named Colors](https://www.w3.org/TR/css-color-4/#named-colors)
    ///
    /// The sixteen basic HTML colors plus `transparent`.
    #[must_use]
    pub fn from_named(name: &str) -> Option<Self> {
        let color = match name.to_ascii_lowercase().as_str() {
            "black" => Self::BLACK,
            "silver" => Self::rgb(192, 192, 192),
            "gray" | "grey" => Self::rgb(128, 128, 128),
            "white" => Self::WHITE,
            "maroon" => Self::rgb(128, 0, 0),
            "red" => Self::rgb(255, 0, 0),
            "purple" => Self::rgb(128, 0, 128),
            "fuchsia" | "magenta" => Self::rgb(255, 0, 255),
            "green" => Self::rgb(0, 128, 0),
            "lime" => Self::rgb(0, 255, 0),
            "olive" => Self::rgb(128, 128, 0),
            "yellow" => Self::rgb(255, 255, 0),
            "navy" => Self::rgb(0, 0, 128),
            "blue" => Self::rgb(0, 0, 255),
            "teal" => Self::rgb(0, 128, 128),
            "aqua" | "cyan" => Self::rgb(0, 255, 255),
            "transparent" => Self::TRANSPARENT,
            _ => return None,
        };
        Some(color)
    }

    /// The shadow shade used by `inset`, `outset`, `groove` and `ridge`.
    ///
    /// Scales the channels so the brightest one drops by a third. Opaque
    /// white maps to a fixed light gray.
    #[must_use]
    pub fn dark(self) -> Self {
        if self == Self::WHITE {
            return Self::rgb(0xAB, 0xAB, 0xAB);
        }
        let v = self.max_channel();
        if v == 0.0 {
            return Self::rgba(0, 0, 0, self.a);
        }
        let multiplier = ((v - 0.33) / v).max(0.0);
        self.scaled(multiplier)
    }

    /// The highlight shade, used when [`Color::dark`] gives too little
    /// contrast against the original.
    ///
    /// Opaque black maps to a fixed dark gray.
    #[must_use]
    pub fn light(self) -> Self {
        let v = self.max_channel();
        if v == 0.0 {
            return Self::rgba(0x54, 0x54, 0x54, self.a);
        }
        let multiplier = (v + 0.33).min(1.0) / v;
        self.scaled(multiplier)
    }

    fn max_channel(self) -> f32 {
        f32::from(self.r.max(self.g).max(self.b)) / 255.0
    }

    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    fn scaled(self, multiplier: f32) -> Self {
        // Just under 256 so a full channel maps to 255 after truncation.
        const SCALE: f32 = 255.999_98;
        let channel = |c: u8| (multiplier * f32::from(c) / 255.0 * SCALE).clamp(0.0, 255.0) as u8;
        Self::rgba(channel(self.r), channel(self.g), channel(self.b), self.a)
    }

    /// [WCAG 2.1 relative luminance](https://www.w3.org/TR/WCAG21/#dfn-relative-luminance)
    #[must_use]
    pub fn relative_luminance(self) -> f32 {
        let linear = |c: u8| {
            let c = f32::from(c) / 255.0;
            if c <= 0.039_28 {
                c / 12.92
            } else {
                ((c + 0.055) / 1.055).powf(2.4)
            }
        };
        0.2126f32.mul_add(
            linear(self.r),
            0.7152f32.mul_add(linear(self.g), 0.0722 * linear(self.b)),
        )
    }

    /// [WCAG 2.1 contrast ratio](https://www.w3.org/TR/WCAG21/#dfn-contrast-ratio)
    ///
    /// "(L1 + 0.05) / (L2 + 0.05), where L1 is the relative luminance of the
    /// lighter of the colors, and L2 is the relative luminance of the darker
    /// of the colors." Alpha is ignored.
    #[must_use]
    pub fn contrast_ratio(self, other: Self) -> f32 {
        let a = self.relative_luminance();
        let b = other.relative_luminance();
        let (lighter, darker) = if a >= b { (a, b) } else { (b, a) };
        (lighter + 0.05) / (darker + 0.05)
    }
}

impl FromStr for Color {
    type Err = InvalidColor;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let parsed = if trimmed.starts_with('#') {
            Self::from_hex(trimmed)
        } else {
            Self::from_named(trimmed)
        };
        parsed.ok_or_else(|| InvalidColor(s.to_string()))
    }
}

impl TryFrom<String> for Color {
    type Error = InvalidColor;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Color> for String {
    fn from(color: Color) -> Self {
        color.to_string()
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)?;
        if !self.is_opaque() {
            write!(f, "{:02x}", self.a)?;
        }
        Ok(())
    }
}
