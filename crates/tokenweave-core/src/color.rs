//! Color handling for platform formatters
//!
//! This module provides the [`Color`] type which wraps the `AlphaColor` type
//! from the color crate. Only the forms that token sources are allowed to use
//! are accepted: `#RRGGBB`, `#RRGGBBAA`, `rgb(r, g, b)`, `rgba(r, g, b[, a])`
//! and the keyword `transparent`. Any other string, including CSS named
//! colors, is not treated as a color so formatters pass it through untouched.

use std::{fmt, str::FromStr};

use color::{AlphaColor, DynamicColor, Srgb};
use thiserror::Error;

/// Reasons a string could not be turned into a [`Color`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ColorError {
    #[error("`{0}` is not a supported color form")]
    UnsupportedForm(String),

    #[error("invalid color `{input}`: {reason}")]
    Invalid { input: String, reason: String },
}

/// An sRGB color with alpha.
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct Color {
    color: AlphaColor<Srgb>,
}

impl Color {
    /// Fully transparent black.
    pub const TRANSPARENT: Color = Color {
        color: AlphaColor::new([0.0, 0.0, 0.0, 0.0]),
    };

    /// Parse one of the supported color forms.
    ///
    /// # Examples
    ///
    /// ```
    /// use tokenweave_core::color::Color;
    ///
    /// let blue = Color::new("#2196F3").unwrap();
    /// assert_eq!(blue.to_rgba8(), [0x21, 0x96, 0xF3, 0xFF]);
    ///
    /// let faded = Color::new("rgba(33, 150, 243, 0.5)").unwrap();
    /// assert_eq!(faded.to_rgba8()[3], 0x80);
    ///
    /// assert!(Color::new("red").is_err());
    /// ```
    pub fn new(input: &str) -> Result<Self, ColorError> {
        let trimmed = input.trim();

        if trimmed.eq_ignore_ascii_case("transparent") {
            return Ok(Self::TRANSPARENT);
        }

        if !is_supported_form(trimmed) {
            return Err(ColorError::UnsupportedForm(input.to_string()));
        }

        let dynamic = DynamicColor::from_str(trimmed).map_err(|err| ColorError::Invalid {
            input: input.to_string(),
            reason: err.to_string(),
        })?;

        Ok(Self {
            color: dynamic.to_alpha_color::<Srgb>(),
        })
    }

    /// Returns `[r, g, b, a]` as bytes, each channel rounded to the nearest
    /// integer after scaling to 0–255.
    pub fn to_rgba8(self) -> [u8; 4] {
        self.color.components.map(channel_to_u8)
    }

    /// Returns the alpha component between 0.0 and 1.0.
    pub fn alpha(self) -> f32 {
        self.color.components[3].clamp(0.0, 1.0)
    }

    /// Formats the color in Android's `#AARRGGBB` order with uppercase hex.
    ///
    /// # Examples
    ///
    /// ```
    /// use tokenweave_core::color::Color;
    ///
    /// let color = Color::new("#2196F3").unwrap();
    /// assert_eq!(color.to_android_hex(), "#FF2196F3");
    /// assert_eq!(Color::TRANSPARENT.to_android_hex(), "#00000000");
    /// ```
    pub fn to_android_hex(self) -> String {
        let [r, g, b, a] = self.to_rgba8();
        format!("#{a:02X}{r:02X}{g:02X}{b:02X}")
    }

    /// Returns normalized `[red, green, blue, alpha]` components rounded to
    /// three decimal places, as used by `UIColor(red:green:blue:alpha:)`.
    ///
    /// The color channels are derived from their 8-bit values (`byte / 255`).
    pub fn to_unit_components(self) -> [f64; 4] {
        let [r, g, b, _] = self.to_rgba8();
        [
            round3(f64::from(r) / 255.0),
            round3(f64::from(g) / 255.0),
            round3(f64::from(b) / 255.0),
            round3(f64::from(self.alpha())),
        ]
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [r, g, b, a] = self.to_rgba8();
        if a == u8::MAX {
            write!(f, "#{r:02x}{g:02x}{b:02x}")
        } else {
            write!(f, "#{r:02x}{g:02x}{b:02x}{a:02x}")
        }
    }
}

impl FromStr for Color {
    type Err = ColorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

/// Gate on the syntactic shape before handing the string to the CSS parser,
/// which would otherwise also accept named colors and modern color functions.
fn is_supported_form(input: &str) -> bool {
    if let Some(hex) = input.strip_prefix('#') {
        return matches!(hex.len(), 6 | 8) && hex.chars().all(|c| c.is_ascii_hexdigit());
    }

    let lower = input.to_ascii_lowercase();
    (lower.starts_with("rgba(") || lower.starts_with("rgb(")) && lower.ends_with(')')
}

fn channel_to_u8(channel: f32) -> u8 {
    (channel.clamp(0.0, 1.0) * 255.0).round() as u8
}

fn round3(value: f64) -> f64 {
    (value * 1000.0).round() / 1000.0
}

#[cfg(test)]
mod tests {
    use float_cmp::approx_eq;

    use super::*;

    #[test]
    fn test_hex_rgb() {
        let color = Color::new("#2196F3").unwrap();
        assert_eq!(color.to_rgba8(), [0x21, 0x96, 0xF3, 0xFF]);
        assert_eq!(color.to_android_hex(), "#FF2196F3");
    }

    #[test]
    fn test_hex_rgba_moves_alpha_first_on_android() {
        let color = Color::new("#2196F380").unwrap();
        assert_eq!(color.to_android_hex(), "#802196F3");
    }

    #[test]
    fn test_rgba_function_rounds_alpha() {
        let color = Color::new("rgba(33, 150, 243, 0.5)").unwrap();
        assert_eq!(color.to_android_hex(), "#802196F3");
    }

    #[test]
    fn test_rgba_without_alpha_is_opaque() {
        let color = Color::new("rgba(0, 0, 0)").unwrap();
        assert_eq!(color.to_android_hex(), "#FF000000");
    }

    #[test]
    fn test_transparent_keyword() {
        let color = Color::new("transparent").unwrap();
        assert_eq!(color, Color::TRANSPARENT);
        assert_eq!(color.to_rgba8(), [0, 0, 0, 0]);
    }

    #[test]
    fn test_unsupported_forms() {
        assert!(matches!(
            Color::new("red"),
            Err(ColorError::UnsupportedForm(_))
        ));
        assert!(matches!(
            Color::new("#fff"),
            Err(ColorError::UnsupportedForm(_))
        ));
        assert!(matches!(
            Color::new("16px"),
            Err(ColorError::UnsupportedForm(_))
        ));
        assert!(matches!(
            Color::new("hsl(0, 100%, 50%)"),
            Err(ColorError::UnsupportedForm(_))
        ));
    }

    #[test]
    fn test_unit_components() {
        let [r, g, b, a] = Color::new("#2196F3").unwrap().to_unit_components();
        assert!(approx_eq!(f64, r, 0.129, epsilon = 1e-9));
        assert!(approx_eq!(f64, g, 0.588, epsilon = 1e-9));
        assert!(approx_eq!(f64, b, 0.953, epsilon = 1e-9));
        assert!(approx_eq!(f64, a, 1.0, epsilon = 1e-9));
    }

    #[test]
    fn test_display_lowercase_hex() {
        assert_eq!(Color::new("#2196F3").unwrap().to_string(), "#2196f3");
        assert_eq!(Color::TRANSPARENT.to_string(), "#00000000");
    }
}
