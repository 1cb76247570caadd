//! RGBA color in linear [0, 1] components.

use crate::error::ColorError;
use serde::{Deserialize, Serialize};

/// RGBA color with values in the range [0.0, 1.0].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Color {
    /// Red component [0.0, 1.0]
    pub r: f32,
    /// Green component [0.0, 1.0]
    pub g: f32,
    /// Blue component [0.0, 1.0]
    pub b: f32,
    /// Alpha component [0.0, 1.0]
    pub a: f32,
}

impl Color {
    /// Create a new color, clamping values to [0.0, 1.0].
    #[must_use]
    pub fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self {
            r: r.clamp(0.0, 1.0),
            g: g.clamp(0.0, 1.0),
            b: b.clamp(0.0, 1.0),
            a: a.clamp(0.0, 1.0),
        }
    }

    /// Create an opaque color from RGB values.
    #[must_use]
    pub fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self::new(r, g, b, 1.0)
    }

    /// Create a color from 8-bit channels and a float alpha.
    #[must_use]
    pub fn from_rgba8(r: u8, g: u8, b: u8, a: f32) -> Self {
        Self::new(
            f32::from(r) / 255.0,
            f32::from(g) / 255.0,
            f32::from(b) / 255.0,
            a,
        )
    }

    /// Parse `#rrggbb` or `#rrggbbaa` (the `#` is optional).
    ///
    /// # Errors
    ///
    /// Returns [`ColorError`] for a wrong length or a non-hex digit.
    pub fn from_hex(hex: &str) -> Result<Self, ColorError> {
        let hex = hex.trim_start_matches('#');
        if hex.len() != 6 && hex.len() != 8 {
            return Err(ColorError::InvalidLength(hex.len()));
        }
        let channel = |i: usize| {
            hex.get(i..i + 2)
                .and_then(|pair| u8::from_str_radix(pair, 16).ok())
                .ok_or_else(|| ColorError::InvalidHex(hex.to_string()))
        };
        let alpha = if hex.len() == 8 { f32::from(channel(6)?) / 255.0 } else { 1.0 };
        Ok(Self::from_rgba8(channel(0)?, channel(2)?, channel(4)?, alpha))
    }

    /// Linear blend toward `other`; `t` is clamped to [0, 1].
    #[must_use]
    pub fn lerp(&self, other: &Self, t: f32) -> Self {
        let t = t.clamp(0.0, 1.0);
        Self::new(
            (other.r - self.r).mul_add(t, self.r),
            (other.g - self.g).mul_add(t, self.g),
            (other.b - self.b).mul_add(t, self.b),
            (other.a - self.a).mul_add(t, self.a),
        )
    }

    /// CSS `rgba()` notation, as consumed by a 2D canvas context.
    #[must_use]
    pub fn to_css(&self) -> String {
        format!(
            "rgba({},{},{},{})",
            (self.r * 255.0).round() as u8,
            (self.g * 255.0).round() as u8,
            (self.b * 255.0).round() as u8,
            self.a
        )
    }

    /// Same color with a different alpha.
    #[must_use]
    pub fn with_alpha(&self, a: f32) -> Self {
        Self::new(self.r, self.g, self.b, a)
    }

    /// Create from hue in degrees (wrapped), saturation and lightness in [0, 1].
    #[must_use]
    pub fn from_hsla(hue: f32, saturation: f32, lightness: f32, a: f32) -> Self {
        let h = hue.rem_euclid(360.0) / 60.0;
        let s = saturation.clamp(0.0, 1.0);
        let l = lightness.clamp(0.0, 1.0);
        let chroma = (1.0 - (2.0 * l - 1.0).abs()) * s;
        let x = chroma * (1.0 - (h % 2.0 - 1.0).abs());
        let (r, g, b) = match h as u32 {
            0 => (chroma, x, 0.0),
            1 => (x, chroma, 0.0),
            2 => (0.0, chroma, x),
            3 => (0.0, x, chroma),
            4 => (x, 0.0, chroma),
            _ => (chroma, 0.0, x),
        };
        let m = l - chroma / 2.0;
        Self::new(r + m, g + m, b + m, a)
    }

    /// Black color
    pub const BLACK: Self = Self {
        r: 0.0,
        g: 0.0,
        b: 0.0,
        a: 1.0,
    };
    /// White color
    pub const WHITE: Self = Self {
        r: 1.0,
        g: 1.0,
        b: 1.0,
        a: 1.0,
    };
}

impl Default for Color {
    fn default() -> Self {
        Self::BLACK
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_color_new_clamps_values() {
        let c = Color::new(1.5, -0.5, 0.5, 2.0);
        assert_eq!(c.r, 1.0);
        assert_eq!(c.g, 0.0);
        assert_eq!(c.b, 0.5);
        assert_eq!(c.a, 1.0);
    }

    #[test]
    fn test_color_from_rgba8() {
        let c = Color::from_rgba8(0x34, 0x98, 0xdb, 0.3);
        assert_eq!(c.to_css(), "rgba(52,152,219,0.3)");
    }

    #[test]
    fn test_color_from_hex() {
        assert_eq!(Color::from_hex("#3498db").unwrap(), Color::from_rgba8(0x34, 0x98, 0xdb, 1.0));
        assert_eq!(Color::from_hex("2ecc71").unwrap(), Color::from_rgba8(0x2e, 0xcc, 0x71, 1.0));
        let translucent = Color::from_hex("#ffffff80").unwrap();
        assert!((translucent.a - 128.0 / 255.0).abs() < 1e-6);
    }

    #[test]
    fn test_color_from_hex_rejects_bad_input() {
        assert_eq!(Color::from_hex("#fff"), Err(ColorError::InvalidLength(3)));
        assert!(matches!(Color::from_hex("#gg0000"), Err(ColorError::InvalidHex(_))));
        // Multi-byte chars must not split a slice mid-codepoint.
        assert!(Color::from_hex("#ééé").is_err());
    }

    #[test]
    fn test_color_lerp() {
        let from = Color::rgb(0.0, 0.0, 0.0);
        let to = Color::new(1.0, 0.5, 0.0, 0.0);
        assert_eq!(from.lerp(&to, 0.0), from);
        assert_eq!(from.lerp(&to, 1.0), to);
        let mid = from.lerp(&to, 0.5);
        assert!((mid.r - 0.5).abs() < 1e-6 && (mid.g - 0.25).abs() < 1e-6);
        assert!((mid.a - 0.5).abs() < 1e-6);
        assert_eq!(from.lerp(&to, 7.0), to);
    }

    #[test]
    fn test_color_to_css() {
        assert_eq!(Color::rgb(1.0, 0.0, 0.0).to_css(), "rgba(255,0,0,1)");
        assert_eq!(Color::WHITE.with_alpha(0.5).to_css(), "rgba(255,255,255,0.5)");
    }

    #[test]
    fn test_color_from_hsla() {
        let red = Color::from_hsla(0.0, 1.0, 0.5, 1.0);
        assert!((red.r - 1.0).abs() < 1e-6 && red.g.abs() < 1e-6 && red.b.abs() < 1e-6);
        let blue = Color::from_hsla(600.0, 1.0, 0.5, 0.5);
        assert!((blue.b - 1.0).abs() < 1e-6 && blue.r.abs() < 1e-6);
        assert_eq!(blue.a, 0.5);
        let grey = Color::from_hsla(123.0, 0.0, 0.25, 1.0);
        assert!((grey.r - 0.25).abs() < 1e-6 && (grey.g - 0.25).abs() < 1e-6);
    }

    proptest! {
        #[test]
        fn prop_color_clamps_to_valid_range(r in -1.0f32..2.0, g in -1.0f32..2.0, b in -1.0f32..2.0, a in -1.0f32..2.0) {
            let c = Color::new(r, g, b, a);
            prop_assert!(c.r >= 0.0 && c.r <= 1.0);
            prop_assert!(c.g >= 0.0 && c.g <= 1.0);
            prop_assert!(c.b >= 0.0 && c.b <= 1.0);
            prop_assert!(c.a >= 0.0 && c.a <= 1.0);
        }
    }
}
