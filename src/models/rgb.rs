//! RGB color handling with hex parsing, HLS conversion and luminance.

// Allow small types passed by reference for API consistency
#![allow(clippy::trivially_copy_pass_by_ref)]
// Allow intentional type casts for color math
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::cast_lossless)]
// Allow float comparisons in HLS conversion (standard algorithms)
#![allow(clippy::float_cmp)]

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Rec. 709 luma weights for red, green and blue.
const LUMA_WEIGHTS: (f64, f64, f64) = (0.2126, 0.7152, 0.0722);

const ONE_THIRD: f64 = 1.0 / 3.0;
const ONE_SIXTH: f64 = 1.0 / 6.0;
const TWO_THIRD: f64 = 2.0 / 3.0;

/// RGB color value with 8-bit channels.
///
/// Parses CSS hex notation (`#rgb` or `#rrggbb`) and always formats as
/// lowercase `#rrggbb`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct RgbColor {
    /// Red channel (0-255)
    pub r: u8,
    /// Green channel (0-255)
    pub g: u8,
    /// Blue channel (0-255)
    pub b: u8,
}

/// Error returned when a string is not a hex color.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseHexError(String);

impl fmt::Display for ParseHexError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Invalid hex color format '{}'. Expected #RGB or #RRGGBB",
            self.0
        )
    }
}

impl std::error::Error for ParseHexError {}

impl RgbColor {
    /// Creates a new `RgbColor` from individual channel values.
    #[must_use]
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parses an `RgbColor` from a hex string.
    ///
    /// Supports formats: "#RRGGBB", "RRGGBB", "#RGB", "RGB" in any case.
    ///
    /// # Examples
    ///
    /// ```
    /// use company_colors::models::RgbColor;
    ///
    /// let color = RgbColor::from_hex("#FF0000").unwrap();
    /// assert_eq!(color, RgbColor::new(255, 0, 0));
    ///
    /// let color = RgbColor::from_hex("#fff").unwrap();
    /// assert_eq!(color, RgbColor::new(255, 255, 255));
    /// ```
    pub fn from_hex(hex: &str) -> Result<Self, ParseHexError> {
        let trimmed = hex.trim();
        let digits = trimmed.strip_prefix('#').unwrap_or(trimmed);

        if !digits.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(ParseHexError(hex.to_string()));
        }

        let channel = |s: &str| u8::from_str_radix(s, 16).map_err(|_| ParseHexError(hex.to_string()));

        match digits.len() {
            6 => Ok(Self::new(
                channel(&digits[0..2])?,
                channel(&digits[2..4])?,
                channel(&digits[4..6])?,
            )),
            3 => {
                // #abc is shorthand for #aabbcc
                let r = channel(&digits[0..1])?;
                let g = channel(&digits[1..2])?;
                let b = channel(&digits[2..3])?;
                Ok(Self::new(r * 17, g * 17, b * 17))
            }
            _ => Err(ParseHexError(hex.to_string())),
        }
    }

    /// Converts the color to a hex string in the format "#rrggbb" (lowercase).
    ///
    /// # Examples
    ///
    /// ```
    /// use company_colors::models::RgbColor;
    ///
    /// assert_eq!(RgbColor::new(0, 128, 255).to_hex(), "#0080ff");
    /// ```
    #[must_use]
    pub fn to_hex(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }

    /// Converts to normalized channels in [0, 1].
    #[must_use]
    pub fn to_normalized(&self) -> NormalizedRgb {
        NormalizedRgb::new(
            f64::from(self.r) / 255.0,
            f64::from(self.g) / 255.0,
            f64::from(self.b) / 255.0,
        )
    }
}

impl FromStr for RgbColor {
    type Err = ParseHexError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_hex(s)
    }
}

impl fmt::Display for RgbColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

/// RGB color with floating point channels in [0, 1].
///
/// This is the working representation for palette math: logo sampling yields
/// it, lightness adjustments happen in HLS space, and conversion back to
/// 8-bit channels happens once, at hex formatting time.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NormalizedRgb {
    /// Red channel (0.0-1.0)
    pub r: f64,
    /// Green channel (0.0-1.0)
    pub g: f64,
    /// Blue channel (0.0-1.0)
    pub b: f64,
}

impl NormalizedRgb {
    /// Creates a color, clamping each channel into [0, 1].
    #[must_use]
    pub fn new(r: f64, g: f64, b: f64) -> Self {
        Self {
            r: r.clamp(0.0, 1.0),
            g: g.clamp(0.0, 1.0),
            b: b.clamp(0.0, 1.0),
        }
    }

    /// Converts to HLS (Hue, Lightness, Saturation).
    ///
    /// # Returns
    ///
    /// A tuple `(h, l, s)` with every component in [0, 1]. Hue is 0.0 for
    /// grayscale colors.
    ///
    /// # Examples
    ///
    /// ```
    /// use company_colors::models::NormalizedRgb;
    ///
    /// let (h, l, s) = NormalizedRgb::new(1.0, 0.0, 0.0).to_hls();
    /// assert!(h.abs() < 1e-9);
    /// assert!((l - 0.5).abs() < 1e-9);
    /// assert!((s - 1.0).abs() < 1e-9);
    /// ```
    #[must_use]
    #[allow(clippy::many_single_char_names)] // Standard RGB/HLS color model uses single-char names
    pub fn to_hls(&self) -> (f64, f64, f64) {
        let Self { r, g, b } = *self;
        let max = r.max(g).max(b);
        let min = r.min(g).min(b);
        let sum = max + min;
        let range = max - min;
        let l = sum / 2.0;

        if min == max {
            return (0.0, l, 0.0);
        }

        let s = if l <= 0.5 {
            range / sum
        } else {
            range / (2.0 - max - min)
        };

        let rc = (max - r) / range;
        let gc = (max - g) / range;
        let bc = (max - b) / range;

        let h = if r == max {
            bc - gc
        } else if g == max {
            2.0 + rc - bc
        } else {
            4.0 + gc - rc
        };

        ((h / 6.0).rem_euclid(1.0), l, s)
    }

    /// Creates a color from HLS components.
    ///
    /// Hue wraps around; lightness and saturation are clamped to [0, 1].
    #[must_use]
    #[allow(clippy::many_single_char_names)] // Standard RGB/HLS color model uses single-char names
    pub fn from_hls(h: f64, l: f64, s: f64) -> Self {
        let l = l.clamp(0.0, 1.0);
        let s = s.clamp(0.0, 1.0);

        if s == 0.0 {
            return Self::new(l, l, l);
        }

        let m2 = if l <= 0.5 { l * (1.0 + s) } else { l + s - l * s };
        let m1 = 2.0 * l - m2;

        Self::new(
            hue_channel(m1, m2, h + ONE_THIRD),
            hue_channel(m1, m2, h),
            hue_channel(m1, m2, h - ONE_THIRD),
        )
    }

    /// Returns the color with its HLS lightness reduced by `amount`.
    ///
    /// Lightness never drops below 0; hue and saturation are kept.
    ///
    /// # Examples
    ///
    /// ```
    /// use company_colors::models::NormalizedRgb;
    ///
    /// let gray = NormalizedRgb::new(0.8, 0.8, 0.8);
    /// assert_eq!(gray.darken(0.1).to_hex(), "#b3b3b3");
    /// ```
    #[must_use]
    pub fn darken(&self, amount: f64) -> Self {
        let (h, l, s) = self.to_hls();
        Self::from_hls(h, (l - amount).max(0.0), s)
    }

    /// HLS lightness of the color.
    #[must_use]
    pub fn lightness(&self) -> f64 {
        self.to_hls().1
    }

    /// Inverse of the Rec. 709 perceived luminance.
    ///
    /// Values below 0.5 mean the color is light and needs dark text on top.
    #[must_use]
    pub fn inverse_luminance(&self) -> f64 {
        let (wr, wg, wb) = LUMA_WEIGHTS;
        1.0 - (wr * self.r + wg * self.g + wb * self.b)
    }

    /// Rounds each channel to the nearest of 256 levels.
    #[must_use]
    pub fn to_rgb8(&self) -> RgbColor {
        let level = |c: f64| (c * 255.0).round().clamp(0.0, 255.0) as u8;
        RgbColor::new(level(self.r), level(self.g), level(self.b))
    }

    /// Formats the color as lowercase `#rrggbb`.
    #[must_use]
    pub fn to_hex(&self) -> String {
        self.to_rgb8().to_hex()
    }
}

fn hue_channel(m1: f64, m2: f64, hue: f64) -> f64 {
    let hue = hue.rem_euclid(1.0);
    if hue < ONE_SIXTH {
        m1 + (m2 - m1) * hue * 6.0
    } else if hue < 0.5 {
        m2
    } else if hue < TWO_THIRD {
        m1 + (m2 - m1) * (TWO_THIRD - hue) * 6.0
    } else {
        m1
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_hex_valid() {
        assert_eq!(RgbColor::from_hex("#FF0000").unwrap(), RgbColor::new(255, 0, 0));
        assert_eq!(RgbColor::from_hex("00ff00").unwrap(), RgbColor::new(0, 255, 0));
        assert_eq!(RgbColor::from_hex("  #0000ff  ").unwrap(), RgbColor::new(0, 0, 255));
        assert_eq!(RgbColor::from_hex("#000").unwrap(), RgbColor::new(0, 0, 0));
        assert_eq!(RgbColor::from_hex("#fFf").unwrap(), RgbColor::new(255, 255, 255));
        assert_eq!(RgbColor::from_hex("#1a2").unwrap(), RgbColor::new(0x11, 0xaa, 0x22));
    }

    #[test]
    fn test_from_hex_invalid() {
        assert!(RgbColor::from_hex("#FFFF").is_err());
        assert!(RgbColor::from_hex("#FFFFFFF").is_err());
        assert!(RgbColor::from_hex("GGGGGG").is_err());
        assert!(RgbColor::from_hex("+12345").is_err());
        assert!(RgbColor::from_hex("").is_err());
        assert!(RgbColor::from_hex("#").is_err());
        assert!(RgbColor::from_hex("red").is_err());
    }

    #[test]
    fn test_to_hex_lowercase() {
        assert_eq!(RgbColor::new(255, 0, 0).to_hex(), "#ff0000");
        assert_eq!(RgbColor::new(0, 128, 255).to_hex(), "#0080ff");
        assert_eq!(RgbColor::new(0, 0, 0).to_hex(), "#000000");
        assert_eq!(RgbColor::new(171, 205, 239).to_string(), "#abcdef");
    }

    #[test]
    fn test_normalized_rounds_to_nearest_level() {
        assert_eq!(NormalizedRgb::new(0.8, 0.8, 0.8).to_hex(), "#cccccc");
        // 0.5 * 255 = 127.5 rounds up
        assert_eq!(NormalizedRgb::new(0.5, 0.5, 0.5).to_hex(), "#808080");
        assert_eq!(NormalizedRgb::new(0.0, 1.0, 0.0).to_hex(), "#00ff00");
    }

    #[test]
    fn test_normalized_clamps_channels() {
        let color = NormalizedRgb::new(1.5, -0.2, 0.3);
        assert_eq!(color.r, 1.0);
        assert_eq!(color.g, 0.0);
        assert!((color.b - 0.3).abs() < f64::EPSILON);
    }

    #[test]
    fn test_to_hls_primary_colors() {
        let (h, l, s) = NormalizedRgb::new(0.0, 1.0, 0.0).to_hls();
        assert!((h - ONE_THIRD).abs() < 1e-9);
        assert!((l - 0.5).abs() < 1e-9);
        assert!((s - 1.0).abs() < 1e-9);

        let (h, _, _) = NormalizedRgb::new(0.0, 0.0, 1.0).to_hls();
        assert!((h - TWO_THIRD).abs() < 1e-9);
    }

    #[test]
    fn test_to_hls_grayscale() {
        let (h, l, s) = NormalizedRgb::new(0.8, 0.8, 0.8).to_hls();
        assert_eq!(h, 0.0);
        assert_eq!(s, 0.0);
        assert!((l - 0.8).abs() < 1e-9);
    }

    #[test]
    fn test_hls_roundtrip() {
        let colors = [
            NormalizedRgb::new(1.0, 0.0, 0.0),
            NormalizedRgb::new(1.0, 1.0, 0.0),
            NormalizedRgb::new(0.0, 1.0, 1.0),
            NormalizedRgb::new(0.5, 0.25, 0.75),
            NormalizedRgb::new(0.8, 0.4, 0.2),
            NormalizedRgb::new(0.1, 0.9, 0.6),
        ];

        for color in colors {
            let (h, l, s) = color.to_hls();
            let back = NormalizedRgb::from_hls(h, l, s);
            assert!((color.r - back.r).abs() < 1e-9, "{color:?} vs {back:?}");
            assert!((color.g - back.g).abs() < 1e-9, "{color:?} vs {back:?}");
            assert!((color.b - back.b).abs() < 1e-9, "{color:?} vs {back:?}");
        }
    }

    #[test]
    fn test_darken_gray() {
        let gray = NormalizedRgb::new(0.8, 0.8, 0.8);
        let darker = gray.darken(0.1);
        assert!((darker.lightness() - 0.7).abs() < 1e-9);
        assert_eq!(darker.to_hex(), "#b3b3b3");
    }

    #[test]
    fn test_darken_clamps_at_black() {
        let almost_black = NormalizedRgb::new(0.05, 0.02, 0.04);
        let darker = almost_black.darken(0.1);
        assert_eq!(darker.lightness(), 0.0);
        assert_eq!(darker.to_hex(), "#000000");
    }

    #[test]
    fn test_darken_keeps_hue() {
        let orange = NormalizedRgb::new(0.9, 0.5, 0.1);
        let (h, _, s) = orange.to_hls();
        let (dh, _, ds) = orange.darken(0.1).to_hls();
        assert!((h - dh).abs() < 1e-9);
        assert!((s - ds).abs() < 1e-9);
    }

    #[test]
    fn test_inverse_luminance() {
        assert!((NormalizedRgb::new(1.0, 1.0, 1.0).inverse_luminance()).abs() < 1e-9);
        assert!((NormalizedRgb::new(0.0, 0.0, 0.0).inverse_luminance() - 1.0).abs() < 1e-9);
        let gray = NormalizedRgb::new(0.8, 0.8, 0.8).inverse_luminance();
        assert!((gray - 0.2).abs() < 1e-9);
    }

    #[test]
    fn test_rgb8_to_normalized() {
        let color = RgbColor::new(255, 0, 51).to_normalized();
        assert_eq!(color.r, 1.0);
        assert_eq!(color.g, 0.0);
        assert!((color.b - 0.2).abs() < 1e-9);
    }
}
