//! Palette derivation from a company logo.
//!
//! The logo's average color becomes the accent, a variant 0.1 darker in HLS
//! lightness becomes the hover background, and a single black/white choice
//! based on Rec. 709 luminance is used for everything drawn on the accent.

use serde::Serialize;
use std::collections::BTreeMap;
use tracing::debug;

use crate::error::Result;
use crate::logo;
use crate::models::{ColorSet, ColorSlot, NormalizedRgb, SlotRole};

/// HLS lightness removed to obtain the hover variant.
pub const HOVER_DARKEN: f64 = 0.1;

/// Inverse luminance below which text on the accent is black.
pub const CONTRAST_THRESHOLD: f64 = 0.5;

/// Contrast color for light accents.
pub const DARK_TEXT: &str = "#000";

/// Contrast color for dark accents.
pub const LIGHT_TEXT: &str = "#fff";

/// The three colors every slot is filled from.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Palette {
    /// Average logo color
    pub accent: NormalizedRgb,
    /// Accent with reduced lightness
    pub hover: NormalizedRgb,
    /// `#000` or `#fff`
    pub contrast: &'static str,
}

impl Palette {
    /// Derives the palette from an accent color.
    #[must_use]
    pub fn from_accent(accent: NormalizedRgb) -> Self {
        let hover = accent.darken(HOVER_DARKEN);
        let contrast = if accent.inverse_luminance() < CONTRAST_THRESHOLD {
            DARK_TEXT
        } else {
            LIGHT_TEXT
        };
        Self {
            accent,
            hover,
            contrast,
        }
    }

    /// Value a slot takes under this palette.
    #[must_use]
    pub fn value_for(&self, slot: ColorSlot) -> String {
        match slot.role() {
            SlotRole::Accent => self.accent.to_hex(),
            SlotRole::AccentHover => self.hover.to_hex(),
            SlotRole::Contrast => self.contrast.to_string(),
        }
    }

    /// Every slot filled from this palette.
    #[must_use]
    pub fn slot_values(&self) -> BTreeMap<String, String> {
        ColorSlot::ALL
            .iter()
            .map(|slot| (slot.key().to_string(), self.value_for(*slot)))
            .collect()
    }

    /// The palette as a color set.
    #[must_use]
    pub fn to_color_set(&self) -> ColorSet {
        ColorSet::from_entries(self.slot_values())
    }
}

/// Computes slot values from logos.
#[derive(Debug, Clone)]
pub struct ColorDeriver {
    defaults: BTreeMap<String, String>,
}

impl Default for ColorDeriver {
    fn default() -> Self {
        Self::new(BTreeMap::new())
    }
}

impl ColorDeriver {
    /// Creates a deriver restoring `defaults` when there is no logo.
    ///
    /// Slots missing from `defaults` reset to an empty string.
    #[must_use]
    pub fn new(defaults: BTreeMap<String, String>) -> Self {
        let defaults = ColorSlot::ALL
            .iter()
            .map(|slot| {
                let value = defaults.get(slot.key()).cloned().unwrap_or_default();
                (slot.key().to_string(), value)
            })
            .collect();
        Self { defaults }
    }

    /// Slot values for a logo, or the defaults table when there is none.
    ///
    /// An empty buffer counts as no logo. The result always holds all 17
    /// slots; empty strings mean "clear this slot".
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::ImageDecode`] when the logo cannot be sampled.
    pub fn derive(&self, logo: Option<&[u8]>) -> Result<BTreeMap<String, String>> {
        match logo {
            Some(bytes) if !bytes.is_empty() => Ok(self.palette(bytes)?.slot_values()),
            _ => {
                debug!("No logo, restoring default colors");
                Ok(self.defaults.clone())
            }
        }
    }

    /// Samples a logo and derives its palette.
    pub fn palette(&self, logo: &[u8]) -> Result<Palette> {
        let accent = logo::average_color(logo)?;
        let palette = Palette::from_accent(accent);
        debug!(
            accent = %palette.accent.to_hex(),
            hover = %palette.hover.to_hex(),
            contrast = palette.contrast,
            "Derived palette from logo"
        );
        Ok(palette)
    }

    /// The defaults table with all 17 slots.
    #[must_use]
    pub fn defaults(&self) -> &BTreeMap<String, String> {
        &self.defaults
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Error;

    fn sweep() -> impl Iterator<Item = NormalizedRgb> {
        let steps: Vec<f64> = (0..=20).map(|i| f64::from(i) / 20.0).collect();
        let mut colors = Vec::new();
        for r in &steps {
            for g in &steps {
                for b in &steps {
                    colors.push(NormalizedRgb::new(*r, *g, *b));
                }
            }
        }
        colors.into_iter()
    }

    #[test]
    fn test_light_gray_scenario() {
        let palette = Palette::from_accent(NormalizedRgb::new(0.8, 0.8, 0.8));
        assert_eq!(palette.accent.to_hex(), "#cccccc");
        assert_eq!(palette.hover.to_hex(), "#b3b3b3");
        assert_eq!(palette.contrast, "#000");

        let values = palette.slot_values();
        assert_eq!(values["navbar-background"], "#cccccc");
        assert_eq!(values["navbar-background-hover"], "#b3b3b3");
        assert_eq!(values["navbar-text"], "#000");
        assert_eq!(values["primary-button-text"], "#000");
        assert_eq!(values["primary-button-border"], "#000");
        assert_eq!(values["general-link"], "#cccccc");
        assert_eq!(values["discuss-active"], "#cccccc");
    }

    #[test]
    fn test_dark_accent_gets_white_text() {
        let palette = Palette::from_accent(NormalizedRgb::new(0.1, 0.2, 0.4));
        assert_eq!(palette.contrast, "#fff");
    }

    #[test]
    fn test_contrast_matches_luminance_everywhere() {
        for accent in sweep() {
            let palette = Palette::from_accent(accent);
            let expected = if accent.inverse_luminance() < 0.5 {
                "#000"
            } else {
                "#fff"
            };
            for slot in ColorSlot::ALL {
                if slot.role() == SlotRole::Contrast {
                    assert_eq!(palette.value_for(slot), expected, "{accent:?}");
                }
            }
        }
    }

    #[test]
    fn test_hover_never_lighter() {
        for accent in sweep() {
            let palette = Palette::from_accent(accent);
            let base = accent.lightness();
            let hover = palette.hover.lightness();
            assert!(hover <= base + 1e-9, "{accent:?}: {hover} > {base}");
            assert!((hover - (base - HOVER_DARKEN).max(0.0)).abs() < 1e-9);
        }
    }

    #[test]
    fn test_every_slot_filled() {
        let values = Palette::from_accent(NormalizedRgb::new(0.3, 0.6, 0.9)).slot_values();
        assert_eq!(values.len(), 17);
        assert!(values.values().all(|v| !v.is_empty()));
    }

    #[test]
    fn test_no_logo_restores_defaults() {
        let mut defaults = BTreeMap::new();
        defaults.insert("navbar-text".to_string(), "#ffffff".to_string());
        let deriver = ColorDeriver::new(defaults);

        for logo in [None, Some(&[][..])] {
            let values = deriver.derive(logo).unwrap();
            assert_eq!(values.len(), 17);
            assert_eq!(values["navbar-text"], "#ffffff");
            assert_eq!(values["navbar-background"], "");
        }
    }

    #[test]
    fn test_bad_logo_propagates() {
        let err = ColorDeriver::default()
            .derive(Some(b"\x89PNG broken"))
            .unwrap_err();
        assert!(matches!(err, Error::ImageDecode { .. }));
    }
}
