//! Named color slots and the color set value object.
//!
//! A [`ColorSet`] maps slot names to hex strings. The 17 [`ColorSlot`]s form
//! the stable schema rendered into the stylesheet; any other key is carried
//! along untouched so callers can extend the template context.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use super::RgbColor;
use crate::error::{Error, Result};

/// How a slot is filled when colors are derived from a logo.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SlotRole {
    /// Receives the accent color.
    Accent,
    /// Receives the darker hover variant of the accent color.
    AccentHover,
    /// Receives the black/white color drawn on top of the accent.
    Contrast,
}

/// One named position in the color set schema.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ColorSlot {
    /// Main navigation bar background
    NavbarBackground,
    /// Main navigation bar background on hover/focus/active
    NavbarBackgroundHover,
    /// Main navigation bar text
    NavbarText,
    /// Primary button background
    PrimaryButtonBackground,
    /// Primary button text
    PrimaryButtonText,
    /// Primary button border
    PrimaryButtonBorder,
    /// Link-styled button text
    LinkButtonText,
    /// Form horizontal separator text
    FormSeparator,
    /// Form URI text
    FormUri,
    /// Stat button icon
    StatusIcon,
    /// Stat button value
    StatusValue,
    /// Plain anchors
    GeneralLink,
    /// Chat window header background
    ChatHeader,
    /// Last notification date in chat
    ChatLastNotification,
    /// Many2one external button
    ExternalModelButton,
    /// Search facet label background
    SearchFilter,
    /// Active discuss sidebar item indicator
    DiscussActive,
}

impl ColorSlot {
    /// Every slot, in stylesheet order.
    pub const ALL: [ColorSlot; 17] = [
        Self::NavbarBackground,
        Self::NavbarBackgroundHover,
        Self::NavbarText,
        Self::PrimaryButtonBackground,
        Self::PrimaryButtonText,
        Self::PrimaryButtonBorder,
        Self::LinkButtonText,
        Self::FormSeparator,
        Self::FormUri,
        Self::StatusIcon,
        Self::StatusValue,
        Self::GeneralLink,
        Self::ChatHeader,
        Self::ChatLastNotification,
        Self::ExternalModelButton,
        Self::SearchFilter,
        Self::DiscussActive,
    ];

    /// Key used in color sets, config files and template placeholders.
    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            Self::NavbarBackground => "navbar-background",
            Self::NavbarBackgroundHover => "navbar-background-hover",
            Self::NavbarText => "navbar-text",
            Self::PrimaryButtonBackground => "primary-button-background",
            Self::PrimaryButtonText => "primary-button-text",
            Self::PrimaryButtonBorder => "primary-button-border",
            Self::LinkButtonText => "link-button-text",
            Self::FormSeparator => "form-separator",
            Self::FormUri => "form-uri",
            Self::StatusIcon => "status-icon",
            Self::StatusValue => "status-value",
            Self::GeneralLink => "general-link",
            Self::ChatHeader => "chat-header",
            Self::ChatLastNotification => "chat-last-notification",
            Self::ExternalModelButton => "external-model-button",
            Self::SearchFilter => "search-filter",
            Self::DiscussActive => "discuss-active",
        }
    }

    /// Human-readable label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::NavbarBackground => "Navbar Background Color",
            Self::NavbarBackgroundHover => "Navbar Background Color Hover",
            Self::NavbarText => "Navbar Text Color",
            Self::PrimaryButtonBackground => "Primary Button Background Color",
            Self::PrimaryButtonText => "Primary Button Text Color",
            Self::PrimaryButtonBorder => "Primary Button Border Color",
            Self::LinkButtonText => "Link Button Text Color",
            Self::FormSeparator => "Form Horizontal Separator Text Color",
            Self::FormUri => "Form Uri Text Color",
            Self::StatusIcon => "Status Button Icon Color",
            Self::StatusValue => "Status Button Value Color",
            Self::GeneralLink => "General Links Color",
            Self::ChatHeader => "Chat Header Color",
            Self::ChatLastNotification => "Chat Last Notification Color",
            Self::ExternalModelButton => "External Model Button Color",
            Self::SearchFilter => "Search Filter Color",
            Self::DiscussActive => "Discuss Active Page Color",
        }
    }

    /// Role of the slot during logo derivation.
    #[must_use]
    pub const fn role(self) -> SlotRole {
        match self {
            Self::NavbarBackgroundHover => SlotRole::AccentHover,
            Self::NavbarText | Self::PrimaryButtonText | Self::PrimaryButtonBorder => {
                SlotRole::Contrast
            }
            _ => SlotRole::Accent,
        }
    }

    /// Looks up a slot by its key.
    #[must_use]
    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|slot| slot.key() == key)
    }
}

impl fmt::Display for ColorSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for ColorSlot {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_key(s).ok_or_else(|| Error::UnknownSlot { key: s.to_string() })
    }
}

/// Sparse mapping from slot keys to hex colors.
///
/// Empty values are never stored: assigning `""` removes the key, so a
/// company whose colors were all reset has an empty set.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ColorSet {
    values: BTreeMap<String, String>,
}

impl ColorSet {
    /// Creates an empty color set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// True when no key holds a value.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Number of stored keys.
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Value of a slot, if set.
    #[must_use]
    pub fn get(&self, slot: ColorSlot) -> Option<&str> {
        self.get_key(slot.key())
    }

    /// Value of an arbitrary key, if set.
    #[must_use]
    pub fn get_key(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }

    /// Sets a slot. An empty value clears it.
    pub fn set(&mut self, slot: ColorSlot, value: impl Into<String>) {
        self.set_key(slot.key(), value);
    }

    /// Sets an arbitrary key. An empty value clears it.
    pub fn set_key(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        let value = value.into();
        if value.is_empty() {
            self.values.remove(&key);
        } else {
            self.values.insert(key, value);
        }
    }

    /// Applies every entry of `other` on top of this set.
    ///
    /// Empty values in `other` clear the matching key here.
    pub fn merge(&mut self, other: &BTreeMap<String, String>) {
        for (key, value) in other {
            self.set_key(key.clone(), value.clone());
        }
    }

    /// Iterates over stored `(key, value)` pairs in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Expands the set into the full template context.
    ///
    /// Every one of the 17 slots is present, holding its value or an empty
    /// string. Extra keys pass through unchanged.
    #[must_use]
    pub fn sanitized(&self) -> BTreeMap<String, String> {
        let mut values = self.values.clone();
        for slot in ColorSlot::ALL {
            values.entry(slot.key().to_string()).or_default();
        }
        values
    }

    /// Checks that every schema slot holds an empty string or a hex color.
    ///
    /// Keys outside the schema are not checked.
    pub fn validate(&self) -> Result<()> {
        validate_entries(self.iter())
    }

    /// Builds a set from `(key, value)` pairs, dropping empty values.
    pub fn from_entries<K, V, I>(entries: I) -> Self
    where
        K: Into<String>,
        V: Into<String>,
        I: IntoIterator<Item = (K, V)>,
    {
        let mut set = Self::new();
        for (key, value) in entries {
            set.set_key(key, value);
        }
        set
    }
}

/// Checks schema slot values in a sequence of `(key, value)` pairs.
pub fn validate_entries<'a>(entries: impl IntoIterator<Item = (&'a str, &'a str)>) -> Result<()> {
    for (key, value) in entries {
        if value.is_empty() || ColorSlot::from_key(key).is_none() {
            continue;
        }
        if RgbColor::from_hex(value).is_err() {
            return Err(Error::InvalidColor {
                slot: key.to_string(),
                value: value.to_string(),
            });
        }
    }
    Ok(())
}
