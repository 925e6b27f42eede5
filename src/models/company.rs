//! Company records and the write payloads that update them.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use super::{ColorSet, ColorSlot};

/// Unique identifier of a company.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CompanyId(pub u64);

impl fmt::Display for CompanyId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for CompanyId {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim().parse().map(Self)
    }
}

/// The entity owning one color set and one published stylesheet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Company {
    /// Unique identifier
    pub id: CompanyId,
    /// Display name
    pub name: String,
    /// Raw logo image bytes, if any
    #[serde(default, with = "crate::storage::b64::option")]
    pub logo: Option<Vec<u8>>,
    /// Current colors
    #[serde(default)]
    pub colors: ColorSet,
}

impl Company {
    /// Creates a company without logo or colors.
    #[must_use]
    pub fn new(id: CompanyId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            logo: None,
            colors: ColorSet::new(),
        }
    }

    /// True when a non-empty logo is stored.
    #[must_use]
    pub fn has_logo(&self) -> bool {
        self.logo.as_ref().is_some_and(|logo| !logo.is_empty())
    }
}

/// Values for creating a company.
#[derive(Debug, Clone, Default)]
pub struct NewCompany {
    /// Display name
    pub name: String,
    /// Optional logo image bytes
    pub logo: Option<Vec<u8>>,
    /// Explicit colors, applied when no logo is given
    pub colors: BTreeMap<String, String>,
}

impl NewCompany {
    /// Starts a company with just a name.
    #[must_use]
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Attaches a logo.
    pub fn with_logo(mut self, logo: impl Into<Vec<u8>>) -> Self {
        self.logo = Some(logo.into());
        self
    }

    /// Sets one color slot.
    pub fn with_color(mut self, slot: ColorSlot, value: impl Into<String>) -> Self {
        self.colors.insert(slot.key().to_string(), value.into());
        self
    }
}

/// Partial update of a company.
///
/// `logo` distinguishes "not touched" (`None`) from "set" (`Some(Some(_))`)
/// and "removed" (`Some(None)`).
#[derive(Debug, Clone, Default)]
pub struct CompanyWrite {
    /// New display name
    pub name: Option<String>,
    /// Logo change
    pub logo: Option<Option<Vec<u8>>>,
    /// Color keys to assign; empty strings clear a key
    pub colors: BTreeMap<String, String>,
}

impl CompanyWrite {
    /// Creates an empty write.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Renames the company.
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Replaces the logo.
    pub fn logo(mut self, logo: impl Into<Vec<u8>>) -> Self {
        self.logo = Some(Some(logo.into()));
        self
    }

    /// Removes the logo.
    pub fn clear_logo(mut self) -> Self {
        self.logo = Some(None);
        self
    }

    /// Assigns one color slot.
    pub fn color(mut self, slot: ColorSlot, value: impl Into<String>) -> Self {
        self.colors.insert(slot.key().to_string(), value.into());
        self
    }

    /// Assigns an arbitrary color key, including keys outside the schema.
    pub fn color_key(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.colors.insert(key.into(), value.into());
        self
    }

    /// True when the write touches the logo.
    #[must_use]
    pub fn touches_logo(&self) -> bool {
        self.logo.is_some()
    }

    /// The new logo bytes, treating an empty buffer as removal.
    #[must_use]
    pub fn new_logo(&self) -> Option<&[u8]> {
        match &self.logo {
            Some(Some(bytes)) if !bytes.is_empty() => Some(bytes),
            _ => None,
        }
    }
}

/// Flags altering how a write is processed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WriteOptions {
    /// Skip recomputation and republishing; used for programmatic bulk writes.
    pub bypass_colors: bool,
}

impl WriteOptions {
    /// Options for a bulk write that leaves colors and stylesheet alone.
    #[must_use]
    pub const fn bypass() -> Self {
        Self {
            bypass_colors: true,
        }
    }
}
