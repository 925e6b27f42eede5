//! The company color stylesheet template and its strict interpolation.
//!
//! Placeholders are written `${slot-key}`. Rendering fails on the first
//! placeholder without a value instead of emitting partial CSS.

use regex::Regex;
use std::collections::BTreeMap;
use std::sync::OnceLock;

use crate::error::{Error, Result};

/// Stylesheet applied to every company; one placeholder per color slot.
pub const COMPANY_COLORS_TEMPLATE: &str = r#"
.o_main_navbar {
  background-color: ${navbar-background} !important;
  color: ${navbar-text} !important;

  > .o_menu_brand {
    color: ${navbar-text} !important;
    &:hover, &:focus, &:active, &:focus:active {
      background-color: ${navbar-background-hover} !important;
    }
  }

  .show {
    .dropdown-toggle {
      background-color: ${navbar-background-hover} !important;
    }
  }

  > ul {
    > li {
      > a, > label {
        color: ${navbar-text} !important;

        &:hover, &:focus, &:active, &:focus:active {
          background-color: ${navbar-background-hover} !important;
        }
      }
    }
  }
}
.btn-primary {
  background-color: ${primary-button-background} !important;
  color: ${primary-button-text} !important;
  border-color: ${primary-button-border} !important;
}
.btn-link {
  color: ${link-button-text} !important;
}
.o_form_view {
  .o_horizontal_separator {
    color: ${form-separator} !important;
  }
  .o_form_uri {
    > span {
      color: ${form-uri} !important;
    }
  }
  .oe_button_box {
    .oe_stat_button {
      .o_button_icon {
        color: ${status-icon} !important;
      }
    }
    .btn.oe_stat_button {
      > .o_stat_info {
        .o_stat_value {
          color: ${status-value} !important;
        }
      }
    }
  }
}
a {
  color: ${general-link} !important;
}
.o_ChatWindowHeader {
  background-color: ${chat-header} !important;
}
.o_NotificationGroup_date {
  color: ${chat-last-notification} !important;
}
.o_field_widget.o_field_many2one {
  .o_external_button {
    color: ${external-model-button} !important;
  }
}
.o_searchview {
  .o_searchview_facet {
    .o_searchview_facet_label {
      background-color: ${search-filter} !important;
    }
  }
}
.o_DiscussSidebarItem_activeIndicator.o-item-active {
  background-color: ${discuss-active} !important;
}
"#;

fn placeholder_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"\$\{([A-Za-z0-9_-]+)\}").expect("placeholder pattern is a valid regex")
    })
}

/// A stylesheet template with `${key}` placeholders.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StylesheetTemplate {
    source: &'static str,
}

impl Default for StylesheetTemplate {
    fn default() -> Self {
        Self::new(COMPANY_COLORS_TEMPLATE)
    }
}

impl StylesheetTemplate {
    /// Wraps a template source.
    #[must_use]
    pub const fn new(source: &'static str) -> Self {
        Self { source }
    }

    /// The raw template text.
    #[must_use]
    pub const fn source(&self) -> &'static str {
        self.source
    }

    /// Distinct placeholder keys in order of first appearance.
    #[must_use]
    pub fn placeholders(&self) -> Vec<&'static str> {
        let mut keys: Vec<&'static str> = Vec::new();
        for caps in placeholder_pattern().captures_iter(self.source) {
            if let Some(key) = caps.get(1).map(|m| m.as_str()) {
                if !keys.contains(&key) {
                    keys.push(key);
                }
            }
        }
        keys
    }

    /// Substitutes every placeholder with its value.
    ///
    /// # Errors
    ///
    /// Returns [`Error::TemplateKey`] naming the first placeholder missing from
    /// `values`.
    pub fn render(&self, values: &BTreeMap<String, String>) -> Result<String> {
        let mut output = String::with_capacity(self.source.len());
        let mut last = 0;

        for caps in placeholder_pattern().captures_iter(self.source) {
            let (Some(whole), Some(key)) = (caps.get(0), caps.get(1)) else {
                continue;
            };
            let value = values.get(key.as_str()).ok_or_else(|| Error::TemplateKey {
                key: key.as_str().to_string(),
            })?;
            output.push_str(&self.source[last..whole.start()]);
            output.push_str(value);
            last = whole.end();
        }

        output.push_str(&self.source[last..]);
        Ok(output)
    }
}
