//! Application-wide constants.
//!
//! This module defines the application name, the default publishing location
//! and the fixed content used for companies that never had colors.

/// The display name of the application (human-readable, with proper capitalization).
pub const APP_NAME: &str = "Company Colors";

/// The binary name of the application (used in command examples, lowercase with hyphens).
pub const APP_BINARY_NAME: &str = "company-colors";

/// Directory name used under the platform config directory.
pub const CONFIG_DIR_NAME: &str = "CompanyColors";

/// Environment variable that overrides the config directory.
pub const CONFIG_DIR_ENV: &str = "COMPANY_COLORS_CONFIG_DIR";

/// Default static base path under which generated stylesheets are published.
pub const DEFAULT_URL_BASE: &str = "/web_company_color/static/src/scss/";

/// Mimetype of every published stylesheet.
pub const SCSS_MIMETYPE: &str = "text/scss";

/// Content published for a company whose color set is empty.
///
/// The attachment layer refuses empty files, so untouched companies still get a
/// comment-only stylesheet.
pub const PLACEHOLDER_CONTENT: &str = "// No Web Company Color SCSS Content\n";
