//! SCSS generation for company colors.

pub mod template;

pub use template::{StylesheetTemplate, COMPANY_COLORS_TEMPLATE};
