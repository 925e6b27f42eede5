//! Service layer for business logic.
//!
//! This module contains the color derivation, stylesheet publishing and the
//! company lifecycle that coordinates both with the stores.

pub mod companies;
pub mod deriver;
pub mod publisher;

// Re-export commonly used types
pub use companies::CompanyService;
pub use deriver::{ColorDeriver, Palette};
pub use publisher::StylesheetPublisher;
