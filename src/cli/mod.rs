//! CLI command handlers for Company Colors.
//!
//! Headless, scriptable access to color derivation, company management and
//! stylesheet publishing.

pub mod common;
pub mod company;
pub mod config;
pub mod derive;
pub mod stylesheet;

// Re-export types used by main.rs and tests
pub use common::{CliContext, CliError, CliResult, ExitCode};
pub use company::CompanyArgs;
pub use config::ConfigArgs;
pub use derive::DeriveArgs;
pub use stylesheet::StylesheetArgs;
