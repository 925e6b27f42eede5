//! Shared CLI plumbing: error type, exit codes and command context.

use std::fmt;
use std::path::{Path, PathBuf};

use crate::config::Config;
use crate::models::CompanyId;
use crate::services::CompanyService;
use crate::storage::{FsStore, NoopCache};

/// Process exit codes used by every command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitCode {
    /// Command succeeded
    Success = 0,
    /// Bad input: arguments, colors, logos, configuration
    ValidationError = 1,
    /// Reading or writing files failed
    IoError = 2,
    /// The requested company or stylesheet does not exist
    NotFound = 3,
}

impl ExitCode {
    /// Numeric process exit code.
    #[must_use]
    pub const fn code(self) -> i32 {
        self as i32
    }
}

/// Error reported by a CLI command.
#[derive(Debug, Clone)]
pub struct CliError {
    /// Exit code the process terminates with
    pub exit_code: ExitCode,
    /// Message printed to stderr
    pub message: String,
}

/// Result type for CLI commands.
pub type CliResult<T> = Result<T, CliError>;

impl CliError {
    /// Invalid input.
    pub fn validation(message: impl Into<String>) -> Self {
        Self {
            exit_code: ExitCode::ValidationError,
            message: message.into(),
        }
    }

    /// File system failure.
    pub fn io(message: impl Into<String>) -> Self {
        Self {
            exit_code: ExitCode::IoError,
            message: message.into(),
        }
    }

    /// Missing record.
    pub fn not_found(message: impl Into<String>) -> Self {
        Self {
            exit_code: ExitCode::NotFound,
            message: message.into(),
        }
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for CliError {}

impl From<crate::Error> for CliError {
    fn from(err: crate::Error) -> Self {
        match err {
            crate::Error::CompanyNotFound { .. } => Self::not_found(err.to_string()),
            crate::Error::Storage(_) => Self::io(err.to_string()),
            crate::Error::ImageDecode { .. }
            | crate::Error::TemplateKey { .. }
            | crate::Error::InvalidColor { .. }
            | crate::Error::UnknownSlot { .. } => Self::validation(err.to_string()),
        }
    }
}

/// Service type every company command operates on.
pub type CliService = CompanyService<FsStore, NoopCache>;

/// Configuration and store location shared by all commands.
#[derive(Debug, Clone)]
pub struct CliContext {
    /// Loaded configuration
    pub config: Config,
    /// Store directory in effect (config value or `--store` override)
    pub store_dir: PathBuf,
}

impl CliContext {
    /// Loads the configuration and applies the store override.
    pub fn load(store_override: Option<PathBuf>) -> CliResult<Self> {
        let config = Config::load()
            .map_err(|e| CliError::validation(format!("Failed to load configuration: {e:#}")))?;
        let store_dir = store_override.unwrap_or_else(|| config.paths.store_dir.clone());
        Ok(Self { config, store_dir })
    }

    /// Opens the store and wires up the company service.
    pub fn service(&self) -> CliResult<CliService> {
        let store = FsStore::open(&self.store_dir).map_err(|e| {
            CliError::io(format!(
                "Failed to open store at {}: {e}",
                self.store_dir.display()
            ))
        })?;
        Ok(CompanyService::from_config(&self.config, store, NoopCache))
    }
}

/// Reads a logo file.
pub fn read_logo(path: &Path) -> CliResult<Vec<u8>> {
    std::fs::read(path)
        .map_err(|e| CliError::io(format!("Failed to read logo {}: {e}", path.display())))
}

/// Parses a company id argument.
pub fn parse_company_id(raw: &str) -> Result<CompanyId, String> {
    raw.parse()
        .map_err(|_| format!("'{raw}' is not a valid company id"))
}

/// Prints a value as pretty JSON.
pub fn print_json<T: serde::Serialize>(value: &T) -> CliResult<()> {
    let json = serde_json::to_string_pretty(value)
        .map_err(|e| CliError::io(format!("Failed to serialize output to JSON: {e}")))?;
    println!("{json}");
    Ok(())
}
