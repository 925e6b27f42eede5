//! Configuration management CLI commands.

use crate::cli::common::{print_json, CliError, CliResult};
use crate::config::Config;
use crate::constants::APP_NAME;
use crate::models::ColorSlot;
use clap::{Args, Subcommand};
use serde::Serialize;
use std::collections::BTreeMap;
use std::path::PathBuf;

/// Configuration management commands
#[derive(Args, Debug)]
pub struct ConfigArgs {
    #[command(subcommand)]
    command: ConfigCommand,
}

#[derive(Subcommand, Debug)]
enum ConfigCommand {
    /// Display current configuration
    Show(ConfigShowArgs),
    /// Set configuration values
    Set(ConfigSetArgs),
}

/// Display current configuration
#[derive(Args, Debug)]
pub struct ConfigShowArgs {
    /// Output as JSON
    #[arg(long)]
    json: bool,
}

/// Set configuration values
#[derive(Args, Debug)]
pub struct ConfigSetArgs {
    /// Directory holding the company store
    #[arg(long, value_name = "DIR")]
    store_dir: Option<PathBuf>,

    /// URL prefix for published stylesheets (must start and end with '/')
    #[arg(long, value_name = "URL")]
    url_base: Option<String>,

    /// Default color for a slot when no logo is set, as SLOT=HEX
    #[arg(long = "default", value_name = "SLOT=HEX", value_parser = parse_default)]
    defaults: Vec<(String, String)>,
}

fn parse_default(raw: &str) -> Result<(String, String), String> {
    let (slot, value) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected SLOT=HEX, got '{raw}'"))?;
    Ok((slot.trim().to_string(), value.trim().to_string()))
}

/// JSON-serializable configuration for output
#[derive(Serialize, Debug)]
struct ConfigOutput {
    config_file: String,
    paths: PathsOutput,
    publish: PublishOutput,
    defaults: BTreeMap<String, String>,
}

#[derive(Serialize, Debug)]
struct PathsOutput {
    store_dir: String,
}

#[derive(Serialize, Debug)]
struct PublishOutput {
    url_base: String,
}

impl ConfigArgs {
    /// Execute config subcommand
    pub fn execute(&self) -> CliResult<()> {
        match &self.command {
            ConfigCommand::Show(args) => args.execute(),
            ConfigCommand::Set(args) => args.execute(),
        }
    }
}

impl ConfigShowArgs {
    /// Execute show command
    pub fn execute(&self) -> CliResult<()> {
        let config = Config::load()
            .map_err(|e| CliError::validation(format!("Failed to load configuration: {e:#}")))?;

        if self.json {
            output_json(&config)
        } else {
            output_human_readable(&config);
            Ok(())
        }
    }
}

impl ConfigSetArgs {
    /// Execute set command
    pub fn execute(&self) -> CliResult<()> {
        if self.store_dir.is_none() && self.url_base.is_none() && self.defaults.is_empty() {
            return Err(CliError::validation(
                "At least one configuration option must be specified: --store-dir, --url-base, or --default",
            ));
        }

        let mut config = Config::load()
            .map_err(|e| CliError::validation(format!("Failed to load configuration: {e:#}")))?;

        if let Some(path) = &self.store_dir {
            std::fs::create_dir_all(path).map_err(|e| {
                CliError::io(format!(
                    "Failed to create store directory {}: {e}",
                    path.display()
                ))
            })?;
            config.paths.store_dir.clone_from(path);
        }

        if let Some(url_base) = &self.url_base {
            config.publish.url_base.clone_from(url_base);
        }

        for (slot, value) in &self.defaults {
            config.defaults.insert(slot.clone(), value.clone());
        }

        config
            .validate()
            .map_err(|e| CliError::validation(format!("Invalid configuration: {e:#}")))?;
        config
            .save()
            .map_err(|e| CliError::io(format!("Failed to save configuration: {e:#}")))?;

        println!("Configuration updated successfully.");
        Ok(())
    }
}

fn config_file_display() -> String {
    Config::config_file_path()
        .map(|p| p.display().to_string())
        .unwrap_or_else(|_| "(unavailable)".to_string())
}

/// Output configuration in JSON format
fn output_json(config: &Config) -> CliResult<()> {
    print_json(&ConfigOutput {
        config_file: config_file_display(),
        paths: PathsOutput {
            store_dir: config.paths.store_dir.to_string_lossy().to_string(),
        },
        publish: PublishOutput {
            url_base: config.publish.url_base.clone(),
        },
        defaults: config.default_slot_values(),
    })
}

/// Output configuration in human-readable format
fn output_human_readable(config: &Config) {
    let title = format!("{APP_NAME} Configuration");
    println!("{title}");
    println!("{}", "=".repeat(title.len()));
    println!();
    println!("Config file: {}", config_file_display());
    println!();

    println!("Paths:");
    println!("  Store Directory: {}", config.paths.store_dir.display());
    println!();

    println!("Publish:");
    println!("  URL Base: {}", config.publish.url_base);
    println!();

    println!("Defaults:");
    for slot in ColorSlot::ALL {
        match config.defaults.get(slot.key()).filter(|v| !v.is_empty()) {
            Some(value) => println!("  {:<26} {value}", slot.key()),
            None => println!("  {:<26} (unset)", slot.key()),
        }
    }
    println!();
}
