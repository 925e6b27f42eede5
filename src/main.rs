//! Company Colors - derive company UI colors from logos and publish stylesheets
//!
//! Command-line front end over the `company_colors` library.

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use company_colors::cli::{
    CliContext, CliResult, CompanyArgs, ConfigArgs, DeriveArgs, StylesheetArgs,
};

/// Company Colors - derive UI colors from a logo and publish the stylesheet
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Store directory (overrides [paths] store_dir)
    #[arg(long, global = true, value_name = "DIR")]
    store: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Preview the colors derived from a logo
    Derive(DeriveArgs),
    /// Manage companies
    Company(CompanyArgs),
    /// Render and publish stylesheets
    Stylesheet(StylesheetArgs),
    /// Manage configuration
    Config(ConfigArgs),
}

fn run(cli: Cli) -> CliResult<()> {
    match cli.command {
        Command::Config(args) => args.execute(),
        Command::Derive(args) => args.execute(&CliContext::load(cli.store)?),
        Command::Company(args) => args.execute(&CliContext::load(cli.store)?),
        Command::Stylesheet(args) => args.execute(&CliContext::load(cli.store)?),
    }
}

fn main() {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    if let Err(err) = run(cli) {
        eprintln!("Error: {err}");
        std::process::exit(err.exit_code.code());
    }
}
