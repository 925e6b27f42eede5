//! Stylesheet CLI commands.

use clap::{Args, Subcommand};

use crate::cli::common::{parse_company_id, CliContext, CliError, CliResult};
use crate::constants::APP_BINARY_NAME;
use crate::models::CompanyId;

/// Stylesheet commands
#[derive(Args, Debug)]
pub struct StylesheetArgs {
    #[command(subcommand)]
    command: StylesheetCommand,
}

#[derive(Subcommand, Debug)]
enum StylesheetCommand {
    /// Render a company's stylesheet from its current colors
    Render(TargetArgs),
    /// Print the URL a company's stylesheet is published at
    Url(TargetArgs),
    /// Render and publish a company's stylesheet
    Publish(TargetArgs),
    /// Print the stylesheet currently published for a company
    Show(TargetArgs),
}

/// Company selection shared by stylesheet commands
#[derive(Args, Debug)]
pub struct TargetArgs {
    /// Company id
    #[arg(long, value_parser = parse_company_id)]
    id: CompanyId,
}

impl StylesheetArgs {
    /// Execute stylesheet subcommand
    pub fn execute(&self, ctx: &CliContext) -> CliResult<()> {
        let mut service = ctx.service()?;
        match &self.command {
            StylesheetCommand::Render(target) => {
                print!("{}", service.render(target.id)?);
            }
            StylesheetCommand::Url(target) => {
                service.company(target.id)?;
                println!("{}", service.publisher().resource_url_for(target.id));
            }
            StylesheetCommand::Publish(target) => {
                let handle = service.republish(target.id)?;
                let action = if handle.created { "Created" } else { "Updated" };
                println!("{action} {}", handle.url);
                println!("Checksum: {}", handle.checksum);
            }
            StylesheetCommand::Show(target) => {
                let attachment = service.stylesheet(target.id)?.ok_or_else(|| {
                    CliError::not_found(format!(
                        "No stylesheet published for company {id}; run `{APP_BINARY_NAME} stylesheet publish --id {id}`",
                        id = target.id
                    ))
                })?;
                print!("{}", attachment.text());
            }
        }
        Ok(())
    }
}
