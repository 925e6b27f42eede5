//! Company management CLI commands.

use clap::{Args, Subcommand};
use serde::Serialize;
use std::collections::BTreeMap;
use std::path::PathBuf;

use crate::cli::common::{
    parse_company_id, print_json, read_logo, CliContext, CliResult, CliService,
};
use crate::models::{ColorSlot, Company, CompanyId, CompanyWrite, NewCompany, WriteOptions};

/// Company management commands
#[derive(Args, Debug)]
pub struct CompanyArgs {
    #[command(subcommand)]
    command: CompanyCommand,
}

#[derive(Subcommand, Debug)]
enum CompanyCommand {
    /// Create a company and publish its stylesheet
    Create(CreateArgs),
    /// List companies
    List(ListArgs),
    /// Show a company and its colors
    Show(ShowArgs),
    /// Rename a company
    Rename(RenameArgs),
    /// Set a company logo and recompute its colors
    SetLogo(SetLogoArgs),
    /// Remove a company logo and restore the default colors
    ClearLogo(ClearLogoArgs),
    /// Set a single color slot
    SetColor(SetColorArgs),
    /// Delete a company and its stylesheet
    Delete(DeleteArgs),
}

/// Create a company
#[derive(Args, Debug)]
pub struct CreateArgs {
    /// Company name
    #[arg(long)]
    name: String,

    /// Logo image file
    #[arg(long, value_name = "FILE")]
    logo: Option<PathBuf>,

    /// Output as JSON
    #[arg(long)]
    json: bool,
}

/// List companies
#[derive(Args, Debug)]
pub struct ListArgs {
    /// Output as JSON
    #[arg(long)]
    json: bool,
}

/// Show a company
#[derive(Args, Debug)]
pub struct ShowArgs {
    /// Company id
    #[arg(long, value_parser = parse_company_id)]
    id: CompanyId,

    /// Output as JSON
    #[arg(long)]
    json: bool,
}

/// Rename a company
#[derive(Args, Debug)]
pub struct RenameArgs {
    /// Company id
    #[arg(long, value_parser = parse_company_id)]
    id: CompanyId,

    /// New name
    #[arg(long)]
    name: String,
}

/// Set a company logo
#[derive(Args, Debug)]
pub struct SetLogoArgs {
    /// Company id
    #[arg(long, value_parser = parse_company_id)]
    id: CompanyId,

    /// Logo image file
    #[arg(long, value_name = "FILE")]
    logo: PathBuf,

    /// Store the logo without recomputing colors or republishing
    #[arg(long)]
    no_sync: bool,
}

/// Remove a company logo
#[derive(Args, Debug)]
pub struct ClearLogoArgs {
    /// Company id
    #[arg(long, value_parser = parse_company_id)]
    id: CompanyId,

    /// Remove the logo without restoring defaults or republishing
    #[arg(long)]
    no_sync: bool,
}

/// Set a color slot
#[derive(Args, Debug)]
pub struct SetColorArgs {
    /// Company id
    #[arg(long, value_parser = parse_company_id)]
    id: CompanyId,

    /// Slot name, e.g. navbar-background
    #[arg(long, value_parser = parse_slot)]
    slot: ColorSlot,

    /// Hex color (#rgb or #rrggbb); empty clears the slot
    #[arg(long, allow_hyphen_values = true)]
    value: String,

    /// Store the color without republishing the stylesheet
    #[arg(long)]
    no_sync: bool,
}

/// Delete a company
#[derive(Args, Debug)]
pub struct DeleteArgs {
    /// Company id
    #[arg(long, value_parser = parse_company_id)]
    id: CompanyId,
}

fn parse_slot(raw: &str) -> Result<ColorSlot, String> {
    raw.parse::<ColorSlot>().map_err(|e| e.to_string())
}

const fn write_options(no_sync: bool) -> WriteOptions {
    WriteOptions {
        bypass_colors: no_sync,
    }
}

/// JSON view of a company
#[derive(Serialize, Debug)]
struct CompanyOutput {
    id: CompanyId,
    name: String,
    has_logo: bool,
    stylesheet_url: String,
    colors: BTreeMap<String, String>,
}

impl CompanyOutput {
    fn new(service: &CliService, company: &Company) -> Self {
        Self {
            id: company.id,
            name: company.name.clone(),
            has_logo: company.has_logo(),
            stylesheet_url: service.publisher().resource_url_for(company.id),
            colors: company
                .colors
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        }
    }
}

impl CompanyArgs {
    /// Execute company subcommand
    pub fn execute(&self, ctx: &CliContext) -> CliResult<()> {
        let mut service = ctx.service()?;
        match &self.command {
            CompanyCommand::Create(args) => args.execute(&mut service),
            CompanyCommand::List(args) => args.execute(&service),
            CompanyCommand::Show(args) => args.execute(&service),
            CompanyCommand::Rename(args) => args.execute(&mut service),
            CompanyCommand::SetLogo(args) => args.execute(&mut service),
            CompanyCommand::ClearLogo(args) => args.execute(&mut service),
            CompanyCommand::SetColor(args) => args.execute(&mut service),
            CompanyCommand::Delete(args) => args.execute(&mut service),
        }
    }
}

impl CreateArgs {
    fn execute(&self, service: &mut CliService) -> CliResult<()> {
        let mut new = NewCompany::named(self.name.clone());
        if let Some(path) = &self.logo {
            new = new.with_logo(read_logo(path)?);
        }
        let company = service.create(new)?;

        if self.json {
            return print_json(&CompanyOutput::new(service, &company));
        }
        println!("Created company {} ({})", company.id, company.name);
        println!("Stylesheet: {}", service.publisher().resource_url_for(company.id));
        Ok(())
    }
}

impl ListArgs {
    fn execute(&self, service: &CliService) -> CliResult<()> {
        let companies = service.companies()?;

        if self.json {
            let output: Vec<CompanyOutput> = companies
                .iter()
                .map(|company| CompanyOutput::new(service, company))
                .collect();
            return print_json(&output);
        }

        if companies.is_empty() {
            println!("No companies.");
            return Ok(());
        }
        for company in &companies {
            let logo = if company.has_logo() { "logo" } else { "no logo" };
            println!(
                "{:>4}  {:<30} {:>2} colors, {logo}",
                company.id.0,
                company.name,
                company.colors.len()
            );
        }
        Ok(())
    }
}

impl ShowArgs {
    fn execute(&self, service: &CliService) -> CliResult<()> {
        let company = service.company(self.id)?;

        if self.json {
            return print_json(&CompanyOutput::new(service, &company));
        }

        println!("Company {}: {}", company.id, company.name);
        println!("Logo: {}", if company.has_logo() { "set" } else { "none" });
        println!("Stylesheet: {}", service.publisher().resource_url_for(company.id));
        println!();
        println!("Colors:");
        for slot in ColorSlot::ALL {
            let value = company.colors.get(slot).unwrap_or("-");
            println!("  {:<26} {value}", slot.key());
        }
        Ok(())
    }
}

impl RenameArgs {
    fn execute(&self, service: &mut CliService) -> CliResult<()> {
        let company = service.write(
            self.id,
            CompanyWrite::new().name(self.name.clone()),
            WriteOptions::default(),
        )?;
        println!("Renamed company {} to {}", company.id, company.name);
        Ok(())
    }
}

impl SetLogoArgs {
    fn execute(&self, service: &mut CliService) -> CliResult<()> {
        let logo = read_logo(&self.logo)?;
        let company = service.write(
            self.id,
            CompanyWrite::new().logo(logo),
            write_options(self.no_sync),
        )?;
        println!("Updated logo for company {}", company.id);
        if let Some(accent) = company.colors.get(ColorSlot::NavbarBackground) {
            println!("Accent: {accent}");
        }
        Ok(())
    }
}

impl ClearLogoArgs {
    fn execute(&self, service: &mut CliService) -> CliResult<()> {
        let company = service.write(
            self.id,
            CompanyWrite::new().clear_logo(),
            write_options(self.no_sync),
        )?;
        println!("Removed logo for company {}", company.id);
        Ok(())
    }
}

impl SetColorArgs {
    fn execute(&self, service: &mut CliService) -> CliResult<()> {
        let company = service.write(
            self.id,
            CompanyWrite::new().color(self.slot, self.value.clone()),
            write_options(self.no_sync),
        )?;
        match company.colors.get(self.slot) {
            Some(value) => println!("Set {} = {value} for company {}", self.slot, company.id),
            None => println!("Cleared {} for company {}", self.slot, company.id),
        }
        Ok(())
    }
}

impl DeleteArgs {
    fn execute(&self, service: &mut CliService) -> CliResult<()> {
        let company = service.unlink(self.id)?;
        println!("Deleted company {} ({})", company.id, company.name);
        Ok(())
    }
}
