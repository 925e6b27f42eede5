//! Palette preview for a logo file, without touching any company.

use clap::Args;
use serde::Serialize;
use std::collections::BTreeMap;
use std::path::PathBuf;

use crate::cli::common::{print_json, read_logo, CliContext, CliResult};
use crate::models::ColorSlot;
use crate::services::ColorDeriver;

/// Derive colors from a logo file
#[derive(Debug, Clone, Args)]
pub struct DeriveArgs {
    /// Logo image file (PNG, JPEG, GIF, BMP, WebP, or base64 text of one)
    #[arg(short, long, value_name = "FILE")]
    pub logo: PathBuf,

    /// Output results as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, Serialize)]
struct DeriveOutput {
    accent: String,
    hover: String,
    contrast: String,
    colors: BTreeMap<String, String>,
}

impl DeriveArgs {
    /// Execute the derive command
    pub fn execute(&self, ctx: &CliContext) -> CliResult<()> {
        let logo = read_logo(&self.logo)?;
        let deriver = ColorDeriver::new(ctx.config.default_slot_values());
        let palette = deriver.palette(&logo)?;

        if self.json {
            return print_json(&DeriveOutput {
                accent: palette.accent.to_hex(),
                hover: palette.hover.to_hex(),
                contrast: palette.contrast.to_string(),
                colors: palette.slot_values(),
            });
        }

        println!("Accent:   {}", palette.accent.to_hex());
        println!("Hover:    {}", palette.hover.to_hex());
        println!("Contrast: {}", palette.contrast);
        println!();
        for slot in ColorSlot::ALL {
            println!("  {:<26} {}", slot.key(), palette.value_for(slot));
        }
        Ok(())
    }
}
