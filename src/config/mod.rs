pub mod draft_file;
pub mod toml_config;

#[cfg(feature = "cli")]
use crate::utils::error::Result;
#[cfg(feature = "cli")]
use crate::utils::validation::{validate_non_empty_string, validate_path, Validate};
#[cfg(feature = "cli")]
use clap::Parser;

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Parser)]
#[command(name = "room-booking")]
#[command(about = "Fill in, validate and submit a room booking from a TOML draft")]
pub struct CliConfig {
    /// Path to the booking draft (TOML)
    #[arg(short, long)]
    pub draft: String,

    /// Path to the application config (TOML)
    #[arg(short, long)]
    pub config: Option<String>,

    /// Calendar link to start from, overrides `slot` in the draft
    #[arg(long)]
    pub slot: Option<String>,

    /// Override the output directory of the JSON sink
    #[arg(long)]
    pub output_path: Option<String>,

    /// Validate only, do not submit
    #[arg(long)]
    pub dry_run: bool,

    /// Emit logs as JSON
    #[arg(long)]
    pub json_logs: bool,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,
}

#[cfg(feature = "cli")]
impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        validate_path("draft", &self.draft)?;
        if let Some(config) = &self.config {
            validate_path("config", config)?;
        }
        if let Some(slot) = &self.slot {
            validate_non_empty_string("slot", slot)?;
        }
        if let Some(output_path) = &self.output_path {
            validate_path("output_path", output_path)?;
        }
        Ok(())
    }
}
