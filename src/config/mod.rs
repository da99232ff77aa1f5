pub mod toml_config;

pub use toml_config::TomlConfig;

use crate::core::ConfigProvider;
use crate::utils::error::Result;
use crate::utils::validation::{
    validate_database_url, validate_path, validate_positive_number, validate_required_field,
    Validate,
};
use clap::Parser;

/// Default number of rows fetched per cursor read. Larger pages mean fewer
/// round trips at the cost of a bigger per-page batch in memory.
pub const DEFAULT_PAGE_SIZE: usize = 1000;

#[derive(Debug, Clone, Parser)]
#[command(name = "services-export")]
#[command(about = "Exports the services table as grouped catalog JSON views")]
pub struct CliConfig {
    /// Postgres connection URL for the services database.
    #[arg(long)]
    pub database_url: Option<String>,

    #[arg(long, default_value = "./output")]
    pub output_path: String,

    /// Rows fetched per cursor read.
    #[arg(long, default_value_t = DEFAULT_PAGE_SIZE)]
    pub page_size: usize,

    /// Load settings from a TOML file instead of flags.
    #[arg(long)]
    pub config: Option<String>,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Log as JSON (for scheduled runs)")]
    pub log_json: bool,
}

impl ConfigProvider for CliConfig {
    fn database_url(&self) -> &str {
        self.database_url.as_deref().unwrap_or_default()
    }

    fn output_path(&self) -> &str {
        &self.output_path
    }

    fn page_size(&self) -> usize {
        self.page_size
    }
}

impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        let database_url = validate_required_field("database_url", &self.database_url)?;
        validate_database_url("database_url", database_url)?;
        validate_path("output_path", &self.output_path)?;
        validate_positive_number("page_size", self.page_size, 1)?;
        Ok(())
    }
}
