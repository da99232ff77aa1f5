pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

pub use crate::adapters::{LocalSink, PgServiceSource};
pub use crate::config::{CliConfig, TomlConfig, DEFAULT_PAGE_SIZE};
pub use crate::core::export::{ExportEngine, ExportSummary, COMPACT_SLOT, EXTENDED_SLOT};
pub use crate::utils::error::{ExportError, Result};
