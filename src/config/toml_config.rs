use crate::config::DEFAULT_PAGE_SIZE;
use crate::core::ConfigProvider;
use crate::utils::error::{ExportError, Result};
use crate::utils::validation::{
    validate_database_url, validate_path, validate_positive_number, Validate,
};
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TomlConfig {
    pub job: JobConfig,
    pub source: SourceConfig,
    pub load: LoadConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobConfig {
    pub name: String,
    pub description: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceConfig {
    pub database_url: String,
    pub page_size: Option<usize>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoadConfig {
    pub output_path: String,
}

impl TomlConfig {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(ExportError::IoError)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content);

        toml::from_str(&processed_content).map_err(|e| ExportError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// Replaces `${VAR_NAME}` placeholders with environment values;
    /// unset variables are left as-is.
    fn substitute_env_vars(content: &str) -> String {
        let re = regex::Regex::new(r"\$\{([^}]+)\}").unwrap();

        re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        })
        .to_string()
    }
}

impl ConfigProvider for TomlConfig {
    fn database_url(&self) -> &str {
        &self.source.database_url
    }

    fn output_path(&self) -> &str {
        &self.load.output_path
    }

    fn page_size(&self) -> usize {
        self.source.page_size.unwrap_or(DEFAULT_PAGE_SIZE)
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        validate_database_url("source.database_url", &self.source.database_url)?;
        validate_path("load.output_path", &self.load.output_path)?;
        validate_positive_number("source.page_size", self.page_size(), 1)?;
        Ok(())
    }
}
