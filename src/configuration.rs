use thiserror::Error;
use url::Url;

/// Immutable process configuration, built once at startup and passed
/// explicitly into the components that need it.
#[derive(Clone, Debug)]
pub struct Configuration {
    pub notion_token: String,
    pub notion_database_id: String,
    pub github_token: String,
    pub notion_api_url: Url,
    pub github_api_url: Url,
    pub page_size: u32,
    pub log_file: Option<String>,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{0} must not be empty")]
    EmptyCredential(&'static str),
    #[error("invalid {name}: {source}")]
    InvalidUrl {
        name: &'static str,
        source: url::ParseError,
    },
    #[error("page size must be between 1 and 100, got {0}")]
    InvalidPageSize(u32),
}

impl Configuration {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.notion_token.trim().is_empty() {
            return Err(ConfigError::EmptyCredential("NOTION_TOKEN"));
        }
        if self.notion_database_id.trim().is_empty() {
            return Err(ConfigError::EmptyCredential("NOTION_DATABASE_ID"));
        }
        if self.github_token.trim().is_empty() {
            return Err(ConfigError::EmptyCredential("GITHUB_TOKEN"));
        }
        if self.page_size == 0 || self.page_size > 100 {
            return Err(ConfigError::InvalidPageSize(self.page_size));
        }
        Ok(())
    }
}

pub fn parse_base_url(name: &'static str, raw: &str) -> Result<Url, ConfigError> {
    Url::parse(raw).map_err(|source| ConfigError::InvalidUrl { name, source })
}
