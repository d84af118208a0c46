use crate::cli::Cli;
use crate::configuration::{parse_base_url, ConfigError, Configuration};

#[derive(Debug)]
pub struct Context {
    pub config: Configuration,
}

impl Context {
    pub fn from_cli(cli: &Cli) -> Result<Self, ConfigError> {
        let config = Configuration {
            notion_token: cli.notion_token.clone(),
            notion_database_id: cli.notion_database_id.clone(),
            github_token: cli.github_token.clone(),
            notion_api_url: parse_base_url("NOTION_API_URL", &cli.notion_api_url)?,
            github_api_url: parse_base_url("GITHUB_API_URL", &cli.github_api_url)?,
            page_size: cli.page_size,
            log_file: cli.log_file.clone(),
        };
        config.validate()?;
        Ok(Self { config })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cli() -> Cli {
        Cli {
            notion_token: "secret".to_string(),
            notion_database_id: "db-1".to_string(),
            github_token: "gh-token".to_string(),
            notion_api_url: "https://api.notion.com".to_string(),
            github_api_url: "https://api.github.com".to_string(),
            page_size: 100,
            log_file: None,
            listen: "127.0.0.1:8080".parse().unwrap(),
        }
    }

    #[test]
    fn accepts_complete_configuration() {
        assert!(Context::from_cli(&cli()).is_ok());
    }

    #[test]
    fn rejects_empty_credentials() {
        let mut args = cli();
        args.notion_token = "  ".to_string();
        let err = Context::from_cli(&args).unwrap_err();
        assert!(matches!(err, ConfigError::EmptyCredential("NOTION_TOKEN")));
    }

    #[test]
    fn rejects_malformed_base_url() {
        let mut args = cli();
        args.github_api_url = "not a url".to_string();
        let err = Context::from_cli(&args).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::InvalidUrl {
                name: "GITHUB_API_URL",
                ..
            }
        ));
    }

    #[test]
    fn rejects_oversized_page_size() {
        let mut args = cli();
        args.page_size = 250;
        let err = Context::from_cli(&args).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidPageSize(250)));
    }
}
