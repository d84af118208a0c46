use clap::Parser;
use std::env;

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "Relay GitHub repository webhooks into a Notion database",
    long_about = "A small service that keeps one Notion page per GitHub repository, \
tracking its latest commit, fed by push webhooks or a bulk sync endpoint."
)]
pub struct Cli {
    #[arg(
        long,
        env = "NOTION_TOKEN",
        hide_env_values = true,
        value_name = "TOKEN",
        help = "Notion integration token"
    )]
    pub notion_token: String,

    #[arg(
        long,
        env = "NOTION_DATABASE_ID",
        value_name = "ID",
        help = "Notion database holding one page per repository"
    )]
    pub notion_database_id: String,

    #[arg(
        long,
        env = "GITHUB_TOKEN",
        hide_env_values = true,
        value_name = "TOKEN",
        help = "GitHub token used to enumerate repositories"
    )]
    pub github_token: String,

    #[arg(
        long,
        env = "NOTION_API_URL",
        default_value = "https://api.notion.com",
        value_name = "URL",
        help = "Notion API base URL"
    )]
    pub notion_api_url: String,

    #[arg(
        long,
        env = "GITHUB_API_URL",
        default_value = "https://api.github.com",
        value_name = "URL",
        help = "GitHub API base URL"
    )]
    pub github_api_url: String,

    #[arg(
        long,
        env = "REPO2NOTION_PAGE_SIZE",
        default_value_t = 100u32,
        value_name = "N",
        help = "Repositories fetched per listing page"
    )]
    pub page_size: u32,

    #[arg(
        long = "log-file",
        env = "REPO2NOTION_LOG_FILE",
        value_name = "PATH",
        help = "Write logs to PATH (in addition to stderr)"
    )]
    pub log_file: Option<String>,

    #[arg(
        long,
        env = "REPO2NOTION_LISTEN",
        default_value = "127.0.0.1:8080",
        value_name = "ADDR",
        help = "Listen address (host:port)"
    )]
    pub listen: std::net::SocketAddr,
}

pub fn parse() -> Cli {
    let dotenv_path = env::var("DOTENV_PATH").unwrap_or(".env".into());
    dotenvy::from_filename(&dotenv_path).ok();

    Cli::parse()
}
