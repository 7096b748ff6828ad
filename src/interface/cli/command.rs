//! CLI 명령 파싱 모듈.

use clap::{Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(name = "siteterm")]
#[command(about = "Terminal front door for the site: list pages and blogs, then jump to one")]
pub struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Site base URL (overrides config `site.base_url`)
    #[arg(long, value_name = "URL")]
    base_url: Option<String>,

    /// Run a command line non-interactively (repeatable), then exit
    #[arg(short = 'c', long = "command", value_name = "LINE")]
    lines: Vec<String>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Show effective merged config and the searched config paths
    Config,
}

pub enum CliAction {
    Interactive(SessionOptions),
    Script(SessionOptions, Vec<String>),
    InspectConfig,
}

/// 세션 실행 시 CLI에서 덮어쓸 값.
#[derive(Debug, Clone, Default)]
pub struct SessionOptions {
    pub base_url: Option<String>,
}

impl Cli {
    pub fn parse_action() -> Result<CliAction, String> {
        Self::from_cli(Cli::parse())
    }

    fn from_cli(cli: Cli) -> Result<CliAction, String> {
        let options = SessionOptions {
            base_url: cli.base_url,
        };

        match cli.command {
            Some(Commands::Config) => {
                if !cli.lines.is_empty() {
                    return Err("`config` cannot be combined with --command".to_string());
                }
                Ok(CliAction::InspectConfig)
            }
            None if cli.lines.is_empty() => Ok(CliAction::Interactive(options)),
            None => Ok(CliAction::Script(options, cli.lines)),
        }
    }
}
