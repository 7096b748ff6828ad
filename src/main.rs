//! `siteterm` 바이너리 진입점.

use siteterm::interface::cli::{AppComposition, Cli, CliAction, run_repl, run_script};

#[tokio::main]
async fn main() {
    // stdout은 터미널 화면이므로 로그는 stderr로 보낸다.
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let action = match Cli::parse_action() {
        Ok(action) => action,
        Err(msg) => {
            eprintln!("error: {msg}");
            std::process::exit(2);
        }
    };

    let composition = AppComposition::default();

    let result = match action {
        CliAction::InspectConfig => composition
            .inspect_config_usecase()
            .execute()
            .map(|json| println!("{json}")),
        CliAction::Interactive(options) => run_repl(&composition, &options).await,
        CliAction::Script(options, lines) => run_script(&composition, &options, &lines).await,
    };

    if let Err(err) = result {
        eprintln!("error: {err:#}");
        std::process::exit(1);
    }
}
