use anyhow::Context;
use backend::dashboards::d001_returns_dashboard::commands::{read_commands, Command, HELP};
use backend::dashboards::d001_returns_dashboard::{
    ConsolePresenter, DashboardSession, DataSources, JsonPresenter, Presenter,
};
use backend::shared::config::{load_config, Config};
use std::path::PathBuf;

fn init_tracing(config: &Config) -> anyhow::Result<()> {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

    let log_dir = config.log_dir();
    std::fs::create_dir_all(&log_dir)
        .with_context(|| format!("failed to create log dir {}", log_dir.display()))?;

    let log_file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(log_dir.join("dashboard.log"))?;

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| config.logging.filter.clone()),
        ))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::sync::Arc::new(log_file))
                .with_ansi(false),
        )
        .init();

    Ok(())
}

fn main() -> anyhow::Result<()> {
    let explicit = std::env::args_os().nth(1).map(PathBuf::from);
    let (config, config_source) = load_config(explicit.as_deref())?;

    init_tracing(&config)?;
    tracing::info!("Configuration loaded from {}", config_source);

    let sources = DataSources::from_config(&config);
    let mut session = DashboardSession::open(&sources, config.dashboard.top_n)
        .context("failed to build the returns table")?;

    let stdout = std::io::stdout();
    let mut console = ConsolePresenter::new(stdout.lock(), config.dashboard.table_limit);
    console.present(&session.snapshot())?;

    let stdin = std::io::stdin();
    for command in read_commands(stdin.lock()) {
        let command = command?;
        match command {
            Command::Filter(event) => {
                let snapshot = session.apply(event);
                console.present(&snapshot)?;
            }
            Command::Show => console.present(&session.snapshot())?,
            Command::Json(path) => {
                if let Err(e) = JsonPresenter::new(path).present(&session.snapshot()) {
                    tracing::error!("{e:#}");
                }
            }
            Command::Help => eprintln!("{HELP}"),
            Command::Quit => break,
        }
    }

    tracing::info!("Session {} closed", session.id());
    Ok(())
}
