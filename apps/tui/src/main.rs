mod app;
mod cli;
mod event;
mod terminal;
mod ui;

use std::fs::OpenOptions;
use std::sync::{Arc, Mutex};

use app::App;
use clap::Parser;
use cli::CliArgs;
use color_eyre::Result;
use recipe_browser::catalog::Session;
use recipe_browser::config::{init_app_config, AppConfig};
use recipe_browser::source::MealDbClient;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // Setup error handling
    color_eyre::install()?;

    let args = CliArgs::parse();
    args.apply_env_overrides();
    let config = init_app_config();

    let headless = args.wants_headless() || !is_terminal();
    init_tracing(&config, headless)?;

    let remote = Arc::new(MealDbClient::new(
        &config.api_base_url,
        config.request_timeout,
    )?);
    info!(api = remote.base_url(), local = %config.local_recipes, "starting session");
    let session = Session::start(remote, &config.local_recipes, config.request_timeout).await;

    if headless {
        return event::run_headless(&session, &args).await;
    }

    let mut app = App::new(session);
    let mut terminal = terminal::setup_terminal()?;

    let result = event::run(&mut terminal, &mut app).await;

    // Restore terminal even when the loop failed
    terminal::cleanup_terminal_state(true, true);

    result
}

/// Logs go to stderr, or to `LOG_FILE` when set. The interactive UI owns the
/// screen, so without a file it only lets errors through.
fn init_tracing(config: &AppConfig, headless: bool) -> Result<()> {
    let default_level = match (config.debug, headless) {
        (true, _) => "debug",
        (false, true) => "warn",
        (false, false) => "error",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    let builder = tracing_subscriber::fmt().with_env_filter(filter);

    let installed = match &config.log_file {
        Some(path) => {
            let file = OpenOptions::new().create(true).append(true).open(path)?;
            builder
                .with_ansi(false)
                .with_writer(Mutex::new(file))
                .try_init()
        }
        None => builder.with_writer(std::io::stderr).try_init(),
    };

    installed.map_err(|e| color_eyre::eyre::eyre!("Failed to initialize logging: {e}"))
}

// Check if we're running in a terminal
fn is_terminal() -> bool {
    atty::is(atty::Stream::Stdout)
}
