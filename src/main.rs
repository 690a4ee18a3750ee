// Entrypoint for the CLI application.
// - Keeps `main` small: load configuration from the environment and hand
//   it to the UI flow.
// - Returns `anyhow::Result` to simplify error handling at the boundary.

use skywatch_cli::{config::Config, ui};
use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<()> {
    // Diagnostics are opt-in via RUST_LOG; the report itself goes to
    // stdout untouched.
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .init();

    // Credentials and endpoints come from the environment in one place.
    // See `config::Config::from_env`.
    let config = Config::from_env();

    // Run the single-shot flow. This call blocks until the report is
    // printed or a stage fails.
    ui::run(config)?;
    Ok(())
}
