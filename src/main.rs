// Entrypoint for the CLI application.
// - Sets up logging (`RUST_LOG`, default `info`) on stderr. Per-request
//   lines are at debug level so they do not draw over the spinner.
// - Builds the GitHub client and hands it to the interactive flow.

use tracing_subscriber::EnvFilter;
use workflow_keepalive::{api::GithubClient, ui::run};

fn main() -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    // Base URL from `GITHUB_API_URL` or the public API. See
    // `api::GithubClient::from_env`.
    let api = GithubClient::from_env()?;

    run(api)?;
    Ok(())
}
