//! cosmos-sign: headless review and approval of pending Cosmos sign requests

use clap::Parser;

mod cli;
mod review;

fn main() -> eyre::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = cli::Cli::parse();
    tracing::info!(requests = %cli.requests.display(), "Starting cosmos-sign");

    let summary = review::run(&cli)?;
    tracing::info!(
        approved = summary.approved,
        rejected = summary.rejected,
        "review finished"
    );
    Ok(())
}
