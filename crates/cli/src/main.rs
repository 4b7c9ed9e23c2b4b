use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use toolbelt_cli::cli::Cli;
use toolbelt_cli::commands;
use toolbelt_cli::config::CliConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    // --- Tracing ---
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "toolbelt=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    // --- Configuration ---
    let config = CliConfig::from_env()?;
    tracing::debug!(zone = ?config.zone, date_format = %config.date_format, "Loaded CLI configuration");

    let cli = Cli::parse();
    let output = commands::run(cli.command, &config).await?;
    println!("{}", output.render(cli.json));

    Ok(())
}
