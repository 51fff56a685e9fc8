use clap::Parser;
use tracing_subscriber::EnvFilter;
use vault_scripts::{artifacts::ArtifactStore, cli::Cli};

/// The log filter used when `RUST_LOG` is unset
const DEFAULT_LOG_FILTER: &str = "info";

#[tokio::main]
async fn main() -> eyre::Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .pretty()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER)),
        )
        .init();

    let keystores = cli.keystores()?;
    let Cli {
        rpc_url,
        artifacts_dir,
        deployments,
        command,
        ..
    } = cli;

    command
        .run(
            &rpc_url,
            &keystores,
            ArtifactStore::new(artifacts_dir),
            deployments.as_deref(),
        )
        .await?;

    Ok(())
}
