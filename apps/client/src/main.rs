mod cli;

use clap::Parser;
use talentvision_client::{Config, GatewayError, UploadError};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::cli::Cli;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = cli.apply(Config::from_env()?);

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!(
                "talentvision_client={0},talentvision={0}",
                &config.rust_log
            ))
        }))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    info!("Starting TalentVision client v{}", env!("CARGO_PKG_VERSION"));

    if let Err(e) = cli::execute(cli, &config).await {
        // Users see the generic text; the cause goes to the log.
        if let Some(upload) = e.downcast_ref::<UploadError>() {
            tracing::error!(code = upload.code(), error = %upload, "upload failed");
            eprintln!("{}", upload.user_message());
        } else if let Some(gateway) = e.downcast_ref::<GatewayError>() {
            tracing::error!(error = %gateway, "request failed");
            if gateway.is_not_found() {
                eprintln!("Candidato não encontrado.");
            } else {
                eprintln!("{}", gateway.user_message());
            }
        } else {
            eprintln!("Error: {e:#}");
        }
        std::process::exit(1);
    }

    Ok(())
}
