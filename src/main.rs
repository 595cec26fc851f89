use anyhow::Result;
use clap::Parser;
use iotack::{Config, InMemoryCounter, SharedConfig};
use std::path::PathBuf;
use std::sync::Arc;
use tokio::signal;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser, Debug)]
#[command(version, about = "Acknowledge IoT device telemetry messages over HTTP")]
struct Cli {
    /// port to serve
    #[arg(long)]
    port: Option<u16>,

    /// optional JSON config file
    #[arg(long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_init();

    let cli = Cli::parse();
    let config = config_init(&cli)?;
    let counter = Arc::new(InMemoryCounter::new());

    tracing::info!("API listening on {}", &config.api_bind_addr);
    let api_server = iotack::api::new(config.clone(), counter)?;
    let api_handle = tokio::spawn(api_server);

    tokio::select! {
        _ = signal::ctrl_c() => {
            tracing::info!("quitting from signal");
        },
        Ok(api_res) = api_handle => {
            if let Err(err) = api_res {
                return Err(err.into())
            }
        }
    }
    tracing::info!("goodbye");
    Ok(())
}

fn tracing_init() {
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "iotack=info,tower_http=info".into()),
        )
        .init();
}

fn config_init(cli: &Cli) -> Result<SharedConfig> {
    let config = match &cli.config {
        None => Config::default(),
        Some(config_file) => {
            let config = Config::try_from_file(config_file)?;
            tracing::debug!("loaded config from {}", config_file.display());
            config
        }
    };
    let config = match cli.port {
        Some(port) => config.with_port(port),
        None => config,
    };
    config.validate()?;
    Ok(Arc::new(config))
}
