use clap::Parser;
use tracing::info;

use nlq_gateway::api::create_router;
use nlq_gateway::infrastructure::logging::init_logging;
use nlq_gateway::AppConfig;

#[derive(Debug, Parser)]
#[command(name = "nlq-gateway", version, about)]
struct Cli {
    /// Override the configured bind host
    #[arg(long)]
    host: Option<String>,

    /// Override the configured bind port
    #[arg(long)]
    port: Option<u16>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let mut config = AppConfig::load()?;

    if let Some(host) = cli.host {
        config.server.host = host;
    }
    if let Some(port) = cli.port {
        config.server.port = port;
    }

    init_logging(&config.logging);

    let state = nlq_gateway::bootstrap(&config).await?;
    let app = create_router(state);

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    info!("Starting server on {}", addr);
    axum::serve(listener, app).await?;

    Ok(())
}
