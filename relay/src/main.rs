use clap::Parser;
use relay::logging::init_logging;
use relay::{AppState, RelayConfig, app};
use std::net::SocketAddr;
use tracing::warn;

#[derive(Parser)]
#[command(author, version, about)]
struct Cli {
    /// Address to bind the HTTP server
    #[arg(long, default_value = "127.0.0.1:3000")]
    addr: String,

    /// Shared secret external agents must present when ingesting events
    #[arg(long, env = "AGENT_SHARED_SECRET")]
    secret: Option<String>,
}

#[tokio::main(flavor = "multi_thread")]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    init_logging();
    let cli = Cli::parse();

    let config = RelayConfig::new(cli.secret);
    if config.shared_secret.is_none() {
        warn!("no shared secret configured; ingestion answers 503 until one is set");
    }

    let app = app(AppState::new(config));

    let addr: SocketAddr = cli.addr.parse()?;
    println!("Listening on http://{addr}");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app.into_make_service()).await?;
    Ok(())
}
