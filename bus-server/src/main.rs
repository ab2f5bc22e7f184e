use std::process::ExitCode;

use tokio::net::TcpListener;
use tracing::{error, info};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use bus_server::config::Config;
use bus_server::tfl::TflClient;
use bus_server::web::{AppState, create_router};

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "bus_server=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!(error = %e, "bus server stopped");
            ExitCode::FAILURE
        }
    }
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    // Missing credentials stop us here, before anything is bound.
    let config = Config::from_env()?;
    info!(tfl = ?config.tfl, bind_addr = %config.bind_addr, "configuration loaded");

    let tfl = TflClient::new(config.tfl)?;
    let app = create_router(AppState::new(tfl));

    let listener = TcpListener::bind(config.bind_addr).await?;
    info!(address = %listener.local_addr()?, "bus server listening");
    info!("endpoints: POST /stops, POST /predictions, GET /health");

    axum::serve(listener, app).await?;
    Ok(())
}
