use std::net::SocketAddr;
use std::sync::Arc;
use stellar_api::{app, AppState};
use stellar_store::{app_config::Config, InMemoryBookingService};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "stellar_api=debug,stellar_store=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::load()?;
    tracing::info!("Starting Stellar API on port {}", config.server.port);

    let app_state = AppState {
        booking_service: Arc::new(InMemoryBookingService::seeded()),
    };

    let addr = SocketAddr::from(([0, 0, 0, 0], config.server.port));
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app(app_state)).await?;
    Ok(())
}
