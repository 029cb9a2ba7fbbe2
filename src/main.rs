// src/main.rs

use storefront_admin::config::AppConfig;
use storefront_admin::handlers::router;
use storefront_admin::state::AppState;
use storefront_admin::{FormSessions, ProductClient};
use tokio::net::TcpListener;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "storefront_admin=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = match AppConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("Invalid configuration: {}", e);
            std::process::exit(1);
        }
    };

    let client = ProductClient::new();
    tracing::info!("Products will be posted to {}", client.endpoint());

    // Each page load mounts its own form; idle ones are evicted.
    let app_state = AppState {
        forms: FormSessions::new(client, config.form_idle_timeout),
    };
    let app = router(app_state, config.max_upload_bytes);

    tracing::info!("Admin server listening on {}", config.listen_addr);
    let listener = match TcpListener::bind(config.listen_addr).await {
        Ok(listener) => listener,
        Err(e) => {
            tracing::error!("Cannot bind {}: {}", config.listen_addr, e);
            return;
        }
    };

    if let Err(e) = axum::serve(listener, app.into_make_service()).await {
        tracing::error!("Server error: {}", e);
    }
}
