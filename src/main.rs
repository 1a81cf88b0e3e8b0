//! everbloom server binary.
//!
//! Usage:
//!   cargo run --bin seed_data    # populate sample content
//!   cargo run --bin everbloom    # start the site
//!
//! Requires STORE_PATH in the environment (or a .env file); see
//! `config::Config` for the other knobs.

use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

use everbloom::config::Config;
use everbloom::rest::{self, AppState};
use everbloom::storage::Store;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    // Missing store path or an unopenable store is fatal: nothing can be
    // served without it.
    let config = Config::from_env()?;
    let store = Store::open(&config.store_path)?;

    let state = AppState::new(store, config.app_env.clone());
    let app = rest::create_router(state);

    let listener = TcpListener::bind(&config.bind_addr).await?;
    tracing::info!(addr = %config.bind_addr, env = %config.app_env, "everbloom listening");
    axum::serve(listener, app.into_make_service()).await?;

    Ok(())
}
