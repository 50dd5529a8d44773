//! # toolshop
//!
//! Storefront backend for the tools manufacturer.
//!
//! ## Usage
//!
//! ```bash
//! # Set environment variables
//! export ACCESS_TOKEN_SECRET=...
//! export STRIPE_SECRET_KEY=sk_test_...
//!
//! # Run the server
//! toolshop
//! ```

use shop_api::{routes, state::AppState};
use tracing::{info, Level};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(
            EnvFilter::builder()
                .with_default_directive(Level::INFO.into())
                .from_env_lossy(),
        )
        .init();

    // Initialize application state
    let state = AppState::new()?;

    let addr = state.config.socket_addr()?;

    info!("Environment: {}", state.config.environment);
    info!("Payment provider: {}", state.payments.provider_name());
    info!("Token lifetime: {}h", state.config.token_ttl_hours);

    // Create router
    let app = routes::create_router(state);

    // Start server
    info!("toolshop listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
