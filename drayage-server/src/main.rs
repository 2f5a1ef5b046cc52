use std::net::SocketAddr;

use drayage_server::matcher::MatchConfig;
use drayage_server::web::{AppState, create_router};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // Listen port, overridable for side-by-side deployments
    let port = match std::env::var("DRAYAGE_PORT") {
        Ok(v) => v.parse().unwrap_or_else(|_| {
            eprintln!("Warning: DRAYAGE_PORT {v:?} is not a port number. Using 3000.");
            3000
        }),
        Err(_) => 3000,
    };

    // Matcher configuration, with the savings estimate overridable
    let mut config = MatchConfig::default();
    if let Ok(v) = std::env::var("DRAYAGE_SAVINGS_CENTS") {
        match v.parse() {
            Ok(cents) => config.savings_per_turn_cents = cents,
            Err(_) => eprintln!(
                "Warning: DRAYAGE_SAVINGS_CENTS {v:?} is not a number. Using {}.",
                config.savings_per_turn_cents
            ),
        }
    }

    // Build app state
    let state = AppState::new(config);

    // Create router
    let app = create_router(state);

    // Bind and serve
    let addr = SocketAddr::from(([127, 0, 0, 1], port));
    println!("Drayage Dispatch Engine listening on http://{addr}");
    println!();
    println!("API Endpoints:");
    println!("  GET  /health               - Health check");
    println!("  POST /journeys             - Derive journeys from a leg snapshot");
    println!("  POST /street-turns         - Rank street-turn pairings");
    println!("  GET  /containers/validate  - Validate a container number");

    let listener = tokio::net::TcpListener::bind(addr).await.unwrap();
    axum::serve(listener, app).await.unwrap();
}
