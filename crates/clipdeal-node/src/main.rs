//! # Clipdeal Node
//!
//! The Clipdeal API server binary.

use std::net::SocketAddr;

use axum::{
    routing::{get, post},
    Router,
};
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;
use tracing_subscriber::EnvFilter;

mod api;
mod state;


use state::AppState;

/// Run the Clipdeal API server.
pub async fn run_server(addr: SocketAddr) -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    info!("Clipdeal node starting");

    let state = AppState::new();
    let app = create_router(state);

    info!("listening on http://{}", addr);

    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Create the API router.
fn create_router(state: AppState) -> Router {
    // CORS layer
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        // Health check
        .route("/health", get(api::health::health_check))
        // Accounts
        .route("/api/v1/users", post(api::users::signup))
        // Public booths
        .route("/api/v1/booths/:slug", get(api::booths::booth_detail))
        .route(
            "/api/v1/booths/:slug/contents",
            get(api::booths::booth_contents),
        )
        // Catalog + producer listings
        .route(
            "/api/v1/contents",
            get(api::contents::list_contents).post(api::contents::create_content),
        )
        .route(
            "/api/v1/contents/:id",
            get(api::contents::content_detail)
                .patch(api::contents::update_content)
                .delete(api::contents::delete_content),
        )
        .route(
            "/api/v1/contents/:id/publish",
            post(api::contents::publish_content),
        )
        // Offers
        .route(
            "/api/v1/offers",
            get(api::offers::list_offers).post(api::offers::submit_offer),
        )
        .route("/api/v1/offers/:id/accept", post(api::offers::accept_offer))
        .route("/api/v1/offers/:id/reject", post(api::offers::reject_offer))
        // LOIs
        .route("/api/v1/loi", get(api::lois::list_lois))
        .route("/api/v1/loi/:id", get(api::lois::loi_detail))
        // Admin
        .route("/api/v1/admin/dashboard", get(api::admin::dashboard))
        // Unknown routes still answer with the envelope
        .fallback(api::envelope::fallback_not_found)
        // Middleware
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let addr = SocketAddr::from(([0, 0, 0, 0], 3000));
    run_server(addr).await
}
