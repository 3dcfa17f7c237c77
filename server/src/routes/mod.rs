//! Router assembly.
//!
//! SYSTEM CONTEXT
//! ==============
//! This module binds the JSON map API used by the editor and the command-line
//! client, plus CSV transfer endpoints and a health probe, under a single
//! Axum router. Every request is traced.

pub mod maps;

use axum::Router;
use axum::http::StatusCode;
use axum::routing::{get, post};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::state::AppState;


/// API routes plus the health probe.
pub fn app(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/api/maps", get(maps::list_maps).post(maps::save_map))
        .route("/api/maps/{id}", get(maps::get_map).delete(maps::delete_map))
        .route("/api/maps/{id}/export.csv", get(maps::export_csv))
        .route("/api/maps/{id}/import.csv", post(maps::import_csv))
        .route("/healthz", get(healthz))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn healthz() -> StatusCode {
    StatusCode::OK
}
