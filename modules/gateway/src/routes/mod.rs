use axum::http::header::CONTENT_TYPE;
use axum::http::{HeaderName, Method, StatusCode};
use axum::routing::{delete, get, patch, post};
use axum::{Json, Router};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::extract::ADMIN_AUTHORIZATION_HEADER;
use crate::state::AppState;

pub mod auth;
pub mod inbox;
pub mod intake_forms;
pub mod shipments;
pub mod tracking_page;

pub fn router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PATCH,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([
            CONTENT_TYPE,
            HeaderName::from_static(ADMIN_AUTHORIZATION_HEADER),
        ]);

    Router::new()
        .route("/", get(health_handler))
        .route("/auth/login", post(auth::login_handler))
        .route("/auth/logout", post(auth::logout_handler))
        .route(
            "/shipments",
            post(shipments::create_handler).get(shipments::list_handler),
        )
        .route("/shipments/{id}/status", patch(shipments::status_handler))
        .route("/shipments/{id}", delete(shipments::delete_handler))
        .route(
            "/tracking/{tracking_number}",
            get(tracking_page::resolve_handler),
        )
        .route(
            "/quotes",
            post(intake_forms::quote_handler).get(inbox::quotes_handler),
        )
        .route(
            "/contact",
            post(intake_forms::contact_handler).get(inbox::contact_handler),
        )
        .fallback(not_found_handler)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn health_handler() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "OK",
        "service": "Dovic Express API",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

async fn not_found_handler() -> (StatusCode, Json<serde_json::Value>) {
    (
        StatusCode::NOT_FOUND,
        Json(serde_json::json!({ "message": "Route not found" })),
    )
}
