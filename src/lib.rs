//! CarConnect - reservas de coches y solicitudes de viaje
//!
//! Librería del servicio: el binario (`main.rs`) y los tests de integración
//! construyen la aplicación con [`create_app`].

pub mod config;
pub mod controllers;
pub mod database;
pub mod dto;
pub mod middleware;
pub mod models;
pub mod repositories;
pub mod routes;
pub mod services;
pub mod state;
pub mod utils;

use axum::{response::Json, routing::get, Router};
use serde_json::{json, Value};
use tower_http::trace::TraceLayer;

use crate::middleware::cors::cors_layer;
use crate::state::AppState;

/// Router completo de la API con CORS y trazas por request
pub fn create_app(state: AppState) -> Router {
    let cors = cors_layer(&state.config);

    Router::new()
        .route("/health", get(health))
        .nest("/car-renter", routes::create_car_renter_router())
        .nest("/car-owner", routes::create_car_owner_router())
        .nest("/driver", routes::create_driver_router())
        .nest("/notifications", routes::create_notification_router())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

async fn health() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "timestamp": chrono::Utc::now().to_rfc3339(),
    }))
}
