//! Sistema de manejo de errores
//!
//! Este módulo define todos los tipos de errores del sistema
//! y su conversión a respuestas HTTP con el envelope `{success:false, message}`.

use std::sync::atomic::{AtomicBool, Ordering};

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;
use uuid::Uuid;

/// Si es `true`, las respuestas 500 incluyen el detalle interno del error.
/// Se desactiva en producción desde `main`.
static EXPOSE_INTERNAL_ERRORS: AtomicBool = AtomicBool::new(true);

pub fn set_expose_internal_errors(expose: bool) {
    EXPOSE_INTERNAL_ERRORS.store(expose, Ordering::Relaxed);
}

fn expose_internal_errors() -> bool {
    EXPOSE_INTERNAL_ERRORS.load(Ordering::Relaxed)
}

/// Errores principales de la aplicación
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Validation error: {0}")]
    Validation(#[from] validator::ValidationErrors),

    #[error("Start date and end date are required")]
    MissingDates,

    #[error("End date must be after start date")]
    InvalidWindow,

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("{resource} with id '{id}' not found")]
    NotFound { resource: &'static str, id: String },

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Car '{0}' is not available")]
    CarUnavailable(Uuid),

    #[error("Car '{car_id}' is already booked for an overlapping period")]
    BookingConflict { car_id: Uuid, conflicting: Vec<Uuid> },

    #[error("Booking '{0}' is already completed")]
    AlreadyCompleted(Uuid),

    #[error("{entity} is already {current}")]
    InvalidTransition { entity: &'static str, current: String },

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Store error: {0}")]
    Store(String),

    #[error("Internal server error: {0}")]
    Internal(String),
}

/// Respuesta de error para la API
#[derive(Debug, serde::Serialize)]
struct ErrorResponse {
    success: bool,
    error: String,
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<serde_json::Value>,
    code: String,
}

impl AppError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::Database(_) | AppError::Store(_) | AppError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
            AppError::Validation(_)
            | AppError::MissingDates
            | AppError::InvalidWindow
            | AppError::BadRequest(_)
            | AppError::CarUnavailable(_)
            | AppError::AlreadyCompleted(_)
            | AppError::InvalidTransition { .. } => StatusCode::BAD_REQUEST,
            AppError::NotFound { .. } => StatusCode::NOT_FOUND,
            AppError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            AppError::Forbidden(_) => StatusCode::FORBIDDEN,
            AppError::BookingConflict { .. } | AppError::Conflict(_) => StatusCode::CONFLICT,
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            AppError::Database(_) | AppError::Store(_) => "DEPENDENCY_UNAVAILABLE",
            AppError::Internal(_) => "INTERNAL_ERROR",
            AppError::Validation(_) | AppError::BadRequest(_) => "VALIDATION_ERROR",
            AppError::MissingDates => "MISSING_DATES",
            AppError::InvalidWindow => "INVALID_WINDOW",
            AppError::NotFound { .. } => "NOT_FOUND",
            AppError::Unauthorized(_) => "UNAUTHORIZED",
            AppError::Forbidden(_) => "FORBIDDEN",
            AppError::CarUnavailable(_) => "CAR_UNAVAILABLE",
            AppError::BookingConflict { .. } => "BOOKING_CONFLICT",
            AppError::AlreadyCompleted(_) => "ALREADY_COMPLETED",
            AppError::InvalidTransition { .. } => "INVALID_STATE_TRANSITION",
            AppError::Conflict(_) => "CONFLICT",
        }
    }

    fn is_internal(&self) -> bool {
        self.status_code() == StatusCode::INTERNAL_SERVER_ERROR
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        let (message, details) = match &self {
            AppError::Validation(e) => (
                "The provided data is invalid".to_string(),
                Some(json!(e)),
            ),
            AppError::BookingConflict { conflicting, .. } => (
                self.to_string(),
                Some(json!({ "conflicting_bookings": conflicting })),
            ),
            _ if self.is_internal() => {
                tracing::error!(error = %self, "❌ Error interno");
                let details = expose_internal_errors()
                    .then(|| json!({ "internal_error": self.to_string() }));
                ("An unexpected error occurred".to_string(), details)
            }
            _ => {
                tracing::warn!(code = self.code(), "⚠️ {}", self);
                (self.to_string(), None)
            }
        };

        let body = ErrorResponse {
            success: false,
            error: status
                .canonical_reason()
                .unwrap_or("Error")
                .to_string(),
            message,
            details,
            code: self.code().to_string(),
        };

        (status, Json(body)).into_response()
    }
}

/// Resultado tipado para operaciones que pueden fallar
pub type AppResult<T> = Result<T, AppError>;

/// Envuelve el error de un campo concreto en `AppError::Validation`
pub fn field_error(field: &'static str, error: validator::ValidationError) -> AppError {
    let mut errors = validator::ValidationErrors::new();
    errors.add(field, error);
    AppError::Validation(errors)
}

/// Función helper para crear errores de recurso no encontrado
pub fn not_found_error(resource: &'static str, id: impl ToString) -> AppError {
    AppError::NotFound {
        resource,
        id: id.to_string(),
    }
}

/// Función helper para crear errores de acceso prohibido
pub fn forbidden_error(operation: &str, reason: &str) -> AppError {
    AppError::Forbidden(format!("Cannot {}: {}", operation, reason))
}
