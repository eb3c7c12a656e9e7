use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use uuid::Uuid;

use crate::controllers::BookingController;
use crate::dto::booking_dto::{AvailabilityQuery, BookingListResponse, BookingResponse, CreateBookingRequest};
use crate::dto::ride_request_dto::RideRequestListResponse;
use crate::dto::ApiResponse;
use crate::middleware::auth::RenterUser;
use crate::services::{AvailabilityReport, BookingOutcome, FanOutReport};
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_car_renter_router() -> Router<AppState> {
    Router::new()
        .route("/cars/:id/book", post(book_car))
        .route("/cars/:id/availability", get(car_availability))
        .route("/bookings", get(list_bookings))
        .route("/bookings/:id", get(get_booking))
        .route("/bookings/:id/cancel", post(cancel_booking))
        .route("/bookings/:id/retry-fan-out", post(retry_fan_out))
        .route("/bookings/:id/ride-requests", get(booking_ride_requests))
}

async fn book_car(
    State(state): State<AppState>,
    RenterUser(user): RenterUser,
    Path(car_id): Path<Uuid>,
    Json(request): Json<CreateBookingRequest>,
) -> Result<(StatusCode, Json<ApiResponse<BookingOutcome>>), AppError> {
    let controller = BookingController::new(&state);
    let response = controller.book(user.user_id, car_id, request).await?;
    Ok((StatusCode::CREATED, Json(response)))
}

async fn cancel_booking(
    State(state): State<AppState>,
    RenterUser(user): RenterUser,
    Path(booking_id): Path<Uuid>,
) -> Result<Json<ApiResponse<BookingResponse>>, AppError> {
    let controller = BookingController::new(&state);
    let response = controller.cancel(user.user_id, booking_id).await?;
    Ok(Json(response))
}

async fn retry_fan_out(
    State(state): State<AppState>,
    RenterUser(user): RenterUser,
    Path(booking_id): Path<Uuid>,
) -> Result<Json<ApiResponse<FanOutReport>>, AppError> {
    let controller = BookingController::new(&state);
    let response = controller.retry_fan_out(user.user_id, booking_id).await?;
    Ok(Json(response))
}

async fn booking_ride_requests(
    State(state): State<AppState>,
    RenterUser(user): RenterUser,
    Path(booking_id): Path<Uuid>,
) -> Result<Json<ApiResponse<RideRequestListResponse>>, AppError> {
    let controller = BookingController::new(&state);
    let response = controller.ride_requests(user.user_id, booking_id).await?;
    Ok(Json(response))
}

async fn list_bookings(
    State(state): State<AppState>,
    RenterUser(user): RenterUser,
) -> Result<Json<ApiResponse<BookingListResponse>>, AppError> {
    let controller = BookingController::new(&state);
    let response = controller.list_for_renter(user.user_id).await?;
    Ok(Json(response))
}

async fn get_booking(
    State(state): State<AppState>,
    RenterUser(user): RenterUser,
    Path(booking_id): Path<Uuid>,
) -> Result<Json<ApiResponse<BookingResponse>>, AppError> {
    let controller = BookingController::new(&state);
    let response = controller.get(user.user_id, booking_id).await?;
    Ok(Json(response))
}

async fn car_availability(
    State(state): State<AppState>,
    RenterUser(_user): RenterUser,
    Path(car_id): Path<Uuid>,
    Query(query): Query<AvailabilityQuery>,
) -> Result<Json<ApiResponse<AvailabilityReport>>, AppError> {
    let controller = BookingController::new(&state);
    let response = controller.availability(car_id, query).await?;
    Ok(Json(response))
}
