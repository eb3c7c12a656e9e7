use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{get, patch, post},
    Json, Router,
};
use uuid::Uuid;

use crate::controllers::{DriverController, RideRequestController};
use crate::dto::driver_dto::{
    AvailabilityResponse, CreateDriverProfileRequest, DriverProfileResponse,
    ToggleAvailabilityRequest,
};
use crate::dto::ride_request_dto::{
    CompleteRideRequest, CompletedRideResponse, RideRequestListResponse, RideRequestQuery,
    RideRequestResponse,
};
use crate::dto::ApiResponse;
use crate::middleware::auth::DriverUser;
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_driver_router() -> Router<AppState> {
    Router::new()
        .route("/profile", post(create_profile).get(get_profile))
        .route("/toggle-availability", patch(toggle_availability))
        .route("/ride-requests", get(list_ride_requests))
        .route("/ride-requests/:id/accept", post(accept_ride))
        .route("/ride-requests/:id/reject", post(reject_ride))
        .route("/ride-requests/:id/complete", post(complete_ride))
}

async fn accept_ride(
    State(state): State<AppState>,
    DriverUser(user): DriverUser,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<RideRequestResponse>>, AppError> {
    let controller = RideRequestController::new(&state);
    let response = controller.accept(user.user_id, id).await?;
    Ok(Json(response))
}

async fn reject_ride(
    State(state): State<AppState>,
    DriverUser(user): DriverUser,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<RideRequestResponse>>, AppError> {
    let controller = RideRequestController::new(&state);
    let response = controller.reject(user.user_id, id).await?;
    Ok(Json(response))
}

async fn complete_ride(
    State(state): State<AppState>,
    DriverUser(user): DriverUser,
    Path(id): Path<Uuid>,
    body: Option<Json<CompleteRideRequest>>,
) -> Result<Json<ApiResponse<CompletedRideResponse>>, AppError> {
    let request = body.map(|Json(request)| request).unwrap_or_default();
    let controller = RideRequestController::new(&state);
    let response = controller.complete(user.user_id, id, request).await?;
    Ok(Json(response))
}

async fn list_ride_requests(
    State(state): State<AppState>,
    DriverUser(user): DriverUser,
    Query(query): Query<RideRequestQuery>,
) -> Result<Json<ApiResponse<RideRequestListResponse>>, AppError> {
    let controller = RideRequestController::new(&state);
    let response = controller.list(user.user_id, query).await?;
    Ok(Json(response))
}

async fn toggle_availability(
    State(state): State<AppState>,
    DriverUser(user): DriverUser,
    Json(request): Json<ToggleAvailabilityRequest>,
) -> Result<Json<ApiResponse<AvailabilityResponse>>, AppError> {
    let controller = DriverController::new(&state);
    let response = controller.toggle_availability(user.user_id, request).await?;
    Ok(Json(response))
}

async fn create_profile(
    State(state): State<AppState>,
    DriverUser(user): DriverUser,
    Json(request): Json<CreateDriverProfileRequest>,
) -> Result<(StatusCode, Json<ApiResponse<DriverProfileResponse>>), AppError> {
    let controller = DriverController::new(&state);
    let response = controller.create_profile(user.user_id, request).await?;
    Ok((StatusCode::CREATED, Json(response)))
}

async fn get_profile(
    State(state): State<AppState>,
    DriverUser(user): DriverUser,
) -> Result<Json<ApiResponse<DriverProfileResponse>>, AppError> {
    let controller = DriverController::new(&state);
    let response = controller.get_profile(user.user_id).await?;
    Ok(Json(response))
}
