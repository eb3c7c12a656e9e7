use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, patch, put},
    Json, Router,
};
use uuid::Uuid;

use crate::controllers::{BookingController, CarController};
use crate::dto::booking_dto::BookingListResponse;
use crate::dto::car_dto::{CarListResponse, CarResponse, CreateCarRequest, UpdateCarRequest};
use crate::dto::driver_dto::ToggleAvailabilityRequest;
use crate::dto::ApiResponse;
use crate::middleware::auth::OwnerUser;
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_car_owner_router() -> Router<AppState> {
    Router::new()
        .route("/cars", get(list_cars).post(create_car))
        .route("/cars/:id", put(update_car).delete(delete_car))
        .route("/cars/:id/availability", patch(set_car_availability))
        .route("/bookings", get(list_bookings))
}

async fn create_car(
    State(state): State<AppState>,
    OwnerUser(user): OwnerUser,
    Json(request): Json<CreateCarRequest>,
) -> Result<(StatusCode, Json<ApiResponse<CarResponse>>), AppError> {
    let controller = CarController::new(&state);
    let response = controller.create(user.user_id, request).await?;
    Ok((StatusCode::CREATED, Json(response)))
}

async fn list_cars(
    State(state): State<AppState>,
    OwnerUser(user): OwnerUser,
) -> Result<Json<ApiResponse<CarListResponse>>, AppError> {
    let controller = CarController::new(&state);
    let response = controller.list(user.user_id).await?;
    Ok(Json(response))
}

async fn update_car(
    State(state): State<AppState>,
    OwnerUser(user): OwnerUser,
    Path(car_id): Path<Uuid>,
    Json(request): Json<UpdateCarRequest>,
) -> Result<Json<ApiResponse<CarResponse>>, AppError> {
    let controller = CarController::new(&state);
    let response = controller.update(user.user_id, car_id, request).await?;
    Ok(Json(response))
}

async fn set_car_availability(
    State(state): State<AppState>,
    OwnerUser(user): OwnerUser,
    Path(car_id): Path<Uuid>,
    Json(request): Json<ToggleAvailabilityRequest>,
) -> Result<Json<ApiResponse<CarResponse>>, AppError> {
    let controller = CarController::new(&state);
    let response = controller.set_availability(user.user_id, car_id, request).await?;
    Ok(Json(response))
}

async fn delete_car(
    State(state): State<AppState>,
    OwnerUser(user): OwnerUser,
    Path(car_id): Path<Uuid>,
) -> Result<Json<ApiResponse<()>>, AppError> {
    let controller = CarController::new(&state);
    let response = controller.delete(user.user_id, car_id).await?;
    Ok(Json(response))
}

async fn list_bookings(
    State(state): State<AppState>,
    OwnerUser(user): OwnerUser,
) -> Result<Json<ApiResponse<BookingListResponse>>, AppError> {
    let controller = BookingController::new(&state);
    let response = controller.list_for_owner(user.user_id).await?;
    Ok(Json(response))
}
