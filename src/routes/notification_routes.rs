use axum::{
    extract::{Path, Query, State},
    routing::{delete, get, patch},
    Json, Router,
};
use uuid::Uuid;

use crate::controllers::NotificationController;
use crate::dto::notification_dto::{
    MarkAllReadResponse, NotificationListResponse, NotificationQuery, NotificationResponse,
};
use crate::dto::ApiResponse;
use crate::middleware::auth::AuthenticatedUser;
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_notification_router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_notifications))
        .route("/read-all", patch(mark_all_read))
        .route("/:id/read", patch(mark_read))
        .route("/:id", delete(delete_notification))
}

async fn list_notifications(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Query(query): Query<NotificationQuery>,
) -> Result<Json<ApiResponse<NotificationListResponse>>, AppError> {
    let controller = NotificationController::new(&state);
    let response = controller.list(user.user_id, query).await?;
    Ok(Json(response))
}

async fn mark_read(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<NotificationResponse>>, AppError> {
    let controller = NotificationController::new(&state);
    let response = controller.mark_read(user.user_id, id).await?;
    Ok(Json(response))
}

async fn mark_all_read(
    State(state): State<AppState>,
    user: AuthenticatedUser,
) -> Result<Json<ApiResponse<MarkAllReadResponse>>, AppError> {
    let controller = NotificationController::new(&state);
    let response = controller.mark_all_read(user.user_id).await?;
    Ok(Json(response))
}

async fn delete_notification(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<()>>, AppError> {
    let controller = NotificationController::new(&state);
    let response = controller.delete(user.user_id, id).await?;
    Ok(Json(response))
}
