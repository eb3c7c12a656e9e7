//! Controlador de notificaciones del usuario autenticado

use uuid::Uuid;

use crate::dto::notification_dto::{
    MarkAllReadResponse, NotificationListResponse, NotificationQuery, NotificationResponse,
};
use crate::dto::ApiResponse;
use crate::services::NotificationService;
use crate::state::AppState;
use crate::utils::errors::AppResult;

pub struct NotificationController {
    service: NotificationService,
}

impl NotificationController {
    pub fn new(state: &AppState) -> Self {
        Self {
            service: NotificationService::new(state.repos.notifications.clone()),
        }
    }

    pub async fn list(
        &self,
        user_id: Uuid,
        query: NotificationQuery,
    ) -> AppResult<ApiResponse<NotificationListResponse>> {
        let notifications = self.service.list(user_id, query.unread_only).await?;
        let unread = notifications.iter().filter(|n| !n.read).count();
        Ok(ApiResponse::success(NotificationListResponse {
            notifications,
            unread,
        }))
    }

    pub async fn mark_read(&self, user_id: Uuid, id: Uuid) -> AppResult<ApiResponse<NotificationResponse>> {
        let notification = self.service.mark_read(user_id, id).await?;
        Ok(ApiResponse::success(NotificationResponse { notification }))
    }

    pub async fn mark_all_read(&self, user_id: Uuid) -> AppResult<ApiResponse<MarkAllReadResponse>> {
        let updated = self.service.mark_all_read(user_id).await?;
        Ok(ApiResponse::success(MarkAllReadResponse { updated }))
    }

    pub async fn delete(&self, user_id: Uuid, id: Uuid) -> AppResult<ApiResponse<()>> {
        self.service.delete(user_id, id).await?;
        Ok(ApiResponse::message("Notification deleted"))
    }
}
