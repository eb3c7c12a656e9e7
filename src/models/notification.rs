//! Modelo de Notification

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, Type};
use uuid::Uuid;

/// Tipo de notificación - mapea al ENUM notification_type
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Type, PartialEq, Eq, Hash)]
#[sqlx(type_name = "notification_type", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum NotificationType {
    NewBooking,
    BookingCancelled,
    DriverAccepted,
    DriverRejected,
    RideCompleted,
    NewRideRequest,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Notification {
    pub id: Uuid,
    pub user_id: Uuid,
    #[sqlx(rename = "type")]
    #[serde(rename = "type")]
    pub notification_type: NotificationType,
    pub message: String,
    pub read: bool,
    pub details: serde_json::Value,
    pub created_at: DateTime<Utc>,
}

impl Notification {
    pub fn new(
        user_id: Uuid,
        notification_type: NotificationType,
        message: impl Into<String>,
        details: serde_json::Value,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            user_id,
            notification_type,
            message: message.into(),
            read: false,
            details,
            created_at: Utc::now(),
        }
    }

    /// Candidata al barrido de retención: leída y más vieja que `cutoff`
    pub fn is_stale(&self, cutoff: DateTime<Utc>) -> bool {
        self.read && self.created_at < cutoff
    }
}
