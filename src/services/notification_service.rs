//! Notificaciones
//!
//! `Notifier` es la frontera con el colaborador externo: el flujo de reservas
//! solo registra el evento. La implementación por defecto lo persiste en el
//! entity store; la entrega (push, email) queda fuera de este servicio.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use chrono::Utc;
use tokio::task::JoinHandle;
use tracing::{info, warn};
use uuid::Uuid;

use crate::models::{Notification, NotificationType};
use crate::repositories::NotificationRepository;
use crate::utils::errors::{forbidden_error, not_found_error, AppResult};

#[async_trait]
pub trait Notifier: Send + Sync {
    async fn create(
        &self,
        user_id: Uuid,
        notification_type: NotificationType,
        message: String,
        details: serde_json::Value,
    ) -> AppResult<Notification>;
}

/// Notifier que guarda la notificación en el repositorio
pub struct StoreNotifier {
    repository: Arc<dyn NotificationRepository>,
}

impl StoreNotifier {
    pub fn new(repository: Arc<dyn NotificationRepository>) -> Self {
        Self { repository }
    }
}

#[async_trait]
impl Notifier for StoreNotifier {
    async fn create(
        &self,
        user_id: Uuid,
        notification_type: NotificationType,
        message: String,
        details: serde_json::Value,
    ) -> AppResult<Notification> {
        let notification = Notification::new(user_id, notification_type, message, details);
        self.repository.insert(&notification).await
    }
}

/// Fire-and-forget: un fallo se registra en el log y no se propaga.
/// Devuelve si la notificación quedó creada.
pub async fn notify(
    notifier: &dyn Notifier,
    user_id: Uuid,
    notification_type: NotificationType,
    message: String,
    details: serde_json::Value,
) -> bool {
    match notifier
        .create(user_id, notification_type, message, details)
        .await
    {
        Ok(_) => true,
        Err(e) => {
            warn!(user_id = %user_id, ?notification_type, error = %e, "⚠️ No se pudo crear la notificación");
            false
        }
    }
}

#[derive(Clone)]
pub struct NotificationService {
    repository: Arc<dyn NotificationRepository>,
}

impl NotificationService {
    pub fn new(repository: Arc<dyn NotificationRepository>) -> Self {
        Self { repository }
    }

    pub async fn list(&self, user_id: Uuid, unread_only: bool) -> AppResult<Vec<Notification>> {
        self.repository.find_by_user(user_id, unread_only).await
    }

    async fn load_owned(&self, user_id: Uuid, id: Uuid) -> AppResult<Notification> {
        let notification = self
            .repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| not_found_error("Notification", id))?;

        if notification.user_id != user_id {
            return Err(forbidden_error(
                "access notification",
                "it belongs to another user",
            ));
        }
        Ok(notification)
    }

    pub async fn mark_read(&self, user_id: Uuid, id: Uuid) -> AppResult<Notification> {
        let notification = self.load_owned(user_id, id).await?;
        if notification.read {
            return Ok(notification);
        }
        self.repository.mark_read(id).await
    }

    pub async fn mark_all_read(&self, user_id: Uuid) -> AppResult<u64> {
        self.repository.mark_all_read(user_id).await
    }

    pub async fn delete(&self, user_id: Uuid, id: Uuid) -> AppResult<()> {
        self.load_owned(user_id, id).await?;
        self.repository.delete(id).await?;
        Ok(())
    }

    /// Barrido de retención: borra las leídas con más de `retention_days` días
    pub async fn purge_stale(&self, retention_days: i64) -> AppResult<u64> {
        let cutoff = Utc::now() - chrono::Duration::days(retention_days);
        let removed = self.repository.delete_read_before(cutoff).await?;
        info!(removed, retention_days, "🧹 Barrido de notificaciones completado");
        Ok(removed)
    }

    /// Lanza el barrido periódico en background
    pub fn spawn_retention_sweep(self, every: Duration, retention_days: i64) -> JoinHandle<()> {
        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(every);
            loop {
                ticker.tick().await;
                if let Err(e) = self.purge_stale(retention_days).await {
                    warn!(error = %e, "⚠️ Falló el barrido de notificaciones");
                }
            }
        })
    }
}
