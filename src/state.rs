//! Shared application state
//!
//! Este módulo define el estado compartido de la aplicación que se pasa
//! a través del router de Axum.

use std::sync::Arc;

use crate::config::environment::EnvironmentConfig;
use crate::repositories::Repositories;
use crate::services::notification_service::{Notifier, StoreNotifier};
use crate::utils::jwt::JwtConfig;

#[derive(Clone)]
pub struct AppState {
    pub repos: Repositories,
    pub notifier: Arc<dyn Notifier>,
    pub config: EnvironmentConfig,
    pub jwt: JwtConfig,
}

impl AppState {
    /// Estado con el notifier por defecto, que persiste en el mismo store
    pub fn new(repos: Repositories, config: EnvironmentConfig) -> Self {
        let notifier: Arc<dyn Notifier> = Arc::new(StoreNotifier::new(repos.notifications.clone()));
        Self::with_notifier(repos, notifier, config)
    }

    pub fn with_notifier(
        repos: Repositories,
        notifier: Arc<dyn Notifier>,
        config: EnvironmentConfig,
    ) -> Self {
        let jwt = JwtConfig::from(&config);
        Self {
            repos,
            notifier,
            config,
            jwt,
        }
    }
}
