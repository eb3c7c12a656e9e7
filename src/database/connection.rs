//! Conexión a PostgreSQL
//!
//! Crea el pool y aplica las migraciones de `migrations/` al arrancar.

use anyhow::{Context, Result};
use sqlx::PgPool;
use tracing::info;

use crate::config::DatabaseConfig;

pub struct DatabaseConnection;

impl DatabaseConnection {
    /// Conecta y aplica migraciones pendientes
    pub async fn connect(config: &DatabaseConfig) -> Result<PgPool> {
        info!(url = %mask_database_url(&config.url), "🔌 Conectando a PostgreSQL");

        let pool = config
            .create_pool()
            .await
            .context("failed to connect to PostgreSQL")?;

        sqlx::migrate!("./migrations")
            .run(&pool)
            .await
            .context("failed to run database migrations")?;

        info!("✅ Base de datos lista, migraciones aplicadas");
        Ok(pool)
    }
}

/// Función helper para enmascarar la URL de la base de datos en logs
pub fn mask_database_url(url: &str) -> String {
    let Some(at_pos) = url.find('@') else {
        return url.to_string();
    };
    let scheme_end = url.find("://").map(|i| i + 3).unwrap_or(0);
    if scheme_end > at_pos {
        return url.to_string();
    }
    format!("{}***:***@{}", &url[..scheme_end], &url[at_pos + 1..])
}
