use async_trait::async_trait;
use chrono::Utc;
use sqlx::PgPool;
use uuid::Uuid;

use crate::models::Driver;
use crate::utils::errors::AppResult;

#[async_trait]
pub trait DriverRepository: Send + Sync {
    async fn insert(&self, driver: &Driver) -> AppResult<Driver>;
    async fn find_by_user(&self, user_id: Uuid) -> AppResult<Option<Driver>>;
    /// Conductores disponibles cuya ubicación contiene `location`
    /// (sin distinguir mayúsculas)
    async fn find_available_in(&self, location: &str) -> AppResult<Vec<Driver>>;
    async fn update(&self, driver: &Driver) -> AppResult<Driver>;
}

pub struct PgDriverRepository {
    pool: PgPool,
}

impl PgDriverRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Escapa comodines de LIKE para que la ubicación se compare literalmente
fn like_pattern(location: &str) -> String {
    let escaped = location
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_");
    format!("%{}%", escaped)
}

#[async_trait]
impl DriverRepository for PgDriverRepository {
    async fn insert(&self, driver: &Driver) -> AppResult<Driver> {
        let driver = sqlx::query_as::<_, Driver>(
            r#"
            INSERT INTO drivers (id, user_id, location, is_available, license_number, license_expiry,
                                 experience_years, vehicle_preferences, average_rating, total_rides,
                                 total_earnings, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13)
            RETURNING *
            "#,
        )
        .bind(driver.id)
        .bind(driver.user_id)
        .bind(&driver.location)
        .bind(driver.is_available)
        .bind(&driver.license_number)
        .bind(driver.license_expiry)
        .bind(driver.experience_years)
        .bind(&driver.vehicle_preferences)
        .bind(driver.average_rating)
        .bind(driver.total_rides)
        .bind(driver.total_earnings)
        .bind(driver.created_at)
        .bind(driver.updated_at)
        .fetch_one(&self.pool)
        .await?;

        Ok(driver)
    }

    async fn find_by_user(&self, user_id: Uuid) -> AppResult<Option<Driver>> {
        let driver = sqlx::query_as::<_, Driver>("SELECT * FROM drivers WHERE user_id = $1")
            .bind(user_id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(driver)
    }

    async fn find_available_in(&self, location: &str) -> AppResult<Vec<Driver>> {
        let drivers = sqlx::query_as::<_, Driver>(
            r#"
            SELECT * FROM drivers
            WHERE is_available = TRUE
              AND location ILIKE $1
            ORDER BY created_at
            "#,
        )
        .bind(like_pattern(location))
        .fetch_all(&self.pool)
        .await?;

        Ok(drivers)
    }

    async fn update(&self, driver: &Driver) -> AppResult<Driver> {
        let driver = sqlx::query_as::<_, Driver>(
            r#"
            UPDATE drivers
            SET location = $2, is_available = $3, average_rating = $4, total_rides = $5,
                total_earnings = $6, updated_at = $7
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(driver.id)
        .bind(&driver.location)
        .bind(driver.is_available)
        .bind(driver.average_rating)
        .bind(driver.total_rides)
        .bind(driver.total_earnings)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await?;

        Ok(driver)
    }
}
