//! Perfil y estadísticas del conductor

use std::sync::Arc;

use rust_decimal::Decimal;
use tracing::info;
use uuid::Uuid;

use crate::models::{Driver, NewDriver};
use crate::repositories::DriverRepository;
use crate::utils::errors::{not_found_error, AppError, AppResult};

/// Aplica un viaje completado a las estadísticas del conductor.
///
/// El rating es una media móvil incremental con pesos `((n-1)/n, 1/n)`,
/// donde `n` es el total de viajes tras el incremento. Los viajes sin rating
/// también cuentan en `n`. No se guarda el historial de ratings.
pub fn apply_completed_ride(driver: &mut Driver, earnings: Decimal, rating: Option<f64>) {
    driver.total_rides += 1;
    driver.total_earnings += earnings;

    if let Some(rating) = rating {
        let n = f64::from(driver.total_rides);
        driver.average_rating = driver.average_rating * ((n - 1.0) / n) + rating * (1.0 / n);
    }
}

#[derive(Clone)]
pub struct DriverService {
    drivers: Arc<dyn DriverRepository>,
}

impl DriverService {
    pub fn new(drivers: Arc<dyn DriverRepository>) -> Self {
        Self { drivers }
    }

    pub async fn create_profile(&self, new: NewDriver) -> AppResult<Driver> {
        if self.drivers.find_by_user(new.user_id).await?.is_some() {
            return Err(AppError::Conflict(format!(
                "Driver profile for user '{}' already exists",
                new.user_id
            )));
        }
        let driver = self.drivers.insert(&Driver::from_new(new)).await?;
        info!(driver_id = %driver.id, user_id = %driver.user_id, "✅ Perfil de conductor creado");
        Ok(driver)
    }

    pub async fn get_profile(&self, user_id: Uuid) -> AppResult<Driver> {
        self.drivers
            .find_by_user(user_id)
            .await?
            .ok_or_else(|| not_found_error("Driver profile", user_id))
    }

    pub async fn set_availability(&self, user_id: Uuid, is_available: bool) -> AppResult<Driver> {
        let mut driver = self.get_profile(user_id).await?;
        driver.is_available = is_available;
        let driver = self.drivers.update(&driver).await?;
        info!(user_id = %user_id, is_available, "🔄 Disponibilidad del conductor actualizada");
        Ok(driver)
    }

    /// Invocado por el flujo de finalización de viajes
    pub async fn record_completed_ride(
        &self,
        mut driver: Driver,
        earnings: Decimal,
        rating: Option<f64>,
    ) -> AppResult<Driver> {
        apply_completed_ride(&mut driver, earnings, rating);
        self.drivers.update(&driver).await
    }
}
