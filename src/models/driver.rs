//! Modelo de Driver
//!
//! Perfil de conductor, distinto de la identidad de usuario (1:1 por
//! `user_id`). Mantiene estadísticas acumuladas de viajes.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Driver {
    pub id: Uuid,
    pub user_id: Uuid,
    pub location: String,
    pub is_available: bool,
    pub license_number: String,
    pub license_expiry: NaiveDate,
    pub experience_years: i32,
    pub vehicle_preferences: Vec<String>,
    pub average_rating: f64,
    pub total_rides: i32,
    pub total_earnings: Decimal,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewDriver {
    pub user_id: Uuid,
    pub location: String,
    pub license_number: String,
    pub license_expiry: NaiveDate,
    pub experience_years: i32,
    pub vehicle_preferences: Vec<String>,
}

impl Driver {
    pub fn from_new(new: NewDriver) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            user_id: new.user_id,
            location: new.location,
            is_available: true,
            license_number: new.license_number,
            license_expiry: new.license_expiry,
            experience_years: new.experience_years,
            vehicle_preferences: new.vehicle_preferences,
            average_rating: 0.0,
            total_rides: 0,
            total_earnings: Decimal::ZERO,
            created_at: now,
            updated_at: now,
        }
    }

    /// Coincidencia de ubicación: substring sin distinguir mayúsculas
    pub fn serves_location(&self, car_location: &str) -> bool {
        self.location
            .to_lowercase()
            .contains(&car_location.to_lowercase())
    }
}
