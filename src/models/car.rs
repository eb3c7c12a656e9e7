//! Modelo de Car
//!
//! Un coche publicado por su dueño. `is_available` es un override manual del
//! dueño; el flujo de reservas nunca lo modifica.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Car {
    pub id: Uuid,
    pub owner_id: Uuid,
    pub make: String,
    pub model: String,
    pub year: i32,
    pub price_per_day: Decimal,
    pub is_available: bool,
    pub location: String,
    pub category: String,
    pub features: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Campos para crear un coche, ya validados
#[derive(Debug, Clone)]
pub struct NewCar {
    pub owner_id: Uuid,
    pub make: String,
    pub model: String,
    pub year: i32,
    pub price_per_day: Decimal,
    pub location: String,
    pub category: String,
    pub features: Vec<String>,
}

impl Car {
    pub fn from_new(new: NewCar) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            owner_id: new.owner_id,
            make: new.make,
            model: new.model,
            year: new.year,
            price_per_day: new.price_per_day,
            is_available: true,
            location: new.location,
            category: new.category,
            features: new.features,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn display_name(&self) -> String {
        format!("{} {}", self.make, self.model)
    }
}
