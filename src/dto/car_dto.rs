//! DTOs de coches

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::models::{Car, NewCar};
use crate::services::car_service::CarChanges;
use crate::utils::errors::AppResult;

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateCarRequest {
    #[validate(length(min = 1, max = 50))]
    pub make: String,
    #[validate(length(min = 1, max = 50))]
    pub model: String,
    #[validate(range(min = 1950, max = 2100))]
    pub year: i32,
    pub price_per_day: Decimal,
    #[validate(length(min = 1, max = 120))]
    pub location: String,
    #[validate(length(min = 1, max = 30))]
    pub category: String,
    #[serde(default)]
    pub features: Vec<String>,
}

impl CreateCarRequest {
    pub fn into_new_car(self, owner_id: Uuid) -> AppResult<NewCar> {
        self.validate()?;
        Ok(NewCar {
            owner_id,
            make: self.make,
            model: self.model,
            year: self.year,
            price_per_day: self.price_per_day,
            location: self.location,
            category: self.category,
            features: self.features,
        })
    }
}

#[derive(Debug, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateCarRequest {
    #[validate(length(min = 1, max = 50))]
    pub make: Option<String>,
    #[validate(length(min = 1, max = 50))]
    pub model: Option<String>,
    #[validate(range(min = 1950, max = 2100))]
    pub year: Option<i32>,
    pub price_per_day: Option<Decimal>,
    #[validate(length(min = 1, max = 120))]
    pub location: Option<String>,
    #[validate(length(min = 1, max = 30))]
    pub category: Option<String>,
    pub features: Option<Vec<String>>,
}

impl UpdateCarRequest {
    pub fn into_changes(self) -> AppResult<CarChanges> {
        self.validate()?;
        Ok(CarChanges {
            make: self.make,
            model: self.model,
            year: self.year,
            price_per_day: self.price_per_day,
            location: self.location,
            category: self.category,
            features: self.features,
        })
    }
}

#[derive(Debug, Serialize)]
pub struct CarResponse {
    pub car: Car,
}

#[derive(Debug, Serialize)]
pub struct CarListResponse {
    pub cars: Vec<Car>,
}
