//! DTOs del conductor

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::models::{Driver, NewDriver};
use crate::utils::errors::{AppError, AppResult};

/// Body de `PATCH /driver/toggle-availability`
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ToggleAvailabilityRequest {
    pub is_available: Option<bool>,
}

impl ToggleAvailabilityRequest {
    pub fn required(&self) -> AppResult<bool> {
        self.is_available
            .ok_or_else(|| AppError::BadRequest("isAvailable is required".to_string()))
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AvailabilityResponse {
    pub is_available: bool,
}

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateDriverProfileRequest {
    #[validate(length(min = 1, max = 120))]
    pub location: String,
    #[validate(length(min = 5, max = 30))]
    pub license_number: String,
    pub license_expiry: NaiveDate,
    #[validate(range(min = 0, max = 60))]
    pub experience_years: i32,
    #[serde(default)]
    pub vehicle_preferences: Vec<String>,
}

impl CreateDriverProfileRequest {
    pub fn into_new_driver(self, user_id: Uuid) -> AppResult<NewDriver> {
        self.validate()?;
        Ok(NewDriver {
            user_id,
            location: self.location,
            license_number: self.license_number,
            license_expiry: self.license_expiry,
            experience_years: self.experience_years,
            vehicle_preferences: self.vehicle_preferences,
        })
    }
}

#[derive(Debug, Serialize)]
pub struct DriverProfileResponse {
    pub driver: Driver,
}
