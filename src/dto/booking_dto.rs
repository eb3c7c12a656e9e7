//! DTOs de reservas

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::models::RentalRecord;
use crate::services::booking_service::CreateBookingInput;
use crate::utils::errors::{field_error, AppResult};
use crate::utils::validation::parse_booking_date;

/// Body de `POST /car-renter/cars/:id/book`
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateBookingRequest {
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    #[serde(default)]
    pub with_driver: bool,
    #[validate(length(min = 1, max = 200))]
    pub dropoff_location: Option<String>,
}

fn parse_optional(field: &'static str, value: Option<&str>) -> AppResult<Option<DateTime<Utc>>> {
    match value.map(str::trim).filter(|v| !v.is_empty()) {
        Some(raw) => parse_booking_date(raw)
            .map(Some)
            .map_err(|e| field_error(field, e)),
        None => Ok(None),
    }
}

impl CreateBookingRequest {
    /// Fechas vacías cuentan como ausentes; el servicio decide `MissingDates`
    pub fn into_input(self, renter_id: Uuid, car_id: Uuid) -> AppResult<CreateBookingInput> {
        self.validate()?;
        Ok(CreateBookingInput {
            renter_id,
            car_id,
            start_date: parse_optional("startDate", self.start_date.as_deref())?,
            end_date: parse_optional("endDate", self.end_date.as_deref())?,
            with_driver: self.with_driver,
            dropoff_location: self.dropoff_location,
        })
    }
}

/// Query de `GET /car-renter/cars/:id/availability`
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AvailabilityQuery {
    pub start_date: Option<String>,
    pub end_date: Option<String>,
}

impl AvailabilityQuery {
    pub fn window(&self) -> AppResult<Option<(DateTime<Utc>, DateTime<Utc>)>> {
        let start = parse_optional("startDate", self.start_date.as_deref())?;
        let end = parse_optional("endDate", self.end_date.as_deref())?;
        Ok(start.zip(end))
    }
}

#[derive(Debug, Serialize)]
pub struct BookingResponse {
    pub booking: RentalRecord,
}

#[derive(Debug, Serialize)]
pub struct BookingListResponse {
    pub bookings: Vec<RentalRecord>,
}
