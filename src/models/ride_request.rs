//! Modelo de RideRequest
//!
//! Oferta de viaje enviada a un conductor elegible cuando una reserva pide
//! conductor. Puede haber varias por reserva (una por conductor).

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, Type};
use std::fmt;
use uuid::Uuid;

/// Estado de la solicitud - mapea al ENUM ride_request_status
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Type, PartialEq, Eq)]
#[sqlx(type_name = "ride_request_status", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum RideRequestStatus {
    Pending,
    Accepted,
    Rejected,
    Completed,
    Cancelled,
}

impl RideRequestStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            RideRequestStatus::Pending => "pending",
            RideRequestStatus::Accepted => "accepted",
            RideRequestStatus::Rejected => "rejected",
            RideRequestStatus::Completed => "completed",
            RideRequestStatus::Cancelled => "cancelled",
        }
    }
}

impl fmt::Display for RideRequestStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RideRequest {
    pub id: Uuid,
    pub car_id: Uuid,
    pub renter_id: Uuid,
    /// Conductor al que se ofreció la solicitud
    pub offered_to: Uuid,
    /// Conductor asignado; `None` hasta que alguien acepta
    pub driver_id: Option<Uuid>,
    pub rental_id: Uuid,
    pub status: RideRequestStatus,
    pub pickup_location: String,
    pub dropoff_location: String,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    pub driver_pay: Decimal,
    /// Momento en que se avisó al conductor; `None` si el aviso no llegó
    pub notified_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
