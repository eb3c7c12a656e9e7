//! Modelo de RentalRecord (reserva)
//!
//! Una reserva nunca se borra: solo cambia de estado. El precio total se
//! calcula al crearla y no se vuelve a tocar.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, Type};
use std::fmt;
use uuid::Uuid;

/// Estado de la reserva - mapea al ENUM rental_status
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Type, PartialEq, Eq)]
#[sqlx(type_name = "rental_status", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum RentalStatus {
    Pending,
    Confirmed,
    Approved,
    Rejected,
    Active,
    Completed,
    Cancelled,
}

impl RentalStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            RentalStatus::Pending => "pending",
            RentalStatus::Confirmed => "confirmed",
            RentalStatus::Approved => "approved",
            RentalStatus::Rejected => "rejected",
            RentalStatus::Active => "active",
            RentalStatus::Completed => "completed",
            RentalStatus::Cancelled => "cancelled",
        }
    }

    /// Estado inicial según si la reserva pide conductor
    pub fn initial(with_driver: bool) -> Self {
        if with_driver {
            RentalStatus::Pending
        } else {
            RentalStatus::Confirmed
        }
    }

    /// Estados que siguen ocupando el coche para el chequeo de solapamiento
    pub fn blocks_calendar(&self) -> bool {
        !matches!(self, RentalStatus::Cancelled | RentalStatus::Rejected)
    }
}

impl fmt::Display for RentalStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Estado de pago - mapea al ENUM payment_status
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Type, PartialEq, Eq)]
#[sqlx(type_name = "payment_status", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum PaymentStatus {
    Pending,
    Paid,
    Refunded,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RentalRecord {
    pub id: Uuid,
    pub car_id: Uuid,
    pub renter_id: Uuid,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    pub total_price: Decimal,
    pub status: RentalStatus,
    pub payment_status: PaymentStatus,
    pub with_driver: bool,
    pub dropoff_location: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl RentalRecord {
    /// Intervalo semiabierto `[start, end)`
    pub fn overlaps(&self, start: DateTime<Utc>, end: DateTime<Utc>) -> bool {
        self.start_date < end && start < self.end_date
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn record(start_day: u32, end_day: u32) -> RentalRecord {
        let now = Utc::now();
        RentalRecord {
            id: Uuid::new_v4(),
            car_id: Uuid::new_v4(),
            renter_id: Uuid::new_v4(),
            start_date: Utc.with_ymd_and_hms(2025, 1, start_day, 0, 0, 0).unwrap(),
            end_date: Utc.with_ymd_and_hms(2025, 1, end_day, 0, 0, 0).unwrap(),
            total_price: Decimal::from(1000),
            status: RentalStatus::Confirmed,
            payment_status: PaymentStatus::Pending,
            with_driver: false,
            dropoff_location: None,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn test_overlap_is_half_open() {
        let r = record(10, 13);
        let day = |d| Utc.with_ymd_and_hms(2025, 1, d, 0, 0, 0).unwrap();
        assert!(r.overlaps(day(12), day(15)));
        assert!(r.overlaps(day(8), day(11)));
        assert!(r.overlaps(day(11), day(12)));
        assert!(!r.overlaps(day(13), day(15)));
        assert!(!r.overlaps(day(5), day(10)));
    }

    #[test]
    fn test_initial_status() {
        assert_eq!(RentalStatus::initial(true), RentalStatus::Pending);
        assert_eq!(RentalStatus::initial(false), RentalStatus::Confirmed);
    }

    #[test]
    fn test_cancelled_does_not_block_calendar() {
        assert!(!RentalStatus::Cancelled.blocks_calendar());
        assert!(!RentalStatus::Rejected.blocks_calendar());
        assert!(RentalStatus::Pending.blocks_calendar());
        assert!(RentalStatus::Completed.blocks_calendar());
    }
}
