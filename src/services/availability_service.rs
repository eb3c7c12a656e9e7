//! Chequeo de disponibilidad
//!
//! Dos caminos: el flag manual `is_available` del coche y el chequeo de
//! solapamiento contra las reservas vigentes. El flujo de reservas exige
//! ambos. El chequeo de solapamiento es lectura-luego-escritura sin bloqueo:
//! dos reservas concurrentes para el mismo periodo pueden pasar las dos.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use crate::models::Car;
use crate::repositories::RentalRepository;
use crate::utils::errors::{AppError, AppResult};

/// Valida la ventana y el flag manual del coche. No mira otras reservas.
pub fn check_availability(car: &Car, start: DateTime<Utc>, end: DateTime<Utc>) -> AppResult<()> {
    if end <= start {
        return Err(AppError::InvalidWindow);
    }
    if !car.is_available {
        return Err(AppError::CarUnavailable(car.id));
    }
    Ok(())
}

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AvailabilityReport {
    pub car_id: Uuid,
    pub flag_available: bool,
    pub conflicting_bookings: Vec<Uuid>,
    pub available: bool,
}

#[derive(Clone)]
pub struct AvailabilityService {
    rentals: Arc<dyn RentalRepository>,
}

impl AvailabilityService {
    pub fn new(rentals: Arc<dyn RentalRepository>) -> Self {
        Self { rentals }
    }

    /// Falla con `BookingConflict` si alguna reserva vigente se solapa
    pub async fn check_no_overlap(
        &self,
        car_id: Uuid,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> AppResult<()> {
        let overlapping = self.rentals.find_overlapping(car_id, start, end).await?;
        if overlapping.is_empty() {
            return Ok(());
        }
        Err(AppError::BookingConflict {
            car_id,
            conflicting: overlapping.into_iter().map(|r| r.id).collect(),
        })
    }

    /// Ambos caminos a la vez, sin fallar: para la consulta pública
    pub async fn report(
        &self,
        car: &Car,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> AppResult<AvailabilityReport> {
        if end <= start {
            return Err(AppError::InvalidWindow);
        }
        let conflicting: Vec<Uuid> = self
            .rentals
            .find_overlapping(car.id, start, end)
            .await?
            .into_iter()
            .map(|r| r.id)
            .collect();

        Ok(AvailabilityReport {
            car_id: car.id,
            flag_available: car.is_available,
            available: car.is_available && conflicting.is_empty(),
            conflicting_bookings: conflicting,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::NewCar;
    use chrono::TimeZone;
    use rust_decimal::Decimal;

    fn car(available: bool) -> Car {
        let mut car = Car::from_new(NewCar {
            owner_id: Uuid::new_v4(),
            make: "Maruti".into(),
            model: "Swift".into(),
            year: 2022,
            price_per_day: Decimal::from(1000),
            location: "Delhi".into(),
            category: "hatchback".into(),
            features: vec![],
        });
        car.is_available = available;
        car
    }

    fn day(d: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 1, d, 0, 0, 0).unwrap()
    }

    #[test]
    fn test_valid_window_on_available_car() {
        assert!(check_availability(&car(true), day(10), day(13)).is_ok());
    }

    #[test]
    fn test_end_not_after_start_is_invalid_window() {
        assert!(matches!(
            check_availability(&car(true), day(10), day(10)),
            Err(AppError::InvalidWindow)
        ));
        assert!(matches!(
            check_availability(&car(true), day(12), day(10)),
            Err(AppError::InvalidWindow)
        ));
    }

    #[test]
    fn test_window_checked_before_flag() {
        assert!(matches!(
            check_availability(&car(false), day(12), day(10)),
            Err(AppError::InvalidWindow)
        ));
    }

    #[test]
    fn test_flag_off_is_unavailable() {
        let car = car(false);
        assert!(matches!(
            check_availability(&car, day(10), day(13)),
            Err(AppError::CarUnavailable(id)) if id == car.id
        ));
    }
}
