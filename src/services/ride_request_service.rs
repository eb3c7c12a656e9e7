//! Fan-out de solicitudes de viaje y asignación de conductor
//!
//! Para una reserva con conductor se crea una RideRequest por cada conductor
//! elegible (disponible y en la ubicación del coche). Cada creación es una
//! tarea independiente: el resultado es un informe de éxito parcial, no un
//! todo-o-nada. Los ids se derivan de `(reserva, conductor)`, así que repetir
//! el fan-out de una reserva no duplica filas.
//!
//! Cada solicitud guarda `notified_at` cuando su aviso llega al conductor.
//! Un reintento vuelve a avisar las solicitudes pendientes que no lo tienen.
//!
//! Aceptar una solicitud NO rechaza las hermanas de la misma reserva ni
//! cambia el estado de la reserva. Varias pueden acabar aceptadas.

use std::sync::Arc;

use chrono::Utc;
use futures::future::join_all;
use rust_decimal::Decimal;
use serde::Serialize;
use serde_json::json;
use tracing::{info, warn};
use uuid::Uuid;

use crate::models::{
    Car, Driver, NotificationType, RentalRecord, RideRequest, RideRequestStatus,
};
use crate::repositories::Repositories;
use crate::services::driver_service::DriverService;
use crate::services::notification_service::{notify, Notifier};
use crate::services::pricing_service::{driver_pay, rental_days};
use crate::utils::errors::{forbidden_error, not_found_error, AppError, AppResult};

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct FanOutFailure {
    pub driver_user_id: Uuid,
    pub ride_request_id: Uuid,
    pub error: String,
}

#[derive(Debug, Clone, Default, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct FanOutReport {
    pub eligible: usize,
    pub created: Vec<Uuid>,
    /// Ya existían de un fan-out anterior de la misma reserva
    pub existing: Vec<Uuid>,
    pub failed: Vec<FanOutFailure>,
    /// Avisos entregados en esta pasada, incluidos los reenviados
    pub notified: usize,
    /// Solicitudes persistidas cuyo aviso no llegó; un reintento las reenvía
    pub unnotified: Vec<Uuid>,
    /// El roster de conductores no se pudo consultar
    #[serde(skip_serializing_if = "Option::is_none")]
    pub roster_error: Option<String>,
}

impl FanOutReport {
    /// Informe de un fan-out que no llegó a consultar conductores
    pub fn roster_unavailable(error: &AppError) -> Self {
        Self {
            roster_error: Some(error.to_string()),
            ..Self::default()
        }
    }

    pub fn is_complete(&self) -> bool {
        self.failed.is_empty() && self.unnotified.is_empty() && self.roster_error.is_none()
    }
}

/// Id determinista de la solicitud para `(reserva, conductor)`
pub fn ride_request_id(rental_id: Uuid, driver_user_id: Uuid) -> Uuid {
    Uuid::new_v5(&rental_id, driver_user_id.as_bytes())
}

enum Creation {
    Created,
    Existing(RideRequest),
}

#[derive(Clone)]
pub struct RideRequestService {
    repos: Repositories,
    notifier: Arc<dyn Notifier>,
    drivers: DriverService,
}

impl RideRequestService {
    pub fn new(repos: Repositories, notifier: Arc<dyn Notifier>) -> Self {
        let drivers = DriverService::new(repos.drivers.clone());
        Self {
            repos,
            notifier,
            drivers,
        }
    }

    fn build_request(booking: &RentalRecord, car: &Car, driver: &Driver, pay: Decimal) -> RideRequest {
        let now = Utc::now();
        RideRequest {
            id: ride_request_id(booking.id, driver.user_id),
            car_id: car.id,
            renter_id: booking.renter_id,
            offered_to: driver.user_id,
            driver_id: None,
            rental_id: booking.id,
            status: RideRequestStatus::Pending,
            pickup_location: car.location.clone(),
            dropoff_location: booking
                .dropoff_location
                .clone()
                .unwrap_or_else(|| car.location.clone()),
            start_date: booking.start_date,
            end_date: booking.end_date,
            driver_pay: pay,
            notified_at: None,
            created_at: now,
            updated_at: now,
        }
    }

    async fn create_one(&self, request: &RideRequest) -> AppResult<Creation> {
        if let Some(stored) = self.repos.ride_requests.find_by_id(request.id).await? {
            return Ok(Creation::Existing(stored));
        }
        self.repos.ride_requests.insert_if_absent(request).await?;
        Ok(Creation::Created)
    }

    /// Crea las solicitudes y después avisa a cada conductor con una
    /// solicitud nueva o con una pendiente que nunca recibió el aviso.
    /// Solo falla si no se puede consultar el roster.
    pub async fn fan_out(
        &self,
        booking: &RentalRecord,
        car: &Car,
        renter_name: Option<&str>,
    ) -> AppResult<FanOutReport> {
        let drivers = self.repos.drivers.find_available_in(&car.location).await?;
        let pay = driver_pay(rental_days(booking.start_date, booking.end_date));

        let candidates: Vec<RideRequest> = drivers
            .iter()
            .map(|driver| Self::build_request(booking, car, driver, pay))
            .collect();

        let outcomes = join_all(candidates.iter().map(|request| self.create_one(request))).await;

        let mut report = FanOutReport {
            eligible: candidates.len(),
            ..FanOutReport::default()
        };
        let mut to_notify: Vec<RideRequest> = Vec::new();
        for (request, outcome) in candidates.into_iter().zip(outcomes) {
            match outcome {
                Ok(Creation::Created) => {
                    report.created.push(request.id);
                    to_notify.push(request);
                }
                Ok(Creation::Existing(stored)) => {
                    report.existing.push(stored.id);
                    if stored.status == RideRequestStatus::Pending && stored.notified_at.is_none() {
                        to_notify.push(stored);
                    }
                }
                Err(e) => {
                    warn!(
                        rental_id = %booking.id,
                        driver_user_id = %request.offered_to,
                        error = %e,
                        "⚠️ No se pudo crear la solicitud de viaje"
                    );
                    report.failed.push(FanOutFailure {
                        driver_user_id: request.offered_to,
                        ride_request_id: request.id,
                        error: e.to_string(),
                    });
                }
            }
        }

        let delivered = join_all(
            to_notify
                .iter()
                .map(|request| self.notify_driver(booking, car, request, renter_name)),
        )
        .await;
        for (request, ok) in to_notify.iter().zip(delivered) {
            if ok {
                report.notified += 1;
            } else {
                report.unnotified.push(request.id);
            }
        }

        info!(
            rental_id = %booking.id,
            eligible = report.eligible,
            created = report.created.len(),
            existing = report.existing.len(),
            failed = report.failed.len(),
            notified = report.notified,
            unnotified = report.unnotified.len(),
            "📣 Fan-out de solicitudes de viaje"
        );

        Ok(report)
    }

    /// Avisa al conductor y marca la solicitud como notificada
    async fn notify_driver(
        &self,
        booking: &RentalRecord,
        car: &Car,
        request: &RideRequest,
        renter_name: Option<&str>,
    ) -> bool {
        let delivered = notify(
            self.notifier.as_ref(),
            request.offered_to,
            NotificationType::NewRideRequest,
            format!("New ride request for {}", car.display_name()),
            json!({
                "rideRequestId": request.id,
                "bookingId": booking.id,
                "carModel": car.display_name(),
                "renterName": renter_name,
                "pickupLocation": request.pickup_location,
                "dropoffLocation": request.dropoff_location,
                "startDate": request.start_date,
                "endDate": request.end_date,
                "driverPay": request.driver_pay,
            }),
        )
        .await;
        if !delivered {
            return false;
        }

        if let Err(e) = self.repos.ride_requests.mark_notified(request.id).await {
            warn!(ride_request_id = %request.id, error = %e, "⚠️ Aviso enviado pero no se pudo marcar la solicitud");
        }
        true
    }

    async fn load(&self, id: Uuid) -> AppResult<RideRequest> {
        self.repos
            .ride_requests
            .find_by_id(id)
            .await?
            .ok_or_else(|| not_found_error("Ride request", id))
    }

    fn ensure_status(request: &RideRequest, expected: RideRequestStatus) -> AppResult<()> {
        if request.status != expected {
            return Err(AppError::InvalidTransition {
                entity: "Ride request",
                current: request.status.to_string(),
            });
        }
        Ok(())
    }

    /// Cualquier conductor puede aceptar una solicitud pendiente; queda
    /// asignado. Las solicitudes hermanas siguen pendientes.
    pub async fn accept_ride(&self, driver_id: Uuid, id: Uuid) -> AppResult<RideRequest> {
        let mut request = self.load(id).await?;
        Self::ensure_status(&request, RideRequestStatus::Pending)?;

        request.status = RideRequestStatus::Accepted;
        request.driver_id = Some(driver_id);
        let request = self.repos.ride_requests.update(&request).await?;
        info!(ride_request_id = %id, driver_id = %driver_id, "✅ Solicitud de viaje aceptada");

        notify(
            self.notifier.as_ref(),
            request.renter_id,
            NotificationType::DriverAccepted,
            "A driver accepted your ride request".to_string(),
            json!({ "rideRequestId": request.id, "bookingId": request.rental_id, "driverId": driver_id }),
        )
        .await;

        Ok(request)
    }

    pub async fn reject_ride(&self, driver_id: Uuid, id: Uuid) -> AppResult<RideRequest> {
        let mut request = self.load(id).await?;
        Self::ensure_status(&request, RideRequestStatus::Pending)?;

        request.status = RideRequestStatus::Rejected;
        let request = self.repos.ride_requests.update(&request).await?;
        info!(ride_request_id = %id, driver_id = %driver_id, "🚫 Solicitud de viaje rechazada");

        notify(
            self.notifier.as_ref(),
            request.renter_id,
            NotificationType::DriverRejected,
            "A driver declined your ride request".to_string(),
            json!({ "rideRequestId": request.id, "bookingId": request.rental_id, "driverId": driver_id }),
        )
        .await;

        Ok(request)
    }

    /// accepted → completed por el conductor asignado; actualiza sus
    /// estadísticas con el pago del viaje.
    pub async fn complete_ride(
        &self,
        driver_id: Uuid,
        id: Uuid,
        rating: Option<f64>,
    ) -> AppResult<(RideRequest, Driver)> {
        let mut request = self.load(id).await?;
        Self::ensure_status(&request, RideRequestStatus::Accepted)?;
        if request.driver_id != Some(driver_id) {
            return Err(forbidden_error(
                "complete ride",
                "ride is assigned to another driver",
            ));
        }
        let profile = self.drivers.get_profile(driver_id).await?;

        request.status = RideRequestStatus::Completed;
        let request = self.repos.ride_requests.update(&request).await?;
        let profile = self
            .drivers
            .record_completed_ride(profile, request.driver_pay, rating)
            .await?;
        info!(ride_request_id = %id, driver_id = %driver_id, "🏁 Viaje completado");

        notify(
            self.notifier.as_ref(),
            request.renter_id,
            NotificationType::RideCompleted,
            "Your ride has been completed".to_string(),
            json!({ "rideRequestId": request.id, "bookingId": request.rental_id, "driverId": driver_id }),
        )
        .await;

        Ok((request, profile))
    }

    pub async fn list_offered(
        &self,
        driver_id: Uuid,
        status: Option<RideRequestStatus>,
    ) -> AppResult<Vec<RideRequest>> {
        self.repos
            .ride_requests
            .find_offered_to(driver_id, status)
            .await
    }

    pub async fn list_for_booking(&self, rental_id: Uuid) -> AppResult<Vec<RideRequest>> {
        self.repos.ride_requests.find_by_rental(rental_id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ride_request_id_is_stable_per_pair() {
        let rental = Uuid::new_v4();
        let driver = Uuid::new_v4();
        assert_eq!(ride_request_id(rental, driver), ride_request_id(rental, driver));
        assert_ne!(ride_request_id(rental, driver), ride_request_id(rental, Uuid::new_v4()));
        assert_ne!(ride_request_id(rental, driver), ride_request_id(Uuid::new_v4(), driver));
    }
}
