//! Ciclo de vida de la reserva (RentalRecord)
//!
//! Orden de creación: validar fechas, cargar coche, comprobar el flag y el
//! solapamiento, calcular precio, persistir, fan-out (si pide conductor) y
//! por último notificar al dueño. Reserva y fan-out no son atómicos: si el
//! fan-out falla a medias la reserva queda persistida y el informe lo dice;
//! `retry_fan_out` lo repite sin duplicar solicitudes. Tras persistir una
//! escritura, las lecturas auxiliares que fallan solo se registran.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::json;
use tracing::{info, warn};
use uuid::Uuid;

use crate::models::{Car, NotificationType, PaymentStatus, RentalRecord, RentalStatus, RideRequest};
use crate::repositories::Repositories;
use crate::services::availability_service::{check_availability, AvailabilityService};
use crate::services::notification_service::{notify, Notifier};
use crate::services::pricing_service::{compute_price, rental_days};
use crate::services::ride_request_service::{FanOutReport, RideRequestService};
use crate::utils::errors::{forbidden_error, not_found_error, AppError, AppResult};

/// Entrada de `create_booking`. Las fechas son opcionales para poder
/// distinguir `MissingDates` de una ventana inválida.
#[derive(Debug, Clone)]
pub struct CreateBookingInput {
    pub renter_id: Uuid,
    pub car_id: Uuid,
    pub start_date: Option<DateTime<Utc>>,
    pub end_date: Option<DateTime<Utc>>,
    pub with_driver: bool,
    pub dropoff_location: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingOutcome {
    pub booking: RentalRecord,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fan_out: Option<FanOutReport>,
}

#[derive(Clone)]
pub struct BookingService {
    repos: Repositories,
    notifier: Arc<dyn Notifier>,
    availability: AvailabilityService,
    ride_requests: RideRequestService,
}

impl BookingService {
    pub fn new(repos: Repositories, notifier: Arc<dyn Notifier>) -> Self {
        let availability = AvailabilityService::new(repos.rentals.clone());
        let ride_requests = RideRequestService::new(repos.clone(), notifier.clone());
        Self {
            repos,
            notifier,
            availability,
            ride_requests,
        }
    }

    async fn load_car(&self, car_id: Uuid) -> AppResult<Car> {
        self.repos
            .cars
            .find_by_id(car_id)
            .await?
            .ok_or_else(|| not_found_error("Car", car_id))
    }

    /// Nombre del renter para los avisos. Es solo decorativo: si el
    /// directorio de usuarios falla se sigue sin nombre.
    async fn renter_name(&self, renter_id: Uuid) -> Option<String> {
        match self.repos.users.find_by_id(renter_id).await {
            Ok(user) => user.map(|user| user.name),
            Err(e) => {
                warn!(renter_id = %renter_id, error = %e, "⚠️ No se pudo leer el nombre del renter");
                None
            }
        }
    }

    pub async fn create_booking(&self, input: CreateBookingInput) -> AppResult<BookingOutcome> {
        let (start, end) = match (input.start_date, input.end_date) {
            (Some(start), Some(end)) => (start, end),
            _ => return Err(AppError::MissingDates),
        };
        if end <= start {
            return Err(AppError::InvalidWindow);
        }

        let car = self.load_car(input.car_id).await?;
        check_availability(&car, start, end)?;
        // Sin bloqueo: otra reserva puede colarse entre este chequeo y el insert
        self.availability.check_no_overlap(car.id, start, end).await?;

        let days = rental_days(start, end);
        let total_price = compute_price(car.price_per_day, input.with_driver, days);

        let now = Utc::now();
        let record = RentalRecord {
            id: Uuid::new_v4(),
            car_id: car.id,
            renter_id: input.renter_id,
            start_date: start,
            end_date: end,
            total_price,
            status: RentalStatus::initial(input.with_driver),
            payment_status: PaymentStatus::Pending,
            with_driver: input.with_driver,
            dropoff_location: input.dropoff_location,
            created_at: now,
            updated_at: now,
        };
        let booking = self.repos.rentals.insert(&record).await?;
        info!(
            booking_id = %booking.id,
            car_id = %car.id,
            renter_id = %booking.renter_id,
            days,
            total_price = %booking.total_price,
            status = %booking.status,
            "✅ Reserva creada"
        );

        // A partir de aquí la reserva ya existe: ningún fallo se propaga
        let renter_name = self.renter_name(booking.renter_id).await;

        let fan_out = if booking.with_driver {
            let report = match self
                .ride_requests
                .fan_out(&booking, &car, renter_name.as_deref())
                .await
            {
                Ok(report) => report,
                Err(e) => {
                    warn!(booking_id = %booking.id, error = %e, "⚠️ Roster de conductores no disponible, fan-out pendiente de reintento");
                    FanOutReport::roster_unavailable(&e)
                }
            };
            Some(report)
        } else {
            None
        };

        notify(
            self.notifier.as_ref(),
            car.owner_id,
            NotificationType::NewBooking,
            format!("New booking for your {}", car.display_name()),
            json!({
                "bookingId": booking.id,
                "carId": car.id,
                "carModel": car.display_name(),
                "renterName": renter_name,
                "startDate": booking.start_date,
                "endDate": booking.end_date,
                "totalPrice": booking.total_price,
                "withDriver": booking.with_driver,
            }),
        )
        .await;

        Ok(BookingOutcome { booking, fan_out })
    }

    /// Repite el fan-out de una reserva con conductor todavía pendiente.
    /// Las solicitudes ya creadas se reportan como existentes.
    pub async fn retry_fan_out(&self, renter_id: Uuid, booking_id: Uuid) -> AppResult<FanOutReport> {
        let booking = self.get_for_renter(renter_id, booking_id).await?;
        if !booking.with_driver {
            return Err(AppError::BadRequest(format!(
                "Booking '{}' does not request a driver",
                booking.id
            )));
        }
        if booking.status != RentalStatus::Pending {
            return Err(AppError::InvalidTransition {
                entity: "Booking",
                current: booking.status.to_string(),
            });
        }
        let car = self.load_car(booking.car_id).await?;
        let renter_name = self.renter_name(renter_id).await;
        self.ride_requests
            .fan_out(&booking, &car, renter_name.as_deref())
            .await
    }

    /// Solicitudes de viaje generadas para una reserva del renter
    pub async fn ride_requests_for(&self, renter_id: Uuid, booking_id: Uuid) -> AppResult<Vec<RideRequest>> {
        let booking = self.get_for_renter(renter_id, booking_id).await?;
        self.ride_requests.list_for_booking(booking.id).await
    }

    async fn load(&self, booking_id: Uuid) -> AppResult<RentalRecord> {
        self.repos
            .rentals
            .find_by_id(booking_id)
            .await?
            .ok_or_else(|| not_found_error("Booking", booking_id))
    }

    pub async fn get_for_renter(&self, renter_id: Uuid, booking_id: Uuid) -> AppResult<RentalRecord> {
        let booking = self.load(booking_id).await?;
        if booking.renter_id != renter_id {
            return Err(forbidden_error("access booking", "it belongs to another renter"));
        }
        Ok(booking)
    }

    /// Cancelar dos veces es un no-op: la segunda llamada devuelve la reserva
    /// tal cual, sin persistir ni notificar. Solo `completed` se rechaza.
    pub async fn cancel_booking(&self, renter_id: Uuid, booking_id: Uuid) -> AppResult<RentalRecord> {
        let mut booking = self.load(booking_id).await?;
        if booking.renter_id != renter_id {
            return Err(forbidden_error("cancel booking", "only the renter who booked may cancel"));
        }

        match booking.status {
            RentalStatus::Completed => return Err(AppError::AlreadyCompleted(booking.id)),
            RentalStatus::Cancelled => {
                warn!(booking_id = %booking.id, "⚠️ La reserva ya estaba cancelada");
                return Ok(booking);
            }
            _ => {}
        }

        let previous = booking.status;
        booking.status = RentalStatus::Cancelled;
        let booking = self.repos.rentals.update(&booking).await?;
        info!(booking_id = %booking.id, from = %previous, "🚫 Reserva cancelada");

        match self.repos.cars.find_by_id(booking.car_id).await {
            Ok(Some(car)) => {
                notify(
                    self.notifier.as_ref(),
                    car.owner_id,
                    NotificationType::BookingCancelled,
                    format!("A booking for your {} was cancelled", car.display_name()),
                    json!({
                        "bookingId": booking.id,
                        "carId": car.id,
                        "startDate": booking.start_date,
                        "endDate": booking.end_date,
                    }),
                )
                .await;
            }
            Ok(None) => warn!(booking_id = %booking.id, car_id = %booking.car_id, "⚠️ Coche de la reserva no encontrado, sin notificación al dueño"),
            Err(e) => warn!(booking_id = %booking.id, error = %e, "⚠️ No se pudo cargar el coche, sin notificación al dueño"),
        }

        Ok(booking)
    }

    pub async fn list_for_renter(&self, renter_id: Uuid) -> AppResult<Vec<RentalRecord>> {
        self.repos.rentals.find_by_renter(renter_id).await
    }

    pub async fn list_for_owner(&self, owner_id: Uuid) -> AppResult<Vec<RentalRecord>> {
        self.repos.rentals.find_by_car_owner(owner_id).await
    }
}
