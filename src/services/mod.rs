//! Services module
//!
//! Este módulo contiene la lógica de negocio de reservas, disponibilidad,
//! precios, fan-out de solicitudes de viaje y notificaciones.
//! Los servicios combinan varios repositorios y el `Notifier`.

pub mod availability_service;
pub mod booking_service;
pub mod car_service;
pub mod driver_service;
pub mod notification_service;
pub mod pricing_service;
pub mod ride_request_service;

#[cfg(test)]
mod pricing_proptest;

pub use availability_service::{check_availability, AvailabilityReport, AvailabilityService};
pub use booking_service::{BookingOutcome, BookingService, CreateBookingInput};
pub use car_service::{CarChanges, CarService};
pub use driver_service::DriverService;
pub use notification_service::{notify, NotificationService, Notifier, StoreNotifier};
pub use pricing_service::{compute_price, driver_pay, rental_days, FIXED_DRIVER_RATE_PER_DAY};
pub use ride_request_service::{FanOutFailure, FanOutReport, RideRequestService};
