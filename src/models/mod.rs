//! Modelos del sistema
//!
//! Este módulo contiene los modelos de datos que mapean al schema PostgreSQL
//! definido en `migrations/`.

pub mod car;
pub mod driver;
pub mod notification;
pub mod rental;
pub mod ride_request;
pub mod user;

pub use car::{Car, NewCar};
pub use driver::{Driver, NewDriver};
pub use notification::{Notification, NotificationType};
pub use rental::{PaymentStatus, RentalRecord, RentalStatus};
pub use ride_request::{RideRequest, RideRequestStatus};
pub use user::{User, UserRole};
