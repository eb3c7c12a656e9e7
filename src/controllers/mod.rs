//! Controladores
//!
//! Adaptan los DTOs de entrada a los servicios y envuelven el resultado en
//! `ApiResponse`. Se construyen por request a partir de `AppState`.

pub mod booking_controller;
pub mod car_controller;
pub mod driver_controller;
pub mod notification_controller;
pub mod ride_request_controller;

pub use booking_controller::BookingController;
pub use car_controller::CarController;
pub use driver_controller::DriverController;
pub use notification_controller::NotificationController;
pub use ride_request_controller::RideRequestController;
