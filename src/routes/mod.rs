//! Rutas HTTP agrupadas por rol

pub mod car_owner_routes;
pub mod car_renter_routes;
pub mod driver_routes;
pub mod notification_routes;

pub use car_owner_routes::create_car_owner_router;
pub use car_renter_routes::create_car_renter_router;
pub use driver_routes::create_driver_router;
pub use notification_routes::create_notification_router;
