//! Repositorios (Entity Store)
//!
//! Un trait por entidad con implementación PostgreSQL y una implementación
//! en memoria compartida. Toda mutación es lectura-modificación-escritura por
//! identificador, sin control de concurrencia optimista.

pub mod car_repository;
pub mod driver_repository;
pub mod memory;
pub mod notification_repository;
pub mod rental_repository;
pub mod ride_request_repository;
pub mod user_repository;

use std::sync::Arc;

use sqlx::PgPool;

pub use car_repository::{CarRepository, PgCarRepository};
pub use driver_repository::{DriverRepository, PgDriverRepository};
pub use memory::InMemoryStore;
pub use notification_repository::{NotificationRepository, PgNotificationRepository};
pub use rental_repository::{PgRentalRepository, RentalRepository};
pub use ride_request_repository::{PgRideRequestRepository, RideRequestRepository};
pub use user_repository::{PgUserRepository, UserRepository};

/// Conjunto de repositorios que comparten servicios y controladores
#[derive(Clone)]
pub struct Repositories {
    pub users: Arc<dyn UserRepository>,
    pub cars: Arc<dyn CarRepository>,
    pub rentals: Arc<dyn RentalRepository>,
    pub ride_requests: Arc<dyn RideRequestRepository>,
    pub drivers: Arc<dyn DriverRepository>,
    pub notifications: Arc<dyn NotificationRepository>,
}

impl Repositories {
    pub fn postgres(pool: PgPool) -> Self {
        Self {
            users: Arc::new(PgUserRepository::new(pool.clone())),
            cars: Arc::new(PgCarRepository::new(pool.clone())),
            rentals: Arc::new(PgRentalRepository::new(pool.clone())),
            ride_requests: Arc::new(PgRideRequestRepository::new(pool.clone())),
            drivers: Arc::new(PgDriverRepository::new(pool.clone())),
            notifications: Arc::new(PgNotificationRepository::new(pool)),
        }
    }

    pub fn in_memory() -> Self {
        Self::from_store(Arc::new(InMemoryStore::new()))
    }

    pub fn from_store(store: Arc<InMemoryStore>) -> Self {
        Self {
            users: store.clone(),
            cars: store.clone(),
            rentals: store.clone(),
            ride_requests: store.clone(),
            drivers: store.clone(),
            notifications: store,
        }
    }
}
