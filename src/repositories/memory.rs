//! Entity store en memoria
//!
//! Implementa todos los traits de repositorio sobre un único conjunto de
//! tablas protegidas por un `RwLock`. Se usa en desarrollo cuando no hay
//! `DATABASE_URL` y en los tests. Cada llamada cede el control al runtime
//! antes de tocar las tablas, igual que una llamada de I/O real, así que
//! operaciones concurrentes se intercalan entre llamadas.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::models::{Car, Driver, Notification, RentalRecord, RideRequest, RideRequestStatus, User};
use crate::repositories::{
    CarRepository, DriverRepository, NotificationRepository, RentalRepository,
    RideRequestRepository, UserRepository,
};
use crate::utils::errors::{not_found_error, AppError, AppResult};

#[derive(Default)]
struct Tables {
    users: HashMap<Uuid, User>,
    cars: HashMap<Uuid, Car>,
    rentals: HashMap<Uuid, RentalRecord>,
    ride_requests: HashMap<Uuid, RideRequest>,
    drivers: HashMap<Uuid, Driver>,
    notifications: HashMap<Uuid, Notification>,
}

#[derive(Default)]
pub struct InMemoryStore {
    tables: RwLock<Tables>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

/// Punto de suspensión simulado
async fn io_point() {
    tokio::task::yield_now().await;
}

fn sorted_desc<T, F>(mut items: Vec<T>, key: F) -> Vec<T>
where
    F: Fn(&T) -> DateTime<Utc>,
{
    items.sort_by(|a, b| key(b).cmp(&key(a)));
    items
}

#[async_trait]
impl UserRepository for InMemoryStore {
    async fn insert(&self, user: &User) -> AppResult<User> {
        io_point().await;
        let mut tables = self.tables.write().await;
        if tables.users.values().any(|u| u.email == user.email) {
            return Err(AppError::Conflict(format!("User with email '{}' already exists", user.email)));
        }
        tables.users.insert(user.id, user.clone());
        Ok(user.clone())
    }

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<User>> {
        io_point().await;
        Ok(self.tables.read().await.users.get(&id).cloned())
    }
}

#[async_trait]
impl CarRepository for InMemoryStore {
    async fn insert(&self, car: &Car) -> AppResult<Car> {
        io_point().await;
        self.tables.write().await.cars.insert(car.id, car.clone());
        Ok(car.clone())
    }

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Car>> {
        io_point().await;
        Ok(self.tables.read().await.cars.get(&id).cloned())
    }

    async fn find_by_owner(&self, owner_id: Uuid) -> AppResult<Vec<Car>> {
        io_point().await;
        let tables = self.tables.read().await;
        let cars = tables
            .cars
            .values()
            .filter(|c| c.owner_id == owner_id)
            .cloned()
            .collect();
        Ok(sorted_desc(cars, |c| c.created_at))
    }

    async fn update(&self, car: &Car) -> AppResult<Car> {
        io_point().await;
        let mut tables = self.tables.write().await;
        let stored = tables
            .cars
            .get_mut(&car.id)
            .ok_or_else(|| not_found_error("Car", car.id))?;
        *stored = Car {
            updated_at: Utc::now(),
            ..car.clone()
        };
        Ok(stored.clone())
    }

    async fn delete(&self, id: Uuid) -> AppResult<bool> {
        io_point().await;
        Ok(self.tables.write().await.cars.remove(&id).is_some())
    }
}

#[async_trait]
impl RentalRepository for InMemoryStore {
    async fn insert(&self, record: &RentalRecord) -> AppResult<RentalRecord> {
        io_point().await;
        self.tables
            .write()
            .await
            .rentals
            .insert(record.id, record.clone());
        Ok(record.clone())
    }

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<RentalRecord>> {
        io_point().await;
        Ok(self.tables.read().await.rentals.get(&id).cloned())
    }

    async fn find_by_renter(&self, renter_id: Uuid) -> AppResult<Vec<RentalRecord>> {
        io_point().await;
        let tables = self.tables.read().await;
        let records = tables
            .rentals
            .values()
            .filter(|r| r.renter_id == renter_id)
            .cloned()
            .collect();
        Ok(sorted_desc(records, |r| r.created_at))
    }

    async fn find_by_car_owner(&self, owner_id: Uuid) -> AppResult<Vec<RentalRecord>> {
        io_point().await;
        let tables = self.tables.read().await;
        let records = tables
            .rentals
            .values()
            .filter(|r| {
                tables
                    .cars
                    .get(&r.car_id)
                    .is_some_and(|c| c.owner_id == owner_id)
            })
            .cloned()
            .collect();
        Ok(sorted_desc(records, |r| r.created_at))
    }

    async fn find_overlapping(
        &self,
        car_id: Uuid,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> AppResult<Vec<RentalRecord>> {
        io_point().await;
        let tables = self.tables.read().await;
        let mut records: Vec<RentalRecord> = tables
            .rentals
            .values()
            .filter(|r| r.car_id == car_id && r.status.blocks_calendar() && r.overlaps(start, end))
            .cloned()
            .collect();
        records.sort_by_key(|r| r.start_date);
        Ok(records)
    }

    async fn update(&self, record: &RentalRecord) -> AppResult<RentalRecord> {
        io_point().await;
        let mut tables = self.tables.write().await;
        let stored = tables
            .rentals
            .get_mut(&record.id)
            .ok_or_else(|| not_found_error("Booking", record.id))?;
        stored.status = record.status;
        stored.payment_status = record.payment_status;
        stored.updated_at = Utc::now();
        Ok(stored.clone())
    }
    async fn count_for_car(&self, car_id: Uuid) -> AppResult<u64> {
        io_point().await;
        let tables = self.tables.read().await;
        Ok(tables.rentals.values().filter(|r| r.car_id == car_id).count() as u64)
    }
}

#[async_trait]
impl RideRequestRepository for InMemoryStore {
    async fn insert_if_absent(&self, request: &RideRequest) -> AppResult<RideRequest> {
        io_point().await;
        let mut tables = self.tables.write().await;
        let stored = tables
            .ride_requests
            .entry(request.id)
            .or_insert_with(|| request.clone());
        Ok(stored.clone())
    }

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<RideRequest>> {
        io_point().await;
        Ok(self.tables.read().await.ride_requests.get(&id).cloned())
    }

    async fn find_by_rental(&self, rental_id: Uuid) -> AppResult<Vec<RideRequest>> {
        io_point().await;
        let tables = self.tables.read().await;
        let mut requests: Vec<RideRequest> = tables
            .ride_requests
            .values()
            .filter(|r| r.rental_id == rental_id)
            .cloned()
            .collect();
        requests.sort_by_key(|r| r.created_at);
        Ok(requests)
    }

    async fn find_offered_to(
        &self,
        driver_user_id: Uuid,
        status: Option<RideRequestStatus>,
    ) -> AppResult<Vec<RideRequest>> {
        io_point().await;
        let tables = self.tables.read().await;
        let requests = tables
            .ride_requests
            .values()
            .filter(|r| r.offered_to == driver_user_id)
            .filter(|r| status.map_or(true, |s| r.status == s))
            .cloned()
            .collect();
        Ok(sorted_desc(requests, |r| r.created_at))
    }

    async fn update(&self, request: &RideRequest) -> AppResult<RideRequest> {
        io_point().await;
        let mut tables = self.tables.write().await;
        let stored = tables
            .ride_requests
            .get_mut(&request.id)
            .ok_or_else(|| not_found_error("Ride request", request.id))?;
        stored.status = request.status;
        stored.driver_id = request.driver_id;
        stored.updated_at = Utc::now();
        Ok(stored.clone())
    }
    async fn mark_notified(&self, id: Uuid) -> AppResult<()> {
        io_point().await;
        let mut tables = self.tables.write().await;
        let stored = tables
            .ride_requests
            .get_mut(&id)
            .ok_or_else(|| not_found_error("Ride request", id))?;
        stored.notified_at = Some(Utc::now());
        Ok(())
    }
}

#[async_trait]
impl DriverRepository for InMemoryStore {
    async fn insert(&self, driver: &Driver) -> AppResult<Driver> {
        io_point().await;
        let mut tables = self.tables.write().await;
        if tables.drivers.values().any(|d| d.user_id == driver.user_id) {
            return Err(AppError::Conflict(format!(
                "Driver profile for user '{}' already exists",
                driver.user_id
            )));
        }
        tables.drivers.insert(driver.id, driver.clone());
        Ok(driver.clone())
    }

    async fn find_by_user(&self, user_id: Uuid) -> AppResult<Option<Driver>> {
        io_point().await;
        let tables = self.tables.read().await;
        Ok(tables.drivers.values().find(|d| d.user_id == user_id).cloned())
    }

    async fn find_available_in(&self, location: &str) -> AppResult<Vec<Driver>> {
        io_point().await;
        let tables = self.tables.read().await;
        let mut drivers: Vec<Driver> = tables
            .drivers
            .values()
            .filter(|d| d.is_available && d.serves_location(location))
            .cloned()
            .collect();
        drivers.sort_by_key(|d| d.created_at);
        Ok(drivers)
    }

    async fn update(&self, driver: &Driver) -> AppResult<Driver> {
        io_point().await;
        let mut tables = self.tables.write().await;
        let stored = tables
            .drivers
            .get_mut(&driver.id)
            .ok_or_else(|| not_found_error("Driver profile", driver.id))?;
        stored.location = driver.location.clone();
        stored.is_available = driver.is_available;
        stored.average_rating = driver.average_rating;
        stored.total_rides = driver.total_rides;
        stored.total_earnings = driver.total_earnings;
        stored.updated_at = Utc::now();
        Ok(stored.clone())
    }
}

#[async_trait]
impl NotificationRepository for InMemoryStore {
    async fn insert(&self, notification: &Notification) -> AppResult<Notification> {
        io_point().await;
        self.tables
            .write()
            .await
            .notifications
            .insert(notification.id, notification.clone());
        Ok(notification.clone())
    }

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Notification>> {
        io_point().await;
        Ok(self.tables.read().await.notifications.get(&id).cloned())
    }

    async fn find_by_user(&self, user_id: Uuid, unread_only: bool) -> AppResult<Vec<Notification>> {
        io_point().await;
        let tables = self.tables.read().await;
        let notifications = tables
            .notifications
            .values()
            .filter(|n| n.user_id == user_id && (!unread_only || !n.read))
            .cloned()
            .collect();
        Ok(sorted_desc(notifications, |n| n.created_at))
    }

    async fn mark_read(&self, id: Uuid) -> AppResult<Notification> {
        io_point().await;
        let mut tables = self.tables.write().await;
        let stored = tables
            .notifications
            .get_mut(&id)
            .ok_or_else(|| not_found_error("Notification", id))?;
        stored.read = true;
        Ok(stored.clone())
    }

    async fn mark_all_read(&self, user_id: Uuid) -> AppResult<u64> {
        io_point().await;
        let mut tables = self.tables.write().await;
        let mut updated = 0;
        for n in tables
            .notifications
            .values_mut()
            .filter(|n| n.user_id == user_id && !n.read)
        {
            n.read = true;
            updated += 1;
        }
        Ok(updated)
    }

    async fn delete(&self, id: Uuid) -> AppResult<bool> {
        io_point().await;
        Ok(self.tables.write().await.notifications.remove(&id).is_some())
    }

    async fn delete_read_before(&self, cutoff: DateTime<Utc>) -> AppResult<u64> {
        io_point().await;
        let mut tables = self.tables.write().await;
        let before = tables.notifications.len();
        tables.notifications.retain(|_, n| !n.is_stale(cutoff));
        Ok((before - tables.notifications.len()) as u64)
    }
}
