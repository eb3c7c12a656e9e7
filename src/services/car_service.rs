//! Gestión de coches por su dueño

use std::sync::Arc;

use rust_decimal::Decimal;
use tracing::{info, warn};
use uuid::Uuid;

use crate::models::{Car, NewCar};
use crate::repositories::{CarRepository, RentalRepository};
use crate::utils::errors::{field_error, forbidden_error, not_found_error, AppError, AppResult};
use crate::utils::validation::{validate_not_empty, validate_positive_price};

/// Cambios parciales; `None` deja el campo como está
#[derive(Debug, Clone, Default)]
pub struct CarChanges {
    pub make: Option<String>,
    pub model: Option<String>,
    pub year: Option<i32>,
    pub price_per_day: Option<Decimal>,
    pub location: Option<String>,
    pub category: Option<String>,
    pub features: Option<Vec<String>>,
}

#[derive(Clone)]
pub struct CarService {
    cars: Arc<dyn CarRepository>,
    rentals: Arc<dyn RentalRepository>,
}

impl CarService {
    pub fn new(cars: Arc<dyn CarRepository>, rentals: Arc<dyn RentalRepository>) -> Self {
        Self { cars, rentals }
    }

    pub async fn create(&self, new: NewCar) -> AppResult<Car> {
        validate_positive_price(&new.price_per_day).map_err(|e| field_error("pricePerDay", e))?;
        validate_not_empty(&new.location).map_err(|e| field_error("location", e))?;

        let car = self.cars.insert(&Car::from_new(new)).await?;
        info!(car_id = %car.id, owner_id = %car.owner_id, "🚗 Coche publicado");
        Ok(car)
    }

    pub async fn get(&self, car_id: Uuid) -> AppResult<Car> {
        self.cars
            .find_by_id(car_id)
            .await?
            .ok_or_else(|| not_found_error("Car", car_id))
    }

    async fn load_owned(&self, owner_id: Uuid, car_id: Uuid, operation: &str) -> AppResult<Car> {
        let car = self.get(car_id).await?;
        if car.owner_id != owner_id {
            return Err(forbidden_error(operation, "the car belongs to another owner"));
        }
        Ok(car)
    }

    pub async fn list_for_owner(&self, owner_id: Uuid) -> AppResult<Vec<Car>> {
        self.cars.find_by_owner(owner_id).await
    }

    pub async fn update(&self, owner_id: Uuid, car_id: Uuid, changes: CarChanges) -> AppResult<Car> {
        let mut car = self.load_owned(owner_id, car_id, "update car").await?;

        if let Some(price) = changes.price_per_day {
            validate_positive_price(&price).map_err(|e| field_error("pricePerDay", e))?;
            car.price_per_day = price;
        }
        if let Some(location) = changes.location {
            validate_not_empty(&location).map_err(|e| field_error("location", e))?;
            car.location = location;
        }
        if let Some(make) = changes.make {
            car.make = make;
        }
        if let Some(model) = changes.model {
            car.model = model;
        }
        if let Some(year) = changes.year {
            car.year = year;
        }
        if let Some(category) = changes.category {
            car.category = category;
        }
        if let Some(features) = changes.features {
            car.features = features;
        }

        let car = self.cars.update(&car).await?;
        info!(car_id = %car.id, "✏️ Coche actualizado");
        Ok(car)
    }

    /// Override manual del dueño. Las reservas existentes no se tocan.
    pub async fn set_availability(&self, owner_id: Uuid, car_id: Uuid, is_available: bool) -> AppResult<Car> {
        let mut car = self.load_owned(owner_id, car_id, "change availability").await?;
        car.is_available = is_available;
        let car = self.cars.update(&car).await?;
        info!(car_id = %car.id, is_available, "🔄 Disponibilidad del coche actualizada");
        Ok(car)
    }

    pub async fn delete(&self, owner_id: Uuid, car_id: Uuid) -> AppResult<()> {
        self.load_owned(owner_id, car_id, "delete car").await?;
        // Las reservas no se borran nunca, así que el coche tampoco mientras tenga alguna
        let bookings = self.rentals.count_for_car(car_id).await?;
        if bookings > 0 {
            warn!(car_id = %car_id, bookings, "⚠️ Coche con reservas, no se elimina");
            return Err(AppError::Conflict(format!(
                "Car '{}' has {} booking(s) and cannot be deleted",
                car_id, bookings
            )));
        }
        if !self.cars.delete(car_id).await? {
            return Err(not_found_error("Car", car_id));
        }
        info!(car_id = %car_id, "🗑️ Coche eliminado");
        Ok(())
    }
}
