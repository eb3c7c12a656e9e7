#![allow(dead_code)]

use std::sync::Arc;

use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use rust_decimal::Decimal;
use uuid::Uuid;

use car_connect::models::{Car, Driver, NewCar, NewDriver, User, UserRole};
use car_connect::repositories::{
    CarRepository, DriverRepository, InMemoryStore, Repositories, UserRepository,
};

pub fn day(d: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 1, d, 0, 0, 0).unwrap()
}

/// Store en memoria con un owner, un renter y un coche en Delhi a 1000/día
pub struct Fixture {
    pub store: Arc<InMemoryStore>,
    pub repos: Repositories,
    pub owner: User,
    pub renter: User,
    pub car: Car,
}

impl Fixture {
    pub async fn new() -> Self {
        let store = Arc::new(InMemoryStore::new());
        let repos = Repositories::from_store(store.clone());

        let owner = User::new("Priya Owner", "priya@example.com", UserRole::Owner);
        let renter = User::new("Rahul Renter", "rahul@example.com", UserRole::Renter);
        UserRepository::insert(store.as_ref(), &owner).await.unwrap();
        UserRepository::insert(store.as_ref(), &renter).await.unwrap();

        let car = Car::from_new(NewCar {
            owner_id: owner.id,
            make: "Maruti".into(),
            model: "Swift".into(),
            year: 2022,
            price_per_day: Decimal::from(1000),
            location: "Delhi".into(),
            category: "hatchback".into(),
            features: vec!["ac".into()],
        });
        CarRepository::insert(store.as_ref(), &car).await.unwrap();

        Self {
            store,
            repos,
            owner,
            renter,
            car,
        }
    }

    pub async fn add_renter(&self, name: &str) -> User {
        let user = User::new(name, format!("{}@example.com", name.to_lowercase()), UserRole::Renter);
        UserRepository::insert(self.store.as_ref(), &user).await.unwrap();
        user
    }

    pub async fn add_driver(&self, location: &str, available: bool) -> Driver {
        let user = User::new(
            format!("Driver {}", location),
            format!("driver-{}@example.com", Uuid::new_v4()),
            UserRole::Driver,
        );
        UserRepository::insert(self.store.as_ref(), &user).await.unwrap();

        let mut driver = Driver::from_new(NewDriver {
            user_id: user.id,
            location: location.to_string(),
            license_number: "DL-0420110012345".into(),
            license_expiry: NaiveDate::from_ymd_opt(2030, 6, 30).unwrap(),
            experience_years: 3,
            vehicle_preferences: vec![],
        });
        driver.is_available = available;
        DriverRepository::insert(self.store.as_ref(), &driver).await.unwrap()
    }
}
