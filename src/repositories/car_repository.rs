use async_trait::async_trait;
use chrono::Utc;
use sqlx::PgPool;
use uuid::Uuid;

use crate::models::Car;
use crate::utils::errors::AppResult;

#[async_trait]
pub trait CarRepository: Send + Sync {
    async fn insert(&self, car: &Car) -> AppResult<Car>;
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Car>>;
    async fn find_by_owner(&self, owner_id: Uuid) -> AppResult<Vec<Car>>;
    async fn update(&self, car: &Car) -> AppResult<Car>;
    async fn delete(&self, id: Uuid) -> AppResult<bool>;
}

pub struct PgCarRepository {
    pool: PgPool,
}

impl PgCarRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CarRepository for PgCarRepository {
    async fn insert(&self, car: &Car) -> AppResult<Car> {
        let car = sqlx::query_as::<_, Car>(
            r#"
            INSERT INTO cars (id, owner_id, make, model, year, price_per_day, is_available,
                              location, category, features, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)
            RETURNING *
            "#,
        )
        .bind(car.id)
        .bind(car.owner_id)
        .bind(&car.make)
        .bind(&car.model)
        .bind(car.year)
        .bind(car.price_per_day)
        .bind(car.is_available)
        .bind(&car.location)
        .bind(&car.category)
        .bind(&car.features)
        .bind(car.created_at)
        .bind(car.updated_at)
        .fetch_one(&self.pool)
        .await?;

        Ok(car)
    }

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Car>> {
        let car = sqlx::query_as::<_, Car>("SELECT * FROM cars WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(car)
    }

    async fn find_by_owner(&self, owner_id: Uuid) -> AppResult<Vec<Car>> {
        let cars = sqlx::query_as::<_, Car>(
            "SELECT * FROM cars WHERE owner_id = $1 ORDER BY created_at DESC",
        )
        .bind(owner_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(cars)
    }

    async fn update(&self, car: &Car) -> AppResult<Car> {
        let car = sqlx::query_as::<_, Car>(
            r#"
            UPDATE cars
            SET make = $2, model = $3, year = $4, price_per_day = $5, is_available = $6,
                location = $7, category = $8, features = $9, updated_at = $10
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(car.id)
        .bind(&car.make)
        .bind(&car.model)
        .bind(car.year)
        .bind(car.price_per_day)
        .bind(car.is_available)
        .bind(&car.location)
        .bind(&car.category)
        .bind(&car.features)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await?;

        Ok(car)
    }

    async fn delete(&self, id: Uuid) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM cars WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
