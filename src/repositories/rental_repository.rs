use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::models::RentalRecord;
use crate::utils::errors::AppResult;

#[async_trait]
pub trait RentalRepository: Send + Sync {
    async fn insert(&self, record: &RentalRecord) -> AppResult<RentalRecord>;
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<RentalRecord>>;
    async fn find_by_renter(&self, renter_id: Uuid) -> AppResult<Vec<RentalRecord>>;
    /// Reservas sobre los coches de un dueño (solo lectura para el dueño)
    async fn find_by_car_owner(&self, owner_id: Uuid) -> AppResult<Vec<RentalRecord>>;
    /// Reservas que aún ocupan el coche y se solapan con `[start, end)`
    async fn find_overlapping(
        &self,
        car_id: Uuid,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> AppResult<Vec<RentalRecord>>;
    async fn update(&self, record: &RentalRecord) -> AppResult<RentalRecord>;
    /// Reservas de un coche en cualquier estado; las reservas no se borran
    async fn count_for_car(&self, car_id: Uuid) -> AppResult<u64>;
}

pub struct PgRentalRepository {
    pool: PgPool,
}

impl PgRentalRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl RentalRepository for PgRentalRepository {
    async fn insert(&self, record: &RentalRecord) -> AppResult<RentalRecord> {
        let record = sqlx::query_as::<_, RentalRecord>(
            r#"
            INSERT INTO rental_records (id, car_id, renter_id, start_date, end_date, total_price,
                                        status, payment_status, with_driver, dropoff_location,
                                        created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)
            RETURNING *
            "#,
        )
        .bind(record.id)
        .bind(record.car_id)
        .bind(record.renter_id)
        .bind(record.start_date)
        .bind(record.end_date)
        .bind(record.total_price)
        .bind(record.status)
        .bind(record.payment_status)
        .bind(record.with_driver)
        .bind(&record.dropoff_location)
        .bind(record.created_at)
        .bind(record.updated_at)
        .fetch_one(&self.pool)
        .await?;

        Ok(record)
    }

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<RentalRecord>> {
        let record = sqlx::query_as::<_, RentalRecord>("SELECT * FROM rental_records WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(record)
    }

    async fn find_by_renter(&self, renter_id: Uuid) -> AppResult<Vec<RentalRecord>> {
        let records = sqlx::query_as::<_, RentalRecord>(
            "SELECT * FROM rental_records WHERE renter_id = $1 ORDER BY created_at DESC",
        )
        .bind(renter_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(records)
    }

    async fn find_by_car_owner(&self, owner_id: Uuid) -> AppResult<Vec<RentalRecord>> {
        let records = sqlx::query_as::<_, RentalRecord>(
            r#"
            SELECT r.* FROM rental_records r
            JOIN cars c ON c.id = r.car_id
            WHERE c.owner_id = $1
            ORDER BY r.created_at DESC
            "#,
        )
        .bind(owner_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(records)
    }

    async fn find_overlapping(
        &self,
        car_id: Uuid,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> AppResult<Vec<RentalRecord>> {
        let records = sqlx::query_as::<_, RentalRecord>(
            r#"
            SELECT * FROM rental_records
            WHERE car_id = $1
              AND status NOT IN ('cancelled', 'rejected')
              AND start_date < $3
              AND $2 < end_date
            ORDER BY start_date
            "#,
        )
        .bind(car_id)
        .bind(start)
        .bind(end)
        .fetch_all(&self.pool)
        .await?;

        Ok(records)
    }

    async fn update(&self, record: &RentalRecord) -> AppResult<RentalRecord> {
        let record = sqlx::query_as::<_, RentalRecord>(
            r#"
            UPDATE rental_records
            SET status = $2, payment_status = $3, updated_at = $4
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(record.id)
        .bind(record.status)
        .bind(record.payment_status)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await?;

        Ok(record)
    }

    async fn count_for_car(&self, car_id: Uuid) -> AppResult<u64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM rental_records WHERE car_id = $1")
            .bind(car_id)
            .fetch_one(&self.pool)
            .await?;

        Ok(count as u64)
    }
}
