use async_trait::async_trait;
use chrono::Utc;
use sqlx::PgPool;
use uuid::Uuid;

use crate::models::{RideRequest, RideRequestStatus};
use crate::utils::errors::{not_found_error, AppResult};

#[async_trait]
pub trait RideRequestRepository: Send + Sync {
    /// Inserta si el id no existe; si ya existe devuelve la fila guardada.
    /// Reintentar un fan-out con los mismos ids no duplica filas.
    async fn insert_if_absent(&self, request: &RideRequest) -> AppResult<RideRequest>;
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<RideRequest>>;
    async fn find_by_rental(&self, rental_id: Uuid) -> AppResult<Vec<RideRequest>>;
    async fn find_offered_to(
        &self,
        driver_user_id: Uuid,
        status: Option<RideRequestStatus>,
    ) -> AppResult<Vec<RideRequest>>;
    async fn update(&self, request: &RideRequest) -> AppResult<RideRequest>;
    /// Registra que el conductor recibió el aviso de la solicitud
    async fn mark_notified(&self, id: Uuid) -> AppResult<()>;
}

pub struct PgRideRequestRepository {
    pool: PgPool,
}

impl PgRideRequestRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl RideRequestRepository for PgRideRequestRepository {
    async fn insert_if_absent(&self, request: &RideRequest) -> AppResult<RideRequest> {
        sqlx::query(
            r#"
            INSERT INTO ride_requests (id, car_id, renter_id, offered_to, driver_id, rental_id,
                                       status, pickup_location, dropoff_location, start_date,
                                       end_date, driver_pay, notified_at, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15)
            ON CONFLICT (id) DO NOTHING
            "#,
        )
        .bind(request.id)
        .bind(request.car_id)
        .bind(request.renter_id)
        .bind(request.offered_to)
        .bind(request.driver_id)
        .bind(request.rental_id)
        .bind(request.status)
        .bind(&request.pickup_location)
        .bind(&request.dropoff_location)
        .bind(request.start_date)
        .bind(request.end_date)
        .bind(request.driver_pay)
        .bind(request.notified_at)
        .bind(request.created_at)
        .bind(request.updated_at)
        .execute(&self.pool)
        .await?;

        self.find_by_id(request.id)
            .await?
            .ok_or_else(|| not_found_error("Ride request", request.id))
    }

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<RideRequest>> {
        let request = sqlx::query_as::<_, RideRequest>("SELECT * FROM ride_requests WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(request)
    }

    async fn find_by_rental(&self, rental_id: Uuid) -> AppResult<Vec<RideRequest>> {
        let requests = sqlx::query_as::<_, RideRequest>(
            "SELECT * FROM ride_requests WHERE rental_id = $1 ORDER BY created_at",
        )
        .bind(rental_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(requests)
    }

    async fn find_offered_to(
        &self,
        driver_user_id: Uuid,
        status: Option<RideRequestStatus>,
    ) -> AppResult<Vec<RideRequest>> {
        let requests = sqlx::query_as::<_, RideRequest>(
            r#"
            SELECT * FROM ride_requests
            WHERE offered_to = $1
              AND ($2::ride_request_status IS NULL OR status = $2)
            ORDER BY created_at DESC
            "#,
        )
        .bind(driver_user_id)
        .bind(status)
        .fetch_all(&self.pool)
        .await?;

        Ok(requests)
    }

    async fn update(&self, request: &RideRequest) -> AppResult<RideRequest> {
        let request = sqlx::query_as::<_, RideRequest>(
            r#"
            UPDATE ride_requests
            SET status = $2, driver_id = $3, updated_at = $4
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(request.id)
        .bind(request.status)
        .bind(request.driver_id)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await?;

        Ok(request)
    }

    async fn mark_notified(&self, id: Uuid) -> AppResult<()> {
        let result = sqlx::query("UPDATE ride_requests SET notified_at = $2 WHERE id = $1")
            .bind(id)
            .bind(Utc::now())
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(not_found_error("Ride request", id));
        }
        Ok(())
    }
}
