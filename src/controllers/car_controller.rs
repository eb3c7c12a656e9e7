//! Controlador de coches del owner

use uuid::Uuid;

use crate::dto::car_dto::{CarListResponse, CarResponse, CreateCarRequest, UpdateCarRequest};
use crate::dto::driver_dto::ToggleAvailabilityRequest;
use crate::dto::ApiResponse;
use crate::services::CarService;
use crate::state::AppState;
use crate::utils::errors::AppResult;

pub struct CarController {
    service: CarService,
}

impl CarController {
    pub fn new(state: &AppState) -> Self {
        Self {
            service: CarService::new(state.repos.cars.clone(), state.repos.rentals.clone()),
        }
    }

    pub async fn create(&self, owner_id: Uuid, request: CreateCarRequest) -> AppResult<ApiResponse<CarResponse>> {
        let car = self.service.create(request.into_new_car(owner_id)?).await?;
        Ok(ApiResponse::success_with_message(CarResponse { car }, "Car created"))
    }

    pub async fn list(&self, owner_id: Uuid) -> AppResult<ApiResponse<CarListResponse>> {
        let cars = self.service.list_for_owner(owner_id).await?;
        Ok(ApiResponse::success(CarListResponse { cars }))
    }

    pub async fn update(
        &self,
        owner_id: Uuid,
        car_id: Uuid,
        request: UpdateCarRequest,
    ) -> AppResult<ApiResponse<CarResponse>> {
        let car = self.service.update(owner_id, car_id, request.into_changes()?).await?;
        Ok(ApiResponse::success_with_message(CarResponse { car }, "Car updated"))
    }

    pub async fn set_availability(
        &self,
        owner_id: Uuid,
        car_id: Uuid,
        request: ToggleAvailabilityRequest,
    ) -> AppResult<ApiResponse<CarResponse>> {
        let car = self
            .service
            .set_availability(owner_id, car_id, request.required()?)
            .await?;
        Ok(ApiResponse::success(CarResponse { car }))
    }

    pub async fn delete(&self, owner_id: Uuid, car_id: Uuid) -> AppResult<ApiResponse<()>> {
        self.service.delete(owner_id, car_id).await?;
        Ok(ApiResponse::message("Car deleted"))
    }
}
