//! Controlador del perfil de conductor

use uuid::Uuid;

use crate::dto::driver_dto::{
    AvailabilityResponse, CreateDriverProfileRequest, DriverProfileResponse,
    ToggleAvailabilityRequest,
};
use crate::dto::ApiResponse;
use crate::services::DriverService;
use crate::state::AppState;
use crate::utils::errors::AppResult;

pub struct DriverController {
    service: DriverService,
}

impl DriverController {
    pub fn new(state: &AppState) -> Self {
        Self {
            service: DriverService::new(state.repos.drivers.clone()),
        }
    }

    pub async fn toggle_availability(
        &self,
        user_id: Uuid,
        request: ToggleAvailabilityRequest,
    ) -> AppResult<ApiResponse<AvailabilityResponse>> {
        let is_available = request.required()?;
        let driver = self.service.set_availability(user_id, is_available).await?;
        Ok(ApiResponse::success(AvailabilityResponse {
            is_available: driver.is_available,
        }))
    }

    pub async fn create_profile(
        &self,
        user_id: Uuid,
        request: CreateDriverProfileRequest,
    ) -> AppResult<ApiResponse<DriverProfileResponse>> {
        let driver = self.service.create_profile(request.into_new_driver(user_id)?).await?;
        Ok(ApiResponse::success_with_message(
            DriverProfileResponse { driver },
            "Driver profile created",
        ))
    }

    pub async fn get_profile(&self, user_id: Uuid) -> AppResult<ApiResponse<DriverProfileResponse>> {
        let driver = self.service.get_profile(user_id).await?;
        Ok(ApiResponse::success(DriverProfileResponse { driver }))
    }
}
