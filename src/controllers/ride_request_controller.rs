//! Controlador de solicitudes de viaje (driver)

use uuid::Uuid;

use crate::dto::ride_request_dto::{
    CompleteRideRequest, CompletedRideResponse, RideRequestListResponse, RideRequestQuery,
    RideRequestResponse,
};
use crate::dto::ApiResponse;
use crate::services::RideRequestService;
use crate::state::AppState;
use crate::utils::errors::AppResult;
use validator::Validate;

pub struct RideRequestController {
    service: RideRequestService,
}

impl RideRequestController {
    pub fn new(state: &AppState) -> Self {
        Self {
            service: RideRequestService::new(state.repos.clone(), state.notifier.clone()),
        }
    }

    pub async fn accept(&self, driver_id: Uuid, id: Uuid) -> AppResult<ApiResponse<RideRequestResponse>> {
        let ride_request = self.service.accept_ride(driver_id, id).await?;
        Ok(ApiResponse::success_with_message(
            RideRequestResponse { ride_request },
            "Ride request accepted",
        ))
    }

    pub async fn reject(&self, driver_id: Uuid, id: Uuid) -> AppResult<ApiResponse<RideRequestResponse>> {
        let ride_request = self.service.reject_ride(driver_id, id).await?;
        Ok(ApiResponse::success_with_message(
            RideRequestResponse { ride_request },
            "Ride request rejected",
        ))
    }

    pub async fn complete(
        &self,
        driver_id: Uuid,
        id: Uuid,
        request: CompleteRideRequest,
    ) -> AppResult<ApiResponse<CompletedRideResponse>> {
        request.validate()?;
        let (ride_request, driver) = self.service.complete_ride(driver_id, id, request.rating).await?;
        Ok(ApiResponse::success_with_message(
            CompletedRideResponse { ride_request, driver },
            "Ride completed",
        ))
    }

    pub async fn list(
        &self,
        driver_id: Uuid,
        query: RideRequestQuery,
    ) -> AppResult<ApiResponse<RideRequestListResponse>> {
        let ride_requests = self.service.list_offered(driver_id, query.status).await?;
        Ok(ApiResponse::success(RideRequestListResponse { ride_requests }))
    }
}
