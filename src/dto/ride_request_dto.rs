//! DTOs de solicitudes de viaje

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::{Driver, RideRequest, RideRequestStatus};

#[derive(Debug, Deserialize)]
pub struct RideRequestQuery {
    pub status: Option<RideRequestStatus>,
}

/// Body opcional de `POST /driver/ride-requests/:id/complete`
#[derive(Debug, Default, Deserialize, Validate)]
pub struct CompleteRideRequest {
    #[validate(range(min = 1.0, max = 5.0))]
    pub rating: Option<f64>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RideRequestResponse {
    pub ride_request: RideRequest,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RideRequestListResponse {
    pub ride_requests: Vec<RideRequest>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CompletedRideResponse {
    pub ride_request: RideRequest,
    pub driver: Driver,
}
