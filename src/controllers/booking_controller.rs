//! Controlador de reservas (renter y vista del owner)

use uuid::Uuid;

use crate::dto::booking_dto::{AvailabilityQuery, BookingListResponse, BookingResponse, CreateBookingRequest};
use crate::dto::ride_request_dto::RideRequestListResponse;
use crate::dto::ApiResponse;
use crate::services::{
    AvailabilityReport, AvailabilityService, BookingOutcome, BookingService, CarService, FanOutReport,
};
use crate::state::AppState;
use crate::utils::errors::{AppError, AppResult};

pub struct BookingController {
    bookings: BookingService,
    cars: CarService,
    availability: AvailabilityService,
}

impl BookingController {
    pub fn new(state: &AppState) -> Self {
        Self {
            bookings: BookingService::new(state.repos.clone(), state.notifier.clone()),
            cars: CarService::new(state.repos.cars.clone(), state.repos.rentals.clone()),
            availability: AvailabilityService::new(state.repos.rentals.clone()),
        }
    }

    pub async fn book(
        &self,
        renter_id: Uuid,
        car_id: Uuid,
        request: CreateBookingRequest,
    ) -> AppResult<ApiResponse<BookingOutcome>> {
        let input = request.into_input(renter_id, car_id)?;
        let outcome = self.bookings.create_booking(input).await?;

        let message = match &outcome.fan_out {
            Some(report) if report.roster_error.is_some() => {
                "Booking created; drivers could not be reached, retry the fan-out".to_string()
            }
            Some(report) if !report.failed.is_empty() => format!(
                "Booking created; {} of {} ride requests could not be created",
                report.failed.len(),
                report.eligible
            ),
            Some(report) => format!("Booking created; {} drivers notified", report.notified),
            None => "Booking created".to_string(),
        };
        Ok(ApiResponse::success_with_message(outcome, message))
    }

    pub async fn cancel(&self, renter_id: Uuid, booking_id: Uuid) -> AppResult<ApiResponse<BookingResponse>> {
        let booking = self.bookings.cancel_booking(renter_id, booking_id).await?;
        Ok(ApiResponse::success_with_message(
            BookingResponse { booking },
            "Booking cancelled",
        ))
    }

    pub async fn retry_fan_out(
        &self,
        renter_id: Uuid,
        booking_id: Uuid,
    ) -> AppResult<ApiResponse<FanOutReport>> {
        let report = self.bookings.retry_fan_out(renter_id, booking_id).await?;
        Ok(ApiResponse::success(report))
    }

    pub async fn get(&self, renter_id: Uuid, booking_id: Uuid) -> AppResult<ApiResponse<BookingResponse>> {
        let booking = self.bookings.get_for_renter(renter_id, booking_id).await?;
        Ok(ApiResponse::success(BookingResponse { booking }))
    }

    pub async fn ride_requests(
        &self,
        renter_id: Uuid,
        booking_id: Uuid,
    ) -> AppResult<ApiResponse<RideRequestListResponse>> {
        let ride_requests = self.bookings.ride_requests_for(renter_id, booking_id).await?;
        Ok(ApiResponse::success(RideRequestListResponse { ride_requests }))
    }

    pub async fn list_for_renter(&self, renter_id: Uuid) -> AppResult<ApiResponse<BookingListResponse>> {
        let bookings = self.bookings.list_for_renter(renter_id).await?;
        Ok(ApiResponse::success(BookingListResponse { bookings }))
    }

    pub async fn list_for_owner(&self, owner_id: Uuid) -> AppResult<ApiResponse<BookingListResponse>> {
        let bookings = self.bookings.list_for_owner(owner_id).await?;
        Ok(ApiResponse::success(BookingListResponse { bookings }))
    }

    pub async fn availability(
        &self,
        car_id: Uuid,
        query: AvailabilityQuery,
    ) -> AppResult<ApiResponse<AvailabilityReport>> {
        let (start, end) = query.window()?.ok_or(AppError::MissingDates)?;
        let car = self.cars.get(car_id).await?;
        let report = self.availability.report(&car, start, end).await?;
        Ok(ApiResponse::success(report))
    }
}
