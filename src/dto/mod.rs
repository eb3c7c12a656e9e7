//! DTOs de la API
//!
//! Bodies de entrada (camelCase, validados con `validator`) y payloads de
//! respuesta que van dentro de `ApiResponse`.

pub mod api_response;
pub mod booking_dto;
pub mod car_dto;
pub mod driver_dto;
pub mod notification_dto;
pub mod ride_request_dto;

pub use api_response::ApiResponse;
