//! Middleware del sistema
//!
//! Extractores de autenticación por rol y configuración de CORS.

pub mod auth;
pub mod cors;

pub use auth::{AuthenticatedUser, DriverUser, OwnerUser, RenterUser};
pub use cors::cors_layer;
