//! Autenticación JWT
//!
//! Extractores de axum que validan el bearer token y devuelven el actor.
//! La identidad la emite un servicio externo; aquí solo se confía en las
//! claims firmadas. Los extractores por rol responden 403 si el rol no cuadra.

use axum::{
    async_trait,
    extract::FromRequestParts,
    http::{header, request::Parts},
};
use uuid::Uuid;

use crate::{
    models::user::UserRole,
    state::AppState,
    utils::{
        errors::{forbidden_error, AppError},
        jwt::{extract_token_from_header, verify_token},
    },
};

/// Usuario autenticado que se inyecta en los handlers
#[derive(Debug, Clone, Copy)]
pub struct AuthenticatedUser {
    pub user_id: Uuid,
    pub role: UserRole,
}

#[async_trait]
impl FromRequestParts<AppState> for AuthenticatedUser {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let auth_header = parts
            .headers
            .get(header::AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .ok_or_else(|| AppError::Unauthorized("Authorization token required".to_string()))?;

        let token = extract_token_from_header(auth_header)?;
        let claims = verify_token(token, &state.jwt)?;
        let user_id = Uuid::parse_str(&claims.sub)
            .map_err(|_| AppError::Unauthorized("Invalid user id in token".to_string()))?;

        Ok(Self {
            user_id,
            role: claims.role,
        })
    }
}

async fn require_role(
    parts: &mut Parts,
    state: &AppState,
    role: UserRole,
) -> Result<AuthenticatedUser, AppError> {
    let user = AuthenticatedUser::from_request_parts(parts, state).await?;
    if user.role != role {
        tracing::warn!(user_id = %user.user_id, role = ?user.role, expected = ?role, "⛔ Rol no permitido");
        return Err(forbidden_error(
            "access this resource",
            &format!("requires the {:?} role", role).to_lowercase(),
        ));
    }
    Ok(user)
}

/// Actor con rol `renter`
#[derive(Debug, Clone, Copy)]
pub struct RenterUser(pub AuthenticatedUser);

#[async_trait]
impl FromRequestParts<AppState> for RenterUser {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        require_role(parts, state, UserRole::Renter).await.map(Self)
    }
}

/// Actor con rol `driver`
#[derive(Debug, Clone, Copy)]
pub struct DriverUser(pub AuthenticatedUser);

#[async_trait]
impl FromRequestParts<AppState> for DriverUser {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        require_role(parts, state, UserRole::Driver).await.map(Self)
    }
}

/// Actor con rol `owner`
#[derive(Debug, Clone, Copy)]
pub struct OwnerUser(pub AuthenticatedUser);

#[async_trait]
impl FromRequestParts<AppState> for OwnerUser {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        require_role(parts, state, UserRole::Owner).await.map(Self)
    }
}
