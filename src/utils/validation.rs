//! Utilidades de validación
//!
//! Funciones helper para validación de datos de entrada y conversión de tipos.

use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use rust_decimal::Decimal;
use validator::ValidationError;

/// Validar y convertir string a fecha (`YYYY-MM-DD`, medianoche UTC)
pub fn validate_date(value: &str) -> Result<DateTime<Utc>, ValidationError> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| Utc.from_utc_datetime(&naive))
        .ok_or_else(|| {
            let mut error = ValidationError::new("date");
            error.add_param("value".into(), &value.to_string());
            error.add_param("format".into(), &"YYYY-MM-DD".to_string());
            error
        })
}

/// Validar y convertir string a datetime RFC 3339
pub fn validate_datetime(value: &str) -> Result<DateTime<Utc>, ValidationError> {
    DateTime::parse_from_rfc3339(value)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|_| {
            let mut error = ValidationError::new("datetime");
            error.add_param("value".into(), &value.to_string());
            error.add_param("format".into(), &"RFC3339".to_string());
            error
        })
}

/// Acepta un timestamp RFC 3339 o una fecha simple
pub fn parse_booking_date(value: &str) -> Result<DateTime<Utc>, ValidationError> {
    let value = value.trim();
    validate_datetime(value).or_else(|_| validate_date(value))
}

/// Validar que un string no esté vacío
pub fn validate_not_empty(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        let mut error = ValidationError::new("not_empty");
        error.add_param("value".into(), &value.to_string());
        return Err(error);
    }
    Ok(())
}

/// Precio por día estrictamente positivo
pub fn validate_positive_price(value: &Decimal) -> Result<(), ValidationError> {
    if *value <= Decimal::ZERO {
        let mut error = ValidationError::new("positive");
        error.message = Some("price per day must be greater than zero".into());
        return Err(error);
    }
    Ok(())
}
