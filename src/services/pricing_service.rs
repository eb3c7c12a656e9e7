//! Cálculo de precios de reservas
//!
//! `total = (precio_por_día + recargo_conductor) * días`, con días redondeados
//! hacia arriba: cualquier fracción de día cuenta como un día completo.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;

/// Recargo fijo por día cuando la reserva incluye conductor.
/// No es configurable por conductor.
pub const FIXED_DRIVER_RATE_PER_DAY: Decimal = Decimal::from_parts(500, 0, 0, false, 0);

const MILLIS_PER_DAY: i64 = 24 * 60 * 60 * 1000;

/// Días facturables entre `start` y `end` (techo). Devuelve 0 si `end <= start`.
pub fn rental_days(start: DateTime<Utc>, end: DateTime<Utc>) -> i64 {
    let millis = (end - start).num_milliseconds();
    if millis <= 0 {
        return 0;
    }
    (millis + MILLIS_PER_DAY - 1) / MILLIS_PER_DAY
}

pub fn driver_surcharge(with_driver: bool) -> Decimal {
    if with_driver {
        FIXED_DRIVER_RATE_PER_DAY
    } else {
        Decimal::ZERO
    }
}

pub fn compute_price(price_per_day: Decimal, with_driver: bool, days: i64) -> Decimal {
    (price_per_day + driver_surcharge(with_driver)) * Decimal::from(days)
}

/// Pago al conductor por un viaje de `days` días
pub fn driver_pay(days: i64) -> Decimal {
    FIXED_DRIVER_RATE_PER_DAY * Decimal::from(days)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn day(d: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 1, d, 0, 0, 0).unwrap()
    }

    #[test]
    fn test_whole_days() {
        assert_eq!(rental_days(day(10), day(13)), 3);
        assert_eq!(rental_days(day(10), day(11)), 1);
    }

    #[test]
    fn test_fractional_day_rounds_up() {
        assert_eq!(rental_days(day(10), day(10) + Duration::hours(1)), 1);
        assert_eq!(rental_days(day(10), day(12) + Duration::minutes(1)), 3);
        assert_eq!(rental_days(day(10), day(11) + Duration::milliseconds(1)), 2);
    }

    #[test]
    fn test_empty_or_negative_window_is_zero_days() {
        assert_eq!(rental_days(day(10), day(10)), 0);
        assert_eq!(rental_days(day(12), day(10)), 0);
    }

    #[test]
    fn test_price_with_driver() {
        let total = compute_price(Decimal::from(1000), true, 3);
        assert_eq!(total, Decimal::from(4500));
        assert_eq!(driver_pay(3), Decimal::from(1500));
    }

    #[test]
    fn test_price_without_driver() {
        assert_eq!(compute_price(Decimal::from(1000), false, 1), Decimal::from(1000));
    }

    #[test]
    fn test_fractional_rate_is_kept_exact() {
        let rate = Decimal::new(99999, 2); // 999.99
        assert_eq!(compute_price(rate, false, 2), Decimal::new(199998, 2));
    }
}
