#[cfg(test)]
mod tests {
    use crate::services::pricing_service::{
        compute_price, rental_days, FIXED_DRIVER_RATE_PER_DAY,
    };
    use chrono::{Duration, TimeZone, Utc};
    use proptest::prelude::*;
    use rust_decimal::Decimal;

    // Precio por día en centavos para cubrir tarifas con decimales
    fn price(cents: i64) -> Decimal {
        Decimal::new(cents, 2)
    }

    proptest! {
        // The total never decreases when the rental gets longer
        #[test]
        fn test_price_monotonic_in_days(
            cents in 1..10_000_000i64,
            with_driver in any::<bool>(),
            days in 1..365i64,
            extra in 0..30i64,
        ) {
            let shorter = compute_price(price(cents), with_driver, days);
            let longer = compute_price(price(cents), with_driver, days + extra);
            prop_assert!(longer >= shorter);
        }

        // The total never decreases when the daily rate goes up
        #[test]
        fn test_price_monotonic_in_rate(
            cents in 1..10_000_000i64,
            bump in 0..1_000_000i64,
            with_driver in any::<bool>(),
            days in 1..365i64,
        ) {
            let base = compute_price(price(cents), with_driver, days);
            let raised = compute_price(price(cents + bump), with_driver, days);
            prop_assert!(raised >= base);
        }

        // Toggling the driver on adds exactly the surcharge for every day
        #[test]
        fn test_driver_toggle_adds_exact_surcharge(
            cents in 1..10_000_000i64,
            days in 1..365i64,
        ) {
            let without = compute_price(price(cents), false, days);
            let with = compute_price(price(cents), true, days);
            prop_assert_eq!(with - without, FIXED_DRIVER_RATE_PER_DAY * Decimal::from(days));
        }

        // Any positive window is billed for at least one day and never
        // for more than one day beyond its exact length
        #[test]
        fn test_days_are_ceiling_of_window(
            start_offset_minutes in 0..100_000i64,
            length_minutes in 1..(60 * 24 * 60i64),
        ) {
            let start = Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap()
                + Duration::minutes(start_offset_minutes);
            let end = start + Duration::minutes(length_minutes);
            let days = rental_days(start, end);
            prop_assert!(days >= 1);
            prop_assert!(days * 24 * 60 >= length_minutes);
            prop_assert!((days - 1) * 24 * 60 < length_minutes);
        }
    }
}
