//! Property-based tests for the calculator kernels

use calc_core::percentage::percentage_change;
use calc_core::prime::{factors, is_prime, prime_factorization};
use calc_core::scientific::ScientificNotation;
use calc_core::units::{convert_temperature, TemperatureUnit};
use calc_core::workdays::{count_workdays, days_between};
use chrono::{Duration, NaiveDate};
use proptest::prelude::*;

fn temperature_unit() -> impl Strategy<Value = TemperatureUnit> {
    prop_oneof![
        Just(TemperatureUnit::Celsius),
        Just(TemperatureUnit::Fahrenheit),
        Just(TemperatureUnit::Kelvin),
        Just(TemperatureUnit::Rankine),
    ]
}

fn date_range() -> impl Strategy<Value = (NaiveDate, NaiveDate)> {
    (0i64..20_000, 0i64..1_000).prop_map(|(offset, len)| {
        let base = NaiveDate::from_ymd_opt(1990, 1, 1).unwrap();
        let start = base + Duration::days(offset);
        (start, start + Duration::days(len))
    })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    // ============================================================
    // Primes
    // ============================================================

    #[test]
    fn prime_iff_exactly_two_divisors(n in 2u64..50_000) {
        prop_assert_eq!(is_prime(n), factors(n).len() == 2);
    }

    #[test]
    fn factor_pairs_reproduce_n(n in 1u64..1_000_000) {
        for f in factors(n) {
            prop_assert_eq!(f * (n / f), n);
        }
    }

    #[test]
    fn factors_are_sorted_and_bounded(n in 1u64..1_000_000) {
        let list = factors(n);
        prop_assert_eq!(list.first().copied(), Some(1));
        prop_assert_eq!(list.last().copied(), Some(n));
        prop_assert!(list.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn factorization_multiplies_back(n in 2u64..1_000_000) {
        let product: u64 = prime_factorization(n)
            .iter()
            .map(|f| f.prime.pow(f.exponent))
            .product();
        prop_assert_eq!(product, n);
        prop_assert!(prime_factorization(n).iter().all(|f| is_prime(f.prime)));
    }

    // ============================================================
    // Percentage change
    // ============================================================

    #[test]
    fn signed_percentage_reconstructs_new_value(
        original in prop_oneof![-1e6f64..-1e-3, 1e-3f64..1e6],
        new in -1e6f64..1e6,
    ) {
        let result = percentage_change(original, new).unwrap();
        let signed = result.signed_percentage.unwrap();
        let rebuilt = original * (1.0 + signed / 100.0);
        prop_assert!((rebuilt - new).abs() <= 1e-6 * new.abs().max(original.abs()).max(1.0));
        prop_assert!((result.absolute_change - (new - original).abs()).abs() < 1e-9);
    }

    // ============================================================
    // Scientific notation
    // ============================================================

    #[test]
    fn scientific_reconstructs_value(
        x in prop::num::f64::POSITIVE
            | prop::num::f64::NEGATIVE
            | prop::num::f64::NORMAL
            | prop::num::f64::SUBNORMAL,
    ) {
        let n = ScientificNotation::from_f64(x).unwrap();
        prop_assert!(n.coefficient.abs() >= 1.0 && n.coefficient.abs() < 10.0);
        prop_assert!((n.value() - x).abs() <= 1e-12 * x.abs());
    }

    #[test]
    fn engineering_exponent_is_multiple_of_three(x in prop_oneof![-1e30f64..-1e-30, 1e-30f64..1e30]) {
        let eng = ScientificNotation::from_f64(x).unwrap().to_engineering();
        prop_assert_eq!(eng.exponent.rem_euclid(3), 0);
        prop_assert!(eng.coefficient.abs() >= 1.0 && eng.coefficient.abs() < 1000.0 + 1e-9);
    }

    // ============================================================
    // Temperature
    // ============================================================

    #[test]
    fn temperature_round_trips(
        celsius in -273.0f64..10_000.0,
        a in temperature_unit(),
        b in temperature_unit(),
    ) {
        let value = convert_temperature(celsius, TemperatureUnit::Celsius, a).unwrap();
        let there = convert_temperature(value, a, b).unwrap();
        let back = convert_temperature(there, b, a).unwrap();
        prop_assert!((back - value).abs() <= 1e-9 * value.abs().max(1.0));
    }

    // ============================================================
    // Work days
    // ============================================================

    #[test]
    fn workdays_plus_weekends_is_total((start, end) in date_range()) {
        let summary = count_workdays(start, end).unwrap();
        prop_assert_eq!(summary.workdays + summary.weekends, summary.total_days);
        prop_assert_eq!(summary.total_days as i64, days_between(start, end) + 1);
        let expected = summary.workdays as f64 / summary.total_days as f64 * 100.0;
        prop_assert!((summary.percentage - expected).abs() <= 0.005 + 1e-9);
    }

    #[test]
    fn full_weeks_have_five_workdays(offset in 0i64..10_000, weeks in 1i64..50) {
        let start = NaiveDate::from_ymd_opt(2000, 1, 1).unwrap() + Duration::days(offset);
        let end = start + Duration::days(weeks * 7 - 1);
        let summary = count_workdays(start, end).unwrap();
        prop_assert_eq!(summary.workdays as i64, weeks * 5);
    }
}
