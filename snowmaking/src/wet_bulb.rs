use std::fmt;

/// Lowest humidity (in %) for which `humidity + 8.313659` stays non-negative.
pub const MIN_HUMIDITY_DOMAIN: f64 = -8.313659;

/// Convert a temperature from Fahrenheit to Celsius
pub fn fahrenheit_to_celsius(temp_f: f64) -> f64 {
    (temp_f - 32.0) * (5.0 / 9.0)
}

/// Convert a temperature from Celsius to Fahrenheit
pub fn celsius_to_fahrenheit(temp_c: f64) -> f64 {
    (temp_c * 9.0 / 5.0) + 32.0
}

/// Estimate the wet-bulb temperature (°F) from dry-bulb temperature (°F) and
/// relative humidity (%), using Stull's empirical approximation.
///
/// Humidity is the raw percentage on a 0-100 scale, not a fraction. Inputs are
/// not validated: negative humidity (or anything below [`MIN_HUMIDITY_DOMAIN`])
/// yields `NaN`.
pub fn estimate_wet_bulb_temperature(temperature: f64, humidity: f64) -> f64 {
    let temp_c = fahrenheit_to_celsius(temperature);

    let wet_bulb_c = temp_c * (0.151977 * (humidity + 8.313659).sqrt()).atan()
        + (temp_c + humidity).atan()
        - (humidity - 1.676331).atan()
        + 0.00391838 * humidity.powf(1.5) * (0.023101 * humidity).atan()
        - 4.686035;

    celsius_to_fahrenheit(wet_bulb_c)
}

/// Raised by [`estimate_wet_bulb_temperature_checked`] when the inputs fall
/// outside the formula's numeric domain.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DomainInputError {
    pub temperature: f64,
    pub humidity: f64,
}

impl fmt::Display for DomainInputError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "wet-bulb estimate undefined for temperature {} °F, humidity {} % (humidity must be >= {})",
            self.temperature, self.humidity, MIN_HUMIDITY_DOMAIN
        )
    }
}

impl std::error::Error for DomainInputError {}

/// Same as [`estimate_wet_bulb_temperature`], but reports out-of-domain input
/// as an error instead of returning `NaN`.
///
/// Any negative humidity is rejected too: `humidity^1.5` has no real value there.
pub fn estimate_wet_bulb_temperature_checked(
    temperature: f64,
    humidity: f64,
) -> Result<f64, DomainInputError> {
    if humidity < MIN_HUMIDITY_DOMAIN {
        return Err(DomainInputError { temperature, humidity });
    }
    let wet_bulb = estimate_wet_bulb_temperature(temperature, humidity);
    if wet_bulb.is_nan() {
        return Err(DomainInputError { temperature, humidity });
    }
    Ok(wet_bulb)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const TOLERANCE: f64 = 0.05;

    #[test]
    fn test_unit_conversions() {
        assert!((fahrenheit_to_celsius(32.0)).abs() < 1e-12);
        assert!((fahrenheit_to_celsius(212.0) - 100.0).abs() < 1e-12);
        assert!((celsius_to_fahrenheit(-40.0) + 40.0).abs() < 1e-12);
        assert!((celsius_to_fahrenheit(fahrenheit_to_celsius(71.3)) - 71.3).abs() < 1e-9);
    }

    #[test]
    fn test_snowgun_seed_scenarios() {
        // Sub-freezing dry bulb with moderate humidity
        let wet_bulb = estimate_wet_bulb_temperature(28.5, 65.0);
        assert!(wet_bulb < 28.5);
        assert!((wet_bulb - 23.9948).abs() < TOLERANCE);

        let wet_bulb = estimate_wet_bulb_temperature(26.0, 70.0);
        assert!(wet_bulb < 26.0);
        assert!((wet_bulb - 22.1766).abs() < TOLERANCE);
    }

    #[test]
    fn test_saturation_approaches_dry_bulb() {
        let wet_bulb = estimate_wet_bulb_temperature(32.0, 100.0);
        assert!((wet_bulb - 32.0).abs() < 3.0);
        assert!((wet_bulb - 31.7630).abs() < TOLERANCE);
    }

    #[test]
    fn test_zero_humidity_depression() {
        // Inside the approximation's calibrated range, dry air gives the largest depression.
        let dry = estimate_wet_bulb_temperature(68.0, 0.0);
        let moderate = estimate_wet_bulb_temperature(68.0, 50.0);
        assert!(dry < moderate);
        assert!(68.0 - dry > 20.0);

        // At 0 °F the approximation is extrapolated well past its calibration; pin the value.
        let extrapolated = estimate_wet_bulb_temperature(0.0, 0.0);
        assert!((extrapolated - 9.4821).abs() < TOLERANCE);
    }

    #[test]
    fn test_dry_air_is_not_a_lower_bound_when_cold() {
        // A little humidity dips below the dry-air value except in hot air
        assert!(estimate_wet_bulb_temperature(68.0, 2.0) < estimate_wet_bulb_temperature(68.0, 0.0));
        let saturated = estimate_wet_bulb_temperature(-40.0, 100.0);
        let dry = estimate_wet_bulb_temperature(-40.0, 0.0);
        assert!((dry - saturated - 33.66).abs() < TOLERANCE);
    }

    #[test]
    fn test_matches_closed_form() {
        let (t, h) = (20.0_f64, 50.0_f64);
        let tc = (t - 32.0) * 5.0 / 9.0;
        let wc = tc * (0.151977 * (h + 8.313659_f64).sqrt()).atan() + (tc + h).atan()
            - (h - 1.676331_f64).atan()
            + 0.00391838 * h.powf(1.5) * (0.023101 * h).atan()
            - 4.686035;
        let expected = wc * 9.0 / 5.0 + 32.0;
        assert!((estimate_wet_bulb_temperature(t, h) - expected).abs() < 1e-9);
    }

    #[test]
    fn test_out_of_domain_propagates_nan() {
        assert!(estimate_wet_bulb_temperature(20.0, -9.0).is_nan());
        assert!(estimate_wet_bulb_temperature(f64::NAN, 50.0).is_nan());
    }

    #[test]
    fn test_checked_variant() {
        assert_eq!(
            estimate_wet_bulb_temperature_checked(28.5, 65.0),
            Ok(estimate_wet_bulb_temperature(28.5, 65.0))
        );

        let err = estimate_wet_bulb_temperature_checked(20.0, -9.0).unwrap_err();
        assert_eq!(err.humidity, -9.0);
        assert!(err.to_string().contains("humidity"));

        assert!(estimate_wet_bulb_temperature_checked(f64::NAN, 50.0).is_err());

        assert!(estimate_wet_bulb_temperature_checked(20.0, 0.0).is_ok());
        assert!(estimate_wet_bulb_temperature_checked(20.0, -1.0).is_err());
    }

    #[test]
    fn test_checked_error_travels_through_anyhow() {
        let result: anyhow::Result<f64> =
            estimate_wet_bulb_temperature_checked(20.0, -50.0).map_err(Into::into);
        let err = result.unwrap_err();
        assert!(err.downcast_ref::<DomainInputError>().is_some());
    }

    proptest! {
        #[test]
        fn prop_finite_over_operating_range(t in -40.0f64..=130.0, h in 0.0f64..=100.0) {
            prop_assert!(estimate_wet_bulb_temperature(t, h).is_finite());
        }

        #[test]
        fn prop_deterministic(t in -40.0f64..=130.0, h in 0.0f64..=100.0) {
            let a = estimate_wet_bulb_temperature(t, h);
            let b = estimate_wet_bulb_temperature(t, h);
            prop_assert_eq!(a.to_bits(), b.to_bits());
        }

        #[test]
        fn prop_saturation_near_dry_bulb(t in -40.0f64..=130.0) {
            prop_assert!((estimate_wet_bulb_temperature(t, 100.0) - t).abs() < 3.0);
        }

        // The approximation is only monotonic in humidity above freezing-ish temperatures.
        #[test]
        fn prop_non_decreasing_in_humidity(t in 40.0f64..=122.0, a in 5.0f64..=100.0, b in 5.0f64..=100.0) {
            let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
            prop_assert!(
                estimate_wet_bulb_temperature(t, lo) <= estimate_wet_bulb_temperature(t, hi) + 1e-9
            );
        }

        // Holds from about 93.4 °F upward
        #[test]
        fn prop_dry_air_lower_bound_in_hot_air(t in 95.0f64..=130.0, h in 0.0f64..=100.0) {
            prop_assert!(
                estimate_wet_bulb_temperature(t, h) >= estimate_wet_bulb_temperature(t, 0.0) - 1e-9
            );
        }

        #[test]
        fn prop_never_far_above_dry_bulb(t in 40.0f64..=122.0, h in 5.0f64..=100.0) {
            prop_assert!(estimate_wet_bulb_temperature(t, h) <= t + 0.5);
        }
    }
}
