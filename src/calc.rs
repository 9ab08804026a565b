//! Ratio, rate-of-change and detection-limit arithmetic.

use chrono::Datelike;

use crate::error::{Error, Result};
use crate::gas::Gas;
use crate::sample::GasSample;
use crate::units::{Measurement, Unit, UnitFamily};

/// `numerator / denominator`, or `None` when the denominator is exactly zero.
#[must_use]
pub fn gas_ratio(numerator: f64, denominator: f64) -> Option<f64> {
    if denominator == 0.0 {
        None
    } else {
        Some(numerator / denominator)
    }
}

/// Change of `gas` per `time_unit` between two samples, in ppm.
///
/// Elapsed time is the difference of the sampling years, so the granularity
/// is whole calendar years whatever unit is requested. Returns `Ok(None)`
/// when a sample or the gas is absent, or when both samples fall in the same
/// year.
///
/// # Errors
///
/// Returns [`Error::UnitFamilyMismatch`] if `time_unit` is not a time unit.
pub fn rate_of_change(
    current: Option<&GasSample>,
    previous: Option<&GasSample>,
    gas: Gas,
    time_unit: Unit,
) -> Result<Option<f64>> {
    if time_unit.family() != UnitFamily::Time {
        return Err(Error::UnitFamilyMismatch { from: time_unit.family(), to: UnitFamily::Time });
    }
    let (Some(current), Some(previous)) = (current, previous) else {
        return Ok(None);
    };
    let (Some(now), Some(before)) = (current.ppm(gas), previous.ppm(gas)) else {
        return Ok(None);
    };

    let years = f64::from(current.sampling_date.year() - previous.sampling_date.year());
    let elapsed = years / (time_unit.base() / Unit::YEAR.base());
    Ok(gas_ratio(now - before, elapsed))
}

/// Per-gas lower reporting limits, in ppm.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DetectionLimits {
    limits: [f64; 9],
}

impl DetectionLimits {
    /// Laboratory defaults, ordered as [`Gas::ALL`].
    pub const DEFAULT_PPM: [f64; 9] = [2.0, 0.1, 0.1, 0.1, 0.1, 5.0, 10.0, 500.0, 2000.0];

    /// Limits from an explicit table ordered as [`Gas::ALL`].
    #[must_use]
    pub const fn new(limits: [f64; 9]) -> Self {
        Self { limits }
    }

    /// Limit for one gas in ppm.
    #[must_use]
    pub const fn limit(&self, gas: Gas) -> f64 {
        self.limits[gas.index()]
    }

    /// Replace the limit of one gas.
    #[must_use]
    pub fn with_limit(mut self, gas: Gas, ppm: f64) -> Self {
        self.limits[gas.index()] = ppm;
        self
    }

    /// Merge an override map on top of the current limits.
    #[must_use]
    pub fn with_overrides<I>(self, overrides: I) -> Self
    where
        I: IntoIterator<Item = (Gas, f64)>,
    {
        overrides.into_iter().fold(self, |limits, (gas, ppm)| limits.with_limit(gas, ppm))
    }

    /// New sample with every reported gas raised to at least its limit.
    ///
    /// Absent gases stay absent; a clamped value keeps the unit it was
    /// reported in.
    #[must_use]
    pub fn apply(&self, sample: &GasSample) -> GasSample {
        let mut clamped = sample.clone();
        for gas in Gas::ALL {
            let (Some(measurement), Some(ppm)) = (sample.gas(gas), sample.ppm(gas)) else {
                continue;
            };
            let limit = self.limit(gas);
            if ppm < limit {
                let unit = measurement.unit;
                *clamped.slot_mut(gas) = Some(Measurement::new(limit / unit.base(), unit));
            }
        }
        clamped
    }
}

impl Default for DetectionLimits {
    fn default() -> Self {
        Self::new(Self::DEFAULT_PPM)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn current() -> GasSample {
        GasSample::on_date(2017, 5, 17, [200.0, 40.0, 15.5, 10.0, 4.5, 300.0, 3000.0, 750.0, 7500.0]).unwrap()
    }

    fn previous() -> GasSample {
        GasSample::on_date(2016, 5, 17, [100.0, 20.0, 7.5, 5.0, 2.5, 150.0, 1500.0, 355.0, 3550.0]).unwrap()
    }

    #[test]
    fn test_ratio_zero_denominator() {
        assert_eq!(gas_ratio(5.0, 0.0), None);
        assert_eq!(gas_ratio(5.0, 2.0), Some(2.5));
    }

    #[test]
    fn test_yearly_rate_of_change() {
        let rate = rate_of_change(Some(&current()), Some(&previous()), Gas::Hydrogen, Unit::YEAR).unwrap();
        assert_eq!(rate, Some(100.0));
    }

    #[test]
    fn test_daily_rate_of_change() {
        let rate = rate_of_change(Some(&current()), Some(&previous()), Gas::Hydrogen, Unit::DAY)
            .unwrap()
            .unwrap();
        assert_relative_eq!(rate, 100.0 / 365.0, epsilon = 1e-12);
    }

    #[test]
    fn test_rate_of_change_missing_sample() {
        assert_eq!(rate_of_change(None, Some(&previous()), Gas::Hydrogen, Unit::YEAR).unwrap(), None);
        assert_eq!(rate_of_change(Some(&current()), None, Gas::Hydrogen, Unit::YEAR).unwrap(), None);
    }

    #[test]
    fn test_rate_of_change_same_year() {
        let mut prev = previous();
        prev.sampling_date = current().sampling_date;
        assert_eq!(rate_of_change(Some(&current()), Some(&prev), Gas::Hydrogen, Unit::YEAR).unwrap(), None);
    }

    #[test]
    fn test_rate_of_change_absent_gas() {
        let cur = current().with_gas(Gas::Methane, None).unwrap();
        assert_eq!(rate_of_change(Some(&cur), Some(&previous()), Gas::Methane, Unit::YEAR).unwrap(), None);
    }

    #[test]
    fn test_rate_of_change_rejects_non_time_unit() {
        let result = rate_of_change(Some(&current()), Some(&previous()), Gas::Hydrogen, Unit::LITRE);
        assert!(matches!(result, Err(Error::UnitFamilyMismatch { .. })));
    }

    #[test]
    fn test_detection_limits_clamp() {
        let sample = GasSample::on_date(2020, 1, 1, [0.0; 9]).unwrap();
        let clamped = DetectionLimits::default().apply(&sample);
        for (gas, expected) in Gas::ALL.into_iter().zip(DetectionLimits::DEFAULT_PPM) {
            assert_relative_eq!(clamped.ppm(gas).unwrap(), expected);
        }
        // input untouched
        assert_eq!(sample.ppm(Gas::Hydrogen), Some(0.0));
    }

    #[test]
    fn test_detection_limits_leave_absent_and_high_values() {
        let sample = current().with_gas(Gas::Oxygen, None).unwrap();
        let clamped = DetectionLimits::default().apply(&sample);
        assert_eq!(clamped.gas(Gas::Oxygen), None);
        assert_eq!(clamped.ppm(Gas::Hydrogen), Some(200.0));
    }

    #[test]
    fn test_detection_limit_keeps_unit() {
        let sample = current()
            .with_gas(Gas::Hydrogen, Some(Measurement::new(0.0001, Unit::PERCENT)))
            .unwrap();
        let clamped = DetectionLimits::default().apply(&sample);
        let h2 = clamped.gas(Gas::Hydrogen).unwrap();
        assert_eq!(h2.unit, Unit::PERCENT);
        assert_relative_eq!(h2.value, 0.0002, epsilon = 1e-15);
    }

    #[test]
    fn test_overrides() {
        let limits = DetectionLimits::default().with_overrides([(Gas::Hydrogen, 5.0), (Gas::Nitrogen, 1.0)]);
        assert_eq!(limits.limit(Gas::Hydrogen), 5.0);
        assert_eq!(limits.limit(Gas::Nitrogen), 1.0);
        assert_eq!(limits.limit(Gas::Methane), 0.1);
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(300))]

        /// Division by zero never yields a value.
        #[test]
        fn prop_ratio_by_zero(x in proptest::num::f64::ANY) {
            prop_assert_eq!(gas_ratio(x, 0.0), None);
        }

        /// Non-zero denominators give the plain quotient.
        #[test]
        fn prop_ratio_quotient(x in -1.0e6f64..1.0e6, y in 0.001f64..1.0e6) {
            prop_assert_eq!(gas_ratio(x, y), Some(x / y));
        }

        /// Clamping twice equals clamping once.
        #[test]
        fn prop_clamp_idempotent(values in proptest::array::uniform9(0.0f64..5000.0)) {
            let sample = GasSample::on_date(2020, 6, 1, values).unwrap();
            let limits = DetectionLimits::default();
            let once = limits.apply(&sample);
            let twice = limits.apply(&once);
            prop_assert_eq!(once, twice);
        }
    }
}
