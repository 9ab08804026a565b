//! Gas sample record and its JSON text form.
//!
//! The text form is a flat JSON object with PascalCase keys:
//!
//! ```text
//! {"SamplingDate":"2017-05-17T00:00:00",
//!  "Hydrogen":{"Value":200.0,"Unit":{"Name":"Parts per Million",...}},
//!  ...,
//!  "Nitrogen":null}
//! ```
//!
//! A missing gas key parses as an absent gas, the same as an explicit `null`.

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::calc;
use crate::error::{Error, Result};
use crate::gas::Gas;
use crate::units::{Measurement, Unit, UnitFamily};

/// One laboratory analysis: nine optional gas measurements and a sampling date.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct GasSample {
    /// Date and time the oil was drawn.
    pub sampling_date: NaiveDateTime,
    #[serde(default)]
    hydrogen: Option<Measurement>,
    #[serde(default)]
    methane: Option<Measurement>,
    #[serde(default)]
    ethane: Option<Measurement>,
    #[serde(default)]
    ethylene: Option<Measurement>,
    #[serde(default)]
    acetylene: Option<Measurement>,
    #[serde(default)]
    carbon_monoxide: Option<Measurement>,
    #[serde(default)]
    carbon_dioxide: Option<Measurement>,
    #[serde(default)]
    oxygen: Option<Measurement>,
    #[serde(default)]
    nitrogen: Option<Measurement>,
}

impl GasSample {
    /// Empty sample (every gas absent) taken at `sampling_date`.
    #[must_use]
    pub const fn new(sampling_date: NaiveDateTime) -> Self {
        Self {
            sampling_date,
            hydrogen: None,
            methane: None,
            ethane: None,
            ethylene: None,
            acetylene: None,
            carbon_monoxide: None,
            carbon_dioxide: None,
            oxygen: None,
            nitrogen: None,
        }
    }

    /// Sample with every gas present, values in ppm and ordered as [`Gas::ALL`].
    #[must_use]
    pub fn from_ppm(sampling_date: NaiveDateTime, values: [f64; 9]) -> Self {
        let mut sample = Self::new(sampling_date);
        for (gas, value) in Gas::ALL.into_iter().zip(values) {
            *sample.slot_mut(gas) = Some(Measurement::ppm(value));
        }
        sample
    }

    /// Convenience for a sample drawn at midnight on the given day.
    ///
    /// Returns `None` for an invalid calendar date.
    #[must_use]
    pub fn on_date(year: i32, month: u32, day: u32, values: [f64; 9]) -> Option<Self> {
        let date = NaiveDate::from_ymd_opt(year, month, day)?.and_hms_opt(0, 0, 0)?;
        Some(Self::from_ppm(date, values))
    }

    /// Measurement of `gas`, if reported.
    #[must_use]
    pub const fn gas(&self, gas: Gas) -> Option<Measurement> {
        match gas {
            Gas::Hydrogen => self.hydrogen,
            Gas::Methane => self.methane,
            Gas::Ethane => self.ethane,
            Gas::Ethylene => self.ethylene,
            Gas::Acetylene => self.acetylene,
            Gas::CarbonMonoxide => self.carbon_monoxide,
            Gas::CarbonDioxide => self.carbon_dioxide,
            Gas::Oxygen => self.oxygen,
            Gas::Nitrogen => self.nitrogen,
        }
    }

    pub(crate) fn slot_mut(&mut self, gas: Gas) -> &mut Option<Measurement> {
        match gas {
            Gas::Hydrogen => &mut self.hydrogen,
            Gas::Methane => &mut self.methane,
            Gas::Ethane => &mut self.ethane,
            Gas::Ethylene => &mut self.ethylene,
            Gas::Acetylene => &mut self.acetylene,
            Gas::CarbonMonoxide => &mut self.carbon_monoxide,
            Gas::CarbonDioxide => &mut self.carbon_dioxide,
            Gas::Oxygen => &mut self.oxygen,
            Gas::Nitrogen => &mut self.nitrogen,
        }
    }

    /// Replace (or clear) the measurement of `gas`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnitFamilyMismatch`] if the measurement is not a concentration.
    pub fn set_gas(&mut self, gas: Gas, measurement: Option<Measurement>) -> Result<()> {
        if let Some(m) = measurement {
            if m.unit.family() != UnitFamily::Concentration {
                return Err(Error::UnitFamilyMismatch {
                    from: m.unit.family(),
                    to: UnitFamily::Concentration,
                });
            }
        }
        *self.slot_mut(gas) = measurement;
        Ok(())
    }

    /// Builder form of [`GasSample::set_gas`].
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnitFamilyMismatch`] if the measurement is not a concentration.
    pub fn with_gas(mut self, gas: Gas, measurement: Option<Measurement>) -> Result<Self> {
        self.set_gas(gas, measurement)?;
        Ok(self)
    }

    /// Concentration of `gas` in ppm, if reported.
    #[must_use]
    pub fn ppm(&self, gas: Gas) -> Option<f64> {
        // Slots only ever hold concentrations, so the conversion cannot fail.
        self.gas(gas).and_then(|m| m.convert_to(Unit::PARTS_PER_MILLION).ok())
    }

    /// `numerator / denominator` in ppm, `None` if either gas is absent or the
    /// denominator is zero.
    #[must_use]
    pub fn ratio(&self, numerator: Gas, denominator: Gas) -> Option<f64> {
        calc::gas_ratio(self.ppm(numerator)?, self.ppm(denominator)?)
    }

    /// True when every listed gas is reported.
    #[must_use]
    pub fn has_all(&self, gases: &[Gas]) -> bool {
        gases.iter().all(|&g| self.gas(g).is_some())
    }

    fn validate(&self) -> std::result::Result<(), String> {
        for gas in Gas::ALL {
            if let Some(m) = self.gas(gas) {
                if m.unit.family() != UnitFamily::Concentration {
                    return Err(format!("{gas} must be a concentration, found {:?}", m.unit.family()));
                }
            }
        }
        Ok(())
    }
}

/// Parse the JSON text form of a sample.
///
/// # Errors
///
/// Returns [`Error::Parse`] for malformed JSON, an unknown unit, or a gas
/// expressed in a non-concentration unit. Nothing is partially accepted.
pub fn parse_sample(text: &str) -> Result<GasSample> {
    let sample: GasSample = serde_json::from_str(text).map_err(|e| Error::parse(text, e.to_string()))?;
    sample.validate().map_err(|message| Error::parse(text, message))?;
    Ok(sample)
}

/// Serialize a sample to its JSON text form.
///
/// # Errors
///
/// Returns [`Error::Json`] if encoding fails.
pub fn serialize_sample(sample: &GasSample) -> Result<String> {
    Ok(serde_json::to_string(sample)?)
}
