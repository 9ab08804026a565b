//! Units of measure and tagged measurements.
//!
//! A [`Unit`] is an immutable descriptor: a name, a symbol, a family, and a
//! base factor relative to the family's reference unit. Two units convert
//! into each other only when they share a family:
//!
//! ```text
//! converted = value * (source.base / target.base)
//! ```

use std::f64::consts::PI;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Family a unit belongs to. Conversion never crosses families.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum UnitFamily {
    /// Gas-in-oil concentration (reference: ppm).
    Concentration,
    /// Plane angle (reference: degree).
    Angle,
    /// Volume (reference: litre).
    Volume,
    /// Elapsed time (reference: day).
    Time,
    /// Electric potential (reference: volt).
    Voltage,
}

/// Immutable unit descriptor.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(into = "UnitDescriptor")]
pub struct Unit {
    name: &'static str,
    symbol: &'static str,
    base: f64,
    family: UnitFamily,
}

impl Unit {
    /// Parts per million (the reference concentration unit).
    pub const PARTS_PER_MILLION: Self = Self::new("Parts per Million", "PPM", 1.0, UnitFamily::Concentration);
    /// Microlitres of gas per litre of oil, numerically equal to ppm.
    pub const MICROLITRES_PER_LITRE: Self =
        Self::new("Microlitres per Litre", "ul/l", 1.0, UnitFamily::Concentration);
    /// Parts per billion.
    pub const PARTS_PER_BILLION: Self = Self::new("Parts per Billion", "PPB", 0.001, UnitFamily::Concentration);
    /// Percent by volume.
    pub const PERCENT: Self = Self::new("Percent", "%", 10_000.0, UnitFamily::Concentration);

    /// Degrees (reference angle unit).
    pub const DEGREES: Self = Self::new("Degrees", "o", 1.0, UnitFamily::Angle);
    /// Radians.
    pub const RADIANS: Self = Self::new("Radians", "r", 180.0 / PI, UnitFamily::Angle);

    /// Litre (reference volume unit).
    pub const LITRE: Self = Self::new("Litre", "l", 1.0, UnitFamily::Volume);
    /// Millilitre.
    pub const MILLILITRE: Self = Self::new("Millilitre", "ml", 0.001, UnitFamily::Volume);
    /// Cubic metre.
    pub const CUBIC_METRE: Self = Self::new("Cubic Metre", "m3", 1000.0, UnitFamily::Volume);
    /// US liquid gallon.
    pub const US_GALLON: Self = Self::new("US Gallon", "gal", 3.785_411_784, UnitFamily::Volume);

    /// Second.
    pub const SECOND: Self = Self::new("Second", "s", 1.0 / 86_400.0, UnitFamily::Time);
    /// Minute.
    pub const MINUTE: Self = Self::new("Minute", "min", 1.0 / 1440.0, UnitFamily::Time);
    /// Hour.
    pub const HOUR: Self = Self::new("Hour", "h", 1.0 / 24.0, UnitFamily::Time);
    /// Day (reference time unit).
    pub const DAY: Self = Self::new("Day", "d", 1.0, UnitFamily::Time);
    /// Week.
    pub const WEEK: Self = Self::new("Week", "wk", 7.0, UnitFamily::Time);
    /// Year of 365 days.
    pub const YEAR: Self = Self::new("Year", "yr", 365.0, UnitFamily::Time);

    /// Volt (reference voltage unit).
    pub const VOLT: Self = Self::new("Volt", "V", 1.0, UnitFamily::Voltage);
    /// Kilovolt.
    pub const KILOVOLT: Self = Self::new("kiloVolt", "kV", 1000.0, UnitFamily::Voltage);

    /// Every unit known to the crate. Deserialization resolves against this list.
    pub const CATALOGUE: [Self; 18] = [
        Self::PARTS_PER_MILLION,
        Self::MICROLITRES_PER_LITRE,
        Self::PARTS_PER_BILLION,
        Self::PERCENT,
        Self::DEGREES,
        Self::RADIANS,
        Self::LITRE,
        Self::MILLILITRE,
        Self::CUBIC_METRE,
        Self::US_GALLON,
        Self::SECOND,
        Self::MINUTE,
        Self::HOUR,
        Self::DAY,
        Self::WEEK,
        Self::YEAR,
        Self::VOLT,
        Self::KILOVOLT,
    ];

    const fn new(name: &'static str, symbol: &'static str, base: f64, family: UnitFamily) -> Self {
        Self { name, symbol, base, family }
    }

    /// Human readable name.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        self.name
    }

    /// Short symbol.
    #[must_use]
    pub const fn symbol(&self) -> &'static str {
        self.symbol
    }

    /// Factor relative to the family's reference unit.
    #[must_use]
    pub const fn base(&self) -> f64 {
        self.base
    }

    /// Family this unit belongs to.
    #[must_use]
    pub const fn family(&self) -> UnitFamily {
        self.family
    }

    /// Looks a unit up in the catalogue by family and symbol.
    #[must_use]
    pub fn lookup(family: UnitFamily, symbol: &str) -> Option<Self> {
        Self::CATALOGUE.iter().copied().find(|u| u.family == family && u.symbol == symbol)
    }
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol)
    }
}

/// Wire form of a unit.
#[derive(Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct UnitDescriptor {
    name: String,
    symbol: String,
    base: f64,
    family: UnitFamily,
}

impl From<Unit> for UnitDescriptor {
    fn from(unit: Unit) -> Self {
        Self {
            name: unit.name.to_string(),
            symbol: unit.symbol.to_string(),
            base: unit.base,
            family: unit.family,
        }
    }
}

impl TryFrom<UnitDescriptor> for Unit {
    type Error = String;

    fn try_from(descriptor: UnitDescriptor) -> std::result::Result<Self, Self::Error> {
        Unit::lookup(descriptor.family, &descriptor.symbol).ok_or_else(|| {
            format!(
                "unknown {:?} unit '{}' ({})",
                descriptor.family, descriptor.symbol, descriptor.name
            )
        })
    }
}

impl<'de> Deserialize<'de> for Unit {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let descriptor = UnitDescriptor::deserialize(deserializer)?;
        Self::try_from(descriptor).map_err(serde::de::Error::custom)
    }
}

/// A numeric value tagged with its unit.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Measurement {
    /// Numeric value expressed in `unit`.
    pub value: f64,
    /// Unit of `value`.
    pub unit: Unit,
}

impl Measurement {
    /// Create a new measurement.
    #[must_use]
    pub const fn new(value: f64, unit: Unit) -> Self {
        Self { value, unit }
    }

    /// Concentration in parts per million.
    #[must_use]
    pub const fn ppm(value: f64) -> Self {
        Self::new(value, Unit::PARTS_PER_MILLION)
    }

    /// Angle in degrees.
    #[must_use]
    pub const fn degrees(value: f64) -> Self {
        Self::new(value, Unit::DEGREES)
    }

    /// Volume in litres.
    #[must_use]
    pub const fn litres(value: f64) -> Self {
        Self::new(value, Unit::LITRE)
    }

    /// Value expressed in `unit`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnitFamilyMismatch`] when `unit` is from another family.
    pub fn convert_to(&self, unit: Unit) -> Result<f64> {
        if self.unit.family != unit.family {
            return Err(Error::UnitFamilyMismatch { from: self.unit.family, to: unit.family });
        }

        Ok(self.value * (self.unit.base / unit.base))
    }

    /// Same quantity re-expressed in `unit`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnitFamilyMismatch`] when `unit` is from another family.
    pub fn to_unit(&self, unit: Unit) -> Result<Self> {
        Ok(Self::new(self.convert_to(unit)?, unit))
    }
}

impl fmt::Display for Measurement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.value, self.unit)
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    fn family_pairs() -> Vec<(Unit, Unit)> {
        let mut pairs = Vec::new();
        for a in Unit::CATALOGUE {
            for b in Unit::CATALOGUE {
                if a.family() == b.family() {
                    pairs.push((a, b));
                }
            }
        }
        pairs
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(500))]

        /// Converting there and back returns the original value.
        #[test]
        fn prop_round_trip_conversion(
            value in -1.0e6f64..1.0e6,
            index in 0usize..64
        ) {
            let pairs = family_pairs();
            let (u1, u2) = pairs[index % pairs.len()];
            let m = Measurement::new(value, u1);
            let there = m.to_unit(u2).unwrap();
            let back = there.convert_to(u1).unwrap();
            prop_assert!((back - value).abs() <= 1e-9 * value.abs().max(1.0),
                "{} -> {} -> {} ({} / {})", value, there.value, back, u1, u2);
        }
    }
}
