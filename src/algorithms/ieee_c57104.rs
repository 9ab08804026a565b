//! IEEE C57.104 Table 1 screening.
//!
//! Table 1 lists 90th percentile concentrations in ul/l by O2/N2 ratio and
//! transformer age. A sample is compared gas by gas against the column that
//! matches its own O2/N2 ratio and the transformer's age.

use std::fmt;

use crate::calc::DetectionLimits;
use crate::error::Result;
use crate::gas::Gas;
use crate::rules::{ApplyDetectionLimits, CurrentSampleExists, Rule, RuleChain, RuleContext, RuleEffect, Signal};
use crate::sample::GasSample;

use super::Algorithm;

/// O2/N2 column of Table 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OxygenNitrogenBucket {
    /// O2/N2 <= 0.2.
    AtMostPointTwo,
    /// O2/N2 > 0.2, also used when the ratio cannot be computed.
    AbovePointTwo,
}

impl OxygenNitrogenBucket {
    /// Bucket for a ratio; `None` (absent O2 or N2, or zero N2) counts as above 0.2.
    #[must_use]
    pub fn from_ratio(ratio: Option<f64>) -> Self {
        match ratio {
            Some(r) if r <= 0.2 => Self::AtMostPointTwo,
            _ => Self::AbovePointTwo,
        }
    }
}

impl fmt::Display for OxygenNitrogenBucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::AtMostPointTwo => "O2/N2 <= 0.2",
            Self::AbovePointTwo => "O2/N2 > 0.2",
        })
    }
}

/// Age column of Table 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AgeBucket {
    /// Age not known.
    Unknown,
    /// Up to 9 years.
    UpToNine,
    /// 10 to 30 years.
    TenToThirty,
    /// Over 30 years.
    OverThirty,
}

impl AgeBucket {
    /// Bucket for an age in years.
    #[must_use]
    pub fn from_years(age: Option<f64>) -> Self {
        match age {
            None => Self::Unknown,
            Some(years) if years < 10.0 => Self::UpToNine,
            Some(years) if years <= 30.0 => Self::TenToThirty,
            Some(_) => Self::OverThirty,
        }
    }

    const fn column(self) -> usize {
        match self {
            Self::Unknown => 0,
            Self::UpToNine => 1,
            Self::TenToThirty => 2,
            Self::OverThirty => 3,
        }
    }
}

impl fmt::Display for AgeBucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Unknown => "age unknown",
            Self::UpToNine => "age 1 to 9 years",
            Self::TenToThirty => "age 10 to 30 years",
            Self::OverThirty => "age over 30 years",
        })
    }
}

/// Table 1 rows: gas, then the four age columns for O2/N2 <= 0.2 and for
/// O2/N2 > 0.2.
const TABLE_ONE: [(Gas, [f64; 4], [f64; 4]); 7] = [
    (Gas::Hydrogen, [80.0, 75.0, 75.0, 100.0], [40.0, 40.0, 40.0, 40.0]),
    (Gas::Methane, [90.0, 45.0, 90.0, 110.0], [20.0, 20.0, 20.0, 20.0]),
    (Gas::Ethane, [90.0, 30.0, 90.0, 150.0], [15.0, 15.0, 15.0, 15.0]),
    (Gas::Ethylene, [50.0, 20.0, 50.0, 90.0], [50.0, 25.0, 60.0, 60.0]),
    (Gas::Acetylene, [1.0, 1.0, 1.0, 1.0], [2.0, 2.0, 2.0, 2.0]),
    (Gas::CarbonMonoxide, [900.0, 900.0, 900.0, 900.0], [500.0, 500.0, 500.0, 500.0]),
    (Gas::CarbonDioxide, [9000.0, 5000.0, 10000.0, 10000.0], [5000.0, 3500.0, 5500.0, 5500.0]),
];

/// 90th percentile limit for `gas`, `None` for O2 and N2.
#[must_use]
pub fn table_one_limit(gas: Gas, ratio: OxygenNitrogenBucket, age: AgeBucket) -> Option<f64> {
    TABLE_ONE.iter().find(|(g, _, _)| *g == gas).map(|(_, low, high)| match ratio {
        OxygenNitrogenBucket::AtMostPointTwo => low[age.column()],
        OxygenNitrogenBucket::AbovePointTwo => high[age.column()],
    })
}

/// Compares the current sample with its Table 1 column and raises
/// [`Signal::TableOneLimitExceeded`].
#[derive(Debug, Clone, Copy, Default)]
pub struct TableOne {
    transformer_age_years: Option<f64>,
}

impl TableOne {
    /// Entry describing the column used.
    pub const CONTEXT: &'static str = "O2 / N2 Ratio";

    /// Rule for a transformer of the given age.
    #[must_use]
    pub const fn new(transformer_age_years: Option<f64>) -> Self {
        Self { transformer_age_years }
    }

    fn context(ratio: Option<f64>, bucket: OxygenNitrogenBucket, age: AgeBucket) -> String {
        let ratio = ratio.map_or_else(|| "NA".to_string(), |r| format!("{r:.2}"));
        format!("{ratio} => Table 1 limits for {bucket}, {age}")
    }

    /// `(gas, value, limit)` for each gas above its limit.
    fn exceeded(current: &GasSample, bucket: OxygenNitrogenBucket, age: AgeBucket) -> Vec<(Gas, f64, f64)> {
        TABLE_ONE
            .iter()
            .filter_map(|&(gas, _, _)| {
                let value = current.ppm(gas)?;
                let limit = table_one_limit(gas, bucket, age)?;
                (value > limit).then_some((gas, value, limit))
            })
            .collect()
    }
}

impl Rule for TableOne {
    fn name(&self) -> &'static str {
        "ieee_table_one"
    }

    fn is_applicable(&self, ctx: &RuleContext<'_>) -> bool {
        ctx.current.is_some()
    }

    fn execute(&self, ctx: &RuleContext<'_>) -> Result<RuleEffect> {
        let Some(current) = ctx.current else {
            return Ok(RuleEffect::none());
        };
        let ratio = current.ratio(Gas::Oxygen, Gas::Nitrogen);
        let bucket = OxygenNitrogenBucket::from_ratio(ratio);
        let age = AgeBucket::from_years(self.transformer_age_years);

        let mut effect = RuleEffect::none().with_output(Self::CONTEXT, Self::context(ratio, bucket, age));
        let exceeded = Self::exceeded(current, bucket, age);
        let any = !exceeded.is_empty();
        for (gas, value, limit) in exceeded {
            effect = effect.with_output(
                format!("{gas} Concentration"),
                format!(
                    "The concentration of {gas} is {value:.2} ul/l which is higher than the 90th percentile \
                     value of {limit:.2} ul/l."
                ),
            );
        }
        Ok(effect.with_signal(Signal::TableOneLimitExceeded, any))
    }
}

/// IEEE C57.104 method parameters.
#[derive(Debug, Clone, Copy, Default)]
pub struct IeeeC57104 {
    transformer_age_years: Option<f64>,
    limits: DetectionLimits,
}

impl IeeeC57104 {
    /// Unknown age, default detection limits.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Transformer age in years, `None` when unknown.
    #[must_use]
    pub const fn transformer_age_years(mut self, years: Option<f64>) -> Self {
        self.transformer_age_years = years;
        self
    }

    /// Override the detection limits.
    #[must_use]
    pub const fn detection_limits(mut self, limits: DetectionLimits) -> Self {
        self.limits = limits;
        self
    }
}

impl Algorithm for IeeeC57104 {
    fn version(&self) -> &'static str {
        "IEEE DRAFT PC57.104/D4.1, October 2017"
    }

    fn rules(&self) -> RuleChain {
        RuleChain::new()
            .with_rule(CurrentSampleExists)
            .with_rule(ApplyDetectionLimits::new(self.limits))
            .with_rule(TableOne::new(self.transformer_age_years))
    }
}
