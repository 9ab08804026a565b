//! IEC 60599 interpretation.
//!
//! Comments on the CO2/CO, O2/N2 and C2H2/H2 ratios, compares yearly
//! increase and concentration with the typical tables, then combines both
//! with the Table 1 fault type into a Normal / Alert / Alarm verdict.

use crate::calc::DetectionLimits;
use crate::rules::{ApplyDetectionLimits, CurrentSampleExists, RuleChain};

use super::Algorithm;

mod diagnosis;
mod limits;
mod rate_of_change;
mod ratios;

pub use diagnosis::{table_one_fault, FinalDiagnosis, Verdict};
pub use limits::{typical_concentration, TypicalConcentrations};
pub use rate_of_change::{typical_rate, RateOfChange, RATE_GASES};
pub use ratios::{AcetyleneHydrogenRatio, CarbonOxidesRatio, OxygenNitrogenRatio};

/// IEC 60599 method parameters.
#[derive(Debug, Clone, Copy, Default)]
pub struct Iec60599 {
    oil_volume_litres: f64,
    communicating_oltc: bool,
    limits: DetectionLimits,
}

impl Iec60599 {
    /// No oil volume, no communicating OLTC, default detection limits.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Main tank oil volume; zero keeps rates per litre.
    #[must_use]
    pub const fn oil_volume_litres(mut self, litres: f64) -> Self {
        self.oil_volume_litres = litres;
        self
    }

    /// Whether the OLTC shares oil with the main tank.
    #[must_use]
    pub const fn communicating_oltc(mut self, communicating: bool) -> Self {
        self.communicating_oltc = communicating;
        self
    }

    /// Override the detection limits.
    #[must_use]
    pub const fn detection_limits(mut self, limits: DetectionLimits) -> Self {
        self.limits = limits;
        self
    }
}

impl Algorithm for Iec60599 {
    fn version(&self) -> &'static str {
        "IEC60599 Edition 3.0, 2015-09"
    }

    fn rules(&self) -> RuleChain {
        RuleChain::new()
            .with_rule(CurrentSampleExists)
            .with_rule(ApplyDetectionLimits::new(self.limits))
            .with_rule(CarbonOxidesRatio)
            .with_rule(OxygenNitrogenRatio)
            .with_rule(AcetyleneHydrogenRatio::new(self.communicating_oltc))
            .with_rule(RateOfChange::new(self.communicating_oltc, self.oil_volume_litres))
            .with_rule(TypicalConcentrations::new(self.communicating_oltc))
            .with_rule(FinalDiagnosis)
    }
}
