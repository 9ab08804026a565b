//! IEC 60599 Table 1 fault type and the overall verdict.

use std::fmt;

use crate::error::Result;
use crate::failure::FailureCode;
use crate::gas::Gas;
use crate::rules::{Classifier, Rule, RuleContext, RuleEffect, Signal};
use crate::sample::GasSample;

/// Overall condition reported as `"Final Diagnosis"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    /// Gases and rates within typical values.
    Normal,
    /// Concentrations or rates above typical values.
    Alert,
    /// Both exceeded, or a high-energy discharge.
    Alarm,
}

impl Verdict {
    /// Label as emitted.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Normal => "Normal",
            Self::Alert => "Alert",
            Self::Alarm => "Alarm",
        }
    }

    /// Combine the two signals with the Table 1 fault type.
    #[must_use]
    pub fn decide(limit_exceeded: bool, rate_exceeded: bool, fault: Option<FailureCode>) -> Self {
        if fault == Some(FailureCode::D2) || (limit_exceeded && rate_exceeded) {
            Self::Alarm
        } else if limit_exceeded || rate_exceeded {
            Self::Alert
        } else {
            Self::Normal
        }
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Table 1 fault type from C2H2/C2H4, CH4/H2 and C2H4/C2H6; the first row
/// that holds wins.
#[must_use]
pub fn table_one_fault(acetylene_ethylene: f64, methane_hydrogen: f64, ethylene_ethane: f64) -> FailureCode {
    let (a, b, c) = (acetylene_ethylene, methane_hydrogen, ethylene_ethane);
    if b < 0.1 && c < 0.2 {
        FailureCode::PD
    } else if a > 1.0 && (0.1..=0.5).contains(&b) && c > 1.0 {
        FailureCode::D1
    } else if (0.6..=2.5).contains(&a) && (0.1..=1.0).contains(&b) && c > 2.0 {
        FailureCode::D2
    } else if c < 1.0 {
        FailureCode::T1
    } else if a < 0.1 && b > 1.0 && (1.0..=4.0).contains(&c) {
        FailureCode::T2
    } else if a < 0.2 && b > 1.0 && c > 4.0 {
        FailureCode::T3
    } else {
        FailureCode::NA
    }
}

fn sample_fault(sample: &GasSample) -> Option<FailureCode> {
    Some(table_one_fault(
        sample.ratio(Gas::Acetylene, Gas::Ethylene)?,
        sample.ratio(Gas::Methane, Gas::Hydrogen)?,
        sample.ratio(Gas::Ethylene, Gas::Ethane)?,
    ))
}

/// Reads the concentration and rate signals and emits the verdict.
#[derive(Debug, Clone, Copy, Default)]
pub struct FinalDiagnosis;

impl FinalDiagnosis {
    /// Entry carrying the Table 1 fault type.
    pub const FAULT_TYPE: &'static str = "IEC 60599 Fault Type";
    /// Entry carrying the verdict.
    pub const OUTPUT: &'static str = "Final Diagnosis";
}

impl Rule for FinalDiagnosis {
    fn name(&self) -> &'static str {
        "final_diagnosis"
    }

    fn is_applicable(&self, ctx: &RuleContext<'_>) -> bool {
        ctx.outputs.signal(Signal::LimitExceeded).is_some()
            || ctx.outputs.signal(Signal::RateOfChangeExceeded).is_some()
    }

    fn execute(&self, ctx: &RuleContext<'_>) -> Result<RuleEffect> {
        let limit = ctx.outputs.signal(Signal::LimitExceeded).unwrap_or(false);
        let rate = ctx.outputs.signal(Signal::RateOfChangeExceeded).unwrap_or(false);
        let fault = ctx.current.and_then(sample_fault);

        let mut effect = RuleEffect::none();
        if let Some(code) = fault {
            effect = effect
                .with_output(Self::FAULT_TYPE, code.description())
                .with_fault_code(Classifier::IecRatios, code);
        }
        Ok(effect.with_output(Self::OUTPUT, Verdict::decide(limit, rate, fault).as_str()))
    }
}
