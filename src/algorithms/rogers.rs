//! Rogers ratio classification.

use crate::calc::DetectionLimits;
use crate::error::Result;
use crate::failure::FailureCode;
use crate::gas::Gas;
use crate::rules::{ApplyDetectionLimits, Classifier, Rule, RuleChain, RuleContext, RuleEffect};
use crate::sample::GasSample;

use super::Algorithm;

/// The three Rogers ratios.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RogersRatioSet {
    /// C2H2 / C2H4.
    pub acetylene_ethylene: f64,
    /// CH4 / H2.
    pub methane_hydrogen: f64,
    /// C2H4 / C2H6.
    pub ethylene_ethane: f64,
}

impl RogersRatioSet {
    /// Ratios of a sample; `None` if a gas is absent or a denominator is zero.
    #[must_use]
    pub fn from_sample(sample: &GasSample) -> Option<Self> {
        Some(Self {
            acetylene_ethylene: sample.ratio(Gas::Acetylene, Gas::Ethylene)?,
            methane_hydrogen: sample.ratio(Gas::Methane, Gas::Hydrogen)?,
            ethylene_ethane: sample.ratio(Gas::Ethylene, Gas::Ethane)?,
        })
    }

    /// Fault code for these ratios. Every case is checked and the last one
    /// that holds wins; no match is [`FailureCode::NA`].
    #[must_use]
    pub fn failure_code(&self) -> FailureCode {
        let (a, b, c) = (self.acetylene_ethylene, self.methane_hydrogen, self.ethylene_ethane);
        let cases = [
            (a < 0.1 && b > 0.1 && b < 1.0 && c < 1.0, FailureCode::N),
            (a < 0.1 && b < 0.1 && c < 1.0, FailureCode::PD),
            ((0.1..=3.0).contains(&a) && (0.1..=1.0).contains(&b) && c > 3.0, FailureCode::D2),
            (a < 0.1 && b > 0.1 && b < 1.0 && (1.0..=3.0).contains(&c), FailureCode::T1),
            (a < 0.1 && b > 1.0 && (1.0..=3.0).contains(&c), FailureCode::T2),
            (a < 0.1 && b > 1.0 && c >= 3.0, FailureCode::T3),
        ];
        cases
            .iter()
            .rev()
            .find(|(holds, _)| *holds)
            .map_or(FailureCode::NA, |&(_, code)| code)
    }
}

/// Emits the three ratios and the resulting fault code.
#[derive(Debug, Clone, Copy, Default)]
pub struct RogersRule;

impl RogersRule {
    /// Name of the fault-code entry.
    pub const FAILURE_CODE: &'static str = "Rogers Ratio Failure Code";
}

impl Rule for RogersRule {
    fn name(&self) -> &'static str {
        "rogers_ratios"
    }

    fn is_applicable(&self, ctx: &RuleContext<'_>) -> bool {
        ctx.current.and_then(RogersRatioSet::from_sample).is_some()
    }

    fn execute(&self, ctx: &RuleContext<'_>) -> Result<RuleEffect> {
        let Some(ratios) = ctx.current.and_then(RogersRatioSet::from_sample) else {
            return Ok(RuleEffect::none());
        };
        let code = ratios.failure_code();
        Ok(RuleEffect::none()
            .with_output("C2H2/C2H4", format!("{:.3}", ratios.acetylene_ethylene))
            .with_output("CH4/H2", format!("{:.3}", ratios.methane_hydrogen))
            .with_output("C2H4/C2H6", format!("{:.3}", ratios.ethylene_ethane))
            .with_output(Self::FAILURE_CODE, code.description())
            .with_fault_code(Classifier::RogersRatios, code))
    }
}

/// Rogers ratios as tabulated in IEEE C57.104.
#[derive(Debug, Clone, Copy, Default)]
pub struct RogersRatios {
    limits: DetectionLimits,
}

impl RogersRatios {
    /// Method with default detection limits.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Override the detection limits.
    #[must_use]
    pub const fn detection_limits(mut self, limits: DetectionLimits) -> Self {
        self.limits = limits;
        self
    }
}

impl Algorithm for RogersRatios {
    fn version(&self) -> &'static str {
        "Rogers Ratios as described in IEEE C57.104"
    }

    fn rules(&self) -> RuleChain {
        RuleChain::new().with_rule(ApplyDetectionLimits::new(self.limits)).with_rule(RogersRule)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::Outputs;

    fn sample(h2: f64, ch4: f64, c2h6: f64, c2h4: f64, c2h2: f64) -> GasSample {
        GasSample::on_date(2017, 5, 17, [h2, ch4, c2h6, c2h4, c2h2, 0.0, 0.0, 0.0, 0.0]).unwrap()
    }

    fn ratios(a: f64, b: f64, c: f64) -> RogersRatioSet {
        RogersRatioSet { acetylene_ethylene: a, methane_hydrogen: b, ethylene_ethane: c }
    }

    #[test]
    fn test_rule_normal_operation() {
        let current = sample(100.0, 50.0, 2.0, 1.0, 0.09);
        let outputs = Outputs::new();
        let ctx = RuleContext { current: Some(&current), previous: None, outputs: &outputs };
        let effect = RogersRule.execute(&ctx).unwrap();
        assert_eq!(effect.fault_codes, [(Classifier::RogersRatios, FailureCode::N)]);
        assert_eq!(effect.outputs[0].description, "0.090");
        assert_eq!(effect.outputs[1].description, "0.500");
        assert_eq!(effect.outputs[2].description, "0.500");
    }

    #[test]
    fn test_high_energy_discharge() {
        let outputs = super::super::run_rogers_ratios(&sample(100.0, 50.0, 0.1, 1.0, 0.1)).unwrap();
        assert_eq!(outputs.fault_code(Classifier::RogersRatios), Some(FailureCode::D2));
        assert_eq!(
            outputs.find(RogersRule::FAILURE_CODE).unwrap().description,
            "D2 => Discharges of high energy"
        );
        assert_eq!(outputs.find("C2H4/C2H6").unwrap().description, "10.000");
    }

    #[test]
    fn test_failure_code_table() {
        assert_eq!(ratios(0.05, 0.05, 0.5).failure_code(), FailureCode::PD);
        assert_eq!(ratios(0.05, 0.5, 2.0).failure_code(), FailureCode::T1);
        assert_eq!(ratios(0.05, 2.0, 2.0).failure_code(), FailureCode::T2);
        assert_eq!(ratios(0.05, 2.0, 5.0).failure_code(), FailureCode::T3);
        assert_eq!(ratios(5.0, 5.0, 5.0).failure_code(), FailureCode::NA);
    }

    #[test]
    fn test_boundary_overlap_takes_last_case() {
        // c == 3 satisfies both T2 and T3.
        assert_eq!(ratios(0.05, 2.0, 3.0).failure_code(), FailureCode::T3);
    }

    #[test]
    fn test_zero_denominator_skips_rule() {
        let s = sample(0.0, 50.0, 2.0, 1.0, 0.09).with_gas(Gas::Hydrogen, None).unwrap();
        let outputs = super::super::run_rogers_ratios(&s).unwrap();
        assert_eq!(outputs.len(), 1);
        assert!(outputs.fault_code(Classifier::RogersRatios).is_none());
    }
}
