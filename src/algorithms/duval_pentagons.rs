//! Duval Pentagons 1 and 2.

use crate::calc::DetectionLimits;
use crate::error::Result;
use crate::gas::Gas;
use crate::geometry::{Pentagon, PENTAGON_AXES};
use crate::rules::{ApplyDetectionLimits, Classifier, Rule, RuleChain, RuleContext, RuleEffect};
use crate::sample::GasSample;

use super::{percentages, Algorithm};

/// Gases in axis order.
const AXIS_GASES: [Gas; 5] = [
    PENTAGON_AXES[0].gas,
    PENTAGON_AXES[1].gas,
    PENTAGON_AXES[2].gas,
    PENTAGON_AXES[3].gas,
    PENTAGON_AXES[4].gas,
];

/// Classifies the working current sample on one pentagon.
#[derive(Debug, Clone, Copy)]
pub struct PentagonRule {
    name: &'static str,
    pentagon: Pentagon,
    classifier: Classifier,
}

impl PentagonRule {
    /// Pentagon 1.
    pub const ONE: Self = Self {
        name: "Duval Pentagon 1",
        pentagon: Pentagon::ONE,
        classifier: Classifier::DuvalPentagon1,
    };

    /// Pentagon 2.
    pub const TWO: Self = Self {
        name: "Duval Pentagon 2",
        pentagon: Pentagon::TWO,
        classifier: Classifier::DuvalPentagon2,
    };

    fn shares(sample: &GasSample) -> Option<[f64; 5]> {
        percentages(sample, AXIS_GASES)
    }
}

impl Rule for PentagonRule {
    fn name(&self) -> &'static str {
        self.name
    }

    fn is_applicable(&self, ctx: &RuleContext<'_>) -> bool {
        ctx.current.and_then(Self::shares).is_some()
    }

    fn execute(&self, ctx: &RuleContext<'_>) -> Result<RuleEffect> {
        let Some(shares) = ctx.current.and_then(Self::shares) else {
            return Ok(RuleEffect::none());
        };
        let code = self.pentagon.classify(shares)?;
        Ok(RuleEffect::none()
            .with_output(self.name, code.description())
            .with_fault_code(self.classifier, code))
    }
}

/// Pentagon 1 then Pentagon 2.
#[derive(Debug, Clone, Copy, Default)]
pub struct DuvalPentagons {
    limits: DetectionLimits,
}

impl DuvalPentagons {
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

impl Algorithm for DuvalPentagons {
    fn version(&self) -> &'static str {
        "Duval Pentagons for Oil Filled Transformers"
    }

    fn rules(&self) -> RuleChain {
        RuleChain::new()
            .with_rule(ApplyDetectionLimits::new(self.limits))
            .with_rule(PentagonRule::ONE)
            .with_rule(PentagonRule::TWO)
    }
}
