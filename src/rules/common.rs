//! Rules shared by several methods.

use crate::calc::DetectionLimits;
use crate::error::{Error, Result};

use super::{Rule, RuleContext, RuleEffect};

/// Requires a current sample; notes when there is nothing to compare against.
#[derive(Debug, Clone, Copy, Default)]
pub struct CurrentSampleExists;

impl CurrentSampleExists {
    /// Entry emitted when the previous sample is missing.
    pub const INSUFFICIENT_DATA: &'static str = "Insufficient Data";

    const INSUFFICIENT_DATA_TEXT: &'static str = "Only the current or latest Oil Analysis record is available, \
        without a previous analysis to compare to, some of the calculations recommended by this guideline \
        cannot be performed.";
}

impl Rule for CurrentSampleExists {
    fn name(&self) -> &'static str {
        "current_sample_exists"
    }

    fn is_applicable(&self, _ctx: &RuleContext<'_>) -> bool {
        true
    }

    fn execute(&self, ctx: &RuleContext<'_>) -> Result<RuleEffect> {
        if ctx.current.is_none() {
            return Err(Error::MissingRequiredData(
                "the algorithm requires at least the latest oil analysis".to_string(),
            ));
        }

        let effect = RuleEffect::none();
        Ok(if ctx.previous.is_none() {
            effect.with_output(Self::INSUFFICIENT_DATA, Self::INSUFFICIENT_DATA_TEXT)
        } else {
            effect
        })
    }
}

/// Replaces both working samples with detection-limit clamped copies.
#[derive(Debug, Clone, Copy, Default)]
pub struct ApplyDetectionLimits {
    limits: DetectionLimits,
}

impl ApplyDetectionLimits {
    /// Clamp with the given limits.
    #[must_use]
    pub const fn new(limits: DetectionLimits) -> Self {
        Self { limits }
    }
}

impl Rule for ApplyDetectionLimits {
    fn name(&self) -> &'static str {
        "apply_detection_limits"
    }

    fn is_applicable(&self, _ctx: &RuleContext<'_>) -> bool {
        true
    }

    fn execute(&self, ctx: &RuleContext<'_>) -> Result<RuleEffect> {
        Ok(RuleEffect {
            current: ctx.current.map(|s| self.limits.apply(s)),
            previous: ctx.previous.map(|s| self.limits.apply(s)),
            ..RuleEffect::none()
        })
    }
}
