//! Gas concentrations against IEC 60599 Table A.2.

use crate::error::Result;
use crate::gas::Gas;
use crate::rules::{Rule, RuleContext, RuleEffect, Signal};

use super::rate_of_change::RATE_GASES;

/// Table A.2: 90% typical concentrations observed in power transformers, as
/// `(lower, upper)` in ul/l. The acetylene row depends on whether an OLTC
/// shares oil with the main tank.
#[must_use]
pub const fn typical_concentration(gas: Gas, communicating_oltc: bool) -> Option<(f64, f64)> {
    match gas {
        Gas::Hydrogen => Some((50.0, 150.0)),
        Gas::Methane => Some((30.0, 130.0)),
        Gas::Ethane => Some((20.0, 90.0)),
        Gas::Ethylene => Some((60.0, 280.0)),
        Gas::Acetylene if communicating_oltc => Some((2.0, 20.0)),
        Gas::Acetylene => Some((60.0, 280.0)),
        Gas::CarbonMonoxide => Some((400.0, 600.0)),
        Gas::CarbonDioxide => Some((3800.0, 14000.0)),
        Gas::Oxygen | Gas::Nitrogen => None,
    }
}

/// Flags gases above the upper typical value and raises
/// [`Signal::LimitExceeded`].
#[derive(Debug, Clone, Copy, Default)]
pub struct TypicalConcentrations {
    communicating_oltc: bool,
}

impl TypicalConcentrations {
    /// Limits for a transformer whose OLTC does (or does not) share oil with the main tank.
    #[must_use]
    pub const fn new(communicating_oltc: bool) -> Self {
        Self { communicating_oltc }
    }
}

impl Rule for TypicalConcentrations {
    fn name(&self) -> &'static str {
        "typical_concentrations"
    }

    fn is_applicable(&self, ctx: &RuleContext<'_>) -> bool {
        ctx.current.is_some()
    }

    fn execute(&self, ctx: &RuleContext<'_>) -> Result<RuleEffect> {
        let Some(current) = ctx.current else {
            return Ok(RuleEffect::none());
        };

        let mut effect = RuleEffect::none();
        let mut exceeded = false;
        for gas in RATE_GASES {
            let (Some(value), Some((_, upper))) =
                (current.ppm(gas), typical_concentration(gas, self.communicating_oltc))
            else {
                continue;
            };
            if value <= upper {
                continue;
            }
            exceeded = true;
            let name = format!("{gas} Concentration");
            if !ctx.outputs.contains(&name) {
                effect = effect.with_output(
                    name,
                    format!(
                        "The concentration of {gas} is {value:.2} ul/l which is higher than the typical \
                         value of {upper:.2} ul/l."
                    ),
                );
            }
        }

        Ok(effect.with_signal(Signal::LimitExceeded, exceeded))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::Outputs;
    use crate::sample::GasSample;

    fn run(rule: TypicalConcentrations, values: [f64; 9]) -> RuleEffect {
        let current = GasSample::on_date(2017, 5, 17, values).unwrap();
        let outputs = Outputs::new();
        let ctx = RuleContext { current: Some(&current), previous: None, outputs: &outputs };
        rule.execute(&ctx).unwrap()
    }

    #[test]
    fn test_hydrogen_above_typical() {
        let effect = run(TypicalConcentrations::default(), [2000.0, 40.0, 15.5, 10.0, 4.5, 300.0, 3000.0, 750.0, 7500.0]);
        assert_eq!(effect.signals, [(Signal::LimitExceeded, true)]);
        assert_eq!(effect.outputs.len(), 1);
        assert_eq!(
            effect.outputs[0].description,
            "The concentration of Hydrogen is 2000.00 ul/l which is higher than the typical value of 150.00 ul/l."
        );
    }

    #[test]
    fn test_ethane_alone_raises_signal() {
        let effect = run(TypicalConcentrations::default(), [10.0, 10.0, 95.0, 10.0, 1.0, 10.0, 100.0, 0.0, 0.0]);
        assert_eq!(effect.signals, [(Signal::LimitExceeded, true)]);
        assert_eq!(effect.outputs[0].name, "Ethane Concentration");
    }

    #[test]
    fn test_acetylene_limit_follows_oltc() {
        let values = [10.0, 10.0, 10.0, 10.0, 25.0, 10.0, 100.0, 0.0, 0.0];
        assert_eq!(run(TypicalConcentrations::new(false), values).signals, [(Signal::LimitExceeded, false)]);
        assert_eq!(run(TypicalConcentrations::new(true), values).signals, [(Signal::LimitExceeded, true)]);
    }

    #[test]
    fn test_value_at_limit_is_typical() {
        let effect = run(TypicalConcentrations::default(), [150.0, 130.0, 90.0, 280.0, 280.0, 600.0, 14000.0, 0.0, 0.0]);
        assert!(effect.outputs.is_empty());
        assert_eq!(effect.signals, [(Signal::LimitExceeded, false)]);
    }
}
