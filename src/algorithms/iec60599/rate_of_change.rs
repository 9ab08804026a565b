//! Yearly gas increase against IEC 60599 Table A.3.

use crate::calc;
use crate::error::Result;
use crate::gas::Gas;
use crate::rules::{Rule, RuleContext, RuleEffect, Signal};
use crate::units::Unit;

/// Gases checked, in output order.
pub const RATE_GASES: [Gas; 7] = [
    Gas::Hydrogen,
    Gas::Methane,
    Gas::Ethane,
    Gas::Ethylene,
    Gas::Acetylene,
    Gas::CarbonMonoxide,
    Gas::CarbonDioxide,
];

/// Table A.3: 90% typical rates of increase in power transformers, as
/// `(lower, upper)` in ul/l/year. The acetylene row depends on whether an
/// OLTC shares oil with the main tank.
#[must_use]
pub const fn typical_rate(gas: Gas, communicating_oltc: bool) -> Option<(f64, f64)> {
    match gas {
        Gas::Hydrogen => Some((35.0, 132.0)),
        Gas::Methane => Some((10.0, 120.0)),
        Gas::Ethane => Some((5.0, 90.0)),
        Gas::Ethylene => Some((32.0, 146.0)),
        Gas::Acetylene if communicating_oltc => Some((0.0, 4.0)),
        Gas::Acetylene => Some((21.0, 37.0)),
        Gas::CarbonMonoxide => Some((260.0, 1060.0)),
        Gas::CarbonDioxide => Some((1700.0, 10000.0)),
        Gas::Oxygen | Gas::Nitrogen => None,
    }
}

/// Compares each gas's yearly increase with its typical range and raises
/// [`Signal::RateOfChangeExceeded`].
#[derive(Debug, Clone, Copy, Default)]
pub struct RateOfChange {
    communicating_oltc: bool,
    oil_volume_litres: f64,
}

impl RateOfChange {
    /// Rates are per litre when `oil_volume_litres` is zero, otherwise they are
    /// scaled to the whole tank.
    #[must_use]
    pub const fn new(communicating_oltc: bool, oil_volume_litres: f64) -> Self {
        Self { communicating_oltc, oil_volume_litres }
    }

    fn output_name(gas: Gas) -> String {
        format!("{gas} Rate of Change")
    }
}

impl Rule for RateOfChange {
    fn name(&self) -> &'static str {
        "rate_of_change"
    }

    fn is_applicable(&self, ctx: &RuleContext<'_>) -> bool {
        ctx.current.is_some() && ctx.previous.is_some()
    }

    fn execute(&self, ctx: &RuleContext<'_>) -> Result<RuleEffect> {
        let (scale, unit) = if self.oil_volume_litres == 0.0 {
            (1.0, "ul/l/year")
        } else {
            (self.oil_volume_litres, "ul/year")
        };

        let mut effect = RuleEffect::none();
        let mut exceeded = false;
        for gas in RATE_GASES {
            let Some((lower, upper)) = typical_rate(gas, self.communicating_oltc) else {
                continue;
            };
            let Some(rate) = calc::rate_of_change(ctx.current, ctx.previous, gas, Unit::YEAR)? else {
                continue;
            };
            let name = Self::output_name(gas);
            let reported = ctx.outputs.contains(&name);

            let (rate, lower, upper) = (rate * scale, lower * scale, upper * scale);
            if rate > upper {
                exceeded = true;
                if !reported {
                    effect = effect.with_output(
                        name,
                        format!(
                            "The rate of change of {gas} is {rate:.2} {unit} which is higher than the typical \
                             value of {upper:.2} {unit}."
                        ),
                    );
                }
            } else if rate <= lower && !reported {
                effect = effect.with_output(
                    name,
                    format!(
                        "The rate of change of {gas} is {rate:.2} {unit} which is lower than the typical \
                         value of {lower:.2} {unit}."
                    ),
                );
            }
        }

        Ok(effect.with_signal(Signal::RateOfChangeExceeded, exceeded))
    }
}
