//! Commentary on the CO2/CO, O2/N2 and C2H2/H2 ratios.

use crate::error::Result;
use crate::gas::Gas;
use crate::rules::{Rule, RuleContext, RuleEffect};

fn current_ratio(ctx: &RuleContext<'_>, numerator: Gas, denominator: Gas) -> Option<f64> {
    ctx.current?.ratio(numerator, denominator)
}

fn both_present(ctx: &RuleContext<'_>, a: Gas, b: Gas) -> bool {
    ctx.current.is_some_and(|s| s.has_all(&[a, b]))
}

fn effect(name: &str, paragraphs: &[String]) -> RuleEffect {
    if paragraphs.is_empty() {
        RuleEffect::none()
    } else {
        RuleEffect::none().with_output(name, paragraphs.join("\n"))
    }
}

/// Paper involvement and mild paper overheating from CO2/CO.
#[derive(Debug, Clone, Copy, Default)]
pub struct CarbonOxidesRatio;

impl CarbonOxidesRatio {
    /// Entry name.
    pub const OUTPUT: &'static str = "CO2 / CO";
}

impl Rule for CarbonOxidesRatio {
    fn name(&self) -> &'static str {
        "co2_co_ratio"
    }

    fn is_applicable(&self, ctx: &RuleContext<'_>) -> bool {
        both_present(ctx, Gas::CarbonDioxide, Gas::CarbonMonoxide)
    }

    fn execute(&self, ctx: &RuleContext<'_>) -> Result<RuleEffect> {
        let Some(ratio) = current_ratio(ctx, Gas::CarbonDioxide, Gas::CarbonMonoxide) else {
            return Ok(RuleEffect::none());
        };
        let co2 = ctx.current.and_then(|s| s.ppm(Gas::CarbonDioxide)).unwrap_or_default();

        let mut paragraphs = Vec::new();
        if ratio < 3.0 {
            paragraphs.push(format!(
                "The Carbon Dioxide to Carbon Monoxide Ratio (CO2/CO) is {ratio:.2} which is less than 3. \
                 This is generally considered as an indication of probable paper involvement in a fault, \
                 with possible carbonization, in the presence of other fault gases."
            ));
        }
        if ratio > 10.0 && co2 > 10_000.0 {
            paragraphs.push(format!(
                "High values of CO2 ({co2:.2} > 10000) and high CO2/CO ratios ({ratio:.2} > 10) can indicate \
                 mild (< 160 oC) overheating of paper or oil oxidation, especially in open transformers. \
                 The Carbon Dioxide to Carbon Monoxide Ratio (CO2/CO) is {ratio:.2}"
            ));
        }
        Ok(effect(Self::OUTPUT, &paragraphs))
    }
}

/// Oxygen consumption from O2/N2.
#[derive(Debug, Clone, Copy, Default)]
pub struct OxygenNitrogenRatio;

impl OxygenNitrogenRatio {
    /// Entry name.
    pub const OUTPUT: &'static str = "O2 / N2";
}

impl Rule for OxygenNitrogenRatio {
    fn name(&self) -> &'static str {
        "o2_n2_ratio"
    }

    fn is_applicable(&self, ctx: &RuleContext<'_>) -> bool {
        both_present(ctx, Gas::Oxygen, Gas::Nitrogen)
    }

    fn execute(&self, ctx: &RuleContext<'_>) -> Result<RuleEffect> {
        let paragraphs = match current_ratio(ctx, Gas::Oxygen, Gas::Nitrogen) {
            Some(ratio) if ratio < 0.3 => vec![
                "Dissolved O2 and N2 are found in oil as a result of contact with atmospheric air in the \
                 conservator of air-breathing equipment, or through leaks in sealed equipment. At equilibrium \
                 with air, the concentrations of O2 and N2 are approximately 32000 and 64000 ppm respectively \
                 and the O2/N2 ratio is approx. 0.5."
                    .to_string(),
                format!(
                    "In service, this ratio may decrease as a result of oil oxidation and/or paper ageing, if O2 \
                     is consumed more rapidly than it is replaced by diffusion. Factors such as the load and \
                     preservation system used may also affect the ratio, but with the exception of closed \
                     systems, ratios less than 0.3 ({ratio:.2} in this case) are generally considered to \
                     indicate excessive consumption of oxygen."
                ),
            ],
            _ => Vec::new(),
        };
        Ok(effect(Self::OUTPUT, &paragraphs))
    }
}

/// OLTC contamination of the main tank from C2H2/H2.
#[derive(Debug, Clone, Copy, Default)]
pub struct AcetyleneHydrogenRatio {
    communicating_oltc: bool,
}

impl AcetyleneHydrogenRatio {
    /// Entry name.
    pub const OUTPUT: &'static str = "C2H2 / H2";

    /// Rule for a transformer whose OLTC does (or does not) share oil with the main tank.
    #[must_use]
    pub const fn new(communicating_oltc: bool) -> Self {
        Self { communicating_oltc }
    }
}

impl Rule for AcetyleneHydrogenRatio {
    fn name(&self) -> &'static str {
        "c2h2_h2_ratio"
    }

    fn is_applicable(&self, ctx: &RuleContext<'_>) -> bool {
        both_present(ctx, Gas::Acetylene, Gas::Hydrogen)
    }

    fn execute(&self, ctx: &RuleContext<'_>) -> Result<RuleEffect> {
        let paragraphs = match current_ratio(ctx, Gas::Acetylene, Gas::Hydrogen) {
            Some(ratio) if ratio > 2.0 => {
                let lead = if self.communicating_oltc {
                    "This transformer has been identified as having communication between the On-Load Tap \
                     Changer oil and the main tank oil."
                } else {
                    "Although this transformer has been identified as not having communication between the \
                     On-Load Tap Changer oil and the main tank oil, "
                };
                vec![
                    lead.to_string(),
                    format!(
                        "Acetylene to Hydrogen ratios higher than 2 or 3 in the main tank ({ratio:.2} in this \
                         case) are considered as an indication of OLTC contamination. This can be confirmed by \
                         comparing DGA results in the main tank, in the OLTC and in the conservators."
                    ),
                ]
            }
            _ => Vec::new(),
        };
        Ok(effect(Self::OUTPUT, &paragraphs))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::Outputs;
    use crate::sample::GasSample;

    fn sample(values: [f64; 9]) -> GasSample {
        GasSample::on_date(2017, 5, 17, values).unwrap()
    }

    fn run(rule: &dyn Rule, current: &GasSample) -> RuleEffect {
        let outputs = Outputs::new();
        let ctx = RuleContext { current: Some(current), previous: None, outputs: &outputs };
        assert!(rule.is_applicable(&ctx));
        rule.execute(&ctx).unwrap()
    }

    #[test]
    fn test_low_co2_co_ratio() {
        let s = sample([0.0, 0.0, 0.0, 0.0, 0.0, 1000.0, 2000.0, 0.0, 0.0]);
        let effect = run(&CarbonOxidesRatio, &s);
        assert_eq!(effect.outputs.len(), 1);
        assert_eq!(effect.outputs[0].name, "CO2 / CO");
        assert!(effect.outputs[0].description.contains("(CO2/CO) is 2.00 which is less than 3"));
    }

    #[test]
    fn test_high_co2_reports_both_values() {
        let s = sample([0.0, 0.0, 0.0, 0.0, 0.0, 1000.0, 12_000.0, 0.0, 0.0]);
        let text = run(&CarbonOxidesRatio, &s).outputs[0].description.clone();
        assert!(text.starts_with("High values of CO2 (12000.00 > 10000) and high CO2/CO ratios (12.00 > 10)"));
        assert!(text.ends_with("(CO2/CO) is 12.00"));
    }

    #[test]
    fn test_moderate_co2_co_ratio_is_silent() {
        let s = sample([0.0, 0.0, 0.0, 0.0, 0.0, 1000.0, 5000.0, 0.0, 0.0]);
        assert!(run(&CarbonOxidesRatio, &s).outputs.is_empty());
    }

    #[test]
    fn test_zero_co_is_silent() {
        let s = sample([0.0; 9]);
        assert!(run(&CarbonOxidesRatio, &s).outputs.is_empty());
    }

    #[test]
    fn test_oxygen_consumption() {
        let s = sample([0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 750.0, 7500.0]);
        let effect = run(&OxygenNitrogenRatio, &s);
        let text = &effect.outputs[0].description;
        assert_eq!(text.lines().count(), 2);
        assert!(text.contains("ratios less than 0.3 (0.10 in this case)"));

        let s = sample([0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 32_000.0, 64_000.0]);
        assert!(run(&OxygenNitrogenRatio, &s).outputs.is_empty());
    }

    #[test]
    fn test_acetylene_hydrogen_wording_follows_oltc() {
        let s = sample([10.0, 0.0, 0.0, 0.0, 25.0, 0.0, 0.0, 0.0, 0.0]);
        let sealed = run(&AcetyleneHydrogenRatio::new(false), &s).outputs[0].description.clone();
        assert!(sealed.starts_with("Although this transformer"));
        assert!(sealed.contains("(2.50 in this case)"));

        let shared = run(&AcetyleneHydrogenRatio::new(true), &s).outputs[0].description.clone();
        assert!(shared.starts_with("This transformer has been identified as having communication"));
    }

    #[test]
    fn test_not_applicable_without_gases() {
        let s = sample([0.0; 9]).with_gas(Gas::Hydrogen, None).unwrap();
        let outputs = Outputs::new();
        let ctx = RuleContext { current: Some(&s), previous: None, outputs: &outputs };
        assert!(!AcetyleneHydrogenRatio::default().is_applicable(&ctx));
        assert!(CarbonOxidesRatio.is_applicable(&ctx));
    }
}
