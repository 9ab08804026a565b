//! Duval Triangles 1, 2 (OLTC), 4 and 5.
//!
//! Each triangle takes the percentage share of three gases and walks an
//! ordered list of range predicates; the first predicate that holds gives
//! the zone. Triangles 4 and 5 refine a Triangle 1 result and only run when
//! Triangle 1 landed in one of their parent zones.

use crate::calc::DetectionLimits;
use crate::error::Result;
use crate::failure::FailureCode;
use crate::gas::Gas;
use crate::rules::{ApplyDetectionLimits, Classifier, Rule, RuleChain, RuleContext, RuleEffect};

use super::{percentages, Algorithm};

/// Explanatory text emitted after the Triangle 2 result.
pub const OLTC_NOTES: &str = "This algorithm applies to conventional, compartment-type OLTCs where normal \
    operation involves mostly arc breaking in oil. A few resistive OLTCs of this type (i.e. UZBs) may have \
    their normal operation in the X3 zone. For OLTCs of the conventional, vacuum bottle-type with no sparking \
    of the selector in the cooling oil use Duval Triangle 1. For OLTCs of the in-tank type (i.e. Reinhausen \
    (MR)) where most or a significant portion of current is dissipated in transition resistors and heats up \
    the resistors, the normal operating zone may be located in a different part of the Triangle (i.e. T2 or T3).";

/// The implemented triangles.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Triangle {
    /// CH4 / C2H4 / C2H2, all faults in mineral oil.
    One,
    /// CH4 / C2H4 / C2H2, on-load tap changers.
    Two,
    /// H2 / CH4 / C2H6, low-temperature faults.
    Four,
    /// CH4 / C2H4 / C2H6, thermal faults.
    Five,
}

impl Triangle {
    /// Gases plotted on the first, second and third axis.
    #[must_use]
    pub const fn gases(self) -> [Gas; 3] {
        match self {
            Self::One | Self::Two => [Gas::Methane, Gas::Ethylene, Gas::Acetylene],
            Self::Four => [Gas::Hydrogen, Gas::Methane, Gas::Ethane],
            Self::Five => [Gas::Methane, Gas::Ethylene, Gas::Ethane],
        }
    }

    /// Output entry name.
    #[must_use]
    pub const fn output_name(self) -> &'static str {
        match self {
            Self::One => "Duval Triangle 1",
            Self::Two => "Duval Triangle 2 (OLTC)",
            Self::Four => "Duval Triangle 4",
            Self::Five => "Duval Triangle 5",
        }
    }

    /// Side-channel key for the result.
    #[must_use]
    pub const fn classifier(self) -> Classifier {
        match self {
            Self::One => Classifier::DuvalTriangle1,
            Self::Two => Classifier::DuvalTriangle2,
            Self::Four => Classifier::DuvalTriangle4,
            Self::Five => Classifier::DuvalTriangle5,
        }
    }

    /// Triangle 1 zones this triangle refines; `None` for unconditional triangles.
    #[must_use]
    pub const fn parent_zones(self) -> Option<&'static [FailureCode]> {
        match self {
            Self::One | Self::Two => None,
            Self::Four => Some(&[FailureCode::PD, FailureCode::T1, FailureCode::T2]),
            Self::Five => Some(&[FailureCode::T2, FailureCode::T3]),
        }
    }

    /// Zone for a percentage triple ordered as [`Triangle::gases`].
    #[must_use]
    pub fn classify(self, [first, second, third]: [f64; 3]) -> FailureCode {
        match self {
            Self::One => triangle_one(first, second, third),
            Self::Two => triangle_two(first, second, third),
            Self::Four => triangle_four(first, second, third),
            Self::Five => triangle_five(second, third),
        }
    }
}

// Rows kept one per published zone, even where codes repeat.
#[allow(clippy::if_same_then_else)]
fn triangle_one(ch4: f64, c2h4: f64, c2h2: f64) -> FailureCode {
    if ch4 >= 98.0 {
        FailureCode::PD
    } else if c2h4 < 20.0 && c2h2 < 4.0 {
        FailureCode::T1
    } else if (20.0..50.0).contains(&c2h4) && c2h2 < 4.0 {
        FailureCode::T2
    } else if c2h4 >= 50.0 && c2h2 < 15.0 {
        FailureCode::T3
    } else if c2h4 < 23.0 && c2h2 >= 13.0 {
        FailureCode::D1
    } else if (23.0..40.0).contains(&c2h4) && (13.0..29.0).contains(&c2h2) {
        FailureCode::D2
    } else if c2h4 >= 23.0 && c2h2 >= 29.0 {
        FailureCode::D2
    } else if c2h4 < 50.0 && (4.0..13.0).contains(&c2h2) {
        FailureCode::DT
    } else if c2h4 >= 40.0 && (15.0..29.0).contains(&c2h2) {
        FailureCode::DT
    } else if (40.0..50.0).contains(&c2h4) && (13.0..15.0).contains(&c2h2) {
        FailureCode::DT
    } else {
        FailureCode::NA
    }
}

#[allow(clippy::if_same_then_else)]
fn triangle_two(ch4: f64, c2h4: f64, c2h2: f64) -> FailureCode {
    if (2.0..19.0).contains(&ch4) && (6.0..23.0).contains(&c2h4) {
        FailureCode::OltcN
    } else if ch4 < 19.0 && c2h4 < 6.0 {
        FailureCode::OltcD1
    } else if ch4 < 2.0 && (6.0..23.0).contains(&c2h4) {
        FailureCode::OltcD1
    } else if ch4 >= 19.0 && c2h4 < 23.0 {
        FailureCode::OltcX1
    } else if c2h4 >= 23.0 && c2h2 >= 15.0 {
        FailureCode::OltcX3
    } else if c2h2 < 15.0 && (23.0..50.0).contains(&c2h4) {
        FailureCode::OltcT2
    } else if c2h2 < 15.0 && c2h4 >= 50.0 {
        FailureCode::OltcT3
    } else {
        FailureCode::NA
    }
}

#[allow(clippy::if_same_then_else)]
fn triangle_four(h2: f64, ch4: f64, c2h6: f64) -> FailureCode {
    if c2h6 < 1.0 && (2.0..15.0).contains(&ch4) {
        FailureCode::PD
    } else if (30.0..46.0).contains(&c2h6) && h2 >= 9.0 {
        FailureCode::S
    } else if (1.0..24.0).contains(&c2h6) && ch4 < 36.0 {
        FailureCode::S
    } else if c2h6 < 1.0 && ch4 < 2.0 {
        FailureCode::S
    } else if c2h6 < 1.0 && (15.0..36.0).contains(&ch4) {
        FailureCode::S
    } else if (24.0..30.0).contains(&c2h6) && h2 >= 15.0 {
        FailureCode::S
    } else if c2h6 < 24.0 && h2 >= 15.0 && ch4 >= 36.0 {
        FailureCode::C
    } else if c2h6 < 30.0 && h2 < 15.0 {
        FailureCode::C
    } else if c2h6 >= 30.0 && h2 < 9.0 {
        FailureCode::O
    } else if c2h6 >= 46.0 && h2 >= 9.0 {
        FailureCode::ND
    } else {
        FailureCode::NA
    }
}

#[allow(clippy::if_same_then_else)]
fn triangle_five(c2h4: f64, c2h6: f64) -> FailureCode {
    if c2h4 < 1.0 && (2.0..14.0).contains(&c2h6) {
        FailureCode::PD
    } else if c2h4 < 10.0 && c2h6 >= 54.0 {
        FailureCode::O
    } else if c2h4 < 10.0 {
        FailureCode::S
    } else if c2h4 < 35.0 && c2h6 < 12.0 {
        FailureCode::T2
    } else if c2h4 >= 35.0 && c2h6 < 12.0 {
        FailureCode::T3
    } else if (50.0..70.0).contains(&c2h4) && c2h6 < 14.0 {
        // T3 boundary steps out to 14% C2H6 between 50% and 70% C2H4
        FailureCode::T3
    } else if c2h4 < 35.0 && c2h6 < 30.0 {
        FailureCode::C
    } else if c2h4 >= 70.0 && c2h6 >= 14.0 {
        FailureCode::C
    } else {
        FailureCode::ND
    }
}

/// Classifies the working current sample on one triangle.
#[derive(Debug, Clone, Copy)]
pub struct TriangleRule {
    triangle: Triangle,
}

impl TriangleRule {
    /// Rule for `triangle`.
    #[must_use]
    pub const fn new(triangle: Triangle) -> Self {
        Self { triangle }
    }
}

impl Rule for TriangleRule {
    fn name(&self) -> &'static str {
        self.triangle.output_name()
    }

    fn is_applicable(&self, ctx: &RuleContext<'_>) -> bool {
        let gated_in = match self.triangle.parent_zones() {
            None => true,
            Some(zones) => ctx
                .outputs
                .fault_code(Classifier::DuvalTriangle1)
                .is_some_and(|code| zones.contains(&code)),
        };
        gated_in && ctx.current.and_then(|s| percentages(s, self.triangle.gases())).is_some()
    }

    fn execute(&self, ctx: &RuleContext<'_>) -> Result<RuleEffect> {
        let Some(pct) = ctx.current.and_then(|s| percentages(s, self.triangle.gases())) else {
            return Ok(RuleEffect::none());
        };
        let code = self.triangle.classify(pct);
        let effect = RuleEffect::none()
            .with_output(self.triangle.output_name(), code.description())
            .with_fault_code(self.triangle.classifier(), code);

        Ok(match self.triangle {
            Triangle::Two => effect.with_output("Notes", OLTC_NOTES),
            _ => effect,
        })
    }
}

/// Triangle 1 followed by the Triangle 4 and 5 refinements.
#[derive(Debug, Clone, Copy, Default)]
pub struct DuvalTriangles {
    limits: DetectionLimits,
}

impl DuvalTriangles {
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

impl Algorithm for DuvalTriangles {
    fn version(&self) -> &'static str {
        "Duval Triangles for Oil Filled Transformers, Reactors and Cables"
    }

    fn rules(&self) -> RuleChain {
        RuleChain::new()
            .with_rule(ApplyDetectionLimits::new(self.limits))
            .with_rule(TriangleRule::new(Triangle::One))
            .with_rule(TriangleRule::new(Triangle::Four))
            .with_rule(TriangleRule::new(Triangle::Five))
    }
}

/// Triangle 2 for on-load tap changers.
#[derive(Debug, Clone, Copy, Default)]
pub struct DuvalTrianglesOltc {
    limits: DetectionLimits,
}

impl DuvalTrianglesOltc {
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

impl Algorithm for DuvalTrianglesOltc {
    fn version(&self) -> &'static str {
        "Duval Triangles for On-Load Tap Changers (OLTC)"
    }

    fn rules(&self) -> RuleChain {
        RuleChain::new()
            .with_rule(ApplyDetectionLimits::new(self.limits))
            .with_rule(TriangleRule::new(Triangle::Two))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sample::GasSample;

    fn sample(h2: f64, ch4: f64, c2h6: f64, c2h4: f64, c2h2: f64) -> GasSample {
        GasSample::on_date(2017, 5, 17, [h2, ch4, c2h6, c2h4, c2h2, 300.0, 3000.0, 750.0, 7500.0]).unwrap()
    }

    #[test]
    fn test_triangle_one_zones() {
        let cases = [
            ([98.5, 1.0, 0.5], FailureCode::PD),
            ([90.0, 8.0, 2.0], FailureCode::T1),
            ([70.0, 28.0, 2.0], FailureCode::T2),
            ([0.0, 100.0, 0.0], FailureCode::T3),
            ([60.0, 10.0, 30.0], FailureCode::D1),
            ([50.0, 30.0, 20.0], FailureCode::D2),
            ([20.0, 40.0, 40.0], FailureCode::D2),
            ([80.0, 12.0, 8.0], FailureCode::DT),
            ([35.0, 45.0, 20.0], FailureCode::DT),
            ([41.0, 45.0, 14.0], FailureCode::DT),
        ];
        for (pct, expected) in cases {
            assert_eq!(Triangle::One.classify(pct), expected, "{pct:?}");
        }
    }

    #[test]
    fn test_triangle_one_boundaries_follow_declared_order() {
        // 4% acetylene leaves the thermal zones
        assert_eq!(Triangle::One.classify([76.0, 20.0, 4.0]), FailureCode::DT);
        // exactly 98% methane is partial discharge
        assert_eq!(Triangle::One.classify([98.0, 1.0, 1.0]), FailureCode::PD);
        // 50% ethylene with low acetylene is T3
        assert_eq!(Triangle::One.classify([48.0, 50.0, 2.0]), FailureCode::T3);
    }

    #[test]
    fn test_triangle_two_zones() {
        let cases = [
            ([10.0, 10.0, 80.0], FailureCode::OltcN),
            ([10.0, 3.0, 87.0], FailureCode::OltcD1),
            ([1.0, 10.0, 89.0], FailureCode::OltcD1),
            ([40.0, 10.0, 50.0], FailureCode::OltcX1),
            ([20.0, 30.0, 50.0], FailureCode::OltcX3),
            ([60.0, 30.0, 10.0], FailureCode::OltcT2),
            ([35.0, 60.0, 5.0], FailureCode::OltcT3),
        ];
        for (pct, expected) in cases {
            assert_eq!(Triangle::Two.classify(pct), expected, "{pct:?}");
        }
    }

    #[test]
    fn test_triangle_four_zones() {
        let cases = [
            ([90.0, 9.5, 0.5], FailureCode::PD),
            ([20.0, 40.0, 40.0], FailureCode::S),
            ([60.0, 30.0, 10.0], FailureCode::S),
            ([20.0, 50.0, 30.0], FailureCode::S),
            ([5.0, 50.0, 45.0], FailureCode::O),
            ([10.0, 80.0, 10.0], FailureCode::C),
            ([20.0, 60.0, 20.0], FailureCode::C),
            ([10.0, 40.0, 50.0], FailureCode::ND),
        ];
        for (pct, expected) in cases {
            assert_eq!(Triangle::Four.classify(pct), expected, "{pct:?}");
        }
    }

    #[test]
    fn test_triangle_five_zones() {
        let cases = [
            ([94.5, 0.5, 5.0], FailureCode::PD),
            ([30.0, 5.0, 65.0], FailureCode::O),
            ([65.0, 5.0, 30.0], FailureCode::S),
            ([75.0, 20.0, 5.0], FailureCode::T2),
            ([50.0, 45.0, 5.0], FailureCode::T3),
            ([61.1, 15.3, 23.7], FailureCode::C),
            ([10.0, 75.0, 15.0], FailureCode::C),
            ([40.0, 20.0, 40.0], FailureCode::ND),
        ];
        for (pct, expected) in cases {
            assert_eq!(Triangle::Five.classify(pct), expected, "{pct:?}");
        }
    }

    #[test]
    fn test_triangle_five_t3_step() {
        assert_eq!(Triangle::Five.classify([27.0, 60.0, 13.0]), FailureCode::T3);
        assert_eq!(Triangle::Five.classify([42.0, 45.0, 13.0]), FailureCode::ND);
        assert_eq!(Triangle::Five.classify([26.0, 60.0, 14.0]), FailureCode::ND);
    }

    #[test]
    fn test_pure_ethylene_is_t3() {
        let outputs = super::super::run_duval_triangles(&sample(0.0, 0.0, 0.0, 100.0, 0.0)).unwrap();
        assert_eq!(outputs.fault_code(Classifier::DuvalTriangle1), Some(FailureCode::T3));
        assert_eq!(outputs.find("Duval Triangle 1").unwrap().description, FailureCode::T3.description());
    }

    #[test]
    fn test_refinements_follow_triangle_one() {
        // 8% acetylene puts Triangle 1 in DT, which has no refinement
        let outputs = super::super::run_duval_triangles(&sample(200.0, 40.0, 15.5, 10.0, 4.5)).unwrap();
        let names: Vec<_> = outputs.iter().map(|o| o.name.as_str()).collect();
        assert_eq!(outputs.fault_code(Classifier::DuvalTriangle1), Some(FailureCode::DT));
        assert_eq!(names, ["Title", "Duval Triangle 1"]);

        // T2 is refined by both Triangle 4 and Triangle 5
        let outputs = super::super::run_duval_triangles(&sample(200.0, 40.0, 15.5, 15.0, 0.5)).unwrap();
        let names: Vec<_> = outputs.iter().map(|o| o.name.as_str()).collect();
        assert_eq!(names, ["Title", "Duval Triangle 1", "Duval Triangle 4", "Duval Triangle 5"]);
        assert_eq!(outputs.fault_code(Classifier::DuvalTriangle1), Some(FailureCode::T2));
        assert_eq!(outputs.fault_code(Classifier::DuvalTriangle4), Some(FailureCode::S));
        assert_eq!(outputs.fault_code(Classifier::DuvalTriangle5), Some(FailureCode::C));

        // T1 is refined by Triangle 4 only
        let outputs = super::super::run_duval_triangles(&sample(200.0, 40.0, 15.5, 10.0, 0.5)).unwrap();
        assert_eq!(outputs.fault_code(Classifier::DuvalTriangle1), Some(FailureCode::T1));
        assert!(outputs.contains("Duval Triangle 4"));
        assert!(!outputs.contains("Duval Triangle 5"));
    }

    #[test]
    fn test_triangle_four_skipped_for_discharges() {
        let outputs = super::super::run_duval_triangles(&sample(100.0, 10.0, 5.0, 10.0, 80.0)).unwrap();
        assert_eq!(outputs.fault_code(Classifier::DuvalTriangle1), Some(FailureCode::D1));
        assert!(!outputs.contains("Duval Triangle 4"));
        assert!(!outputs.contains("Duval Triangle 5"));
    }

    #[test]
    fn test_absent_gas_skips_triangle() {
        let s = sample(1.0, 1.0, 1.0, 1.0, 1.0).with_gas(Gas::Acetylene, None).unwrap();
        let outputs = super::super::run_duval_triangles(&s).unwrap();
        assert_eq!(outputs.len(), 1);
    }

    #[test]
    fn test_oltc_notes_follow_result() {
        let outputs = super::super::run_duval_triangles_oltc(&sample(10.0, 10.0, 1.0, 10.0, 80.0)).unwrap();
        let names: Vec<_> = outputs.iter().map(|o| o.name.as_str()).collect();
        assert_eq!(names, ["Title", "Duval Triangle 2 (OLTC)", "Notes"]);
        assert_eq!(outputs.entries()[0].description, "Interpretation of Dissolved Gas Analysis as per Duval Triangles for On-Load Tap Changers (OLTC)");
        assert_eq!(outputs.fault_code(Classifier::DuvalTriangle2), Some(FailureCode::OltcN));
    }
}
