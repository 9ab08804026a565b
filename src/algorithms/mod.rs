//! The diagnostic methods and their entry points.
//!
//! Each method is an [`Algorithm`]: a version string naming the standard and
//! a [`RuleChain`] assembled from the method's parameters. Running an
//! algorithm builds a fresh chain and output log, so concurrent runs share
//! nothing.

use crate::error::Result;
use crate::rules::{Outputs, RuleChain};
use crate::sample::GasSample;

pub mod duval_pentagons;
pub mod duval_triangles;
pub mod iec60599;
pub mod ieee_c57104;
pub mod rogers;

pub use duval_pentagons::DuvalPentagons;
pub use duval_triangles::{DuvalTriangles, DuvalTrianglesOltc};
pub use iec60599::Iec60599;
pub use ieee_c57104::IeeeC57104;
pub use rogers::RogersRatios;

/// A standards-derived diagnostic method.
pub trait Algorithm {
    /// Standard and edition implemented.
    fn version(&self) -> &'static str;

    /// Rules in execution order.
    fn rules(&self) -> RuleChain;

    /// Description of the leading `Title` entry.
    fn title(&self) -> String {
        format!("Interpretation of Dissolved Gas Analysis as per {}", self.version())
    }

    /// Run the chain over working copies of the samples.
    ///
    /// # Errors
    ///
    /// Propagates the first rule error.
    fn execute(&self, current: Option<&GasSample>, previous: Option<&GasSample>) -> Result<Outputs> {
        self.rules().run(current.cloned(), previous.cloned(), self.title())
    }
}

/// IEC 60599 interpretation of the latest sample, compared against the
/// previous one when available.
///
/// # Errors
///
/// [`crate::Error::MissingRequiredData`] when `current` is absent.
pub fn run_iec60599(
    current: Option<&GasSample>,
    previous: Option<&GasSample>,
    oil_volume_litres: f64,
    has_communicating_oltc: bool,
) -> Result<Outputs> {
    Iec60599::new()
        .oil_volume_litres(oil_volume_litres)
        .communicating_oltc(has_communicating_oltc)
        .execute(current, previous)
}

/// IEEE C57.104 Table 1 screening.
///
/// # Errors
///
/// [`crate::Error::MissingRequiredData`] when `current` is absent.
pub fn run_ieee_c57104(
    current: Option<&GasSample>,
    previous: Option<&GasSample>,
    transformer_age_years: Option<f64>,
) -> Result<Outputs> {
    IeeeC57104::new().transformer_age_years(transformer_age_years).execute(current, previous)
}

/// Duval Triangle 1 with the Triangle 4 and 5 refinements.
///
/// # Errors
///
/// Never fails for a well-formed sample.
pub fn run_duval_triangles(sample: &GasSample) -> Result<Outputs> {
    DuvalTriangles::new().execute(Some(sample), None)
}

/// Duval Triangle 2 for on-load tap changers.
///
/// # Errors
///
/// Never fails for a well-formed sample.
pub fn run_duval_triangles_oltc(sample: &GasSample) -> Result<Outputs> {
    DuvalTrianglesOltc::new().execute(Some(sample), None)
}

/// Duval Pentagons 1 and 2.
///
/// # Errors
///
/// Never fails for a well-formed sample.
pub fn run_duval_pentagons(sample: &GasSample) -> Result<Outputs> {
    DuvalPentagons::new().execute(Some(sample), None)
}

/// Rogers ratio classification.
///
/// # Errors
///
/// Never fails for a well-formed sample.
pub fn run_rogers_ratios(sample: &GasSample) -> Result<Outputs> {
    RogersRatios::new().execute(Some(sample), None)
}

/// Percentage share of each gas in a group, `None` if any gas is absent or
/// the group total is not positive.
pub(crate) fn percentages<const N: usize>(sample: &GasSample, gases: [crate::gas::Gas; N]) -> Option<[f64; N]> {
    let mut values = [0.0; N];
    for (value, gas) in values.iter_mut().zip(gases) {
        *value = sample.ppm(gas)?;
    }
    let total: f64 = values.iter().sum();
    if total <= 0.0 {
        return None;
    }
    Some(values.map(|v| v * 100.0 / total))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gas::Gas;

    #[test]
    fn test_percentages() {
        let sample = GasSample::on_date(2020, 1, 1, [1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0, 9.0]).unwrap();
        let pct = percentages(&sample, [Gas::Hydrogen, Gas::Methane, Gas::Ethane]).unwrap();
        assert!((pct[0] - 100.0 / 6.0).abs() < 1e-9);
        assert!((pct.iter().sum::<f64>() - 100.0).abs() < 1e-9);
    }

    #[test]
    fn test_percentages_require_gases_and_total() {
        let sample = GasSample::on_date(2020, 1, 1, [0.0; 9]).unwrap();
        assert!(percentages(&sample, [Gas::Hydrogen, Gas::Methane]).is_none());
        let sample = sample.with_gas(Gas::Methane, None).unwrap();
        assert!(percentages(&sample, [Gas::Methane]).is_none());
    }
}
