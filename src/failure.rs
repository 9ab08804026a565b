//! Fault classifications and their fixed descriptions.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Outcome of a classifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FailureCode {
    /// Normal operation.
    N,
    /// Partial discharges.
    PD,
    /// Discharges of low energy.
    D1,
    /// Discharges of high energy.
    D2,
    /// Mixture of electrical and thermal faults.
    DT,
    /// Thermal fault below 300 °C.
    T1,
    /// Thermal fault between 300 °C and 700 °C.
    T2,
    /// Thermal fault above 700 °C.
    T3,
    /// Thermal fault in oil only.
    T3H,
    /// Stray gassing of oil.
    S,
    /// Overheating below 250 °C.
    O,
    /// Possible carbonization of paper.
    C,
    /// No zone or predicate matched.
    NA,
    /// Not determined.
    ND,
    /// OLTC normal operation.
    OltcN,
    /// OLTC abnormal arcing.
    OltcD1,
    /// OLTC severe thermal fault, 300 °C to 700 °C.
    OltcT2,
    /// OLTC severe thermal fault above 700 °C.
    OltcT3,
    /// OLTC arcing or thermal fault in progress.
    OltcX1,
    /// OLTC T2/T3 fault or severe arcing in progress.
    OltcX3,
}

impl FailureCode {
    /// Short code as printed in diagnostics.
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::N | Self::OltcN => "N",
            Self::PD => "PD",
            Self::D1 | Self::OltcD1 => "D1",
            Self::D2 => "D2",
            Self::DT => "DT",
            Self::T1 => "T1",
            Self::T2 | Self::OltcT2 => "T2",
            Self::T3 | Self::OltcT3 => "T3",
            Self::T3H => "T3-H",
            Self::S => "S",
            Self::O => "O",
            Self::C => "C",
            Self::NA => "NA",
            Self::ND => "ND",
            Self::OltcX1 => "X1",
            Self::OltcX3 => "X3",
        }
    }

    /// Fixed human-readable description.
    #[must_use]
    pub const fn description(self) -> &'static str {
        match self {
            Self::N | Self::OltcN => "N => Normal Operation",
            Self::PD => "PD => Partial Discharges",
            Self::D1 => "D1 => Discharges of low energy",
            Self::D2 => "D2 => Discharges of high energy",
            Self::DT => "DT => Mixtures of electrical and thermal faults.",
            Self::T1 => "T1 => Thermal fault t < 300 oC",
            Self::T2 => "T2 => Thermal fault 300 oC < t < 700 oC",
            Self::T3 => "T3 => Thermal fault t > 700 oC",
            Self::T3H => "T3-H => Thermal Faults in Oil Only",
            Self::S => "S => Stray gassing of Oil (< 200 oC)",
            Self::O => "O => Overheating (< 250 oC)",
            Self::C => "C => Possible carbonization of paper",
            Self::NA => "NA => Not Available",
            Self::ND => "ND => Not Determined",
            Self::OltcD1 => "D1 => Abnormal Arcing",
            Self::OltcT2 => "T2 => Severe thermal fault (300 < T < 700 oC), heavy coking",
            Self::OltcT3 => "T3 => Severe thermal fault (T > 700 oC), heavy coking",
            Self::OltcX1 => "X1 => Abnormal arcing or thermal fault in progress",
            Self::OltcX3 => "X3 => Fault T2 or T3 in progress, or abnormal severe arcing D1",
        }
    }
}

impl fmt::Display for FailureCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.description())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_descriptions_start_with_code() {
        let all = [
            FailureCode::N,
            FailureCode::PD,
            FailureCode::D1,
            FailureCode::D2,
            FailureCode::DT,
            FailureCode::T1,
            FailureCode::T2,
            FailureCode::T3,
            FailureCode::T3H,
            FailureCode::S,
            FailureCode::O,
            FailureCode::C,
            FailureCode::NA,
            FailureCode::ND,
            FailureCode::OltcN,
            FailureCode::OltcD1,
            FailureCode::OltcT2,
            FailureCode::OltcT3,
            FailureCode::OltcX1,
            FailureCode::OltcX3,
        ];
        for code in all {
            assert!(
                code.description().starts_with(&format!("{} => ", code.code())),
                "{code:?}"
            );
        }
    }

    #[test]
    fn test_oltc_descriptions() {
        assert_eq!(FailureCode::OltcN.description(), "N => Normal Operation");
        assert_eq!(FailureCode::OltcD1.description(), "D1 => Abnormal Arcing");
    }
}
