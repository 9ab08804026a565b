//! The nine gases reported by a dissolved gas analysis.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Dissolved gas measured in transformer oil.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Gas {
    /// H2
    Hydrogen,
    /// CH4
    Methane,
    /// C2H6
    Ethane,
    /// C2H4
    Ethylene,
    /// C2H2
    Acetylene,
    /// CO
    CarbonMonoxide,
    /// CO2
    CarbonDioxide,
    /// O2
    Oxygen,
    /// N2
    Nitrogen,
}

impl Gas {
    /// All gases in record order.
    pub const ALL: [Self; 9] = [
        Self::Hydrogen,
        Self::Methane,
        Self::Ethane,
        Self::Ethylene,
        Self::Acetylene,
        Self::CarbonMonoxide,
        Self::CarbonDioxide,
        Self::Oxygen,
        Self::Nitrogen,
    ];

    /// Record key, also used as the label in output names.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Hydrogen => "Hydrogen",
            Self::Methane => "Methane",
            Self::Ethane => "Ethane",
            Self::Ethylene => "Ethylene",
            Self::Acetylene => "Acetylene",
            Self::CarbonMonoxide => "CarbonMonoxide",
            Self::CarbonDioxide => "CarbonDioxide",
            Self::Oxygen => "Oxygen",
            Self::Nitrogen => "Nitrogen",
        }
    }

    /// Chemical formula.
    #[must_use]
    pub const fn formula(self) -> &'static str {
        match self {
            Self::Hydrogen => "H2",
            Self::Methane => "CH4",
            Self::Ethane => "C2H6",
            Self::Ethylene => "C2H4",
            Self::Acetylene => "C2H2",
            Self::CarbonMonoxide => "CO",
            Self::CarbonDioxide => "CO2",
            Self::Oxygen => "O2",
            Self::Nitrogen => "N2",
        }
    }

    /// Position of the gas in [`Gas::ALL`].
    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Parse either the record key or the formula, ignoring ASCII case.
    #[must_use]
    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|g| g.name().eq_ignore_ascii_case(label) || g.formula().eq_ignore_ascii_case(label))
    }
}

impl fmt::Display for Gas {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_index_matches_order() {
        for (i, gas) in Gas::ALL.iter().enumerate() {
            assert_eq!(gas.index(), i);
        }
    }

    #[test]
    fn test_from_label() {
        assert_eq!(Gas::from_label("co2"), Some(Gas::CarbonDioxide));
        assert_eq!(Gas::from_label("CarbonMonoxide"), Some(Gas::CarbonMonoxide));
        assert_eq!(Gas::from_label("hydrogen"), Some(Gas::Hydrogen));
        assert_eq!(Gas::from_label("argon"), None);
    }

    #[test]
    fn test_display_uses_record_key() {
        assert_eq!(Gas::CarbonMonoxide.to_string(), "CarbonMonoxide");
        assert_eq!(Gas::Acetylene.formula(), "C2H2");
    }
}
