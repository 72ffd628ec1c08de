//! The closed set of scalar quantities the engine can evaluate.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::EngineError;

/// A scalar observable of a scatterer-source(-detector) configuration.
///
/// Efficiencies (Q*) are dimensionless; cross sections (C*) carry m^2;
/// `Coupling` carries watts and is the only measure that needs a detector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Measure {
    Qsca,
    Qext,
    Qabs,
    Qpr,
    Qback,
    Qforward,
    Qratio,
    Csca,
    Cext,
    Cabs,
    Cpr,
    Cback,
    Cforward,
    Cratio,
    /// Asymmetry parameter <cos theta>.
    G,
    /// |a_1|, |a_2|, |a_3|: moduli of the first electric multipoles.
    A1,
    A2,
    A3,
    /// |b_1|, |b_2|, |b_3|: moduli of the first magnetic multipoles.
    B1,
    B2,
    B3,
    Coupling,
}

impl Measure {
    pub const ALL: [Measure; 22] = [
        Measure::Qsca,
        Measure::Qext,
        Measure::Qabs,
        Measure::Qpr,
        Measure::Qback,
        Measure::Qforward,
        Measure::Qratio,
        Measure::Csca,
        Measure::Cext,
        Measure::Cabs,
        Measure::Cpr,
        Measure::Cback,
        Measure::Cforward,
        Measure::Cratio,
        Measure::G,
        Measure::A1,
        Measure::A2,
        Measure::A3,
        Measure::B1,
        Measure::B2,
        Measure::B3,
        Measure::Coupling,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Measure::Qsca => "Qsca",
            Measure::Qext => "Qext",
            Measure::Qabs => "Qabs",
            Measure::Qpr => "Qpr",
            Measure::Qback => "Qback",
            Measure::Qforward => "Qforward",
            Measure::Qratio => "Qratio",
            Measure::Csca => "Csca",
            Measure::Cext => "Cext",
            Measure::Cabs => "Cabs",
            Measure::Cpr => "Cpr",
            Measure::Cback => "Cback",
            Measure::Cforward => "Cforward",
            Measure::Cratio => "Cratio",
            Measure::G => "g",
            Measure::A1 => "a1",
            Measure::A2 => "a2",
            Measure::A3 => "a3",
            Measure::B1 => "b1",
            Measure::B2 => "b2",
            Measure::B3 => "b3",
            Measure::Coupling => "coupling",
        }
    }

    /// Whether evaluating this measure requires a detector.
    pub fn needs_detector(&self) -> bool {
        matches!(self, Measure::Coupling)
    }
}

impl fmt::Display for Measure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Measure {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Measure::ALL
            .iter()
            .find(|m| m.as_str().eq_ignore_ascii_case(s))
            .copied()
            .ok_or_else(|| EngineError::UnsupportedMeasure(s.to_string()))
    }
}
