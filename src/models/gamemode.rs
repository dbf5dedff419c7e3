//! Gamemode and calculation method

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

/// Game the attributes are calculated for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gamemode {
    Droid,
    Osu,
}

impl Gamemode {
    pub const ALL: [Gamemode; 2] = [Gamemode::Droid, Gamemode::Osu];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Droid => "droid",
            Self::Osu => "osu",
        }
    }

    /// Comma-separated list for error messages
    pub fn valid_list() -> String {
        Self::ALL
            .iter()
            .map(Gamemode::as_str)
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl FromStr for Gamemode {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL.into_iter().find(|m| m.as_str() == s).ok_or(())
    }
}

impl fmt::Display for Gamemode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Which version of the performance algorithms to run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum CalculationMethod {
    Live,
    Rebalance,
}

impl CalculationMethod {
    pub const ALL: [CalculationMethod; 2] = [CalculationMethod::Live, CalculationMethod::Rebalance];

    pub fn from_code(code: i64) -> Option<Self> {
        match code {
            0 => Some(Self::Live),
            1 => Some(Self::Rebalance),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Live => "live",
            Self::Rebalance => "rebalance",
        }
    }

    /// List of `code (name)` pairs for error messages
    pub fn valid_list() -> String {
        Self::ALL
            .iter()
            .map(|m| format!("{} ({})", u8::from(*m), m.as_str()))
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl From<CalculationMethod> for u8 {
    fn from(method: CalculationMethod) -> Self {
        match method {
            CalculationMethod::Live => 0,
            CalculationMethod::Rebalance => 1,
        }
    }
}

impl TryFrom<u8> for CalculationMethod {
    type Error = String;

    fn try_from(code: u8) -> Result<Self, Self::Error> {
        Self::from_code(i64::from(code)).ok_or_else(|| format!("invalid calculation method {code}"))
    }
}
