//! Chart period table.

use std::str::FromStr;

use crate::error::VaultError;

/// Candle period supported by the charting UI.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, derive_more::Display)]
pub enum ChartPeriod {
    #[display("5m")]
    M5,
    #[display("15m")]
    M15,
    #[display("1h")]
    H1,
    #[display("4h")]
    H4,
    #[display("1d")]
    D1,
}

impl ChartPeriod {
    pub const ALL: [ChartPeriod; 5] = [
        ChartPeriod::M5,
        ChartPeriod::M15,
        ChartPeriod::H1,
        ChartPeriod::H4,
        ChartPeriod::D1,
    ];

    /// Period duration in seconds (the candle bucket width).
    pub fn seconds(&self) -> u64 {
        match self {
            ChartPeriod::M5 => 5 * 60,
            ChartPeriod::M15 => 15 * 60,
            ChartPeriod::H1 => 60 * 60,
            ChartPeriod::H4 => 4 * 60 * 60,
            ChartPeriod::D1 => 24 * 60 * 60,
        }
    }
}

impl FromStr for ChartPeriod {
    type Err = VaultError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "5m" => Ok(ChartPeriod::M5),
            "15m" => Ok(ChartPeriod::M15),
            "1h" => Ok(ChartPeriod::H1),
            "4h" => Ok(ChartPeriod::H4),
            "1d" => Ok(ChartPeriod::D1),
            other => Err(VaultError::UnknownPeriod(other.to_string())),
        }
    }
}
