//! Per-block resource share.
//!
//! Shares are measured against a fixed nominal block budget rather than the
//! chain's live block gas limit.

use std::fmt;

use serde::Serialize;
use txexplain_data::Receipt;

/// Nominal gas budget of one block.
pub const ASSUMED_BLOCK_GAS: u64 = 1_000_000;
/// Gas above which impact is High.
pub const HIGH_IMPACT_GAS: u64 = 1_000_000;
/// Gas above which impact is Moderate.
pub const MODERATE_IMPACT_GAS: u64 = 500_000;
/// Gas below which usage counts as efficient.
pub const EFFICIENT_GAS: u64 = 100_000;

/// Network impact bucket.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum ImpactLevel {
    Minimal,
    Moderate,
    High,
}

impl fmt::Display for ImpactLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ImpactLevel::Minimal => "Minimal",
            ImpactLevel::Moderate => "Moderate",
            ImpactLevel::High => "High",
        })
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub enum NetworkEfficiency {
    Efficient,
    Standard,
}

impl fmt::Display for NetworkEfficiency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            NetworkEfficiency::Efficient => "Efficient",
            NetworkEfficiency::Standard => "Standard",
        })
    }
}

/// Resource share report.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct NetworkImpact {
    /// Gas consumed.
    pub gas_contribution: u64,
    /// Percentage of [`ASSUMED_BLOCK_GAS`].
    pub block_contribution: f64,
    pub impact_level: ImpactLevel,
    pub is_high_impact: bool,
    pub network_efficiency: NetworkEfficiency,
}

pub fn analyze_network_impact(receipt: &Receipt) -> NetworkImpact {
    let gas_used = receipt.gas_used;

    let impact_level = if gas_used > HIGH_IMPACT_GAS {
        ImpactLevel::High
    } else if gas_used > MODERATE_IMPACT_GAS {
        ImpactLevel::Moderate
    } else {
        ImpactLevel::Minimal
    };

    NetworkImpact {
        gas_contribution: gas_used,
        block_contribution: gas_used as f64 / ASSUMED_BLOCK_GAS as f64 * 100.0,
        impact_level,
        is_high_impact: gas_used > MODERATE_IMPACT_GAS,
        network_efficiency: if gas_used < EFFICIENT_GAS {
            NetworkEfficiency::Efficient
        } else {
            NetworkEfficiency::Standard
        },
    }
}
