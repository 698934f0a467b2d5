//! Independent heuristic analyzers.
//!
//! Each analyzer is a total function over the typed transaction and receipt.
//! None of them depends on another's output except [`risk`], which reuses the
//! [`mev`] verdict.

use std::fmt;

use serde::Serialize;

pub mod gas;
pub mod mev;
pub mod network;
pub mod protocol;
pub mod risk;

pub use gas::{analyze_gas, EfficiencyRating, GasAnalysis};
pub use mev::{analyze_mev, MevAnalysis};
pub use network::{analyze_network_impact, ImpactLevel, NetworkEfficiency, NetworkImpact};
pub use protocol::{analyze_protocol, Complexity, ProtocolAnalysis};
pub use risk::{analyze_risk, RiskAnalysis};

/// Three-step qualitative risk scale.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            RiskLevel::Low => "Low",
            RiskLevel::Medium => "Medium",
            RiskLevel::High => "High",
        })
    }
}
