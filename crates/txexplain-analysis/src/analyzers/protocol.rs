//! Known-protocol interaction and complexity.

use std::fmt;

use serde::Serialize;
use txexplain_data::{ChainProfile, ProtocolRegistry, Receipt, Transaction};

use super::RiskLevel;
use crate::signatures::has_transfer_log;

/// Protocol type reported for addresses missing from the registry.
pub const UNKNOWN_PROTOCOL: &str = "Unknown";

/// Interaction complexity tier, from the number of detected features.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum Complexity {
    Low,
    Medium,
    High,
}

impl Complexity {
    /// More than 2 features is High, more than 1 is Medium.
    pub fn from_feature_count(count: usize) -> Self {
        if count > 2 {
            Complexity::High
        } else if count > 1 {
            Complexity::Medium
        } else {
            Complexity::Low
        }
    }
}

impl fmt::Display for Complexity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Complexity::Low => "Low",
            Complexity::Medium => "Medium",
            Complexity::High => "High",
        })
    }
}

/// Protocol interaction report.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ProtocolAnalysis {
    /// Registry label of the recipient, if known.
    pub protocol: Option<String>,
    /// Registry label, or "Unknown".
    pub protocol_type: String,
    pub risk_level: RiskLevel,
    /// Detected features in detection order.
    pub features: Vec<String>,
    pub is_defi: bool,
    pub has_token_activity: bool,
    pub complexity: Complexity,
}

/// Builds the feature list and derived tiers for a transaction.
pub fn analyze_protocol(
    tx: &Transaction,
    receipt: &Receipt,
    protocols: &dyn ProtocolRegistry,
    profile: &ChainProfile,
) -> ProtocolAnalysis {
    let protocol = tx
        .to
        .as_ref()
        .and_then(|to| protocols.lookup_protocol(to))
        .map(str::to_string);
    let has_token_activity = has_transfer_log(&receipt.logs);

    let mut features = Vec::new();
    let mut risk_level = RiskLevel::Low;

    if protocol.is_some() {
        features.push("DeFi Protocol".to_string());
        features.push("Smart Contract Interaction".to_string());
        risk_level = RiskLevel::Medium;
    }

    if has_token_activity {
        features.push("Token Transfer".to_string());
        // escalates Low to Medium, never beyond
        if risk_level == RiskLevel::Low {
            risk_level = RiskLevel::Medium;
        }
    }

    if tx.transfers_value() {
        features.push(format!("{} Transfer", profile.native_symbol));
    }

    ProtocolAnalysis {
        protocol_type: protocol
            .clone()
            .unwrap_or_else(|| UNKNOWN_PROTOCOL.to_string()),
        is_defi: protocol.is_some(),
        protocol,
        risk_level,
        complexity: Complexity::from_feature_count(features.len()),
        features,
        has_token_activity,
    }
}
