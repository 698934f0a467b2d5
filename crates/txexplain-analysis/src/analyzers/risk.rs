//! Additive risk scoring.

use serde::Serialize;
use txexplain_data::units::native_units;
use txexplain_data::{Receipt, Transaction};

use super::mev::{analyze_mev, is_high_gas_price};
use super::RiskLevel;

/// Value above which a transfer counts as high value, in native units.
pub const HIGH_VALUE_NATIVE: u64 = 10;

const HIGH_VALUE_WEIGHT: u32 = 2;
const HIGH_GAS_PRICE_WEIGHT: u32 = 1;
const MEV_WEIGHT: u32 = 3;
const CONTRACT_CALL_WEIGHT: u32 = 1;

const HIGH_RISK_RECOMMENDATIONS: [&str; 3] = [
    "Review transaction details carefully",
    "Consider using a hardware wallet",
    "Verify contract addresses",
];
const MEDIUM_RISK_RECOMMENDATIONS: [&str; 2] = [
    "Double-check transaction parameters",
    "Ensure you trust the contract",
];

impl RiskLevel {
    /// Score of 5 or more is High, 3 or more is Medium.
    pub fn from_score(score: u32) -> Self {
        if score >= 5 {
            RiskLevel::High
        } else if score >= 3 {
            RiskLevel::Medium
        } else {
            RiskLevel::Low
        }
    }
}

/// Risk report.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct RiskAnalysis {
    /// Triggered risk factors, in scoring order.
    pub risks: Vec<String>,
    pub risk_score: u32,
    pub risk_level: RiskLevel,
    pub recommendations: Vec<String>,
}

/// Scores value, gas price, MEV suspicion, and contract interaction.
pub fn analyze_risk(tx: &Transaction, receipt: &Receipt) -> RiskAnalysis {
    let mut risks = Vec::new();
    let mut risk_score = 0u32;

    if tx.value > native_units(HIGH_VALUE_NATIVE) {
        risks.push("High value transaction".to_string());
        risk_score += HIGH_VALUE_WEIGHT;
    }

    if is_high_gas_price(tx.gas_price) {
        risks.push("High gas price".to_string());
        risk_score += HIGH_GAS_PRICE_WEIGHT;
    }

    if analyze_mev(tx, receipt).is_mev() {
        risks.push("Potential MEV activity".to_string());
        risk_score += MEV_WEIGHT;
    }

    if tx.has_call_data() {
        risks.push("Smart contract interaction".to_string());
        risk_score += CONTRACT_CALL_WEIGHT;
    }

    let risk_level = RiskLevel::from_score(risk_score);
    let recommendations: &[&str] = match risk_level {
        RiskLevel::High => &HIGH_RISK_RECOMMENDATIONS,
        RiskLevel::Medium => &MEDIUM_RISK_RECOMMENDATIONS,
        RiskLevel::Low => &[],
    };

    RiskAnalysis {
        risks,
        risk_score,
        risk_level,
        recommendations: recommendations.iter().map(|s| s.to_string()).collect(),
    }
}
