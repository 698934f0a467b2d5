//! Gas usage efficiency.

use std::fmt;

use alloy::primitives::U256;
use serde::Serialize;
use txexplain_data::units::native_to_f64;
use txexplain_data::{Receipt, Transaction};

/// Efficiency above which gas usage counts as optimized.
pub const OPTIMIZED_EFFICIENCY: f64 = 80.0;

const RECOMMENDATIONS: [&str; 3] = [
    "Consider optimizing smart contract calls",
    "Review gas limit settings",
    "Check for unnecessary operations",
];

/// Qualitative gas efficiency bucket.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum EfficiencyRating {
    Poor,
    Fair,
    Good,
    Excellent,
}

impl EfficiencyRating {
    /// Buckets: <50 Poor, <70 Fair, <90 Good, otherwise Excellent.
    pub fn from_efficiency(efficiency: f64) -> Self {
        if efficiency < 50.0 {
            EfficiencyRating::Poor
        } else if efficiency < 70.0 {
            EfficiencyRating::Fair
        } else if efficiency < 90.0 {
            EfficiencyRating::Good
        } else {
            EfficiencyRating::Excellent
        }
    }
}

impl fmt::Display for EfficiencyRating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            EfficiencyRating::Poor => "Poor",
            EfficiencyRating::Fair => "Fair",
            EfficiencyRating::Good => "Good",
            EfficiencyRating::Excellent => "Excellent",
        })
    }
}

/// Gas usage report.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct GasAnalysis {
    pub gas_used: u64,
    pub gas_limit: u64,
    /// Requested gas price from the transaction.
    pub gas_price: u128,
    /// `gas_used / gas_limit * 100` with one decimal, e.g. "95.0".
    pub gas_efficiency: String,
    pub efficiency_rating: EfficiencyRating,
    pub is_optimized: bool,
    /// Fee at the requested gas price, in native units.
    ///
    /// This is `gas_used * tx.gas_price`, which can differ from the
    /// receipt-based fee reported at the top of the explanation.
    pub gas_fee: f64,
    /// Same fee in the smallest unit.
    pub gas_fee_wei: U256,
    /// Tips, only populated when efficiency is below 70%.
    pub recommendations: Vec<String>,
}

/// Percentage of the gas limit consumed; 0 when the limit is 0.
pub fn gas_efficiency(gas_used: u64, gas_limit: u64) -> f64 {
    if gas_limit == 0 {
        return 0.0;
    }
    gas_used as f64 / gas_limit as f64 * 100.0
}

/// [`gas_efficiency`] rendered with one decimal, exact ties rounded up
/// (6.25 renders as "6.3"). Computed in integer tenths of a percent.
pub fn format_gas_efficiency(gas_used: u64, gas_limit: u64) -> String {
    if gas_limit == 0 {
        return "0.0".to_string();
    }
    let (used, limit) = (u128::from(gas_used), u128::from(gas_limit));
    let tenths = (used * 2_000 + limit) / (2 * limit);
    format!("{}.{}", tenths / 10, tenths % 10)
}

/// Rates how much of the gas limit was consumed.
pub fn analyze_gas(tx: &Transaction, receipt: &Receipt) -> GasAnalysis {
    let efficiency = gas_efficiency(receipt.gas_used, tx.gas_limit);
    let gas_fee_wei = U256::from(receipt.gas_used) * U256::from(tx.gas_price);

    let recommendations = if efficiency < 70.0 {
        RECOMMENDATIONS.iter().map(|s| s.to_string()).collect()
    } else {
        Vec::new()
    };

    GasAnalysis {
        gas_used: receipt.gas_used,
        gas_limit: tx.gas_limit,
        gas_price: tx.gas_price,
        gas_efficiency: format_gas_efficiency(receipt.gas_used, tx.gas_limit),
        efficiency_rating: EfficiencyRating::from_efficiency(efficiency),
        is_optimized: efficiency > OPTIMIZED_EFFICIENCY,
        gas_fee: native_to_f64(gas_fee_wei),
        gas_fee_wei,
        recommendations,
    }
}
