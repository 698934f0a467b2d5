//! Single-transaction MEV heuristic.
//!
//! # Ethical Context
//! The sandwich flag is an educational hint for end users reading their own
//! transactions. It looks at one transaction in isolation, so it cannot see
//! the surrounding front-run and back-run legs and will both miss real
//! attacks and flag ordinary priority-fee swaps.

use serde::Serialize;
use txexplain_data::units::WEI_PER_GWEI;
use txexplain_data::{Receipt, Transaction};

use crate::signatures::has_transfer_log;

/// Disclaimer shown alongside MEV verdicts.
pub const ACCURACY_DISCLAIMER: &str =
    "Heuristic flag from a single transaction. Confirm against block context before acting on it.";

/// Gas price above which a transaction is considered priority-bidding (10 gwei).
pub const HIGH_GAS_PRICE_WEI: u128 = 10 * WEI_PER_GWEI;

/// Label attached to suspected transactions.
pub const SANDWICH_LABEL: &str = "Potential Sandwich Attack";

const SANDWICH_DESCRIPTION: &str = "High gas price with token transfers may indicate MEV activity";
const SUSPECTED_CONFIDENCE: f64 = 0.7;
const CLEAR_CONFIDENCE: f64 = 0.1;

/// MEV verdict.
///
/// Confidence values are fixed per branch, not computed probabilities.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum MevAnalysis {
    /// Pattern matched.
    Suspected {
        mev_type: String,
        description: String,
        confidence: f64,
    },
    /// No pattern matched.
    Clear { confidence: f64 },
}

impl MevAnalysis {
    /// Returns `true` for [`MevAnalysis::Suspected`].
    pub fn is_mev(&self) -> bool {
        matches!(self, MevAnalysis::Suspected { .. })
    }

    /// Confidence of the verdict in [0, 1].
    pub fn confidence(&self) -> f64 {
        match self {
            MevAnalysis::Suspected { confidence, .. } | MevAnalysis::Clear { confidence } => {
                *confidence
            }
        }
    }

    /// MEV category, when suspected.
    pub fn mev_type(&self) -> Option<&str> {
        match self {
            MevAnalysis::Suspected { mev_type, .. } => Some(mev_type),
            MevAnalysis::Clear { .. } => None,
        }
    }

    /// Rationale, when suspected.
    pub fn description(&self) -> Option<&str> {
        match self {
            MevAnalysis::Suspected { description, .. } => Some(description),
            MevAnalysis::Clear { .. } => None,
        }
    }
}

/// Returns `true` if `gas_price` is strictly above [`HIGH_GAS_PRICE_WEI`].
pub fn is_high_gas_price(gas_price: u128) -> bool {
    gas_price > HIGH_GAS_PRICE_WEI
}

/// Flags high-gas-price transactions that move tokens.
pub fn analyze_mev(tx: &Transaction, receipt: &Receipt) -> MevAnalysis {
    if is_high_gas_price(tx.gas_price) && has_transfer_log(&receipt.logs) {
        return MevAnalysis::Suspected {
            mev_type: SANDWICH_LABEL.to_string(),
            description: SANDWICH_DESCRIPTION.to_string(),
            confidence: SUSPECTED_CONFIDENCE,
        };
    }

    MevAnalysis::Clear {
        confidence: CLEAR_CONFIDENCE,
    }
}
