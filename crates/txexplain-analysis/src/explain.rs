//! Orchestrator: runs every pipeline stage and merges the results.

use std::sync::LazyLock;

use alloy::primitives::{Address, B256, U256};
use serde::Serialize;
use txexplain_data::units::native_to_f64;
use txexplain_data::{
    ChainProfile, ProtocolRegistry, Receipt, StaticRegistry, TokenResolver, Transaction,
};

use crate::analyzers::{
    analyze_gas, analyze_mev, analyze_network_impact, analyze_protocol, analyze_risk,
    GasAnalysis, MevAnalysis, NetworkImpact, ProtocolAnalysis, RiskAnalysis,
};
use crate::classify::{classify_traced, TxType};
use crate::education::educational_content;
use crate::extract::{
    extract_balance_changes, extract_function_calls, extract_token_transfers, BalanceChange,
    FunctionCall, TokenTransfer,
};
use crate::summary::summarize;

static DEFAULT_EXPLAINER: LazyLock<Explainer<&'static StaticRegistry>> =
    LazyLock::new(|| Explainer::new(StaticRegistry::global(), ChainProfile::default()));

/// Complete, caller-owned explanation of one transaction.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Explanation {
    pub hash: B256,
    pub from: Address,
    pub to: Option<Address>,
    /// Value in the smallest unit.
    pub value: U256,
    /// Value in native units, for display.
    pub value_in_native: f64,
    /// `gas_used * effective_gas_price` in native units, for display.
    pub gas_fee: f64,
    /// `gas_used * effective_gas_price` in the smallest unit.
    pub gas_fee_wei: U256,
    pub gas_price: u128,
    pub gas_limit: u64,
    pub nonce: u64,
    pub block_number: u64,
    pub block_hash: B256,
    pub transaction_index: u64,
    pub timestamp: Option<u64>,
    /// Receipt status was 1.
    pub success: bool,
    pub transaction_type: TxType,
    /// Name of the classification rule that produced `transaction_type`.
    #[serde(skip)]
    pub classification_rule: &'static str,
    pub summary: String,
    pub educational_content: Vec<String>,
    pub balance_changes: Vec<BalanceChange>,
    pub function_calls: Vec<FunctionCall>,
    pub token_transfers: Vec<TokenTransfer>,
    pub mev_analysis: MevAnalysis,
    pub gas_analysis: GasAnalysis,
    pub protocol_analysis: ProtocolAnalysis,
    pub risk_analysis: RiskAnalysis,
    pub network_impact: NetworkImpact,
}

/// Explains transactions against a registry and chain profile.
///
/// Explaining is pure: the same transaction and receipt always produce the
/// same explanation.
#[derive(Clone, Debug)]
pub struct Explainer<R> {
    registry: R,
    profile: ChainProfile,
}

impl<R> Explainer<R>
where
    R: ProtocolRegistry + TokenResolver,
{
    pub fn new(registry: R, profile: ChainProfile) -> Self {
        Self { registry, profile }
    }

    pub fn profile(&self) -> &ChainProfile {
        &self.profile
    }

    pub fn registry(&self) -> &R {
        &self.registry
    }

    /// Builds the explanation for `tx` and its `receipt`.
    ///
    /// Never fails: malformed nested data degrades to empty or default
    /// sections.
    #[tracing::instrument(skip_all, fields(hash = %tx.hash))]
    pub fn explain(&self, tx: &Transaction, receipt: &Receipt) -> Explanation {
        if !receipt.matches(tx) {
            tracing::warn!(
                receipt_hash = %receipt.transaction_hash,
                receipt_block = receipt.block_number,
                tx_block = tx.block_number,
                "receipt does not belong to transaction, explaining anyway"
            );
        }

        let success = receipt.succeeded();
        let value_in_native = native_to_f64(tx.value);
        let gas_fee_wei = receipt.fee_wei();

        let (transaction_type, rule) = classify_traced(tx, receipt, &self.registry);
        tracing::debug!(rule, tag = %transaction_type, "classified transaction");

        let summary = summarize(transaction_type, success, value_in_native, &self.profile);
        let balance_changes = extract_balance_changes(tx, &self.profile);
        let function_calls = extract_function_calls(tx);
        let token_transfers = extract_token_transfers(&receipt.logs, &self.registry);
        let mev_analysis = analyze_mev(tx, receipt);
        let gas_analysis = analyze_gas(tx, receipt);
        let protocol_analysis = analyze_protocol(tx, receipt, &self.registry, &self.profile);
        let risk_analysis = analyze_risk(tx, receipt);
        let network_impact = analyze_network_impact(receipt);
        let educational_content = educational_content(transaction_type, &self.profile);

        tracing::debug!(
            token_transfers = token_transfers.len(),
            mev = mev_analysis.is_mev(),
            risk = %risk_analysis.risk_level,
            "explained transaction"
        );

        Explanation {
            hash: tx.hash,
            from: tx.from,
            to: tx.to,
            value: tx.value,
            value_in_native,
            gas_fee: native_to_f64(gas_fee_wei),
            gas_fee_wei,
            gas_price: tx.gas_price,
            gas_limit: tx.gas_limit,
            nonce: tx.nonce,
            block_number: tx.block_number,
            block_hash: tx.block_hash,
            transaction_index: tx.transaction_index,
            timestamp: tx.timestamp,
            success,
            transaction_type,
            classification_rule: rule,
            summary,
            educational_content,
            balance_changes,
            function_calls,
            token_transfers,
            mev_analysis,
            gas_analysis,
            protocol_analysis,
            risk_analysis,
            network_impact,
        }
    }
}

/// Explains a transaction with the built-in BSC registry and profile.
pub fn explain(tx: &Transaction, receipt: &Receipt) -> Explanation {
    DEFAULT_EXPLAINER.explain(tx, receipt)
}
