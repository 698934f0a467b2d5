//! Transaction-type classification.
//!
//! Classification is an ordered decision list: rules are evaluated top to
//! bottom and the first one that matches decides the tag. Later rules can be
//! shadowed by earlier ones. In particular the NFT rule only looks at
//! Transfer logs, and any Transfer log has already matched the token
//! transfer rule, so `NFT_TRANSFER` is never produced today. The order is
//! kept as is so existing classifications stay stable.

use std::fmt;

use serde::{Serialize, Serializer};
use txexplain_data::{ProtocolRegistry, Receipt, Transaction};

use crate::signatures::{
    has_transfer_log, is_transfer_log, BRIDGE_SELECTORS, LENDING_SELECTORS, STAKING_SELECTORS,
};

/// DEX families recognized by name in the protocol registry.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum DexProtocol {
    PancakeSwap,
    SushiSwap,
    Uniswap,
    OneInch,
}

impl DexProtocol {
    /// Keyword searched for in registry labels, in priority order.
    const KEYWORDS: [(&'static str, DexProtocol); 4] = [
        ("PancakeSwap", DexProtocol::PancakeSwap),
        ("SushiSwap", DexProtocol::SushiSwap),
        ("Uniswap", DexProtocol::Uniswap),
        ("1inch", DexProtocol::OneInch),
    ];

    /// Recognizes a DEX family from a registry label.
    pub fn from_label(label: &str) -> Option<Self> {
        Self::KEYWORDS
            .iter()
            .find(|(keyword, _)| label.contains(keyword))
            .map(|(_, protocol)| *protocol)
    }

    /// Display name.
    pub fn name(&self) -> &'static str {
        match self {
            DexProtocol::PancakeSwap => "PancakeSwap",
            DexProtocol::SushiSwap => "SushiSwap",
            DexProtocol::Uniswap => "Uniswap",
            DexProtocol::OneInch => "1inch",
        }
    }
}

/// Transaction category.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TxType {
    /// Plain native-currency transfer.
    NativeTransfer,
    /// Swap through a recognized DEX router.
    DexSwap(DexProtocol),
    /// Interaction with a registry protocol of no recognized DEX family.
    GenericDexSwap,
    /// Fungible token transfer.
    TokenTransfer,
    /// Withdraw/unstake call.
    Staking,
    /// Lending market supply call.
    Lending,
    /// Non-fungible token transfer.
    NftTransfer,
    /// Bridge-style mint or approval.
    Bridge,
    /// Anything else.
    ContractInteraction,
}

impl TxType {
    /// Stable machine-readable tag, e.g. `DEX_SWAP_PANCAKESWAP`.
    pub fn tag(&self) -> &'static str {
        match self {
            TxType::NativeTransfer => "NATIVE_TRANSFER",
            TxType::DexSwap(DexProtocol::PancakeSwap) => "DEX_SWAP_PANCAKESWAP",
            TxType::DexSwap(DexProtocol::SushiSwap) => "DEX_SWAP_SUSHISWAP",
            TxType::DexSwap(DexProtocol::Uniswap) => "DEX_SWAP_UNISWAP",
            TxType::DexSwap(DexProtocol::OneInch) => "DEX_SWAP_1INCH",
            TxType::GenericDexSwap => "GENERIC_DEX_SWAP",
            TxType::TokenTransfer => "TOKEN_TRANSFER",
            TxType::Staking => "STAKING",
            TxType::Lending => "LENDING",
            TxType::NftTransfer => "NFT_TRANSFER",
            TxType::Bridge => "BRIDGE",
            TxType::ContractInteraction => "CONTRACT_INTERACTION",
        }
    }

    /// Human-readable label, e.g. "PancakeSwap Swap".
    pub fn label(&self) -> String {
        match self {
            TxType::NativeTransfer => "Native Transfer".to_string(),
            TxType::DexSwap(protocol) => format!("{} Swap", protocol.name()),
            TxType::GenericDexSwap => "DEX Swap".to_string(),
            TxType::TokenTransfer => "Token Transfer".to_string(),
            TxType::Staking => "Staking".to_string(),
            TxType::Lending => "Lending".to_string(),
            TxType::NftTransfer => "NFT Transfer".to_string(),
            TxType::Bridge => "Bridge".to_string(),
            TxType::ContractInteraction => "Contract Interaction".to_string(),
        }
    }
}

impl fmt::Display for TxType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

impl Serialize for TxType {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.tag())
    }
}

/// Everything a rule may inspect.
pub struct RuleInput<'a> {
    pub tx: &'a Transaction,
    pub receipt: &'a Receipt,
    pub protocols: &'a dyn ProtocolRegistry,
}

/// A named predicate in the decision list.
pub struct Rule {
    /// Rule name, reported by [`classify_traced`].
    pub name: &'static str,
    /// Returns the tag when the rule matches.
    pub apply: fn(&RuleInput<'_>) -> Option<TxType>,
}

/// The decision list, in evaluation order.
pub const RULES: &[Rule] = &[
    Rule {
        name: "native_transfer",
        apply: native_transfer,
    },
    Rule {
        name: "known_protocol",
        apply: known_protocol,
    },
    Rule {
        name: "token_transfer_log",
        apply: token_transfer_log,
    },
    Rule {
        name: "staking_selector",
        apply: staking_selector,
    },
    Rule {
        name: "lending_selector",
        apply: lending_selector,
    },
    Rule {
        name: "nft_transfer_log",
        apply: nft_transfer_log,
    },
    Rule {
        name: "bridge_selector",
        apply: bridge_selector,
    },
    Rule {
        name: "contract_interaction",
        apply: contract_interaction,
    },
];

fn native_transfer(input: &RuleInput<'_>) -> Option<TxType> {
    (input.tx.transfers_value() && !input.tx.has_call_data()).then_some(TxType::NativeTransfer)
}

fn known_protocol(input: &RuleInput<'_>) -> Option<TxType> {
    let to = input.tx.to.as_ref()?;
    let label = input.protocols.lookup_protocol(to)?;
    Some(match DexProtocol::from_label(label) {
        Some(protocol) => TxType::DexSwap(protocol),
        None => TxType::GenericDexSwap,
    })
}

fn token_transfer_log(input: &RuleInput<'_>) -> Option<TxType> {
    has_transfer_log(&input.receipt.logs).then_some(TxType::TokenTransfer)
}

fn selector_in(input: &RuleInput<'_>, set: &[alloy::primitives::Selector]) -> bool {
    input
        .tx
        .selector()
        .is_some_and(|selector| set.contains(&selector))
}

fn staking_selector(input: &RuleInput<'_>) -> Option<TxType> {
    selector_in(input, &STAKING_SELECTORS).then_some(TxType::Staking)
}

fn lending_selector(input: &RuleInput<'_>) -> Option<TxType> {
    selector_in(input, &LENDING_SELECTORS).then_some(TxType::Lending)
}

fn nft_transfer_log(input: &RuleInput<'_>) -> Option<TxType> {
    input
        .receipt
        .logs
        .iter()
        .any(|log| is_transfer_log(log) && log.topics.len() == 4)
        .then_some(TxType::NftTransfer)
}

fn bridge_selector(input: &RuleInput<'_>) -> Option<TxType> {
    selector_in(input, &BRIDGE_SELECTORS).then_some(TxType::Bridge)
}

fn contract_interaction(_input: &RuleInput<'_>) -> Option<TxType> {
    Some(TxType::ContractInteraction)
}

/// Classifies a transaction and reports which rule decided.
pub fn classify_traced(
    tx: &Transaction,
    receipt: &Receipt,
    protocols: &dyn ProtocolRegistry,
) -> (TxType, &'static str) {
    let input = RuleInput {
        tx,
        receipt,
        protocols,
    };

    RULES
        .iter()
        .find_map(|rule| (rule.apply)(&input).map(|tx_type| (tx_type, rule.name)))
        .unwrap_or((TxType::ContractInteraction, "contract_interaction"))
}

/// Classifies a transaction.
pub fn classify(tx: &Transaction, receipt: &Receipt, protocols: &dyn ProtocolRegistry) -> TxType {
    classify_traced(tx, receipt, protocols).0
}
