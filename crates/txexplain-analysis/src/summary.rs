//! One-sentence narrative summaries.

use txexplain_data::ChainProfile;

use crate::classify::{DexProtocol, TxType};

/// Builds the summary sentence for a classified transaction.
///
/// `value_in_native` is only used by the native-transfer template.
pub fn summarize(
    tx_type: TxType,
    success: bool,
    value_in_native: f64,
    profile: &ChainProfile,
) -> String {
    let status = if success {
        "successfully executed"
    } else {
        "failed"
    };
    let chain = &profile.short_name;

    match tx_type {
        TxType::NativeTransfer => format!(
            "This transaction {status} a transfer of {value_in_native:.4} {} from one address to another on the {chain} network.",
            profile.native_symbol
        ),
        TxType::DexSwap(DexProtocol::PancakeSwap) => format!(
            "This transaction {status} a token swap using PancakeSwap, the leading DEX on {chain}. The transaction involved multiple token transfers and smart contract interactions."
        ),
        TxType::GenericDexSwap => format!(
            "This transaction {} a decentralized exchange swap on {chain}. The transaction involved token exchanges through automated market maker protocols.",
            if success { "successfully executed" } else { "failed to execute" }
        ),
        TxType::TokenTransfer => format!(
            "This transaction {status} a {} token transfer on the {chain} network. The transaction involved moving tokens between addresses.",
            profile.token_standard
        ),
        TxType::Staking => format!(
            "This transaction {status} a staking operation on {chain}. The transaction involved locking {} or tokens for network security and rewards.",
            profile.native_symbol
        ),
        TxType::Lending => format!(
            "This transaction {status} a lending protocol interaction on {chain}. The transaction involved depositing or borrowing assets through DeFi lending platforms."
        ),
        TxType::NftTransfer => format!(
            "This transaction {status} an NFT transfer on {chain}. The transaction involved moving non-fungible tokens between addresses."
        ),
        TxType::Bridge => format!(
            "This transaction {status} a cross-chain bridge operation. The transaction involved moving assets between {chain} and other blockchains."
        ),
        // other DEX families have no dedicated template
        TxType::DexSwap(_) | TxType::ContractInteraction => format!(
            "This transaction {status} a smart contract interaction on {chain}. The transaction involved executing code on the blockchain."
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn native_transfer_shows_value_with_four_decimals() {
        let summary = summarize(TxType::NativeTransfer, true, 1.0, &ChainProfile::default());
        assert_eq!(
            summary,
            "This transaction successfully executed a transfer of 1.0000 BNB from one address to another on the BSC network."
        );
    }

    #[test]
    fn failure_wording() {
        let profile = ChainProfile::default();
        assert!(summarize(TxType::Staking, false, 0.0, &profile)
            .starts_with("This transaction failed a staking operation"));
        assert!(summarize(TxType::GenericDexSwap, false, 0.0, &profile)
            .starts_with("This transaction failed to execute a decentralized exchange swap"));
    }

    #[test]
    fn only_pancakeswap_has_a_swap_template() {
        let profile = ChainProfile::default();
        let pancake = summarize(TxType::DexSwap(DexProtocol::PancakeSwap), true, 0.0, &profile);
        assert!(pancake.contains("the leading DEX on BSC"));

        let fallback = summarize(TxType::ContractInteraction, true, 0.0, &profile);
        for protocol in [DexProtocol::SushiSwap, DexProtocol::Uniswap, DexProtocol::OneInch] {
            let summary = summarize(TxType::DexSwap(protocol), true, 0.0, &profile);
            assert_eq!(summary, fallback, "{}", protocol.name());
        }
        assert_eq!(
            fallback,
            "This transaction successfully executed a smart contract interaction on BSC. The transaction involved executing code on the blockchain."
        );
    }

    #[test]
    fn profile_changes_wording() {
        let profile = ChainProfile {
            short_name: "Ethereum".to_string(),
            native_symbol: "ETH".to_string(),
            token_standard: "ERC-20".to_string(),
            ..ChainProfile::default()
        };
        let summary = summarize(TxType::TokenTransfer, true, 0.0, &profile);
        assert!(summary.contains("ERC-20 token transfer on the Ethereum network"));
    }
}
