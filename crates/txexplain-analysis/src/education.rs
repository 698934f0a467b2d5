//! Short explanatory notes per transaction type.

use txexplain_data::ChainProfile;

use crate::classify::{DexProtocol, TxType};

/// Returns the fixed, ordered notes for `tx_type`.
pub fn educational_content(tx_type: TxType, profile: &ChainProfile) -> Vec<String> {
    let chain = &profile.short_name;
    let symbol = &profile.native_symbol;

    match tx_type {
        TxType::NativeTransfer => vec![
            format!(
                "💡 {symbol} transfers are the most basic {chain} transactions, moving native {symbol} tokens between accounts."
            ),
            format!(
                "⚡ {chain} uses a proof-of-stake consensus mechanism with ~3 second block times and ultra-low transaction fees."
            ),
            format!(
                "🔗 {chain} is EVM-compatible, meaning it can run Ethereum smart contracts with much lower costs."
            ),
            "🛡️ The network provides security through validator sets and cross-chain communication with other Binance chains."
                .to_string(),
        ],
        TxType::DexSwap(DexProtocol::PancakeSwap) => vec![
            format!(
                "🥞 PancakeSwap is the leading DEX on {chain}, offering token swaps with low fees and fast transactions."
            ),
            "🔄 Automated Market Makers (AMMs) use liquidity pools to enable token trading without order books."
                .to_string(),
            "💰 Liquidity providers earn fees by supplying tokens to trading pools.".to_string(),
            "📈 Price impact depends on trade size and available liquidity in the pool."
                .to_string(),
        ],
        TxType::GenericDexSwap => vec![
            "🔄 Decentralized exchanges allow peer-to-peer trading without intermediaries."
                .to_string(),
            format!(
                "⚡ {chain}'s low fees make it ideal for frequent trading and DeFi activities."
            ),
            "🔒 Smart contracts handle the trading logic, ensuring trustless execution."
                .to_string(),
            "📊 Slippage protection helps prevent unfavorable price movements during trades."
                .to_string(),
        ],
        TxType::TokenTransfer => vec![
            format!(
                "🪙 {} tokens are the {chain} equivalent of ERC-20 tokens on Ethereum.",
                profile.token_standard
            ),
            "💸 Token transfers are recorded as events in transaction logs, not in the transaction value."
                .to_string(),
            "🔍 You can track token movements by analyzing transaction logs and events."
                .to_string(),
            format!(
                "🌐 {chain} supports thousands of tokens, from stablecoins to governance tokens."
            ),
        ],
        TxType::Staking => vec![
            format!("🥩 Staking involves locking {symbol} to secure the network and earn rewards."),
            "🎯 Validators are chosen based on their stake and performance in the network."
                .to_string(),
            "💰 Staking rewards come from transaction fees and block rewards.".to_string(),
            "⏰ Staking periods and rewards vary depending on the specific staking mechanism."
                .to_string(),
        ],
        TxType::Lending => vec![
            "🏦 DeFi lending allows users to earn interest on deposits or borrow against collateral."
                .to_string(),
            "💎 Collateralized lending reduces risk by requiring over-collateralization."
                .to_string(),
            "📊 Interest rates are determined algorithmically based on supply and demand."
                .to_string(),
            "🔄 Lending protocols enable capital efficiency in the DeFi ecosystem.".to_string(),
        ],
        // SushiSwap, Uniswap and 1inch swaps share the default notes
        TxType::DexSwap(_)
        | TxType::NftTransfer
        | TxType::Bridge
        | TxType::ContractInteraction => vec![
            "🔧 Smart contracts enable programmable money and automated financial services."
                .to_string(),
            format!(
                "⚡ {chain}'s EVM compatibility allows developers to deploy Ethereum dApps with lower costs."
            ),
            format!(
                "🌐 The {chain} ecosystem includes DeFi, NFTs, gaming, and cross-chain applications."
            ),
            "🛡️ Security audits and community governance help maintain protocol integrity."
                .to_string(),
        ],
    }
}
