//! Known protocol and token tables.
//!
//! Lookups go through the [`ProtocolRegistry`] and [`TokenResolver`] traits so
//! callers can plug in their own sources. [`StaticRegistry`] is the built-in
//! implementation: tables are assembled once and never mutated afterwards.

use std::collections::HashMap;
use std::sync::LazyLock;

use alloy::primitives::{address, Address};
use serde::{Deserialize, Serialize};

use crate::profile::NATIVE_DECIMALS;

/// BNB Smart Chain mainnet contract addresses.
pub mod addresses {
    use super::*;

    /// PancakeSwap V2 router
    pub const PANCAKESWAP_ROUTER: Address = address!("10ed43c718714eb63d5aa57b78b54704e256024e");

    /// PancakeSwap V1 router
    pub const PANCAKESWAP_ROUTER_V1: Address =
        address!("05ff2b0db69458a0750badebc4f9e13add608c7f");

    /// SushiSwap router
    pub const SUSHISWAP_ROUTER: Address = address!("1b02da8cb0d097eb8d57a175b88c7d8b47997506");

    /// Uniswap V2 Router02
    pub const UNISWAP_V2_ROUTER: Address = address!("7a250d5630b4cf539739df2c5dacb4c659f2488d");

    /// Uniswap V3 SwapRouter
    pub const UNISWAP_V3_ROUTER: Address = address!("e592427a0aece92de3edee1f18e0157c05861564");

    /// Uniswap V3 SwapRouter02
    pub const UNISWAP_V3_ROUTER_02: Address =
        address!("68b3465833fb72a70ecdf485e0e4c7bd8665fc45");

    /// Uniswap V3 USDC/WETH 0.05% pool
    pub const UNISWAP_V3_POOL: Address = address!("88e6a0c2ddd26feeb64f039a2c41296fcb3f5640");

    /// 1inch aggregation router
    pub const ONEINCH_ROUTER: Address = address!("1111111254fb6c44bac0bed2854e76f90643097d");

    /// Tether USD (BEP-20)
    pub const USDT: Address = address!("55d398326f99059ff775485246999027b3197955");

    /// USD Coin (BEP-20)
    pub const USDC: Address = address!("8ac76a51cc950d9822d68b83fe1ad97b32cd580d");

    /// Dai Stablecoin (BEP-20)
    pub const DAI: Address = address!("1af3f329e8be154074d8769d1ffa4ee058b1dbc3");

    /// PancakeSwap token
    pub const CAKE: Address = address!("0e09fabb73bd3ade0a17ecc321fd13a19e81ce82");

    /// Wrapped BNB
    pub const WBNB: Address = address!("bb4cdb9cbd36b01bd1cbaebf2de08d9173bc095c");

    /// Binance-peg Ethereum token
    pub const ETH: Address = address!("2170ed0880ac9a755fd29b2688956bd959f933f8");

    /// Binance-peg BTCB token
    pub const BTCB: Address = address!("7130d2a12b9bcbfae4f2634d864a1ee1ce3ead9c");
}

const KNOWN_PROTOCOLS: &[(Address, &str)] = &[
    (addresses::PANCAKESWAP_ROUTER, "PancakeSwap Router"),
    (addresses::PANCAKESWAP_ROUTER_V1, "PancakeSwap Router V1"),
    (addresses::SUSHISWAP_ROUTER, "SushiSwap Router"),
    (addresses::UNISWAP_V2_ROUTER, "Uniswap V2 Router"),
    (addresses::UNISWAP_V3_ROUTER, "Uniswap V3 Router"),
    (addresses::ONEINCH_ROUTER, "1inch Router"),
    (addresses::UNISWAP_V3_POOL, "Uniswap V3 Pool"),
    (addresses::UNISWAP_V3_ROUTER_02, "Uniswap V3 Router"),
];

const KNOWN_TOKENS: &[(Address, &str, &str, u8)] = &[
    (addresses::USDT, "USDT", "Tether USD", 18),
    (addresses::USDC, "USDC", "USD Coin", 18),
    (addresses::DAI, "DAI", "Dai Stablecoin", 18),
    (addresses::CAKE, "CAKE", "PancakeSwap Token", 18),
    (addresses::WBNB, "WBNB", "Wrapped BNB", 18),
    (addresses::ETH, "ETH", "Ethereum Token", 18),
    (addresses::BTCB, "BTCB", "Bitcoin BEP2", 18),
];

static BSC_REGISTRY: LazyLock<StaticRegistry> = LazyLock::new(StaticRegistry::bsc);

/// Token metadata.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenInfo {
    /// Ticker symbol.
    pub symbol: String,
    /// Human-readable name.
    pub name: String,
    /// Decimal places of the token's smallest unit.
    pub decimals: u8,
}

impl TokenInfo {
    /// Sentinel returned for tokens missing from every table.
    pub fn unknown() -> Self {
        Self {
            symbol: "UNKNOWN".to_string(),
            name: "Unknown Token".to_string(),
            decimals: NATIVE_DECIMALS,
        }
    }

    /// Returns `true` for the [`TokenInfo::unknown`] sentinel.
    pub fn is_unknown(&self) -> bool {
        *self == Self::unknown()
    }
}

/// Maps contract addresses to known protocol labels.
pub trait ProtocolRegistry {
    /// Returns the protocol label for `address`, if known.
    fn lookup_protocol(&self, address: &Address) -> Option<&str>;
}

/// Resolves token metadata for a token contract.
pub trait TokenResolver {
    /// Returns metadata for `address`, or [`TokenInfo::unknown`] if unresolved.
    fn lookup_token(&self, address: &Address) -> TokenInfo;
}

impl<T: ProtocolRegistry + ?Sized> ProtocolRegistry for &T {
    fn lookup_protocol(&self, address: &Address) -> Option<&str> {
        (**self).lookup_protocol(address)
    }
}

impl<T: TokenResolver + ?Sized> TokenResolver for &T {
    fn lookup_token(&self, address: &Address) -> TokenInfo {
        (**self).lookup_token(address)
    }
}

/// In-memory registry backed by fixed tables.
#[derive(Clone, Debug, Default)]
pub struct StaticRegistry {
    protocols: HashMap<Address, String>,
    tokens: HashMap<Address, TokenInfo>,
}

impl StaticRegistry {
    /// Registry with no entries.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Registry preloaded with the BNB Smart Chain tables.
    pub fn bsc() -> Self {
        let protocols = KNOWN_PROTOCOLS
            .iter()
            .map(|(addr, name)| (*addr, (*name).to_string()))
            .collect();
        let tokens = KNOWN_TOKENS
            .iter()
            .map(|(addr, symbol, name, decimals)| {
                (
                    *addr,
                    TokenInfo {
                        symbol: (*symbol).to_string(),
                        name: (*name).to_string(),
                        decimals: *decimals,
                    },
                )
            })
            .collect();

        Self { protocols, tokens }
    }

    /// Shared BNB Smart Chain registry, built on first use.
    pub fn global() -> &'static StaticRegistry {
        &BSC_REGISTRY
    }

    /// Adds a protocol entry. Entries can only be added while building.
    pub fn with_protocol(mut self, address: Address, name: impl Into<String>) -> Self {
        self.protocols.insert(address, name.into());
        self
    }

    /// Adds a token entry. Entries can only be added while building.
    pub fn with_token(mut self, address: Address, info: TokenInfo) -> Self {
        self.tokens.insert(address, info);
        self
    }

    /// Known protocols sorted by label.
    pub fn protocols(&self) -> Vec<(Address, &str)> {
        let mut out: Vec<(Address, &str)> = self
            .protocols
            .iter()
            .map(|(addr, name)| (*addr, name.as_str()))
            .collect();
        out.sort_by(|a, b| a.1.cmp(b.1).then(a.0.cmp(&b.0)));
        out
    }

    /// Known tokens sorted by symbol.
    pub fn tokens(&self) -> Vec<(Address, &TokenInfo)> {
        let mut out: Vec<(Address, &TokenInfo)> =
            self.tokens.iter().map(|(addr, info)| (*addr, info)).collect();
        out.sort_by(|a, b| a.1.symbol.cmp(&b.1.symbol));
        out
    }
}

impl ProtocolRegistry for StaticRegistry {
    fn lookup_protocol(&self, address: &Address) -> Option<&str> {
        self.protocols.get(address).map(String::as_str)
    }
}

impl TokenResolver for StaticRegistry {
    fn lookup_token(&self, address: &Address) -> TokenInfo {
        self.tokens
            .get(address)
            .cloned()
            .unwrap_or_else(TokenInfo::unknown)
    }
}
