//! Event signatures and function selectors recognized by the pipeline.

use alloy::primitives::{b256, fixed_bytes, Selector, B256};
use txexplain_data::TxLog;

/// ERC-20/ERC-721 Transfer event signature: `keccak256("Transfer(address,address,uint256)")`.
pub const TRANSFER_TOPIC0: B256 =
    b256!("ddf252ad1be2c89b69c2b068fc378daa952ba7f163c4a11628f55a4df523b3ef");

/// Withdraw/unstake selectors.
pub const STAKING_SELECTORS: [Selector; 2] = [
    fixed_bytes!("2e1a7d4d"), // withdraw(uint256)
    fixed_bytes!("3ccfd60b"), // withdraw()
];

/// Supply/borrow selectors of compound-style lending markets.
pub const LENDING_SELECTORS: [Selector; 2] = [
    fixed_bytes!("a0712d68"), // mint(uint256)
    fixed_bytes!("1249c58b"), // mint()
];

/// Bridge-style selectors.
pub const BRIDGE_SELECTORS: [Selector; 2] = [
    fixed_bytes!("40c10f19"), // mint(address,uint256)
    fixed_bytes!("095ea7b3"), // approve(address,uint256)
];

/// Returns `true` if topic0 of `log` is the Transfer signature.
pub fn is_transfer_log(log: &TxLog) -> bool {
    log.topic0() == Some(&TRANSFER_TOPIC0)
}

/// Returns `true` if any log is a Transfer event.
pub fn has_transfer_log(logs: &[TxLog]) -> bool {
    logs.iter().any(is_transfer_log)
}
