//! Shared test helpers and utilities.
//!
//! Provides factory functions for transactions, receipts, and logs with
//! sensible BSC mainnet defaults.

#![allow(dead_code)]

use alloy::primitives::{Address, Bytes, B256, U256};
use txexplain_analysis::signatures::TRANSFER_TOPIC0;
use txexplain_data::{Receipt, Transaction, TxLog, TxRecord};

/// Sender used by every sample transaction.
pub fn sender() -> Address {
    Address::repeat_byte(0xa1)
}

/// An address absent from the protocol registry.
pub fn stranger() -> Address {
    Address::repeat_byte(0xb2)
}

/// Creates a sample Transaction with sensible defaults.
///
/// # Arguments
/// * `seed` - Distinguishes the hash and nonce of otherwise equal transactions
/// * `to` - Recipient
/// * `value` - Value in wei
/// * `input` - Raw call data (empty means none)
///
/// # Example
/// ```ignore
/// let tx = sample_tx(1, stranger(), native_units(1), &[]);
/// assert!(!tx.has_call_data());
/// ```
pub fn sample_tx(seed: u8, to: Address, value: U256, input: &[u8]) -> Transaction {
    Transaction {
        hash: B256::repeat_byte(seed),
        from: sender(),
        to: Some(to),
        value,
        gas_price: 3_000_000_000, // 3 gwei
        gas_limit: 250_000,
        nonce: seed as u64,
        block_number: 38_000_000,
        block_hash: B256::repeat_byte(0xbb),
        transaction_index: seed as u64,
        input: Some(Bytes::copy_from_slice(input)),
        timestamp: Some(1_716_000_000), // 2024-05-18
    }
}

/// Creates the matching successful Receipt for `tx`.
pub fn sample_receipt(tx: &Transaction, gas_used: u64, logs: Vec<TxLog>) -> Receipt {
    Receipt {
        transaction_hash: tx.hash,
        block_number: tx.block_number,
        block_hash: tx.block_hash,
        from: tx.from,
        to: tx.to,
        gas_used,
        effective_gas_price: tx.gas_price,
        status: 1,
        logs,
    }
}

/// Creates an ERC-20 Transfer log emitted by `token`.
pub fn transfer_log(
    token: Address,
    from: Address,
    to: Address,
    amount: U256,
    log_index: u64,
) -> TxLog {
    TxLog {
        address: token,
        topics: vec![TRANSFER_TOPIC0, from.into_word(), to.into_word()],
        data: Bytes::from(amount.to_be_bytes_vec()),
        log_index,
        removed: false,
    }
}

/// Creates a Transfer log carrying only `topic_count` topics.
pub fn truncated_transfer_log(token: Address, topic_count: usize, log_index: u64) -> TxLog {
    let mut log = transfer_log(token, sender(), stranger(), U256::from(1u64), log_index);
    log.topics.truncate(topic_count);
    log
}

/// Wraps a pair into a fixture record.
pub fn record(transaction: Transaction, receipt: Receipt) -> TxRecord {
    TxRecord {
        transaction,
        receipt,
    }
}
