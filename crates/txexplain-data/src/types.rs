//! Input record types supplied by a chain data source.
//!
//! These mirror the shape of `eth_getTransactionByHash` and
//! `eth_getTransactionReceipt` responses, reduced to the fields the
//! explanation pipeline reads. All of them are immutable once loaded.

use alloy::primitives::{Address, Bytes, Selector, B256, U256};
use serde::{Deserialize, Serialize};

/// A mined transaction.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    /// Transaction hash.
    pub hash: B256,
    /// Sender address.
    pub from: Address,
    /// Recipient address (None for contract creation).
    #[serde(default)]
    pub to: Option<Address>,
    /// Transferred value in the smallest native unit (decimal or 0x-hex text).
    pub value: U256,
    /// Gas price requested by the sender, in the smallest native unit.
    pub gas_price: u128,
    /// Gas limit.
    pub gas_limit: u64,
    /// Sender nonce.
    pub nonce: u64,
    /// Block number.
    pub block_number: u64,
    /// Block hash.
    pub block_hash: B256,
    /// Index of the transaction within its block.
    pub transaction_index: u64,
    /// Call data. Absent and `0x` both mean "no data".
    #[serde(default)]
    pub input: Option<Bytes>,
    /// Block timestamp in unix seconds, when known.
    #[serde(default)]
    pub timestamp: Option<u64>,
}

impl Transaction {
    /// Returns the call data when it is present and non-empty.
    pub fn call_data(&self) -> Option<&Bytes> {
        self.input.as_ref().filter(|data| !data.is_empty())
    }

    /// Returns `true` if the transaction carries call data.
    pub fn has_call_data(&self) -> bool {
        self.call_data().is_some()
    }

    /// Leading 4-byte function selector, if the call data is long enough.
    pub fn selector(&self) -> Option<Selector> {
        let data = self.call_data()?;
        if data.len() < 4 {
            return None;
        }
        Some(Selector::from_slice(&data[..4]))
    }

    /// Returns `true` if a non-zero native value is transferred.
    pub fn transfers_value(&self) -> bool {
        !self.value.is_zero()
    }
}

/// Receipt log entry.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TxLog {
    /// Address of the contract that emitted the log.
    pub address: Address,
    /// Indexed topics; topic0 is the event signature.
    pub topics: Vec<B256>,
    /// Non-indexed log data.
    #[serde(default)]
    pub data: Bytes,
    /// Position of the log within the receipt.
    pub log_index: u64,
    /// Set when the log was invalidated by a reorg.
    #[serde(default)]
    pub removed: bool,
}

impl TxLog {
    /// Event signature topic, if any.
    pub fn topic0(&self) -> Option<&B256> {
        self.topics.first()
    }
}

/// Execution receipt for a mined transaction.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Receipt {
    /// Hash of the transaction this receipt belongs to.
    pub transaction_hash: B256,
    /// Block number.
    pub block_number: u64,
    /// Block hash.
    pub block_hash: B256,
    /// Sender address.
    pub from: Address,
    /// Recipient address (None for contract creation).
    #[serde(default)]
    pub to: Option<Address>,
    /// Gas consumed by execution.
    pub gas_used: u64,
    /// Price actually charged per gas unit.
    pub effective_gas_price: u128,
    /// Execution status (1=success, 0=revert).
    pub status: u8,
    /// Logs in emission order.
    #[serde(default)]
    pub logs: Vec<TxLog>,
}

impl Receipt {
    /// Returns `true` if execution succeeded.
    pub fn succeeded(&self) -> bool {
        self.status == 1
    }

    /// Checks that this receipt belongs to `tx`: same hash and block location.
    pub fn matches(&self, tx: &Transaction) -> bool {
        self.transaction_hash == tx.hash
            && self.block_number == tx.block_number
            && self.block_hash == tx.block_hash
    }

    /// Total fee paid, `gas_used * effective_gas_price`, in the smallest unit.
    pub fn fee_wei(&self) -> U256 {
        U256::from(self.gas_used) * U256::from(self.effective_gas_price)
    }
}

/// A transaction paired with its receipt, as stored in fixture files.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TxRecord {
    /// The transaction.
    pub transaction: Transaction,
    /// Its receipt.
    pub receipt: Receipt,
}
