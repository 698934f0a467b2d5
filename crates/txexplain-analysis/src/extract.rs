//! Balance-change, function-call, and token-transfer extraction.

use alloy::primitives::{Address, Selector, B256, U256};
use eyre::{bail, eyre, Result};
use serde::Serialize;
use txexplain_data::units::{format_native, format_units};
use txexplain_data::{ChainProfile, TokenResolver, Transaction, TxLog};

use crate::signatures::is_transfer_log;

/// Placeholder method name; call data is not ABI-decoded.
pub const UNKNOWN_METHOD: &str = "Unknown Method";

/// Asset class of a balance change.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AssetKind {
    /// Chain's native currency.
    Native,
    /// Contract-issued token.
    Token,
}

/// Sign of a balance change.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    Debit,
    Credit,
}

/// One side of a value movement.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct BalanceChange {
    /// Affected account (None for the contract being created).
    pub address: Option<Address>,
    /// Balance before the transaction. Always "0": historical state is not queried.
    pub before: String,
    /// Balance after the transaction. Always "0": historical state is not queried.
    pub after: String,
    /// Signed formatted change, e.g. "-1.5".
    pub change: String,
    /// Asset symbol.
    pub token: String,
    /// Asset class.
    pub kind: AssetKind,
    /// Debit or credit.
    pub direction: Direction,
    /// Unsigned magnitude in the smallest unit.
    pub amount: U256,
}

/// A contract call made by the transaction.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct FunctionCall {
    /// Called contract (None for contract creation).
    pub contract: Option<Address>,
    /// Method name; [`UNKNOWN_METHOD`] until an ABI decoder is wired in.
    pub method: String,
    /// Decoded arguments.
    pub arguments: Vec<String>,
    /// Native value attached to the call.
    pub value: U256,
    /// Leading 4 bytes of call data, when present.
    pub selector: Option<Selector>,
}

/// A decoded Transfer event.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct TokenTransfer {
    /// Sender of the tokens.
    pub from: Address,
    /// Recipient of the tokens.
    pub to: Address,
    /// Token contract (the log emitter).
    pub token: Address,
    /// Raw amount in the token's smallest unit.
    pub amount: U256,
    /// Amount scaled by the token's decimals.
    pub formatted_amount: String,
    /// Token symbol, "UNKNOWN" if unresolved.
    pub symbol: String,
    /// Token decimals, 18 if unresolved.
    pub decimals: u8,
    /// Log index within the receipt.
    pub log_index: u64,
}

/// Native debit/credit pair for a value-carrying transaction.
///
/// Returns an empty list when no value moves.
pub fn extract_balance_changes(tx: &Transaction, profile: &ChainProfile) -> Vec<BalanceChange> {
    if !tx.transfers_value() {
        return Vec::new();
    }

    let formatted = format_native(tx.value);
    let side = |address: Option<Address>, direction: Direction| BalanceChange {
        address,
        before: "0".to_string(),
        after: "0".to_string(),
        change: match direction {
            Direction::Debit => format!("-{formatted}"),
            Direction::Credit => format!("+{formatted}"),
        },
        token: profile.native_symbol.clone(),
        kind: AssetKind::Native,
        direction,
        amount: tx.value,
    };

    vec![
        side(Some(tx.from), Direction::Debit),
        side(tx.to, Direction::Credit),
    ]
}

/// One unresolved call record when the transaction carries call data.
pub fn extract_function_calls(tx: &Transaction) -> Vec<FunctionCall> {
    if !tx.has_call_data() {
        return Vec::new();
    }

    vec![FunctionCall {
        contract: tx.to,
        method: UNKNOWN_METHOD.to_string(),
        arguments: Vec::new(),
        value: tx.value,
        selector: tx.selector(),
    }]
}

/// Decodes every well-formed Transfer log, in log order.
///
/// Malformed Transfer logs are skipped with a warning; they never abort the
/// scan. Logs flagged `removed` are still decoded.
pub fn extract_token_transfers(logs: &[TxLog], tokens: &dyn TokenResolver) -> Vec<TokenTransfer> {
    let mut transfers = Vec::new();

    for log in logs.iter().filter(|log| is_transfer_log(log)) {
        if log.removed {
            tracing::debug!(
                log_index = log.log_index,
                token = %log.address,
                "decoding transfer log flagged as removed"
            );
        }

        let (from, to, amount) = match decode_transfer(log) {
            Ok(decoded) => decoded,
            Err(error) => {
                tracing::warn!(
                    log_index = log.log_index,
                    token = %log.address,
                    %error,
                    "skipping malformed transfer log"
                );
                continue;
            }
        };

        let info = tokens.lookup_token(&log.address);
        transfers.push(TokenTransfer {
            from,
            to,
            token: log.address,
            amount,
            formatted_amount: format_units(amount, info.decimals),
            symbol: info.symbol,
            decimals: info.decimals,
            log_index: log.log_index,
        });
    }

    transfers
}

/// Decodes `(from, to, amount)` from a Transfer log.
fn decode_transfer(log: &TxLog) -> Result<(Address, Address, U256)> {
    if log.topics.len() < 3 {
        bail!("expected at least 3 topics, found {}", log.topics.len());
    }
    if log.data.is_empty() {
        bail!("empty amount payload");
    }

    let from = address_from_topic(&log.topics[1]);
    let to = address_from_topic(&log.topics[2]);
    let amount = U256::try_from_be_slice(&log.data)
        .ok_or_else(|| eyre!("amount payload of {} bytes exceeds 32", log.data.len()))?;

    Ok((from, to, amount))
}

/// Addresses are right-aligned in 32-byte topics: bytes 12..32 hold the address.
fn address_from_topic(topic: &B256) -> Address {
    Address::from_slice(&topic[12..])
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy::primitives::{bytes, Bytes};
    use txexplain_data::registry::addresses;
    use txexplain_data::StaticRegistry;

    use crate::signatures::TRANSFER_TOPIC0;

    fn addr(n: u8) -> Address {
        let mut bytes = [0u8; 20];
        bytes[19] = n;
        Address::from(bytes)
    }

    fn topic_for(address: Address) -> B256 {
        address.into_word()
    }

    fn mk_tx(value: U256, input: Option<Bytes>) -> Transaction {
        Transaction {
            hash: B256::ZERO,
            from: addr(1),
            to: Some(addr(2)),
            value,
            gas_price: 1_000_000_000,
            gas_limit: 21_000,
            nonce: 0,
            block_number: 1,
            block_hash: B256::ZERO,
            transaction_index: 0,
            input,
            timestamp: None,
        }
    }

    fn mk_log(token: Address, topics: Vec<B256>, data: Bytes, log_index: u64) -> TxLog {
        TxLog {
            address: token,
            topics,
            data,
            log_index,
            removed: false,
        }
    }

    #[test]
    fn balance_changes_cancel_out() {
        let tx = mk_tx(U256::from(1_500_000_000_000_000_000u128), None);
        let changes = extract_balance_changes(&tx, &ChainProfile::default());

        assert_eq!(changes.len(), 2);
        assert_eq!(changes[0].address, Some(addr(1)));
        assert_eq!(changes[0].change, "-1.5");
        assert_eq!(changes[1].address, Some(addr(2)));
        assert_eq!(changes[1].change, "+1.5");
        assert_eq!(changes[0].amount, changes[1].amount);
        assert_eq!(changes[0].direction, Direction::Debit);
        assert_eq!(changes[1].direction, Direction::Credit);
        assert!(changes.iter().all(|c| c.token == "BNB" && c.before == "0"));
    }

    #[test]
    fn zero_value_has_no_balance_changes() {
        let tx = mk_tx(U256::ZERO, None);
        assert!(extract_balance_changes(&tx, &ChainProfile::default()).is_empty());
    }

    #[test]
    fn function_call_carries_selector() {
        let tx = mk_tx(U256::from(7u64), Some(bytes!("a9059cbb00")));
        let calls = extract_function_calls(&tx);
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].method, UNKNOWN_METHOD);
        assert_eq!(calls[0].contract, Some(addr(2)));
        assert_eq!(calls[0].value, U256::from(7u64));
        assert!(calls[0].arguments.is_empty());
        assert_eq!(
            calls[0].selector,
            Some(Selector::from([0xa9, 0x05, 0x9c, 0xbb]))
        );

        assert!(extract_function_calls(&mk_tx(U256::ZERO, Some(Bytes::new()))).is_empty());
    }

    #[test]
    fn decodes_known_token_transfer() {
        let registry = StaticRegistry::bsc();
        let amount = U256::from(2_500_000_000_000_000_000u128);
        let log = mk_log(
            addresses::USDT,
            vec![TRANSFER_TOPIC0, topic_for(addr(1)), topic_for(addr(2))],
            Bytes::from(amount.to_be_bytes::<32>().to_vec()),
            3,
        );

        let transfers = extract_token_transfers(&[log], &registry);
        assert_eq!(transfers.len(), 1);
        let transfer = &transfers[0];
        assert_eq!(transfer.from, addr(1));
        assert_eq!(transfer.to, addr(2));
        assert_eq!(transfer.amount, amount);
        assert_eq!(transfer.symbol, "USDT");
        assert_eq!(transfer.formatted_amount, "2.5");
        assert_eq!(transfer.log_index, 3);
    }

    #[test]
    fn unknown_token_uses_sentinel() {
        let registry = StaticRegistry::bsc();
        let log = mk_log(
            addr(0xee),
            vec![TRANSFER_TOPIC0, topic_for(addr(1)), topic_for(addr(2))],
            bytes!("64"),
            0,
        );

        let transfers = extract_token_transfers(&[log], &registry);
        assert_eq!(transfers[0].symbol, "UNKNOWN");
        assert_eq!(transfers[0].decimals, 18);
        assert_eq!(transfers[0].amount, U256::from(100u64));
    }

    #[test]
    fn malformed_logs_are_skipped_not_fatal() {
        let registry = StaticRegistry::bsc();
        let good = mk_log(
            addresses::CAKE,
            vec![TRANSFER_TOPIC0, topic_for(addr(1)), topic_for(addr(2))],
            bytes!("01"),
            0,
        );
        let two_topics = mk_log(
            addresses::CAKE,
            vec![TRANSFER_TOPIC0, topic_for(addr(1))],
            bytes!("01"),
            1,
        );
        let empty_payload = mk_log(
            addresses::CAKE,
            vec![TRANSFER_TOPIC0, topic_for(addr(1)), topic_for(addr(2))],
            Bytes::new(),
            2,
        );
        let oversized_payload = mk_log(
            addresses::CAKE,
            vec![TRANSFER_TOPIC0, topic_for(addr(1)), topic_for(addr(2))],
            Bytes::from(vec![1u8; 64]),
            3,
        );
        let not_transfer = mk_log(addresses::CAKE, vec![B256::repeat_byte(9)], bytes!("01"), 4);

        let logs = [good, two_topics, empty_payload, oversized_payload, not_transfer];
        let transfers = extract_token_transfers(&logs, &registry);
        assert_eq!(transfers.len(), 1);
        assert_eq!(transfers[0].log_index, 0);
    }

    #[test]
    fn removed_logs_are_still_decoded() {
        let registry = StaticRegistry::bsc();
        let mut log = mk_log(
            addresses::WBNB,
            vec![TRANSFER_TOPIC0, topic_for(addr(1)), topic_for(addr(2))],
            bytes!("01"),
            0,
        );
        log.removed = true;
        assert_eq!(extract_token_transfers(&[log], &registry).len(), 1);
    }
}
