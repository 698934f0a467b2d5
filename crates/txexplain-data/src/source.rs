//! Chain data sources.
//!
//! The explanation pipeline never performs I/O itself; it is fed fully
//! materialized [`Transaction`] and [`Receipt`] values by a
//! [`ChainDataSource`]. The bundled [`FixtureSource`] serves records from a
//! JSON file captured ahead of time.

use std::collections::HashMap;
use std::path::Path;

use alloy::primitives::B256;
use eyre::{eyre, Context, Result};
use serde::Deserialize;

use crate::types::{Receipt, Transaction, TxRecord};

/// Supplies transactions and receipts by hash.
///
/// Lookups return `Ok(None)` when the hash is unknown; `Err` is reserved for
/// failures of the source itself.
#[allow(async_fn_in_trait)]
pub trait ChainDataSource {
    /// Fetches a transaction by hash.
    async fn get_transaction(&self, hash: B256) -> Result<Option<Transaction>>;

    /// Fetches the receipt of a transaction by hash.
    async fn get_receipt(&self, hash: B256) -> Result<Option<Receipt>>;

    /// Fetches a transaction together with its receipt.
    ///
    /// Returns `Ok(None)` if either half is missing, and an error if the
    /// receipt does not belong to the transaction.
    async fn get_record(&self, hash: B256) -> Result<Option<TxRecord>> {
        let Some(transaction) = self.get_transaction(hash).await? else {
            tracing::debug!(%hash, "transaction not found");
            return Ok(None);
        };
        let Some(receipt) = self.get_receipt(hash).await? else {
            tracing::debug!(%hash, "receipt not found");
            return Ok(None);
        };

        if !receipt.matches(&transaction) {
            return Err(eyre!(
                "receipt {} (block {}) does not belong to transaction {} (block {})",
                receipt.transaction_hash,
                receipt.block_number,
                transaction.hash,
                transaction.block_number
            ));
        }

        Ok(Some(TxRecord {
            transaction,
            receipt,
        }))
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum FixtureFile {
    Many(Vec<TxRecord>),
    One(TxRecord),
}

/// Serves transactions and receipts from a JSON fixture file.
///
/// The file holds either one `{ "transaction": .., "receipt": .. }` record
/// or an array of them.
#[derive(Clone, Debug, Default)]
pub struct FixtureSource {
    records: HashMap<B256, TxRecord>,
    order: Vec<B256>,
}

impl FixtureSource {
    /// Builds a source from records already in memory.
    ///
    /// A record whose hash repeats an earlier one replaces it.
    pub fn from_records(records: impl IntoIterator<Item = TxRecord>) -> Self {
        let mut source = Self::default();
        for record in records {
            let hash = record.transaction.hash;
            if source.records.insert(hash, record).is_some() {
                tracing::warn!(%hash, "duplicate fixture record, keeping the last one");
            } else {
                source.order.push(hash);
            }
        }
        source
    }

    /// Parses fixture JSON.
    pub fn from_json(json: &str) -> Result<Self> {
        let file: FixtureFile =
            serde_json::from_str(json).wrap_err("failed to parse fixture JSON")?;
        let records = match file {
            FixtureFile::Many(records) => records,
            FixtureFile::One(record) => vec![record],
        };
        Ok(Self::from_records(records))
    }

    /// Reads and parses a fixture file.
    #[tracing::instrument(skip_all, fields(path = %path.display()))]
    pub async fn load(path: &Path) -> Result<Self> {
        let json = tokio::fs::read_to_string(path)
            .await
            .wrap_err_with(|| format!("failed to read fixture file {}", path.display()))?;
        let source = Self::from_json(&json)
            .wrap_err_with(|| format!("invalid fixture file {}", path.display()))?;

        tracing::info!(records = source.len(), "loaded fixture records");
        Ok(source)
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// Returns `true` if the source holds no records.
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Records in file order.
    pub fn records(&self) -> impl Iterator<Item = &TxRecord> {
        self.order.iter().filter_map(|hash| self.records.get(hash))
    }
}

impl ChainDataSource for FixtureSource {
    async fn get_transaction(&self, hash: B256) -> Result<Option<Transaction>> {
        Ok(self
            .records
            .get(&hash)
            .map(|record| record.transaction.clone()))
    }

    async fn get_receipt(&self, hash: B256) -> Result<Option<Receipt>> {
        Ok(self.records.get(&hash).map(|record| record.receipt.clone()))
    }
}
