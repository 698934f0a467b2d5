//! Concurrent memo of explanations keyed by transaction hash.

use alloy::primitives::B256;
use dashmap::DashMap;
use txexplain_data::{ProtocolRegistry, Receipt, TokenResolver, Transaction};

use crate::explain::{Explainer, Explanation};

/// Thread-safe explanation cache.
///
/// Explanations are deterministic, so a cached entry is always what a fresh
/// call would produce for the same hash and explainer.
#[derive(Debug, Default)]
pub struct ExplanationCache {
    entries: DashMap<B256, Explanation>,
}

impl ExplanationCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the cached explanation for `tx.hash`, computing it on a miss.
    pub fn get_or_explain<R>(
        &self,
        explainer: &Explainer<R>,
        tx: &Transaction,
        receipt: &Receipt,
    ) -> Explanation
    where
        R: ProtocolRegistry + TokenResolver,
    {
        if let Some(hit) = self.entries.get(&tx.hash) {
            tracing::trace!(hash = %tx.hash, "explanation cache hit");
            return hit.value().clone();
        }

        self.entries
            .entry(tx.hash)
            .or_insert_with(|| explainer.explain(tx, receipt))
            .value()
            .clone()
    }

    pub fn contains(&self, hash: &B256) -> bool {
        self.entries.contains_key(hash)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&self) {
        self.entries.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy::primitives::{Address, U256};
    use std::sync::Arc;
    use txexplain_data::{ChainProfile, StaticRegistry};

    fn mk_pair(seed: u8) -> (Transaction, Receipt) {
        let tx = Transaction {
            hash: B256::repeat_byte(seed),
            from: Address::repeat_byte(1),
            to: Some(Address::repeat_byte(2)),
            value: U256::from(1_000u64),
            gas_price: 1_000_000_000,
            gas_limit: 21_000,
            nonce: seed as u64,
            block_number: 7,
            block_hash: B256::repeat_byte(0xee),
            transaction_index: 0,
            input: None,
            timestamp: None,
        };
        let receipt = Receipt {
            transaction_hash: tx.hash,
            block_number: 7,
            block_hash: tx.block_hash,
            from: tx.from,
            to: tx.to,
            gas_used: 21_000,
            effective_gas_price: 1_000_000_000,
            status: 1,
            logs: vec![],
        };
        (tx, receipt)
    }

    #[test]
    fn second_lookup_returns_cached_entry() {
        let explainer = Explainer::new(StaticRegistry::global(), ChainProfile::default());
        let cache = ExplanationCache::new();
        let (tx, receipt) = mk_pair(3);

        let first = cache.get_or_explain(&explainer, &tx, &receipt);
        assert!(cache.contains(&tx.hash));

        // a different receipt under the same hash is not re-explained
        let mut failed = receipt.clone();
        failed.status = 0;
        let second = cache.get_or_explain(&explainer, &tx, &failed);

        assert_eq!(first, second);
        assert!(second.success);
        assert_eq!(cache.len(), 1);

        cache.clear();
        assert!(cache.is_empty());
    }

    #[test]
    fn shared_across_threads() {
        let explainer = Arc::new(Explainer::new(
            StaticRegistry::global(),
            ChainProfile::default(),
        ));
        let cache = Arc::new(ExplanationCache::new());

        let handles: Vec<_> = (0..4u8)
            .map(|i| {
                let explainer = Arc::clone(&explainer);
                let cache = Arc::clone(&cache);
                std::thread::spawn(move || {
                    for seed in 0..8u8 {
                        let (tx, receipt) = mk_pair(seed.wrapping_add(i % 2));
                        cache.get_or_explain(&explainer, &tx, &receipt);
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        assert_eq!(cache.len(), 9);
    }
}
