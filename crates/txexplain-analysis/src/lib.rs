//! txexplain-analysis crate
//!
//! Classification, extraction, heuristic analyzers, and the orchestrator that
//! merges them into a single [`Explanation`] per transaction.

pub mod analyzers;
pub mod cache;
pub mod classify;
pub mod education;
pub mod explain;
pub mod extract;
pub mod signatures;
pub mod summary;

pub use cache::ExplanationCache;
pub use classify::{classify, classify_traced, DexProtocol, TxType};
pub use explain::{explain, Explainer, Explanation};
