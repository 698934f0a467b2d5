//! txexplain-data crate
//!
//! Record types, chain profile, static registries, and data sources that
//! feed the explanation pipeline.

pub mod profile;
pub mod registry;
pub mod source;
pub mod types;
pub mod units;

pub use profile::ChainProfile;
pub use registry::{ProtocolRegistry, StaticRegistry, TokenInfo, TokenResolver};
pub use source::{ChainDataSource, FixtureSource};
pub use types::{Receipt, Transaction, TxLog, TxRecord};
