//! Chain profile: naming and presentation settings for the analyzed chain.

use serde::{Deserialize, Serialize};

/// Number of decimals of the native currency on every supported chain.
pub const NATIVE_DECIMALS: u8 = 18;

/// Describes the single EVM chain whose transactions are explained.
///
/// Only wording depends on the profile; heuristics and thresholds do not.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChainProfile {
    /// Display name, e.g. "BSC Mainnet".
    pub name: String,
    /// Short name used in narrative text, e.g. "BSC".
    pub short_name: String,
    /// EIP-155 chain id.
    pub chain_id: u64,
    /// Native currency symbol, e.g. "BNB".
    pub native_symbol: String,
    /// Fungible token standard name, e.g. "BEP-20".
    pub token_standard: String,
    /// Block explorer base URL.
    pub explorer_url: String,
}

impl ChainProfile {
    /// BNB Smart Chain mainnet.
    pub fn bsc_mainnet() -> Self {
        Self {
            name: "BSC Mainnet".to_string(),
            short_name: "BSC".to_string(),
            chain_id: 56,
            native_symbol: "BNB".to_string(),
            token_standard: "BEP-20".to_string(),
            explorer_url: "https://bscscan.com".to_string(),
        }
    }

    /// Explorer link for a transaction hash.
    pub fn tx_url(&self, hash: &str) -> String {
        format!("{}/tx/{}", self.explorer_url.trim_end_matches('/'), hash)
    }
}

impl Default for ChainProfile {
    fn default() -> Self {
        Self::bsc_mainnet()
    }
}
