//! Fixed-point formatting of smallest-unit integers.
//!
//! All arithmetic stays in integers; floating point only appears when a
//! caller explicitly asks for an approximate display value.

use alloy::primitives::U256;

use crate::profile::NATIVE_DECIMALS;

/// Smallest units per gwei.
pub const WEI_PER_GWEI: u128 = 1_000_000_000;

/// Formats `amount` scaled down by `decimals`, trimming trailing zeros but
/// keeping at least one fractional digit ("1.0", "0.05", "12.000001").
pub fn format_units(amount: U256, decimals: u8) -> String {
    if decimals == 0 {
        return format!("{amount}.0");
    }

    // 10^78 and above exceed U256::MAX, so every amount is below the scale
    let (whole, fractional) = match U256::from(10u64).checked_pow(U256::from(decimals)) {
        Some(scale) => (amount / scale, amount % scale),
        None => {
            tracing::warn!(decimals, "decimals exceed 256-bit range, amount is purely fractional");
            (U256::ZERO, amount)
        }
    };

    let digits = format!("{:0>width$}", fractional.to_string(), width = decimals as usize);
    let trimmed = digits.trim_end_matches('0');
    let trimmed = if trimmed.is_empty() { "0" } else { trimmed };

    format!("{whole}.{trimmed}")
}

/// Formats a native-currency amount (18 decimals).
pub fn format_native(wei: U256) -> String {
    format_units(wei, NATIVE_DECIMALS)
}

/// Approximate native-currency value for display and coarse comparisons.
pub fn native_to_f64(wei: U256) -> f64 {
    format_native(wei).parse::<f64>().unwrap_or(f64::MAX)
}

/// Approximate gwei value of a per-gas price.
pub fn wei_to_gwei(wei: u128) -> f64 {
    format_units(U256::from(wei), 9).parse::<f64>().unwrap_or(f64::MAX)
}

/// `amount` native units expressed in the smallest unit.
pub fn native_units(amount: u64) -> U256 {
    U256::from(amount) * U256::from(10u64).pow(U256::from(NATIVE_DECIMALS))
}
