//! Invariants that hold across whole families of inputs.

mod common;

use alloy::primitives::U256;
use common::{sample_receipt, sample_tx, sender, stranger, transfer_log, truncated_transfer_log};
use txexplain_analysis::analyzers::gas::{gas_efficiency, EfficiencyRating};
use txexplain_analysis::analyzers::RiskLevel;
use txexplain_analysis::extract::{extract_token_transfers, Direction};
use txexplain_analysis::{explain, TxType};
use txexplain_data::registry::addresses;
use txexplain_data::units::WEI_PER_GWEI;
use txexplain_data::StaticRegistry;

/// Any non-zero value without call data is a native transfer with a
/// balanced debit/credit pair.
#[test]
fn value_without_data_always_native_transfer() {
    let values = [
        U256::from(1u64),
        U256::from(999_999_999u64),
        U256::from(10u64).pow(U256::from(18)),
        U256::from(10u64).pow(U256::from(30)),
        U256::MAX,
    ];
    let recipients = [stranger(), addresses::PANCAKESWAP_ROUTER, addresses::USDT];

    for (i, value) in values.into_iter().enumerate() {
        for to in recipients {
            let tx = sample_tx(i as u8, to, value, &[]);
            let receipt = sample_receipt(&tx, 21_000, vec![]);
            let explanation = explain(&tx, &receipt);

            assert_eq!(explanation.transaction_type, TxType::NativeTransfer);
            assert_eq!(explanation.balance_changes.len(), 2);

            let debited: U256 = explanation
                .balance_changes
                .iter()
                .filter(|c| c.direction == Direction::Debit)
                .fold(U256::ZERO, |total, c| total + c.amount);
            let credited: U256 = explanation
                .balance_changes
                .iter()
                .filter(|c| c.direction == Direction::Credit)
                .fold(U256::ZERO, |total, c| total + c.amount);
            assert_eq!(debited, credited);
            assert_eq!(debited, value);
        }
    }
}

/// Repeated explanations of the same pair are identical.
#[test]
fn explanation_is_deterministic() {
    let tx = sample_tx(
        1,
        addresses::PANCAKESWAP_ROUTER,
        U256::ZERO,
        &[0x38, 0xed, 0x17, 0x39],
    );
    let receipt = sample_receipt(
        &tx,
        140_000,
        vec![transfer_log(addresses::CAKE, sender(), stranger(), U256::from(7u64), 0)],
    );

    let first = explain(&tx, &receipt);
    for _ in 0..5 {
        let again = explain(&tx, &receipt);
        assert_eq!(again, first);
        assert_eq!(again.summary, first.summary);
    }
}

/// Efficiency stays in [0, 100] and every percentage maps to one rating.
#[test]
fn gas_efficiency_bounds_and_buckets() {
    let gas_limit = 1_000_000u64;
    let mut previous = EfficiencyRating::Poor;

    for step in 0..=1_000u64 {
        let gas_used = gas_limit * step / 1_000;
        let efficiency = gas_efficiency(gas_used, gas_limit);
        assert!((0.0..=100.0).contains(&efficiency), "{efficiency}");

        let rating = EfficiencyRating::from_efficiency(efficiency);
        assert!(rating >= previous, "ratings must not decrease");
        previous = rating;
    }

    assert_eq!(EfficiencyRating::from_efficiency(49.9), EfficiencyRating::Poor);
    assert_eq!(EfficiencyRating::from_efficiency(50.0), EfficiencyRating::Fair);
    assert_eq!(EfficiencyRating::from_efficiency(70.0), EfficiencyRating::Good);
    assert_eq!(EfficiencyRating::from_efficiency(90.0), EfficiencyRating::Excellent);
    assert_eq!(gas_efficiency(0, 0), 0.0);
}

/// Risk levels follow the score thresholds for every factor combination.
#[test]
fn risk_level_matches_score_thresholds() {
    let values = [U256::ZERO, U256::from(11u64) * U256::from(10u64).pow(U256::from(18))];
    let gas_prices = [WEI_PER_GWEI, 20 * WEI_PER_GWEI];
    let inputs: [&[u8]; 2] = [&[], &[0xa9, 0x05, 0x9c, 0xbb]];

    for value in values {
        for gas_price in gas_prices {
            for input in inputs {
                for with_logs in [false, true] {
                    let mut tx = sample_tx(1, stranger(), value, input);
                    tx.gas_price = gas_price;
                    let logs = if with_logs {
                        vec![transfer_log(
                            addresses::USDT,
                            sender(),
                            stranger(),
                            U256::from(1u64),
                            0,
                        )]
                    } else {
                        vec![]
                    };
                    let receipt = sample_receipt(&tx, 60_000, logs);

                    let risk = explain(&tx, &receipt).risk_analysis;
                    let expected = if risk.risk_score >= 5 {
                        RiskLevel::High
                    } else if risk.risk_score >= 3 {
                        RiskLevel::Medium
                    } else {
                        RiskLevel::Low
                    };
                    assert_eq!(risk.risk_level, expected, "score {}", risk.risk_score);
                    assert!(risk.risk_score <= 7);
                }
            }
        }
    }
}

/// Every malformed log shortens the output by one, and nothing panics.
#[test]
fn malformed_logs_never_abort_extraction() {
    let registry = StaticRegistry::bsc();

    let mut oversized = transfer_log(addresses::USDT, sender(), stranger(), U256::from(1u64), 3);
    oversized.data = vec![0xffu8; 33].into();
    let mut empty = transfer_log(addresses::USDT, sender(), stranger(), U256::from(1u64), 4);
    empty.data = Default::default();

    let logs = vec![
        truncated_transfer_log(addresses::USDT, 2, 0),
        transfer_log(addresses::CAKE, sender(), stranger(), U256::from(5u64), 1),
        truncated_transfer_log(addresses::USDT, 0, 2),
        oversized,
        empty,
        transfer_log(addresses::DAI, stranger(), sender(), U256::from(6u64), 5),
    ];

    let transfers = extract_token_transfers(&logs, &registry);

    assert_eq!(transfers.len(), 2);
    assert!(transfers.len() < logs.len());
    assert_eq!(transfers[0].symbol, "CAKE");
    assert_eq!(transfers[1].symbol, "DAI");
}
