#![allow(clippy::unwrap_used, clippy::expect_used, clippy::arithmetic_side_effects)]
//! Property-based tests for settlement after the sale window.
//!
//! Invariants tested:
//! - Every buyer claims exactly their deposit, once
//! - The claims of all buyers add up to `total_sold`
//! - A funded inventory of `total_sold` is drained to zero by the claims
//! - Nothing can be claimed while the sale is still open

use presale::ContractError;
use proptest::prelude::*;
use soroban_sdk::Address;

use crate::harness::{setup, END, ONE};

proptest! {
    #![proptest_config(ProptestConfig::with_cases(24))]

    #[test]
    fn prop_claims_drain_exactly_total_sold(
        purchases in proptest::collection::vec(1i128..=8_000i128, 1..8),
    ) {
        let sale = setup(200);
        let mut buyers: Vec<(Address, i128)> = Vec::new();

        for whole in purchases {
            let amount = whole * ONE;
            let buyer = sale.funded_buyer(&sale.usdc, amount);
            let quote = sale.client.purchase_with_payment_asset(&buyer, &sale.usdc, &amount);
            buyers.push((buyer, quote.tokens));
        }

        let total = sale.client.total_sold();
        sale.mint(&sale.sale_token, &sale.owner, total);
        sale.client.deposit_sale_tokens(&sale.owner, &total);
        sale.set_time(END + 1);

        let mut claimed = 0i128;
        for (buyer, tokens) in buyers.iter() {
            let amount = sale.client.claim(buyer);
            prop_assert_eq!(amount, *tokens);
            prop_assert_eq!(sale.balance(&sale.sale_token, buyer), *tokens);
            claimed += amount;

            match sale.client.try_claim(buyer) {
                Err(Ok(e)) => prop_assert_eq!(e, ContractError::NothingToClaim),
                _ => prop_assert!(false, "second claim must fail"),
            }
        }

        prop_assert_eq!(claimed, total);
        prop_assert_eq!(sale.balance(&sale.sale_token, &sale.client.address), 0);
    }

    #[test]
    fn prop_no_claim_while_open(
        whole in 1i128..=8_000i128,
        offset in 0u64..=(END - 2_000),
    ) {
        let sale = setup(200);
        let amount = whole * ONE;
        let buyer = sale.funded_buyer(&sale.usdc, amount);
        let quote = sale.client.purchase_with_payment_asset(&buyer, &sale.usdc, &amount);

        sale.set_time(sale.now() + offset);
        match sale.client.try_claim(&buyer) {
            Err(Ok(e)) => prop_assert_eq!(e, ContractError::ClaimPeriodNotStarted),
            _ => prop_assert!(false, "claim before the end must fail"),
        }
        prop_assert_eq!(sale.client.deposited_of(&buyer), quote.tokens);
    }
}
