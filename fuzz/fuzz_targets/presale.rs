#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use presale::{Asset, Phase, PresaleConfig, PresaleContract, PresaleContractClient, LAST_PHASE};
use price_feed::{PriceFeedContract, PriceFeedContractClient};
use soroban_sdk::{
    testutils::{Address as _, Ledger as _},
    token::StellarAssetClient,
    vec, Address, Env, String,
};

const ONE: i128 = 10_000_000;
const END: u64 = 100_000;
const MAX_SUPPLY: i128 = 5_880_000 * ONE;

#[derive(Arbitrary, Debug)]
pub enum FuzzAction {
    BuyToken { amount: i64, second_asset: bool },
    BuyNative { amount: i64 },
    Claim,
    WithdrawFees { native: bool },
    Blacklist { flag: bool },
    Wait { seconds: u16 },
    Reprice { answer: i64 },
}

fuzz_target!(|actions: Vec<FuzzAction>| {
    let env = Env::default();
    env.mock_all_auths();
    env.ledger().set_timestamp(1_000);

    let issuer = Address::generate(&env);
    let sale_token = env.register_stellar_asset_contract_v2(issuer.clone()).address();
    let native = env.register_stellar_asset_contract_v2(issuer.clone()).address();
    let usdc = env.register_stellar_asset_contract_v2(issuer.clone()).address();
    let usdt = env.register_stellar_asset_contract_v2(issuer).address();

    let feed_admin = Address::generate(&env);
    let feed = PriceFeedContractClient::new(&env, &env.register(PriceFeedContract, ()));
    feed.initialize(&feed_admin, &8, &String::from_str(&env, "XLM / USD"), &10_000_000);

    let client = PresaleContractClient::new(&env, &env.register(PresaleContract, ()));
    let owner = Address::generate(&env);
    let config = PresaleConfig {
        sale_token: sale_token.clone(),
        native_asset: native.clone(),
        price_feed: feed.address.clone(),
        funds_receiver: Address::generate(&env),
        payment_assets: vec![&env, usdc.clone(), usdt.clone()],
        starting_time: 1_000,
        ending_time: END,
        max_supply: MAX_SUPPLY,
        fee_bps: 200,
    };
    let phases = vec![
        &env,
        Phase { supply_cap: 1_960_000 * ONE, price: 5_000, deadline: 10_000 },
        Phase { supply_cap: 3_920_000 * ONE, price: 10_000, deadline: 20_000 },
        Phase { supply_cap: MAX_SUPPLY, price: 20_000, deadline: END },
    ];
    client.initialize(&owner, &config, &phases);
    StellarAssetClient::new(&env, &sale_token).mint(&client.address, &MAX_SUPPLY);

    let users: Vec<Address> = (0..4).map(|_| Address::generate(&env)).collect();
    let mut last_phase = 0u32;

    // Arbitrary amounts, clock moves and oracle answers must only ever yield
    // contract errors, never host panics or broken accounting.
    for (i, action) in actions.into_iter().enumerate() {
        let caller = users[i % users.len()].clone();
        match action {
            FuzzAction::BuyToken { amount, second_asset } => {
                let asset = if second_asset { &usdt } else { &usdc };
                let amount = amount as i128;
                if amount > 0 {
                    StellarAssetClient::new(&env, asset).mint(&caller, &amount);
                }
                let _ = client.try_purchase_with_payment_asset(&caller, asset, &amount);
            }
            FuzzAction::BuyNative { amount } => {
                let amount = amount as i128;
                if amount > 0 {
                    StellarAssetClient::new(&env, &native).mint(&caller, &amount);
                }
                let _ = client.try_purchase_with_native(&caller, &amount);
            }
            FuzzAction::Claim => {
                let _ = client.try_claim(&caller);
            }
            FuzzAction::WithdrawFees { native } => {
                let asset = if native { Asset::Native } else { Asset::Token(usdc.clone()) };
                let _ = client.try_withdraw_fees(&owner, &asset);
            }
            FuzzAction::Blacklist { flag } => {
                let _ = client.try_set_blacklisted(&owner, &caller, &flag);
            }
            FuzzAction::Wait { seconds } => {
                let now = env.ledger().timestamp();
                env.ledger().set_timestamp(now + seconds as u64);
            }
            FuzzAction::Reprice { answer } => {
                let _ = feed.try_set_answer(&feed_admin, &(answer as i128));
            }
        }

        let phase = client.current_phase();
        assert!(phase >= last_phase && phase <= LAST_PHASE);
        last_phase = phase;
        assert!(client.total_sold() <= MAX_SUPPLY);
    }
});
