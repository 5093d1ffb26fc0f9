//! Shared deployment for the contract-level property suites.

use presale::{Phase, PresaleConfig, PresaleContract, PresaleContractClient};
use price_feed::{PriceFeedContract, PriceFeedContractClient};
use soroban_sdk::{
    testutils::{Address as _, Ledger as _},
    token::{Client as TokenClient, StellarAssetClient},
    vec, Address, Env, String,
};

/// One whole unit of a Stellar Asset Contract token (7 decimals).
pub const ONE: i128 = 10_000_000;
pub const START: u64 = 1_000;
pub const END: u64 = 100_000;
pub const NATIVE_PRICE: i128 = 10_000_000;
pub const MAX_SUPPLY: i128 = 5_880_000 * ONE;

pub struct Harness {
    pub env: Env,
    pub client: PresaleContractClient<'static>,
    pub feed: PriceFeedContractClient<'static>,
    pub feed_admin: Address,
    pub owner: Address,
    pub receiver: Address,
    pub sale_token: Address,
    pub native: Address,
    pub usdc: Address,
    pub usdt: Address,
}

impl Harness {
    pub fn mint(&self, token: &Address, to: &Address, amount: i128) {
        StellarAssetClient::new(&self.env, token).mint(to, &amount);
    }

    pub fn balance(&self, token: &Address, of: &Address) -> i128 {
        TokenClient::new(&self.env, token).balance(of)
    }

    pub fn funded_buyer(&self, token: &Address, amount: i128) -> Address {
        let buyer = Address::generate(&self.env);
        self.mint(token, &buyer, amount);
        buyer
    }

    pub fn now(&self) -> u64 {
        self.env.ledger().timestamp()
    }

    pub fn set_time(&self, timestamp: u64) {
        self.env.ledger().set_timestamp(timestamp);
    }
}

/// Deploys and initializes a sale charging `fee_bps` on every purchase.
pub fn setup(fee_bps: u32) -> Harness {
    let env = Env::default();
    env.mock_all_auths();
    env.ledger().set_timestamp(START);

    let issuer = Address::generate(&env);
    let sale_token = env.register_stellar_asset_contract_v2(issuer.clone()).address();
    let native = env.register_stellar_asset_contract_v2(issuer.clone()).address();
    let usdc = env.register_stellar_asset_contract_v2(issuer.clone()).address();
    let usdt = env.register_stellar_asset_contract_v2(issuer).address();

    let feed_admin = Address::generate(&env);
    let feed = PriceFeedContractClient::new(&env, &env.register(PriceFeedContract, ()));
    feed.initialize(
        &feed_admin,
        &8,
        &String::from_str(&env, "XLM / USD"),
        &NATIVE_PRICE,
    );

    let client = PresaleContractClient::new(&env, &env.register(PresaleContract, ()));
    let owner = Address::generate(&env);
    let receiver = Address::generate(&env);

    let config = PresaleConfig {
        sale_token: sale_token.clone(),
        native_asset: native.clone(),
        price_feed: feed.address.clone(),
        funds_receiver: receiver.clone(),
        payment_assets: vec![&env, usdc.clone(), usdt.clone()],
        starting_time: START,
        ending_time: END,
        max_supply: MAX_SUPPLY,
        fee_bps,
    };
    let phases = vec![
        &env,
        Phase {
            supply_cap: 1_960_000 * ONE,
            price: 5_000,
            deadline: 10_000,
        },
        Phase {
            supply_cap: 3_920_000 * ONE,
            price: 10_000,
            deadline: 20_000,
        },
        Phase {
            supply_cap: MAX_SUPPLY,
            price: 20_000,
            deadline: END,
        },
    ];
    client.initialize(&owner, &config, &phases);

    Harness {
        env,
        client,
        feed,
        feed_admin,
        owner,
        receiver,
        sale_token,
        native,
        usdc,
        usdt,
    }
}
