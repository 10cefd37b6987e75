#![no_std]

mod accrual;
mod guard;
mod invariants;
mod oracle;
mod settle;
mod storage;
mod trade;

use bond_math::{bond_delta_for_cash, pool_rate, wad_mul};
use bond_types::{
    PoolConfig, PoolParams, PoolState, Position, CONFIGURABLE_RATE_CAP, COLLATERAL_RATIO_MAX,
    COLLATERAL_RATIO_MIN, GRACE_PERIOD_MAX, GRACE_PERIOD_MIN, MAX_MATURITY_CEILING,
    MIN_MATURITY_FLOOR, SOLVENCY_THRESHOLD_MAX, SOLVENCY_THRESHOLD_MIN,
};
use soroban_sdk::{contract, contractimpl, token, Address, Env, Symbol};
use storage::{
    get_config, get_params, get_position, get_state, is_initialized, next_position_id, set_config,
    set_params, set_paused, set_state,
};

#[contract]
pub struct BondPool;

#[contractimpl]
impl BondPool {
    /// Seed the pool: cash and bond inventory both start at `initial_cash`,
    /// transferred in from the admin. One-time.
    pub fn initialize(
        env: Env,
        admin: Address,
        token: Address,
        oracle: Address,
        initial_cash: u128,
    ) {
        if is_initialized(&env) {
            panic!("Already initialized");
        }
        admin.require_auth();
        if initial_cash == 0 {
            panic!("Amount must be positive");
        }

        let now = env.ledger().timestamp();
        set_config(
            &env,
            &PoolConfig {
                admin: admin.clone(),
                token: token.clone(),
                oracle,
            },
        );
        set_params(&env, &PoolParams::starting());
        set_state(&env, &PoolState::new(initial_cash, now));

        token::Client::new(&env, &token).transfer(
            &admin,
            &env.current_contract_address(),
            &to_token_amount(initial_cash),
        );

        env.events()
            .publish((Symbol::new(&env, "initialized"),), (admin, initial_cash));
    }

    /// Deposit cash, receive a claim on `face_value` at `maturity`.
    /// Returns the position id.
    pub fn lend(env: Env, lender: Address, amount: u128, maturity: u64) -> u64 {
        lender.require_auth();
        guard::enter(&env);
        require_initialized(&env);
        require_not_paused(&env);
        guard::check_same_ledger(&env, &lender);
        accrual::accrue(&env);
        let id = trade::execute_lend(&env, lender, amount, maturity);
        guard::exit(&env);
        id
    }

    /// Receive cash against collateral, owing `face_value` at `maturity`.
    /// Returns the position id.
    pub fn borrow(
        env: Env,
        borrower: Address,
        amount: u128,
        maturity: u64,
        collateral: u128,
    ) -> u64 {
        borrower.require_auth();
        guard::enter(&env);
        require_initialized(&env);
        require_not_paused(&env);
        guard::check_same_ledger(&env, &borrower);
        accrual::accrue(&env);
        let id = trade::execute_borrow(&env, borrower, amount, maturity, collateral);
        guard::exit(&env);
        id
    }

    /// Settle a matured lend position at par. Never blocked by pause.
    pub fn redeem(env: Env, caller: Address, id: u64) {
        caller.require_auth();
        guard::enter(&env);
        require_initialized(&env);
        guard::check_same_ledger(&env, &caller);
        accrual::accrue(&env);
        settle::execute_redeem(&env, caller, id);
        guard::exit(&env);
    }

    /// Close a borrow position at any time: par at or past maturity,
    /// discounted before it. Never blocked by pause or a stale feed.
    pub fn repay(env: Env, caller: Address, id: u64) {
        caller.require_auth();
        guard::enter(&env);
        require_initialized(&env);
        guard::check_same_ledger(&env, &caller);
        accrual::accrue(&env);
        settle::execute_repay(&env, caller, id);
        guard::exit(&env);
    }

    /// Seize a defaulted borrow after the grace period. Anyone may invoke.
    pub fn liquidate(env: Env, liquidator: Address, id: u64) {
        liquidator.require_auth();
        guard::enter(&env);
        require_initialized(&env);
        require_not_paused(&env);
        guard::check_same_ledger(&env, &liquidator);
        accrual::accrue(&env);
        settle::execute_liquidate(&env, liquidator, id);
        guard::exit(&env);
    }

    // === Administration ===

    /// Halt origination and liquidation. Exits stay open.
    pub fn pause(env: Env) {
        require_admin(&env);
        set_paused(&env, true);
        env.events().publish((Symbol::new(&env, "paused"),), ());
    }

    pub fn unpause(env: Env) {
        require_admin(&env);
        set_paused(&env, false);
        env.events().publish((Symbol::new(&env, "unpaused"),), ());
    }

    pub fn set_min_maturity(env: Env, value: u64) {
        require_admin(&env);
        let mut params = get_params(&env);
        if value < MIN_MATURITY_FLOOR || value >= params.max_maturity {
            panic!("Invalid parameter");
        }
        params.min_maturity = value;
        set_params(&env, &params);
        env.events()
            .publish((Symbol::new(&env, "set_min_maturity"),), (value,));
    }

    pub fn set_max_maturity(env: Env, value: u64) {
        require_admin(&env);
        let mut params = get_params(&env);
        if value <= params.min_maturity || value > MAX_MATURITY_CEILING {
            panic!("Invalid parameter");
        }
        params.max_maturity = value;
        set_params(&env, &params);
        env.events()
            .publish((Symbol::new(&env, "set_max_maturity"),), (value,));
    }

    pub fn set_collateral_ratio(env: Env, value: u128) {
        require_admin(&env);
        if value < COLLATERAL_RATIO_MIN || value > COLLATERAL_RATIO_MAX {
            panic!("Invalid parameter");
        }
        let mut params = get_params(&env);
        params.collateral_ratio = value;
        set_params(&env, &params);
        env.events()
            .publish((Symbol::new(&env, "set_collateral_ratio"),), (value,));
    }

    pub fn set_solvency_threshold(env: Env, value: u128) {
        require_admin(&env);
        if value < SOLVENCY_THRESHOLD_MIN || value > SOLVENCY_THRESHOLD_MAX {
            panic!("Invalid parameter");
        }
        let mut params = get_params(&env);
        params.solvency_threshold = value;
        set_params(&env, &params);
        env.events()
            .publish((Symbol::new(&env, "set_solvency_threshold"),), (value,));
    }

    pub fn set_grace_period(env: Env, value: u64) {
        require_admin(&env);
        if value < GRACE_PERIOD_MIN || value > GRACE_PERIOD_MAX {
            panic!("Invalid parameter");
        }
        let mut params = get_params(&env);
        params.grace_period = value;
        set_params(&env, &params);
        env.events()
            .publish((Symbol::new(&env, "set_grace_period"),), (value,));
    }

    pub fn set_liquidation_penalty(env: Env, value: u128) {
        require_admin(&env);
        if value > CONFIGURABLE_RATE_CAP {
            panic!("Invalid parameter");
        }
        let mut params = get_params(&env);
        params.liquidation_penalty = value;
        set_params(&env, &params);
        env.events()
            .publish((Symbol::new(&env, "set_liquidation_penalty"),), (value,));
    }

    pub fn set_fallback_rate(env: Env, value: u128) {
        require_admin(&env);
        if value > CONFIGURABLE_RATE_CAP {
            panic!("Invalid parameter");
        }
        let mut params = get_params(&env);
        params.fallback_rate = value;
        set_params(&env, &params);
        env.events()
            .publish((Symbol::new(&env, "set_fallback_rate"),), (value,));
    }

    pub fn set_oracle(env: Env, oracle: Address) {
        require_admin(&env);
        let mut config = get_config(&env);
        config.oracle = oracle.clone();
        set_config(&env, &config);
        env.events()
            .publish((Symbol::new(&env, "set_oracle"),), (oracle,));
    }

    // === Queries ===

    /// Cash held by the pool (y)
    pub fn cash(env: Env) -> u128 {
        get_state(&env).cash
    }

    /// Present value of the bond inventory (X)
    pub fn pv_bonds(env: Env) -> u128 {
        get_state(&env).pv_bonds
    }

    /// Present value of outstanding debts (L), as of the last accrual
    pub fn net_liabilities(env: Env) -> u128 {
        get_state(&env).net_liabilities
    }

    /// Cash at initialization (y0)
    pub fn initial_cash(env: Env) -> u128 {
        get_state(&env).initial_cash
    }

    /// Ledger time of the last liability accrual
    pub fn last_accrual(env: Env) -> u64 {
        get_state(&env).last_accrual
    }

    /// Whether cash + liabilities sit above theta * y0
    pub fn check_solvency(env: Env) -> bool {
        let state = get_state(&env);
        let params = get_params(&env);
        let floor = wad_mul(&env, params.solvency_threshold, state.initial_cash);
        invariants::solvency_holds(state.cash, state.net_liabilities, floor)
    }

    /// Instantaneous pool rate r(X, y, r*). Fails on a stale feed.
    pub fn current_rate(env: Env) -> u128 {
        let config = get_config(&env);
        let state = get_state(&env);
        let anchor = oracle::current_rate(&env, &config.oracle);
        pool_rate(&env, state.pv_bonds, state.cash, anchor)
    }

    /// The oracle's anchor rate r*. Fails on a stale feed.
    pub fn anchor_rate(env: Env) -> u128 {
        let config = get_config(&env);
        oracle::current_rate(&env, &config.oracle)
    }

    /// Position record by id; None for an unknown id
    pub fn get_position(env: Env, id: u64) -> Option<Position> {
        get_position(&env, id)
    }

    /// Id the next position will receive
    pub fn next_position_id(env: Env) -> u64 {
        next_position_id(&env)
    }

    pub fn get_config(env: Env) -> PoolConfig {
        get_config(&env)
    }

    pub fn get_params(env: Env) -> PoolParams {
        get_params(&env)
    }

    pub fn is_paused(env: Env) -> bool {
        storage::is_paused(&env)
    }

    /// Face value a lend of `amount` until `maturity` would buy right now,
    /// without executing it. Fails on a stale feed, like origination.
    pub fn quote_lend(env: Env, amount: u128, maturity: u64) -> u128 {
        let config = get_config(&env);
        let params = get_params(&env);
        let state = get_state(&env);
        let now = env.ledger().timestamp();
        let tenor = trade::validate_maturity(&params, now, maturity);
        let anchor = oracle::current_rate(&env, &config.oracle);
        bond_delta_for_cash(&env, amount, state.pv_bonds, state.cash, tenor, anchor, true)
    }

    /// Face value a borrow of `amount` until `maturity` would owe right now
    pub fn quote_borrow(env: Env, amount: u128, maturity: u64) -> u128 {
        let config = get_config(&env);
        let params = get_params(&env);
        let state = get_state(&env);
        let now = env.ledger().timestamp();
        let tenor = trade::validate_maturity(&params, now, maturity);
        let anchor = oracle::current_rate(&env, &config.oracle);
        bond_delta_for_cash(&env, amount, state.pv_bonds, state.cash, tenor, anchor, false)
    }
}

// === Helpers ===

fn require_initialized(env: &Env) {
    if !is_initialized(env) {
        panic!("Not initialized");
    }
}

fn require_not_paused(env: &Env) {
    if storage::is_paused(env) {
        panic!("Paused");
    }
}

fn require_admin(env: &Env) {
    let config = get_config(env);
    config.admin.require_auth();
}

/// Pool amounts share the token's base-unit scale; the ledger takes i128
pub(crate) fn to_token_amount(amount: u128) -> i128 {
    if amount > i128::MAX as u128 {
        panic!("Overflow");
    }
    amount as i128
}
