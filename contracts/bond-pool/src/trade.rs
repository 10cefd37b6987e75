use bond_math::{bond_delta_for_cash, discount_factor, pool_rate, wad_mul, wad_mul_up};
use bond_types::{PoolParams, PoolState, Position, PositionKind};
use soroban_sdk::{token, Address, Env, Symbol};

use crate::invariants;
use crate::oracle;
use crate::storage::{allocate_position, get_config, get_params, get_state, set_state};
use crate::to_token_amount;

/// Open a lend position: cash in now, a face-value claim at maturity.
pub fn execute_lend(env: &Env, lender: Address, amount: u128, maturity: u64) -> u64 {
    if amount == 0 {
        panic!("Amount must be positive");
    }
    let config = get_config(env);
    let params = get_params(env);
    let mut state = get_state(env);
    let now = env.ledger().timestamp();
    let tenor = validate_maturity(&params, now, maturity);

    // origination prices only on a fresh feed
    let anchor = oracle::current_rate(env, &config.oracle);

    let face_value =
        bond_delta_for_cash(env, amount, state.pv_bonds, state.cash, tenor, anchor, true);
    let rate = pool_rate(env, state.pv_bonds, state.cash, anchor);
    let price = discount_factor(env, tenor, rate);
    let pv = wad_mul(env, face_value, price);

    state.cash = state.cash.checked_add(amount).expect("Overflow");
    state.pv_bonds = match state.pv_bonds.checked_sub(pv) {
        Some(v) => v,
        None => panic!("Invalid trade"),
    };
    set_state(env, &state);

    token::Client::new(env, &config.token).transfer(
        &lender,
        &env.current_contract_address(),
        &to_token_amount(amount),
    );

    let position = Position {
        owner: lender.clone(),
        face_value,
        maturity,
        collateral: 0,
        initial_pv: pv,
        created_at: now,
        kind: PositionKind::Lend,
        active: true,
    };
    let id = allocate_position(env, &position);

    require_solvent(env, &state, &params);

    env.events().publish(
        (Symbol::new(env, "lend"),),
        (id, lender, amount, face_value, maturity),
    );
    id
}

/// Open a borrow position: cash out now against collateral, face value owed
/// at maturity.
pub fn execute_borrow(
    env: &Env,
    borrower: Address,
    amount: u128,
    maturity: u64,
    collateral: u128,
) -> u64 {
    if amount == 0 {
        panic!("Amount must be positive");
    }
    let config = get_config(env);
    let params = get_params(env);
    let mut state = get_state(env);
    let now = env.ledger().timestamp();
    let tenor = validate_maturity(&params, now, maturity);

    let required = wad_mul_up(env, params.collateral_ratio, amount);
    if !invariants::collateral_sufficient(collateral, required) {
        panic!("Insufficient collateral");
    }
    if state.cash < amount {
        panic!("Insufficient liquidity");
    }

    let anchor = oracle::current_rate(env, &config.oracle);

    let face_value =
        bond_delta_for_cash(env, amount, state.pv_bonds, state.cash, tenor, anchor, false);
    let rate = pool_rate(env, state.pv_bonds, state.cash, anchor);
    let price = discount_factor(env, tenor, rate);
    // owed to the pool: round the booked liability up
    let pv = wad_mul_up(env, face_value, price);

    state.cash -= amount;
    state.pv_bonds = state.pv_bonds.checked_add(pv).expect("Overflow");
    state.net_liabilities = state.net_liabilities.checked_add(pv).expect("Overflow");
    set_state(env, &state);

    let client = token::Client::new(env, &config.token);
    let pool_address = env.current_contract_address();
    client.transfer(&borrower, &pool_address, &to_token_amount(collateral));
    client.transfer(&pool_address, &borrower, &to_token_amount(amount));

    let position = Position {
        owner: borrower.clone(),
        face_value,
        maturity,
        collateral,
        initial_pv: pv,
        created_at: now,
        kind: PositionKind::Borrow,
        active: true,
    };
    let id = allocate_position(env, &position);

    require_solvent(env, &state, &params);

    env.events().publish(
        (Symbol::new(env, "borrow"),),
        (id, borrower, amount, face_value, maturity, collateral),
    );
    id
}

/// Check the origination tenor window; returns the tenor in seconds
pub fn validate_maturity(params: &PoolParams, now: u64, maturity: u64) -> u64 {
    if maturity <= now {
        panic!("Invalid maturity");
    }
    let tenor = maturity - now;
    if !invariants::maturity_in_range(tenor, params.min_maturity, params.max_maturity) {
        panic!("Invalid maturity");
    }
    tenor
}

/// Solvency post-check: cash + liabilities must stay above theta * y0
fn require_solvent(env: &Env, state: &PoolState, params: &PoolParams) {
    let floor = wad_mul(env, params.solvency_threshold, state.initial_cash);
    if !invariants::solvency_holds(state.cash, state.net_liabilities, floor) {
        panic!("Insolvent");
    }
}
