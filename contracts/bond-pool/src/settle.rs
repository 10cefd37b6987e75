use bond_math::{discount_factor, pool_rate, wad_mul, wad_mul_up};
use bond_types::{Position, PositionKind};
use soroban_sdk::{token, Address, Env, Symbol};

use crate::accrual::growth_factor;
use crate::oracle;
use crate::storage::{get_config, get_params, get_position, get_state, set_position, set_state};
use crate::to_token_amount;

/// Settle a matured lend position at par.
pub fn execute_redeem(env: &Env, caller: Address, id: u64) {
    let config = get_config(env);
    let mut state = get_state(env);
    let now = env.ledger().timestamp();

    let mut position = active_position(env, id);
    if position.owner != caller {
        panic!("Not position owner");
    }
    if position.kind != PositionKind::Lend {
        panic!("Wrong position kind");
    }
    if now < position.maturity {
        panic!("Not matured");
    }

    // par payout: the cash leaving is matched by the bond claim released
    // back into inventory, so equity is preserved
    state.cash = match state.cash.checked_sub(position.face_value) {
        Some(v) => v,
        None => panic!("Insufficient liquidity"),
    };
    state.pv_bonds = state
        .pv_bonds
        .checked_add(position.face_value)
        .expect("Overflow");
    set_state(env, &state);

    position.active = false;
    set_position(env, id, &position);

    token::Client::new(env, &config.token).transfer(
        &env.current_contract_address(),
        &caller,
        &to_token_amount(position.face_value),
    );

    env.events().publish(
        (Symbol::new(env, "redeem"),),
        (id, caller, position.face_value),
    );
}

/// Close a borrow position: par at or past maturity, discounted before it.
/// Never blocked by pause or a stale feed.
pub fn execute_repay(env: &Env, caller: Address, id: u64) {
    let config = get_config(env);
    let params = get_params(env);
    let mut state = get_state(env);
    let now = env.ledger().timestamp();

    let mut position = active_position(env, id);
    if position.owner != caller {
        panic!("Not position owner");
    }
    if !position.is_borrow() {
        panic!("Wrong position kind");
    }

    let rate_source = settlement_rate(env, &config.oracle, params.fallback_rate);

    let repay_amount = if now >= position.maturity {
        position.face_value
    } else {
        let tenor = position.maturity - now;
        let rate = pool_rate(env, state.pv_bonds, state.cash, rate_source);
        // owed to the pool: round up
        wad_mul_up(env, position.face_value, discount_factor(env, tenor, rate))
    };
    let current_pv = repay_amount;

    let grown = grown_liability(env, &state, &position, rate_source, now);

    state.cash = state.cash.checked_add(repay_amount).expect("Overflow");
    state.pv_bonds = state.pv_bonds.saturating_sub(current_pv);
    state.net_liabilities = state.net_liabilities.saturating_sub(grown);
    set_state(env, &state);

    position.active = false;
    set_position(env, id, &position);

    let client = token::Client::new(env, &config.token);
    let pool_address = env.current_contract_address();
    client.transfer(&caller, &pool_address, &to_token_amount(repay_amount));
    if position.collateral > 0 {
        client.transfer(&pool_address, &caller, &to_token_amount(position.collateral));
    }

    env.events().publish(
        (Symbol::new(env, "repay"),),
        (id, caller, repay_amount, position.collateral),
    );
}

/// Seize a defaulted borrow after the grace period. Permissionless; the
/// entire collateral is absorbed into the pool with no refund.
pub fn execute_liquidate(env: &Env, liquidator: Address, id: u64) {
    let config = get_config(env);
    let params = get_params(env);
    let mut state = get_state(env);
    let now = env.ledger().timestamp();

    let position_snapshot = active_position(env, id);
    if !position_snapshot.is_borrow() {
        panic!("Wrong position kind");
    }
    let deadline = position_snapshot
        .maturity
        .checked_add(params.grace_period)
        .expect("Overflow");
    if now <= deadline {
        panic!("Grace period not expired");
    }

    let rate_source = settlement_rate(env, &config.oracle, params.fallback_rate);

    let mut position = position_snapshot;
    let debt = position.face_value;
    let penalty = wad_mul(env, debt, params.liquidation_penalty);
    let grown = grown_liability(env, &state, &position, rate_source, now);

    // collateral is already held by the pool; no transfer either way
    state.cash = state.cash.checked_add(position.collateral).expect("Overflow");
    state.pv_bonds = state.pv_bonds.saturating_sub(debt);
    state.net_liabilities = state.net_liabilities.saturating_sub(grown);
    set_state(env, &state);

    position.active = false;
    set_position(env, id, &position);

    env.events().publish(
        (Symbol::new(env, "liquidated"),),
        (
            id,
            liquidator,
            position.owner.clone(),
            debt,
            position.collateral,
            penalty,
        ),
    );
}

/// The grown value of a borrow's liability at exit: the creation-time PV
/// compounded at the current pool rate over the position's lifetime. An
/// approximation of the pool-level accrual this position contributed;
/// subtraction from L saturates rather than underflows.
fn grown_liability(
    env: &Env,
    state: &bond_types::PoolState,
    position: &Position,
    rate_source: u128,
    now: u64,
) -> u128 {
    let avg_rate = pool_rate(env, state.pv_bonds, state.cash, rate_source);
    let elapsed = now.saturating_sub(position.created_at);
    wad_mul(env, position.initial_pv, growth_factor(env, avg_rate, elapsed))
}

/// Fail-open rate for settlement pricing; reports fallback substitution.
fn settlement_rate(env: &Env, oracle_address: &Address, fallback_rate: u128) -> u128 {
    let (rate, used_fallback) = oracle::safe_rate(env, oracle_address, fallback_rate);
    if used_fallback {
        env.events()
            .publish((Symbol::new(env, "fallback_rate"),), (rate,));
    }
    rate
}

fn active_position(env: &Env, id: u64) -> Position {
    match get_position(env, id) {
        Some(position) if position.active => position,
        _ => panic!("Position not active"),
    }
}
