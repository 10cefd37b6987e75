use bond_math::{pool_rate, wad_exp, wad_mul, year_fraction};
use soroban_sdk::Env;

use crate::oracle;
use crate::storage::{get_config, get_state, set_state};

/// Advance net liabilities from `last_accrual` to now: L <- L * e^(r * dt/Y).
///
/// Growth is skipped (the anchor point still advances) when there is nothing
/// to grow, when the feed is stale, or when a reserve is empty and the rate
/// undefined. Skipping on a stale feed prevents perpetual debt growth on a
/// dead oracle and keeps exits open.
pub fn accrue(env: &Env) {
    let mut state = get_state(env);
    let now = env.ledger().timestamp();
    let elapsed = now.saturating_sub(state.last_accrual);
    if elapsed == 0 {
        return;
    }

    state.last_accrual = now;

    if state.net_liabilities != 0 && state.cash != 0 && state.pv_bonds != 0 {
        let config = get_config(env);
        if !oracle::is_stale(env, &config.oracle) {
            let anchor = oracle::anchor_rate(env, &config.oracle);
            let rate = pool_rate(env, state.pv_bonds, state.cash, anchor);
            let growth = growth_factor(env, rate, elapsed);
            state.net_liabilities = wad_mul(env, state.net_liabilities, growth);
        }
    }

    set_state(env, &state);
}

/// e^(rate * elapsed/Y): the compounding factor shared by pool-level accrual
/// and the per-position grown-liability release. Keeping the two on the same
/// formula is what lets the sum of releases track the accrued growth.
pub fn growth_factor(env: &Env, rate: u128, elapsed: u64) -> u128 {
    wad_exp(env, wad_mul(env, rate, year_fraction(elapsed)))
}
