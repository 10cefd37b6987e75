use soroban_sdk::{Address, Env, IntoVal, Symbol};

/// Raw anchor-rate read from the external publisher
pub fn anchor_rate(env: &Env, oracle: &Address) -> u128 {
    env.invoke_contract(oracle, &Symbol::new(env, "get_rate"), ().into_val(env))
}

/// The publisher's own staleness verdict
pub fn is_stale(env: &Env, oracle: &Address) -> bool {
    env.invoke_contract(oracle, &Symbol::new(env, "is_stale"), ().into_val(env))
}

/// Fail-closed read: origination paths must not price on stale data
pub fn current_rate(env: &Env, oracle: &Address) -> u128 {
    if is_stale(env, oracle) {
        panic!("Oracle rate is stale");
    }
    anchor_rate(env, oracle)
}

/// Fail-open read: settlement paths substitute the configured fallback so a
/// dead feed cannot trap users in their positions. Returns the rate and
/// whether the fallback was used, so the caller can report it.
pub fn safe_rate(env: &Env, oracle: &Address, fallback_rate: u128) -> (u128, bool) {
    if is_stale(env, oracle) {
        (fallback_rate, true)
    } else {
        (anchor_rate(env, oracle), false)
    }
}
