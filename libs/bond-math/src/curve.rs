use bond_types::{KAPPA_WAD, MIN_PRICING_TIME, SECONDS_PER_YEAR, WAD};
use soroban_sdk::Env;

use crate::wad::{wad_div, wad_exp, wad_ln, wad_mul, wad_pow};

/// Convert a duration in seconds to a WAD fraction of a year
pub fn year_fraction(seconds: u64) -> u128 {
    (seconds as u128) * WAD / (SECONDS_PER_YEAR as u128)
}

/// Invariant curvature alpha(t) = 1 / (1 + kappa * t/Y).
/// Requires t >= MIN_PRICING_TIME.
pub fn alpha(env: &Env, time_to_maturity: u64) -> u128 {
    if time_to_maturity < MIN_PRICING_TIME {
        panic!("Time too small");
    }
    let tenor = year_fraction(time_to_maturity);
    wad_div(env, WAD, WAD + wad_mul(env, KAPPA_WAD, tenor))
}

/// Invariant scaling factor K(t, r*) = e^(-(t/Y) * r* * alpha(t)).
/// Same domain requirement as alpha.
pub fn scale_factor(env: &Env, time_to_maturity: u64, anchor_rate: u128) -> u128 {
    let a = alpha(env, time_to_maturity);
    let tenor = year_fraction(time_to_maturity);
    let exponent = wad_mul(env, wad_mul(env, tenor, anchor_rate), a);
    wad_div(env, WAD, wad_exp(env, exponent))
}

/// Discount factor p(t, r): exactly par at maturity, else e^(-r * t/Y).
/// Settlement may price arbitrarily close to maturity, so there is no
/// minimum-time requirement here.
pub fn discount_factor(env: &Env, time_to_maturity: u64, rate: u128) -> u128 {
    if time_to_maturity == 0 {
        return WAD;
    }
    let tenor = year_fraction(time_to_maturity);
    wad_div(env, WAD, wad_exp(env, wad_mul(env, rate, tenor)))
}

/// Instantaneous pool rate r(X, y, r*).
///
/// Bond-heavy pools quote above the anchor, cash-heavy pools below it:
///   X >= y: r = r* + kappa * ln(X/y)
///   X <  y: r = r* - kappa * ln(y/X), saturating at zero (rates are unsigned)
pub fn pool_rate(env: &Env, pv_bonds: u128, cash: u128, anchor_rate: u128) -> u128 {
    if pv_bonds == 0 || cash == 0 {
        panic!("Division by zero");
    }
    if pv_bonds >= cash {
        let premium = wad_mul(env, KAPPA_WAD, wad_ln(env, wad_div(env, pv_bonds, cash)));
        anchor_rate.checked_add(premium).expect("Overflow")
    } else {
        let rebate = wad_mul(env, KAPPA_WAD, wad_ln(env, wad_div(env, cash, pv_bonds)));
        anchor_rate.saturating_sub(rebate)
    }
}

/// The invariant constant C(X, y, t, r*) = K * X^alpha + y^alpha
pub fn invariant_constant(
    env: &Env,
    pv_bonds: u128,
    cash: u128,
    time_to_maturity: u64,
    anchor_rate: u128,
) -> u128 {
    let a = alpha(env, time_to_maturity);
    let k = scale_factor(env, time_to_maturity, anchor_rate);
    let bond_term = wad_mul(env, k, wad_pow(env, pv_bonds, a));
    let cash_term = wad_pow(env, cash, a);
    bond_term.checked_add(cash_term).expect("Overflow")
}
