use bond_types::WAD;
use soroban_sdk::Env;

use crate::curve::{alpha, invariant_constant, scale_factor};
use crate::wad::{wad_div, wad_mul, wad_pow};

/// Solve the invariant K*x^a + y^a = C for the bond-side move matching a
/// cash-side move of `cash_amount`: y' = y +/- cash_amount,
/// x' = ((C - y'^a) / K)^(1/a), returns |x' - X|.
///
/// `add_cash = true` is the lend direction (cash enters, the returned delta
/// is the face the pool will owe, rounded down); `add_cash = false` is the
/// borrow direction (cash leaves, the returned delta is the face the
/// borrower will owe, rounded up).
pub fn bond_delta_for_cash(
    env: &Env,
    cash_amount: u128,
    pv_bonds: u128,
    cash: u128,
    time_to_maturity: u64,
    anchor_rate: u128,
    add_cash: bool,
) -> u128 {
    if cash_amount == 0 {
        panic!("Amount must be positive");
    }
    let a = alpha(env, time_to_maturity);
    let k = scale_factor(env, time_to_maturity, anchor_rate);
    let c = invariant_constant(env, pv_bonds, cash, time_to_maturity, anchor_rate);

    let cash_after = if add_cash {
        cash.checked_add(cash_amount).expect("Overflow")
    } else {
        match cash.checked_sub(cash_amount) {
            Some(v) => v,
            None => panic!("Invalid trade"),
        }
    };
    if cash_after == 0 {
        panic!("Invalid trade");
    }

    let cash_term = wad_pow(env, cash_after, a);
    if cash_term >= c {
        panic!("Invalid trade");
    }
    let bond_term = wad_div(env, c - cash_term, k);
    let bonds_after = wad_pow(env, bond_term, wad_div(env, WAD, a));
    if bonds_after == 0 {
        panic!("Invalid trade");
    }

    let delta = bonds_after.max(pv_bonds) - bonds_after.min(pv_bonds);
    if add_cash {
        delta
    } else {
        // owed to the pool: round against the trader
        delta.checked_add(1).expect("Overflow")
    }
}

/// Solve the invariant for the cash-side move matching a bond-side move of
/// `bond_amount`: x' = X +/- bond_amount, y' = (C - K*x'^a)^(1/a),
/// returns |y' - y|.
///
/// `add_bonds = true` means bonds enter the pool and cash leaves (rounded
/// down); `add_bonds = false` means bonds leave and the cash owed to the
/// pool is rounded up.
pub fn cash_delta_for_bonds(
    env: &Env,
    bond_amount: u128,
    pv_bonds: u128,
    cash: u128,
    time_to_maturity: u64,
    anchor_rate: u128,
    add_bonds: bool,
) -> u128 {
    if bond_amount == 0 {
        panic!("Amount must be positive");
    }
    let a = alpha(env, time_to_maturity);
    let k = scale_factor(env, time_to_maturity, anchor_rate);
    let c = invariant_constant(env, pv_bonds, cash, time_to_maturity, anchor_rate);

    let bonds_after = if add_bonds {
        pv_bonds.checked_add(bond_amount).expect("Overflow")
    } else {
        match pv_bonds.checked_sub(bond_amount) {
            Some(v) => v,
            None => panic!("Invalid trade"),
        }
    };
    if bonds_after == 0 {
        panic!("Invalid trade");
    }

    let bond_term = wad_mul(env, k, wad_pow(env, bonds_after, a));
    if bond_term >= c {
        panic!("Invalid trade");
    }
    let cash_after = wad_pow(env, c - bond_term, wad_div(env, WAD, a));
    if cash_after == 0 {
        panic!("Invalid trade");
    }

    let delta = cash_after.max(cash) - cash_after.min(cash);
    if add_bonds {
        delta
    } else {
        delta.checked_add(1).expect("Overflow")
    }
}
