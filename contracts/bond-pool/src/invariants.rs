// Invariant predicates for the pool state machine. Pure functions over
// plain values so they can be checked from operation code, unit tests, and
// property harnesses alike.

/// Invariant: the pool stays above its solvency floor
///
/// Property:
///   cash + net_liabilities >= floor, where floor = theta * initial_cash
///
/// The floor is precomputed by the caller (WAD multiplication needs an Env).
pub fn solvency_holds(cash: u128, net_liabilities: u128, floor: u128) -> bool {
    match cash.checked_add(net_liabilities) {
        Some(equity) => equity >= floor,
        None => false,
    }
}

/// Invariant: every active position carries a positive face maturing
/// strictly after its creation
pub fn position_well_formed(face_value: u128, created_at: u64, maturity: u64) -> bool {
    face_value > 0 && maturity > created_at
}

/// Invariant: a borrow is collateralized at creation
///
/// Property:
///   collateral >= rho * amount (the caller supplies the product)
pub fn collateral_sufficient(collateral: u128, required: u128) -> bool {
    collateral >= required
}

/// Invariant: an origination tenor lies within the configured window
pub fn maturity_in_range(tenor: u64, min_maturity: u64, max_maturity: u64) -> bool {
    tenor >= min_maturity && tenor <= max_maturity
}

/// Invariant: position identifiers strictly increase and are never reused
pub fn ids_strictly_increase(previous_id: u64, next_id: u64) -> bool {
    next_id > previous_id
}

/// Invariant: the accrual anchor never moves backwards
pub fn clock_monotonic(last_accrual: u64, now: u64) -> bool {
    now >= last_accrual
}

/// Invariant: a trade leaves the invariant constant within a bounded
/// relative drift
///
/// Property:
///   |c_after - c_before| <= c_before / denominator
pub fn drift_bounded(c_before: u128, c_after: u128, denominator: u128) -> bool {
    let diff = c_after.max(c_before) - c_after.min(c_before);
    diff <= c_before / denominator
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_solvency_holds_above_floor() {
        assert!(solvency_holds(99_000, 0, 99_000));
        assert!(solvency_holds(90_000, 10_000, 99_000));
        assert!(solvency_holds(100_000, 0, 99_000));
    }

    #[test]
    fn test_solvency_fails_below_floor() {
        assert!(!solvency_holds(98_999, 0, 99_000));
        assert!(!solvency_holds(50_000, 48_999, 99_000));
    }

    #[test]
    fn test_solvency_overflow_is_insolvent() {
        assert!(!solvency_holds(u128::MAX, 1, 0));
    }

    #[test]
    fn test_position_well_formed() {
        assert!(position_well_formed(1, 100, 101));
        assert!(!position_well_formed(0, 100, 101)); // zero face
        assert!(!position_well_formed(1, 100, 100)); // matures at creation
        assert!(!position_well_formed(1, 101, 100)); // matures before creation
    }

    #[test]
    fn test_collateral_sufficient() {
        assert!(collateral_sufficient(15_000, 15_000));
        assert!(collateral_sufficient(15_001, 15_000));
        assert!(!collateral_sufficient(14_999, 15_000));
    }

    #[test]
    fn test_maturity_in_range() {
        assert!(maturity_in_range(30, 30, 365));
        assert!(maturity_in_range(365, 30, 365));
        assert!(!maturity_in_range(29, 30, 365));
        assert!(!maturity_in_range(366, 30, 365));
    }

    #[test]
    fn test_ids_strictly_increase() {
        assert!(ids_strictly_increase(1, 2));
        assert!(!ids_strictly_increase(2, 2));
        assert!(!ids_strictly_increase(3, 2));
    }

    #[test]
    fn test_clock_monotonic() {
        assert!(clock_monotonic(100, 100));
        assert!(clock_monotonic(100, 101));
        assert!(!clock_monotonic(101, 100));
    }

    #[test]
    fn test_drift_bounded() {
        // 0.1% of 1_000_000 is 1_000
        assert!(drift_bounded(1_000_000, 1_001_000, 1_000));
        assert!(drift_bounded(1_000_000, 999_000, 1_000));
        assert!(!drift_bounded(1_000_000, 1_001_001, 1_000));
        assert!(drift_bounded(1_000_000, 1_000_000, 1_000));
    }
}
