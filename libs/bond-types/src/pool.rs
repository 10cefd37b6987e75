use soroban_sdk::{contracttype, Address};

use crate::{
    DEFAULT_COLLATERAL_RATIO, DEFAULT_FALLBACK_RATE, DEFAULT_GRACE_PERIOD,
    DEFAULT_LIQUIDATION_PENALTY, DEFAULT_MAX_MATURITY, DEFAULT_MIN_MATURITY,
    DEFAULT_SOLVENCY_THRESHOLD,
};

/// Current pool reserves and liabilities - stored in Instance storage for
/// frequent access
#[contracttype]
#[derive(Clone, Debug)]
pub struct PoolState {
    /// Cash held by the pool (WAD)
    pub cash: u128,
    /// Present value of the pool's bond inventory (WAD)
    pub pv_bonds: u128,
    /// Present value of outstanding pool debts, grown by accrual (WAD)
    pub net_liabilities: u128,
    /// Cash at initialization; basis of the solvency floor. Immutable.
    pub initial_cash: u128,
    /// Ledger time of the last liability accrual
    pub last_accrual: u64,
}

impl PoolState {
    pub fn new(initial_cash: u128, now: u64) -> Self {
        Self {
            cash: initial_cash,
            pv_bonds: initial_cash,
            net_liabilities: 0,
            initial_cash,
            last_accrual: now,
        }
    }
}

/// Pool collaborators - recorded at initialization
#[contracttype]
#[derive(Clone, Debug)]
pub struct PoolConfig {
    /// Administrative authority
    pub admin: Address,
    /// Stablecoin ledger contract; amounts share the pool's WAD scale
    pub token: Address,
    /// Anchor-rate publisher exposing get_rate / is_stale
    pub oracle: Address,
}

/// Administratively tunable parameters
#[contracttype]
#[derive(Clone, Debug)]
pub struct PoolParams {
    /// Shortest maturity accepted at origination (seconds)
    pub min_maturity: u64,
    /// Longest maturity accepted at origination (seconds)
    pub max_maturity: u64,
    /// Required collateral per unit borrowed, rho (WAD)
    pub collateral_ratio: u128,
    /// Solvency floor theta: cash + liabilities >= theta * initial_cash (WAD)
    pub solvency_threshold: u128,
    /// Interval after maturity during which a borrower may still repay
    pub grace_period: u64,
    /// Penalty fraction reported on liquidation (WAD)
    pub liquidation_penalty: u128,
    /// Constant substituted for the oracle rate on fail-open paths (WAD)
    pub fallback_rate: u128,
}

impl PoolParams {
    /// Parameter set every pool starts from
    pub fn starting() -> Self {
        Self {
            min_maturity: DEFAULT_MIN_MATURITY,
            max_maturity: DEFAULT_MAX_MATURITY,
            collateral_ratio: DEFAULT_COLLATERAL_RATIO,
            solvency_threshold: DEFAULT_SOLVENCY_THRESHOLD,
            grace_period: DEFAULT_GRACE_PERIOD,
            liquidation_penalty: DEFAULT_LIQUIDATION_PENALTY,
            fallback_rate: DEFAULT_FALLBACK_RATE,
        }
    }
}
