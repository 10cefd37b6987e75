#![no_std]

mod pool;
mod position;

pub use pool::*;
pub use position::*;

/// WAD constant (10^18) for fixed-point math: the stored integer equals the
/// real number times 10^18
pub const WAD: u128 = 1_000_000_000_000_000_000;

/// Seconds per year (365 days), the time base of every rate
pub const SECONDS_PER_YEAR: u64 = 365 * 86_400;

/// Seconds per day
pub const SECONDS_PER_DAY: u64 = 86_400;

/// Rate-curve steepness kappa = 0.02 (WAD). Not configurable.
pub const KAPPA_WAD: u128 = 20_000_000_000_000_000;

/// Minimum time to maturity accepted by the curvature/scale functions (1 hour)
pub const MIN_PRICING_TIME: u64 = 3_600;

// === Parameter defaults ===

/// Default minimum maturity: 30 days
pub const DEFAULT_MIN_MATURITY: u64 = 30 * SECONDS_PER_DAY;

/// Default maximum maturity: 365 days
pub const DEFAULT_MAX_MATURITY: u64 = 365 * SECONDS_PER_DAY;

/// Default collateral ratio rho = 1.50 (WAD)
pub const DEFAULT_COLLATERAL_RATIO: u128 = 1_500_000_000_000_000_000;

/// Default solvency threshold theta = 0.99 (WAD)
pub const DEFAULT_SOLVENCY_THRESHOLD: u128 = 990_000_000_000_000_000;

/// Default liquidation grace period: 24 hours
pub const DEFAULT_GRACE_PERIOD: u64 = SECONDS_PER_DAY;

/// Default liquidation penalty: 5% (WAD)
pub const DEFAULT_LIQUIDATION_PENALTY: u128 = 50_000_000_000_000_000;

/// Default oracle fallback rate: 5% (WAD)
pub const DEFAULT_FALLBACK_RATE: u128 = 50_000_000_000_000_000;

// === Parameter bounds (validated at administrative entry) ===

/// Minimum maturity may never go below 1 day
pub const MIN_MATURITY_FLOOR: u64 = SECONDS_PER_DAY;

/// Maximum maturity may never exceed 730 days
pub const MAX_MATURITY_CEILING: u64 = 730 * SECONDS_PER_DAY;

/// Collateral ratio range [1.00, 3.00] (WAD)
pub const COLLATERAL_RATIO_MIN: u128 = WAD;
pub const COLLATERAL_RATIO_MAX: u128 = 3 * WAD;

/// Solvency threshold range [0.90, 1.00] (WAD)
pub const SOLVENCY_THRESHOLD_MIN: u128 = 900_000_000_000_000_000;
pub const SOLVENCY_THRESHOLD_MAX: u128 = WAD;

/// Grace period range [1 hour, 7 days]
pub const GRACE_PERIOD_MIN: u64 = 3_600;
pub const GRACE_PERIOD_MAX: u64 = 7 * SECONDS_PER_DAY;

/// Cap on liquidation penalty and fallback rate: 20% (WAD)
pub const CONFIGURABLE_RATE_CAP: u128 = 200_000_000_000_000_000;
