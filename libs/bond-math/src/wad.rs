use bond_types::WAD;
use soroban_sdk::{Env, U256};

/// Euler's number in WAD
pub const E_WAD: u128 = 2_718_281_828_459_045_235;

/// Largest exponent wad_exp accepts: ln(u128::MAX / 10^18).
/// Anything above it would overflow the u128 result.
pub const EXP_INPUT_MAX: u128 = 47_276_307_000_000_000_000;

/// Multiply two WAD quantities with 256-bit intermediate precision
/// (rounds down): (a * b) / 10^18
pub fn wad_mul(env: &Env, a: u128, b: u128) -> u128 {
    mul_div(env, a, b, WAD)
}

/// Multiply two WAD quantities, rounding up
pub fn wad_mul_up(env: &Env, a: u128, b: u128) -> u128 {
    mul_div_up(env, a, b, WAD)
}

/// Divide two WAD quantities with 256-bit intermediate precision
/// (rounds down): (a * 10^18) / b
pub fn wad_div(env: &Env, a: u128, b: u128) -> u128 {
    mul_div(env, a, WAD, b)
}

/// Divide two WAD quantities, rounding up
pub fn wad_div_up(env: &Env, a: u128, b: u128) -> u128 {
    mul_div_up(env, a, WAD, b)
}

/// (a * b) / denominator with a U256 intermediate (rounds down)
pub fn mul_div(env: &Env, a: u128, b: u128, denominator: u128) -> u128 {
    if denominator == 0 {
        panic!("Division by zero");
    }

    let a_256 = U256::from_u128(env, a);
    let b_256 = U256::from_u128(env, b);
    let denom_256 = U256::from_u128(env, denominator);

    let product = a_256.mul(&b_256);
    let result = product.div(&denom_256);

    u128_from_u256(&result)
}

/// ceil((a * b) / denominator) with a U256 intermediate
pub fn mul_div_up(env: &Env, a: u128, b: u128, denominator: u128) -> u128 {
    let result = mul_div(env, a, b, denominator);

    let a_256 = U256::from_u128(env, a);
    let b_256 = U256::from_u128(env, b);
    let denom_256 = U256::from_u128(env, denominator);

    let product = a_256.mul(&b_256);
    let remainder = product.rem_euclid(&denom_256);

    if remainder.gt(&U256::from_u32(env, 0)) {
        result.checked_add(1).expect("Overflow")
    } else {
        result
    }
}

/// Convert U256 to u128, panics if the value does not fit
fn u128_from_u256(value: &U256) -> u128 {
    match value.to_u128() {
        Some(v) => v,
        None => panic!("Overflow"),
    }
}

/// e^x for WAD x in [0, EXP_INPUT_MAX].
///
/// Splits x into integer and fractional years-of-e: the fractional part is
/// summed as a Taylor series (converges in ~20 terms for arguments below 1),
/// the integer part applied by squaring E_WAD. Negative exponents are taken
/// by callers as 1/exp(|x|).
pub fn wad_exp(env: &Env, x: u128) -> u128 {
    if x > EXP_INPUT_MAX {
        panic!("Overflow");
    }

    let whole = x / WAD;
    let frac = x % WAD;

    // e^frac by Taylor: sum of frac^k / k!
    let mut term = WAD;
    let mut sum = WAD;
    let mut k: u128 = 1;
    while term > 0 && k <= 32 {
        term = wad_mul(env, term, frac) / k;
        sum += term;
        k += 1;
    }

    // e^whole by exponentiation by squaring
    let mut result = sum;
    let mut base = E_WAD;
    let mut m = whole;
    while m > 0 {
        if m & 1 == 1 {
            result = wad_mul(env, result, base);
        }
        m >>= 1;
        if m > 0 {
            base = wad_mul(env, base, base);
        }
    }
    result
}

/// ln(x) for WAD x >= 1. Callers compute -ln(1/x) for arguments below 1.
///
/// Reduces x into [1, e) by repeated division by e, then sums the atanh
/// series ln(m) = 2 * (z + z^3/3 + z^5/5 + ...) with z = (m-1)/(m+1).
pub fn wad_ln(env: &Env, x: u128) -> u128 {
    if x < WAD {
        panic!("Ln domain");
    }

    let mut whole: u128 = 0;
    let mut m = x;
    while m >= E_WAD {
        m = wad_div(env, m, E_WAD);
        whole += 1;
    }

    let z = wad_div(env, m - WAD, m + WAD);
    let z_sq = wad_mul(env, z, z);
    let mut term = z;
    let mut sum: u128 = 0;
    let mut k: u128 = 0;
    while term > 0 && k <= 40 {
        sum += term / (2 * k + 1);
        term = wad_mul(env, term, z_sq);
        k += 1;
    }

    whole * WAD + 2 * sum
}

/// base^exponent for WAD operands, via exp(exponent * ln(base)).
/// For base below 1 the reciprocal continuation 1 / (1/base)^exponent
/// keeps the logarithm in domain.
pub fn wad_pow(env: &Env, base: u128, exponent: u128) -> u128 {
    if exponent == 0 {
        return WAD;
    }
    if base == 0 {
        return 0;
    }
    if base >= WAD {
        wad_exp(env, wad_mul(env, exponent, wad_ln(env, base)))
    } else {
        let inverted = wad_div(env, WAD, base);
        wad_div(env, WAD, wad_exp(env, wad_mul(env, exponent, wad_ln(env, inverted))))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use soroban_sdk::Env;

    fn close(a: u128, b: u128, tol: u128) -> bool {
        a.max(b) - a.min(b) <= tol
    }

    // === wad_mul / wad_div tests ===

    #[test]
    fn test_wad_mul_basic() {
        let env = Env::default();
        // 2.0 * 3.0 = 6.0
        assert_eq!(wad_mul(&env, 2 * WAD, 3 * WAD), 6 * WAD);
        // 0.5 * 0.5 = 0.25
        assert_eq!(wad_mul(&env, WAD / 2, WAD / 2), WAD / 4);
    }

    #[test]
    fn test_wad_mul_rounds_down() {
        let env = Env::default();
        // (1 wei * 1 wei) / WAD = 0
        assert_eq!(wad_mul(&env, 1, 1), 0);
        assert_eq!(wad_mul_up(&env, 1, 1), 1);
    }

    #[test]
    fn test_wad_mul_large_operands() {
        let env = Env::default();
        // 10^23 * 1.0 survives the u128 product overflow via U256
        let big = 100_000 * WAD;
        assert_eq!(wad_mul(&env, big, WAD), big);
        assert_eq!(wad_mul(&env, big, 2 * WAD), 2 * big);
    }

    #[test]
    fn test_wad_div_basic() {
        let env = Env::default();
        assert_eq!(wad_div(&env, 6 * WAD, 3 * WAD), 2 * WAD);
        assert_eq!(wad_div(&env, WAD, 2 * WAD), WAD / 2);
    }

    #[test]
    fn test_wad_div_up_vs_down() {
        let env = Env::default();
        let down = wad_div(&env, WAD, 3 * WAD);
        let up = wad_div_up(&env, WAD, 3 * WAD);
        assert_eq!(up - down, 1);
    }

    #[test]
    #[should_panic(expected = "Division by zero")]
    fn test_wad_div_zero_denominator() {
        let env = Env::default();
        wad_div(&env, WAD, 0);
    }

    #[test]
    #[should_panic(expected = "Overflow")]
    fn test_wad_mul_overflow() {
        let env = Env::default();
        wad_mul(&env, u128::MAX, u128::MAX);
    }

    // === wad_exp tests ===

    #[test]
    fn test_exp_zero_is_one() {
        let env = Env::default();
        assert_eq!(wad_exp(&env, 0), WAD);
    }

    #[test]
    fn test_exp_one_is_e() {
        let env = Env::default();
        assert_eq!(wad_exp(&env, WAD), E_WAD);
    }

    #[test]
    fn test_exp_two() {
        let env = Env::default();
        // e^2 = 7.389056098930650227...
        assert!(close(wad_exp(&env, 2 * WAD), 7_389_056_098_930_650_227, 1_000));
    }

    #[test]
    fn test_exp_half() {
        let env = Env::default();
        // e^0.5 = 1.648721270700128147...
        assert!(close(wad_exp(&env, WAD / 2), 1_648_721_270_700_128_147, 1_000));
    }

    #[test]
    fn test_exp_small_rate_times_tenor() {
        let env = Env::default();
        // e^0.012328767 (5% for 90/365 of a year) = 1.012405079...
        let x = 12_328_767_123_287_671u128;
        assert!(close(wad_exp(&env, x), 1_012_405_079_664_670_000, 1_000_000_000));
    }

    #[test]
    fn test_exp_monotonic() {
        let env = Env::default();
        let mut prev = wad_exp(&env, 0);
        for i in 1..=10u128 {
            let next = wad_exp(&env, i * WAD / 2);
            assert!(next > prev);
            prev = next;
        }
    }

    #[test]
    #[should_panic(expected = "Overflow")]
    fn test_exp_input_too_large() {
        let env = Env::default();
        wad_exp(&env, EXP_INPUT_MAX + 1);
    }

    // === wad_ln tests ===

    #[test]
    fn test_ln_one_is_zero() {
        let env = Env::default();
        assert_eq!(wad_ln(&env, WAD), 0);
    }

    #[test]
    fn test_ln_e_is_one() {
        let env = Env::default();
        assert!(close(wad_ln(&env, E_WAD), WAD, 10));
    }

    #[test]
    fn test_ln_two() {
        let env = Env::default();
        // ln 2 = 0.693147180559945309...
        assert!(close(wad_ln(&env, 2 * WAD), 693_147_180_559_945_309, 1_000));
    }

    #[test]
    fn test_ln_exp_round_trip() {
        let env = Env::default();
        for x in [WAD / 7, WAD, 3 * WAD, 11 * WAD + 1234, 40 * WAD] {
            let y = wad_ln(&env, wad_exp(&env, x));
            // relative error within 1e-12
            assert!(close(y, x, x / 1_000_000_000_000 + 10));
        }
    }

    #[test]
    #[should_panic(expected = "Ln domain")]
    fn test_ln_below_one() {
        let env = Env::default();
        wad_ln(&env, WAD - 1);
    }

    // === wad_pow tests ===

    #[test]
    fn test_pow_zero_exponent() {
        let env = Env::default();
        assert_eq!(wad_pow(&env, 5 * WAD, 0), WAD);
        assert_eq!(wad_pow(&env, 0, 0), WAD);
    }

    #[test]
    fn test_pow_zero_base() {
        let env = Env::default();
        assert_eq!(wad_pow(&env, 0, WAD), 0);
    }

    #[test]
    fn test_pow_square_root() {
        let env = Env::default();
        // 4^0.5 = 2
        assert!(close(wad_pow(&env, 4 * WAD, WAD / 2), 2 * WAD, 1_000_000));
    }

    #[test]
    fn test_pow_square() {
        let env = Env::default();
        // 2^2 = 4
        assert!(close(wad_pow(&env, 2 * WAD, 2 * WAD), 4 * WAD, 1_000_000));
    }

    #[test]
    fn test_pow_base_below_one() {
        let env = Env::default();
        // 0.5^2 = 0.25 via the reciprocal continuation
        assert!(close(wad_pow(&env, WAD / 2, 2 * WAD), WAD / 4, 1_000_000));
    }

    #[test]
    fn test_pow_near_unit_exponent() {
        let env = Env::default();
        // x^1 = x
        let x = 94_506 * WAD + 123;
        assert!(close(wad_pow(&env, x, WAD), x, x / 1_000_000_000));
    }
}
