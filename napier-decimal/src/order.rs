//! Exact and over-estimated base-10 order.
//!
//! The order of x != 0 is the unique integer k with `10^k <= |x| < 10^(k+1)`.
//! The over-estimate rounds upward to the nearest safe power of ten and is
//! what every error budget in the workspace subtracts, so it must never be
//! below the true order.

use num_bigint::{BigInt, BigUint};
use num_traits::{One, Zero};

use crate::decimal::BigDecimal;

/// Count of decimal digits of a non-zero magnitude.
pub fn decimal_digits(magnitude: &BigUint) -> u64 {
    debug_assert!(!magnitude.is_zero());
    magnitude.to_str_radix(10).len() as u64
}

/// Whether the magnitude is exactly `10^k` for some k >= 0.
pub fn is_power_of_ten(magnitude: &BigUint) -> bool {
    if magnitude.is_zero() {
        return false;
    }
    let mut rest = magnitude.clone();
    let ten = BigUint::from(10u32);
    while (&rest % &ten).is_zero() {
        rest /= &ten;
    }
    rest.is_one()
}

/// Base-10 order of a non-zero decimal: `digits(unscaled) - 1 - scale`.
///
/// The order of zero is not a number; callers that may see zero branch
/// before asking.
pub fn order(x: &BigDecimal) -> i64 {
    debug_assert!(!x.is_zero(), "order of zero is undefined");
    decimal_digits(x.unscaled().magnitude()) as i64 - 1 - x.scale()
}

/// `order(x)` when |x| is a pure power of ten, `order(x) + 1` otherwise;
/// in both cases `|x| <= 10^overestimate_order(x)`.
pub fn overestimate_order(x: &BigDecimal) -> i64 {
    let exact = order(x);
    if is_power_of_ten(x.unscaled().magnitude()) {
        exact
    } else {
        exact + 1
    }
}

/// Order of a non-zero big integer: `digits - 1`.
pub fn int_order(n: &BigInt) -> i64 {
    debug_assert!(!n.is_zero(), "order of zero is undefined");
    decimal_digits(n.magnitude()) as i64 - 1
}

/// Safe upper bound with `|n| <= 10^int_overestimate_order(n)`.
pub fn int_overestimate_order(n: &BigInt) -> i64 {
    let exact = int_order(n);
    if is_power_of_ten(n.magnitude()) {
        exact
    } else {
        exact + 1
    }
}
