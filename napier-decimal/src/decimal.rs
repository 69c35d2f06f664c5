//! A signed arbitrary-precision decimal with an explicit power-of-ten scale.

use std::cmp::Ordering;
use std::fmt::{Display, Formatter};
use std::ops::{Add, Mul, Neg, Sub};
use std::str::FromStr;

use num_bigint::BigInt;
use num_integer::Integer;
use num_traits::{Signed, Zero};
use once_cell::sync::Lazy;
use regex::Regex;

use crate::rounding::RoundingMode;
use crate::{order, Error};

static DECIMAL_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"^(-?)(\d+)(?:\.(\d+))?$").unwrap());

/// The value `unscaled * 10^(-scale)`.
///
/// The scale is per-value, so a computation can carry exactly as many
/// fractional digits as its error budget demands. Addition, subtraction and
/// multiplication are exact; division and powers truncate at a requested
/// positional accuracy.
#[derive(Debug, Clone)]
pub struct BigDecimal {
    unscaled: BigInt,
    scale: i64,
}

/// `10^exponent` for exponents that fit a `u32`; anything larger cannot be
/// materialized as digits anyway.
pub(crate) fn pow10(exponent: i64) -> Result<BigInt, Error> {
    let exponent =
        u32::try_from(exponent).map_err(|_| Error::Overflow("raising ten to a power"))?;
    Ok(BigInt::from(10).pow(exponent))
}

fn shift10(exponent: i64) -> BigInt {
    let exponent = u32::try_from(exponent).expect("scale spread exceeds supported range");
    BigInt::from(10).pow(exponent)
}

impl BigDecimal {
    pub fn new(unscaled: BigInt, scale: i64) -> Self {
        Self { unscaled, scale }
    }

    pub fn zero() -> Self {
        Self::new(BigInt::zero(), 0)
    }

    pub fn one() -> Self {
        Self::new(BigInt::from(1), 0)
    }

    pub fn unscaled(&self) -> &BigInt {
        &self.unscaled
    }

    pub fn scale(&self) -> i64 {
        self.scale
    }

    pub fn is_zero(&self) -> bool {
        self.unscaled.is_zero()
    }

    pub fn is_negative(&self) -> bool {
        self.unscaled.is_negative()
    }

    pub fn abs(&self) -> Self {
        Self::new(self.unscaled.abs(), self.scale)
    }

    /// Exact product by a machine integer, scale unchanged.
    pub fn mul_int(&self, factor: i64) -> Self {
        Self::new(&self.unscaled * factor, self.scale)
    }

    /// Both unscaled values brought to the common (larger) scale.
    fn aligned(&self, other: &Self) -> (BigInt, BigInt, i64) {
        let scale = self.scale.max(other.scale);
        let left = &self.unscaled * shift10(scale - self.scale);
        let right = &other.unscaled * shift10(scale - other.scale);
        (left, right, scale)
    }

    /// Quotient truncated toward zero at positional accuracy `accuracy`;
    /// the error against the exact quotient is below `10^accuracy`.
    pub fn div_at(&self, rhs: &Self, accuracy: i64) -> Result<Self, Error> {
        if rhs.is_zero() {
            return Err(Error::DivisionByZero);
        }
        let target = -accuracy;
        let shift = target - self.scale + rhs.scale;
        let quotient = if shift >= 0 {
            (&self.unscaled * pow10(shift)?).div_rem(&rhs.unscaled).0
        } else {
            self.unscaled.div_rem(&(&rhs.unscaled * pow10(-shift)?)).0
        };
        Ok(Self::new(quotient, target))
    }

    /// Drop digits below `10^accuracy`, rounding toward zero.
    pub fn truncate_at(&self, accuracy: i64) -> Result<Self, Error> {
        let target = -accuracy;
        if target >= self.scale {
            return Ok(self.clone());
        }
        let quotient = self.unscaled.div_rem(&pow10(self.scale - target)?).0;
        Ok(Self::new(quotient, target))
    }

    /// Round at position `10^accuracy` in the given mode.
    pub fn round_at(&self, accuracy: i64, mode: RoundingMode) -> Result<Self, Error> {
        let target = -accuracy;
        if target >= self.scale {
            return Ok(self.clone());
        }
        let divisor = pow10(self.scale - target)?;
        let (mut quotient, remainder) = self.unscaled.div_rem(&divisor);
        if !remainder.is_zero() && mode.rounds_away(&quotient, &remainder, &divisor) {
            quotient += remainder.signum();
        }
        Ok(Self::new(quotient, target))
    }

    /// Round to `digits` significant digits. A carry that mints an extra
    /// leading digit (9.99 -> 10.0) frees an exact trailing zero, which is
    /// dropped again so the digit count stays at `digits`.
    pub fn round_to_significant(&self, digits: u32, mode: RoundingMode) -> Result<Self, Error> {
        if digits == 0 {
            return Err(Error::PrecisionUnderflow(0));
        }
        if self.is_zero() {
            return Ok(Self::zero());
        }
        let leading = order::order(self);
        let position = leading + 1 - i64::from(digits);
        let rounded = self.round_at(position, mode)?;
        if !rounded.is_zero() && order::order(&rounded) > leading {
            return rounded.truncate_at(position + 1);
        }
        Ok(rounded)
    }

    /// Exact integer power.
    pub fn pow_exact(&self, exponent: u32) -> Result<Self, Error> {
        let scale = self
            .scale
            .checked_mul(i64::from(exponent))
            .ok_or(Error::Overflow("scaling an exact power"))?;
        Ok(Self::new(self.unscaled.pow(exponent), scale))
    }

    /// Integer power by squaring, truncating every intermediate product at
    /// `accuracy` so the digit count stays bounded.
    pub fn pow_at(&self, exponent: u32, accuracy: i64) -> Result<Self, Error> {
        if exponent == 0 {
            return Ok(Self::one());
        }
        if exponent % 2 == 0 {
            let half = self.pow_at(exponent / 2, accuracy)?;
            (&half * &half).truncate_at(accuracy)
        } else {
            let rest = self.pow_at(exponent - 1, accuracy)?;
            (&rest * self).truncate_at(accuracy)
        }
    }

    /// Largest integer not above the value.
    pub fn to_integer_floor(&self) -> BigInt {
        if self.scale <= 0 {
            return &self.unscaled * shift10(-self.scale);
        }
        let (quotient, remainder) = self.unscaled.div_rem(&shift10(self.scale));
        if self.unscaled.is_negative() && !remainder.is_zero() {
            quotient - 1
        } else {
            quotient
        }
    }
}

impl PartialEq for BigDecimal {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for BigDecimal {}

impl PartialOrd for BigDecimal {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for BigDecimal {
    fn cmp(&self, other: &Self) -> Ordering {
        let (left, right, _) = self.aligned(other);
        left.cmp(&right)
    }
}

impl From<i64> for BigDecimal {
    fn from(n: i64) -> Self {
        Self::new(BigInt::from(n), 0)
    }
}

impl From<u64> for BigDecimal {
    fn from(n: u64) -> Self {
        Self::new(BigInt::from(n), 0)
    }
}

impl From<BigInt> for BigDecimal {
    fn from(n: BigInt) -> Self {
        Self::new(n, 0)
    }
}

impl From<&BigInt> for BigDecimal {
    fn from(n: &BigInt) -> Self {
        Self::new(n.clone(), 0)
    }
}

impl Neg for BigDecimal {
    type Output = Self;

    fn neg(self) -> Self::Output {
        Self::new(-self.unscaled, self.scale)
    }
}

impl Neg for &BigDecimal {
    type Output = BigDecimal;

    fn neg(self) -> Self::Output {
        BigDecimal::new(-&self.unscaled, self.scale)
    }
}

impl Add for BigDecimal {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        &self + &rhs
    }
}

impl<'b> Add<&'b BigDecimal> for &BigDecimal {
    type Output = BigDecimal;

    fn add(self, rhs: &'b BigDecimal) -> Self::Output {
        let (left, right, scale) = self.aligned(rhs);
        BigDecimal::new(left + right, scale)
    }
}

impl Sub for BigDecimal {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self::Output {
        &self - &rhs
    }
}

impl<'b> Sub<&'b BigDecimal> for &BigDecimal {
    type Output = BigDecimal;

    fn sub(self, rhs: &'b BigDecimal) -> Self::Output {
        let (left, right, scale) = self.aligned(rhs);
        BigDecimal::new(left - right, scale)
    }
}

impl Mul for BigDecimal {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self::Output {
        &self * &rhs
    }
}

impl<'b> Mul<&'b BigDecimal> for &BigDecimal {
    type Output = BigDecimal;

    fn mul(self, rhs: &'b BigDecimal) -> Self::Output {
        BigDecimal::new(&self.unscaled * &rhs.unscaled, self.scale + rhs.scale)
    }
}

impl Display for BigDecimal {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        if self.scale <= 0 {
            let mut body = self.unscaled.to_string();
            if !self.unscaled.is_zero() {
                body.push_str(&"0".repeat((-self.scale) as usize));
            }
            return write!(f, "{body}");
        }
        let digits = self.unscaled.magnitude().to_str_radix(10);
        let sign = if self.unscaled.is_negative() { "-" } else { "" };
        let scale = self.scale as usize;
        if digits.len() <= scale {
            write!(f, "{sign}0.{}{digits}", "0".repeat(scale - digits.len()))
        } else {
            let split = digits.len() - scale;
            write!(f, "{sign}{}.{}", &digits[..split], &digits[split..])
        }
    }
}

impl FromStr for BigDecimal {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let captures = DECIMAL_REGEX
            .captures(s)
            .ok_or_else(|| Error::BadDecimalLiteral(s.to_string()))?;
        let mut digits = captures[2].to_string();
        let scale = match captures.get(3) {
            Some(fraction) => {
                digits.push_str(fraction.as_str());
                fraction.as_str().len() as i64
            }
            None => 0,
        };
        let mut unscaled = BigInt::from_str(&digits)
            .map_err(|_| Error::BadDecimalLiteral(s.to_string()))?;
        if &captures[1] == "-" {
            unscaled = -unscaled;
        }
        Ok(Self::new(unscaled, scale))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dec(s: &str) -> BigDecimal {
        BigDecimal::from_str(s).unwrap()
    }

    #[test]
    fn parse_and_print_round_trips() {
        for literal in ["0", "1", "-1", "2.718281828", "-0.052", "100.00", "0.0001"] {
            assert_eq!(dec(literal).to_string(), literal);
        }
        assert!(BigDecimal::from_str("1e5").is_err());
        assert!(BigDecimal::from_str("1.").is_err());
        assert!(BigDecimal::from_str("--1").is_err());
    }

    #[test]
    fn negative_scale_prints_trailing_zeros() {
        let value = BigDecimal::new(BigInt::from(42), -3);
        assert_eq!(value.to_string(), "42000");
    }

    #[test]
    fn comparison_is_numeric_across_scales() {
        assert_eq!(dec("1.00"), dec("1"));
        assert!(dec("0.52") < dec("1.92"));
        assert!(dec("-2") < dec("0.1"));
        assert_eq!(dec("100.00"), BigDecimal::new(BigInt::from(1), -2));
    }

    #[test]
    fn exact_arithmetic() {
        assert_eq!(&dec("1.5") + &dec("0.25"), dec("1.75"));
        assert_eq!(&dec("1.5") - &dec("2"), dec("-0.5"));
        assert_eq!(&dec("1.2") * &dec("0.5"), dec("0.6"));
        assert_eq!(-dec("0.3"), dec("-0.3"));
        assert_eq!(dec("7").mul_int(-3), dec("-21"));
    }

    #[test]
    fn division_truncates_at_accuracy() {
        let third = dec("1").div_at(&dec("3"), -4).unwrap();
        assert_eq!(third, dec("0.3333"));
        let negative = dec("-1").div_at(&dec("3"), -4).unwrap();
        assert_eq!(negative, dec("-0.3333"));
        assert!(dec("1").div_at(&BigDecimal::zero(), -4).is_err());
    }

    #[test]
    fn division_handles_scale_shifts() {
        let value = BigDecimal::new(BigInt::from(25), -2); // 2500
        let result = value.div_at(&dec("8"), 0).unwrap();
        assert_eq!(result, dec("312"));
        let up = dec("0.0001").div_at(&dec("2"), -6).unwrap();
        assert_eq!(up, dec("0.00005"));
    }

    #[test]
    fn truncation_moves_toward_zero() {
        assert_eq!(dec("1.987").truncate_at(-1).unwrap(), dec("1.9"));
        assert_eq!(dec("-1.987").truncate_at(-1).unwrap(), dec("-1.9"));
        // already coarser than requested: untouched
        assert_eq!(dec("1.9").truncate_at(-5).unwrap(), dec("1.9"));
    }

    #[test]
    fn significant_rounding_keeps_digit_count() {
        let e = dec("2.7182818284");
        assert_eq!(
            e.round_to_significant(4, RoundingMode::HalfUp).unwrap().to_string(),
            "2.718"
        );
        let carried = dec("9.996")
            .round_to_significant(3, RoundingMode::HalfUp)
            .unwrap();
        assert_eq!(carried.to_string(), "10.0");
        assert!(dec("1").round_to_significant(0, RoundingMode::HalfUp).is_err());
    }

    #[test]
    fn powers() {
        assert_eq!(dec("0.5").pow_exact(3).unwrap(), dec("0.125"));
        let squared = dec("1.4142").pow_at(2, -4).unwrap();
        assert_eq!(squared, dec("1.9999"));
        assert_eq!(dec("3").pow_at(0, -4).unwrap(), dec("1"));
    }

    #[test]
    fn integer_floor() {
        assert_eq!(dec("2.7").to_integer_floor(), BigInt::from(2));
        assert_eq!(dec("-2.7").to_integer_floor(), BigInt::from(-3));
        assert_eq!(dec("5").to_integer_floor(), BigInt::from(5));
        assert_eq!(BigDecimal::new(BigInt::from(3), -2).to_integer_floor(), BigInt::from(300));
    }
}
