//! The series-term contract and its exact rational representation.

use napier_decimal::{decimal::BigDecimal, order};

use crate::Error;

/// A term held as an exact numerator/denominator pair of big decimals.
///
/// Keeping the pair exact until the final truncating division is what makes
/// the per-term accuracy contract trivial to honor: one division at
/// position p has error below `10^p`, full stop. The sign lives in the
/// numerator; the denominator is kept positive.
#[derive(Debug, Clone)]
pub struct TermRatio {
    numerator: BigDecimal,
    denominator: BigDecimal,
}

impl TermRatio {
    pub fn new(numerator: BigDecimal, denominator: BigDecimal) -> Result<Self, Error> {
        if denominator.is_zero() {
            return Err(napier_decimal::Error::DivisionByZero.into());
        }
        if denominator.is_negative() {
            return Ok(Self {
                numerator: -numerator,
                denominator: -denominator,
            });
        }
        Ok(Self {
            numerator,
            denominator,
        })
    }

    pub fn numerator(&self) -> &BigDecimal {
        &self.numerator
    }

    pub fn denominator(&self) -> &BigDecimal {
        &self.denominator
    }

    /// A term whose numerator vanished contributes nothing and has no order.
    pub fn is_vanishing(&self) -> bool {
        self.numerator.is_zero()
    }

    /// Exact order of the quotient, without performing the division at full
    /// width: the digit-count estimate `o_num - o_den` is off by at most
    /// one, and a single scale-shifted comparison settles which.
    pub fn order(&self) -> Result<i64, Error> {
        if self.is_vanishing() {
            return Err(Error::VanishingSeries);
        }
        let guess = order::order(&self.numerator) - order::order(&self.denominator);
        let shifted = BigDecimal::new(
            self.denominator.unscaled().clone(),
            self.denominator.scale() - guess,
        );
        if self.numerator.abs() >= shifted {
            Ok(guess)
        } else {
            Ok(guess - 1)
        }
    }

    /// Upper bound on the order of the quotient:
    /// `|num/den| <= 10^(oo(num) - o(den))`.
    pub fn overestimate_order(&self) -> Result<i64, Error> {
        if self.is_vanishing() {
            return Err(Error::VanishingSeries);
        }
        Ok(order::overestimate_order(&self.numerator) - order::order(&self.denominator))
    }

    /// The quotient truncated toward zero at `10^accuracy`.
    pub fn approximate(&self, accuracy: i64) -> Result<BigDecimal, Error> {
        Ok(self.numerator.div_at(&self.denominator, accuracy)?)
    }

    /// The quotient reduced to exactly one significant digit, truncating.
    pub fn minimal(&self) -> Result<BigDecimal, Error> {
        let leading = self.order()?;
        self.approximate(leading)
    }
}

/// Sign parameterization of a term family.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SignMapper {
    Identity,
    Alternating,
}

impl SignMapper {
    /// `(-1)^index` under `Alternating`, untouched otherwise.
    pub fn apply(self, index: i32, value: BigDecimal) -> BigDecimal {
        match self {
            SignMapper::Identity => value,
            SignMapper::Alternating => {
                if index % 2 == 0 {
                    value
                } else {
                    -value
                }
            }
        }
    }
}

/// Index parameterization: which exponent the n-th term actually raises to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IndexMapper {
    Identity,
    Odd,
}

impl IndexMapper {
    pub fn apply(self, index: i32) -> Result<i32, Error> {
        match self {
            IndexMapper::Identity => Ok(index),
            IndexMapper::Odd => index
                .checked_mul(2)
                .and_then(|doubled| doubled.checked_add(1))
                .ok_or(Error::Overflow("mapping a term index")),
        }
    }
}

/// A pure function of the index producing a signed big-rational term.
///
/// `ratio` is the one required method; the contract methods are derived
/// from the exact pair. `overestimate_order` is deterministic, so repeated
/// calls can never loosen.
pub trait SeriesTerm: Send + Sync {
    fn ratio(&self, index: i32) -> Result<TermRatio, Error>;

    /// T(index) to positional accuracy `accuracy`, truncating toward zero.
    fn approximate(&self, index: i32, accuracy: i64) -> Result<BigDecimal, Error> {
        self.ratio(index)?.approximate(accuracy)
    }

    /// T(index) rounded to exactly one significant digit, truncating.
    fn approximate_minimal(&self, index: i32) -> Result<BigDecimal, Error> {
        self.ratio(index)?.minimal()
    }

    /// Upper bound on the order of T(index).
    fn overestimate_order(&self, index: i32) -> Result<i64, Error> {
        self.ratio(index)?.overestimate_order()
    }
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use super::*;

    fn dec(s: &str) -> BigDecimal {
        BigDecimal::from_str(s).unwrap()
    }

    fn ratio(num: &str, den: &str) -> TermRatio {
        TermRatio::new(dec(num), dec(den)).unwrap()
    }

    #[test]
    fn order_is_exact_on_both_sides_of_the_guess() {
        // 9/2 = 4.5: digit guess 0 - 0 = 0, confirmed
        assert_eq!(ratio("9", "2").order().unwrap(), 0);
        // 2/9 = 0.22: guess 0, corrected down
        assert_eq!(ratio("2", "9").order().unwrap(), -1);
        // 1/3
        assert_eq!(ratio("1", "3").order().unwrap(), -1);
        // 100/5 = 20
        assert_eq!(ratio("100", "5").order().unwrap(), 1);
        // -0.5/2 = -0.25
        assert_eq!(ratio("-0.5", "2").order().unwrap(), -1);
    }

    #[test]
    fn overestimate_bounds_the_quotient() {
        assert_eq!(ratio("2", "9").overestimate_order().unwrap(), 1);
        assert_eq!(ratio("1", "3").overestimate_order().unwrap(), 0);
        // power-of-ten numerator stays tight
        assert_eq!(ratio("1", "9").overestimate_order().unwrap(), 0);
    }

    #[test]
    fn minimal_keeps_one_digit() {
        assert_eq!(ratio("1", "3").minimal().unwrap(), dec("0.3"));
        assert_eq!(ratio("9", "2").minimal().unwrap(), dec("4"));
        assert_eq!(ratio("-1", "3").minimal().unwrap(), dec("-0.3"));
        assert_eq!(ratio("2", "1000").minimal().unwrap(), dec("0.002"));
    }

    #[test]
    fn negative_denominator_is_normalized() {
        let r = TermRatio::new(dec("1"), dec("-4")).unwrap();
        assert!(r.numerator().is_negative());
        assert!(!r.denominator().is_negative());
        assert_eq!(r.approximate(-2).unwrap(), dec("-0.25"));
    }

    #[test]
    fn vanishing_terms_have_no_order() {
        let r = TermRatio::new(BigDecimal::zero(), dec("3")).unwrap();
        assert!(r.is_vanishing());
        assert!(matches!(r.order(), Err(Error::VanishingSeries)));
        assert!(TermRatio::new(dec("1"), BigDecimal::zero()).is_err());
    }

    #[test]
    fn mappers() {
        assert_eq!(IndexMapper::Identity.apply(7).unwrap(), 7);
        assert_eq!(IndexMapper::Odd.apply(0).unwrap(), 1);
        assert_eq!(IndexMapper::Odd.apply(11).unwrap(), 23);
        assert!(IndexMapper::Odd.apply(i32::MAX).is_err());

        assert_eq!(SignMapper::Identity.apply(3, dec("2")), dec("2"));
        assert_eq!(SignMapper::Alternating.apply(0, dec("2")), dec("2"));
        assert_eq!(SignMapper::Alternating.apply(1, dec("2")), dec("-2"));
    }
}
