//! The series engine: term-count solving, per-term accuracy, accumulation
//! and the coarse order computation.

use num_bigint::BigInt;
use tracing::trace;

use napier_decimal::{accuracy, order, BigDecimal};

use crate::accumulator::Accumulation;
use crate::finder;
use crate::term::SeriesTerm;
use crate::Error;

/// Round-off headroom a block of `count` terms can consume: each truncated
/// term contributes at most one unit in its last place. An empty block
/// consumes nothing.
fn count_overestimate(count: i64) -> i64 {
    if count == 0 {
        0
    } else {
        order::int_overestimate_order(&BigInt::from(count))
    }
}

/// A convergent series bound to a term generator.
///
/// `optimized` asserts that the caller's domain reduction guarantees each
/// remainder shrinks by at least a decimal digit per term; the negligibility
/// cut then only has to undercut the target by one position. Without that
/// guarantee the cut also budgets one unit of round-off per accumulated
/// term.
#[derive(Debug, Clone)]
pub struct SeriesApprox<T: SeriesTerm> {
    term: T,
    min_index: i32,
    optimized: bool,
    accumulation: Accumulation,
}

impl<T: SeriesTerm> SeriesApprox<T> {
    pub fn new(term: T, min_index: i32, optimized: bool, accumulation: Accumulation) -> Self {
        Self {
            term,
            min_index,
            optimized,
            accumulation,
        }
    }

    pub fn term(&self) -> &T {
        &self.term
    }

    fn negligible(&self, index: i32, accuracy: i32) -> Result<bool, Error> {
        let ratio = self.term.ratio(index)?;
        if ratio.is_vanishing() {
            return Ok(true);
        }
        let threshold = if self.optimized {
            i64::from(accuracy) - 1
        } else {
            let elapsed = i64::from(index) - i64::from(self.min_index);
            i64::from(accuracy) - count_overestimate(elapsed)
        };
        Ok(ratio.overestimate_order()? < threshold)
    }

    /// The series summed to positional accuracy `accuracy`, truncating.
    pub fn approximate(&self, accuracy: i32) -> Result<BigDecimal, Error> {
        if self.negligible(self.min_index, accuracy)? {
            return Ok(BigDecimal::zero());
        }
        let first_negligible =
            finder::smallest_satisfying(self.min_index, |index| self.negligible(index, accuracy))?;
        let count = first_negligible - self.min_index;
        let per_term = accuracy::narrow(
            i64::from(accuracy) - count_overestimate(i64::from(count)),
            "budgeting per-term accuracy",
        )
        .map_err(Error::Decimal)?;
        trace!(count, per_term, accuracy, "series term budget");
        self.accumulation
            .accumulate(&self.term, self.min_index, count, i64::from(per_term))
    }

    /// Order of the sum, found self-referentially: the first term bounds the
    /// sum's order from below, and one coarse evaluation at that position
    /// pins the leading digit.
    pub fn coarse_order(&self) -> Result<i64, Error> {
        let leading = self.term.ratio(self.min_index)?;
        if leading.is_vanishing() {
            return Err(Error::VanishingSeries);
        }
        let lower = leading.order()? - 1;
        let position = accuracy::narrow(lower, "positioning a coarse evaluation")
            .map_err(Error::Decimal)?;
        let coarse = self.approximate(position)?;
        if coarse.is_zero() {
            return Err(Error::VanishingSeries);
        }
        Ok(order::order(&coarse))
    }
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use crate::factory::{gregory_term, InverseFactorial, PowerOverFactorial};

    use super::*;

    fn dec(s: &str) -> BigDecimal {
        BigDecimal::from_str(s).unwrap()
    }

    fn abs_diff(left: &BigDecimal, right: &BigDecimal) -> BigDecimal {
        (left - right).abs()
    }

    #[test]
    fn factorial_series_reaches_requested_accuracy() {
        let series = SeriesApprox::new(InverseFactorial, 0, false, Accumulation::Sequential);
        let e = dec("2.71828182845904523536028747135266");
        for accuracy in [-6, -12, -20] {
            let sum = series.approximate(accuracy).unwrap();
            let budget = BigDecimal::new(num_bigint::BigInt::from(1), i64::from(-accuracy));
            assert!(abs_diff(&sum, &e) < budget);
        }
    }

    #[test]
    fn gregory_series_reaches_requested_accuracy() {
        // 2 * sum = ln 1.5 = 0.405465108108...
        let series = SeriesApprox::new(gregory_term(&dec("1.5")), 0, true, Accumulation::Sequential);
        let half_ln = dec("0.20273255405408219098");
        let sum = series.approximate(-12).unwrap();
        // worst case: one ulp of round-off per term plus the optimized tail
        assert!(abs_diff(&sum, &half_ln) < dec("0.000000000002"));
    }

    #[test]
    fn negligible_leading_term_yields_zero() {
        // 0.1^n/n! at accuracy -1: even the first term is below the cut
        let series = SeriesApprox::new(
            PowerOverFactorial::new(dec("0.0001")),
            1,
            false,
            Accumulation::Sequential,
        );
        let sum = series.approximate(-1).unwrap();
        assert!(sum.is_zero());
    }

    #[test]
    fn per_term_budget_subtracts_the_count_order() {
        // At accuracy -10 the factorial series needs 16 terms, so each term
        // is computed two positions deeper.
        let series = SeriesApprox::new(InverseFactorial, 0, false, Accumulation::Sequential);
        let sum = series.approximate(-10).unwrap();
        assert_eq!(sum.scale(), 12);
    }

    #[test]
    fn coarse_order_of_known_series() {
        let series = SeriesApprox::new(InverseFactorial, 0, false, Accumulation::Sequential);
        assert_eq!(series.coarse_order().unwrap(), 0);

        let series = SeriesApprox::new(gregory_term(&dec("1.5")), 0, true, Accumulation::Sequential);
        // half of ln 1.5 is 0.202...: order -1
        assert_eq!(series.coarse_order().unwrap(), -1);
    }

    #[test]
    fn coarse_order_rejects_vanishing_series() {
        let series = SeriesApprox::new(
            gregory_term(&dec("1")),
            0,
            true,
            Accumulation::Sequential,
        );
        assert!(matches!(series.coarse_order(), Err(Error::VanishingSeries)));
    }

    #[test]
    fn parallel_and_sequential_series_agree() {
        let term = gregory_term(&dec("0.7"));
        let sequential =
            SeriesApprox::new(term.clone(), 0, true, Accumulation::Sequential);
        let parallel = SeriesApprox::new(term, 0, true, Accumulation::Parallel);
        let left = sequential.approximate(-25).unwrap();
        let right = parallel.approximate(-25).unwrap();
        assert_eq!(left.unscaled(), right.unscaled());
        assert_eq!(left.scale(), right.scale());
    }
}
