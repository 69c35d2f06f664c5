//! The natural logarithm: the Gregory series on its fast-converging window
//! and the scaling reduction that brings every positive argument into it.

use num_bigint::BigInt;
use once_cell::sync::{Lazy, OnceCell};
use tracing::trace;

use napier_decimal::{accuracy, order, BigDecimal, Interval};
use napier_series::factory::{gregory_term, PowerRatioTerm};
use napier_series::{finder, Accumulation, SeriesApprox};

use crate::exp::{exp_integer, overflow};
use crate::facade::Approximator;
use crate::Error;

pub(crate) static LN_DOMAIN: Lazy<Interval> =
    Lazy::new(|| Interval::greater_than(BigDecimal::zero()).expect("zero-bounded half line"));

static WINDOW_FLOOR: Lazy<BigDecimal> = Lazy::new(|| BigDecimal::new(BigInt::from(52), 2));

static WINDOW_CEILING: Lazy<BigDecimal> = Lazy::new(|| BigDecimal::new(BigInt::from(192), 2));

/// Inside this window the Gregory ratio `z = (x-1)/(x+1)` satisfies
/// `z^2 <= 1/10`, which is what licenses the optimized negligibility cut.
static GREGORY_WINDOW: Lazy<Interval> = Lazy::new(|| {
    Interval::closed(WINDOW_FLOOR.clone(), WINDOW_CEILING.clone()).expect("ordered window bounds")
});

fn narrowed(value: i64, what: &'static str) -> Result<i32, Error> {
    accuracy::narrow(value, what).map_err(Error::Decimal)
}

/// `ln x = 2 * sum ((x-1)/(x+1))^(2n+1) / (2n+1)` for x already inside the
/// window. The doubling happens on a series evaluated one position deeper.
#[derive(Debug)]
pub struct GregoryLn {
    series: SeriesApprox<PowerRatioTerm>,
}

impl GregoryLn {
    pub fn new(arg: BigDecimal, accumulation: Accumulation) -> Self {
        Self {
            series: SeriesApprox::new(gregory_term(&arg), 0, true, accumulation),
        }
    }
}

impl Approximator for GregoryLn {
    fn order_estimate(&self) -> Result<i64, Error> {
        Ok(self.series.coarse_order()?)
    }

    fn approximate(&self, accuracy: i32) -> Result<BigDecimal, Error> {
        let deeper = accuracy
            .checked_sub(1)
            .ok_or_else(|| overflow("guarding a doubled series"))?;
        Ok(self.series.approximate(deeper)?.mul_int(2))
    }
}

/// General natural logarithm for x > 0.
///
/// A scaling exponent m with `y = x * e^(-m)` inside the window is solved
/// once per approximator and memoized; the result recomposes as
/// `ln x = ln y + m`.
#[derive(Debug)]
pub struct LnApprox {
    arg: BigDecimal,
    accumulation: Accumulation,
    scaling: OnceCell<i32>,
    order: OnceCell<i64>,
}

impl LnApprox {
    pub fn new(arg: BigDecimal) -> Result<Self, Error> {
        Self::with_accumulation(arg, Accumulation::default())
    }

    pub fn with_accumulation(arg: BigDecimal, accumulation: Accumulation) -> Result<Self, Error> {
        if !LN_DOMAIN.contains(&arg) {
            return Err(Error::OutsideDomain {
                function: "ln",
                argument: arg.to_string(),
            });
        }
        Ok(Self {
            arg,
            accumulation,
            scaling: OnceCell::new(),
            order: OnceCell::new(),
        })
    }

    /// The smallest m with `e^m >= x`, probed at a couple of digits beyond
    /// the argument's own order, then stepped back once when the reduced
    /// argument lands below the window (it gains a factor e and lands
    /// inside).
    fn scaling_exponent(&self) -> Result<i32, Error> {
        self.scaling
            .get_or_try_init(|| {
                if GREGORY_WINDOW.contains(&self.arg) {
                    return Ok(0);
                }
                let probe = narrowed(order::order(&self.arg) - 2, "positioning scaling probes")?;
                let m = finder::smallest_satisfying(0, |i| {
                    Ok::<bool, Error>(exp_integer(i, probe, self.accumulation)? >= self.arg)
                })?;
                // the border check must resolve the window floor even when
                // the probes themselves are coarser than one
                let reduced = self.reduce(m, probe.min(-2))?;
                if reduced < *WINDOW_FLOOR {
                    trace!(m, "stepping the scaling exponent back at the window border");
                    m.checked_sub(1)
                        .ok_or_else(|| overflow("stepping back a scaling exponent"))
                } else {
                    Ok(m)
                }
            })
            .copied()
    }

    /// `x * e^(-m)` truncated at `accuracy`; the factor is computed deep
    /// enough that the multiplication by x cannot erode the target.
    fn reduce(&self, m: i32, accuracy: i32) -> Result<BigDecimal, Error> {
        let factor_accuracy = narrowed(
            i64::from(accuracy) - order::overestimate_order(&self.arg) - 1,
            "allocating a scaling factor",
        )?;
        let negated = m
            .checked_neg()
            .ok_or_else(|| overflow("negating the scaling exponent"))?;
        let factor = exp_integer(negated, factor_accuracy, self.accumulation)?;
        Ok((&self.arg * &factor)
            .truncate_at(i64::from(accuracy))
            .map_err(Error::Decimal)?)
    }
}

impl Approximator for LnApprox {
    fn order_estimate(&self) -> Result<i64, Error> {
        self.order
            .get_or_try_init(|| {
                if self.arg == BigDecimal::one() {
                    return Ok(0);
                }
                let m = self.scaling_exponent()?;
                if m == 0 {
                    GregoryLn::new(self.arg.clone(), self.accumulation).order_estimate()
                } else {
                    let digits = order::decimal_digits(BigInt::from(m).magnitude());
                    Ok(digits as i64 - 2)
                }
            })
            .copied()
    }

    fn approximate(&self, accuracy: i32) -> Result<BigDecimal, Error> {
        if self.arg == BigDecimal::one() {
            return Ok(BigDecimal::zero());
        }
        let m = self.scaling_exponent()?;
        if m == 0 {
            return GregoryLn::new(self.arg.clone(), self.accumulation).approximate(accuracy);
        }
        trace!(m, accuracy, "reducing into the series window");
        let padding = order::overestimate_order(&self.arg.mul_int(2));
        let working = narrowed(i64::from(accuracy) - padding, "allocating a reduced argument")?;
        let reduced = self.reduce(m, working)?;
        let deeper = accuracy
            .checked_sub(1)
            .ok_or_else(|| overflow("guarding a recomposition"))?;
        let inner = GregoryLn::new(reduced, self.accumulation).approximate(deeper)?;
        Ok(&inner + &BigDecimal::from(i64::from(m)))
    }
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use super::*;

    fn dec(s: &str) -> BigDecimal {
        BigDecimal::from_str(s).unwrap()
    }

    fn sequential(arg: &str) -> LnApprox {
        LnApprox::with_accumulation(dec(arg), Accumulation::Sequential).unwrap()
    }

    fn assert_close(value: &BigDecimal, reference: &str, budget: &str) {
        let diff = (value - &dec(reference)).abs();
        assert!(
            diff < dec(budget),
            "got {value}, wanted {reference} within {budget}"
        );
    }

    #[test]
    fn domain_is_validated_up_front() {
        assert!(matches!(
            LnApprox::new(BigDecimal::zero()),
            Err(Error::OutsideDomain { function: "ln", .. })
        ));
        assert!(matches!(
            LnApprox::new(dec("-2")),
            Err(Error::OutsideDomain { .. })
        ));
    }

    #[test]
    fn ln_of_one_is_exactly_zero() {
        let value = sequential("1").approximate(-30).unwrap();
        assert!(value.is_zero());
        assert_eq!(sequential("1").order_estimate().unwrap(), 0);
    }

    #[test]
    fn gregory_tier_handles_the_window() {
        let inner = GregoryLn::new(dec("1.5"), Accumulation::Sequential);
        let value = inner.approximate(-14).unwrap();
        assert_close(&value, "0.40546510810816438198", "0.0000000000001");
        let below_one = GregoryLn::new(dec("0.7"), Accumulation::Sequential);
        let value = below_one.approximate(-14).unwrap();
        assert_close(&value, "-0.35667494393873237891", "0.0000000000001");
    }

    #[test]
    fn window_arguments_skip_the_reduction() {
        assert_eq!(sequential("0.7").scaling_exponent().unwrap(), 0);
        assert_eq!(sequential("1.92").scaling_exponent().unwrap(), 0);
    }

    #[test]
    fn scaling_exponents_with_border_fixups() {
        // e^1 >= 2 and 2/e = 0.735 stays inside the window
        assert_eq!(sequential("2").scaling_exponent().unwrap(), 1);
        // e^3 >= 10 but 10/e^3 = 0.497 falls below it
        assert_eq!(sequential("10").scaling_exponent().unwrap(), 2);
        // 81/e^5 = 0.5458 sits just above the floor
        assert_eq!(sequential("81").scaling_exponent().unwrap(), 5);
        // e^-2 = 0.135 >= 0.1 fails only at -3; 0.1e^2 = 0.739 is inside
        assert_eq!(sequential("0.1").scaling_exponent().unwrap(), -2);
    }

    #[test]
    fn reduced_arguments_recompose() {
        let value = sequential("2").approximate(-14).unwrap();
        assert_close(&value, "0.69314718055994530942", "0.00000000000005");
        let value = sequential("10").approximate(-14).unwrap();
        assert_close(&value, "2.30258509299404568402", "0.00000000000005");
        let value = sequential("81").approximate(-14).unwrap();
        assert_close(&value, "4.39444915467243877298", "0.00000000000005");
        let value = sequential("0.1").approximate(-14).unwrap();
        assert_close(&value, "-2.30258509299404568402", "0.00000000000005");
    }

    #[test]
    fn order_estimates() {
        // ln 2 = 0.693: the scaling path estimates from m = 1
        assert_eq!(sequential("2").order_estimate().unwrap(), -1);
        // ln 1.5 = 0.405: the Gregory path answers
        assert_eq!(sequential("1.5").order_estimate().unwrap(), -1);
        // ln 10 = 2.30 via m = 2
        assert_eq!(sequential("10").order_estimate().unwrap(), -1);
        // near one the estimate tracks the tiny leading term
        assert_eq!(sequential("1.001").order_estimate().unwrap(), -4);
    }

    #[test]
    fn arguments_close_to_one_keep_absolute_accuracy() {
        // ln(1.000001) = 9.9999950000033e-7
        let value = sequential("1.000001").approximate(-20).unwrap();
        assert_close(&value, "0.00000099999950000033", "0.00000000000000000005");
    }

    #[test]
    fn memoized_scaling_is_stable() {
        let approx = sequential("81");
        assert_eq!(approx.scaling_exponent().unwrap(), 5);
        assert_eq!(approx.scaling_exponent().unwrap(), 5);
    }
}
