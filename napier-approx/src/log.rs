//! Arbitrary-base and common logarithms as quotients of natural ones.

use napier_decimal::{accuracy, BigDecimal};
use napier_series::Accumulation;

use crate::facade::Approximator;
use crate::ln::{LnApprox, LN_DOMAIN};
use crate::Error;

fn narrowed(value: i64, what: &'static str) -> Result<i32, Error> {
    accuracy::narrow(value, what).map_err(Error::Decimal)
}

/// `log_b x = ln x / ln b` for b > 0, b != 1.
///
/// The accuracy split leans on the memoized order estimates of both
/// logarithms: the numerator undercuts the target by the denominator's
/// order, the denominator by the spread between the two, each with two
/// slack digits for the division and subtraction round-off.
#[derive(Debug)]
pub struct LogApprox {
    base: BigDecimal,
    arg: BigDecimal,
    ln_base: LnApprox,
    ln_arg: LnApprox,
}

impl LogApprox {
    pub fn new(base: BigDecimal, arg: BigDecimal) -> Result<Self, Error> {
        Self::with_accumulation(base, arg, Accumulation::default())
    }

    pub fn with_accumulation(
        base: BigDecimal,
        arg: BigDecimal,
        accumulation: Accumulation,
    ) -> Result<Self, Error> {
        if !LN_DOMAIN.contains(&base) || base == BigDecimal::one() {
            return Err(Error::InvalidBase(base.to_string()));
        }
        if !LN_DOMAIN.contains(&arg) {
            return Err(Error::OutsideDomain {
                function: "log",
                argument: arg.to_string(),
            });
        }
        Ok(Self {
            ln_base: LnApprox::with_accumulation(base.clone(), accumulation)?,
            ln_arg: LnApprox::with_accumulation(arg.clone(), accumulation)?,
            base,
            arg,
        })
    }
}

impl Approximator for LogApprox {
    fn order_estimate(&self) -> Result<i64, Error> {
        if self.arg == BigDecimal::one() || self.arg == self.base {
            return Ok(0);
        }
        let numerator = self.ln_arg.order_estimate()?;
        let denominator = self.ln_base.order_estimate()?;
        Ok(numerator - denominator - 1)
    }

    fn approximate(&self, accuracy: i32) -> Result<BigDecimal, Error> {
        if self.arg == BigDecimal::one() {
            return Ok(BigDecimal::zero());
        }
        // the quotient of two one-sided approximations of the same value
        // could land on either side of the exact 1
        if self.arg == self.base {
            return Ok(BigDecimal::one());
        }
        let numerator_order = self.ln_arg.order_estimate()?;
        let denominator_order = self.ln_base.order_estimate()?;
        let numerator = self.ln_arg.approximate(narrowed(
            i64::from(accuracy) - denominator_order - 2,
            "allocating a logarithm numerator",
        )?)?;
        let denominator = self.ln_base.approximate(narrowed(
            i64::from(accuracy) + 2 * denominator_order - numerator_order - 2,
            "allocating a logarithm denominator",
        )?)?;
        Ok(numerator
            .div_at(&denominator, i64::from(accuracy))
            .map_err(Error::Decimal)?)
    }
}

/// `log10 x` with the base hard-coded: ln 10 has a known order, so the
/// denominator allocation simplifies.
#[derive(Debug)]
pub struct Log10Approx {
    arg: BigDecimal,
    ln_ten: LnApprox,
    ln_arg: LnApprox,
}

impl Log10Approx {
    pub fn new(arg: BigDecimal) -> Result<Self, Error> {
        Self::with_accumulation(arg, Accumulation::default())
    }

    pub fn with_accumulation(arg: BigDecimal, accumulation: Accumulation) -> Result<Self, Error> {
        if !LN_DOMAIN.contains(&arg) {
            return Err(Error::OutsideDomain {
                function: "log10",
                argument: arg.to_string(),
            });
        }
        Ok(Self {
            ln_ten: LnApprox::with_accumulation(BigDecimal::from(10i64), accumulation)?,
            ln_arg: LnApprox::with_accumulation(arg.clone(), accumulation)?,
            arg,
        })
    }
}

impl Approximator for Log10Approx {
    fn order_estimate(&self) -> Result<i64, Error> {
        if self.arg == BigDecimal::one() || self.arg == BigDecimal::from(10i64) {
            return Ok(0);
        }
        Ok(self.ln_arg.order_estimate()? - 1)
    }

    fn approximate(&self, accuracy: i32) -> Result<BigDecimal, Error> {
        if self.arg == BigDecimal::one() {
            return Ok(BigDecimal::zero());
        }
        if self.arg == BigDecimal::from(10i64) {
            return Ok(BigDecimal::one());
        }
        let numerator_order = self.ln_arg.order_estimate()?;
        let numerator = self.ln_arg.approximate(narrowed(
            i64::from(accuracy) - 2,
            "allocating a logarithm numerator",
        )?)?;
        let denominator = self.ln_ten.approximate(narrowed(
            i64::from(accuracy) - numerator_order - 1,
            "allocating a logarithm denominator",
        )?)?;
        Ok(numerator
            .div_at(&denominator, i64::from(accuracy))
            .map_err(Error::Decimal)?)
    }
}
