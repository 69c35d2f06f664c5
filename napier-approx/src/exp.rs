//! The exponential.

use num_bigint::BigInt;
use num_traits::ToPrimitive;
use once_cell::sync::OnceCell;
use tracing::trace;

use napier_decimal::{accuracy, order, BigDecimal};
use napier_series::factory::PowerOverFactorial;
use napier_series::{Accumulation, SeriesApprox};

use crate::euler::EulerApprox;
use crate::facade::Approximator;
use crate::Error;

pub(crate) fn overflow(what: &'static str) -> Error {
    Error::Decimal(napier_decimal::Error::Overflow(what))
}

fn narrowed(value: i64, what: &'static str) -> Result<i32, Error> {
    accuracy::narrow(value, what).map_err(Error::Decimal)
}

/// `e^exponent` for an integer exponent.
///
/// e is evaluated once at a working accuracy and raised by squaring with
/// per-step truncation; the `e^k <= 3^k` bound sizes how far the per-step
/// error can be amplified, so the working accuracy undercuts the target by
/// `oo(k) + oo(3^(k-1))` positions. Negative exponents reciprocate at one
/// guard digit.
pub(crate) fn exp_integer(
    exponent: i32,
    accuracy: i32,
    accumulation: Accumulation,
) -> Result<BigDecimal, Error> {
    if exponent == 0 {
        return Ok(BigDecimal::one());
    }
    if exponent < 0 {
        let guard = accuracy
            .checked_sub(1)
            .ok_or_else(|| overflow("guarding a reciprocal"))?;
        let reflected = exponent
            .checked_neg()
            .ok_or_else(|| overflow("negating an exponent"))?;
        let magnitude = exp_integer(reflected, guard, accumulation)?;
        return Ok(BigDecimal::one()
            .div_at(&magnitude, i64::from(guard))
            .map_err(Error::Decimal)?);
    }
    let margin = order::int_overestimate_order(&BigInt::from(exponent));
    let power_margin = order::int_overestimate_order(&BigInt::from(3).pow(exponent as u32 - 1));
    let work = narrowed(
        i64::from(accuracy) - 1 - margin - power_margin,
        "allocating an integer exponential",
    )?;
    let euler = EulerApprox::new(accumulation).approximate(work)?;
    Ok(euler
        .pow_at(exponent as u32, i64::from(work))
        .map_err(Error::Decimal)?)
}

/// `e^x` for any big-decimal x.
///
/// Dispatch: zero and one are exact or deferred to the Euler series;
/// negative arguments reciprocate; arguments below one feed the Maclaurin
/// series directly; everything else splits into `e^floor * exp(fraction)`.
#[derive(Debug)]
pub struct ExpApprox {
    arg: BigDecimal,
    accumulation: Accumulation,
    order: OnceCell<i64>,
}

impl ExpApprox {
    pub fn new(arg: BigDecimal) -> Self {
        Self::with_accumulation(arg, Accumulation::default())
    }

    pub fn with_accumulation(arg: BigDecimal, accumulation: Accumulation) -> Self {
        Self {
            arg,
            accumulation,
            order: OnceCell::new(),
        }
    }

    /// `k = floor(arg)` and the non-negative `f = arg - k`, recomposed
    /// downstream as the pure product `e^arg = e^k * exp(f)`.
    fn split(&self) -> Result<(i32, BigDecimal), Error> {
        let floor = self.arg.to_integer_floor();
        let k = floor
            .to_i32()
            .ok_or_else(|| overflow("narrowing the integer part of an exponent"))?;
        let fraction = &self.arg - &BigDecimal::from(&floor);
        Ok((k, fraction))
    }

    fn fraction_series(&self, base: BigDecimal) -> SeriesApprox<PowerOverFactorial> {
        SeriesApprox::new(PowerOverFactorial::new(base), 0, false, self.accumulation)
    }
}

impl Approximator for ExpApprox {
    /// Lower estimate of the result order: `e^x > 2^k` above one and
    /// `e^x > 3^k` below zero (e sits between 2 and 3, so the cheap bound
    /// flips base across the sign); inside [0, 1) the series answers.
    fn order_estimate(&self) -> Result<i64, Error> {
        self.order
            .get_or_try_init(|| {
                if self.arg.is_zero() {
                    return Ok(0);
                }
                let (k, _) = self.split()?;
                if k == 0 {
                    return Ok(self.fraction_series(self.arg.clone()).coarse_order()?);
                }
                if k > 0 {
                    let bound = BigInt::from(2).pow(k.unsigned_abs());
                    Ok(order::decimal_digits(bound.magnitude()) as i64 - 1)
                } else {
                    let bound = BigInt::from(3).pow(k.unsigned_abs());
                    Ok(-(order::decimal_digits(bound.magnitude()) as i64))
                }
            })
            .copied()
    }

    fn approximate(&self, accuracy: i32) -> Result<BigDecimal, Error> {
        if self.arg.is_zero() {
            return Ok(BigDecimal::one());
        }
        if self.arg.is_negative() {
            let guard = accuracy
                .checked_sub(1)
                .ok_or_else(|| overflow("guarding a reciprocal"))?;
            let reflected = ExpApprox::with_accumulation(-&self.arg, self.accumulation);
            let magnitude = reflected.approximate(guard)?;
            return Ok(BigDecimal::one()
                .div_at(&magnitude, i64::from(guard))
                .map_err(Error::Decimal)?);
        }
        if self.arg == BigDecimal::one() {
            return EulerApprox::new(self.accumulation).approximate(accuracy);
        }
        let (k, fraction) = self.split()?;
        if k == 0 {
            return Ok(self.fraction_series(self.arg.clone()).approximate(accuracy)?);
        }
        trace!(k, accuracy, "splitting the exponent");
        let assembled = accuracy
            .checked_sub(1)
            .ok_or_else(|| overflow("guarding a recomposition"))?;
        let integer_part = exp_integer(k, assembled, self.accumulation)?;
        let fractional = if fraction.is_zero() {
            BigDecimal::one()
        } else {
            let bound =
                order::int_overestimate_order(&BigInt::from(3).pow(k.unsigned_abs() + 1));
            let position = narrowed(
                i64::from(assembled) - bound,
                "allocating a fractional exponential",
            )?;
            self.fraction_series(fraction).approximate(position)?
        };
        Ok((&integer_part * &fractional)
            .truncate_at(i64::from(assembled))
            .map_err(Error::Decimal)?)
    }
}
