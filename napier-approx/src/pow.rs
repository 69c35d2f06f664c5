//! General powers composed from the two cores: `x^y = exp(y * ln x)`.

use num_bigint::BigInt;
use num_traits::ToPrimitive;
use once_cell::sync::OnceCell;

use napier_decimal::{accuracy, order, BigDecimal};
use napier_series::Accumulation;

use crate::exp::{overflow, ExpApprox};
use crate::facade::Approximator;
use crate::ln::{LnApprox, LN_DOMAIN};
use crate::Error;

fn narrowed(value: i64, what: &'static str) -> Result<i32, Error> {
    accuracy::narrow(value, what).map_err(Error::Decimal)
}

/// `x^y` for x > 0 and any y.
///
/// A coarse product `y * ln x` drives both the order estimate and the
/// accuracy chain: the exponent-side upper order bound converts the target
/// into the accuracy of the product, and the order of y converts that into
/// the accuracy of the logarithm.
#[derive(Debug)]
pub struct PowApprox {
    base: BigDecimal,
    exponent: BigDecimal,
    ln_base: LnApprox,
    accumulation: Accumulation,
    order: OnceCell<i64>,
}

impl PowApprox {
    pub fn new(base: BigDecimal, exponent: BigDecimal) -> Result<Self, Error> {
        Self::with_accumulation(base, exponent, Accumulation::default())
    }

    pub fn with_accumulation(
        base: BigDecimal,
        exponent: BigDecimal,
        accumulation: Accumulation,
    ) -> Result<Self, Error> {
        if !LN_DOMAIN.contains(&base) {
            return Err(Error::OutsideDomain {
                function: "pow",
                argument: base.to_string(),
            });
        }
        Ok(Self {
            ln_base: LnApprox::with_accumulation(base.clone(), accumulation)?,
            base,
            exponent,
            accumulation,
            order: OnceCell::new(),
        })
    }

    fn is_trivial(&self) -> bool {
        self.exponent.is_zero() || self.base == BigDecimal::one()
    }

    /// `y * ln x` with the logarithm taken a couple of digits past its own
    /// order; enough to locate the product, never enough to finish it.
    fn coarse_product(&self) -> Result<BigDecimal, Error> {
        let leading = self.ln_base.order_estimate()?;
        let coarse =
            self.ln_base
                .approximate(narrowed(leading - 2, "positioning a coarse logarithm")?)?;
        Ok(&self.exponent * &coarse)
    }

    /// Upper bound B with `e^t <= 10^B`, from `e^t < 3^(ceil(t)+1)`; the
    /// extra power of three absorbs the coarseness of the estimate of t.
    fn exponential_bound(product: &BigDecimal) -> Result<i64, Error> {
        if product.is_negative() || product.is_zero() {
            return Ok(0);
        }
        let ceiling = -(-product).to_integer_floor();
        let ceiling = ceiling
            .to_u32()
            .and_then(|c| c.checked_add(1))
            .ok_or_else(|| overflow("widening a power bound"))?;
        Ok(order::int_overestimate_order(&BigInt::from(3).pow(ceiling)))
    }
}

impl Approximator for PowApprox {
    fn order_estimate(&self) -> Result<i64, Error> {
        self.order
            .get_or_try_init(|| {
                if self.is_trivial() {
                    return Ok(0);
                }
                ExpApprox::with_accumulation(self.coarse_product()?, self.accumulation)
                    .order_estimate()
            })
            .copied()
    }

    fn approximate(&self, accuracy: i32) -> Result<BigDecimal, Error> {
        if self.is_trivial() {
            return Ok(BigDecimal::one());
        }
        let bound = Self::exponential_bound(&self.coarse_product()?)?;
        let product_accuracy = narrowed(
            i64::from(accuracy) - bound - 1,
            "allocating an exponent product",
        )?;
        let ln_accuracy = narrowed(
            i64::from(product_accuracy) - order::overestimate_order(&self.exponent),
            "allocating a power logarithm",
        )?;
        let ln_value = self.ln_base.approximate(ln_accuracy)?;
        let product = (&self.exponent * &ln_value)
            .truncate_at(i64::from(product_accuracy))
            .map_err(Error::Decimal)?;
        let deeper = accuracy
            .checked_sub(1)
            .ok_or_else(|| overflow("guarding a recomposition"))?;
        ExpApprox::with_accumulation(product, self.accumulation).approximate(deeper)
    }
}
