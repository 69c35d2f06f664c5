//! Mapping (precision, rounding) requests onto positionally-accurate
//! approximators.

use tracing::debug;

use napier_decimal::{accuracy, AccuracyStrategy, BigDecimal, RoundingMode};

use crate::euler::EulerApprox;
use crate::exp::ExpApprox;
use crate::ln::LnApprox;
use crate::log::{Log10Approx, LogApprox};
use crate::pow::PowApprox;
use crate::Error;

/// A reusable function approximator bound to its arguments.
///
/// `approximate` works purely positionally: the result is accurate at the
/// requested decimal position up to the small assembly slack the facade's
/// safety margin absorbs. Callers that already know their positional
/// accuracy can use it directly and skip the P-to-p conversion.
pub trait Approximator {
    /// A lower estimate of the base-10 order of the result, memoized where
    /// it costs anything to produce.
    fn order_estimate(&self) -> Result<i64, Error>;

    /// The result computed to positional accuracy `accuracy`, truncating.
    fn approximate(&self, accuracy: i32) -> Result<BigDecimal, Error>;

    /// `approximate` followed by a final rounding at the same position.
    fn approximate_rounded(
        &self,
        accuracy: i32,
        rounding: RoundingMode,
    ) -> Result<BigDecimal, Error> {
        Ok(self
            .approximate(accuracy)?
            .round_at(i64::from(accuracy), rounding)?)
    }
}

/// Significant-digit precision plus a rounding mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MathContext {
    precision: u32,
    rounding: RoundingMode,
}

impl MathContext {
    pub fn new(precision: u32, rounding: RoundingMode) -> Result<Self, Error> {
        if precision == 0 {
            return Err(napier_decimal::Error::PrecisionUnderflow(0).into());
        }
        Ok(Self {
            precision,
            rounding,
        })
    }

    pub fn precision(&self) -> u32 {
        self.precision
    }

    pub fn rounding(&self) -> RoundingMode {
        self.rounding
    }
}

/// Evaluate an approximator under a context: derive the positional
/// accuracy from the order estimate, apply the positional safety margin,
/// approximate, and round to the requested significant digits against the
/// order the result actually has.
pub fn evaluate<A: Approximator>(
    approximator: &A,
    context: &MathContext,
) -> Result<BigDecimal, Error> {
    let estimate = approximator.order_estimate()?;
    let position = accuracy::positional_for_significant(estimate, context.precision)
        .map_err(Error::Decimal)?;
    let adjusted = AccuracyStrategy::Positional
        .adjust(position)
        .map_err(Error::Decimal)?;
    debug!(
        estimate,
        adjusted,
        precision = context.precision,
        "evaluating approximator"
    );
    let raw = approximator.approximate(adjusted)?;
    Ok(raw.round_to_significant(context.precision, context.rounding)?)
}

/// Natural logarithm of x > 0.
pub fn ln(x: &BigDecimal, precision: u32, rounding: RoundingMode) -> Result<BigDecimal, Error> {
    let context = MathContext::new(precision, rounding)?;
    evaluate(&LnApprox::new(x.clone())?, &context)
}

/// Common logarithm of x > 0.
pub fn log10(x: &BigDecimal, precision: u32, rounding: RoundingMode) -> Result<BigDecimal, Error> {
    let context = MathContext::new(precision, rounding)?;
    evaluate(&Log10Approx::new(x.clone())?, &context)
}

/// Logarithm of x > 0 in base b > 0, b != 1.
pub fn log(
    base: &BigDecimal,
    x: &BigDecimal,
    precision: u32,
    rounding: RoundingMode,
) -> Result<BigDecimal, Error> {
    let context = MathContext::new(precision, rounding)?;
    evaluate(&LogApprox::new(base.clone(), x.clone())?, &context)
}

/// Exponential of any x.
pub fn exp(x: &BigDecimal, precision: u32, rounding: RoundingMode) -> Result<BigDecimal, Error> {
    let context = MathContext::new(precision, rounding)?;
    evaluate(&ExpApprox::new(x.clone()), &context)
}

/// The Euler number.
pub fn e(precision: u32, rounding: RoundingMode) -> Result<BigDecimal, Error> {
    let context = MathContext::new(precision, rounding)?;
    evaluate(&EulerApprox::default(), &context)
}

/// `x^y` for x > 0.
pub fn pow(
    x: &BigDecimal,
    y: &BigDecimal,
    precision: u32,
    rounding: RoundingMode,
) -> Result<BigDecimal, Error> {
    let context = MathContext::new(precision, rounding)?;
    evaluate(&PowApprox::new(x.clone(), y.clone())?, &context)
}
