//! Concrete term families.

use num_bigint::BigInt;
use num_traits::One;

use napier_decimal::BigDecimal;

use crate::term::{IndexMapper, SeriesTerm, SignMapper, TermRatio};
use crate::Error;

fn factorial(n: u32) -> BigInt {
    let mut product = BigInt::one();
    for k in 2..=n {
        product *= k;
    }
    product
}

fn term_index(index: i32) -> Result<u32, Error> {
    u32::try_from(index).map_err(|_| Error::Overflow("widening a term index"))
}

/// `T(n) = 1 / n!` — the Euler-number series.
#[derive(Debug, Clone, Copy)]
pub struct InverseFactorial;

impl SeriesTerm for InverseFactorial {
    fn ratio(&self, index: i32) -> Result<TermRatio, Error> {
        let index = term_index(index)?;
        TermRatio::new(BigDecimal::one(), BigDecimal::from(factorial(index)))
    }
}

/// `T(n) = base^n / n!` — the Maclaurin exponential. The base is owned
/// exactly; for the exponential it is the non-negative fractional part of
/// the argument.
#[derive(Debug, Clone)]
pub struct PowerOverFactorial {
    base: BigDecimal,
}

impl PowerOverFactorial {
    pub fn new(base: BigDecimal) -> Self {
        Self { base }
    }
}

impl SeriesTerm for PowerOverFactorial {
    fn ratio(&self, index: i32) -> Result<TermRatio, Error> {
        let index = term_index(index)?;
        TermRatio::new(
            self.base.pow_exact(index)?,
            BigDecimal::from(factorial(index)),
        )
    }
}

/// `T(n) = sign(n) * (a/b)^m / m` with `m = map(n)` — the power-ratio
/// family behind the Gregory logarithm and the alternating `ln(1+t)`
/// expansion. Exponents must stay positive, so configurations with the
/// identity mapper start at index 1.
#[derive(Debug, Clone)]
pub struct PowerRatioTerm {
    numerator_base: BigDecimal,
    denominator_base: BigDecimal,
    index: IndexMapper,
    sign: SignMapper,
}

impl PowerRatioTerm {
    pub fn new(
        numerator_base: BigDecimal,
        denominator_base: BigDecimal,
        index: IndexMapper,
        sign: SignMapper,
    ) -> Self {
        Self {
            numerator_base,
            denominator_base,
            index,
            sign,
        }
    }
}

impl SeriesTerm for PowerRatioTerm {
    fn ratio(&self, index: i32) -> Result<TermRatio, Error> {
        let exponent = self.index.apply(index)?;
        let raised = term_index(exponent)?;
        let numerator = self.numerator_base.pow_exact(raised)?;
        let denominator = self
            .denominator_base
            .pow_exact(raised)?
            .mul_int(i64::from(exponent));
        TermRatio::new(self.sign.apply(index, numerator), denominator)
    }
}

/// The Gregory-series term for `ln x`:
/// `((x-1)/(x+1))^(2n+1) / (2n+1)`, expressed as the exact pair
/// `(x-1)^(2n+1) / ((x+1)^(2n+1) * (2n+1))`.
pub fn gregory_term(x: &BigDecimal) -> PowerRatioTerm {
    let one = BigDecimal::one();
    PowerRatioTerm::new(x - &one, x + &one, IndexMapper::Odd, SignMapper::Identity)
}
