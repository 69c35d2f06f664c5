/*!
# Arbitrary-precision logarithms and exponentials

Function approximators that return a [`BigDecimal`] correct in every digit
after rounding to a requested significant-digit precision: the natural and
common logarithms, arbitrary-base logarithms, the exponential, the constant
e, and `pow` composed from the two.

Each approximator is a reusable value bound to its arguments; the
[`facade`] converts a (precision, rounding-mode) request into the
positional accuracy the cores work in and applies the final rounding.

```no_run
use std::str::FromStr;
use napier_approx::{ln, RoundingMode};
use napier_decimal::BigDecimal;

let two = BigDecimal::from_str("2").unwrap();
let value = ln(&two, 10, RoundingMode::HalfUp).unwrap();
assert_eq!(value.to_string(), "0.6931471806");
```
*/

use thiserror::Error;

pub mod euler;
pub mod exp;
pub mod facade;
pub mod ln;
pub mod log;
pub mod pow;

pub use euler::EulerApprox;
pub use exp::ExpApprox;
pub use facade::{e, evaluate, exp, ln, log, log10, pow, Approximator, MathContext};
pub use ln::{GregoryLn, LnApprox};
pub use log::{Log10Approx, LogApprox};
pub use pow::PowApprox;

pub use napier_decimal::{BigDecimal, RoundingMode};
pub use napier_series::Accumulation;

#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Series(#[from] napier_series::Error),

    #[error(transparent)]
    Decimal(#[from] napier_decimal::Error),

    #[error("{function} is undefined for argument {argument}")]
    OutsideDomain {
        function: &'static str,
        argument: String,
    },

    #[error("logarithm base {0} is invalid")]
    InvalidBase(String),
}
