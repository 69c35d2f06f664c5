/*!
# Scaled decimal big numbers

Building blocks for arbitrary-accuracy decimal computation: a signed big
decimal with an explicit power-of-ten scale, positional rounding in seven
modes, base-10 order estimation, the positional/significant accuracy model
and interval descriptors for domain validation.

Every numeric path in the `napier` workspace goes through [`BigDecimal`];
no native float ever participates in a computation.
*/

use thiserror::Error;

pub mod accuracy;
pub mod decimal;
pub mod interval;
pub mod order;
pub mod rounding;

pub use accuracy::AccuracyStrategy;
pub use decimal::BigDecimal;
pub use interval::{Interval, IntervalKind};
pub use rounding::RoundingMode;

#[derive(Error, Debug)]
pub enum Error {
    #[error("integer overflow while {0}")]
    Overflow(&'static str),

    #[error("significant precision must be positive, got {0}")]
    PrecisionUnderflow(i64),

    #[error("division by zero")]
    DivisionByZero,

    #[error("invalid decimal literal: {0}")]
    BadDecimalLiteral(String),

    #[error("interval bounds do not fit kind: {0}")]
    MalformedInterval(&'static str),
}
