//! Arbitrary-precision logarithms and exponentials in native Rust.
//!
//! Napier computes ln, log10, arbitrary-base logarithms, the exponential,
//! the constant e and general powers to any requested count of significant
//! digits, correctly rounded in the requested mode. This crate doesn't add
//! behavior of its own; it re-exports the workspace members as modules so
//! applications depend on a single entry point.

#[doc(inline)]
pub use napier_decimal as decimal;

#[doc(inline)]
pub use napier_series as series;

#[doc(inline)]
pub use napier_approx as approx;

pub use napier_approx::{e, exp, ln, log, log10, pow};
pub use napier_decimal::{BigDecimal, RoundingMode};
