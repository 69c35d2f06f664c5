/*!
# Series machinery

Everything needed to turn a term generator into a sum that is provably
accurate at a requested decimal position: the term contract and its exact
numerator/denominator representation, concrete term families (factorial,
power-over-factorial, power-ratio), the adaptive integer finder, the
convergence/accuracy accounting of the series engine, and sequential or
parallel accumulation of truncated terms.
*/

use thiserror::Error;

pub mod accumulator;
pub mod engine;
pub mod factory;
pub mod finder;
pub mod term;

pub use accumulator::Accumulation;
pub use engine::SeriesApprox;
pub use term::{IndexMapper, SeriesTerm, SignMapper, TermRatio};

#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Decimal(#[from] napier_decimal::Error),

    #[error("integer overflow while {0}")]
    Overflow(&'static str),

    #[error("order estimate requested for a vanishing series")]
    VanishingSeries,

    #[error("worker pool failure: {0}")]
    Pool(String),
}
