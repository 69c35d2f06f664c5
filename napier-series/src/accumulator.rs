//! Accumulation strategies for a block of series terms.

use rayon::prelude::*;
use rayon::ThreadPoolBuilder;
use tracing::trace;

use napier_decimal::BigDecimal;

use crate::term::SeriesTerm;
use crate::Error;

/// How the terms of one approximation call are summed.
///
/// Both strategies produce byte-identical sums: every term is truncated at
/// the same position before the addition, and exact decimal addition is
/// commutative and associative, so the reduction shape cannot matter. The
/// parallel strategy owns a short-lived pool sized to hardware parallelism
/// for the duration of a single call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Accumulation {
    Sequential,
    #[default]
    Parallel,
}

impl Accumulation {
    /// Sum `count` terms starting at `min_index`, each computed to
    /// positional accuracy `accuracy`. The first failing term aborts the
    /// whole sum; partial results are discarded.
    pub fn accumulate<T: SeriesTerm>(
        self,
        term: &T,
        min_index: i32,
        count: i32,
        accuracy: i64,
    ) -> Result<BigDecimal, Error> {
        if count <= 0 {
            return Ok(BigDecimal::zero());
        }
        let end = min_index + count;
        trace!(min_index, count, accuracy, "accumulating series terms");
        match self {
            Accumulation::Sequential => {
                let mut sum = BigDecimal::zero();
                for index in min_index..end {
                    sum = &sum + &term.approximate(index, accuracy)?;
                }
                Ok(sum)
            }
            Accumulation::Parallel => {
                let pool = ThreadPoolBuilder::new()
                    .build()
                    .map_err(|source| Error::Pool(source.to_string()))?;
                pool.install(|| {
                    (min_index..end)
                        .into_par_iter()
                        .map(|index| term.approximate(index, accuracy))
                        .try_reduce(BigDecimal::zero, |left, right| Ok(left + right))
                })
            }
        }
    }
}
