//! The Euler number e.

use napier_decimal::BigDecimal;
use napier_series::factory::InverseFactorial;
use napier_series::{Accumulation, SeriesApprox};

use crate::facade::Approximator;
use crate::Error;

/// `e = sum 1/n!`, evaluated non-optimized from index zero. Its order is
/// the constant zero.
#[derive(Debug, Clone)]
pub struct EulerApprox {
    series: SeriesApprox<InverseFactorial>,
}

impl EulerApprox {
    pub fn new(accumulation: Accumulation) -> Self {
        Self {
            series: SeriesApprox::new(InverseFactorial, 0, false, accumulation),
        }
    }
}

impl Default for EulerApprox {
    fn default() -> Self {
        Self::new(Accumulation::default())
    }
}

impl Approximator for EulerApprox {
    fn order_estimate(&self) -> Result<i64, Error> {
        Ok(0)
    }

    fn approximate(&self, accuracy: i32) -> Result<BigDecimal, Error> {
        Ok(self.series.approximate(accuracy)?)
    }
}
