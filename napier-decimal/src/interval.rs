//! Argument-range descriptors for domain validation.
//!
//! Intervals only answer membership questions; no interval arithmetic is
//! ever performed on them.

use crate::decimal::BigDecimal;
use crate::Error;

/// Which bounds exist and whether each finite bound is attained.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IntervalKind {
    Closed,
    Open,
    LeftOpen,
    RightOpen,
    LeftUnboundedOpen,
    RightUnboundedOpen,
    LeftUnboundedClosed,
    RightUnboundedClosed,
    Unbounded,
}

impl IntervalKind {
    fn needs_lower(self) -> bool {
        !matches!(
            self,
            IntervalKind::LeftUnboundedOpen
                | IntervalKind::LeftUnboundedClosed
                | IntervalKind::Unbounded
        )
    }

    fn needs_upper(self) -> bool {
        !matches!(
            self,
            IntervalKind::RightUnboundedOpen
                | IntervalKind::RightUnboundedClosed
                | IntervalKind::Unbounded
        )
    }

    fn lower_attained(self) -> bool {
        matches!(
            self,
            IntervalKind::Closed | IntervalKind::RightOpen | IntervalKind::RightUnboundedClosed
        )
    }

    fn upper_attained(self) -> bool {
        matches!(
            self,
            IntervalKind::Closed | IntervalKind::LeftOpen | IntervalKind::LeftUnboundedClosed
        )
    }
}

/// A typed pair of bounds; the kind dictates which bounds must be present.
#[derive(Debug, Clone)]
pub struct Interval {
    kind: IntervalKind,
    lower: Option<BigDecimal>,
    upper: Option<BigDecimal>,
}

impl Interval {
    pub fn new(
        kind: IntervalKind,
        lower: Option<BigDecimal>,
        upper: Option<BigDecimal>,
    ) -> Result<Self, Error> {
        if kind.needs_lower() != lower.is_some() {
            return Err(Error::MalformedInterval("lower bound presence"));
        }
        if kind.needs_upper() != upper.is_some() {
            return Err(Error::MalformedInterval("upper bound presence"));
        }
        if let (Some(low), Some(high)) = (&lower, &upper) {
            if low > high {
                return Err(Error::MalformedInterval("bounds out of order"));
            }
        }
        Ok(Self { kind, lower, upper })
    }

    /// `[lower, upper]`
    pub fn closed(lower: BigDecimal, upper: BigDecimal) -> Result<Self, Error> {
        Self::new(IntervalKind::Closed, Some(lower), Some(upper))
    }

    /// `(lower, +inf)`
    pub fn greater_than(lower: BigDecimal) -> Result<Self, Error> {
        Self::new(IntervalKind::RightUnboundedOpen, Some(lower), None)
    }

    /// `(-inf, +inf)`
    pub fn unbounded() -> Self {
        Self {
            kind: IntervalKind::Unbounded,
            lower: None,
            upper: None,
        }
    }

    pub fn kind(&self) -> IntervalKind {
        self.kind
    }

    pub fn contains(&self, x: &BigDecimal) -> bool {
        if let Some(low) = &self.lower {
            let ok = if self.kind.lower_attained() { x >= low } else { x > low };
            if !ok {
                return false;
            }
        }
        if let Some(high) = &self.upper {
            let ok = if self.kind.upper_attained() { x <= high } else { x < high };
            if !ok {
                return false;
            }
        }
        true
    }
}
