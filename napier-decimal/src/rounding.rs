//! Rounding modes for positional and significant-digit rounding.

use std::cmp::Ordering;

use num_bigint::BigInt;
use num_integer::Integer;
use num_traits::Signed;

/// The seven supported rounding modes.
///
/// `Up`/`Down` are relative to zero, `Ceiling`/`Floor` to the number line;
/// the half modes split ties toward zero, away from it, or to the even
/// neighbour.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoundingMode {
    Up,
    Down,
    Ceiling,
    Floor,
    HalfUp,
    HalfDown,
    HalfEven,
}

impl RoundingMode {
    /// Whether the truncated quotient must be bumped one step away from
    /// zero. `remainder` is non-zero, carries the dividend's sign, and
    /// satisfies `|remainder| < divisor`.
    pub(crate) fn rounds_away(
        self,
        quotient: &BigInt,
        remainder: &BigInt,
        divisor: &BigInt,
    ) -> bool {
        let negative = remainder.is_negative();
        match self {
            RoundingMode::Down => false,
            RoundingMode::Up => true,
            RoundingMode::Ceiling => !negative,
            RoundingMode::Floor => negative,
            half => {
                let twice = (remainder.magnitude() * 2u32).cmp(divisor.magnitude());
                match half {
                    RoundingMode::HalfUp => twice != Ordering::Less,
                    RoundingMode::HalfDown => twice == Ordering::Greater,
                    RoundingMode::HalfEven => {
                        twice == Ordering::Greater
                            || (twice == Ordering::Equal && quotient.is_odd())
                    }
                    _ => unreachable!(),
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use crate::decimal::BigDecimal;

    use super::*;

    fn rounded(value: &str, mode: RoundingMode) -> String {
        BigDecimal::from_str(value)
            .unwrap()
            .round_at(-1, mode)
            .unwrap()
            .to_string()
    }

    #[test]
    fn directed_modes() {
        assert_eq!(rounded("2.51", RoundingMode::Down), "2.5");
        assert_eq!(rounded("2.51", RoundingMode::Up), "2.6");
        assert_eq!(rounded("-2.51", RoundingMode::Down), "-2.5");
        assert_eq!(rounded("-2.51", RoundingMode::Up), "-2.6");
        assert_eq!(rounded("2.51", RoundingMode::Ceiling), "2.6");
        assert_eq!(rounded("-2.51", RoundingMode::Ceiling), "-2.5");
        assert_eq!(rounded("2.51", RoundingMode::Floor), "2.5");
        assert_eq!(rounded("-2.51", RoundingMode::Floor), "-2.6");
    }

    #[test]
    fn half_modes_split_ties() {
        assert_eq!(rounded("2.45", RoundingMode::HalfUp), "2.5");
        assert_eq!(rounded("2.45", RoundingMode::HalfDown), "2.4");
        assert_eq!(rounded("2.45", RoundingMode::HalfEven), "2.4");
        assert_eq!(rounded("2.35", RoundingMode::HalfEven), "2.4");
        assert_eq!(rounded("-2.45", RoundingMode::HalfUp), "-2.5");
        assert_eq!(rounded("-2.45", RoundingMode::HalfDown), "-2.4");
    }

    #[test]
    fn off_tie_halves_agree() {
        for mode in [
            RoundingMode::HalfUp,
            RoundingMode::HalfDown,
            RoundingMode::HalfEven,
        ] {
            assert_eq!(rounded("2.449", mode), "2.4");
            assert_eq!(rounded("2.451", mode), "2.5");
        }
    }

    #[test]
    fn exact_values_are_untouched() {
        for mode in [RoundingMode::Up, RoundingMode::Ceiling, RoundingMode::HalfUp] {
            assert_eq!(rounded("2.5", mode), "2.5");
        }
    }
}
