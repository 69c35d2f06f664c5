//! Positional vs significant-figures accuracy semantics.
//!
//! A positional accuracy p means "digits are correct down to `10^p`";
//! smaller p is more accurate. A significant precision P counts leading
//! digits; the two convert through the order k of the value:
//! `p = k + 1 - P` and `P = k + 1 - p`, with P >= 1 as a hard invariant.
//!
//! All accuracy arithmetic lives in checked 32-bit space; an overflow here
//! means a caller asked for something unrepresentable and is always fatal.

use crate::Error;

/// How a requested accuracy is interpreted by a caller.
///
/// The approximation core itself works purely positionally; the other two
/// strategies exist so callers can phrase requests in decimal places or
/// significant figures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccuracyStrategy {
    Positional,
    DecimalPlaces,
    SignificantFigures,
}

impl AccuracyStrategy {
    /// Apply the fixed safety margin of one digit. Positional accuracies
    /// grow downward, the other two upward.
    pub fn adjust(self, accuracy: i32) -> Result<i32, Error> {
        let adjusted = match self {
            AccuracyStrategy::Positional => accuracy.checked_sub(1),
            AccuracyStrategy::DecimalPlaces | AccuracyStrategy::SignificantFigures => {
                accuracy.checked_add(1)
            }
        };
        adjusted.ok_or(Error::Overflow("adjusting an accuracy"))
    }

    /// Position of the leading digit of a value of the given order, in the
    /// strategy's own coordinates.
    pub fn leading_digit_position(self, order: i32) -> i32 {
        match self {
            AccuracyStrategy::Positional => order,
            AccuracyStrategy::DecimalPlaces => 1,
            AccuracyStrategy::SignificantFigures => -order,
        }
    }
}

/// Narrow an i64 intermediate into the checked 32-bit accuracy domain.
pub fn narrow(value: i64, context: &'static str) -> Result<i32, Error> {
    i32::try_from(value).map_err(|_| Error::Overflow(context))
}

/// Positional accuracy that keeps `precision` significant digits of a value
/// of order `order`.
pub fn positional_for_significant(order: i64, precision: u32) -> Result<i32, Error> {
    if precision == 0 {
        return Err(Error::PrecisionUnderflow(0));
    }
    narrow(
        order + 1 - i64::from(precision),
        "converting significant precision to a position",
    )
}

/// Significant digits retained by positional accuracy `accuracy` on a value
/// of order `order`. Fails when the conversion would retain nothing.
pub fn significant_for_positional(order: i64, accuracy: i32) -> Result<u32, Error> {
    let precision = order + 1 - i64::from(accuracy);
    if precision < 1 {
        return Err(Error::PrecisionUnderflow(precision));
    }
    u32::try_from(precision).map_err(|_| Error::Overflow("widening a significant precision"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn conversions_invert() {
        // ln 2 = 0.693..., order -1: ten significant digits end at 10^-10
        assert_eq!(positional_for_significant(-1, 10).unwrap(), -10);
        assert_eq!(significant_for_positional(-1, -10).unwrap(), 10);
        // e = 2.718..., order 0
        assert_eq!(positional_for_significant(0, 10).unwrap(), -9);
        assert_eq!(significant_for_positional(0, -9).unwrap(), 10);
    }

    #[test]
    fn precision_must_stay_positive() {
        assert!(matches!(
            positional_for_significant(0, 0),
            Err(Error::PrecisionUnderflow(0))
        ));
        assert!(matches!(
            significant_for_positional(-5, 0),
            Err(Error::PrecisionUnderflow(_))
        ));
    }

    #[test]
    fn adjust_directions() {
        assert_eq!(AccuracyStrategy::Positional.adjust(-10).unwrap(), -11);
        assert_eq!(AccuracyStrategy::DecimalPlaces.adjust(10).unwrap(), 11);
        assert_eq!(AccuracyStrategy::SignificantFigures.adjust(10).unwrap(), 11);
        assert!(AccuracyStrategy::Positional.adjust(i32::MIN).is_err());
        assert!(AccuracyStrategy::SignificantFigures.adjust(i32::MAX).is_err());
    }

    #[test]
    fn leading_digit_position_per_strategy() {
        assert_eq!(AccuracyStrategy::Positional.leading_digit_position(-3), -3);
        assert_eq!(AccuracyStrategy::DecimalPlaces.leading_digit_position(-3), 1);
        assert_eq!(AccuracyStrategy::SignificantFigures.leading_digit_position(-3), 3);
    }

    #[test]
    fn narrowing_is_checked() {
        assert!(narrow(i64::from(i32::MAX) + 1, "test").is_err());
        assert_eq!(narrow(-42, "test").unwrap(), -42);
    }
}
