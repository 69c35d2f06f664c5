//! Adaptive search for the smallest integer satisfying a monotonic
//! predicate.
//!
//! Phase one brackets the threshold by exponential stepping away from (or
//! toward) zero; phase two is a classical binary search inside the bracket.
//! The predicate must be monotonic: once it holds it holds for every larger
//! integer. Overflow during the scan means the threshold is not
//! representable and is always fatal.

use crate::Error;

fn step_up(previous: i32) -> Result<i32, Error> {
    Ok(match previous {
        0 => 1,
        p if p > 0 => p
            .checked_mul(2)
            .ok_or(Error::Overflow("scanning for a bracket"))?,
        // toward zero: truncation is ceiling division for negatives
        p => p / 2,
    })
}

fn step_down(previous: i32) -> Result<i32, Error> {
    Ok(match previous {
        0 => -1,
        p if p < 0 => p
            .checked_mul(2)
            .ok_or(Error::Overflow("scanning for a bracket"))?,
        // toward zero: truncation is floor division for positives
        p => p / 2,
    })
}

/// The smallest integer at which `predicate` holds, found from `seed`.
/// Generic over the caller's error type so predicates from dependent
/// crates can fail with their own errors.
pub fn smallest_satisfying<E, F>(seed: i32, mut predicate: F) -> Result<i32, E>
where
    E: From<Error>,
    F: FnMut(i32) -> Result<bool, E>,
{
    let (mut failing, mut holding) = if predicate(seed)? {
        let mut holding = seed;
        let failing;
        let mut probe = seed;
        loop {
            probe = step_down(probe)?;
            if predicate(probe)? {
                holding = probe;
            } else {
                failing = probe;
                break;
            }
        }
        (failing, holding)
    } else {
        let mut failing = seed;
        let holding;
        let mut probe = seed;
        loop {
            probe = step_up(probe)?;
            if predicate(probe)? {
                holding = probe;
                break;
            } else {
                failing = probe;
            }
        }
        (failing, holding)
    };

    while i64::from(holding) - i64::from(failing) > 1 {
        let midpoint = ((i64::from(holding) + i64::from(failing)) / 2) as i32;
        if predicate(midpoint)? {
            holding = midpoint;
        } else {
            failing = midpoint;
        }
    }
    Ok(holding)
}
