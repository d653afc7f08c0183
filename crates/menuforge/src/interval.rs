//! Interval reduction for the animation scheduler.
//!
//! A menu can carry several animations with different tick intervals, but
//! every (menu, viewer) pair gets exactly one host timer. That timer runs at
//! the greatest common divisor of all declared intervals: ticking counters
//! by the GCD and firing each animation when its counter reaches its own
//! interval reproduces every declared period exactly.

use std::num::NonZeroU64;

/// Greatest common divisor of two tick counts. `gcd(0, x) == x`.
#[must_use]
pub const fn gcd(a: u64, b: u64) -> u64 {
    let (mut a, mut b) = (a, b);
    while b != 0 {
        let r = a % b;
        a = b;
        b = r;
    }
    a
}

/// Greatest common divisor of any number of tick counts.
///
/// Returns 0 only when every input is 0 (or there are none).
#[must_use]
pub fn gcd_all<I: IntoIterator<Item = u64>>(values: I) -> u64 {
    let mut result = 0;
    for value in values {
        result = gcd(result, value);
        if result == 1 {
            return 1;
        }
    }
    result
}

/// The single host-timer period covering a set of animation intervals.
///
/// `None` means there is nothing to schedule: either no animations, or only
/// degenerate zero intervals (which menu construction rejects up front).
#[must_use]
pub fn reduced_interval<I: IntoIterator<Item = u64>>(intervals: I) -> Option<NonZeroU64> {
    NonZeroU64::new(gcd_all(intervals))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gcd_pairs() {
        assert_eq!(gcd(20, 30), 10);
        assert_eq!(gcd(30, 20), 10);
        assert_eq!(gcd(7, 13), 1);
        assert_eq!(gcd(0, 5), 5);
        assert_eq!(gcd(5, 0), 5);
        assert_eq!(gcd(0, 0), 0);
    }

    #[test]
    fn test_gcd_all_divides_every_input() {
        let intervals = [12u64, 18, 30, 42];
        let g = gcd_all(intervals);
        assert_eq!(g, 6);
        for i in intervals {
            assert_eq!(i % g, 0);
        }
        // Greatest: doubling it no longer divides every input
        assert!(intervals.iter().any(|i| i % (g * 2) != 0));
    }

    #[test]
    fn test_single_interval_is_its_own_gcd() {
        assert_eq!(gcd_all([20u64]), 20);
    }

    #[test]
    fn test_reduced_interval_empty_is_none() {
        assert_eq!(reduced_interval(std::iter::empty()), None);
        assert_eq!(reduced_interval([0u64, 0]), None);
    }

    #[test]
    fn test_reduced_interval_twenty_thirty() {
        assert_eq!(reduced_interval([20u64, 30]).unwrap().get(), 10);
    }
}
