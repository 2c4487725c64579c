//! Epsilon-aware numeric helpers for geometric predicates.
//!
//! Every "is this zero?" decision in intersection and shading code goes through
//! these functions so that floating-point round-off is absorbed consistently.

use glam::DVec3;

/// Tolerance below which a value is treated as zero.
pub const EPSILON: f64 = 1e-10;

/// Check whether a number is zero within [`EPSILON`].
#[inline]
pub fn is_zero(number: f64) -> bool {
    number.abs() < EPSILON
}

/// Snap a number to exactly zero if it is within [`EPSILON`] of zero.
#[inline]
pub fn align_zero(number: f64) -> f64 {
    if is_zero(number) {
        0.0
    } else {
        number
    }
}

/// Check whether two points coincide within [`EPSILON`] on every axis.
#[inline]
pub fn same_point(a: DVec3, b: DVec3) -> bool {
    is_zero(a.x - b.x) && is_zero(a.y - b.y) && is_zero(a.z - b.z)
}

/// Check whether every component of a vector is within [`EPSILON`] of zero.
#[inline]
pub fn is_zero_vector(v: DVec3) -> bool {
    is_zero(v.x) && is_zero(v.y) && is_zero(v.z)
}

/// Normalize a vector, or return `None` for the (epsilon) zero vector.
#[inline]
pub fn normalized(v: DVec3) -> Option<DVec3> {
    if is_zero_vector(v) {
        None
    } else {
        Some(v.normalize())
    }
}

/// Vector from `from` to `to`, or `None` when the two points coincide.
#[inline]
pub fn direction_between(from: DVec3, to: DVec3) -> Option<DVec3> {
    let v = to - from;
    if is_zero_vector(v) {
        None
    } else {
        Some(v)
    }
}

#[cfg(test)]
pub(crate) fn assert_vec_eq(actual: DVec3, expected: DVec3) {
    assert!(
        actual.abs_diff_eq(expected, 1e-9),
        "expected {:?}, got {:?}",
        expected,
        actual
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn align_zero_snaps_small_values() {
        assert_eq!(align_zero(1e-12), 0.0);
        assert_eq!(align_zero(-1e-11), 0.0);
        assert_eq!(align_zero(0.5), 0.5);
    }

    #[test]
    fn normalized_rejects_zero_vector() {
        assert!(normalized(DVec3::ZERO).is_none());
        assert!(normalized(DVec3::new(1e-12, 0.0, 0.0)).is_none());
        assert_vec_eq(normalized(DVec3::new(0.0, 3.0, 4.0)).unwrap(), DVec3::new(0.0, 0.6, 0.8));
    }

    #[test]
    fn direction_between_coincident_points() {
        let p = DVec3::new(1.0, 2.0, 3.0);
        assert!(direction_between(p, p).is_none());
        assert_eq!(direction_between(p, DVec3::new(1.0, 2.0, 4.0)), Some(DVec3::Z));
    }
}
