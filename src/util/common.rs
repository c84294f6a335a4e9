/*!
A collection of floored arithmetic helpers.

All conversions in this crate use floored (Euclidean) division. This way,
the remainder of a day or a second is never negative, even for values that
precede the reference epoch. For example, one nanosecond before the epoch
is `1999-12-31T23:59:59.999999999` and not `2000-01-01T00:00:-0.000000001`.

Rust's `div_euclid` and `rem_euclid` agree with floored division whenever
the divisor is positive, which is always the case here.
*/

/// Returns `(quotient, remainder)` of floored division.
///
/// The remainder is always in the range `0..divisor`.
///
/// # Panics
///
/// When `divisor` is not positive.
#[inline]
pub(crate) fn divmod(dividend: i64, divisor: i64) -> (i64, i64) {
    debug_assert!(divisor > 0, "divisor must be positive");
    (dividend.div_euclid(divisor), dividend.rem_euclid(divisor))
}

/// Like `divmod`, but on `i128` values.
#[inline]
pub(crate) fn divmod128(dividend: i128, divisor: i128) -> (i128, i128) {
    debug_assert!(divisor > 0, "divisor must be positive");
    (dividend.div_euclid(divisor), dividend.rem_euclid(divisor))
}

/// Clamps an `i128` into the range of an `i64`.
#[inline]
pub(crate) fn saturate_i64(n: i128) -> i64 {
    // OK because of the clamp.
    n.clamp(i128::from(i64::MIN), i128::from(i64::MAX)) as i64
}

/// Returns true if and only if the given year is a leap year in the
/// proleptic Gregorian calendar.
///
/// A leap year is a year with 366 days. Typical years have 365 days.
#[inline]
pub(crate) const fn is_leap_year(year: i64) -> bool {
    let d = if year % 25 != 0 { 4 } else { 16 };
    year.rem_euclid(d) == 0
}

/// Returns true if and only if the given year is a leap year in the
/// proleptic Julian calendar.
#[inline]
pub(crate) const fn is_julian_leap_year(year: i64) -> bool {
    year.rem_euclid(4) == 0
}
