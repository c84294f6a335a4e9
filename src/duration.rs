use crate::{
    error::{err, Error},
    util::{
        common::divmod128,
        t::{self, NANOS_PER_SECOND, NANOS_PER_SECOND_128},
    },
};

/// A signed span of SI seconds with nanosecond precision.
///
/// A `Duration` is used both as an amount of elapsed time (for example, the
/// difference between two [`Instant`](crate::Instant) values) and as a UTC
/// offset of a [`TimeZone`](crate::tz::TimeZone).
///
/// Internally, a duration is a number of whole seconds and a fractional
/// number of nanoseconds, where the fractional part is always in the range
/// `0..1_000_000_000`. That is, the whole seconds are *floored*. So `-0.5`
/// seconds is represented as `-1` seconds plus `500,000,000` nanoseconds.
/// This makes comparisons and floored division by days or seconds trivial,
/// which is the most common operation in this crate.
///
/// # Arithmetic
///
/// Durations form an additive group with an exact zero. Addition,
/// subtraction and negation are available via the standard operator traits,
/// which panic on overflow. For checked arithmetic, use
/// [`Duration::checked_add`] and friends.
///
/// ```
/// use kalends::Duration;
///
/// let a = Duration::from_millis(1_500);
/// let b = Duration::from_secs(-2);
/// assert_eq!(a + b, Duration::from_millis(-500));
/// assert_eq!(-(a + b), Duration::from_millis(500));
/// assert!(b < a);
/// ```
#[derive(Clone, Copy, Default, Eq, Hash, PartialEq, PartialOrd, Ord)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "(i64, u32)", into = "(i64, u32)")
)]
pub struct Duration {
    secs: i64,
    nanos: u32,
}

impl Duration {
    /// A duration of zero time.
    pub const ZERO: Duration = Duration { secs: 0, nanos: 0 };

    /// The minimum possible duration.
    pub const MIN: Duration = Duration { secs: i64::MIN, nanos: 0 };

    /// The maximum possible duration.
    pub const MAX: Duration =
        Duration { secs: i64::MAX, nanos: NANOS_PER_SECOND as u32 - 1 };

    /// Creates a new duration from the given number of seconds and
    /// nanoseconds.
    ///
    /// The nanoseconds may be any value, including negative values. They are
    /// carried into the seconds as necessary. For example,
    /// `Duration::new(1, -1)` is one nanosecond less than one second.
    ///
    /// # Panics
    ///
    /// When carrying the nanoseconds overflows the seconds.
    ///
    /// # Example
    ///
    /// ```
    /// use kalends::Duration;
    ///
    /// let d = Duration::new(1, -1);
    /// assert_eq!(d.as_secs(), 0);
    /// assert_eq!(d.subsec_nanos(), 999_999_999);
    ///
    /// let d = Duration::new(0, -1);
    /// assert_eq!(d.as_secs(), -1);
    /// assert_eq!(d.subsec_nanos(), 999_999_999);
    /// ```
    #[inline]
    pub const fn new(secs: i64, nanos: i32) -> Duration {
        let carry = (nanos as i64).div_euclid(NANOS_PER_SECOND);
        let nanos = (nanos as i64).rem_euclid(NANOS_PER_SECOND) as u32;
        let Some(secs) = secs.checked_add(carry) else {
            panic!("duration seconds overflowed")
        };
        Duration { secs, nanos }
    }

    /// Creates a new duration from the given number of whole seconds.
    #[inline]
    pub const fn from_secs(secs: i64) -> Duration {
        Duration { secs, nanos: 0 }
    }

    /// Creates a new duration from the given number of milliseconds.
    #[inline]
    pub const fn from_millis(millis: i64) -> Duration {
        Duration {
            secs: millis.div_euclid(1_000),
            nanos: (millis.rem_euclid(1_000) * 1_000_000) as u32,
        }
    }

    /// Creates a new duration from the given number of microseconds.
    #[inline]
    pub const fn from_micros(micros: i64) -> Duration {
        Duration {
            secs: micros.div_euclid(1_000_000),
            nanos: (micros.rem_euclid(1_000_000) * 1_000) as u32,
        }
    }

    /// Creates a new duration from the given number of nanoseconds.
    #[inline]
    pub const fn from_nanos(nanos: i64) -> Duration {
        Duration {
            secs: nanos.div_euclid(NANOS_PER_SECOND),
            nanos: nanos.rem_euclid(NANOS_PER_SECOND) as u32,
        }
    }

    /// Creates a new duration from the given number of minutes.
    ///
    /// # Panics
    ///
    /// When the number of seconds overflows an `i64`.
    #[inline]
    pub const fn from_mins(minutes: i64) -> Duration {
        let Some(secs) = minutes.checked_mul(t::SECONDS_PER_MINUTE) else {
            panic!("minutes overflowed duration")
        };
        Duration::from_secs(secs)
    }

    /// Creates a new duration from the given number of hours.
    ///
    /// # Panics
    ///
    /// When the number of seconds overflows an `i64`.
    #[inline]
    pub const fn from_hours(hours: i64) -> Duration {
        let Some(secs) = hours.checked_mul(t::SECONDS_PER_HOUR) else {
            panic!("hours overflowed duration")
        };
        Duration::from_secs(secs)
    }

    /// Creates a new duration from a floating point number of seconds.
    ///
    /// The value is rounded to the nearest nanosecond.
    ///
    /// # Errors
    ///
    /// When the given value is not finite or is out of the range supported
    /// by a `Duration`.
    ///
    /// # Example
    ///
    /// ```
    /// use kalends::Duration;
    ///
    /// let d = Duration::try_from_secs_f64(-1.25)?;
    /// assert_eq!(d, Duration::from_millis(-1_250));
    ///
    /// assert!(Duration::try_from_secs_f64(f64::NAN).is_err());
    ///
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn try_from_secs_f64(secs: f64) -> Result<Duration, Error> {
        if !secs.is_finite() {
            return Err(err!(
                "could not convert non-finite seconds {secs} to duration",
            ));
        }
        let nanos = secs * (NANOS_PER_SECOND as f64);
        let nanos = if nanos < 0.0 { nanos - 0.5 } else { nanos + 0.5 };
        // The cast saturates, which is caught by the range check below
        // since `i128::MAX` nanoseconds is out of range.
        Duration::from_nanos128(nanos as i128)
    }

    /// Returns the number of whole seconds in this duration.
    ///
    /// The seconds are floored. So a duration of `-0.5` seconds returns
    /// `-1`. Combined with [`Duration::subsec_nanos`], one can reconstruct
    /// the original duration.
    ///
    /// # Example
    ///
    /// ```
    /// use kalends::Duration;
    ///
    /// let d = Duration::from_millis(-500);
    /// assert_eq!(d.as_secs(), -1);
    /// assert_eq!(d.subsec_nanos(), 500_000_000);
    /// ```
    #[inline]
    pub const fn as_secs(self) -> i64 {
        self.secs
    }

    /// Returns the fractional part of this duration in nanoseconds.
    ///
    /// The value returned is always in the range `0..1_000_000_000`.
    #[inline]
    pub const fn subsec_nanos(self) -> u32 {
        self.nanos
    }

    /// Returns the total number of nanoseconds in this duration.
    #[inline]
    pub const fn as_nanos(self) -> i128 {
        (self.secs as i128) * NANOS_PER_SECOND_128 + (self.nanos as i128)
    }

    /// Returns this duration as a floating point number of seconds.
    ///
    /// This may lose precision.
    #[inline]
    pub fn as_secs_f64(self) -> f64 {
        (self.secs as f64) + (self.nanos as f64) / (NANOS_PER_SECOND as f64)
    }

    /// Returns true if this duration is exactly zero.
    #[inline]
    pub const fn is_zero(self) -> bool {
        self.secs == 0 && self.nanos == 0
    }

    /// Returns true if this duration is strictly less than zero.
    #[inline]
    pub const fn is_negative(self) -> bool {
        self.secs < 0
    }

    /// Returns `-1`, `0` or `1` depending on the sign of this duration.
    #[inline]
    pub const fn signum(self) -> i8 {
        if self.is_negative() {
            -1
        } else if self.is_zero() {
            0
        } else {
            1
        }
    }

    /// Returns the absolute value of this duration.
    ///
    /// # Panics
    ///
    /// When this duration is `Duration::MIN`, since its absolute value
    /// cannot be represented.
    #[inline]
    pub fn abs(self) -> Duration {
        if self.is_negative() {
            -self
        } else {
            self
        }
    }

    /// Add two durations together, returning an error on overflow.
    ///
    /// # Example
    ///
    /// ```
    /// use kalends::Duration;
    ///
    /// let half = Duration::from_millis(500);
    /// let d = Duration::from_secs(1).checked_add(half)?;
    /// assert_eq!(d, Duration::from_millis(1_500));
    ///
    /// assert!(Duration::MAX.checked_add(Duration::from_nanos(1)).is_err());
    ///
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    #[inline]
    pub fn checked_add(self, rhs: Duration) -> Result<Duration, Error> {
        Duration::from_nanos128(self.as_nanos() + rhs.as_nanos())
    }

    /// Subtract `rhs` from this duration, returning an error on overflow.
    #[inline]
    pub fn checked_sub(self, rhs: Duration) -> Result<Duration, Error> {
        Duration::from_nanos128(self.as_nanos() - rhs.as_nanos())
    }

    /// Negate this duration, returning an error on overflow.
    ///
    /// Overflow only occurs for `Duration::MIN`.
    #[inline]
    pub fn checked_neg(self) -> Result<Duration, Error> {
        Duration::from_nanos128(-self.as_nanos())
    }

    /// Add two durations together, stopping at [`Duration::MIN`] or
    /// [`Duration::MAX`] instead of overflowing.
    ///
    /// # Example
    ///
    /// ```
    /// use kalends::Duration;
    ///
    /// let one = Duration::from_secs(1);
    /// assert_eq!(Duration::MAX.saturating_add(one), Duration::MAX);
    /// assert_eq!(Duration::MIN.saturating_add(-one), Duration::MIN);
    /// assert_eq!(one.saturating_add(one), Duration::from_secs(2));
    /// ```
    #[inline]
    pub fn saturating_add(self, rhs: Duration) -> Duration {
        Duration::from_nanos128_saturating(self.as_nanos() + rhs.as_nanos())
    }

    /// Subtract `rhs` from this duration, stopping at [`Duration::MIN`] or
    /// [`Duration::MAX`] instead of overflowing.
    #[inline]
    pub fn saturating_sub(self, rhs: Duration) -> Duration {
        Duration::from_nanos128_saturating(self.as_nanos() - rhs.as_nanos())
    }
}

impl Duration {
    /// Creates a duration from a total number of nanoseconds, returning an
    /// error if the number of whole seconds doesn't fit into an `i64`.
    pub(crate) fn from_nanos128(nanos: i128) -> Result<Duration, Error> {
        let (secs, nanos) = divmod128(nanos, NANOS_PER_SECOND_128);
        let secs = i64::try_from(secs).map_err(|_| {
            Error::range("duration seconds", secs, i64::MIN, i64::MAX)
        })?;
        // OK because `nanos` is in the range `0..1_000_000_000`.
        Ok(Duration { secs, nanos: nanos as u32 })
    }

    /// Creates a duration from a total number of nanoseconds, clamped to
    /// the range of a `Duration`.
    pub(crate) fn from_nanos128_saturating(nanos: i128) -> Duration {
        let (min, max) = (Duration::MIN.as_nanos(), Duration::MAX.as_nanos());
        let nanos = nanos.clamp(min, max);
        let (secs, nanos) = divmod128(nanos, NANOS_PER_SECOND_128);
        // OK because the clamp keeps the seconds within `i64` and `nanos`
        // is in the range `0..1_000_000_000`.
        Duration { secs: secs as i64, nanos: nanos as u32 }
    }

    /// Splits this duration into a number of whole units of `unit` seconds
    /// and the non-negative remainder.
    ///
    /// `unit` must be positive.
    #[inline]
    pub(crate) fn div_rem_secs(self, unit: i64) -> (i64, Duration) {
        let (quotient, secs) = crate::util::common::divmod(self.secs, unit);
        (quotient, Duration { secs, nanos: self.nanos })
    }
}

impl core::ops::Add for Duration {
    type Output = Duration;

    #[inline]
    fn add(self, rhs: Duration) -> Duration {
        self.checked_add(rhs).expect("duration addition overflowed")
    }
}

impl core::ops::AddAssign for Duration {
    #[inline]
    fn add_assign(&mut self, rhs: Duration) {
        *self = *self + rhs;
    }
}

impl core::ops::Sub for Duration {
    type Output = Duration;

    #[inline]
    fn sub(self, rhs: Duration) -> Duration {
        self.checked_sub(rhs).expect("duration subtraction overflowed")
    }
}

impl core::ops::SubAssign for Duration {
    #[inline]
    fn sub_assign(&mut self, rhs: Duration) {
        *self = *self - rhs;
    }
}

impl core::ops::Neg for Duration {
    type Output = Duration;

    #[inline]
    fn neg(self) -> Duration {
        self.checked_neg().expect("duration negation overflowed")
    }
}

impl core::iter::Sum for Duration {
    fn sum<I: Iterator<Item = Duration>>(iter: I) -> Duration {
        iter.fold(Duration::ZERO, |acc, d| acc + d)
    }
}

impl TryFrom<(i64, u32)> for Duration {
    type Error = Error;

    fn try_from((secs, nanos): (i64, u32)) -> Result<Duration, Error> {
        if i64::from(nanos) >= NANOS_PER_SECOND {
            return Err(Error::range(
                "duration nanoseconds",
                nanos,
                0,
                NANOS_PER_SECOND - 1,
            ));
        }
        Ok(Duration { secs, nanos })
    }
}

impl From<Duration> for (i64, u32) {
    fn from(d: Duration) -> (i64, u32) {
        (d.secs, d.nanos)
    }
}

impl core::fmt::Debug for Duration {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(f, "Duration({self})")
    }
}

/// Displays the duration as a decimal number of seconds with an `s`
/// suffix. Trailing zeros in the fraction are omitted.
///
/// ```
/// use kalends::Duration;
///
/// assert_eq!(Duration::from_millis(2_500).to_string(), "2.5s");
/// assert_eq!(Duration::from_nanos(-1).to_string(), "-0.000000001s");
/// assert_eq!(Duration::from_secs(60).to_string(), "60s");
/// ```
impl core::fmt::Display for Duration {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        let nanos = self.as_nanos();
        let sign = if nanos < 0 { "-" } else { "" };
        let abs = nanos.unsigned_abs();
        let secs = abs / (NANOS_PER_SECOND as u128);
        let mut frac = (abs % (NANOS_PER_SECOND as u128)) as u32;
        if frac == 0 {
            return write!(f, "{sign}{secs}s");
        }
        let mut width = 9;
        while frac % 10 == 0 {
            frac /= 10;
            width -= 1;
        }
        write!(f, "{sign}{secs}.{frac:0width$}s")
    }
}

#[cfg(test)]
impl quickcheck::Arbitrary for Duration {
    fn arbitrary(g: &mut quickcheck::Gen) -> Duration {
        // Keep generated durations within a few million years so that
        // arithmetic on several of them in a property never overflows.
        let secs = i64::arbitrary(g) % 100_000_000_000_000;
        let nanos = u32::arbitrary(g) % (NANOS_PER_SECOND as u32);
        Duration { secs, nanos }
    }

    fn shrink(&self) -> alloc::boxed::Box<dyn Iterator<Item = Self>> {
        alloc::boxed::Box::new(
            (self.secs, self.nanos)
                .shrink()
                .filter(|&(_, nanos)| i64::from(nanos) < NANOS_PER_SECOND)
                .map(|(secs, nanos)| Duration { secs, nanos }),
        )
    }
}
