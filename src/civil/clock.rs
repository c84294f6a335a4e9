use crate::{util::t, Duration};

/// A wall clock reading: an hour, a minute and a number of seconds.
///
/// The seconds are a [`Duration`], so they carry nanosecond precision. They
/// may reach or exceed `60` when the clock is inside a leap second, in which
/// case the clock reads `23:59:60` (or later, for a multi-second insertion).
///
/// Like [`Date`](crate::civil::Date), a clock is not validated. Fields out of
/// their nominal range are carried into adjacent days when converted by a
/// calendar. For example, `24:00:00` is midnight of the following day.
///
/// ```
/// use kalends::{civil::Clock, Duration};
///
/// let clock = Clock::new(23, 59, Duration::from_millis(60_500));
/// assert_eq!(clock.to_string(), "23:59:60.5");
/// assert!(clock.is_leap_second());
/// ```
#[derive(Clone, Copy, Default, Eq, Hash, PartialEq, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Clock {
    hour: i64,
    minute: i64,
    second: Duration,
}

impl Clock {
    /// The first instant of a day, `00:00:00`.
    pub const MIDNIGHT: Clock =
        Clock { hour: 0, minute: 0, second: Duration::ZERO };

    /// Creates a new clock reading. No validation is performed.
    #[inline]
    pub const fn new(hour: i64, minute: i64, second: Duration) -> Clock {
        Clock { hour, minute, second }
    }

    /// Creates a new clock reading from whole hours, minutes and seconds.
    ///
    /// # Example
    ///
    /// ```
    /// use kalends::{civil::Clock, Duration};
    ///
    /// let clock = Clock::hms(12, 30, 15);
    /// assert_eq!(clock.second(), Duration::from_secs(15));
    /// ```
    #[inline]
    pub const fn hms(hour: i64, minute: i64, second: i64) -> Clock {
        Clock::new(hour, minute, Duration::from_secs(second))
    }

    /// Returns the hour of this clock reading.
    #[inline]
    pub const fn hour(self) -> i64 {
        self.hour
    }

    /// Returns the minute of this clock reading.
    #[inline]
    pub const fn minute(self) -> i64 {
        self.minute
    }

    /// Returns the seconds of this clock reading, including the fraction.
    #[inline]
    pub const fn second(self) -> Duration {
        self.second
    }

    /// Returns true when the seconds are at or beyond `60`, which only
    /// happens inside a leap second.
    #[inline]
    pub const fn is_leap_second(self) -> bool {
        self.second.as_secs() >= t::SECONDS_PER_MINUTE
    }
}

impl core::fmt::Debug for Clock {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        core::fmt::Display::fmt(self, f)
    }
}

/// Writes `HH:MM:SS` followed by the fraction of the second, if any, with
/// trailing zeros removed.
impl core::fmt::Display for Clock {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(
            f,
            "{:02}:{:02}:{:02}",
            self.hour,
            self.minute,
            self.second.as_secs()
        )?;
        let mut frac = self.second.subsec_nanos();
        if frac == 0 {
            return Ok(());
        }
        let mut width = 9;
        while frac % 10 == 0 {
            frac /= 10;
            width -= 1;
        }
        write!(f, ".{frac:0width$}")
    }
}
