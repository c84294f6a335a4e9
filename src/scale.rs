use alloc::{boxed::Box, sync::Arc};

use crate::{leapseconds::LeapSeconds, util::t, Duration, Instant};

/// The built-in table, as a static so that `Timescale::UTC` can hand out
/// references to it.
static BUILTIN_LEAP_SECONDS: LeapSeconds = LeapSeconds::builtin();

/// A time scale labels the instants of the continuous time line.
///
/// Every time scale maps an [`Instant`] to a count of labelled seconds since
/// the label `2000-01-01T00:00:00` on that scale (a [`Timestamp`]), and back.
/// For atomic time scales such as TAI, the mapping is a constant shift. For
/// UTC, the mapping follows a table of leap seconds, and an instant inside
/// a leap second is reported with a non-zero leap count so that clocks can
/// render it as `23:59:60`.
///
/// A time scale is cheap to clone. The built-in scales are constants that
/// do not allocate, and custom scales share their definition through an
/// `Arc`.
///
/// # Example
///
/// This shows how the same instant is labelled on different time scales:
///
/// ```
/// use kalends::{Instant, Timescale};
///
/// let utc = Timescale::UTC.calendar_seconds(Instant::EPOCH);
/// let tai = Timescale::TAI.calendar_seconds(Instant::EPOCH);
/// let gps = Timescale::GPS.calendar_seconds(Instant::EPOCH);
/// assert_eq!(utc.timestamp().second(), 0);
/// assert_eq!(tai.timestamp().second(), 32);
/// assert_eq!(gps.timestamp().second(), 13);
/// ```
#[derive(Clone)]
pub struct Timescale {
    kind: TimescaleKind,
}

#[derive(Clone)]
enum TimescaleKind {
    Utc,
    Tai,
    Tt,
    Gps,
    UtcWith(Arc<LeapSeconds>),
    Custom(Arc<CustomTimescale>),
}

struct CustomTimescale {
    name: Box<str>,
    has_leap_seconds: bool,
    to_calendar: Box<dyn Fn(Instant) -> CalendarSeconds + Send + Sync>,
    from_calendar: Box<dyn Fn(Timestamp) -> Instant + Send + Sync>,
}

impl Timescale {
    /// Coordinated Universal Time with the built-in leap second table.
    ///
    /// This is the default time scale for every calendar.
    pub const UTC: Timescale = Timescale { kind: TimescaleKind::Utc };

    /// International Atomic Time. Its labels are 32 seconds ahead of UTC at
    /// the reference epoch and never observe leap seconds.
    pub const TAI: Timescale = Timescale { kind: TimescaleKind::Tai };

    /// Terrestrial Time, which is TAI plus 32.184 seconds.
    pub const TT: Timescale = Timescale { kind: TimescaleKind::Tt };

    /// GPS time, which is TAI minus 19 seconds.
    pub const GPS: Timescale = Timescale { kind: TimescaleKind::Gps };

    /// UTC with a caller supplied leap second table.
    ///
    /// # Example
    ///
    /// ```
    /// use kalends::{Instant, LeapSeconds, Timescale};
    ///
    /// // A table that never had any leap seconds after 1972.
    /// let table = LeapSeconds::new(&[(63072000, 10)])?;
    /// let scale = Timescale::utc_with(table);
    /// assert!(scale.has_leap_seconds());
    /// // TAI - UTC is 10 seconds instead of 32 at the epoch.
    /// let cs = scale.calendar_seconds(Instant::EPOCH);
    /// assert_eq!(cs.timestamp().second(), 22);
    ///
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn utc_with(leap_seconds: LeapSeconds) -> Timescale {
        Timescale { kind: TimescaleKind::UtcWith(Arc::new(leap_seconds)) }
    }

    /// Creates a custom time scale from a pair of mappings.
    ///
    /// `to_calendar` decomposes an instant into labelled seconds and a leap
    /// count, while `from_calendar` is its inverse for labels outside of
    /// leap seconds. The fraction of the returned timestamp is always
    /// floored by construction of [`Timestamp`].
    ///
    /// # Example
    ///
    /// A time scale that runs a fixed 100 seconds behind TAI:
    ///
    /// ```
    /// use kalends::{
    ///     CalendarSeconds, Duration, Instant, Timescale, Timestamp,
    /// };
    ///
    /// let shift = Duration::from_secs(32 - 100);
    /// let scale = Timescale::custom(
    ///     "TAI-100",
    ///     false,
    ///     move |i: Instant| {
    ///         let label = i.duration_since_epoch() + shift;
    ///         CalendarSeconds::new(Timestamp::from_duration(label), 0)
    ///     },
    ///     move |ts: Timestamp| {
    ///         Instant::from_duration_since_epoch(ts.to_duration() - shift)
    ///     },
    /// );
    /// assert_eq!(scale.name(), "TAI-100");
    /// let cs = scale.calendar_seconds(Instant::EPOCH);
    /// assert_eq!(cs.timestamp().second(), -68);
    /// assert_eq!(scale.from_timestamp(cs.timestamp()), Instant::EPOCH);
    /// ```
    pub fn custom<F, G>(
        name: &str,
        has_leap_seconds: bool,
        to_calendar: F,
        from_calendar: G,
    ) -> Timescale
    where
        F: Fn(Instant) -> CalendarSeconds + Send + Sync + 'static,
        G: Fn(Timestamp) -> Instant + Send + Sync + 'static,
    {
        let custom = CustomTimescale {
            name: name.into(),
            has_leap_seconds,
            to_calendar: Box::new(to_calendar),
            from_calendar: Box::new(from_calendar),
        };
        Timescale { kind: TimescaleKind::Custom(Arc::new(custom)) }
    }

    /// Returns the name of this time scale.
    pub fn name(&self) -> &str {
        match self.kind {
            TimescaleKind::Utc | TimescaleKind::UtcWith(_) => "UTC",
            TimescaleKind::Tai => "TAI",
            TimescaleKind::Tt => "TT",
            TimescaleKind::Gps => "GPS",
            TimescaleKind::Custom(ref custom) => &*custom.name,
        }
    }

    /// Returns true if this time scale observes leap seconds.
    pub fn has_leap_seconds(&self) -> bool {
        match self.kind {
            TimescaleKind::Utc | TimescaleKind::UtcWith(_) => true,
            TimescaleKind::Tai | TimescaleKind::Tt | TimescaleKind::Gps => {
                false
            }
            TimescaleKind::Custom(ref custom) => custom.has_leap_seconds,
        }
    }

    /// Returns the leap second table of this time scale, if it is a UTC
    /// scale.
    pub fn leap_seconds(&self) -> Option<&LeapSeconds> {
        match self.kind {
            TimescaleKind::Utc => Some(&BUILTIN_LEAP_SECONDS),
            TimescaleKind::UtcWith(ref table) => Some(table),
            _ => None,
        }
    }

    /// Decomposes an instant into the labelled seconds of this time scale.
    ///
    /// The fractional part of the timestamp is always in `[0, 1)`, even
    /// before the epoch. When the instant is inside a leap second, the
    /// timestamp is the last ordinary second before it and the leap count is
    /// the number of seconds elapsed past that second.
    ///
    /// # Example
    ///
    /// ```
    /// use kalends::{Duration, Instant, Timescale};
    ///
    /// let i = Instant::EPOCH - Duration::from_millis(250);
    /// let cs = Timescale::UTC.calendar_seconds(i);
    /// assert_eq!(cs.timestamp().second(), -1);
    /// assert_eq!(cs.timestamp().nanosecond(), 750_000_000);
    /// assert_eq!(cs.leap(), 0);
    /// ```
    pub fn calendar_seconds(&self, instant: Instant) -> CalendarSeconds {
        match self.kind {
            TimescaleKind::Utc => {
                BUILTIN_LEAP_SECONDS.to_calendar_seconds(instant)
            }
            TimescaleKind::UtcWith(ref table) => {
                table.to_calendar_seconds(instant)
            }
            TimescaleKind::Tai | TimescaleKind::Tt | TimescaleKind::Gps => {
                let label = instant
                    .duration_since_epoch()
                    .saturating_add(self.kind.constant_shift());
                CalendarSeconds::new(Timestamp::from_duration(label), 0)
            }
            TimescaleKind::Custom(ref custom) => (custom.to_calendar)(instant),
        }
    }

    /// Maps labelled seconds of this time scale back to an instant.
    ///
    /// Leap seconds are not representable as a timestamp. Callers that need
    /// to land inside a leap second add the extra seconds to the instant
    /// returned for the preceding label.
    pub fn from_timestamp(&self, timestamp: Timestamp) -> Instant {
        match self.kind {
            TimescaleKind::Utc => {
                BUILTIN_LEAP_SECONDS.from_timestamp(timestamp)
            }
            TimescaleKind::UtcWith(ref table) => {
                table.from_timestamp(timestamp)
            }
            TimescaleKind::Tai | TimescaleKind::Tt | TimescaleKind::Gps => {
                Instant::from_duration_since_epoch(
                    timestamp
                        .to_duration()
                        .saturating_sub(self.kind.constant_shift()),
                )
            }
            TimescaleKind::Custom(ref custom) => {
                (custom.from_calendar)(timestamp)
            }
        }
    }
}

impl TimescaleKind {
    /// The difference between the labels of an atomic time scale and the
    /// instant continuum.
    fn constant_shift(&self) -> Duration {
        match *self {
            TimescaleKind::Tai => {
                Duration::from_secs(t::TAI_MINUS_UTC_AT_EPOCH)
            }
            TimescaleKind::Tt => Duration::from_nanos(
                t::TAI_MINUS_UTC_AT_EPOCH * t::NANOS_PER_SECOND
                    + t::TT_MINUS_TAI_NANOS,
            ),
            TimescaleKind::Gps => Duration::from_secs(
                t::TAI_MINUS_UTC_AT_EPOCH - t::TAI_MINUS_GPS,
            ),
            _ => Duration::ZERO,
        }
    }
}

impl Default for Timescale {
    fn default() -> Timescale {
        Timescale::UTC
    }
}

impl core::fmt::Debug for Timescale {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        match self.kind {
            TimescaleKind::UtcWith(ref table) => f
                .debug_tuple("Timescale")
                .field(&"UTC")
                .field(&table.len())
                .finish(),
            _ => f.debug_tuple("Timescale").field(&self.name()).finish(),
        }
    }
}

/// A count of labelled seconds since the `2000-01-01T00:00:00` label of some
/// time scale.
///
/// The whole seconds are floored and the fractional nanoseconds are always
/// in the range `0..1_000_000_000`. Timestamps are the currency exchanged
/// between a [`Timescale`] and the calendar engine. They only become
/// user-facing when defining custom time scales.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq, PartialOrd, Ord)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(transparent)
)]
pub struct Timestamp {
    label: Duration,
}

impl Timestamp {
    /// Creates a timestamp from whole seconds and nanoseconds. Nanoseconds
    /// out of range are carried into the seconds.
    ///
    /// # Panics
    ///
    /// When carrying the nanoseconds overflows the seconds.
    #[inline]
    pub const fn new(second: i64, nanosecond: i32) -> Timestamp {
        Timestamp { label: Duration::new(second, nanosecond) }
    }

    /// Creates a timestamp from a duration since the label epoch.
    #[inline]
    pub const fn from_duration(label: Duration) -> Timestamp {
        Timestamp { label }
    }

    /// Returns this timestamp as a duration since the label epoch.
    #[inline]
    pub const fn to_duration(self) -> Duration {
        self.label
    }

    /// Returns the whole labelled seconds, floored.
    #[inline]
    pub const fn second(self) -> i64 {
        self.label.as_secs()
    }

    /// Returns the fractional part in nanoseconds, in the range
    /// `0..1_000_000_000`.
    #[inline]
    pub const fn nanosecond(self) -> u32 {
        self.label.subsec_nanos()
    }

    /// Creates a timestamp from a floored second and an in-range
    /// nanosecond.
    #[inline]
    pub(crate) const fn from_parts(second: i64, nanosecond: u32) -> Timestamp {
        Timestamp { label: Duration::new(second, nanosecond as i32) }
    }
}

/// The decomposition of an instant on a time scale.
///
/// See [`Timescale::calendar_seconds`].
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct CalendarSeconds {
    timestamp: Timestamp,
    leap: i64,
}

impl CalendarSeconds {
    /// Creates a new decomposition from a timestamp and a leap second count.
    #[inline]
    pub const fn new(timestamp: Timestamp, leap: i64) -> CalendarSeconds {
        CalendarSeconds { timestamp, leap }
    }

    /// Returns the labelled seconds. Inside a leap second, this is the last
    /// ordinary label before it.
    #[inline]
    pub const fn timestamp(self) -> Timestamp {
        self.timestamp
    }

    /// Returns the number of whole leap seconds elapsed past the timestamp.
    /// This is zero outside of leap seconds.
    #[inline]
    pub const fn leap(self) -> i64 {
        self.leap
    }
}
