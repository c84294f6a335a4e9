use alloc::string::String;

use crate::{
    calendar::Calendar,
    civil::{Clock, Date},
    tz::{self, TimeZone},
    Duration, Instant,
};

/// Converts a date and wall clock reading of a calendar in a time zone into
/// an instant.
///
/// This is total: out-of-range fields are normalized by the calendar, and
/// readings skipped or repeated by a change of offset resolve as described
/// on [`TimeZone::custom`]. It is the same as [`TimeZone::to_instant`].
///
/// # Example
///
/// ```
/// use kalends::{
///     calendar::Calendar, civil::{Clock, Date}, tz::TimeZone, Instant,
/// };
///
/// let i = kalends::instant(
///     Date::new(2000, 1, 1),
///     Clock::hms(1, 0, 0),
///     &TimeZone::fixed(1, 0),
///     &Calendar::ISO,
/// );
/// assert_eq!(i, Instant::EPOCH);
/// ```
pub fn instant(
    date: Date,
    clock: Clock,
    tz: &TimeZone,
    cal: &Calendar,
) -> Instant {
    tz.to_instant(date, clock, cal)
}

/// Converts an instant into a date and wall clock reading of a calendar in
/// a time zone, along with the offset and abbreviation in effect.
///
/// For [`TimeZone::UTC`] and fixed offset zones, this is the exact inverse
/// of [`instant`].
///
/// # Example
///
/// ```
/// use kalends::{
///     calendar::Calendar, civil::{Clock, Date}, tz::TimeZone, Duration,
///     Instant,
/// };
///
/// let tz = TimeZone::fixed(-8, 0);
/// let zdt = kalends::instant_dc(Instant::EPOCH, &tz, &Calendar::ISO);
/// assert_eq!(zdt.date(), Date::new(1999, 12, 31));
/// assert_eq!(zdt.clock(), Clock::hms(16, 0, 0));
/// assert_eq!(zdt.offset(), Duration::from_hours(-8));
/// assert_eq!(zdt.abbreviation(), "UTC-8");
/// assert_eq!(zdt.to_string(), "1999-12-31T16:00:00-08:00[UTC-8]");
/// ```
pub fn instant_dc(instant: Instant, tz: &TimeZone, cal: &Calendar) -> Zoned {
    tz.to_zoned(instant, cal)
}

/// A date and wall clock reading, together with the UTC offset and time zone
/// abbreviation that produced them.
///
/// This is what [`instant_dc`] returns. It is a plain value: it remembers
/// neither the instant nor the calendar and time zone it came from.
#[derive(Clone, Eq, Hash, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Zoned {
    date: Date,
    clock: Clock,
    offset: Duration,
    abbreviation: String,
}

impl Zoned {
    pub(crate) fn new(
        date: Date,
        clock: Clock,
        offset: Duration,
        abbreviation: String,
    ) -> Zoned {
        Zoned { date, clock, offset, abbreviation }
    }

    /// Returns the date.
    #[inline]
    pub fn date(&self) -> Date {
        self.date
    }

    /// Returns the wall clock reading. During a leap second, its seconds
    /// are `60` or more.
    #[inline]
    pub fn clock(&self) -> Clock {
        self.clock
    }

    /// Returns the UTC offset in effect.
    #[inline]
    pub fn offset(&self) -> Duration {
        self.offset
    }

    /// Returns the time zone abbreviation in effect.
    #[inline]
    pub fn abbreviation(&self) -> &str {
        &self.abbreviation
    }
}

impl core::fmt::Debug for Zoned {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        core::fmt::Display::fmt(self, f)
    }
}

/// Writes `date T clock offset [abbreviation]`, for example
/// `2016-12-31T15:59:60-08:00[PST]`.
impl core::fmt::Display for Zoned {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(f, "{}T{}", self.date, self.clock)?;
        tz::write_offset(f, self.offset)?;
        write!(f, "[{}]", self.abbreviation)
    }
}

#[cfg(test)]
mod tests {
    use alloc::string::ToString;

    use super::*;

    #[test]
    fn utc_roundtrip_at_leap_second() {
        let cal = Calendar::ISO;
        let date = Date::new(2016, 12, 31);
        let utc = TimeZone::UTC;
        let last = instant(date, Clock::hms(23, 59, 59), &utc, &cal);
        let leap = last + Duration::from_secs(1);
        let zdt = instant_dc(leap, &utc, &cal);
        assert_eq!(zdt.to_string(), "2016-12-31T23:59:60+00:00[UTC]");
        assert_eq!(instant(zdt.date(), zdt.clock(), &utc, &cal), leap);
    }

    #[test]
    fn display_offsets() {
        let zdt = Zoned::new(
            Date::new(2024, 1, 1),
            Clock::new(5, 45, Duration::from_millis(1_500)),
            Duration::from_mins(345),
            "NPT".to_string(),
        );
        assert_eq!(zdt.to_string(), "2024-01-01T05:45:01.5+05:45[NPT]");

        let zdt = Zoned::new(
            Date::new(1900, 1, 1),
            Clock::MIDNIGHT,
            -Duration::from_secs(4 * 3600 + 56 * 60 + 2),
            "LMT".to_string(),
        );
        assert_eq!(zdt.to_string(), "1900-01-01T00:00:00-04:56:02[LMT]");
    }

    #[test]
    fn display_extreme_offsets() {
        let zdt = Zoned::new(
            Date::new(2000, 1, 1),
            Clock::MIDNIGHT,
            Duration::MIN,
            "MIN".to_string(),
        );
        assert_eq!(
            zdt.to_string(),
            "2000-01-01T00:00:00-2562047788015215:30:08[MIN]",
        );
        let zdt = Zoned::new(
            Date::new(2000, 1, 1),
            Clock::MIDNIGHT,
            Duration::MAX,
            "MAX".to_string(),
        );
        assert_eq!(
            zdt.to_string(),
            "2000-01-01T00:00:00+2562047788015215:30:07[MAX]",
        );
    }

    #[test]
    fn ends_of_the_instant_range() {
        let cal = Calendar::ISO;
        let zones = [TimeZone::UTC, TimeZone::fixed(-8, 0)];
        for tz in zones.iter() {
            for i in [Instant::MIN, Instant::MAX] {
                let zdt = instant_dc(i, tz, &cal);
                assert_eq!(instant(zdt.date(), zdt.clock(), tz, &cal), i);
            }
        }
    }

    quickcheck::quickcheck! {
        fn prop_fixed_zone_roundtrip_any_instant(
            secs: i64,
            nanos: i32,
            hours: i8,
            minutes: i8
        ) -> bool {
            let cal = Calendar::ISO;
            let i = Instant::EPOCH
                .saturating_add(Duration::from_secs(secs))
                .saturating_add(Duration::new(0, nanos));
            let tz = TimeZone::fixed(i64::from(hours), i64::from(minutes));
            let zdt = instant_dc(i, &tz, &cal);
            instant(zdt.date(), zdt.clock(), &tz, &cal) == i
        }

        fn prop_fixed_zone_roundtrip(secs: i32, minutes: i16) -> bool {
            let cal = Calendar::ISO;
            let i = Instant::EPOCH + Duration::from_secs(i64::from(secs));
            let minutes = i64::from(minutes) % (24 * 60);
            let tz = TimeZone::fixed(minutes / 60, minutes % 60);
            let zdt = instant_dc(i, &tz, &cal);
            instant(zdt.date(), zdt.clock(), &tz, &cal) == i
        }
    }
}
