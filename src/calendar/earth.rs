use alloc::{boxed::Box, string::String};

use crate::{
    calendar::{Calendar, CalendarDef, DayRules, EraFn},
    civil::{Clock, Date},
    scale::{Timescale, Timestamp},
    util::{common::divmod128, t},
    Duration, Instant,
};

/// Converts an instant into a date and clock, shifting the labelled seconds
/// by `delta` first.
pub(crate) fn to_date_clock(
    cal: &Calendar,
    instant: Instant,
    delta: Duration,
) -> (Date, Clock) {
    let cs = cal.timescale().calendar_seconds(instant);
    // Local time may be out of the range of a `Duration` near the ends of
    // the instant range, so it is only ever kept in nanoseconds.
    let local = cs.timestamp().to_duration().as_nanos() + delta.as_nanos();
    let (days, within_day) = divmod128(local, t::NANOS_PER_CIVIL_DAY_128);
    // OK because the sum of two `Duration`s spans far fewer than `i64::MAX`
    // days.
    let date = cal.days_to_date(days as i64);
    let within_day = Duration::from_nanos128_saturating(within_day);
    let (hour, within_hour) = within_day.div_rem_secs(t::SECONDS_PER_HOUR);
    let (minute, second) = within_hour.div_rem_secs(t::SECONDS_PER_MINUTE);
    // A leap second is reported against the last ordinary second of the
    // day, so adding it here is what produces `23:59:60`.
    let second = second.saturating_add(Duration::from_secs(cs.leap()));
    (date, Clock::new(hour, minute, second))
}

/// Converts a date and clock into an instant, after shifting the labelled
/// seconds back by `delta`.
///
/// All overflow of the clock fields is carried into the day of the month
/// before the date is converted to a day count, which in turn lets the
/// calendar normalize the date. Fields so far out of range that the result
/// is not representable give [`Instant::MIN`] or [`Instant::MAX`].
pub(crate) fn to_instant(
    cal: &Calendar,
    date: Date,
    clock: Clock,
    delta: Duration,
) -> Instant {
    let last_second = Duration::from_secs(t::SECONDS_PER_MINUTE - 1);
    let (second, extra) = if clock.is_leap_second() {
        (last_second, clock.second() - last_second)
    } else {
        (clock.second(), Duration::ZERO)
    };
    let within_day = i128::from(clock.hour()) * t::NANOS_PER_HOUR_128
        + i128::from(clock.minute()) * t::NANOS_PER_MINUTE_128
        + second.as_nanos();
    let (carry, within_day) =
        divmod128(within_day, t::NANOS_PER_CIVIL_DAY_128);
    // OK because hours, minutes and seconds that each fit into an `i64`
    // add up to far fewer than `i64::MAX` days.
    let day = date.day().saturating_add(carry as i64);
    let days = cal.date_to_days(date.with_day(day));
    let label = i128::from(days) * t::NANOS_PER_CIVIL_DAY_128 + within_day
        - delta.as_nanos();
    let label =
        Timestamp::from_duration(Duration::from_nanos128_saturating(label));
    cal.timescale().from_timestamp(label).saturating_add(extra)
}

/// A builder for calendars defined by a pair of day count conversions.
///
/// The two closures convert between a day count and a date. They must be
/// mutual inverses over every day count. By default, day zero is
/// `2000-01-01`, and [`EarthCalendarBuilder::epoch_shift`] can move it. The
/// earth calendar engine takes care of time of day, leap seconds, time
/// zones and the normalization of out-of-range fields.
///
/// # Example
///
/// A calendar that counts weeks of seven days since an epoch, writing each
/// day as a year of weeks, a week and a day of the week:
///
/// ```
/// use kalends::{
///     calendar::EarthCalendarBuilder, civil::{Clock, Date}, Duration,
///     Instant,
/// };
///
/// let cal = EarthCalendarBuilder::new(
///     "weeks",
///     |days: i64| {
///         let (weeks, day) = (days.div_euclid(7), days.rem_euclid(7));
///         let (year, week) = (weeks.div_euclid(52), weeks.rem_euclid(52));
///         Date::new(year, week + 1, day + 1)
///     },
///     |date: Date| {
///         let weeks = date.year() * 52 + date.month() - 1;
///         weeks * 7 + date.day() - 1
///     },
/// )
/// .long_name("Week count since 2000-01-01")
/// .build();
///
/// let instant = Instant::EPOCH + Duration::from_hours(24 * 8 + 1);
/// let (date, clock) = cal.to_date_clock(instant, Duration::ZERO);
/// assert_eq!(date, Date::new(0, 2, 2));
/// assert_eq!(clock, Clock::hms(1, 0, 0));
/// assert_eq!(cal.to_instant(date, clock, Duration::ZERO), instant);
/// ```
pub struct EarthCalendarBuilder {
    name: Box<str>,
    long_name: Option<Box<str>>,
    month_prefix: Box<str>,
    era: Option<EraFn>,
    epoch_shift: i64,
    timescale: Timescale,
    rules: DayRules,
}

impl EarthCalendarBuilder {
    /// Creates a builder for a calendar with the given name and day count
    /// conversions.
    pub fn new<F, G>(
        name: &str,
        days_to_date: F,
        date_to_days: G,
    ) -> EarthCalendarBuilder
    where
        F: Fn(i64) -> Date + Send + Sync + 'static,
        G: Fn(Date) -> i64 + Send + Sync + 'static,
    {
        let rules = DayRules::Closures {
            days_to_date: Box::new(days_to_date),
            date_to_days: Box::new(date_to_days),
        };
        EarthCalendarBuilder::from_rules(name, rules)
    }

    pub(crate) fn from_rules(
        name: &str,
        rules: DayRules,
    ) -> EarthCalendarBuilder {
        EarthCalendarBuilder {
            name: name.into(),
            long_name: None,
            month_prefix: "".into(),
            era: None,
            epoch_shift: 0,
            timescale: Timescale::UTC,
            rules,
        }
    }

    /// Sets the short name of the calendar.
    pub fn name(self, name: &str) -> EarthCalendarBuilder {
        EarthCalendarBuilder { name: name.into(), ..self }
    }

    /// Sets the long name of the calendar. When unset, the long name is the
    /// same as the short name.
    pub fn long_name(self, long_name: &str) -> EarthCalendarBuilder {
        EarthCalendarBuilder { long_name: Some(long_name.into()), ..self }
    }

    /// Sets the prefix used when displaying month numbers.
    pub fn month_prefix(self, prefix: &str) -> EarthCalendarBuilder {
        EarthCalendarBuilder { month_prefix: prefix.into(), ..self }
    }

    /// Sets the function labelling the era of a date. When unset, the era
    /// of every date is the empty string.
    pub fn era<F>(self, era: F) -> EarthCalendarBuilder
    where
        F: Fn(Date) -> String + Send + Sync + 'static,
    {
        EarthCalendarBuilder { era: Some(Box::new(era)), ..self }
    }

    /// Sets the day count, since `2000-01-01`, of the day that the day
    /// count conversions call day zero.
    ///
    /// For example, a calendar whose conversions count days since
    /// `1970-01-01` uses an epoch shift of `-10957`.
    pub fn epoch_shift(self, days: i64) -> EarthCalendarBuilder {
        EarthCalendarBuilder { epoch_shift: days, ..self }
    }

    /// Sets the time scale of the calendar. This defaults to
    /// [`Timescale::UTC`].
    pub fn timescale(self, timescale: Timescale) -> EarthCalendarBuilder {
        EarthCalendarBuilder { timescale, ..self }
    }

    /// Builds the calendar.
    pub fn build(self) -> Calendar {
        let long_name = self.long_name.unwrap_or_else(|| self.name.clone());
        Calendar::from_def(CalendarDef {
            name: self.name,
            long_name,
            month_prefix: self.month_prefix,
            timescale: self.timescale,
            epoch_shift: self.epoch_shift,
            era: self.era,
            rules: self.rules,
        })
    }
}

impl core::fmt::Debug for EarthCalendarBuilder {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        f.debug_struct("EarthCalendarBuilder")
            .field("name", &self.name)
            .field("long_name", &self.long_name)
            .field("month_prefix", &self.month_prefix)
            .field("epoch_shift", &self.epoch_shift)
            .field("timescale", &self.timescale)
            .field("rules", &self.rules)
            .finish()
    }
}
