/*!
Calendars that map instants to civil dates and clocks.

Every calendar in this crate is an *earth calendar*: its days are `86,400`
labelled seconds long, plus whatever leap seconds its [`Timescale`] reports.
A calendar is therefore fully described by a pair of functions converting
between a day count and a [`Date`], together with a time scale. The earth
calendar engine in this module takes care of everything else: splitting
seconds into days, placing leap seconds at `23:59:60`, and normalizing
out-of-range fields.

Calendars can be built in four ways:

* The constants [`Calendar::ISO`], [`Calendar::GREGORIAN`] and
[`Calendar::JULIAN`].
* [`EarthCalendarBuilder`], from a pair of closures.
* [`SolarCalendarBuilder`], from the year and month boundaries described by
a [`SolarArithmetic`] implementation.
* The combinators [`Calendar::combine`] and [`Calendar::year_shift`], which
derive new calendars from existing ones.

# Day counts

All day counts exchanged through [`Calendar::days_to_date`] and
[`Calendar::date_to_days`] are days since `2000-01-01` (ISO). Different
calendars thus agree on what a day count means, which is what makes it
possible to combine them.

# Example

```
use kalends::{calendar::Calendar, civil::Date};

let iso = Calendar::ISO;
let julian = Calendar::JULIAN;
let days = iso.date_to_days(Date::new(2024, 1, 1));
assert_eq!(julian.days_to_date(days), Date::new(2023, 12, 19));
```
*/

use alloc::{boxed::Box, string::String, sync::Arc};

use crate::{
    civil::{Clock, Date, Weekday},
    scale::Timescale,
    Duration, Instant,
};

pub use self::{
    combine::CombinedCalendarBuilder,
    earth::EarthCalendarBuilder,
    solar::{SolarArithmetic, SolarCalendarBuilder, YearEstimate},
};

mod combine;
mod earth;
mod solar;

/// The time scale of the built-in calendars.
static DEFAULT_TIMESCALE: Timescale = Timescale::UTC;

/// A function labelling the era of a date.
type EraFn = Box<dyn Fn(Date) -> String + Send + Sync>;

/// An immutable calendar descriptor.
///
/// A calendar bundles a name, a time scale, display hints and the
/// conversions between instants, day counts and civil dates. Cloning a
/// calendar is cheap: the built-in calendars are constants and every other
/// calendar shares its definition through an `Arc`.
///
/// # Example
///
/// This converts an instant to a date and clock and back:
///
/// ```
/// use kalends::{
///     calendar::Calendar, civil::{Clock, Date}, Duration, Instant,
/// };
///
/// let cal = Calendar::GREGORIAN;
/// let (date, clock) = cal.to_date_clock(Instant::EPOCH, Duration::ZERO);
/// assert_eq!((date, clock), (Date::new(2000, 1, 1), Clock::MIDNIGHT));
/// assert_eq!(cal.era(date), "CE");
/// assert_eq!(cal.to_instant(date, clock, Duration::ZERO), Instant::EPOCH);
/// ```
#[derive(Clone)]
pub struct Calendar {
    kind: CalendarKind,
}

#[derive(Clone)]
enum CalendarKind {
    Iso,
    Gregorian,
    Julian,
    Custom(Arc<CalendarDef>),
}

/// The definition of every calendar that isn't built in.
pub(crate) struct CalendarDef {
    pub(crate) name: Box<str>,
    pub(crate) long_name: Box<str>,
    pub(crate) month_prefix: Box<str>,
    pub(crate) timescale: Timescale,
    /// The day count, since 2000-01-01, of the day numbered zero by `rules`.
    pub(crate) epoch_shift: i64,
    pub(crate) era: Option<EraFn>,
    pub(crate) rules: DayRules,
}

/// How a calendar converts between day counts and dates.
pub(crate) enum DayRules {
    Closures {
        days_to_date: Box<dyn Fn(i64) -> Date + Send + Sync>,
        date_to_days: Box<dyn Fn(Date) -> i64 + Send + Sync>,
    },
    Solar(Arc<dyn SolarArithmetic>),
    Combined {
        switch_day: i64,
        before: Calendar,
        after: Calendar,
    },
    YearShifted {
        shift: i64,
        base: Calendar,
    },
}

impl Calendar {
    /// The ISO 8601 calendar: the proleptic Gregorian calendar with a year
    /// zero and no era labels.
    ///
    /// This is the default calendar.
    pub const ISO: Calendar = Calendar { kind: CalendarKind::Iso };

    /// The proleptic Gregorian calendar without a year zero. The year
    /// before `1` CE is `-1`, labelled BCE.
    pub const GREGORIAN: Calendar =
        Calendar { kind: CalendarKind::Gregorian };

    /// The proleptic Julian calendar without a year zero, with BC and AD
    /// era labels.
    pub const JULIAN: Calendar = Calendar { kind: CalendarKind::Julian };

    pub(crate) fn from_def(def: CalendarDef) -> Calendar {
        Calendar { kind: CalendarKind::Custom(Arc::new(def)) }
    }

    /// Returns the short name of this calendar.
    pub fn name(&self) -> &str {
        match self.kind {
            CalendarKind::Iso => "ISO",
            CalendarKind::Gregorian => "Gregorian",
            CalendarKind::Julian => "Julian",
            CalendarKind::Custom(ref def) => &*def.name,
        }
    }

    /// Returns the long name of this calendar.
    pub fn long_name(&self) -> &str {
        match self.kind {
            CalendarKind::Iso => "ISO 8601",
            CalendarKind::Gregorian => "Proleptic Gregorian",
            CalendarKind::Julian => "Proleptic Julian",
            CalendarKind::Custom(ref def) => &*def.long_name,
        }
    }

    /// Returns the prefix to display before month numbers. This is empty
    /// for the built-in calendars.
    pub fn month_prefix(&self) -> &str {
        match self.kind {
            CalendarKind::Custom(ref def) => &*def.month_prefix,
            _ => "",
        }
    }

    /// Returns the time scale this calendar labels instants with.
    pub fn timescale(&self) -> &Timescale {
        match self.kind {
            CalendarKind::Custom(ref def) => &def.timescale,
            _ => &DEFAULT_TIMESCALE,
        }
    }

    /// Returns the era label of the given date, or an empty string when the
    /// calendar has no eras.
    ///
    /// # Example
    ///
    /// ```
    /// use kalends::{calendar::Calendar, civil::Date};
    ///
    /// assert_eq!(Calendar::JULIAN.era(Date::new(-44, 3, 15)), "BC");
    /// assert_eq!(Calendar::GREGORIAN.era(Date::new(2024, 1, 1)), "CE");
    /// assert_eq!(Calendar::ISO.era(Date::new(2024, 1, 1)), "");
    /// ```
    pub fn era(&self, date: Date) -> String {
        match self.kind {
            CalendarKind::Iso => String::new(),
            CalendarKind::Gregorian => solar::gregorian_era(date),
            CalendarKind::Julian => solar::julian_era(date),
            CalendarKind::Custom(ref def) => {
                if let Some(ref era) = def.era {
                    return era(date);
                }
                match def.rules {
                    DayRules::Combined {
                        switch_day,
                        ref before,
                        ref after,
                    } => {
                        combine::combined_era(switch_day, before, after, date)
                    }
                    DayRules::YearShifted { shift, ref base } => {
                        let year = date.year().saturating_add(shift);
                        base.era(date.with_year(year))
                    }
                    _ => String::new(),
                }
            }
        }
    }

    /// Converts a number of days since `2000-01-01` into a date of this
    /// calendar.
    ///
    /// This is the inverse of [`Calendar::date_to_days`] for every day
    /// count.
    pub fn days_to_date(&self, days: i64) -> Date {
        match self.kind {
            CalendarKind::Iso => solar::days_to_date(&solar::ISO, days),
            CalendarKind::Gregorian => {
                solar::days_to_date(&solar::GREGORIAN, days)
            }
            CalendarKind::Julian => solar::days_to_date(&solar::JULIAN, days),
            CalendarKind::Custom(ref def) => def.days_to_date(days),
        }
    }

    /// Converts a date of this calendar into a number of days since
    /// `2000-01-01`.
    ///
    /// Out-of-range fields are normalized: month `13` is the first month of
    /// the following year, and day `33` of January is the second of
    /// February.
    pub fn date_to_days(&self, date: Date) -> i64 {
        match self.kind {
            CalendarKind::Iso => solar::date_to_days(&solar::ISO, date),
            CalendarKind::Gregorian => {
                solar::date_to_days(&solar::GREGORIAN, date)
            }
            CalendarKind::Julian => solar::date_to_days(&solar::JULIAN, date),
            CalendarKind::Custom(ref def) => def.date_to_days(date),
        }
    }

    /// Converts an instant into a date and clock of this calendar.
    ///
    /// `delta` is added to the labelled seconds before splitting them into
    /// days. It is usually the UTC offset of a time zone.
    ///
    /// # Example
    ///
    /// The leap second at the end of 2016 is rendered as `23:59:60`:
    ///
    /// ```
    /// use kalends::{
    ///     calendar::Calendar, civil::{Clock, Date}, Duration,
    /// };
    ///
    /// let cal = Calendar::ISO;
    /// let date = Date::new(2016, 12, 31);
    /// let clock = Clock::hms(23, 59, 59);
    /// let last = cal.to_instant(date, clock, Duration::ZERO);
    /// let leap = last + Duration::from_secs(1);
    /// let (d, c) = cal.to_date_clock(leap, Duration::ZERO);
    /// assert_eq!((d, c), (date, Clock::hms(23, 59, 60)));
    /// ```
    pub fn to_date_clock(
        &self,
        instant: Instant,
        delta: Duration,
    ) -> (Date, Clock) {
        earth::to_date_clock(self, instant, delta)
    }

    /// Converts a date and clock of this calendar into an instant.
    ///
    /// `delta` is subtracted from the labelled seconds, so passing a UTC
    /// offset interprets the date and clock as local time in that offset.
    /// Out-of-range fields are normalized, and a clock reading of `60`
    /// seconds or more is placed after the last ordinary second of the
    /// minute.
    pub fn to_instant(
        &self,
        date: Date,
        clock: Clock,
        delta: Duration,
    ) -> Instant {
        earth::to_instant(self, date, clock, delta)
    }

    /// Returns the weekday of the given date.
    ///
    /// # Example
    ///
    /// ```
    /// use kalends::{calendar::Calendar, civil::{Date, Weekday}};
    ///
    /// let date = Date::new(2024, 7, 4);
    /// assert_eq!(Calendar::ISO.weekday(date), Weekday::Thursday);
    /// ```
    pub fn weekday(&self, date: Date) -> Weekday {
        Weekday::from_days_since_epoch(self.date_to_days(date))
    }

    /// Returns the number of days in the given month of the given year.
    ///
    /// # Example
    ///
    /// ```
    /// use kalends::calendar::Calendar;
    ///
    /// assert_eq!(Calendar::ISO.days_in_month(2024, 2), 29);
    /// assert_eq!(Calendar::ISO.days_in_month(1900, 2), 28);
    /// assert_eq!(Calendar::JULIAN.days_in_month(1900, 2), 29);
    /// ```
    pub fn days_in_month(&self, year: i64, month: i64) -> i64 {
        let first = self.date_to_days(Date::new(year, month, 1));
        let next =
            self.date_to_days(Date::new(year, month.saturating_add(1), 1));
        next.saturating_sub(first)
    }

    /// Creates a calendar that uses `before` for days preceding
    /// `switch_date` and `after` from `switch_date` on.
    ///
    /// `switch_date` is a date of the `after` calendar. This is a shortcut
    /// for [`CombinedCalendarBuilder`] with its defaults.
    ///
    /// # Example
    ///
    /// ```
    /// use kalends::{calendar::Calendar, civil::Date};
    ///
    /// let cal = Calendar::combine(
    ///     Date::new(1582, 10, 15),
    ///     Calendar::JULIAN,
    ///     Calendar::GREGORIAN,
    /// );
    /// let switch = cal.date_to_days(Date::new(1582, 10, 15));
    /// assert_eq!(cal.days_to_date(switch - 1), Date::new(1582, 10, 4));
    /// ```
    pub fn combine(
        switch_date: Date,
        before: Calendar,
        after: Calendar,
    ) -> Calendar {
        CombinedCalendarBuilder::new(switch_date, before, after).build()
    }

    /// Creates a calendar identical to this one, except that its years are
    /// numbered `shift` less than this calendar's years.
    ///
    /// # Example
    ///
    /// ```
    /// use kalends::{calendar::Calendar, civil::Date};
    ///
    /// let shifted = Calendar::ISO.year_shift(1911);
    /// let days = Calendar::ISO.date_to_days(Date::new(2024, 5, 20));
    /// assert_eq!(shifted.days_to_date(days), Date::new(113, 5, 20));
    /// ```
    pub fn year_shift(&self, shift: i64) -> Calendar {
        combine::year_shift(shift, self.clone())
    }

    /// The calendar used in most of Catholic Europe: Julian until
    /// 1582-10-04, followed by Gregorian from 1582-10-15.
    pub fn historical() -> Calendar {
        CombinedCalendarBuilder::new(
            Date::new(1582, 10, 15),
            Calendar::JULIAN,
            Calendar::GREGORIAN,
        )
        .name("Historical")
        .long_name("Julian to Gregorian at 1582-10-15")
        .era(solar::julian_era)
        .build()
    }

    /// The Minguo calendar of the Republic of China, whose year `1` is the
    /// Gregorian year 1912.
    ///
    /// Years before year `1` are numbered astronomically, like ISO years:
    /// year `0` is 1911, which is 1 B.ROC, year `-1` is 2 B.ROC, and so on.
    /// The era label of every year below `1` is `"B.ROC"`.
    ///
    /// # Example
    ///
    /// ```
    /// use kalends::{calendar::Calendar, civil::Date};
    ///
    /// let cal = Calendar::minguo();
    /// let days = Calendar::ISO.date_to_days(Date::new(1912, 1, 1));
    /// assert_eq!(cal.days_to_date(days), Date::new(1, 1, 1));
    /// assert_eq!(cal.era(Date::new(1, 1, 1)), "ROC");
    ///
    /// // The year before year 1 is year 0, or 1 B.ROC.
    /// assert_eq!(cal.days_to_date(days - 1), Date::new(0, 12, 31));
    /// assert_eq!(cal.era(Date::new(0, 12, 31)), "B.ROC");
    /// ```
    pub fn minguo() -> Calendar {
        combine::year_shifted_def(
            1911,
            Calendar::ISO,
            "Minguo",
            "Minguo (Republic of China)",
            Some(Box::new(|date: Date| {
                String::from(if date.year() > 0 { "ROC" } else { "B.ROC" })
            })),
        )
    }

    /// The Thai solar calendar, whose years are Buddhist Era years, 543
    /// more than Gregorian years.
    pub fn thai_solar() -> Calendar {
        combine::year_shifted_def(
            -543,
            Calendar::ISO,
            "Thai solar",
            "Thai solar (Buddhist Era)",
            Some(Box::new(|_: Date| String::from("BE"))),
        )
    }
}

impl CalendarDef {
    fn days_to_date(&self, days: i64) -> Date {
        let days = days.saturating_sub(self.epoch_shift);
        match self.rules {
            DayRules::Closures { ref days_to_date, .. } => days_to_date(days),
            DayRules::Solar(ref arith) => solar::days_to_date(&**arith, days),
            DayRules::Combined { switch_day, ref before, ref after } => {
                combine::combined_days_to_date(switch_day, before, after, days)
            }
            DayRules::YearShifted { shift, ref base } => {
                let date = base.days_to_date(days);
                date.with_year(date.year().saturating_sub(shift))
            }
        }
    }

    fn date_to_days(&self, date: Date) -> i64 {
        let days = match self.rules {
            DayRules::Closures { ref date_to_days, .. } => date_to_days(date),
            DayRules::Solar(ref arith) => solar::date_to_days(&**arith, date),
            DayRules::Combined { switch_day, ref before, ref after } => {
                combine::combined_date_to_days(switch_day, before, after, date)
            }
            DayRules::YearShifted { shift, ref base } => {
                let year = date.year().saturating_add(shift);
                base.date_to_days(date.with_year(year))
            }
        };
        days.saturating_add(self.epoch_shift)
    }
}

impl Default for Calendar {
    fn default() -> Calendar {
        Calendar::ISO
    }
}

impl core::fmt::Debug for Calendar {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        f.debug_tuple("Calendar").field(&self.name()).finish()
    }
}

impl core::fmt::Debug for DayRules {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        match *self {
            DayRules::Closures { .. } => f.write_str("Closures"),
            DayRules::Solar(_) => f.write_str("Solar"),
            DayRules::Combined { switch_day, ref before, ref after } => f
                .debug_struct("Combined")
                .field("switch_day", &switch_day)
                .field("before", before)
                .field("after", after)
                .finish(),
            DayRules::YearShifted { shift, ref base } => f
                .debug_struct("YearShifted")
                .field("shift", &shift)
                .field("base", base)
                .finish(),
        }
    }
}
