use alloc::{string::String, sync::Arc};

use crate::{
    calendar::{earth::EarthCalendarBuilder, Calendar, DayRules},
    civil::Date,
    scale::Timescale,
    util::{
        common::{
            divmod, divmod128, is_julian_leap_year, is_leap_year,
            saturate_i64,
        },
        t,
    },
};

/// The year and month arithmetic that defines a solar calendar.
///
/// A solar calendar is described entirely by where its years and months
/// begin. Given those boundaries, this crate derives the conversions between
/// day counts and dates, and through the earth calendar engine, the
/// conversions between instants and dates.
///
/// All day counts seen by an implementation of this trait are relative to
/// the calendar's own day zero, which is the first day of its year `1` when
/// [`SolarArithmetic::days_before_year`] returns `0` for year `1`. Years are
/// *internal* years: they always include a year zero. When
/// [`SolarArithmetic::has_year_zero`] returns `false`, the internal year `0`
/// is displayed as year `-1`, internal `-1` as `-2`, and so on.
///
/// Months passed to these methods are always normalized into the range
/// `1..=months_per_year()`.
///
/// # Example
///
/// A toy calendar with twelve 30 day months and five extra days in the last
/// month, without leap years:
///
/// ```
/// use kalends::{
///     calendar::{SolarArithmetic, SolarCalendarBuilder, YearEstimate},
///     civil::Date,
/// };
///
/// struct Uniform;
///
/// impl SolarArithmetic for Uniform {
///     fn days_before_year(&self, year: i64) -> i64 {
///         365 * (year - 1)
///     }
///
///     fn days_before_month(&self, _year: i64, month: i64) -> i64 {
///         30 * (month - 1)
///     }
///
///     fn days_to_month(&self, _year: i64, day_of_year: i64) -> i64 {
///         (day_of_year / 30 + 1).min(12)
///     }
///
///     fn locate_year(&self, days: i64) -> YearEstimate {
///         YearEstimate::Exact(days.div_euclid(365) + 1)
///     }
///
///     fn epoch_shift(&self) -> i64 {
///         0
///     }
/// }
///
/// let cal = SolarCalendarBuilder::new(Uniform).name("uniform").build();
/// assert_eq!(cal.days_to_date(0), Date::new(1, 1, 1));
/// assert_eq!(cal.days_to_date(364), Date::new(1, 12, 35));
/// assert_eq!(cal.days_to_date(365), Date::new(2, 1, 1));
/// assert_eq!(cal.date_to_days(Date::new(1, 13, 1)), 365);
/// ```
pub trait SolarArithmetic: Send + Sync {
    /// Returns the number of days from day zero to the first day of the
    /// given internal year.
    fn days_before_year(&self, year: i64) -> i64;

    /// Returns the number of days from the first day of the year to the
    /// first day of the given month.
    fn days_before_month(&self, year: i64, month: i64) -> i64;

    /// Returns the month containing the given zero-based day of the year.
    fn days_to_month(&self, year: i64, day_of_year: i64) -> i64;

    /// Returns the year containing the given day count, either exactly or as
    /// a lower bound.
    fn locate_year(&self, days: i64) -> YearEstimate;

    /// Returns the number of days from this calendar's day zero to
    /// `2000-01-01` (ISO).
    fn epoch_shift(&self) -> i64;

    /// Returns true if years are numbered with a year zero.
    fn has_year_zero(&self) -> bool {
        true
    }

    /// Returns the number of months in every year.
    fn months_per_year(&self) -> i64 {
        12
    }
}

/// The result of locating the year of a day count.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum YearEstimate {
    /// The internal year containing the day.
    Exact(i64),
    /// A year that is either the year containing the day or the one just
    /// before it.
    ///
    /// When the day of the year computed against `year` is in the range
    /// `0..=safe_day_of_year`, the estimate is known to be correct.
    /// Otherwise, `year + 1` is tried and used if the day falls on or after
    /// its first day.
    LowerBound {
        /// A year that is never greater than the correct year.
        year: i64,
        /// The largest day of the year for which `year` is certainly
        /// correct.
        safe_day_of_year: Option<i64>,
    },
}

/// Converts a day count, relative to 2000-01-01, into a date.
pub(crate) fn days_to_date(arith: &dyn SolarArithmetic, days: i64) -> Date {
    let days = days.saturating_add(arith.epoch_shift());
    let (year, day_of_year) = match arith.locate_year(days) {
        YearEstimate::Exact(year) => {
            (year, days - arith.days_before_year(year))
        }
        YearEstimate::LowerBound { year, safe_day_of_year } => {
            let day_of_year = days - arith.days_before_year(year);
            let safe = safe_day_of_year
                .map_or(false, |safe| (0..=safe).contains(&day_of_year));
            if safe {
                (year, day_of_year)
            } else {
                let next = year + 1;
                let next_day_of_year = days - arith.days_before_year(next);
                if next_day_of_year >= 0 {
                    (next, next_day_of_year)
                } else {
                    (year, day_of_year)
                }
            }
        }
    };
    let month = arith.days_to_month(year, day_of_year);
    let day = day_of_year - arith.days_before_month(year, month) + 1;
    let year =
        if !arith.has_year_zero() && year <= 0 { year - 1 } else { year };
    Date::new(year, month, day)
}

/// Converts a date into a day count relative to 2000-01-01.
///
/// Months outside of the year are carried into the year first. A displayed
/// year of `0` in a calendar without a year zero is read as the year before
/// year `1`. Day counts beyond the range of an `i64` saturate.
pub(crate) fn date_to_days(arith: &dyn SolarArithmetic, date: Date) -> i64 {
    let mut year = date.year();
    if !arith.has_year_zero() && year < 0 {
        year += 1;
    }
    let (carry, month) = divmod128(
        i128::from(date.month()) - 1,
        i128::from(arith.months_per_year()),
    );
    let year = year.saturating_add(saturate_i64(carry));
    // OK because the month was just reduced modulo an `i64`.
    let month = month as i64 + 1;
    saturate_i64(
        i128::from(arith.days_before_year(year))
            + i128::from(arith.days_before_month(year, month))
            + i128::from(date.day())
            - 1
            - i128::from(arith.epoch_shift()),
    )
}

/// Proleptic Gregorian arithmetic, shared by the ISO and Gregorian
/// calendars.
#[derive(Clone, Copy, Debug)]
pub(crate) struct Gregorian {
    pub(crate) year_zero: bool,
}

impl SolarArithmetic for Gregorian {
    fn days_before_year(&self, year: i64) -> i64 {
        let y = i128::from(year) - 1;
        saturate_i64(
            365 * y + y.div_euclid(4) - y.div_euclid(100) + y.div_euclid(400),
        )
    }

    fn days_before_month(&self, year: i64, month: i64) -> i64 {
        march_based_days_before_month(is_leap_year(year), month)
    }

    fn days_to_month(&self, year: i64, day_of_year: i64) -> i64 {
        march_based_days_to_month(is_leap_year(year), day_of_year)
    }

    fn locate_year(&self, days: i64) -> YearEstimate {
        let (era, day_of_era) = divmod(days, t::DAYS_IN_GREGORIAN_ERA);
        YearEstimate::LowerBound {
            year: 400 * era + day_of_era * 400 / t::DAYS_IN_GREGORIAN_ERA + 1,
            safe_day_of_year: Some(363),
        }
    }

    fn epoch_shift(&self) -> i64 {
        730_119
    }

    fn has_year_zero(&self) -> bool {
        self.year_zero
    }
}

/// Proleptic Julian arithmetic.
#[derive(Clone, Copy, Debug)]
pub(crate) struct Julian {
    pub(crate) year_zero: bool,
}

impl SolarArithmetic for Julian {
    fn days_before_year(&self, year: i64) -> i64 {
        let y = i128::from(year) - 1;
        saturate_i64(365 * y + y.div_euclid(4))
    }

    fn days_before_month(&self, year: i64, month: i64) -> i64 {
        march_based_days_before_month(is_julian_leap_year(year), month)
    }

    fn days_to_month(&self, year: i64, day_of_year: i64) -> i64 {
        march_based_days_to_month(is_julian_leap_year(year), day_of_year)
    }

    fn locate_year(&self, days: i64) -> YearEstimate {
        let (cycle, day_of_cycle) = divmod(days, t::DAYS_IN_JULIAN_CYCLE);
        YearEstimate::LowerBound {
            year: 4 * cycle + day_of_cycle * 4 / t::DAYS_IN_JULIAN_CYCLE + 1,
            safe_day_of_year: Some(363),
        }
    }

    fn epoch_shift(&self) -> i64 {
        // Julian 2000-01-01 is ISO 2000-01-14.
        730_121
    }

    fn has_year_zero(&self) -> bool {
        self.year_zero
    }
}

/// Treats the year as if it began in March, so that February is the last
/// month and its variable length never shifts the other months.
fn march_based_days_before_month(leap: bool, month: i64) -> i64 {
    let correction = if month <= 2 {
        0
    } else if leap {
        1
    } else {
        2
    };
    (367 * month - 362).div_euclid(12) - correction
}

fn march_based_days_to_month(leap: bool, day_of_year: i64) -> i64 {
    let correction = if day_of_year < 59 + i64::from(leap) {
        0
    } else if leap {
        1
    } else {
        2
    };
    (12 * (day_of_year + correction) + 373).div_euclid(367)
}

pub(crate) static ISO: Gregorian = Gregorian { year_zero: true };
pub(crate) static GREGORIAN: Gregorian = Gregorian { year_zero: false };
pub(crate) static JULIAN: Julian = Julian { year_zero: false };

/// Era labels of the Gregorian calendar.
pub(crate) fn gregorian_era(date: Date) -> String {
    String::from(if date.year() > 0 { "CE" } else { "BCE" })
}

/// Era labels of the Julian calendar.
pub(crate) fn julian_era(date: Date) -> String {
    String::from(if date.year() > 0 { "AD" } else { "BC" })
}

/// A builder for calendars defined by [`SolarArithmetic`].
///
/// This accepts the same options as [`EarthCalendarBuilder`], and uses the
/// solar arithmetic in place of closures to convert between day counts and
/// dates.
///
/// # Example
///
/// This builds a Gregorian calendar on the TAI time scale:
///
/// ```
/// use kalends::{
///     calendar::SolarCalendarBuilder, civil::{Clock, Date}, Duration,
///     Instant, Timescale,
/// };
///
/// let cal = SolarCalendarBuilder::gregorian()
///     .name("gregorian-tai")
///     .timescale(Timescale::TAI)
///     .build();
/// let (date, clock) = cal.to_date_clock(Instant::EPOCH, Duration::ZERO);
/// assert_eq!(date, Date::new(2000, 1, 1));
/// assert_eq!(clock, Clock::hms(0, 0, 32));
/// ```
pub struct SolarCalendarBuilder {
    earth: EarthCalendarBuilder,
}

impl SolarCalendarBuilder {
    /// Creates a builder for a calendar using the given arithmetic.
    ///
    /// The calendar is named `solar` until a name is given.
    pub fn new<A>(arith: A) -> SolarCalendarBuilder
    where
        A: SolarArithmetic + 'static,
    {
        SolarCalendarBuilder::from_arc(Arc::new(arith))
    }

    /// A builder preloaded with the ISO calendar's arithmetic and names.
    pub fn iso() -> SolarCalendarBuilder {
        SolarCalendarBuilder::from_arc(Arc::new(ISO))
            .name("ISO")
            .long_name("ISO 8601")
    }

    /// A builder preloaded with the proleptic Gregorian calendar's
    /// arithmetic, names and era labels.
    pub fn gregorian() -> SolarCalendarBuilder {
        SolarCalendarBuilder::from_arc(Arc::new(GREGORIAN))
            .name("Gregorian")
            .long_name("Proleptic Gregorian")
            .era(gregorian_era)
    }

    /// A builder preloaded with the proleptic Julian calendar's arithmetic,
    /// names and era labels.
    pub fn julian() -> SolarCalendarBuilder {
        SolarCalendarBuilder::from_arc(Arc::new(JULIAN))
            .name("Julian")
            .long_name("Proleptic Julian")
            .era(julian_era)
    }

    fn from_arc(arith: Arc<dyn SolarArithmetic>) -> SolarCalendarBuilder {
        let earth =
            EarthCalendarBuilder::from_rules("solar", DayRules::Solar(arith));
        SolarCalendarBuilder { earth }
    }

    /// Sets the short name of the calendar.
    pub fn name(self, name: &str) -> SolarCalendarBuilder {
        SolarCalendarBuilder { earth: self.earth.name(name) }
    }

    /// Sets the long name of the calendar.
    pub fn long_name(self, long_name: &str) -> SolarCalendarBuilder {
        SolarCalendarBuilder { earth: self.earth.long_name(long_name) }
    }

    /// Sets the prefix used when displaying month numbers.
    pub fn month_prefix(self, prefix: &str) -> SolarCalendarBuilder {
        SolarCalendarBuilder { earth: self.earth.month_prefix(prefix) }
    }

    /// Sets the function labelling the era of a date.
    pub fn era<F>(self, era: F) -> SolarCalendarBuilder
    where
        F: Fn(Date) -> String + Send + Sync + 'static,
    {
        SolarCalendarBuilder { earth: self.earth.era(era) }
    }

    /// Sets an additional shift, in days, between the reference epoch and
    /// the day counts of the calendar. See
    /// [`EarthCalendarBuilder::epoch_shift`].
    pub fn epoch_shift(self, days: i64) -> SolarCalendarBuilder {
        SolarCalendarBuilder { earth: self.earth.epoch_shift(days) }
    }

    /// Sets the time scale of the calendar. This defaults to
    /// [`Timescale::UTC`].
    pub fn timescale(self, timescale: Timescale) -> SolarCalendarBuilder {
        SolarCalendarBuilder { earth: self.earth.timescale(timescale) }
    }

    /// Builds the calendar.
    pub fn build(self) -> Calendar {
        self.earth.build()
    }
}

impl core::fmt::Debug for SolarCalendarBuilder {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        f.debug_struct("SolarCalendarBuilder")
            .field("earth", &self.earth)
            .finish()
    }
}
