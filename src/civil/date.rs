/// A civil date: a year, a month and a day.
///
/// A `Date` carries no calendar of its own. It is interpreted by a
/// [`Calendar`](crate::calendar::Calendar), which decides what the fields
/// mean. Consequently, a `Date` is never validated: fields outside of their
/// nominal range (such as a month of `13` or a day of `33`) are accepted and
/// normalized by the calendar when the date is converted to a day count.
///
/// ```
/// use kalends::{calendar::Calendar, civil::Date};
///
/// let cal = Calendar::ISO;
/// let days = cal.date_to_days(Date::new(2023, 13, 1));
/// assert_eq!(cal.days_to_date(days), Date::new(2024, 1, 1));
///
/// let days = cal.date_to_days(Date::new(2024, 1, 33));
/// assert_eq!(cal.days_to_date(days), Date::new(2024, 2, 2));
/// ```
///
/// # Comparisons
///
/// `Date` orders lexicographically on `(year, month, day)`. This agrees with
/// chronological order only for normalized dates of the same calendar.
///
/// # Display
///
/// The `Display` implementation writes `YYYY-MM-DD`, with a year of at
/// least four digits and a leading `-` for negative years:
///
/// ```
/// use kalends::civil::Date;
///
/// assert_eq!(Date::new(2024, 2, 29).to_string(), "2024-02-29");
/// assert_eq!(Date::new(-44, 3, 15).to_string(), "-0044-03-15");
/// ```
#[derive(Clone, Copy, Default, Eq, Hash, PartialEq, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Date {
    year: i64,
    month: i64,
    day: i64,
}

impl Date {
    /// Creates a new date from its fields. No validation is performed.
    #[inline]
    pub const fn new(year: i64, month: i64, day: i64) -> Date {
        Date { year, month, day }
    }

    /// Returns the year of this date.
    #[inline]
    pub const fn year(self) -> i64 {
        self.year
    }

    /// Returns the month of this date. For normalized dates, this is
    /// `1..=12` in the built-in calendars.
    #[inline]
    pub const fn month(self) -> i64 {
        self.month
    }

    /// Returns the day of the month of this date.
    #[inline]
    pub const fn day(self) -> i64 {
        self.day
    }

    /// Returns a copy of this date with the year replaced.
    #[inline]
    pub const fn with_year(self, year: i64) -> Date {
        Date { year, ..self }
    }

    /// Returns a copy of this date with the day replaced.
    #[inline]
    pub(crate) const fn with_day(self, day: i64) -> Date {
        Date { day, ..self }
    }
}

impl core::fmt::Debug for Date {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        core::fmt::Display::fmt(self, f)
    }
}

impl core::fmt::Display for Date {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        if self.year < 0 {
            write!(f, "-{:04}", self.year.unsigned_abs())?;
        } else {
            write!(f, "{:04}", self.year)?;
        }
        write!(f, "-{:02}-{:02}", self.month, self.day)
    }
}

impl From<(i64, i64, i64)> for Date {
    #[inline]
    fn from((year, month, day): (i64, i64, i64)) -> Date {
        Date::new(year, month, day)
    }
}
