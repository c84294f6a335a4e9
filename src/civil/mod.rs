/*!
Calendar-agnostic civil values.

A [`Date`] and a [`Clock`] are plain fields. They only acquire meaning when
interpreted by a [`Calendar`](crate::calendar::Calendar) and, to become an
instant, a [`TimeZone`](crate::tz::TimeZone).
*/

pub use self::{clock::Clock, date::Date};

mod clock;
mod date;

/// Returns true if the given year is a leap year under the proleptic
/// Gregorian rule.
///
/// Years are astronomical: year `0` is 1 BCE, and it is a leap year.
///
/// # Example
///
/// ```
/// use kalends::civil::is_leap_year;
///
/// assert!(is_leap_year(2000));
/// assert!(!is_leap_year(1900));
/// assert!(is_leap_year(2024));
/// assert!(!is_leap_year(2023));
/// ```
#[inline]
pub const fn is_leap_year(year: i64) -> bool {
    crate::util::common::is_leap_year(year)
}

/// Returns true if the given year is a leap year under the Julian rule,
/// where every fourth year is a leap year.
#[inline]
pub const fn is_julian_leap_year(year: i64) -> bool {
    crate::util::common::is_julian_leap_year(year)
}

/// A day of the week.
///
/// Every earth calendar shares the same seven day cycle, so a weekday can be
/// computed from a day count alone. The reference day `2000-01-01` was a
/// Saturday.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Weekday {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
    Sunday,
}

impl Weekday {
    /// Returns the weekday of the given number of days since `2000-01-01`.
    ///
    /// # Example
    ///
    /// ```
    /// use kalends::civil::Weekday;
    ///
    /// assert_eq!(Weekday::from_days_since_epoch(0), Weekday::Saturday);
    /// assert_eq!(Weekday::from_days_since_epoch(-1), Weekday::Friday);
    /// assert_eq!(Weekday::from_days_since_epoch(2), Weekday::Monday);
    /// ```
    #[inline]
    pub fn from_days_since_epoch(days: i64) -> Weekday {
        Weekday::from_monday_zero_offset((days.rem_euclid(7) + 5) % 7)
    }

    /// Returns this weekday as an offset from Monday, in `0..=6`.
    #[inline]
    pub fn to_monday_zero_offset(self) -> i64 {
        self as i64
    }

    /// Returns this weekday as an offset from Monday, in `1..=7`.
    #[inline]
    pub fn to_monday_one_offset(self) -> i64 {
        self.to_monday_zero_offset() + 1
    }

    /// Returns this weekday as an offset from Sunday, in `0..=6`.
    #[inline]
    pub fn to_sunday_zero_offset(self) -> i64 {
        (self.to_monday_zero_offset() + 1) % 7
    }

    /// Returns the weekday following this one.
    #[inline]
    pub fn next(self) -> Weekday {
        let offset = self.to_monday_zero_offset();
        Weekday::from_monday_zero_offset((offset + 1) % 7)
    }

    /// Returns the weekday preceding this one.
    #[inline]
    pub fn previous(self) -> Weekday {
        let offset = self.to_monday_zero_offset();
        Weekday::from_monday_zero_offset((offset + 6) % 7)
    }

    /// `offset` must be in `0..=6`.
    fn from_monday_zero_offset(offset: i64) -> Weekday {
        match offset {
            0 => Weekday::Monday,
            1 => Weekday::Tuesday,
            2 => Weekday::Wednesday,
            3 => Weekday::Thursday,
            4 => Weekday::Friday,
            5 => Weekday::Saturday,
            _ => Weekday::Sunday,
        }
    }
}
