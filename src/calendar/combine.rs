use alloc::{boxed::Box, string::String};

use crate::{
    calendar::{Calendar, CalendarDef, DayRules, EraFn},
    civil::Date,
};

/// Converts a day count of a combined calendar into a date.
pub(crate) fn combined_days_to_date(
    switch_day: i64,
    before: &Calendar,
    after: &Calendar,
    days: i64,
) -> Date {
    if days >= switch_day {
        after.days_to_date(days)
    } else {
        before.days_to_date(days)
    }
}

/// Converts a date of a combined calendar into a day count.
///
/// The date is first read with the `after` calendar. When that places it on
/// or after the switch, it is an `after` date. Otherwise, it is read again
/// with the `before` calendar.
pub(crate) fn combined_date_to_days(
    switch_day: i64,
    before: &Calendar,
    after: &Calendar,
    date: Date,
) -> i64 {
    let days = after.date_to_days(date);
    if days >= switch_day {
        days
    } else {
        before.date_to_days(date)
    }
}

/// Labels the era of a date of a combined calendar with the era of the
/// calendar in effect on that date.
pub(crate) fn combined_era(
    switch_day: i64,
    before: &Calendar,
    after: &Calendar,
    date: Date,
) -> String {
    if after.date_to_days(date) >= switch_day {
        after.era(date)
    } else {
        before.era(date)
    }
}

/// Creates a calendar identical to `base` but with years numbered `shift`
/// less.
pub(crate) fn year_shift(shift: i64, base: Calendar) -> Calendar {
    let name = String::from(base.name());
    let long_name = String::from(base.long_name());
    year_shifted_def(shift, base, &name, &long_name, None)
}

pub(crate) fn year_shifted_def(
    shift: i64,
    base: Calendar,
    name: &str,
    long_name: &str,
    era: Option<EraFn>,
) -> Calendar {
    trace!(
        "building year shifted calendar {name:?} from {:?} with shift {shift}",
        base.name(),
    );
    Calendar::from_def(CalendarDef {
        name: name.into(),
        long_name: long_name.into(),
        month_prefix: base.month_prefix().into(),
        timescale: base.timescale().clone(),
        epoch_shift: 0,
        era,
        rules: DayRules::YearShifted { shift, base },
    })
}

/// A builder for a calendar that switches from one calendar to another on a
/// given date.
///
/// Days before the switch date are converted with the `before` calendar,
/// and days on or after it with the `after` calendar. The switch date is
/// given as a date of the `after` calendar. The time scale and month prefix
/// of the combined calendar are those of `after`.
///
/// Unless set, the name and long name are those of `after`, and the era of
/// a date is labelled by whichever calendar is in effect on that date.
///
/// # Example
///
/// Britain switched from the Julian to the Gregorian calendar in 1752,
/// skipping 11 days:
///
/// ```
/// use kalends::{
///     calendar::{Calendar, CombinedCalendarBuilder}, civil::Date,
/// };
///
/// let cal = CombinedCalendarBuilder::new(
///     Date::new(1752, 9, 14),
///     Calendar::JULIAN,
///     Calendar::GREGORIAN,
/// )
/// .name("British")
/// .build();
///
/// let day = cal.date_to_days(Date::new(1752, 9, 2));
/// assert_eq!(cal.days_to_date(day + 1), Date::new(1752, 9, 14));
/// assert_eq!(cal.days_in_month(1752, 9), 19);
/// ```
pub struct CombinedCalendarBuilder {
    switch_date: Date,
    before: Calendar,
    after: Calendar,
    name: Option<Box<str>>,
    long_name: Option<Box<str>>,
    era: Option<EraFn>,
}

impl CombinedCalendarBuilder {
    /// Creates a builder switching from `before` to `after` on
    /// `switch_date`, a date of the `after` calendar.
    pub fn new(
        switch_date: Date,
        before: Calendar,
        after: Calendar,
    ) -> CombinedCalendarBuilder {
        CombinedCalendarBuilder {
            switch_date,
            before,
            after,
            name: None,
            long_name: None,
            era: None,
        }
    }

    /// Sets the short name of the calendar.
    pub fn name(self, name: &str) -> CombinedCalendarBuilder {
        CombinedCalendarBuilder { name: Some(name.into()), ..self }
    }

    /// Sets the long name of the calendar.
    pub fn long_name(self, long_name: &str) -> CombinedCalendarBuilder {
        CombinedCalendarBuilder { long_name: Some(long_name.into()), ..self }
    }

    /// Sets a function labelling the era of every date, overriding the
    /// eras of the two calendars.
    pub fn era<F>(self, era: F) -> CombinedCalendarBuilder
    where
        F: Fn(Date) -> String + Send + Sync + 'static,
    {
        CombinedCalendarBuilder { era: Some(Box::new(era)), ..self }
    }

    /// Builds the calendar.
    pub fn build(self) -> Calendar {
        let switch_day = self.after.date_to_days(self.switch_date);
        trace!(
            "building combined calendar switching from {:?} to {:?} \
             on {} (day {switch_day})",
            self.before.name(),
            self.after.name(),
            self.switch_date,
        );
        let name = self.name.unwrap_or_else(|| self.after.name().into());
        let long_name =
            self.long_name.unwrap_or_else(|| self.after.long_name().into());
        Calendar::from_def(CalendarDef {
            name,
            long_name,
            month_prefix: self.after.month_prefix().into(),
            timescale: self.after.timescale().clone(),
            epoch_shift: 0,
            era: self.era,
            rules: DayRules::Combined {
                switch_day,
                before: self.before,
                after: self.after,
            },
        })
    }
}

impl core::fmt::Debug for CombinedCalendarBuilder {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        f.debug_struct("CombinedCalendarBuilder")
            .field("switch_date", &self.switch_date)
            .field("before", &self.before)
            .field("after", &self.after)
            .field("name", &self.name)
            .field("long_name", &self.long_name)
            .finish()
    }
}
