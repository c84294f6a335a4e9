use kalends::{
    calendar::{
        Calendar, CombinedCalendarBuilder, SolarArithmetic,
        SolarCalendarBuilder, YearEstimate,
    },
    civil::{is_julian_leap_year, is_leap_year, Clock, Date, Weekday},
    Duration, Instant,
};

/// Thirteen months of 28 days, with one extra day at the end of every year
/// and no leap years.
struct Thirteen;

impl SolarArithmetic for Thirteen {
    fn days_before_year(&self, year: i64) -> i64 {
        365 * (year - 1)
    }

    fn days_before_month(&self, _year: i64, month: i64) -> i64 {
        28 * (month - 1)
    }

    fn days_to_month(&self, _year: i64, day_of_year: i64) -> i64 {
        (day_of_year / 28 + 1).min(13)
    }

    fn locate_year(&self, days: i64) -> YearEstimate {
        // Off by one on the first day of every year.
        YearEstimate::LowerBound {
            year: (days - 1).div_euclid(365) + 1,
            safe_day_of_year: None,
        }
    }

    fn epoch_shift(&self) -> i64 {
        0
    }

    fn months_per_year(&self) -> i64 {
        13
    }
}

fn assert_days_roundtrip(cal: &Calendar, range: core::ops::Range<i64>) {
    let mut prev = cal.days_to_date(range.start - 1);
    for days in range {
        let date = cal.days_to_date(days);
        assert_eq!(cal.date_to_days(date), days, "{cal:?}: {date}");
        assert!(prev < date, "{cal:?}: {prev} is not before {date}");
        assert!((1..=31).contains(&date.day()), "{cal:?}: {date}");
        prev = date;
    }
}

#[test]
fn days_roundtrip_builtin() {
    for cal in [Calendar::ISO, Calendar::GREGORIAN, Calendar::JULIAN] {
        assert_days_roundtrip(&cal, -200_000..200_000);
    }
}

#[test]
fn days_roundtrip_derived() {
    assert_days_roundtrip(&Calendar::historical(), -200_000..200_000);
    assert_days_roundtrip(&Calendar::minguo(), -50_000..50_000);
    assert_days_roundtrip(&Calendar::thai_solar(), -50_000..50_000);
    let cal = SolarCalendarBuilder::new(Thirteen).build();
    assert_days_roundtrip(&cal, -50_000..50_000);
}

#[test]
fn reference_dates() {
    let iso = Calendar::ISO;
    assert_eq!(iso.days_to_date(0), Date::new(2000, 1, 1));
    assert_eq!(iso.date_to_days(Date::new(1970, 1, 1)), -10957);
    assert_eq!(iso.date_to_days(Date::new(1, 1, 1)), -730119);
    assert_eq!(iso.days_to_date(-730120), Date::new(0, 12, 31));
    assert_eq!(
        Calendar::GREGORIAN.days_to_date(-730120),
        Date::new(-1, 12, 31),
    );
    assert_eq!(Calendar::JULIAN.days_to_date(0), Date::new(1999, 12, 19));
}

#[test]
fn leap_year_rule() {
    for year in -1000..3000 {
        let feb = Calendar::ISO.days_in_month(year, 2);
        assert_eq!(feb == 29, is_leap_year(year), "ISO year {year}");
        let days = Calendar::ISO.date_to_days(Date::new(year + 1, 1, 1))
            - Calendar::ISO.date_to_days(Date::new(year, 1, 1));
        assert_eq!(days, if is_leap_year(year) { 366 } else { 365 });

        // The Julian calendar has no year zero, so shift to
        // displayed years.
        let display = if year <= 0 { year - 1 } else { year };
        let feb = Calendar::JULIAN.days_in_month(display, 2);
        assert_eq!(feb == 29, is_julian_leap_year(year), "Julian {year}");
    }
}

#[test]
fn out_of_range_fields_are_normalized() {
    let iso = Calendar::ISO;
    let days = |y, m, d| iso.date_to_days(Date::new(y, m, d));
    assert_eq!(days(2023, 13, 1), days(2024, 1, 1));
    assert_eq!(days(2024, 1, 33), days(2024, 2, 2));
    assert_eq!(days(2024, 0, 1), days(2023, 12, 1));
    assert_eq!(days(2024, 3, 0), days(2024, 2, 29));
    assert_eq!(days(2023, 3, 0), days(2023, 2, 28));
    assert_eq!(days(2024, -11, 1), days(2023, 1, 1));
    assert_eq!(days(2024, 25, 400), days(2027, 2, 4));

    let cal = SolarCalendarBuilder::new(Thirteen).build();
    assert_eq!(cal.date_to_days(Date::new(1, 14, 1)), 365);
    assert_eq!(cal.days_to_date(364), Date::new(1, 13, 29));
    assert_eq!(cal.days_to_date(365), Date::new(2, 1, 1));

    let at = |date, clock| iso.to_instant(date, clock, Duration::ZERO);
    assert_eq!(
        at(Date::new(2023, 12, 31), Clock::hms(24, 0, 0)),
        at(Date::new(2024, 1, 1), Clock::MIDNIGHT),
    );
    assert_eq!(
        at(Date::new(2023, 13, 0), Clock::hms(0, 0, -1)),
        at(Date::new(2023, 12, 30), Clock::hms(23, 59, 59)),
    );
}

#[test]
fn gregorian_has_no_year_zero() {
    let gregorian = Calendar::GREGORIAN;
    let iso_days = Calendar::ISO.date_to_days(Date::new(0, 6, 1));
    assert_eq!(gregorian.days_to_date(iso_days), Date::new(-1, 6, 1));
    assert_eq!(
        gregorian.date_to_days(Date::new(0, 6, 1)),
        gregorian.date_to_days(Date::new(-1, 6, 1)),
    );
    assert_eq!(gregorian.era(Date::new(-1, 6, 1)), "BCE");
    assert_eq!(gregorian.era(Date::new(1, 6, 1)), "CE");
    assert_eq!(Calendar::ISO.era(Date::new(0, 6, 1)), "");
}

#[test]
fn julian_to_gregorian() {
    let cal = Calendar::historical();
    let switch = cal.date_to_days(Date::new(1582, 10, 15));
    assert_eq!(cal.days_to_date(switch - 1), Date::new(1582, 10, 4));
    assert_eq!(cal.days_to_date(switch), Date::new(1582, 10, 15));
    assert_eq!(cal.weekday(Date::new(1582, 10, 4)), Weekday::Thursday);
    assert_eq!(cal.weekday(Date::new(1582, 10, 15)), Weekday::Friday);
    assert_eq!(cal.days_in_month(1582, 10), 21);
    assert_eq!(cal.era(Date::new(2000, 1, 1)), "AD");
    assert_eq!(cal.name(), "Historical");

    // Before the switch the calendar is Julian, after it Gregorian.
    let julian = Calendar::JULIAN;
    let gregorian = Calendar::GREGORIAN;
    for date in [Date::new(-44, 3, 15), Date::new(1000, 2, 29)] {
        assert_eq!(cal.date_to_days(date), julian.date_to_days(date));
    }
    for date in [Date::new(1900, 3, 1), Date::new(2024, 2, 29)] {
        assert_eq!(cal.date_to_days(date), gregorian.date_to_days(date));
    }
}

#[test]
fn combined_builder_options() {
    let cal = CombinedCalendarBuilder::new(
        Date::new(1752, 9, 14),
        Calendar::JULIAN,
        Calendar::GREGORIAN,
    )
    .name("British")
    .long_name("Julian to Gregorian at 1752-09-14")
    .build();
    assert_eq!(cal.name(), "British");
    assert_eq!(cal.long_name(), "Julian to Gregorian at 1752-09-14");
    assert_eq!(cal.era(Date::new(1700, 1, 1)), "AD");
    assert_eq!(cal.era(Date::new(1800, 1, 1)), "CE");
    let switch = cal.date_to_days(Date::new(1752, 9, 14));
    assert_eq!(cal.days_to_date(switch - 1), Date::new(1752, 9, 2));

    // Combinators compose with each other.
    let shifted = cal.year_shift(-543);
    assert_eq!(shifted.days_to_date(switch), Date::new(2295, 9, 14));
    assert_eq!(shifted.era(Date::new(2295, 9, 14)), "CE");
}

#[test]
fn year_shifted_presets() {
    let days = Calendar::ISO.date_to_days(Date::new(2024, 5, 20));
    assert_eq!(Calendar::minguo().days_to_date(days), Date::new(113, 5, 20));
    assert_eq!(
        Calendar::thai_solar().days_to_date(days),
        Date::new(2567, 5, 20),
    );
    assert_eq!(
        Calendar::ISO.year_shift(1911).days_to_date(days),
        Calendar::minguo().days_to_date(days),
    );
    assert_eq!(Calendar::minguo().era(Date::new(-5, 1, 1)), "B.ROC");
    assert_eq!(Calendar::minguo().days_in_month(113, 2), 29);
}

#[test]
fn custom_solar_calendar_instants() {
    let cal = SolarCalendarBuilder::new(Thirteen)
        .name("thirteen")
        .month_prefix("M")
        .epoch_shift(10)
        .era(|_| "TE".into())
        .build();
    assert_eq!(cal.month_prefix(), "M");
    assert_eq!(cal.days_to_date(10), Date::new(1, 1, 1));
    assert_eq!(cal.era(Date::new(1, 1, 1)), "TE");

    let (date, clock) = cal.to_date_clock(Instant::EPOCH, Duration::ZERO);
    assert_eq!((date, clock), (Date::new(0, 13, 20), Clock::MIDNIGHT));
    let noon = Clock::hms(12, 0, 0);
    let i = cal.to_instant(Date::new(1, 1, 1), noon, Duration::ZERO);
    assert_eq!(i, Instant::EPOCH + Duration::from_hours(10 * 24 + 12));
}

quickcheck::quickcheck! {
    fn prop_weekday_agrees_across_calendars(days: i32) -> bool {
        let days = i64::from(days);
        let iso = Calendar::ISO;
        let julian = Calendar::JULIAN;
        let expected = Weekday::from_days_since_epoch(days);
        iso.weekday(iso.days_to_date(days)) == expected
            && julian.weekday(julian.days_to_date(days)) == expected
    }

    fn prop_solar_builder_matches_builtin(days: i32) -> bool {
        let days = i64::from(days);
        let julian = SolarCalendarBuilder::julian().build();
        julian.days_to_date(days) == Calendar::JULIAN.days_to_date(days)
    }

    fn prop_normalization_is_linear(y: i16, m: i16, d: i16) -> bool {
        let cal = Calendar::ISO;
        let (y, m, d) = (i64::from(y), i64::from(m), i64::from(d));
        let base = cal.date_to_days(Date::new(y, m, 1));
        cal.date_to_days(Date::new(y, m, d)) == base + d - 1
            && cal.date_to_days(Date::new(y, m + 12, d))
                == cal.date_to_days(Date::new(y + 1, m, d))
    }
}
