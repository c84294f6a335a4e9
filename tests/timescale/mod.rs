use kalends::{
    calendar::{Calendar, SolarCalendarBuilder},
    civil::{Clock, Date},
    Duration, Instant, LeapSeconds, Timescale, Timestamp,
};

const UNIX_EPOCH_DAYS: i64 = -10957;

fn iso_with(timescale: Timescale) -> Calendar {
    SolarCalendarBuilder::iso().timescale(timescale).build()
}

fn utc(date: Date, clock: Clock) -> Instant {
    Calendar::ISO.to_instant(date, clock, Duration::ZERO)
}

#[test]
fn atomic_labels_at_epoch() {
    let tai = Timescale::TAI.calendar_seconds(Instant::EPOCH).timestamp();
    assert_eq!((tai.second(), tai.nanosecond()), (32, 0));
    let tt = Timescale::TT.calendar_seconds(Instant::EPOCH).timestamp();
    assert_eq!((tt.second(), tt.nanosecond()), (64, 184_000_000));
    let gps = Timescale::GPS.calendar_seconds(Instant::EPOCH).timestamp();
    assert_eq!((gps.second(), gps.nanosecond()), (13, 0));

    let (date, clock) = iso_with(Timescale::TT)
        .to_date_clock(Instant::EPOCH, Duration::ZERO);
    assert_eq!(date, Date::new(2000, 1, 1));
    assert_eq!(clock, Clock::new(0, 1, Duration::from_millis(4_184)));

    for scale in [Timescale::TAI, Timescale::TT, Timescale::GPS] {
        assert!(!scale.has_leap_seconds(), "{scale:?}");
        assert!(scale.leap_seconds().is_none(), "{scale:?}");
        let ts = scale.calendar_seconds(Instant::EPOCH).timestamp();
        assert_eq!(scale.from_timestamp(ts), Instant::EPOCH, "{scale:?}");
    }
}

#[test]
fn two_and_a_half_seconds_across_a_leap_second() {
    let date = Date::new(2016, 12, 31);
    let start = utc(date, Clock::hms(23, 59, 59));
    let end = start + Duration::from_millis(2_500);
    let (d, c) = Calendar::ISO.to_date_clock(end, Duration::ZERO);
    assert_eq!(d, Date::new(2017, 1, 1));
    assert_eq!(c, Clock::new(0, 0, Duration::from_millis(500)));

    // On TAI there is no leap second, so the same interval ends a second
    // later on the clock.
    let tai = iso_with(Timescale::TAI);
    let (_, start_clock) = tai.to_date_clock(start, Duration::ZERO);
    let (_, end_clock) = tai.to_date_clock(end, Duration::ZERO);
    assert_eq!(start_clock, Clock::hms(0, 0, 35));
    assert_eq!(end_clock, Clock::new(0, 0, Duration::from_millis(37_500)));
}

#[test]
fn every_builtin_leap_second_is_rendered_as_sixty() {
    let cal = Calendar::ISO;
    let table = LeapSeconds::builtin();
    assert_eq!(table.len(), 28);
    for (unix, _) in table.iter().skip(1) {
        let days = unix / 86_400 + UNIX_EPOCH_DAYS;
        let day_before = cal.days_to_date(days - 1);
        let last = utc(day_before, Clock::hms(23, 59, 59));
        let leap = last + Duration::from_secs(1);
        assert_eq!(
            cal.to_date_clock(leap, Duration::ZERO),
            (day_before, Clock::hms(23, 59, 60)),
        );
        assert_eq!(
            leap + Duration::from_secs(1),
            utc(cal.days_to_date(days), Clock::MIDNIGHT),
        );
        assert_eq!(utc(day_before, Clock::hms(23, 59, 60)), leap);
    }
}

#[test]
fn tai_minus_utc_over_time() {
    let table = LeapSeconds::builtin();
    let label = |date| {
        let days = Calendar::ISO.date_to_days(date);
        Timestamp::new(days * 86_400, 0)
    };
    assert_eq!(table.tai_minus_utc(label(Date::new(1960, 1, 1))), 10);
    assert_eq!(table.tai_minus_utc(label(Date::new(1972, 7, 1))), 11);
    assert_eq!(table.tai_minus_utc(label(Date::new(2000, 1, 1))), 32);
    assert_eq!(table.tai_minus_utc(label(Date::new(2016, 12, 31))), 36);
    assert_eq!(table.tai_minus_utc(label(Date::new(2024, 1, 1))), 37);

    // Before the table starts, days are exactly 86,400 seconds long.
    let start = utc(Date::new(1960, 1, 1), Clock::MIDNIGHT);
    let end = utc(Date::new(1961, 1, 1), Clock::MIDNIGHT);
    assert_eq!(end - start, Duration::from_hours(366 * 24));
    // 2016 had a leap day and a leap second.
    let start = utc(Date::new(2016, 1, 1), Clock::MIDNIGHT);
    let end = utc(Date::new(2017, 1, 1), Clock::MIDNIGHT);
    assert_eq!(end - start, Duration::from_secs(366 * 86_400 + 1));
}

#[test]
fn custom_table_with_negative_leap_second() {
    crate::init_logger();

    let mut entries: Vec<(i64, i64)> = LeapSeconds::builtin().iter().collect();
    // 2031-01-01, removing a second.
    entries.push((1924992000, 36));
    let table = LeapSeconds::new(&entries).unwrap();
    let scale = Timescale::utc_with(table);
    assert!(scale.has_leap_seconds());
    assert_eq!(scale.name(), "UTC");
    assert_eq!(scale.leap_seconds().map(|t| t.len()), Some(29));

    let cal = iso_with(scale);
    let at = |date, clock| cal.to_instant(date, clock, Duration::ZERO);
    let eve = Date::new(2030, 12, 31);
    let midnight = at(Date::new(2031, 1, 1), Clock::MIDNIGHT);
    let before = at(eve, Clock::hms(23, 59, 58));
    assert_eq!(midnight - before, Duration::from_secs(1));
    // The skipped label lands on the following midnight.
    assert_eq!(at(eve, Clock::hms(23, 59, 59)), midnight);
    assert_eq!(
        cal.to_date_clock(before + Duration::from_millis(500), Duration::ZERO),
        (eve, Clock::new(23, 59, Duration::from_millis(58_500))),
    );

    // Before the change, the custom table agrees with the built-in one.
    let date = Date::new(2016, 12, 31);
    let clock = Clock::hms(23, 59, 60);
    assert_eq!(at(date, clock), utc(date, clock));
}

#[test]
fn invalid_tables() {
    let midnight = 1483228800;
    assert!(LeapSeconds::new(&[]).is_err());
    assert!(LeapSeconds::new(&[(midnight + 1, 37)]).is_err());
    assert!(LeapSeconds::new(&[(midnight, 37), (midnight, 38)]).is_err());
    assert!(LeapSeconds::new(&[(midnight, 37), (midnight - 86_400, 38)])
        .is_err());
    assert!(LeapSeconds::new(&[(midnight, 37), (midnight + 86_400, 37)])
        .is_err());
    assert!(LeapSeconds::new(&[(i64::MAX - 1, 37)]).is_err());

    let err = LeapSeconds::new(&[(midnight, 37), (midnight + 86_401, 38)])
        .unwrap_err();
    insta::assert_snapshot!(
        err,
        @"invalid leap second table entry 1: Unix timestamp 1483315201 is not at a UTC midnight",
    );
}

#[test]
fn custom_timescale_drives_calendars() {
    // A scale that labels instants like UTC without leap seconds at the
    // epoch, running a minute ahead.
    let shift = Duration::from_mins(1);
    let scale = Timescale::custom(
        "UTC+1m",
        false,
        move |i: Instant| {
            let label = i.duration_since_epoch() + shift;
            kalends::CalendarSeconds::new(Timestamp::from_duration(label), 0)
        },
        move |ts: Timestamp| {
            Instant::from_duration_since_epoch(ts.to_duration() - shift)
        },
    );
    let cal = iso_with(scale);
    assert_eq!(cal.timescale().name(), "UTC+1m");
    let (date, clock) = cal.to_date_clock(Instant::EPOCH, Duration::ZERO);
    assert_eq!((date, clock), (Date::new(2000, 1, 1), Clock::hms(0, 1, 0)));
    assert_eq!(cal.to_instant(date, clock, Duration::ZERO), Instant::EPOCH);
}

quickcheck::quickcheck! {
    fn prop_utc_roundtrip(secs: i64, nanos: i32) -> bool {
        let cal = Calendar::ISO;
        let i = Instant::EPOCH
            .saturating_add(Duration::from_secs(secs))
            .saturating_add(Duration::new(0, nanos));
        let (date, clock) = cal.to_date_clock(i, Duration::ZERO);
        cal.to_instant(date, clock, Duration::ZERO) == i
    }

    fn prop_atomic_roundtrip(secs: i64) -> bool {
        let secs = secs % 100_000_000_000;
        let i = Instant::EPOCH + Duration::from_secs(secs);
        [Timescale::TAI, Timescale::TT, Timescale::GPS].iter().all(|s| {
            let cal = iso_with(s.clone());
            let (date, clock) = cal.to_date_clock(i, Duration::ZERO);
            cal.to_instant(date, clock, Duration::ZERO) == i
        })
    }
}
