use kalends::{
    calendar::{Calendar, SolarCalendarBuilder},
    civil::{Clock, Date},
    instant, instant_dc,
    tz::TimeZone,
    Duration, Instant, Timescale,
};

/// A zone one hour ahead of UTC in winter and two in summer, switching at
/// 01:00 UTC on the last Sunday of March and October. Only 2000 through
/// 2030 are covered, which is enough for these tests.
fn central_european() -> TimeZone {
    let cal = Calendar::ISO;
    let last_sunday = move |year: i64, month: i64| -> Instant {
        let last = Date::new(year, month + 1, 0);
        let back = cal.weekday(last).to_sunday_zero_offset();
        let sunday = Date::new(year, month + 1, -back);
        cal.to_instant(sunday, Clock::hms(1, 0, 0), Duration::ZERO)
    };
    let transitions: Vec<(Instant, Instant)> = (2000..=2030)
        .map(|year| (last_sunday(year, 3), last_sunday(year, 10)))
        .collect();
    TimeZone::custom("Europe/Berlin", move |i: Instant| {
        let summer = transitions
            .iter()
            .any(|&(start, end)| start <= i && i < end);
        if summer {
            (Duration::from_hours(2), "CEST".into())
        } else {
            (Duration::from_hours(1), "CET".into())
        }
    })
}

#[test]
fn fixed_zone_roundtrip_around_leap_seconds() {
    let cal = Calendar::ISO;
    let tz = TimeZone::fixed(-8, 0);
    let date = Date::new(2016, 12, 31);
    let start = instant(date, Clock::hms(15, 59, 55), &tz, &cal);
    for step in 0..40 {
        let i = start + Duration::from_millis(250 * step);
        let zdt = instant_dc(i, &tz, &cal);
        assert_eq!(instant(zdt.date(), zdt.clock(), &tz, &cal), i, "{zdt}");
    }
    let leap = instant(date, Clock::hms(15, 59, 60), &tz, &cal);
    assert_eq!(
        instant_dc(leap, &tz, &cal).to_string(),
        "2016-12-31T15:59:60-08:00[UTC-8]",
    );
}

#[test]
fn dst_transitions() {
    crate::init_logger();

    let cal = Calendar::ISO;
    let tz = central_european();
    let spring = Date::new(2024, 3, 31);
    let fall = Date::new(2024, 10, 27);
    let utc = |date, clock| instant(date, clock, &TimeZone::UTC, &cal);

    let local = |date, clock| instant(date, clock, &tz, &cal);

    let winter = local(Date::new(2024, 1, 15), Clock::hms(12, 0, 0));
    assert_eq!(winter, utc(Date::new(2024, 1, 15), Clock::hms(11, 0, 0)));
    let summer = local(Date::new(2024, 7, 15), Clock::hms(12, 0, 0));
    assert_eq!(summer, utc(Date::new(2024, 7, 15), Clock::hms(10, 0, 0)));

    // 02:30 is skipped. For a zone east of UTC, the correction lands after
    // the transition, which is displayed as 03:30 CEST.
    let gap = local(spring, Clock::hms(2, 30, 0));
    assert_eq!(gap, utc(spring, Clock::hms(1, 30, 0)));
    let zdt = instant_dc(gap, &tz, &cal);
    assert_eq!(zdt.to_string(), "2024-03-31T03:30:00+02:00[CEST]");

    // 02:30 happens twice, and resolves to its occurrence in CET.
    let fold = local(fall, Clock::hms(2, 30, 0));
    assert_eq!(fold, utc(fall, Clock::hms(1, 30, 0)));
    let zdt = instant_dc(fold, &tz, &cal);
    assert_eq!(zdt.to_string(), "2024-10-27T02:30:00+01:00[CET]");
    let earlier = instant_dc(fold - Duration::from_hours(1), &tz, &cal);
    assert_eq!(earlier.to_string(), "2024-10-27T02:30:00+02:00[CEST]");
}

#[test]
fn unambiguous_readings_roundtrip_in_custom_zone() {
    let cal = Calendar::ISO;
    let tz = central_european();
    let start = instant(Date::new(2024, 1, 1), Clock::MIDNIGHT, &tz, &cal);
    for hours in (0..366 * 24).step_by(7) {
        let i = start + Duration::from_hours(hours);
        let zdt = instant_dc(i, &tz, &cal);
        // Readings inside the fold resolve to their second occurrence.
        let back = instant(zdt.date(), zdt.clock(), &tz, &cal);
        assert!(
            back == i || back == i + Duration::from_hours(1),
            "{zdt}: {back:?} != {i:?}",
        );
    }
}

#[test]
fn resolution_on_a_scale_without_leap_seconds() {
    let cal = SolarCalendarBuilder::iso().timescale(Timescale::TAI).build();
    let tz = central_european();
    let date = Date::new(2016, 12, 31);
    let clock = Clock::hms(23, 59, 59);
    let i = instant(date, clock, &tz, &cal);
    let zdt = instant_dc(i, &tz, &cal);
    assert_eq!((zdt.date(), zdt.clock()), (date, clock));
    assert_eq!(zdt.abbreviation(), "CET");
}

#[test]
fn inverse_is_preferred_when_available() {
    let offset = Duration::from_mins(-150);
    let tz = TimeZone::custom_with_inverse(
        "Newfoundland",
        move |_| (offset, "NDT".into()),
        move |i| Some(i - offset),
    );
    let cal = Calendar::JULIAN;
    let date = Date::new(2024, 6, 1);
    let clock = Clock::hms(9, 30, 0);
    let i = instant(date, clock, &tz, &cal);
    assert_eq!(i, cal.to_instant(date, clock, offset));
    assert_eq!(instant_dc(i, &tz, &cal).clock(), clock);
}

#[test]
fn ends_of_the_instant_range() {
    let cal = Calendar::ISO;
    let last = Clock::new(15, 30, Duration::new(2, 999_999_999));
    let cases = [
        (
            TimeZone::UTC,
            Instant::MIN,
            Date::new(-292277022627, 1, 26),
            Clock::hms(8, 30, 14),
        ),
        (TimeZone::UTC, Instant::MAX, Date::new(292277026626, 12, 5), last),
        (
            TimeZone::fixed(-8, 0),
            Instant::MIN,
            Date::new(-292277022627, 1, 26),
            Clock::hms(0, 30, 14),
        ),
        (
            TimeZone::fixed(-8, 0),
            Instant::MAX,
            Date::new(292277026626, 12, 5),
            Clock::new(7, 30, Duration::new(2, 999_999_999)),
        ),
    ];
    for (tz, i, date, clock) in cases {
        let zdt = instant_dc(i, &tz, &cal);
        assert_eq!((zdt.date(), zdt.clock()), (date, clock), "{zdt}");
        assert_eq!(instant(date, clock, &tz, &cal), i, "{zdt}");
    }
}

#[test]
fn readings_past_the_ends_saturate() {
    let cal = Calendar::ISO;
    let utc = TimeZone::UTC;
    let far = Date::new(10i64.pow(15), 1, 1);
    assert_eq!(instant(far, Clock::MIDNIGHT, &utc, &cal), Instant::MAX);
    let far = Date::new(-(10i64.pow(15)), 1, 1);
    assert_eq!(instant(far, Clock::MIDNIGHT, &utc, &cal), Instant::MIN);

    let date = Date::new(2000, 1, 1);
    let tz = TimeZone::fixed(-8, 0);
    let hours = Clock::hms(i64::MAX, 0, 0);
    assert_eq!(instant(date, hours, &tz, &cal), Instant::MAX);
    let hours = Clock::hms(i64::MIN, 0, 0);
    assert_eq!(instant(date, hours, &tz, &cal), Instant::MIN);

    // The last representable reading, one nanosecond later, saturates.
    let date = Date::new(292277026626, 12, 5);
    let clock = Clock::new(15, 30, Duration::new(3, 0));
    assert_eq!(instant(date, clock, &utc, &cal), Instant::MAX);
}

quickcheck::quickcheck! {
    fn prop_utc_minus_eight_roundtrip(secs: i64, nanos: i32) -> bool {
        let cal = Calendar::ISO;
        let tz = TimeZone::fixed(-8, 0);
        let i = Instant::EPOCH
            .saturating_add(Duration::from_secs(secs))
            .saturating_add(Duration::new(0, nanos));
        let zdt = instant_dc(i, &tz, &cal);
        instant(zdt.date(), zdt.clock(), &tz, &cal) == i
    }

    fn prop_custom_zone_is_total(secs: i64, offset: i64) -> bool {
        let cal = Calendar::ISO;
        let offset = Duration::from_secs(offset);
        let tz = TimeZone::custom("any", move |_| (offset, "ANY".into()));
        let i = Instant::EPOCH.saturating_add(Duration::from_secs(secs));
        let zdt = instant_dc(i, &tz, &cal);
        let back = instant(zdt.date(), zdt.clock(), &tz, &cal);
        zdt.offset() == offset && Instant::MIN <= back && back <= Instant::MAX
    }

    fn prop_utc_roundtrip_historical(secs: i64) -> bool {
        let cal = Calendar::historical();
        let i = Instant::EPOCH + Duration::from_secs(secs % 100_000_000_000);
        let zdt = instant_dc(i, &TimeZone::UTC, &cal);
        zdt.abbreviation() == "UTC"
            && zdt.offset() == Duration::ZERO
            && instant(zdt.date(), zdt.clock(), &TimeZone::UTC, &cal) == i
    }
}
