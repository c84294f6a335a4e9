use kalends::{
    calendar::Calendar,
    civil::{Clock, Date, Weekday},
    instant_dc,
    tz::TimeZone,
    Duration, Instant, Timestamp, Zoned,
};

#[test]
fn plain_values() {
    let date = Date::new(-44, 3, 15);
    let json = serde_json::to_string(&date).unwrap();
    assert_eq!(json, r#"{"year":-44,"month":3,"day":15}"#);
    assert_eq!(serde_json::from_str::<Date>(&json).unwrap(), date);

    let d = Duration::new(-1, 500_000_000);
    let json = serde_json::to_string(&d).unwrap();
    assert_eq!(json, "[-1,500000000]");
    assert_eq!(serde_json::from_str::<Duration>(&json).unwrap(), d);

    let i = Instant::EPOCH + Duration::from_millis(1_500);
    let json = serde_json::to_string(&i).unwrap();
    assert_eq!(json, "[1,500000000]");
    assert_eq!(serde_json::from_str::<Instant>(&json).unwrap(), i);

    let ts = Timestamp::new(86_400, 1);
    let json = serde_json::to_string(&ts).unwrap();
    assert_eq!(serde_json::from_str::<Timestamp>(&json).unwrap(), ts);

    let json = serde_json::to_string(&Weekday::Saturday).unwrap();
    assert_eq!(json, r#""Saturday""#);
}

#[test]
fn nanoseconds_out_of_range_are_rejected() {
    assert!(serde_json::from_str::<Duration>("[0,1000000000]").is_err());
}

#[test]
fn zoned() {
    let tz = TimeZone::fixed(5, 30);
    let zdt = instant_dc(Instant::EPOCH, &tz, &Calendar::ISO);
    let json = serde_json::to_string(&zdt).unwrap();
    let got: Zoned = serde_json::from_str(&json).unwrap();
    assert_eq!(got, zdt);
    assert_eq!(got.clock(), Clock::hms(5, 30, 0));
    assert_eq!(got.abbreviation(), "UTC+5:30");
}
