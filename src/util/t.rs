/*!
Constants shared by the arithmetic in this crate.

Every civil day in an earth calendar is `86,400` labelled seconds long.
Leap seconds are never folded into a day's length. Instead, a time scale
reports them separately so that they can be rendered as `23:59:60`.
*/

/// The number of nanoseconds in a single second.
pub(crate) const NANOS_PER_SECOND: i64 = 1_000_000_000;

/// The number of nanoseconds in a single second, as an `i128`.
pub(crate) const NANOS_PER_SECOND_128: i128 = NANOS_PER_SECOND as i128;

/// The number of seconds in a minute.
pub(crate) const SECONDS_PER_MINUTE: i64 = 60;

/// The number of seconds in an hour.
pub(crate) const SECONDS_PER_HOUR: i64 = 60 * SECONDS_PER_MINUTE;

/// The number of seconds in a civil day.
pub(crate) const SECONDS_PER_CIVIL_DAY: i64 = 24 * SECONDS_PER_HOUR;

/// The number of nanoseconds in a minute, as an `i128`.
pub(crate) const NANOS_PER_MINUTE_128: i128 =
    SECONDS_PER_MINUTE as i128 * NANOS_PER_SECOND_128;

/// The number of nanoseconds in an hour, as an `i128`.
pub(crate) const NANOS_PER_HOUR_128: i128 =
    SECONDS_PER_HOUR as i128 * NANOS_PER_SECOND_128;

/// The number of nanoseconds in a civil day, as an `i128`.
pub(crate) const NANOS_PER_CIVIL_DAY_128: i128 =
    SECONDS_PER_CIVIL_DAY as i128 * NANOS_PER_SECOND_128;

/// The number of seconds between the Unix epoch (`1970-01-01T00:00:00Z`)
/// and the reference epoch (`2000-01-01T00:00:00Z`) used for all day and
/// second counts in this crate.
pub(crate) const UNIX_TO_REFERENCE_EPOCH_SECONDS: i64 = 946_684_800;

/// The value of `TAI - UTC` at the reference epoch.
///
/// Instants are measured on the TAI continuum, but instant zero corresponds
/// to the UTC label `2000-01-01T00:00:00`. That is, TAI `00:00:32`.
pub(crate) const TAI_MINUS_UTC_AT_EPOCH: i64 = 32;

/// The value of `TT - TAI` in nanoseconds.
pub(crate) const TT_MINUS_TAI_NANOS: i64 = 32_184_000_000;

/// The value of `TAI - GPS` in seconds.
pub(crate) const TAI_MINUS_GPS: i64 = 19;

/// The number of days in a 400 year Gregorian cycle.
pub(crate) const DAYS_IN_GREGORIAN_ERA: i64 = 146_097;

/// The number of days in a 4 year Julian cycle.
pub(crate) const DAYS_IN_JULIAN_CYCLE: i64 = 1_461;
