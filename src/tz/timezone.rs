use alloc::{
    boxed::Box,
    string::{String, ToString},
    sync::Arc,
};

use crate::{
    calendar::Calendar,
    civil::{Clock, Date},
    util::t,
    zoned::Zoned,
    Duration, Instant,
};

type OffsetFn = Box<dyn Fn(Instant) -> (Duration, String) + Send + Sync>;
type InverseFn = Box<dyn Fn(Instant) -> Option<Instant> + Send + Sync>;

/// A time zone: a name and a rule giving the UTC offset in effect at any
/// instant.
///
/// A `TimeZone` is one of three things:
///
/// * [`TimeZone::UTC`], whose offset is always zero.
/// * A fixed offset from UTC, created with [`TimeZone::fixed`] or
/// [`TimeZone::fixed_named`].
/// * A custom zone, created with [`TimeZone::custom`] or
/// [`TimeZone::custom_with_inverse`], whose offset and abbreviation are
/// computed by a caller supplied function. This is how zones with daylight
/// saving time are expressed. Loading rules from the IANA Time Zone
/// Database is left to the caller.
///
/// Cloning a `TimeZone` is cheap. `TimeZone::UTC` does not allocate, and
/// every other zone shares its definition through an `Arc`.
///
/// # Example
///
/// This shows how a wall clock reading in a fixed offset zone round trips
/// through an instant:
///
/// ```
/// use kalends::{
///     calendar::Calendar, civil::{Clock, Date}, tz::TimeZone, Duration,
/// };
///
/// let tz = TimeZone::fixed(-8, 0);
/// assert_eq!(tz.name(), "UTC-8");
///
/// let cal = Calendar::ISO;
/// let date = Date::new(2024, 3, 9);
/// let clock = Clock::hms(17, 30, 0);
/// let instant = tz.to_instant(date, clock, &cal);
/// let zdt = tz.to_zoned(instant, &cal);
/// assert_eq!((zdt.date(), zdt.clock()), (date, clock));
/// assert_eq!(zdt.offset(), Duration::from_hours(-8));
/// ```
#[derive(Clone)]
pub struct TimeZone {
    kind: Option<Arc<TimeZoneKind>>,
}

impl TimeZone {
    /// The UTC time zone.
    ///
    /// The offset of this time zone is always zero, and its abbreviation is
    /// `UTC`.
    pub const UTC: TimeZone = TimeZone { kind: None };

    /// Creates a time zone with a fixed offset of the given hours and
    /// minutes from UTC.
    ///
    /// The sign of `minutes` is replaced by the sign of `hours`, unless
    /// `hours` is zero. So `fixed(-3, 30)` and `fixed(-3, -30)` are both
    /// three and a half hours behind UTC, while `fixed(0, -30)` is half an
    /// hour behind UTC.
    ///
    /// A zero offset returns [`TimeZone::UTC`]. Otherwise, the zone is named
    /// `UTC±H[:MM]`, which is also its abbreviation.
    ///
    /// # Example
    ///
    /// ```
    /// use kalends::{tz::TimeZone, Duration};
    ///
    /// let tz = TimeZone::fixed(5, 30);
    /// assert_eq!(tz.name(), "UTC+5:30");
    ///
    /// let tz = TimeZone::fixed(-3, 30);
    /// assert_eq!(tz.name(), "UTC-3:30");
    /// assert_eq!(tz.to_fixed_offset(), Some(Duration::from_mins(-210)));
    ///
    /// assert!(TimeZone::fixed(0, 0).is_utc());
    /// ```
    pub fn fixed(hours: i64, minutes: i64) -> TimeZone {
        let minutes = match hours.signum() {
            0 => minutes,
            sign => sign * minutes.saturating_abs(),
        };
        if hours == 0 && minutes == 0 {
            return TimeZone::UTC;
        }
        let negative = hours < 0 || (hours == 0 && minutes < 0);
        let mut name = String::from(if negative { "UTC-" } else { "UTC+" });
        name.push_str(&hours.unsigned_abs().to_string());
        if minutes != 0 {
            name.push_str(&alloc::format!(":{:02}", minutes.unsigned_abs()));
        }
        let offset = Duration::from_nanos128_saturating(
            i128::from(hours) * t::NANOS_PER_HOUR_128
                + i128::from(minutes) * t::NANOS_PER_MINUTE_128,
        );
        TimeZone::fixed_named(&name, offset)
    }

    /// Creates a time zone with the given name and fixed offset from UTC.
    ///
    /// Unlike [`TimeZone::fixed`], this never returns [`TimeZone::UTC`] and
    /// accepts offsets that aren't a whole number of minutes.
    pub fn fixed_named(name: &str, offset: Duration) -> TimeZone {
        let fixed = TimeZoneFixed { name: name.into(), offset };
        TimeZone { kind: Some(Arc::new(TimeZoneKind::Fixed(fixed))) }
    }

    /// Creates a time zone from a function returning the UTC offset and
    /// abbreviation in effect at an instant.
    ///
    /// Converting a wall clock reading into an instant in such a zone uses
    /// a two pass correction: the offset is looked up at the reading
    /// interpreted as UTC, the reading is shifted by that offset, and then
    /// the offset is looked up again at the shifted instant. Readings that
    /// fall in a gap or a fold of the zone resolve to whichever candidate
    /// this produces. This is a fixed policy. For zones west of UTC it picks
    /// the earlier instant, and for zones east of UTC the later one.
    ///
    /// # Example
    ///
    /// ```
    /// use kalends::{
    ///     calendar::Calendar, civil::{Clock, Date}, tz::TimeZone, Duration,
    ///     Instant,
    /// };
    ///
    /// let cal = Calendar::ISO;
    /// // Summer time starts at 01:00 UTC on 2024-03-31.
    /// let transition = cal.to_instant(
    ///     Date::new(2024, 3, 31),
    ///     Clock::hms(1, 0, 0),
    ///     Duration::ZERO,
    /// );
    /// let tz = TimeZone::custom("Europe/London", move |instant: Instant| {
    ///     if instant < transition {
    ///         (Duration::ZERO, "GMT".into())
    ///     } else {
    ///         (Duration::from_hours(1), "BST".into())
    ///     }
    /// });
    ///
    /// let zdt = tz.to_zoned(transition, &cal);
    /// assert_eq!(zdt.clock(), Clock::hms(2, 0, 0));
    /// assert_eq!(zdt.abbreviation(), "BST");
    /// ```
    pub fn custom<F>(name: &str, offset: F) -> TimeZone
    where
        F: Fn(Instant) -> (Duration, String) + Send + Sync + 'static,
    {
        let custom = TimeZoneCustom {
            name: name.into(),
            offset: Box::new(offset),
            inverse: None,
        };
        TimeZone { kind: Some(Arc::new(TimeZoneKind::Custom(custom))) }
    }

    /// Like [`TimeZone::custom`], but with an exact inverse.
    ///
    /// The inverse is given a wall clock reading interpreted as UTC and
    /// returns the instant at which that reading occurs in this zone. When
    /// it returns `None`, the usual two pass correction is used instead.
    pub fn custom_with_inverse<F, G>(
        name: &str,
        offset: F,
        inverse: G,
    ) -> TimeZone
    where
        F: Fn(Instant) -> (Duration, String) + Send + Sync + 'static,
        G: Fn(Instant) -> Option<Instant> + Send + Sync + 'static,
    {
        let custom = TimeZoneCustom {
            name: name.into(),
            offset: Box::new(offset),
            inverse: Some(Box::new(inverse)),
        };
        TimeZone { kind: Some(Arc::new(TimeZoneKind::Custom(custom))) }
    }

    /// Returns the name of this time zone.
    pub fn name(&self) -> &str {
        let Some(ref kind) = self.kind else { return "UTC" };
        match **kind {
            TimeZoneKind::Fixed(ref tz) => &*tz.name,
            TimeZoneKind::Custom(ref tz) => &*tz.name,
        }
    }

    /// Returns true if and only if this is [`TimeZone::UTC`].
    pub fn is_utc(&self) -> bool {
        self.kind.is_none()
    }

    /// Returns the offset of this time zone if it is fixed. `TimeZone::UTC`
    /// returns a zero offset, and custom zones return `None`.
    pub fn to_fixed_offset(&self) -> Option<Duration> {
        let Some(ref kind) = self.kind else { return Some(Duration::ZERO) };
        match **kind {
            TimeZoneKind::Fixed(ref tz) => Some(tz.offset),
            TimeZoneKind::Custom(_) => None,
        }
    }

    /// Returns the UTC offset in effect at the given instant.
    #[inline]
    pub fn to_offset(&self, instant: Instant) -> Duration {
        self.to_offset_info(instant).offset()
    }

    /// Returns the UTC offset and abbreviation in effect at the given
    /// instant.
    ///
    /// # Example
    ///
    /// ```
    /// use kalends::{tz::TimeZone, Duration, Instant};
    ///
    /// let tz = TimeZone::fixed(9, 0);
    /// let info = tz.to_offset_info(Instant::EPOCH);
    /// assert_eq!(info.offset(), Duration::from_hours(9));
    /// assert_eq!(info.abbreviation(), "UTC+9");
    ///
    /// let info = TimeZone::UTC.to_offset_info(Instant::EPOCH);
    /// assert_eq!(info.abbreviation(), "UTC");
    /// ```
    pub fn to_offset_info<'t>(
        &'t self,
        instant: Instant,
    ) -> TimeZoneOffsetInfo<'t> {
        let Some(ref kind) = self.kind else {
            return TimeZoneOffsetInfo {
                offset: Duration::ZERO,
                abbreviation: TimeZoneAbbreviation::Borrowed("UTC"),
            };
        };
        match **kind {
            TimeZoneKind::Fixed(ref tz) => TimeZoneOffsetInfo {
                offset: tz.offset,
                abbreviation: TimeZoneAbbreviation::Borrowed(&tz.name),
            },
            TimeZoneKind::Custom(ref tz) => {
                let (offset, abbreviation) = (tz.offset)(instant);
                TimeZoneOffsetInfo {
                    offset,
                    abbreviation: TimeZoneAbbreviation::Owned(abbreviation),
                }
            }
        }
    }

    /// Converts a date and wall clock reading of the given calendar in this
    /// time zone into an instant.
    ///
    /// This never fails. Out-of-range fields are normalized by the
    /// calendar, and readings that are skipped or repeated by a change of
    /// offset are resolved as described on [`TimeZone::custom`].
    pub fn to_instant(
        &self,
        date: Date,
        clock: Clock,
        cal: &Calendar,
    ) -> Instant {
        let Some(ref kind) = self.kind else {
            trace!("resolved {date}T{clock} in UTC");
            return cal.to_instant(date, clock, Duration::ZERO);
        };
        let tz = match **kind {
            TimeZoneKind::Fixed(ref tz) => {
                trace!(
                    "resolved {date}T{clock} in fixed zone {:?}",
                    tz.name,
                );
                return cal.to_instant(date, clock, tz.offset);
            }
            TimeZoneKind::Custom(ref tz) => tz,
        };
        let provisional = cal.to_instant(date, clock, Duration::ZERO);
        if let Some(ref inverse) = tz.inverse {
            if let Some(instant) = inverse(provisional) {
                trace!(
                    "resolved {date}T{clock} in {:?} with its inverse",
                    tz.name,
                );
                return instant;
            }
        }
        let leaps = cal.timescale().has_leap_seconds();
        let shift = |offset: Duration| {
            if leaps {
                cal.to_instant(date, clock, offset)
            } else {
                provisional.saturating_sub(offset)
            }
        };
        let first = (tz.offset)(provisional).0;
        let second = (tz.offset)(shift(first)).0;
        trace!(
            "resolved {date}T{clock} in {:?} by correction, \
             offsets {first} then {second}",
            tz.name,
        );
        shift(second)
    }

    /// Converts an instant into a date and wall clock reading of the given
    /// calendar in this time zone, along with the offset and abbreviation
    /// in effect.
    pub fn to_zoned(&self, instant: Instant, cal: &Calendar) -> Zoned {
        let info = self.to_offset_info(instant);
        let (date, clock) = cal.to_date_clock(instant, info.offset());
        Zoned::new(date, clock, info.offset(), info.abbreviation().into())
    }
}

impl Default for TimeZone {
    fn default() -> TimeZone {
        TimeZone::UTC
    }
}

impl core::fmt::Debug for TimeZone {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        let Some(ref kind) = self.kind else {
            return f.write_str("TimeZone(UTC)");
        };
        match **kind {
            TimeZoneKind::Fixed(ref tz) => f
                .debug_struct("TimeZone")
                .field("name", &tz.name)
                .field("offset", &tz.offset)
                .finish(),
            TimeZoneKind::Custom(ref tz) => f
                .debug_struct("TimeZone")
                .field("name", &tz.name)
                .field("inverse", &tz.inverse.is_some())
                .finish(),
        }
    }
}

enum TimeZoneKind {
    Fixed(TimeZoneFixed),
    Custom(TimeZoneCustom),
}

struct TimeZoneFixed {
    name: Box<str>,
    offset: Duration,
}

struct TimeZoneCustom {
    name: Box<str>,
    offset: OffsetFn,
    inverse: Option<InverseFn>,
}

/// The UTC offset and abbreviation in effect in a time zone at an instant.
///
/// This is returned by [`TimeZone::to_offset_info`]. The lifetime `'t` is
/// that of the time zone, from which the abbreviation may be borrowed.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct TimeZoneOffsetInfo<'t> {
    offset: Duration,
    abbreviation: TimeZoneAbbreviation<'t>,
}

impl<'t> TimeZoneOffsetInfo<'t> {
    /// Returns the offset, which is added to an instant's labelled seconds
    /// to get local wall clock time.
    #[inline]
    pub fn offset(&self) -> Duration {
        self.offset
    }

    /// Returns the time zone abbreviation.
    #[inline]
    pub fn abbreviation(&self) -> &str {
        self.abbreviation.as_str()
    }
}

/// A time zone abbreviation, either borrowed from the time zone itself or
/// produced by a custom zone's offset function.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
enum TimeZoneAbbreviation<'t> {
    Borrowed(&'t str),
    Owned(String),
}

impl<'t> TimeZoneAbbreviation<'t> {
    fn as_str(&self) -> &str {
        match *self {
            TimeZoneAbbreviation::Borrowed(s) => s,
            TimeZoneAbbreviation::Owned(ref s) => s,
        }
    }
}

/// Writes an offset as `±HH:MM`, or `±HH:MM:SS` when it isn't a whole
/// number of minutes. Fractional seconds are dropped.
pub(crate) fn write_offset(
    f: &mut core::fmt::Formatter,
    offset: Duration,
) -> core::fmt::Result {
    let sign = if offset.is_negative() { '-' } else { '+' };
    let secs = offset.as_nanos().unsigned_abs()
        / t::NANOS_PER_SECOND_128.unsigned_abs();
    let hour = u128::from(t::SECONDS_PER_HOUR.unsigned_abs());
    let minute = u128::from(t::SECONDS_PER_MINUTE.unsigned_abs());
    let (hours, minutes, seconds) =
        (secs / hour, secs % hour / minute, secs % minute);
    write!(f, "{sign}{hours:02}:{minutes:02}")?;
    if seconds != 0 {
        write!(f, ":{seconds:02}")?;
    }
    Ok(())
}
