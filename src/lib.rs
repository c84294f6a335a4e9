/*!
Kalends converts between instants on a continuous time line and civil dates
and clocks, across calendars, time scales and time zones.

The conversions reconcile three things that make date arithmetic hard:

* A continuum of nanosecond precision instants with a very large range.
* Discontinuities in the civil labelling of that continuum, introduced by
leap seconds and by calendar switch-overs.
* Time zone offsets that depend on the instant itself, as with daylight
saving time.

Every conversion is total. Out-of-range fields of a date or clock are
normalized rather than rejected, readings beyond the range of an
[`Instant`] saturate to [`Instant::MIN`] or [`Instant::MAX`], and wall clock
readings that a time zone skips or repeats are resolved by a fixed policy.

# Overview

An [`Instant`] is a point on the time line, stored as a [`Duration`] since
`2000-01-01T00:00:00Z`. Instants are labelled by a [`Timescale`]: UTC with
its leap seconds, or one of the uniform scales TAI, TT and GPS. A
[`calendar::Calendar`] splits those labels into days, and its days into
[`civil::Date`] values. A [`tz::TimeZone`] supplies the offset added to the
labels to get local wall clock time.

The two top-level operations bring all of these together: [`instant`]
converts a date and clock into an instant, and [`instant_dc`] converts an
instant into a [`Zoned`] date and clock.

# Example

The last leap second so far was inserted at the end of 2016. In a zone
eight hours behind UTC, it happened at `15:59:60`:

```
use kalends::{
    calendar::Calendar, civil::{Clock, Date}, tz::TimeZone, Duration,
};

let cal = Calendar::ISO;
let tz = TimeZone::fixed(-8, 0);
let date = Date::new(2016, 12, 31);

let before = kalends::instant(date, Clock::hms(15, 59, 59), &tz, &cal);
let after = before + Duration::from_millis(2_500);
let zdt = kalends::instant_dc(after, &tz, &cal);
assert_eq!(zdt.date(), Date::new(2016, 12, 31));
assert_eq!(zdt.clock(), Clock::new(16, 0, Duration::from_millis(500)));
```

# Calendars

The ISO 8601, proleptic Gregorian and proleptic Julian calendars are built
in. Other calendars can be defined with
[`calendar::EarthCalendarBuilder`] or [`calendar::SolarCalendarBuilder`],
and derived from existing ones with [`calendar::Calendar::combine`] and
[`calendar::Calendar::year_shift`]:

```
use kalends::{calendar::Calendar, civil::Date};

let cal = Calendar::combine(
    Date::new(1582, 10, 15),
    Calendar::JULIAN,
    Calendar::GREGORIAN,
);
let switch = cal.date_to_days(Date::new(1582, 10, 15));
assert_eq!(cal.days_to_date(switch - 1), Date::new(1582, 10, 4));
```

# Crate features

* **std** (enabled by default) - When enabled, [`Error`] implements
`std::error::Error`. Without it, kalends is `no_std` but still requires
`alloc`.
* **logging** - When enabled, the `log` crate is used to emit messages about
time zone resolution, custom leap second tables and calendar construction.
This is mostly useful for debugging.
* **serde** - When enabled, the plain value types of this crate, such as
[`Instant`], [`Duration`] and [`civil::Date`], implement the `Serialize`
and `Deserialize` traits.
*/

#![no_std]
#![deny(rustdoc::broken_intra_doc_links)]
// This adds Cargo feature annotations to items in the rustdoc output.
#![cfg_attr(docsrs, feature(doc_auto_cfg))]
// We generally want all types to impl Debug.
#![warn(missing_debug_implementations)]

#[cfg(any(test, feature = "std"))]
extern crate std;

extern crate alloc;

pub use crate::{
    duration::Duration,
    error::Error,
    instant::Instant,
    leapseconds::LeapSeconds,
    scale::{CalendarSeconds, Timescale, Timestamp},
    zoned::{instant, instant_dc, Zoned},
};

#[macro_use]
mod logging;

pub mod calendar;
pub mod civil;
mod duration;
mod error;
mod instant;
mod leapseconds;
mod scale;
pub mod tz;
mod util;
mod zoned;
