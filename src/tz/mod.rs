/*!
Time zones and the resolution of wall clock readings into instants.

A [`TimeZone`] maps an instant to the UTC offset and abbreviation in effect
at that instant. The reverse direction, from a date and wall clock reading
to an instant, isn't a function in general: a reading may be skipped or
repeated when the offset changes. This crate resolves such readings with a
fixed policy described on [`TimeZone::custom`], so that every conversion is
total.

This crate doesn't ship a time zone database. Zones with changing offsets
are expressed with [`TimeZone::custom`], whose offset function can be backed
by any source of rules.
*/

pub use self::timezone::{TimeZone, TimeZoneOffsetInfo};

pub(crate) use self::timezone::write_offset;

mod timezone;
