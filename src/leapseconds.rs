use alloc::{borrow::Cow, vec::Vec};

use crate::{
    error::{err, Error, ErrorContext, LeapSecondTableError},
    scale::{CalendarSeconds, Timestamp},
    util::{common::saturate_i64, t},
    Duration, Instant,
};

/// The historical UTC leap second table, as `(Unix timestamp, TAI - UTC)`
/// pairs. Each timestamp is the first UTC midnight at which the new offset
/// is in effect.
///
/// This is the same data as the NIST `leap-seconds.list` file, with the NTP
/// epoch translated to the Unix epoch.
static BUILTIN: &'static [LeapSecond] = &[
    LeapSecond::from_unix(63072000, 10),   // 1972-01-01
    LeapSecond::from_unix(78796800, 11),   // 1972-07-01
    LeapSecond::from_unix(94694400, 12),   // 1973-01-01
    LeapSecond::from_unix(126230400, 13),  // 1974-01-01
    LeapSecond::from_unix(157766400, 14),  // 1975-01-01
    LeapSecond::from_unix(189302400, 15),  // 1976-01-01
    LeapSecond::from_unix(220924800, 16),  // 1977-01-01
    LeapSecond::from_unix(252460800, 17),  // 1978-01-01
    LeapSecond::from_unix(283996800, 18),  // 1979-01-01
    LeapSecond::from_unix(315532800, 19),  // 1980-01-01
    LeapSecond::from_unix(362793600, 20),  // 1981-07-01
    LeapSecond::from_unix(394329600, 21),  // 1982-07-01
    LeapSecond::from_unix(425865600, 22),  // 1983-07-01
    LeapSecond::from_unix(489024000, 23),  // 1985-07-01
    LeapSecond::from_unix(567993600, 24),  // 1988-01-01
    LeapSecond::from_unix(631152000, 25),  // 1990-01-01
    LeapSecond::from_unix(662688000, 26),  // 1991-01-01
    LeapSecond::from_unix(709948800, 27),  // 1992-07-01
    LeapSecond::from_unix(741484800, 28),  // 1993-07-01
    LeapSecond::from_unix(773020800, 29),  // 1994-07-01
    LeapSecond::from_unix(820454400, 30),  // 1996-01-01
    LeapSecond::from_unix(867715200, 31),  // 1997-07-01
    LeapSecond::from_unix(915148800, 32),  // 1999-01-01
    LeapSecond::from_unix(1136073600, 33), // 2006-01-01
    LeapSecond::from_unix(1230768000, 34), // 2009-01-01
    LeapSecond::from_unix(1341100800, 35), // 2012-07-01
    LeapSecond::from_unix(1435708800, 36), // 2015-07-01
    LeapSecond::from_unix(1483228800, 37), // 2017-01-01
];

/// A table of UTC leap seconds.
///
/// Each entry records the UTC midnight at which a new value of `TAI - UTC`
/// took effect. An inserted leap second is the extra second labelled
/// `23:59:60` just before such a midnight, and a removed leap second is a
/// skipped `23:59:59` label.
///
/// Before the first entry, the first entry's offset is assumed to apply.
/// That is, the table does not model the rubber seconds of UTC before 1972
/// and does not introduce a jump at the start of the table.
///
/// This crate never loads leap second data from the file system. Callers
/// that want a newer table than [`LeapSeconds::builtin`] should parse it
/// themselves and hand the entries to [`LeapSeconds::new`].
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct LeapSeconds {
    entries: Cow<'static, [LeapSecond]>,
}

impl LeapSeconds {
    /// Returns the built-in leap second table, covering every leap second
    /// from 1972-01-01 (when `TAI - UTC` became 10 seconds) through
    /// 2017-01-01 (when it became 37 seconds).
    #[inline]
    pub const fn builtin() -> LeapSeconds {
        LeapSeconds { entries: Cow::Borrowed(BUILTIN) }
    }

    /// Creates a new leap second table from `(unix_timestamp,
    /// tai_minus_utc)` pairs.
    ///
    /// Each Unix timestamp must be the UTC midnight at which the
    /// corresponding `TAI - UTC` offset (in seconds) takes effect.
    ///
    /// # Errors
    ///
    /// This returns an error when the table is empty, when the timestamps
    /// are not strictly ascending, when a timestamp is not at a UTC midnight
    /// or when two consecutive entries have the same offset.
    ///
    /// # Example
    ///
    /// ```
    /// use kalends::LeapSeconds;
    ///
    /// // A fictional future in which a negative leap second is removed at
    /// // the end of 2030.
    /// let table = LeapSeconds::new(&[
    ///     (1483228800, 37), // 2017-01-01
    ///     (1924992000, 36), // 2031-01-01
    /// ])?;
    /// assert_eq!(table.len(), 2);
    ///
    /// assert!(LeapSeconds::new(&[]).is_err());
    /// assert!(LeapSeconds::new(&[(1483228801, 37)]).is_err());
    ///
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn new(table: &[(i64, i64)]) -> Result<LeapSeconds, Error> {
        if table.is_empty() {
            return Err(Error::leap_second_table(LeapSecondTableError::Empty));
        }
        let mut entries: Vec<LeapSecond> = Vec::with_capacity(table.len());
        for (i, &(unix, tai_minus_utc)) in table.iter().enumerate() {
            let ls = LeapSecond::try_from_unix(unix, tai_minus_utc)
                .with_context(|| {
                    err!("invalid leap second table entry {i}")
                })?;
            if let Some(prev) = entries.last() {
                if ls.label <= prev.label {
                    return Err(Error::leap_second_table(
                        LeapSecondTableError::NotAscending { entry: i, unix },
                    ));
                }
                if ls.tai_minus_utc == prev.tai_minus_utc {
                    return Err(Error::leap_second_table(
                        LeapSecondTableError::Unchanged {
                            entry: i,
                            unix,
                            tai_minus_utc,
                        },
                    ));
                }
                if ls.tai_threshold() <= prev.tai_threshold() {
                    return Err(Error::leap_second_table(
                        LeapSecondTableError::Overlapping { entry: i, unix },
                    ));
                }
            }
            entries.push(ls);
        }
        debug!(
            "accepted leap second table with {} entries, \
             TAI - UTC from {}s to {}s",
            entries.len(),
            entries[0].tai_minus_utc,
            entries[entries.len() - 1].tai_minus_utc,
        );
        Ok(LeapSeconds { entries: Cow::Owned(entries) })
    }

    /// Returns the number of entries in this table.
    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if this table has no entries.
    ///
    /// Since tables are validated to be non-empty, this always returns
    /// `false`.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns the entries of this table as `(unix_timestamp,
    /// tai_minus_utc)` pairs, in ascending order.
    pub fn iter(&self) -> impl Iterator<Item = (i64, i64)> + '_ {
        self.entries.iter().map(|ls| {
            (ls.label + t::UNIX_TO_REFERENCE_EPOCH_SECONDS, ls.tai_minus_utc)
        })
    }

    /// Returns `TAI - UTC`, in seconds, in effect at the given UTC label.
    ///
    /// The label is the number of labelled UTC seconds since
    /// `2000-01-01T00:00:00Z`, not counting leap seconds.
    ///
    /// # Example
    ///
    /// ```
    /// use kalends::{LeapSeconds, Timestamp};
    ///
    /// let table = LeapSeconds::builtin();
    /// // 2000-01-01T00:00:00Z
    /// assert_eq!(table.tai_minus_utc(Timestamp::new(0, 0)), 32);
    /// // Before the table starts, the first offset applies.
    /// assert_eq!(table.tai_minus_utc(Timestamp::new(-1_000_000_000, 0)), 10);
    /// ```
    pub fn tai_minus_utc(&self, label: Timestamp) -> i64 {
        let i = self.entries.partition_point(|ls| ls.label <= label.second());
        self.entries[i.saturating_sub(1)].tai_minus_utc
    }

    /// Decomposes an instant into UTC labelled seconds.
    ///
    /// When the instant falls inside an inserted leap second, the label
    /// reported is the last ordinary second of the day (`23:59:59`) and the
    /// leap count is the number of seconds beyond it.
    pub(crate) fn to_calendar_seconds(
        &self,
        instant: Instant,
    ) -> CalendarSeconds {
        let since_epoch = instant.duration_since_epoch();
        let nanosecond = since_epoch.subsec_nanos();
        // Near the ends of the instant range, neither the TAI second nor
        // the label need to fit into an `i64`.
        let tai_second = i128::from(since_epoch.as_secs())
            + i128::from(t::TAI_MINUS_UTC_AT_EPOCH);
        let next = self.entries.partition_point(|ls| {
            i128::from(ls.tai_threshold()) <= tai_second
        });
        let current = &self.entries[next.saturating_sub(1)];
        let label = tai_second - i128::from(current.tai_minus_utc);
        if let Some(upcoming) = self.entries.get(next) {
            if label >= i128::from(upcoming.label) {
                let whole = upcoming.label - 1;
                // OK because inside a leap second, `label` is past `whole`
                // by at most the change in `TAI - UTC`, which is bounded
                // when the table is built.
                let leap = (label - i128::from(whole)) as i64;
                return CalendarSeconds::new(
                    Timestamp::from_parts(whole, nanosecond),
                    leap,
                );
            }
        }
        let label = saturate_i64(label);
        CalendarSeconds::new(Timestamp::from_parts(label, nanosecond), 0)
    }

    /// The inverse of [`LeapSeconds::to_calendar_seconds`] for labels that
    /// are not inside a leap second.
    pub(crate) fn from_timestamp(&self, label: Timestamp) -> Instant {
        let offset = self.tai_minus_utc(label) - t::TAI_MINUS_UTC_AT_EPOCH;
        Instant::from_duration_since_epoch(
            label.to_duration().saturating_add(Duration::from_secs(offset)),
        )
    }
}

impl Default for LeapSeconds {
    fn default() -> LeapSeconds {
        LeapSeconds::builtin()
    }
}

/// A single change in `TAI - UTC`.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
struct LeapSecond {
    /// The first UTC label, in seconds since `2000-01-01T00:00:00Z`, at
    /// which `tai_minus_utc` applies.
    label: i64,
    tai_minus_utc: i64,
}

impl LeapSecond {
    const fn from_unix(unix: i64, tai_minus_utc: i64) -> LeapSecond {
        LeapSecond {
            label: unix - t::UNIX_TO_REFERENCE_EPOCH_SECONDS,
            tai_minus_utc,
        }
    }

    fn try_from_unix(
        unix: i64,
        tai_minus_utc: i64,
    ) -> Result<LeapSecond, Error> {
        if unix.rem_euclid(t::SECONDS_PER_CIVIL_DAY) != 0 {
            return Err(Error::leap_second_table(
                LeapSecondTableError::NotMidnight { unix },
            ));
        }
        // Keep both the label and the TAI threshold comfortably away from
        // the edges of `i64` so that lookups never overflow.
        let limit = i64::MAX / 4;
        if !(-limit..=limit).contains(&unix) {
            return Err(Error::range(
                "leap second timestamp",
                unix,
                -limit,
                limit,
            ));
        }
        let max_offset = t::SECONDS_PER_CIVIL_DAY * 365 * 1_000;
        if !(-max_offset..=max_offset).contains(&tai_minus_utc) {
            return Err(Error::range(
                "TAI - UTC",
                tai_minus_utc,
                -max_offset,
                max_offset,
            ));
        }
        Ok(LeapSecond::from_unix(unix, tai_minus_utc))
    }

    /// The TAI second, relative to the reference epoch, at which this entry
    /// takes effect.
    #[inline]
    fn tai_threshold(&self) -> i64 {
        self.label + self.tai_minus_utc
    }
}
