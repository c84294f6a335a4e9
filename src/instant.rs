use crate::{
    error::{Error, ErrorContext},
    Duration,
};

/// A point on the continuous time line.
///
/// An instant is the number of SI seconds, with nanosecond precision, that
/// have elapsed since the reference epoch `2000-01-01T00:00:00Z`. The
/// continuum is the atomic one, so every second that elapses in reality is
/// counted exactly once: leap seconds are not a property of an instant,
/// only of the [`Timescale`](crate::Timescale) used to label it.
///
/// Since the epoch is `2000-01-01T00:00:00Z` and TAI was 32 seconds ahead of
/// UTC at that time, the instant zero is labelled `2000-01-01T00:00:32` on
/// the TAI time scale.
///
/// # Arithmetic
///
/// Subtracting two instants yields a [`Duration`], and a `Duration` may be
/// added to or subtracted from an instant. These operations are exact and
/// panic on overflow. Use [`Instant::checked_add`] and
/// [`Instant::checked_sub`] for fallible variants.
///
/// ```
/// use kalends::{Duration, Instant};
///
/// let i = Instant::EPOCH + Duration::from_secs(90);
/// assert_eq!(i - Instant::EPOCH, Duration::from_secs(90));
/// assert!(Instant::EPOCH < i);
/// ```
#[derive(Clone, Copy, Default, Eq, Hash, PartialEq, PartialOrd, Ord)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(transparent)
)]
pub struct Instant {
    since_epoch: Duration,
}

impl Instant {
    /// The reference epoch, `2000-01-01T00:00:00Z`.
    pub const EPOCH: Instant = Instant { since_epoch: Duration::ZERO };

    /// The smallest representable instant.
    pub const MIN: Instant = Instant { since_epoch: Duration::MIN };

    /// The largest representable instant.
    pub const MAX: Instant = Instant { since_epoch: Duration::MAX };

    /// Creates an instant from the duration elapsed since
    /// [`Instant::EPOCH`]. Negative durations produce instants before the
    /// epoch.
    #[inline]
    pub const fn from_duration_since_epoch(since_epoch: Duration) -> Instant {
        Instant { since_epoch }
    }

    /// Returns the duration elapsed since [`Instant::EPOCH`].
    ///
    /// # Example
    ///
    /// ```
    /// use kalends::{Duration, Instant};
    ///
    /// let i = Instant::from_duration_since_epoch(Duration::from_millis(-1));
    /// assert_eq!(i.duration_since_epoch(), Duration::from_millis(-1));
    /// ```
    #[inline]
    pub const fn duration_since_epoch(self) -> Duration {
        self.since_epoch
    }

    /// Returns the duration from `earlier` to this instant.
    ///
    /// This is equivalent to `self - earlier` and is negative when
    /// `earlier` is after `self`.
    #[inline]
    pub fn duration_since(self, earlier: Instant) -> Duration {
        self - earlier
    }

    /// Adds the given duration to this instant, returning an error if the
    /// result is out of range.
    ///
    /// # Example
    ///
    /// ```
    /// use kalends::{Duration, Instant};
    ///
    /// let i = Instant::EPOCH.checked_add(Duration::from_secs(-1))?;
    /// assert_eq!(i.duration_since_epoch(), Duration::from_secs(-1));
    ///
    /// assert!(Instant::MAX.checked_add(Duration::from_secs(1)).is_err());
    ///
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    #[inline]
    pub fn checked_add(self, duration: Duration) -> Result<Instant, Error> {
        let since_epoch = self
            .since_epoch
            .checked_add(duration)
            .with_context(|| {
                crate::error::err!(
                    "adding {duration} to instant {self:?} overflowed",
                )
            })?;
        Ok(Instant { since_epoch })
    }

    /// Subtracts the given duration from this instant, returning an error if
    /// the result is out of range.
    #[inline]
    pub fn checked_sub(self, duration: Duration) -> Result<Instant, Error> {
        let since_epoch = self
            .since_epoch
            .checked_sub(duration)
            .with_context(|| {
                crate::error::err!(
                    "subtracting {duration} from instant {self:?} overflowed",
                )
            })?;
        Ok(Instant { since_epoch })
    }

    /// Adds the given duration to this instant, stopping at
    /// [`Instant::MIN`] or [`Instant::MAX`] instead of overflowing.
    ///
    /// # Example
    ///
    /// ```
    /// use kalends::{Duration, Instant};
    ///
    /// let day = Duration::from_hours(24);
    /// assert_eq!(Instant::MAX.saturating_add(day), Instant::MAX);
    /// assert_eq!(Instant::MIN.saturating_add(-day), Instant::MIN);
    /// ```
    #[inline]
    pub fn saturating_add(self, duration: Duration) -> Instant {
        Instant { since_epoch: self.since_epoch.saturating_add(duration) }
    }

    /// Subtracts the given duration from this instant, stopping at
    /// [`Instant::MIN`] or [`Instant::MAX`] instead of overflowing.
    #[inline]
    pub fn saturating_sub(self, duration: Duration) -> Instant {
        Instant { since_epoch: self.since_epoch.saturating_sub(duration) }
    }
}

impl core::ops::Add<Duration> for Instant {
    type Output = Instant;

    #[inline]
    fn add(self, rhs: Duration) -> Instant {
        self.checked_add(rhs).expect("adding duration to instant overflowed")
    }
}

impl core::ops::AddAssign<Duration> for Instant {
    #[inline]
    fn add_assign(&mut self, rhs: Duration) {
        *self = *self + rhs;
    }
}

impl core::ops::Sub<Duration> for Instant {
    type Output = Instant;

    #[inline]
    fn sub(self, rhs: Duration) -> Instant {
        self.checked_sub(rhs)
            .expect("subtracting duration from instant overflowed")
    }
}

impl core::ops::SubAssign<Duration> for Instant {
    #[inline]
    fn sub_assign(&mut self, rhs: Duration) {
        *self = *self - rhs;
    }
}

impl core::ops::Sub for Instant {
    type Output = Duration;

    #[inline]
    fn sub(self, rhs: Instant) -> Duration {
        self.since_epoch - rhs.since_epoch
    }
}

impl core::fmt::Debug for Instant {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(f, "Instant(EPOCH{:+})", Signed(self.since_epoch))
    }
}

/// Formats a duration with an explicit sign when the `+` flag is given.
struct Signed(Duration);

impl core::fmt::Display for Signed {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        if f.sign_plus() && !self.0.is_negative() {
            f.write_str("+")?;
        }
        core::fmt::Display::fmt(&self.0, f)
    }
}

#[cfg(test)]
impl quickcheck::Arbitrary for Instant {
    fn arbitrary(g: &mut quickcheck::Gen) -> Instant {
        Instant { since_epoch: Duration::arbitrary(g) }
    }

    fn shrink(&self) -> alloc::boxed::Box<dyn Iterator<Item = Self>> {
        alloc::boxed::Box::new(
            self.since_epoch
                .shrink()
                .map(|since_epoch| Instant { since_epoch }),
        )
    }
}
