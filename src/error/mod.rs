use alloc::{boxed::Box, sync::Arc};

/// Creates a new ad hoc error with the given format string.
///
/// The error returned is always of type [`Error`].
macro_rules! err {
    ($($tt:tt)*) => {{
        crate::error::Error::from_args(format_args!($($tt)*))
    }}
}

pub(crate) use err;

/// The error type of this crate.
///
/// Converting between instants and civil dates never fails, so this error
/// only shows up where untrusted data enters the crate:
///
/// * A leap second table given to [`LeapSeconds::new`] that is empty, out
/// of order or otherwise malformed.
/// * Checked arithmetic on [`Duration`](crate::Duration) or
/// [`Instant`](crate::Instant) values that leaves the supported range.
/// * A floating point number of seconds that is not finite.
///
/// An error may wrap another error as its cause. The `Display`
/// implementation writes the whole chain, outermost first, separated by
/// `: `. Use the alternate `Debug` format (`{:#?}`) to see the structure.
///
/// Besides the formatting traits and `std::error::Error` (with the `std`
/// feature), the only introspection offered is a pair of predicates on the
/// root cause: [`Error::is_range`] and [`Error::is_leap_second_table`].
///
/// A single error type is used for every fallible operation. It is one word
/// in size and cheap to clone.
///
/// [`LeapSeconds::new`]: crate::LeapSeconds::new
#[derive(Clone)]
pub struct Error {
    inner: Arc<ErrorInner>,
}

#[derive(Debug)]
struct ErrorInner {
    kind: ErrorKind,
    cause: Option<Error>,
}

impl Error {
    /// Creates an error with a message built by `format_args!`.
    ///
    /// # Example
    ///
    /// ```
    /// use kalends::Error;
    ///
    /// let name = "x";
    /// let err = Error::from_args(format_args!("no calendar named {name:?}"));
    /// assert_eq!(err.to_string(), r#"no calendar named "x""#);
    /// ```
    pub fn from_args<'a>(message: core::fmt::Arguments<'a>) -> Error {
        Error::from(ErrorKind::Adhoc(AdhocError::from_args(message)))
    }

    /// Returns true when the root cause of this error is a value that was
    /// out of the supported range.
    ///
    /// # Example
    ///
    /// ```
    /// use kalends::Duration;
    ///
    /// let one = Duration::from_secs(1);
    /// let err = Duration::MAX.checked_add(one).unwrap_err();
    /// assert!(err.is_range());
    /// ```
    pub fn is_range(&self) -> bool {
        matches!(self.root().inner.kind, ErrorKind::Range(_))
    }

    /// Returns true when the root cause of this error is a malformed leap
    /// second table.
    ///
    /// # Example
    ///
    /// ```
    /// use kalends::LeapSeconds;
    ///
    /// let err = LeapSeconds::new(&[]).unwrap_err();
    /// assert!(err.is_leap_second_table());
    /// assert!(!err.is_range());
    /// ```
    pub fn is_leap_second_table(&self) -> bool {
        matches!(self.root().inner.kind, ErrorKind::LeapSecondTable(_))
    }
}

impl Error {
    /// Creates an error for a `given` value outside of `min..=max`. The
    /// `what` label names the value in the message, like `"seconds"`.
    #[inline(never)]
    #[cold]
    pub(crate) fn range(
        what: &'static str,
        given: impl Into<i128>,
        min: impl Into<i128>,
        max: impl Into<i128>,
    ) -> Error {
        Error::from(ErrorKind::Range(RangeError {
            what,
            given: given.into(),
            min: min.into(),
            max: max.into(),
        }))
    }

    /// Creates an error for a leap second table that can't be used.
    #[inline(never)]
    #[cold]
    pub(crate) fn leap_second_table(err: LeapSecondTableError) -> Error {
        Error::from(ErrorKind::LeapSecondTable(err))
    }

    /// Makes `self` the cause of `outer` and returns `outer`.
    #[inline(never)]
    #[cold]
    fn caused(self, mut outer: Error) -> Error {
        // `outer` is always freshly created by `ErrorContext`, so it has no
        // other owner and no cause yet.
        let inner = Arc::get_mut(&mut outer.inner)
            .expect("context error must not be shared");
        assert!(inner.cause.is_none(), "context error must not have a cause");
        inner.cause = Some(self);
        outer
    }

    /// The innermost error in the chain.
    fn root(&self) -> &Error {
        let mut err = self;
        while let Some(ref cause) = err.inner.cause {
            err = cause;
        }
        err
    }

    /// Every error in the chain, outermost first.
    fn chain(&self) -> impl Iterator<Item = &Error> {
        let mut next = Some(self);
        core::iter::from_fn(move || {
            let err = next?;
            next = err.inner.cause.as_ref();
            Some(err)
        })
    }
}

#[cfg(feature = "std")]
impl std::error::Error for Error {}

impl core::fmt::Display for Error {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        for (i, err) in self.chain().enumerate() {
            if i > 0 {
                f.write_str(": ")?;
            }
            core::fmt::Display::fmt(&err.inner.kind, f)?;
        }
        Ok(())
    }
}

impl core::fmt::Debug for Error {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        if f.alternate() {
            f.debug_struct("Error")
                .field("kind", &self.inner.kind)
                .field("cause", &self.inner.cause)
                .finish()
        } else {
            core::fmt::Display::fmt(self, f)
        }
    }
}

#[derive(Debug)]
enum ErrorKind {
    Adhoc(AdhocError),
    Range(RangeError),
    LeapSecondTable(LeapSecondTableError),
}

impl core::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        match *self {
            ErrorKind::Adhoc(ref err) => err.fmt(f),
            ErrorKind::Range(ref err) => err.fmt(f),
            ErrorKind::LeapSecondTable(ref err) => err.fmt(f),
        }
    }
}

impl From<ErrorKind> for Error {
    fn from(kind: ErrorKind) -> Error {
        Error { inner: Arc::new(ErrorInner { kind, cause: None }) }
    }
}

/// A free-form message.
struct AdhocError {
    message: Box<str>,
}

impl AdhocError {
    fn from_args<'a>(message: core::fmt::Arguments<'a>) -> AdhocError {
        use alloc::string::ToString;

        AdhocError { message: message.to_string().into_boxed_str() }
    }
}

impl core::fmt::Display for AdhocError {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        f.write_str(&self.message)
    }
}

impl core::fmt::Debug for AdhocError {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(f, "{:?}", &*self.message)
    }
}

/// A value outside of the range this crate supports.
#[derive(Debug)]
struct RangeError {
    what: &'static str,
    given: i128,
    min: i128,
    max: i128,
}

impl core::fmt::Display for RangeError {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        let RangeError { what, given, min, max } = *self;
        write!(
            f,
            "parameter '{what}' with value {given} \
             is not in the required range of {min}..={max}",
        )
    }
}

/// The ways a leap second table can be malformed.
///
/// `entry` is the zero-based index of the offending `(unix, tai_minus_utc)`
/// pair as given by the caller.
#[derive(Debug)]
pub(crate) enum LeapSecondTableError {
    Empty,
    NotMidnight { unix: i64 },
    NotAscending { entry: usize, unix: i64 },
    Unchanged { entry: usize, unix: i64, tai_minus_utc: i64 },
    Overlapping { entry: usize, unix: i64 },
}

impl core::fmt::Display for LeapSecondTableError {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        use self::LeapSecondTableError::*;

        match *self {
            Empty => f.write_str("leap second table must not be empty"),
            NotMidnight { unix } => write!(
                f,
                "Unix timestamp {unix} is not at a UTC midnight",
            ),
            NotAscending { entry, unix } => write!(
                f,
                "leap second table entry {entry} at Unix timestamp {unix} \
                 is not after the previous entry",
            ),
            Unchanged { entry, unix, tai_minus_utc } => write!(
                f,
                "leap second table entry {entry} at Unix timestamp {unix} \
                 does not change TAI - UTC from {tai_minus_utc}",
            ),
            Overlapping { entry, unix } => write!(
                f,
                "leap second table entry {entry} at Unix timestamp {unix} \
                 removes more than a day of leap seconds",
            ),
        }
    }
}

/// Conversion into an [`Error`], used by [`ErrorContext`] so that it doesn't
/// need a public `From` impl.
pub(crate) trait IntoError {
    fn into_error(self) -> Error;
}

impl IntoError for Error {
    #[inline(always)]
    fn into_error(self) -> Error {
        self
    }
}

/// Adds context to the error of a `Result`.
///
/// The context error is built lazily by a closure, so the success path
/// doesn't allocate. The original error becomes the cause of the context
/// error.
pub(crate) trait ErrorContext<T, E> {
    fn with_context<C: IntoError>(
        self,
        context: impl FnOnce() -> C,
    ) -> Result<T, Error>;
}

impl<T, E> ErrorContext<T, E> for Result<T, E>
where
    E: IntoError,
{
    fn with_context<C: IntoError>(
        self,
        context: impl FnOnce() -> C,
    ) -> Result<T, Error> {
        self.map_err(|err| err.into_error().caused(context().into_error()))
    }
}
