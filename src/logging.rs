/*!
Log macros that compile to nothing unless the `logging` feature is enabled.

Only two levels are used. `debug` reports data accepted from the caller,
such as a custom leap second table, and `trace` reports which path a
conversion took. Arguments are never evaluated when logging is disabled, so
callers must not compute values that only a log message uses.
*/

macro_rules! log {
    ($($tt:tt)*) => {
        #[cfg(feature = "logging")]
        {
            $($tt)*
        }
    }
}

macro_rules! debug {
    ($($tt:tt)*) => { log!(log::debug!($($tt)*)) }
}

macro_rules! trace {
    ($($tt:tt)*) => { log!(log::trace!($($tt)*)) }
}
