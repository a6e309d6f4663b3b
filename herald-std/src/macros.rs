//! Internal logging shim.
//!
//! `log!(level, fields..)` forwards to the matching `tracing` macro when the
//! `tracing` feature is enabled and expands to nothing otherwise.

macro_rules! log {
    ($level:ident, $($arg:tt)+) => {
        #[cfg(feature = "tracing")]
        {
            ::tracing::$level!($($arg)+);
        }
    };
}
