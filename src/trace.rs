//! Optional structured logging.
//!
//! With the `tracing` feature enabled, `trace_event!` forwards to
//! `tracing::trace!`; without it the invocation compiles to nothing.

macro_rules! trace_event {
    ($($arg:tt)*) => {{
        #[cfg(feature = "tracing")]
        ::tracing::trace!($($arg)*);
    }};
}

pub(crate) use trace_event;
