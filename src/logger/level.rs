// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Log levels and the `log_*!` macros.
//!
//! The most verbose level that is compiled in is picked with cargo features:
//!
//! | Feature | Levels emitted |
//! | ------- | -------------- |
//! | (none) | error |
//! | `log-level-info` | error, info |
//! | `log-level-debug` | error, info, debug |
//!
//! Disabled levels never touch the UART and evaluate to `Ok(0)`.

use core::fmt;

use super::Sink;

#[derive(Copy, Clone, Debug, Eq, PartialEq, Ord, PartialOrd)]
pub enum Level {
    Debug,
    Info,
    Error,
}

/// Least severe level that is emitted.
pub const MAX_LEVEL: Level = if cfg!(feature = "log-level-debug") {
    Level::Debug
} else if cfg!(feature = "log-level-info") {
    Level::Info
} else {
    Level::Error
};

impl Level {
    pub const fn prefix(self) -> &'static str {
        match self {
            Level::Debug => "[DEBUG]: ",
            Level::Info => "[INFO]: ",
            Level::Error => "[ERROR]: ",
        }
    }

    #[inline]
    pub const fn enabled(self) -> bool {
        self as u8 >= MAX_LEVEL as u8
    }
}

/// Send `args` through `sink`, behind the level prefix, if `level` is enabled.
pub fn log<S: Sink + ?Sized>(
    sink: &mut S,
    level: Level,
    args: fmt::Arguments<'_>,
) -> Result<usize, S::Error> {
    if !level.enabled() {
        return Ok(0);
    }
    sink.send(format_args!("{}{}", level.prefix(), args))
}

/// Format and send a message on a logger.
///
/// ```ignore
/// uart_send!(logger, "hello {}", 42)?;
/// ```
#[macro_export]
macro_rules! uart_send {
    ($logger:expr, $($arg:tt)+) => {
        $crate::logger::Sink::send(&mut $logger, format_args!($($arg)+))
    };
}

/// Log an error as `[ERROR]: <message>\r\n`.
#[macro_export]
macro_rules! log_err {
    ($logger:expr, $fmt:literal $(, $arg:expr)* $(,)?) => {
        $crate::logger::log(
            &mut $logger,
            $crate::logger::Level::Error,
            format_args!(concat!($fmt, "\r\n") $(, $arg)*),
        )
    };
}

/// Log an informational message as `[INFO]: <message>\r\n`.
#[macro_export]
macro_rules! log_inf {
    ($logger:expr, $fmt:literal $(, $arg:expr)* $(,)?) => {
        $crate::logger::log(
            &mut $logger,
            $crate::logger::Level::Info,
            format_args!(concat!($fmt, "\r\n") $(, $arg)*),
        )
    };
}

/// Log a debug message as `[DEBUG]: <message>\r\n`.
#[macro_export]
macro_rules! log_dbg {
    ($logger:expr, $fmt:literal $(, $arg:expr)* $(,)?) => {
        $crate::logger::log(
            &mut $logger,
            $crate::logger::Level::Debug,
            format_args!(concat!($fmt, "\r\n") $(, $arg)*),
        )
    };
}
