// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! # UART Logger
//!
//! Formatted text output over a U(S)ART.
//!
//! ## Modules
//!
//! - [`blocking`] - [`Logger`], one blocking transmit per message.
//! - [`queued`] - [`QueuedLogger`], ring-buffered and drained by a non-blocking transmit.
//! - [`status`] - [`TxStatus`], the busy state shared with the transfer-complete interrupt.
//! - [`level`] - log levels and the `log_err!` / `log_inf!` / `log_dbg!` macros.
//! - [`buffer`] - the fixed-size formatting buffer both loggers render into.

use core::fmt;

use crate::hw::Instance;

pub mod blocking;
pub mod buffer;
pub mod error;
pub mod level;
pub mod queued;
pub mod status;

pub use blocking::Logger;
pub use buffer::MessageBuffer;
pub use error::Error;
pub use level::{log, Level, MAX_LEVEL};
pub use queued::{QueuedLogger, Run, QUEUE_CAPACITY};
pub use status::{TxState, TxStatus};

/// Size of the per-message formatting buffer, terminator slot included.
pub const MESSAGE_CAPACITY: usize = 100;

/// Timeout for one blocking transmit, in milliseconds.
pub const TRANSMIT_TIMEOUT_MS: u32 = 1000;

/// Peripheral used by `init_default`. USART2 is wired to the ST-LINK VCP on the Nucleo-L031K6.
pub const DEFAULT_INSTANCE: Instance = Instance::Usart2;

pub const DEFAULT_BAUD_RATE: u32 = 9600;

/// Anything the log macros can write a formatted message to.
pub trait Sink {
    type Error;

    /// Send one formatted message, returning the number of bytes accepted.
    fn send(&mut self, args: fmt::Arguments<'_>) -> Result<usize, Self::Error>;
}

impl<S: Sink + ?Sized> Sink for &mut S {
    type Error = S::Error;

    fn send(&mut self, args: fmt::Arguments<'_>) -> Result<usize, Self::Error> {
        (**self).send(args)
    }
}
