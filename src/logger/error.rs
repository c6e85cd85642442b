// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

use core::fmt;

/// Failure of a logger operation. `E` is the HAL's error type.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Error<E> {
    /// `send`/`run` was called before a successful `init`.
    NotInitialized,
    /// The HAL rejected the peripheral configuration.
    Init(E),
    /// The HAL failed to send (or start sending) the message.
    Transmit(E),
    /// The queue cannot take the whole message; nothing was queued.
    QueueFull { requested: usize, available: usize },
    /// The completion interrupt reported a failed transfer.
    TransferFailed,
}

impl<E: fmt::Debug> fmt::Display for Error<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::NotInitialized => f.write_str("logger not initialized"),
            Error::Init(e) => write!(f, "uart init failed: {:?}", e),
            Error::Transmit(e) => write!(f, "uart transmit failed: {:?}", e),
            Error::QueueFull {
                requested,
                available,
            } => write!(
                f,
                "queue full: {} bytes requested, {} available",
                requested, available
            ),
            Error::TransferFailed => f.write_str("transfer failed"),
        }
    }
}
