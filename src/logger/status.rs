// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Transmit state shared between the queued logger and the transfer-complete interrupt.
//!
//! ```text
//! Idle --run()--> Transmitting --complete()--> Idle
//!                      |
//!                      +--fail()--> Error --acknowledge()--> Idle
//! ```
//!
//! Every transition has exactly one writer (the logger leaves `Idle` and `Error`, the interrupt
//! leaves `Transmitting`), so plain atomic loads and stores are enough. ARMv6-M has no
//! compare-and-swap.

use core::sync::atomic::{AtomicU8, Ordering};

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[repr(u8)]
pub enum TxState {
    Idle = 0,
    Transmitting = 1,
    Error = 2,
}

impl TxState {
    fn from_raw(raw: u8) -> Self {
        match raw {
            1 => TxState::Transmitting,
            2 => TxState::Error,
            _ => TxState::Idle,
        }
    }
}

pub struct TxStatus {
    state: AtomicU8,
}

impl TxStatus {
    pub const fn new() -> Self {
        Self {
            state: AtomicU8::new(TxState::Idle as u8),
        }
    }

    #[inline]
    pub fn state(&self) -> TxState {
        TxState::from_raw(self.state.load(Ordering::Acquire))
    }

    #[inline]
    pub fn is_busy(&self) -> bool {
        self.state() == TxState::Transmitting
    }

    /// Transfer finished. Call from the completion interrupt.
    pub fn complete(&self) {
        if self.state() == TxState::Transmitting {
            self.set(TxState::Idle);
        }
    }

    /// Transfer aborted. Call from the error interrupt.
    pub fn fail(&self) {
        if self.state() == TxState::Transmitting {
            self.set(TxState::Error);
        }
    }

    /// Clear a reported error, or abandon a transfer that could not be started.
    pub(crate) fn acknowledge(&self) {
        self.set(TxState::Idle);
    }

    pub(crate) fn begin(&self) {
        self.set(TxState::Transmitting);
    }

    #[inline]
    fn set(&self, state: TxState) {
        self.state.store(state as u8, Ordering::Release);
    }
}

impl Default for TxStatus {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_idle() {
        let status = TxStatus::new();
        assert_eq!(status.state(), TxState::Idle);
        assert!(!status.is_busy());
    }

    #[test]
    fn completion_only_leaves_transmitting() {
        let status = TxStatus::new();
        status.complete();
        assert_eq!(status.state(), TxState::Idle);
        status.fail();
        assert_eq!(status.state(), TxState::Idle);

        status.begin();
        assert!(status.is_busy());
        status.complete();
        assert_eq!(status.state(), TxState::Idle);
    }

    #[test]
    fn failure_sticks_until_acknowledged() {
        let status = TxStatus::new();
        status.begin();
        status.fail();
        assert_eq!(status.state(), TxState::Error);
        status.complete();
        assert_eq!(status.state(), TxState::Error);
        status.acknowledge();
        assert_eq!(status.state(), TxState::Idle);
    }
}
