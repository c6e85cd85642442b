// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Recording UART backend for host tests.

#![allow(dead_code)]

use uart_logger::{StartTransmit, TxStatus, UartHal, UartHandle};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FakeError {
    BadConfig,
    Timeout,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transmit {
    pub handle: UartHandle,
    pub bytes: Vec<u8>,
    /// `None` for non-blocking starts.
    pub timeout_ms: Option<u32>,
}

#[derive(Default)]
pub struct FakeUart<'a> {
    pub inits: Vec<UartHandle>,
    pub transmits: Vec<Transmit>,
    pub reject_baud: Option<u32>,
    pub fail_transmit: bool,
    /// Report completion from inside `start_transmit`, like a transfer that finishes at once.
    pub complete_on: Option<&'a TxStatus>,
}

impl FakeUart<'_> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn sent(&self) -> Vec<u8> {
        self.transmits
            .iter()
            .flat_map(|t| t.bytes.iter().copied())
            .collect()
    }
}

impl UartHal for FakeUart<'_> {
    type Error = FakeError;

    fn init(&mut self, handle: &UartHandle) -> Result<(), FakeError> {
        if self.reject_baud == Some(handle.config.baud_rate) {
            return Err(FakeError::BadConfig);
        }
        self.inits.push(*handle);
        Ok(())
    }

    fn transmit(
        &mut self,
        handle: &UartHandle,
        bytes: &[u8],
        timeout_ms: u32,
    ) -> Result<(), FakeError> {
        self.transmits.push(Transmit {
            handle: *handle,
            bytes: bytes.to_vec(),
            timeout_ms: Some(timeout_ms),
        });
        if self.fail_transmit {
            return Err(FakeError::Timeout);
        }
        Ok(())
    }
}

impl StartTransmit for FakeUart<'_> {
    fn start_transmit(&mut self, handle: &UartHandle, bytes: &[u8]) -> Result<(), FakeError> {
        if self.fail_transmit {
            return Err(FakeError::Timeout);
        }
        self.transmits.push(Transmit {
            handle: *handle,
            bytes: bytes.to_vec(),
            timeout_ms: None,
        });
        if let Some(status) = self.complete_on {
            status.complete();
        }
        Ok(())
    }
}
