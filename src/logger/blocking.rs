// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Blocking UART logger.
//!
//! Each message is rendered into a [`MESSAGE_CAPACITY`]-byte stack buffer and sent with a single
//! blocking HAL transmit bounded by [`TRANSMIT_TIMEOUT_MS`]. Messages longer than the buffer are
//! cut to its first `MESSAGE_CAPACITY - 1` bytes.
//!
//! Note: When using `writeln!`, be sure to include `\r` (CR) in the format string to ensure correct
//! line endings on the terminal.

use core::fmt;

use super::buffer::MessageBuffer;
use super::{
    Error, Sink, DEFAULT_BAUD_RATE, DEFAULT_INSTANCE, MESSAGE_CAPACITY, TRANSMIT_TIMEOUT_MS,
};
use crate::hw::{Instance, UartConfig, UartHal, UartHandle};

pub struct Logger<H: UartHal> {
    hal: H,
    handle: Option<UartHandle>,
}

impl<H: UartHal> Logger<H> {
    /// Wrap a HAL backend. The logger is unusable until [`Logger::init`] succeeds.
    pub fn new(hal: H) -> Self {
        Self { hal, handle: None }
    }

    /// Configure `instance` for 8N1 at `baud_rate` and bring it up.
    ///
    /// Calling this again replaces the previous configuration. If the HAL rejects the
    /// configuration the logger is left uninitialized.
    pub fn init(&mut self, instance: Instance, baud_rate: u32) -> Result<(), Error<H::Error>> {
        let handle = UartHandle::new(instance, UartConfig::logger(baud_rate));
        self.handle = None;
        self.hal.init(&handle).map_err(Error::Init)?;
        self.handle = Some(handle);
        Ok(())
    }

    /// [`Logger::init`] on USART2 at 9600 baud.
    pub fn init_default(&mut self) -> Result<(), Error<H::Error>> {
        self.init(DEFAULT_INSTANCE, DEFAULT_BAUD_RATE)
    }

    /// Format `args` and transmit the result.
    ///
    /// Returns the number of bytes sent. The HAL transmit is called exactly once per message.
    pub fn send(&mut self, args: fmt::Arguments<'_>) -> Result<usize, Error<H::Error>> {
        let handle = self.handle.as_ref().ok_or(Error::NotInitialized)?;

        let mut buf = MessageBuffer::<MESSAGE_CAPACITY>::new();
        buf.render(args);

        self.hal
            .transmit(handle, buf.as_bytes(), TRANSMIT_TIMEOUT_MS)
            .map_err(Error::Transmit)?;
        Ok(buf.len())
    }

    /// Transmit raw bytes without formatting or truncation.
    pub fn send_bytes(&mut self, bytes: &[u8]) -> Result<(), Error<H::Error>> {
        let handle = self.handle.as_ref().ok_or(Error::NotInitialized)?;
        self.hal
            .transmit(handle, bytes, TRANSMIT_TIMEOUT_MS)
            .map_err(Error::Transmit)
    }

    /// Current peripheral configuration, if initialized.
    #[inline]
    pub fn handle(&self) -> Option<&UartHandle> {
        self.handle.as_ref()
    }

    #[inline]
    pub fn is_initialized(&self) -> bool {
        self.handle.is_some()
    }

    pub fn hal(&self) -> &H {
        &self.hal
    }

    pub fn hal_mut(&mut self) -> &mut H {
        &mut self.hal
    }

    pub fn free(self) -> H {
        self.hal
    }
}

impl<H: UartHal> Sink for Logger<H> {
    type Error = Error<H::Error>;

    fn send(&mut self, args: fmt::Arguments<'_>) -> Result<usize, Self::Error> {
        Logger::send(self, args)
    }
}

// Implement `core::fmt::Write` so we can use `write!` / `writeln!` on `Logger`.
impl<H: UartHal> fmt::Write for Logger<H> {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        self.send_bytes(s.as_bytes()).map_err(|_| fmt::Error)
    }
}
