// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! USART abstraction layer.
//!
//! Describes a configured U(S)ART peripheral as a plain [`UartHandle`] and defines the seams the
//! logger talks through:
//!
//! - [`UartHal`] initializes a peripheral from a handle and performs blocking transmits.
//! - [`StartTransmit`] hands a transfer off to DMA or an interrupt and returns immediately.
//! - [`Millis`] is the monotonic millisecond clock used for transmit timeouts.
//!
//! [`write_all`] implements a blocking transmit with timeout on top of any `embedded-hal` serial
//! transmitter, so chip backends only need to provide the peripheral setup.
//!
//! To access the terminal on the host machine, connect to the debug USB port and use
//! ```text
//! $ screen /dev/tty.usbmodem* <baud_rate>
//! ```
//!
//! To close the debug terminal, press `Ctrl+A` then `Ctrl+\` then `y`.

use core::fmt;

use embedded_hal::serial;

/// U(S)ART peripherals available on the STM32L0 family.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Instance {
    Usart1,
    Usart2,
    Usart4,
    Usart5,
    Lpuart1,
}

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum WordLength {
    Seven,
    Eight,
    Nine,
}

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum StopBits {
    Half,
    One,
    OneAndHalf,
    Two,
}

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Parity {
    None,
    Even,
    Odd,
}

/// Which directions of the peripheral are enabled.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Mode {
    Tx,
    Rx,
    TxRx,
}

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum HwFlowControl {
    None,
    Rts,
    Cts,
    RtsCts,
}

/// Receiver sampling rate relative to the baud rate.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Oversampling {
    X8,
    X16,
}

/// Line protocol of a U(S)ART peripheral.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct UartConfig {
    pub baud_rate: u32,
    pub word_length: WordLength,
    pub stop_bits: StopBits,
    pub parity: Parity,
    pub mode: Mode,
    pub hw_flow_control: HwFlowControl,
    pub oversampling: Oversampling,
}

impl UartConfig {
    /// The fixed protocol used by the logger: 8N1, TX+RX, no flow control, 16x oversampling.
    pub const fn logger(baud_rate: u32) -> Self {
        Self {
            baud_rate,
            word_length: WordLength::Eight,
            stop_bits: StopBits::One,
            parity: Parity::None,
            mode: Mode::TxRx,
            hw_flow_control: HwFlowControl::None,
            oversampling: Oversampling::X16,
        }
    }
}

impl Default for UartConfig {
    fn default() -> Self {
        Self::logger(crate::logger::DEFAULT_BAUD_RATE)
    }
}

/// A peripheral selector together with the protocol it is configured for.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct UartHandle {
    pub instance: Instance,
    pub config: UartConfig,
}

impl UartHandle {
    pub const fn new(instance: Instance, config: UartConfig) -> Self {
        Self { instance, config }
    }

    #[inline]
    pub fn baud_rate(&self) -> u32 {
        self.config.baud_rate
    }
}

/// Chip-level UART driver the logger is layered on.
pub trait UartHal {
    type Error;

    /// Bring the peripheral named by `handle` up with `handle.config`.
    fn init(&mut self, handle: &UartHandle) -> Result<(), Self::Error>;

    /// Send every byte of `bytes`, blocking for at most `timeout_ms`.
    fn transmit(
        &mut self,
        handle: &UartHandle,
        bytes: &[u8],
        timeout_ms: u32,
    ) -> Result<(), Self::Error>;
}

/// A UART driver that can start a transfer and finish it from an interrupt or DMA completion.
///
/// When called from [`crate::logger::QueuedLogger::run`], `bytes` is the logger's staging buffer.
/// The logger does not write to it or move it again until the transfer is reported finished
/// through [`crate::logger::TxStatus`] (`complete()` or `fail()`), so a DMA backend may keep
/// reading from `bytes.as_ptr()` until then instead of copying. Keep the logger itself in place
/// (e.g. in a `static`) while a transfer is in flight.
pub trait StartTransmit: UartHal {
    fn start_transmit(&mut self, handle: &UartHandle, bytes: &[u8]) -> Result<(), Self::Error>;
}

/// Free-running millisecond counter. Wraps at `u32::MAX`.
pub trait Millis {
    fn millis(&self) -> u32;
}

impl<C: Millis + ?Sized> Millis for &C {
    fn millis(&self) -> u32 {
        (**self).millis()
    }
}

/// Failure of a blocking serial write.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum TxError<E> {
    /// The transmitter did not accept all bytes within the timeout.
    Timeout,
    /// The peripheral reported an error.
    Bus(E),
}

impl<E: fmt::Debug> fmt::Display for TxError<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TxError::Timeout => f.write_str("transmit timed out"),
            TxError::Bus(e) => write!(f, "bus error: {:?}", e),
        }
    }
}

/// Write all of `bytes` to `tx` and wait for the transmitter to drain.
///
/// The deadline covers the whole call, flush included.
pub fn write_all<TX, C>(
    tx: &mut TX,
    clock: &C,
    bytes: &[u8],
    timeout_ms: u32,
) -> Result<(), TxError<TX::Error>>
where
    TX: serial::Write<u8>,
    C: Millis + ?Sized,
{
    let start = clock.millis();

    for &b in bytes {
        poll_until(clock, start, timeout_ms, || tx.write(b))?;
    }
    poll_until(clock, start, timeout_ms, || tx.flush())
}

fn poll_until<C, E, F>(
    clock: &C,
    start: u32,
    timeout_ms: u32,
    mut op: F,
) -> Result<(), TxError<E>>
where
    C: Millis + ?Sized,
    F: FnMut() -> nb::Result<(), E>,
{
    loop {
        match op() {
            Ok(()) => return Ok(()),
            Err(nb::Error::Other(e)) => return Err(TxError::Bus(e)),
            Err(nb::Error::WouldBlock) => {
                if clock.millis().wrapping_sub(start) >= timeout_ms {
                    return Err(TxError::Timeout);
                }
            }
        }
    }
}
