// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! STM32L0 backend for the logger.
//!
//! - `Usart2Hal` drives USART2 through the `stm32l0xx-hal` transmitter, reprogramming the
//!   peripheral registers directly on `init` so the baud rate can change at runtime.
//! - `SysTickMillis` turns SysTick into the millisecond clock used for transmit timeouts. Call
//!   [`SysTickMillis::tick`] from the `SysTick` exception handler.

use core::fmt;
use core::sync::atomic::{AtomicU32, Ordering};

use cortex_m::peripheral::{syst::SystClkSource, SYST};
use embedded_hal::serial;
use stm32l0xx_hal::{
    pac::{self, USART2},
    serial::Tx,
};

use super::regs;
use super::usart::{write_all, Instance, Millis, TxError, UartHal, UartHandle};

type SerialError = <Tx<USART2> as serial::Write<u8>>::Error;

static MILLIS: AtomicU32 = AtomicU32::new(0);

/// Millisecond clock driven by the SysTick exception.
pub struct SysTickMillis {
    _syst: SYST,
}

impl SysTickMillis {
    /// Configure SysTick to fire every millisecond from the core clock.
    pub fn start(mut syst: SYST, sysclk_hz: u32) -> Self {
        syst.set_clock_source(SystClkSource::Core);
        syst.set_reload(sysclk_hz / 1_000 - 1);
        syst.clear_current();
        syst.enable_interrupt();
        syst.enable_counter();
        Self { _syst: syst }
    }

    /// Advance the clock by one millisecond.
    ///
    /// Only the SysTick handler writes the counter, so a load/store pair is enough on ARMv6-M.
    #[inline]
    pub fn tick() {
        MILLIS.store(MILLIS.load(Ordering::Relaxed).wrapping_add(1), Ordering::Relaxed);
    }
}

impl Millis for SysTickMillis {
    #[inline]
    fn millis(&self) -> u32 {
        MILLIS.load(Ordering::Relaxed)
    }
}

#[derive(Debug)]
pub enum Stm32l0Error {
    /// This backend only drives USART2.
    UnsupportedInstance(Instance),
    /// The baud rate cannot be derived from the peripheral clock.
    InvalidBaudRate(u32),
    Timeout,
    Serial(SerialError),
}

impl fmt::Display for Stm32l0Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Stm32l0Error::UnsupportedInstance(i) => write!(f, "unsupported instance {:?}", i),
            Stm32l0Error::InvalidBaudRate(b) => write!(f, "baud rate {} not reachable", b),
            Stm32l0Error::Timeout => f.write_str("transmit timed out"),
            Stm32l0Error::Serial(e) => write!(f, "serial error: {:?}", e),
        }
    }
}

impl From<TxError<SerialError>> for Stm32l0Error {
    fn from(e: TxError<SerialError>) -> Self {
        match e {
            TxError::Timeout => Stm32l0Error::Timeout,
            TxError::Bus(e) => Stm32l0Error::Serial(e),
        }
    }
}

/// USART2 transmitter plus what is needed to reconfigure it.
pub struct Usart2Hal<C: Millis> {
    tx: Tx<USART2>,
    clock: C,
    pclk1_hz: u32,
}

impl<C: Millis> Usart2Hal<C> {
    /// `pclk1_hz` is the USART2 kernel clock (PCLK1 with the default clock selection).
    pub fn new(tx: Tx<USART2>, clock: C, pclk1_hz: u32) -> Self {
        Self {
            tx,
            clock,
            pclk1_hz,
        }
    }

    /// Clock used for transmit timeouts.
    pub fn clock(&self) -> &C {
        &self.clock
    }

    pub fn free(self) -> (Tx<USART2>, C) {
        (self.tx, self.clock)
    }
}

impl<C: Millis> UartHal for Usart2Hal<C> {
    type Error = Stm32l0Error;

    fn init(&mut self, handle: &UartHandle) -> Result<(), Stm32l0Error> {
        if handle.instance != Instance::Usart2 {
            return Err(Stm32l0Error::UnsupportedInstance(handle.instance));
        }
        let brr = regs::brr(handle.instance, &handle.config, self.pclk1_hz)
            .ok_or(Stm32l0Error::InvalidBaudRate(handle.baud_rate()))?;

        // Safety: `self.tx` is the only owner of USART2, and CR1.UE is cleared before the
        // configuration registers are touched.
        let usart = unsafe { &*pac::USART2::ptr() };
        usart
            .cr1
            .modify(|r, w| unsafe { w.bits(r.bits() & !regs::cr1::UE) });
        usart.brr.write(|w| unsafe { w.bits(brr) });
        usart
            .cr2
            .modify(|r, w| unsafe { w.bits(regs::cr2(r.bits(), &handle.config)) });
        usart
            .cr3
            .modify(|r, w| unsafe { w.bits(regs::cr3(r.bits(), &handle.config)) });
        usart.cr1.modify(|r, w| unsafe {
            w.bits(regs::cr1(r.bits(), &handle.config) | regs::cr1::UE)
        });

        Ok(())
    }

    fn transmit(
        &mut self,
        _handle: &UartHandle,
        bytes: &[u8],
        timeout_ms: u32,
    ) -> Result<(), Stm32l0Error> {
        write_all(&mut self.tx, &self.clock, bytes, timeout_ms)?;
        Ok(())
    }
}
