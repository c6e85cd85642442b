// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! MCU-level UART plumbing.
//!
//! - [`usart`] - handle data model, HAL traits, blocking write with timeout.
//! - [`regs`] - STM32L0 U(S)ART register encodings.
//! - `stm32l0` - USART2 backend and SysTick clock (feature `stm32l0`).

pub mod regs;
#[cfg(feature = "stm32l0")]
pub mod stm32l0;
pub mod usart;

#[cfg(feature = "stm32l0")]
pub use stm32l0::{Stm32l0Error, SysTickMillis, Usart2Hal};
pub use usart::{
    write_all, HwFlowControl, Instance, Millis, Mode, Oversampling, Parity, StartTransmit,
    StopBits, TxError, UartConfig, UartHal, UartHandle, WordLength,
};
