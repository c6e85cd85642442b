// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! # UART Logger
//!
//! This crate contains a small logging facility for STM32L0 firmware, written in Rust: bring a
//! U(S)ART up at a given baud rate and send formatted text over it, blocking until the bytes are
//! out or a timeout elapses.
//!
//! ## Crate Structure
//!
//! | Module | Purpose |
//! | ------ | -------- |
//! | [`hw`] | UART handle, HAL traits, STM32L0 register encodings and backend |
//! | [`logger`] | Blocking and queued loggers, log levels, formatting buffer |
//!
//! ## Getting Started
//!
//! ```ignore
//! let mut logger = Logger::new(hal);
//! logger.init(Instance::Usart2, 115_200)?;
//! uart_send!(logger, "hello {}\r\n", 42)?;
//! log_err!(logger, "sensor {} not responding", 3)?;
//! ```
//!
//! Run the host tests:
//!
//! ```bash
//! cargo test
//! ```
//!
//! Flash a Nucleo-L031K6:
//!
//! ```bash
//! cargo run --release --features stm32l0 --target thumbv6m-none-eabi
//! ```
//!
//! ## License
//!
//! Licensed under the **MIT License**.
//! See the `LICENSE` file in the repository root for full terms.
//!
//! © 2025–2026 Christopher Liu

#![cfg_attr(not(test), no_std)]

pub mod hw;
pub mod logger;

pub use hw::{Instance, StartTransmit, UartConfig, UartHal, UartHandle};
pub use logger::{
    Error, Level, Logger, QueuedLogger, Run, Sink, TxState, TxStatus, MESSAGE_CAPACITY,
    TRANSMIT_TIMEOUT_MS,
};
