// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! STM32L0 U(S)ART register encodings.
//!
//! Pure bit math for BRR, CR1, CR2 and CR3 (RM0377 §24.7 / §25.7), kept apart from the register
//! writes so it can be checked on the host.

use super::usart::{
    HwFlowControl, Instance, Mode, Oversampling, Parity, StopBits, UartConfig, WordLength,
};

pub mod cr1 {
    pub const UE: u32 = 1 << 0;
    pub const RE: u32 = 1 << 2;
    pub const TE: u32 = 1 << 3;
    pub const PS: u32 = 1 << 9;
    pub const PCE: u32 = 1 << 10;
    pub const M0: u32 = 1 << 12;
    pub const OVER8: u32 = 1 << 15;
    pub const M1: u32 = 1 << 28;
}

pub mod cr2 {
    pub const STOP_SHIFT: u32 = 12;
    pub const STOP_MASK: u32 = 0b11 << STOP_SHIFT;
}

pub mod cr3 {
    pub const RTSE: u32 = 1 << 8;
    pub const CTSE: u32 = 1 << 9;
}

// Fields of CR1 owned by the line configuration. UE is handled separately by the caller.
const CR1_CONFIG_MASK: u32 =
    cr1::M1 | cr1::M0 | cr1::OVER8 | cr1::PCE | cr1::PS | cr1::TE | cr1::RE;

const USART_BRR_MIN: u32 = 16;
const USART_BRR_MAX: u32 = 0xFFFF;
const LPUART_BRR_MIN: u64 = 0x300;
const LPUART_BRR_MAX: u64 = 0xF_FFFF;

/// BRR value for `config.baud_rate` given the peripheral kernel clock, or `None` if the rate
/// cannot be produced.
pub fn brr(instance: Instance, config: &UartConfig, kernel_clk_hz: u32) -> Option<u32> {
    let baud = config.baud_rate;
    if baud == 0 {
        return None;
    }

    if instance == Instance::Lpuart1 {
        // LPUARTDIV = 256 * fck / baud; no oversampling selection.
        let div = (256 * kernel_clk_hz as u64 + baud as u64 / 2) / baud as u64;
        return (LPUART_BRR_MIN..=LPUART_BRR_MAX)
            .contains(&div)
            .then_some(div as u32);
    }

    match config.oversampling {
        Oversampling::X16 => {
            let div = rounded_div(kernel_clk_hz as u64, baud);
            (USART_BRR_MIN..=USART_BRR_MAX)
                .contains(&div)
                .then_some(div)
        }
        Oversampling::X8 => {
            let div = rounded_div(2 * kernel_clk_hz as u64, baud);
            if !(USART_BRR_MIN..=USART_BRR_MAX).contains(&div) {
                return None;
            }
            // BRR[3] must stay clear; the low nibble is shifted right by one.
            Some((div & 0xFFF0) | ((div & 0x000F) >> 1))
        }
    }
}

fn rounded_div(num: u64, baud: u32) -> u32 {
    let div = (num + baud as u64 / 2) / baud as u64;
    div.min(u32::MAX as u64) as u32
}

/// CR1 with the word length, parity, oversampling and direction fields set from `config`.
pub fn cr1(current: u32, config: &UartConfig) -> u32 {
    let mut bits = current & !CR1_CONFIG_MASK;

    bits |= match config.word_length {
        WordLength::Seven => cr1::M1,
        WordLength::Eight => 0,
        WordLength::Nine => cr1::M0,
    };
    bits |= match config.parity {
        Parity::None => 0,
        Parity::Even => cr1::PCE,
        Parity::Odd => cr1::PCE | cr1::PS,
    };
    if config.oversampling == Oversampling::X8 {
        bits |= cr1::OVER8;
    }
    bits |= match config.mode {
        Mode::Tx => cr1::TE,
        Mode::Rx => cr1::RE,
        Mode::TxRx => cr1::TE | cr1::RE,
    };

    bits
}

/// CR2 with the STOP field set from `config`.
pub fn cr2(current: u32, config: &UartConfig) -> u32 {
    let stop = match config.stop_bits {
        StopBits::One => 0b00,
        StopBits::Half => 0b01,
        StopBits::Two => 0b10,
        StopBits::OneAndHalf => 0b11,
    };
    (current & !cr2::STOP_MASK) | (stop << cr2::STOP_SHIFT)
}

/// CR3 with the RTS/CTS enables set from `config`.
pub fn cr3(current: u32, config: &UartConfig) -> u32 {
    let flow = match config.hw_flow_control {
        HwFlowControl::None => 0,
        HwFlowControl::Rts => cr3::RTSE,
        HwFlowControl::Cts => cr3::CTSE,
        HwFlowControl::RtsCts => cr3::RTSE | cr3::CTSE,
    };
    (current & !(cr3::RTSE | cr3::CTSE)) | flow
}
