// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

mod common;

use core::fmt::Write;

use common::{FakeError, FakeUart};
use uart_logger::hw::{HwFlowControl, Mode, Oversampling, Parity, StopBits, WordLength};
use uart_logger::{log_dbg, log_err, log_inf, uart_send};
use uart_logger::{Error, Instance, Logger, MESSAGE_CAPACITY, TRANSMIT_TIMEOUT_MS};

fn ready_logger() -> Logger<FakeUart<'static>> {
    let mut logger = Logger::new(FakeUart::new());
    logger.init(Instance::Usart2, 115_200).unwrap();
    logger
}

#[test]
fn init_populates_fixed_protocol() {
    let mut logger = Logger::new(FakeUart::new());
    logger.init(Instance::Usart1, 57_600).unwrap();

    let handle = *logger.handle().unwrap();
    assert_eq!(handle.instance, Instance::Usart1);
    assert_eq!(handle.config.baud_rate, 57_600);
    assert_eq!(handle.config.word_length, WordLength::Eight);
    assert_eq!(handle.config.stop_bits, StopBits::One);
    assert_eq!(handle.config.parity, Parity::None);
    assert_eq!(handle.config.mode, Mode::TxRx);
    assert_eq!(handle.config.hw_flow_control, HwFlowControl::None);
    assert_eq!(handle.config.oversampling, Oversampling::X16);

    assert_eq!(logger.hal().inits, vec![handle]);
}

#[test]
fn init_default_uses_usart2_at_9600() {
    let mut logger = Logger::new(FakeUart::new());
    logger.init_default().unwrap();
    let handle = logger.handle().unwrap();
    assert_eq!(handle.instance, Instance::Usart2);
    assert_eq!(handle.baud_rate(), 9600);
}

#[test]
fn reinit_last_write_wins() {
    let mut logger = Logger::new(FakeUart::new());
    logger.init(Instance::Usart2, 9600).unwrap();
    logger.init(Instance::Usart2, 115_200).unwrap();

    assert_eq!(logger.handle().unwrap().baud_rate(), 115_200);
    assert_eq!(logger.hal().inits.len(), 2);

    uart_send!(logger, "x").unwrap();
    assert_eq!(logger.hal().transmits[0].handle.baud_rate(), 115_200);
}

#[test]
fn failed_init_is_reported_and_leaves_logger_unusable() {
    let mut hal = FakeUart::new();
    hal.reject_baud = Some(3);
    let mut logger = Logger::new(hal);

    logger.init(Instance::Usart2, 9600).unwrap();
    assert_eq!(
        logger.init(Instance::Usart2, 3),
        Err(Error::Init(FakeError::BadConfig))
    );
    assert!(!logger.is_initialized());
    assert_eq!(uart_send!(logger, "lost"), Err(Error::NotInitialized));
    assert!(logger.hal().transmits.is_empty());
}

#[test]
fn send_before_init_does_not_touch_uart() {
    let mut logger = Logger::new(FakeUart::new());
    assert_eq!(
        logger.send(format_args!("hello")),
        Err(Error::NotInitialized)
    );
    assert!(logger.hal().transmits.is_empty());
}

#[test]
fn hello_42_is_one_transmit_with_1000ms_timeout() {
    let mut logger = ready_logger();
    assert_eq!(uart_send!(logger, "hello {}", 42), Ok(8));

    let transmits = &logger.hal().transmits;
    assert_eq!(transmits.len(), 1);
    assert_eq!(transmits[0].bytes, b"hello 42");
    assert_eq!(transmits[0].timeout_ms, Some(TRANSMIT_TIMEOUT_MS));
    assert_eq!(TRANSMIT_TIMEOUT_MS, 1000);
}

#[test]
fn one_transmit_per_send() {
    let mut logger = ready_logger();
    for i in 0..5 {
        uart_send!(logger, "line {}\r\n", i).unwrap();
    }
    uart_send!(logger, "").unwrap();

    let transmits = &logger.hal().transmits;
    assert_eq!(transmits.len(), 6);
    assert!(transmits
        .iter()
        .all(|t| t.timeout_ms == Some(TRANSMIT_TIMEOUT_MS)));
    assert!(transmits[5].bytes.is_empty());
}

#[test]
fn messages_up_to_99_bytes_are_sent_exactly() {
    let mut logger = ready_logger();
    for len in [1usize, 50, 98, 99] {
        let msg = "m".repeat(len);
        assert_eq!(uart_send!(logger, "{}", msg), Ok(len));
        assert_eq!(logger.hal().transmits.last().unwrap().bytes, msg.as_bytes());
    }
}

#[test]
fn long_message_is_clamped_to_99_bytes() {
    let mut logger = ready_logger();
    let long: String = (0..120).map(|i| (b'a' + (i % 26) as u8) as char).collect();

    assert_eq!(uart_send!(logger, "{}", long), Ok(MESSAGE_CAPACITY - 1));

    let sent = &logger.hal().transmits[0].bytes;
    assert_eq!(sent.len(), 99);
    assert_eq!(sent.as_slice(), &long.as_bytes()[..99]);
}

#[test]
fn transmit_failure_is_propagated() {
    let mut logger = ready_logger();
    logger.hal_mut().fail_transmit = true;
    assert_eq!(
        uart_send!(logger, "boom"),
        Err(Error::Transmit(FakeError::Timeout))
    );
}

#[test]
fn send_bytes_is_raw_and_unclamped() {
    let mut logger = ready_logger();
    let payload = [0xAAu8; 150];
    logger.send_bytes(&payload).unwrap();
    assert_eq!(logger.hal().transmits[0].bytes.len(), 150);
    assert_eq!(logger.hal().transmits[0].timeout_ms, Some(1000));
}

#[test]
fn fmt_write_goes_straight_to_uart() {
    let mut logger = ready_logger();
    write!(logger, "a={} b={}", 1, 2).unwrap();
    assert_eq!(logger.hal().sent(), b"a=1 b=2");
}

#[test]
fn fmt_write_fails_when_uart_fails() {
    let mut logger = ready_logger();
    logger.hal_mut().fail_transmit = true;
    assert!(write!(logger, "x").is_err());
}

#[test]
fn log_err_adds_prefix_and_crlf() {
    let mut logger = ready_logger();
    assert_eq!(log_err!(logger, "sensor {} missing", 3), Ok(27));
    assert_eq!(logger.hal().sent(), b"[ERROR]: sensor 3 missing\r\n");
}

#[test]
fn log_macros_accept_logger_references() {
    let mut logger = ready_logger();
    let mut by_ref = &mut logger;
    log_err!(by_ref, "via ref").unwrap();
    assert_eq!(logger.hal().sent(), b"[ERROR]: via ref\r\n");
}

#[cfg(not(feature = "log-level-info"))]
#[test]
fn disabled_levels_are_silent() {
    let mut logger = ready_logger();
    assert_eq!(log_inf!(logger, "info {}", 1), Ok(0));
    assert_eq!(log_dbg!(logger, "debug"), Ok(0));
    assert!(logger.hal().transmits.is_empty());
}

#[cfg(feature = "log-level-debug")]
#[test]
fn debug_build_emits_all_levels() {
    let mut logger = ready_logger();
    log_inf!(logger, "i").unwrap();
    log_dbg!(logger, "d").unwrap();
    assert_eq!(logger.hal().sent(), b"[INFO]: i\r\n[DEBUG]: d\r\n");
}

#[test]
fn free_returns_backend() {
    let mut logger = ready_logger();
    uart_send!(logger, "bye").unwrap();
    let hal = logger.free();
    assert_eq!(hal.sent(), b"bye");
}
