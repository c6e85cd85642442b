#![no_main]
#![no_std]

use core::fmt::Write;

use cortex_m_rt::{entry, exception};
use panic_halt as _;

use hal::{pac, prelude::*, rcc::Config, serial};
use stm32l0xx_hal as hal;

use uart_logger::hw::{Millis, SysTickMillis, Usart2Hal};
use uart_logger::{log_dbg, log_err, log_inf, uart_send, Logger};

#[entry]
fn main() -> ! {
    // Peripherals
    let dp = pac::Peripherals::take().unwrap();
    let cp = cortex_m::Peripherals::take().unwrap();

    // Clocks
    let mut rcc = dp.RCC.freeze(Config::hsi16());
    let sysclk_hz = rcc.clocks.sys_clk().0;
    let pclk1_hz = rcc.clocks.apb1_clk().0;

    // GPIO
    let gpioa = dp.GPIOA.split(&mut rcc);

    // USART2 (ST-LINK VCP): PA2 TX, PA15 RX, AF4
    let serial = dp
        .USART2
        .usart(
            gpioa.pa2,
            gpioa.pa15,
            serial::Config::default().baudrate(9_600.Bd()),
            &mut rcc,
        )
        .unwrap();
    let (tx, _rx) = serial.split();

    // Logger
    let clock = SysTickMillis::start(cp.SYST, sysclk_hz);
    let mut logger = Logger::new(Usart2Hal::new(tx, clock, pclk1_hz));
    if logger.init_default().is_err() {
        loop {
            cortex_m::asm::bkpt();
        }
    }

    let _ = uart_send!(logger, "uart-logger up, sysclk {} Hz\r\n", sysclk_hz);
    let _ = writeln!(logger, "pclk1 {} Hz\r", pclk1_hz);

    let mut last = logger.hal().clock().millis();
    let mut seconds: u32 = 0;
    loop {
        let now = logger.hal().clock().millis();
        if now.wrapping_sub(last) < 1_000 {
            cortex_m::asm::nop();
            continue;
        }
        last = now;
        seconds += 1;

        let _ = log_dbg!(logger, "tick at {} ms", now);
        let _ = log_inf!(logger, "uptime {} s", seconds);
        if seconds % 60 == 0 {
            if let Err(e) = log_err!(logger, "heartbeat {} min", seconds / 60) {
                let _ = writeln!(logger, "log failed: {}\r", e);
            }
        }
    }
}

#[exception]
fn SysTick() {
    SysTickMillis::tick();
}
