// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Queued UART logger.
//!
//! `send` only formats into the ring buffer; the bytes go out when the main loop calls
//! [`QueuedLogger::run`], which hands everything queued so far to a non-blocking (DMA or
//! interrupt driven) transmit. The transfer-complete interrupt reports back through the shared
//! [`TxStatus`].
//!
//! ```ignore
//! static TX_STATUS: TxStatus = TxStatus::new();
//!
//! let mut logger = QueuedLogger::<_>::new(dma_uart, &TX_STATUS);
//! logger.init_default()?;
//! log_err!(logger, "sensor {} missing", id)?;
//! loop {
//!     logger.run()?;
//! }
//!
//! // In the DMA transfer-complete handler:
//! TX_STATUS.complete();
//! ```

use core::fmt;

use heapless::{Deque, Vec};

use super::buffer::MessageBuffer;
use super::{
    Error, Sink, TxState, TxStatus, DEFAULT_BAUD_RATE, DEFAULT_INSTANCE, MESSAGE_CAPACITY,
};
use crate::hw::{Instance, StartTransmit, UartConfig, UartHandle};

/// Default ring buffer size, in bytes.
pub const QUEUE_CAPACITY: usize = 128;

/// What a call to [`QueuedLogger::run`] did.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Run {
    /// Nothing queued.
    Idle,
    /// A previous transfer is still in flight.
    Busy,
    /// A transfer of this many bytes was started.
    Started(usize),
}

pub struct QueuedLogger<'a, H: StartTransmit, const N: usize = QUEUE_CAPACITY> {
    hal: H,
    handle: Option<UartHandle>,
    queue: Deque<u8, N>,
    staging: Vec<u8, N>,
    status: &'a TxStatus,
}

impl<'a, H: StartTransmit, const N: usize> QueuedLogger<'a, H, N> {
    /// `status` must be the same object the transfer-complete interrupt updates.
    pub fn new(hal: H, status: &'a TxStatus) -> Self {
        Self {
            hal,
            handle: None,
            queue: Deque::new(),
            staging: Vec::new(),
            status,
        }
    }

    /// Configure `instance` for 8N1 at `baud_rate` and bring it up.
    ///
    /// Bytes queued before this call stay queued and go out on the next [`QueuedLogger::run`].
    pub fn init(&mut self, instance: Instance, baud_rate: u32) -> Result<(), Error<H::Error>> {
        let handle = UartHandle::new(instance, UartConfig::logger(baud_rate));
        self.handle = None;
        self.hal.init(&handle).map_err(Error::Init)?;
        self.handle = Some(handle);
        Ok(())
    }

    /// [`QueuedLogger::init`] on USART2 at 9600 baud.
    pub fn init_default(&mut self) -> Result<(), Error<H::Error>> {
        self.init(DEFAULT_INSTANCE, DEFAULT_BAUD_RATE)
    }

    /// Format `args` and queue the result, cut to `MESSAGE_CAPACITY - 1` bytes.
    ///
    /// Returns the number of bytes queued.
    pub fn send(&mut self, args: fmt::Arguments<'_>) -> Result<usize, Error<H::Error>> {
        let mut buf = MessageBuffer::<MESSAGE_CAPACITY>::new();
        buf.render(args);
        self.send_bytes(buf.as_bytes())?;
        Ok(buf.len())
    }

    /// Queue raw bytes. Either all of `bytes` is queued or none of it is.
    pub fn send_bytes(&mut self, bytes: &[u8]) -> Result<(), Error<H::Error>> {
        let available = self.available();
        if bytes.len() > available {
            return Err(Error::QueueFull {
                requested: bytes.len(),
                available,
            });
        }
        for &b in bytes {
            let pushed = self.queue.push_back(b);
            debug_assert!(pushed.is_ok());
        }
        Ok(())
    }

    /// Start sending whatever is queued, if the previous transfer has finished.
    ///
    /// The bytes handed to [`StartTransmit::start_transmit`] live in a staging buffer that is not
    /// written again until the status leaves `Transmitting`. If the transfer cannot be started the
    /// drained bytes are dropped.
    pub fn run(&mut self) -> Result<Run, Error<H::Error>> {
        match self.status.state() {
            TxState::Transmitting => return Ok(Run::Busy),
            TxState::Error => {
                self.status.acknowledge();
                return Err(Error::TransferFailed);
            }
            TxState::Idle => {}
        }

        if self.queue.is_empty() {
            return Ok(Run::Idle);
        }
        let handle = self.handle.as_ref().ok_or(Error::NotInitialized)?;

        self.staging.clear();
        let (front, back) = self.queue.as_slices();
        let copied = self
            .staging
            .extend_from_slice(front)
            .and_then(|()| self.staging.extend_from_slice(back));
        // Same capacity as the queue.
        debug_assert!(copied.is_ok());
        self.queue.clear();

        // The HAL may complete synchronously from inside `start_transmit`.
        self.status.begin();
        if let Err(e) = self.hal.start_transmit(handle, &self.staging) {
            self.status.acknowledge();
            return Err(Error::Transmit(e));
        }
        Ok(Run::Started(self.staging.len()))
    }

    /// Bytes of the transfer in flight, empty when idle.
    pub fn in_flight(&self) -> &[u8] {
        if self.status.is_busy() {
            self.staging.as_slice()
        } else {
            &[]
        }
    }

    /// Bytes waiting to be sent.
    #[inline]
    pub fn pending(&self) -> usize {
        self.queue.len()
    }

    /// Free space in the queue.
    #[inline]
    pub fn available(&self) -> usize {
        N - self.queue.len()
    }

    #[inline]
    pub fn handle(&self) -> Option<&UartHandle> {
        self.handle.as_ref()
    }

    #[inline]
    pub fn is_initialized(&self) -> bool {
        self.handle.is_some()
    }

    pub fn status(&self) -> &'a TxStatus {
        self.status
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

impl<H: StartTransmit, const N: usize> Sink for QueuedLogger<'_, H, N> {
    type Error = Error<H::Error>;

    fn send(&mut self, args: fmt::Arguments<'_>) -> Result<usize, Self::Error> {
        QueuedLogger::send(self, args)
    }
}

impl<H: StartTransmit, const N: usize> fmt::Write for QueuedLogger<'_, H, N> {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        self.send_bytes(s.as_bytes()).map_err(|_| fmt::Error)
    }

    // A `write!` is queued whole or not at all, even when it arrives as several pieces.
    fn write_fmt(&mut self, args: fmt::Arguments<'_>) -> fmt::Result {
        let mark = self.queue.len();
        let result = fmt::write(self, args);
        if result.is_err() {
            while self.queue.len() > mark {
                self.queue.pop_back();
            }
        }
        result
    }
}
