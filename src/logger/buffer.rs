// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Fixed-capacity formatting buffer.
//!
//! Works in `no_std` and does not allocate memory. Output past the capacity is dropped, but the
//! full rendered length is still counted so callers can tell a message was truncated.

use core::fmt;

/// Stack buffer that renders `core::fmt` output, keeping at most `N - 1` bytes.
///
/// One slot is held back the way a C string keeps room for its terminator, so a 100-byte buffer
/// carries at most 99 bytes of message.
pub struct MessageBuffer<const N: usize> {
    bytes: [u8; N],
    stored: usize,
    required: usize,
}

impl<const N: usize> MessageBuffer<N> {
    /// Number of message bytes the buffer can hold.
    pub const LIMIT: usize = N.saturating_sub(1);

    pub const fn new() -> Self {
        Self {
            bytes: [0; N],
            stored: 0,
            required: 0,
        }
    }

    /// Render `args` from scratch.
    ///
    /// Returns the length the message would have had without truncation.
    pub fn render(&mut self, args: fmt::Arguments<'_>) -> usize {
        self.clear();
        // A failing `Display` impl just ends the message early.
        let _ = fmt::write(self, args);
        self.required
    }

    pub fn clear(&mut self) {
        self.stored = 0;
        self.required = 0;
    }

    /// The bytes actually kept, at most [`Self::LIMIT`] of them.
    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes[..self.stored]
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.stored
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.stored == 0
    }

    /// Length of the untruncated rendering.
    #[inline]
    pub fn required(&self) -> usize {
        self.required
    }

    #[inline]
    pub fn is_truncated(&self) -> bool {
        self.required > self.stored
    }
}

impl<const N: usize> Default for MessageBuffer<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const N: usize> fmt::Write for MessageBuffer<N> {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        let room = Self::LIMIT - self.stored;
        let take = s.len().min(room);
        self.bytes[self.stored..self.stored + take].copy_from_slice(&s.as_bytes()[..take]);
        self.stored += take;
        self.required += s.len();
        Ok(())
    }
}
