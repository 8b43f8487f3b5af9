//! Fixed-capacity line buffer for terminal input

/// Default receive buffer capacity in bytes
pub const RX_BUFFER_SIZE: usize = 32;

/// Line input buffer
///
/// Holds at most `C` bytes. Content is always `buf[..len]`; there is no
/// terminator byte to keep in sync, the slice end plays that role.
#[derive(Clone)]
pub struct LineBuffer<const C: usize = RX_BUFFER_SIZE> {
    buf: [u8; C],
    len: usize,
}

impl<const C: usize> LineBuffer<C> {
    /// Create empty buffer
    pub const fn new() -> Self {
        Self {
            buf: [0u8; C],
            len: 0,
        }
    }

    /// Append a byte.
    ///
    /// Returns `false` when the buffer is full and the byte was dropped.
    pub fn push(&mut self, c: u8) -> bool {
        if self.len < C {
            self.buf[self.len] = c;
            self.len += 1;
            true
        } else {
            false
        }
    }

    /// Remove last byte.
    ///
    /// Returns `false` if the buffer was already empty.
    pub fn backspace(&mut self) -> bool {
        if self.len > 0 {
            self.len -= 1;
            true
        } else {
            false
        }
    }

    /// Clear buffer
    pub fn clear(&mut self) {
        self.len = 0;
    }

    /// Get buffer as string slice
    pub fn as_str(&self) -> &str {
        core::str::from_utf8(&self.buf[..self.len]).unwrap_or("")
    }

    /// Get buffer length
    pub fn len(&self) -> usize {
        self.len
    }

    /// Check if empty
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Check if no more bytes fit
    pub fn is_full(&self) -> bool {
        self.len == C
    }

    /// Buffer capacity
    pub const fn capacity(&self) -> usize {
        C
    }

    /// Get raw bytes
    pub fn as_bytes(&self) -> &[u8] {
        &self.buf[..self.len]
    }
}

impl<const C: usize> Default for LineBuffer<C> {
    fn default() -> Self {
        Self::new()
    }
}
