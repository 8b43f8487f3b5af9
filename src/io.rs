//! Byte source abstraction
//!
//! The terminal polls a [`ByteSource`] for input. Output (echo) goes to any
//! [`core::fmt::Write`], so a UART driver, a `String` or a test capture
//! buffer all work as sinks.

/// Provider of incoming bytes, e.g. a serial peripheral RX queue
pub trait ByteSource {
    /// Number of bytes that can be read without blocking
    fn available(&mut self) -> usize;

    /// Read one byte, `None` if nothing is pending
    fn read(&mut self) -> Option<u8>;
}

impl<S: ByteSource + ?Sized> ByteSource for &mut S {
    fn available(&mut self) -> usize {
        (**self).available()
    }

    fn read(&mut self) -> Option<u8> {
        (**self).read()
    }
}

/// Byte source over an in-memory slice
#[derive(Debug, Clone)]
pub struct SliceSource<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> SliceSource<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, pos: 0 }
    }
}

impl ByteSource for SliceSource<'_> {
    fn available(&mut self) -> usize {
        self.data.len() - self.pos
    }

    fn read(&mut self) -> Option<u8> {
        let b = *self.data.get(self.pos)?;
        self.pos += 1;
        Some(b)
    }
}

/// Sink that discards everything, for callers with echo disabled
#[derive(Debug, Clone, Copy, Default)]
pub struct NullSink;

impl core::fmt::Write for NullSink {
    fn write_str(&mut self, _s: &str) -> core::fmt::Result {
        Ok(())
    }
}
