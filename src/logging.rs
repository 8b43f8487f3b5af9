//! RT-safe logging for the serial terminal.
//!
//! ```text
//! Terminal               LogStream            Drain
//! ────────               ─────────            ─────
//!
//! rt_log!() ──────────▶ [L0][L1][L2] ──────▶ drain_to(out)
//! non-blocking            lock-free           blocking ok
//! ```
//!
//! # Rules
//!
//! - Input processing never calls blocking log functions
//! - Messages are dropped (and counted) when the ring is full

use core::cell::UnsafeCell;
use core::fmt::Write;
use core::sync::atomic::{AtomicU32, Ordering};

/// Maximum message length.
pub const MAX_MSG_LEN: usize = 120;

/// Log buffer size (number of entries).
pub const LOG_BUFFER_SIZE: usize = 32;

/// Log level.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
#[repr(u8)]
pub enum LogLevel {
    Error = 0,
    Warn = 1,
    Info = 2,
    Debug = 3,
    Trace = 4,
}

impl LogLevel {
    /// Convert to string for output.
    pub fn as_str(self) -> &'static str {
        match self {
            LogLevel::Error => "ERROR",
            LogLevel::Warn => "WARN",
            LogLevel::Info => "INFO",
            LogLevel::Debug => "DEBUG",
            LogLevel::Trace => "TRACE",
        }
    }
}

/// A single log entry.
#[derive(Clone, Copy)]
#[repr(C)]
pub struct LogEntry {
    /// Timestamp in microseconds.
    pub timestamp_us: i64,
    /// Log level.
    pub level: LogLevel,
    /// Message length.
    pub len: u8,
    /// Message bytes (not null-terminated).
    pub msg: [u8; MAX_MSG_LEN],
}

impl Default for LogEntry {
    fn default() -> Self {
        Self {
            timestamp_us: 0,
            level: LogLevel::Info,
            len: 0,
            msg: [0; MAX_MSG_LEN],
        }
    }
}

/// One ring slot.
///
/// `seq` equals the write position the slot is free for, or that position
/// plus one once the entry is published.
struct Slot {
    seq: AtomicU32,
    entry: UnsafeCell<LogEntry>,
}

/// Lock-free log stream (multiple producers, multiple consumers).
///
/// - Producers reserve a position with compare-exchange on `write_idx`
/// - An entry is readable only after its slot sequence is published
/// - Push never blocks (drops message if full)
/// - Drain runs from the polling loop at leisure
pub struct LogStream<const N: usize = LOG_BUFFER_SIZE> {
    slots: [Slot; N],
    write_idx: AtomicU32,
    read_idx: AtomicU32,
    dropped: AtomicU32,
}

// SAFETY: A slot's entry is written only by the producer that reserved its
// position and read only by the consumer that reserved it, after the slot
// sequence (Release/Acquire) hands ownership over.
unsafe impl<const N: usize> Sync for LogStream<N> {}
unsafe impl<const N: usize> Send for LogStream<N> {}

impl<const N: usize> LogStream<N> {
    const MASK: usize = N - 1;

    /// Create a new empty log stream.
    pub const fn new() -> Self {
        assert!(N.is_power_of_two(), "Log buffer size must be power of 2");
        assert!(N <= 1 << 31, "Log buffer size must fit the sequence space");

        const EMPTY: Slot = Slot {
            seq: AtomicU32::new(0),
            entry: UnsafeCell::new(LogEntry {
                timestamp_us: 0,
                level: LogLevel::Info,
                len: 0,
                msg: [0; MAX_MSG_LEN],
            }),
        };

        let mut slots = [EMPTY; N];
        let mut i = 0;
        while i < N {
            slots[i].seq = AtomicU32::new(i as u32);
            i += 1;
        }

        Self {
            slots,
            write_idx: AtomicU32::new(0),
            read_idx: AtomicU32::new(0),
            dropped: AtomicU32::new(0),
        }
    }

    /// Push a log entry (RT-safe, never blocks).
    ///
    /// Returns `true` if message was queued, `false` if dropped (ring full).
    #[inline]
    pub fn push(&self, timestamp_us: i64, level: LogLevel, msg: &[u8]) -> bool {
        let mut pos = self.write_idx.load(Ordering::Relaxed);
        let slot = loop {
            let slot = &self.slots[(pos as usize) & Self::MASK];
            let seq = slot.seq.load(Ordering::Acquire);
            let diff = seq.wrapping_sub(pos) as i32;

            if diff == 0 {
                match self.write_idx.compare_exchange_weak(
                    pos,
                    pos.wrapping_add(1),
                    Ordering::Relaxed,
                    Ordering::Relaxed,
                ) {
                    Ok(_) => break slot,
                    Err(current) => pos = current,
                }
            } else if diff < 0 {
                // Slot still holds an undrained entry from the previous lap
                self.dropped.fetch_add(1, Ordering::Relaxed);
                return false;
            } else {
                pos = self.write_idx.load(Ordering::Relaxed);
            }
        };

        // SAFETY: Position `pos` is reserved by this producer and the slot is
        // not published yet, so nobody else touches the entry.
        unsafe {
            let entry = &mut *slot.entry.get();
            entry.timestamp_us = timestamp_us;
            entry.level = level;
            entry.len = msg.len().min(MAX_MSG_LEN) as u8;
            entry.msg[..entry.len as usize].copy_from_slice(&msg[..entry.len as usize]);
        }

        slot.seq.store(pos.wrapping_add(1), Ordering::Release);
        true
    }

    /// Drain next log entry.
    ///
    /// Returns `None` if no published entry is available.
    #[inline]
    pub fn drain(&self) -> Option<LogEntry> {
        let mut pos = self.read_idx.load(Ordering::Relaxed);
        let slot = loop {
            let slot = &self.slots[(pos as usize) & Self::MASK];
            let seq = slot.seq.load(Ordering::Acquire);
            let diff = seq.wrapping_sub(pos.wrapping_add(1)) as i32;

            if diff == 0 {
                match self.read_idx.compare_exchange_weak(
                    pos,
                    pos.wrapping_add(1),
                    Ordering::Relaxed,
                    Ordering::Relaxed,
                ) {
                    Ok(_) => break slot,
                    Err(current) => pos = current,
                }
            } else if diff < 0 {
                // Empty, or the producer has not published this slot yet
                return None;
            } else {
                pos = self.read_idx.load(Ordering::Relaxed);
            }
        };

        // SAFETY: Published (Acquire above) and reserved by this consumer.
        let entry = unsafe { *slot.entry.get() };

        // Free the slot for the producer one lap ahead
        slot.seq.store(pos.wrapping_add(N as u32), Ordering::Release);
        Some(entry)
    }

    /// Get count of dropped messages.
    #[inline]
    pub fn dropped(&self) -> u32 {
        self.dropped.load(Ordering::Relaxed)
    }

    /// Reset dropped counter (e.g., after reporting).
    #[inline]
    pub fn reset_dropped(&self) {
        self.dropped.store(0, Ordering::Relaxed);
    }

    /// Check if the next entry is published and ready to drain.
    #[inline]
    pub fn has_entries(&self) -> bool {
        let read = self.read_idx.load(Ordering::Relaxed);
        let slot = &self.slots[(read as usize) & Self::MASK];
        slot.seq.load(Ordering::Acquire) == read.wrapping_add(1)
    }

    /// Get number of reserved entries not yet drained.
    #[inline]
    pub fn pending(&self) -> u32 {
        let read = self.read_idx.load(Ordering::Relaxed);
        let write = self.write_idx.load(Ordering::Acquire);
        write.wrapping_sub(read)
    }
}

impl<const N: usize> Default for LogStream<N> {
    fn default() -> Self {
        Self::new()
    }
}

/// Format a message into a buffer.
///
/// Returns the number of bytes written.
#[inline]
pub fn format_to_buffer(buf: &mut [u8], args: core::fmt::Arguments<'_>) -> usize {
    struct BufWriter<'a> {
        buf: &'a mut [u8],
        pos: usize,
    }

    impl<'a> Write for BufWriter<'a> {
        fn write_str(&mut self, s: &str) -> core::fmt::Result {
            let bytes = s.as_bytes();
            let remaining = self.buf.len() - self.pos;
            let to_write = bytes.len().min(remaining);
            self.buf[self.pos..self.pos + to_write].copy_from_slice(&bytes[..to_write]);
            self.pos += to_write;
            Ok(())
        }
    }

    let mut writer = BufWriter { buf, pos: 0 };
    let _ = core::fmt::write(&mut writer, args);
    writer.pos
}

/// RT-safe log macro.
///
/// Use this from input processing instead of println!, ESP_LOGx, etc.
///
/// # Example
///
/// ```ignore
/// rt_log!(LogLevel::Info, LOG_STREAM, timestamp, "cmd {} @ {}", name, idx);
/// ```
#[macro_export]
macro_rules! rt_log {
    ($level:expr, $stream:expr, $timestamp:expr, $($arg:tt)*) => {{
        let mut buf = [0u8; $crate::logging::MAX_MSG_LEN];
        let len = $crate::logging::format_to_buffer(&mut buf, format_args!($($arg)*));
        $stream.push($timestamp, $level, &buf[..len]);
    }};
}

/// RT-safe info log.
#[macro_export]
macro_rules! rt_info {
    ($stream:expr, $timestamp:expr, $($arg:tt)*) => {
        $crate::rt_log!($crate::logging::LogLevel::Info, $stream, $timestamp, $($arg)*)
    };
}

/// RT-safe warning log.
#[macro_export]
macro_rules! rt_warn {
    ($stream:expr, $timestamp:expr, $($arg:tt)*) => {
        $crate::rt_log!($crate::logging::LogLevel::Warn, $stream, $timestamp, $($arg)*)
    };
}

/// RT-safe debug log.
#[macro_export]
macro_rules! rt_debug {
    ($stream:expr, $timestamp:expr, $($arg:tt)*) => {
        $crate::rt_log!($crate::logging::LogLevel::Debug, $stream, $timestamp, $($arg)*)
    };
}

/// Format log entry to `out`.
///
/// Format: `[timestamp_us] LEVEL: message\r\n`
pub fn write_entry(entry: &LogEntry, out: &mut dyn Write) -> core::fmt::Result {
    write!(
        out,
        "[{:10}] {}: {}\r\n",
        entry.timestamp_us,
        entry.level.as_str(),
        core::str::from_utf8(&entry.msg[..entry.len as usize]).unwrap_or("<invalid utf8>")
    )
}

/// Drain every pending entry of `stream` into `out`.
///
/// Reports and resets the dropped counter if anything was lost.
/// Returns the number of entries written.
pub fn drain_to<const N: usize>(stream: &LogStream<N>, out: &mut dyn Write) -> usize {
    let mut count = 0;

    while let Some(entry) = stream.drain() {
        let _ = write_entry(&entry, out);
        count += 1;
    }

    let dropped = stream.dropped();
    if dropped > 0 {
        let _ = write!(out, "[WARN] Dropped: {}\r\n", dropped);
        stream.reset_dropped();
    }

    count
}
