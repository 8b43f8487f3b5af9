//! Serial terminal: line accumulation, echo and dispatch
//!
//! Bytes come in one at a time through [`SerialTerminal::feed_byte`] or in
//! bulk from a [`ByteSource`] through [`SerialTerminal::read_serial`]. On the
//! newline byte the completed line is tokenized, dispatched and the buffer
//! is reset. Nothing here ever fails: overflow drops bytes, unknown commands
//! go to the default handler, empty lines only run the post-dispatch hook.

use core::fmt::Write;

use super::commands::{Dispatch, Dispatcher, COMMAND_NAME_LEN};
use super::config::{is_backspace, is_printable, TerminalConfig};
use super::error::ConfigError;
use super::line_buffer::{LineBuffer, RX_BUFFER_SIZE};
use super::stats::TerminalStats;
use super::tokenizer::Tokens;
use crate::io::ByteSource;
use crate::logging::LogStream;

/// Erase the last echoed character: back, space, back
const ERASE_SEQUENCE: &str = "\x08 \x08";

/// Log ring plus the clock used to timestamp entries
#[derive(Clone, Copy)]
struct LogSink {
    stream: &'static LogStream,
    clock: fn() -> i64,
}

/// Serial command terminal
///
/// `C` is the line buffer capacity, `N` the maximum command name length.
pub struct SerialTerminal<const C: usize = RX_BUFFER_SIZE, const N: usize = COMMAND_NAME_LEN> {
    line: LineBuffer<C>,
    dispatcher: Dispatcher<N>,
    newline: u8,
    echo: bool,
    /// Set once a byte was dropped on the current line
    overflowed: bool,
    stats: TerminalStats,
    log: Option<LogSink>,
}

impl SerialTerminal {
    /// Create a terminal with the default buffer and name sizes.
    ///
    /// No validation is done; see [`SerialTerminal::with_config`].
    pub fn new(newline: u8, delimiter: u8) -> Self {
        Self::with_chars(newline, delimiter)
    }
}

impl Default for SerialTerminal {
    fn default() -> Self {
        Self::new(b'\n', b' ')
    }
}

impl<const C: usize, const N: usize> SerialTerminal<C, N> {
    /// Create a terminal of any size, unchecked
    pub fn with_chars(newline: u8, delimiter: u8) -> Self {
        Self {
            line: LineBuffer::new(),
            dispatcher: Dispatcher::new(delimiter),
            newline,
            echo: false,
            overflowed: false,
            stats: TerminalStats::new(),
            log: None,
        }
    }

    /// Create a terminal from a validated configuration
    pub fn with_config(config: TerminalConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let mut terminal = Self::with_chars(config.newline, config.delimiter);
        terminal.echo = config.echo;
        Ok(terminal)
    }

    /// Register a command. Longer names are truncated to `N` bytes.
    pub fn add_command<F>(&mut self, name: &str, handler: F)
    where
        F: FnMut(&mut Tokens<'_>) + 'static,
    {
        self.dispatcher.register(name, handler);
    }

    /// Handler for lines whose command matches nothing.
    ///
    /// It only receives the command token; the rest of the line is not
    /// available to it.
    pub fn set_default_handler<F>(&mut self, handler: F)
    where
        F: FnMut(&str) + 'static,
    {
        self.dispatcher.set_default_handler(handler);
    }

    /// Hook run after every dispatched line
    pub fn set_post_command_handler<F>(&mut self, hook: F)
    where
        F: FnMut() + 'static,
    {
        self.dispatcher.set_post_dispatch(hook);
    }

    /// Enable or disable echo (disabled by default)
    pub fn set_echo(&mut self, echo: bool) {
        self.echo = echo;
    }

    pub fn echo(&self) -> bool {
        self.echo
    }

    /// Attach a log ring; `clock` returns microseconds
    pub fn set_log_sink(&mut self, stream: &'static LogStream, clock: fn() -> i64) {
        self.log = Some(LogSink { stream, clock });
    }

    /// Drain everything `source` has available.
    ///
    /// Returns the number of lines dispatched.
    pub fn read_serial<S: ByteSource + ?Sized>(
        &mut self,
        source: &mut S,
        out: &mut dyn Write,
    ) -> usize {
        let mut lines = 0;

        while source.available() > 0 {
            let Some(c) = source.read() else { break };
            if self.feed_byte(c, out).is_some() {
                lines += 1;
            }
        }

        lines
    }

    /// Process a single input byte
    ///
    /// Returns the dispatch outcome if this byte completed a line.
    pub fn feed_byte(&mut self, c: u8, out: &mut dyn Write) -> Option<Dispatch> {
        if c == self.newline {
            if self.echo {
                let _ = out.write_str("\r\n");
            }
            let snapshot = self.line.clone();
            let outcome = self.dispatch(snapshot.as_str());
            self.reset();
            return Some(outcome);
        }

        if is_backspace(c) {
            if self.line.backspace() && self.echo {
                let _ = out.write_str(ERASE_SEQUENCE);
            }
        } else if is_printable(c) {
            if self.line.push(c) {
                if self.echo {
                    let _ = out.write_char(c as char);
                }
            } else {
                self.note_overflow();
            }
        }

        None
    }

    /// Tokenize and dispatch a completed line.
    ///
    /// Does not touch the line buffer.
    pub fn dispatch(&mut self, line: &str) -> Dispatch {
        let outcome = self.dispatcher.dispatch(line);

        self.stats.lines = self.stats.lines.wrapping_add(1);
        match outcome {
            Dispatch::Empty => self.stats.empty = self.stats.empty.wrapping_add(1),
            Dispatch::Matched(_) => self.stats.matched = self.stats.matched.wrapping_add(1),
            Dispatch::Unmatched => self.stats.unmatched = self.stats.unmatched.wrapping_add(1),
        }

        if let Some(log) = self.log {
            match outcome {
                Dispatch::Matched(idx) => {
                    let name = self.dispatcher.commands()[idx].name();
                    crate::rt_debug!(log.stream, (log.clock)(), "cmd {}", name);
                }
                Dispatch::Unmatched => {
                    let mut tokens = Tokens::new(line, self.dispatcher.delimiter());
                    if let Some(command) = tokens.next_token() {
                        crate::rt_info!(log.stream, (log.clock)(), "unknown command {}", command);
                    }
                }
                Dispatch::Empty => {}
            }
        }

        outcome
    }

    /// Empty the line buffer. Idempotent.
    pub fn reset(&mut self) {
        self.line.clear();
        self.overflowed = false;
    }

    fn note_overflow(&mut self) {
        self.stats.dropped_bytes = self.stats.dropped_bytes.wrapping_add(1);

        if !self.overflowed {
            self.overflowed = true;
            if let Some(log) = self.log {
                crate::rt_warn!(
                    log.stream,
                    (log.clock)(),
                    "rx overflow, dropping input past {} bytes",
                    C
                );
            }
        }
    }

    /// Text accumulated so far on the current line
    pub fn pending(&self) -> &str {
        self.line.as_str()
    }

    /// Current line buffer
    pub fn line(&self) -> &LineBuffer<C> {
        &self.line
    }

    /// Command table
    pub fn dispatcher(&self) -> &Dispatcher<N> {
        &self.dispatcher
    }

    pub fn newline(&self) -> u8 {
        self.newline
    }

    pub fn delimiter(&self) -> u8 {
        self.dispatcher.delimiter()
    }

    pub fn stats(&self) -> TerminalStats {
        self.stats
    }

    pub fn reset_stats(&mut self) {
        self.stats = TerminalStats::new();
    }
}
