//! Terminal construction parameters

use super::error::ConfigError;

/// Backspace control codes (^H and DEL)
pub const BACKSPACE_CODES: [u8; 2] = [0x08, 0x7F];

/// Check for a storable input byte
#[inline]
pub const fn is_printable(c: u8) -> bool {
    matches!(c, 0x20..=0x7E)
}

/// Check for ^H or DEL
#[inline]
pub const fn is_backspace(c: u8) -> bool {
    c == BACKSPACE_CODES[0] || c == BACKSPACE_CODES[1]
}

/// Terminal configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TerminalConfig {
    /// Byte that completes a line
    pub newline: u8,
    /// Byte separating tokens
    pub delimiter: u8,
    /// Echo input back to the sink
    pub echo: bool,
}

impl TerminalConfig {
    /// `\n` terminated, space delimited, echo off
    pub const fn new() -> Self {
        Self {
            newline: b'\n',
            delimiter: b' ',
            echo: false,
        }
    }

    pub const fn newline(mut self, newline: u8) -> Self {
        self.newline = newline;
        self
    }

    pub const fn delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = delimiter;
        self
    }

    pub const fn echo(mut self, echo: bool) -> Self {
        self.echo = echo;
        self
    }

    /// Check the configuration can drive a terminal
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.newline.is_ascii() || !self.delimiter.is_ascii() {
            return Err(ConfigError::NonAscii);
        }
        if self.newline == self.delimiter {
            return Err(ConfigError::SameChar);
        }
        if !is_printable(self.delimiter) {
            return Err(ConfigError::DelimiterNotPrintable);
        }
        if is_backspace(self.newline) {
            return Err(ConfigError::NewlineIsBackspace);
        }
        Ok(())
    }
}

impl Default for TerminalConfig {
    fn default() -> Self {
        Self::new()
    }
}
