//! Terminal configuration error types

/// Configuration error with code and message
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigError {
    /// E01: Newline or delimiter is not ASCII
    NonAscii,
    /// E02: Newline and delimiter are the same byte
    SameChar,
    /// E03: Delimiter can never be typed
    DelimiterNotPrintable,
    /// E04: Newline would shadow backspace
    NewlineIsBackspace,
}

impl ConfigError {
    /// Get error code string
    pub fn code(&self) -> &'static str {
        match self {
            Self::NonAscii => "E01",
            Self::SameChar => "E02",
            Self::DelimiterNotPrintable => "E03",
            Self::NewlineIsBackspace => "E04",
        }
    }

    /// Get error message
    pub fn message(&self) -> &'static str {
        match self {
            Self::NonAscii => "character is not ASCII",
            Self::SameChar => "newline and delimiter are equal",
            Self::DelimiterNotPrintable => "delimiter is not printable",
            Self::NewlineIsBackspace => "newline is a backspace code",
        }
    }
}

impl core::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}: {}", self.code(), self.message())
    }
}
