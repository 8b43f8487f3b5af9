//! Terminal counters

/// Observable counters for silently handled conditions
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TerminalStats {
    /// Lines handed to the dispatcher
    pub lines: u32,
    /// Lines whose command matched a table entry
    pub matched: u32,
    /// Lines whose command matched nothing
    pub unmatched: u32,
    /// Lines without a command token
    pub empty: u32,
    /// Printable bytes dropped because the buffer was full
    pub dropped_bytes: u32,
}

impl TerminalStats {
    pub const fn new() -> Self {
        Self {
            lines: 0,
            matched: 0,
            unmatched: 0,
            empty: 0,
            dropped_bytes: 0,
        }
    }
}
