//! Global log stream instance.

use crate::logging::LogStream;

/// Terminal log stream.
///
/// The terminal pushes from the polling loop, the binary drains it between
/// polls. Any thread may push; each slot is published before it drains.
pub static TERMINAL_LOG: LogStream = LogStream::new();
