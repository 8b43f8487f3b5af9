//! # SerialTerminal
//!
//! Line-oriented command terminal for serial consoles.
//!
//! ## Architecture
//!
//! ```text
//! ByteSource ─▶ LineBuffer ─(newline)─▶ Tokens ─▶ Dispatcher ─▶ handler
//!                   │                                  └──────▶ post hook
//!                   └─ echo ─▶ core::fmt::Write
//! ```
//!
//! - Input is polled, never pushed: the caller owns the loop
//! - Overflow, unknown commands and empty lines are handled silently
//! - Handlers pull arguments from the [`Tokens`] cursor of the current line

#![cfg_attr(not(test), no_std)]

extern crate alloc;

pub mod io;
pub mod logging;
pub mod log_globals;
pub mod terminal;

pub use io::{ByteSource, NullSink, SliceSource};
pub use log_globals::TERMINAL_LOG;
pub use terminal::{
    ConfigError, Dispatch, SerialTerminal, TerminalConfig, TerminalStats, Tokens,
};
