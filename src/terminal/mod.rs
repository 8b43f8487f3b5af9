//! Serial command terminal
//!
//! Polled from the caller's loop - no dedicated task.
//! Fixed-size line buffer; the command table is the only heap allocation.

pub mod commands;
pub mod config;
pub mod error;
pub mod line_buffer;
pub mod stats;
pub mod terminal;
pub mod tokenizer;

pub use commands::{CommandEntry, Dispatch, Dispatcher, COMMAND_NAME_LEN};
pub use config::TerminalConfig;
pub use error::ConfigError;
pub use line_buffer::{LineBuffer, RX_BUFFER_SIZE};
pub use stats::TerminalStats;
pub use terminal::SerialTerminal;
pub use tokenizer::Tokens;
