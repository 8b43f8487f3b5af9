//! Command table and dispatcher

use alloc::boxed::Box;
use alloc::vec::Vec;
use heapless::String;

use super::tokenizer::Tokens;

/// Default maximum command name length
pub const COMMAND_NAME_LEN: usize = 8;

/// Command handler, pulls its arguments from the tokenizer cursor
pub type CommandFn = Box<dyn FnMut(&mut Tokens<'_>)>;

/// Fallback handler, receives the unmatched command token
pub type DefaultFn = Box<dyn FnMut(&str)>;

/// Hook run after every dispatched line
pub type PostDispatchFn = Box<dyn FnMut()>;

/// Command descriptor
pub struct CommandEntry<const N: usize = COMMAND_NAME_LEN> {
    name: String<N>,
    handler: CommandFn,
}

impl<const N: usize> CommandEntry<N> {
    /// Create an entry, truncating `name` to at most `N` bytes
    pub fn new(name: &str, handler: CommandFn) -> Self {
        Self {
            name: truncate_name(name),
            handler,
        }
    }

    /// Stored (possibly truncated) name
    pub fn name(&self) -> &str {
        self.name.as_str()
    }

    /// Bounded comparison: only the first `N` bytes of `token` count.
    pub fn matches(&self, token: &str) -> bool {
        let token = token.as_bytes();
        let bounded = &token[..token.len().min(N)];
        bounded == self.name.as_bytes()
    }
}

fn truncate_name<const N: usize>(name: &str) -> String<N> {
    let mut out = String::new();
    for c in name.chars() {
        if out.push(c).is_err() {
            break;
        }
    }
    out
}

/// What a dispatch did with a line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dispatch {
    /// Line had no command token
    Empty,
    /// Command at this table index ran
    Matched(usize),
    /// No entry matched (default handler ran if installed)
    Unmatched,
}

/// Ordered command table plus fallback and post-dispatch hooks
pub struct Dispatcher<const N: usize = COMMAND_NAME_LEN> {
    commands: Vec<CommandEntry<N>>,
    default_handler: Option<DefaultFn>,
    post_dispatch: Option<PostDispatchFn>,
    delimiter: u8,
}

impl<const N: usize> Dispatcher<N> {
    /// Create an empty dispatcher splitting on `delimiter`
    pub const fn new(delimiter: u8) -> Self {
        Self {
            commands: Vec::new(),
            default_handler: None,
            post_dispatch: None,
            delimiter,
        }
    }

    /// Append a command. Names longer than `N` are truncated.
    ///
    /// Duplicates are allowed; the first registered one wins.
    pub fn register<F>(&mut self, name: &str, handler: F)
    where
        F: FnMut(&mut Tokens<'_>) + 'static,
    {
        self.commands.push(CommandEntry::new(name, Box::new(handler)));
    }

    /// Install the fallback for unmatched commands, replacing any previous one.
    ///
    /// The fallback gets the command token only, no tokenizer cursor.
    pub fn set_default_handler<F>(&mut self, handler: F)
    where
        F: FnMut(&str) + 'static,
    {
        self.default_handler = Some(Box::new(handler));
    }

    /// Install the post-dispatch hook, replacing any previous one
    pub fn set_post_dispatch<F>(&mut self, hook: F)
    where
        F: FnMut() + 'static,
    {
        self.post_dispatch = Some(Box::new(hook));
    }

    /// Tokenize `line` and run the matching handler.
    ///
    /// The post-dispatch hook runs on every call, including empty lines.
    pub fn dispatch(&mut self, line: &str) -> Dispatch {
        let mut tokens = Tokens::new(line, self.delimiter);

        let outcome = match tokens.next_token() {
            None => Dispatch::Empty,
            Some(command) => {
                match self.commands.iter().position(|c| c.matches(command)) {
                    Some(idx) => {
                        (self.commands[idx].handler)(&mut tokens);
                        Dispatch::Matched(idx)
                    }
                    None => {
                        if let Some(handler) = self.default_handler.as_mut() {
                            handler(command);
                        }
                        Dispatch::Unmatched
                    }
                }
            }
        };

        if let Some(hook) = self.post_dispatch.as_mut() {
            hook();
        }

        outcome
    }

    /// Registered entries in match order
    pub fn commands(&self) -> &[CommandEntry<N>] {
        &self.commands
    }

    /// Get all command names
    pub fn command_names(&self) -> impl Iterator<Item = &str> {
        self.commands.iter().map(|c| c.name())
    }

    /// Number of registered commands
    pub fn len(&self) -> usize {
        self.commands.len()
    }

    /// Check if no command is registered
    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Delimiter used to split lines
    pub fn delimiter(&self) -> u8 {
        self.delimiter
    }
}
