//! Resumable tokenizer over a completed line
//!
//! Splits on a single delimiter byte. Runs of delimiters are collapsed when
//! extracting tokens; [`Tokens::remaining`] hands back the raw rest.

/// Tokenizer cursor for one dispatched line.
///
/// Borrows the line, so it cannot outlive the dispatch that created it.
#[derive(Debug, Clone)]
pub struct Tokens<'a> {
    rest: &'a str,
    delimiter: u8,
}

impl<'a> Tokens<'a> {
    /// Start tokenizing `line`
    pub fn new(line: &'a str, delimiter: u8) -> Self {
        Self { rest: line, delimiter }
    }

    /// Next token, or `None` once the line is exhausted.
    ///
    /// Leading delimiters are skipped and the single delimiter ending the
    /// token is consumed.
    pub fn next_token(&mut self) -> Option<&'a str> {
        let bytes = self.rest.as_bytes();
        let start = bytes
            .iter()
            .position(|&b| !self.is_delimiter(b))
            .unwrap_or(bytes.len());
        let s = &self.rest[start..];

        if s.is_empty() {
            self.rest = s;
            return None;
        }

        match s.bytes().position(|b| self.is_delimiter(b)) {
            Some(end) => {
                self.rest = &s[end + 1..];
                Some(&s[..end])
            }
            None => {
                self.rest = &s[s.len()..];
                Some(s)
            }
        }
    }

    /// Everything after the cursor, delimiters included.
    ///
    /// Returns `None` if nothing is left. Exhausts the cursor.
    pub fn remaining(&mut self) -> Option<&'a str> {
        let rest = self.rest;
        self.rest = &rest[rest.len()..];
        if rest.is_empty() {
            None
        } else {
            Some(rest)
        }
    }

    /// Peek at the unconsumed text without moving the cursor
    pub fn rest(&self) -> &'a str {
        self.rest
    }

    // Non-ASCII delimiters never split, so slicing stays on char boundaries.
    fn is_delimiter(&self, b: u8) -> bool {
        self.delimiter.is_ascii() && b == self.delimiter
    }

    /// Delimiter this cursor splits on
    pub fn delimiter(&self) -> u8 {
        self.delimiter
    }
}

impl<'a> Iterator for Tokens<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_token()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collapses_delimiter_runs() {
        let mut tokens = Tokens::new("  set   wpm 25 ", b' ');
        assert_eq!(tokens.next_token(), Some("set"));
        assert_eq!(tokens.next_token(), Some("wpm"));
        assert_eq!(tokens.next_token(), Some("25"));
        assert_eq!(tokens.next_token(), None);
        assert_eq!(tokens.next_token(), None);
    }

    #[test]
    fn test_remaining_keeps_inner_delimiters() {
        let mut tokens = Tokens::new("say  hello there", b' ');
        assert_eq!(tokens.next_token(), Some("say"));
        assert_eq!(tokens.remaining(), Some(" hello there"));
        assert_eq!(tokens.remaining(), None);
        assert_eq!(tokens.next_token(), None);
    }

    #[test]
    fn test_delimiter_only_line() {
        let mut tokens = Tokens::new(",,,", b',');
        assert_eq!(tokens.next_token(), None);
        assert_eq!(tokens.remaining(), None);
    }

    #[test]
    fn test_custom_delimiter() {
        let tokens = Tokens::new("LED,1,on", b',');
        let collected: Vec<&str> = tokens.collect();
        assert_eq!(collected, ["LED", "1", "on"]);
    }
}
