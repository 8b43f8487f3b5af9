//! Tokenizer tests for dispatched lines

use serial_terminal::Tokens;

#[test]
fn test_first_token_is_command() {
    let mut tokens = Tokens::new("LED 1", b' ');
    assert_eq!(tokens.next_token(), Some("LED"));
    assert_eq!(tokens.next_token(), Some("1"));
    assert_eq!(tokens.next_token(), None);
}

#[test]
fn test_empty_line_has_no_token() {
    let mut tokens = Tokens::new("", b' ');
    assert_eq!(tokens.next_token(), None);
    assert_eq!(tokens.remaining(), None);
}

#[test]
fn test_remaining_after_command() {
    let mut tokens = Tokens::new("say hello world", b' ');
    assert_eq!(tokens.next_token(), Some("say"));
    assert_eq!(tokens.remaining(), Some("hello world"));
}

#[test]
fn test_remaining_after_last_token_is_none() {
    let mut tokens = Tokens::new("set wpm", b' ');
    tokens.next_token();
    tokens.next_token();
    assert_eq!(tokens.remaining(), None);
}

#[test]
fn test_rest_does_not_consume() {
    let mut tokens = Tokens::new("a b c", b' ');
    tokens.next_token();
    assert_eq!(tokens.rest(), "b c");
    assert_eq!(tokens.next_token(), Some("b"));
}

#[test]
fn test_other_whitespace_is_not_a_delimiter() {
    let mut tokens = Tokens::new("a,b c", b',');
    assert_eq!(tokens.next_token(), Some("a"));
    assert_eq!(tokens.next_token(), Some("b c"));
}

#[test]
fn test_non_ascii_delimiter_never_splits() {
    let mut tokens = Tokens::new("caf\u{e9} ok", 0xC3);
    assert_eq!(tokens.next_token(), Some("caf\u{e9} ok"));
    assert_eq!(tokens.next_token(), None);
}
