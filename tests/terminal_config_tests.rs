//! Terminal configuration tests

use serial_terminal::{ConfigError, SerialTerminal, TerminalConfig};

#[test]
fn test_default_config() {
    let config = TerminalConfig::default();
    assert_eq!(config.newline, b'\n');
    assert_eq!(config.delimiter, b' ');
    assert!(!config.echo);
    assert_eq!(config.validate(), Ok(()));
}

#[test]
fn test_builder() {
    let config = TerminalConfig::new().newline(b'\r').delimiter(b',').echo(true);
    assert_eq!(config.newline, b'\r');
    assert_eq!(config.delimiter, b',');
    assert!(config.echo);

    let terminal: SerialTerminal = SerialTerminal::with_config(config).unwrap();
    assert!(terminal.echo());
    assert_eq!(terminal.newline(), b'\r');
    assert_eq!(terminal.delimiter(), b',');
}

#[test]
fn test_printable_newline_is_allowed() {
    let config = TerminalConfig::new().newline(b';');
    assert_eq!(config.validate(), Ok(()));
}

#[test]
fn test_invalid_configs() {
    let cases = [
        (TerminalConfig::new().delimiter(b'\n'), ConfigError::SameChar),
        (TerminalConfig::new().delimiter(0xE9), ConfigError::NonAscii),
        (TerminalConfig::new().delimiter(b'\t'), ConfigError::DelimiterNotPrintable),
        (TerminalConfig::new().newline(0x7F), ConfigError::NewlineIsBackspace),
        (TerminalConfig::new().newline(0x08), ConfigError::NewlineIsBackspace),
    ];

    for (config, expected) in cases {
        assert_eq!(config.validate(), Err(expected));
        assert!(SerialTerminal::<32, 8>::with_config(config).is_err());
    }
}

#[test]
fn test_error_display() {
    let msg = ConfigError::SameChar.to_string();
    assert!(msg.starts_with("E02"));
    assert!(msg.contains("newline and delimiter"));
}
