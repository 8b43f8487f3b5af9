//! SerialTerminal - demo console
//!
//! On ESP-IDF the terminal is bound to UART0 with echo enabled.
//! On a host it reads stdin and writes stdout, so the same command set can
//! be driven from a shell.

use std::cell::Cell;
use std::rc::Rc;

use serial_terminal::logging;
use serial_terminal::{SerialTerminal, TerminalConfig, TERMINAL_LOG};

/// Version string (set by build.rs, includes git hash)
const VERSION: &str = env!("VERSION_STRING");

const PROMPT: &str = "> ";

/// Commands with their one-line help
const COMMANDS: &[(&str, &str)] = &[
    ("help", "List commands"),
    ("led", "led on|off"),
    ("say", "Print the rest of the line"),
    ("add", "add <a> <b>"),
];

fn build_terminal(echo: bool) -> SerialTerminal {
    let config = TerminalConfig::new().echo(echo);
    let mut terminal = match SerialTerminal::with_config(config) {
        Ok(terminal) => terminal,
        Err(e) => {
            println!("bad terminal config ({}), using defaults", e);
            SerialTerminal::default()
        }
    };

    terminal.add_command("help", |_| {
        for (name, brief) in COMMANDS {
            println!("  {:<8} {}", name, brief);
        }
    });

    let led = Rc::new(Cell::new(false));
    terminal.add_command("led", move |args| match args.next_token() {
        Some("on") => led.set(true),
        Some("off") => led.set(false),
        Some(other) => println!("E02: invalid value '{}'", other),
        None => println!("led={}", if led.get() { "on" } else { "off" }),
    });

    terminal.add_command("say", |args| {
        println!("{}", args.remaining().unwrap_or(""));
    });

    terminal.add_command("add", |args| {
        let a = args.next_token().and_then(|t| t.parse::<i32>().ok());
        let b = args.next_token().and_then(|t| t.parse::<i32>().ok());
        match (a, b) {
            (Some(a), Some(b)) => println!("{}", a.wrapping_add(b)),
            _ => println!("E03: missing argument"),
        }
    });

    terminal.set_default_handler(|command| {
        println!("E01: unknown command '{}'", command);
    });

    terminal.set_post_command_handler(|| {
        use std::io::Write;
        print!("{}", PROMPT);
        let _ = std::io::stdout().flush();
    });

    terminal
}

#[cfg(not(target_os = "espidf"))]
mod host {
    use std::io::{Read, Write};
    use std::sync::OnceLock;
    use std::time::Instant;

    use serial_terminal::SliceSource;

    use super::*;

    static START: OnceLock<Instant> = OnceLock::new();

    fn timestamp_us() -> i64 {
        START.get_or_init(Instant::now).elapsed().as_micros() as i64
    }

    /// `core::fmt::Write` over a std stream
    struct IoSink<W: Write>(W);

    impl<W: Write> core::fmt::Write for IoSink<W> {
        fn write_str(&mut self, s: &str) -> core::fmt::Result {
            self.0.write_all(s.as_bytes()).map_err(|_| core::fmt::Error)?;
            self.0.flush().map_err(|_| core::fmt::Error)
        }
    }

    pub fn run() -> std::io::Result<()> {
        // The tty already echoes on the host.
        let mut terminal = build_terminal(false);
        terminal.set_log_sink(&TERMINAL_LOG, timestamp_us);

        let mut out = IoSink(std::io::stdout());
        let mut log_out = IoSink(std::io::stderr());
        println!("{}", VERSION);
        println!("Type 'help' for commands.");
        print!("{}", PROMPT);
        std::io::stdout().flush()?;

        let mut stdin = std::io::stdin().lock();
        let mut chunk = [0u8; 64];
        loop {
            let n = stdin.read(&mut chunk)?;
            if n == 0 {
                break;
            }
            terminal.read_serial(&mut SliceSource::new(&chunk[..n]), &mut out);
            logging::drain_to(&TERMINAL_LOG, &mut log_out);
        }

        let stats = terminal.stats();
        println!();
        println!(
            "lines={} matched={} unmatched={} dropped={}",
            stats.lines, stats.matched, stats.unmatched, stats.dropped_bytes
        );
        Ok(())
    }
}

#[cfg(target_os = "espidf")]
mod target {
    use esp_idf_svc::hal::delay::NON_BLOCK;
    use esp_idf_svc::hal::gpio;
    use esp_idf_svc::hal::peripherals::Peripherals;
    use esp_idf_svc::hal::uart::{self, UartDriver};
    use esp_idf_svc::hal::units::Hertz;
    use esp_idf_svc::sys::EspError;

    use serial_terminal::ByteSource;

    use super::*;

    const BAUD_RATE: u32 = 115_200;

    fn timestamp_us() -> i64 {
        // SAFETY: esp_timer_get_time is always safe to call
        unsafe { esp_idf_svc::sys::esp_timer_get_time() }
    }

    /// UART receive side as terminal byte source.
    /// Driver errors read as "nothing available".
    struct UartRx<'a, 'd>(&'a UartDriver<'d>);

    impl ByteSource for UartRx<'_, '_> {
        fn available(&mut self) -> usize {
            self.0.remaining_read().unwrap_or(0)
        }

        fn read(&mut self) -> Option<u8> {
            let mut byte = [0u8; 1];
            match self.0.read(&mut byte, NON_BLOCK) {
                Ok(1) => Some(byte[0]),
                _ => None,
            }
        }
    }

    /// UART transmit side as echo sink. Write errors drop echo.
    struct UartTx<'a, 'd>(&'a UartDriver<'d>);

    impl core::fmt::Write for UartTx<'_, '_> {
        fn write_str(&mut self, s: &str) -> core::fmt::Result {
            self.0.write(s.as_bytes()).map(|_| ()).map_err(|_| core::fmt::Error)
        }
    }

    pub fn run() -> Result<(), EspError> {
        esp_idf_svc::sys::link_patches();

        let peripherals = Peripherals::take()?;
        let pins = peripherals.pins;
        let config = uart::config::Config::default().baudrate(Hertz(BAUD_RATE));

        #[cfg(feature = "esp32p4")]
        let (tx, rx) = (pins.gpio37, pins.gpio38);
        #[cfg(not(feature = "esp32p4"))]
        let (tx, rx) = (pins.gpio43, pins.gpio44);

        let driver = UartDriver::new(
            peripherals.uart0,
            tx,
            rx,
            Option::<gpio::AnyIOPin>::None, // CTS
            Option::<gpio::AnyIOPin>::None, // RTS
            &config,
        )?;
        let mut rx = UartRx(&driver);
        let mut tx = UartTx(&driver);

        let mut terminal = build_terminal(true);
        terminal.set_log_sink(&TERMINAL_LOG, timestamp_us);

        {
            use core::fmt::Write;
            let _ = write!(tx, "\r\n{}\r\nType 'help' for commands.\r\n{}", VERSION, PROMPT);
        }

        loop {
            if rx.available() == 0 {
                // SAFETY: vTaskDelay is always safe to call from a task
                unsafe {
                    esp_idf_svc::sys::vTaskDelay(10);
                }
                continue;
            }

            terminal.read_serial(&mut rx, &mut tx);
            logging::drain_to(&TERMINAL_LOG, &mut tx);
        }
    }
}

#[cfg(target_os = "espidf")]
fn main() {
    if let Err(e) = target::run() {
        println!("terminal stopped: {}", e);
    }
}

#[cfg(not(target_os = "espidf"))]
fn main() {
    if let Err(e) = host::run() {
        eprintln!("terminal stopped: {}", e);
    }
}
