//! Command table and dispatcher tests

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use serial_terminal::terminal::commands::{CommandEntry, Dispatch, Dispatcher, COMMAND_NAME_LEN};
use serial_terminal::Tokens;

fn noop(_: &mut Tokens<'_>) {}

fn counter() -> Rc<Cell<u32>> {
    Rc::new(Cell::new(0))
}

#[test]
fn test_registered_command_runs_once() {
    let mut dispatcher: Dispatcher = Dispatcher::new(b' ');
    let led = counter();
    let other = counter();

    let c = led.clone();
    dispatcher.register("LED", move |_| c.set(c.get() + 1));
    let c = other.clone();
    dispatcher.register("OTHER", move |_| c.set(c.get() + 1));

    assert_eq!(dispatcher.dispatch("LED"), Dispatch::Matched(0));
    assert_eq!(led.get(), 1);
    assert_eq!(other.get(), 0);
}

#[test]
fn test_first_registered_duplicate_wins() {
    let mut dispatcher: Dispatcher = Dispatcher::new(b' ');
    let first = counter();
    let second = counter();

    let c = first.clone();
    dispatcher.register("dup", move |_| c.set(c.get() + 1));
    let c = second.clone();
    dispatcher.register("dup", move |_| c.set(c.get() + 1));

    assert_eq!(dispatcher.len(), 2);
    assert_eq!(dispatcher.dispatch("dup"), Dispatch::Matched(0));
    assert_eq!(first.get(), 1);
    assert_eq!(second.get(), 0);
}

#[test]
fn test_default_handler_gets_unmatched_token() {
    let mut dispatcher: Dispatcher = Dispatcher::new(b' ');
    let seen = Rc::new(RefCell::new(Vec::<String>::new()));

    dispatcher.register("LED", |_| panic!("LED should not run"));
    let s = seen.clone();
    dispatcher.set_default_handler(move |cmd| s.borrow_mut().push(cmd.to_string()));

    assert_eq!(dispatcher.dispatch("FOO bar"), Dispatch::Unmatched);
    assert_eq!(*seen.borrow(), ["FOO"]);
}

#[test]
fn test_unmatched_without_default_is_silent() {
    let mut dispatcher: Dispatcher = Dispatcher::new(b' ');
    assert_eq!(dispatcher.dispatch("nothing"), Dispatch::Unmatched);
}

#[test]
fn test_default_handler_is_replaced() {
    let mut dispatcher: Dispatcher = Dispatcher::new(b' ');
    let old = counter();
    let new = counter();

    let c = old.clone();
    dispatcher.set_default_handler(move |_| c.set(c.get() + 1));
    let c = new.clone();
    dispatcher.set_default_handler(move |_| c.set(c.get() + 1));

    dispatcher.dispatch("x");
    assert_eq!(old.get(), 0);
    assert_eq!(new.get(), 1);
}

#[test]
fn test_post_dispatch_runs_for_every_line() {
    let mut dispatcher: Dispatcher = Dispatcher::new(b' ');
    let hook = counter();

    dispatcher.register("a", |_| {});
    let c = hook.clone();
    dispatcher.set_post_dispatch(move || c.set(c.get() + 1));

    assert_eq!(dispatcher.dispatch("a"), Dispatch::Matched(0));
    assert_eq!(dispatcher.dispatch("b"), Dispatch::Unmatched);
    assert_eq!(dispatcher.dispatch(""), Dispatch::Empty);
    assert_eq!(dispatcher.dispatch("    "), Dispatch::Empty);
    assert_eq!(hook.get(), 4);
}

#[test]
fn test_empty_line_skips_matching() {
    let mut dispatcher: Dispatcher = Dispatcher::new(b' ');
    let default = counter();

    let c = default.clone();
    dispatcher.set_default_handler(move |_| c.set(c.get() + 1));

    assert_eq!(dispatcher.dispatch("   "), Dispatch::Empty);
    assert_eq!(default.get(), 0);
}

#[test]
fn test_handler_reads_arguments() {
    let mut dispatcher: Dispatcher = Dispatcher::new(b' ');
    let args = Rc::new(RefCell::new(Vec::<String>::new()));

    let a = args.clone();
    dispatcher.register("set", move |tokens| {
        while let Some(t) = tokens.next_token() {
            a.borrow_mut().push(t.to_string());
        }
    });

    dispatcher.dispatch("set  wpm   25");
    assert_eq!(*args.borrow(), ["wpm", "25"]);
}

#[test]
fn test_long_name_truncated() {
    let entry = CommandEntry::<COMMAND_NAME_LEN>::new("VERYLONGNAME", Box::new(noop));
    assert_eq!(entry.name(), "VERYLONG");

    // Bounded comparison: only the first 8 bytes of the token count
    assert!(entry.matches("VERYLONG"));
    assert!(entry.matches("VERYLONGNAME"));
    assert!(entry.matches("VERYLONGXYZ"));
    assert!(!entry.matches("VERYLON"));
}

#[test]
fn test_short_name_requires_exact_token() {
    let entry = CommandEntry::<8>::new("LED", Box::new(noop));
    assert!(entry.matches("LED"));
    assert!(!entry.matches("LEDX"));
    assert!(!entry.matches("LE"));
    assert!(!entry.matches("led"));
}

#[test]
fn test_command_names_in_registration_order() {
    let mut dispatcher: Dispatcher = Dispatcher::new(b' ');
    assert!(dispatcher.is_empty());

    dispatcher.register("help", |_| {});
    dispatcher.register("set", |_| {});
    dispatcher.register("show", |_| {});

    let names: Vec<&str> = dispatcher.command_names().collect();
    assert_eq!(names, ["help", "set", "show"]);
}

#[test]
fn test_custom_delimiter() {
    let mut dispatcher: Dispatcher = Dispatcher::new(b',');
    let value = Rc::new(RefCell::new(String::new()));

    let v = value.clone();
    dispatcher.register("LED", move |tokens| {
        *v.borrow_mut() = tokens.next_token().unwrap_or("").to_string();
    });

    assert_eq!(dispatcher.dispatch("LED,on"), Dispatch::Matched(0));
    assert_eq!(*value.borrow(), "on");
    assert_eq!(dispatcher.dispatch("LED on"), Dispatch::Unmatched);
}
