//! Location reporting of raised unchecked errors.
//!
//! The panic hook is process-wide, so this suite holds a single test.

use std::io;
use std::panic;
use std::sync::{Arc, Mutex};

use lambars_fallible::prelude::*;

#[test]
fn raised_error_reports_location_of_caller() {
    let location = Arc::new(Mutex::new(None));
    let recorded = Arc::clone(&location);
    let previous = panic::take_hook();
    panic::set_hook(Box::new(move |info| {
        if let Ok(mut slot) = recorded.lock() {
            *slot = info
                .location()
                .map(|location| (location.file().to_string(), location.line()));
        }
    }));

    let handler: ExceptionHandler<io::Error, i32> = ExceptionHandler::new();
    let line = line!() + 1;
    let outcome = catch_unchecked(|| handler.uncheck(Err(io::Error::other("boom"))));

    panic::set_hook(previous);

    assert_eq!(outcome.unwrap_err().to_string(), "wrapped error: boom");
    let (file, reported_line) = location.lock().unwrap().clone().unwrap();
    assert!(file.ends_with("unchecked_panic_tests.rs"), "reported {file}");
    assert_eq!(reported_line, line);
}
