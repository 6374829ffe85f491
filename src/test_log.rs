//! Captures `log` records emitted on the current thread.
//!
//! The logger is installed once for the whole test binary. Records are kept
//! per thread, so tests running in parallel only see their own output.

use log::{Level, LevelFilter, Log, Metadata, Record};
use std::cell::RefCell;
use std::sync::Once;

struct CaptureLogger;

thread_local! {
    static RECORDS: RefCell<Vec<(Level, String)>> = RefCell::new(Vec::new());
}

impl Log for CaptureLogger {
    fn enabled(&self, _metadata: &Metadata) -> bool {
        true
    }

    fn log(&self, record: &Record) {
        let entry = (record.level(), record.args().to_string());
        let _ = RECORDS.try_with(|records| records.borrow_mut().push(entry));
    }

    fn flush(&self) {}
}

static LOGGER: CaptureLogger = CaptureLogger;
static INIT: Once = Once::new();

/// Runs `f` and returns its result with the records it logged.
pub fn capture<R>(f: impl FnOnce() -> R) -> (R, Vec<(Level, String)>) {
    INIT.call_once(|| {
        if log::set_logger(&LOGGER).is_ok() {
            log::set_max_level(LevelFilter::Trace);
        }
    });

    RECORDS.with(|records| records.borrow_mut().clear());
    let result = f();
    let records = RECORDS.with(|records| records.borrow_mut().drain(..).collect());
    (result, records)
}
