//! A simple counter for tracking volume extraction results.
use crate::types::*;
use std::sync::atomic::AtomicUsize;
use std::sync::atomic::Ordering::SeqCst;

/// A counter for tracking volume extraction results.
pub struct Counter {
    ok: AtomicUsize,
    ignored: AtomicUsize,
    error: AtomicUsize,
    warning: AtomicUsize,
}

impl Counter {
    /// Creates a new Counter instance.
    pub fn new() -> Self {
        Self {
            ok: AtomicUsize::new(0),
            ignored: AtomicUsize::new(0),
            error: AtomicUsize::new(0),
            warning: AtomicUsize::new(0),
        }
    }

    /// Increments the count of errors.
    pub fn inc_error(&self) {
        self.error.fetch_add(1, SeqCst);
    }

    /// Increments the count of warnings.
    pub fn inc_warning(&self) {
        self.warning.fetch_add(1, SeqCst);
    }

    /// Adds `count` warnings at once.
    pub fn add_warnings(&self, count: usize) {
        self.warning.fetch_add(count, SeqCst);
    }

    /// Increments the count of processed volumes.
    pub fn inc(&self, result: ScriptResult) {
        match result {
            ScriptResult::Ok => {
                self.ok.fetch_add(1, SeqCst);
            }
            ScriptResult::Ignored => {
                self.ignored.fetch_add(1, SeqCst);
            }
        }
    }

    pub fn errors(&self) -> usize {
        self.error.load(SeqCst)
    }
}

impl std::fmt::Display for Counter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "OK: {}, Ignored: {}, Error: {}, Warning: {}",
            self.ok.load(SeqCst),
            self.ignored.load(SeqCst),
            self.error.load(SeqCst),
            self.warning.load(SeqCst),
        )
    }
}

#[test]
fn test_counter_display() {
    let counter = Counter::new();
    counter.inc(ScriptResult::Ok);
    counter.inc(ScriptResult::Ok);
    counter.inc(ScriptResult::Ignored);
    counter.inc_error();
    counter.add_warnings(3);
    counter.inc_warning();
    assert_eq!(counter.errors(), 1);
    assert_eq!(
        counter.to_string(),
        "OK: 2, Ignored: 1, Error: 1, Warning: 4"
    );
}
