//! Conformance harness: pass/fail accounting and the result channel
//!
//! Scenarios record outcomes through assertion primitives (`check`, `fail`)
//! and signal their overall verdict by writing the literal tokens `PAINTED`
//! or `FAIL` to a textual result channel. The channel defaults to stdout and
//! is pluggable so tests can capture it.

use std::fmt::Debug;
use std::io::{self, Write};

/// Records scenario outcomes and writes result tokens.
pub struct TestHarness {
    passed: u32,
    failed: u32,
    sink: Box<dyn Write + Send>,
}

impl Default for TestHarness {
    fn default() -> Self {
        Self::new()
    }
}

impl TestHarness {
    /// Create a harness reporting to stdout
    pub fn new() -> Self {
        Self::with_sink(Box::new(io::stdout()))
    }

    /// Create a harness reporting to the given sink
    pub fn with_sink(sink: Box<dyn Write + Send>) -> Self {
        Self { passed: 0, failed: 0, sink }
    }

    /// Record a boolean check
    pub fn check(&mut self, ok: bool) {
        if ok {
            self.passed += 1;
        } else {
            self.failed += 1;
            log::error!("check failed");
        }
    }

    /// Record an equality check, logging both sides on mismatch
    pub fn check_eq<T: PartialEq + Debug>(&mut self, actual: T, expected: T) {
        if actual == expected {
            self.passed += 1;
        } else {
            self.failed += 1;
            log::error!("check failed: expected {:?}, got {:?}", expected, actual);
        }
    }

    /// Record an unconditional failure
    pub fn fail(&mut self, message: &str) {
        self.failed += 1;
        log::error!("{}", message);
    }

    /// Number of passed checks
    pub fn passed(&self) -> u32 {
        self.passed
    }

    /// Number of failed checks
    pub fn failed(&self) -> u32 {
        self.failed
    }

    /// Whether every recorded check passed (and at least one ran)
    pub fn all_passed(&self) -> bool {
        self.failed == 0 && self.passed > 0
    }

    /// Write the `PAINTED` token to the result channel
    pub fn report_painted(&mut self) {
        self.emit("PAINTED");
    }

    /// Write the `FAIL` token to the result channel, with optional detail
    pub fn report_fail(&mut self, detail: Option<&str>) {
        match detail {
            Some(detail) => self.emit(&format!("FAIL - {}", detail)),
            None => self.emit("FAIL"),
        }
    }

    fn emit(&mut self, token: &str) {
        if let Err(e) = writeln!(self.sink, "{}", token).and_then(|_| self.sink.flush()) {
            log::warn!("result channel write failed: {}", e);
        }
    }

    /// Log a one-line pass/fail summary
    pub fn log_summary(&self) {
        log::info!("{} checks passed, {} failed", self.passed, self.failed);
    }
}
