//! Fault attribution scenario
//!
//! An out-of-bounds store inside a nested routine must unwind through a
//! handler declared for an unrelated fault kind and land in the matching
//! handler, carrying the offending index and the array length. Regression
//! coverage for the historical fall-through defect where the unrelated
//! handler intercepted the fault.

use std::process::ExitCode;

use display_runtime::prelude::*;

/// Absorbs only decode faults; everything else passes through untouched.
fn absorb_decode(result: Result<(), Fault>) -> Result<(), Fault> {
    match result {
        Err(fault) if fault.is(FaultKind::Decode) => {
            log::warn!("decode fault absorbed: {fault}");
            Ok(())
        }
        other => other,
    }
}

/// The nested routine under test: writes outside a length-1 array.
///
/// The handler wrapped around the access names an unrelated kind; the bounds
/// fault must pass it by.
fn store_out_of_range(values: &mut FixedArray<i32>) -> Result<(), Fault> {
    absorb_decode(values.store(10, 1))?;
    Ok(())
}

struct FaultLocationTest;

impl Applet for FaultLocationTest {
    fn start(&mut self, host: &mut Host) -> Result<(), Fault> {
        let mut values = FixedArray::<i32>::new(1);
        let untouched = values.load(0)?;
        let harness = host.harness_mut();

        match store_out_of_range(&mut values) {
            Ok(()) => harness.fail("out-of-range store did not fault"),
            Err(Fault::OutOfBounds { index, length }) => {
                harness.check_eq(index, 10);
                harness.check_eq(length, 1);
                harness.check(true);
            }
            Err(other) => harness.fail(&format!("wrong fault kind: {other}")),
        }

        // The rejected store must not have touched the array.
        host.harness_mut().check_eq(values.load(0)?, untouched);
        Ok(())
    }

    fn destroy(&mut self, _unconditional: bool) {}
}

fn main() -> ExitCode {
    display_runtime::logging::init();

    let mut scenario = FaultLocationTest;
    match Host::run(RuntimeConfig::default(), &mut scenario) {
        Ok(summary) if summary.all_passed() => ExitCode::SUCCESS,
        Ok(summary) => {
            log::error!("{} check(s) failed", summary.failed);
            ExitCode::FAILURE
        }
        Err(e) => {
            log::error!("run aborted: {e}");
            ExitCode::FAILURE
        }
    }
}
