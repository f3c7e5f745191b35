//! Alert composite conformance scenario
//!
//! Shows a non-expiring alert, polls its visibility the way the surface is
//! configured to (100ms cadence by default), and reports `PAINTED` once the
//! composite pass lands.

use std::process::ExitCode;

use display_runtime::prelude::*;

struct AlertPaintTest;

impl Applet for AlertPaintTest {
    fn start(&mut self, host: &mut Host) -> Result<(), Fault> {
        let alert = Alert::new("Hello World", "Some text", AlertType::Info)
            .with_timeout(TimeoutPolicy::Forever);
        let content = Content::alert(alert);
        let handle = content.handle();
        host.surface_mut().show(content);

        match host.surface().wait_shown(&handle) {
            Ok(()) => {
                host.harness_mut().check(true);
                host.harness_mut().report_painted();
                Ok(())
            }
            Err(fault) => match fault.kind() {
                FaultKind::Timeout | FaultKind::Interrupted => {
                    host.harness_mut().fail(&format!("alert never composited: {fault}"));
                    host.harness_mut().report_fail(None);
                    Ok(())
                }
                _ => Err(fault),
            },
        }
    }

    fn destroy(&mut self, _unconditional: bool) {}
}

fn main() -> ExitCode {
    display_runtime::logging::init();

    let mut scenario = AlertPaintTest;
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
