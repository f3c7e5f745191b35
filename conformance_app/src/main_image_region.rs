//! Image region extraction scenario
//!
//! A canvas painter fills the surface, decodes a PNG fixture, cuts the
//! `120x120` region at `(30, 30)`, and blits it at `(10, 10)` anchored
//! top-left. Decode and region failures are caught at the call site and
//! reported as `FAIL - <details>`; success reports `PAINTED`.
//!
//! The fixture is written to the temp directory on start and removed on
//! destroy, so the scenario needs no checked-in binary assets.

use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::{Arc, Mutex};

use display_runtime::prelude::*;

/// Outcome recorded by the painter, read back after the composite pass
type Outcome = Arc<Mutex<Option<Result<(), String>>>>;

fn record(outcome: &Outcome, result: Result<(), String>) {
    if let Ok(mut slot) = outcome.lock() {
        *slot = Some(result);
    }
}

/// Border and core colors of the generated fixture
const BORDER: [u8; 4] = [0x20, 0x20, 0x80, 0xFF];
const CORE: [u8; 4] = [0xE0, 0x60, 0x20, 0xFF];

/// Fixture file name, resolved through the configured asset search paths
const FIXTURE_NAME: &str = "image_region_fixture.png";

struct ImageRegionTest {
    fixture: PathBuf,
}

impl ImageRegionTest {
    fn new() -> Self {
        Self { fixture: std::env::temp_dir().join(FIXTURE_NAME) }
    }

    /// Write a 160x160 PNG whose `(30, 30)..(150, 150)` core is a distinct
    /// color, so the cut region is recognizable on the surface.
    fn write_fixture(&self) -> Result<(), Fault> {
        let mut logo = ImageData::solid_color(160, 160, BORDER);
        for y in 30..150 {
            for x in 30..150 {
                logo.set_pixel(x, y, CORE);
            }
        }
        logo.save_png(&self.fixture)
    }
}

impl Applet for ImageRegionTest {
    fn start(&mut self, host: &mut Host) -> Result<(), Fault> {
        self.write_fixture()?;

        let outcome: Outcome = Arc::new(Mutex::new(None));
        let painter_outcome = Arc::clone(&outcome);
        let search_paths = host.config().assets.search_paths.clone();

        let content = Content::canvas(move |g: &mut Graphics<'_>| {
            g.set_color(0x00FF_FFFF);
            g.fill_rect(0, 0, g.width(), g.height());

            let image = match ImageData::from_search_paths(&search_paths, FIXTURE_NAME) {
                Ok(image) => image,
                Err(e) => return record(&painter_outcome, Err(e.to_string())),
            };

            let region = match image.subregion(30, 30, 120, 120, Transform::None) {
                Ok(region) => region,
                Err(e) => return record(&painter_outcome, Err(e.to_string())),
            };

            g.draw_image(&region, 10, 10, Anchor::TOP | Anchor::LEFT);
            record(&painter_outcome, Ok(()));
        });
        let handle = content.handle();
        host.surface_mut().show(content);
        if let Err(fault) = host.surface().wait_shown(&handle) {
            match fault.kind() {
                FaultKind::Timeout | FaultKind::Interrupted => {
                    host.harness_mut().fail(&format!("canvas never composited: {fault}"));
                    host.harness_mut().report_fail(None);
                    return Ok(());
                }
                _ => return Err(fault),
            }
        }

        let recorded = outcome.lock().map(|slot| (*slot).clone()).unwrap_or(None);
        let harness = host.harness_mut();
        match recorded {
            Some(Ok(())) => {
                harness.check(true);
                harness.report_painted();
            }
            Some(Err(detail)) => {
                harness.fail(&detail);
                harness.report_fail(Some(&detail));
            }
            None => {
                harness.fail("painter never recorded an outcome");
                harness.report_fail(None);
            }
        }

        // The cut region's core color must have landed on the surface: the
        // region is all-core, so the blit at (10, 10) covers (70, 70).
        let fb = host.surface().snapshot();
        host.harness_mut().check_eq(fb.pixel(70, 70), CORE);
        Ok(())
    }

    fn destroy(&mut self, _unconditional: bool) {
        let _ = std::fs::remove_file(&self.fixture);
    }
}

fn main() -> ExitCode {
    display_runtime::logging::init();

    let mut scenario = ImageRegionTest::new();
    let mut config = RuntimeConfig::default();
    // The fixture lands in the temp directory; resolve it from there.
    config.assets.search_paths.push(std::env::temp_dir().display().to_string());
    match Host::run(config, &mut scenario) {
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
