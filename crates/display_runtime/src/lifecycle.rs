//! Applet trait and the host that drives it
//!
//! Lifecycle is inverted: the host holds the test unit and calls into it; the
//! unit never drives its own lifecycle. The host owns the display surface and
//! the harness, handing both to the applet while it runs.

use thiserror::Error;

use crate::config::{ConfigError, RuntimeConfig};
use crate::fault::Fault;
use crate::harness::TestHarness;
use crate::surface::DisplaySurface;

/// A lifecycle-managed test unit.
///
/// Implement this to create a conformance scenario. The host calls `start`
/// once, may call `pause` while the unit is active, and always calls
/// `destroy` at the end.
pub trait Applet {
    /// Enter the active state.
    ///
    /// This is where a scenario builds its content, drives the surface, and
    /// records its checks. A returned fault aborts the run.
    fn start(&mut self, host: &mut Host) -> Result<(), Fault>;

    /// Notification that the unit is being paused
    fn pause(&mut self) {}

    /// Tear the unit down.
    ///
    /// `unconditional` is true when the host will destroy the unit regardless
    /// of its response.
    fn destroy(&mut self, unconditional: bool);
}

/// Host-level errors
#[derive(Error, Debug)]
pub enum HostError {
    /// Configuration rejected before the run started
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Fault propagated out of the applet
    #[error("applet fault: {0}")]
    Applet(#[from] Fault),
}

/// Outcome of a completed run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunSummary {
    /// Checks that passed
    pub passed: u32,

    /// Checks that failed
    pub failed: u32,
}

impl RunSummary {
    /// Whether the run recorded no failures and at least one pass
    pub fn all_passed(&self) -> bool {
        self.failed == 0 && self.passed > 0
    }
}

/// Drives an [`Applet`] through its lifecycle.
pub struct Host {
    surface: DisplaySurface,
    harness: TestHarness,
    config: RuntimeConfig,
}

impl Host {
    /// Create a host from a validated configuration
    pub fn new(config: RuntimeConfig) -> Result<Self, HostError> {
        config.validate()?;
        Ok(Self {
            surface: DisplaySurface::new(&config.surface),
            harness: TestHarness::new(),
            config,
        })
    }

    /// Run `applet` start-to-destroy under the given configuration.
    ///
    /// The applet is destroyed unconditionally whether or not `start`
    /// faulted; a fault surfaces as the run's error after teardown.
    pub fn run<A: Applet>(config: RuntimeConfig, applet: &mut A) -> Result<RunSummary, HostError> {
        let mut host = Self::new(config)?;

        log::info!("starting applet");
        let result = applet.start(&mut host);
        applet.destroy(true);
        host.harness.log_summary();

        result.map_err(HostError::Applet)?;
        Ok(RunSummary { passed: host.harness.passed(), failed: host.harness.failed() })
    }

    /// The display surface
    pub fn surface(&self) -> &DisplaySurface {
        &self.surface
    }

    /// Mutable access to the display surface
    pub fn surface_mut(&mut self) -> &mut DisplaySurface {
        &mut self.surface
    }

    /// The harness recording this run's checks
    pub fn harness(&self) -> &TestHarness {
        &self.harness
    }

    /// Mutable access to the harness
    pub fn harness_mut(&mut self) -> &mut TestHarness {
        &mut self.harness
    }

    /// The active configuration
    pub fn config(&self) -> &RuntimeConfig {
        &self.config
    }
}
