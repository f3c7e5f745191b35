//! # Display Runtime
//!
//! A minimal embedded display runtime with a conformance test harness.
//!
//! ## Features
//!
//! - **Display Surface**: single shown slot with asynchronous composite and
//!   poll-style visibility
//! - **Bounds-Checked Arrays**: fixed-length arrays raising structured,
//!   attributable out-of-bounds faults
//! - **Image Loading**: PNG decode and transformed region extraction
//! - **Lifecycle Host**: applets driven start-to-destroy by an external host
//! - **Conformance Harness**: pass/fail accounting and `PAINTED`/`FAIL`
//!   result tokens
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use display_runtime::prelude::*;
//!
//! struct MyScenario;
//!
//! impl Applet for MyScenario {
//!     fn start(&mut self, host: &mut Host) -> Result<(), Fault> {
//!         let alert = Alert::new("Hello", "World", AlertType::Info)
//!             .with_timeout(TimeoutPolicy::Forever);
//!         let content = Content::alert(alert);
//!         let handle = content.handle();
//!         host.surface_mut().show(content);
//!         host.surface().wait_shown(&handle)?;
//!         host.harness_mut().report_painted();
//!         Ok(())
//!     }
//!
//!     fn destroy(&mut self, _unconditional: bool) {}
//! }
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     display_runtime::logging::init();
//!     let mut scenario = MyScenario;
//!     Host::run(RuntimeConfig::default(), &mut scenario)?;
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions, clippy::similar_names, clippy::too_many_arguments)]

pub mod array;
pub mod config;
pub mod fault;
pub mod graphics;
pub mod harness;
pub mod image_loader;
pub mod lifecycle;
pub mod logging;
pub mod surface;

pub use fault::{Fault, FaultKind};
pub use lifecycle::{Applet, Host, HostError, RunSummary};
pub use surface::{Content, ContentHandle, DisplaySurface};

/// Common imports for runtime users
pub mod prelude {
    pub use crate::{
        array::{copy, FixedArray},
        config::{AssetConfig, Config, ConfigError, RuntimeConfig, SurfaceConfig},
        fault::{Fault, FaultKind},
        graphics::{Anchor, Framebuffer, Graphics},
        harness::TestHarness,
        image_loader::{ImageData, Transform},
        lifecycle::{Applet, Host, HostError, RunSummary},
        surface::{
            Alert, AlertType, Content, ContentHandle, DisplaySurface, Paintable, TimeoutPolicy,
        },
    };
}
